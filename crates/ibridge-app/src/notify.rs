//! User-facing notifications
//!
//! The jump command reports through a [`Notifier`] so front ends decide how
//! messages reach the user. Every message is mirrored to the log.

use ibridge_core::prelude::*;

/// Sink for user-visible messages.
pub trait Notifier {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Prints to stderr, keeping stdout free for command output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn info(&self, message: &str) {
        info!("{}", message);
        eprintln!("{}", message);
    }

    fn warn(&self, message: &str) {
        warn!("{}", message);
        eprintln!("warning: {}", message);
    }

    fn error(&self, message: &str) {
        error!("{}", message);
        eprintln!("error: {}", message);
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub use recording::{Notice, RecordingNotifier};

#[cfg(any(test, feature = "test-helpers"))]
mod recording {
    use super::Notifier;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Notice {
        Info(String),
        Warn(String),
        Error(String),
    }

    /// Collects notices for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        notices: RefCell<Vec<Notice>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn notices(&self) -> Vec<Notice> {
            self.notices.borrow().clone()
        }

        pub fn errors(&self) -> Vec<String> {
            self.notices
                .borrow()
                .iter()
                .filter_map(|n| match n {
                    Notice::Error(m) => Some(m.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn info(&self, message: &str) {
            self.notices.borrow_mut().push(Notice::Info(message.to_string()));
        }

        fn warn(&self, message: &str) {
            self.notices.borrow_mut().push(Notice::Warn(message.to_string()));
        }

        fn error(&self, message: &str) {
            self.notices
                .borrow_mut()
                .push(Notice::Error(message.to_string()));
        }
    }
}
