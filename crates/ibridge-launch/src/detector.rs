//! Open-project detection
//!
//! Purely heuristic: the IDE shows the project directory name in its window
//! titles, so a project counts as open when any IDE window title mentions
//! the root's base name. False negatives are fine because re-opening an
//! already open project only refocuses it.

use ibridge_core::prelude::*;
use ibridge_core::ProjectRoot;

use crate::ports::WindowQuery;

/// Whether the IDE already shows `root`. Never fails: query errors count as
/// "not open" so the caller re-launches instead of silently doing nothing.
pub fn is_project_open(root: &ProjectRoot, query: &dyn WindowQuery) -> bool {
    match query.ide_window_titles() {
        Ok(titles) => {
            let open = titles_mention_project(&titles, &root.name());
            debug!(
                "Project {:?} {} among {} IDE window(s)",
                root.name(),
                if open { "found" } else { "not found" },
                titles.len()
            );
            open
        }
        Err(e) => {
            warn!("{}", Error::open_detection(e.to_string()));
            false
        }
    }
}

/// Case-insensitive substring match of `project_name` against `titles`.
pub fn titles_mention_project(titles: &[String], project_name: &str) -> bool {
    let needle = project_name.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }
    titles
        .iter()
        .any(|title| title.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockWindowQuery;
    use ibridge_core::MarkerTier;
    use std::io;

    fn root(path: &str) -> ProjectRoot {
        ProjectRoot::new(path, MarkerTier::High, ".git")
    }

    #[test]
    fn test_open_when_title_contains_project_name() {
        let mut query = MockWindowQuery::new();
        query.expect_ide_window_titles().returning(|| {
            Ok(vec![
                "shop-backend – OrderService.java [shop-backend]".to_string(),
                "IntelliJ IDEA".to_string(),
            ])
        });

        assert!(is_project_open(&root("/work/shop-backend"), &query));
    }

    #[test]
    fn test_not_open_when_no_title_matches() {
        let mut query = MockWindowQuery::new();
        query
            .expect_ide_window_titles()
            .returning(|| Ok(vec!["inventory – Main.kt".to_string()]));

        assert!(!is_project_open(&root("/work/shop-backend"), &query));
    }

    #[test]
    fn test_not_open_without_ide_windows() {
        let mut query = MockWindowQuery::new();
        query.expect_ide_window_titles().returning(|| Ok(Vec::new()));

        assert!(!is_project_open(&root("/work/app"), &query));
    }

    #[test]
    fn test_query_failure_counts_as_not_open() {
        let mut query = MockWindowQuery::new();
        query
            .expect_ide_window_titles()
            .times(1)
            .returning(|| Err(io::Error::other("osascript not permitted")));

        assert!(!is_project_open(&root("/work/app"), &query));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let titles = vec!["MyProject – build.gradle".to_string()];
        assert!(titles_mention_project(&titles, "myproject"));
        assert!(titles_mention_project(&titles, "MYPROJECT"));
    }

    #[test]
    fn test_empty_project_name_never_matches() {
        let titles = vec!["anything".to_string()];
        assert!(!titles_mention_project(&titles, ""));
        assert!(!titles_mention_project(&titles, "   "));
    }
}
