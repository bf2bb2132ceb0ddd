//! Deep links into the IDE's custom URL scheme
//!
//! Format: `<scheme>://open?file=<enc>&line=<n>[&project=<enc>]`, with
//! components encoded like JavaScript's `encodeURIComponent`.

use ibridge_core::FileTarget;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::Path;

/// Characters left alone by `encodeURIComponent`: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single query component.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Build the `open` deep link for `target`, optionally scoped to `project`.
pub fn deep_link(scheme: &str, target: &FileTarget, project: Option<&Path>) -> String {
    let mut url = format!(
        "{}://open?file={}&line={}",
        scheme,
        encode_component(&target.path().to_string_lossy()),
        target.line()
    );
    if let Some(project) = project {
        url.push_str("&project=");
        url.push_str(&encode_component(&project.to_string_lossy()));
    }
    url
}
