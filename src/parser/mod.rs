//! Line-oriented parsing of properties source text
//!
//! The format is deliberately forgiving: `#` comments are stripped, `[name]`
//! lines open namespaces, `key=value` lines populate whichever namespace the
//! cursor rests on, and anything else is dropped without an error.

use log::{debug, trace};

use crate::store::PropertyStore;

const COMMENT_MARKER: char = '#';

/// Parse properties source text into `store`, line by line.
pub(crate) fn parse_into(store: &mut PropertyStore, source: &str) {
    for line in source.lines() {
        let line = line.trim();

        // a marker in the first column comments out the whole line
        if line.starts_with(COMMENT_MARKER) {
            continue;
        }
        let line = strip_trailing_comment(line);

        if let Some(name) = namespace_header(line) {
            debug!("opening namespace '{}'", name);
            store.open_namespace(name);
        } else if let Some((key, value)) = split_pair(line) {
            store.set_current(key, value);
        } else if !line.is_empty() {
            trace!("skipping malformed line: {}", line);
        }
    }

    debug!("parsed {} namespace(s)", store.namespace_count());
}

/// Cut the line at a comment marker appearing past the first column, then
/// re-trim.
pub fn strip_trailing_comment(line: &str) -> &str {
    match line.find(COMMENT_MARKER) {
        Some(pos) if pos > 0 => line[..pos].trim(),
        _ => line,
    }
}

/// The namespace name if the line is a `[name]` header. The name is the text
/// strictly between the brackets, kept verbatim.
pub fn namespace_header(line: &str) -> Option<&str> {
    if line.starts_with('[') && line.ends_with(']') {
        Some(&line[1..line.len() - 1])
    } else {
        None
    }
}

/// Split a `key=value` line on its first `=`, trimming both sides. A line
/// whose `=` sits in the first column has no key and does not count; a value
/// containing further `=` characters keeps them verbatim.
pub fn split_pair(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    if key.is_empty() {
        return None;
    }

    Some((key.trim(), value.trim()))
}
