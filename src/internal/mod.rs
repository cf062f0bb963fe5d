//! This module is not considered public api.
//!
//! It holds the codecs the field types are built upon.
//! Anyway feel free to look at and maybe even use it.

pub mod duration_text;
pub mod hstore_codec;
pub mod number_codec;
pub mod serde_json_field;
pub mod string_codec;

/// Strip one leading `open` and one trailing `close` if present
pub(crate) fn strip_delimiters(text: &str, open: char, close: char) -> &str {
    let text = text.strip_prefix(open).unwrap_or(text);
    text.strip_suffix(close).unwrap_or(text)
}
