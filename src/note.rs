//! Note identifiers carried on the `play` port
//!
//! The application sends a note name such as `"C"` or `"D#"`. Nothing here
//! checks that the name is a real pitch; any string maps to an element id.

/// Prefix of every audio element id in the page markup
pub const DEFAULT_ELEMENT_PREFIX: &str = "audio-";

/// Lower-case a note name the way the page ids are written
pub fn normalize_note(note: &str) -> String {
    note.to_lowercase()
}

/// Build the element id for a note: `prefix + lowercase(note)`
///
/// Returns `None` for an empty note, which means "nothing to play".
pub fn element_id(prefix: &str, note: &str) -> Option<String> {
    if note.is_empty() {
        return None;
    }

    Some(format!("{}{}", prefix, normalize_note(note)))
}

/// Element id using the default `audio-` prefix
pub fn default_element_id(note: &str) -> Option<String> {
    element_id(DEFAULT_ELEMENT_PREFIX, note)
}
