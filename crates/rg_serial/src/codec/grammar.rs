//! Markers and name rules of the text form.

pub(crate) const NULL: &str = "~n";
pub(crate) const BACK_REFERENCE: &str = "~r";
pub(crate) const OBJECT: &str = "~o";
pub(crate) const LIST: &str = "~l";
pub(crate) const MAP: &str = "~m";
pub(crate) const VALUE: &str = "~v";
pub(crate) const STRING: &str = "~[";

/// The byte that starts every marker.
pub(crate) const SIGIL: u8 = b'~';

/// Returns `true` if `type_ref` is a token rather than a type path.
#[inline]
pub(crate) fn is_token(type_ref: &str) -> bool {
    !type_ref.is_empty() && type_ref.bytes().all(|b| b.is_ascii_digit())
}

/// Returns `true` if `type_path` can appear in an object header.
///
/// It must be non-empty, must not look like a token, and must not contain
/// the field separator `|` or the sigil `~`.
pub(crate) fn is_valid_type_path(type_path: &str) -> bool {
    !type_path.is_empty()
        && !is_token(type_path)
        && !type_path.bytes().any(|b| b == b'|' || b == SIGIL)
}

#[cfg(test)]
mod tests {
    use super::{is_token, is_valid_type_path};

    #[test]
    fn tokens_are_all_digits() {
        assert!(is_token("0"));
        assert!(is_token("42"));
        assert!(!is_token(""));
        assert!(!is_token("4a"));
    }

    #[test]
    fn type_path_validation() {
        assert!(is_valid_type_path("app::Node"));
        assert!(is_valid_type_path("[u8; 4]"));
        assert!(is_valid_type_path("alloc::vec::Vec<i32>"));
        assert!(!is_valid_type_path(""));
        assert!(!is_valid_type_path("123"));
        assert!(!is_valid_type_path("a|b"));
        assert!(!is_valid_type_path("a~b"));
    }
}
