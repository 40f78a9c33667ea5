//! Helpers for GEDCOM cross-reference identifiers (`@I123@`).

/// True for strings shaped like a GEDCOM pointer: `@...@` with a non-empty body.
pub fn is_xref(s: &str) -> bool {
    s.len() > 2 && s.starts_with('@') && s.ends_with('@')
}

/// The canonical individual xref for a bare number: `123` → `@I123@`.
pub fn individual_xref(number: &str) -> String {
    format!("@I{}@", number.trim())
}
