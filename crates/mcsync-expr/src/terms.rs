//! Splitting flat conjunctions into per-slot terms and joining them back.
//!
//! Expressions tied to the answer options are a flat conjunction with exactly
//! one term per option. Terms never contain the delimiter themselves. The empty
//! text is the conjunction of zero terms.

pub const CONJUNCTION: &str = "&&";

/// The "don't care" term, used for options whose state does not matter.
pub const NEUTRAL_TERM: &str = "true()";

/// Splits `code` on the top-level conjunction delimiter.
pub fn split(code: &str) -> Vec<String> {
    if code.is_empty() {
        return Vec::new();
    }
    code.split(CONJUNCTION).map(str::to_string).collect()
}

/// Joins `terms` with the conjunction delimiter.
pub fn join<S: AsRef<str>>(terms: &[S]) -> String {
    let mut out = String::new();
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            out.push_str(CONJUNCTION);
        }
        out.push_str(term.as_ref());
    }
    out
}

/// Number of terms `split` would produce.
pub fn term_count(code: &str) -> usize {
    if code.is_empty() {
        0
    } else {
        code.matches(CONJUNCTION).count() + 1
    }
}
