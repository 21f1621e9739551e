//! Error taxonomy for the crate.

/// Type alias for `Result` with the crate's default `Error`.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by graph construction, prefix/URI resolution, and parsing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A grammar violation at a specific source position.
    #[error("syntax error at byte {pos}: {message} (near {context:?})")]
    Syntax {
        /// Byte offset into the parsed document.
        pos: usize,
        /// Human-readable description of what was expected.
        message: String,
        /// A bounded snippet of the remaining input at the failure point.
        context: String,
    },

    /// An empty prefix with no base, or a missing prefix binding.
    #[error("cannot resolve: {0}")]
    Resolution(String),

    /// Attempt to construct a triple with an invalid subject/predicate shape.
    #[error("invalid triple: {0}")]
    Structural(String),

    /// Internal invariant violation: pop from an empty parser stack.
    #[error("parser stack underflow: {0}")]
    StackUnderflow(String),

    /// A read failure from a file or URL.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Maximum length of the context snippet attached to a [`Error::Syntax`].
pub const MAX_CTX_LEN: usize = 48;

/// Builds an [`Error::Syntax`] from the remaining input at the point of
/// failure, truncating the context to [`MAX_CTX_LEN`] bytes.
pub fn syntax_error(consumed: usize, remaining: &str, message: impl Into<String>) -> Error {
    Error::Syntax {
        pos: consumed,
        message: message.into(),
        context: bounded_context(remaining),
    }
}

fn bounded_context(remaining: &str) -> String {
    if remaining.len() > MAX_CTX_LEN {
        let mut end = MAX_CTX_LEN;
        while !remaining.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &remaining[..end])
    } else {
        remaining.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_truncated() {
        let long = "a".repeat(100);
        let err = syntax_error(5, &long, "expected '.'");
        match err {
            Error::Syntax { pos, context, .. } => {
                assert_eq!(pos, 5);
                assert_eq!(context.len(), MAX_CTX_LEN + 3);
            }
            _ => panic!("expected Syntax variant"),
        }
    }

    #[test]
    fn short_context_is_kept_whole() {
        let err = syntax_error(0, "abc", "expected more");
        match err {
            Error::Syntax { context, .. } => assert_eq!(context, "abc"),
            _ => panic!("expected Syntax variant"),
        }
    }
}
