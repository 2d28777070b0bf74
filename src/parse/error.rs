use thiserror::Error;

/// Errors produced when parsing DSL input.
///
/// The message carries the offending line and column along with what the
/// parser expected at that point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error: {message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ParseError::new("expected ':'");
        assert_eq!(err.to_string(), "parse error: expected ':'");
        assert_eq!(err.message(), "expected ':'");
    }
}
