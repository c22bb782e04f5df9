use std::fmt;

/// Error produced when a DSL document fails to parse.
///
/// Carries the rendered parser diagnostic (winnow's error display, which
/// includes the offending line and a caret).
#[derive(Debug)]
pub struct ParseError {
    detail: String,
}

impl ParseError {
    pub(crate) fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// The rendered parser diagnostic.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid rule document: {}", self.detail)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ParseError::new("expected rule id");
        assert_eq!(err.to_string(), "invalid rule document: expected rule id");
        assert_eq!(err.detail(), "expected rule id");
    }
}
