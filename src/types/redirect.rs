use std::fmt;

/// The outcome of a successful resolution: which rule matched and the
/// concrete URI to redirect to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Redirect {
    rule_id: String,
    uri: String,
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.rule_id, self.uri)
    }
}

impl Redirect {
    pub fn new(rule_id: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            uri: uri.into(),
        }
    }

    /// The id of the rule that produced this redirect.
    #[must_use]
    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    /// The resolved destination URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }
}
