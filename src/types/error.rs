use thiserror::Error;

/// Structural errors caught when compiling a rule set.
///
/// These cover authoring mistakes that must be rejected at the storage
/// boundary. Value-level problems (an unparseable destination, an invalid
/// page glob) are deliberately not compile errors: such rules compile into
/// the set but can never be selected, so resolution skips past them.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("duplicate rule id '{id}'")]
    DuplicateRuleId { id: String },

    #[error("rule id must not be empty")]
    EmptyRuleId,

    #[error("rule '{rule}' has no triggers")]
    NoTriggers { rule: String },

    #[error("rule '{rule}' has no destination")]
    MissingDestination { rule: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_rule_id_message() {
        let err = CompileError::DuplicateRuleId {
            id: "welcome".into(),
        };
        assert_eq!(err.to_string(), "duplicate rule id 'welcome'");
    }

    #[test]
    fn empty_rule_id_message() {
        assert_eq!(
            CompileError::EmptyRuleId.to_string(),
            "rule id must not be empty"
        );
    }

    #[test]
    fn no_triggers_message() {
        let err = CompileError::NoTriggers {
            rule: "welcome".into(),
        };
        assert_eq!(err.to_string(), "rule 'welcome' has no triggers");
    }

    #[test]
    fn missing_destination_message() {
        let err = CompileError::MissingDestination {
            rule: "welcome".into(),
        };
        assert_eq!(err.to_string(), "rule 'welcome' has no destination");
    }
}
