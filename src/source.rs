use std::path::PathBuf;

use crate::types::Rule;
use crate::WaypostError;

/// A supplier of rule snapshots.
///
/// The resolver never owns persistence: an external admin or configuration
/// subsystem holds the rules, and a `RuleSource` hands over an owned
/// snapshot when a [`RuleSet`](crate::RuleSet) is (re)built. Implement this
/// to plug in a database, a config service, or anything else.
pub trait RuleSource {
    /// Produce a snapshot of all rule records, disabled ones included.
    ///
    /// # Errors
    ///
    /// Returns [`WaypostError`] if the snapshot cannot be produced.
    fn load(&self) -> Result<Vec<Rule>, WaypostError>;
}

/// An in-memory rule source.
#[derive(Debug, Clone, Default)]
pub struct StaticRules {
    rules: Vec<Rule>,
}

impl StaticRules {
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl RuleSource for StaticRules {
    fn load(&self) -> Result<Vec<Rule>, WaypostError> {
        Ok(self.rules.clone())
    }
}

/// A rule source backed by a DSL file on disk.
///
/// The file is re-read and re-parsed on every [`load()`](RuleSource::load),
/// so rebuilding a [`RuleSet`](crate::RuleSet) picks up edits.
#[derive(Debug, Clone)]
pub struct DslFile {
    path: PathBuf,
}

impl DslFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RuleSource for DslFile {
    fn load(&self) -> Result<Vec<Rule>, WaypostError> {
        let input = std::fs::read_to_string(&self.path)?;
        let parsed = crate::parse::parse(&input)?;
        Ok(parsed.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RuleSet, Trigger};

    fn sample_rule() -> Rule {
        let mut rule = Rule::new("sample");
        rule.triggers.push(Trigger::Login);
        rule.destination = "/landing".to_owned();
        rule
    }

    #[test]
    fn static_rules_load_clone() {
        let source = StaticRules::new(vec![sample_rule()]);
        let rules = source.load().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, "sample");
        // Loading again produces an independent snapshot.
        assert_eq!(source.load().unwrap().len(), 1);
    }

    #[test]
    fn ruleset_from_static_source() {
        let source = StaticRules::new(vec![sample_rule()]);
        let ruleset = RuleSet::from_source(&source).unwrap();
        assert_eq!(ruleset.resolution_order(), ["sample"]);
    }

    #[test]
    fn dsl_file_missing_is_io_error() {
        let source = DslFile::new("/nonexistent/waypost-rules.wp");
        assert!(matches!(source.load(), Err(WaypostError::Io(_))));
    }
}
