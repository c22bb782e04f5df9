use super::destination::Destination;
use super::pattern::PageMatcher;
use super::trigger::Trigger;

/// A plain login-redirect rule record.
///
/// Rules are created via [`RuleSetBuilder`](super::RuleSet), by parsing a
/// DSL document with [`RuleSet::from_dsl()`](super::RuleSet::from_dsl), or
/// supplied by a [`RuleSource`](crate::RuleSource). Empty `pages` matches
/// every path; empty `roles` matches every actor, anonymous included;
/// `language: None` matches every language.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub id: String,
    pub label: String,
    pub weight: i32,
    pub enabled: bool,
    pub triggers: Vec<Trigger>,
    pub destination: String,
    pub pages: Vec<String>,
    pub language: Option<String>,
    pub roles: Vec<String>,
}

impl Rule {
    /// Create an enabled rule with the given id, weight 0, and every filter
    /// open. The destination starts empty and must be set before compiling.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            weight: 0,
            enabled: true,
            triggers: Vec::new(),
            destination: String::new(),
            pages: Vec::new(),
            language: None,
            roles: Vec::new(),
        }
    }
}

/// A rule whose page patterns and destination have been pre-compiled.
///
/// Produced by the compilation step and stored inside a
/// [`RuleSet`](super::RuleSet) in ascending `(weight, id)` order. The raw
/// destination and pattern strings are kept alongside their compiled forms
/// so the record can be reconstructed. A `None` destination marks a rule
/// whose destination string did not parse; such a rule is reported but
/// never selected.
#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) id: String,
    pub(crate) label: String,
    pub(crate) weight: i32,
    pub(crate) enabled: bool,
    pub(crate) triggers: Vec<Trigger>,
    pub(crate) destination_src: String,
    pub(crate) destination: Option<Destination>,
    pub(crate) pages_src: Vec<String>,
    pub(crate) pages: PageMatcher,
    pub(crate) language: Option<String>,
    pub(crate) roles: Vec<String>,
}

impl CompiledRule {
    /// Reconstruct the plain record this rule was compiled from.
    pub(crate) fn to_rule(&self) -> Rule {
        Rule {
            id: self.id.clone(),
            label: self.label.clone(),
            weight: self.weight,
            enabled: self.enabled,
            triggers: self.triggers.clone(),
            destination: self.destination_src.clone(),
            pages: self.pages_src.clone(),
            language: self.language.clone(),
            roles: self.roles.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rule_defaults() {
        let rule = Rule::new("welcome");
        assert_eq!(rule.id, "welcome");
        assert_eq!(rule.weight, 0);
        assert!(rule.enabled);
        assert!(rule.triggers.is_empty());
        assert!(rule.destination.is_empty());
        assert!(rule.pages.is_empty());
        assert_eq!(rule.language, None);
        assert!(rule.roles.is_empty());
    }
}
