use std::fmt;

use super::actor::Actor;
use super::error::CompileError;
use super::redirect::Redirect;
use super::report::ResolutionReport;
use super::rule::{CompiledRule, Rule};
use super::trigger::Trigger;
use crate::source::RuleSource;

/// Builder for constructing a [`RuleSet`].
///
/// Rules are defined via closures and compiled into an immutable,
/// thread-safe set ordered by `(weight, id)`.
///
/// # Example
///
/// ```
/// use waypost::{RuleSetBuilder, Trigger};
///
/// let ruleset = RuleSetBuilder::new()
///     .rule("editors", |r| {
///         r.on(Trigger::Login).role("editor").to("/dashboard")
///     })
///     .rule("everyone", |r| r.on(Trigger::Login).weight(10).to("/welcome"))
///     .compile()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: Vec<Rule>,
    base: String,
}

/// Intermediate builder passed to the rule definition closure.
#[derive(Debug)]
pub struct RuleBuilder {
    rule: Rule,
}

impl RuleSetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL that internal destinations resolve against.
    /// Defaults to empty, which yields site-root-relative URIs.
    #[must_use]
    pub fn base(mut self, base: &str) -> Self {
        self.base = base.to_owned();
        self
    }

    /// Define a rule. The closure must call `.on(trigger)` at least once and
    /// `.to(destination)`, or compilation will fail with
    /// [`CompileError::NoTriggers`] or [`CompileError::MissingDestination`].
    #[must_use]
    pub fn rule(mut self, id: &str, f: impl FnOnce(RuleBuilder) -> RuleBuilder) -> Self {
        let builder = f(RuleBuilder {
            rule: Rule::new(id),
        });
        self.rules.push(builder.rule);
        self
    }

    /// Add an already-constructed rule record.
    #[must_use]
    pub fn push(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Compile the rules into an immutable `RuleSet`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if validation fails.
    pub fn compile(self) -> Result<RuleSet, CompileError> {
        crate::compile::compile(self.rules, self.base)
    }
}

impl RuleBuilder {
    /// Set the human-readable label.
    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        self.rule.label = label.to_owned();
        self
    }

    /// Add a trigger this rule responds to. May be called repeatedly.
    #[must_use]
    pub fn on(mut self, trigger: Trigger) -> Self {
        self.rule.triggers.push(trigger);
        self
    }

    /// Set the destination string.
    #[must_use]
    pub fn to(mut self, destination: &str) -> Self {
        self.rule.destination = destination.to_owned();
        self
    }

    /// Add a page pattern. May be called repeatedly; no patterns means the
    /// rule applies on every path.
    #[must_use]
    pub fn page(mut self, pattern: &str) -> Self {
        self.rule.pages.push(pattern.to_owned());
        self
    }

    /// Restrict the rule to one language code.
    #[must_use]
    pub fn language(mut self, language: &str) -> Self {
        self.rule.language = Some(language.to_owned());
        self
    }

    /// Add a required role. May be called repeatedly; no roles means the
    /// rule applies to every actor.
    #[must_use]
    pub fn role(mut self, role: &str) -> Self {
        self.rule.roles.push(role.to_owned());
        self
    }

    /// Set the evaluation weight. Lower weights are considered first.
    #[must_use]
    pub fn weight(mut self, weight: i32) -> Self {
        self.rule.weight = weight;
        self
    }

    /// Mark the rule disabled. It stays in the set but never matches.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.rule.enabled = false;
        self
    }
}

/// A compiled, immutable rule set. Thread-safe and designed to live behind
/// `Arc`.
#[derive(Debug)]
pub struct RuleSet {
    /// Rules in ascending `(weight, id)` order.
    pub(crate) rules: Vec<CompiledRule>,
    pub(crate) base: String,
}

impl RuleSet {
    /// Resolve an authentication event against this rule set.
    ///
    /// Returns the redirect produced by the first rule (in `(weight, id)`
    /// order) whose filters all pass and whose destination resolves, or
    /// `None` if no rule applies, in which case the caller falls back to its
    /// default post-login behavior.
    #[must_use]
    pub fn resolve(&self, trigger: Trigger, actor: &Actor, current_path: &str) -> Option<Redirect> {
        crate::resolve::resolve(&self.rules, &self.base, trigger, actor, current_path)
    }

    /// Resolve with detailed diagnostics.
    ///
    /// Returns a [`ResolutionReport`] with the redirect, every rule's
    /// outcome in consideration order, and timing information.
    pub fn resolve_detailed(
        &self,
        trigger: Trigger,
        actor: &Actor,
        current_path: &str,
    ) -> ResolutionReport {
        crate::resolve::resolve_detailed(&self.rules, &self.base, trigger, actor, current_path)
    }

    /// Compile a plain list of rule records into a `RuleSet`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if validation fails.
    pub fn from_rules(rules: Vec<Rule>) -> Result<Self, CompileError> {
        crate::compile::compile(rules, String::new())
    }

    /// Parse a DSL document and compile it into a `RuleSet`.
    ///
    /// This is a convenience method combining the DSL parser and
    /// [`RuleSetBuilder::compile()`].
    ///
    /// # Errors
    ///
    /// Returns [`WaypostError`](crate::WaypostError) on parse or compile
    /// failure.
    pub fn from_dsl(input: &str) -> Result<Self, crate::WaypostError> {
        let parsed = crate::parse::parse(input)?;
        let ruleset = crate::compile::compile(parsed.rules, String::new())?;
        Ok(ruleset)
    }

    /// Read a DSL file and compile it into a `RuleSet`.
    ///
    /// # Errors
    ///
    /// Returns [`WaypostError`](crate::WaypostError) on I/O, parse, or
    /// compile failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::WaypostError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_dsl(&input)
    }

    /// Load a snapshot from a [`RuleSource`] and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`WaypostError`](crate::WaypostError) if loading or
    /// compilation fails.
    pub fn from_source(source: &dyn RuleSource) -> Result<Self, crate::WaypostError> {
        let rules = source.load()?;
        let ruleset = crate::compile::compile(rules, String::new())?;
        Ok(ruleset)
    }

    /// Replace the base URL internal destinations resolve against.
    #[must_use]
    pub fn with_base(mut self, base: &str) -> Self {
        self.base = base.to_owned();
        self
    }

    /// The configured base URL.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Rule ids in consideration order: ascending weight, ties broken by id.
    #[must_use]
    pub fn resolution_order(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id.as_str()).collect()
    }

    /// Reconstruct the plain rule records this set was compiled from, in
    /// consideration order.
    #[must_use]
    pub fn to_rules(&self) -> Vec<Rule> {
        self.rules.iter().map(CompiledRule::to_rule).collect()
    }

    /// The label of a rule, if the rule exists.
    #[must_use]
    pub fn label_of(&self, rule_id: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.id == rule_id)
            .map(|r| r.label.as_str())
    }

    /// The number of rules in the set, disabled rules included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set holds no rules at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(feature = "binary-cache")]
impl RuleSet {
    /// Serialize this compiled rule set to a byte vector.
    ///
    /// The optional `source_text` is hashed (BLAKE3) and embedded in the
    /// payload metadata. Callers can use this to detect when the original
    /// source has changed and the cache should be rebuilt.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`](crate::serial::SerializeError) if encoding
    /// fails.
    pub fn to_bytes(
        &self,
        source_text: Option<&str>,
    ) -> Result<Vec<u8>, crate::serial::SerializeError> {
        crate::serial::encode(self, source_text)
    }

    /// Deserialize a compiled rule set from a byte slice previously
    /// produced by [`to_bytes`](Self::to_bytes).
    ///
    /// # Errors
    ///
    /// Returns [`DeserializeError`](crate::serial::DeserializeError) on
    /// format, integrity, or validation failure.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, crate::serial::DeserializeError> {
        crate::serial::decode(bytes)
    }

    /// Serialize this compiled rule set and write it to a file.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`](crate::serial::SerializeError) on encoding
    /// or I/O failure.
    pub fn to_binary_file(
        &self,
        path: impl AsRef<std::path::Path>,
        source_text: Option<&str>,
    ) -> Result<(), crate::serial::SerializeError> {
        let bytes = self.to_bytes(source_text)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Read a file and deserialize the compiled rule set it contains.
    ///
    /// # Errors
    ///
    /// Returns [`DeserializeError`](crate::serial::DeserializeError) on I/O,
    /// format, integrity, or validation failure.
    pub fn from_binary_file(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, crate::serial::DeserializeError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let enabled = self.rules.iter().filter(|r| r.enabled).count();
        write!(
            f,
            "RuleSet({} rules, {} enabled)",
            self.rules.len(),
            enabled,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_rules() {
        let builder = RuleSetBuilder::new()
            .rule("editors", |r| {
                r.label("Editor dashboard")
                    .on(Trigger::Login)
                    .role("editor")
                    .to("/dashboard")
                    .weight(-5)
            })
            .rule("everyone", |r| r.on(Trigger::Login).to("/welcome"));

        assert_eq!(builder.rules.len(), 2);
        assert_eq!(builder.rules[0].id, "editors");
        assert_eq!(builder.rules[0].label, "Editor dashboard");
        assert_eq!(builder.rules[0].weight, -5);
        assert_eq!(builder.rules[0].roles, ["editor"]);
        assert_eq!(builder.rules[1].id, "everyone");
        assert_eq!(builder.rules[1].weight, 0);
    }

    #[test]
    fn builder_full_projected_api() {
        let _builder = RuleSetBuilder::new()
            .base("https://example.org")
            .rule("password_reset", |r| {
                r.on(Trigger::OneTimeLogin).to("/user/password").weight(-10)
            })
            .rule("editors", |r| {
                r.on(Trigger::Login)
                    .on(Trigger::Registration)
                    .role("editor")
                    .role("admin")
                    .page("/user/*")
                    .language("en")
                    .to("/dashboard")
            })
            .rule("logout_front", |r| r.on(Trigger::Logout).to("<front>"))
            .rule("retired", |r| r.on(Trigger::Login).to("/old").disabled());
    }

    #[test]
    fn builder_rule_without_destination_returns_error() {
        let result = RuleSetBuilder::new()
            .rule("bad_rule", |r| r.on(Trigger::Login))
            .compile();
        assert!(matches!(
            result,
            Err(CompileError::MissingDestination { rule }) if rule == "bad_rule"
        ));
    }

    #[test]
    fn builder_rule_without_triggers_returns_error() {
        let result = RuleSetBuilder::new()
            .rule("bad_rule", |r| r.to("/somewhere"))
            .compile();
        assert!(matches!(
            result,
            Err(CompileError::NoTriggers { rule }) if rule == "bad_rule"
        ));
    }

    #[test]
    fn push_accepts_plain_records() {
        let mut rule = Rule::new("manual");
        rule.triggers.push(Trigger::Login);
        rule.destination = "/here".to_owned();

        let ruleset = RuleSetBuilder::new().push(rule).compile().unwrap();
        assert_eq!(ruleset.len(), 1);
        assert_eq!(ruleset.resolution_order(), ["manual"]);
    }

    #[test]
    fn resolution_order_sorts_by_weight_then_id() {
        let ruleset = RuleSetBuilder::new()
            .rule("b", |r| r.on(Trigger::Login).weight(5).to("/b"))
            .rule("a", |r| r.on(Trigger::Login).weight(5).to("/a"))
            .rule("z", |r| r.on(Trigger::Login).weight(-1).to("/z"))
            .compile()
            .unwrap();
        assert_eq!(ruleset.resolution_order(), ["z", "a", "b"]);
    }

    #[test]
    fn label_of_finds_rules() {
        let ruleset = RuleSetBuilder::new()
            .rule("editors", |r| {
                r.label("Editor dashboard").on(Trigger::Login).to("/d")
            })
            .compile()
            .unwrap();
        assert_eq!(ruleset.label_of("editors"), Some("Editor dashboard"));
        assert_eq!(ruleset.label_of("missing"), None);
    }

    #[test]
    fn display_counts_enabled_rules() {
        let ruleset = RuleSetBuilder::new()
            .rule("on", |r| r.on(Trigger::Login).to("/a"))
            .rule("off", |r| r.on(Trigger::Login).to("/b").disabled())
            .compile()
            .unwrap();
        assert_eq!(ruleset.to_string(), "RuleSet(2 rules, 1 enabled)");
    }

    #[test]
    fn to_rules_round_trips_records() {
        let ruleset = RuleSetBuilder::new()
            .rule("editors", |r| {
                r.label("Editors")
                    .on(Trigger::Login)
                    .role("editor")
                    .page("/user/*")
                    .language("en")
                    .to("/dashboard")
                    .weight(-5)
            })
            .compile()
            .unwrap();

        let rules = ruleset.to_rules();
        assert_eq!(rules.len(), 1);
        let recompiled = RuleSet::from_rules(rules.clone()).unwrap();
        assert_eq!(recompiled.to_rules(), rules);
    }

    #[test]
    fn empty_ruleset_compiles() {
        let ruleset = RuleSetBuilder::new().compile().unwrap();
        assert!(ruleset.is_empty());
        assert_eq!(ruleset.len(), 0);
    }
}
