use std::fmt;
use std::time::Duration;

use super::redirect::Redirect;

/// Why a rule did or did not apply during one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Every filter passed and the destination resolved. The first rule with
    /// this outcome wins.
    Matched,
    /// The rule is disabled.
    Disabled,
    /// The rule does not listen for this trigger.
    TriggerMismatch,
    /// One of the rule's page patterns failed to compile.
    BadPattern,
    /// No page pattern matched the current path.
    PageMismatch,
    /// The rule's language filter differs from the actor's language.
    LanguageMismatch,
    /// The actor holds none of the rule's roles.
    RoleMismatch,
    /// The rule's destination could not be parsed.
    BadDestination,
}

impl fmt::Display for RuleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RuleOutcome::Matched => "matched",
            RuleOutcome::Disabled => "disabled",
            RuleOutcome::TriggerMismatch => "trigger mismatch",
            RuleOutcome::BadPattern => "bad pattern",
            RuleOutcome::PageMismatch => "page mismatch",
            RuleOutcome::LanguageMismatch => "language mismatch",
            RuleOutcome::RoleMismatch => "role mismatch",
            RuleOutcome::BadDestination => "bad destination",
        };
        write!(f, "{s}")
    }
}

/// Detailed resolution report returned by
/// [`RuleSet::resolve_detailed()`](super::ruleset::RuleSet::resolve_detailed).
///
/// Unlike [`resolve()`](super::ruleset::RuleSet::resolve), the detailed path
/// classifies every rule in consideration order instead of stopping at the
/// first match; later rules that also pass every filter still report
/// [`RuleOutcome::Matched`] even though they did not win.
#[derive(Debug, Clone)]
#[must_use]
pub struct ResolutionReport {
    redirect: Option<Redirect>,
    outcomes: Vec<(String, RuleOutcome)>,
    duration: Duration,
}

impl ResolutionReport {
    pub(crate) fn new(
        redirect: Option<Redirect>,
        outcomes: Vec<(String, RuleOutcome)>,
        duration: Duration,
    ) -> Self {
        Self {
            redirect,
            outcomes,
            duration,
        }
    }

    /// The winning redirect, same as
    /// [`RuleSet::resolve()`](super::ruleset::RuleSet::resolve).
    #[must_use]
    pub fn redirect(&self) -> Option<&Redirect> {
        self.redirect.as_ref()
    }

    /// Per-rule outcomes in consideration order (ascending `(weight, id)`).
    #[must_use]
    pub fn outcomes(&self) -> &[(String, RuleOutcome)] {
        &self.outcomes
    }

    /// The outcome recorded for a specific rule id, if the rule exists.
    #[must_use]
    pub fn outcome_of(&self, rule_id: &str) -> Option<RuleOutcome> {
        self.outcomes
            .iter()
            .find(|(id, _)| id == rule_id)
            .map(|(_, outcome)| *outcome)
    }

    /// Wall-clock duration of the resolution.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for ResolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.redirect {
            Some(r) => write!(f, "redirect: {r}")?,
            None => write!(f, "redirect: none")?,
        }
        write!(f, ", considered: {}", self.outcomes.len())?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
