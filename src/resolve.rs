use std::time::Instant;

use crate::types::{
    normalize_path, Actor, CompiledRule, Redirect, ResolutionReport, RuleOutcome, Trigger,
};

/// Walk the pre-sorted rules and return the first applicable redirect.
///
/// Rules arrive in ascending `(weight, id)` order, so the first rule that
/// classifies as [`RuleOutcome::Matched`] wins.
pub(crate) fn resolve(
    rules: &[CompiledRule],
    base: &str,
    trigger: Trigger,
    actor: &Actor,
    current_path: &str,
) -> Option<Redirect> {
    let path = normalize_path(current_path);
    for rule in rules {
        if classify(rule, trigger, actor, &path) == RuleOutcome::Matched {
            // Matched implies a parsed destination.
            if let Some(destination) = &rule.destination {
                return Some(Redirect::new(&rule.id, destination.resolve(base, &path)));
            }
        }
    }
    None
}

pub(crate) fn resolve_detailed(
    rules: &[CompiledRule],
    base: &str,
    trigger: Trigger,
    actor: &Actor,
    current_path: &str,
) -> ResolutionReport {
    let start = Instant::now();
    let path = normalize_path(current_path);

    let mut redirect = None;
    let mut outcomes = Vec::with_capacity(rules.len());
    for rule in rules {
        let outcome = classify(rule, trigger, actor, &path);
        if outcome == RuleOutcome::Matched && redirect.is_none() {
            if let Some(destination) = &rule.destination {
                redirect = Some(Redirect::new(&rule.id, destination.resolve(base, &path)));
            }
        }
        outcomes.push((rule.id.clone(), outcome));
    }

    ResolutionReport::new(redirect, outcomes, start.elapsed())
}

fn classify(rule: &CompiledRule, trigger: Trigger, actor: &Actor, path: &str) -> RuleOutcome {
    if !rule.enabled {
        return RuleOutcome::Disabled;
    }
    if !rule.triggers.contains(&trigger) {
        return RuleOutcome::TriggerMismatch;
    }
    if rule.pages.is_invalid() {
        return RuleOutcome::BadPattern;
    }
    if !rule.pages.matches(path) {
        return RuleOutcome::PageMismatch;
    }
    if let Some(language) = &rule.language {
        if actor.language() != Some(language.as_str()) {
            return RuleOutcome::LanguageMismatch;
        }
    }
    if !rule.roles.is_empty() && !rule.roles.iter().any(|role| actor.has_role(role)) {
        return RuleOutcome::RoleMismatch;
    }
    if rule.destination.is_none() {
        return RuleOutcome::BadDestination;
    }
    RuleOutcome::Matched
}
