use std::collections::HashSet;

use crate::types::{CompileError, CompiledRule, Destination, PageMatcher, Rule, RuleSet};

pub(crate) fn compile(mut rules: Vec<Rule>, base: String) -> Result<RuleSet, CompileError> {
    check_ids(&rules)?;
    check_shape(&rules)?;

    // Consideration order: ascending weight, ties broken by id. Ids are
    // unique, so the order is total and deterministic.
    rules.sort_by(|a, b| a.weight.cmp(&b.weight).then_with(|| a.id.cmp(&b.id)));

    let compiled = rules.into_iter().map(compile_rule).collect();

    Ok(RuleSet {
        rules: compiled,
        base,
    })
}

fn check_ids(rules: &[Rule]) -> Result<(), CompileError> {
    let mut seen = HashSet::new();
    for rule in rules {
        if rule.id.is_empty() {
            return Err(CompileError::EmptyRuleId);
        }
        if !seen.insert(&rule.id) {
            return Err(CompileError::DuplicateRuleId {
                id: rule.id.clone(),
            });
        }
    }
    Ok(())
}

fn check_shape(rules: &[Rule]) -> Result<(), CompileError> {
    for rule in rules {
        if rule.triggers.is_empty() {
            return Err(CompileError::NoTriggers {
                rule: rule.id.clone(),
            });
        }
        if rule.destination.trim().is_empty() {
            return Err(CompileError::MissingDestination {
                rule: rule.id.clone(),
            });
        }
    }
    Ok(())
}

/// Pattern and destination compilation is lenient: a bad glob or an
/// unparseable destination keeps the rule in the set but makes it
/// unselectable, so resolution can skip past it.
fn compile_rule(rule: Rule) -> CompiledRule {
    let pages = PageMatcher::compile(&rule.pages);
    let destination = Destination::parse(&rule.destination).ok();

    CompiledRule {
        id: rule.id,
        label: rule.label,
        weight: rule.weight,
        enabled: rule.enabled,
        triggers: rule.triggers,
        destination_src: rule.destination,
        destination,
        pages_src: rule.pages,
        pages,
        language: rule.language,
        roles: rule.roles,
    }
}
