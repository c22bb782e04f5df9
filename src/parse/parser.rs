use crate::types::Rule;

/// The result of parsing a DSL document.
#[derive(Debug)]
pub struct ParsedRules {
    pub rules: Vec<Rule>,
}
