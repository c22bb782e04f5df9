use std::str::FromStr;

use winnow::ascii::{dec_int, till_line_ending};
use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat, separated};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use crate::types::{Rule, Trigger};

use super::parser::ParsedRules;

// -- Whitespace & comments --------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_ascii_whitespace()).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

// -- Identifiers ------------------------------------------------------------

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| {
            c.is_ascii_alphanumeric() || c == '_' || c == '.'
        }),
    )
        .take()
        .parse_next(input)
}

// -- String literals --------------------------------------------------------

fn string_literal(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = any.parse_next(input)?;
        match ch {
            '"' => return Ok(s),
            '\\' => {
                let esc = any.parse_next(input)?;
                match esc {
                    '"' => s.push('"'),
                    '\\' => s.push('\\'),
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            c => s.push(c),
        }
    }
}

fn string_value(input: &mut &str) -> ModalResult<String> {
    preceded(ws, string_literal)
        .context(StrContext::Expected(StrContextValue::Description(
            "quoted string",
        )))
        .parse_next(input)
}

// -- Clause item lists ------------------------------------------------------

fn trigger_name(input: &mut &str) -> ModalResult<Trigger> {
    preceded(ws, ident)
        .try_map(Trigger::from_str)
        .parse_next(input)
}

fn trigger_list(input: &mut &str) -> ModalResult<Vec<Trigger>> {
    separated(1.., trigger_name, (ws, ','))
        .context(StrContext::Expected(StrContextValue::Description(
            "trigger list",
        )))
        .parse_next(input)
}

fn name_list(input: &mut &str) -> ModalResult<Vec<String>> {
    separated(1.., preceded(ws, ident.map(str::to_owned)), (ws, ','))
        .context(StrContext::Expected(StrContextValue::Description(
            "name list",
        )))
        .parse_next(input)
}

fn string_list(input: &mut &str) -> ModalResult<Vec<String>> {
    separated(1.., preceded(ws, string_literal), (ws, ','))
        .context(StrContext::Expected(StrContextValue::Description(
            "quoted string list",
        )))
        .parse_next(input)
}

// -- Rule clauses -----------------------------------------------------------

#[derive(Debug)]
enum Clause {
    Label(String),
    On(Vec<Trigger>),
    To(String),
    Pages(Vec<String>),
    Language(String),
    Roles(Vec<String>),
    Disabled,
}

fn clause(input: &mut &str) -> ModalResult<Clause> {
    ws.parse_next(input)?;
    let checkpoint = input.checkpoint();
    let keyword = ident.parse_next(input)?;
    match keyword {
        "label" => cut_err(string_value).map(Clause::Label).parse_next(input),
        "on" => cut_err(trigger_list).map(Clause::On).parse_next(input),
        "to" => cut_err(string_value).map(Clause::To).parse_next(input),
        "pages" => cut_err(string_list).map(Clause::Pages).parse_next(input),
        "language" => cut_err(string_value)
            .map(Clause::Language)
            .parse_next(input),
        "roles" => cut_err(name_list).map(Clause::Roles).parse_next(input),
        "disabled" => Ok(Clause::Disabled),
        _ => {
            input.reset(&checkpoint);
            Err(ErrMode::from_input(input))
        }
    }
}

// -- Rule definitions -------------------------------------------------------

fn weight_annotation(input: &mut &str) -> ModalResult<i32> {
    let n: i64 = delimited(
        (ws, '(', ws, "weight", ws),
        cut_err(dec_int::<_, i64, _>),
        (ws, cut_err(')')),
    )
    .parse_next(input)?;
    i32::try_from(n).map_err(|_| ErrMode::from_input(input).cut())
}

fn rule_def(input: &mut &str) -> ModalResult<Rule> {
    ws.parse_next(input)?;
    "rule".parse_next(input)?;
    ws.parse_next(input)?;

    let id = cut_err(ident)
        .context(StrContext::Expected(StrContextValue::Description(
            "rule id",
        )))
        .parse_next(input)?;

    let weight = opt(weight_annotation).parse_next(input)?;

    ws.parse_next(input)?;
    cut_err(':').parse_next(input)?;

    let clauses: Vec<Clause> = repeat(0.., clause).parse_next(input)?;

    let mut rule = Rule::new(id);
    rule.weight = weight.unwrap_or(0);
    for clause in clauses {
        match clause {
            Clause::Label(label) => rule.label = label,
            Clause::On(triggers) => rule.triggers.extend(triggers),
            Clause::To(destination) => rule.destination = destination,
            Clause::Pages(pages) => rule.pages.extend(pages),
            Clause::Language(language) => rule.language = Some(language),
            Clause::Roles(roles) => rule.roles.extend(roles),
            Clause::Disabled => rule.enabled = false,
        }
    }

    Ok(rule)
}

// -- Top-level parser -------------------------------------------------------

pub fn parse_rules(input: &mut &str) -> ModalResult<ParsedRules> {
    let rules: Vec<Rule> = repeat(0.., rule_def).parse_next(input)?;
    ws.parse_next(input)?;
    Ok(ParsedRules { rules })
}
