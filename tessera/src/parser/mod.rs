//! Parser for program text, the inverse of [`crate::assemble`].

use crate::ast::Span;
use crate::error::TesseraError;
use crate::resource_limits::ResourceLimits;
use crate::{Catalogue, FactNode, RootNode};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::sync::Arc;

pub mod binding;
pub mod literals;

#[derive(Parser)]
#[grammar = "src/parser/program.pest"]
pub struct ProgramParser;

/// A fact as written: its name and positional values, with locations
#[derive(Debug, Clone)]
pub(crate) struct ParsedFact {
    pub name: String,
    pub span: Span,
    pub args: Vec<(crate::Value, Span)>,
}

/// Parse program text into a root node without a catalogue.
///
/// Values bind to positional names `_1`, `_2`, ...; use
/// [`parse_program_with`] to bind them to declared parameter names.
pub fn parse_program(
    content: &str,
    source_id: Option<String>,
    limits: &ResourceLimits,
) -> Result<RootNode, TesseraError> {
    let (statements, goal) = parse_facts_and_goal(content, source_id, limits)?;
    Ok(RootNode {
        statements: statements.into_iter().map(binding::bind_positional).collect(),
        goal: Some(binding::bind_positional(goal)),
    })
}

/// Parse program text and bind every fact against the catalogue.
///
/// Arity, value types and slot kinds are checked; the result is the tree
/// that compiles back to the same text.
pub fn parse_program_with(
    content: &str,
    source_id: Option<String>,
    catalogue: &Catalogue,
) -> Result<RootNode, TesseraError> {
    let source_id = source_id.unwrap_or_else(|| "<program>".to_string());
    let source_text: Arc<str> = Arc::from(content);
    let (statements, goal) =
        parse_facts_and_goal(content, Some(source_id.clone()), catalogue.limits())?;

    let binder = binding::Binder::new(catalogue, &source_id, source_text);
    let statements = statements
        .into_iter()
        .map(|fact| binder.bind(fact, crate::SignatureKind::Statement))
        .collect::<Result<Vec<FactNode>, _>>()?;
    let goal = binder.bind(goal, crate::SignatureKind::Expression)?;

    Ok(RootNode {
        statements,
        goal: Some(goal),
    })
}

fn parse_facts_and_goal(
    content: &str,
    source_id: Option<String>,
    limits: &ResourceLimits,
) -> Result<(Vec<ParsedFact>, ParsedFact), TesseraError> {
    if content.len() > limits.max_program_bytes {
        return Err(TesseraError::limit_exceeded(
            "max_program_bytes",
            limits.max_program_bytes,
            content.len(),
            "Reduce the program size",
        ));
    }

    let source_id = source_id.unwrap_or_else(|| "<program>".to_string());
    let source_text: Arc<str> = Arc::from(content);

    let pairs = ProgramParser::parse(Rule::program, content).map_err(|e| {
        let span = match e.line_col {
            pest::error::LineColLocation::Pos((line, col)) => Span::at(line, col),
            pest::error::LineColLocation::Span((line, col), (_, _)) => Span::at(line, col),
        };
        let span = match e.location {
            pest::error::InputLocation::Pos(pos) => Span {
                start: pos,
                end: pos,
                ..span
            },
            pest::error::InputLocation::Span((start, end)) => Span { start, end, ..span },
        };
        TesseraError::parse(
            e.variant.message().to_string(),
            span,
            source_id.clone(),
            source_text.clone(),
        )
    })?;

    let mut statements = Vec::new();
    let mut goal = None;

    for pair in pairs {
        if pair.as_rule() != Rule::program {
            continue;
        }
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::facts_block => {
                    for fact in inner.into_inner() {
                        statements.push(parse_fact(fact, &source_id, &source_text)?);
                    }
                }
                Rule::goal_block => {
                    if let Some(fact) = inner.into_inner().next() {
                        goal = Some(parse_fact(fact, &source_id, &source_text)?);
                    }
                }
                _ => {}
            }
        }
    }

    let goal = goal.ok_or_else(|| {
        TesseraError::parse(
            "Grammar error: program has no goal fact",
            Span::default(),
            source_id.clone(),
            source_text.clone(),
        )
    })?;

    Ok((statements, goal))
}

fn parse_fact(
    pair: Pair<Rule>,
    source_id: &str,
    source_text: &Arc<str>,
) -> Result<ParsedFact, TesseraError> {
    let span = Span::from_pest_span(pair.as_span());
    let mut name = None;
    let mut args = Vec::new();

    for inner in pair.into_inner() {
        let inner_span = Span::from_pest_span(inner.as_span());
        match inner.as_rule() {
            Rule::fact_name => name = Some(inner.as_str().to_string()),
            Rule::integer => {
                let value = literals::parse_integer(inner.as_str()).ok_or_else(|| {
                    TesseraError::parse_with_suggestion(
                        format!("Integer '{}' is out of range", inner.as_str()),
                        inner_span.clone(),
                        source_id,
                        source_text.clone(),
                        format!("Use a value between {} and {}", i64::MIN, i64::MAX),
                    )
                })?;
                args.push((value, inner_span));
            }
            Rule::text => {
                let raw = inner
                    .into_inner()
                    .next()
                    .map(|p| p.as_str())
                    .unwrap_or_default();
                args.push((literals::unescape_text(raw), inner_span));
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| {
        TesseraError::parse(
            "Grammar error: fact missing name",
            span.clone(),
            source_id,
            source_text.clone(),
        )
    })?;

    Ok(ParsedFact { name, span, args })
}
