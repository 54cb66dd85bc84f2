//! Code emission: one rule per signature name, one generic `emit` routine.

use crate::signature::Param;
use crate::{Catalogue, FactNode, FactSignature, SignatureKind, TesseraError, TesseraResult, Value};
use std::collections::HashMap;

/// Binding strength of an expression fragment.
///
/// The editing engine compares the fragment's order with the order required
/// by the slot it sits in and wraps it in parentheses when the fragment binds
/// more loosely. Fact expressions are already parenthesised, so they are
/// always `Atomic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Order {
    Atomic = 0,
    None = 99,
}

impl Order {
    /// Whether a fragment of this order needs wrapping inside a slot of `outer`
    pub fn needs_parens(self, outer: Order) -> bool {
        self > outer
    }
}

/// Generated text for one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Statement(String),
    Expression(String, Order),
}

impl Fragment {
    pub fn code(&self) -> &str {
        match self {
            Fragment::Statement(code) | Fragment::Expression(code, _) => code,
        }
    }

    pub fn into_code(self) -> String {
        match self {
            Fragment::Statement(code) | Fragment::Expression(code, _) => code,
        }
    }
}

/// Per-signature emission rule: the signature's kind plus its parameter order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitRule {
    Statement(Vec<Param>),
    Expression(Vec<Param>),
}

impl From<&FactSignature> for EmitRule {
    fn from(signature: &FactSignature) -> Self {
        match signature.kind {
            SignatureKind::Statement => EmitRule::Statement(signature.params.clone()),
            SignatureKind::Expression => EmitRule::Expression(signature.params.clone()),
        }
    }
}

impl EmitRule {
    fn params(&self) -> &[Param] {
        match self {
            EmitRule::Statement(params) | EmitRule::Expression(params) => params,
        }
    }
}

/// Emission rules keyed by signature name
#[derive(Debug, Clone, Default)]
pub struct Registry {
    rules: HashMap<String, EmitRule>,
}

impl Registry {
    pub fn from_catalogue(catalogue: &Catalogue) -> Self {
        let rules = catalogue
            .iter()
            .map(|signature| (signature.name.clone(), EmitRule::from(signature)))
            .collect();
        Self { rules }
    }

    pub fn rule(&self, name: &str) -> Option<&EmitRule> {
        self.rules.get(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Emit the fragment for one node.
    ///
    /// Values are taken in declared parameter order, never map order.
    pub fn emit(&self, node: &FactNode) -> TesseraResult<Fragment> {
        let rule = self
            .rule(&node.signature)
            .ok_or_else(|| TesseraError::UnknownSignature(node.signature.clone()))?;

        let mut code = format!("({}", node.signature);
        for param in rule.params() {
            let value = node
                .value(&param.name)
                .ok_or_else(|| TesseraError::IncompleteNode {
                    signature: node.signature.clone(),
                    param: param.name.clone(),
                })?;

            if value.param_type() != param.ty {
                return Err(TesseraError::TypeMismatch {
                    signature: node.signature.clone(),
                    param: param.name.clone(),
                    expected: param.ty.to_string(),
                    found: value.param_type().to_string(),
                });
            }

            code.push(' ');
            code.push_str(&render_value(value));
        }
        code.push_str(")\n");

        Ok(match rule {
            EmitRule::Statement(_) => Fragment::Statement(code),
            EmitRule::Expression(_) => Fragment::Expression(code, Order::Atomic),
        })
    }
}

/// Integers verbatim, text double-quoted
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Integer(n) => n.to_string(),
        Value::Text(text) => quote_text(text),
    }
}

/// Double-quote `text`, escaping backslash, quote and control whitespace so
/// the program parser can read it back
pub fn quote_text(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
