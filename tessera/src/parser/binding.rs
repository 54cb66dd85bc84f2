//! Binding positional arguments to parameter names.

use super::ParsedFact;
use crate::ast::Span;
use crate::{Catalogue, FactNode, SignatureKind, TesseraError};
use std::sync::Arc;

pub(crate) fn bind_positional(fact: ParsedFact) -> FactNode {
    let mut node = FactNode::new(fact.name);
    for (i, (value, _)) in fact.args.into_iter().enumerate() {
        node.values.insert(format!("_{}", i + 1), value);
    }
    node
}

pub(crate) struct Binder<'a> {
    catalogue: &'a Catalogue,
    source_id: &'a str,
    source_text: Arc<str>,
}

impl<'a> Binder<'a> {
    pub fn new(catalogue: &'a Catalogue, source_id: &'a str, source_text: Arc<str>) -> Self {
        Self {
            catalogue,
            source_id,
            source_text,
        }
    }

    fn error(&self, message: String, span: Span, suggestion: Option<String>) -> TesseraError {
        match suggestion {
            Some(s) => TesseraError::parse_with_suggestion(
                message,
                span,
                self.source_id,
                self.source_text.clone(),
                s,
            ),
            None => TesseraError::parse(message, span, self.source_id, self.source_text.clone()),
        }
    }

    pub fn bind(&self, fact: ParsedFact, slot: SignatureKind) -> Result<FactNode, TesseraError> {
        let signature = self.catalogue.get(&fact.name).ok_or_else(|| {
            self.error(
                format!("Unknown signature '{}'", fact.name),
                fact.span.clone(),
                None,
            )
        })?;

        if signature.kind != slot {
            let block = match slot {
                SignatureKind::Statement => "facts",
                SignatureKind::Expression => "goal",
            };
            return Err(self.error(
                format!(
                    "'{}' is {} and cannot appear in the {} block",
                    fact.name, signature.kind, block
                ),
                fact.span.clone(),
                None,
            ));
        }

        if fact.args.len() != signature.params.len() {
            let expected: Vec<String> = signature
                .params
                .iter()
                .map(|p| format!("{}: {}", p.name, p.ty))
                .collect();
            return Err(self.error(
                format!(
                    "'{}' takes {} argument(s), found {}",
                    fact.name,
                    signature.params.len(),
                    fact.args.len()
                ),
                fact.span.clone(),
                Some(format!("({} {})", fact.name, expected.join(" "))),
            ));
        }

        let mut node = FactNode::new(fact.name.clone());
        for (param, (value, span)) in signature.params.iter().zip(fact.args) {
            if value.param_type() != param.ty {
                return Err(self.error(
                    format!(
                        "Parameter '{}' of '{}' expects {}, found {}",
                        param.name,
                        fact.name,
                        param.ty,
                        value.param_type()
                    ),
                    span,
                    None,
                ));
            }
            node.values.insert(param.name.clone(), value);
        }
        Ok(node)
    }
}
