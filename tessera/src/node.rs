//! The node tree produced by the editing surface.
//!
//! A [`RootNode`] holds the statement sequence and the single goal slot.
//! Typed construction goes through [`crate::Catalogue::node`] and the slot
//! methods here; deserialized trees skip those checks so a tree saved
//! against an older catalogue still loads.

use crate::{Catalogue, ParamType, SignatureKind, TesseraError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A concrete field value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Text(String),
}

impl Value {
    pub fn param_type(&self) -> ParamType {
        match self {
            Value::Integer(_) => ParamType::Integer,
            Value::Text(_) => ParamType::Text,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// A node tagged with a signature name and its field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactNode {
    pub signature: String,
    #[serde(default)]
    pub values: BTreeMap<String, Value>,
}

impl FactNode {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            values: BTreeMap::new(),
        }
    }

    /// Set a value without consulting the catalogue
    pub fn with_value(mut self, param: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(param.into(), value.into());
        self
    }

    pub fn value(&self, param: &str) -> Option<&Value> {
        self.values.get(param)
    }
}

/// The program root: statements in order plus at most one goal
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RootNode {
    #[serde(default)]
    pub statements: Vec<FactNode>,
    #[serde(default)]
    pub goal: Option<FactNode>,
}

impl RootNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement, rejecting nodes whose signature is not statement-kind
    pub fn push_statement(
        &mut self,
        catalogue: &Catalogue,
        node: FactNode,
    ) -> Result<(), TesseraError> {
        check_slot(catalogue, &node, SignatureKind::Statement)?;
        self.statements.push(node);
        Ok(())
    }

    /// Fill the goal slot, returning whatever occupied it before
    pub fn set_goal(
        &mut self,
        catalogue: &Catalogue,
        node: FactNode,
    ) -> Result<Option<FactNode>, TesseraError> {
        check_slot(catalogue, &node, SignatureKind::Expression)?;
        Ok(self.goal.replace(node))
    }

    pub fn remove_statement(&mut self, index: usize) -> Option<FactNode> {
        (index < self.statements.len()).then(|| self.statements.remove(index))
    }

    pub fn take_goal(&mut self) -> Option<FactNode> {
        self.goal.take()
    }

    /// All fact nodes in program order, goal last
    pub fn facts(&self) -> impl Iterator<Item = &FactNode> {
        self.statements.iter().chain(self.goal.iter())
    }

    /// Signature names referenced by the tree that the catalogue does not know
    pub fn unknown_signatures<'a>(&'a self, catalogue: &Catalogue) -> Vec<&'a str> {
        self.facts()
            .filter(|n| !catalogue.contains(&n.signature))
            .map(|n| n.signature.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty() && self.goal.is_none()
    }
}

fn check_slot(
    catalogue: &Catalogue,
    node: &FactNode,
    expected: SignatureKind,
) -> Result<(), TesseraError> {
    let signature = catalogue
        .get(&node.signature)
        .ok_or_else(|| TesseraError::UnknownSignature(node.signature.clone()))?;
    if signature.kind != expected {
        return Err(TesseraError::KindMismatch {
            signature: node.signature.clone(),
            expected: expected.to_string(),
            found: signature.kind.to_string(),
        });
    }
    Ok(())
}

/// A tagged tree node, as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum ProgramNode {
    Root(RootNode),
    Fact(FactNode),
}

impl ProgramNode {
    pub fn into_root(self) -> Result<RootNode, TesseraError> {
        match self {
            ProgramNode::Root(root) => Ok(root),
            ProgramNode::Fact(fact) => Err(TesseraError::Serialization(format!(
                "expected a root node, found fact node '{}'",
                fact.signature
            ))),
        }
    }
}

impl From<RootNode> for ProgramNode {
    fn from(root: RootNode) -> Self {
        ProgramNode::Root(root)
    }
}
