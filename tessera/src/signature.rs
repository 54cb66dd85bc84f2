//! Fact signatures: the typed templates every block and fragment is derived from.
//!
//! The external library parser hands over [`RawSignature`]s with stringly-typed
//! kinds and parameter types. Conversion into [`FactSignature`] is where the
//! closed sets are enforced; an unknown kind or type aborts the catalogue load.

use crate::TesseraError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Name of the fixed root block. No signature may claim it.
pub const ROOT_BLOCK_TYPE: &str = "program";

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_\-]*$").expect("identifier pattern"));

/// Whether `name` can appear as a bare atom in program text
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Parameter types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParamType {
    Integer,
    Text,
}

impl ParamType {
    /// Map the library parser's type name (`Int`, `Str`)
    pub fn from_source_name(name: &str) -> Option<Self> {
        match name {
            "Int" => Some(ParamType::Integer),
            "Str" => Some(ParamType::Text),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ParamType::Integer => "integer",
            ParamType::Text => "text",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a fact is used in sequence or yields a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SignatureKind {
    /// An "Annotation": usable only as one of a sequence of statements
    Statement,
    /// An "Analysis": yields a value and fills the goal slot
    Expression,
}

impl SignatureKind {
    /// Map the library parser's kind name (`Annotation`, `Analysis`)
    pub fn from_source_name(name: &str) -> Option<Self> {
        match name {
            "Annotation" => Some(SignatureKind::Statement),
            "Analysis" => Some(SignatureKind::Expression),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SignatureKind::Statement => "statement",
            SignatureKind::Expression => "expression",
        }
    }
}

impl fmt::Display for SignatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: ParamType,
}

/// A named, typed template for one kind of statement or expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactSignature {
    pub name: String,
    pub kind: SignatureKind,
    pub params: Vec<Param>,
}

impl FactSignature {
    pub fn new(name: impl Into<String>, kind: SignatureKind) -> Self {
        Self {
            name: name.into(),
            kind,
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        self.params.push(Param {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Check the per-signature invariants: identifier syntax, reserved names
    /// and parameter name uniqueness.
    pub fn validate(&self) -> Result<(), TesseraError> {
        if !is_identifier(&self.name) {
            return Err(TesseraError::InvalidIdentifier(self.name.clone()));
        }
        if self.name == ROOT_BLOCK_TYPE {
            return Err(TesseraError::ReservedName(self.name.clone()));
        }

        let mut seen = HashSet::new();
        for param in &self.params {
            if !is_identifier(&param.name) {
                return Err(TesseraError::InvalidIdentifier(param.name.clone()));
            }
            if !seen.insert(param.name.as_str()) {
                return Err(TesseraError::DuplicateParameter {
                    signature: self.name.clone(),
                    param: param.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// One parameter as produced by the library parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParam {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// One signature as produced by the library parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSignature {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub params: Vec<RawParam>,
}

impl TryFrom<RawSignature> for FactSignature {
    type Error = TesseraError;

    fn try_from(raw: RawSignature) -> Result<Self, Self::Error> {
        let kind = SignatureKind::from_source_name(&raw.kind).ok_or_else(|| {
            TesseraError::UnknownSignatureKind {
                signature: raw.name.clone(),
                kind: raw.kind.clone(),
            }
        })?;

        let params = raw
            .params
            .into_iter()
            .map(|p| match ParamType::from_source_name(&p.type_name) {
                Some(ty) => Ok(Param { name: p.name, ty }),
                None => Err(TesseraError::UnknownParameterType {
                    signature: raw.name.clone(),
                    param: p.name,
                    type_name: p.type_name,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let signature = FactSignature {
            name: raw.name,
            kind,
            params,
        };
        signature.validate()?;
        Ok(signature)
    }
}
