use crate::{
    FactNode, FactSignature, RawSignature, ResourceLimits, Span, TesseraError, TesseraResult,
    Value,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// The immutable set of fact signatures, in library order and indexed by name
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    signatures: Vec<FactSignature>,
    index: HashMap<String, usize>,
    limits: ResourceLimits,
}

impl Catalogue {
    /// Build a catalogue from the library parser's output.
    ///
    /// Every entry is converted and checked; the first invalid entry aborts
    /// the whole load so no partial catalogue is ever observable.
    pub fn load(raw: Vec<RawSignature>) -> TesseraResult<Self> {
        Self::load_with_limits(raw, ResourceLimits::default())
    }

    pub fn load_with_limits(raw: Vec<RawSignature>, limits: ResourceLimits) -> TesseraResult<Self> {
        let signatures = raw
            .into_iter()
            .map(FactSignature::try_from)
            .collect::<TesseraResult<Vec<_>>>()?;
        Self::from_signatures_with_limits(signatures, limits)
    }

    /// Build a catalogue from already-typed signatures
    pub fn from_signatures(signatures: Vec<FactSignature>) -> TesseraResult<Self> {
        Self::from_signatures_with_limits(signatures, ResourceLimits::default())
    }

    fn from_signatures_with_limits(
        signatures: Vec<FactSignature>,
        limits: ResourceLimits,
    ) -> TesseraResult<Self> {
        let mut index = HashMap::with_capacity(signatures.len());
        for (position, signature) in signatures.iter().enumerate() {
            signature.validate()?;
            if index.insert(signature.name.clone(), position).is_some() {
                return Err(TesseraError::DuplicateSignature(signature.name.clone()));
            }
        }

        debug!(signatures = signatures.len(), "catalogue loaded");
        Ok(Self {
            signatures,
            index,
            limits,
        })
    }

    /// Parse the library parser's JSON output: an ordered array of
    /// `{"name", "kind", "params": [{"name", "type"}]}` objects.
    pub fn from_json(json: &str, limits: &ResourceLimits) -> TesseraResult<Self> {
        if json.len() > limits.max_catalogue_bytes {
            return Err(TesseraError::limit_exceeded(
                "max_catalogue_bytes",
                limits.max_catalogue_bytes,
                json.len(),
                "Split the signature library or raise the catalogue limit",
            ));
        }

        let raw: Vec<RawSignature> = serde_json::from_str(json).map_err(|e| {
            TesseraError::parse(
                format!("Invalid catalogue JSON: {}", e),
                Span::locate(json, e.line(), e.column()),
                "<catalogue>",
                Arc::from(json),
            )
        })?;
        Self::load_with_limits(raw, limits.clone())
    }

    pub fn get(&self, name: &str) -> Option<&FactSignature> {
        self.index.get(name).map(|&i| &self.signatures[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Signatures in library order
    pub fn iter(&self) -> impl Iterator<Item = &FactSignature> {
        self.signatures.iter()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    /// Start a type-checked node for the named signature
    pub fn node(&self, name: &str) -> TesseraResult<NodeBuilder<'_>> {
        let signature = self
            .get(name)
            .ok_or_else(|| TesseraError::UnknownSignature(name.to_string()))?;
        Ok(NodeBuilder {
            signature,
            node: FactNode::new(name),
            max_text_value_bytes: self.limits.max_text_value_bytes,
        })
    }
}

/// Builds a [`FactNode`] while checking every value against its signature
#[derive(Debug)]
pub struct NodeBuilder<'a> {
    signature: &'a FactSignature,
    node: FactNode,
    max_text_value_bytes: usize,
}

impl NodeBuilder<'_> {
    pub fn set(mut self, param: &str, value: Value) -> TesseraResult<Self> {
        let declared = self
            .signature
            .param(param)
            .ok_or_else(|| TesseraError::UnknownParameter {
                signature: self.signature.name.clone(),
                param: param.to_string(),
            })?;

        if declared.ty != value.param_type() {
            return Err(TesseraError::TypeMismatch {
                signature: self.signature.name.clone(),
                param: param.to_string(),
                expected: declared.ty.to_string(),
                found: value.param_type().to_string(),
            });
        }

        if let Value::Text(text) = &value {
            if text.len() > self.max_text_value_bytes {
                return Err(TesseraError::limit_exceeded(
                    "max_text_value_bytes",
                    self.max_text_value_bytes,
                    text.len(),
                    format!("Shorten the value of '{}'", param),
                ));
            }
        }

        self.node.values.insert(param.to_string(), value);
        Ok(self)
    }

    /// Finish the node. Unset parameters stay unset and surface as
    /// `IncompleteNode` at compile time.
    pub fn build(self) -> FactNode {
        self.node
    }
}
