use crate::ast::Span;
use std::sync::Arc;

/// Detailed error information with source location
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub source_id: String,
    pub source_text: Arc<str>,
    pub suggestion: Option<String>,
}

/// Error types for catalogue loading, compilation and persistence
#[derive(Debug, Clone, thiserror::Error)]
pub enum TesseraError {
    /// A parameter declares a type outside the closed `Int`/`Str` set
    #[error("Unknown parameter type '{type_name}' for parameter '{param}' of signature '{signature}'")]
    UnknownParameterType {
        signature: String,
        param: String,
        type_name: String,
    },

    /// A signature declares a kind other than `Annotation`/`Analysis`
    #[error("Unknown signature kind '{kind}' for signature '{signature}'")]
    UnknownSignatureKind { signature: String, kind: String },

    #[error("Duplicate signature '{0}' in catalogue")]
    DuplicateSignature(String),

    #[error("Duplicate parameter '{param}' in signature '{signature}'")]
    DuplicateParameter { signature: String, param: String },

    #[error("Invalid identifier '{0}': expected a letter or '_' followed by letters, digits, '_' or '-'")]
    InvalidIdentifier(String),

    #[error("Signature name '{0}' is reserved")]
    ReservedName(String),

    /// A node is missing a value for a declared parameter
    #[error("Incomplete node '{signature}': missing value for parameter '{param}'")]
    IncompleteNode { signature: String, param: String },

    /// A node references a signature with no registered emitter
    #[error("Unknown signature '{0}'")]
    UnknownSignature(String),

    #[error("Program has no goal")]
    MissingGoal,

    #[error("Signature '{signature}' has no parameter '{param}'")]
    UnknownParameter { signature: String, param: String },

    #[error("Parameter '{param}' of '{signature}' expects {expected}, got {found}")]
    TypeMismatch {
        signature: String,
        param: String,
        expected: String,
        found: String,
    },

    /// A node was placed in a slot its signature kind does not fit
    #[error("Signature '{signature}' is {found}, expected {expected}")]
    KindMismatch {
        signature: String,
        expected: String,
        found: String,
    },

    /// Parse error with source location
    #[error("Parse error: {} at {}:{}", .0.message, .0.source_id, .0.span)]
    Parse(Box<ErrorDetails>),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value}). {suggestion}")]
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },
}

impl TesseraError {
    /// Create a parse error with source information
    pub fn parse(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
    ) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: None,
        }))
    }

    /// Create a parse error with suggestion
    pub fn parse_with_suggestion(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: Some(suggestion.into()),
        }))
    }

    pub(crate) fn limit_exceeded(
        limit_name: &str,
        limit: usize,
        actual: usize,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::ResourceLimitExceeded {
            limit_name: limit_name.to_string(),
            limit_value: format!("{} bytes", limit),
            actual_value: format!("{} bytes", actual),
            suggestion: suggestion.into(),
        }
    }
}

impl From<std::io::Error> for TesseraError {
    fn from(err: std::io::Error) -> Self {
        TesseraError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for TesseraError {
    fn from(err: serde_json::Error) -> Self {
        TesseraError::Serialization(err.to_string())
    }
}
