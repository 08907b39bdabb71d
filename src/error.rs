// Error handling for uritemplate

use std::fmt;

/// Result alias used throughout the template engine
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Coarse classification of a template error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Structural,
    MalformedExpression,
}

/// Template parse/build error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Invalid construction: missing var-specs, missing braces, unknown operator
    Structural { message: String },
    /// Invalid variable name or prefix length
    MalformedExpression {
        message: String,
        position: Option<usize>,
    },
}

impl TemplateError {
    pub fn structural(message: impl Into<String>) -> Self {
        TemplateError::Structural {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        TemplateError::MalformedExpression {
            message: message.into(),
            position: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TemplateError::Structural { .. } => ErrorKind::Structural,
            TemplateError::MalformedExpression { .. } => ErrorKind::MalformedExpression,
        }
    }

    /// Byte offset in the raw template, when known
    pub fn position(&self) -> Option<usize> {
        match self {
            TemplateError::Structural { .. } => None,
            TemplateError::MalformedExpression { position, .. } => *position,
        }
    }

    /// Attach a byte offset to a malformed-expression error that has none yet.
    /// Structural errors carry no position and are returned unchanged.
    pub fn with_position(self, offset: usize) -> Self {
        match self {
            TemplateError::MalformedExpression {
                message,
                position: None,
            } => TemplateError::MalformedExpression {
                message,
                position: Some(offset),
            },
            other => other,
        }
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::Structural { message } => write!(f, "Invalid template: {}", message),
            TemplateError::MalformedExpression {
                message,
                position: Some(pos),
            } => write!(f, "Malformed expression at position {}: {}", pos, message),
            TemplateError::MalformedExpression {
                message,
                position: None,
            } => write!(f, "Malformed expression: {}", message),
        }
    }
}

impl std::error::Error for TemplateError {}
