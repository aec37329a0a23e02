//! Error handling types for voyager-ls.
//!
//! This module provides error types used throughout the LSP server.

use thiserror::Error;

/// Comprehensive error type for LSP operations.
///
/// `ClassNotFound` and `AttributeNotFound` carry the exact messages surfaced
/// to the editor as sentinel completion items; everything else propagates to
/// the hosting framework as a JSON-RPC error.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The requested class is not defined in the model module
    #[error("No such class exist {class}")]
    ClassNotFound { class: String },

    /// The requested attribute is not declared on the class
    #[error("No such attribute exist for {class}")]
    AttributeNotFound { class: String },

    /// No model module path configured (expected as args[0])
    #[error("No model module configured: expected the module path as args[0]")]
    ModulePathMissing,

    /// The model module could not be located on any search path
    #[error("Model module not found: {path}")]
    ModuleNotFound { path: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for LSP operations
pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// Create a class-not-found error
    pub fn class_not_found(class: impl Into<String>) -> Self {
        ServerError::ClassNotFound {
            class: class.into(),
        }
    }

    /// Create an attribute-not-found error
    pub fn attribute_not_found(class: impl Into<String>) -> Self {
        ServerError::AttributeNotFound {
            class: class.into(),
        }
    }

    /// Create a module-not-found error
    pub fn module_not_found(path: impl Into<String>) -> Self {
        ServerError::ModuleNotFound { path: path.into() }
    }
}
