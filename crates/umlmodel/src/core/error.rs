//! Core error types for the class model
//!
//! Every failure a manager operation can report is an expected, recoverable
//! outcome. Each variant maps onto the fixed integer status code that editor
//! front ends display, see [`ModelError::code`].

use thiserror::Error;

/// Status code reported for a successful operation
pub const SUCCESS: i32 = 0;

/// Errors reported by [`ClassManager`](crate::model::ClassManager) operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Relationship between {source_class} and {destination} already exists")]
    RelationshipExists {
        source_class: String,
        destination: String,
    },

    #[error("Relationship endpoint class does not exist: {name}")]
    RelationshipClassMissing { name: String },

    #[error("No relationship between {source_class} and {destination}")]
    RelationshipNotFound {
        source_class: String,
        destination: String,
    },

    #[error("Class not found: {name}")]
    ClassNotFound { name: String },

    #[error("Class already exists: {name}")]
    ClassExists { name: String },

    #[error("Cannot remove class {name}: it does not exist")]
    RemovedClassMissing { name: String },

    #[error("Cannot rename to {name}: a class with that name already exists")]
    RenameTargetExists { name: String },

    #[error("Cannot rename {name}: it does not exist")]
    RenameSourceMissing { name: String },

    #[error("Method {method} already exists in class {class}")]
    DuplicateMethod { class: String, method: String },

    #[error("Class {class} does not exist")]
    MemberOwnerMissing { class: String },

    #[error("Field {field} already exists in class {class}")]
    DuplicateField { class: String, field: String },

    #[error("Field {field} not found in class {class}")]
    FieldNotFound { class: String, field: String },

    #[error("Method {method} not found in class {class}")]
    MethodNotFound { class: String, method: String },

    #[error("Invalid class name: {name:?}")]
    InvalidName { name: String },

    #[error("Malformed document: {message}")]
    MalformedDocument { message: String },
}

impl ModelError {
    /// The integer status code for this error
    pub fn code(&self) -> i32 {
        match self {
            ModelError::RelationshipExists { .. } => 106,
            ModelError::RelationshipClassMissing { .. } => 107,
            ModelError::RelationshipNotFound { .. } => 108,
            ModelError::ClassNotFound { .. } => 109,
            ModelError::ClassExists { .. } => 200,
            ModelError::RemovedClassMissing { .. } => 201,
            ModelError::RenameTargetExists { .. } => 400,
            ModelError::RenameSourceMissing { .. } => 401,
            ModelError::DuplicateMethod { .. } => 402,
            ModelError::MemberOwnerMissing { .. } => 403,
            ModelError::DuplicateField { .. } => 404,
            ModelError::FieldNotFound { .. } => 405,
            ModelError::MethodNotFound { .. } => 406,
            ModelError::InvalidName { .. } => 407,
            ModelError::MalformedDocument { .. } => 500,
        }
    }

    /// Create a new malformed document error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(source: serde_json::Error) -> Self {
        Self::malformed(source.to_string())
    }
}

/// Result alias used throughout the model
pub type ModelResult<T> = Result<T, ModelError>;

/// Collapse an operation result into its integer status code
pub trait Status {
    /// `0` on success, otherwise the error's code
    fn status(&self) -> i32;
}

impl<T> Status for ModelResult<T> {
    fn status(&self) -> i32 {
        match self {
            Ok(_) => SUCCESS,
            Err(e) => e.code(),
        }
    }
}
