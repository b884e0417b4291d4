//! umlmodel - In-memory model for a UML class-diagram editor
//!
//! The crate owns the classes of a diagram, their fields and methods, and the
//! relationships between classes. Every mutation goes through
//! [`ClassManager`](model::ClassManager) and reports an integer status code
//! through [`ModelError::code`](core::ModelError::code).
//!
//! # Quick Start
//!
//! ```rust
//! use umlmodel::prelude::*;
//!
//! let mut manager = ClassManager::new();
//! manager.add_class("Car").unwrap();
//! manager.add_class("Engine").unwrap();
//! manager.add_field_with_type("Car", "wheels", "int").unwrap();
//! manager.add_relationship("Car", "Engine").unwrap();
//!
//! assert_eq!(manager.list_classes(), "[Car, Engine]");
//! assert_eq!(manager.list_relationships("Engine").unwrap(), "[Car-Engine]");
//!
//! // Expected failures carry the editor's status codes
//! assert_eq!(manager.add_class("Car").status(), 200);
//! ```
//!
//! # Persistence
//!
//! ```rust
//! use umlmodel::prelude::*;
//!
//! let mut manager = ClassManager::new();
//! manager.add_class("Car").unwrap();
//! let json = manager.to_json().unwrap();
//!
//! let restored = umlmodel::load(&json).unwrap();
//! assert_eq!(restored.list_classes(), "[Car]");
//! ```

pub mod core;
pub mod model;

pub use self::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{is_valid_name, ModelError, ModelResult, Status, ViewBinder};
    pub use crate::model::{ClassManager, Field, Method, Relationship, UmlClass};
}

/// Load a manager from a JSON document
///
/// # Example
/// ```rust
/// let manager = umlmodel::load(r#"{"classes": {"A": {"name": "A"}}}"#).unwrap();
/// assert_eq!(manager.class_count(), 1);
///
/// assert!(umlmodel::load("not json").is_err());
/// ```
pub fn load(json: &str) -> ModelResult<model::ClassManager> {
    model::ClassManager::load(json)
}
