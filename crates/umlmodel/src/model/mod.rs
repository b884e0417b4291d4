//! Class diagram model
//!
//! Classes with their fields and methods, relationships between classes,
//! and the manager that owns both registries.

mod class;
mod document;
mod manager;
mod member;
mod relationship;

pub use class::UmlClass;
pub use manager::ClassManager;
pub use member::{Field, Method};
pub use relationship::{relationship_key, Relationship};
