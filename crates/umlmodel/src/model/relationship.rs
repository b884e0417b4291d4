//! Relationships between classes
//!
//! A relationship is an unordered edge. It is stored under the canonical key
//! of the order it was created in, and lookups probe both orders.

use serde::{Deserialize, Serialize};

/// Build the storage key for a relationship created as `source` to `destination`
///
/// ```rust
/// use umlmodel::model::relationship_key;
///
/// assert_eq!(relationship_key("Car", "Engine"), "Car-Engine");
/// ```
pub fn relationship_key(source: &str, destination: &str) -> String {
    format!("{}-{}", source, destination)
}

/// An edge between two classes, referenced by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    source: String,
    destination: String,
}

impl Relationship {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// The key this relationship is stored under
    pub fn key(&self) -> String {
        relationship_key(&self.source, &self.destination)
    }

    /// True if `class` is either endpoint
    pub fn has_class(&self, class: &str) -> bool {
        self.source == class || self.destination == class
    }

    /// True if this edge joins `a` and `b`, in either order
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.destination == b) || (self.source == b && self.destination == a)
    }

    /// Replace every endpoint named `old` with `new`
    pub(crate) fn rename_class(&mut self, old: &str, new: &str) {
        if self.source == old {
            self.source = new.to_string();
        }
        if self.destination == old {
            self.destination = new.to_string();
        }
    }
}
