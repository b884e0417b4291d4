//! UML class entity
//!
//! A class owns its fields and methods in insertion order, keyed by name.
//! Fields and methods are separate namespaces, so a field and a method may
//! share a name.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::document::unique_keys;
use super::member::{Field, Method};

/// A class in the diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmlClass {
    name: String,
    #[serde(default, deserialize_with = "unique_keys")]
    fields: IndexMap<String, Field>,
    #[serde(default, deserialize_with = "unique_keys")]
    methods: IndexMap<String, Method>,
    #[serde(default)]
    x: i32,
    #[serde(default)]
    y: i32,
}

impl UmlClass {
    /// Create an empty class at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
            methods: IndexMap::new(),
            x: 0,
            y: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    pub fn methods(&self) -> &IndexMap<String, Method> {
        &self.methods
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Move the class on the diagram
    ///
    /// Position is the one piece of class state a view may change directly.
    pub fn set_location(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Insert a field, replacing any field of the same name
    pub(crate) fn add_field(&mut self, field: Field) {
        self.fields.insert(field.name().to_string(), field);
    }

    pub(crate) fn remove_field(&mut self, name: &str) -> Option<Field> {
        self.fields.shift_remove(name)
    }

    /// Insert a method, replacing any method of the same name
    pub(crate) fn add_method(&mut self, method: Method) {
        self.methods.insert(method.name().to_string(), method);
    }

    pub(crate) fn remove_method(&mut self, name: &str) -> Option<Method> {
        self.methods.shift_remove(name)
    }

    /// Check the keyed collections agree with the members they hold
    pub(crate) fn members_consistent(&self) -> bool {
        self.fields.iter().all(|(key, f)| key == f.name())
            && self.methods.iter().all(|(key, m)| key == m.name())
    }
}
