//! Class and relationship manager
//!
//! The manager is the only way to mutate the diagram model. Every operation
//! runs all of its checks before it touches state, so a rejected operation
//! leaves the model exactly as it was.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use super::class::UmlClass;
use super::member::{Field, Method};
use super::relationship::{relationship_key, Relationship};
use crate::core::{is_valid_name, ModelError, ModelResult};

/// Owns the class registry and the relationship registry of one diagram
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassManager {
    classes: IndexMap<String, UmlClass>,
    relationships: IndexMap<String, Relationship>,
}

/// Log a rejected operation and hand the error back
fn reject<T>(error: ModelError) -> ModelResult<T> {
    trace!(code = error.code(), %error, "operation rejected");
    Err(error)
}

impl ClassManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a manager from registries that have already been checked
    pub(crate) fn from_parts(
        classes: IndexMap<String, UmlClass>,
        relationships: IndexMap<String, Relationship>,
    ) -> Self {
        Self {
            classes,
            relationships,
        }
    }

    /// True if no class is registered
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn get_class(&self, name: &str) -> Option<&UmlClass> {
        self.classes.get(name)
    }

    /// Mutable handle to a class
    ///
    /// Member collections stay read-only through this handle; only the
    /// position can be changed in place.
    pub fn get_class_mut(&mut self, name: &str) -> Option<&mut UmlClass> {
        self.classes.get_mut(name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &UmlClass> {
        self.classes.values()
    }

    /// Iterate over `(key, relationship)` pairs
    pub fn relationships(&self) -> impl Iterator<Item = (&str, &Relationship)> {
        self.relationships.iter().map(|(k, r)| (k.as_str(), r))
    }

    // ---- classes ----

    /// Register a new class at the origin
    pub fn add_class(&mut self, name: &str) -> ModelResult<()> {
        if !is_valid_name(name) {
            return reject(ModelError::InvalidName { name: name.into() });
        }
        if self.classes.contains_key(name) {
            return reject(ModelError::ClassExists { name: name.into() });
        }

        self.classes.insert(name.to_string(), UmlClass::new(name));
        debug!(class = name, "Added class");
        Ok(())
    }

    /// Remove a class and every relationship that touches it
    pub fn remove_class(&mut self, name: &str) -> ModelResult<()> {
        if self.classes.shift_remove(name).is_none() {
            return reject(ModelError::RemovedClassMissing { name: name.into() });
        }

        let before = self.relationships.len();
        self.relationships.retain(|_, rel| !rel.has_class(name));
        debug!(
            class = name,
            dropped_relationships = before - self.relationships.len(),
            "Removed class"
        );
        Ok(())
    }

    /// Rename a class, keeping its registry position, members and location
    ///
    /// Only the registry is checked; the new name is not run through
    /// [`is_valid_name`]. Relationships touching the class are re-keyed under
    /// the new name.
    pub fn edit_class(&mut self, old_name: &str, new_name: &str) -> ModelResult<()> {
        if self.classes.contains_key(new_name) {
            return reject(ModelError::RenameTargetExists {
                name: new_name.into(),
            });
        }
        let Some(index) = self.classes.get_index_of(old_name) else {
            return reject(ModelError::RenameSourceMissing {
                name: old_name.into(),
            });
        };

        if let Some((_, mut class)) = self.classes.shift_remove_index(index) {
            class.set_name(new_name);
            self.classes.shift_insert(index, new_name.to_string(), class);
        }

        self.relationships = std::mem::take(&mut self.relationships)
            .into_iter()
            .map(|(key, mut rel)| {
                if rel.has_class(old_name) {
                    rel.rename_class(old_name, new_name);
                    (rel.key(), rel)
                } else {
                    (key, rel)
                }
            })
            .collect();

        debug!(from = old_name, to = new_name, "Renamed class");
        Ok(())
    }

    pub fn set_class_location(&mut self, name: &str, x: i32, y: i32) -> ModelResult<()> {
        let Some(class) = self.classes.get_mut(name) else {
            return reject(ModelError::ClassNotFound { name: name.into() });
        };
        class.set_location(x, y);
        debug!(class = name, x, y, "Moved class");
        Ok(())
    }

    /// Render the registered class names as `[A, B, ...]`
    pub fn list_classes(&self) -> String {
        let names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        format!("[{}]", names.join(", "))
    }

    // ---- fields ----

    pub fn add_field(&mut self, class: &str, field: &str) -> ModelResult<()> {
        self.insert_field(class, Field::new(field))
    }

    /// Add a field carrying a type descriptor
    pub fn add_field_with_type(
        &mut self,
        class: &str,
        field: &str,
        type_descriptor: &str,
    ) -> ModelResult<()> {
        self.insert_field(class, Field::new(field).with_type(type_descriptor))
    }

    fn insert_field(&mut self, class: &str, field: Field) -> ModelResult<()> {
        let Some(owner) = self.classes.get_mut(class) else {
            return reject(ModelError::MemberOwnerMissing {
                class: class.into(),
            });
        };
        if owner.has_field(field.name()) {
            return reject(ModelError::DuplicateField {
                class: class.into(),
                field: field.name().into(),
            });
        }

        debug!(class, field = field.name(), "Added field");
        owner.add_field(field);
        Ok(())
    }

    pub fn remove_field(&mut self, class: &str, field: &str) -> ModelResult<()> {
        let Some(owner) = self.classes.get_mut(class) else {
            return reject(ModelError::MemberOwnerMissing {
                class: class.into(),
            });
        };
        if owner.remove_field(field).is_none() {
            return reject(ModelError::FieldNotFound {
                class: class.into(),
                field: field.into(),
            });
        }

        debug!(class, field, "Removed field");
        Ok(())
    }

    /// Rename a field by removing it and adding it back under `new_name`
    ///
    /// The field's type descriptor is carried over. The renamed field moves
    /// to the end of the class's field order.
    pub fn edit_field(&mut self, class: &str, old_name: &str, new_name: &str) -> ModelResult<()> {
        let Some(owner) = self.classes.get_mut(class) else {
            return reject(ModelError::MemberOwnerMissing {
                class: class.into(),
            });
        };
        if owner.has_field(new_name) {
            return reject(ModelError::DuplicateField {
                class: class.into(),
                field: new_name.into(),
            });
        }
        let Some(old) = owner.remove_field(old_name) else {
            return reject(ModelError::FieldNotFound {
                class: class.into(),
                field: old_name.into(),
            });
        };

        owner.add_field(old.renamed(new_name));
        debug!(class, from = old_name, to = new_name, "Renamed field");
        Ok(())
    }

    /// The ordered fields of `class`
    pub fn list_fields(&self, class: &str) -> ModelResult<&IndexMap<String, Field>> {
        match self.classes.get(class) {
            Some(owner) => Ok(owner.fields()),
            None => reject(ModelError::ClassNotFound { name: class.into() }),
        }
    }

    // ---- methods ----

    pub fn add_method(&mut self, class: &str, method: &str) -> ModelResult<()> {
        self.insert_method(class, Method::new(method))
    }

    /// Add a method carrying a signature descriptor
    pub fn add_method_with_signature(
        &mut self,
        class: &str,
        method: &str,
        signature: &str,
    ) -> ModelResult<()> {
        self.insert_method(class, Method::new(method).with_signature(signature))
    }

    fn insert_method(&mut self, class: &str, method: Method) -> ModelResult<()> {
        let Some(owner) = self.classes.get_mut(class) else {
            return reject(ModelError::MemberOwnerMissing {
                class: class.into(),
            });
        };
        if owner.has_method(method.name()) {
            return reject(ModelError::DuplicateMethod {
                class: class.into(),
                method: method.name().into(),
            });
        }

        debug!(class, method = method.name(), "Added method");
        owner.add_method(method);
        Ok(())
    }

    pub fn remove_method(&mut self, class: &str, method: &str) -> ModelResult<()> {
        let Some(owner) = self.classes.get_mut(class) else {
            return reject(ModelError::MemberOwnerMissing {
                class: class.into(),
            });
        };
        if owner.remove_method(method).is_none() {
            return reject(ModelError::MethodNotFound {
                class: class.into(),
                method: method.into(),
            });
        }

        debug!(class, method, "Removed method");
        Ok(())
    }

    /// Rename a method by removing it and adding it back under `new_name`
    ///
    /// The signature descriptor is carried over.
    pub fn edit_method(&mut self, class: &str, old_name: &str, new_name: &str) -> ModelResult<()> {
        let Some(owner) = self.classes.get_mut(class) else {
            return reject(ModelError::MemberOwnerMissing {
                class: class.into(),
            });
        };
        if owner.has_method(new_name) {
            return reject(ModelError::DuplicateMethod {
                class: class.into(),
                method: new_name.into(),
            });
        }
        let Some(old) = owner.remove_method(old_name) else {
            return reject(ModelError::MethodNotFound {
                class: class.into(),
                method: old_name.into(),
            });
        };

        owner.add_method(old.renamed(new_name));
        debug!(class, from = old_name, to = new_name, "Renamed method");
        Ok(())
    }

    pub fn list_methods(&self, class: &str) -> ModelResult<&IndexMap<String, Method>> {
        match self.classes.get(class) {
            Some(owner) => Ok(owner.methods()),
            None => reject(ModelError::ClassNotFound { name: class.into() }),
        }
    }

    // ---- relationships ----

    /// True if a relationship joins `a` and `b` in either direction
    pub fn relationship_exists(&self, a: &str, b: &str) -> bool {
        self.existing_key(a, b).is_some()
    }

    /// The key a relationship between `a` and `b` is actually stored under
    fn existing_key(&self, a: &str, b: &str) -> Option<String> {
        [relationship_key(a, b), relationship_key(b, a)]
            .into_iter()
            .find(|key| {
                self.relationships
                    .get(key)
                    .is_some_and(|rel| rel.connects(a, b))
            })
    }

    fn require_endpoints(&self, source: &str, destination: &str) -> ModelResult<()> {
        for name in [source, destination] {
            if !self.classes.contains_key(name) {
                return reject(ModelError::RelationshipClassMissing { name: name.into() });
            }
        }
        Ok(())
    }

    pub fn add_relationship(&mut self, source: &str, destination: &str) -> ModelResult<()> {
        self.require_endpoints(source, destination)?;
        if self.relationship_exists(source, destination) {
            return reject(ModelError::RelationshipExists {
                source_class: source.into(),
                destination: destination.into(),
            });
        }

        let relationship = Relationship::new(source, destination);
        debug!(key = %relationship.key(), "Added relationship");
        self.relationships.insert(relationship.key(), relationship);
        Ok(())
    }

    pub fn remove_relationship(&mut self, source: &str, destination: &str) -> ModelResult<()> {
        self.require_endpoints(source, destination)?;
        let Some(key) = self.existing_key(source, destination) else {
            return reject(ModelError::RelationshipNotFound {
                source_class: source.into(),
                destination: destination.into(),
            });
        };

        self.relationships.shift_remove(&key);
        debug!(key = %key, "Removed relationship");
        Ok(())
    }

    /// Render the keys of every relationship touching `class` as `[k1, k2]`
    pub fn list_relationships(&self, class: &str) -> ModelResult<String> {
        if !self.classes.contains_key(class) {
            return reject(ModelError::RelationshipClassMissing { name: class.into() });
        }

        let keys: Vec<&str> = self
            .relationships
            .iter()
            .filter(|(_, rel)| rel.has_class(class))
            .map(|(key, _)| key.as_str())
            .collect();
        Ok(format!("[{}]", keys.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Status;

    fn manager_with(names: &[&str]) -> ClassManager {
        let mut manager = ClassManager::new();
        for name in names {
            manager.add_class(name).unwrap();
        }
        manager
    }

    #[test]
    fn test_add_class_codes() {
        let mut manager = ClassManager::new();
        assert_eq!(manager.add_class("Foo").status(), 0);
        assert_eq!(manager.add_class("Foo").status(), 200);
        assert_eq!(manager.add_class("").status(), 407);
        assert_eq!(manager.add_class("My Car").status(), 407);
        assert_eq!(manager.class_count(), 1);
    }

    #[test]
    fn test_remove_class_codes() {
        let mut manager = manager_with(&["Foo"]);
        assert_eq!(manager.remove_class("Bar").status(), 201);
        assert_eq!(manager.remove_class("Foo").status(), 0);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_edit_class_codes() {
        let mut manager = manager_with(&["A", "B"]);
        assert_eq!(manager.edit_class("A", "B").status(), 400);
        assert_eq!(manager.edit_class("Missing", "C").status(), 401);
        assert_eq!(manager.edit_class("A", "C").status(), 0);
        assert_eq!(manager.get_class("C").map(UmlClass::name), Some("C"));
        assert!(manager.get_class("A").is_none());
    }

    #[test]
    fn test_edit_class_skips_name_validation() {
        let mut manager = manager_with(&["A", "B"]);
        assert_eq!(manager.edit_class("A", "My Car").status(), 0);
        assert_eq!(manager.edit_class("B", "1B").status(), 0);
        assert_eq!(manager.list_classes(), "[My Car, 1B]");
        assert_eq!(manager.get_class("1B").map(UmlClass::name), Some("1B"));
    }

    #[test]
    fn test_edit_class_keeps_order_members_and_location() {
        let mut manager = manager_with(&["A", "B", "C"]);
        manager.add_field("B", "size").unwrap();
        manager.set_class_location("B", 5, 7).unwrap();

        manager.edit_class("B", "Middle").unwrap();

        assert_eq!(manager.list_classes(), "[A, Middle, C]");
        let class = manager.get_class("Middle").unwrap();
        assert!(class.has_field("size"));
        assert_eq!((class.x(), class.y()), (5, 7));
    }

    #[test]
    fn test_edit_class_rekeys_relationships() {
        let mut manager = manager_with(&["Car", "Engine", "Wheel"]);
        manager.add_relationship("Car", "Engine").unwrap();
        manager.add_relationship("Wheel", "Car").unwrap();

        manager.edit_class("Car", "Truck").unwrap();

        assert_eq!(
            manager.list_relationships("Truck").unwrap(),
            "[Truck-Engine, Wheel-Truck]"
        );
        assert!(manager.relationship_exists("Engine", "Truck"));
        assert_eq!(manager.remove_relationship("Truck", "Wheel").status(), 0);
    }

    #[test]
    fn test_set_class_location() {
        let mut manager = manager_with(&["Foo"]);
        assert_eq!(manager.set_class_location("Bar", 1, 2).status(), 109);
        assert_eq!(manager.set_class_location("Foo", 10, 20).status(), 0);
        let class = manager.get_class("Foo").unwrap();
        assert_eq!((class.x(), class.y()), (10, 20));
    }

    #[test]
    fn test_get_class_mut_moves_in_place() {
        let mut manager = manager_with(&["Foo"]);
        if let Some(class) = manager.get_class_mut("Foo") {
            class.set_location(3, 4);
        }
        assert_eq!(manager.get_class("Foo").map(|c| (c.x(), c.y())), Some((3, 4)));
    }

    #[test]
    fn test_list_classes() {
        let mut manager = ClassManager::new();
        assert_eq!(manager.list_classes(), "[]");
        manager.add_class("A").unwrap();
        assert_eq!(manager.list_classes(), "[A]");
        manager.add_class("B").unwrap();
        assert_eq!(manager.list_classes(), "[A, B]");
    }

    #[test]
    fn test_field_codes() {
        let mut manager = manager_with(&["Foo"]);
        assert_eq!(manager.add_field("Bar", "x").status(), 403);
        assert_eq!(manager.add_field("Foo", "x").status(), 0);
        assert_eq!(manager.add_field("Foo", "x").status(), 404);
        assert_eq!(manager.remove_field("Bar", "x").status(), 403);
        assert_eq!(manager.remove_field("Foo", "y").status(), 405);
        assert_eq!(manager.edit_field("Bar", "x", "y").status(), 403);
        assert_eq!(manager.edit_field("Foo", "nope", "y").status(), 405);
        assert_eq!(manager.edit_field("Foo", "x", "y").status(), 0);
        assert_eq!(manager.remove_field("Foo", "y").status(), 0);
        assert_eq!(manager.list_fields("Bar").status(), 109);
        assert!(manager.list_fields("Foo").unwrap().is_empty());
    }

    #[test]
    fn test_method_codes() {
        let mut manager = manager_with(&["Foo"]);
        assert_eq!(manager.add_method("Bar", "run").status(), 403);
        assert_eq!(manager.add_method("Foo", "run").status(), 0);
        assert_eq!(manager.add_method("Foo", "run").status(), 402);
        assert_eq!(manager.remove_method("Foo", "walk").status(), 406);
        assert_eq!(manager.edit_method("Foo", "walk", "jog").status(), 406);
        assert_eq!(manager.edit_method("Foo", "run", "sprint").status(), 0);
        assert_eq!(manager.list_methods("Bar").status(), 109);
        let methods = manager.list_methods("Foo").unwrap();
        assert!(methods.contains_key("sprint"));
        assert!(!methods.contains_key("run"));
    }

    #[test]
    fn test_failed_field_edit_leaves_original() {
        let mut manager = manager_with(&["Foo"]);
        manager.add_field("Foo", "x").unwrap();
        manager.add_field("Foo", "y").unwrap();

        assert_eq!(manager.edit_field("Foo", "x", "y").status(), 404);

        let fields = manager.list_fields("Foo").unwrap();
        let names: Vec<_> = fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_failed_method_edit_leaves_original() {
        let mut manager = manager_with(&["Foo"]);
        manager.add_method("Foo", "a").unwrap();
        manager.add_method("Foo", "b").unwrap();
        assert_eq!(manager.edit_method("Foo", "a", "b").status(), 402);
        assert!(manager.get_class("Foo").unwrap().has_method("a"));
    }

    #[test]
    fn test_edit_keeps_descriptor() {
        let mut manager = manager_with(&["Car"]);
        manager.add_field_with_type("Car", "speed", "double").unwrap();
        manager
            .add_method_with_signature("Car", "drive", "void")
            .unwrap();

        manager.edit_field("Car", "speed", "velocity").unwrap();
        manager.edit_method("Car", "drive", "go").unwrap();

        let class = manager.get_class("Car").unwrap();
        assert_eq!(class.fields()["velocity"].to_string(), "double velocity");
        assert_eq!(class.methods()["go"].to_string(), "void go");
    }

    #[test]
    fn test_relationship_codes() {
        let mut manager = manager_with(&["A", "B"]);
        assert_eq!(manager.add_relationship("A", "C").status(), 107);
        assert_eq!(manager.add_relationship("C", "A").status(), 107);
        assert_eq!(manager.add_relationship("A", "B").status(), 0);
        assert_eq!(manager.add_relationship("A", "B").status(), 106);
        assert_eq!(manager.add_relationship("B", "A").status(), 106);
        assert_eq!(manager.remove_relationship("A", "C").status(), 107);
        assert_eq!(manager.remove_relationship("B", "A").status(), 0);
        assert_eq!(manager.remove_relationship("A", "B").status(), 108);
        assert_eq!(manager.relationship_count(), 0);
    }

    #[test]
    fn test_list_relationships() {
        let mut manager = manager_with(&["A", "B", "C"]);
        assert_eq!(manager.list_relationships("Z").status(), 107);
        assert_eq!(manager.list_relationships("A").unwrap(), "[]");

        manager.add_relationship("A", "B").unwrap();
        manager.add_relationship("C", "A").unwrap();
        manager.add_relationship("B", "C").unwrap();

        assert_eq!(manager.list_relationships("A").unwrap(), "[A-B, C-A]");
        assert_eq!(manager.list_relationships("C").unwrap(), "[C-A, B-C]");
    }

    #[test]
    fn test_remove_class_cascades_both_directions() {
        let mut manager = manager_with(&["A", "B", "C"]);
        manager.add_relationship("A", "B").unwrap();
        manager.add_relationship("C", "A").unwrap();
        manager.add_relationship("B", "C").unwrap();

        manager.remove_class("A").unwrap();

        assert_eq!(manager.relationship_count(), 1);
        assert_eq!(manager.list_relationships("B").unwrap(), "[B-C]");
    }

    #[test]
    fn test_self_relationship() {
        let mut manager = manager_with(&["Node"]);
        assert_eq!(manager.add_relationship("Node", "Node").status(), 0);
        assert_eq!(manager.add_relationship("Node", "Node").status(), 106);
        assert_eq!(manager.list_relationships("Node").unwrap(), "[Node-Node]");
        manager.remove_class("Node").unwrap();
        assert_eq!(manager.relationship_count(), 0);
    }
}
