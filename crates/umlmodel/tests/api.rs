//! Integration tests for the public API

use umlmodel::prelude::*;

fn diagram() -> ClassManager {
    let mut manager = ClassManager::new();
    for name in ["Car", "Engine", "Wheel"] {
        manager.add_class(name).unwrap();
    }
    manager
}

#[test]
fn test_name_validation_examples() {
    assert!(is_valid_name("Car"));
    assert!(!is_valid_name(" car"));
    assert!(is_valid_name("Car1"));
    assert!(!is_valid_name("1Car"));
    assert!(!is_valid_name("My Car"));
}

#[test]
fn test_add_class_twice() {
    let mut manager = ClassManager::new();
    assert_eq!(manager.add_class("Foo").status(), 0);
    assert_eq!(manager.add_class("Foo").status(), 200);
    assert_eq!(manager.add_class("").status(), 407);
}

#[test]
fn test_relationship_symmetry() {
    let mut manager = diagram();
    assert_eq!(manager.add_relationship("Car", "Engine").status(), 0);
    assert_eq!(manager.add_relationship("Engine", "Car").status(), 106);
    assert!(manager.relationship_exists("Engine", "Car"));
    assert!(manager.relationship_exists("Car", "Engine"));
}

#[test]
fn test_remove_class_clears_partner_relationships() {
    let mut manager = diagram();
    manager.add_relationship("Car", "Engine").unwrap();
    manager.remove_class("Car").unwrap();
    assert_eq!(manager.list_relationships("Engine").unwrap(), "[]");
}

#[test]
fn test_failed_field_rename_keeps_field() {
    let mut manager = diagram();
    manager.add_field("Car", "x").unwrap();
    manager.add_field("Car", "y").unwrap();

    let result = manager.edit_field("Car", "x", "y");
    assert_eq!(
        result,
        Err(ModelError::DuplicateField {
            class: "Car".into(),
            field: "y".into(),
        })
    );
    assert!(manager.get_class("Car").unwrap().has_field("x"));
}

#[test]
fn test_list_classes_contains_each_name_once() {
    let mut manager = ClassManager::new();
    assert_eq!(manager.list_classes(), "[]");

    manager.add_class("A").unwrap();
    manager.add_class("B").unwrap();
    let listed = manager.list_classes();

    assert!(listed.starts_with('[') && listed.ends_with(']'));
    let mut names: Vec<&str> = listed[1..listed.len() - 1].split(", ").collect();
    names.sort_unstable();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_member_lists() {
    let mut manager = diagram();
    manager.add_field_with_type("Car", "wheels", "int").unwrap();
    manager.add_field("Car", "color").unwrap();
    manager.add_method_with_signature("Car", "drive", "void").unwrap();

    let fields: Vec<String> = manager
        .list_fields("Car")
        .unwrap()
        .values()
        .map(ToString::to_string)
        .collect();
    assert_eq!(fields, vec!["int wheels", "color"]);

    let methods = manager.list_methods("Car").unwrap();
    assert_eq!(methods.len(), 1);
    assert_eq!(methods["drive"].signature(), "void");

    assert_eq!(manager.list_fields("Boat").status(), 109);
    assert_eq!(manager.list_methods("Boat").status(), 109);
}

#[test]
fn test_field_and_method_may_share_a_name() {
    let mut manager = diagram();
    assert_eq!(manager.add_field("Car", "speed").status(), 0);
    assert_eq!(manager.add_method("Car", "speed").status(), 0);
    assert_eq!(manager.remove_field("Car", "speed").status(), 0);
    assert!(manager.get_class("Car").unwrap().has_method("speed"));
}

#[test]
fn test_rename_class_then_relationships() {
    let mut manager = diagram();
    manager.add_relationship("Car", "Engine").unwrap();
    manager.edit_class("Car", "Truck").unwrap();

    assert_eq!(manager.list_relationships("Engine").unwrap(), "[Truck-Engine]");
    assert_eq!(manager.add_relationship("Engine", "Truck").status(), 106);
    assert_eq!(manager.remove_class("Truck").status(), 0);
    assert_eq!(manager.relationship_count(), 0);
}

#[test]
fn test_round_trip_preserves_graph() {
    let mut manager = diagram();
    manager.add_field_with_type("Car", "wheels", "int").unwrap();
    manager.add_method("Engine", "start").unwrap();
    manager.set_class_location("Wheel", -15, 300).unwrap();
    manager.add_relationship("Car", "Engine").unwrap();
    manager.add_relationship("Wheel", "Car").unwrap();

    let json = manager.to_json().unwrap();
    let restored = umlmodel::load(&json).unwrap();

    assert_eq!(restored.list_classes(), manager.list_classes());
    assert_eq!(
        restored.list_relationships("Car").unwrap(),
        manager.list_relationships("Car").unwrap()
    );
    let wheel = restored.get_class("Wheel").unwrap();
    assert_eq!((wheel.x(), wheel.y()), (-15, 300));
    assert_eq!(restored, manager);
}

#[test]
fn test_from_json_replaces_state() {
    let mut manager = diagram();
    let mut other = ClassManager::new();
    other.add_class("Boat").unwrap();

    manager.from_json(&other.to_json().unwrap()).unwrap();
    assert_eq!(manager.list_classes(), "[Boat]");
}

#[test]
fn test_registry_iteration() {
    let mut manager = diagram();
    manager.add_relationship("Car", "Wheel").unwrap();

    assert_eq!(manager.class_count(), 3);
    assert_eq!(manager.relationship_count(), 1);
    let (key, rel) = manager.relationships().next().unwrap();
    assert_eq!(key, "Car-Wheel");
    assert_eq!((rel.source(), rel.destination()), ("Car", "Wheel"));
}

#[test]
fn test_renamed_class_survives_save_and_reload() {
    let mut manager = diagram();
    manager.add_relationship("Car", "Wheel").unwrap();

    assert_eq!(manager.edit_class("Car", "My Car").status(), 0);
    assert_eq!(manager.edit_class("Wheel", "1Wheel").status(), 0);
    assert_eq!(manager.add_class("My Car").status(), 407);

    let restored = umlmodel::load(&manager.to_json().unwrap()).unwrap();
    assert_eq!(restored, manager);
    assert_eq!(restored.list_relationships("My Car").unwrap(), "[My Car-1Wheel]");
}
