//! View binder contract
//!
//! The model never pushes changes to a view. After a mutation the caller
//! tells the bound view which part of a class went stale, and the view pulls
//! the current state from the class accessors.

use crate::model::UmlClass;

/// A view bound to a single class
pub trait ViewBinder {
    /// Re-read the class name
    fn sync_name(&mut self, class: &UmlClass);

    /// Reconcile displayed fields with the class's field collection
    fn sync_fields(&mut self, class: &UmlClass);

    /// Reconcile displayed methods with the class's method collection
    fn sync_methods(&mut self, class: &UmlClass);

    /// Re-read the diagram position
    fn sync_location(&mut self, class: &UmlClass);

    /// Refresh everything
    fn sync_all(&mut self, class: &UmlClass) {
        self.sync_name(class);
        self.sync_fields(class);
        self.sync_methods(class);
        self.sync_location(class);
    }
}
