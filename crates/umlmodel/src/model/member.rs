//! Class members
//!
//! Fields and methods are small value records: a name plus a free-form
//! descriptor. Their shape never changes after creation; a rename is a
//! remove followed by an add on the owning class.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An attribute of a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    name: String,
    #[serde(rename = "type", default)]
    type_descriptor: String,
}

impl Field {
    /// Create a field without a type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_descriptor: String::new(),
        }
    }

    /// Attach a type descriptor, e.g. `int` or `List<Wheel>`
    pub fn with_type(mut self, type_descriptor: impl Into<String>) -> Self {
        self.type_descriptor = type_descriptor.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_descriptor(&self) -> &str {
        &self.type_descriptor
    }

    /// Same field under another name
    pub(crate) fn renamed(&self, name: impl Into<String>) -> Self {
        Self::new(name).with_type(self.type_descriptor.clone())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.type_descriptor.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.type_descriptor, self.name)
        }
    }
}

/// An operation of a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    name: String,
    #[serde(default)]
    signature: String,
}

impl Method {
    /// Create a method without a signature
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: String::new(),
        }
    }

    /// Attach a signature descriptor, e.g. `void (int speed)`
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub(crate) fn renamed(&self, name: impl Into<String>) -> Self {
        Self::new(name).with_signature(self.signature.clone())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.signature.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.signature, self.name)
        }
    }
}
