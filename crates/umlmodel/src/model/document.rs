//! JSON document persistence
//!
//! A document holds one manager: the class registry with members and
//! positions, and the relationship registry. Loading checks referential
//! consistency before anything is replaced, so a bad document never leaves a
//! half-populated manager behind.

use std::fmt;
use std::marker::PhantomData;

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::{info, span, warn, Level};

use super::class::UmlClass;
use super::manager::ClassManager;
use super::relationship::Relationship;
use crate::core::{ModelError, ModelResult};

/// Wire shape of a serialized manager
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    #[serde(default, deserialize_with = "unique_keys")]
    classes: IndexMap<String, UmlClass>,
    #[serde(default, deserialize_with = "unique_keys")]
    relationships: IndexMap<String, Relationship>,
}

/// Deserialize a name-keyed map, rejecting a key that appears twice
///
/// A plain `IndexMap` keeps the last value for a repeated key, which would
/// silently drop part of the document.
pub(super) fn unique_keys<'de, D, V>(deserializer: D) -> Result<IndexMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: DeserializeOwned,
{
    struct UniqueKeys<V>(PhantomData<V>);

    impl<'de, V: DeserializeOwned> Visitor<'de> for UniqueKeys<V> {
        type Value = IndexMap<String, V>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map with unique keys")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut map = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((key, value)) = access.next_entry::<String, V>()? {
                match map.entry(key) {
                    Entry::Occupied(entry) => {
                        return Err(de::Error::custom(format!(
                            "duplicate key {:?}",
                            entry.key()
                        )));
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(value);
                    }
                }
            }
            Ok(map)
        }
    }

    deserializer.deserialize_map(UniqueKeys(PhantomData))
}

impl Document {
    /// Check the document describes a consistent graph
    fn into_manager(self) -> ModelResult<ClassManager> {
        for (key, class) in &self.classes {
            if key != class.name() {
                return Err(ModelError::malformed(format!(
                    "class registered as {:?} is named {:?}",
                    key,
                    class.name()
                )));
            }
            if !class.members_consistent() {
                return Err(ModelError::malformed(format!(
                    "class {:?} has members stored under the wrong name",
                    key
                )));
            }
        }

        for (index, (key, rel)) in self.relationships.iter().enumerate() {
            for endpoint in [rel.source(), rel.destination()] {
                if !self.classes.contains_key(endpoint) {
                    return Err(ModelError::malformed(format!(
                        "relationship {:?} references unknown class {:?}",
                        key, endpoint
                    )));
                }
            }
            if *key != rel.key() {
                return Err(ModelError::malformed(format!(
                    "relationship stored as {:?} should be keyed {:?}",
                    key,
                    rel.key()
                )));
            }
            let duplicate = self
                .relationships
                .values()
                .take(index)
                .any(|earlier| earlier.connects(rel.source(), rel.destination()));
            if duplicate {
                return Err(ModelError::malformed(format!(
                    "relationship {:?} duplicates an existing pair",
                    key
                )));
            }
        }

        Ok(ClassManager::from_parts(self.classes, self.relationships))
    }
}

impl ClassManager {
    /// Serialize the full model as pretty-printed JSON
    pub fn to_json(&self) -> ModelResult<String> {
        let json = serde_json::to_string_pretty(self)?;
        info!(
            classes = self.class_count(),
            relationships = self.relationship_count(),
            bytes = json.len(),
            "Serialized document"
        );
        Ok(json)
    }

    /// Build a manager from a JSON document
    pub fn load(json: &str) -> ModelResult<Self> {
        let load_span = span!(Level::INFO, "load_document", input_len = json.len());
        let _enter = load_span.enter();

        let manager = serde_json::from_str::<Document>(json)
            .map_err(ModelError::from)
            .and_then(Document::into_manager)
            .inspect_err(|e| warn!(error = %e, "Rejected document"))?;

        info!(
            classes = manager.class_count(),
            relationships = manager.relationship_count(),
            "Loaded document"
        );
        Ok(manager)
    }

    /// Replace this manager's state with the one described by `json`
    ///
    /// On error the current state is left untouched.
    pub fn from_json(&mut self, json: &str) -> ModelResult<()> {
        *self = Self::load(json)?;
        Ok(())
    }
}
