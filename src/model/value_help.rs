//! Value help sources
//!
//! A referential constraint whose dependent property is a parameter (or a
//! dimension) names the entity set listing the valid values for it.

use std::sync::Arc;
use super::entity::{EntitySet, EntityType};

/// Entity set providing the valid values for a parameter or dimension
#[derive(Debug, Clone)]
pub struct ValueHelp {
    entity_type: Arc<EntityType>,
    entity_set: Arc<EntitySet>,
    key_property: String,
}

impl ValueHelp {
    pub(crate) fn new(entity_type: Arc<EntityType>, entity_set: Arc<EntitySet>, key_property: String) -> Self {
        Self {
            entity_type,
            entity_set,
            key_property,
        }
    }

    pub fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    pub fn entity_set(&self) -> &EntitySet {
        &self.entity_set
    }

    /// Property of the value help entity holding the values
    pub fn key_property(&self) -> &str {
        &self.key_property
    }

    /// Property annotated as text of the key property, if any
    pub fn text_property(&self) -> Option<&str> {
        let key = self.entity_type.find_property(&self.key_property)?;
        crate::metadata::text(&key.extensions).filter(|t| self.entity_type.find_property(t).is_some())
    }
}
