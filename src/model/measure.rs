//! Measures

use tracing::warn;
use crate::config::Workarounds;
use crate::metadata::{self, Annotation};
use super::dimension::linked_text_property;
use super::entity::EntityType;
use super::resolve_label;

/// A numeric property holding an aggregated quantity
#[derive(Debug, Clone)]
pub struct Measure {
    name: String,
    raw_value_property: metadata::Property,
    formatted_value_property: Option<metadata::Property>,
    unit_property: Option<metadata::Property>,
    label: String,
}

impl Measure {
    pub(crate) fn new(property: &metadata::Property, entity_type: &EntityType, workarounds: &Workarounds) -> Self {
        let mut unit_property = None;
        for annotation in metadata::annotations(&property.extensions) {
            if let Annotation::Unit(unit) = annotation {
                unit_property = entity_type.find_property(unit).cloned();
                if unit_property.is_none() {
                    warn!("Unit property '{}' of measure '{}' not found", unit, property.name);
                }
            }
        }
        Self {
            name: property.name.clone(),
            raw_value_property: property.clone(),
            formatted_value_property: linked_text_property(property, entity_type),
            unit_property,
            label: resolve_label(metadata::label(&property.extensions), &property.name, workarounds),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw_value_property(&self) -> &metadata::Property {
        &self.raw_value_property
    }

    /// Property holding the formatted value, from the `text` annotation
    pub fn formatted_value_property(&self) -> Option<&metadata::Property> {
        self.formatted_value_property.as_ref()
    }

    /// Property holding the unit or currency of the value
    pub fn unit_property(&self) -> Option<&metadata::Property> {
        self.unit_property.as_ref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
