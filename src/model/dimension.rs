//! Dimensions and dimension attributes

use tracing::warn;
use crate::config::Workarounds;
use crate::metadata::{self, Annotation};
use super::entity::EntityType;
use super::hierarchy::RecursiveHierarchy;
use super::resolve_label;
use super::value_help::ValueHelp;

/// A categorical property used to group and slice a query result
#[derive(Debug, Clone)]
pub struct Dimension {
    name: String,
    key_property: metadata::Property,
    text_property: Option<metadata::Property>,
    label: String,
    super_ordinate: Option<String>,
    attributes: Vec<DimensionAttribute>,
    hierarchy: Option<RecursiveHierarchy>,
    master_data: Option<ValueHelp>,
}

impl Dimension {
    pub(crate) fn new(property: &metadata::Property, entity_type: &EntityType, workarounds: &Workarounds) -> Self {
        let mut super_ordinate = None;
        for annotation in metadata::annotations(&property.extensions) {
            if let Annotation::SuperOrdinate(s) = annotation {
                super_ordinate = Some(s.to_string());
            }
        }
        Self {
            name: property.name.clone(),
            key_property: property.clone(),
            text_property: linked_text_property(property, entity_type),
            label: resolve_label(metadata::label(&property.extensions), &property.name, workarounds),
            super_ordinate,
            attributes: Vec::new(),
            hierarchy: entity_type.find_hierarchy(&property.name).cloned(),
            master_data: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key_property(&self) -> &metadata::Property {
        &self.key_property
    }

    pub fn text_property(&self) -> Option<&metadata::Property> {
        self.text_property.as_ref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Name of the dimension this one is qualified by
    pub fn super_ordinate_dimension_name(&self) -> Option<&str> {
        self.super_ordinate.as_deref()
    }

    pub fn attributes(&self) -> &[DimensionAttribute] {
        &self.attributes
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name()).collect()
    }

    pub fn find_attribute_by_name(&self, name: &str) -> Option<&DimensionAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn hierarchy(&self) -> Option<&RecursiveHierarchy> {
        self.hierarchy.as_ref()
    }

    /// Entity set holding the master data of this dimension
    pub fn master_data(&self) -> Option<&ValueHelp> {
        self.master_data.as_ref()
    }

    pub fn has_master_data(&self) -> bool {
        self.master_data.is_some()
    }

    pub(crate) fn add_attribute(&mut self, attribute: DimensionAttribute) {
        self.attributes.push(attribute);
    }

    pub(crate) fn set_text_property(&mut self, property: metadata::Property) {
        self.text_property = Some(property);
    }

    pub(crate) fn set_master_data(&mut self, master_data: ValueHelp) {
        self.master_data = Some(master_data);
    }
}

/// A property describing members of a dimension
#[derive(Debug, Clone)]
pub struct DimensionAttribute {
    name: String,
    dimension: String,
    key_property: metadata::Property,
    text_property: Option<metadata::Property>,
    label: String,
}

impl DimensionAttribute {
    pub(crate) fn new(
        property: &metadata::Property,
        dimension: &str,
        entity_type: &EntityType,
        workarounds: &Workarounds,
    ) -> Self {
        Self {
            name: property.name.clone(),
            dimension: dimension.to_string(),
            key_property: property.clone(),
            text_property: linked_text_property(property, entity_type),
            label: resolve_label(metadata::label(&property.extensions), &property.name, workarounds),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the dimension this attribute belongs to
    pub fn dimension_name(&self) -> &str {
        &self.dimension
    }

    pub fn key_property(&self) -> &metadata::Property {
        &self.key_property
    }

    pub fn text_property(&self) -> Option<&metadata::Property> {
        self.text_property.as_ref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The property named by the `text` annotation
pub(crate) fn linked_text_property(
    property: &metadata::Property,
    entity_type: &EntityType,
) -> Option<metadata::Property> {
    let text = metadata::text(&property.extensions)?;
    let linked = entity_type.find_property(text).cloned();
    if linked.is_none() {
        warn!(
            "Text property '{}' of '{}' not found in '{}'",
            text,
            property.name,
            entity_type.qualified_name()
        );
    }
    linked
}
