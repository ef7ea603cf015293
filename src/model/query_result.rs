//! Query results
//!
//! An aggregate entity type together with its entity set, grouped into
//! dimensions and measures.

use std::sync::Arc;
use tracing::{debug, warn};
use crate::config::Workarounds;
use crate::metadata::{self, AggregationRole, Annotation};
use super::dimension::{Dimension, DimensionAttribute};
use super::entity::{EntitySet, EntityType};
use super::measure::Measure;
use super::parameterization::Parameterization;

/// Suffixes tried, in order, when looking for a dimension text property by name
const TEXT_PROPERTY_SUFFIXES: [&str; 4] = ["Name", "Text", "Desc", "Description"];

/// A pre-aggregated analytical query result
#[derive(Debug, Clone)]
pub struct QueryResult {
    entity_type: Arc<EntityType>,
    entity_set: Arc<EntitySet>,
    dimensions: Vec<Dimension>,
    measures: Vec<Measure>,
    totaled_properties_list: Option<String>,
    parameterization: Option<Arc<Parameterization>>,
}

impl QueryResult {
    pub(crate) fn new(entity_type: Arc<EntityType>, entity_set: Arc<EntitySet>, workarounds: &Workarounds) -> Self {
        let mut dimensions = Vec::new();
        let mut measures = Vec::new();
        let mut totaled_properties_list = None;
        let mut attributes: Vec<(&metadata::Property, &str)> = Vec::new();

        for property in entity_type.properties() {
            for annotation in metadata::annotations(&property.extensions) {
                match annotation {
                    Annotation::AggregationRole(Some(AggregationRole::Dimension)) => {
                        dimensions.push(Dimension::new(property, &entity_type, workarounds));
                    }
                    Annotation::AggregationRole(Some(AggregationRole::Measure)) => {
                        measures.push(Measure::new(property, &entity_type, workarounds));
                    }
                    Annotation::AggregationRole(Some(AggregationRole::TotaledPropertiesList)) => {
                        totaled_properties_list = Some(property.name.clone());
                    }
                    Annotation::AttributeFor(dimension) => attributes.push((property, dimension)),
                    _ => {}
                }
            }
        }

        if workarounds.identify_text_properties_by_name {
            identify_text_properties_by_name(&mut dimensions, &entity_type);
        }

        for (property, dimension_name) in attributes {
            match dimensions.iter_mut().find(|d| d.name() == dimension_name) {
                Some(dimension) => dimension.add_attribute(DimensionAttribute::new(
                    property,
                    dimension_name,
                    &entity_type,
                    workarounds,
                )),
                None => warn!(
                    "Attribute '{}' refers to unknown dimension '{}' in '{}'",
                    property.name,
                    dimension_name,
                    entity_type.qualified_name()
                ),
            }
        }

        debug!(
            "Query result '{}': {} dimensions, {} measures",
            entity_set.qualified_name(),
            dimensions.len(),
            measures.len()
        );

        Self {
            entity_type,
            entity_set,
            dimensions,
            measures,
            totaled_properties_list,
            parameterization: None,
        }
    }

    /// Qualified name of the entity set
    pub fn name(&self) -> &str {
        self.entity_set.qualified_name()
    }

    pub fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    pub fn entity_set(&self) -> &EntitySet {
        &self.entity_set
    }

    pub fn parameterization(&self) -> Option<&Parameterization> {
        self.parameterization.as_deref()
    }

    pub fn is_parameterized(&self) -> bool {
        self.parameterization.is_some()
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn dimension_names(&self) -> Vec<&str> {
        self.dimensions.iter().map(|d| d.name()).collect()
    }

    pub fn find_dimension_by_name(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name() == name)
    }

    /// The dimension whose key or text property has the given name
    pub fn find_dimension_by_property_name(&self, property: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| {
            d.key_property().name == property || d.text_property().is_some_and(|t| t.name == property)
        })
    }

    /// The dimension qualifying the given one, via `super-ordinate`
    pub fn super_ordinate_dimension(&self, dimension: &Dimension) -> Option<&Dimension> {
        self.find_dimension_by_name(dimension.super_ordinate_dimension_name()?)
    }

    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    pub fn measure_names(&self) -> Vec<&str> {
        self.measures.iter().map(|m| m.name()).collect()
    }

    pub fn find_measure_by_name(&self, name: &str) -> Option<&Measure> {
        self.measures.iter().find(|m| m.name() == name)
    }

    /// The measure whose raw, formatted or unit property has the given name
    pub fn find_measure_by_property_name(&self, property: &str) -> Option<&Measure> {
        self.measures.iter().find(|m| {
            m.raw_value_property().name == property
                || m.formatted_value_property().is_some_and(|p| p.name == property)
                || m.unit_property().is_some_and(|p| p.name == property)
        })
    }

    /// Property annotated as `totaled-properties-list`
    pub fn totaled_properties_list_property(&self) -> Option<&str> {
        self.totaled_properties_list.as_deref()
    }

    pub(crate) fn dimensions_mut(&mut self) -> &mut [Dimension] {
        &mut self.dimensions
    }

    pub(crate) fn set_parameterization(&mut self, parameterization: Arc<Parameterization>) {
        self.parameterization = Some(parameterization);
    }
}

/// Link `<dimension>Name|Text|Desc|Description` as text of dimensions without one
///
/// Matched siblings are no longer exposed as dimensions of their own.
fn identify_text_properties_by_name(dimensions: &mut Vec<Dimension>, entity_type: &EntityType) {
    let mut matched = Vec::new();
    for dimension in dimensions.iter_mut() {
        if dimension.text_property().is_some() {
            continue;
        }
        let found = TEXT_PROPERTY_SUFFIXES
            .iter()
            .find_map(|suffix| entity_type.find_property(&format!("{}{}", dimension.name(), suffix)));
        if let Some(text) = found {
            debug!("Using '{}' as text of dimension '{}'", text.name, dimension.name());
            matched.push(text.name.clone());
            dimension.set_text_property(text.clone());
        }
    }
    dimensions.retain(|d| !matched.iter().any(|m| m == d.name()));
}
