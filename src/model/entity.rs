//! Entity type and entity set wrappers

use std::collections::BTreeMap;
use crate::helper::EdmType;
use crate::metadata::{self, Annotation};
use super::hierarchy::{collect_hierarchies, RecursiveHierarchy};

/// An entity type of the service, with its filter/sort capabilities
#[derive(Debug, Clone)]
pub struct EntityType {
    namespace: String,
    qualified_name: String,
    description: metadata::EntityType,
    filterable_properties: Vec<String>,
    sortable_properties: Vec<String>,
    required_filter_properties: Vec<String>,
    hierarchies: BTreeMap<String, RecursiveHierarchy>,
}

impl EntityType {
    pub(crate) fn new(namespace: &str, description: &metadata::EntityType) -> Self {
        let mut filterable_properties = Vec::new();
        let mut sortable_properties = Vec::new();
        let mut required_filter_properties = Vec::new();

        for property in &description.property {
            let mut filterable = true;
            let mut sortable = true;
            let mut required_filter = false;
            for annotation in metadata::annotations(&property.extensions) {
                match annotation {
                    Annotation::Filterable(f) => filterable = f,
                    Annotation::Sortable(s) => sortable = s,
                    Annotation::RequiredFilter(r) => required_filter = r,
                    _ => {}
                }
            }
            if filterable {
                filterable_properties.push(property.name.clone());
            }
            if sortable {
                sortable_properties.push(property.name.clone());
            }
            if required_filter {
                required_filter_properties.push(property.name.clone());
            }
        }

        Self {
            namespace: namespace.to_string(),
            qualified_name: format!("{}.{}", namespace, description.name),
            description: description.clone(),
            filterable_properties,
            sortable_properties,
            required_filter_properties,
            hierarchies: collect_hierarchies(description),
        }
    }

    pub fn name(&self) -> &str {
        &self.description.name
    }

    /// Namespace-qualified name, e.g. `ZSALES.SalesType`
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Namespace of the owning schema
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The raw entity type description from the metadata document
    pub fn type_description(&self) -> &metadata::EntityType {
        &self.description
    }

    pub fn properties(&self) -> &[metadata::Property] {
        &self.description.property
    }

    pub fn find_property(&self, name: &str) -> Option<&metadata::Property> {
        self.description.find_property(name)
    }

    /// Declared primitive type of a property
    pub fn property_type(&self, name: &str) -> Option<EdmType> {
        self.find_property(name).map(|p| EdmType::parse(&p.type_name))
    }

    pub fn key_property_names(&self) -> Vec<&str> {
        self.description.key_property_names()
    }

    pub fn filterable_property_names(&self) -> &[String] {
        &self.filterable_properties
    }

    pub fn sortable_property_names(&self) -> &[String] {
        &self.sortable_properties
    }

    pub fn required_filter_property_names(&self) -> &[String] {
        &self.required_filter_properties
    }

    pub fn is_filterable(&self, property: &str) -> bool {
        self.filterable_properties.iter().any(|p| p == property)
    }

    pub fn is_sortable(&self, property: &str) -> bool {
        self.sortable_properties.iter().any(|p| p == property)
    }

    /// The recursive hierarchy defined for a dimension
    pub fn find_hierarchy(&self, dimension_name: &str) -> Option<&RecursiveHierarchy> {
        self.hierarchies.get(dimension_name)
    }

    /// Names of all dimensions with a recursive hierarchy
    pub fn hierarchy_dimension_names(&self) -> Vec<&str> {
        self.hierarchies.keys().map(|k| k.as_str()).collect()
    }

    pub(crate) fn matches_type_name(&self, type_name: &str) -> bool {
        type_name == self.qualified_name || type_name == self.description.name
    }
}

/// An entity set of the service
#[derive(Debug, Clone)]
pub struct EntitySet {
    container: String,
    qualified_name: String,
    description: metadata::EntitySet,
}

impl EntitySet {
    pub(crate) fn new(container: &str, description: &metadata::EntitySet) -> Self {
        Self {
            container: container.to_string(),
            qualified_name: format!("{}.{}", container, description.name),
            description: description.clone(),
        }
    }

    /// Set name as used in resource paths
    pub fn name(&self) -> &str {
        &self.description.name
    }

    /// Container-qualified name, e.g. `ZSALES_Entities.Sales`
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn container_name(&self) -> &str {
        &self.container
    }

    /// Qualified name of the entity type of this set
    pub fn entity_type_name(&self) -> &str {
        &self.description.entity_type
    }

    /// The raw entity set description from the metadata document
    pub fn set_description(&self) -> &metadata::EntitySet {
        &self.description
    }
}
