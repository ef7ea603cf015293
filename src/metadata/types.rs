//! Service metadata document types
//!
//! Mirrors the already-parsed metadata object handed over by the transport
//! layer: `dataServices.schema[]` with entity types, containers and
//! associations. Every element that may carry vendor annotations has an
//! `extensions` list.

use serde::{Deserialize, Serialize};

/// The root of a metadata document
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetadata {
    pub data_services: Option<DataServices>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DataServices {
    #[serde(default)]
    pub schema: Vec<Schema>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub namespace: String,
    #[serde(default)]
    pub entity_type: Vec<EntityType>,
    #[serde(default)]
    pub entity_container: Vec<EntityContainer>,
    #[serde(default)]
    pub association: Vec<Association>,
    #[serde(default)]
    pub extensions: Vec<Extension>,
}

/// A vendor annotation attached to a metadata element
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Extension {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl Extension {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    pub name: String,
    #[serde(default)]
    pub key: Key,
    #[serde(default)]
    pub property: Vec<Property>,
    #[serde(default)]
    pub navigation_property: Vec<NavigationProperty>,
    #[serde(default)]
    pub extensions: Vec<Extension>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    #[serde(default)]
    pub property_ref: Vec<PropertyRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PropertyRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    /// Declared primitive type, e.g. `Edm.String`
    #[serde(rename = "type")]
    pub type_name: String,
    pub nullable: Option<String>,
    pub max_length: Option<String>,
    #[serde(default)]
    pub extensions: Vec<Extension>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationProperty {
    pub name: String,
    /// Qualified name of the association
    pub relationship: String,
    pub from_role: String,
    pub to_role: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityContainer {
    pub name: String,
    /// `"true"` for the default container
    pub is_default_entity_container: Option<String>,
    #[serde(default)]
    pub entity_set: Vec<EntitySet>,
    #[serde(default)]
    pub association_set: Vec<AssociationSet>,
    #[serde(default)]
    pub extensions: Vec<Extension>,
}

impl EntityContainer {
    pub fn is_default(&self) -> bool {
        self.is_default_entity_container.as_deref() == Some("true")
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySet {
    pub name: String,
    /// Qualified name of the entity type
    pub entity_type: String,
    #[serde(default)]
    pub extensions: Vec<Extension>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AssociationSet {
    pub name: String,
    pub association: String,
    #[serde(default)]
    pub end: Vec<AssociationSetEnd>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationSetEnd {
    pub role: String,
    pub entity_set: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Association {
    pub name: String,
    #[serde(default)]
    pub end: Vec<AssociationEnd>,
    pub referential_constraint: Option<ReferentialConstraint>,
    #[serde(default)]
    pub extensions: Vec<Extension>,
}

impl Association {
    /// The end playing the given role
    pub fn end_for_role(&self, role: &str) -> Option<&AssociationEnd> {
        self.end.iter().find(|e| e.role == role)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AssociationEnd {
    /// Qualified name of the entity type at this end
    #[serde(rename = "type")]
    pub type_name: String,
    pub multiplicity: Option<String>,
    pub role: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReferentialConstraint {
    pub principal: ConstraintRole,
    pub dependent: ConstraintRole,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintRole {
    pub role: String,
    #[serde(default)]
    pub property_ref: Vec<PropertyRef>,
}

impl ServiceMetadata {
    /// Schemas of the document, empty when nothing is loaded
    pub fn schemas(&self) -> &[Schema] {
        self.data_services
            .as_ref()
            .map(|d| d.schema.as_slice())
            .unwrap_or(&[])
    }
}

impl EntityType {
    pub fn find_property(&self, name: &str) -> Option<&Property> {
        self.property.iter().find(|p| p.name == name)
    }

    /// Names of the declared key properties
    pub fn key_property_names(&self) -> Vec<&str> {
        self.key.property_ref.iter().map(|r| r.name.as_str()).collect()
    }
}
