//! Supplemental annotation merge
//!
//! A second document in the metadata shape may add or override extensions.
//! Elements are matched by their key: `namespace` for schemas, `name` for
//! entity types, properties, containers and entity sets. Elements of the
//! supplemental document without a counterpart are ignored.

use tracing::{debug, warn};
use super::types::{EntityContainer, EntityType, Extension, Schema, ServiceMetadata};

impl ServiceMetadata {
    /// Merge extensions from a supplemental JSON annotation document
    ///
    /// Best effort: a malformed document, or a primary document without
    /// loaded schemas, leaves `self` unchanged.
    pub fn merge_supplemental_annotations(&mut self, document: &str) {
        let supplemental: ServiceMetadata = match serde_json::from_str(document) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Ignoring malformed supplemental annotation document: {}", e);
                return;
            }
        };
        self.merge_annotations_from(&supplemental);
    }

    /// Merge extensions from an already parsed supplemental document
    pub fn merge_annotations_from(&mut self, supplemental: &ServiceMetadata) {
        let Some(data_services) = self.data_services.as_mut() else {
            debug!("No primary metadata loaded, skipping supplemental annotations");
            return;
        };
        for source in supplemental.schemas() {
            match data_services.schema.iter_mut().find(|s| s.namespace == source.namespace) {
                Some(target) => merge_schema(target, source),
                None => debug!("Supplemental schema '{}' has no counterpart", source.namespace),
            }
        }
    }
}

fn merge_schema(target: &mut Schema, source: &Schema) {
    merge_extensions(&mut target.extensions, &source.extensions);
    for source_type in &source.entity_type {
        if let Some(target_type) = target.entity_type.iter_mut().find(|t| t.name == source_type.name) {
            merge_entity_type(target_type, source_type);
        }
    }
    for source_container in &source.entity_container {
        if let Some(target_container) = target
            .entity_container
            .iter_mut()
            .find(|c| c.name == source_container.name)
        {
            merge_container(target_container, source_container);
        }
    }
}

fn merge_entity_type(target: &mut EntityType, source: &EntityType) {
    merge_extensions(&mut target.extensions, &source.extensions);
    for source_property in &source.property {
        if let Some(target_property) = target.property.iter_mut().find(|p| p.name == source_property.name) {
            merge_extensions(&mut target_property.extensions, &source_property.extensions);
        }
    }
}

fn merge_container(target: &mut EntityContainer, source: &EntityContainer) {
    merge_extensions(&mut target.extensions, &source.extensions);
    for source_set in &source.entity_set {
        if let Some(target_set) = target.entity_set.iter_mut().find(|s| s.name == source_set.name) {
            merge_extensions(&mut target_set.extensions, &source_set.extensions);
        }
    }
}

/// Add extensions, overriding values of extensions with the same namespace and name
fn merge_extensions(target: &mut Vec<Extension>, source: &[Extension]) {
    for extension in source {
        match target
            .iter_mut()
            .find(|e| e.namespace == extension.namespace && e.name == extension.name)
        {
            Some(existing) => existing.value = extension.value.clone(),
            None => target.push(extension.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::SAP_NAMESPACE;

    fn primary() -> ServiceMetadata {
        serde_json::from_str(
            r#"{ "dataServices": { "schema": [ {
                "namespace": "NS",
                "entityType": [ { "name": "T", "property": [
                    { "name": "A", "type": "Edm.String" },
                    { "name": "B", "type": "Edm.String",
                      "extensions": [ { "namespace": "http://www.sap.com/Protocols/SAPData", "name": "label", "value": "Old" } ] }
                ] } ],
                "entityContainer": [ { "name": "C", "entitySet": [ { "name": "S", "entityType": "NS.T" } ] } ]
            } ] } }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_merge_adds_and_overrides() {
        let mut metadata = primary();
        metadata.merge_supplemental_annotations(
            r#"{ "dataServices": { "schema": [ {
                "namespace": "NS",
                "entityType": [ { "name": "T", "property": [
                    { "name": "A", "type": "Edm.String",
                      "extensions": [ { "namespace": "http://www.sap.com/Protocols/SAPData", "name": "label", "value": "Alpha" } ] },
                    { "name": "B", "type": "Edm.String",
                      "extensions": [ { "namespace": "http://www.sap.com/Protocols/SAPData", "name": "label", "value": "Beta" } ] },
                    { "name": "Missing", "type": "Edm.String",
                      "extensions": [ { "namespace": "http://www.sap.com/Protocols/SAPData", "name": "label", "value": "X" } ] }
                ] } ],
                "entityContainer": [ { "name": "C", "entitySet": [ { "name": "S", "entityType": "NS.T",
                    "extensions": [ { "namespace": "http://www.sap.com/Protocols/SAPData", "name": "label", "value": "Set" } ] } ] } ]
            } ] } }"#,
        );

        let schema = &metadata.schemas()[0];
        let entity_type = &schema.entity_type[0];
        assert_eq!(entity_type.property.len(), 2);
        assert_eq!(entity_type.property[0].extensions, vec![Extension::new(SAP_NAMESPACE, "label", "Alpha")]);
        assert_eq!(entity_type.property[1].extensions.len(), 1);
        assert_eq!(entity_type.property[1].extensions[0].value, "Beta");
        assert_eq!(schema.entity_container[0].entity_set[0].extensions[0].value, "Set");
    }

    #[test]
    fn test_malformed_document_is_ignored() {
        let mut metadata = primary();
        metadata.merge_supplemental_annotations("{ not json");
        assert!(metadata.schemas()[0].entity_type[0].property[0].extensions.is_empty());
    }

    #[test]
    fn test_unmatched_schema_is_ignored() {
        let mut metadata = primary();
        metadata.merge_supplemental_annotations(
            r#"{ "dataServices": { "schema": [ { "namespace": "OTHER",
                "entityType": [ { "name": "T", "extensions": [ { "name": "semantics", "value": "aggregate" } ] } ] } ] } }"#,
        );
        assert!(metadata.schemas()[0].entity_type[0].extensions.is_empty());
    }

    #[test]
    fn test_absent_primary_metadata_is_ignored() {
        let mut metadata = ServiceMetadata::default();
        metadata.merge_supplemental_annotations(r#"{ "dataServices": { "schema": [] } }"#);
        assert!(metadata.data_services.is_none());
    }
}
