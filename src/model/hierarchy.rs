//! Recursive hierarchies
//!
//! A self-referencing hierarchy on a dimension is described by four
//! cooperating properties: node id, parent node id, level and drill state.

use std::collections::BTreeMap;
use tracing::debug;
use crate::metadata::{self, Annotation};

/// A parent/child hierarchy over the members of one dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecursiveHierarchy {
    dimension_property: String,
    node_id_property: String,
    parent_node_id_property: Option<String>,
    level_property: Option<String>,
    drill_state_property: Option<String>,
}

impl RecursiveHierarchy {
    /// Property holding the dimension's external key
    ///
    /// Equal to the node id property when the hierarchy has no separate
    /// dimension property.
    pub fn dimension_property(&self) -> &str {
        &self.dimension_property
    }

    pub fn node_id_property(&self) -> &str {
        &self.node_id_property
    }

    pub fn parent_node_id_property(&self) -> Option<&str> {
        self.parent_node_id_property.as_deref()
    }

    pub fn level_property(&self) -> Option<&str> {
        self.level_property.as_deref()
    }

    pub fn drill_state_property(&self) -> Option<&str> {
        self.drill_state_property.as_deref()
    }

    /// Whether the hierarchy has a dimension property of its own
    pub fn has_external_key(&self) -> bool {
        self.dimension_property != self.node_id_property
    }
}

#[derive(Default)]
struct Parts {
    node_id: Option<String>,
    parent_node_id: Option<String>,
    level: Option<String>,
    drill_state: Option<String>,
}

/// Collect the recursive hierarchies of an entity type, keyed by dimension name
///
/// The node id property is annotated with the dimension it serves. The other
/// three annotations name either that dimension or the node id property.
pub(crate) fn collect_hierarchies(entity_type: &metadata::EntityType) -> BTreeMap<String, RecursiveHierarchy> {
    let mut node_to_dimension: BTreeMap<&str, &str> = BTreeMap::new();
    for property in &entity_type.property {
        for annotation in metadata::annotations(&property.extensions) {
            if let Annotation::HierarchyNodeFor(dimension) = annotation {
                node_to_dimension.insert(property.name.as_str(), dimension);
            }
        }
    }

    let mut parts: BTreeMap<String, Parts> = BTreeMap::new();
    for (node, dimension) in &node_to_dimension {
        parts.entry(dimension.to_string()).or_default().node_id = Some(node.to_string());
    }

    for property in &entity_type.property {
        for annotation in metadata::annotations(&property.extensions) {
            let name = Some(property.name.clone());
            match annotation {
                Annotation::HierarchyParentNodeFor(t) => {
                    part_for(&mut parts, &node_to_dimension, t).parent_node_id = name;
                }
                Annotation::HierarchyLevelFor(t) => {
                    part_for(&mut parts, &node_to_dimension, t).level = name;
                }
                Annotation::HierarchyDrillStateFor(t) => {
                    part_for(&mut parts, &node_to_dimension, t).drill_state = name;
                }
                _ => {}
            }
        }
    }

    let mut hierarchies = BTreeMap::new();
    for (dimension, part) in parts {
        let Some(node_id) = part.node_id else {
            debug!("Hierarchy annotations for '{}' without node id property, skipped", dimension);
            continue;
        };
        let dimension_property = match entity_type.find_property(&dimension) {
            Some(p) if p.name != node_id => p.name.clone(),
            _ => node_id.clone(),
        };
        hierarchies.insert(
            dimension,
            RecursiveHierarchy {
                dimension_property,
                node_id_property: node_id,
                parent_node_id_property: part.parent_node_id,
                level_property: part.level,
                drill_state_property: part.drill_state,
            },
        );
    }
    hierarchies
}

/// Parts of the hierarchy an annotation value refers to
fn part_for<'p>(
    parts: &'p mut BTreeMap<String, Parts>,
    node_to_dimension: &BTreeMap<&str, &str>,
    target: &str,
) -> &'p mut Parts {
    let dimension = node_to_dimension.get(target).copied().unwrap_or(target);
    parts.entry(dimension.to_string()).or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{Extension, Property, SAP_NAMESPACE};

    fn property(name: &str, annotations: &[(&str, &str)]) -> Property {
        Property {
            name: name.to_string(),
            type_name: "Edm.String".to_string(),
            extensions: annotations
                .iter()
                .map(|(n, v)| Extension::new(SAP_NAMESPACE, *n, *v))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_collect_hierarchy_with_truncated_names() {
        let entity_type = metadata::EntityType {
            name: "T".into(),
            property: vec![
                property("CostCenter", &[("aggregation-role", "dimension")]),
                property("CostCenterNode", &[("hierarchy-node-for", "CostCenter")]),
                property("CostCenterParent", &[("hierarchy-parent-nod", "CostCenterNode")]),
                property("CostCenterLevel", &[("hierarchy-level-for", "CostCenterNode")]),
                property("CostCenterDrill", &[("hierarchy-drill-stat", "CostCenterNode")]),
            ],
            ..Default::default()
        };
        let hierarchies = collect_hierarchies(&entity_type);
        let hierarchy = hierarchies.get("CostCenter").unwrap();
        assert_eq!(hierarchy.dimension_property(), "CostCenter");
        assert_eq!(hierarchy.node_id_property(), "CostCenterNode");
        assert_eq!(hierarchy.parent_node_id_property(), Some("CostCenterParent"));
        assert_eq!(hierarchy.level_property(), Some("CostCenterLevel"));
        assert_eq!(hierarchy.drill_state_property(), Some("CostCenterDrill"));
        assert!(hierarchy.has_external_key());
    }

    #[test]
    fn test_node_id_reused_as_dimension_property() {
        let entity_type = metadata::EntityType {
            name: "T".into(),
            property: vec![
                property("Node", &[("hierarchy-node-for", "Account")]),
                property("Parent", &[("hierarchy-parent-node-for", "Account")]),
            ],
            ..Default::default()
        };
        let hierarchies = collect_hierarchies(&entity_type);
        let hierarchy = hierarchies.get("Account").unwrap();
        assert_eq!(hierarchy.dimension_property(), "Node");
        assert!(!hierarchy.has_external_key());
        assert_eq!(hierarchy.parent_node_id_property(), Some("Parent"));
        assert_eq!(hierarchy.level_property(), None);
    }

    #[test]
    fn test_hierarchy_without_node_is_skipped() {
        let entity_type = metadata::EntityType {
            name: "T".into(),
            property: vec![property("Level", &[("hierarchy-level-for", "Account")])],
            ..Default::default()
        };
        assert!(collect_hierarchies(&entity_type).is_empty());
    }
}
