//! Model construction
//!
//! A single synchronous pass over the metadata document:
//!
//! 1. register every entity set and entity type
//! 2. classify entity types by their `semantics` annotation
//! 3. build parameterizations and their value helps
//! 4. link aggregate types to their parameterization
//! 5. build query results and their dimension master data

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::config::Workarounds;
use crate::metadata::{self, Association, EntitySemantics, ServiceMetadata};
use super::entity::{EntitySet, EntityType};
use super::error::ModelError;
use super::parameter::Parameter;
use super::parameterization::{Parameterization, ParameterizationTarget};
use super::query_result::QueryResult;
use super::value_help::ValueHelp;

/// The analytical model of one service metadata document
#[derive(Debug)]
pub struct Model {
    metadata: ServiceMetadata,
    workarounds: Workarounds,
    default_container: Option<String>,
    entity_types: BTreeMap<String, Arc<EntityType>>,
    entity_sets: BTreeMap<String, Arc<EntitySet>>,
    query_results: BTreeMap<String, QueryResult>,
    parameterizations: BTreeMap<String, Arc<Parameterization>>,
}

/// Associations of all schemas, with the namespace they are declared in
struct Associations<'m>(Vec<(&'m str, &'m Association)>);

impl<'m> Associations<'m> {
    fn collect(metadata: &'m ServiceMetadata) -> Self {
        Self(
            metadata
                .schemas()
                .iter()
                .flat_map(|s| s.association.iter().map(move |a| (s.namespace.as_str(), a)))
                .collect(),
        )
    }

    fn iter(&self) -> impl Iterator<Item = (&'m str, &'m Association)> + '_ {
        self.0.iter().copied()
    }
}

impl Model {
    /// Build the model of a metadata document
    pub fn new(metadata: ServiceMetadata, workarounds: Workarounds) -> Result<Self, ModelError> {
        if metadata.schemas().is_empty() {
            return Err(ModelError::NoSchema);
        }

        let default_container = find_default_container(&metadata);
        let associations = Associations::collect(&metadata);

        let mut entity_sets = BTreeMap::new();
        for schema in metadata.schemas() {
            for container in &schema.entity_container {
                for set in &container.entity_set {
                    let set = Arc::new(EntitySet::new(&container.name, set));
                    entity_sets.insert(set.qualified_name().to_string(), set);
                }
            }
        }

        let mut entity_types = BTreeMap::new();
        let mut aggregate_types = Vec::new();
        let mut parameter_types = Vec::new();
        for schema in metadata.schemas() {
            for description in &schema.entity_type {
                let entity_type = Arc::new(EntityType::new(&schema.namespace, description));
                match metadata::semantics(&description.extensions) {
                    Some(EntitySemantics::Aggregate) => {
                        let set = unique_entity_set(&entity_type, &entity_sets)?;
                        debug!("Entity type '{}' is an aggregate", entity_type.qualified_name());
                        aggregate_types.push((entity_type.clone(), set));
                    }
                    Some(EntitySemantics::Parameters) => {
                        let set = unique_entity_set(&entity_type, &entity_sets)?;
                        debug!("Entity type '{}' holds parameters", entity_type.qualified_name());
                        parameter_types.push((entity_type.clone(), set));
                    }
                    None => {}
                }
                entity_types.insert(entity_type.qualified_name().to_string(), entity_type);
            }
        }

        let mut parameterizations = BTreeMap::new();
        for (entity_type, entity_set) in &parameter_types {
            let mut parameters = entity_type
                .properties()
                .iter()
                .map(|p| Parameter::new(p, entity_type, &workarounds))
                .collect::<Result<Vec<_>, _>>()?;
            check_interval_pairs(&parameters)?;

            for (property, value_help) in value_helps(entity_type, &associations, &entity_types, &entity_sets) {
                if let Some(parameter) = parameters.iter_mut().find(|p| p.name() == property) {
                    parameter.set_value_help(value_help);
                }
            }

            let parameterization = Parameterization::new(entity_type.clone(), entity_set.clone(), parameters);
            parameterizations.insert(entity_type.qualified_name().to_string(), parameterization);
        }

        let mut links = BTreeMap::new();
        for (entity_type, entity_set) in &aggregate_types {
            let Some((parameter_type, navigation_property)) =
                find_parameterization_link(entity_type, &parameter_types, &associations)?
            else {
                continue;
            };
            if let Some(parameterization) = parameterizations.get_mut(&parameter_type) {
                parameterization.add_target(ParameterizationTarget {
                    query_result: entity_set.qualified_name().to_string(),
                    navigation_property,
                });
                links.insert(entity_type.qualified_name().to_string(), parameter_type);
            }
        }

        let parameterizations_by_type: BTreeMap<String, Arc<Parameterization>> = parameterizations
            .into_iter()
            .map(|(type_name, p)| (type_name, Arc::new(p)))
            .collect();

        let mut query_results = BTreeMap::new();
        for (entity_type, entity_set) in &aggregate_types {
            let mut query_result = QueryResult::new(entity_type.clone(), entity_set.clone(), &workarounds);
            for (property, master_data) in value_helps(entity_type, &associations, &entity_types, &entity_sets) {
                if let Some(dimension) = query_result.dimensions_mut().iter_mut().find(|d| d.name() == property) {
                    dimension.set_master_data(master_data);
                }
            }
            if let Some(parameterization) = links
                .get(entity_type.qualified_name())
                .and_then(|t| parameterizations_by_type.get(t))
            {
                query_result.set_parameterization(parameterization.clone());
            }
            query_results.insert(query_result.name().to_string(), query_result);
        }

        let parameterizations: BTreeMap<String, Arc<Parameterization>> = parameterizations_by_type
            .into_values()
            .map(|p| (p.name().to_string(), p))
            .collect();

        info!(
            "Built model: {} query results, {} parameterizations, {} entity types",
            query_results.len(),
            parameterizations.len(),
            entity_types.len()
        );

        Ok(Self {
            metadata,
            workarounds,
            default_container,
            entity_types,
            entity_sets,
            query_results,
            parameterizations,
        })
    }

    /// Merge a supplemental JSON annotation document, then build the model
    ///
    /// A malformed supplemental document is ignored.
    pub fn with_supplemental_annotations(
        mut metadata: ServiceMetadata,
        annotations: &str,
        workarounds: Workarounds,
    ) -> Result<Self, ModelError> {
        metadata.merge_supplemental_annotations(annotations);
        Self::new(metadata, workarounds)
    }

    /// The metadata document, after merging supplemental annotations
    pub fn metadata(&self) -> &ServiceMetadata {
        &self.metadata
    }

    pub fn workarounds(&self) -> &Workarounds {
        &self.workarounds
    }

    pub fn default_entity_container_name(&self) -> Option<&str> {
        self.default_container.as_deref()
    }

    /// Qualified names of all query results
    pub fn query_result_names(&self) -> Vec<&str> {
        self.query_results.keys().map(|k| k.as_str()).collect()
    }

    pub fn query_results(&self) -> impl Iterator<Item = &QueryResult> {
        self.query_results.values()
    }

    /// Find a query result by qualified name, or by set name in the default container
    pub fn find_query_result_by_name(&self, name: &str) -> Option<&QueryResult> {
        self.query_results
            .get(name)
            .or_else(|| self.query_results.get(&self.qualify(name)?))
    }

    pub fn parameterization_names(&self) -> Vec<&str> {
        self.parameterizations.keys().map(|k| k.as_str()).collect()
    }

    pub fn parameterizations(&self) -> impl Iterator<Item = &Parameterization> {
        self.parameterizations.values().map(|p| p.as_ref())
    }

    /// Find a parameterization by qualified name, or by set name in the default container
    pub fn find_parameterization_by_name(&self, name: &str) -> Option<&Parameterization> {
        self.parameterizations
            .get(name)
            .or_else(|| self.parameterizations.get(&self.qualify(name)?))
            .map(|p| p.as_ref())
    }

    /// Find an entity type by qualified or unqualified name
    pub fn find_entity_type_by_name(&self, name: &str) -> Option<&EntityType> {
        self.entity_types
            .get(name)
            .or_else(|| self.entity_types.values().find(|t| t.matches_type_name(name)))
            .map(|t| t.as_ref())
    }

    /// Find an entity set by qualified name, or by set name in the default container
    pub fn find_entity_set_by_name(&self, name: &str) -> Option<&EntitySet> {
        self.entity_sets
            .get(name)
            .or_else(|| self.entity_sets.get(&self.qualify(name)?))
            .map(|s| s.as_ref())
    }

    fn qualify(&self, name: &str) -> Option<String> {
        self.default_container.as_ref().map(|c| format!("{}.{}", c, name))
    }
}

/// The container flagged as default, else the first one declared
fn find_default_container(metadata: &ServiceMetadata) -> Option<String> {
    let containers: Vec<_> = metadata.schemas().iter().flat_map(|s| &s.entity_container).collect();
    containers
        .iter()
        .find(|c| c.is_default())
        .or_else(|| containers.first())
        .map(|c| c.name.clone())
}

fn entity_sets_of<'s>(
    entity_type: &EntityType,
    entity_sets: &'s BTreeMap<String, Arc<EntitySet>>,
) -> Vec<&'s Arc<EntitySet>> {
    entity_sets
        .values()
        .filter(|s| entity_type.matches_type_name(s.entity_type_name()))
        .collect()
}

fn unique_entity_set(
    entity_type: &EntityType,
    entity_sets: &BTreeMap<String, Arc<EntitySet>>,
) -> Result<Arc<EntitySet>, ModelError> {
    match entity_sets_of(entity_type, entity_sets).as_slice() {
        [set] => Ok(Arc::clone(set)),
        sets => Err(ModelError::EntitySetCount {
            entity_type: entity_type.qualified_name().to_string(),
            count: sets.len(),
        }),
    }
}

/// Every interval boundary must name an existing peer that names it back
fn check_interval_pairs(parameters: &[Parameter]) -> Result<(), ModelError> {
    for parameter in parameters {
        let Some(peer_name) = parameter.peer_interval_boundary_name() else {
            continue;
        };
        let paired = parameters.iter().find(|p| p.name() == peer_name).is_some_and(|peer| {
            peer.peer_interval_boundary_name() == Some(parameter.name())
                && peer.is_lower_interval_boundary() != parameter.is_lower_interval_boundary()
        });
        if !paired {
            return Err(ModelError::UnpairedIntervalBoundary {
                parameter: parameter.name().to_string(),
                peer: peer_name.to_string(),
            });
        }
    }
    Ok(())
}

/// Value help sources for properties of an entity type
///
/// Found through referential constraints whose dependent end is the entity
/// type and which have exactly one dependent property. Returns pairs of
/// dependent property name and value help.
fn value_helps(
    entity_type: &EntityType,
    associations: &Associations<'_>,
    entity_types: &BTreeMap<String, Arc<EntityType>>,
    entity_sets: &BTreeMap<String, Arc<EntitySet>>,
) -> Vec<(String, ValueHelp)> {
    let mut found = Vec::new();
    for (_, association) in associations.iter() {
        let Some(constraint) = &association.referential_constraint else {
            continue;
        };
        let is_dependent = association
            .end_for_role(&constraint.dependent.role)
            .is_some_and(|end| entity_type.matches_type_name(&end.type_name));
        if !is_dependent {
            continue;
        }
        let [dependent] = constraint.dependent.property_ref.as_slice() else {
            debug!(
                "Skipping referential constraint of '{}' with {} dependent properties",
                association.name,
                constraint.dependent.property_ref.len()
            );
            continue;
        };
        let Some(principal_end) = association.end_for_role(&constraint.principal.role) else {
            continue;
        };
        let Some(principal_key) = constraint.principal.property_ref.first() else {
            continue;
        };
        let Some(principal_type) = entity_types.values().find(|t| t.matches_type_name(&principal_end.type_name))
        else {
            warn!(
                "Value help entity type '{}' of association '{}' not found",
                principal_end.type_name, association.name
            );
            continue;
        };
        let Ok(principal_set) = unique_entity_set(principal_type, entity_sets) else {
            warn!(
                "Value help entity type '{}' has no unique entity set, skipped",
                principal_type.qualified_name()
            );
            continue;
        };
        found.push((
            dependent.name.clone(),
            ValueHelp::new(principal_type.clone(), principal_set, principal_key.name.clone()),
        ));
    }
    found
}

/// The parameter entity type associated with an aggregate type, with the
/// navigation property leading from it to the aggregate
fn find_parameterization_link(
    aggregate_type: &EntityType,
    parameter_types: &[(Arc<EntityType>, Arc<EntitySet>)],
    associations: &Associations<'_>,
) -> Result<Option<(String, String)>, ModelError> {
    let mut linked: Vec<(&Arc<EntityType>, String)> = Vec::new();
    for (namespace, association) in associations.iter() {
        if !association.end.iter().any(|e| aggregate_type.matches_type_name(&e.type_name)) {
            continue;
        }
        let parameter_type = association.end.iter().find_map(|end| {
            parameter_types
                .iter()
                .map(|(t, _)| t)
                .find(|t| t.matches_type_name(&end.type_name))
        });
        if let Some(parameter_type) = parameter_type {
            if !linked.iter().any(|(t, _)| t.qualified_name() == parameter_type.qualified_name()) {
                linked.push((parameter_type, format!("{}.{}", namespace, association.name)));
            }
        }
    }

    let (parameter_type, association) = match linked.as_slice() {
        [] => return Ok(None),
        [single] => single,
        _ => {
            return Err(ModelError::MultipleParameterizations {
                entity_type: aggregate_type.qualified_name().to_string(),
                parameterizations: linked.iter().map(|(t, _)| t.qualified_name().to_string()).collect(),
            })
        }
    };

    let bare_name = association.rsplit('.').next().unwrap_or(association);
    let navigation_property = parameter_type
        .type_description()
        .navigation_property
        .iter()
        .find(|n| n.relationship == *association || n.relationship == bare_name)
        .ok_or_else(|| ModelError::MissingNavigationProperty {
            parameterization: parameter_type.qualified_name().to_string(),
            association: association.clone(),
        })?;

    Ok(Some((
        parameter_type.qualified_name().to_string(),
        navigation_property.name.clone(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAP: &str = "http://www.sap.com/Protocols/SAPData";

    fn document(body: &str) -> ServiceMetadata {
        let json = format!(r#"{{"dataServices": {{"schema": [{}]}}}}"#, body.replace("$SAP", SAP));
        serde_json::from_str(&json).unwrap()
    }

    fn sales_schema() -> String {
        r#"{
            "namespace": "NS",
            "entityType": [
                {
                    "name": "SalesType",
                    "key": {"propertyRef": [{"name": "ID"}]},
                    "extensions": [{"namespace": "$SAP", "name": "semantics", "value": "aggregate"}],
                    "property": [
                        {"name": "ID", "type": "Edm.String"},
                        {"name": "Region", "type": "Edm.String",
                         "extensions": [{"namespace": "$SAP", "name": "aggregation-role", "value": "dimension"}]},
                        {"name": "RegionName", "type": "Edm.String"},
                        {"name": "Revenue", "type": "Edm.Decimal",
                         "extensions": [{"namespace": "$SAP", "name": "aggregation-role", "value": "measure"}]}
                    ]
                },
                {
                    "name": "SalesParametersType",
                    "key": {"propertyRef": [{"name": "P_Year"}]},
                    "extensions": [{"namespace": "$SAP", "name": "semantics", "value": "parameters"}],
                    "property": [
                        {"name": "P_Year", "type": "Edm.String",
                         "extensions": [{"namespace": "$SAP", "name": "parameter", "value": "mandatory"}]}
                    ],
                    "navigationProperty": [
                        {"name": "Results", "relationship": "NS.SalesParams_Sales", "fromRole": "P", "toRole": "R"}
                    ]
                },
                {
                    "name": "YearType",
                    "key": {"propertyRef": [{"name": "Year"}]},
                    "property": [{"name": "Year", "type": "Edm.String"}]
                }
            ],
            "entityContainer": [{
                "name": "Entities",
                "isDefaultEntityContainer": "true",
                "entitySet": [
                    {"name": "Sales", "entityType": "NS.SalesType"},
                    {"name": "SalesParameters", "entityType": "NS.SalesParametersType"},
                    {"name": "Years", "entityType": "NS.YearType"}
                ]
            }],
            "association": [
                {"name": "SalesParams_Sales", "end": [
                    {"type": "NS.SalesParametersType", "multiplicity": "*", "role": "P"},
                    {"type": "NS.SalesType", "multiplicity": "*", "role": "R"}
                ]},
                {"name": "Year_Param", "end": [
                    {"type": "NS.YearType", "multiplicity": "1", "role": "Y"},
                    {"type": "NS.SalesParametersType", "multiplicity": "*", "role": "P"}
                ], "referentialConstraint": {
                    "principal": {"role": "Y", "propertyRef": [{"name": "Year"}]},
                    "dependent": {"role": "P", "propertyRef": [{"name": "P_Year"}]}
                }}
            ]
        }"#
        .to_string()
    }

    #[test]
    fn test_build_parameterized_result() {
        let model = Model::new(document(&sales_schema()), Workarounds::none()).unwrap();
        assert_eq!(model.query_result_names(), vec!["Entities.Sales"]);
        assert_eq!(model.default_entity_container_name(), Some("Entities"));

        let result = model.find_query_result_by_name("Sales").unwrap();
        assert_eq!(result.dimension_names(), vec!["Region"]);
        assert_eq!(result.measure_names(), vec!["Revenue"]);

        let parameterization = result.parameterization().unwrap();
        assert_eq!(parameterization.name(), "Entities.SalesParameters");
        assert_eq!(parameterization.navigation_property_to("Entities.Sales"), Some("Results"));

        let year = parameterization.find_parameter_by_name("P_Year").unwrap();
        let value_help = year.value_help().unwrap();
        assert_eq!(value_help.entity_set().name(), "Years");
        assert_eq!(value_help.key_property(), "Year");
    }

    #[test]
    fn test_identify_text_by_name() {
        let workarounds = Workarounds::none().activate(crate::config::Workaround::IdentifyTextPropertiesByName);
        let schema = sales_schema().replace(
            r#"{"name": "RegionName", "type": "Edm.String"}"#,
            r#"{"name": "RegionName", "type": "Edm.String",
                "extensions": [{"namespace": "$SAP", "name": "aggregation-role", "value": "dimension"}]}"#,
        );
        let plain = Model::new(document(&schema), Workarounds::none()).unwrap();
        assert_eq!(
            plain.find_query_result_by_name("Sales").unwrap().dimension_names(),
            vec!["Region", "RegionName"]
        );

        let model = Model::new(document(&schema), workarounds).unwrap();
        let result = model.find_query_result_by_name("Sales").unwrap();
        assert_eq!(result.dimension_names(), vec!["Region"]);
        let region = result.find_dimension_by_name("Region").unwrap();
        assert_eq!(region.text_property().map(|p| p.name.as_str()), Some("RegionName"));
    }

    #[test]
    fn test_no_schema() {
        let err = Model::new(ServiceMetadata::default(), Workarounds::none()).unwrap_err();
        assert!(matches!(err, ModelError::NoSchema));
    }

    #[test]
    fn test_aggregate_without_entity_set() {
        let schema = sales_schema().replace(r#"{"name": "Sales", "entityType": "NS.SalesType"},"#, "");
        let err = Model::new(document(&schema), Workarounds::none()).unwrap_err();
        assert!(matches!(err, ModelError::EntitySetCount { count: 0, .. }));
    }

    #[test]
    fn test_missing_navigation_property() {
        let schema = sales_schema().replace("NS.SalesParams_Sales", "NS.Unrelated");
        let err = Model::new(document(&schema), Workarounds::none()).unwrap_err();
        assert!(matches!(err, ModelError::MissingNavigationProperty { .. }));
    }

    #[test]
    fn test_invalid_parameter_annotation() {
        let schema = sales_schema().replace(r#""value": "mandatory""#, r#""value": "sometimes""#);
        let err = Model::new(document(&schema), Workarounds::none()).unwrap_err();
        assert!(matches!(err, ModelError::InvalidAnnotationValue { .. }));
    }

    #[test]
    fn test_lookup_fallbacks() {
        let model = Model::new(document(&sales_schema()), Workarounds::none()).unwrap();
        assert!(model.find_entity_type_by_name("YearType").is_some());
        assert!(model.find_entity_type_by_name("NS.YearType").is_some());
        assert!(model.find_entity_set_by_name("Years").is_some());
        assert!(model.find_parameterization_by_name("SalesParameters").is_some());
        assert!(model.find_query_result_by_name("Unknown").is_none());
    }
}
