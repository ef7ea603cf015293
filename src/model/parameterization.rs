//! Parameterizations
//!
//! The parameter entity type of a query result. One entity of it, addressed
//! by the full set of parameter values, navigates to the parameterized result.

use std::sync::Arc;
use super::entity::{EntitySet, EntityType};
use super::parameter::Parameter;

/// Navigation from a parameterization to one of its query results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterizationTarget {
    /// Qualified name of the query result
    pub query_result: String,
    /// Navigation property leading from the parameter entity to the result
    pub navigation_property: String,
}

/// The parameters of a query result
#[derive(Debug, Clone)]
pub struct Parameterization {
    entity_type: Arc<EntityType>,
    entity_set: Arc<EntitySet>,
    parameters: Vec<Parameter>,
    targets: Vec<ParameterizationTarget>,
}

impl Parameterization {
    pub(crate) fn new(entity_type: Arc<EntityType>, entity_set: Arc<EntitySet>, parameters: Vec<Parameter>) -> Self {
        Self {
            entity_type,
            entity_set,
            parameters,
            targets: Vec::new(),
        }
    }

    /// Qualified name of the parameter entity set
    pub fn name(&self) -> &str {
        self.entity_set.qualified_name()
    }

    pub fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    pub fn entity_set(&self) -> &EntitySet {
        &self.entity_set
    }

    /// Parameters in declaration order
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name()).collect()
    }

    pub fn find_parameter_by_name(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    pub fn targets(&self) -> &[ParameterizationTarget] {
        &self.targets
    }

    /// Name of the (first) query result this parameterization leads to
    pub fn target_query_result_name(&self) -> Option<&str> {
        self.targets.first().map(|t| t.query_result.as_str())
    }

    /// Navigation property leading to the (first) target query result
    pub fn navigation_property(&self) -> Option<&str> {
        self.targets.first().map(|t| t.navigation_property.as_str())
    }

    /// Navigation property leading to the given query result
    pub fn navigation_property_to(&self, query_result: &str) -> Option<&str> {
        self.targets
            .iter()
            .find(|t| t.query_result == query_result)
            .map(|t| t.navigation_property.as_str())
    }

    pub(crate) fn add_target(&mut self, target: ParameterizationTarget) {
        self.targets.push(target);
    }
}
