//! Query result requests
//!
//! Selects an aggregation level, measures and hierarchies of a query result
//! and composes the URI reading the matching entries.

use crate::expression::{FilterExpression, SortExpression};
use crate::metadata;
use crate::model::QueryResult;
use super::error::RequestError;
use super::options::{compose_uri, entity_set_path, push_unique, PageWindow, QueryOption};
use super::parameterization::ParameterizationRequest;

/// Properties read for a dimension of the aggregation level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionSelection {
    pub key: bool,
    pub text: bool,
    pub attributes: Vec<String>,
}

impl Default for DimensionSelection {
    fn default() -> Self {
        Self {
            key: true,
            text: false,
            attributes: Vec::new(),
        }
    }
}

/// Properties read for a selected measure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureSelection {
    pub value: bool,
    pub text: bool,
    pub unit: bool,
}

impl Default for MeasureSelection {
    fn default() -> Self {
        Self {
            value: true,
            text: false,
            unit: false,
        }
    }
}

/// Properties read for a recursive hierarchy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HierarchySelection {
    pub external_key: bool,
    pub text: bool,
}

/// Request for the entries of a query result
#[derive(Debug, Clone)]
pub struct QueryResultRequest<'a> {
    query_result: &'a QueryResult,
    parameterization_request: Option<ParameterizationRequest<'a>>,
    aggregation_level: Vec<(String, DimensionSelection)>,
    measures: Vec<(String, MeasureSelection)>,
    hierarchies: Vec<(String, HierarchySelection)>,
    filter: FilterExpression<'a>,
    sort: SortExpression<'a>,
    include_entity_key: bool,
    include_count: bool,
    return_no_entities: bool,
    page: PageWindow,
}

impl<'a> QueryResultRequest<'a> {
    pub fn new(query_result: &'a QueryResult) -> Self {
        Self {
            query_result,
            parameterization_request: None,
            aggregation_level: Vec::new(),
            measures: Vec::new(),
            hierarchies: Vec::new(),
            filter: FilterExpression::new(query_result.entity_type()),
            sort: SortExpression::new(query_result.entity_type()),
            include_entity_key: false,
            include_count: false,
            return_no_entities: false,
            page: PageWindow::default(),
        }
    }

    pub fn query_result(&self) -> &'a QueryResult {
        self.query_result
    }

    /// Provide the parameter values of a parameterized query result
    pub fn set_parameterization_request(&mut self, request: ParameterizationRequest<'a>) -> Result<&mut Self, RequestError> {
        check_parameterization(self.query_result, &request)?;
        self.parameterization_request = Some(request);
        Ok(self)
    }

    pub fn parameterization_request(&self) -> Option<&ParameterizationRequest<'a>> {
        self.parameterization_request.as_ref()
    }

    /// Replace the aggregation level; `None` selects every dimension
    pub fn set_aggregation_level(&mut self, dimensions: Option<&[&str]>) -> Result<&mut Self, RequestError> {
        let all = self.query_result.dimension_names();
        let names = dimensions.unwrap_or(&all);
        for name in names {
            self.dimension(name)?;
        }
        self.aggregation_level.clear();
        self.add_to_aggregation_level(names)
    }

    /// Add dimensions to the aggregation level, keeping existing selections
    pub fn add_to_aggregation_level(&mut self, dimensions: &[&str]) -> Result<&mut Self, RequestError> {
        for name in dimensions {
            self.dimension(name)?;
        }
        for name in dimensions {
            if !self.aggregation_level.iter().any(|(n, _)| n == name) {
                self.aggregation_level.push((name.to_string(), DimensionSelection::default()));
            }
        }
        Ok(self)
    }

    pub fn remove_from_aggregation_level(&mut self, dimensions: &[&str]) -> Result<&mut Self, RequestError> {
        for name in dimensions {
            self.dimension(name)?;
        }
        self.aggregation_level.retain(|(n, _)| !dimensions.contains(&n.as_str()));
        Ok(self)
    }

    /// Names of the dimensions in the aggregation level, in order of addition
    pub fn aggregation_level(&self) -> Vec<&str> {
        self.aggregation_level.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn dimension_selection(&self, dimension: &str) -> Option<&DimensionSelection> {
        self.aggregation_level.iter().find(|(n, _)| n == dimension).map(|(_, s)| s)
    }

    /// Choose the properties read for one dimension, or with `None` for all
    /// dimensions of the aggregation level
    pub fn include_dimension_key_text_attributes(
        &mut self,
        dimension: Option<&str>,
        key: bool,
        text: bool,
        attributes: &[&str],
    ) -> Result<&mut Self, RequestError> {
        if let Some(name) = dimension {
            if !self.aggregation_level.iter().any(|(n, _)| n == name) {
                self.dimension(name)?;
                return Err(RequestError::NotInAggregationLevel(name.to_string()));
            }
        }
        let query_result = self.query_result;
        for (name, _) in &self.aggregation_level {
            if dimension.is_some_and(|d| d != name.as_str()) {
                continue;
            }
            let Some(found) = query_result.find_dimension_by_name(name) else {
                continue;
            };
            if let Some(missing) = attributes.iter().find(|a| found.find_attribute_by_name(a).is_none()) {
                return Err(RequestError::UnknownAttribute {
                    dimension: name.clone(),
                    attribute: missing.to_string(),
                });
            }
        }
        for (name, selection) in self.aggregation_level.iter_mut() {
            if dimension.is_some_and(|d| d != name.as_str()) {
                continue;
            }
            *selection = DimensionSelection {
                key,
                text,
                attributes: attributes.iter().map(|a| a.to_string()).collect(),
            };
        }
        Ok(self)
    }

    /// Replace the selected measures; `None` selects every measure
    pub fn set_measures(&mut self, measures: Option<&[&str]>) -> Result<&mut Self, RequestError> {
        let all = self.query_result.measure_names();
        let names = measures.unwrap_or(&all);
        for name in names {
            if self.query_result.find_measure_by_name(name).is_none() {
                return Err(RequestError::UnknownMeasure(name.to_string()));
            }
        }
        self.measures = names
            .iter()
            .map(|n| (n.to_string(), MeasureSelection::default()))
            .collect();
        Ok(self)
    }

    pub fn measure_names(&self) -> Vec<&str> {
        self.measures.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Choose the properties read for one selected measure, or with `None`
    /// for all selected measures
    pub fn include_measure_raw_formatted_value_unit(
        &mut self,
        measure: Option<&str>,
        value: bool,
        text: bool,
        unit: bool,
    ) -> Result<&mut Self, RequestError> {
        if let Some(name) = measure {
            if !self.measures.iter().any(|(n, _)| n == name) {
                return Err(RequestError::UnknownMeasure(name.to_string()));
            }
        }
        for (name, selection) in self.measures.iter_mut() {
            if measure.is_none_or(|m| m == name.as_str()) {
                *selection = MeasureSelection { value, text, unit };
            }
        }
        Ok(self)
    }

    /// Read the recursive hierarchy of a dimension
    pub fn add_recursive_hierarchy(
        &mut self,
        dimension: &str,
        include_external_key: bool,
        include_text: bool,
    ) -> Result<&mut Self, RequestError> {
        if self.query_result.entity_type().find_hierarchy(dimension).is_none() {
            return Err(RequestError::NoHierarchy(dimension.to_string()));
        }
        let selection = HierarchySelection {
            external_key: include_external_key,
            text: include_text,
        };
        match self.hierarchies.iter_mut().find(|(n, _)| n == dimension) {
            Some((_, existing)) => *existing = selection,
            None => self.hierarchies.push((dimension.to_string(), selection)),
        }
        Ok(self)
    }

    pub fn remove_recursive_hierarchy(&mut self, dimension: &str) -> &mut Self {
        self.hierarchies.retain(|(n, _)| n != dimension);
        self
    }

    pub fn set_filter_expression(&mut self, filter: FilterExpression<'a>) -> &mut Self {
        self.filter = filter;
        self
    }

    pub fn filter_expression(&self) -> &FilterExpression<'a> {
        &self.filter
    }

    pub fn filter_expression_mut(&mut self) -> &mut FilterExpression<'a> {
        &mut self.filter
    }

    pub fn set_sort_expression(&mut self, sort: SortExpression<'a>) -> &mut Self {
        self.sort = sort;
        self
    }

    pub fn sort_expression(&self) -> &SortExpression<'a> {
        &self.sort
    }

    pub fn sort_expression_mut(&mut self) -> &mut SortExpression<'a> {
        &mut self.sort
    }

    /// Change request options; `None` leaves an option unchanged
    pub fn set_request_options(
        &mut self,
        include_entity_key: Option<bool>,
        include_count: Option<bool>,
        return_no_entities: Option<bool>,
    ) -> &mut Self {
        if let Some(v) = include_entity_key {
            self.include_entity_key = v;
        }
        if let Some(v) = include_count {
            self.include_count = v;
        }
        if let Some(v) = return_no_entities {
            self.return_no_entities = v;
        }
        self
    }

    /// Read entries `start` to `end` (1-based, inclusive; `None` for all remaining)
    pub fn set_result_page_boundaries(&mut self, start: usize, end: Option<usize>) -> Result<&mut Self, RequestError> {
        self.page = PageWindow::new(start, end)?;
        Ok(self)
    }

    pub fn result_page_boundaries(&self) -> PageWindow {
        self.page
    }

    /// Value of a system query option, `None` when the option is not needed
    pub fn query_option_value(&self, option: QueryOption) -> Option<String> {
        let value = match option {
            QueryOption::Select => Some(self.select_properties().join(",")),
            QueryOption::Filter => Some(self.filter.render()),
            QueryOption::OrderBy => Some(self.sort.render()),
            QueryOption::Skip => self.page.skip().map(|s| s.to_string()),
            QueryOption::Top if self.return_no_entities => Some("0".to_string()),
            QueryOption::Top => self.page.top().map(|t| t.to_string()),
            QueryOption::InlineCount => self.include_count.then(|| "allpages".to_string()),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Path of the query result entity set, through the parameterization entry
    /// when the result is parameterized
    pub fn uri_to_query_result_entity_set(&self, service_root: &str) -> Result<String, RequestError> {
        query_result_path(self.query_result, self.parameterization_request.as_ref(), service_root)
    }

    /// Path and query options reading the selected entries
    pub fn uri_to_query_result_entries(&self, service_root: &str) -> Result<String, RequestError> {
        let path = self.uri_to_query_result_entity_set(service_root)?;
        Ok(compose_uri(
            &path,
            QueryOption::ALL.map(|option| (option, self.query_option_value(option))),
        ))
    }

    /// Properties for `$select`, de-duplicated in selection order
    fn select_properties(&self) -> Vec<String> {
        let mut select = Vec::new();
        let entity_type = self.query_result.entity_type();

        for (name, selection) in &self.aggregation_level {
            let Some(dimension) = self.query_result.find_dimension_by_name(name) else {
                continue;
            };
            if selection.key {
                push_unique(&mut select, &dimension.key_property().name);
            }
            if selection.text {
                if let Some(text) = dimension.text_property() {
                    push_unique(&mut select, &text.name);
                }
            }
            for attribute in &selection.attributes {
                if let Some(attribute) = dimension.find_attribute_by_name(attribute) {
                    push_unique(&mut select, &attribute.key_property().name);
                }
            }
        }

        for (name, selection) in &self.hierarchies {
            let Some(hierarchy) = entity_type.find_hierarchy(name) else {
                continue;
            };
            push_unique(&mut select, hierarchy.node_id_property());
            if selection.external_key && hierarchy.has_external_key() {
                push_unique(&mut select, hierarchy.dimension_property());
            }
            if selection.text {
                let text = entity_type
                    .find_property(hierarchy.node_id_property())
                    .and_then(|p| metadata::text(&p.extensions));
                if let Some(text) = text {
                    push_unique(&mut select, text);
                }
            }
            for property in [
                hierarchy.parent_node_id_property(),
                hierarchy.level_property(),
                hierarchy.drill_state_property(),
            ]
            .into_iter()
            .flatten()
            {
                push_unique(&mut select, property);
            }
        }

        for (name, selection) in &self.measures {
            let Some(measure) = self.query_result.find_measure_by_name(name) else {
                continue;
            };
            if selection.value {
                push_unique(&mut select, &measure.raw_value_property().name);
            }
            if selection.text {
                if let Some(formatted) = measure.formatted_value_property() {
                    push_unique(&mut select, &formatted.name);
                }
            }
            if selection.unit {
                if let Some(unit) = measure.unit_property() {
                    push_unique(&mut select, &unit.name);
                }
            }
        }

        if self.include_entity_key {
            for key in entity_type.key_property_names() {
                push_unique(&mut select, key);
            }
        }
        select
    }

    fn dimension(&self, name: &str) -> Result<(), RequestError> {
        self.query_result
            .find_dimension_by_name(name)
            .map(|_| ())
            .ok_or_else(|| RequestError::UnknownDimension(name.to_string()))
    }
}

/// The parameterization request must address the result's parameterization
pub(super) fn check_parameterization(
    query_result: &QueryResult,
    request: &ParameterizationRequest<'_>,
) -> Result<(), RequestError> {
    let actual = request.parameterization().name();
    match query_result.parameterization() {
        Some(expected) if expected.name() == actual => Ok(()),
        expected => Err(RequestError::ParameterizationMismatch {
            expected: expected.map(|p| p.name().to_string()).unwrap_or_default(),
            actual: actual.to_string(),
        }),
    }
}

/// Path of a query result's entity set
pub(super) fn query_result_path(
    query_result: &QueryResult,
    parameterization_request: Option<&ParameterizationRequest<'_>>,
    service_root: &str,
) -> Result<String, RequestError> {
    let Some(parameterization) = query_result.parameterization() else {
        return Ok(entity_set_path(service_root, query_result.entity_set().name()));
    };
    let request = parameterization_request
        .ok_or_else(|| RequestError::MissingParameterizationRequest(query_result.name().to_string()))?;
    let navigation_property = parameterization
        .navigation_property_to(query_result.name())
        .ok_or_else(|| RequestError::NoNavigationProperty {
            parameterization: parameterization.name().to_string(),
            query_result: query_result.name().to_string(),
        })?;
    Ok(format!(
        "{}/{}",
        request.uri_to_parameterization_entry(service_root)?,
        navigation_property
    ))
}
