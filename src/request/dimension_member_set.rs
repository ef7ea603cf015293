//! Member list requests for dimensions
//!
//! Members are read either from the query result itself or, when the
//! dimension has master data, from the master data entity set.

use crate::expression::{FilterExpression, SortExpression};
use crate::model::{Dimension, EntityType, QueryResult, ValueHelp};
use super::error::RequestError;
use super::options::{compose_uri, entity_set_path, push_unique, PageWindow, QueryOption};
use super::parameterization::ParameterizationRequest;
use super::query_result::{check_parameterization, query_result_path};

/// Request for the members of one dimension
#[derive(Debug, Clone)]
pub struct DimensionMemberSetRequest<'a> {
    query_result: &'a QueryResult,
    dimension: &'a Dimension,
    master_data: Option<&'a ValueHelp>,
    parameterization_request: Option<ParameterizationRequest<'a>>,
    include_text: bool,
    attributes: Vec<String>,
    filter: FilterExpression<'a>,
    sort: SortExpression<'a>,
    include_count: bool,
    page: PageWindow,
}

impl<'a> DimensionMemberSetRequest<'a> {
    /// With `use_master_data`, members are read from the dimension's master data
    pub fn new(query_result: &'a QueryResult, dimension: &str, use_master_data: bool) -> Result<Self, RequestError> {
        let found = query_result
            .find_dimension_by_name(dimension)
            .ok_or_else(|| RequestError::UnknownDimension(dimension.to_string()))?;
        let master_data = if use_master_data {
            let master_data = found
                .master_data()
                .ok_or_else(|| RequestError::NoMasterData(dimension.to_string()))?;
            Some(master_data)
        } else {
            None
        };
        let entity_type: &'a EntityType = match master_data {
            Some(master_data) => master_data.entity_type(),
            None => query_result.entity_type(),
        };
        Ok(Self {
            query_result,
            dimension: found,
            master_data,
            parameterization_request: None,
            include_text: false,
            attributes: Vec::new(),
            filter: FilterExpression::new(entity_type),
            sort: SortExpression::new(entity_type),
            include_count: false,
            page: PageWindow::default(),
        })
    }

    pub fn dimension(&self) -> &'a Dimension {
        self.dimension
    }

    pub fn uses_master_data(&self) -> bool {
        self.master_data.is_some()
    }

    pub fn set_parameterization_request(&mut self, request: ParameterizationRequest<'a>) -> Result<&mut Self, RequestError> {
        check_parameterization(self.query_result, &request)?;
        self.parameterization_request = Some(request);
        Ok(self)
    }

    pub fn include_dimension_text_attributes(&mut self, text: bool, attributes: &[&str]) -> Result<&mut Self, RequestError> {
        let master_data_type = self.master_data.map(|m| m.entity_type());
        if let Some(missing) = attributes.iter().find(|a| {
            self.dimension.find_attribute_by_name(a).is_none()
                || master_data_type.is_some_and(|t| t.find_property(a).is_none())
        }) {
            return Err(RequestError::UnknownAttribute {
                dimension: self.dimension.name().to_string(),
                attribute: missing.to_string(),
            });
        }
        self.include_text = text;
        self.attributes = attributes.iter().map(|a| a.to_string()).collect();
        Ok(self)
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

    pub fn set_request_options(&mut self, include_count: bool) -> &mut Self {
        self.include_count = include_count;
        self
    }

    pub fn set_result_page_boundaries(&mut self, start: usize, end: Option<usize>) -> Result<&mut Self, RequestError> {
        self.page = PageWindow::new(start, end)?;
        Ok(self)
    }

    pub fn query_option_value(&self, option: QueryOption) -> Option<String> {
        let value = match option {
            QueryOption::Select => self.select_properties().join(","),
            QueryOption::Filter => self.filter.render(),
            QueryOption::OrderBy => self.sort.render(),
            QueryOption::Skip => return self.page.skip().map(|s| s.to_string()),
            QueryOption::Top => return self.page.top().map(|t| t.to_string()),
            QueryOption::InlineCount => return self.include_count.then(|| "allpages".to_string()),
        };
        Some(value).filter(|v| !v.is_empty())
    }

    pub fn uri_to_dimension_member_entity_set(&self, service_root: &str) -> Result<String, RequestError> {
        match self.master_data {
            Some(master_data) => Ok(entity_set_path(service_root, master_data.entity_set().name())),
            None => query_result_path(self.query_result, self.parameterization_request.as_ref(), service_root),
        }
    }

    pub fn uri_to_dimension_member_entries(&self, service_root: &str) -> Result<String, RequestError> {
        let path = self.uri_to_dimension_member_entity_set(service_root)?;
        Ok(compose_uri(
            &path,
            QueryOption::ALL.map(|option| (option, self.query_option_value(option))),
        ))
    }

    fn select_properties(&self) -> Vec<String> {
        let mut select = Vec::new();
        match self.master_data {
            Some(master_data) => {
                push_unique(&mut select, master_data.key_property());
                if self.include_text {
                    if let Some(text) = master_data.text_property() {
                        push_unique(&mut select, text);
                    }
                }
                for attribute in &self.attributes {
                    push_unique(&mut select, attribute);
                }
            }
            None => {
                push_unique(&mut select, &self.dimension.key_property().name);
                if self.include_text {
                    if let Some(text) = self.dimension.text_property() {
                        push_unique(&mut select, &text.name);
                    }
                }
                for attribute in &self.attributes {
                    if let Some(attribute) = self.dimension.find_attribute_by_name(attribute) {
                        push_unique(&mut select, &attribute.key_property().name);
                    }
                }
            }
        }
        select
    }
}
