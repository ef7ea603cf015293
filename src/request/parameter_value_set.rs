//! Value help requests for parameters

use crate::expression::{FilterExpression, SortExpression};
use crate::model::{Parameter, ValueHelp};
use super::error::RequestError;
use super::options::{compose_uri, entity_set_path, push_unique, QueryOption};

/// Request for the valid values of a parameter
#[derive(Debug, Clone)]
pub struct ParameterValueSetRequest<'a> {
    parameter: &'a Parameter,
    value_help: &'a ValueHelp,
    include_text: bool,
    filter: FilterExpression<'a>,
    sort: SortExpression<'a>,
}

impl<'a> ParameterValueSetRequest<'a> {
    /// Fails for parameters without value help
    pub fn new(parameter: &'a Parameter) -> Result<Self, RequestError> {
        let value_help = parameter
            .value_help()
            .ok_or_else(|| RequestError::NoValueHelp(parameter.name().to_string()))?;
        Ok(Self {
            parameter,
            value_help,
            include_text: false,
            filter: FilterExpression::new(value_help.entity_type()),
            sort: SortExpression::new(value_help.entity_type()),
        })
    }

    pub fn parameter(&self) -> &'a Parameter {
        self.parameter
    }

    pub fn include_parameter_text(&mut self, include_text: bool) -> &mut Self {
        self.include_text = include_text;
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

    pub fn query_option_value(&self, option: QueryOption) -> Option<String> {
        let value = match option {
            QueryOption::Select => {
                let mut select = Vec::new();
                push_unique(&mut select, self.value_help.key_property());
                if self.include_text {
                    if let Some(text) = self.value_help.text_property() {
                        push_unique(&mut select, text);
                    }
                }
                select.join(",")
            }
            QueryOption::Filter => self.filter.render(),
            QueryOption::OrderBy => self.sort.render(),
            QueryOption::Skip | QueryOption::Top | QueryOption::InlineCount => return None,
        };
        Some(value).filter(|v| !v.is_empty())
    }

    pub fn uri_to_parameter_value_set_entity_set(&self, service_root: &str) -> String {
        entity_set_path(service_root, self.value_help.entity_set().name())
    }

    pub fn uri_to_parameter_value_set_entries(&self, service_root: &str) -> String {
        compose_uri(
            &self.uri_to_parameter_value_set_entity_set(service_root),
            QueryOption::ALL.map(|option| (option, self.query_option_value(option))),
        )
    }
}
