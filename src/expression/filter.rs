//! Filter expressions
//!
//! Conditions are grouped by property. Conditions on the same property are
//! OR-ed, groups are AND-ed, and groups are rendered in ascending property
//! name order.

use std::fmt;
use std::str::FromStr;
use crate::helper::{render_literal, EdmType};
use crate::model::EntityType;
use super::error::ExpressionError;

/// Comparison applied by a filter condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Between two values, both inclusive
    Bt,
    Contains,
    StartsWith,
    EndsWith,
}

impl FromStr for FilterOperator {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EQ" => Ok(FilterOperator::Eq),
            "NE" => Ok(FilterOperator::Ne),
            "LT" => Ok(FilterOperator::Lt),
            "LE" => Ok(FilterOperator::Le),
            "GT" => Ok(FilterOperator::Gt),
            "GE" => Ok(FilterOperator::Ge),
            "BT" => Ok(FilterOperator::Bt),
            "CONTAINS" => Ok(FilterOperator::Contains),
            "STARTSWITH" => Ok(FilterOperator::StartsWith),
            "ENDSWITH" => Ok(FilterOperator::EndsWith),
            _ => Err(ExpressionError::UnknownOperator(s.to_string())),
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Ne => "ne",
            FilterOperator::Lt => "lt",
            FilterOperator::Le => "le",
            FilterOperator::Gt => "gt",
            FilterOperator::Ge => "ge",
            FilterOperator::Bt => "bt",
            FilterOperator::Contains => "substringof",
            FilterOperator::StartsWith => "startswith",
            FilterOperator::EndsWith => "endswith",
        };
        write!(f, "{}", s)
    }
}

/// A single condition on one property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    property: String,
    operator: FilterOperator,
    value: String,
    value2: Option<String>,
    literal: String,
    literal2: Option<String>,
}

impl FilterCondition {
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Upper value of a between condition
    pub fn value2(&self) -> Option<&str> {
        self.value2.as_deref()
    }

    fn render(&self) -> String {
        let p = &self.property;
        let v = &self.literal;
        match (self.operator, &self.literal2) {
            (FilterOperator::Bt, Some(v2)) => format!("{} ge {} and {} le {}", p, v, p, v2),
            (FilterOperator::Contains, _) => format!("substringof({},{})", v, p),
            (FilterOperator::StartsWith, _) => format!("startswith({},{})", p, v),
            (FilterOperator::EndsWith, _) => format!("endswith({},{})", p, v),
            (op, _) => format!("{} {} {}", p, op, v),
        }
    }
}

/// Conditions on the properties of one entity type
#[derive(Debug, Clone)]
pub struct FilterExpression<'a> {
    entity_type: &'a EntityType,
    conditions: Vec<FilterCondition>,
}

impl<'a> FilterExpression<'a> {
    pub fn new(entity_type: &'a EntityType) -> Self {
        Self {
            entity_type,
            conditions: Vec::new(),
        }
    }

    pub fn entity_type(&self) -> &'a EntityType {
        self.entity_type
    }

    /// Add a condition; `value2` is the upper value of [`FilterOperator::Bt`]
    pub fn add_condition(
        &mut self,
        property: &str,
        operator: FilterOperator,
        value: &str,
        value2: Option<&str>,
    ) -> Result<&mut Self, ExpressionError> {
        let edm_type = self.filterable_type(property)?;
        let value2 = match operator {
            FilterOperator::Bt => {
                Some(value2.ok_or_else(|| ExpressionError::MissingUpperValue(property.to_string()))?)
            }
            _ => None,
        };
        let literal2 = value2.map(|v| render_literal(v, &edm_type)).transpose()?;
        self.conditions.push(FilterCondition {
            property: property.to_string(),
            operator,
            value: value.to_string(),
            value2: value2.map(str::to_string),
            literal: render_literal(value, &edm_type)?,
            literal2,
        });
        Ok(self)
    }

    /// Add one equality condition per value
    pub fn add_set_condition<S: AsRef<str>>(&mut self, property: &str, values: &[S]) -> Result<&mut Self, ExpressionError> {
        let edm_type = self.filterable_type(property)?;
        let mut conditions = Vec::with_capacity(values.len());
        for value in values {
            let value = value.as_ref();
            conditions.push(FilterCondition {
                property: property.to_string(),
                operator: FilterOperator::Eq,
                value: value.to_string(),
                value2: None,
                literal: render_literal(value, &edm_type)?,
                literal2: None,
            });
        }
        self.conditions.extend(conditions);
        Ok(self)
    }

    /// Remove all conditions on a property
    pub fn remove_conditions(&mut self, property: &str) -> &mut Self {
        self.conditions.retain(|c| c.property != property);
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.conditions.clear();
        self
    }

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Properties with at least one condition, in order of first use
    pub fn referenced_properties(&self) -> Vec<&str> {
        let mut properties: Vec<&str> = Vec::new();
        for condition in &self.conditions {
            if !properties.contains(&condition.property.as_str()) {
                properties.push(&condition.property);
            }
        }
        properties
    }

    /// Check that every required-filter property has a condition
    pub fn check_validity(&self) -> Result<(), ExpressionError> {
        for required in self.entity_type.required_filter_property_names() {
            if !self.conditions.iter().any(|c| &c.property == required) {
                return Err(ExpressionError::MissingRequiredFilter(required.clone()));
            }
        }
        Ok(())
    }

    /// The `$filter` option value; empty without conditions
    pub fn render(&self) -> String {
        let mut sorted: Vec<&FilterCondition> = self.conditions.iter().collect();
        sorted.sort_by(|a, b| a.property.cmp(&b.property));

        let mut groups: Vec<String> = Vec::new();
        for group in sorted.chunk_by(|a, b| a.property == b.property) {
            let rendered = match group {
                [single] => format!("({})", single.render()),
                _ => {
                    let members: Vec<String> = group
                        .iter()
                        .map(|c| match c.operator {
                            FilterOperator::Bt => format!("({})", c.render()),
                            _ => c.render(),
                        })
                        .collect();
                    format!("({})", members.join(" or "))
                }
            };
            groups.push(rendered);
        }
        groups.join(" and ")
    }

    fn filterable_type(&self, property: &str) -> Result<EdmType, ExpressionError> {
        let edm_type = self
            .entity_type
            .property_type(property)
            .ok_or_else(|| ExpressionError::UnknownProperty {
                property: property.to_string(),
                entity_type: self.entity_type.qualified_name().to_string(),
            })?;
        if !self.entity_type.is_filterable(property) {
            return Err(ExpressionError::NotFilterable(property.to_string()));
        }
        Ok(edm_type)
    }
}
