//! Parameters of a parameterized query result

use crate::config::Workarounds;
use crate::metadata::{self, Annotation};
use super::dimension::linked_text_property;
use super::entity::EntityType;
use super::error::ModelError;
use super::resolve_label;
use super::value_help::ValueHelp;

/// Position of a parameter in an interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalBoundary {
    /// Lower boundary, linked to the named upper boundary parameter
    Lower { upper: String },
    /// Upper boundary, linked to the named lower boundary parameter
    Upper { lower: String },
}

/// An input value required (or accepted) before a query result can be read
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    property: metadata::Property,
    text_property: Option<metadata::Property>,
    label: String,
    optional: bool,
    interval: Option<IntervalBoundary>,
    value_help: Option<ValueHelp>,
}

impl Parameter {
    pub(crate) fn new(
        property: &metadata::Property,
        entity_type: &EntityType,
        workarounds: &Workarounds,
    ) -> Result<Self, ModelError> {
        let mut optional = false;
        let mut interval = None;
        for annotation in metadata::annotations(&property.extensions) {
            match annotation {
                Annotation::Parameter("mandatory") => optional = false,
                Annotation::Parameter("optional") => optional = true,
                Annotation::Parameter(other) => {
                    return Err(ModelError::InvalidAnnotationValue {
                        annotation: "parameter".to_string(),
                        property: property.name.clone(),
                        value: other.to_string(),
                    })
                }
                Annotation::UpperBoundary(upper) => {
                    interval = Some(IntervalBoundary::Lower { upper: upper.to_string() })
                }
                Annotation::LowerBoundary(lower) => {
                    interval = Some(IntervalBoundary::Upper { lower: lower.to_string() })
                }
                _ => {}
            }
        }
        Ok(Self {
            name: property.name.clone(),
            property: property.clone(),
            text_property: linked_text_property(property, entity_type),
            label: resolve_label(metadata::label(&property.extensions), &property.name, workarounds),
            optional,
            interval,
            value_help: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property(&self) -> &metadata::Property {
        &self.property
    }

    pub fn text_property(&self) -> Option<&metadata::Property> {
        self.text_property.as_ref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn interval_boundary(&self) -> Option<&IntervalBoundary> {
        self.interval.as_ref()
    }

    pub fn is_interval_boundary(&self) -> bool {
        self.interval.is_some()
    }

    pub fn is_lower_interval_boundary(&self) -> bool {
        matches!(self.interval, Some(IntervalBoundary::Lower { .. }))
    }

    /// Name of the other boundary of the interval
    pub fn peer_interval_boundary_name(&self) -> Option<&str> {
        match &self.interval {
            Some(IntervalBoundary::Lower { upper }) => Some(upper),
            Some(IntervalBoundary::Upper { lower }) => Some(lower),
            None => None,
        }
    }

    pub fn value_help(&self) -> Option<&ValueHelp> {
        self.value_help.as_ref()
    }

    pub fn is_value_set_available(&self) -> bool {
        self.value_help.is_some()
    }

    pub(crate) fn set_value_help(&mut self, value_help: ValueHelp) {
        self.value_help = Some(value_help);
    }
}
