//! Model construction errors

use thiserror::Error;

/// Configuration and consistency errors found while building a [`Model`](super::Model)
#[derive(Debug, Error)]
pub enum ModelError {
    /// The metadata document has no loaded schema
    #[error("Service metadata has no loaded schema")]
    NoSchema,
    /// An annotated entity type does not map to exactly one entity set
    #[error("Entity type '{entity_type}' must have exactly one entity set, found {count}")]
    EntitySetCount { entity_type: String, count: usize },
    /// More than one parameter entity type is associated with a result type
    #[error(
        "Aggregate entity type '{entity_type}' is associated with multiple parameter entity types: [{}]",
        parameterizations.join(", ")
    )]
    MultipleParameterizations {
        entity_type: String,
        parameterizations: Vec<String>,
    },
    /// No navigation property leads from the parameters to the result
    #[error("Parameter entity type '{parameterization}' has no navigation property for association '{association}'")]
    MissingNavigationProperty {
        parameterization: String,
        association: String,
    },
    /// An annotation carries a value outside its domain
    #[error("Invalid value '{value}' for annotation '{annotation}' on property '{property}'")]
    InvalidAnnotationValue {
        annotation: String,
        property: String,
        value: String,
    },
    /// An interval boundary parameter without a matching peer
    #[error("Interval boundary parameter '{parameter}' has no matching peer '{peer}'")]
    UnpairedIntervalBoundary { parameter: String, peer: String },
}
