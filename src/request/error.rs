use thiserror::Error;
use crate::expression::ExpressionError;
use crate::helper::InvalidLiteral;

/// Usage errors raised while composing requests
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Parameter '{0}' not found")]
    UnknownParameter(String),
    #[error("Parameter '{0}' is not an interval boundary and takes no upper value")]
    NotAnIntervalParameter(String),
    #[error("Upper value for interval '{0}' must be set through its lower boundary")]
    UpperBoundaryValue(String),
    #[error("No value assigned to parameter '{0}'")]
    MissingParameterValue(String),
    #[error("Query result '{0}' is parameterized but no parameterization request was given")]
    MissingParameterizationRequest(String),
    #[error("Parameterization request for '{actual}' does not match '{expected}'")]
    ParameterizationMismatch { expected: String, actual: String },
    #[error("Parameterization '{parameterization}' has no navigation property to '{query_result}'")]
    NoNavigationProperty {
        parameterization: String,
        query_result: String,
    },
    #[error("Invalid page boundaries: start {start}, end {end:?}")]
    InvalidPageBoundaries { start: usize, end: Option<usize> },
    #[error("Dimension '{0}' not found")]
    UnknownDimension(String),
    #[error("Dimension '{0}' is not part of the aggregation level")]
    NotInAggregationLevel(String),
    #[error("Attribute '{attribute}' not found in dimension '{dimension}'")]
    UnknownAttribute { dimension: String, attribute: String },
    #[error("Measure '{0}' not found")]
    UnknownMeasure(String),
    #[error("Dimension '{0}' has no recursive hierarchy")]
    NoHierarchy(String),
    #[error("Parameter '{0}' has no value help")]
    NoValueHelp(String),
    #[error("Dimension '{0}' has no master data")]
    NoMasterData(String),
    #[error(transparent)]
    Expression(#[from] ExpressionError),
    #[error(transparent)]
    InvalidLiteral(#[from] InvalidLiteral),
}
