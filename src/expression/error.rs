use thiserror::Error;
use crate::helper::InvalidLiteral;

/// Errors raised while building filter and sort expressions
#[derive(Debug, Error)]
pub enum ExpressionError {
    #[error("Property '{property}' not found in entity type '{entity_type}'")]
    UnknownProperty { property: String, entity_type: String },
    #[error("Property '{0}' is not filterable")]
    NotFilterable(String),
    #[error("Property '{0}' is not sortable")]
    NotSortable(String),
    #[error("Property '{0}' already has a sorter")]
    DuplicateSorter(String),
    #[error("Between condition on '{0}' requires an upper value")]
    MissingUpperValue(String),
    #[error("Required filter on property '{0}' is missing")]
    MissingRequiredFilter(String),
    #[error("Unknown operator '{0}'")]
    UnknownOperator(String),
    #[error("Unknown sort order '{0}'")]
    UnknownSortOrder(String),
    #[error(transparent)]
    InvalidLiteral(#[from] InvalidLiteral),
}
