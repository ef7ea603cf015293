//! Filter and sort expressions (nouns)
//!
//! User-driven condition lists bound to one entity type, rendered as the
//! `$filter` and `$orderby` option values.

mod error;
mod filter;
mod sort;

pub use error::ExpressionError;
pub use filter::{FilterCondition, FilterExpression, FilterOperator};
pub use sort::{SortExpression, SortOrder, Sorter};
