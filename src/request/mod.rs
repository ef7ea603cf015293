//! Request builders (verb module)
//!
//! Turn a model plus user selections into resource paths and system query
//! options. URIs are returned unescaped, relative to the given service root.

mod dimension_member_set;
mod error;
mod options;
mod parameter_value_set;
mod parameterization;
mod query_result;

pub use dimension_member_set::DimensionMemberSetRequest;
pub use error::RequestError;
pub use options::{PageWindow, QueryOption};
pub use parameter_value_set::ParameterValueSetRequest;
pub use parameterization::ParameterizationRequest;
pub use query_result::{DimensionSelection, HierarchySelection, MeasureSelection, QueryResultRequest};
