//! odata_analytics - Analytical query model and URI builder for OData services
//!
//! This library provides:
//! - Service metadata types with vendor aggregation annotations
//! - Metadata parsing from JSON/YAML, plus supplemental annotation merge
//! - An analytical model (query results, parameterizations, dimensions, measures, hierarchies)
//! - Filter and sort expressions
//! - Request builders composing resource paths and system query options
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `metadata/` - the pre-parsed service metadata document and its annotations
//! - `model/` - analytical concepts (Model, QueryResult, Parameterization, Dimension, Measure)
//! - `expression/` - filter and sort conditions (FilterExpression, SortExpression)
//!
//! **Verb modules** (transformations):
//! - `parser/` - JSON/YAML → ServiceMetadata
//! - `request/` - Model + selections → URI
//!
//! # Example
//!
//! ```ignore
//! use odata_analytics::{parser, Model, QueryResultRequest, ParameterizationRequest, Workarounds};
//!
//! let metadata = parser::parse_file("metadata.json")?;
//! let model = Model::new(metadata, Workarounds::none())?;
//! let result = model.find_query_result_by_name("ActualPlannedCosts").unwrap();
//!
//! let mut parameters = ParameterizationRequest::new(result.parameterization().unwrap());
//! parameters.set_parameter_value("P_ControllingArea", Some("US01"), None)?;
//!
//! let mut request = QueryResultRequest::new(result);
//! request.set_parameterization_request(parameters)?;
//! request.set_aggregation_level(Some(&["CostCenter"]))?;
//! request.set_measures(None)?;
//! let uri = request.uri_to_query_result_entries("/sap/opu/odata/sap/ZCCA_SRV")?;
//! ```

pub mod config;
pub mod helper;
pub mod metadata;
pub mod model;
pub mod expression;
pub mod request;
pub mod parser;
pub mod error;

// Re-export commonly used types
pub use config::{Workaround, Workarounds};
pub use helper::{render_literal, tokenize_name_to_label, EdmType, InvalidLiteral};
pub use metadata::ServiceMetadata;
pub use model::{
    Dimension, DimensionAttribute, EntitySet, EntityType, Measure, Model, ModelError, Parameter, Parameterization,
    QueryResult, RecursiveHierarchy, ValueHelp,
};
pub use expression::{ExpressionError, FilterExpression, FilterOperator, SortExpression, SortOrder};
pub use request::{
    DimensionMemberSetRequest, PageWindow, ParameterValueSetRequest, ParameterizationRequest, QueryOption,
    QueryResultRequest, RequestError,
};
pub use error::ParseError;
