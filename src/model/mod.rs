//! Analytical model types (nouns)
//!
//! These types represent the query results, parameterizations and their
//! building blocks, derived from annotated service metadata.

mod build;
mod dimension;
mod entity;
mod error;
mod hierarchy;
mod measure;
mod parameter;
mod parameterization;
mod query_result;
mod value_help;

pub use build::Model;
pub use dimension::{Dimension, DimensionAttribute};
pub use entity::{EntitySet, EntityType};
pub use error::ModelError;
pub use hierarchy::RecursiveHierarchy;
pub use measure::Measure;
pub use parameter::{IntervalBoundary, Parameter};
pub use parameterization::{Parameterization, ParameterizationTarget};
pub use query_result::QueryResult;
pub use value_help::ValueHelp;

use crate::config::Workarounds;
use crate::helper::tokenize_name_to_label;

/// Label of an annotated property
///
/// The explicit `label` annotation wins; otherwise the technical name is
/// tokenized when that workaround is active.
pub(crate) fn resolve_label(explicit: Option<&str>, name: &str, workarounds: &Workarounds) -> String {
    match explicit {
        Some(label) => label.to_string(),
        None if workarounds.create_labels_from_technical_names => tokenize_name_to_label(name),
        None => String::new(),
    }
}
