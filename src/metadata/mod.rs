//! Service metadata (nouns)
//!
//! The raw, already-parsed metadata document and the vendor annotations it
//! carries.

mod annotation;
mod merge;
mod types;

pub use annotation::{
    annotations, label, semantics, text, AggregationRole, Annotation, EntitySemantics, SAP_NAMESPACE,
};
pub use types::{
    Association, AssociationEnd, AssociationSet, AssociationSetEnd, ConstraintRole, DataServices,
    EntityContainer, EntitySet, EntityType, Extension, Key, NavigationProperty, Property, PropertyRef,
    ReferentialConstraint, Schema, ServiceMetadata,
};
