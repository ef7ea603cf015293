//! Recognized vendor annotations
//!
//! Extensions are matched once, at parse time, into [`Annotation`]. Only
//! extensions in the [`SAP_NAMESPACE`] are interpreted; all others map to
//! [`Annotation::Other`].

use super::types::Extension;

/// Namespace of the analytical vendor annotations
pub const SAP_NAMESPACE: &str = "http://www.sap.com/Protocols/SAPData";

/// Semantics of an entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntitySemantics {
    /// Pre-aggregated analytical query result
    Aggregate,
    /// Input parameters of a query result
    Parameters,
}

/// Role of a property in aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationRole {
    Dimension,
    Measure,
    TotaledPropertiesList,
}

/// A vendor annotation, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation<'a> {
    /// `semantics`; unrecognized values are kept as `None`
    Semantics(Option<EntitySemantics>),
    AggregationRole(Option<AggregationRole>),
    /// `attribute-for`: the dimension this property is an attribute of
    AttributeFor(&'a str),
    Label(&'a str),
    /// `text`: the property holding the text for this one
    Text(&'a str),
    /// `unit`: the property holding the unit for this one
    Unit(&'a str),
    SuperOrdinate(&'a str),
    /// `parameter`, raw value (`mandatory` or `optional`)
    Parameter(&'a str),
    UpperBoundary(&'a str),
    LowerBoundary(&'a str),
    Filterable(bool),
    Sortable(bool),
    RequiredFilter(bool),
    HierarchyNodeFor(&'a str),
    HierarchyParentNodeFor(&'a str),
    HierarchyLevelFor(&'a str),
    HierarchyDrillStateFor(&'a str),
    Other,
}

impl<'a> Annotation<'a> {
    /// Interpret a single extension
    pub fn from_extension(extension: &'a Extension) -> Self {
        if extension.namespace != SAP_NAMESPACE {
            return Annotation::Other;
        }
        let value = extension.value.as_str();
        match extension.name.as_str() {
            "semantics" => Annotation::Semantics(match value {
                "aggregate" => Some(EntitySemantics::Aggregate),
                "parameters" => Some(EntitySemantics::Parameters),
                _ => None,
            }),
            "aggregation-role" => Annotation::AggregationRole(match value {
                "dimension" => Some(AggregationRole::Dimension),
                "measure" => Some(AggregationRole::Measure),
                "totaled-properties-list" => Some(AggregationRole::TotaledPropertiesList),
                _ => None,
            }),
            "attribute-for" => Annotation::AttributeFor(value),
            "label" => Annotation::Label(value),
            "text" => Annotation::Text(value),
            "unit" => Annotation::Unit(value),
            "super-ordinate" => Annotation::SuperOrdinate(value),
            "parameter" => Annotation::Parameter(value),
            "upper-boundary" => Annotation::UpperBoundary(value),
            "lower-boundary" => Annotation::LowerBoundary(value),
            "filterable" => Annotation::Filterable(value != "false"),
            "sortable" => Annotation::Sortable(value != "false"),
            "required-filter" => Annotation::RequiredFilter(value == "true"),
            "hierarchy-node-for" => Annotation::HierarchyNodeFor(value),
            // Some providers truncate annotation names to 20 characters
            "hierarchy-parent-node-for" | "hierarchy-parent-nod" => Annotation::HierarchyParentNodeFor(value),
            "hierarchy-level-for" => Annotation::HierarchyLevelFor(value),
            "hierarchy-drill-state-for" | "hierarchy-drill-stat" => Annotation::HierarchyDrillStateFor(value),
            _ => Annotation::Other,
        }
    }
}

/// Interpret every extension of an element
pub fn annotations(extensions: &[Extension]) -> impl Iterator<Item = Annotation<'_>> {
    extensions.iter().map(Annotation::from_extension)
}

/// The `label` annotation, if any
pub fn label(extensions: &[Extension]) -> Option<&str> {
    annotations(extensions).find_map(|a| match a {
        Annotation::Label(l) => Some(l),
        _ => None,
    })
}

/// The `text` annotation, if any
pub fn text(extensions: &[Extension]) -> Option<&str> {
    annotations(extensions).find_map(|a| match a {
        Annotation::Text(t) => Some(t),
        _ => None,
    })
}

/// The entity semantics, if annotated with a recognized value
pub fn semantics(extensions: &[Extension]) -> Option<EntitySemantics> {
    annotations(extensions).find_map(|a| match a {
        Annotation::Semantics(s) => s,
        _ => None,
    })
}
