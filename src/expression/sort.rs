//! Sort expressions

use std::fmt;
use std::str::FromStr;
use crate::model::EntityType;
use super::error::ExpressionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            _ => Err(ExpressionError::UnknownSortOrder(s.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "asc"),
            SortOrder::Descending => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sorter {
    pub property: String,
    pub order: SortOrder,
}

/// Ordered sort conditions, at most one per property
#[derive(Debug, Clone)]
pub struct SortExpression<'a> {
    entity_type: &'a EntityType,
    sorters: Vec<Sorter>,
}

impl<'a> SortExpression<'a> {
    pub fn new(entity_type: &'a EntityType) -> Self {
        Self {
            entity_type,
            sorters: Vec::new(),
        }
    }

    pub fn add_sorter(&mut self, property: &str, order: SortOrder) -> Result<&mut Self, ExpressionError> {
        if self.entity_type.find_property(property).is_none() {
            return Err(ExpressionError::UnknownProperty {
                property: property.to_string(),
                entity_type: self.entity_type.qualified_name().to_string(),
            });
        }
        if !self.entity_type.is_sortable(property) {
            return Err(ExpressionError::NotSortable(property.to_string()));
        }
        if self.sorters.iter().any(|s| s.property == property) {
            return Err(ExpressionError::DuplicateSorter(property.to_string()));
        }
        self.sorters.push(Sorter {
            property: property.to_string(),
            order,
        });
        Ok(self)
    }

    /// Remove the sorter of a property, if there is one
    pub fn remove_sorter(&mut self, property: &str) -> &mut Self {
        self.sorters.retain(|s| s.property != property);
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.sorters.clear();
        self
    }

    pub fn sorters(&self) -> &[Sorter] {
        &self.sorters
    }

    pub fn is_empty(&self) -> bool {
        self.sorters.is_empty()
    }

    /// The `$orderby` option value; empty without sorters
    pub fn render(&self) -> String {
        self.sorters
            .iter()
            .map(|s| format!("{} {}", s.property, s.order))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{self, Extension, Property, SAP_NAMESPACE};

    fn entity_type() -> EntityType {
        EntityType::new(
            "NS",
            &metadata::EntityType {
                name: "SalesType".into(),
                property: vec![
                    Property { name: "Region".into(), type_name: "Edm.String".into(), ..Default::default() },
                    Property { name: "Year".into(), type_name: "Edm.Int32".into(), ..Default::default() },
                    Property {
                        name: "Note".into(),
                        type_name: "Edm.String".into(),
                        extensions: vec![Extension::new(SAP_NAMESPACE, "sortable", "false")],
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_duplicate_sorter() {
        let entity_type = entity_type();
        let mut sort = SortExpression::new(&entity_type);
        sort.add_sorter("Region", SortOrder::Ascending).unwrap();
        assert!(matches!(
            sort.add_sorter("Region", SortOrder::Descending),
            Err(ExpressionError::DuplicateSorter(_))
        ));
        sort.remove_sorter("Region");
        sort.add_sorter("Region", SortOrder::Descending).unwrap();
        assert_eq!(sort.render(), "Region desc");
    }

    #[test]
    fn test_insertion_order() {
        let entity_type = entity_type();
        let mut sort = SortExpression::new(&entity_type);
        sort.add_sorter("Year", SortOrder::Descending)
            .unwrap()
            .add_sorter("Region", SortOrder::Ascending)
            .unwrap();
        assert_eq!(sort.render(), "Year desc, Region asc");
        sort.remove_sorter("Unknown");
        assert_eq!(sort.sorters().len(), 2);
        sort.clear();
        assert_eq!(sort.render(), "");
    }

    #[test]
    fn test_rejected_sorters() {
        let entity_type = entity_type();
        let mut sort = SortExpression::new(&entity_type);
        assert!(matches!(
            sort.add_sorter("Note", SortOrder::Ascending),
            Err(ExpressionError::NotSortable(_))
        ));
        assert!(matches!(
            sort.add_sorter("Missing", SortOrder::Ascending),
            Err(ExpressionError::UnknownProperty { .. })
        ));
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Descending);
    }
}
