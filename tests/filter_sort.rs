//! Integration tests for filter and sort expressions on a query result

mod common;

use common::{cost_center_model, costs};
use odata_analytics::{ExpressionError, FilterExpression, FilterOperator, SortExpression, SortOrder};

#[test]
fn test_filter_groups_and_literals() {
    let model = cost_center_model();
    let entity_type = costs(&model).entity_type();

    let mut filter = FilterExpression::new(entity_type);
    filter
        .add_set_condition("CostCenter", &["100-1000", "100-2000"])
        .unwrap()
        .add_condition("FiscalYear", FilterOperator::Bt, "2023", Some("2024"))
        .unwrap()
        .add_condition("ControllingArea", FilterOperator::Eq, "US01", None)
        .unwrap()
        .add_condition("PostingDate", FilterOperator::Lt, "2024-07-01T00:00:00", None)
        .unwrap();

    assert_eq!(
        filter.render(),
        "(ControllingArea eq 'US01') \
         and (CostCenter eq '100-1000' or CostCenter eq '100-2000') \
         and (FiscalYear ge 2023 and FiscalYear le 2024) \
         and (PostingDate lt datetime'2024-07-01T00:00:00')"
    );
    assert_eq!(
        filter.referenced_properties(),
        vec!["CostCenter", "FiscalYear", "ControllingArea", "PostingDate"]
    );
    assert!(filter.check_validity().is_ok());
}

#[test]
fn test_required_filter_missing() {
    let model = cost_center_model();
    let mut filter = FilterExpression::new(costs(&model).entity_type());
    filter.add_condition("CostCenter", FilterOperator::Eq, "100-1000", None).unwrap();

    match filter.check_validity() {
        Err(ExpressionError::MissingRequiredFilter(property)) => assert_eq!(property, "ControllingArea"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_filter_rejects_properties() {
    let model = cost_center_model();
    let mut filter = FilterExpression::new(costs(&model).entity_type());

    assert!(matches!(
        filter.add_condition("ActualCosts", FilterOperator::Gt, "0", None),
        Err(ExpressionError::NotFilterable(_))
    ));
    assert!(matches!(
        filter.add_set_condition("Nope", &["x"]),
        Err(ExpressionError::UnknownProperty { .. })
    ));
    assert!(matches!(
        filter.add_set_condition("CostCenter", &["100", "'200'"]),
        Err(ExpressionError::InvalidLiteral(_))
    ));
    assert!(filter.conditions().is_empty());
}

#[test]
fn test_sort_expression() {
    let model = cost_center_model();
    let mut sort = SortExpression::new(costs(&model).entity_type());

    sort.add_sorter("ActualCosts", SortOrder::Descending)
        .unwrap()
        .add_sorter("CostCenter", SortOrder::Ascending)
        .unwrap();
    assert_eq!(sort.render(), "ActualCosts desc, CostCenter asc");

    assert!(matches!(
        sort.add_sorter("ID", SortOrder::Ascending),
        Err(ExpressionError::NotSortable(_))
    ));
    assert!(matches!(
        sort.add_sorter("CostCenter", SortOrder::Descending),
        Err(ExpressionError::DuplicateSorter(_))
    ));

    sort.remove_sorter("ActualCosts");
    assert_eq!(sort.render(), "CostCenter asc");
}
