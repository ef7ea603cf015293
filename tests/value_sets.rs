//! Integration tests for parameter value sets and dimension member sets

mod common;

use common::{cost_center_model, costs, costs_parameters, COSTS_ENTRY};
use odata_analytics::{
    DimensionMemberSetRequest, FilterOperator, ParameterValueSetRequest, QueryOption, RequestError, SortOrder,
};

#[test]
fn test_parameter_value_set() {
    let model = cost_center_model();
    let parameterization = costs(&model).parameterization().unwrap();
    let area = parameterization.find_parameter_by_name("P_ControllingArea").unwrap();

    let mut request = ParameterValueSetRequest::new(area).unwrap();
    assert_eq!(request.uri_to_parameter_value_set_entries(""), "/ControllingAreas?$select=ControllingArea");

    request.include_parameter_text(true);
    request
        .sort_expression_mut()
        .add_sorter("ControllingArea", SortOrder::Descending)
        .unwrap();
    request
        .filter_expression_mut()
        .add_condition("ControllingAreaName", FilterOperator::StartsWith, "North", None)
        .unwrap();

    assert_eq!(
        request.uri_to_parameter_value_set_entries("/srv"),
        "/srv/ControllingAreas?$select=ControllingArea,ControllingAreaName\
         &$filter=(startswith(ControllingAreaName,'North'))&$orderby=ControllingArea desc"
    );
    assert_eq!(request.query_option_value(QueryOption::Top), None);
}

#[test]
fn test_parameter_without_value_help() {
    let model = cost_center_model();
    let parameterization = costs(&model).parameterization().unwrap();
    let cost_center = parameterization.find_parameter_by_name("P_CostCenter").unwrap();

    assert!(matches!(
        ParameterValueSetRequest::new(cost_center),
        Err(RequestError::NoValueHelp(_))
    ));
}

#[test]
fn test_member_set_of_parameterized_result() {
    let model = cost_center_model();
    let result = costs(&model);

    let mut request = DimensionMemberSetRequest::new(result, "CostCenter", false).unwrap();
    request
        .include_dimension_text_attributes(true, &["CostCenterType"])
        .unwrap();
    assert!(matches!(
        request.uri_to_dimension_member_entries(""),
        Err(RequestError::MissingParameterizationRequest(_))
    ));

    request.set_parameterization_request(costs_parameters(result)).unwrap();
    request.set_request_options(true);
    assert_eq!(
        request.uri_to_dimension_member_entries("").unwrap(),
        format!(
            "{}/Results?$select=CostCenter,CostCenterText,CostCenterType&$inlinecount=allpages",
            COSTS_ENTRY
        )
    );
}

#[test]
fn test_member_set_from_master_data() {
    let model = cost_center_model();
    let result = costs(&model);

    let mut request = DimensionMemberSetRequest::new(result, "CostCenter", true).unwrap();
    assert!(request.uses_master_data());
    request
        .include_dimension_text_attributes(true, &["CostCenterType"])
        .unwrap()
        .set_result_page_boundaries(1, Some(50))
        .unwrap();
    request
        .filter_expression_mut()
        .add_condition("CostCenterName", FilterOperator::Contains, "Sales", None)
        .unwrap();

    assert_eq!(
        request.uri_to_dimension_member_entries("").unwrap(),
        "/CostCenters?$select=CostCenter,CostCenterName,CostCenterType\
         &$filter=(substringof('Sales',CostCenterName))&$top=50"
    );
}

#[test]
fn test_member_set_errors() {
    let model = cost_center_model();
    let result = costs(&model);

    assert!(matches!(
        DimensionMemberSetRequest::new(result, "ControllingArea", true),
        Err(RequestError::NoMasterData(_))
    ));
    assert!(matches!(
        DimensionMemberSetRequest::new(result, "Currency", false),
        Err(RequestError::UnknownDimension(_))
    ));

    let mut request = DimensionMemberSetRequest::new(result, "ControllingArea", false).unwrap();
    assert!(matches!(
        request.include_dimension_text_attributes(true, &["CostCenterType"]),
        Err(RequestError::UnknownAttribute { .. })
    ));
}

#[test]
fn test_master_data_rejects_result_only_attribute() {
    let model = cost_center_model();
    let result = costs(&model);

    let mut request = DimensionMemberSetRequest::new(result, "CostCenter", true).unwrap();
    match request.include_dimension_text_attributes(true, &["CostCenterManager"]) {
        Err(RequestError::UnknownAttribute { attribute, .. }) => assert_eq!(attribute, "CostCenterManager"),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
    assert_eq!(
        request.uri_to_dimension_member_entries("").unwrap(),
        "/CostCenters?$select=CostCenter"
    );

    let mut from_result = DimensionMemberSetRequest::new(result, "CostCenter", false).unwrap();
    from_result
        .include_dimension_text_attributes(false, &["CostCenterManager"])
        .unwrap();
    assert_eq!(
        from_result.query_option_value(QueryOption::Select).as_deref(),
        Some("CostCenter,CostCenterManager")
    );
}
