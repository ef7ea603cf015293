//! Shared test utilities for integration tests

#![allow(dead_code)]

use odata_analytics::{parser, Model, ParameterizationRequest, QueryResult, ServiceMetadata, Workarounds};
use tracing_subscriber::EnvFilter;

/// Name of the parameterized query result in `cost_center.yaml`
pub const COSTS: &str = "ZCCA_SRV_Entities.ActualPlannedCosts";

/// Install a test-writer subscriber once; `RUST_LOG` selects the level
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Load a test fixture from the tests/test_data directory
pub fn load_fixture(name: &str) -> ServiceMetadata {
    init_tracing();
    let path = format!("tests/test_data/{}", name);
    parser::parse_file(&path).unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// Build the model of a fixture
pub fn load_model(name: &str, workarounds: Workarounds) -> Model {
    Model::new(load_fixture(name), workarounds)
        .unwrap_or_else(|e| panic!("Failed to build model for {}: {}", name, e))
}

/// The cost center model without workarounds
pub fn cost_center_model() -> Model {
    load_model("cost_center.yaml", Workarounds::none())
}

pub fn costs(model: &Model) -> &QueryResult {
    model.find_query_result_by_name(COSTS).expect("ActualPlannedCosts should exist")
}

/// Parameter values for ActualPlannedCosts: area US01, periods 001 to 003,
/// no cost center
pub fn costs_parameters(query_result: &QueryResult) -> ParameterizationRequest<'_> {
    let parameterization = query_result.parameterization().expect("ActualPlannedCosts is parameterized");
    let mut request = ParameterizationRequest::new(parameterization);
    request
        .set_parameter_value("P_ControllingArea", Some("US01"), None)
        .unwrap()
        .set_parameter_value("P_FromPeriod", Some("001"), Some("003"))
        .unwrap()
        .set_parameter_value("P_CostCenter", Some(""), None)
        .unwrap();
    request
}

pub const COSTS_ENTRY: &str = "/ActualPlannedCostsParameters(P_ControllingArea='US01',P_FromPeriod='001',P_ToPeriod='003',P_CostCenter='')";
