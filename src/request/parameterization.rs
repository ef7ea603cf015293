//! Parameter value assignment and the parameterization entry URI

use tracing::debug;
use crate::helper::{render_literal, EdmType};
use crate::model::{IntervalBoundary, Parameterization};
use super::error::RequestError;
use super::options::entity_set_path;

/// Values assigned to the parameters of a parameterization
#[derive(Debug, Clone)]
pub struct ParameterizationRequest<'a> {
    parameterization: &'a Parameterization,
    values: Vec<(String, String)>,
}

impl<'a> ParameterizationRequest<'a> {
    pub fn new(parameterization: &'a Parameterization) -> Self {
        Self {
            parameterization,
            values: Vec::new(),
        }
    }

    pub fn parameterization(&self) -> &'a Parameterization {
        self.parameterization
    }

    /// Assign (or with `None`, clear) the value of a parameter
    ///
    /// `to_value` is only accepted on the lower boundary of an interval and
    /// sets the upper boundary. Setting a lower boundary without `to_value`
    /// sets the upper boundary to the same value; clearing it clears both.
    pub fn set_parameter_value(
        &mut self,
        name: &str,
        value: Option<&str>,
        to_value: Option<&str>,
    ) -> Result<&mut Self, RequestError> {
        let parameterization = self.parameterization;
        let parameter = parameterization
            .find_parameter_by_name(name)
            .ok_or_else(|| RequestError::UnknownParameter(name.to_string()))?;

        let upper = match parameter.interval_boundary() {
            Some(IntervalBoundary::Lower { upper }) => Some(upper.as_str()),
            Some(IntervalBoundary::Upper { .. }) if to_value.is_some() => {
                return Err(RequestError::UpperBoundaryValue(name.to_string()))
            }
            None if to_value.is_some() => return Err(RequestError::NotAnIntervalParameter(name.to_string())),
            _ => None,
        };

        match value {
            Some(value) => {
                self.assign(name, value);
                if let Some(upper) = upper {
                    self.assign(upper, to_value.unwrap_or(value));
                }
            }
            None => {
                self.values.retain(|(n, _)| n != name && Some(n.as_str()) != upper);
            }
        }
        Ok(self)
    }

    /// The value assigned to a parameter
    pub fn parameter_value(&self, name: &str) -> Option<&str> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    /// Assigned values, in order of first assignment
    pub fn parameter_values(&self) -> &[(String, String)] {
        &self.values
    }

    pub fn uri_to_parameter_entity_set(&self, service_root: &str) -> String {
        entity_set_path(service_root, self.parameterization.entity_set().name())
    }

    /// Path to the single parameter entity addressed by all assigned values
    ///
    /// Every declared parameter needs a value, optional ones included.
    pub fn uri_to_parameterization_entry(&self, service_root: &str) -> Result<String, RequestError> {
        for parameter in self.parameterization.parameters() {
            if self.parameter_value(parameter.name()).is_none() {
                return Err(RequestError::MissingParameterValue(parameter.name().to_string()));
            }
        }

        let mut predicates = Vec::with_capacity(self.values.len());
        for (name, value) in &self.values {
            let edm_type = self
                .parameterization
                .entity_type()
                .property_type(name)
                .unwrap_or(EdmType::String);
            predicates.push(format!("{}={}", name, render_literal(value, &edm_type)?));
        }
        debug!("Key predicate for '{}': {}", self.parameterization.name(), predicates.join(","));

        Ok(format!(
            "{}({})",
            self.uri_to_parameter_entity_set(service_root),
            predicates.join(",")
        ))
    }

    fn assign(&mut self, name: &str, value: &str) {
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.values.push((name.to_string(), value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Workarounds;
    use crate::metadata::ServiceMetadata;
    use crate::model::Model;

    const DOCUMENT: &str = r#"{"dataServices": {"schema": [{
        "namespace": "NS",
        "entityType": [{
            "name": "ParamsType",
            "extensions": [{"namespace": "http://www.sap.com/Protocols/SAPData", "name": "semantics", "value": "parameters"}],
            "property": [
                {"name": "P_Area", "type": "Edm.String"},
                {"name": "P_From", "type": "Edm.Int32", "extensions": [
                    {"namespace": "http://www.sap.com/Protocols/SAPData", "name": "upper-boundary", "value": "P_To"}]},
                {"name": "P_To", "type": "Edm.Int32", "extensions": [
                    {"namespace": "http://www.sap.com/Protocols/SAPData", "name": "lower-boundary", "value": "P_From"}]},
                {"name": "P_Opt", "type": "Edm.String", "extensions": [
                    {"namespace": "http://www.sap.com/Protocols/SAPData", "name": "parameter", "value": "optional"}]}
            ]
        }],
        "entityContainer": [{"name": "C", "entitySet": [{"name": "Params", "entityType": "NS.ParamsType"}]}]
    }]}}"#;

    fn model() -> Model {
        let metadata: ServiceMetadata = serde_json::from_str(DOCUMENT).unwrap();
        Model::new(metadata, Workarounds::none()).unwrap()
    }

    #[test]
    fn test_lower_boundary_defaults_upper() {
        let model = model();
        let parameterization = model.find_parameterization_by_name("Params").unwrap();
        let mut request = ParameterizationRequest::new(parameterization);
        request.set_parameter_value("P_From", Some("1"), None).unwrap();
        assert_eq!(request.parameter_value("P_To"), Some("1"));
        request.set_parameter_value("P_From", Some("1"), Some("3")).unwrap();
        assert_eq!(request.parameter_value("P_To"), Some("3"));
        request.set_parameter_value("P_From", None, None).unwrap();
        assert_eq!(request.parameter_value("P_From"), None);
        assert_eq!(request.parameter_value("P_To"), None);
    }

    #[test]
    fn test_rejected_to_value() {
        let model = model();
        let parameterization = model.find_parameterization_by_name("Params").unwrap();
        let mut request = ParameterizationRequest::new(parameterization);
        assert!(matches!(
            request.set_parameter_value("P_Area", Some("A"), Some("B")),
            Err(RequestError::NotAnIntervalParameter(_))
        ));
        assert!(matches!(
            request.set_parameter_value("P_To", Some("1"), Some("2")),
            Err(RequestError::UpperBoundaryValue(_))
        ));
        assert!(matches!(
            request.set_parameter_value("P_Unknown", Some("1"), None),
            Err(RequestError::UnknownParameter(_))
        ));
    }

    #[test]
    fn test_entry_uri() {
        let model = model();
        let parameterization = model.find_parameterization_by_name("Params").unwrap();
        let mut request = ParameterizationRequest::new(parameterization);
        request
            .set_parameter_value("P_Area", Some("US01"), None)
            .unwrap()
            .set_parameter_value("P_From", Some("1"), Some("3"))
            .unwrap();
        assert!(matches!(
            request.uri_to_parameterization_entry(""),
            Err(RequestError::MissingParameterValue(p)) if p == "P_Opt"
        ));
        request.set_parameter_value("P_Opt", Some(""), None).unwrap();
        assert_eq!(
            request.uri_to_parameterization_entry("").unwrap(),
            "/Params(P_Area='US01',P_From=1,P_To=3,P_Opt='')"
        );
        assert_eq!(request.uri_to_parameter_entity_set("/srv"), "/srv/Params");
    }
}
