//! Metadata parser (verb module)
//!
//! Reads service metadata documents into [`ServiceMetadata`]. JSON is the
//! shape delivered by OData clients; YAML is accepted for hand-written
//! fixtures.

use std::path::Path;
use crate::error::ParseError;
use crate::metadata::ServiceMetadata;

/// Parse metadata from a file; `.yaml`/`.yml` files are read as YAML, all others as JSON
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ServiceMetadata, ParseError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| ParseError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => parse_yaml(&contents),
        _ => parse_str(&contents),
    }
}

/// Parse metadata from a JSON string
pub fn parse_str(json: &str) -> Result<ServiceMetadata, ParseError> {
    serde_json::from_str(json).map_err(ParseError::from)
}

/// Parse metadata from a YAML string
pub fn parse_yaml(yaml: &str) -> Result<ServiceMetadata, ParseError> {
    serde_yaml::from_str(yaml).map_err(ParseError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json() {
        let metadata = parse_str(
            r#"{ "dataServices": { "schema": [ { "namespace": "NS", "entityType": [ { "name": "T" } ] } ] } }"#,
        )
        .unwrap();
        assert_eq!(metadata.schemas().len(), 1);
        assert_eq!(metadata.schemas()[0].entity_type[0].name, "T");
    }

    #[test]
    fn test_parse_yaml() {
        let metadata = parse_yaml(
            r#"
dataServices:
  schema:
    - namespace: NS
      entityContainer:
        - name: Entities
          isDefaultEntityContainer: "true"
          entitySet:
            - name: Sales
              entityType: NS.SalesType
"#,
        )
        .unwrap();
        let container = &metadata.schemas()[0].entity_container[0];
        assert!(container.is_default());
        assert_eq!(container.entity_set[0].entity_type, "NS.SalesType");
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_str("not: [valid");
        assert!(matches!(result, Err(ParseError::Json(_))));
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_file("does/not/exist.json");
        assert!(matches!(result, Err(ParseError::Io { .. })));
    }
}
