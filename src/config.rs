//! Model construction options
//!
//! Providers of analytical services do not always annotate their metadata
//! completely. The workarounds below fill common gaps and are switched on
//! explicitly when a [`Model`](crate::Model) is constructed.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// A single workaround, named the way service providers refer to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workaround {
    /// Derive labels from technical property names when no label is annotated
    CreateLabelsFromTechnicalNames,
    /// Link `<dimension>Name|Text|Desc|Description` as the dimension text
    /// when no text property is annotated
    IdentifyTextPropertiesByName,
}

impl fmt::Display for Workaround {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Workaround::CreateLabelsFromTechnicalNames => write!(f, "CreateLabelsFromTechnicalNames"),
            Workaround::IdentifyTextPropertiesByName => write!(f, "IdentifyTextPropertiesByName"),
        }
    }
}

/// Error when parsing a workaround name
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown workaround '{input}'. Valid options: CreateLabelsFromTechnicalNames, IdentifyTextPropertiesByName")]
pub struct ParseWorkaroundError {
    pub input: String,
}

impl FromStr for Workaround {
    type Err = ParseWorkaroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CreateLabelsFromTechnicalNames" => Ok(Workaround::CreateLabelsFromTechnicalNames),
            "IdentifyTextPropertiesByName" => Ok(Workaround::IdentifyTextPropertiesByName),
            _ => Err(ParseWorkaroundError { input: s.to_string() }),
        }
    }
}

/// The set of activated workarounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Workarounds {
    pub create_labels_from_technical_names: bool,
    pub identify_text_properties_by_name: bool,
}

impl Workarounds {
    /// No workaround active
    pub fn none() -> Self {
        Self::default()
    }

    /// Every known workaround active
    pub fn all() -> Self {
        Self {
            create_labels_from_technical_names: true,
            identify_text_properties_by_name: true,
        }
    }

    pub fn is_active(&self, workaround: Workaround) -> bool {
        match workaround {
            Workaround::CreateLabelsFromTechnicalNames => self.create_labels_from_technical_names,
            Workaround::IdentifyTextPropertiesByName => self.identify_text_properties_by_name,
        }
    }

    pub fn activate(mut self, workaround: Workaround) -> Self {
        match workaround {
            Workaround::CreateLabelsFromTechnicalNames => self.create_labels_from_technical_names = true,
            Workaround::IdentifyTextPropertiesByName => self.identify_text_properties_by_name = true,
        }
        self
    }
}

impl FromIterator<Workaround> for Workarounds {
    fn from_iter<I: IntoIterator<Item = Workaround>>(iter: I) -> Self {
        iter.into_iter().fold(Workarounds::none(), Workarounds::activate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workaround_names() {
        let parsed: Result<Workarounds, _> = ["CreateLabelsFromTechnicalNames", "IdentifyTextPropertiesByName"]
            .iter()
            .map(|s| s.parse::<Workaround>())
            .collect();
        assert_eq!(parsed.unwrap(), Workarounds::all());
    }

    #[test]
    fn test_unknown_workaround() {
        let err = "GuessEverything".parse::<Workaround>().unwrap_err();
        assert!(err.to_string().contains("GuessEverything"));
    }

    #[test]
    fn test_deserialize_partial() {
        let w: Workarounds = serde_yaml::from_str("identifyTextPropertiesByName: true").unwrap();
        assert!(w.is_active(Workaround::IdentifyTextPropertiesByName));
        assert!(!w.is_active(Workaround::CreateLabelsFromTechnicalNames));
    }
}
