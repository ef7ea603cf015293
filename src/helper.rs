//! Literal rendering and label helpers
//!
//! Key predicates and `$filter` values are written as OData literals whose
//! syntax depends on the declared primitive type of the property.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Primitive property types of the entity data model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdmType {
    String,
    DateTime,
    DateTimeOffset,
    Time,
    Guid,
    Boolean,
    Byte,
    SByte,
    Int16,
    Int32,
    Int64,
    Decimal,
    Double,
    Single,
    /// Any other type name, rendered as a raw literal
    Other(String),
}

impl fmt::Display for EdmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EdmType::String => "Edm.String",
            EdmType::DateTime => "Edm.DateTime",
            EdmType::DateTimeOffset => "Edm.DateTimeOffset",
            EdmType::Time => "Edm.Time",
            EdmType::Guid => "Edm.Guid",
            EdmType::Boolean => "Edm.Boolean",
            EdmType::Byte => "Edm.Byte",
            EdmType::SByte => "Edm.SByte",
            EdmType::Int16 => "Edm.Int16",
            EdmType::Int32 => "Edm.Int32",
            EdmType::Int64 => "Edm.Int64",
            EdmType::Decimal => "Edm.Decimal",
            EdmType::Double => "Edm.Double",
            EdmType::Single => "Edm.Single",
            EdmType::Other(name) => name,
        };
        write!(f, "{}", name)
    }
}

impl FromStr for EdmType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Edm.String" => EdmType::String,
            "Edm.DateTime" => EdmType::DateTime,
            "Edm.DateTimeOffset" => EdmType::DateTimeOffset,
            "Edm.Time" => EdmType::Time,
            "Edm.Guid" => EdmType::Guid,
            "Edm.Boolean" => EdmType::Boolean,
            "Edm.Byte" => EdmType::Byte,
            "Edm.SByte" => EdmType::SByte,
            "Edm.Int16" => EdmType::Int16,
            "Edm.Int32" => EdmType::Int32,
            "Edm.Int64" => EdmType::Int64,
            "Edm.Decimal" => EdmType::Decimal,
            "Edm.Double" => EdmType::Double,
            "Edm.Single" => EdmType::Single,
            other => EdmType::Other(other.to_string()),
        })
    }
}

impl EdmType {
    /// Parse a declared type name; unknown names become [`EdmType::Other`]
    pub fn parse(type_name: &str) -> Self {
        match type_name.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

/// A value that cannot be rendered as a literal
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Illegal property value '{value}': values must not start with a quote")]
pub struct InvalidLiteral {
    pub value: String,
}

/// Render a value as a typed OData literal
///
/// Strings are quoted (embedded quotes doubled), date/time and guid values get
/// their type prefix, everything else is emitted verbatim.
pub fn render_literal(value: &str, edm_type: &EdmType) -> Result<String, InvalidLiteral> {
    if value.starts_with('\'') {
        return Err(InvalidLiteral { value: value.to_string() });
    }
    let literal = match edm_type {
        EdmType::String => format!("'{}'", value.replace('\'', "''")),
        EdmType::DateTime => format!("datetime'{}'", value),
        EdmType::Guid => format!("guid'{}'", value),
        EdmType::Time => format!("time'{}'", value),
        EdmType::DateTimeOffset => format!("datetimeoffset'{}'", value),
        _ => value.to_string(),
    };
    Ok(literal)
}

static LEADING_PARAMETER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^P_(.*)").expect("valid regex"));
static LOWER_TO_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^A-Z0-9_]+)([A-Z0-9_])").expect("valid regex"));
static ACRONYM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z0-9_]{2,})([A-Z0-9_])([^A-Z0-9_]+)").expect("valid regex"));
static TRAILING_E: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.*) _E$").expect("valid regex"));
static UNDERSCORE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.*) _(.*)").expect("valid regex"));

/// Turn a technical name into a human readable label
///
/// Splits at lower-to-upper case transitions and before the last capital of
/// an acronym run (digits and `_` count as upper case). A leading `P_`
/// parameter prefix and a trailing `_E` are dropped.
pub fn tokenize_name_to_label(name: &str) -> String {
    let label = LEADING_PARAMETER_PREFIX.replace(name, "$1");
    let label = LOWER_TO_UPPER.replace_all(&label, "$1 $2");
    let label = ACRONYM_RUN.replace_all(&label, "$1 $2$3");
    let label = TRAILING_E.replace(&label, "$1");
    let label = UNDERSCORE_WORD.replace_all(&label, "$1 $2");
    label.into_owned()
}
