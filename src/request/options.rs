//! System query options and URI composition

use std::fmt;
use super::error::RequestError;

/// System query options, in the order they are written to a URI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOption {
    Select,
    Filter,
    OrderBy,
    Skip,
    Top,
    InlineCount,
}

impl QueryOption {
    pub const ALL: [QueryOption; 6] = [
        QueryOption::Select,
        QueryOption::Filter,
        QueryOption::OrderBy,
        QueryOption::Skip,
        QueryOption::Top,
        QueryOption::InlineCount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryOption::Select => "$select",
            QueryOption::Filter => "$filter",
            QueryOption::OrderBy => "$orderby",
            QueryOption::Skip => "$skip",
            QueryOption::Top => "$top",
            QueryOption::InlineCount => "$inlinecount",
        }
    }
}

impl fmt::Display for QueryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A 1-based, inclusive window over the result entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    start: usize,
    end: Option<usize>,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self { start: 1, end: None }
    }
}

impl PageWindow {
    /// `end` of `None` leaves the window unbounded
    pub fn new(start: usize, end: Option<usize>) -> Result<Self, RequestError> {
        if start == 0 || end.is_some_and(|e| e < start) {
            return Err(RequestError::InvalidPageBoundaries { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> Option<usize> {
        self.end
    }

    /// Entries to skip; `None` for a window starting at the first entry
    pub fn skip(&self) -> Option<usize> {
        (self.start > 1).then(|| self.start - 1)
    }

    pub fn top(&self) -> Option<usize> {
        self.end.map(|e| e - self.start + 1)
    }
}

/// Base path with the non-empty options appended
pub(crate) fn compose_uri(path: &str, options: impl IntoIterator<Item = (QueryOption, Option<String>)>) -> String {
    let query: Vec<String> = options
        .into_iter()
        .filter_map(|(option, value)| value.filter(|v| !v.is_empty()).map(|v| format!("{}={}", option, v)))
        .collect();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query.join("&"))
    }
}

/// Root-relative path of an entity set
pub(crate) fn entity_set_path(service_root: &str, set_name: &str) -> String {
    format!("{}/{}", service_root.trim_end_matches('/'), set_name)
}

/// Append a property to a `$select` list unless already present
pub(crate) fn push_unique(select: &mut Vec<String>, property: &str) {
    if !select.iter().any(|p| p == property) {
        select.push(property.to_string());
    }
}
