//! Search filters and their translation into query parameters
//!
//! Filters are checked against the kind's registry entry before any request
//! is made. The result is either a by-id lookup or a list of query
//! parameters for the search endpoint.

use crate::error::{ArchiveError, Result};
use crate::model::{CompactDate, Kind, Resource};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

/// One filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Keyword, id, passthrough value, or a `YYYYMMDD` date string
    Text(String),
    Date(NaiveDate),
    /// Ids of related records
    Related(Vec<String>),
}

impl FilterValue {
    fn type_name(&self) -> &'static str {
        match self {
            FilterValue::Text(_) => "text",
            FilterValue::Date(_) => "a date",
            FilterValue::Related(_) => "a list of related ids",
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(value: NaiveDate) -> Self {
        FilterValue::Date(value)
    }
}

/// Search filters keyed by name.
///
/// Held in a sorted map, so the order filters are added in never changes the
/// generated request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    values: BTreeMap<String, FilterValue>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a single record. Every other filter is ignored.
    pub fn id(self, id: impl Into<String>) -> Self {
        self.with("id", FilterValue::Text(id.into()))
    }

    pub fn text(self, name: &str, value: impl Into<String>) -> Self {
        self.with(name, FilterValue::Text(value.into()))
    }

    pub fn date(self, name: &str, value: NaiveDate) -> Self {
        self.with(name, FilterValue::Date(value))
    }

    /// Restrict to records associated with any of `related`.
    pub fn related<R: Resource>(self, name: &str, related: &[R]) -> Self {
        self.related_ids(name, related.iter().map(|r| r.id().to_string()))
    }

    pub fn related_ids<I, S>(self, name: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(name, FilterValue::Related(ids.into_iter().map(Into::into).collect()))
    }

    pub fn with(mut self, name: &str, value: FilterValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a filter, replacing any previous value under the same name.
    pub fn insert(&mut self, name: &str, value: FilterValue) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A validated search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Single-record lookup on the detail endpoint
    ById(String),
    /// Search endpoint parameters, excluding `page` and `itemsPerPage`
    Search(Vec<(String, String)>),
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::ById(id) => write!(f, "id {}", id),
            Query::Search(params) if params.is_empty() => f.write_str("an empty search"),
            Query::Search(params) => {
                let joined = params
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join("&");
                write!(f, "'{}'", joined)
            },
        }
    }
}

/// Validate `filters` for `kind` and build the request they describe.
pub fn normalize(kind: Kind, filters: &Filters) -> Result<Query> {
    let def = kind.def();
    if !def.searchable {
        return Err(ArchiveError::invalid_filter(kind, "kind is not searchable"));
    }

    let accepted = def.filter_names();
    for (name, _) in filters.iter() {
        if !accepted.contains(&name) {
            return Err(ArchiveError::invalid_filter(
                kind,
                format!("'{}' is not a valid search term (valid: {})", name, accepted.join(", ")),
            ));
        }
    }

    if let Some(value) = filters.get("id") {
        return match value {
            FilterValue::Text(id) if !id.trim().is_empty() => {
                Ok(Query::ById(id.trim().to_string()))
            },
            FilterValue::Text(_) => Err(ArchiveError::invalid_filter(kind, "id must not be empty")),
            other => Err(wrong_type(kind, "id", other)),
        };
    }

    let mut params = Vec::new();
    if let Some(model) = &def.search_model {
        params.push(("model".to_string(), model.clone()));
    }

    // Keywords are folded into one free-text parameter, in registry order.
    let mut keywords = Vec::new();
    for name in &def.filters.keywords {
        match filters.get(name) {
            Some(FilterValue::Text(text)) if !text.trim().is_empty() => keywords.push(text.trim()),
            Some(FilterValue::Text(_)) | None => {},
            Some(other) => return Err(wrong_type(kind, name, other)),
        }
    }
    if let (false, Some(param)) = (keywords.is_empty(), &def.filters.keyword_param) {
        params.push((param.clone(), keywords.join(" ")));
    }

    if def.filters.dates {
        let start = date_filter(kind, filters, "start_date")?;
        let end = date_filter(kind, filters, "end_date")?;
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(ArchiveError::invalid_filter(
                    kind,
                    format!("start_date {} is after end_date {}", start, end),
                ));
            }
        }
        if let Some(start) = start {
            params.push(("start_date".to_string(), start.to_string()));
        }
        if let Some(end) = end {
            params.push(("end_date".to_string(), end.to_string()));
        }
    }

    for (name, param) in &def.filters.relations {
        match filters.get(name) {
            None => {},
            Some(FilterValue::Related(ids)) => {
                if ids.is_empty() {
                    return Err(ArchiveError::invalid_filter(
                        kind,
                        format!("'{}' needs at least one related id", name),
                    ));
                }
                if ids.iter().any(|id| id.trim().is_empty()) {
                    return Err(ArchiveError::invalid_filter(
                        kind,
                        format!("'{}' contains a blank related id", name),
                    ));
                }
                params.extend(ids.iter().map(|id| (param.clone(), id.trim().to_string())));
            },
            Some(other) => return Err(wrong_type(kind, name, other)),
        }
    }

    for name in &def.filters.passthrough {
        match filters.get(name) {
            None => {},
            Some(FilterValue::Text(text)) => params.push((name.clone(), text.clone())),
            Some(other) => return Err(wrong_type(kind, name, other)),
        }
    }

    Ok(Query::Search(params))
}

fn date_filter(kind: Kind, filters: &Filters, name: &str) -> Result<Option<CompactDate>> {
    match filters.get(name) {
        None => Ok(None),
        Some(FilterValue::Date(date)) => Ok(Some(CompactDate(*date))),
        Some(FilterValue::Text(raw)) => parse_compact(raw).map(Some).ok_or_else(|| {
            ArchiveError::invalid_filter(
                kind,
                format!("{} must be a YYYYMMDD date, got '{}'", name, raw),
            )
        }),
        Some(other) => Err(wrong_type(kind, name, other)),
    }
}

/// Strict `YYYYMMDD`: eight digits forming a real calendar date.
fn parse_compact(raw: &str) -> Option<CompactDate> {
    let raw = raw.trim();
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y%m%d").ok().map(CompactDate)
}

fn wrong_type(kind: Kind, name: &str, value: &FilterValue) -> ArchiveError {
    ArchiveError::invalid_filter(kind, format!("'{}' does not accept {}", name, value.type_name()))
}
