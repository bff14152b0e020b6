//! Data providers: raw data parsers plus display metadata

mod bbdc;
mod bilibili;
mod codeforces;
mod github;
mod mifit;
mod series;

use std::path::Path;

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use thiserror::Error;

use crate::calendar::{DateRange, DateSeries, Grid};
use crate::palette::Palette;

/// Errors raised while reading or parsing provider data
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to decode base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Missing field in provider data: {0}")]
    MissingField(String),

    #[error("Unexpected value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Failed to parse date: {0}")]
    DateParse(String),

    #[error("Cached data belongs to {cached}, not {requested}")]
    OwnerMismatch { cached: String, requested: String },
}

/// Parses raw provider JSON into a per-day series
pub type ParseFn = fn(&Value, &DateRange) -> Result<DateSeries, ProviderError>;

/// Combines cached raw data with freshly imported raw data
pub type MergeFn = fn(Value, Value) -> Result<Value, ProviderError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Float,
}

impl ValueType {
    pub fn normalize(self, value: f64) -> f64 {
        match self {
            ValueType::Integer => value.round(),
            ValueType::Float => value,
        }
    }

    pub fn format(self, value: f64) -> String {
        match self {
            ValueType::Integer => format!("{}", value.round() as i64),
            ValueType::Float => format!("{:.1}", value),
        }
    }
}

/// Reducer for the summary annotation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Analysis {
    Sum,
    Mean,
}

impl Analysis {
    pub fn reduce(self, values: impl Iterator<Item = f64>) -> f64 {
        let (count, total) = values.fold((0usize, 0.0f64), |(n, t), v| (n + 1, t + v));
        match self {
            Analysis::Sum => total,
            Analysis::Mean if count == 0 => 0.0,
            Analysis::Mean => total / count as f64,
        }
    }
}

/// Unit shown next to the summary value
#[derive(Clone, Copy)]
pub enum Unit {
    Label(&'static str),
    Format(fn(f64) -> String),
}

/// Capability record describing one data source
#[derive(Clone, Copy)]
pub struct Provider {
    pub id: &'static str,
    /// Cache entry name; providers reading the same raw data share one
    pub cache_key: &'static str,
    pub name: &'static str,
    pub unit: Unit,
    pub value_type: ValueType,
    pub analysis: Analysis,
    pub palette: &'static Palette,
    pub label_format: fn(f64, ValueType) -> String,
    pub parse: ParseFn,
    pub merge: Option<MergeFn>,
}

impl Provider {
    pub fn unit_label(&self) -> &'static str {
        match self.unit {
            Unit::Label(label) => label,
            Unit::Format(_) => "",
        }
    }

    /// Summary annotation over the populated grid cells
    pub fn summary(&self, grid: &Grid) -> String {
        let value = self
            .value_type
            .normalize(self.analysis.reduce(grid.values()));
        match self.unit {
            Unit::Label(label) => format!("{} {}", self.value_type.format(value), label),
            Unit::Format(format) => format(value),
        }
    }

    /// Legend text for a value on this provider's scale
    pub fn label(&self, value: f64) -> String {
        (self.label_format)(value, self.value_type)
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("id", &self.id)
            .field("cache_key", &self.cache_key)
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("analysis", &self.analysis)
            .field("palette", &self.palette.name)
            .finish()
    }
}

/// Default legend formatter
pub(crate) fn plain_label(value: f64, value_type: ValueType) -> String {
    value_type.format(value)
}

/// Every known provider
pub fn get_providers() -> Vec<Provider> {
    vec![
        github::contributions(),
        codeforces::all_submissions(),
        codeforces::accepted(),
        bilibili::videos(),
        bbdc::study_time(),
        bbdc::words(),
        mifit::sleep(),
        series::series(),
    ]
}

pub fn find_provider(id: &str) -> Result<Provider, ProviderError> {
    get_providers()
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| ProviderError::UnknownProvider(id.to_string()))
}

pub fn provider_ids() -> Vec<&'static str> {
    get_providers().iter().map(|p| p.id).collect()
}

/// Load raw provider data from a JSON file, or a `date,value` CSV file
pub fn read_input(path: &Path) -> Result<Value, ProviderError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        return series::csv_to_json(path);
    }

    let text = std::fs::read_to_string(path).map_err(|source| ProviderError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Walk `path` through nested JSON objects
pub(crate) fn field<'a>(value: &'a Value, path: &[&str]) -> Result<&'a Value, ProviderError> {
    path.iter().try_fold(value, |v, key| {
        v.get(*key)
            .ok_or_else(|| ProviderError::MissingField(path.join(".")))
    })
}

pub(crate) fn as_array<'a>(value: &'a Value, name: &str) -> Result<&'a Vec<Value>, ProviderError> {
    value.as_array().ok_or_else(|| ProviderError::InvalidValue {
        field: name.to_string(),
        value: value.to_string(),
    })
}

pub(crate) fn as_number(value: &Value, name: &str) -> Result<f64, ProviderError> {
    value.as_f64().ok_or_else(|| ProviderError::InvalidValue {
        field: name.to_string(),
        value: value.to_string(),
    })
}

pub(crate) fn parse_date(text: &str) -> Result<NaiveDate, ProviderError> {
    let day = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| ProviderError::DateParse(format!("{}: {}", text, e)))
}

/// Calendar day (UTC) of a Unix timestamp
pub(crate) fn date_from_timestamp(seconds: i64) -> Result<NaiveDate, ProviderError> {
    DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| ProviderError::DateParse(format!("timestamp {}", seconds)))
}

/// Count one event per timestamp, keeping days inside `range`
pub(crate) fn count_per_day(
    timestamps: impl Iterator<Item = i64>,
    range: &DateRange,
) -> Result<DateSeries, ProviderError> {
    let mut series = DateSeries::new();
    for ts in timestamps {
        let date = date_from_timestamp(ts)?;
        if range.contains(date) {
            *series.entry(date).or_insert(0.0) += 1.0;
        }
    }
    Ok(series)
}
