//! Plain date → value series, from a JSON object or a `date,value` CSV file

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{
    Analysis, Provider, ProviderError, Unit, ValueType, as_number, parse_date, plain_label,
};
use crate::calendar::{DateRange, DateSeries};
use crate::palette;

pub(super) fn series() -> Provider {
    Provider {
        id: "series",
        cache_key: "series",
        name: "Activity",
        unit: Unit::Label("total"),
        value_type: ValueType::Float,
        analysis: Analysis::Sum,
        palette: &palette::GREEN,
        label_format: plain_label,
        parse: parse_series,
        merge: None,
    }
}

fn parse_series(raw: &Value, range: &DateRange) -> Result<DateSeries, ProviderError> {
    let entries = raw.as_object().ok_or_else(|| ProviderError::InvalidValue {
        field: "series".to_string(),
        value: "expected an object of date to number".to_string(),
    })?;

    let mut series = DateSeries::new();
    for (date_text, value) in entries {
        let date = parse_date(date_text)?;
        if range.contains(date) {
            series.insert(date, as_number(value, date_text)?);
        }
    }
    Ok(series)
}

#[derive(Deserialize)]
struct CsvRow {
    date: String,
    value: f64,
}

/// Convert a `date,value` CSV file into the JSON object form
pub(super) fn csv_to_json(path: &Path) -> Result<Value, ProviderError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut out = Map::new();
    for row in reader.deserialize() {
        let row: CsvRow = row?;
        let date = parse_date(row.date.trim())?;
        let value = serde_json::Number::from_f64(row.value).ok_or_else(|| {
            ProviderError::InvalidValue {
                field: row.date.clone(),
                value: row.value.to_string(),
            }
        })?;
        out.insert(date.format("%Y-%m-%d").to_string(), Value::Number(value));
    }
    Ok(Value::Object(out))
}
