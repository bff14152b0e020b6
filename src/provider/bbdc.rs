//! BBDC vocabulary study log
//!
//! Raw shape: `{"id": "<user>", "utils": {"YYYY-MM-DD": {"time": .., "learn": .., "review": ..}}}`.
//! The upstream profile only reports recent days, so imports are merged into
//! the cached history instead of replacing it.

use serde_json::{Map, Value};

use super::{
    Analysis, Provider, ProviderError, Unit, ValueType, as_number, field, parse_date, plain_label,
};
use crate::calendar::{DateRange, DateSeries};
use crate::palette;

pub(super) fn study_time() -> Provider {
    Provider {
        id: "bbdc-time",
        cache_key: "bbdc",
        name: "BBDC",
        unit: Unit::Format(format_average_minutes),
        value_type: ValueType::Integer,
        analysis: Analysis::Mean,
        palette: &palette::ORANGE,
        label_format: minutes_label,
        parse: parse_time,
        merge: Some(merge_days),
    }
}

pub(super) fn words() -> Provider {
    Provider {
        id: "bbdc-word",
        unit: Unit::Label("Words"),
        analysis: Analysis::Sum,
        label_format: plain_label,
        parse: parse_words,
        ..study_time()
    }
}

fn format_average_minutes(minutes: f64) -> String {
    let total = minutes.round() as i64;
    format!("Average: {} h {} min", total / 60, total % 60)
}

fn minutes_label(minutes: f64, _: ValueType) -> String {
    let total = minutes.round() as i64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

fn days(raw: &Value) -> Result<&Map<String, Value>, ProviderError> {
    field(raw, &["utils"])?
        .as_object()
        .ok_or_else(|| ProviderError::MissingField("utils".to_string()))
}

/// Numeric field of a day entry; absent fields count as zero
fn day_value(day: &Value, name: &str) -> Result<f64, ProviderError> {
    match day.get(name) {
        Some(v) => as_number(v, name),
        None => Ok(0.0),
    }
}

fn collect(
    raw: &Value,
    range: &DateRange,
    value: impl Fn(&Value) -> Result<f64, ProviderError>,
) -> Result<DateSeries, ProviderError> {
    let mut series = DateSeries::new();
    for (date_text, day) in days(raw)? {
        let date = parse_date(date_text)?;
        if range.contains(date) {
            series.insert(date, value(day)?);
        }
    }
    Ok(series)
}

fn parse_time(raw: &Value, range: &DateRange) -> Result<DateSeries, ProviderError> {
    collect(raw, range, |day| day_value(day, "time"))
}

fn parse_words(raw: &Value, range: &DateRange) -> Result<DateSeries, ProviderError> {
    collect(raw, range, |day| {
        Ok(day_value(day, "learn")? + day_value(day, "review")?)
    })
}

/// Fold fresh day entries into the cached history of the same user
fn merge_days(cached: Value, fresh: Value) -> Result<Value, ProviderError> {
    let cached_id = cached.get("id").cloned().unwrap_or(Value::Null);
    let fresh_id = fresh.get("id").cloned().unwrap_or(Value::Null);
    if !cached_id.is_null() && cached_id != fresh_id {
        return Err(ProviderError::OwnerMismatch {
            cached: cached_id.to_string(),
            requested: fresh_id.to_string(),
        });
    }

    let mut merged = cached.get("utils").and_then(Value::as_object).cloned().unwrap_or_default();
    for (date, day) in days(&fresh)? {
        let entry = merged
            .entry(date.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        match (entry.as_object_mut(), day.as_object()) {
            (Some(existing), Some(update)) => {
                for (key, value) in update {
                    existing.insert(key.clone(), value.clone());
                }
            }
            _ => *entry = day.clone(),
        }
    }

    let mut out = Map::new();
    out.insert("id".to_string(), fresh_id);
    out.insert("utils".to_string(), Value::Object(merged));
    Ok(Value::Object(out))
}
