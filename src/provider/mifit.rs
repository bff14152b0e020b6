//! MiFit (Huami) band sleep summaries
//!
//! Raw shape: `{"data": [{"date_time": "YYYY-MM-DD", "summary": "<base64 JSON>"}]}`.
//! Each decoded summary carries `slp.st` and `slp.ed`, the sleep start and end
//! as Unix seconds.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use super::{
    Analysis, Provider, ProviderError, Unit, ValueType, as_array, as_number, field, parse_date,
};
use crate::calendar::{DateRange, DateSeries};
use crate::palette;

/// Nights shorter than this are naps or band glitches
const MIN_SLEEP_SECONDS: f64 = 3.0 * 3600.0;

const SECONDS_PER_DAY: i64 = 24 * 3600;

pub(super) fn sleep() -> Provider {
    Provider {
        id: "mifit",
        cache_key: "mifit",
        name: "MiFit Sleep",
        unit: Unit::Format(format_average_sleep),
        value_type: ValueType::Integer,
        analysis: Analysis::Mean,
        palette: &palette::INDIGO,
        label_format: clock_label,
        parse: parse_sleep,
        merge: None,
    }
}

/// Hours and minutes of the time-of-day part of `seconds`
fn hours_minutes(seconds: f64) -> (i64, i64) {
    let secs = (seconds.round() as i64).rem_euclid(SECONDS_PER_DAY);
    (secs / 3600, secs / 60 % 60)
}

fn format_average_sleep(seconds: f64) -> String {
    let (hours, minutes) = hours_minutes(seconds);
    format!("Average: {} h {} min", hours, minutes)
}

fn clock_label(seconds: f64, _: ValueType) -> String {
    let (hours, minutes) = hours_minutes(seconds);
    format!("{:02}:{:02}", hours, minutes)
}

/// Sleep duration in seconds from one base64 summary blob
fn sleep_seconds(encoded: &Value) -> Result<f64, ProviderError> {
    let text = encoded.as_str().ok_or_else(|| ProviderError::InvalidValue {
        field: "summary".to_string(),
        value: encoded.to_string(),
    })?;
    let bytes = STANDARD.decode(text)?;
    let summary: Value = serde_json::from_slice(&bytes)?;
    let start = as_number(field(&summary, &["slp", "st"])?, "slp.st")?;
    let end = as_number(field(&summary, &["slp", "ed"])?, "slp.ed")?;
    Ok(end - start)
}

fn parse_sleep(raw: &Value, range: &DateRange) -> Result<DateSeries, ProviderError> {
    let mut series = DateSeries::new();
    for piece in as_array(field(raw, &["data"])?, "data")? {
        let date_text = field(piece, &["date_time"])?
            .as_str()
            .ok_or_else(|| ProviderError::MissingField("date_time".to_string()))?;
        let date = parse_date(date_text)?;
        if !range.contains(date) {
            continue;
        }
        let seconds = sleep_seconds(field(piece, &["summary"])?)?;
        if seconds > MIN_SLEEP_SECONDS {
            series.insert(date, seconds);
        }
    }
    Ok(series)
}
