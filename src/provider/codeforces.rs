//! Codeforces submissions (`user.status` API response)

use serde_json::Value;

use super::{
    Analysis, Provider, ProviderError, Unit, ValueType, as_array, count_per_day, field,
    plain_label,
};
use crate::calendar::{DateRange, DateSeries};
use crate::palette;

/// Verdict of an accepted submission
const ACCEPTED: &str = "OK";

pub(super) fn all_submissions() -> Provider {
    Provider {
        id: "codeforces",
        cache_key: "codeforces",
        name: "Codeforces",
        unit: Unit::Label("Problems"),
        value_type: ValueType::Integer,
        analysis: Analysis::Sum,
        palette: &palette::PURPLE,
        label_format: plain_label,
        parse: parse_all,
        merge: None,
    }
}

pub(super) fn accepted() -> Provider {
    Provider {
        id: "codeforces-ac",
        unit: Unit::Label("Accepted Problems"),
        parse: parse_accepted,
        ..all_submissions()
    }
}

fn submissions(raw: &Value) -> Result<&Vec<Value>, ProviderError> {
    as_array(field(raw, &["result"])?, "result")
}

fn creation_time(submission: &Value) -> Result<i64, ProviderError> {
    field(submission, &["creationTimeSeconds"])?
        .as_i64()
        .ok_or_else(|| ProviderError::InvalidValue {
            field: "creationTimeSeconds".to_string(),
            value: submission.to_string(),
        })
}

fn parse_all(raw: &Value, range: &DateRange) -> Result<DateSeries, ProviderError> {
    let times = submissions(raw)?
        .iter()
        .map(creation_time)
        .collect::<Result<Vec<_>, _>>()?;
    count_per_day(times.into_iter(), range)
}

fn parse_accepted(raw: &Value, range: &DateRange) -> Result<DateSeries, ProviderError> {
    let times = submissions(raw)?
        .iter()
        .filter(|s| s.get("verdict").and_then(Value::as_str) == Some(ACCEPTED))
        .map(creation_time)
        .collect::<Result<Vec<_>, _>>()?;
    count_per_day(times.into_iter(), range)
}
