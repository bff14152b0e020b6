//! bilibili video uploads

use serde_json::Value;

use super::{
    Analysis, Provider, ProviderError, Unit, ValueType, as_array, count_per_day, field,
    plain_label,
};
use crate::calendar::{DateRange, DateSeries};
use crate::palette;

pub(super) fn videos() -> Provider {
    Provider {
        id: "bilibili",
        cache_key: "bilibili",
        name: "bilibili",
        unit: Unit::Label("Videos"),
        value_type: ValueType::Integer,
        analysis: Analysis::Sum,
        palette: &palette::PINK,
        label_format: plain_label,
        parse: parse_videos,
        merge: None,
    }
}

/// Accepts either the flattened video list or a single search page
fn video_list(raw: &Value) -> Result<&Vec<Value>, ProviderError> {
    if raw.is_array() {
        return as_array(raw, "videos");
    }
    as_array(field(raw, &["data", "list", "vlist"])?, "vlist")
}

fn parse_videos(raw: &Value, range: &DateRange) -> Result<DateSeries, ProviderError> {
    let times = video_list(raw)?
        .iter()
        .map(|video| {
            field(video, &["created"])?
                .as_i64()
                .ok_or_else(|| ProviderError::InvalidValue {
                    field: "created".to_string(),
                    value: video.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    count_per_day(times.into_iter(), range)
}
