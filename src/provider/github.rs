//! GitHub contribution calendar (GraphQL `contributionsCollection` response)

use serde_json::Value;

use super::{
    Analysis, Provider, ProviderError, Unit, ValueType, as_array, as_number, field, parse_date,
    plain_label,
};
use crate::calendar::{DateRange, DateSeries};
use crate::palette;

const WEEKS_PATH: [&str; 5] = [
    "data",
    "user",
    "contributionsCollection",
    "contributionCalendar",
    "weeks",
];

pub(super) fn contributions() -> Provider {
    Provider {
        id: "github",
        cache_key: "github",
        name: "GitHub",
        unit: Unit::Label("Contributions"),
        value_type: ValueType::Integer,
        analysis: Analysis::Sum,
        palette: &palette::BLUE,
        label_format: plain_label,
        parse: parse_contributions,
        merge: None,
    }
}

fn parse_contributions(raw: &Value, range: &DateRange) -> Result<DateSeries, ProviderError> {
    let mut series = DateSeries::new();
    for week in as_array(field(raw, &WEEKS_PATH)?, "weeks")? {
        for day in as_array(field(week, &["contributionDays"])?, "contributionDays")? {
            let date_text = field(day, &["date"])?
                .as_str()
                .ok_or_else(|| ProviderError::MissingField("contributionDays.date".to_string()))?;
            let date = parse_date(date_text)?;
            if range.contains(date) {
                let count = as_number(field(day, &["contributionCount"])?, "contributionCount")?;
                series.insert(date, count);
            }
        }
    }
    Ok(series)
}
