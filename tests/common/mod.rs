//! Common test utilities

use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};

/// Write a plain `{"date": value}` series as JSON
pub fn write_series_json(dir: &Path, name: &str, entries: &[(&str, f64)]) -> PathBuf {
    let map: Map<String, Value> = entries
        .iter()
        .map(|(date, value)| (date.to_string(), json!(value)))
        .collect();
    let path = dir.join(format!("{}.json", name));
    std::fs::write(&path, Value::Object(map).to_string()).unwrap();
    path
}

/// Write a `date,value` CSV series
pub fn write_series_csv(dir: &Path, name: &str, entries: &[(&str, f64)]) -> PathBuf {
    let mut text = String::from("date,value\n");
    for (date, value) in entries {
        text.push_str(&format!("{},{}\n", date, value));
    }
    let path = dir.join(format!("{}.csv", name));
    std::fs::write(&path, text).unwrap();
    path
}

/// Write a GitHub contribution calendar response, one week per 7 days
pub fn write_github_json(dir: &Path, days: &[(&str, u64)]) -> PathBuf {
    let days: Vec<Value> = days
        .iter()
        .map(|(date, count)| json!({"date": date, "contributionCount": count}))
        .collect();
    let weeks: Vec<Value> = days
        .chunks(7)
        .map(|week| json!({"contributionDays": week}))
        .collect();
    let raw = json!({"data": {"user": {"contributionsCollection": {"contributionCalendar": {"weeks": weeks}}}}});
    let path = dir.join("github.json");
    std::fs::write(&path, raw.to_string()).unwrap();
    path
}

/// Write a batch config file
pub fn write_config(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("yearmap.toml");
    std::fs::write(&path, text).unwrap();
    path
}
