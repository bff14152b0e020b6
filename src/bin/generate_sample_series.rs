use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{Datelike, Days, NaiveDate};
use serde_json::{Map, Value, json};

/// Xorshift generator so every run writes the same files
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

fn days(year: i32) -> impl Iterator<Item = NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1);
    (0..366u64)
        .filter_map(move |i| first?.checked_add_days(Days::new(i)))
        .filter(move |d| d.year() == year)
}

/// Weekday-heavy activity with some idle and missing days
fn activity(rng: &mut Rng, date: NaiveDate) -> Option<u64> {
    match rng.below(10) {
        0 => None,
        1 | 2 => Some(0),
        _ if date.weekday().number_from_monday() >= 6 => Some(rng.below(3)),
        _ => Some(1 + rng.below(8)),
    }
}

fn write_series_csv(path: &Path, year: i32, rng: &mut Rng) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "date,value")?;
    for date in days(year) {
        if let Some(count) = activity(rng, date) {
            writeln!(writer, "{},{}", date, count as f64 * 0.75)?;
        }
    }
    Ok(())
}

fn github_json(year: i32, rng: &mut Rng) -> Value {
    let days: Vec<Value> = days(year)
        .map(|date| {
            json!({
                "date": date.to_string(),
                "contributionCount": activity(rng, date).unwrap_or(0),
            })
        })
        .collect();
    let weeks: Vec<Value> = days
        .chunks(7)
        .map(|week| json!({ "contributionDays": week }))
        .collect();
    json!({"data": {"user": {"contributionsCollection": {"contributionCalendar": {"weeks": weeks}}}}})
}

fn bbdc_json(year: i32, rng: &mut Rng) -> Value {
    let mut utils = Map::new();
    for date in days(year) {
        if let Some(count) = activity(rng, date) {
            utils.insert(
                date.to_string(),
                json!({"time": count * 9, "learn": count * 12, "review": count * 20}),
            );
        }
    }
    json!({"id": "sample", "utils": utils})
}

fn write_json(path: &Path, value: &Value) -> std::io::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(path, text)
}

fn main() -> std::io::Result<()> {
    let year = 2023;
    let dir = Path::new("sample_data");
    std::fs::create_dir_all(dir)?;
    let mut rng = Rng(0x5eed);

    write_series_csv(&dir.join("series.csv"), year, &mut rng)?;
    write_json(&dir.join("github.json"), &github_json(year, &mut rng))?;
    write_json(&dir.join("bbdc.json"), &bbdc_json(year, &mut rng))?;

    println!("Generated: series.csv, github.json, bbdc.json ({})", year);
    Ok(())
}
