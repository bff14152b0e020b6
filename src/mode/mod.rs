//! CLI mode implementations

mod batch;
mod list;
mod render;

pub use batch::run_batch;
pub use list::run_list;
pub use render::run_render;

use std::path::PathBuf;

use crate::cache;
use crate::calendar::{self, Heatmap};
use crate::chart;
use crate::config::RenderTask;
use crate::output::{
    format_range, print_debug, print_header, print_markers, print_preview, print_summary,
};
use crate::provider::{self, Provider, ValueType};

/// Laid-out heat map of one provider, ready to draw
pub struct Report {
    pub provider: Provider,
    pub heatmap: Heatmap,
    pub summary: String,
    pub output_path: PathBuf,
}

/// Load a task's raw data, parse it, and lay out its heat map
pub fn build_report(task: &RenderTask) -> Result<Report, String> {
    let config = &task.config;
    let provider = task.provider;
    let debug = |msg: String| {
        if config.debug {
            print_debug(&msg);
        }
    };

    let cache_dir = cache::cache_dir(&config.data_dir).map_err(|e| e.to_string())?;
    let raw = match &task.input {
        Some(path) => {
            debug(format!("importing {} for {}", path.display(), provider.id));
            let fresh = provider::read_input(path).map_err(|e| e.to_string())?;
            cache::store(&cache_dir, &provider, fresh).map_err(|e| e.to_string())?
        }
        None => {
            debug(format!("reading {} from {}", provider.id, cache_dir.display()));
            cache::load(&cache_dir, &provider).map_err(|e| e.to_string())?
        }
    };

    let range = config
        .mode
        .logical_range(config.today)
        .map_err(|e| e.to_string())?;
    let series = (provider.parse)(&raw, &range).map_err(|e| e.to_string())?;
    debug(format!(
        "{} days with values in {}",
        series.len(),
        format_range(&range)
    ));

    let palette = config.palette.unwrap_or(provider.palette);
    let integer_values = provider.value_type == ValueType::Integer;
    let heatmap =
        calendar::build(&series, range, palette, integer_values).map_err(|e| e.to_string())?;
    debug(format!(
        "palette {} with {} scale colors",
        palette.name,
        heatmap.colors.scale.len()
    ));

    Ok(Report {
        summary: provider.summary(&heatmap.grid),
        output_path: config.output_path(&provider),
        provider,
        heatmap,
    })
}

/// Build, report and draw one task; returns the written image path
pub fn execute(task: &RenderTask) -> Result<PathBuf, String> {
    let report = build_report(task)?;
    let quiet = task.config.quiet;

    if !quiet {
        print_header(&report.provider, &report.heatmap);
        print_markers(&report.heatmap);
        print_preview(&report.heatmap);
    }

    let path = report.output_path.to_string_lossy().to_string();
    chart::render(
        &report.heatmap,
        &report.provider,
        task.config.mode,
        &report.summary,
        task.config.format,
        &path,
    )?;

    print_summary(&report.summary, &path, quiet);
    Ok(report.output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Mode;
    use crate::config::{OutputFormat, RenderConfig};
    use chrono::NaiveDate;
    use std::path::Path;
    use tempfile::TempDir;

    fn task(dir: &Path, id: &str, input: Option<PathBuf>, mode: Mode) -> RenderTask {
        RenderTask {
            provider: provider::find_provider(id).unwrap(),
            config: RenderConfig {
                mode,
                palette: None,
                format: OutputFormat::Svg,
                output_dir: dir.to_path_buf(),
                data_dir: dir.join("data"),
                today: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                quiet: true,
                debug: false,
            },
            input,
        }
    }

    #[test]
    fn test_build_report_imports_then_reads_cache() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("series.json");
        std::fs::write(&input, r#"{"2023-01-05": 3, "2023-01-06": 0, "2023-02-01": 1.5}"#).unwrap();

        let imported = build_report(&task(
            temp_dir.path(),
            "series",
            Some(input),
            Mode::FixedYear(2023),
        ))
        .unwrap();
        assert_eq!(imported.summary, "4.5 total");
        assert_eq!(imported.output_path, temp_dir.path().join("series.svg"));

        let cached = build_report(&task(temp_dir.path(), "series", None, Mode::FixedYear(2023))).unwrap();
        assert_eq!(cached.summary, imported.summary);
        assert_eq!(cached.heatmap, imported.heatmap);
    }

    #[test]
    fn test_build_report_errors() {
        let temp_dir = TempDir::new().unwrap();
        let missing = build_report(&task(temp_dir.path(), "github", None, Mode::TillNow));
        assert!(missing.is_err_and(|e| e.contains("No cached data")));

        let input = temp_dir.path().join("flat.json");
        std::fs::write(&input, r#"{"2023-01-05": 2, "2023-01-06": 2}"#).unwrap();
        let flat = build_report(&task(
            temp_dir.path(),
            "series",
            Some(input),
            Mode::FixedYear(2023),
        ));
        assert!(flat.is_err_and(|e| e.contains("every value in range is 2")));
    }
}
