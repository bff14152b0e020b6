//! Integration tests for yearmap CLI

mod common;

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const TODAY: &str = "2024-03-15";

/// Get the path to the yearmap binary
fn yearmap_bin() -> std::path::PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps
    path.push("yearmap");
    path
}

/// Run yearmap with the given arguments
fn run_yearmap(args: &[&str]) -> std::process::Output {
    Command::new(yearmap_bin())
        .args(args)
        .output()
        .expect("failed to execute yearmap")
}

/// Run yearmap with an isolated data directory and a pinned date
fn run_isolated(dir: &TempDir, args: &[&str]) -> std::process::Output {
    let data_dir = dir.path().join("data");
    let mut full = vec![
        "--data-dir",
        data_dir.to_str().unwrap(),
        "--today",
        TODAY,
        "--no-color",
    ];
    full.extend_from_slice(args);
    run_yearmap(&full)
}

fn sample_entries() -> Vec<(&'static str, f64)> {
    vec![("2023-01-05", 3.0), ("2023-01-06", 0.0), ("2023-02-01", 1.5)]
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn read_prefix(path: &Path, n: usize) -> Vec<u8> {
    let bytes = std::fs::read(path).unwrap();
    bytes[..n.min(bytes.len())].to_vec()
}

// =============================================================================
// Basic functionality tests
// =============================================================================

#[test]
fn test_help_flag() {
    let output = run_yearmap(&["--help"]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Calendar heat maps"));
    assert!(stdout.contains("--mode"));
    assert!(stdout.contains("--year"));
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--data-dir"));
}

#[test]
fn test_version_flag() {
    let output = run_yearmap(&["--version"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("yearmap"));
}

#[test]
fn test_list_providers_and_palettes() {
    let output = run_yearmap(&["--list", "--no-color"]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    for id in ["github", "codeforces-ac", "bilibili", "bbdc-time", "mifit", "series"] {
        assert!(stdout.contains(id), "missing provider {}", id);
    }
    assert!(stdout.contains("teal"));
    assert!(stdout.contains("Palettes:"));
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_render_series_svg() {
    let temp_dir = TempDir::new().unwrap();
    let input = common::write_series_json(temp_dir.path(), "series", &sample_entries());
    let out = temp_dir.path().to_str().unwrap();

    let output = run_isolated(
        &temp_dir,
        &[
            "series",
            "-i",
            input.to_str().unwrap(),
            "-m",
            "year",
            "-y",
            "2023",
            "-f",
            "svg",
            "-o",
            out,
            "-q",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let stdout = stdout_of(&output);
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("4.5 total"));
    assert!(lines.next().is_some_and(|l| l.ends_with("series.svg")));

    let svg = std::fs::read_to_string(temp_dir.path().join("series.svg")).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn test_render_github_png() {
    let temp_dir = TempDir::new().unwrap();
    let input = common::write_github_json(
        temp_dir.path(),
        &[
            ("2024-01-01", 0),
            ("2024-01-02", 5),
            ("2024-01-03", 2),
            ("2024-03-14", 1),
        ],
    );
    let out = temp_dir.path().to_str().unwrap();

    let output = run_isolated(
        &temp_dir,
        &["github", "-i", input.to_str().unwrap(), "-o", out, "-q"],
    );
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).starts_with("8 Contributions"));

    let png = temp_dir.path().join("github.png");
    assert_eq!(read_prefix(&png, 4), b"\x89PNG");
}

#[test]
fn test_render_reads_cache_after_import() {
    let temp_dir = TempDir::new().unwrap();
    let input = common::write_series_csv(temp_dir.path(), "steps", &sample_entries());
    let out = temp_dir.path().to_str().unwrap();
    let year_args = ["-m", "year", "-y", "2023", "-f", "svg", "-o", out, "-q"];

    let mut import = vec!["series", "-i", input.to_str().unwrap()];
    import.extend_from_slice(&year_args);
    assert!(run_isolated(&temp_dir, &import).status.success());
    assert!(temp_dir.path().join("data/cache/series.json").exists());

    let mut cached = vec!["series"];
    cached.extend_from_slice(&year_args);
    let output = run_isolated(&temp_dir, &cached);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).starts_with("4.5 total"));
}

#[test]
fn test_bbdc_views_share_one_import() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("bbdc.json");
    let raw = serde_json::json!({"id": "42", "utils": {
        "2023-04-01": {"time": 30, "learn": 20, "review": 15},
        "2023-04-02": {"time": 90, "learn": 5},
    }});
    std::fs::write(&input, raw.to_string()).unwrap();
    let out = temp_dir.path().to_str().unwrap();
    let year_args = ["-m", "year", "-y", "2023", "-f", "svg", "-o", out, "-q"];

    let mut import = vec!["bbdc-time", "-i", input.to_str().unwrap()];
    import.extend_from_slice(&year_args);
    let output = run_isolated(&temp_dir, &import);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).starts_with("Average: 1 h 0 min"));
    assert!(temp_dir.path().join("data/cache/bbdc.json").exists());

    let mut words = vec!["bbdc-word"];
    words.extend_from_slice(&year_args);
    let output = run_isolated(&temp_dir, &words);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).starts_with("40 Words"));
}

#[test]
fn test_report_preview() {
    let temp_dir = TempDir::new().unwrap();
    let input = common::write_series_json(temp_dir.path(), "series", &sample_entries());
    let out = temp_dir.path().to_str().unwrap();

    let output = run_isolated(
        &temp_dir,
        &[
            "series",
            "-i",
            input.to_str().unwrap(),
            "-m",
            "year",
            "-y",
            "2023",
            "-f",
            "svg",
            "-o",
            out,
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Provider: Activity (series)"));
    assert!(stdout.contains("Range: 2023-01-01 .. 2023-12-31"));
    assert!(stdout.contains("53 weeks"));
    assert!(stdout.contains("Months: Jan@1.5"));
    assert!(stdout.contains('□'));
    assert!(stdout.contains('■'));
    assert!(stdout.contains('·'));
    assert!(stdout.contains("Summary: 4.5 total"));
}

#[test]
fn test_palette_override() {
    let temp_dir = TempDir::new().unwrap();
    let input = common::write_series_json(temp_dir.path(), "series", &sample_entries());
    let out = temp_dir.path().to_str().unwrap();

    let output = run_isolated(
        &temp_dir,
        &[
            "series",
            "-i",
            input.to_str().unwrap(),
            "-m",
            "year",
            "-y",
            "2023",
            "-c",
            "teal",
            "-f",
            "svg",
            "-o",
            out,
            "-q",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
}

// =============================================================================
// Failure modes
// =============================================================================

#[test]
fn test_degenerate_data_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = common::write_series_json(
        temp_dir.path(),
        "flat",
        &[("2023-01-05", 2.0), ("2023-01-06", 2.0)],
    );
    let out = temp_dir.path().to_str().unwrap();

    let output = run_isolated(
        &temp_dir,
        &[
            "series",
            "-i",
            input.to_str().unwrap(),
            "-m",
            "year",
            "-y",
            "2023",
            "-o",
            out,
        ],
    );
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("No data to render"));
    assert!(!temp_dir.path().join("series.png").exists());
}

#[test]
fn test_missing_cache_fails() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().to_str().unwrap();
    let output = run_isolated(&temp_dir, &["github", "-o", out]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("No cached data for github"));
}

#[test]
fn test_year_validation() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_isolated(&temp_dir, &["github", "-m", "year"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("requires a year"));

    let output = run_isolated(&temp_dir, &["github", "-y", "2023"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("only be used with --mode year"));

    let output = run_isolated(&temp_dir, &["github", "-m", "year", "-y", "1999"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("1999 is not a valid year"));

    let output = run_isolated(&temp_dir, &["github", "-m", "year", "-y", "2025"]);
    assert!(!output.status.success());
}

#[test]
fn test_invalid_arguments() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_isolated(&temp_dir, &["myspace"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Unknown provider: myspace"));

    let output = run_isolated(&temp_dir, &["github", "-c", "plaid"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("plaid is not a valid color"));

    let output = run_isolated(&temp_dir, &["github", "-f", "gif"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("not a supported file type"));

    let output = run_isolated(&temp_dir, &["--today", "yesterday", "github"]);
    assert!(!output.status.success());

    let output = run_isolated(&temp_dir, &["-m", "decade", "github"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("not a valid mode"));
}

#[test]
fn test_action_required() {
    let output = run_yearmap(&["--no-color"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("exactly one of"));

    let output = run_yearmap(&["github", "--list"]);
    assert!(!output.status.success());
}

#[test]
fn test_missing_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope");
    let output = run_isolated(&temp_dir, &["github", "-o", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Directory does not exist"));
}

// =============================================================================
// Batch mode
// =============================================================================

#[test]
fn test_batch_config_renders_every_provider() {
    let temp_dir = TempDir::new().unwrap();
    common::write_series_csv(temp_dir.path(), "series", &sample_entries());
    common::write_github_json(temp_dir.path(), &[("2023-05-01", 0), ("2023-05-02", 3)]);
    std::fs::create_dir(temp_dir.path().join("out")).unwrap();
    let config = common::write_config(
        temp_dir.path(),
        r#"
mode = "year"
year = 2023
format = "svg"
output-dir = "out"

[providers.series]
input = "series.csv"

[providers.github]
input = "github.json"

[providers.github.global]
color = "green"
"#,
    );

    let output = run_isolated(&temp_dir, &["--config", config.to_str().unwrap(), "-q"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(temp_dir.path().join("out/series.svg").exists());
    assert!(temp_dir.path().join("out/github.svg").exists());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("3 Contributions"));
    assert!(stdout.contains("4.5 total"));
}

#[test]
fn test_batch_continues_past_failures() {
    let temp_dir = TempDir::new().unwrap();
    common::write_series_json(temp_dir.path(), "series", &sample_entries());
    let config = common::write_config(
        temp_dir.path(),
        r#"
mode = "year"
year = 2023
format = "svg"
output-dir = "."

[providers.github]

[providers.series]
input = "series.json"
"#,
    );

    let output = run_isolated(&temp_dir, &["--config", config.to_str().unwrap(), "-q"]);
    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("github: No cached data"));
    assert!(stderr.contains("1 of 2 providers failed"));
    assert!(temp_dir.path().join("series.svg").exists());
}

#[test]
fn test_batch_config_rejected_before_running() {
    let temp_dir = TempDir::new().unwrap();
    common::write_series_json(temp_dir.path(), "series", &sample_entries());

    let unknown_key = common::write_config(
        temp_dir.path(),
        "[providers.series]\ninput = \"series.json\"\n[providers.series.global]\nwidth = 3\n",
    );
    let output = run_isolated(&temp_dir, &["--config", unknown_key.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Invalid config file"));

    let bad_year = common::write_config(
        temp_dir.path(),
        "mode = \"year\"\nyear = 1980\n[providers.series]\ninput = \"series.json\"\n",
    );
    let output = run_isolated(&temp_dir, &["--config", bad_year.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("1980 is not a valid year"));
    assert!(!temp_dir.path().join("series.png").exists());
}
