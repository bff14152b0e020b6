mod cache;
mod calendar;
mod chart;
mod config;
mod mode;
mod output;
mod palette;
mod provider;

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::Parser;

use config::{BatchFile, OutputFormat, RenderConfig, RenderTask};
use mode::{run_batch, run_list, run_render};
use output::print_error;

#[derive(Parser)]
#[command(
    name = "yearmap",
    version,
    about = "Calendar heat maps of daily activity (GitHub, Codeforces, Bilibili, BBDC, MiFit, plain series)",
    after_help = "Examples:
  yearmap github -i github.json                        Import and render the trailing year
  yearmap github -m year -y 2023                       Render 2023 from the cache
  yearmap series -i steps.csv -c teal -f svg           Plain date,value series as SVG
  yearmap --config yearmap.toml                        Render every provider in a batch file
  yearmap --list                                       Show providers and palettes"
)]
struct Args {
    /// Provider id (see --list)
    provider: Option<String>,

    /// Raw provider data to import (JSON; CSV for the series provider)
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Time window: year or till-now
    #[arg(short, long, default_value = "till-now", value_name = "MODE")]
    mode: String,

    /// Year to render (with --mode year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Palette override (see --list)
    #[arg(short, long, value_name = "PALETTE")]
    color: Option<String>,

    /// Image format: png or svg
    #[arg(short, long, default_value = "png", value_name = "FORMAT")]
    format: String,

    /// Output directory
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    output: PathBuf,

    /// Data directory holding the cache [default: ~/.yearmaps]
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// TOML batch file; renders every configured provider
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Pin today's date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    today: Option<String>,

    /// List providers and palettes
    #[arg(long)]
    list: bool,

    /// Suppress explanations (show data only)
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Print debug diagnostics
    #[arg(long)]
    debug: bool,
}

fn fail(msg: &str) -> ! {
    print_error(msg);
    std::process::exit(1);
}

fn check_output_dir(dir: &Path) {
    if !dir.is_dir() {
        fail(&format!("Directory does not exist: {}", dir.display()));
    }
}

fn main() {
    let args = Args::parse();

    // Handle --no-color
    if args.no_color {
        colored::control::set_override(false);
    }

    // Exactly one action
    let actions = [args.provider.is_some(), args.config.is_some(), args.list]
        .iter()
        .filter(|a| **a)
        .count();
    if actions != 1 {
        fail("Specify exactly one of PROVIDER, --config or --list");
    }

    if args.list {
        run_list();
        return;
    }

    let today = match args.today.as_deref() {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .unwrap_or_else(|e| fail(&format!("Invalid --today {}: {}", text, e))),
        None => Local::now().date_naive(),
    };

    let mode = config::resolve_mode(&args.mode, args.year, today)
        .unwrap_or_else(|e| fail(&e.to_string()));

    let palette = args
        .color
        .as_deref()
        .map(config::lookup_palette)
        .transpose()
        .unwrap_or_else(|e| {
            fail(&format!(
                "{} (available: {})",
                e,
                palette::palette_names().join(", ")
            ))
        });

    let format: OutputFormat = args
        .format
        .parse()
        .unwrap_or_else(|e: config::ConfigError| fail(&e.to_string()));

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => cache::default_data_dir().unwrap_or_else(|e| fail(&e.to_string())),
    };

    let base = RenderConfig {
        mode,
        palette,
        format,
        output_dir: args.output,
        data_dir,
        today,
        quiet: args.quiet,
        debug: args.debug,
    };

    // Batch mode: validate every task before running any
    if let Some(path) = args.config {
        if args.input.is_some() {
            fail("--input cannot be used with --config");
        }
        let base_dir = path.parent().unwrap_or(Path::new("."));
        let tasks = BatchFile::load(&path)
            .and_then(|batch| batch.tasks(&base, base_dir))
            .unwrap_or_else(|e| fail(&e.to_string()));
        for task in &tasks {
            check_output_dir(&task.config.output_dir);
        }
        run_batch(&tasks);
        return;
    }

    let Some(id) = args.provider else {
        fail("No provider given");
    };
    let provider = provider::find_provider(&id).unwrap_or_else(|e| {
        fail(&format!(
            "{} (available: {})",
            e,
            provider::provider_ids().join(", ")
        ))
    });
    check_output_dir(&base.output_dir);

    run_render(&RenderTask {
        provider,
        config: base,
        input: args.input,
    });
}
