use crate::calendar::{CellColor, DAYS_PER_WEEK, DateRange, Heatmap};
use crate::palette::{self, Palette};
use crate::provider::Provider;
use colored::*;

const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn style_label(label: &str) -> ColoredString {
    label.bold()
}

pub(crate) fn print_error(msg: &str) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub(crate) fn print_info(msg: &str) {
    eprintln!("{}: {}", "info".cyan().bold(), msg);
}

pub(crate) fn print_debug(msg: &str) {
    eprintln!("{}: {}", "debug".dimmed(), msg);
}

pub(crate) fn format_range(range: &DateRange) -> String {
    format!("{} .. {}", range.start, range.end)
}

pub(crate) fn print_header(provider: &Provider, heatmap: &Heatmap) {
    println!("{} {} ({})", style_label("Provider:"), provider.name, provider.id);
    let unit = provider.unit_label();
    if !unit.is_empty() {
        println!("{} {}", style_label("Unit:"), unit);
    }
    println!("{} {}", style_label("Range:"), format_range(&heatmap.range));
    println!(
        "{} {} .. {} ({} weeks)",
        style_label("Graph:"),
        heatmap.graph.start,
        heatmap.graph.end,
        heatmap.graph.weeks
    );
    let bounds = heatmap.bounds();
    println!(
        "{} {} .. {}",
        style_label("Values:"),
        provider.label(bounds.min),
        provider.label(bounds.max)
    );
    println!();
}

pub(crate) fn print_markers(heatmap: &Heatmap) {
    let months = heatmap
        .months
        .iter()
        .map(|m| format!("{}@{}", m.abbr(), m.position))
        .collect::<Vec<_>>()
        .join(" ");
    println!("{} {}", style_label("Months:"), months);
    println!(
        "{} {} (week {})",
        style_label("Year:"),
        heatmap.year.year,
        heatmap.year.week
    );
    println!();
}

/// Terminal glyph of a cell class
pub(crate) fn cell_glyph(cell: CellColor) -> char {
    match cell {
        CellColor::Blank => ' ',
        CellColor::Zero => '□',
        CellColor::NoData => '·',
        CellColor::Scale(_) => '■',
    }
}

/// Month abbreviations aligned to week columns
pub(crate) fn month_line(heatmap: &Heatmap) -> String {
    let mut line = vec![' '; heatmap.graph.weeks];
    for marker in &heatmap.months {
        for (offset, ch) in marker.abbr().chars().enumerate() {
            if let Some(slot) = line.get_mut(marker.week() + offset) {
                *slot = ch;
            }
        }
    }
    line.into_iter().collect::<String>().trim_end().to_string()
}

fn paint(glyph: char, color: Option<&str>) -> ColoredString {
    let text = glyph.to_string();
    match color.and_then(palette::hex_to_rgb) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

/// Seven-row block preview of the heat map
pub(crate) fn print_preview(heatmap: &Heatmap) {
    let colors = &heatmap.colors;
    let weeks = heatmap.graph.weeks;

    println!("    {}", month_line(heatmap));
    for (row, name) in WEEKDAY_NAMES.iter().enumerate() {
        print!("{} ", name);
        for col in 0..weeks {
            let cell = colors.cell(row * weeks + col);
            print!("{}", paint(cell_glyph(cell), colors.color_of(cell)));
        }
        println!();
    }
    println!();
}

pub(crate) fn print_summary(summary: &str, output_path: &str, quiet: bool) {
    if quiet {
        println!("{}", summary);
        println!("{}", output_path);
    } else {
        println!("{} {}", style_label("Summary:"), summary);
        println!("{} {}", style_label("Saved:"), output_path);
    }
}

fn print_swatch(palette: &Palette) {
    for color in palette.colors {
        print!("{}", paint('■', Some(*color)));
    }
}

pub(crate) fn print_listing(providers: &[Provider], palettes: &[&'static Palette]) {
    println!("{}", style_label("Providers:"));
    for provider in providers {
        println!(
            "  {:<14} {:<10} palette: {}",
            provider.id, provider.name, provider.palette.name
        );
    }
    println!();
    println!("{}", style_label("Palettes:"));
    for palette in palettes {
        print!("  {:<8} ", palette.name);
        print_swatch(palette);
        println!();
    }
}
