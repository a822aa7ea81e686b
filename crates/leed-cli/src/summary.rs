use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use leed_cli::pipeline::BUILDINGS_FILE;
use leed_cli::types::{RunResult, VariantSummary};

/// Number of names listed before a warning is abbreviated.
const MAX_LISTED: usize = 10;

pub fn print_summary(result: &RunResult) {
    println!("Data: {}", result.data_dir.display());
    if result.dry_run {
        println!("Output: {} (dry run, nothing written)", result.output_dir.display());
    } else {
        println!("Output: {}", result.output_dir.display());
    }
    let sources: Vec<String> = result
        .source_files
        .iter()
        .map(|path| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        })
        .collect();
    println!("Sources: {}", sources.join(", "));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Variant"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("File"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for summary in &result.variants {
        table.add_row(vec![
            Cell::new(summary.variant.label()).add_attribute(Attribute::Bold),
            Cell::new(summary.rows),
            Cell::new(summary.columns),
            file_cell(summary),
        ]);
    }
    println!("{table}");

    print_warnings(result);
}

fn print_warnings(result: &RunResult) {
    if !result.skipped_rows.is_empty() {
        eprintln!(
            "warning: skipped {} malformed row(s) in the source data:",
            result.skipped_rows.len()
        );
        for row in result.skipped_rows.iter().take(MAX_LISTED) {
            eprintln!("  - row {}: {}", row.row, row.reason);
        }
        print_remainder(result.skipped_rows.len());
        eprintln!("  hint: rerun with --strict to stop at the first malformed row");
    }

    if result.duplicates > 0 {
        eprintln!(
            "warning: {} duplicate building/column record(s); the last value was kept",
            result.duplicates
        );
    }

    if !result.missing_levels.is_empty() {
        eprintln!(
            "warning: {} building(s) have no verification level:",
            result.missing_levels.len()
        );
        print_names(&result.missing_levels);
        eprintln!(
            "  hint: add them under [verification_levels] in a config file \
             (`leedwide init-config leedwide.toml` writes the built-in table) \
             and pass it with --config"
        );
        eprintln!(
            "  hint: names must match building_name exactly; check {BUILDINGS_FILE} for spelling"
        );
    }

    if !result.unmatched_levels.is_empty() {
        eprintln!(
            "warning: {} verification level entr(ies) match no building:",
            result.unmatched_levels.len()
        );
        print_names(&result.unmatched_levels);
        eprintln!("  hint: remove stale entries or fix their spelling in the config file");
    }
}

fn print_names(names: &[String]) {
    for name in names.iter().take(MAX_LISTED) {
        eprintln!("  - {name}");
    }
    print_remainder(names.len());
}

fn print_remainder(total: usize) {
    if total > MAX_LISTED {
        eprintln!("  ... and {} more", total - MAX_LISTED);
    }
}

fn file_cell(summary: &VariantSummary) -> Cell {
    match &summary.path {
        Some(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Cell::new(name).fg(Color::Green)
        }
        None => dim_cell(summary.variant.file_name()),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
