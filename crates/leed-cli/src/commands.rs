use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info;

use leed_cli::config::{LeedConfig, resolve_lookup};
use leed_cli::pipeline::{RunOptions, TableLayout, run_pipeline};
use leed_cli::types::RunResult;

use crate::cli::{InitConfigArgs, LevelsArgs, RunArgs};
use crate::summary::{apply_table_style, header_cell};

pub fn run(args: &RunArgs) -> Result<RunResult> {
    let options = RunOptions {
        data_dir: args.data_dir.clone(),
        output_dir: args.output_dir.clone(),
        config: args.config.clone(),
        layout: TableLayout {
            column_naming: args.column_naming.map(Into::into),
            score_format: args.score_format.map(Into::into),
        },
        strict: args.strict,
        dry_run: args.dry_run,
    };
    run_pipeline(&options)
}

pub fn run_levels(args: &LevelsArgs) -> Result<()> {
    let lookup = resolve_lookup(args.config.as_deref()).context("load verification levels")?;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Building"), header_cell("Level")]);
    apply_table_style(&mut table);
    for (building, level) in lookup.iter() {
        table.add_row(vec![building.to_string(), level.to_string()]);
    }
    println!("{table}");
    println!("{} building(s)", lookup.len());
    Ok(())
}

pub fn run_init_config(args: &InitConfigArgs) -> Result<()> {
    LeedConfig::builtin()
        .write(&args.path, args.force)
        .context("write config")?;
    info!(path = %args.path.display(), "config written");
    println!("Wrote {}", args.path.display());
    Ok(())
}
