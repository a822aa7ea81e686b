use std::path::PathBuf;

use leed_ingest::SkippedRow;
use leed_model::OutputVariant;

#[derive(Debug)]
pub struct RunResult {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Input files read, in reading order.
    pub source_files: Vec<PathBuf>,
    pub variants: Vec<VariantSummary>,
    pub skipped_rows: Vec<SkippedRow>,
    /// Buildings written without a verification level.
    pub missing_levels: Vec<String>,
    /// Lookup entries that matched no building.
    pub unmatched_levels: Vec<String>,
    pub duplicates: usize,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct VariantSummary {
    pub variant: OutputVariant,
    pub rows: usize,
    pub columns: usize,
    /// Written file; `None` on a dry run.
    pub path: Option<PathBuf>,
}
