//! Run pipeline with explicit stages.
//!
//! 1. **Ingest**: read `buildings.csv` and `original_data.csv`, clean into long records
//! 2. **Transform**: pivot each variant, merge verification levels, split by version
//! 3. **Output**: clear the output directory and write one CSV per variant
//!
//! Each stage takes the output of the previous one and returns typed results.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span};

use leed_ingest::{
    BuildingIndex, CleanOptions, MalformedRowPolicy, SkippedRow, clean_leed_data, load_buildings,
    read_csv_table,
};
use leed_model::{BUILDING_NAME_COLUMN, LongRecord, OutputVariant, VerificationLookup};
use leed_output::{clear_output_dir, write_variant};
use leed_transform::{
    ColumnNaming, PivotOptions, ScoreFormat, WideFrame, distinct_versions, filter_by_version,
    merge_verification_levels, to_wide,
};

use crate::config::resolve_lookup;
use crate::types::{RunResult, VariantSummary};

/// Raw scorecard export inside the data folder.
pub const DATA_FILE: &str = "original_data.csv";
/// Building reference table inside the data folder.
pub const BUILDINGS_FILE: &str = "buildings.csv";
/// Output folder created inside the data folder when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "final_wide_data";

/// Column naming and cell format of the written tables.
///
/// `None` keeps each variant's own default: category codes with earned
/// points for the categories-only tables, category and credit names for the
/// full table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableLayout {
    /// Naming for the categories-only and per-version tables.
    pub column_naming: Option<ColumnNaming>,
    /// Cell format for every table.
    pub score_format: Option<ScoreFormat>,
}

impl TableLayout {
    fn pivot_options(&self, variant: &OutputVariant) -> PivotOptions {
        let mut options = PivotOptions::for_variant(variant);
        if let Some(naming) = self.column_naming
            && variant.categories_only()
        {
            options = options.with_column_naming(naming);
        }
        if let Some(format) = self.score_format {
            options = options.with_score_format(format);
        }
        options
    }
}

/// Options for a full pipeline run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub data_dir: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub layout: TableLayout,
    pub strict: bool,
    pub dry_run: bool,
}

impl RunOptions {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            output_dir: None,
            config: None,
            layout: TableLayout::default(),
            strict: false,
            dry_run: false,
        }
    }

    /// Effective output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DEFAULT_OUTPUT_DIR))
    }

    fn clean_options(&self) -> CleanOptions {
        let policy = if self.strict {
            MalformedRowPolicy::Fail
        } else {
            MalformedRowPolicy::Skip
        };
        CleanOptions::default().with_malformed_rows(policy)
    }
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Result of the ingest stage.
#[derive(Debug)]
pub struct IngestResult {
    pub records: Vec<LongRecord>,
    pub skipped: Vec<SkippedRow>,
    /// Files read, in reading order.
    pub source_files: Vec<PathBuf>,
}

/// Reads and cleans the data folder.
///
/// `buildings.csv` is optional as long as the export carries its own
/// `building_name` column.
pub fn ingest(data_dir: &Path, options: &CleanOptions) -> Result<IngestResult> {
    let buildings_path = data_dir.join(BUILDINGS_FILE);
    let data_path = data_dir.join(DATA_FILE);
    let mut source_files = Vec::new();

    let buildings: Option<BuildingIndex> = if buildings_path.is_file() {
        let index = load_buildings(&buildings_path)
            .with_context(|| format!("load {}", buildings_path.display()))?;
        source_files.push(buildings_path);
        Some(index)
    } else {
        debug!(path = %buildings_path.display(), "no building reference table");
        None
    };

    let (df, headers) =
        read_csv_table(&data_path).with_context(|| format!("read {}", data_path.display()))?;
    if buildings.is_none() && headers.find(BUILDING_NAME_COLUMN).is_none() {
        bail!(
            "{} has no {BUILDING_NAME_COLUMN} column and {BUILDINGS_FILE} was not found in {}",
            data_path.display(),
            data_dir.display()
        );
    }
    source_files.push(data_path);

    let cleaned = clean_leed_data(&df, buildings.as_ref(), options).context("clean source data")?;

    Ok(IngestResult {
        records: cleaned.records,
        skipped: cleaned.skipped,
        source_files,
    })
}

// ============================================================================
// Stage 2: Transform
// ============================================================================

/// Result of the transform stage.
#[derive(Debug)]
pub struct TransformResult {
    /// Categories-only, full, then one frame per version in ascending order.
    pub frames: Vec<WideFrame>,
    /// Buildings with no lookup entry, sorted.
    pub missing_levels: Vec<String>,
    /// Lookup entries matching no building.
    pub unmatched_levels: Vec<String>,
    /// Overwritten duplicate cells across the pivots.
    pub duplicates: usize,
}

/// Pivots every variant and merges verification levels.
pub fn transform(
    ingest: &IngestResult,
    lookup: &VerificationLookup,
    layout: &TableLayout,
) -> Result<TransformResult> {
    let mut frames = Vec::new();
    let mut missing = BTreeSet::new();
    let mut unmatched_levels = Vec::new();
    let mut duplicates = 0usize;

    for variant in [OutputVariant::CategoriesOnly, OutputVariant::Full] {
        let options = layout.pivot_options(&variant);
        let pivoted = to_wide(&ingest.records, &options)
            .with_context(|| format!("pivot {variant} table"))?;
        duplicates += pivoted.summary.duplicates;

        let merged = merge_verification_levels(&pivoted.data, lookup)
            .with_context(|| format!("merge verification levels into {variant} table"))?;
        missing.extend(merged.missing);
        if variant == OutputVariant::Full {
            unmatched_levels = merged.unmatched_keys;
        }

        frames.push(WideFrame::new(variant, merged.data));
    }

    let version_frames = split_by_version(&frames[0])?;
    frames.extend(version_frames);

    let missing_levels: Vec<String> = missing.into_iter().collect();
    for building in &missing_levels {
        debug!(building = %building, "no verification level for building");
    }
    for building in &unmatched_levels {
        debug!(building = %building, "verification level entry matches no building");
    }

    Ok(TransformResult {
        frames,
        missing_levels,
        unmatched_levels,
        duplicates,
    })
}

/// One `Version` frame per distinct version in the categories-only frame.
fn split_by_version(categories: &WideFrame) -> Result<Vec<WideFrame>> {
    let mut frames = Vec::new();
    for version in distinct_versions(&categories.data).context("list LEED versions")? {
        let data = filter_by_version(&categories.data, &version)
            .with_context(|| format!("filter LEED version {version}"))?;
        frames.push(WideFrame::new(OutputVariant::Version(version), data));
    }
    Ok(frames)
}

// ============================================================================
// Stage 3: Output
// ============================================================================

/// Fails when clearing `output_dir` would delete `data_dir` or its inputs.
///
/// A directory that does not exist yet cannot contain the data folder.
pub fn check_output_dir(data_dir: &Path, output_dir: &Path) -> Result<()> {
    if !output_dir.exists() || !data_dir.exists() {
        return Ok(());
    }
    let data = fs::canonicalize(data_dir)
        .with_context(|| format!("resolve data folder {}", data_dir.display()))?;
    let output = fs::canonicalize(output_dir)
        .with_context(|| format!("resolve output directory {}", output_dir.display()))?;
    if data.starts_with(&output) {
        bail!(
            "output directory {} contains the data folder {}; it is cleared on every run, \
             choose a directory outside the data folder",
            output_dir.display(),
            data_dir.display()
        );
    }
    Ok(())
}

/// Clears `output_dir` and writes every frame, returning the written paths.
pub fn output(output_dir: &Path, frames: &[WideFrame]) -> Result<Vec<PathBuf>> {
    clear_output_dir(output_dir)
        .with_context(|| format!("prepare output directory {}", output_dir.display()))?;
    let mut paths = Vec::with_capacity(frames.len());
    for frame in frames {
        let path = write_variant(output_dir, frame)
            .with_context(|| format!("write {} table", frame.variant))?;
        paths.push(path);
    }
    Ok(paths)
}

// ============================================================================
// Full run
// ============================================================================

/// Runs ingest, transform and (unless dry-running) output.
pub fn run_pipeline(options: &RunOptions) -> Result<RunResult> {
    let data_dir = &options.data_dir;
    let output_dir = options.output_dir();
    let run_span = info_span!("run", data_dir = %data_dir.display());
    let _run_guard = run_span.enter();

    if !options.dry_run {
        check_output_dir(data_dir, &output_dir)?;
    }

    let lookup = resolve_lookup(options.config.as_deref()).context("load verification levels")?;

    let ingest_span = info_span!("ingest", data_dir = %data_dir.display());
    let ingest_start = Instant::now();
    let ingested = ingest_span.in_scope(|| ingest(data_dir, &options.clean_options()))?;
    info!(
        records = ingested.records.len(),
        skipped = ingested.skipped.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let transform_span = info_span!("transform", buildings = lookup.len());
    let transform_start = Instant::now();
    let transformed = transform_span.in_scope(|| transform(&ingested, &lookup, &options.layout))?;
    info!(
        variants = transformed.frames.len(),
        missing_levels = transformed.missing_levels.len(),
        duration_ms = transform_start.elapsed().as_millis(),
        "transform complete"
    );

    let paths: Vec<Option<PathBuf>> = if options.dry_run {
        info!(output_dir = %output_dir.display(), "dry run, output directory untouched");
        vec![None; transformed.frames.len()]
    } else {
        let output_span = info_span!("output", output_dir = %output_dir.display());
        let output_start = Instant::now();
        let written = output_span.in_scope(|| output(&output_dir, &transformed.frames))?;
        info!(
            files = written.len(),
            duration_ms = output_start.elapsed().as_millis(),
            "output complete"
        );
        written.into_iter().map(Some).collect()
    };

    let variants = transformed
        .frames
        .iter()
        .zip(paths)
        .map(|(frame, path)| VariantSummary {
            variant: frame.variant.clone(),
            rows: frame.record_count(),
            columns: frame.column_count(),
            path,
        })
        .collect();

    Ok(RunResult {
        data_dir: data_dir.clone(),
        output_dir,
        source_files: ingested.source_files,
        variants,
        skipped_rows: ingested.skipped,
        missing_levels: transformed.missing_levels,
        unmatched_levels: transformed.unmatched_levels,
        duplicates: transformed.duplicates,
        dry_run: options.dry_run,
    })
}
