//! High-level pipeline API: extract, transform, load.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelter_etl::{pipeline, PgWarehouse, PipelineOptions, WarehouseConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WarehouseConfig::from_env()?;
//!     let mut warehouse = PgWarehouse::connect(&config).await?;
//!     let summary = pipeline::run(&PipelineOptions::default(), &mut warehouse).await?;
//!
//!     println!("Loaded {} fact rows", summary.tables.adoption);
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use serde::Serialize;

use crate::config::DEFAULT_SOURCE_URL;
use crate::error::PipelineResult;
use crate::export::export_csv;
use crate::extract::{extract, Source};
use crate::load::{load, Warehouse};
use crate::logs::log_info;
use crate::models::{StarSchema, TableCounts};
use crate::parser::SourceInfo;
use crate::transform::transform;

/// Options for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub source: Source,
    /// Also write the five tables as CSV files here
    pub export_dir: Option<PathBuf>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            source: Source::Url(DEFAULT_SOURCE_URL.to_string()),
            export_dir: None,
        }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub source: String,
    pub source_info: SourceInfo,
    pub tables: TableCounts,
    /// Whether the warehouse was written
    pub loaded: bool,
    pub exported_to: Option<PathBuf>,
}

/// Extract and transform, then optionally export.
pub async fn prepare(options: &PipelineOptions) -> PipelineResult<(SourceInfo, StarSchema)> {
    let parsed = extract(&options.source).await?;
    let schema = transform(&parsed.table)?;

    if let Some(ref dir) = options.export_dir {
        export_csv(dir, &schema)?;
    }

    Ok((parsed.info, schema))
}

/// Full run: extract, transform, replace the five warehouse tables.
///
/// Any stage failure aborts the run. Tables replaced before a load
/// failure stay replaced.
pub async fn run<W: Warehouse>(
    options: &PipelineOptions,
    warehouse: &mut W,
) -> PipelineResult<PipelineSummary> {
    let (source_info, schema) = prepare(options).await?;
    load(warehouse, &schema).await?;
    Ok(summarize(options, source_info, &schema, true))
}

/// Extract and transform only; the warehouse is never touched.
pub async fn dry_run(options: &PipelineOptions) -> PipelineResult<PipelineSummary> {
    let (source_info, schema) = prepare(options).await?;
    log_info("Dry run: skipping warehouse load");
    Ok(summarize(options, source_info, &schema, false))
}

fn summarize(
    options: &PipelineOptions,
    source_info: SourceInfo,
    schema: &StarSchema,
    loaded: bool,
) -> PipelineSummary {
    PipelineSummary {
        source: options.source.to_string(),
        source_info,
        tables: schema.counts(),
        loaded,
        exported_to: options.export_dir.clone(),
    }
}
