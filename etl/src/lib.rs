//! # Shelter ETL - Animal shelter outcomes star schema loader
//!
//! Fetches the Austin Animal Center outcomes CSV, reshapes it into a star
//! schema and replaces the corresponding tables in a PostgreSQL warehouse.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV (HTTP) │────▶│   Extract   │────▶│  Transform  │────▶│    Load     │
//! │  or file    │     │  (auto-enc) │     │ (surrogates)│     │ (Postgres)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                                                ADOPTION + ANIMAL, OUTCOME,
//!                                                BREED, DATE
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shelter_etl::{pipeline, MemoryWarehouse, PipelineOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut warehouse = MemoryWarehouse::new();
//!     let summary = pipeline::run(&PipelineOptions::default(), &mut warehouse).await.unwrap();
//!     println!("{} outcomes", summary.tables.adoption);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Per-stage error types
//! - [`config`] - Warehouse configuration from the environment
//! - [`logs`] - Progress logging
//! - [`models`] - Star schema rows
//! - [`parser`] - CSV parsing with auto-detection
//! - [`extract`] - Source fetching
//! - [`transform`] - Surrogate keys and the star schema
//! - [`load`] - Warehouse seam, PostgreSQL and in-memory stores
//! - [`export`] - CSV export of the output tables
//! - [`pipeline`] - End-to-end orchestration

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Stages
pub mod extract;
pub mod load;
pub mod parser;
pub mod transform;

// Orchestration
pub mod export;
pub mod pipeline;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{ConfigError, ExtractError, LoadError, PipelineError, TransformError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    AdoptionFact, AnimalDim, BreedDim, DateDim, OutcomeDim, StarSchema, SurrogateKey, TableCounts,
};

// =============================================================================
// Re-exports - Stages
// =============================================================================

pub use config::{WarehouseConfig, DEFAULT_PORT, DEFAULT_SOURCE_URL};
pub use extract::{extract, Source};
pub use load::{load, star_tables, Cell, ColumnDef, ColumnType, MemoryWarehouse, PgWarehouse, Table, Warehouse};
pub use parser::{parse_bytes_auto, parse_str, RawTable, SourceInfo};
pub use transform::{build_star_schema, parse_timestamp, transform, Dimension};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{PipelineOptions, PipelineSummary};
