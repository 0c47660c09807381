//! Transformation module.
//!
//! This module reshapes the raw outcomes table into a star schema:
//! - Dimension: surrogate key interning
//! - Dates: timestamp parsing and the DATE dimension
//! - Star: fact table construction

pub mod dates;
pub mod dimension;
pub mod star;

pub use dates::{parse_timestamp, DateDimension};
pub use dimension::Dimension;
pub use star::{build_star_schema, normalize_sex, UNKNOWN_SEX};

use crate::error::TransformResult;
use crate::logs::{log_info, log_success, log_warning};
use crate::models::StarSchema;
use crate::parser::RawTable;

/// Transform stage with progress logging.
pub fn transform(table: &RawTable) -> TransformResult<StarSchema> {
    log_info("🔄 Building star schema...");
    let schema = build_star_schema(table)?;

    let counts = schema.counts();
    log_success(format!("{} fact rows", counts.adoption));
    log_success(format!(
        "{} outcomes, {} animal types, {} breeds, {} dates",
        counts.outcome, counts.animal, counts.breed, counts.date
    ));

    let unknown_sex = schema.adoption.iter().filter(|f| f.sex.is_none()).count();
    if unknown_sex > 0 {
        log_info(format!("{} rows with unknown sex stored as NULL", unknown_sex));
    }
    if schema.date.iter().any(|d| d.dt.is_none()) {
        log_warning("Some rows have no timestamp; they share one DATE row with NULL values");
    }

    Ok(schema)
}
