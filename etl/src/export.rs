//! CSV export of the star schema, one file per table.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::PipelineResult;
use crate::logs::log_success;
use crate::models::{
    StarSchema, ADOPTION_TABLE, ANIMAL_TABLE, BREED_TABLE, DATE_TABLE, OUTCOME_TABLE,
};

/// Write `<TABLE>.csv` for each of the five tables into `dir`.
///
/// Returns the written paths in load order.
pub fn export_csv(dir: &Path, schema: &StarSchema) -> PipelineResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let paths = vec![
        write_rows(dir, ADOPTION_TABLE, &schema.adoption)?,
        write_rows(dir, ANIMAL_TABLE, &schema.animal)?,
        write_rows(dir, DATE_TABLE, &schema.date)?,
        write_rows(dir, OUTCOME_TABLE, &schema.outcome)?,
        write_rows(dir, BREED_TABLE, &schema.breed)?,
    ];

    log_success(format!("Exported {} tables to {}", paths.len(), dir.display()));
    Ok(paths)
}

fn write_rows<T: Serialize>(dir: &Path, table: &str, rows: &[T]) -> Result<PathBuf, csv::Error> {
    let path = dir.join(format!("{}.csv", table));
    let mut writer = csv::Writer::from_path(&path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(path)
}
