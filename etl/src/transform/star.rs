//! Reshape the raw outcomes table into the ADOPTION star schema.
//!
//! # Architecture
//!
//! ```text
//! Raw rows                                    ADOPTION (fact)
//! ┌────────────────────────────────┐          ┌──────────────────────────────┐
//! │ A1 Rex  Adoption Dog  Labrador │          │ A1 Rex date=1 out=1 ani=1 .. │
//! │ A2 Bo   Transfer Cat  Siamese  │   →      │ A2 Bo  date=2 out=2 ani=2 .. │
//! │ A3 Zed  Transfer Dog  Labrador │          │ A3 Zed date=3 out=2 ani=1 .. │
//! └────────────────────────────────┘          └──────────────────────────────┘
//!                                             + OUTCOME, ANIMAL, BREED, DATE
//! ```

use super::dates::DateDimension;
use super::dimension::Dimension;
use crate::error::{TransformError, TransformResult};
use crate::models::{AdoptionFact, AnimalDim, BreedDim, OutcomeDim, StarSchema};
use crate::parser::RawTable;

pub const COL_ANIMAL_ID: &str = "Animal ID";
pub const COL_NAME: &str = "Name";
pub const COL_DATETIME: &str = "DateTime";
pub const COL_OUTCOME_TYPE: &str = "Outcome Type";
pub const COL_ANIMAL_TYPE: &str = "Animal Type";
pub const COL_SEX: &str = "Sex upon Outcome";
pub const COL_BREED: &str = "Breed";
pub const COL_COLOR: &str = "Color";

/// Sex status that carries no information and becomes NULL.
pub const UNKNOWN_SEX: &str = "Unknown";

/// Positions of the source columns the transform reads.
#[derive(Debug, Clone, Copy)]
struct SourceColumns {
    id: usize,
    name: usize,
    datetime: usize,
    outcome: usize,
    animal: usize,
    sex: usize,
    breed: usize,
    color: usize,
}

impl SourceColumns {
    fn resolve(table: &RawTable) -> TransformResult<Self> {
        let find = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| TransformError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            id: find(COL_ANIMAL_ID)?,
            name: find(COL_NAME)?,
            datetime: find(COL_DATETIME)?,
            outcome: find(COL_OUTCOME_TYPE)?,
            animal: find(COL_ANIMAL_TYPE)?,
            sex: find(COL_SEX)?,
            breed: find(COL_BREED)?,
            color: find(COL_COLOR)?,
        })
    }
}

/// Map the "Unknown" sentinel to NULL; everything else passes through.
pub fn normalize_sex(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| *s != UNKNOWN_SEX).map(String::from)
}

/// Build the fact table and its four dimensions.
///
/// Each categorical value is interned into its dimension as rows are read
/// and the resulting key is written directly into the fact row, so the
/// fact table has exactly one row per source row.
pub fn build_star_schema(table: &RawTable) -> TransformResult<StarSchema> {
    let cols = SourceColumns::resolve(table)?;

    let mut outcomes: Dimension<Option<String>> = Dimension::new();
    let mut animals: Dimension<Option<String>> = Dimension::new();
    let mut breeds: Dimension<Option<String>> = Dimension::new();
    let mut dates = DateDimension::new();
    let mut adoption = Vec::with_capacity(table.len());

    for (idx, row) in table.rows.iter().enumerate() {
        let cell = |i: usize| row.get(i).cloned().flatten();

        adoption.push(AdoptionFact {
            recorded_name: cell(cols.name),
            date_id: dates.intern(cell(cols.datetime), idx + 1)?,
            outcome_id: outcomes.intern(cell(cols.outcome)),
            animal_id: animals.intern(cell(cols.animal)),
            sex: normalize_sex(row.get(cols.sex).and_then(|c| c.as_deref())),
            breed_id: breeds.intern(cell(cols.breed)),
            color: cell(cols.color),
            id: cell(cols.id),
        });
    }

    Ok(StarSchema {
        adoption,
        animal: animals
            .into_entries()
            .into_iter()
            .map(|(animal_id, animal)| AnimalDim { animal, animal_id })
            .collect(),
        date: dates.into_rows(),
        outcome: outcomes
            .into_entries()
            .into_iter()
            .map(|(outcome_id, outcome)| OutcomeDim { outcome, outcome_id })
            .collect(),
        breed: breeds
            .into_entries()
            .into_iter()
            .map(|(breed_id, breed)| BreedDim { breed, breed_id })
            .collect(),
    })
}
