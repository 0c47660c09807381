//! Star schema rows produced by the transform stage.
//!
//! - [`AdoptionFact`] - One row per shelter outcome event
//! - [`AnimalDim`], [`OutcomeDim`], [`BreedDim`] - Distinct categorical values
//! - [`DateDim`] - Distinct timestamps with derived month and year
//! - [`StarSchema`] - The five tables together
//!
//! Field names serialize to the warehouse column names.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Surrogate key, 1-based and dense within a dimension.
pub type SurrogateKey = i64;

// =============================================================================
// Table names
// =============================================================================

pub const ADOPTION_TABLE: &str = "ADOPTION";
pub const ANIMAL_TABLE: &str = "ANIMAL";
pub const OUTCOME_TABLE: &str = "OUTCOME";
pub const BREED_TABLE: &str = "BREED";
pub const DATE_TABLE: &str = "DATE";

// =============================================================================
// Fact
// =============================================================================

/// One shelter outcome event, with categorical columns replaced by keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdoptionFact {
    pub recorded_name: Option<String>,
    pub date_id: SurrogateKey,
    pub outcome_id: SurrogateKey,
    #[serde(rename = "Animal_id")]
    pub animal_id: SurrogateKey,
    /// `None` when the source said "Unknown" or was blank.
    #[serde(rename = "Sex")]
    pub sex: Option<String>,
    #[serde(rename = "Breed_id")]
    pub breed_id: SurrogateKey,
    #[serde(rename = "Color")]
    pub color: Option<String>,
    #[serde(rename = "ID")]
    pub id: Option<String>,
}

// =============================================================================
// Dimensions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimalDim {
    #[serde(rename = "Animal")]
    pub animal: Option<String>,
    #[serde(rename = "Animal_id")]
    pub animal_id: SurrogateKey,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeDim {
    pub outcome: Option<String>,
    pub outcome_id: SurrogateKey,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreedDim {
    #[serde(rename = "Breed")]
    pub breed: Option<String>,
    #[serde(rename = "Breed_id")]
    pub breed_id: SurrogateKey,
}

/// A distinct source timestamp.
///
/// Month and year are absent only when the timestamp itself was missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateDim {
    #[serde(rename = "Dt")]
    pub dt: Option<NaiveDateTime>,
    pub date_id: SurrogateKey,
    #[serde(rename = "Mnt")]
    pub month: Option<i32>,
    #[serde(rename = "Yr")]
    pub year: Option<i32>,
}

// =============================================================================
// Star schema
// =============================================================================

/// The fact table and its four dimensions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarSchema {
    pub adoption: Vec<AdoptionFact>,
    pub animal: Vec<AnimalDim>,
    pub date: Vec<DateDim>,
    pub outcome: Vec<OutcomeDim>,
    pub breed: Vec<BreedDim>,
}

/// Row counts per output table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub adoption: usize,
    pub animal: usize,
    pub date: usize,
    pub outcome: usize,
    pub breed: usize,
}

impl StarSchema {
    pub fn counts(&self) -> TableCounts {
        TableCounts {
            adoption: self.adoption.len(),
            animal: self.animal.len(),
            date: self.date.len(),
            outcome: self.outcome.len(),
            breed: self.breed.len(),
        }
    }
}
