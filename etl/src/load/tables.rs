//! Column-type mapping for the five warehouse tables.

use super::{Cell, ColumnDef, Table};
use crate::models::{
    StarSchema, ADOPTION_TABLE, ANIMAL_TABLE, BREED_TABLE, DATE_TABLE, OUTCOME_TABLE,
};

pub const ADOPTION_COLUMNS: &[ColumnDef] = &[
    ColumnDef::text("recorded_name"),
    ColumnDef::integer("date_id"),
    ColumnDef::integer("outcome_id"),
    ColumnDef::integer("Animal_id"),
    ColumnDef::text("Sex"),
    ColumnDef::integer("Breed_id"),
    ColumnDef::text("Color"),
    ColumnDef::text("ID"),
];

pub const ANIMAL_COLUMNS: &[ColumnDef] = &[ColumnDef::text("Animal"), ColumnDef::integer("Animal_id")];

pub const OUTCOME_COLUMNS: &[ColumnDef] = &[ColumnDef::text("outcome"), ColumnDef::integer("outcome_id")];

pub const BREED_COLUMNS: &[ColumnDef] = &[ColumnDef::text("Breed"), ColumnDef::integer("Breed_id")];

pub const DATE_COLUMNS: &[ColumnDef] = &[
    ColumnDef::timestamp("Dt"),
    ColumnDef::integer("date_id"),
    ColumnDef::integer("Mnt"),
    ColumnDef::integer("Yr"),
];

/// The star schema as warehouse tables, in load order:
/// ADOPTION, ANIMAL, DATE, OUTCOME, BREED.
pub fn star_tables(schema: &StarSchema) -> Vec<Table> {
    let mut adoption = Table::new(ADOPTION_TABLE, ADOPTION_COLUMNS);
    adoption.rows = schema
        .adoption
        .iter()
        .map(|f| {
            vec![
                Cell::text(&f.recorded_name),
                Cell::Integer(f.date_id),
                Cell::Integer(f.outcome_id),
                Cell::Integer(f.animal_id),
                Cell::text(&f.sex),
                Cell::Integer(f.breed_id),
                Cell::text(&f.color),
                Cell::text(&f.id),
            ]
        })
        .collect();

    let mut animal = Table::new(ANIMAL_TABLE, ANIMAL_COLUMNS);
    animal.rows = schema
        .animal
        .iter()
        .map(|d| vec![Cell::text(&d.animal), Cell::Integer(d.animal_id)])
        .collect();

    let mut date = Table::new(DATE_TABLE, DATE_COLUMNS);
    date.rows = schema
        .date
        .iter()
        .map(|d| {
            vec![
                Cell::timestamp(d.dt),
                Cell::Integer(d.date_id),
                Cell::integer(d.month.map(i64::from)),
                Cell::integer(d.year.map(i64::from)),
            ]
        })
        .collect();

    let mut outcome = Table::new(OUTCOME_TABLE, OUTCOME_COLUMNS);
    outcome.rows = schema
        .outcome
        .iter()
        .map(|d| vec![Cell::text(&d.outcome), Cell::Integer(d.outcome_id)])
        .collect();

    let mut breed = Table::new(BREED_TABLE, BREED_COLUMNS);
    breed.rows = schema
        .breed
        .iter()
        .map(|d| vec![Cell::text(&d.breed), Cell::Integer(d.breed_id)])
        .collect();

    vec![adoption, animal, date, outcome, breed]
}
