use std::collections::HashMap;
use std::path::PathBuf;

use shelter_etl::load::MemoryWarehouse;
use shelter_etl::logs::LOG_BROADCASTER;
use shelter_etl::pipeline::{self, PipelineOptions};
use shelter_etl::{parse_bytes_auto, Cell, LoadError, PipelineError, Source, Table};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/outcomes.csv")
}

fn options() -> PipelineOptions {
    PipelineOptions {
        source: Source::Path(fixture_path()),
        export_dir: None,
    }
}

/// Map a dimension table's key column to its value column.
fn lookup(table: &Table, key: &str, value: &str) -> HashMap<i64, Cell> {
    let k = table.column_index(key).unwrap();
    let v = table.column_index(value).unwrap();
    table
        .rows
        .iter()
        .map(|row| (row[k].as_integer().unwrap(), row[v].clone()))
        .collect()
}

#[tokio::test]
async fn test_run_replaces_five_tables() {
    let mut warehouse = MemoryWarehouse::new();
    let summary = pipeline::run(&options(), &mut warehouse).await.unwrap();

    assert!(summary.loaded);
    assert_eq!(summary.source_info.row_count, 10);
    assert_eq!(summary.tables.adoption, 10);
    assert_eq!(summary.tables.outcome, 5);
    assert_eq!(summary.tables.animal, 3);
    assert_eq!(summary.tables.breed, 6);
    assert_eq!(summary.tables.date, 9);

    assert_eq!(warehouse.writes(), ["ADOPTION", "ANIMAL", "DATE", "OUTCOME", "BREED"]);
}

#[tokio::test]
async fn test_unknown_sex_loaded_as_null() {
    let mut warehouse = MemoryWarehouse::new();
    pipeline::run(&options(), &mut warehouse).await.unwrap();

    let adoption = warehouse.table("ADOPTION").unwrap();
    let sex = adoption.column_index("Sex").unwrap();

    let nulls = adoption.rows.iter().filter(|r| r[sex] == Cell::Null).count();
    assert_eq!(nulls, 2);
    assert!(adoption.rows.iter().all(|r| r[sex].as_text() != Some("Unknown")));
}

#[tokio::test]
async fn test_round_trip_rejoin_reconstructs_source() {
    let mut warehouse = MemoryWarehouse::new();
    pipeline::run(&options(), &mut warehouse).await.unwrap();

    let raw = parse_bytes_auto(&std::fs::read(fixture_path()).unwrap()).unwrap().table;
    let col = |name: &str| raw.column_index(name).unwrap();

    let adoption = warehouse.table("ADOPTION").unwrap();
    let outcomes = lookup(warehouse.table("OUTCOME").unwrap(), "outcome_id", "outcome");
    let animals = lookup(warehouse.table("ANIMAL").unwrap(), "Animal_id", "Animal");
    let breeds = lookup(warehouse.table("BREED").unwrap(), "Breed_id", "Breed");
    let dates = lookup(warehouse.table("DATE").unwrap(), "date_id", "Dt");

    let fact = |name: &str| adoption.column_index(name).unwrap();
    assert_eq!(adoption.rows.len(), raw.rows.len());

    for (fact_row, raw_row) in adoption.rows.iter().zip(&raw.rows) {
        let key = |name: &str| fact_row[fact(name)].as_integer().unwrap();

        assert_eq!(
            outcomes[&key("outcome_id")].as_text(),
            raw_row[col("Outcome Type")].as_deref()
        );
        assert_eq!(
            animals[&key("Animal_id")].as_text(),
            raw_row[col("Animal Type")].as_deref()
        );
        assert_eq!(breeds[&key("Breed_id")].as_text(), raw_row[col("Breed")].as_deref());
        assert_eq!(
            dates[&key("date_id")].as_timestamp(),
            raw_row[col("DateTime")].as_deref().and_then(shelter_etl::parse_timestamp)
        );
        assert_eq!(fact_row[fact("ID")].as_text(), raw_row[col("Animal ID")].as_deref());
        assert_eq!(fact_row[fact("Color")].as_text(), raw_row[col("Color")].as_deref());
    }
}

#[tokio::test]
async fn test_case_variants_are_distinct_breeds() {
    let mut warehouse = MemoryWarehouse::new();
    pipeline::run(&options(), &mut warehouse).await.unwrap();

    let breed = warehouse.table("BREED").unwrap();
    let names: Vec<_> = breed.rows.iter().filter_map(|r| r[0].as_text()).collect();
    assert!(names.contains(&"Domestic Shorthair Mix"));
    assert!(names.contains(&"domestic shorthair mix"));
    assert!(names.contains(&"Labrador Retriever, Mix"));
}

#[tokio::test]
async fn test_rerun_reproduces_tables() {
    let mut first = MemoryWarehouse::new();
    pipeline::run(&options(), &mut first).await.unwrap();

    let mut second = MemoryWarehouse::new();
    pipeline::run(&options(), &mut second).await.unwrap();
    pipeline::run(&options(), &mut second).await.unwrap();

    for name in ["ADOPTION", "ANIMAL", "DATE", "OUTCOME", "BREED"] {
        assert_eq!(first.table(name), second.table(name), "table {}", name);
    }
    assert_eq!(second.table_names().len(), 5);
}

#[tokio::test]
async fn test_load_failure_aborts_after_partial_replace() {
    let mut stale = Table::new("BREED", shelter_etl::load::tables::BREED_COLUMNS);
    stale.rows.push(vec![Cell::Text("Stale".into()), Cell::Integer(1)]);

    let mut warehouse = MemoryWarehouse::rejecting("DATE").with_table(stale.clone());
    let err = pipeline::run(&options(), &mut warehouse).await.unwrap_err();

    assert!(matches!(err, PipelineError::Load(LoadError::Rejected(ref t)) if t == "DATE"));
    assert_eq!(warehouse.writes(), ["ADOPTION", "ANIMAL"]);
    assert_eq!(warehouse.table("BREED"), Some(&stale));
    assert!(warehouse.table("OUTCOME").is_none());
}

#[tokio::test]
async fn test_dry_run_with_export() {
    let dir = tempfile::tempdir().unwrap();
    let opts = PipelineOptions {
        export_dir: Some(dir.path().to_path_buf()),
        ..options()
    };

    let summary = pipeline::dry_run(&opts).await.unwrap();
    assert!(!summary.loaded);
    assert_eq!(summary.exported_to.as_deref(), Some(dir.path()));

    for name in ["ADOPTION", "ANIMAL", "DATE", "OUTCOME", "BREED"] {
        assert!(dir.path().join(format!("{}.csv", name)).exists());
    }

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["tables"]["adoption"], 10);
    assert_eq!(json["source_info"]["delimiter"], ",");
}

#[tokio::test]
async fn test_missing_column_is_transform_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut file, b"Animal ID,Name\nA1,Rex\n").unwrap();

    let opts = PipelineOptions {
        source: Source::Path(file.path().to_path_buf()),
        export_dir: None,
    };
    let mut warehouse = MemoryWarehouse::new();
    let err = pipeline::run(&opts, &mut warehouse).await.unwrap_err();

    assert!(matches!(err, PipelineError::Transform(_)));
    assert!(warehouse.writes().is_empty());
}

#[tokio::test]
async fn test_progress_is_broadcast() {
    let mut rx = LOG_BROADCASTER.subscribe();
    pipeline::dry_run(&options()).await.unwrap();

    let mut messages = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(entry) => messages.push(entry.message),
            Err(tokio::sync::broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    assert!(messages.iter().any(|m| m.contains("Building star schema")));
}

/// Needs a reachable PostgreSQL configured through `WAREHOUSE_*`.
#[tokio::test]
#[ignore]
async fn test_postgres_replace_round_trip() {
    use shelter_etl::{PgWarehouse, WarehouseConfig};
    use sqlx::Row;

    dotenvy::dotenv().ok();
    let config = WarehouseConfig::from_env().unwrap();
    let mut warehouse = PgWarehouse::connect(&config).await.unwrap();

    let summary = pipeline::run(&options(), &mut warehouse).await.unwrap();
    let row = sqlx::query("SELECT COUNT(*) AS n FROM \"ADOPTION\"")
        .fetch_one(warehouse.pool())
        .await
        .unwrap();
    let n: i64 = row.get("n");
    assert_eq!(n as usize, summary.tables.adoption);

    // Second run must replace, not append
    pipeline::run(&options(), &mut warehouse).await.unwrap();
    let row = sqlx::query("SELECT COUNT(*) AS n FROM \"OUTCOME\"")
        .fetch_one(warehouse.pool())
        .await
        .unwrap();
    let n: i64 = row.get("n");
    assert_eq!(n as usize, summary.tables.outcome);
}
