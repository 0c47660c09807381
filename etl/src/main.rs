//! Shelter ETL CLI
//!
//! ```bash
//! shelter-etl                              # Fetch, transform, replace warehouse tables
//! shelter-etl --source rows.csv            # Use a local file instead of the public URL
//! shelter-etl --dry-run --export-dir out   # Transform only, write the tables as CSV
//! ```

use std::path::PathBuf;

use clap::Parser;
use shelter_etl::{
    pipeline, PgWarehouse, PipelineError, PipelineOptions, PipelineSummary, Source,
    WarehouseConfig, DEFAULT_SOURCE_URL,
};

#[derive(Parser)]
#[command(name = "shelter-etl")]
#[command(about = "Load animal shelter outcomes into a star schema warehouse", long_about = None)]
struct Cli {
    /// Source CSV: http(s) URL or local path
    #[arg(short, long, default_value = DEFAULT_SOURCE_URL)]
    source: String,

    /// Extract and transform only; do not touch the warehouse
    #[arg(long)]
    dry_run: bool,

    /// Also write the five tables as CSV files into this directory
    #[arg(short, long)]
    export_dir: Option<PathBuf>,

    /// Print a JSON run summary when done
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    println!("Starting...");

    match run(&cli).await {
        Ok(summary) => {
            if cli.json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("⚠️  Cannot render summary: {}", e),
                }
            }
            println!("Complete");
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: &Cli) -> Result<PipelineSummary, PipelineError> {
    let options = PipelineOptions {
        source: Source::parse(&cli.source),
        export_dir: cli.export_dir.clone(),
    };

    if cli.dry_run {
        return pipeline::dry_run(&options).await;
    }

    let config = WarehouseConfig::from_env()?;
    let mut warehouse = PgWarehouse::connect(&config).await?;
    pipeline::run(&options, &mut warehouse).await
}
