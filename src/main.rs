// src/main.rs
//
// Reads raw pipe-delimited category paths from stdin (one per line),
// materializes them, then prints the flat category listing as JSON.
//
//   RUST_LOG=debug catalog-taxonomy < categories.txt

use std::io::{self, BufRead, Write};

use anyhow::Context;

use catalog_taxonomy::app::{init_catalog, CatalogConfig};
use catalog_taxonomy::application::commands::{import_category_paths, list_flat_categories};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = CatalogConfig::from_env().context("Failed to load configuration")?;
    let state = init_catalog(&config).context("Failed to initialize category catalog")?;

    let raw_paths: Vec<String> = io::stdin()
        .lock()
        .lines()
        .collect::<Result<_, _>>()
        .context("Failed to read category paths from stdin")?;

    if !raw_paths.is_empty() {
        let summary = import_category_paths(&state, raw_paths)
            .await
            .context("Import failed")?;

        log::info!(
            "Imported {} rows: {} materialized, {} categories created, {} skipped, {} failed",
            summary.total_rows,
            summary.materialized,
            summary.categories_created,
            summary.skipped,
            summary.failed
        );
        for problem in &summary.problems {
            log::warn!("Row {} {}: {}", problem.row_ref, problem.status, problem.reason);
        }
    }

    let flat = list_flat_categories(&state)
        .await
        .context("Failed to list categories")?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &flat)?;
    writeln!(stdout)?;

    Ok(())
}
