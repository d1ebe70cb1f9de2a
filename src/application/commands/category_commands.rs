// src/application/commands/category_commands.rs

use crate::application::{
    dto::*,
    error_handling::ErrorResponse,
    state::AppState,
};
use crate::services::ImportRow;

/// List every category with its full path, sorted by path.
///
/// Backs `GET /categories/flat`.
pub async fn list_flat_categories(state: &AppState) -> Result<Vec<FlatCategory>, ErrorResponse> {
    let rendered = state
        .catalog_service
        .flat_categories()
        .map_err(ErrorResponse::from_app_error)?;

    Ok(rendered.entries.into_iter().map(FlatCategory::from).collect())
}

/// Materialize a batch of raw pipe-delimited paths.
///
/// Rows are referenced by their 1-based position in `raw_paths`.
pub async fn import_category_paths(
    state: &AppState,
    raw_paths: Vec<String>,
) -> Result<ImportSummaryDto, ErrorResponse> {
    let rows: Vec<ImportRow> = raw_paths
        .into_iter()
        .enumerate()
        .map(|(i, raw)| ImportRow::new((i + 1).to_string(), raw))
        .collect();

    let report = state
        .import_service
        .clone()
        .import_concurrently(rows, state.import_workers)
        .await
        .map_err(ErrorResponse::from_app_error)?;

    Ok(ImportSummaryDto::from(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::app::catalog_init::init_catalog;
    use crate::app::config::CatalogConfig;

    fn test_state() -> (TempDir, AppState) {
        let dir = TempDir::new().unwrap();
        let config = CatalogConfig {
            database_path: dir.path().join("catalog.db"),
            import_workers: 2,
            ..CatalogConfig::default()
        };
        let state = init_catalog(&config).unwrap();
        (dir, state)
    }

    #[tokio::test]
    async fn test_flat_listing_is_sorted_by_path() {
        let (_dir, state) = test_state();

        import_category_paths(
            &state,
            vec![
                "Home|Kitchen".to_string(),
                "Electronics|Phones".to_string(),
                "Electronics|Computers|Laptops".to_string(),
            ],
        )
        .await
        .unwrap();

        let flat = list_flat_categories(&state).await.unwrap();
        let names: Vec<&str> = flat.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "Electronics",
                "Electronics > Computers",
                "Electronics > Computers > Laptops",
                "Electronics > Phones",
                "Home",
                "Home > Kitchen",
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let (_dir, state) = test_state();

        assert!(list_flat_categories(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_import_summary_reports_skipped_rows() {
        let (_dir, state) = test_state();

        let summary = import_category_paths(
            &state,
            vec![
                "Electronics|Phones".to_string(),
                "   ".to_string(),
                "Electronics|Phones".to_string(),
            ],
        )
        .await
        .unwrap();

        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.materialized, 2);
        assert_eq!(summary.categories_created, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.problems[0].row_ref, "2");
    }
}
