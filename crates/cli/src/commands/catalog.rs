//! Catalog file commands.

use std::path::Path;

use tracing::info;

use lumera_core::CategorySummary;
use lumera_storefront::store::Catalog;

/// Write the built-in catalog to `output` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub async fn export(output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::builtin();
    let json = serde_json::to_string_pretty(&catalog)?;
    tokio::fs::write(output, json).await?;

    info!(
        path = %output.display(),
        categories = catalog.categories.len(),
        products = catalog.products.len(),
        "Catalog exported"
    );
    info!("Load it with LUMERA_CATALOG_PATH={}", output.display());
    Ok(())
}

/// Validate a catalog file and summarize its contents.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a catalog, or is
/// inconsistent.
pub async fn check(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::load(path).await?;

    info!(path = %path.display(), "Catalog is valid");
    for summary in CategorySummary::summarize(catalog.categories, &catalog.products) {
        info!(
            "  {} ({:?}): {} products",
            summary.category.name, summary.category.kind, summary.product_count
        );
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_export_then_check() {
        let path = std::env::temp_dir().join(format!("lumera-catalog-{}.json", std::process::id()));

        export(&path).await.unwrap();
        check(&path).await.unwrap();

        let loaded = Catalog::load(&path).await.unwrap();
        assert_eq!(loaded, Catalog::builtin());

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_check_reports_missing_file() {
        let path = std::env::temp_dir().join("lumera-catalog-does-not-exist.json");
        assert!(check(&path).await.is_err());
    }
}
