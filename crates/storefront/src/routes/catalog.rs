//! Catalog route handlers: categories, products and price quotes.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use lumera_core::{
    Category, CategoryId, CategorySummary, CustomizationSelection, LineKey, PriceBreakdown,
    Product, ProductId, derive_key,
};

use super::views::{CustomizationOptions, DisplayPrice, ProductView};
use crate::error::{AppError, Result};
use crate::extract::JsonBody;
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category_id: Option<CategoryId>,
}

/// A category with the products it contains.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: CategorySummary,
    pub products: Vec<ProductView>,
}

/// A product with its category and the options a shopper can pick.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: ProductView,
    pub category: Category,
    pub options: CustomizationOptions,
}

/// Price of one customized unit.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub product_id: ProductId,
    /// The selection after dropping options that do not apply.
    pub selection: CustomizationSelection,
    pub breakdown: PriceBreakdown,
    pub unit_price: DisplayPrice,
    pub customization: String,
    /// Key the cart line would be stored under.
    pub line_key: LineKey,
    /// Whether every required option has been chosen.
    pub complete: bool,
}

/// Look up a product together with its category.
pub(crate) async fn find_product(state: &AppState, id: ProductId) -> Result<(Product, Category)> {
    let product = state
        .catalog()
        .product(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {id}")))?;

    let category = state
        .catalog()
        .category_by_id(product.category_id)
        .await?
        .ok_or_else(|| {
            AppError::Internal(format!(
                "product {id} references missing category {}",
                product.category_id
            ))
        })?;

    Ok((product, category))
}

/// List categories with their product counts.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<CategorySummary>>> {
    let categories = state.catalog().categories().await?;
    let products = state.catalog().products(None).await?;
    Ok(Json(CategorySummary::summarize(categories, &products)))
}

/// Show one category and its products.
#[instrument(skip(state))]
pub async fn category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CategoryDetail>> {
    let category = state
        .catalog()
        .category_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {slug}")))?;

    let products = state.catalog().products(Some(category.id)).await?;
    let rate = state.exchange_rate();
    let kind = category.kind;

    let summary = CategorySummary {
        product_count: products.len(),
        category,
    };
    let products = products
        .into_iter()
        .map(|p| ProductView::new(p, kind, rate))
        .collect();

    Ok(Json(CategoryDetail {
        category: summary,
        products,
    }))
}

/// List products, optionally filtered by category.
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductView>>> {
    let categories = state.catalog().categories().await?;
    let products = state.catalog().products(query.category_id).await?;
    let rate = state.exchange_rate();

    let views = products
        .into_iter()
        .map(|p| {
            let kind = categories
                .iter()
                .find(|c| c.id == p.category_id)
                .map(|c| c.kind)
                .unwrap_or_default();
            ProductView::new(p, kind, rate)
        })
        .collect();

    Ok(Json(views))
}

/// Show one product with its customization options.
#[instrument(skip(state))]
pub async fn product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetail>> {
    let (product, category) = find_product(&state, id).await?;
    let rate = state.exchange_rate();

    Ok(Json(ProductDetail {
        product: ProductView::new(product, category.kind, rate),
        options: CustomizationOptions::for_kind(category.kind, rate),
        category,
    }))
}

/// Quote the unit price of a product for a selection.
///
/// Incomplete selections are still priced; `complete` tells the client
/// whether the selection could be added to the cart as is.
#[instrument(skip(state))]
pub async fn quote(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    JsonBody(selection): JsonBody<CustomizationSelection>,
) -> Result<Json<PriceQuote>> {
    let (product, category) = find_product(&state, id).await?;
    let kind = category.kind;
    let effective = selection.normalized_for(kind);
    let breakdown = state.pricing().breakdown(product.base_price, kind, &effective);

    tracing::debug!(
        product_id = %id,
        unit_price = %breakdown.unit_price,
        "Price quoted"
    );

    Ok(Json(PriceQuote {
        product_id: id,
        complete: effective.validate(kind).is_ok(),
        customization: effective.label(kind),
        line_key: derive_key(id, kind, &effective),
        unit_price: DisplayPrice::new(breakdown.unit_price, state.exchange_rate()),
        selection: effective,
        breakdown,
    }))
}
