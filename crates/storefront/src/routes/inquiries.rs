//! Customer inquiry handlers.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use tracing::instrument;

use lumera_core::{Inquiry, InquiryId, NewInquiry};

use super::catalog::find_product;
use crate::error::Result;
use crate::extract::JsonBody;
use crate::state::AppState;

/// Record an inquiry from the contact form or a product page.
///
/// When the inquiry is about a product, the product must exist; its name is
/// filled in from the catalog if the form did not send one.
#[instrument(skip(state, inquiry))]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(mut inquiry): JsonBody<NewInquiry>,
) -> Result<(StatusCode, Json<Inquiry>)> {
    if let Some(product_id) = inquiry.product_id {
        let (product, _) = find_product(&state, product_id).await?;
        if inquiry.product_name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            inquiry.product_name = Some(product.name);
        }
    }

    let inquiry = inquiry.into_inquiry(InquiryId::generate(), Utc::now())?;
    state.inquiries().save(inquiry.clone()).await?;

    tracing::info!(
        inquiry_id = %inquiry.id,
        product_id = ?inquiry.product_id,
        "Inquiry received"
    );

    Ok((StatusCode::CREATED, Json(inquiry)))
}
