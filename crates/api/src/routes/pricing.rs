//! Pricing endpoint handler.

use axum::Json;

use domain::services::pricing::{price_list, PriceList};

/// Return the current fee table.
///
/// GET /api/v1/pricing
pub async fn get_pricing() -> Json<PriceList> {
    Json(price_list())
}
