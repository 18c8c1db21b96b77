//! Public product page: what a shopper sees behind a campaign's share URL.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;

use crate::product::CanvasSize;
use crate::routes::error::ApiError;
use crate::services::campaign::Campaign;
use crate::services::order::{Order, OrderRequest};
use crate::services::share::ShareLinks;
use crate::services::stats::{CampaignStats, ProductionProgress};
use crate::state::AppState;
use crate::store::RecordId;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub campaign: Campaign,
    pub product_label: &'static str,
    pub sizes: &'static [&'static str],
    pub default_size: &'static str,
    pub canvas_size: CanvasSize,
    pub progress: ProductionProgress,
    pub total_orders: usize,
    pub total_revenue: f64,
    pub share: ShareLinks,
}

/// `GET /product/{campaign_id}`
pub async fn product_page(
    State(state): State<AppState>,
    Path(campaign_id): Path<RecordId>,
) -> Result<Json<ProductPage>, ApiError> {
    let campaign = state.campaigns.expect_by_id(campaign_id).await?;
    let orders = state.orders.get_by_campaign_id(campaign_id).await;
    let stats = CampaignStats::compute(&campaign, &orders);
    let product = campaign.product_type;
    Ok(Json(ProductPage {
        product_label: product.label(),
        sizes: product.sizes(),
        default_size: product.default_size(),
        canvas_size: product.canvas_size(),
        progress: ProductionProgress::from_items(stats.items_sold),
        total_orders: stats.total_orders,
        total_revenue: stats.total_revenue,
        share: ShareLinks::new(product, &campaign.share_url),
        campaign,
    }))
}

/// `POST /product/{campaign_id}/orders`: the preorder form.
pub async fn place_order(
    State(state): State<AppState>,
    Path(campaign_id): Path<RecordId>,
    Json(request): Json<OrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let campaign = state.campaigns.expect_by_id(campaign_id).await?;
    let order = state.orders.place(&campaign, request).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[cfg(test)]
#[path = "product_test.rs"]
mod tests;
