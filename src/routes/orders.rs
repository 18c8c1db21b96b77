//! Order management routes: the orders table and its CSV export.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::product::{ProductFilter, ProductType};
use crate::routes::error::ApiError;
use crate::services::export::{self, CSV_CONTENT_TYPE};
use crate::services::order::{Order, OrderError, OrderPatch};
use crate::services::stats::{self, OrdersSummary, round_cents};
use crate::state::AppState;
use crate::store::RecordId;

#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    #[serde(default)]
    pub product: ProductFilter,
}

/// One table row: the order plus what its campaign contributes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    #[serde(flatten)]
    pub order: Order,
    pub product_type: Option<ProductType>,
    pub product_label: &'static str,
    /// Quantity at the campaign's current price.
    pub total: f64,
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderRow>,
    pub summary: OrdersSummary,
}

/// `GET /api/orders?product=all|tshirt|mug`
pub async fn list_orders(State(state): State<AppState>, Query(query): Query<OrdersQuery>) -> Json<OrderListResponse> {
    let (campaigns, orders) = tokio::join!(state.campaigns.get_all(), state.orders.get_all());
    let index = stats::index_campaigns(&campaigns);
    let rows = stats::filter_orders(&orders, &index, query.product)
        .into_iter()
        .map(|order| {
            let product_type = index.get(&order.campaign_id).map(|c| c.product_type);
            OrderRow {
                product_type,
                product_label: product_type.map_or("Unknown", ProductType::label),
                total: round_cents(stats::order_revenue(order, &index)),
                order: order.clone(),
            }
        })
        .collect();
    let summary = OrdersSummary::compute(&orders, &campaigns, query.product);
    Json(OrderListResponse { orders: rows, summary })
}

/// `GET /api/orders/export?product=...`: CSV download of the filtered rows.
pub async fn export_orders_csv(
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<Response, ApiError> {
    let (campaigns, orders) = tokio::join!(state.campaigns.get_all(), state.orders.get_all());
    let index = stats::index_campaigns(&campaigns);
    let selected = stats::filter_orders(&orders, &index, query.product);
    let body = export::orders_csv(&selected, &index)?;
    let filename = export::export_filename(state.clock.now())?;
    info!(rows = selected.len(), filename = %filename, "orders exported");

    Ok((
        [
            (CONTENT_TYPE, CSV_CONTENT_TYPE),
            (CONTENT_DISPOSITION, &format!("attachment; filename=\"{filename}\"")),
        ],
        body,
    )
        .into_response())
}

/// `GET /api/orders/{id}`
pub async fn get_order(State(state): State<AppState>, Path(id): Path<RecordId>) -> Result<Json<Order>, ApiError> {
    let order = state.orders.get_by_id(id).await.ok_or(OrderError::NotFound(id))?;
    Ok(Json(order))
}

/// `PATCH /api/orders/{id}`
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(patch): Json<OrderPatch>,
) -> Result<Json<Order>, ApiError> {
    let existing = state.orders.get_by_id(id).await.ok_or(OrderError::NotFound(id))?;
    let campaign = state.campaigns.get_by_id(existing.campaign_id).await;
    Ok(Json(state.orders.update(id, patch, campaign.as_ref()).await?))
}

/// `DELETE /api/orders/{id}`
pub async fn delete_order(State(state): State<AppState>, Path(id): Path<RecordId>) -> Result<StatusCode, ApiError> {
    state.orders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "orders_test.rs"]
mod tests;
