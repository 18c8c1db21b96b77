//! Campaign management routes (the "My Campaigns" screen).

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;

use crate::product::ProductFilter;
use crate::routes::error::ApiError;
use crate::services::campaign::{Campaign, CampaignPatch};
use crate::services::share::ShareLinks;
use crate::services::stats::{CampaignStats, OrdersSummary};
use crate::state::AppState;
use crate::store::RecordId;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignCard {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub stats: CampaignStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignListResponse {
    pub campaigns: Vec<CampaignCard>,
    pub total_campaigns: usize,
    /// Totals across every order, whatever its campaign.
    pub summary: OrdersSummary,
}

/// `GET /api/campaigns`: every campaign with its order stats.
pub async fn list_campaigns(State(state): State<AppState>) -> Json<CampaignListResponse> {
    let (campaigns, orders) = tokio::join!(state.campaigns.get_all(), state.orders.get_all());
    let summary = OrdersSummary::compute(&orders, &campaigns, ProductFilter::All);
    let cards: Vec<CampaignCard> = campaigns
        .into_iter()
        .map(|campaign| {
            let stats = CampaignStats::compute(&campaign, &orders);
            CampaignCard { campaign, stats }
        })
        .collect();
    Json(CampaignListResponse { total_campaigns: cards.len(), campaigns: cards, summary })
}

/// `GET /api/campaigns/{id}`
pub async fn get_campaign(State(state): State<AppState>, Path(id): Path<RecordId>) -> Result<Json<Campaign>, ApiError> {
    Ok(Json(state.campaigns.expect_by_id(id).await?))
}

/// `PATCH /api/campaigns/{id}`: merge the supplied fields.
pub async fn update_campaign(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(patch): Json<CampaignPatch>,
) -> Result<Json<Campaign>, ApiError> {
    Ok(Json(state.campaigns.update(id, patch).await?))
}

/// `DELETE /api/campaigns/{id}`: orders placed against it are kept.
pub async fn delete_campaign(State(state): State<AppState>, Path(id): Path<RecordId>) -> Result<StatusCode, ApiError> {
    state.campaigns.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/campaigns/{id}/stats`
pub async fn campaign_stats(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Json<CampaignStats>, ApiError> {
    let campaign = state.campaigns.expect_by_id(id).await?;
    let orders = state.orders.get_by_campaign_id(id).await;
    Ok(Json(CampaignStats::compute(&campaign, &orders)))
}

/// `GET /api/campaigns/{id}/share`: share URL plus social links.
pub async fn campaign_share(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Json<ShareLinks>, ApiError> {
    let campaign = state.campaigns.expect_by_id(id).await?;
    Ok(Json(ShareLinks::new(campaign.product_type, &campaign.share_url)))
}

#[cfg(test)]
#[path = "campaigns_test.rs"]
mod tests;
