//! Design studio routes: one draft per editing session.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::design::Position;
use crate::product::{CanvasSize, ProductType, ProfitBreakdown};
use crate::routes::error::ApiError;
use crate::services::campaign::Campaign;
use crate::services::studio::{ElementMove, NewImage, NewText, StudioDraft};
use crate::state::AppState;
use crate::store::RecordId;

/// A draft plus the values the studio derives from it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    #[serde(flatten)]
    pub draft: StudioDraft,
    pub canvas_size: CanvasSize,
    pub profit: ProfitBreakdown,
}

impl From<StudioDraft> for DraftView {
    fn from(draft: StudioDraft) -> Self {
        Self {
            canvas_size: draft.product_type.canvas_size(),
            profit: ProfitBreakdown::new(draft.product_type, draft.pricing),
            draft,
        }
    }
}

type DraftResult = Result<Json<DraftView>, ApiError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    pub product_type: ProductType,
}

#[derive(Debug, Deserialize)]
pub struct PricingBody {
    pub pricing: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipartBody {
    pub clipart_id: RecordId,
    pub position: Option<Position>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionBody {
    /// `null` clears the selection.
    pub element_id: Option<String>,
}

/// `POST /api/studio`: open a blank draft.
pub async fn create_draft(State(state): State<AppState>) -> (StatusCode, Json<DraftView>) {
    let draft = state.studio.create().await;
    (StatusCode::CREATED, Json(draft.into()))
}

/// `GET /api/studio/{draft_id}`
pub async fn get_draft(State(state): State<AppState>, Path(draft_id): Path<Uuid>) -> DraftResult {
    Ok(Json(state.studio.get(draft_id).await?.into()))
}

/// `DELETE /api/studio/{draft_id}`
pub async fn discard_draft(State(state): State<AppState>, Path(draft_id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    state.studio.discard(draft_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /api/studio/{draft_id}/product`
pub async fn set_product(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
    Json(body): Json<ProductBody>,
) -> DraftResult {
    Ok(Json(state.studio.set_product_type(draft_id, body.product_type).await?.into()))
}

/// `PUT /api/studio/{draft_id}/pricing`
pub async fn set_pricing(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
    Json(body): Json<PricingBody>,
) -> DraftResult {
    Ok(Json(state.studio.set_pricing(draft_id, body.pricing).await?.into()))
}

/// `POST /api/studio/{draft_id}/elements/text`
pub async fn add_text(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
    Json(body): Json<NewText>,
) -> DraftResult {
    Ok(Json(state.studio.add_text(draft_id, body).await?.into()))
}

/// `POST /api/studio/{draft_id}/elements/image`
pub async fn add_image(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
    Json(body): Json<NewImage>,
) -> DraftResult {
    Ok(Json(state.studio.add_image(draft_id, body).await?.into()))
}

/// `POST /api/studio/{draft_id}/elements/clipart`
pub async fn add_clipart(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
    Json(body): Json<ClipartBody>,
) -> DraftResult {
    Ok(Json(state.studio.add_clipart(draft_id, body.clipart_id, body.position).await?.into()))
}

/// `PATCH /api/studio/{draft_id}/elements/{element_id}`: move or drag.
pub async fn move_element(
    State(state): State<AppState>,
    Path((draft_id, element_id)): Path<(Uuid, String)>,
    Json(body): Json<ElementMove>,
) -> DraftResult {
    Ok(Json(state.studio.move_element(draft_id, &element_id, body).await?.into()))
}

/// `DELETE /api/studio/{draft_id}/elements/{element_id}`
pub async fn delete_element(
    State(state): State<AppState>,
    Path((draft_id, element_id)): Path<(Uuid, String)>,
) -> DraftResult {
    Ok(Json(state.studio.delete_element(draft_id, &element_id).await?.into()))
}

/// `PUT /api/studio/{draft_id}/selection`
pub async fn set_selection(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
    Json(body): Json<SelectionBody>,
) -> DraftResult {
    Ok(Json(state.studio.select(draft_id, body.element_id.as_deref()).await?.into()))
}

/// `DELETE /api/studio/{draft_id}/selection`: delete the selected element.
pub async fn delete_selected(State(state): State<AppState>, Path(draft_id): Path<Uuid>) -> DraftResult {
    Ok(Json(state.studio.delete_selected(draft_id).await?.into()))
}

/// `POST /api/studio/{draft_id}/template/{template_id}`
pub async fn apply_template(
    State(state): State<AppState>,
    Path((draft_id, template_id)): Path<(Uuid, RecordId)>,
) -> DraftResult {
    Ok(Json(state.studio.apply_template(draft_id, template_id).await?.into()))
}

/// `POST /api/studio/{draft_id}/reset`: "New Design".
pub async fn reset_draft(State(state): State<AppState>, Path(draft_id): Path<Uuid>) -> DraftResult {
    Ok(Json(state.studio.reset(draft_id).await?.into()))
}

/// `POST /api/studio/{draft_id}/save`: persist as a campaign.
pub async fn save_draft(
    State(state): State<AppState>,
    Path(draft_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Campaign>), ApiError> {
    let campaign = state.studio.save(draft_id).await?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

#[cfg(test)]
#[path = "studio_test.rs"]
mod tests;
