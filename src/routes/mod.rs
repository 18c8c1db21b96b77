//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the JSON API for the studio, campaign and order
//! screens, plus the public product page behind each share URL. Handlers
//! translate service errors into `ApiError` responses; nothing here holds
//! state of its own.

pub mod campaigns;
pub mod catalog;
pub mod error;
pub mod orders;
pub mod product;
pub mod studio;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/studio", post(studio::create_draft))
        .route("/api/studio/{draft_id}", get(studio::get_draft).delete(studio::discard_draft))
        .route("/api/studio/{draft_id}/product", put(studio::set_product))
        .route("/api/studio/{draft_id}/pricing", put(studio::set_pricing))
        .route("/api/studio/{draft_id}/elements/text", post(studio::add_text))
        .route("/api/studio/{draft_id}/elements/image", post(studio::add_image))
        .route("/api/studio/{draft_id}/elements/clipart", post(studio::add_clipart))
        .route(
            "/api/studio/{draft_id}/elements/{element_id}",
            patch(studio::move_element).delete(studio::delete_element),
        )
        .route(
            "/api/studio/{draft_id}/selection",
            put(studio::set_selection).delete(studio::delete_selected),
        )
        .route("/api/studio/{draft_id}/template/{template_id}", post(studio::apply_template))
        .route("/api/studio/{draft_id}/reset", post(studio::reset_draft))
        .route("/api/studio/{draft_id}/save", post(studio::save_draft))
        .route("/api/templates", get(catalog::list_templates))
        .route("/api/templates/{id}", get(catalog::get_template))
        .route("/api/clipart", get(catalog::list_clipart))
        .route("/api/campaigns", get(campaigns::list_campaigns))
        .route(
            "/api/campaigns/{id}",
            get(campaigns::get_campaign)
                .patch(campaigns::update_campaign)
                .delete(campaigns::delete_campaign),
        )
        .route("/api/campaigns/{id}/stats", get(campaigns::campaign_stats))
        .route("/api/campaigns/{id}/share", get(campaigns::campaign_share))
        .route("/api/orders", get(orders::list_orders))
        .route("/api/orders/export", get(orders::export_orders_csv))
        .route(
            "/api/orders/{id}",
            get(orders::get_order)
                .patch(orders::update_order)
                .delete(orders::delete_order),
        )
        .route("/product/{campaign_id}", get(product::product_page))
        .route("/product/{campaign_id}/orders", post(product::place_order))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
