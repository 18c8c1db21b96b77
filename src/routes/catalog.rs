//! Template and clipart browsing for the studio sidebar.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::routes::error::ApiError;
use crate::services::catalog::{ALL_CATEGORIES, Clipart, Template};
use crate::state::AppState;
use crate::store::RecordId;

fn all_categories() -> String {
    ALL_CATEGORIES.to_string()
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default = "all_categories")]
    pub category: String,
    /// Case-insensitive name search; templates only.
    pub search: Option<String>,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self { category: all_categories(), search: None }
    }
}

/// `GET /api/templates?category=...&search=...`
pub async fn list_templates(State(state): State<AppState>, Query(query): Query<CatalogQuery>) -> Json<Vec<Template>> {
    let templates = match query.search.as_deref().map(str::trim) {
        Some(search) if !search.is_empty() => state.catalog.search_templates(&query.category, search).await,
        _ => state.catalog.templates_by_category(&query.category).await,
    };
    Json(templates)
}

/// `GET /api/templates/{id}`
pub async fn get_template(State(state): State<AppState>, Path(id): Path<RecordId>) -> Result<Json<Template>, ApiError> {
    Ok(Json(state.catalog.template(id).await?))
}

/// `GET /api/clipart?category=...`
pub async fn list_clipart(State(state): State<AppState>, Query(query): Query<CatalogQuery>) -> Json<Vec<Clipart>> {
    Json(state.catalog.clipart_by_category(&query.category).await)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
