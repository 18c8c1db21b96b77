//! Read-only design catalog: starter templates and clipart.

use serde::{Deserialize, Serialize};

use crate::design::Design;
use crate::error::ErrorCode;
use crate::product::ProductType;
use crate::store::{MemoryStore, Record, RecordId};

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub name: String,
    pub category: String,
    /// Product the layout was drawn for. `None` fits either.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
    #[serde(default)]
    pub design_data: Design,
}

impl Record for Template {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clipart {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub name: String,
    pub category: String,
    pub src: String,
}

impl Record for Clipart {
    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("template not found: {0}")]
    TemplateNotFound(RecordId),
    #[error("clipart not found: {0}")]
    ClipartNotFound(RecordId),
}

impl ErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::TemplateNotFound(_) => "E_TEMPLATE_NOT_FOUND",
            Self::ClipartNotFound(_) => "E_CLIPART_NOT_FOUND",
        }
    }
}

fn in_category(category: &str, wanted: &str) -> bool {
    wanted == ALL_CATEGORIES || category == wanted
}

#[derive(Clone)]
pub struct CatalogService {
    templates: MemoryStore<Template>,
    clipart: MemoryStore<Clipart>,
}

impl CatalogService {
    #[must_use]
    pub fn new(templates: MemoryStore<Template>, clipart: MemoryStore<Clipart>) -> Self {
        Self { templates, clipart }
    }

    /// Unlike campaigns, a missing template is an error.
    ///
    /// # Errors
    ///
    /// Returns `TemplateNotFound` if no template has `id`.
    pub async fn template(&self, id: RecordId) -> Result<Template, CatalogError> {
        self.templates.get_by_id(id).await.ok_or(CatalogError::TemplateNotFound(id))
    }

    /// Templates in `category` (`"all"` for every template).
    pub async fn templates_by_category(&self, category: &str) -> Vec<Template> {
        self.templates.filter(|t| in_category(&t.category, category)).await
    }

    /// Templates whose name contains `query`, ignoring case, within `category`.
    pub async fn search_templates(&self, category: &str, query: &str) -> Vec<Template> {
        let needle = query.trim().to_lowercase();
        self.templates
            .filter(|t| in_category(&t.category, category) && t.name.to_lowercase().contains(&needle))
            .await
    }

    /// # Errors
    ///
    /// Returns `ClipartNotFound` if no clipart item has `id`.
    pub async fn clipart_item(&self, id: RecordId) -> Result<Clipart, CatalogError> {
        self.clipart.get_by_id(id).await.ok_or(CatalogError::ClipartNotFound(id))
    }

    /// Clipart in `category` (`"all"` for every item).
    pub async fn clipart_by_category(&self, category: &str) -> Vec<Clipart> {
        self.clipart.filter(|c| in_category(&c.category, category)).await
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
