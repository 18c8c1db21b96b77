//! Design studio drafts: the editable state behind the studio screen.
//!
//! DESIGN
//! ======
//! A draft is a product choice, a selling price, a `Design` and the canvas
//! selection state. Drafts live in memory keyed by UUID until they are
//! saved or discarded. Every edit computes the next design with the pure
//! `Design` ops and only then writes it back, so a failed edit leaves the
//! draft untouched.
//!
//! Edits that need catalog data (templates, clipart) fetch it before taking
//! the draft lock. Saving snapshots the draft, releases the lock, and then
//! goes through the campaign service.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::design::canvas::Canvas;
use crate::design::{self, Design, DesignError, Element, Position};
use crate::error::ErrorCode;
use crate::product::ProductType;
use crate::services::campaign::{Campaign, CampaignError, CampaignService, NewCampaign};
use crate::services::catalog::{CatalogError, CatalogService};
use crate::store::RecordId;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioDraft {
    pub id: Uuid,
    pub product_type: ProductType,
    pub pricing: f64,
    pub design: Design,
    pub canvas: Canvas,
}

impl StudioDraft {
    fn new(id: Uuid) -> Self {
        let product_type = ProductType::default();
        Self {
            id,
            product_type,
            pricing: product_type.default_pricing(),
            design: Design::new(),
            canvas: Canvas::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewText {
    pub content: String,
    pub color: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<String>,
    pub font_family: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewImage {
    pub src: String,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Move request: an absolute drop position, or a drag delta.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ElementMove {
    To { position: Position },
    By { dx: f64, dy: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error("draft not found: {0}")]
    DraftNotFound(Uuid),
    #[error("add some design elements before saving")]
    EmptyDesign,
    #[error("image source is empty")]
    MissingImageSource,
    #[error("pricing must be a positive amount, got {0}")]
    InvalidPricing(f64),
    #[error(transparent)]
    Design(#[from] DesignError),
    #[error(transparent)]
    Campaign(#[from] CampaignError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ErrorCode for StudioError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DraftNotFound(_) => "E_DRAFT_NOT_FOUND",
            Self::EmptyDesign => "E_EMPTY_DESIGN",
            Self::MissingImageSource => "E_MISSING_IMAGE_SOURCE",
            Self::InvalidPricing(_) => "E_INVALID_PRICING",
            Self::Design(e) => e.error_code(),
            Self::Campaign(e) => e.error_code(),
            Self::Catalog(e) => e.error_code(),
        }
    }
}

// =============================================================================
// SERVICE
// =============================================================================

#[derive(Clone)]
pub struct StudioService {
    drafts: Arc<RwLock<HashMap<Uuid, StudioDraft>>>,
    campaigns: CampaignService,
    catalog: CatalogService,
}

impl StudioService {
    #[must_use]
    pub fn new(campaigns: CampaignService, catalog: CatalogService) -> Self {
        Self { drafts: Arc::new(RwLock::new(HashMap::new())), campaigns, catalog }
    }

    /// Open a blank t-shirt draft.
    pub async fn create(&self) -> StudioDraft {
        let draft = StudioDraft::new(Uuid::new_v4());
        self.drafts.write().await.insert(draft.id, draft.clone());
        info!(draft_id = %draft.id, "studio draft opened");
        draft
    }

    /// # Errors
    ///
    /// Returns `DraftNotFound` for an unknown id.
    pub async fn get(&self, id: Uuid) -> Result<StudioDraft, StudioError> {
        self.drafts.read().await.get(&id).cloned().ok_or(StudioError::DraftNotFound(id))
    }

    /// Drop a draft.
    ///
    /// # Errors
    ///
    /// Returns `DraftNotFound` for an unknown id.
    pub async fn discard(&self, id: Uuid) -> Result<(), StudioError> {
        self.drafts.write().await.remove(&id).map(|_| ()).ok_or(StudioError::DraftNotFound(id))
    }

    async fn with_draft_mut<F>(&self, id: Uuid, edit: F) -> Result<StudioDraft, StudioError>
    where
        F: FnOnce(&mut StudioDraft) -> Result<(), StudioError>,
    {
        let mut drafts = self.drafts.write().await;
        let draft = drafts.get_mut(&id).ok_or(StudioError::DraftNotFound(id))?;
        edit(draft)?;
        Ok(draft.clone())
    }

    /// Switch product. Pricing resets to the new product's default.
    ///
    /// # Errors
    ///
    /// Returns `DraftNotFound` for an unknown id.
    pub async fn set_product_type(&self, id: Uuid, product_type: ProductType) -> Result<StudioDraft, StudioError> {
        self.with_draft_mut(id, |draft| {
            draft.product_type = product_type;
            draft.pricing = product_type.default_pricing();
            Ok(())
        })
        .await
    }

    /// # Errors
    ///
    /// Returns `InvalidPricing` for non-positive or non-finite prices.
    pub async fn set_pricing(&self, id: Uuid, pricing: f64) -> Result<StudioDraft, StudioError> {
        if !(pricing.is_finite() && pricing > 0.0) {
            return Err(StudioError::InvalidPricing(pricing));
        }
        self.with_draft_mut(id, |draft| {
            draft.pricing = pricing;
            Ok(())
        })
        .await
    }

    /// Place a text element at the default drop position.
    ///
    /// # Errors
    ///
    /// Returns `BlankText` for empty content.
    pub async fn add_text(&self, id: Uuid, text: NewText) -> Result<StudioDraft, StudioError> {
        let element = design::text_element(
            &text.content,
            text.color.as_deref(),
            text.font_size,
            text.font_weight.as_deref(),
            text.font_family.as_deref(),
        )?;
        self.add_element(id, element).await
    }

    /// Place an uploaded image at the default drop position.
    ///
    /// # Errors
    ///
    /// Returns `MissingImageSource` for an empty `src`.
    pub async fn add_image(&self, id: Uuid, image: NewImage) -> Result<StudioDraft, StudioError> {
        if image.src.trim().is_empty() {
            return Err(StudioError::MissingImageSource);
        }
        let element = design::image_element(&image.src, image.width, image.height, None);
        self.add_element(id, element).await
    }

    /// Drop a clipart item as an image element.
    ///
    /// # Errors
    ///
    /// Returns `ClipartNotFound` for an unknown clipart id.
    pub async fn add_clipart(
        &self,
        id: Uuid,
        clipart_id: RecordId,
        position: Option<Position>,
    ) -> Result<StudioDraft, StudioError> {
        let clipart = self.catalog.clipart_item(clipart_id).await?;
        let element = design::image_element(&clipart.src, None, None, position);
        self.add_element(id, element).await
    }

    async fn add_element(&self, id: Uuid, element: Element) -> Result<StudioDraft, StudioError> {
        let element_id = element.id().to_string();
        let kind = element.kind();
        let draft = self
            .with_draft_mut(id, |draft| {
                draft.design = draft.design.with_element(element)?;
                draft.canvas.select(&draft.design, &element_id)?;
                Ok(())
            })
            .await?;
        info!(draft_id = %id, element_id = %element_id, kind, "element added");
        Ok(draft)
    }

    /// Move an element to a position, or drag it by a delta.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if the draft has no such element.
    pub async fn move_element(
        &self,
        id: Uuid,
        element_id: &str,
        movement: ElementMove,
    ) -> Result<StudioDraft, StudioError> {
        self.with_draft_mut(id, |draft| {
            draft.design = match movement {
                ElementMove::To { position } => draft.canvas.move_to(&draft.design, element_id, position)?,
                ElementMove::By { dx, dy } => draft.canvas.nudge(&draft.design, element_id, dx, dy)?,
            };
            Ok(())
        })
        .await
    }

    /// # Errors
    ///
    /// Returns `ElementNotFound` if the draft has no such element.
    pub async fn delete_element(&self, id: Uuid, element_id: &str) -> Result<StudioDraft, StudioError> {
        self.with_draft_mut(id, |draft| {
            draft.design = draft.canvas.delete(&draft.design, element_id)?;
            Ok(())
        })
        .await
    }

    /// Delete the selected element (the keyboard Delete key).
    ///
    /// # Errors
    ///
    /// Returns `NothingSelected` when no element is selected.
    pub async fn delete_selected(&self, id: Uuid) -> Result<StudioDraft, StudioError> {
        self.with_draft_mut(id, |draft| {
            draft.design = draft.canvas.delete_selected(&draft.design)?;
            Ok(())
        })
        .await
    }

    /// Select an element, or clear the selection with `None`.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if the draft has no such element.
    pub async fn select(&self, id: Uuid, element_id: Option<&str>) -> Result<StudioDraft, StudioError> {
        self.with_draft_mut(id, |draft| {
            match element_id {
                Some(element_id) => draft.canvas.select(&draft.design, element_id)?,
                None => draft.canvas.clear_selection(),
            }
            Ok(())
        })
        .await
    }

    /// Replace the draft's elements with fresh copies of a template's.
    ///
    /// # Errors
    ///
    /// Returns `TemplateNotFound` for an unknown template id.
    pub async fn apply_template(&self, id: Uuid, template_id: RecordId) -> Result<StudioDraft, StudioError> {
        let template = self.catalog.template(template_id).await?;
        let elements = template
            .design_data
            .elements
            .iter()
            .map(|e| e.with_id(design::new_element_id()))
            .collect();
        self.with_draft_mut(id, |draft| {
            draft.design = Design { elements };
            draft.canvas.reconcile(&draft.design);
            Ok(())
        })
        .await
    }

    /// Start over with a blank t-shirt design under the same draft id.
    ///
    /// # Errors
    ///
    /// Returns `DraftNotFound` for an unknown id.
    pub async fn reset(&self, id: Uuid) -> Result<StudioDraft, StudioError> {
        self.with_draft_mut(id, |draft| {
            *draft = StudioDraft::new(id);
            Ok(())
        })
        .await
    }

    /// Save the draft as a new campaign and close it. A failed save keeps
    /// the draft open for another attempt.
    ///
    /// # Errors
    ///
    /// Returns `EmptyDesign` when the design has no elements.
    pub async fn save(&self, id: Uuid) -> Result<Campaign, StudioError> {
        let snapshot = self.get(id).await?;
        if snapshot.design.is_empty() {
            return Err(StudioError::EmptyDesign);
        }

        let campaign = self
            .campaigns
            .create(NewCampaign {
                product_type: snapshot.product_type,
                design_data: snapshot.design,
                pricing: snapshot.pricing,
            })
            .await?;

        // Already gone if discarded while the campaign was written.
        self.drafts.write().await.remove(&id);
        info!(draft_id = %id, campaign_id = campaign.id, elements = campaign.design_data.len(), "studio draft saved");
        Ok(campaign)
    }
}

#[cfg(test)]
#[path = "studio_test.rs"]
mod tests;
