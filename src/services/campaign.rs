//! Campaign service: saved designs offered for preorder.
//!
//! DESIGN
//! ======
//! Campaigns live in a `MemoryStore` seeded at startup. The share URL is
//! derived from the assigned id at create time, so every saved campaign
//! resolves to its own public product page.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use crate::design::{Design, DesignError};
use crate::error::ErrorCode;
use crate::product::ProductType;
use crate::store::{Clock, MemoryStore, Record, RecordId, StoreError};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub product_type: ProductType,
    pub design_data: Design,
    pub pricing: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub share_url: String,
}

impl Record for Campaign {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Fields supplied by the studio when saving a campaign.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    pub product_type: ProductType,
    pub design_data: Design,
    pub pricing: f64,
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPatch {
    pub product_type: Option<ProductType>,
    pub design_data: Option<Design>,
    pub pricing: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum CampaignError {
    #[error("campaign not found: {0}")]
    NotFound(RecordId),
    #[error("pricing must be a positive amount, got {0}")]
    InvalidPricing(f64),
    #[error(transparent)]
    Design(#[from] DesignError),
}

impl ErrorCode for CampaignError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_CAMPAIGN_NOT_FOUND",
            Self::InvalidPricing(_) => "E_INVALID_PRICING",
            Self::Design(e) => e.error_code(),
        }
    }
}

impl From<StoreError> for CampaignError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
        }
    }
}

/// Public order page for a campaign.
#[must_use]
pub fn share_url(public_base_url: &str, id: RecordId) -> String {
    format!("{}/product/{id}", public_base_url.trim_end_matches('/'))
}

fn validate_pricing(pricing: f64) -> Result<(), CampaignError> {
    if pricing.is_finite() && pricing > 0.0 {
        Ok(())
    } else {
        Err(CampaignError::InvalidPricing(pricing))
    }
}

// =============================================================================
// SERVICE
// =============================================================================

#[derive(Clone)]
pub struct CampaignService {
    store: MemoryStore<Campaign>,
    clock: Arc<dyn Clock>,
    public_base_url: String,
}

impl CampaignService {
    #[must_use]
    pub fn new(store: MemoryStore<Campaign>, clock: Arc<dyn Clock>, public_base_url: impl Into<String>) -> Self {
        Self { store, clock, public_base_url: public_base_url.into() }
    }

    pub async fn get_all(&self) -> Vec<Campaign> {
        self.store.get_all().await
    }

    /// Missing campaigns are `None`, not an error.
    pub async fn get_by_id(&self, id: RecordId) -> Option<Campaign> {
        self.store.get_by_id(id).await
    }

    /// Like `get_by_id`, for callers that treat absence as a failure.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no campaign has `id`.
    pub async fn expect_by_id(&self, id: RecordId) -> Result<Campaign, CampaignError> {
        self.get_by_id(id).await.ok_or(CampaignError::NotFound(id))
    }

    /// Persist a new campaign, stamping `createdAt` and `shareUrl`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPricing` for non-positive or non-finite pricing, or
    /// `Design` when two elements share an id.
    pub async fn create(&self, new: NewCampaign) -> Result<Campaign, CampaignError> {
        validate_pricing(new.pricing)?;
        new.design_data.validate()?;
        let created_at = self.clock.now();
        let base = self.public_base_url.clone();
        let campaign = self
            .store
            .create(move |id| Campaign {
                id,
                product_type: new.product_type,
                design_data: new.design_data,
                pricing: new.pricing,
                created_at,
                share_url: share_url(&base, id),
            })
            .await;
        info!(
            campaign_id = campaign.id,
            product = campaign.product_type.as_str(),
            elements = campaign.design_data.len(),
            "campaign created"
        );
        Ok(campaign)
    }

    /// Merge the supplied fields into campaign `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no campaign has `id`. Bad fields fail with
    /// `InvalidPricing` or `Design` before anything is written.
    pub async fn update(&self, id: RecordId, patch: CampaignPatch) -> Result<Campaign, CampaignError> {
        if let Some(pricing) = patch.pricing {
            validate_pricing(pricing)?;
        }
        if let Some(design_data) = &patch.design_data {
            design_data.validate()?;
        }
        let campaign = self
            .store
            .update(id, |campaign| {
                if let Some(product_type) = patch.product_type {
                    campaign.product_type = product_type;
                }
                if let Some(design_data) = patch.design_data {
                    campaign.design_data = design_data;
                }
                if let Some(pricing) = patch.pricing {
                    campaign.pricing = pricing;
                }
            })
            .await?;
        info!(campaign_id = id, "campaign updated");
        Ok(campaign)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no campaign has `id`.
    pub async fn delete(&self, id: RecordId) -> Result<(), CampaignError> {
        self.store.delete(id).await?;
        info!(campaign_id = id, "campaign deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "campaign_test.rs"]
mod tests;
