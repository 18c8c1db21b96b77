//! Order service: preorders placed against a campaign.
//!
//! DESIGN
//! ======
//! Orders are validated against the campaign they target before they reach
//! the store: customer fields must be present, the email must look like an
//! address, quantity stays within `MIN_QUANTITY..=MAX_QUANTITY` and the size
//! must be one the campaign's product is sold in. The total is priced from
//! the campaign at placement time and rounded to cents.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use crate::error::ErrorCode;
use crate::product::ProductType;
use crate::services::campaign::Campaign;
use crate::store::{Clock, MemoryStore, Record, RecordId, StoreError};

pub const MIN_QUANTITY: i64 = 1;
pub const MAX_QUANTITY: i64 = 10;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub campaign_id: RecordId,
    pub customer_name: String,
    pub customer_email: String,
    pub size: String,
    pub quantity: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub total_amount: f64,
}

impl Record for Order {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Order form submitted from the public product page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    /// Falls back to the product's default size.
    pub size: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    MIN_QUANTITY
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub size: Option<String>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("order not found: {0}")]
    NotFound(RecordId),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("quantity must be between {MIN_QUANTITY} and {MAX_QUANTITY}, got {0}")]
    QuantityOutOfRange(i64),
    #[error("size {size} is not available for {product}")]
    InvalidSize { size: String, product: &'static str },
}

impl ErrorCode for OrderError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_ORDER_NOT_FOUND",
            Self::MissingField(_) => "E_MISSING_FIELD",
            Self::InvalidEmail(_) => "E_INVALID_EMAIL",
            Self::QuantityOutOfRange(_) => "E_QUANTITY_OUT_OF_RANGE",
            Self::InvalidSize { .. } => "E_INVALID_SIZE",
        }
    }
}

impl From<StoreError> for OrderError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
        }
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// `pricing * quantity`, rounded to cents.
#[must_use]
pub fn order_total(pricing: f64, quantity: u32) -> f64 {
    (pricing * f64::from(quantity) * 100.0).round() / 100.0
}

fn required(value: &str, field: &'static str) -> Result<String, OrderError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(OrderError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn checked_email(value: &str) -> Result<String, OrderError> {
    let email = required(value, "customerEmail")?;
    if !email.contains('@') {
        return Err(OrderError::InvalidEmail(email));
    }
    Ok(email)
}

fn checked_quantity(quantity: i64) -> Result<u32, OrderError> {
    if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
        return Err(OrderError::QuantityOutOfRange(quantity));
    }
    u32::try_from(quantity).map_err(|_| OrderError::QuantityOutOfRange(quantity))
}

fn checked_size(size: &str, product: ProductType) -> Result<String, OrderError> {
    if !product.accepts_size(size) {
        return Err(OrderError::InvalidSize { size: size.to_string(), product: product.as_str() });
    }
    Ok(size.to_string())
}

// =============================================================================
// SERVICE
// =============================================================================

#[derive(Clone)]
pub struct OrderService {
    store: MemoryStore<Order>,
    clock: Arc<dyn Clock>,
}

impl OrderService {
    #[must_use]
    pub fn new(store: MemoryStore<Order>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn get_all(&self) -> Vec<Order> {
        self.store.get_all().await
    }

    pub async fn get_by_id(&self, id: RecordId) -> Option<Order> {
        self.store.get_by_id(id).await
    }

    pub async fn get_by_campaign_id(&self, campaign_id: RecordId) -> Vec<Order> {
        self.store.filter(|order| order.campaign_id == campaign_id).await
    }

    /// Validate `request` against `campaign` and store the order.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure; nothing is stored in that case.
    pub async fn place(&self, campaign: &Campaign, request: OrderRequest) -> Result<Order, OrderError> {
        let customer_name = required(&request.customer_name, "customerName")?;
        let customer_email = checked_email(&request.customer_email)?;
        let quantity = checked_quantity(request.quantity)?;
        let size = checked_size(
            request.size.as_deref().unwrap_or(campaign.product_type.default_size()),
            campaign.product_type,
        )?;

        let campaign_id = campaign.id;
        let total_amount = order_total(campaign.pricing, quantity);
        let timestamp = self.clock.now();
        let order = self
            .store
            .create(move |id| Order {
                id,
                campaign_id,
                customer_name,
                customer_email,
                size,
                quantity,
                timestamp,
                total_amount,
            })
            .await;
        info!(order_id = order.id, campaign_id, quantity, total_amount, "order placed");
        Ok(order)
    }

    /// Merge the supplied fields into order `id`.
    ///
    /// `campaign` is the order's campaign when it still exists. With it, the
    /// size is checked against the product and a quantity change re-prices
    /// the order. Without it, the stored total is kept.
    ///
    /// # Errors
    ///
    /// Returns a validation error, or `NotFound` if no order has `id`.
    pub async fn update(
        &self,
        id: RecordId,
        patch: OrderPatch,
        campaign: Option<&Campaign>,
    ) -> Result<Order, OrderError> {
        let customer_name = patch.customer_name.as_deref().map(|v| required(v, "customerName")).transpose()?;
        let customer_email = patch.customer_email.as_deref().map(checked_email).transpose()?;
        let quantity = patch.quantity.map(checked_quantity).transpose()?;
        let size = match (patch.size.as_deref(), campaign) {
            (Some(size), Some(campaign)) => Some(checked_size(size, campaign.product_type)?),
            (Some(size), None) => Some(required(size, "size")?),
            (None, _) => None,
        };
        let pricing = campaign.map(|c| c.pricing);

        let order = self
            .store
            .update(id, |order| {
                if let Some(name) = customer_name {
                    order.customer_name = name;
                }
                if let Some(email) = customer_email {
                    order.customer_email = email;
                }
                if let Some(size) = size {
                    order.size = size;
                }
                if let Some(quantity) = quantity {
                    order.quantity = quantity;
                    if let Some(pricing) = pricing {
                        order.total_amount = order_total(pricing, quantity);
                    }
                }
            })
            .await?;
        info!(order_id = id, "order updated");
        Ok(order)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no order has `id`.
    pub async fn delete(&self, id: RecordId) -> Result<(), OrderError> {
        self.store.delete(id).await?;
        info!(order_id = id, "order deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "order_test.rs"]
mod tests;
