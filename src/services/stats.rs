//! Order analytics for the campaign, orders and product screens.
//!
//! Revenue is always recomputed as `quantity * campaign pricing` rather than
//! summed from stored totals, so a repriced campaign reports at its current
//! price. Orders whose campaign no longer exists contribute zero revenue.

use std::collections::HashMap;

use serde::Serialize;

use crate::product::{ProductFilter, ProductType};
use crate::services::campaign::Campaign;
use crate::services::order::Order;
use crate::store::RecordId;

/// Items a campaign needs before it goes to print.
pub const PRODUCTION_MINIMUM: u32 = 25;

/// Round a currency amount to cents.
#[must_use]
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn items(orders: &[&Order]) -> u32 {
    orders.iter().map(|o| o.quantity).sum()
}

#[allow(clippy::cast_precision_loss)]
fn average(total: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { total / count as f64 }
}

// =============================================================================
// CAMPAIGN STATUS
// =============================================================================

/// Badge shown next to a campaign, by number of orders received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    NoOrders,
    GettingStarted,
    BuildingMomentum,
    ReadyToPrint,
}

impl CampaignStatus {
    #[must_use]
    pub fn from_order_count(count: usize) -> Self {
        match count {
            0 => Self::NoOrders,
            1..10 => Self::GettingStarted,
            10..25 => Self::BuildingMomentum,
            _ => Self::ReadyToPrint,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NoOrders => "No Orders",
            Self::GettingStarted => "Getting Started",
            Self::BuildingMomentum => "Building Momentum",
            Self::ReadyToPrint => "Ready to Print",
        }
    }
}

// =============================================================================
// CAMPAIGN STATS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeShare {
    pub size: String,
    pub quantity: u32,
    /// Share of all items sold, 0..=100.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignStats {
    pub campaign_id: RecordId,
    pub total_orders: usize,
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub items_sold: u32,
    /// Quantity per size, in size-chart order. T-shirts only.
    pub size_distribution: Vec<SizeShare>,
    pub status: CampaignStatus,
    pub status_label: &'static str,
}

impl CampaignStats {
    /// Stats for `campaign` over `orders`. Orders for other campaigns are ignored.
    #[must_use]
    pub fn compute(campaign: &Campaign, orders: &[Order]) -> Self {
        let own: Vec<&Order> = orders.iter().filter(|o| o.campaign_id == campaign.id).collect();
        let items_sold = items(&own);
        let revenue = f64::from(items_sold) * campaign.pricing;
        let status = CampaignStatus::from_order_count(own.len());
        Self {
            campaign_id: campaign.id,
            total_orders: own.len(),
            total_revenue: round_cents(revenue),
            average_order_value: round_cents(average(revenue, own.len())),
            items_sold,
            size_distribution: size_distribution(campaign.product_type, &own, items_sold),
            status,
            status_label: status.label(),
        }
    }
}

fn size_distribution(product: ProductType, orders: &[&Order], items_sold: u32) -> Vec<SizeShare> {
    if product != ProductType::Tshirt || items_sold == 0 {
        return Vec::new();
    }
    let mut by_size: HashMap<&str, u32> = HashMap::new();
    for order in orders {
        *by_size.entry(order.size.as_str()).or_default() += order.quantity;
    }
    // Chart sizes first, then anything off-chart in first-seen order.
    let mut sizes: Vec<&str> = product.sizes().iter().copied().filter(|s| by_size.contains_key(s)).collect();
    for order in orders {
        if !sizes.contains(&order.size.as_str()) {
            sizes.push(order.size.as_str());
        }
    }
    sizes
        .into_iter()
        .map(|size| {
            let quantity = by_size[size];
            SizeShare {
                size: size.to_string(),
                quantity,
                percent: f64::from(quantity) * 100.0 / f64::from(items_sold),
            }
        })
        .collect()
}

// =============================================================================
// PRODUCTION PROGRESS
// =============================================================================

/// Progress towards `PRODUCTION_MINIMUM` shown on the public product page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionProgress {
    pub items_ordered: u32,
    pub minimum: u32,
    pub remaining: u32,
    /// Capped at 100.
    pub percent: f64,
    pub ready: bool,
    pub message: String,
}

impl ProductionProgress {
    #[must_use]
    pub fn from_items(items_ordered: u32) -> Self {
        let remaining = PRODUCTION_MINIMUM.saturating_sub(items_ordered);
        let ready = remaining == 0;
        Self {
            items_ordered,
            minimum: PRODUCTION_MINIMUM,
            remaining,
            percent: (f64::from(items_ordered) * 100.0 / f64::from(PRODUCTION_MINIMUM)).min(100.0),
            ready,
            message: if ready { "Ready for production!".to_string() } else { format!("{remaining} more needed") },
        }
    }
}

// =============================================================================
// ORDERS SUMMARY
// =============================================================================

/// Campaign lookup by id.
#[must_use]
pub fn index_campaigns(campaigns: &[Campaign]) -> HashMap<RecordId, &Campaign> {
    campaigns.iter().map(|c| (c.id, c)).collect()
}

/// Orders whose campaign product passes `filter`, in stored order.
#[must_use]
pub fn filter_orders<'a>(
    orders: &'a [Order],
    campaigns: &HashMap<RecordId, &Campaign>,
    filter: ProductFilter,
) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|o| filter.matches(campaigns.get(&o.campaign_id).map(|c| c.product_type)))
        .collect()
}

/// Revenue of one order at its campaign's current price.
#[must_use]
pub fn order_revenue(order: &Order, campaigns: &HashMap<RecordId, &Campaign>) -> f64 {
    let pricing = campaigns.get(&order.campaign_id).map_or(0.0, |c| c.pricing);
    f64::from(order.quantity) * pricing
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterCounts {
    pub all: usize,
    pub tshirt: usize,
    pub mug: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersSummary {
    pub filter: ProductFilter,
    pub order_count: usize,
    pub total_items: u32,
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub counts: FilterCounts,
}

impl OrdersSummary {
    #[must_use]
    pub fn compute(orders: &[Order], campaigns: &[Campaign], filter: ProductFilter) -> Self {
        let index = index_campaigns(campaigns);
        let selected = filter_orders(orders, &index, filter);
        let revenue: f64 = selected.iter().map(|o| order_revenue(o, &index)).sum();
        Self {
            filter,
            order_count: selected.len(),
            total_items: items(&selected),
            total_revenue: round_cents(revenue),
            average_order_value: round_cents(average(revenue, selected.len())),
            counts: FilterCounts {
                all: orders.len(),
                tshirt: filter_orders(orders, &index, ProductFilter::Tshirt).len(),
                mug: filter_orders(orders, &index, ProductFilter::Mug).len(),
            },
        }
    }
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod tests;
