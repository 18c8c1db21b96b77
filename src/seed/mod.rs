//! Startup datasets embedded at compile time.

use serde::de::DeserializeOwned;

use crate::services::campaign::{self, Campaign};
use crate::services::catalog::{Clipart, Template};
use crate::services::order::Order;

const CAMPAIGNS: &str = include_str!("campaigns.json");
const ORDERS: &str = include_str!("orders.json");
const TEMPLATES: &str = include_str!("templates.json");
const CLIPART: &str = include_str!("clipart.json");

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("seed dataset {dataset} is malformed: {source}")]
    Parse {
        dataset: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Every seeded record sequence.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub campaigns: Vec<Campaign>,
    pub orders: Vec<Order>,
    pub templates: Vec<Template>,
    pub clipart: Vec<Clipart>,
}

fn parse<T: DeserializeOwned>(dataset: &'static str, raw: &str) -> Result<Vec<T>, SeedError> {
    serde_json::from_str(raw).map_err(|source| SeedError::Parse { dataset, source })
}

/// Parse the embedded datasets. Seeded share URLs are rebased onto
/// `public_base_url` so they resolve against this deployment.
///
/// # Errors
///
/// Returns `Parse` naming the first dataset that fails to deserialize.
pub fn load(public_base_url: &str) -> Result<SeedData, SeedError> {
    let mut campaigns: Vec<Campaign> = parse("campaigns", CAMPAIGNS)?;
    for c in &mut campaigns {
        c.share_url = campaign::share_url(public_base_url, c.id);
    }
    Ok(SeedData {
        campaigns,
        orders: parse("orders", ORDERS)?,
        templates: parse("templates", TEMPLATES)?,
        clipart: parse("clipart", CLIPART)?,
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
