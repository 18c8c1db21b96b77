//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds one service per entity. Every service is a cheap handle over
//! `Arc`-shared stores, so cloning the state per request is free.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::seed::SeedData;
use crate::services::campaign::CampaignService;
use crate::services::catalog::CatalogService;
use crate::services::order::OrderService;
use crate::services::studio::StudioService;
use crate::store::{Clock, MemoryStore};

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub campaigns: CampaignService,
    pub orders: OrderService,
    pub catalog: CatalogService,
    pub studio: StudioService,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    #[must_use]
    pub fn new(config: &AppConfig, seed: SeedData, clock: Arc<dyn Clock>) -> Self {
        let latency = config.latency;
        let campaigns = CampaignService::new(
            MemoryStore::new(seed.campaigns, latency),
            Arc::clone(&clock),
            config.public_base_url.clone(),
        );
        let orders = OrderService::new(MemoryStore::new(seed.orders, latency), Arc::clone(&clock));
        let catalog = CatalogService::new(
            MemoryStore::new(seed.templates, latency),
            MemoryStore::new(seed.clipart, latency),
        );
        let studio = StudioService::new(campaigns.clone(), catalog.clone());
        Self { campaigns, orders, catalog, studio, clock }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::seed;
    use crate::store::{FixedClock, Latency};
    use time::OffsetDateTime;
    use time::macros::datetime;

    pub const TEST_BASE_URL: &str = "http://shop.test";
    pub const TEST_NOW: OffsetDateTime = datetime!(2024-03-05 14:07 UTC);

    #[must_use]
    pub fn test_config() -> AppConfig {
        AppConfig { port: 3000, public_base_url: TEST_BASE_URL.into(), latency: Latency::none() }
    }

    /// Zero-latency state over the embedded seed with a fixed clock.
    #[must_use]
    pub fn test_app_state() -> AppState {
        let seed = seed::load(TEST_BASE_URL).expect("embedded seed should parse");
        AppState::new(&test_config(), seed, Arc::new(FixedClock(TEST_NOW)))
    }

    /// Zero-latency state with nothing seeded.
    #[must_use]
    pub fn empty_app_state() -> AppState {
        let seed = SeedData { campaigns: vec![], orders: vec![], templates: vec![], clipart: vec![] };
        AppState::new(&test_config(), seed, Arc::new(FixedClock(TEST_NOW)))
    }
}
