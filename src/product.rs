//! Product catalog: the two customizable product types and their defaults.

use serde::{Deserialize, Serialize};

/// Merchandise a campaign can be printed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Tshirt,
    Mug,
}

const TSHIRT_SIZES: &[&str] = &["XS", "S", "M", "L", "XL", "XXL"];
const MUG_SIZES: &[&str] = &["Standard"];

/// Pixel dimensions of the design canvas for a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl ProductType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tshirt => "tshirt",
            Self::Mug => "mug",
        }
    }

    /// Human-facing name, e.g. for badges and CSV-adjacent reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Tshirt => "T-Shirt",
            Self::Mug => "Mug",
        }
    }

    /// Starting unit price when this product is picked in the studio.
    #[must_use]
    pub fn default_pricing(self) -> f64 {
        match self {
            Self::Tshirt => 24.99,
            Self::Mug => 19.99,
        }
    }

    /// Per-unit cost of printing one item.
    #[must_use]
    pub fn production_cost(self) -> f64 {
        match self {
            Self::Tshirt => 12.0,
            Self::Mug => 8.0,
        }
    }

    #[must_use]
    pub fn sizes(self) -> &'static [&'static str] {
        match self {
            Self::Tshirt => TSHIRT_SIZES,
            Self::Mug => MUG_SIZES,
        }
    }

    #[must_use]
    pub fn default_size(self) -> &'static str {
        match self {
            Self::Tshirt => "M",
            Self::Mug => "Standard",
        }
    }

    #[must_use]
    pub fn accepts_size(self, size: &str) -> bool {
        self.sizes().contains(&size)
    }

    #[must_use]
    pub fn canvas_size(self) -> CanvasSize {
        match self {
            Self::Tshirt => CanvasSize { width: 400.0, height: 480.0 },
            Self::Mug => CanvasSize { width: 350.0, height: 320.0 },
        }
    }
}

/// Share of the selling price kept by the platform.
pub const PLATFORM_FEE_RATE: f64 = 0.1;

/// Per-unit profit for a selling price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitBreakdown {
    pub selling_price: f64,
    pub production_cost: f64,
    pub platform_fee: f64,
    pub profit: f64,
}

impl ProfitBreakdown {
    #[must_use]
    pub fn new(product: ProductType, selling_price: f64) -> Self {
        let production_cost = product.production_cost();
        let platform_fee = selling_price * PLATFORM_FEE_RATE;
        Self { selling_price, production_cost, platform_fee, profit: selling_price - production_cost - platform_fee }
    }
}

/// Product filter used by the orders views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductFilter {
    #[default]
    All,
    Tshirt,
    Mug,
}

impl ProductFilter {
    /// Whether an order whose campaign has `product` passes this filter.
    /// Orders with an unknown campaign only pass `All`.
    #[must_use]
    pub fn matches(self, product: Option<ProductType>) -> bool {
        match self {
            Self::All => true,
            Self::Tshirt => product == Some(ProductType::Tshirt),
            Self::Mug => product == Some(ProductType::Mug),
        }
    }
}

#[cfg(test)]
#[path = "product_test.rs"]
mod tests;
