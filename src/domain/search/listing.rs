//! Normalized product and listing shapes.

use serde::Serialize;

use crate::domain::catalog::Retailer;
use crate::domain::foundation::{ListingId, ProductId};

/// A product fabricated by the search collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
}

/// One retailer's offer for a product, attributed to a catalog retailer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub id: ListingId,
    pub product_id: ProductId,
    pub retailer: Retailer,
    /// Price in USD.
    pub price: f64,
    pub shipping_days: u32,
    /// Shipping cost in USD.
    pub shipping_cost: f64,
    pub rating: f64,
    pub review_count: u32,
    pub url: String,
    pub return_policy: String,
    pub image: String,
}

impl Listing {
    /// Price plus shipping, the ranking key.
    pub fn total_cost(&self) -> f64 {
        self.price + self.shipping_cost
    }

    pub fn store_id(&self) -> &'static str {
        self.retailer.id
    }
}

/// A product together with its (ranked) listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonData {
    pub product: Product,
    pub listings: Vec<Listing>,
}
