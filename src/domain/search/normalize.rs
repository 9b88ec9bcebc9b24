//! Boundary normalization of the search collaborator's response.
//!
//! The generative service returns loosely-typed JSON. It is validated here,
//! immediately on receipt, into the strict [`Product`] / [`Listing`] shapes.
//! Listings missing a required field are dropped rather than propagated.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{ComparisonData, Listing, Product, SearchError};
use crate::domain::catalog::{encode_query_component, match_retailer};
use crate::domain::foundation::{ListingId, ProductId};

const DEFAULT_RETURN_POLICY: &str = "30-day returns";
const DEFAULT_CATEGORY: &str = "Marketplace";
const MAX_SIMULATED_REVIEWS: u32 = 5000;

/// Raw response body as produced by the search collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchResponse {
    pub product: Option<RawProduct>,
    #[serde(default)]
    pub listings: Vec<RawListing>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    pub store_name: Option<String>,
    pub price: Option<f64>,
    pub shipping_days: Option<f64>,
    pub shipping_cost: Option<f64>,
    pub rating: Option<f64>,
    pub review_count: Option<f64>,
    pub return_policy: Option<String>,
}

/// Validates a raw response into comparison data (listings unranked).
///
/// # Errors
///
/// Returns `SearchError::MalformedResponse` when the product block or its
/// name is missing. Individual bad listings are skipped.
pub fn normalize_response(
    query: &str,
    raw: RawSearchResponse,
) -> Result<ComparisonData, SearchError> {
    let raw_product = raw
        .product
        .ok_or_else(|| SearchError::malformed("response has no product"))?;
    let name = raw_product
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| SearchError::malformed("product has no name"))?;

    let product = Product {
        id: ProductId::generate(),
        description: raw_product.description.unwrap_or_default(),
        image: format!(
            "https://picsum.photos/seed/{}/600/600",
            encode_query_component(query)
        ),
        category: DEFAULT_CATEGORY.to_string(),
        name,
    };

    let total = raw.listings.len();
    let listings: Vec<Listing> = raw
        .listings
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw_listing)| normalize_listing(&product, index, raw_listing))
        .collect();

    if listings.len() < total {
        tracing::debug!(
            kept = listings.len(),
            dropped = total - listings.len(),
            "Dropped listings missing required fields"
        );
    }

    Ok(ComparisonData { product, listings })
}

fn normalize_listing(product: &Product, index: usize, raw: RawListing) -> Option<Listing> {
    let store_name = raw.store_name?;
    let price = non_negative(raw.price?)?;
    let shipping_days = non_negative(raw.shipping_days?)?;
    let rating = non_negative(raw.rating?)?;
    let shipping_cost = raw.shipping_cost.and_then(non_negative).unwrap_or(0.0);

    let retailer = *match_retailer(&store_name, index);
    let review_count = raw
        .review_count
        .and_then(non_negative)
        .map(|count| count.round() as u32)
        .unwrap_or_else(|| rand::thread_rng().gen_range(0..MAX_SIMULATED_REVIEWS));
    let return_policy = raw
        .return_policy
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_RETURN_POLICY.to_string());

    Some(Listing {
        id: ListingId::from_index(index),
        product_id: product.id.clone(),
        url: retailer.search_url(&product.name),
        image: format!(
            "https://picsum.photos/seed/{}-{}/140/140",
            retailer.id,
            encode_query_component(&product.name)
        ),
        retailer,
        price,
        shipping_days: shipping_days.round() as u32,
        shipping_cost,
        rating,
        review_count,
        return_policy,
    })
}

fn non_negative(value: f64) -> Option<f64> {
    (value.is_finite() && value >= 0.0).then_some(value)
}
