//! Listing ranker.

use super::Listing;

/// Orders listings by total cost and keeps the first `entitlement`.
///
/// The sort is stable: listings with equal totals keep their input order.
/// An empty input yields an empty output.
pub fn rank(mut listings: Vec<Listing>, entitlement: usize) -> Vec<Listing> {
    listings.sort_by(|a, b| a.total_cost().total_cmp(&b.total_cost()));
    listings.truncate(entitlement);
    listings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::all_retailers;
    use crate::domain::foundation::{ListingId, ProductId};
    use proptest::prelude::*;

    fn listing(index: usize, price: f64, shipping_cost: f64) -> Listing {
        let retailer = all_retailers()[index % all_retailers().len()];
        Listing {
            id: ListingId::from_index(index),
            product_id: ProductId::new("p1").unwrap(),
            retailer,
            price,
            shipping_days: 3,
            shipping_cost,
            rating: 4.5,
            review_count: 100,
            url: retailer.search_url("Widget"),
            return_policy: "30-day returns".to_string(),
            image: String::new(),
        }
    }

    fn ids(listings: &[Listing]) -> Vec<String> {
        listings.iter().map(|l| l.id.to_string()).collect()
    }

    #[test]
    fn sorts_by_price_plus_shipping() {
        let ranked = rank(
            vec![
                listing(0, 50.0, 0.0),
                listing(1, 40.0, 15.0),
                listing(2, 45.0, 2.0),
            ],
            10,
        );
        assert_eq!(ids(&ranked), vec!["list-2", "list-0", "list-1"]);
    }

    #[test]
    fn equal_totals_keep_input_order() {
        let ranked = rank(
            vec![
                listing(0, 10.0, 5.0),
                listing(1, 15.0, 0.0),
                listing(2, 12.0, 3.0),
            ],
            10,
        );
        assert_eq!(ids(&ranked), vec!["list-0", "list-1", "list-2"]);
    }

    #[test]
    fn truncates_after_sorting() {
        let ranked = rank(
            vec![
                listing(0, 90.0, 0.0),
                listing(1, 10.0, 0.0),
                listing(2, 50.0, 0.0),
            ],
            2,
        );
        assert_eq!(ids(&ranked), vec!["list-1", "list-2"]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(rank(Vec::new(), 10).is_empty());
    }

    fn listings_strategy() -> impl Strategy<Value = Vec<Listing>> {
        prop::collection::vec((0.0f64..500.0, 0.0f64..30.0), 0..40).prop_map(|pairs| {
            pairs
                .into_iter()
                .enumerate()
                .map(|(i, (price, shipping))| listing(i, price, shipping))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn never_exceeds_entitlement_or_input(listings in listings_strategy(), n in 0usize..50) {
            let len = listings.len();
            let ranked = rank(listings, n);
            prop_assert!(ranked.len() <= n);
            prop_assert!(ranked.len() <= len);
            prop_assert_eq!(ranked.len(), n.min(len));
        }

        #[test]
        fn reranking_is_idempotent(listings in listings_strategy(), n in 0usize..50) {
            let once = rank(listings, n);
            let twice = rank(once.clone(), n);
            prop_assert_eq!(ids(&once), ids(&twice));
        }

        #[test]
        fn output_is_sorted_by_total(listings in listings_strategy()) {
            let ranked = rank(listings, usize::MAX);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].total_cost() <= pair[1].total_cost());
            }
        }
    }
}
