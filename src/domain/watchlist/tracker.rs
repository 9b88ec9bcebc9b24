use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProductId, Timestamp};

/// A tracked product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchItem {
    pub product_id: ProductId,
    /// Price alert threshold. Always 0 (no alert configured).
    pub target_price: f64,
    pub added_at: Timestamp,
}

impl WatchItem {
    fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            target_price: 0.0,
            added_at: Timestamp::now(),
        }
    }
}

/// Insertion-ordered set of watched products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Watchlist {
    items: Vec<WatchItem>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the product if absent, removes it if present.
    ///
    /// Returns true if the product is now tracked.
    pub fn toggle(&mut self, product_id: &ProductId) -> bool {
        if let Some(pos) = self.items.iter().position(|w| &w.product_id == product_id) {
            self.items.remove(pos);
            tracing::debug!(product_id = %product_id, "Stopped watching product");
            false
        } else {
            self.items.push(WatchItem::new(product_id.clone()));
            tracing::debug!(product_id = %product_id, "Watching product");
            true
        }
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|w| &w.product_id == product_id)
    }

    pub fn items(&self) -> &[WatchItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pid(id: &str) -> ProductId {
        ProductId::new(id).unwrap()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut list = Watchlist::new();
        assert!(list.toggle(&pid("p1")));
        assert!(list.contains(&pid("p1")));
        assert_eq!(list.items()[0].target_price, 0.0);

        assert!(!list.toggle(&pid("p1")));
        assert!(list.is_empty());
    }

    #[test]
    fn keeps_insertion_order() {
        let mut list = Watchlist::new();
        list.toggle(&pid("b"));
        list.toggle(&pid("a"));
        let ids: Vec<&str> = list.items().iter().map(|w| w.product_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    proptest! {
        #[test]
        fn double_toggle_restores_membership(
            existing in proptest::collection::hash_set("[a-z]{1,6}", 0..8),
            target in "[a-z]{1,6}",
        ) {
            let mut list = Watchlist::new();
            for id in &existing {
                list.toggle(&pid(id));
            }
            let before = list.contains(&pid(&target));
            let len = list.len();

            list.toggle(&pid(&target));
            list.toggle(&pid(&target));

            prop_assert_eq!(list.contains(&pid(&target)), before);
            prop_assert_eq!(list.len(), len);
        }

        #[test]
        fn ids_are_unique(ops in proptest::collection::vec("[a-c]", 0..30)) {
            let mut list = Watchlist::new();
            for id in &ops {
                list.toggle(&pid(id));
            }
            let mut ids: Vec<&str> = list.items().iter().map(|w| w.product_id.as_str()).collect();
            let total = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), total);
        }
    }
}
