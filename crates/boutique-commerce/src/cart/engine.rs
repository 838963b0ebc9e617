//! Persisted cart state container.

use crate::cart::{Cart, CartLine, CartTotals, CouponTable, ShippingPolicy};
use crate::catalog::Product;
use crate::ids::ProductId;
use boutique_cache::{Cache, SnapshotRepository};
use tracing::{debug, warn};

/// Fixed key for the persisted cart lines.
pub const CART_KEY: &str = "cart";

/// Owns the cart and mirrors every mutation to a snapshot repository.
///
/// Mirroring is synchronous and best effort: a failed write is logged and
/// the in-memory cart stays authoritative.
#[derive(Debug)]
pub struct CartEngine {
    cart: Cart,
    coupons: CouponTable,
    shipping: ShippingPolicy,
    repo: SnapshotRepository<Vec<CartLine>>,
}

impl CartEngine {
    /// Restore the cart from `repo`.
    ///
    /// Absent or unreadable snapshots start an empty cart.
    pub fn restore(
        repo: SnapshotRepository<Vec<CartLine>>,
        coupons: CouponTable,
        shipping: ShippingPolicy,
    ) -> Self {
        let cart = match repo.load() {
            Ok(Some(lines)) => {
                debug!(lines = lines.len(), "restored cart");
                Cart::from_lines(lines)
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, key = repo.key(), "discarding unreadable cart snapshot");
                Cart::new()
            }
        };
        Self {
            cart,
            coupons,
            shipping,
            repo,
        }
    }

    /// Restore from the `cart` key of a cache with default pricing rules.
    pub fn open(cache: Cache) -> Self {
        Self::restore(
            SnapshotRepository::new(cache, CART_KEY),
            CouponTable::default(),
            ShippingPolicy::default(),
        )
    }

    /// An engine over an ephemeral in-memory cache.
    pub fn in_memory() -> Self {
        Self::open(Cache::memory())
    }

    pub fn add_item(&mut self, product: Product, quantity: u32) {
        debug!(product = %product.id, quantity, "add to cart");
        self.cart.add_item(product, quantity);
        self.persist();
    }

    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let removed = self.cart.remove_item(product_id);
        debug!(product = %product_id, removed, "remove from cart");
        self.persist();
        removed
    }

    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        let changed = self.cart.set_quantity(product_id, quantity);
        debug!(product = %product_id, quantity, changed, "set cart quantity");
        self.persist();
        changed
    }

    pub fn clear(&mut self) {
        debug!("clear cart");
        self.cart.clear();
        self.persist();
    }

    /// Apply a coupon code against the configured table.
    pub fn apply_coupon(&mut self, code: &str) -> bool {
        let applied = self.cart.apply_coupon(code, &self.coupons);
        debug!(code, applied, "apply coupon");
        applied
    }

    pub fn set_open(&mut self, open: bool) {
        self.cart.set_open(open);
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals(&self.shipping)
    }

    pub fn shipping_policy(&self) -> &ShippingPolicy {
        &self.shipping
    }

    pub fn coupons(&self) -> &CouponTable {
        &self.coupons
    }

    fn persist(&self) {
        if let Err(e) = self.repo.save(&self.cart.lines().to_vec()) {
            warn!(error = %e, key = self.repo.key(), "failed to persist cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use boutique_cache::{CacheError, MemoryStore, Store};
    use std::sync::Arc;

    fn products() -> Vec<Product> {
        Catalog::builtin().products()[..3].to_vec()
    }

    #[test]
    fn test_mutations_persist() {
        let cache = Cache::memory();
        let mut engine = CartEngine::open(cache.clone());
        let p = products();

        engine.add_item(p[0].clone(), 1);
        engine.add_item(p[1].clone(), 2);
        engine.add_item(p[2].clone(), 3);

        let restored = CartEngine::open(cache);
        assert_eq!(restored.lines(), engine.lines());
        let ids: Vec<_> = restored.lines().iter().map(|l| l.product_id().clone()).collect();
        assert_eq!(ids, vec![p[0].id.clone(), p[1].id.clone(), p[2].id.clone()]);
    }

    #[test]
    fn test_clear_persists_empty() {
        let cache = Cache::memory();
        let mut engine = CartEngine::open(cache.clone());
        engine.add_item(products()[0].clone(), 1);
        engine.clear();

        let stored: Option<Vec<CartLine>> = cache.get(CART_KEY).unwrap();
        assert_eq!(stored, Some(Vec::new()));
    }

    #[test]
    fn test_set_quantity_persists() {
        let cache = Cache::memory();
        let mut engine = CartEngine::open(cache.clone());
        let p = products();
        engine.add_item(p[0].clone(), 1);
        engine.set_quantity(&p[0].id, 4);

        let restored = CartEngine::open(cache);
        assert_eq!(restored.cart().quantity_of(&p[0].id), 4);
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(CART_KEY, b"not json").unwrap();

        let engine = CartEngine::open(Cache::new(store));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_coupon_is_not_persisted() {
        let cache = Cache::memory();
        let mut engine = CartEngine::open(cache.clone());
        engine.add_item(products()[0].clone(), 1);
        assert!(engine.apply_coupon("VIP20"));

        let restored = CartEngine::open(cache);
        assert!(restored.cart().discount_rate().is_zero());
    }

    struct FailingStore;

    impl Store for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), CacheError> {
            Err(CacheError::StoreError("disk full".to_string()))
        }
        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_save_keeps_mutation() {
        let mut engine = CartEngine::open(Cache::new(Arc::new(FailingStore)));
        engine.add_item(products()[0].clone(), 2);
        assert_eq!(engine.cart().item_count(), 2);
    }
}
