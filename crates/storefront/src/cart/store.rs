//! The cart store: single owner and writer of the cart.

use std::fmt;

use shopfront_core::{CartItem, ProductId};
use tracing::instrument;

use crate::storage::KeyValueStore;

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "cart";

shopfront_core::define_id!(SubscriptionId);

type Observer = Box<dyn FnMut(&[CartItem])>;

/// Owns the cart contents and keeps durable storage in step with them.
///
/// The store is the only component that mutates the cart or writes the cart
/// key. Every mutation is followed by a full rewrite of the stored value and
/// then by a synchronous notification of every subscribed observer.
///
/// Persistence problems never reach the caller: an unreadable stored cart
/// loads as empty, and a failed write is logged while the in-memory cart
/// stays authoritative for the session.
pub struct CartStore<S> {
    items: Vec<CartItem>,
    storage: S,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: i64,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store, restoring any cart previously saved in `storage`.
    #[must_use]
    pub fn load(storage: S) -> Self {
        let items = read_cart(&storage);
        tracing::debug!(lines = items.len(), "cart loaded");
        Self {
            items,
            storage,
            observers: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Append a line to the end of the cart.
    ///
    /// Lines are never merged: adding a product that is already in the cart
    /// creates a second line with the same id.
    #[instrument(skip(self, item), fields(product_id = %item.id, quantity = item.quantity))]
    pub fn add_to_cart(&mut self, item: CartItem) {
        self.items.push(item);
        self.commit();
    }

    /// Remove every line whose id equals `id`. Unknown ids are a no-op.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove_item(&mut self, id: ProductId) {
        self.items.retain(|item| item.id != id);
        self.commit();
    }

    /// Set the quantity of every line whose id equals `id`.
    ///
    /// No validation happens here; callers keep quantities positive.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn update_cart(&mut self, id: ProductId, new_quantity: u32) {
        for item in self.items.iter_mut().filter(|item| item.id == id) {
            item.quantity = new_quantity;
        }
        self.commit();
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.commit();
    }

    /// Register an observer called with the cart after every mutation.
    ///
    /// Observers run synchronously in registration order, after the new
    /// cart has been handed to storage.
    pub fn subscribe(&mut self, observer: impl FnMut(&[CartItem]) + 'static) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drop an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn commit(&mut self) {
        self.persist();
        for (_, observer) in &mut self.observers {
            observer(&self.items);
        }
    }

    fn persist(&self) {
        let value = match serde_json::to_string(&self.items) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.storage.set(CART_STORAGE_KEY, &value) {
            tracing::warn!(error = %e, "Failed to save cart to storage");
        } else {
            tracing::debug!(lines = self.items.len(), "cart saved");
        }
    }
}

impl<S> CartStore<S> {
    /// Current cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Line at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CartItem> {
        self.items.get(index)
    }

    /// Number of lines (not units) in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Backend the cart is persisted to.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: fmt::Debug> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("storage", &self.storage)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

/// Read the stored cart, falling back to empty on any failure.
fn read_cart(storage: &impl KeyValueStore) -> Vec<CartItem> {
    let raw = match storage.get(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read cart from storage");
            return Vec::new();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to parse stored cart, starting empty");
        Vec::new()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use proptest::prelude::*;

    use super::*;
    use crate::storage::{FileStore, MemoryStore, StorageError};

    fn item(id: i64, quantity: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            thumbnail: format!("https://cdn.example.com/{id}.png"),
            brand: Some("Acme".to_string()),
            category: "misc".to_string(),
            price: 10.0 * f64::from(u32::try_from(id).unwrap()),
            discount_percentage: Some(5.0),
            quantity,
        }
    }

    fn ids<S>(store: &CartStore<S>) -> Vec<i64> {
        store.items().iter().map(|item| item.id.as_i64()).collect()
    }

    /// Storage that accepts reads but refuses every write.
    #[derive(Debug, Default)]
    struct ReadOnlyStore {
        attempts: Cell<usize>,
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            self.attempts.set(self.attempts.get() + 1);
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }
    }

    /// Storage whose reads always fail.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk on fire")))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Ok(())
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_load_from_empty_storage() {
        let store = CartStore::load(MemoryStore::new());
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_add_never_merges() {
        let mut store = CartStore::load(MemoryStore::new());
        for _ in 0..5 {
            store.add_to_cart(item(1, 1));
        }
        store.add_to_cart(item(2, 1));

        assert_eq!(store.len(), 6);
        assert_eq!(ids(&store), vec![1, 1, 1, 1, 1, 2]);
    }

    #[test]
    fn test_remove_filters_every_match_and_keeps_order() {
        let mut store = CartStore::load(MemoryStore::new());
        for id in [3, 1, 4, 1, 5, 9, 2, 6] {
            store.add_to_cart(item(id, 1));
        }

        store.remove_item(ProductId::new(1));
        assert_eq!(ids(&store), vec![3, 4, 5, 9, 2, 6]);

        store.remove_item(ProductId::new(42));
        assert_eq!(ids(&store), vec![3, 4, 5, 9, 2, 6]);
    }

    #[test]
    fn test_update_touches_only_matching_lines() {
        let mut store = CartStore::load(MemoryStore::new());
        store.add_to_cart(item(1, 1));
        store.add_to_cart(item(2, 4));
        store.add_to_cart(item(1, 2));
        let untouched = store.get(1).cloned().unwrap();

        store.update_cart(ProductId::new(1), 7);

        assert_eq!(store.get(0).unwrap().quantity, 7);
        assert_eq!(store.get(2).unwrap().quantity, 7);
        assert_eq!(store.get(1).unwrap(), &untouched);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = CartStore::load(MemoryStore::new());
        store.add_to_cart(item(1, 3));
        let before = store.items().to_vec();

        store.update_cart(ProductId::new(99), 10);
        assert_eq!(store.items(), before.as_slice());
    }

    #[test]
    fn test_clear_empties_cart_and_storage() {
        let storage = MemoryStore::new();
        let mut store = CartStore::load(&storage);
        store.add_to_cart(item(1, 1));
        store.add_to_cart(item(2, 1));

        store.clear_cart();

        assert!(store.is_empty());
        assert_eq!(
            storage.get(CART_STORAGE_KEY).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let storage = MemoryStore::new();
        let mut store = CartStore::load(&storage);

        store.add_to_cart(item(1, 1));
        store.add_to_cart(item(2, 1));
        store.update_cart(ProductId::new(2), 3);
        store.remove_item(ProductId::new(1));

        let saved: Vec<CartItem> =
            serde_json::from_str(&storage.get(CART_STORAGE_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(saved, store.items());
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].quantity, 3);
    }

    #[test]
    fn test_reload_reproduces_cart() {
        let storage = MemoryStore::new();
        let expected = {
            let mut store = CartStore::load(&storage);
            store.add_to_cart(item(1, 2));
            store.add_to_cart(item(2, 1));
            store.add_to_cart(item(1, 5));
            store.items().to_vec()
        };

        let restarted = CartStore::load(&storage);
        assert_eq!(restarted.items(), expected.as_slice());
    }

    #[test]
    fn test_malformed_storage_loads_empty() {
        for raw in ["{\"not\":\"a list\"}", "not json at all", "", "null", "[{\"id\":1}]"] {
            let store = CartStore::load(MemoryStore::with_entry(CART_STORAGE_KEY, raw));
            assert!(store.is_empty(), "expected empty cart for {raw:?}");
        }
    }

    #[test]
    fn test_read_failure_loads_empty() {
        let store = CartStore::load(BrokenStore);
        assert!(store.is_empty());
    }

    #[test]
    fn test_write_failure_keeps_memory_authoritative() {
        let mut store = CartStore::load(ReadOnlyStore::default());

        store.add_to_cart(item(1, 1));
        store.add_to_cart(item(2, 1));
        store.update_cart(ProductId::new(1), 4);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().quantity, 4);
        assert_eq!(store.storage().attempts.get(), 3);
    }

    #[test]
    fn test_observers_notified_in_order_after_each_mutation() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut store = CartStore::load(MemoryStore::new());

        let first = Rc::clone(&log);
        store.subscribe(move |items| first.borrow_mut().push(("first", items.len())));
        let second = Rc::clone(&log);
        store.subscribe(move |items| second.borrow_mut().push(("second", items.len())));

        store.add_to_cart(item(1, 1));
        store.clear_cart();

        assert_eq!(
            *log.borrow(),
            vec![("first", 1), ("second", 1), ("first", 0), ("second", 0)]
        );
    }

    #[test]
    fn test_observer_sees_persisted_snapshot() {
        let storage = Rc::new(MemoryStore::new());
        let seen = Rc::new(RefCell::new(None));

        let mut store = CartStore::load(Rc::clone(&storage));
        let reader = Rc::clone(&storage);
        let sink = Rc::clone(&seen);
        store.subscribe(move |items| {
            let stored = reader.get(CART_STORAGE_KEY).unwrap().unwrap();
            let stored: Vec<CartItem> = serde_json::from_str(&stored).unwrap();
            *sink.borrow_mut() = Some(stored == items);
        });

        store.add_to_cart(item(3, 2));
        assert_eq!(*seen.borrow(), Some(true));
    }

    #[test]
    fn test_unsubscribe() {
        let calls = Rc::new(Cell::new(0));
        let mut store = CartStore::load(MemoryStore::new());

        let counter = Rc::clone(&calls);
        let id = store.subscribe(move |_| counter.set(counter.get() + 1));
        store.add_to_cart(item(1, 1));

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.add_to_cart(item(2, 1));

        assert_eq!(calls.get(), 1);
    }

    /// One user action against the cart.
    #[derive(Debug, Clone)]
    enum Action {
        Add(CartItem),
        Remove(i64),
        Update(i64, u32),
        Clear,
    }

    fn any_item() -> impl Strategy<Value = CartItem> {
        (
            1i64..6,
            0u32..500_000,
            1u32..20,
            proptest::option::of(0u32..=1000),
            proptest::option::of("[A-Za-z ]{1,12}"),
        )
            .prop_map(|(id, cents, quantity, tenths, brand)| CartItem {
                id: ProductId::new(id),
                title: format!("Product {id}"),
                thumbnail: format!("https://cdn.example.com/{id}.png"),
                brand,
                category: "misc".to_string(),
                price: f64::from(cents) / 100.0,
                discount_percentage: tenths.map(|t| f64::from(t) / 10.0),
                quantity,
            })
    }

    fn any_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            4 => any_item().prop_map(Action::Add),
            2 => (1i64..6).prop_map(Action::Remove),
            2 => (1i64..6, 1u32..20).prop_map(|(id, q)| Action::Update(id, q)),
            1 => Just(Action::Clear),
        ]
    }

    fn apply<S: KeyValueStore>(store: &mut CartStore<S>, model: &mut Vec<CartItem>, action: Action) {
        match action {
            Action::Add(item) => {
                model.push(item.clone());
                store.add_to_cart(item);
            }
            Action::Remove(id) => {
                model.retain(|item| item.id.as_i64() != id);
                store.remove_item(ProductId::new(id));
            }
            Action::Update(id, quantity) => {
                for item in model.iter_mut().filter(|item| item.id.as_i64() == id) {
                    item.quantity = quantity;
                }
                store.update_cart(ProductId::new(id), quantity);
            }
            Action::Clear => {
                model.clear();
                store.clear_cart();
            }
        }
    }

    proptest! {
        #[test]
        fn adds_append_in_order(items in proptest::collection::vec(any_item(), 0..24)) {
            let mut store = CartStore::load(MemoryStore::new());
            for item in items.clone() {
                store.add_to_cart(item);
            }

            prop_assert_eq!(store.len(), items.len());
            prop_assert_eq!(store.items(), items.as_slice());
        }

        #[test]
        fn remove_filters_and_keeps_order(
            items in proptest::collection::vec(any_item(), 0..24),
            id in 1i64..6,
        ) {
            let mut store = CartStore::load(MemoryStore::new());
            for item in items.clone() {
                store.add_to_cart(item);
            }
            store.remove_item(ProductId::new(id));

            let expected: Vec<CartItem> =
                items.into_iter().filter(|item| item.id.as_i64() != id).collect();
            prop_assert_eq!(store.items(), expected.as_slice());
        }

        #[test]
        fn update_leaves_other_lines_identical(
            items in proptest::collection::vec(any_item(), 0..24),
            id in 1i64..6,
            quantity in 1u32..100,
        ) {
            let mut store = CartStore::load(MemoryStore::new());
            for item in items.clone() {
                store.add_to_cart(item);
            }
            store.update_cart(ProductId::new(id), quantity);

            prop_assert_eq!(store.len(), items.len());
            for (after, before) in store.items().iter().zip(&items) {
                if before.id.as_i64() == id {
                    prop_assert_eq!(after.quantity, quantity);
                    prop_assert_eq!(
                        CartItem { quantity, ..before.clone() },
                        after.clone()
                    );
                } else {
                    prop_assert_eq!(after, before);
                }
            }
        }

        #[test]
        fn actions_match_model_and_survive_reload(
            actions in proptest::collection::vec(any_action(), 0..32)
        ) {
            let storage = MemoryStore::new();
            let mut model = Vec::new();
            {
                let mut store = CartStore::load(&storage);
                for action in actions {
                    apply(&mut store, &mut model, action);
                }
                prop_assert_eq!(store.items(), model.as_slice());
            }

            let reloaded = CartStore::load(&storage);
            prop_assert_eq!(reloaded.items(), model.as_slice());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]

        #[test]
        fn file_backed_cart_survives_reopen(
            actions in proptest::collection::vec(any_action(), 0..16)
        ) {
            let dir = tempfile::tempdir().unwrap();
            let mut model = Vec::new();
            {
                let mut store = CartStore::load(FileStore::open(dir.path()).unwrap());
                for action in actions {
                    apply(&mut store, &mut model, action);
                }
            }

            let reopened = CartStore::load(FileStore::open(dir.path()).unwrap());
            prop_assert_eq!(reopened.items(), model.as_slice());
        }
    }

    #[test]
    fn test_isolated_stores_do_not_share_state() {
        let mut a = CartStore::load(MemoryStore::new());
        let b = CartStore::load(MemoryStore::new());

        a.add_to_cart(item(1, 1));
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
    }
}
