//! Session and identity store.

use crate::address::{Address, AddressId, AddressUpdate, NewAddress};
use crate::defaults::DefaultCollection;
use crate::orders::{Order, OrderHistory};
use crate::payment::{NewPaymentMethod, PaymentMethod, PaymentMethodId};
use crate::seed;
use crate::user::{ProfileUpdate, User};
use crate::AuthError;
use boutique_cache::{Cache, SnapshotRepository};
use boutique_commerce::catalog::Catalog;
use tracing::{debug, info, warn};

/// Fixed key for the persisted user.
pub const USER_KEY: &str = "user";

/// Owns the signed-in user and the customer's saved records.
///
/// Only the user is persisted. The address book, payment methods and order
/// history are in-memory for the life of the process.
#[derive(Debug)]
pub struct IdentityStore {
    user: Option<User>,
    repo: SnapshotRepository<User>,
    addresses: DefaultCollection<Address>,
    payment_methods: DefaultCollection<PaymentMethod>,
    orders: OrderHistory,
}

impl IdentityStore {
    /// Restore the user from `repo` and start with empty collections.
    ///
    /// An unreadable user record is discarded with a warning.
    pub fn restore(repo: SnapshotRepository<User>) -> Self {
        let user = match repo.load() {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, key = repo.key(), "discarding unreadable user snapshot");
                None
            }
        };
        if let Some(user) = &user {
            debug!(user = %user.id, "restored session");
        }
        Self {
            user,
            repo,
            addresses: DefaultCollection::default(),
            payment_methods: DefaultCollection::default(),
            orders: OrderHistory::default(),
        }
    }

    /// Restore from the `user` key of a cache and load the demo records.
    pub fn open(cache: Cache, catalog: &Catalog) -> Self {
        Self::restore(SnapshotRepository::new(cache, USER_KEY)).with_seed_data(catalog)
    }

    /// Replace the collections with the demo address book, cards and orders.
    pub fn with_seed_data(mut self, catalog: &Catalog) -> Self {
        self.addresses = DefaultCollection::from_vec(seed::addresses());
        self.payment_methods = DefaultCollection::from_vec(seed::payment_methods());
        self.orders = OrderHistory::new(seed::orders(catalog));
        self
    }

    // Session

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Adopt a user returned by the authenticator and persist it.
    pub fn sign_in(&mut self, user: User) -> Result<(), AuthError> {
        self.repo.save(&user)?;
        info!(user = %user.id, "session started");
        self.user = Some(user);
        Ok(())
    }

    /// Drop the user and its persisted record.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        if let Some(user) = self.user.take() {
            info!(user = %user.id, "signed out");
        }
        self.repo.clear()?;
        Ok(())
    }

    /// Merge a profile edit. A no-op when nobody is signed in.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<bool, AuthError> {
        let Some(current) = &self.user else {
            return Ok(false);
        };
        let mut next = current.clone();
        next.apply(update);
        self.repo.save(&next)?;
        debug!(user = %next.id, "profile updated");
        self.user = Some(next);
        Ok(true)
    }

    // Address book

    pub fn addresses(&self) -> &[Address] {
        self.addresses.items()
    }

    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.default_item()
    }

    /// Add an address and return its id.
    pub fn add_address(&mut self, address: NewAddress) -> AddressId {
        let id = AddressId::new(format!("addr-{}", chrono::Utc::now().timestamp_millis()));
        let id = if self.addresses.get(&id).is_some() {
            AddressId::generate()
        } else {
            id
        };
        self.addresses.add(address.into_address(id.clone()));
        debug!(address = %id, "address added");
        id
    }

    pub fn update_address(&mut self, id: &AddressId, update: AddressUpdate) -> Result<(), AuthError> {
        if self.addresses.update(id, |a| update.apply_to(a)) {
            Ok(())
        } else {
            Err(AuthError::AddressNotFound(id.to_string()))
        }
    }

    pub fn delete_address(&mut self, id: &AddressId) -> Result<Address, AuthError> {
        self.addresses
            .remove(id)
            .ok_or_else(|| AuthError::AddressNotFound(id.to_string()))
    }

    pub fn set_default_address(&mut self, id: &AddressId) -> Result<(), AuthError> {
        if self.addresses.set_default(id) {
            Ok(())
        } else {
            Err(AuthError::AddressNotFound(id.to_string()))
        }
    }

    // Payment methods

    pub fn payment_methods(&self) -> &[PaymentMethod] {
        self.payment_methods.items()
    }

    pub fn default_payment_method(&self) -> Option<&PaymentMethod> {
        self.payment_methods.default_item()
    }

    pub fn add_payment_method(&mut self, method: NewPaymentMethod) -> PaymentMethodId {
        let id = PaymentMethodId::new(format!("pm-{}", chrono::Utc::now().timestamp_millis()));
        let id = if self.payment_methods.get(&id).is_some() {
            PaymentMethodId::generate()
        } else {
            id
        };
        self.payment_methods.add(method.into_method(id.clone()));
        debug!(payment_method = %id, "payment method added");
        id
    }

    pub fn delete_payment_method(
        &mut self,
        id: &PaymentMethodId,
    ) -> Result<PaymentMethod, AuthError> {
        self.payment_methods
            .remove(id)
            .ok_or_else(|| AuthError::PaymentMethodNotFound(id.to_string()))
    }

    pub fn set_default_payment_method(&mut self, id: &PaymentMethodId) -> Result<(), AuthError> {
        if self.payment_methods.set_default(id) {
            Ok(())
        } else {
            Err(AuthError::PaymentMethodNotFound(id.to_string()))
        }
    }

    // Orders

    pub fn orders(&self) -> &[Order] {
        self.orders.orders()
    }

    pub fn record_order(&mut self, order: Order) {
        debug!(order = %order.order_number, "order recorded");
        self.orders.record(order);
    }
}
