//! Address book records.

use crate::defaults::DefaultFlag;
use boutique_commerce::define_id;
use serde::{Deserialize, Serialize};

define_id!(AddressId);

/// A saved delivery address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    pub id: AddressId,
    /// Short label such as "Home" or "Office".
    pub label: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub is_default: bool,
}

impl Address {
    /// One-line rendering for lists.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}, {}",
            self.street, self.city, self.state, self.zip_code, self.country
        )
    }
}

impl DefaultFlag for Address {
    type Id = AddressId;

    fn id(&self) -> &AddressId {
        &self.id
    }

    fn is_default(&self) -> bool {
        self.is_default
    }

    fn set_default(&mut self, value: bool) {
        self.is_default = value;
    }
}

/// Fields for a new address; the id is assigned on insert.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAddress {
    pub label: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub is_default: bool,
}

impl NewAddress {
    pub fn into_address(self, id: AddressId) -> Address {
        Address {
            id,
            label: self.label,
            street: self.street,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            country: self.country,
            is_default: self.is_default,
        }
    }
}

/// Partial address edit. `None` leaves a field as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddressUpdate {
    pub label: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub is_default: Option<bool>,
}

impl AddressUpdate {
    pub fn apply_to(self, address: &mut Address) {
        if let Some(v) = self.label {
            address.label = v;
        }
        if let Some(v) = self.street {
            address.street = v;
        }
        if let Some(v) = self.city {
            address.city = v;
        }
        if let Some(v) = self.state {
            address.state = v;
        }
        if let Some(v) = self.zip_code {
            address.zip_code = v;
        }
        if let Some(v) = self.country {
            address.country = v;
        }
        if let Some(v) = self.is_default {
            address.is_default = v;
        }
    }
}
