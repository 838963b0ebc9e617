//! Shipping form captured at the first checkout step.

use crate::validation::FieldErrors;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shipping form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingField {
    Name,
    Email,
    Phone,
    Street,
    City,
    State,
    ZipCode,
}

impl ShippingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingField::Name => "name",
            ShippingField::Email => "email",
            ShippingField::Phone => "phone",
            ShippingField::Street => "street",
            ShippingField::City => "city",
            ShippingField::State => "state",
            ShippingField::ZipCode => "zip_code",
        }
    }
}

impl fmt::Display for ShippingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Contact and delivery details entered by the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl ShippingForm {
    /// Check required fields. Phone is optional.
    pub fn validate(&self) -> Result<(), FieldErrors<ShippingField>> {
        let mut errors = FieldErrors::new();
        errors.require(ShippingField::Name, &self.name, "Name is required");
        errors.require(ShippingField::Email, &self.email, "Email is required");
        errors.require(ShippingField::Street, &self.street, "Address is required");
        errors.require(ShippingField::City, &self.city, "City is required");
        errors.require(ShippingField::State, &self.state, "State is required");
        errors.require(ShippingField::ZipCode, &self.zip_code, "Postal code is required");
        errors.into_result()
    }

    /// Delivery address sent to the backend, with the store's fixed country.
    pub fn to_address(&self, country: &str) -> ShippingAddress {
        ShippingAddress {
            name: self.name.trim().to_string(),
            street: self.street.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            zip_code: self.zip_code.trim().to_string(),
            country: country.to_string(),
        }
    }

    /// Trimmed email used for receipts.
    pub fn email(&self) -> &str {
        self.email.trim()
    }
}

/// Delivery address as sent to the backend functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ShippingForm {
        ShippingForm {
            name: "Ana López".to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            street: "Av. Reforma 123".to_string(),
            city: "Ciudad de México".to_string(),
            state: "CDMX".to_string(),
            zip_code: "06600".to_string(),
        }
    }

    #[test]
    fn test_valid_without_phone() {
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn test_blank_fields_reported() {
        let mut form = filled();
        form.city = "  ".to_string();
        form.zip_code = String::new();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(ShippingField::City), Some("City is required"));
        assert!(errors.contains(ShippingField::ZipCode));
    }

    #[test]
    fn test_empty_form_reports_all_required() {
        let errors = ShippingForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 6);
        assert!(!errors.contains(ShippingField::Phone));
    }

    #[test]
    fn test_to_address_trims_and_sets_country() {
        let mut form = filled();
        form.street = "  Av. Reforma 123 ".to_string();
        let address = form.to_address("México");
        assert_eq!(address.street, "Av. Reforma 123");
        assert_eq!(address.country, "México");
    }
}
