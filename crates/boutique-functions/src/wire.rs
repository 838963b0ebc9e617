//! JSON bodies exchanged with the backend functions.
//!
//! Field names are camelCase and amounts are decimal major units
//! (`2450`, `534.4`).

use boutique_commerce::cart::CartLine;
use boutique_commerce::catalog::{Badge, Category};
use boutique_commerce::checkout::{
    CheckoutCreated, ConfirmOrderRequest, CreateCheckoutRequest, PriceBreakdown, ShippingAddress,
};
use boutique_commerce::contact::ContactForm;
use boutique_commerce::{Currency, Money, OrderNumber};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireProduct<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_price: Option<f64>,
    category: &'static str,
    color: &'a str,
    material: &'a str,
    image: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    badge: Option<&'static str>,
    in_stock: bool,
}

/// Category slug as the backend functions spell it.
pub(crate) fn wire_category(category: Category) -> &'static str {
    match category {
        Category::Bag => "bolsas",
        Category::Wallet => "billeteras",
        Category::Accessory => "accesorios",
    }
}

pub(crate) fn wire_badge(badge: Badge) -> &'static str {
    match badge {
        Badge::New => "nuevo",
        Badge::Bestseller => "bestseller",
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct WireLine<'a> {
    product: WireProduct<'a>,
    quantity: u32,
}

impl<'a> From<&'a CartLine> for WireLine<'a> {
    fn from(line: &'a CartLine) -> Self {
        let p = &line.product;
        Self {
            product: WireProduct {
                id: p.id.as_str(),
                name: &p.name,
                description: &p.description,
                price: p.price.to_decimal(),
                original_price: p.original_price.map(|m| m.to_decimal()),
                category: wire_category(p.category),
                color: &p.color,
                material: &p.material,
                image: &p.image,
                badge: p.badge.map(wire_badge),
                in_stock: p.in_stock,
            },
            quantity: line.quantity,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireAddress<'a> {
    name: &'a str,
    street: &'a str,
    city: &'a str,
    state: &'a str,
    zip_code: &'a str,
    country: &'a str,
}

impl<'a> From<&'a ShippingAddress> for WireAddress<'a> {
    fn from(a: &'a ShippingAddress) -> Self {
        Self {
            name: &a.name,
            street: &a.street,
            city: &a.city,
            state: &a.state,
            zip_code: &a.zip_code,
            country: &a.country,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireBreakdown {
    subtotal: f64,
    shipping: f64,
    tax: f64,
    total: f64,
}

impl WireBreakdown {
    fn into_breakdown(self, currency: Currency) -> PriceBreakdown {
        PriceBreakdown {
            subtotal: Money::from_decimal(self.subtotal, currency),
            shipping: Money::from_decimal(self.shipping, currency),
            tax: Money::from_decimal(self.tax, currency),
            total: Money::from_decimal(self.total, currency),
        }
    }
}

impl From<&PriceBreakdown> for WireBreakdown {
    fn from(b: &PriceBreakdown) -> Self {
        Self {
            subtotal: b.subtotal.to_decimal(),
            shipping: b.shipping.to_decimal(),
            tax: b.tax.to_decimal(),
            total: b.total.to_decimal(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateCheckoutBody<'a> {
    items: Vec<WireLine<'a>>,
    customer_email: &'a str,
    shipping_address: WireAddress<'a>,
}

impl<'a> From<&'a CreateCheckoutRequest> for CreateCheckoutBody<'a> {
    fn from(r: &'a CreateCheckoutRequest) -> Self {
        Self {
            items: r.items.iter().map(WireLine::from).collect(),
            customer_email: &r.customer_email,
            shipping_address: WireAddress::from(&r.shipping_address),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateCheckoutReply {
    client_secret: String,
    breakdown: WireBreakdown,
}

impl CreateCheckoutReply {
    pub(crate) fn into_created(self, currency: Currency) -> CheckoutCreated {
        CheckoutCreated {
            client_secret: self.client_secret,
            breakdown: self.breakdown.into_breakdown(currency),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConfirmOrderBody<'a> {
    payment_intent_id: &'a str,
    customer_email: &'a str,
    customer_name: &'a str,
    items: Vec<WireLine<'a>>,
    shipping_address: WireAddress<'a>,
    breakdown: WireBreakdown,
}

impl<'a> From<&'a ConfirmOrderRequest> for ConfirmOrderBody<'a> {
    fn from(r: &'a ConfirmOrderRequest) -> Self {
        Self {
            payment_intent_id: &r.payment_intent_id,
            customer_email: &r.customer_email,
            customer_name: &r.customer_name,
            items: r.items.iter().map(WireLine::from).collect(),
            shipping_address: WireAddress::from(&r.shipping_address),
            breakdown: WireBreakdown::from(&r.breakdown),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConfirmOrderReply {
    order_number: String,
}

impl ConfirmOrderReply {
    pub(crate) fn into_order_number(self) -> OrderNumber {
        OrderNumber::new(self.order_number)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ContactBody<'a> {
    name: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    subject: &'a str,
    message: &'a str,
}

impl<'a> From<&'a ContactForm> for ContactBody<'a> {
    fn from(f: &'a ContactForm) -> Self {
        Self {
            name: f.name.trim(),
            email: f.email.trim(),
            phone: f.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()),
            subject: f.subject.trim(),
            message: f.message.trim(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ContactReply {
    #[serde(default)]
    pub(crate) message: Option<String>,
}
