//! Demo account data loaded on startup.

use crate::address::{Address, AddressId};
use crate::orders::{Order, OrderId, OrderStatus};
use crate::payment::{CardBrand, PaymentMethod, PaymentMethodId};
use boutique_commerce::cart::CartLine;
use boutique_commerce::catalog::Catalog;
use boutique_commerce::{Money, OrderNumber, ProductId};
use chrono::NaiveDate;

/// Two saved addresses; "Casa" is the default.
pub fn addresses() -> Vec<Address> {
    vec![
        Address {
            id: AddressId::new("addr-1"),
            label: "Casa".to_string(),
            street: "Av. Reforma 123, Col. Juárez".to_string(),
            city: "Ciudad de México".to_string(),
            state: "CDMX".to_string(),
            zip_code: "06600".to_string(),
            country: "México".to_string(),
            is_default: true,
        },
        Address {
            id: AddressId::new("addr-2"),
            label: "Oficina".to_string(),
            street: "Paseo de la Reforma 505, Piso 12".to_string(),
            city: "Ciudad de México".to_string(),
            state: "CDMX".to_string(),
            zip_code: "06500".to_string(),
            country: "México".to_string(),
            is_default: false,
        },
    ]
}

/// Two saved cards; the Visa is the default.
pub fn payment_methods() -> Vec<PaymentMethod> {
    vec![
        PaymentMethod {
            id: PaymentMethodId::new("pm-1"),
            brand: CardBrand::Visa,
            last_four: "4242".to_string(),
            expiry_month: "12".to_string(),
            expiry_year: "2027".to_string(),
            is_default: true,
        },
        PaymentMethod {
            id: PaymentMethodId::new("pm-2"),
            brand: CardBrand::Mastercard,
            last_four: "8888".to_string(),
            expiry_month: "06".to_string(),
            expiry_year: "2026".to_string(),
            is_default: false,
        },
    ]
}

struct SeedOrder {
    id: &'static str,
    number: &'static str,
    placed_on: (i32, u32, u32),
    status: OrderStatus,
    lines: &'static [(&'static str, u32)],
    amounts: (f64, f64, f64, f64),
    address: usize,
    payment: usize,
}

const ORDERS: &[SeedOrder] = &[
    SeedOrder {
        id: "order-1",
        number: "BJ-2026-001234",
        placed_on: (2026, 1, 10),
        status: OrderStatus::Delivered,
        lines: &[("bag-1", 1), ("wallet-1", 1)],
        amounts: (3340.0, 0.0, 534.40, 3874.40),
        address: 0,
        payment: 0,
    },
    SeedOrder {
        id: "order-2",
        number: "BJ-2026-001189",
        placed_on: (2026, 1, 5),
        status: OrderStatus::Shipped,
        lines: &[("bag-2", 1)],
        amounts: (1890.0, 150.0, 326.40, 2366.40),
        address: 1,
        payment: 1,
    },
    SeedOrder {
        id: "order-3",
        number: "BJ-2025-001098",
        placed_on: (2025, 12, 20),
        status: OrderStatus::Delivered,
        lines: &[("wallet-5", 2), ("acc-1", 1)],
        amounts: (1470.0, 99.0, 251.04, 1820.04),
        address: 0,
        payment: 0,
    },
];

/// Three historical orders, newest first. Lines whose product is not in
/// `catalog` are skipped.
pub fn orders(catalog: &Catalog) -> Vec<Order> {
    let addresses = addresses();
    let methods = payment_methods();
    let currency = catalog
        .products()
        .first()
        .map(|p| p.price.currency)
        .unwrap_or_default();

    ORDERS
        .iter()
        .filter_map(|seed| {
            let lines = seed
                .lines
                .iter()
                .filter_map(|(id, qty)| {
                    catalog
                        .get(&ProductId::new(*id))
                        .map(|p| CartLine::new(p.clone(), *qty))
                })
                .collect();
            let (subtotal, shipping, tax, total) = seed.amounts;
            let (y, m, d) = seed.placed_on;
            Some(Order {
                id: OrderId::new(seed.id),
                order_number: OrderNumber::new(seed.number),
                placed_on: NaiveDate::from_ymd_opt(y, m, d)?,
                status: seed.status,
                lines,
                subtotal: Money::from_decimal(subtotal, currency),
                shipping: Money::from_decimal(shipping, currency),
                tax: Money::from_decimal(tax, currency),
                total: Money::from_decimal(total, currency),
                shipping_address: addresses.get(seed.address)?.clone(),
                payment_method: methods.get(seed.payment)?.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use boutique_commerce::Currency;

    #[test]
    fn test_seed_shapes() {
        assert_eq!(addresses().iter().filter(|a| a.is_default).count(), 1);
        assert_eq!(payment_methods().iter().filter(|p| p.is_default).count(), 1);
    }

    #[test]
    fn test_seed_orders() {
        let orders = orders(&Catalog::builtin());
        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].order_number.as_str(), "BJ-2026-001234");
        assert_eq!(orders[0].total, Money::new(387440, Currency::GTQ));
        assert_eq!(orders[0].lines.len(), 2);
        assert_eq!(orders[2].item_count(), 3);
        assert_eq!(orders[1].status, OrderStatus::Shipped);
        assert_eq!(orders[1].shipping_address.label, "Oficina");
    }
}
