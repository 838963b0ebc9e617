//! The built-in product catalog.

use crate::catalog::{Badge, Category, Product};
use crate::ids::ProductId;
use crate::money::{Currency, Money};

const IMAGE_BASE: &str = "https://d64gsuwffb70l.cloudfront.net/696804b6cb13eec5f0d9151b";

struct Entry {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: i64,
    original_price: Option<i64>,
    category: Category,
    color: &'static str,
    material: &'static str,
    image: &'static str,
    badge: Option<Badge>,
}

const ENTRIES: &[Entry] = &[
    // Bags
    Entry {
        id: "bag-1",
        name: "Bolso Elegance Noir",
        description: "Genuine leather bag with a premium finish and gold hardware. A timeless design for any occasion.",
        price: 2450,
        original_price: None,
        category: Category::Bag,
        color: "Black",
        material: "Genuine leather",
        image: "1768424735464_89b443d0.png",
        badge: Some(Badge::Bestseller),
    },
    Entry {
        id: "bag-2",
        name: "Tote Milano",
        description: "Roomy tote for every day. Inner compartments and a magnetic closure.",
        price: 1890,
        original_price: Some(2200),
        category: Category::Bag,
        color: "Camel",
        material: "Italian leather",
        image: "1768424735589_d05e7ef5.png",
        badge: Some(Badge::New),
    },
    Entry {
        id: "bag-3",
        name: "Crossbody Chic",
        description: "Compact crossbody with an adjustable strap. Works for casual and dressy looks.",
        price: 1650,
        original_price: None,
        category: Category::Bag,
        color: "Burgundy",
        material: "Nappa leather",
        image: "1768424736700_3bc89142.png",
        badge: None,
    },
    Entry {
        id: "bag-4",
        name: "Clutch Soirée",
        description: "Evening clutch with a detachable gold chain. Pure elegance for special events.",
        price: 1290,
        original_price: None,
        category: Category::Bag,
        color: "Gold",
        material: "Metallic leather",
        image: "1768424732897_35fc4454.jpg",
        badge: Some(Badge::New),
    },
    Entry {
        id: "bag-5",
        name: "Satchel Vintage",
        description: "Inspired by classic designs with a modern touch. Buckle closure and top handle.",
        price: 2100,
        original_price: None,
        category: Category::Bag,
        color: "Cognac",
        material: "Aged leather",
        image: "1768424734655_a9ca5b76.jpg",
        badge: None,
    },
    Entry {
        id: "bag-6",
        name: "Hobo Luxe",
        description: "Soft, spacious hobo bag. Relaxed design with luxury finishes.",
        price: 1980,
        original_price: None,
        category: Category::Bag,
        color: "Gray",
        material: "Soft leather",
        image: "1768424738384_4c10cc05.png",
        badge: Some(Badge::Bestseller),
    },
    // Wallets
    Entry {
        id: "wallet-1",
        name: "Billetera Compact",
        description: "Compact wallet with several compartments for cards and cash.",
        price: 890,
        original_price: None,
        category: Category::Wallet,
        color: "Black",
        material: "Genuine leather",
        image: "1768424753464_c45c854d.jpg",
        badge: Some(Badge::Bestseller),
    },
    Entry {
        id: "wallet-2",
        name: "Cartera Continental",
        description: "Long zip wallet with room for a smartphone. Functional elegance.",
        price: 1250,
        original_price: Some(1450),
        category: Category::Wallet,
        color: "Nude",
        material: "Saffiano leather",
        image: "1768424759565_c8f7ce16.png",
        badge: Some(Badge::New),
    },
    Entry {
        id: "wallet-3",
        name: "Billetera Slim",
        description: "Ultra-thin design for pockets. RFID blocking.",
        price: 750,
        original_price: None,
        category: Category::Wallet,
        color: "Brown",
        material: "Italian leather",
        image: "1768424758433_9c06968f.jpg",
        badge: None,
    },
    Entry {
        id: "wallet-4",
        name: "Monedero Charm",
        description: "Small coin purse with a kiss-lock clasp. Carries just the essentials.",
        price: 490,
        original_price: None,
        category: Category::Wallet,
        color: "Pink",
        material: "Nappa leather",
        image: "1768424756912_b10df98b.jpg",
        badge: None,
    },
    Entry {
        id: "wallet-5",
        name: "Tarjetero Executive",
        description: "Professional card holder with room for 12 cards. Premium finish.",
        price: 650,
        original_price: None,
        category: Category::Wallet,
        color: "Navy",
        material: "Embossed leather",
        image: "1768424762922_991a515b.png",
        badge: Some(Badge::New),
    },
    // Accessories
    Entry {
        id: "acc-1",
        name: "Cinturón Classic",
        description: "Leather belt with a gold buckle. The right width for any occasion.",
        price: 590,
        original_price: None,
        category: Category::Accessory,
        color: "Black",
        material: "Genuine leather",
        image: "1768424778059_ae05e3f9.jpg",
        badge: Some(Badge::Bestseller),
    },
    Entry {
        id: "acc-2",
        name: "Llavero Signature",
        description: "Leather key ring with a metal charm. The finishing touch for your keys.",
        price: 290,
        original_price: None,
        category: Category::Accessory,
        color: "Camel",
        material: "Leather and metal",
        image: "1768424784674_975f7982.png",
        badge: None,
    },
    Entry {
        id: "acc-3",
        name: "Porta Pasaporte",
        description: "Elegant passport cover with slots for boarding passes.",
        price: 450,
        original_price: None,
        category: Category::Accessory,
        color: "Burgundy",
        material: "Saffiano leather",
        image: "1768424779190_e8098f85.jpg",
        badge: Some(Badge::New),
    },
    Entry {
        id: "acc-4",
        name: "Estuche Tech",
        description: "Case for cables and tech accessories. Organized, with style.",
        price: 390,
        original_price: None,
        category: Category::Accessory,
        color: "Gray",
        material: "Leather and nylon",
        image: "1768424782410_cf4e8bb4.jpg",
        badge: None,
    },
    Entry {
        id: "acc-5",
        name: "Charm Bag",
        description: "Decorative bag charm. Adds personality to your favorite bag.",
        price: 190,
        original_price: None,
        category: Category::Accessory,
        color: "Gold",
        material: "Metal and leather",
        image: "1768424782573_d5bfb3aa.jpg",
        badge: None,
    },
];

/// Build the sixteen built-in products in the given currency.
pub(crate) fn builtin_products(currency: Currency) -> Vec<Product> {
    ENTRIES
        .iter()
        .map(|e| Product {
            id: ProductId::new(e.id),
            name: e.name.to_string(),
            description: e.description.to_string(),
            price: Money::from_units(e.price, currency),
            original_price: e.original_price.map(|p| Money::from_units(p, currency)),
            category: e.category,
            color: e.color.to_string(),
            material: e.material.to_string(),
            image: format!("{}_{}", IMAGE_BASE, e.image),
            badge: e.badge,
            in_stock: true,
        })
        .collect()
}
