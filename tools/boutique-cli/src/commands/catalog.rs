//! Catalog browsing commands.

use anyhow::{anyhow, bail, Result};
use boutique_commerce::catalog::{
    Badge, Catalog, Category, Product, ProductQuery, SortOption, FEATURED_LIMIT, RELATED_LIMIT,
};
use boutique_commerce::{Currency, Money, ProductId};

use super::{CatalogArgs, CatalogCommand, ListArgs};
use crate::context::Context;
use crate::storefront::Storefront;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let shop = Storefront::open(ctx)?;
    match args.command {
        CatalogCommand::List(filters) => list(&filters, &shop.catalog, ctx),
        CatalogCommand::Show { id } => show(&id, &shop.catalog, ctx),
        CatalogCommand::Featured => featured(&shop.catalog, ctx),
    }
}

/// Translate listing flags into a query.
pub fn build_query(args: &ListArgs, currency: Currency) -> Result<ProductQuery> {
    let mut query = ProductQuery::new();

    if let Some(text) = &args.search {
        query = query.with_text(text.as_str());
    }
    if let Some(raw) = &args.category {
        let category = Category::parse(raw).ok_or_else(|| anyhow!("Unknown category: {}", raw))?;
        query = query.with_category(category);
    }
    if let Some(raw) = &args.badge {
        let badge = Badge::parse(raw).ok_or_else(|| anyhow!("Unknown badge: {}", raw))?;
        query = query.with_badge(badge);
    }
    if let (Some(min), Some(max)) = (args.min_price, args.max_price) {
        if min > max {
            bail!("--min-price {} is above --max-price {}", min, max);
        }
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        query = query.with_price_range(
            args.min_price.map(|p| Money::from_units(p, currency)),
            args.max_price.map(|p| Money::from_units(p, currency)),
        );
    }
    for color in &args.color {
        query = query.with_color(color.as_str());
    }
    for material in &args.material {
        query = query.with_material(material.as_str());
    }

    let sort = SortOption::parse(&args.sort).ok_or_else(|| anyhow!("Unknown sort: {}", args.sort))?;
    Ok(query.with_sort(sort))
}

fn list(args: &ListArgs, catalog: &Catalog, ctx: &Context) -> Result<()> {
    let currency = ctx.config.store.currency()?;
    let query = build_query(args, currency)?;
    let results = catalog.search(&query);

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} of {} products ({})",
        results.len(),
        catalog.len(),
        query.sort.display_name()
    ));

    if !query.is_filtered(catalog.max_price()) {
        let counts: Vec<String> = catalog
            .category_counts()
            .iter()
            .map(|(c, n)| format!("{} {}", c.display_name(), n))
            .collect();
        ctx.output.kv("categories", &counts.join(", "));
        ctx.output.kv("colors", &catalog.colors().join(", "));
        ctx.output.kv("materials", &catalog.materials().join(", "));
    }

    if results.is_empty() {
        ctx.output.info("No products match these filters.");
        return Ok(());
    }

    print_products(&results, ctx);
    Ok(())
}

fn show(id: &str, catalog: &Catalog, ctx: &Context) -> Result<()> {
    let product = catalog.require(&ProductId::new(id))?;
    let related = catalog.related(product, RELATED_LIMIT);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "product": product,
            "related": related,
        }));
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("price", &price_label(product));
    ctx.output.kv("category", product.category.display_name());
    ctx.output.kv("color", &product.color);
    ctx.output.kv("material", &product.material);
    if let Some(badge) = product.badge {
        ctx.output.kv("badge", badge.display_name());
    }
    ctx.output.kv("in stock", if product.in_stock { "yes" } else { "no" });
    ctx.output.info(&product.description);

    if !related.is_empty() {
        ctx.output.header("You may also like");
        print_products(&related, ctx);
    }
    Ok(())
}

fn featured(catalog: &Catalog, ctx: &Context) -> Result<()> {
    let products = catalog.featured(FEATURED_LIMIT);

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Featured");
    print_products(&products, ctx);
    Ok(())
}

fn price_label(product: &Product) -> String {
    match product.original_price {
        Some(original) if product.is_on_sale() => {
            format!("{} (was {})", product.price, original)
        }
        _ => product.price.to_string(),
    }
}

fn print_products(products: &[&Product], ctx: &Context) {
    let widths = [10, 28, 12, 24, 10];
    ctx.output
        .table_row(&["ID", "NAME", "CATEGORY", "PRICE", "BADGE"], &widths);
    for p in products {
        let badge = p.badge.map(|b| b.display_name()).unwrap_or("");
        ctx.output.table_row(
            &[
                p.id.as_str(),
                &p.name,
                p.category.display_name(),
                &price_label(p),
                badge,
            ],
            &widths,
        );
    }
}
