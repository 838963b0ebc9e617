//! Cart commands.

use anyhow::Result;
use boutique_commerce::cart::CartEngine;
use boutique_commerce::ProductId;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::storefront::Storefront;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let shop = Storefront::open(ctx)?;
    let mut cart = shop.cart.lock().await;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { id, quantity } => {
            let product = shop.catalog.require(&ProductId::new(id))?.clone();
            let name = product.name.clone();
            cart.add_item(product, quantity);
            ctx.output.success(&format!("Added {} × {}", quantity, name));
        }
        CartCommand::Remove { id } => {
            if cart.remove_item(&ProductId::new(id.as_str())) {
                ctx.output.success(&format!("Removed {}", id));
            } else {
                ctx.output.warn(&format!("{} is not in the cart", id));
            }
        }
        CartCommand::Set { id, quantity } => {
            if !cart.set_quantity(&ProductId::new(id.as_str()), quantity) {
                ctx.output.warn(&format!("{} is not in the cart", id));
            }
        }
        CartCommand::Clear => {
            cart.clear();
            ctx.output.success("Cart cleared");
        }
        CartCommand::Coupon { code } => {
            if cart.apply_coupon(&code) {
                ctx.output.success(&format!(
                    "Coupon {} is valid ({}% off). Preview only; the checkout total is priced by the store.",
                    code.trim().to_uppercase(),
                    cart.totals().discount_rate.percent()
                ));
            } else {
                ctx.output.warn("Invalid coupon code");
            }
        }
    }

    print_cart(&cart, ctx);
    Ok(())
}

/// Print the cart lines and totals.
pub fn print_cart(cart: &CartEngine, ctx: &Context) {
    let totals = cart.totals();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "lines": cart.lines(),
            "coupon": cart.cart().coupon_code(),
            "totals": totals,
        }));
        return;
    }

    ctx.output.header(&format!("Cart ({} items)", totals.item_count));
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let widths = [10, 28, 5, 14];
    for line in cart.lines() {
        ctx.output.table_row(
            &[
                line.product.id.as_str(),
                &line.product.name,
                &format!("×{}", line.quantity),
                &line.line_total().to_string(),
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.kv("subtotal", &totals.subtotal.to_string());
    if totals.has_discount() {
        ctx.output.kv(
            &format!("discount ({}%)", totals.discount_rate.percent()),
            &format!("-{}", totals.discount),
        );
    }
    let shipping = if totals.ships_free() {
        "Free".to_string()
    } else {
        totals.shipping.to_string()
    };
    ctx.output.kv("shipping", &shipping);
    ctx.output.kv("total", &totals.grand_total.to_string());

    if let Some(remaining) = totals.amount_to_free_shipping {
        ctx.output
            .info(&format!("Add {} more for free shipping", remaining));
    }
}
