//! Checkout command: shipping, payment and confirmation in one run.

use anyhow::{bail, Result};
use boutique_commerce::checkout::{
    CheckoutError, CheckoutPhase, Guard, PriceBreakdown, ShippingForm,
};
use dialoguer::Confirm;

use super::CheckoutArgs;
use crate::context::Context;
use crate::storefront::Storefront;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let shop = Storefront::open(ctx)?;

    let cart_is_empty = shop.cart.lock().await.is_empty();
    if shop.checkout.guard(cart_is_empty).await == Guard::Redirect {
        bail!("Your cart is empty. Add products with `boutique cart add <id>` first.");
    }

    // Step 1: shipping details
    ctx.output.step(CheckoutPhase::Shipping);
    let form = ShippingForm {
        name: args.name,
        email: args.email,
        phone: args.phone,
        street: args.street,
        city: args.city,
        state: args.state,
        zip_code: args.zip,
    };

    let spinner = ctx.output.spinner("Starting checkout...");
    let started = shop.checkout.submit_shipping(form, &shop.cart).await;
    spinner.finish_and_clear();

    let breakdown = match started {
        Ok(breakdown) => breakdown,
        Err(CheckoutError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                ctx.output.error(&format!("{}: {}", field, message));
            }
            bail!("Shipping details are incomplete");
        }
        Err(CheckoutError::Start { notice, source }) => {
            ctx.output.debug(&source.to_string());
            bail!("{}", notice);
        }
        Err(e) => return Err(e.into()),
    };

    // Step 2: payment
    ctx.output.step(CheckoutPhase::Payment);
    print_breakdown(&breakdown, ctx);

    if !args.yes && !ctx.output.is_json() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt(format!("Pay {}?", breakdown.total))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.info("Checkout cancelled. Your cart is unchanged.");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Processing payment...");
    let paid = shop.checkout.submit_payment(&shop.cart).await;
    spinner.finish_and_clear();

    let order_number = match paid {
        Ok(number) => number,
        Err(e @ (CheckoutError::Payment(_) | CheckoutError::NotCompleted(_))) => {
            bail!("Payment was not completed: {}. Your cart is unchanged.", e);
        }
        Err(e) => return Err(e.into()),
    };

    // Step 3: done
    let session = shop.checkout.session().await;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "orderNumber": order_number,
            "pendingRegistration": session.is_pending_registration(),
            "breakdown": breakdown,
        }));
        return Ok(());
    }

    ctx.output.step(CheckoutPhase::Success);
    if session.is_pending_registration() {
        ctx.output.warn(
            "Payment succeeded but the order could not be registered. Contact us with your receipt.",
        );
    } else {
        ctx.output.success(&format!("Order {} placed", order_number));
    }
    ctx.output.kv("total charged", &breakdown.total.to_string());

    Ok(())
}

fn print_breakdown(breakdown: &PriceBreakdown, ctx: &Context) {
    ctx.output.kv("subtotal", &breakdown.subtotal.to_string());
    let shipping = if breakdown.shipping.is_zero() {
        "Free".to_string()
    } else {
        breakdown.shipping.to_string()
    };
    ctx.output.kv("shipping", &shipping);
    ctx.output.kv("tax", &breakdown.tax.to_string());
    ctx.output.kv("total", &breakdown.total.to_string());
}
