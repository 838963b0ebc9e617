//! Account commands: session, profile, address book, cards and orders.

use anyhow::{anyhow, bail, Context as _, Result};
use boutique_auth::{
    AddressId, AuthError, CardBrand, IdentityStore, LoginForm, NewAddress, NewPaymentMethod,
    PaymentMethodId, ProfileUpdate, SignupForm, User,
};
use dialoguer::{Input, Password};

use super::{AccountArgs, AccountCommand, AddressCommand, PaymentCommand};
use crate::context::Context;
use crate::output::{default_marker, status_badge};
use crate::storefront::Storefront;

/// Run the account command.
pub async fn run(args: AccountArgs, ctx: &Context) -> Result<()> {
    let shop = Storefront::open(ctx)?;

    match args.command {
        AccountCommand::Login { email, password } => login(email, password, &shop, ctx).await,
        AccountCommand::Signup {
            name,
            email,
            password,
            confirm_password,
        } => {
            let form = SignupForm {
                name: prompt_or(name, "Name")?,
                email: prompt_or(email, "Email")?,
                password: password_or(password, "Password")?,
                confirm_password: password_or(confirm_password, "Confirm password")?,
            };
            signup(form, &shop, ctx).await
        }
        AccountCommand::Logout => {
            shop.identity.lock().await.logout()?;
            ctx.output.success("Signed out");
            Ok(())
        }
        AccountCommand::Profile {
            name,
            email,
            phone,
            avatar,
        } => {
            let update = ProfileUpdate {
                name,
                email,
                phone,
                avatar,
            };
            let mut identity = shop.identity.lock().await;
            profile(update, &mut identity, ctx)
        }
        AccountCommand::Addresses { command } => {
            let mut identity = shop.identity.lock().await;
            addresses(command, &mut identity, ctx)
        }
        AccountCommand::Payments { command } => {
            let mut identity = shop.identity.lock().await;
            payments(command, &mut identity, ctx)
        }
        AccountCommand::Orders { number } => {
            let identity = shop.identity.lock().await;
            orders(number.as_deref(), &identity, ctx)
        }
    }
}

fn prompt_or(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}

fn password_or(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Password::new().with_prompt(prompt).interact()?),
    }
}

async fn login(
    email: Option<String>,
    password: Option<String>,
    shop: &Storefront,
    ctx: &Context,
) -> Result<()> {
    let form = LoginForm::new(prompt_or(email, "Email")?, password_or(password, "Password")?);
    if let Err(errors) = form.validate() {
        for (field, message) in errors.iter() {
            ctx.output.error(&format!("{}: {}", field, message));
        }
        bail!("Login details are incomplete");
    }

    let spinner = ctx.output.spinner("Signing in...");
    let result = shop.authenticator.login(&form.email, &form.password).await;
    spinner.finish_and_clear();

    let user = result?;
    shop.identity.lock().await.sign_in(user.clone())?;
    ctx.output.success(&format!("Welcome, {}", user.name));
    if ctx.output.is_json() {
        ctx.output.json(&user);
    }
    Ok(())
}

async fn signup(form: SignupForm, shop: &Storefront, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Creating account...");
    let result = shop.authenticator.signup(&form).await;
    spinner.finish_and_clear();

    let user = match result {
        Ok(user) => user,
        Err(AuthError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                ctx.output.error(&format!("{}: {}", field, message));
            }
            bail!("Signup details are invalid");
        }
        Err(e) => return Err(e.into()),
    };

    shop.identity.lock().await.sign_in(user.clone())?;
    ctx.output.success(&format!("Account created. Welcome, {}", user.name));
    if ctx.output.is_json() {
        ctx.output.json(&user);
    }
    Ok(())
}

fn require_user(identity: &IdentityStore) -> Result<&User> {
    identity
        .user()
        .ok_or(AuthError::NotAuthenticated)
        .context("Sign in with `boutique account login`")
}

fn profile(update: ProfileUpdate, identity: &mut IdentityStore, ctx: &Context) -> Result<()> {
    require_user(identity)?;
    if !update.is_empty() {
        identity.update_profile(update)?;
        ctx.output.success("Profile updated");
    }

    let user = require_user(identity)?;
    if ctx.output.is_json() {
        ctx.output.json(user);
        return Ok(());
    }

    ctx.output.header("Profile");
    ctx.output.kv("id", user.id.as_str());
    ctx.output.kv("name", &user.name);
    ctx.output.kv("email", &user.email);
    if let Some(phone) = &user.phone {
        ctx.output.kv("phone", phone);
    }
    if let Some(avatar) = &user.avatar {
        ctx.output.kv("avatar", avatar);
    }
    Ok(())
}

/// Address book and card edits live in memory only.
fn session_only(message: &str) -> String {
    format!("{} (this session only)", message)
}

fn addresses(
    command: Option<AddressCommand>,
    identity: &mut IdentityStore,
    ctx: &Context,
) -> Result<()> {
    require_user(identity)?;

    match command {
        None => {}
        Some(AddressCommand::Add {
            label,
            street,
            city,
            state,
            zip,
            country,
            default,
        }) => {
            let id = identity.add_address(NewAddress {
                label,
                street,
                city,
                state,
                zip_code: zip,
                country,
                is_default: default,
            });
            ctx.output.success(&session_only(&format!("Added address {}", id)));
        }
        Some(AddressCommand::Default { id }) => {
            identity.set_default_address(&AddressId::new(id))?;
            ctx.output.success(&session_only("Default address updated"));
        }
        Some(AddressCommand::Delete { id }) => {
            let removed = identity.delete_address(&AddressId::new(id))?;
            ctx.output.success(&session_only(&format!("Deleted {}", removed.label)));
        }
    }

    if ctx.output.is_json() {
        ctx.output.json(&identity.addresses());
        return Ok(());
    }

    ctx.output.header("Addresses");
    if identity.addresses().is_empty() {
        ctx.output.info("No saved addresses.");
    }
    for address in identity.addresses() {
        ctx.output.list_item(&format!(
            "{} {} {} {}",
            address.id,
            address.label,
            address.one_line(),
            default_marker(address.is_default)
        ));
    }
    Ok(())
}

fn payments(
    command: Option<PaymentCommand>,
    identity: &mut IdentityStore,
    ctx: &Context,
) -> Result<()> {
    require_user(identity)?;

    match command {
        None => {}
        Some(PaymentCommand::Add {
            brand,
            last_four,
            month,
            year,
            default,
        }) => {
            let brand =
                CardBrand::parse(&brand).ok_or_else(|| anyhow!("Unknown card brand: {}", brand))?;
            if last_four.len() != 4 || !last_four.chars().all(|c| c.is_ascii_digit()) {
                bail!("--last-four must be four digits");
            }
            let id = identity.add_payment_method(NewPaymentMethod {
                brand,
                last_four,
                expiry_month: month,
                expiry_year: year,
                is_default: default,
            });
            ctx.output.success(&session_only(&format!("Added card {}", id)));
        }
        Some(PaymentCommand::Default { id }) => {
            identity.set_default_payment_method(&PaymentMethodId::new(id))?;
            ctx.output.success(&session_only("Default card updated"));
        }
        Some(PaymentCommand::Delete { id }) => {
            let removed = identity.delete_payment_method(&PaymentMethodId::new(id))?;
            ctx.output.success(&session_only(&format!("Deleted {}", removed.masked())));
        }
    }

    if ctx.output.is_json() {
        ctx.output.json(&identity.payment_methods());
        return Ok(());
    }

    ctx.output.header("Payment methods");
    if identity.payment_methods().is_empty() {
        ctx.output.info("No saved cards.");
    }
    for method in identity.payment_methods() {
        ctx.output.list_item(&format!(
            "{} {} exp {} {}",
            method.id,
            method.masked(),
            method.expiry(),
            default_marker(method.is_default)
        ));
    }
    Ok(())
}

fn orders(number: Option<&str>, identity: &IdentityStore, ctx: &Context) -> Result<()> {
    require_user(identity)?;

    if let Some(number) = number {
        let order = identity
            .orders()
            .iter()
            .find(|o| o.order_number.as_str() == number)
            .ok_or_else(|| anyhow!("Order not found: {}", number))?;

        if ctx.output.is_json() {
            ctx.output.json(order);
            return Ok(());
        }

        ctx.output.header(&format!("Order {}", order.order_number));
        ctx.output.kv("placed", &order.placed_on.to_string());
        ctx.output.kv("status", &status_badge(order.status.display_name()));
        for line in &order.lines {
            ctx.output.list_item(&format!(
                "{} ×{}  {}",
                line.product.name,
                line.quantity,
                line.line_total()
            ));
        }
        ctx.output.kv("subtotal", &order.subtotal.to_string());
        ctx.output.kv("shipping", &order.shipping.to_string());
        ctx.output.kv("tax", &order.tax.to_string());
        ctx.output.kv("total", &order.total.to_string());
        ctx.output.kv("ship to", &order.shipping_address.one_line());
        ctx.output.kv("paid with", &order.payment_method.masked());
        return Ok(());
    }

    if ctx.output.is_json() {
        ctx.output.json(&identity.orders());
        return Ok(());
    }

    ctx.output.header("Orders");
    let widths = [16, 12, 12, 8, 14];
    ctx.output
        .table_row(&["NUMBER", "DATE", "STATUS", "ITEMS", "TOTAL"], &widths);
    for order in identity.orders() {
        ctx.output.table_row(
            &[
                order.order_number.as_str(),
                &order.placed_on.to_string(),
                order.status.display_name(),
                &order.item_count().to_string(),
                &order.total.to_string(),
            ],
            &widths,
        );
    }
    Ok(())
}
