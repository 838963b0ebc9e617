//! Contact form command.

use anyhow::{bail, Result};
use boutique_commerce::contact::{submit_contact, ContactError, ContactForm};

use super::ContactArgs;
use crate::context::Context;
use crate::storefront::Storefront;

/// Run the contact command.
pub async fn run(args: ContactArgs, ctx: &Context) -> Result<()> {
    let shop = Storefront::open(ctx)?;
    let form = ContactForm {
        name: args.name,
        email: args.email,
        phone: args.phone,
        subject: args.subject,
        message: args.message,
    };

    let spinner = ctx.output.spinner("Sending message...");
    let result = submit_contact(shop.contact_gateway(), &form).await;
    spinner.finish_and_clear();

    match result {
        Ok(confirmation) => {
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({ "message": confirmation }));
            } else {
                ctx.output.success(&confirmation);
            }
            Ok(())
        }
        Err(ContactError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                ctx.output.error(&format!("{}: {}", field, message));
            }
            bail!("Contact form is incomplete");
        }
        Err(ContactError::Send { notice, source }) => {
            ctx.output.debug(&source.to_string());
            bail!("{}", notice);
        }
    }
}
