//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    if ctx.output.is_json() {
        let mut redacted = config.clone();
        if !redacted.functions.api_key.is_empty() {
            redacted.functions.api_key = "***".to_string();
        }
        ctx.output.json(&redacted);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    // Store section
    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("currency", &config.store.currency);
    ctx.output.kv(
        "free_shipping_threshold",
        &config.store.free_shipping_threshold.to_string(),
    );
    ctx.output
        .kv("flat_shipping_fee", &config.store.flat_shipping_fee.to_string());
    ctx.output.kv("country", &config.store.country);
    ctx.output.kv("return_url", &config.store.return_url);
    if let Some(path) = &config.store.catalog {
        ctx.output
            .kv("catalog", &ctx.resolve_path(path).display().to_string());
    }
    for (code, rate) in &config.store.coupons {
        ctx.output.kv(&format!("coupon {}", code), &format!("{:.0}%", rate * 100.0));
    }

    // Storage section
    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("backend", &format!("{:?}", config.storage.backend).to_lowercase());
    ctx.output
        .kv("dir", &ctx.resolve_path(&config.storage.dir).display().to_string());

    // Functions section, with environment overrides applied
    let functions = config.functions.to_functions_config();
    ctx.output.info("");
    ctx.output.info("[functions]");
    if functions.is_configured() {
        ctx.output.kv("base_url", &functions.base_url);
    } else {
        ctx.output.kv("base_url", "(not configured)");
    }
    ctx.output.kv(
        "api_key",
        if functions.api_key.is_empty() { "(none)" } else { "(set)" },
    );
    ctx.output
        .kv("timeout", &format!("{}s", functions.timeout.as_secs()));

    ctx.output.info("");
    ctx.output.info("[auth]");
    ctx.output.kv("latency_ms", &config.auth.latency_ms.to_string());

    ctx.output.info("");
    ctx.output.info("[payment]");
    ctx.output
        .kv("simulate", &format!("{:?}", config.payment.simulate).to_lowercase());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("boutique.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
