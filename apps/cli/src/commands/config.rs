//! Configuration management commands.

use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use bookstore_client::ClientConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::output::Output;

/// Runs without a [`crate::context::Context`] so a broken config can be
/// inspected and replaced.
pub fn run(args: ConfigArgs, config_path: Option<PathBuf>, output: &Output) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(config_path, output),
        ConfigCommand::Init { force } => init_config(config_path, force, output),
    }
}

fn show_config(config_path: Option<PathBuf>, output: &Output) -> Result<()> {
    let path = config_path.clone().or_else(ClientConfig::default_config_path);
    let config = ClientConfig::load(config_path)?;

    if output.is_json() {
        output.json(&config);
        return Ok(());
    }

    output.header("Current Configuration");
    match &path {
        Some(p) if p.exists() => output.kv("file", &p.display().to_string()),
        Some(p) => output.kv("file", &format!("{} (not present, defaults)", p.display())),
        None => output.kv("file", "(none)"),
    }

    output.info("[api]");
    output.kv("base_url", config.base_url());
    output.kv("connect_timeout_secs", &config.api.connect_timeout_secs.to_string());
    output.kv("request_timeout_secs", &config.api.request_timeout_secs.to_string());

    output.info("[session]");
    let token_path = config
        .token_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(in memory)".to_string());
    output.kv("token_file", &token_path);

    output.info("[cart]");
    output.kv("updated_flag_ms", &config.cart.updated_flag_ms.to_string());

    Ok(())
}

fn init_config(config_path: Option<PathBuf>, force: bool, output: &Output) -> Result<()> {
    let path = config_path
        .or_else(ClientConfig::default_config_path)
        .context("No config directory available; pass --config")?;

    if path.exists() && !force {
        bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    let written = ClientConfig::default().save(Some(path))?;
    output.success(&format!("Wrote {}", written.display()));
    Ok(())
}
