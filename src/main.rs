//! Command-line entry point: normalizes one piece of text and prints it.
//!
//! Configuration comes from `conf/normalizer.toml` when that file exists.
//! Without it the built-in tables are used with the CLI operation set.

use anyhow::{Context, Result, anyhow};
use pl_normalizer::{
    DEFAULT_NORMALIZER_PATH, NormalizationConfig, TextNormalizer, cli_operations, load_config,
};
use std::env;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let text = parse_args()?;
    let path = Path::new(DEFAULT_NORMALIZER_PATH);
    let config = if path.exists() {
        load_config(path)
    } else {
        info!(path = %path.display(), "No normalizer config found; using CLI defaults");
        NormalizationConfig::with_operations(cli_operations())
    };
    set_log_level(reload_handle, config.log_level.as_filter_str());
    debug!(
        level = %config.log_level,
        operations = config.operations.len(),
        "Active normalizer configuration"
    );

    let normalizer = TextNormalizer::new(config).context("Failed to build the normalizer")?;
    let normalized = normalizer
        .transliterate(&text)
        .context("Failed to normalize input")?;
    println!("{normalized}");
    Ok(())
}

fn parse_args() -> Result<String> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        return Err(anyhow!("Usage: pl-normalize <text>"));
    }
    Ok(args.join(" "))
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    if env::var_os("RUST_LOG").is_some() {
        return;
    }
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        debug!(%level, "Log level set from config");
    }
}
