use std::sync::Arc;

use anyhow::Context;
use jemallocator::Jemalloc;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use cairn::{db::PoolRegistry, PricingConfig, PricingPass, Settings, Snapshot};

fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .context("Failed to initialize logger")?;

    // Load configuration
    let settings =
        Settings::new().context("Failed to load config.yaml. Please ensure it exists and is valid")?;

    let config = Arc::new(
        PricingConfig::from_settings(&settings.pricing).context("Invalid pricing configuration")?,
    );

    info!(
        "Pricing against base token {} with {} whitelist anchors",
        config.base_token(),
        config.whitelist().len()
    );

    let mut registry = Snapshot::from_path(&settings.snapshot.path)
        .with_context(|| format!("Failed to load snapshot from {}", settings.snapshot.path))?
        .into_registry();

    info!(
        "Loaded snapshot: {} tokens, {} pools",
        registry.token_count(),
        registry.pool_count()
    );

    let pass = PricingPass::new(config);
    let summary = pass.run(&mut registry).context("Pricing pass failed")?;

    let base_price_usd = &summary.base_price_usd;
    for address in registry.token_addresses() {
        if let Some(token) = registry.load_token(&address) {
            info!(
                "{} ({}): {} base / ${}",
                token.address,
                token.symbol,
                token.derived_base_price,
                &token.derived_base_price * base_price_usd
            );
        }
    }

    if let Some(output) = &settings.snapshot.output {
        Snapshot::from_registry(&registry)
            .write_to(output)
            .with_context(|| format!("Failed to write priced snapshot to {}", output))?;
        info!("Priced snapshot written to {}", output);
    }

    Ok(())
}
