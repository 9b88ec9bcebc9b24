//! ShopSnap command-line entry point.
//!
//! Restores the local session, runs one search for the words given on the
//! command line and prints the ranked offers in the display currency.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use shopsnap::adapters::{
    FileKeyValueStore, GeminiSearchProvider, OpenErApiRateProvider, SimulatedSettlement,
};
use shopsnap::application::{
    default_shared_rates, HostEnvironment, RateRefresher, SearchOutcome, SessionDeps, ShopSession,
};
use shopsnap::config::{AppConfig, LogFormat, LoggingConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging);
    config.validate()?;

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.trim().is_empty() {
        eprintln!("usage: shopsnap <product description>");
        std::process::exit(2);
    }

    let rates = default_shared_rates();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresher = if config.rates.enabled {
        let provider = OpenErApiRateProvider::new(config.rates.provider())?;
        let refresher = RateRefresher::new(
            Arc::new(provider),
            rates.clone(),
            config.rates.refresher(),
        );
        Some(refresher.spawn(shutdown_rx))
    } else {
        tracing::info!("Live exchange rates disabled, using defaults");
        None
    };

    let gemini = config
        .search
        .gemini()
        .ok_or("search API key is not configured")?;
    let deps = SessionDeps {
        search: Arc::new(GeminiSearchProvider::new(gemini)?),
        store: Arc::new(FileKeyValueStore::new(&config.storage.path)),
        settlement: Arc::new(SimulatedSettlement::new(config.checkout.timings())),
        rates,
    };
    let host = HostEnvironment::from_env();
    let mut session = ShopSession::bootstrap(deps, &host).await;
    tracing::info!(
        tier = %session.tier(),
        usage = session.search_usage(),
        language = %session.language(),
        currency = %session.currency(),
        "Session restored"
    );

    match session.search(&query).await {
        SearchOutcome::Found(data) => {
            println!("{}", data.product.name);
            for listing in &data.listings {
                println!(
                    "  {:<24} {:>12} + {:>10} shipping, {} days, {:.1} stars",
                    listing.retailer.name,
                    session.format_price(listing.price).await,
                    session.format_price(listing.shipping_cost).await,
                    listing.shipping_days,
                    listing.rating,
                );
            }
            if let Some(remaining) = session.gate_decision().remaining {
                println!("{} trial searches left", remaining);
            }
        }
        SearchOutcome::Gated(_) => {
            println!("Free trial used up. Upgrade to keep searching.");
        }
        SearchOutcome::Unavailable(e) => {
            println!("Search is unavailable right now: {}", e);
        }
        SearchOutcome::Ignored => {}
    }

    let _ = shutdown_tx.send(true);
    if let Some(handle) = refresher {
        handle.await?;
    }
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
