//! Pokedex - An interactive PokeAPI client
//!
//! Reads commands from stdin until `exit`, end of input or Ctrl+C.

use std::io;

use anyhow::Context;
use tokio::io::BufReader;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::repl::{self, Session};
use pokedex::{Cache, Config, PokeClient};

/// Main entry point for the Pokedex client.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the response cache and start its reaper
/// 4. Run the prompt loop on stdin/stdout
/// 5. Stop the reaper on exit
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so logs stay out of the prompt; override with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_interval={}s, base_url={}",
        config.cache_interval, config.base_url
    );

    let (cache, reaper) = Cache::new(config.cache_interval());
    let client = PokeClient::new(config.base_url.clone(), cache.clone());
    let mut session = Session::new(client);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();

    let mut interrupted = false;
    let outcome = tokio::select! {
        result = repl::run(&mut session, stdin, &mut stdout) => {
            result.context("prompt loop failed")
        }
        _ = shutdown_signal() => {
            println!();
            interrupted = true;
            Ok(())
        }
    };

    reaper.shutdown().await;

    let stats = cache.stats();
    info!(
        "Cache stats: hits={}, misses={}, evictions={}, hit_rate={:.2}",
        stats.hits,
        stats.misses,
        stats.evictions,
        stats.hit_rate()
    );

    if interrupted {
        // A pending blocking stdin read would keep the runtime from shutting down
        std::process::exit(0);
    }

    outcome
}

/// Resolves on Ctrl+C. Pends forever if the handler cannot be installed.
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down..."),
        Err(err) => {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    }
}
