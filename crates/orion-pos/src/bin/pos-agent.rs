//! # pos-agent
//!
//! Headless POS bridge: loads `pos.toml`, restores the signed-in session,
//! probes the POS, catches up on sales, pushes the catalog, and pulls sales
//! on the configured cadence until Ctrl-C.
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show debug messages
//! - Default: `info,orion=debug`
//!
//! ## Environment
//! - `ORION_POS_API_URL`, `ORION_POS_API_KEY`, `ORION_POS_POLL_SECS`,
//!   `ORION_DATA_DIR` override the config file
//! - `ORION_POS_EMAIL` / `ORION_POS_PASSWORD` sign in a demo account when no
//!   session was persisted

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use orion_pos::{HttpPosClient, PollScheduler, PosBridge, PosConfig, TracingEmitter};
use orion_store::{DomainStore, FileKeyValueStore, KeyValueStore, SessionStore};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,orion=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = PosConfig::load(config_path)?;
    info!(url = %config.base_url(), poll_secs = config.schedule.poll_interval_secs, "POS config loaded");

    let kv: Arc<dyn KeyValueStore> = match &config.storage.data_dir {
        Some(dir) => Arc::new(FileKeyValueStore::open(dir)?),
        None => Arc::new(FileKeyValueStore::open_default()?),
    };

    let session = Arc::new(SessionStore::restore(kv.clone()));
    if !session.is_authenticated() {
        if let (Ok(email), Ok(password)) = (
            std::env::var("ORION_POS_EMAIL"),
            std::env::var("ORION_POS_PASSWORD"),
        ) {
            if !session.login(&email, &password) {
                warn!(email = %email, "Demo sign-in rejected");
            }
        }
    }
    if !session.is_authenticated() {
        warn!("No signed-in user; POS pulls will be rejected until one signs in");
    }

    let store = DomainStore::seeded().into_handle();
    let api = Arc::new(HttpPosClient::new(&config)?);
    let bridge = Arc::new(
        PosBridge::new(api, store, session, kv)
            .with_emitter(Arc::new(TracingEmitter))
            .with_wholesaler_id(config.api.wholesaler_id.clone()),
    );

    if bridge.test_connection().await {
        // Sales rung up while the agent was down come in before the push.
        if let Err(e) = bridge.sync_sales_from_pos().await {
            warn!(error = %e, "Initial sales pull failed");
        }
        if let Err(e) = bridge.sync_products_to_pos().await {
            warn!(error = %e, "Initial catalog push failed");
        }
    } else {
        warn!("POS unreachable at startup; the scheduler will keep probing");
    }

    let scheduler = PollScheduler::spawn(bridge.clone(), config.schedule.clone());

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
    }
    info!("Shutting down");
    scheduler.shutdown().await;

    Ok(())
}
