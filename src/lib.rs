//! Terminal to-do list with pluggable task storage: an in-memory mock store
//! or accounts of a Solana program.

pub mod app;
pub mod config;
pub mod form;
pub mod logging;
pub mod solana;
pub mod store;
pub mod task;
pub mod ui;

use crate::config::{BackendKind, Config};
use crate::solana::{RpcChainClient, SolanaStore, WalletConnection};
use crate::store::{mock::MockStore, TaskStore};
use std::{io, time::Duration};
use tracing::error;

/// Builds the backend selected by the configuration.
pub fn build_store(config: &Config) -> anyhow::Result<Box<dyn TaskStore>> {
    match config.backend {
        BackendKind::Mock => {
            let store = match &config.data_file {
                Some(path) => MockStore::open(path),
                None => MockStore::with_sample_tasks(),
            };
            Ok(Box::new(
                store.with_latency(Duration::from_millis(config.latency_ms)),
            ))
        }
        BackendKind::Solana => {
            let program_id = config
                .program_id
                .ok_or_else(|| anyhow::anyhow!("--program-id is required for the solana backend"))?;
            Ok(Box::new(SolanaStore::new(
                RpcChainClient::new(config.rpc_url.clone()),
                program_id,
                WalletConnection::new(config.wallet_source()),
            )))
        }
    }
}

/// Restores the terminal, then saves the tasks. Saving happens even when the
/// restore fails; the restore error is returned afterwards.
pub fn shutdown(
    store: &dyn TaskStore,
    restore: impl FnOnce() -> io::Result<()>,
) -> anyhow::Result<()> {
    let restored = restore();
    if let Err(err) = store.persist() {
        error!(%err, "Failed to save tasks");
        eprintln!("{err}");
    }
    restored?;
    Ok(())
}
