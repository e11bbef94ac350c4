use crate::solana::{WalletSource, DEVNET_URL};
use clap::{Parser, ValueEnum};
use solana_sdk::pubkey::Pubkey;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// In-memory store, no wallet needed
    Mock,
    /// Accounts of the on-chain task program
    Solana,
}

/// Terminal to-do list backed by an in-memory store or a Solana program.
#[derive(Parser, Debug, Clone)]
#[command(name = "todo-dapp", version, about)]
pub struct Config {
    /// Where tasks are stored
    #[arg(long, value_enum, env = "TODO_BACKEND", default_value_t = BackendKind::Mock)]
    pub backend: BackendKind,

    /// JSON-RPC endpoint of the cluster
    #[arg(long, env = "TODO_RPC_URL", default_value = DEVNET_URL)]
    pub rpc_url: String,

    /// Address of the deployed task program
    #[arg(
        long,
        env = "TODO_PROGRAM_ID",
        value_parser = parse_pubkey,
        required_if_eq("backend", "solana")
    )]
    pub program_id: Option<Pubkey>,

    /// Solana CLI keypair file used to sign transactions
    #[arg(long, env = "TODO_KEYPAIR", conflicts_with = "address")]
    pub keypair: Option<PathBuf>,

    /// Watch-only wallet address, can list but not change tasks
    #[arg(long, env = "TODO_ADDRESS", value_parser = parse_pubkey)]
    pub address: Option<Pubkey>,

    /// JSON snapshot of the mock store, loaded on start and written on exit
    #[arg(long, env = "TODO_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Simulated round trip of every mock store call, in milliseconds
    #[arg(long, env = "TODO_LATENCY_MS", default_value_t = 0)]
    pub latency_ms: u64,

    #[arg(long, env = "TODO_LOG_FILE", default_value = "todo-dapp.log")]
    pub log_file: PathBuf,
}

fn parse_pubkey(value: &str) -> Result<Pubkey, String> {
    Pubkey::from_str(value).map_err(|err| format!("invalid address {value:?}: {err}"))
}

impl Config {
    pub fn wallet_source(&self) -> Option<WalletSource> {
        match (&self.keypair, self.address) {
            (Some(path), _) => Some(WalletSource::Keypair(path.clone())),
            (None, Some(address)) => Some(WalletSource::WatchOnly(address)),
            (None, None) => None,
        }
    }
}
