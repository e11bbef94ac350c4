//! On-chain task backend: every task is an account of the task program,
//! addressed by a program-derived address and mutated through signed
//! transactions.

pub mod client;
pub mod instruction;
pub mod pda;
pub mod store;
pub mod wallet;

pub use client::{ChainClient, RpcChainClient, DEVNET_URL};
pub use store::SolanaStore;
pub use wallet::{WalletConnection, WalletSource};
