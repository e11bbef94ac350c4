use crate::solana::instruction::OWNER_OFFSET;
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    client_error::ClientError,
    rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::{Memcmp, RpcFilterType},
};
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey, signature::Signature,
    transaction::Transaction,
};
use thiserror::Error;
use tracing::debug;

pub const DEVNET_URL: &str = "https://api.devnet.solana.com";

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("RPC request failed: {0}")]
    Rpc(#[from] ClientError),
}

/// The RPC calls the task store depends on.
#[cfg_attr(test, mockall::automock)]
pub trait ChainClient {
    fn latest_blockhash(&self) -> Result<Hash, ChainError>;

    /// Submits the signed transaction and blocks until it is confirmed.
    fn send_and_confirm(&self, tx: &Transaction) -> Result<Signature, ChainError>;

    /// Raw data of every account of `program_id` whose owner field is `owner`.
    fn program_accounts(
        &self,
        program_id: &Pubkey,
        owner: &Pubkey,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, ChainError>;
}

/// Accounts owned by `owner`, as base64. The node's default base58 encoding
/// rejects accounts larger than 128 bytes.
fn program_accounts_config(owner: &Pubkey) -> RpcProgramAccountsConfig {
    RpcProgramAccountsConfig {
        filters: Some(vec![RpcFilterType::Memcmp(Memcmp::new_raw_bytes(
            OWNER_OFFSET,
            owner.to_bytes().to_vec(),
        ))]),
        account_config: RpcAccountInfoConfig {
            encoding: Some(UiAccountEncoding::Base64),
            ..RpcAccountInfoConfig::default()
        },
        ..RpcProgramAccountsConfig::default()
    }
}

pub struct RpcChainClient {
    rpc: RpcClient,
}

impl RpcChainClient {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        debug!(%url, "Solana connection initialized");
        Self {
            rpc: RpcClient::new_with_commitment(url, CommitmentConfig::confirmed()),
        }
    }
}

impl ChainClient for RpcChainClient {
    fn latest_blockhash(&self) -> Result<Hash, ChainError> {
        Ok(self.rpc.get_latest_blockhash()?)
    }

    fn send_and_confirm(&self, tx: &Transaction) -> Result<Signature, ChainError> {
        Ok(self.rpc.send_and_confirm_transaction(tx)?)
    }

    fn program_accounts(
        &self,
        program_id: &Pubkey,
        owner: &Pubkey,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, ChainError> {
        let accounts = self
            .rpc
            .get_program_accounts_with_config(program_id, program_accounts_config(owner))?;
        Ok(accounts
            .into_iter()
            .map(|(address, account)| (address, account.data))
            .collect())
    }
}
