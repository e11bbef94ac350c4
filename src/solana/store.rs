use crate::solana::{
    client::{ChainClient, ChainError},
    instruction::{self, TaskAccount},
    pda,
    wallet::{Wallet, WalletConnection, WalletError},
};
use crate::store::{TaskError, TaskStore, WalletStatus};
use crate::task::{Task, TaskDraft};
use chrono::Utc;
use solana_sdk::{
    instruction::Instruction, pubkey::Pubkey, signature::Signature, transaction::Transaction,
};
use std::io;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Why a submission failed. Only logged; callers see the generic `TaskError`.
#[derive(Debug, Error)]
enum SubmitError {
    #[error(transparent)]
    Chain(#[from] ChainError),
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error("failed to encode instruction: {0}")]
    Encode(#[from] io::Error),
}

/// Tasks stored as accounts of the task program, one account per task.
pub struct SolanaStore<C> {
    client: C,
    program_id: Pubkey,
    wallet: WalletConnection,
}

impl<C: ChainClient> SolanaStore<C> {
    pub fn new(client: C, program_id: Pubkey, wallet: WalletConnection) -> Self {
        Self {
            client,
            program_id,
            wallet,
        }
    }

    fn connected_wallet(&self) -> Result<&dyn Wallet, TaskError> {
        self.wallet.wallet().ok_or(TaskError::WalletNotConnected)
    }

    /// Blockhash, fee payer, wallet signature, submit, confirm.
    fn submit(&self, wallet: &dyn Wallet, ix: Instruction) -> Result<Signature, SubmitError> {
        let blockhash = self.client.latest_blockhash()?;
        let mut tx = Transaction::new_with_payer(&[ix], Some(&wallet.pubkey()));
        wallet.sign_transaction(&mut tx, blockhash)?;
        let signature = self.client.send_and_confirm(&tx)?;
        info!(%signature, "Transaction confirmed");
        Ok(signature)
    }

    fn submit_create(&self, wallet: &dyn Wallet, draft: &TaskDraft) -> Result<Pubkey, SubmitError> {
        let payer = wallet.pubkey();
        let seed = pda::new_task_seed(&payer, Utc::now().timestamp_millis());
        let (address, bump) = pda::derive_task_address(&seed, &self.program_id);
        let ix = instruction::create_task(&self.program_id, &payer, &address, seed, bump, draft)?;
        self.submit(wallet, ix)?;
        Ok(address)
    }

    fn submit_update(
        &self,
        wallet: &dyn Wallet,
        id: &str,
        draft: &TaskDraft,
    ) -> Result<(), SubmitError> {
        let address = pda::resolve_task_address(id, &self.program_id);
        let ix = instruction::update_task(&self.program_id, &wallet.pubkey(), &address, draft)?;
        self.submit(wallet, ix)?;
        Ok(())
    }

    fn submit_delete(&self, wallet: &dyn Wallet, id: &str) -> Result<(), SubmitError> {
        let address = pda::resolve_task_address(id, &self.program_id);
        let ix = instruction::delete_task(&self.program_id, &wallet.pubkey(), &address)?;
        self.submit(wallet, ix)?;
        Ok(())
    }
}

impl<C: ChainClient> TaskStore for SolanaStore<C> {
    fn list_tasks(&self) -> Vec<Task> {
        let Some(wallet) = self.wallet.wallet() else {
            return Vec::new();
        };
        let owner = wallet.pubkey();
        let accounts = match self.client.program_accounts(&self.program_id, &owner) {
            Ok(accounts) => accounts,
            Err(err) => {
                warn!(%err, "Error fetching tasks");
                return Vec::new();
            }
        };
        accounts
            .into_iter()
            .filter_map(|(address, data)| match TaskAccount::decode(&data) {
                Ok(account) => Some(account.into_task(&address)),
                Err(err) => {
                    debug!(%address, %err, "Skipping undecodable task account");
                    None
                }
            })
            .collect()
    }

    fn create_task(&mut self, draft: &TaskDraft) -> Result<String, TaskError> {
        draft.validate()?;
        let wallet = self.connected_wallet()?;
        info!(wallet = %wallet.pubkey(), "Creating task");
        self.submit_create(wallet, draft)
            .map(|address| address.to_string())
            .map_err(|err| {
                error!(%err, "Error creating task");
                TaskError::Create
            })
    }

    fn update_task(&mut self, id: &str, draft: &TaskDraft) -> Result<(), TaskError> {
        draft.validate()?;
        let wallet = self.connected_wallet()?;
        self.submit_update(wallet, id, draft).map_err(|err| {
            error!(%id, %err, "Error updating task");
            TaskError::Update
        })
    }

    fn delete_task(&mut self, id: &str) -> Result<(), TaskError> {
        let wallet = self.connected_wallet()?;
        self.submit_delete(wallet, id).map_err(|err| {
            error!(%id, %err, "Error deleting task");
            TaskError::Delete
        })
    }

    fn wallet_status(&self) -> WalletStatus {
        match self.wallet.wallet() {
            Some(wallet) => WalletStatus::Connected(wallet.pubkey().to_string()),
            None => WalletStatus::Disconnected,
        }
    }

    fn connect_wallet(&mut self) -> Result<String, TaskError> {
        self.wallet
            .connect()
            .map(|pubkey| pubkey.to_string())
            .map_err(|err| {
                error!(%err, "Wallet connection failed");
                TaskError::WalletUnavailable(err.to_string())
            })
    }
}
