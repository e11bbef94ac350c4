//! Task persistence backends.
//!
//! The UI talks to a [`TaskStore`] and never knows whether tasks live in the
//! in-memory mock or in accounts of the on-chain program. Network failures are
//! logged where they happen and reach the caller only as the generic
//! user-facing variants of [`TaskError`].

pub mod mock;

use crate::task::{Task, TaskDraft, ValidationError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Please connect your wallet first!")]
    WalletNotConnected,
    #[error("Wallet unavailable: {0}")]
    WalletUnavailable(String),
    #[error("Failed to create task")]
    Create,
    #[error("Failed to update task")]
    Update,
    #[error("Failed to delete task")]
    Delete,
    #[error("Failed to save tasks: {0}")]
    Persist(String),
}

/// Whether the backend needs a wallet, and which one is connected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletStatus {
    NotRequired,
    Disconnected,
    Connected(String),
}

pub trait TaskStore {
    /// Failures collapse to an empty list.
    fn list_tasks(&self) -> Vec<Task>;

    /// Returns the id the backend assigned to the new task.
    fn create_task(&mut self, draft: &TaskDraft) -> Result<String, TaskError>;

    fn update_task(&mut self, id: &str, draft: &TaskDraft) -> Result<(), TaskError>;

    fn delete_task(&mut self, id: &str) -> Result<(), TaskError>;

    fn wallet_status(&self) -> WalletStatus {
        WalletStatus::NotRequired
    }

    /// Returns the connected address.
    fn connect_wallet(&mut self) -> Result<String, TaskError> {
        Ok(String::new())
    }

    fn persist(&self) -> Result<(), TaskError> {
        Ok(())
    }
}
