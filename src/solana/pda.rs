//! Seeds and program-derived addresses of task accounts.
//!
//! A new task is addressed by a seed made of the payer's address prefix and a
//! hashed creation timestamp. An existing task whose id is not itself an
//! address is located through a hash of the id. Collisions are not handled.

use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

pub type TaskSeed = [u8; 32];

const PREFIX_LEN: usize = 16;

pub fn new_task_seed(payer: &Pubkey, timestamp_millis: i64) -> TaskSeed {
    let digest = Sha256::digest(timestamp_millis.to_string().as_bytes());
    let mut seed = [0u8; 32];
    seed[..PREFIX_LEN].copy_from_slice(&payer.to_bytes()[..PREFIX_LEN]);
    seed[PREFIX_LEN..].copy_from_slice(&digest[..PREFIX_LEN]);
    seed
}

pub fn existing_task_seed(task_id: &str) -> TaskSeed {
    Sha256::digest(task_id.as_bytes()).into()
}

pub fn derive_task_address(seed: &TaskSeed, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seed.as_slice()], program_id)
}

/// Ids handed out by the chain are base58 addresses and are used as-is.
pub fn resolve_task_address(task_id: &str, program_id: &Pubkey) -> Pubkey {
    match Pubkey::from_str(task_id) {
        Ok(address) => address,
        Err(_) => derive_task_address(&existing_task_seed(task_id), program_id).0,
    }
}
