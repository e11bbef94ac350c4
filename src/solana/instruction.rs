use crate::solana::pda::TaskSeed;
use crate::task::{Task, TaskDraft};
use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use solana_system_interface::program as system_program;
use std::io;

/// Instruction set of the task program, Borsh encoded.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum TaskInstruction {
    CreateTask {
        seed: TaskSeed,
        bump: u8,
        title: String,
        description: String,
    },
    UpdateTask {
        title: String,
        description: String,
    },
    DeleteTask,
}

/// Data of a task account. `owner` sits at offset 0 so accounts can be
/// filtered by owner on the RPC side.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskAccount {
    pub owner: [u8; 32],
    pub title: String,
    pub description: String,
}

pub const OWNER_OFFSET: usize = 0;

impl TaskAccount {
    /// Accounts are allocated with headroom; trailing bytes are ignored.
    pub fn decode(mut data: &[u8]) -> io::Result<Self> {
        Self::deserialize(&mut data)
    }

    pub fn into_task(self, address: &Pubkey) -> Task {
        Task {
            id: address.to_string(),
            title: self.title,
            description: self.description,
        }
    }
}

pub fn create_task(
    program_id: &Pubkey,
    payer: &Pubkey,
    task: &Pubkey,
    seed: TaskSeed,
    bump: u8,
    draft: &TaskDraft,
) -> io::Result<Instruction> {
    let data = TaskInstruction::CreateTask {
        seed,
        bump,
        title: draft.title.clone(),
        description: draft.description.clone(),
    };
    Ok(Instruction::new_with_bytes(
        *program_id,
        &borsh::to_vec(&data)?,
        vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(*task, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
    ))
}

pub fn update_task(
    program_id: &Pubkey,
    owner: &Pubkey,
    task: &Pubkey,
    draft: &TaskDraft,
) -> io::Result<Instruction> {
    let data = TaskInstruction::UpdateTask {
        title: draft.title.clone(),
        description: draft.description.clone(),
    };
    Ok(Instruction::new_with_bytes(
        *program_id,
        &borsh::to_vec(&data)?,
        vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new(*task, false),
        ],
    ))
}

/// The owner is writable because it receives the reclaimed rent.
pub fn delete_task(program_id: &Pubkey, owner: &Pubkey, task: &Pubkey) -> io::Result<Instruction> {
    Ok(Instruction::new_with_bytes(
        *program_id,
        &borsh::to_vec(&TaskInstruction::DeleteTask)?,
        vec![AccountMeta::new(*owner, true), AccountMeta::new(*task, false)],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_instruction_accounts_and_data() {
        let program_id = Pubkey::new_unique();
        let payer = Pubkey::new_unique();
        let task = Pubkey::new_unique();
        let draft = TaskDraft::new("Title", "Description");

        let ix = create_task(&program_id, &payer, &task, [7u8; 32], 254, &draft).unwrap();

        assert_eq!(ix.program_id, program_id);
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta::new(payer, true),
                AccountMeta::new(task, false),
                AccountMeta::new_readonly(system_program::id(), false),
            ]
        );
        let decoded: TaskInstruction = borsh::from_slice(&ix.data).unwrap();
        assert_eq!(
            decoded,
            TaskInstruction::CreateTask {
                seed: [7u8; 32],
                bump: 254,
                title: "Title".to_string(),
                description: "Description".to_string(),
            }
        );
    }

    #[test]
    fn test_update_instruction_signer_is_readonly_owner() {
        let program_id = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let task = Pubkey::new_unique();

        let ix = update_task(&program_id, &owner, &task, &TaskDraft::new("t", "d")).unwrap();

        assert!(ix.accounts[0].is_signer);
        assert!(!ix.accounts[0].is_writable);
        assert!(ix.accounts[1].is_writable);
        assert_eq!(ix.accounts[1].pubkey, task);
    }

    #[test]
    fn test_delete_instruction_is_a_single_discriminant() {
        let ix = delete_task(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
        )
        .unwrap();
        // Borsh enum tags are one byte; DeleteTask is the third variant.
        assert_eq!(ix.data, vec![2]);
        assert!(ix.accounts.iter().all(|meta| meta.is_writable));
    }

    #[test]
    fn test_task_account_decode_ignores_padding() {
        let owner = Pubkey::new_unique();
        let account = TaskAccount {
            owner: owner.to_bytes(),
            title: "On chain".to_string(),
            description: "Stored".to_string(),
        };
        let mut data = borsh::to_vec(&account).unwrap();
        data.extend_from_slice(&[0u8; 64]);

        let decoded = TaskAccount::decode(&data).unwrap();
        assert_eq!(decoded.owner, owner.to_bytes());
        assert_eq!(&data[OWNER_OFFSET..OWNER_OFFSET + 32], owner.as_ref());

        let address = Pubkey::new_unique();
        let task = decoded.into_task(&address);
        assert_eq!(task.id, address.to_string());
        assert_eq!(task.title, "On chain");
    }

    #[test]
    fn test_task_account_decode_rejects_truncated_data() {
        assert!(TaskAccount::decode(&[1, 2, 3]).is_err());
    }
}
