use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signer},
    transaction::Transaction,
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("no wallet configured, pass --keypair or --address")]
    NotConfigured,
    #[error("failed to read keypair {path}: {reason}")]
    Keypair { path: PathBuf, reason: String },
    #[error("wallet {0} is watch-only and cannot sign")]
    ReadOnly(Pubkey),
    #[error("signing failed: {0}")]
    Signing(#[from] solana_sdk::signer::SignerError),
}

/// The identity tasks are owned by, and the fee payer of every transaction.
pub trait Wallet {
    fn pubkey(&self) -> Pubkey;

    fn sign_transaction(&self, tx: &mut Transaction, blockhash: Hash) -> Result<(), WalletError>;
}

pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    pub fn from_file(path: &Path) -> Result<Self, WalletError> {
        let keypair = read_keypair_file(path).map_err(|err| WalletError::Keypair {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Ok(Self::new(keypair))
    }
}

impl Wallet for KeypairWallet {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    fn sign_transaction(&self, tx: &mut Transaction, blockhash: Hash) -> Result<(), WalletError> {
        tx.try_sign(&[&self.keypair], blockhash)?;
        Ok(())
    }
}

/// Address-only wallet: enough to list the owner's tasks, not to change them.
pub struct WatchOnlyWallet {
    address: Pubkey,
}

impl WatchOnlyWallet {
    pub fn new(address: Pubkey) -> Self {
        Self { address }
    }
}

impl Wallet for WatchOnlyWallet {
    fn pubkey(&self) -> Pubkey {
        self.address
    }

    fn sign_transaction(&self, _tx: &mut Transaction, _blockhash: Hash) -> Result<(), WalletError> {
        Err(WalletError::ReadOnly(self.address))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletSource {
    Keypair(PathBuf),
    WatchOnly(Pubkey),
}

#[derive(Default)]
pub struct WalletConnection {
    source: Option<WalletSource>,
    wallet: Option<Box<dyn Wallet>>,
}

impl WalletConnection {
    pub fn new(source: Option<WalletSource>) -> Self {
        Self {
            source,
            wallet: None,
        }
    }

    pub fn connected(wallet: Box<dyn Wallet>) -> Self {
        Self {
            source: None,
            wallet: Some(wallet),
        }
    }

    pub fn wallet(&self) -> Option<&dyn Wallet> {
        self.wallet.as_deref()
    }

    pub fn connect(&mut self) -> Result<Pubkey, WalletError> {
        if let Some(wallet) = &self.wallet {
            return Ok(wallet.pubkey());
        }
        let wallet: Box<dyn Wallet> = match self.source.as_ref().ok_or(WalletError::NotConfigured)? {
            WalletSource::Keypair(path) => Box::new(KeypairWallet::from_file(path)?),
            WalletSource::WatchOnly(address) => Box::new(WatchOnlyWallet::new(*address)),
        };
        let pubkey = wallet.pubkey();
        info!(%pubkey, "Wallet connected");
        self.wallet = Some(wallet);
        Ok(pubkey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{instruction::Instruction, signature::write_keypair_file};

    fn noop_transaction(payer: &Pubkey) -> Transaction {
        let ix = Instruction::new_with_bytes(Pubkey::new_unique(), &[], vec![]);
        Transaction::new_with_payer(&[ix], Some(payer))
    }

    #[test]
    fn test_keypair_wallet_signs_transaction() {
        let wallet = KeypairWallet::new(Keypair::new());
        let mut tx = noop_transaction(&wallet.pubkey());
        let blockhash = Hash::new_unique();

        wallet.sign_transaction(&mut tx, blockhash).unwrap();

        assert_eq!(tx.message.recent_blockhash, blockhash);
        assert!(tx.verify().is_ok());
    }

    #[test]
    fn test_watch_only_wallet_refuses_to_sign() {
        let address = Pubkey::new_unique();
        let wallet = WatchOnlyWallet::new(address);
        let mut tx = noop_transaction(&address);

        let result = wallet.sign_transaction(&mut tx, Hash::new_unique());
        assert!(matches!(result, Err(WalletError::ReadOnly(a)) if a == address));
    }

    #[test]
    fn test_connect_without_source_fails() {
        let mut connection = WalletConnection::new(None);
        assert!(matches!(connection.connect(), Err(WalletError::NotConfigured)));
        assert!(connection.wallet().is_none());
    }

    #[test]
    fn test_connect_loads_keypair_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.json");
        let keypair = Keypair::new();
        write_keypair_file(&keypair, &path).unwrap();

        let mut connection = WalletConnection::new(Some(WalletSource::Keypair(path)));
        let pubkey = connection.connect().unwrap();

        assert_eq!(pubkey, keypair.pubkey());
        assert_eq!(connection.wallet().unwrap().pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_connect_reports_missing_keypair_file() {
        let mut connection =
            WalletConnection::new(Some(WalletSource::Keypair(PathBuf::from("/no/such/id.json"))));
        assert!(matches!(connection.connect(), Err(WalletError::Keypair { .. })));
    }

    #[test]
    fn test_connect_watch_only_address() {
        let address = Pubkey::new_unique();
        let mut connection = WalletConnection::new(Some(WalletSource::WatchOnly(address)));
        assert_eq!(connection.connect().unwrap(), address);
    }
}
