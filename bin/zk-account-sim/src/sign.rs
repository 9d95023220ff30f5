use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use zk_account::{constants::ZKSYNC_ERA_CHAIN_ID, sign_hash, signer_address, Transaction};

use crate::common::{load_json, parse_private_key, write_json, LogArgs, Result};

/// Sign a transaction
#[derive(Parser, Debug)]
pub struct Cmd {
    /// Transaction JSON file. If `-`, read from stdin
    #[arg(value_name = "TX", default_value = "-")]
    pub tx: String,

    /// Hex-encoded secp256k1 private key of the signer
    #[arg(long = "private-key", env = "ZK_ACCOUNT_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Chain id the transaction is signed for
    #[arg(long = "chain-id", default_value_t = ZKSYNC_ERA_CHAIN_ID)]
    pub chain_id: u64,

    /// Output file. If not given, print to stdout
    #[arg(long = "output", short = 'o')]
    pub output: Option<PathBuf>,

    /// Logging configuration
    #[command(flatten)]
    pub log_args: LogArgs,
}

impl Cmd {
    /// Execute the sign command
    pub fn run(&self) -> Result<()> {
        self.log_args.init()?;
        let tx: Transaction = load_json(&self.tx)?;
        let signed = self.sign(tx)?;
        write_json(&signed, self.output.as_deref())
    }

    /// Replaces the signature of `tx` with one over its signed-message hash.
    pub fn sign(&self, mut tx: Transaction) -> Result<Transaction> {
        let key = parse_private_key(&self.private_key)?;
        let hash = tx.signed_message_hash(self.chain_id)?;
        tx.signature = sign_hash(&key, &hash)?;
        info!(signer = %signer_address(&key), %hash, "Signed transaction");
        Ok(tx)
    }
}
