use std::path::PathBuf;

use alloy_primitives::B256;
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zk_account::{constants::ZKSYNC_ERA_CHAIN_ID, to_signed_message_hash, Transaction};

use crate::common::{load_json, write_json, LogArgs, Result};

/// Compute the hashes of a transaction
#[derive(Parser, Debug)]
pub struct Cmd {
    /// Transaction JSON file. If `-`, read from stdin
    #[arg(value_name = "TX", default_value = "-")]
    pub tx: String,

    /// Chain id the transaction is hashed for
    #[arg(long = "chain-id", default_value_t = ZKSYNC_ERA_CHAIN_ID)]
    pub chain_id: u64,

    /// Output file. If not given, print to stdout
    #[arg(long = "output", short = 'o')]
    pub output: Option<PathBuf>,

    /// Logging configuration
    #[command(flatten)]
    pub log_args: LogArgs,
}

/// The hashes of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxHashes {
    /// The canonical hash of the transaction.
    pub tx_hash: B256,
    /// The hash the owner signs.
    pub signed_hash: B256,
}

impl TxHashes {
    /// Hashes `tx` for `chain_id`.
    pub fn compute(tx: &Transaction, chain_id: u64) -> Result<Self> {
        let tx_hash = tx.signature_hash(chain_id)?;
        Ok(Self { tx_hash, signed_hash: to_signed_message_hash(tx_hash) })
    }
}

impl Cmd {
    /// Execute the hash command
    pub fn run(&self) -> Result<()> {
        self.log_args.init()?;
        let tx: Transaction = load_json(&self.tx)?;
        let hashes = TxHashes::compute(&tx, self.chain_id)?;
        debug!(tx_hash = %hashes.tx_hash, chain_id = self.chain_id, "Hashed transaction");
        write_json(&hashes, self.output.as_deref())
    }
}
