use std::collections::BTreeMap;

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use zk_account::{AccountError, BootloaderError, CallOutcome, CallRecord, TxReceipt};

/// What happened to one scenario transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum TxResult {
    /// The bootloader accepted the transaction. Execution may still have reverted.
    Accepted {
        /// The receipt of the transaction
        receipt: TxReceipt,
    },
    /// A relay or direct execution returned.
    Executed {
        /// The outcome of the call
        call: CallOutcome,
    },
    /// The transaction left no trace.
    Rejected {
        /// Human-readable reason
        error: String,
        /// The revert data the account produced, empty for bootloader-side checks
        revert_data: Bytes,
    },
}

impl TxResult {
    /// Whether the transaction changed state.
    pub const fn is_applied(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }
}

impl From<BootloaderError> for TxResult {
    fn from(error: BootloaderError) -> Self {
        let revert_data = match &error {
            BootloaderError::Validation(inner) | BootloaderError::Payment(inner) => {
                inner.revert_data()
            }
            _ => Bytes::new(),
        };
        Self::Rejected { error: error.to_string(), revert_data }
    }
}

impl From<AccountError> for TxResult {
    fn from(error: AccountError) -> Self {
        Self::Rejected { revert_data: error.revert_data(), error: error.to_string() }
    }
}

/// The result of a scenario run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// One result per scenario transaction, in order.
    pub results: Vec<TxResult>,
    /// Final balances of every tracked address.
    pub balances: BTreeMap<Address, U256>,
    /// Final minimum nonce of the account.
    pub nonce: U256,
    /// Every outgoing call the host observed, including those of rolled back transactions.
    pub calls: Vec<CallRecord>,
    /// Gas consumed by outgoing calls.
    pub gas_used: u64,
}
