//! A host-side driver running the account lifecycle the way the bootloader does.

use alloy_primitives::{Address, Bytes, FixedBytes, B256, U256};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    constants::ACCOUNT_VALIDATION_SUCCESS_MAGIC, to_signed_message_hash, Account, AccountError,
    Host, Transaction,
};

/// Reasons the bootloader rejects a transaction. A rejected transaction leaves no trace.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BootloaderError {
    /// Validation aborted.
    #[error("validation failed: {0}")]
    Validation(AccountError),
    /// Validation returned something other than the success magic.
    #[error("validation returned invalid magic {0}")]
    InvalidMagic(FixedBytes<4>),
    /// Validation did not consume exactly one nonce.
    #[error("nonce not increased: before {before}, after {after}")]
    NonceNotIncreased {
        /// The minimum nonce before validation
        before: U256,
        /// The minimum nonce after validation
        after: U256,
    },
    /// The payment step aborted.
    #[error("payment failed: {0}")]
    Payment(AccountError),
    /// The bootloader received less than the required fee.
    #[error("received insufficient fees: received {received}, required {required}")]
    ReceivedInsufficientFees {
        /// The amount the bootloader balance grew by
        received: U256,
        /// The maximum fee of the transaction
        required: U256,
    },
}

/// How the execution step of an accepted transaction ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "result")]
pub enum ExecutionStatus {
    /// The call succeeded.
    Success {
        /// The return data of the callee
        output: Bytes,
    },
    /// The call failed. Nonce and fee stay committed.
    Reverted {
        /// The revert data of the account
        revert_data: Bytes,
    },
}

impl ExecutionStatus {
    /// Whether the execution succeeded.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// The result of an accepted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    /// The canonical hash of the transaction.
    pub tx_hash: B256,
    /// The hash the owner signed.
    pub signed_hash: B256,
    /// The nonce the transaction consumed.
    pub nonce: U256,
    /// The fee the bootloader received.
    pub fee_paid: U256,
    /// The outcome of the execution step.
    pub status: ExecutionStatus,
}

/// Drives accounts through validation, payment and execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bootloader {
    address: Address,
}

impl Bootloader {
    /// Creates a driver that calls accounts from `address`.
    pub const fn new(address: Address) -> Self {
        Self { address }
    }

    /// The address the driver calls accounts from.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Processes a transaction sent from `account`.
    ///
    /// Validation and payment failures reject the transaction and roll it back entirely. A
    /// failed execution does not: the receipt reports it while the nonce and the fee stay
    /// committed.
    pub fn process_transaction<H: Host>(
        &self,
        host: &mut H,
        account: &Account,
        tx: &Transaction,
    ) -> Result<TxReceipt, BootloaderError> {
        let checkpoint = host.checkpoint();
        match self.process_inner(host, account, tx) {
            Ok(receipt) => {
                host.checkpoint_commit(checkpoint);
                info!(
                    tx_hash = %receipt.tx_hash,
                    success = receipt.status.is_success(),
                    fee_paid = %receipt.fee_paid,
                    "Transaction processed"
                );
                Ok(receipt)
            }
            Err(error) => {
                host.checkpoint_revert(checkpoint);
                warn!(%error, account = %account.address(), "Transaction rejected");
                Err(error)
            }
        }
    }

    fn process_inner<H: Host>(
        &self,
        host: &mut H,
        account: &Account,
        tx: &Transaction,
    ) -> Result<TxReceipt, BootloaderError> {
        let tx_hash = tx
            .signature_hash(account.config().chain_id)
            .map_err(|err| BootloaderError::Validation(err.into()))?;
        let signed_hash = to_signed_message_hash(tx_hash);

        let nonce_before = host.min_nonce(account.address());
        let balance_before = host.balance(self.address);

        let magic = account
            .validate_transaction(host, self.address, tx_hash, signed_hash, tx)
            .map_err(BootloaderError::Validation)?;
        if magic != ACCOUNT_VALIDATION_SUCCESS_MAGIC {
            return Err(BootloaderError::InvalidMagic(magic));
        }

        let nonce_after = host.min_nonce(account.address());
        if nonce_after != nonce_before.saturating_add(U256::from(1)) {
            return Err(BootloaderError::NonceNotIncreased {
                before: nonce_before,
                after: nonce_after,
            });
        }
        debug!(%tx_hash, nonce = %nonce_before, "Validation passed");

        let fee_paid = if tx.has_paymaster() {
            account
                .prepare_for_paymaster(host, self.address, tx_hash, signed_hash, tx)
                .map_err(BootloaderError::Payment)?;
            U256::ZERO
        } else {
            account
                .pay_for_transaction(host, self.address, tx_hash, signed_hash, tx)
                .map_err(BootloaderError::Payment)?;
            let required = tx
                .required_fee()
                .ok_or(BootloaderError::Payment(AccountError::FeeOverflow))?;
            let received = host.balance(self.address).saturating_sub(balance_before);
            if received < required {
                return Err(BootloaderError::ReceivedInsufficientFees { received, required });
            }
            received
        };
        debug!(%tx_hash, %fee_paid, "Payment passed");

        let status = match account.execute_transaction(host, self.address, tx_hash, signed_hash, tx)
        {
            Ok(outcome) => ExecutionStatus::Success { output: outcome.output },
            Err(error) => {
                warn!(%tx_hash, %error, "Execution reverted");
                ExecutionStatus::Reverted { revert_data: error.revert_data() }
            }
        };

        Ok(TxReceipt { tx_hash, signed_hash, nonce: nonce_before, fee_paid, status })
    }
}
