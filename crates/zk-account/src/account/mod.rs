//! The single-owner account and its entry points.
//!
//! Every entry point runs inside a host checkpoint: it is either applied completely or, on any
//! error, leaves no trace in the host.

mod dispatch;
mod executor;
mod gate;
mod validator;

pub use validator::*;

use alloy_primitives::{Address, FixedBytes, B256};
use tracing::{debug, trace};

use crate::{
    AccountConfig, AccountError, CallOutcome, Host, Ownable, OwnershipError, RelayPolicy,
    Transaction,
};

/// A contract account controlled by a single ECDSA key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    address: Address,
    ownable: Ownable,
    config: AccountConfig,
}

impl Account {
    /// Creates an account deployed at `address` and owned by `owner`.
    pub fn new(
        address: Address,
        owner: Address,
        config: AccountConfig,
    ) -> Result<Self, OwnershipError> {
        Ok(Self { address, ownable: Ownable::new(owner)?, config })
    }

    /// The address of the account.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The current owner.
    pub const fn owner(&self) -> Address {
        self.ownable.owner()
    }

    /// The configuration of the account.
    pub const fn config(&self) -> &AccountConfig {
        &self.config
    }

    /// Validates a transaction on behalf of the bootloader.
    ///
    /// Returns the success magic if the owner signed the transaction and the all-zero sentinel
    /// otherwise. The nonce is consumed either way. The suggested signed hash is ignored: the
    /// account always hashes the transaction itself.
    pub fn validate_transaction<H: Host>(
        &self,
        host: &mut H,
        caller: Address,
        tx_hash: B256,
        _suggested_signed_hash: B256,
        tx: &Transaction,
    ) -> Result<FixedBytes<4>, AccountError> {
        self.require_bootloader(caller)?;
        trace!(account = %self.address, %tx_hash, "validateTransaction");
        in_frame(host, |host| self.validate(host, tx)).map(|outcome| outcome.magic())
    }

    /// Executes a validated transaction. Callable by the bootloader and the owner.
    pub fn execute_transaction<H: Host>(
        &self,
        host: &mut H,
        caller: Address,
        tx_hash: B256,
        _suggested_signed_hash: B256,
        tx: &Transaction,
    ) -> Result<CallOutcome, AccountError> {
        self.require_bootloader_or_owner(caller)?;
        trace!(account = %self.address, %tx_hash, "executeTransaction");
        in_frame(host, |host| self.execute(host, tx))
    }

    /// Validates and executes a transaction in one call, for relayers outside the bootloader.
    ///
    /// Any caller is admitted. Whether a transaction that is not signed by the owner still
    /// executes is decided by [`RelayPolicy`].
    pub fn execute_transaction_from_outside<H: Host>(
        &self,
        host: &mut H,
        caller: Address,
        tx: &Transaction,
    ) -> Result<CallOutcome, AccountError> {
        trace!(account = %self.address, %caller, "executeTransactionFromOutside");
        in_frame(host, |host| {
            let outcome = self.validate(host, tx)?;
            let gated = self.config.relay_policy == RelayPolicy::RequireValidSignature;
            if gated && !outcome.is_authorized() {
                return Err(AccountError::Unauthorized);
            }
            self.execute(host, tx)
        })
    }

    /// Pays the maximum fee of the transaction to the bootloader.
    pub fn pay_for_transaction<H: Host>(
        &self,
        host: &mut H,
        caller: Address,
        tx_hash: B256,
        _suggested_signed_hash: B256,
        tx: &Transaction,
    ) -> Result<(), AccountError> {
        self.require_bootloader(caller)?;
        trace!(account = %self.address, %tx_hash, "payForTransaction");
        in_frame(host, |host| {
            let fee = tx.required_fee().ok_or(AccountError::FeeOverflow)?;
            host.transfer(self.address, self.config.bootloader, fee)
                .map_err(AccountError::FailedToPay)?;
            debug!(account = %self.address, %fee, "Paid bootloader");
            Ok(())
        })
    }

    /// Prepares a paymaster-sponsored transaction. Paymaster flows are not supported, so this
    /// only checks the caller.
    pub fn prepare_for_paymaster<H: Host>(
        &self,
        _host: &mut H,
        caller: Address,
        tx_hash: B256,
        _possible_signed_hash: B256,
        _tx: &Transaction,
    ) -> Result<(), AccountError> {
        self.require_bootloader(caller)?;
        trace!(account = %self.address, %tx_hash, "prepareForPaymaster");
        Ok(())
    }

    /// Transfers ownership of the account. Only the current owner may call this.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), AccountError> {
        Ok(self.ownable.transfer_ownership(caller, new_owner)?)
    }
}

/// Runs `f` inside a host checkpoint, reverting it if `f` fails.
pub(crate) fn in_frame<H, T, F>(host: &mut H, f: F) -> Result<T, AccountError>
where
    H: Host,
    F: FnOnce(&mut H) -> Result<T, AccountError>,
{
    let checkpoint = host.checkpoint();
    match f(host) {
        Ok(value) => {
            host.checkpoint_commit(checkpoint);
            Ok(value)
        }
        Err(error) => {
            debug!(%error, "Reverting account call");
            host.checkpoint_revert(checkpoint);
            Err(error)
        }
    }
}
