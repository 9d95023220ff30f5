//! The environment an account runs in.
//!
//! The account never touches state directly. Balances, the nonce holder, value transfers and
//! outgoing calls are all reached through [`Host`], and every entry point brackets its work with
//! a journal checkpoint so that an abort rolls back everything the call did.

mod memory;

pub use memory::*;

use alloy_primitives::{Address, Bytes, U256};
use auto_impl::auto_impl;
use serde::{Deserialize, Serialize};

use crate::HostError;

/// The path an outgoing call is dispatched through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CallPath {
    /// A privileged system call, used for calls to the system deployer.
    System,
    /// A regular call.
    Generic,
}

/// The result of an outgoing call that did not abort the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallOutcome {
    /// Whether the callee returned normally.
    pub success: bool,
    /// Return data, or revert data if the callee reverted.
    pub output: Bytes,
    /// Gas consumed by the callee.
    pub gas_used: u64,
}

impl CallOutcome {
    /// A successful call.
    pub fn returned(output: Bytes, gas_used: u64) -> Self {
        Self { success: true, output, gas_used }
    }

    /// A reverted call.
    pub fn reverted(output: Bytes, gas_used: u64) -> Self {
        Self { success: false, output, gas_used }
    }
}

/// A handle to a journal checkpoint. Checkpoints nest and must be committed or reverted in LIFO
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct JournalCheckpoint(pub usize);

/// The collaborators an account relies on.
#[auto_impl(&mut, Box)]
pub trait Host {
    /// Returns the native balance of `address`.
    fn balance(&self, address: Address) -> U256;

    /// Returns the minimum nonce the nonce holder tracks for `address`.
    fn min_nonce(&self, address: Address) -> U256;

    /// Increments the minimum nonce of `address` if it equals `expected`, failing with
    /// [`HostError::NonceMismatch`] otherwise.
    fn increment_min_nonce_if_equals(
        &mut self,
        address: Address,
        expected: U256,
    ) -> Result<(), HostError>;

    /// Moves `amount` of native currency from `from` to `to`.
    fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<(), HostError>;

    /// Performs a regular call from `caller` to `target`, forwarding `gas`.
    ///
    /// A revert of the callee is reported through [`CallOutcome::success`]; an `Err` aborts the
    /// caller.
    fn call(
        &mut self,
        caller: Address,
        target: Address,
        value: u128,
        data: &Bytes,
        gas: u64,
    ) -> Result<CallOutcome, HostError>;

    /// Performs a privileged system call from `caller` to `target`, forwarding `gas`.
    fn system_call(
        &mut self,
        caller: Address,
        target: Address,
        value: u128,
        data: &Bytes,
        gas: u64,
    ) -> Result<CallOutcome, HostError>;

    /// Returns the gas left to the current call.
    fn gas_left(&self) -> u64;

    /// Opens a checkpoint.
    fn checkpoint(&mut self) -> JournalCheckpoint;

    /// Keeps the changes made since `checkpoint`.
    fn checkpoint_commit(&mut self, checkpoint: JournalCheckpoint);

    /// Discards the changes made since `checkpoint`.
    fn checkpoint_revert(&mut self, checkpoint: JournalCheckpoint);
}
