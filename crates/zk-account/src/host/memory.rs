use alloy_primitives::{map::AddressHashMap, Address, Bytes, U256};
use revm::{
    database::{AccountState, CacheDB, EmptyDB},
    DatabaseRef,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{CallOutcome, CallPath, Host, HostError, JournalCheckpoint};

/// The gas budget of a fresh [`InMemoryHost`].
pub const DEFAULT_GAS_LIMIT: u64 = 30_000_000;

/// The gas a callee consumes when it returns or reverts.
pub const DEFAULT_CALL_GAS: u64 = 21_000;

/// How a scripted callee reacts to a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalleeBehavior {
    /// Return the given data.
    Return(Bytes),
    /// Revert with the given data.
    Revert(Bytes),
    /// Consume all forwarded gas.
    OutOfGas,
}

impl Default for CalleeBehavior {
    fn default() -> Self {
        Self::Return(Bytes::new())
    }
}

/// A call observed by an [`InMemoryHost`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    /// The path the call went through.
    pub path: CallPath,
    /// The caller.
    pub caller: Address,
    /// The callee.
    pub target: Address,
    /// The value sent with the call.
    pub value: u128,
    /// The calldata.
    pub data: Bytes,
    /// The gas forwarded to the callee.
    pub gas: u64,
}

/// A host backed by an in-memory database.
///
/// Balances and minimum nonces live in a [`CacheDB`]. Callees are scripted with
/// [`CalleeBehavior`] and value only moves when a callee returns. The call log is a trace of
/// every attempted call and is not rolled back by checkpoints.
#[derive(Debug, Clone, derive_more::Deref, derive_more::DerefMut)]
pub struct InMemoryHost {
    #[deref]
    #[deref_mut]
    db: CacheDB<EmptyDB>,
    callees: AddressHashMap<CalleeBehavior>,
    call_log: Vec<CallRecord>,
    snapshots: Vec<CacheDB<EmptyDB>>,
    gas_limit: u64,
    gas_used: u64,
    call_gas: u64,
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self {
            db: CacheDB::default(),
            callees: AddressHashMap::default(),
            call_log: Vec::new(),
            snapshots: Vec::new(),
            gas_limit: DEFAULT_GAS_LIMIT,
            gas_used: 0,
            call_gas: DEFAULT_CALL_GAS,
        }
    }
}

impl InMemoryHost {
    /// Creates a host with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the balance for an account.
    pub fn set_account_balance(&mut self, address: Address, balance: U256) {
        let Ok(account) = self.db.load_account(address);
        account.info.balance = balance;
        account.account_state = AccountState::None;
    }

    /// Sets the balance for an account.
    pub fn account_balance(mut self, address: Address, balance: U256) -> Self {
        self.set_account_balance(address, balance);
        self
    }

    /// Sets the minimum nonce for an account.
    pub fn set_account_min_nonce(&mut self, address: Address, nonce: u64) {
        let Ok(account) = self.db.load_account(address);
        account.info.nonce = nonce;
        account.account_state = AccountState::None;
    }

    /// Sets the minimum nonce for an account.
    pub fn account_min_nonce(mut self, address: Address, nonce: u64) -> Self {
        self.set_account_min_nonce(address, nonce);
        self
    }

    /// Scripts the behavior of a callee. Unscripted callees return empty data.
    pub fn set_callee(&mut self, address: Address, behavior: CalleeBehavior) {
        self.callees.insert(address, behavior);
    }

    /// Scripts the behavior of a callee.
    pub fn callee(mut self, address: Address, behavior: CalleeBehavior) -> Self {
        self.set_callee(address, behavior);
        self
    }

    /// Sets the total gas budget.
    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Sets the gas a returning or reverting callee consumes.
    pub fn call_gas(mut self, call_gas: u64) -> Self {
        self.call_gas = call_gas;
        self
    }

    /// Returns the calls attempted so far.
    pub fn call_log(&self) -> &[CallRecord] {
        &self.call_log
    }

    /// Returns the gas consumed so far.
    pub fn gas_used(&self) -> u64 {
        self.gas_used
    }

    /// Returns the number of open checkpoints.
    pub fn checkpoint_depth(&self) -> usize {
        self.snapshots.len()
    }

    fn nonce_of(&self, address: Address) -> u64 {
        let Ok(info) = self.db.basic_ref(address);
        info.map_or(0, |info| info.nonce)
    }

    fn invoke(
        &mut self,
        path: CallPath,
        caller: Address,
        target: Address,
        value: u128,
        data: &Bytes,
        gas: u64,
    ) -> Result<CallOutcome, HostError> {
        let gas = gas.min(self.gas_left());
        self.call_log.push(CallRecord { path, caller, target, value, data: data.clone(), gas });
        trace!(?path, %caller, %target, value, gas, "Invoking callee");

        let behavior = self.callees.get(&target).cloned().unwrap_or_default();
        if matches!(behavior, CalleeBehavior::OutOfGas) || gas < self.call_gas {
            self.gas_used += gas;
            return Err(HostError::OutOfGas);
        }
        self.gas_used += self.call_gas;

        match behavior {
            CalleeBehavior::Return(output) => {
                // A value transfer that cannot be applied fails the call, not the caller.
                if value > 0 && self.transfer(caller, target, U256::from(value)).is_err() {
                    return Ok(CallOutcome::reverted(Bytes::new(), self.call_gas));
                }
                Ok(CallOutcome::returned(output, self.call_gas))
            }
            CalleeBehavior::Revert(output) => Ok(CallOutcome::reverted(output, self.call_gas)),
            CalleeBehavior::OutOfGas => Err(HostError::OutOfGas),
        }
    }
}

impl Host for InMemoryHost {
    fn balance(&self, address: Address) -> U256 {
        let Ok(info) = self.db.basic_ref(address);
        info.map_or(U256::ZERO, |info| info.balance)
    }

    fn min_nonce(&self, address: Address) -> U256 {
        U256::from(self.nonce_of(address))
    }

    fn increment_min_nonce_if_equals(
        &mut self,
        address: Address,
        expected: U256,
    ) -> Result<(), HostError> {
        let current = self.nonce_of(address);
        if U256::from(current) != expected {
            return Err(HostError::NonceMismatch {
                expected: U256::from(current),
                provided: expected,
            });
        }
        let next = current.checked_add(1).ok_or(HostError::NonceOverflow(expected))?;
        self.set_account_min_nonce(address, next);
        Ok(())
    }

    fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<(), HostError> {
        let available = self.balance(from);
        if available < amount {
            return Err(HostError::InsufficientFunds { required: amount, available });
        }
        if from == to {
            return Ok(());
        }
        let to_balance =
            self.balance(to).checked_add(amount).ok_or(HostError::BalanceOverflow(to))?;
        self.set_account_balance(from, available - amount);
        self.set_account_balance(to, to_balance);
        Ok(())
    }

    fn call(
        &mut self,
        caller: Address,
        target: Address,
        value: u128,
        data: &Bytes,
        gas: u64,
    ) -> Result<CallOutcome, HostError> {
        self.invoke(CallPath::Generic, caller, target, value, data, gas)
    }

    fn system_call(
        &mut self,
        caller: Address,
        target: Address,
        value: u128,
        data: &Bytes,
        gas: u64,
    ) -> Result<CallOutcome, HostError> {
        self.invoke(CallPath::System, caller, target, value, data, gas)
    }

    fn gas_left(&self) -> u64 {
        self.gas_limit.saturating_sub(self.gas_used)
    }

    fn checkpoint(&mut self) -> JournalCheckpoint {
        self.snapshots.push(self.db.clone());
        JournalCheckpoint(self.snapshots.len() - 1)
    }

    fn checkpoint_commit(&mut self, checkpoint: JournalCheckpoint) {
        self.snapshots.truncate(checkpoint.0);
    }

    fn checkpoint_revert(&mut self, checkpoint: JournalCheckpoint) {
        self.snapshots.truncate(checkpoint.0 + 1);
        if let Some(db) = self.snapshots.pop() {
            self.db = db;
        }
    }
}
