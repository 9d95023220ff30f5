use alloy_primitives::{Address, Bytes, U256};
use k256::ecdsa::SigningKey;

use super::ACCOUNT_ADDRESS;
use crate::{
    constants::{tx_type, ZKSYNC_ERA_CHAIN_ID},
    sign_hash, Transaction,
};

/// Builds transactions sent from [`ACCOUNT_ADDRESS`].
///
/// Defaults to an EIP-712 transaction with nonce zero, a modest gas limit and fee, and no value.
#[derive(Debug, Clone)]
pub struct TxBuilder {
    tx: Transaction,
    chain_id: u64,
}

impl Default for TxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TxBuilder {
    /// Creates a builder with the default transaction.
    pub fn new() -> Self {
        Self {
            tx: Transaction {
                tx_type: tx_type::EIP_712,
                from: ACCOUNT_ADDRESS,
                gas_limit: U256::from(100_000),
                gas_per_pubdata_byte_limit: U256::from(50_000),
                max_fee_per_gas: U256::from(250_000_000),
                ..Default::default()
            },
            chain_id: ZKSYNC_ERA_CHAIN_ID,
        }
    }

    /// Sets the transaction type.
    pub fn tx_type(mut self, tx_type: u8) -> Self {
        self.tx.tx_type = tx_type;
        self
    }

    /// Sets the nonce.
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.tx.nonce = U256::from(nonce);
        self
    }

    /// Sets the destination.
    pub fn to(mut self, to: Address) -> Self {
        self.tx.to = to;
        self
    }

    /// Sets the value.
    pub fn value(mut self, value: U256) -> Self {
        self.tx.value = value;
        self
    }

    /// Sets the calldata.
    pub fn data(mut self, data: Bytes) -> Self {
        self.tx.data = data;
        self
    }

    /// Sets the gas limit.
    pub fn gas_limit(mut self, gas_limit: U256) -> Self {
        self.tx.gas_limit = gas_limit;
        self
    }

    /// Sets the maximum fee per gas.
    pub fn max_fee_per_gas(mut self, max_fee_per_gas: U256) -> Self {
        self.tx.max_fee_per_gas = max_fee_per_gas;
        self
    }

    /// Sets the reserved fields.
    pub fn reserved(mut self, reserved: [U256; 4]) -> Self {
        self.tx.reserved = reserved;
        self
    }

    /// Sets the paymaster.
    pub fn paymaster(mut self, paymaster: Address) -> Self {
        self.tx.paymaster = paymaster;
        self
    }

    /// Sets the chain id the transaction is signed for.
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Returns the transaction without a signature.
    pub fn build(self) -> Transaction {
        self.tx
    }

    /// Returns the transaction signed by `key`.
    ///
    /// # Panics
    ///
    /// Panics if the transaction cannot be hashed.
    pub fn sign(self, key: &SigningKey) -> Transaction {
        let mut tx = self.tx;
        let hash = tx.signed_message_hash(self.chain_id).expect("transaction is hashable");
        tx.signature = sign_hash(key, &hash).expect("signing succeeds");
        tx
    }
}
