//! Canonical transaction hashing.
//!
//! The canonical hash depends on the transaction type: EIP-712 transactions are hashed as typed
//! data under the zkSync domain, while legacy, EIP-2930 and EIP-1559 transactions use the RLP
//! signing hash of the equivalent Ethereum transaction. The account signs over the EIP-191
//! "signed message" hash of the canonical hash.

use alloy_consensus::{SignableTransaction, TxEip1559, TxEip2930, TxLegacy};
use alloy_eips::eip2930::AccessList;
use alloy_primitives::{eip191_hash_message, TxKind, B256, U256};
use alloy_sol_types::{Eip712Domain, SolStruct};

use crate::{
    constants::{
        eip712::{DOMAIN_NAME, DOMAIN_VERSION},
        tx_type,
    },
    interface::eip712,
    transaction::address_to_word,
    Transaction,
};

/// Errors raised while computing the canonical hash of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    /// The transaction type has no canonical hash.
    #[error("unsupported transaction type {0}")]
    UnsupportedTxType(U256),
    /// A field does not fit the width the transaction type encodes it with.
    #[error("field `{0}` does not fit the transaction type")]
    FieldOverflow(&'static str),
}

/// Returns the EIP-712 domain of zkSync transactions on the given chain.
pub fn zksync_domain(chain_id: u64) -> Eip712Domain {
    Eip712Domain::new(
        Some(DOMAIN_NAME.into()),
        Some(DOMAIN_VERSION.into()),
        Some(U256::from(chain_id)),
        None,
        None,
    )
}

/// Transforms a canonical hash into the hash the owner signs: the EIP-191 personal message
/// hash of the 32 hash bytes.
pub fn to_signed_message_hash(hash: B256) -> B256 {
    eip191_hash_message(hash)
}

impl Transaction {
    /// Computes the canonical hash of the transaction on the given chain.
    ///
    /// The signature itself is never part of the hash.
    pub fn signature_hash(&self, chain_id: u64) -> Result<B256, HashError> {
        match self.tx_type {
            tx_type::EIP_712 => Ok(self.to_eip712().eip712_signing_hash(&zksync_domain(chain_id))),
            tx_type::LEGACY => {
                let tx = TxLegacy {
                    chain_id: (!self.reserved[0].is_zero()).then_some(chain_id),
                    nonce: narrow(self.nonce, "nonce")?,
                    gas_price: narrow(self.max_fee_per_gas, "maxFeePerGas")?,
                    gas_limit: narrow(self.gas_limit, "gasLimit")?,
                    to: self.tx_kind(),
                    value: self.value,
                    input: self.data.clone(),
                };
                Ok(tx.signature_hash())
            }
            tx_type::EIP_2930 => {
                let tx = TxEip2930 {
                    chain_id,
                    nonce: narrow(self.nonce, "nonce")?,
                    gas_price: narrow(self.max_fee_per_gas, "maxFeePerGas")?,
                    gas_limit: narrow(self.gas_limit, "gasLimit")?,
                    to: self.tx_kind(),
                    value: self.value,
                    access_list: AccessList::default(),
                    input: self.data.clone(),
                };
                Ok(tx.signature_hash())
            }
            tx_type::EIP_1559 => {
                let tx = TxEip1559 {
                    chain_id,
                    nonce: narrow(self.nonce, "nonce")?,
                    gas_limit: narrow(self.gas_limit, "gasLimit")?,
                    max_fee_per_gas: narrow(self.max_fee_per_gas, "maxFeePerGas")?,
                    max_priority_fee_per_gas: narrow(
                        self.max_priority_fee_per_gas,
                        "maxPriorityFeePerGas",
                    )?,
                    to: self.tx_kind(),
                    value: self.value,
                    access_list: AccessList::default(),
                    input: self.data.clone(),
                };
                Ok(tx.signature_hash())
            }
            other => Err(HashError::UnsupportedTxType(U256::from(other))),
        }
    }

    /// Computes the hash the owner is expected to have signed.
    pub fn signed_message_hash(&self, chain_id: u64) -> Result<B256, HashError> {
        self.signature_hash(chain_id).map(to_signed_message_hash)
    }

    /// The typed-data view of the transaction.
    pub fn to_eip712(&self) -> eip712::Transaction {
        eip712::Transaction {
            txType: U256::from(self.tx_type),
            from: address_to_word(self.from),
            to: address_to_word(self.to),
            gasLimit: self.gas_limit,
            gasPerPubdataByteLimit: self.gas_per_pubdata_byte_limit,
            maxFeePerGas: self.max_fee_per_gas,
            maxPriorityFeePerGas: self.max_priority_fee_per_gas,
            paymaster: address_to_word(self.paymaster),
            nonce: self.nonce,
            value: self.value,
            data: self.data.clone(),
            factoryDeps: self.factory_deps.clone(),
            paymasterInput: self.paymaster_input.clone(),
        }
    }

    // `reserved[1]` marks a deployment, which is encoded with an empty `to`.
    fn tx_kind(&self) -> TxKind {
        if self.reserved[1].is_zero() {
            TxKind::Call(self.to)
        } else {
            TxKind::Create
        }
    }
}

fn narrow<T: TryFrom<U256>>(value: U256, field: &'static str) -> Result<T, HashError> {
    T::try_from(value).map_err(|_| HashError::FieldOverflow(field))
}
