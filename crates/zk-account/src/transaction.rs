//! The transaction an account validates and executes.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::{interface, HashError};

/// A transaction in the zkSync bootloader layout.
///
/// Address-typed fields are kept as [`Address`] here; the ABI layout stores them as `uint256`
/// and the conversions in this module take care of the widening and narrowing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transaction {
    /// The transaction type, see [`crate::constants::tx_type`].
    pub tx_type: u8,
    /// The account the transaction is sent from.
    pub from: Address,
    /// The destination of the call.
    pub to: Address,
    /// The maximum amount of gas the transaction may consume.
    pub gas_limit: U256,
    /// The maximum gas the user agrees to pay per byte of pubdata.
    pub gas_per_pubdata_byte_limit: U256,
    /// The maximum fee per gas the user agrees to pay.
    pub max_fee_per_gas: U256,
    /// The maximum priority fee per gas the user agrees to pay.
    pub max_priority_fee_per_gas: U256,
    /// The paymaster covering the fee, or the zero address.
    pub paymaster: Address,
    /// The nonce of the transaction. Must equal the account's minimum nonce.
    pub nonce: U256,
    /// The amount of native currency sent with the call.
    pub value: U256,
    /// Reserved fields. For legacy transactions `reserved[0]` marks EIP-155 protection and
    /// `reserved[1]` marks a contract creation.
    pub reserved: [U256; 4],
    /// The calldata of the call.
    pub data: Bytes,
    /// The signature over the signed-message hash of the transaction.
    pub signature: Bytes,
    /// Hashes of the bytecodes the transaction depends on.
    pub factory_deps: Vec<B256>,
    /// The input passed to the paymaster.
    pub paymaster_input: Bytes,
    /// Reserved dynamic field.
    pub reserved_dynamic: Bytes,
}

impl Transaction {
    /// Returns the fee the account must hand to the bootloader: `gas_limit * max_fee_per_gas`.
    ///
    /// Returns `None` on overflow.
    pub fn required_fee(&self) -> Option<U256> {
        self.gas_limit.checked_mul(self.max_fee_per_gas)
    }

    /// Returns the upper bound of the fee the account itself is charged. When a paymaster is
    /// set the paymaster covers the fee and this is zero.
    pub fn max_fee(&self) -> Option<U256> {
        if self.paymaster.is_zero() {
            self.required_fee()
        } else {
            Some(U256::ZERO)
        }
    }

    /// Returns the balance the account needs to cover both the value and the worst-case fee.
    ///
    /// Returns `None` on overflow.
    pub fn total_required_balance(&self) -> Option<U256> {
        self.max_fee()?.checked_add(self.value)
    }

    /// Whether the transaction is sponsored by a paymaster.
    pub fn has_paymaster(&self) -> bool {
        !self.paymaster.is_zero()
    }

    /// Converts into the ABI struct passed in calldata.
    pub fn to_abi(&self) -> interface::Transaction {
        interface::Transaction {
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
            reserved: self.reserved,
            data: self.data.clone(),
            signature: self.signature.clone(),
            factoryDeps: self.factory_deps.clone(),
            paymasterInput: self.paymaster_input.clone(),
            reservedDynamic: self.reserved_dynamic.clone(),
        }
    }
}

impl TryFrom<interface::Transaction> for Transaction {
    type Error = HashError;

    fn try_from(tx: interface::Transaction) -> Result<Self, Self::Error> {
        let tx_type =
            u8::try_from(tx.txType).map_err(|_| HashError::UnsupportedTxType(tx.txType))?;
        Ok(Self {
            tx_type,
            from: word_to_address(tx.from),
            to: word_to_address(tx.to),
            gas_limit: tx.gasLimit,
            gas_per_pubdata_byte_limit: tx.gasPerPubdataByteLimit,
            max_fee_per_gas: tx.maxFeePerGas,
            max_priority_fee_per_gas: tx.maxPriorityFeePerGas,
            paymaster: word_to_address(tx.paymaster),
            nonce: tx.nonce,
            value: tx.value,
            reserved: tx.reserved,
            data: tx.data,
            signature: tx.signature,
            factory_deps: tx.factoryDeps,
            paymaster_input: tx.paymasterInput,
            reserved_dynamic: tx.reservedDynamic,
        })
    }
}

/// Widens an address into the `uint256` representation used by the ABI layout.
pub fn address_to_word(address: Address) -> U256 {
    U256::from_be_slice(address.as_slice())
}

/// Narrows a `uint256` into an address, keeping the low 160 bits like `address(uint160(x))`.
pub fn word_to_address(word: U256) -> Address {
    Address::from_word(B256::from(word.to_be_bytes::<32>()))
}
