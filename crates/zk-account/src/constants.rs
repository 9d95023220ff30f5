//! Constants of the zkSync account-abstraction protocol.
//!
//! The addresses here are only the defaults of [`crate::AccountConfig`]; the account itself reads
//! them from its configuration so that it can be exercised against synthetic addresses.

use alloy_primitives::{address, fixed_bytes, Address, FixedBytes};

/// The formal address of the bootloader. Privileged entry points of the account accept calls
/// only from this address (or the owner, where permitted).
pub const BOOTLOADER_FORMAL_ADDRESS: Address =
    address!("0x0000000000000000000000000000000000008001");

/// The address of the nonce holder system contract, which tracks the minimum nonce of every
/// account.
pub const NONCE_HOLDER_SYSTEM_CONTRACT: Address =
    address!("0x0000000000000000000000000000000000008003");

/// The address of the contract deployer system contract. Calls to it must go through the
/// system-call path.
pub const CONTRACT_DEPLOYER_SYSTEM_CONTRACT: Address =
    address!("0x0000000000000000000000000000000000008006");

/// The value `validateTransaction` returns when the transaction is authorized. It equals the
/// selector of `IAccount.validateTransaction`.
pub const ACCOUNT_VALIDATION_SUCCESS_MAGIC: FixedBytes<4> = fixed_bytes!("0x202bcce7");

/// The value `validateTransaction` returns when the signature does not belong to the owner.
pub const ACCOUNT_VALIDATION_FAILURE_MAGIC: FixedBytes<4> = FixedBytes::ZERO;

/// The chain id of zkSync Era mainnet.
pub const ZKSYNC_ERA_CHAIN_ID: u64 = 324;

/// Transaction type identifiers understood by the canonical hasher.
pub mod tx_type {
    /// Legacy transaction, optionally EIP-155 protected.
    pub const LEGACY: u8 = 0x00;
    /// EIP-2930 access-list transaction.
    pub const EIP_2930: u8 = 0x01;
    /// EIP-1559 dynamic-fee transaction.
    pub const EIP_1559: u8 = 0x02;
    /// zkSync EIP-712 transaction.
    pub const EIP_712: u8 = 0x71;
}

/// The EIP-712 domain of zkSync transactions.
pub mod eip712 {
    /// The domain name.
    pub const DOMAIN_NAME: &str = "zkSync";
    /// The domain version.
    pub const DOMAIN_VERSION: &str = "2";
}
