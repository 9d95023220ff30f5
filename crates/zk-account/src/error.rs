//! Error types of the account.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolError;

use crate::{
    interface::{IAccountErrors, IHostErrors},
    CallPath, HashError, OwnershipError, SignatureError,
};

/// Errors raised by the host's collaborators (nonce holder, balances, gas metering).
///
/// These are propagated by the account unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The transaction nonce is not the account's current minimum nonce.
    #[error("nonce mismatch: expected {expected}, provided {provided}")]
    NonceMismatch {
        /// The account's current minimum nonce
        expected: U256,
        /// The nonce carried by the transaction
        provided: U256,
    },
    /// A transfer exceeds the sender's balance.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// The amount being moved
        required: U256,
        /// The sender's balance
        available: U256,
    },
    /// The minimum nonce is at its maximum and cannot advance.
    #[error("nonce {0} cannot be incremented")]
    NonceOverflow(U256),
    /// A transfer would overflow the recipient's balance.
    #[error("balance of {0} overflows")]
    BalanceOverflow(Address),
    /// The call ran out of gas.
    #[error("out of gas")]
    OutOfGas,
}

/// Errors that abort an account entry point. Every state change of the aborted call is rolled
/// back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    /// The caller is not the bootloader.
    #[error("caller {0} is not the bootloader")]
    NotFromBootloader(Address),
    /// The caller is neither the bootloader nor the owner.
    #[error("caller {0} is neither the bootloader nor the owner")]
    NotFromBootloaderOrOwner(Address),
    /// The account cannot cover the value and the maximum fee of the transaction.
    #[error("not enough balance: required {required}, available {available}")]
    NotEnoughBalance {
        /// The total required balance
        required: U256,
        /// The account balance
        available: U256,
    },
    /// The fee transfer to the bootloader failed.
    #[error("failed to pay the bootloader: {0}")]
    FailedToPay(HostError),
    /// The call performed on behalf of the owner failed.
    #[error("execution of call to {target} via {path:?} path failed")]
    ExecutionFailed {
        /// The callee
        target: Address,
        /// The path the call went through
        path: CallPath,
        /// The revert data of the callee
        output: Bytes,
    },
    /// A collaborator failure, propagated verbatim.
    #[error(transparent)]
    Host(#[from] HostError),
    /// The transaction value does not fit 128 bits.
    #[error("transaction value {0} overflows u128")]
    ValueOverflow(U256),
    /// The required balance of the transaction overflows 256 bits.
    #[error("fee computation overflows")]
    FeeOverflow,
    /// The signature is malformed.
    #[error(transparent)]
    InvalidSignature(#[from] SignatureError),
    /// The transaction cannot be hashed.
    #[error(transparent)]
    Hash(#[from] HashError),
    /// The relay path refused a transaction whose signature did not validate.
    #[error("transaction is not signed by the owner")]
    Unauthorized,
    /// An ownership operation failed.
    #[error(transparent)]
    Ownership(#[from] OwnershipError),
    /// The calldata does not decode to an account method.
    #[error("invalid calldata")]
    InvalidCalldata,
}

impl AccountError {
    /// Encodes the error as the revert data of the account call.
    ///
    /// Collaborator errors use the host's Solidity errors, and a failed system call propagates the
    /// callee's revert data unchanged. Out-of-gas and undecodable calldata revert without data.
    pub fn revert_data(&self) -> Bytes {
        match self {
            Self::NotFromBootloader(_) => IAccountErrors::NotFromBootloader {}.abi_encode().into(),
            Self::NotFromBootloaderOrOwner(_) => {
                IAccountErrors::NotFromBootloaderOrOwner {}.abi_encode().into()
            }
            Self::NotEnoughBalance { .. } => {
                IAccountErrors::NotEnoughBalance {}.abi_encode().into()
            }
            Self::FailedToPay(_) => IAccountErrors::FailedToPay {}.abi_encode().into(),
            Self::ExecutionFailed { path: CallPath::System, output, .. } => output.clone(),
            Self::ExecutionFailed { path: CallPath::Generic, .. } => {
                IAccountErrors::ExecutionFailed {}.abi_encode().into()
            }
            Self::Host(error) => encode_host_error(error),
            Self::ValueOverflow(value) => {
                IAccountErrors::ValueOverflow { value: *value }.abi_encode().into()
            }
            Self::FeeOverflow => IAccountErrors::FeeOverflow {}.abi_encode().into(),
            Self::InvalidSignature(error) => encode_signature_error(error),
            Self::Hash(HashError::UnsupportedTxType(tx_type)) => {
                IAccountErrors::UnsupportedTxType { txType: *tx_type }.abi_encode().into()
            }
            Self::Hash(HashError::FieldOverflow(_)) => {
                IAccountErrors::FieldOverflow {}.abi_encode().into()
            }
            Self::Unauthorized => IAccountErrors::Unauthorized {}.abi_encode().into(),
            Self::Ownership(OwnershipError::UnauthorizedAccount(account)) => {
                IAccountErrors::OwnableUnauthorizedAccount { account: *account }.abi_encode().into()
            }
            Self::Ownership(OwnershipError::InvalidOwner(owner)) => {
                IAccountErrors::OwnableInvalidOwner { owner: *owner }.abi_encode().into()
            }
            Self::InvalidCalldata => Bytes::new(),
        }
    }

    /// Whether the error comes from an admission check.
    pub fn is_admission_error(&self) -> bool {
        matches!(self, Self::NotFromBootloader(_) | Self::NotFromBootloaderOrOwner(_))
    }
}

fn encode_host_error(error: &HostError) -> Bytes {
    match error {
        HostError::NonceMismatch { expected, provided } => {
            IHostErrors::NonceMismatch { expected: *expected, provided: *provided }
                .abi_encode()
                .into()
        }
        HostError::InsufficientFunds { required, available } => {
            IHostErrors::InsufficientFunds { required: *required, available: *available }
                .abi_encode()
                .into()
        }
        HostError::NonceOverflow(nonce) => {
            IHostErrors::NonceOverflow { nonce: *nonce }.abi_encode().into()
        }
        HostError::BalanceOverflow(account) => {
            IHostErrors::BalanceOverflow { account: *account }.abi_encode().into()
        }
        HostError::OutOfGas => Bytes::new(),
    }
}

fn encode_signature_error(error: &SignatureError) -> Bytes {
    match error {
        SignatureError::InvalidLength(length) => {
            IAccountErrors::ECDSAInvalidSignatureLength { length: U256::from(*length) }
                .abi_encode()
                .into()
        }
        SignatureError::HighS(s) => {
            IAccountErrors::ECDSAInvalidSignatureS { s: *s }.abi_encode().into()
        }
        SignatureError::InvalidRecoveryByte(_) |
        SignatureError::Unrecoverable |
        SignatureError::Signing(_) => IAccountErrors::ECDSAInvalidSignature {}.abi_encode().into(),
    }
}
