use alloy_primitives::hex::FromHexError;
use zk_account::{ConfigError, HashError, OwnershipError, SignatureError};

/// Error types for the simulator commands
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Failed to read or write a file
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Malformed JSON input
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid hex string
    #[error("Invalid hex string: {0}")]
    InvalidHex(#[from] FromHexError),

    /// Invalid account configuration
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),

    /// The transaction cannot be hashed
    #[error("Hash error: {0}")]
    Hash(#[from] HashError),

    /// Signing failed
    #[error("Signature error: {0}")]
    Signature(#[from] SignatureError),

    /// The account cannot be created with the given owner
    #[error("Ownership error: {0}")]
    Ownership(#[from] OwnershipError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for the zk-account-sim commands
pub type Result<T> = std::result::Result<T, SimError>;
