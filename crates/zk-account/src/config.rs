//! Account configuration.
//!
//! The privileged identities of the host chain are injected here instead of being compiled into
//! the account, so the same logic can run against zkSync Era's addresses or synthetic ones.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BOOTLOADER_FORMAL_ADDRESS, CONTRACT_DEPLOYER_SYSTEM_CONTRACT, ZKSYNC_ERA_CHAIN_ID,
};

/// Whether the relay path (`executeTransactionFromOutside`) executes a transaction whose
/// signature did not validate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelayPolicy {
    /// Abort the relay call when validation returns the failure sentinel.
    #[default]
    RequireValidSignature,
    /// Execute regardless of the validation sentinel.
    Permissive,
}

/// Configuration of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountConfig {
    /// The address of the bootloader.
    pub bootloader: Address,
    /// The address of the system deployer. Calls to it use the system-call path.
    pub system_deployer: Address,
    /// The chain id transactions are hashed for.
    pub chain_id: u64,
    /// How the relay path treats a failed signature check.
    pub relay_policy: RelayPolicy,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            bootloader: BOOTLOADER_FORMAL_ADDRESS,
            system_deployer: CONTRACT_DEPLOYER_SYSTEM_CONTRACT,
            chain_id: ZKSYNC_ERA_CHAIN_ID,
            relay_policy: RelayPolicy::default(),
        }
    }
}

/// Errors raised while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration is not valid JSON for [`AccountConfig`].
    #[error("invalid account config: {0}")]
    Json(#[from] serde_json::Error),
    /// A privileged address is the zero address.
    #[error("`{0}` must not be the zero address")]
    ZeroAddress(&'static str),
    /// The bootloader and the system deployer share an address.
    #[error("bootloader and system deployer must differ, both are {0}")]
    SharedAddress(Address),
}

impl AccountConfig {
    /// Parses and validates a JSON configuration. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the privileged addresses are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bootloader.is_zero() {
            return Err(ConfigError::ZeroAddress("bootloader"));
        }
        if self.system_deployer.is_zero() {
            return Err(ConfigError::ZeroAddress("systemDeployer"));
        }
        if self.bootloader == self.system_deployer {
            return Err(ConfigError::SharedAddress(self.bootloader));
        }
        Ok(())
    }

    /// Sets the bootloader address.
    pub fn with_bootloader(mut self, bootloader: Address) -> Self {
        self.bootloader = bootloader;
        self
    }

    /// Sets the system deployer address.
    pub fn with_system_deployer(mut self, system_deployer: Address) -> Self {
        self.system_deployer = system_deployer;
        self
    }

    /// Sets the chain id.
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Sets the relay policy.
    pub fn with_relay_policy(mut self, relay_policy: RelayPolicy) -> Self {
        self.relay_policy = relay_policy;
        self
    }
}
