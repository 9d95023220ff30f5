use alloy_primitives::Address;
use tracing::warn;

use crate::{Account, AccountError};

impl Account {
    /// Whether `caller` is the configured bootloader.
    pub fn is_bootloader(&self, caller: Address) -> bool {
        caller == self.config.bootloader
    }

    /// Admits the bootloader only.
    pub(crate) fn require_bootloader(&self, caller: Address) -> Result<(), AccountError> {
        if !self.is_bootloader(caller) {
            warn!(%caller, account = %self.address, "Rejected caller that is not the bootloader");
            return Err(AccountError::NotFromBootloader(caller));
        }
        Ok(())
    }

    /// Admits the bootloader and the owner.
    pub(crate) fn require_bootloader_or_owner(&self, caller: Address) -> Result<(), AccountError> {
        if !self.is_bootloader(caller) && !self.ownable.is_owner(caller) {
            warn!(
                %caller,
                account = %self.address,
                "Rejected caller that is neither bootloader nor owner"
            );
            return Err(AccountError::NotFromBootloaderOrOwner(caller));
        }
        Ok(())
    }
}
