use alloy_primitives::Address;
use tracing::debug;

/// Errors raised by ownership operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OwnershipError {
    /// The caller is not the current owner.
    #[error("account {0} is not the owner")]
    UnauthorizedAccount(Address),
    /// The new owner is the zero address.
    #[error("invalid owner {0}")]
    InvalidOwner(Address),
}

/// The single owner of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ownable {
    owner: Address,
}

impl Ownable {
    /// Creates the ownership record. The zero address cannot own an account.
    pub fn new(owner: Address) -> Result<Self, OwnershipError> {
        if owner.is_zero() {
            return Err(OwnershipError::InvalidOwner(owner));
        }
        Ok(Self { owner })
    }

    /// Returns the current owner.
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Whether `account` is the current owner.
    pub fn is_owner(&self, account: Address) -> bool {
        self.owner == account
    }

    /// Hands ownership to `new_owner`. Only the current owner may do this.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), OwnershipError> {
        if !self.is_owner(caller) {
            return Err(OwnershipError::UnauthorizedAccount(caller));
        }
        if new_owner.is_zero() {
            return Err(OwnershipError::InvalidOwner(new_owner));
        }
        debug!(previous = %self.owner, %new_owner, "Ownership transferred");
        self.owner = new_owner;
        Ok(())
    }
}
