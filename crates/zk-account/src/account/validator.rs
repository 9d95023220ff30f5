use alloy_primitives::{Address, FixedBytes};
use tracing::{debug, trace, warn};

use crate::{
    constants::{ACCOUNT_VALIDATION_FAILURE_MAGIC, ACCOUNT_VALIDATION_SUCCESS_MAGIC},
    recover_signer, Account, AccountError, Host, Transaction,
};

/// The result of a validation that did not abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The owner signed the transaction.
    Authorized,
    /// The transaction is signed by someone other than the owner.
    Unauthorized {
        /// The address the signature recovers to
        signer: Address,
    },
}

impl ValidationOutcome {
    /// Whether the owner signed the transaction.
    pub const fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }

    /// The value `validateTransaction` returns for this outcome.
    pub const fn magic(&self) -> FixedBytes<4> {
        match self {
            Self::Authorized => ACCOUNT_VALIDATION_SUCCESS_MAGIC,
            Self::Unauthorized { .. } => ACCOUNT_VALIDATION_FAILURE_MAGIC,
        }
    }
}

impl Account {
    /// Consumes the nonce, checks solvency and checks the signature, in that order.
    ///
    /// A signature from someone other than the owner is not an error: the nonce stays consumed
    /// and the outcome is [`ValidationOutcome::Unauthorized`].
    pub(crate) fn validate<H: Host>(
        &self,
        host: &mut H,
        tx: &Transaction,
    ) -> Result<ValidationOutcome, AccountError> {
        host.increment_min_nonce_if_equals(self.address, tx.nonce)?;
        trace!(account = %self.address, nonce = %tx.nonce, "Nonce consumed");

        let required = tx.total_required_balance().ok_or(AccountError::FeeOverflow)?;
        let available = host.balance(self.address);
        if available < required {
            return Err(AccountError::NotEnoughBalance { required, available });
        }

        let hash = tx.signed_message_hash(self.config.chain_id)?;
        let signer = recover_signer(&hash, &tx.signature)?;
        if !self.ownable.is_owner(signer) {
            warn!(
                account = %self.address,
                %signer,
                owner = %self.owner(),
                "Transaction is not signed by the owner"
            );
            return Ok(ValidationOutcome::Unauthorized { signer });
        }

        debug!(account = %self.address, nonce = %tx.nonce, "Transaction validated");
        Ok(ValidationOutcome::Authorized)
    }
}
