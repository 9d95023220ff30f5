use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{SolCall, SolInterface};
use tracing::trace;

use crate::{
    interface::IAccount::{self, IAccountCalls},
    Account, AccountError, Host, Transaction,
};

impl Account {
    /// Handles an ABI-encoded call to the account and returns the ABI-encoded return data.
    ///
    /// On error, [`AccountError::revert_data`] gives the data the call reverts with.
    pub fn call<H: Host>(
        &mut self,
        host: &mut H,
        caller: Address,
        calldata: &[u8],
    ) -> Result<Bytes, AccountError> {
        let call = IAccountCalls::abi_decode(calldata, true).map_err(|err| {
            trace!(%err, "Undecodable account calldata");
            AccountError::InvalidCalldata
        })?;

        match call {
            IAccountCalls::validateTransaction(call) => {
                let tx = Transaction::try_from(call.transaction)?;
                let magic = self.validate_transaction(
                    host,
                    caller,
                    call.txHash,
                    call.suggestedSignedHash,
                    &tx,
                )?;
                Ok(IAccount::validateTransactionCall::abi_encode_returns(&(magic,)).into())
            }
            IAccountCalls::executeTransaction(call) => {
                let tx = Transaction::try_from(call.transaction)?;
                self.execute_transaction(host, caller, call.txHash, call.suggestedSignedHash, &tx)?;
                Ok(Bytes::new())
            }
            IAccountCalls::executeTransactionFromOutside(call) => {
                let tx = Transaction::try_from(call.transaction)?;
                self.execute_transaction_from_outside(host, caller, &tx)?;
                Ok(Bytes::new())
            }
            IAccountCalls::payForTransaction(call) => {
                let tx = Transaction::try_from(call.transaction)?;
                self.pay_for_transaction(host, caller, call.txHash, call.suggestedSignedHash, &tx)?;
                Ok(Bytes::new())
            }
            IAccountCalls::prepareForPaymaster(call) => {
                let tx = Transaction::try_from(call.transaction)?;
                self.prepare_for_paymaster(
                    host,
                    caller,
                    call.txHash,
                    call.possibleSignedHash,
                    &tx,
                )?;
                Ok(Bytes::new())
            }
            IAccountCalls::owner(_) => {
                Ok(IAccount::ownerCall::abi_encode_returns(&(self.owner(),)).into())
            }
            IAccountCalls::transferOwnership(call) => {
                self.transfer_ownership(caller, call.newOwner)?;
                Ok(Bytes::new())
            }
        }
    }
}
