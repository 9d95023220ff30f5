use tracing::{debug, warn};

use crate::{Account, AccountError, CallOutcome, CallPath, Host, Transaction};

impl Account {
    /// Performs the call described by the transaction.
    ///
    /// Calls to the system deployer go through the system-call path, everything else is a
    /// generic call forwarding all remaining gas. The value must fit 128 bits; this is checked
    /// before anything is called.
    pub(crate) fn execute<H: Host>(
        &self,
        host: &mut H,
        tx: &Transaction,
    ) -> Result<CallOutcome, AccountError> {
        let value = u128::try_from(tx.value).map_err(|_| AccountError::ValueOverflow(tx.value))?;
        let gas = host.gas_left();

        let (path, outcome) = if tx.to == self.config.system_deployer {
            (CallPath::System, host.system_call(self.address, tx.to, value, &tx.data, gas)?)
        } else {
            (CallPath::Generic, host.call(self.address, tx.to, value, &tx.data, gas)?)
        };

        if !outcome.success {
            warn!(account = %self.address, target = %tx.to, ?path, "Execution failed");
            return Err(AccountError::ExecutionFailed {
                target: tx.to,
                path,
                output: outcome.output,
            });
        }

        debug!(
            account = %self.address,
            target = %tx.to,
            ?path,
            gas_used = outcome.gas_used,
            "Transaction executed"
        );
        Ok(outcome)
    }
}
