//! End-to-end tests of the validate, pay, execute lifecycle.

use alloy_primitives::{address, bytes, Address, Bytes, B256, U256};
use zk_account::{
    constants::{
        ACCOUNT_VALIDATION_FAILURE_MAGIC, ACCOUNT_VALIDATION_SUCCESS_MAGIC,
        BOOTLOADER_FORMAL_ADDRESS, CONTRACT_DEPLOYER_SYSTEM_CONTRACT,
    },
    signer_address,
    test_utils::{owner_key, stranger_key, TxBuilder, ACCOUNT_ADDRESS},
    Account, AccountConfig, AccountError, Bootloader, BootloaderError, CallOutcome, CallPath,
    CalleeBehavior, ExecutionStatus, Host, HostError, InMemoryHost, JournalCheckpoint,
    RelayPolicy, Transaction,
};

const TARGET: Address = address!("0x000000000000000000000000000000000000b0b0");
const RELAYER: Address = address!("0x0000000000000000000000000000000000000fee");

fn account_with(config: AccountConfig) -> Account {
    Account::new(ACCOUNT_ADDRESS, signer_address(&owner_key()), config).unwrap()
}

fn funded_host() -> InMemoryHost {
    InMemoryHost::new().account_balance(ACCOUNT_ADDRESS, U256::from(10).pow(U256::from(18)))
}

fn validate(
    account: &Account,
    host: &mut InMemoryHost,
    tx: &Transaction,
) -> Result<[u8; 4], AccountError> {
    account
        .validate_transaction(host, BOOTLOADER_FORMAL_ADDRESS, B256::ZERO, B256::ZERO, tx)
        .map(|magic| magic.0)
}

#[test]
fn test_owner_signed_transfer_end_to_end() {
    let account = account_with(AccountConfig::default());
    let mut host = funded_host();
    let balance_before = host.balance(ACCOUNT_ADDRESS);
    let tx = TxBuilder::new().to(TARGET).value(U256::from(1_000)).sign(&owner_key());
    let fee = tx.required_fee().unwrap();

    let receipt = Bootloader::new(BOOTLOADER_FORMAL_ADDRESS)
        .process_transaction(&mut host, &account, &tx)
        .unwrap();

    assert_eq!(receipt.status, ExecutionStatus::Success { output: Bytes::new() });
    assert_eq!(host.min_nonce(ACCOUNT_ADDRESS), U256::from(1));
    assert_eq!(host.balance(TARGET), U256::from(1_000));
    assert_eq!(host.balance(BOOTLOADER_FORMAL_ADDRESS), fee);
    assert_eq!(host.balance(ACCOUNT_ADDRESS), balance_before - fee - U256::from(1_000));
}

#[test]
fn test_non_owner_sentinel_ignored_by_caller() {
    let account = account_with(AccountConfig::default());
    let mut host = funded_host();
    let tx = TxBuilder::new().to(TARGET).value(U256::from(1)).sign(&stranger_key());

    // The validator only reports the failure; a caller that ignores it may still execute.
    assert_eq!(validate(&account, &mut host, &tx), Ok(ACCOUNT_VALIDATION_FAILURE_MAGIC.0));
    assert_eq!(host.min_nonce(ACCOUNT_ADDRESS), U256::from(1));

    account
        .execute_transaction(&mut host, BOOTLOADER_FORMAL_ADDRESS, B256::ZERO, B256::ZERO, &tx)
        .unwrap();
    assert_eq!(host.balance(TARGET), U256::from(1));
}

#[test]
fn test_replay_is_rejected() {
    let account = account_with(AccountConfig::default());
    let mut host = funded_host();
    let tx = TxBuilder::new().to(TARGET).sign(&owner_key());

    assert_eq!(validate(&account, &mut host, &tx), Ok(ACCOUNT_VALIDATION_SUCCESS_MAGIC.0));
    assert_eq!(
        validate(&account, &mut host, &tx),
        Err(AccountError::Host(HostError::NonceMismatch {
            expected: U256::from(1),
            provided: U256::ZERO
        }))
    );
    assert_eq!(host.min_nonce(ACCOUNT_ADDRESS), U256::from(1));
}

#[test]
fn test_replay_is_rejected_at_the_last_nonce() {
    let account = account_with(AccountConfig::default());
    let mut host = funded_host().account_min_nonce(ACCOUNT_ADDRESS, u64::MAX);
    let balance_before = host.balance(ACCOUNT_ADDRESS);
    let nonce = U256::from(u64::MAX);
    let tx = TxBuilder::new().nonce(u64::MAX).to(TARGET).value(U256::from(1)).sign(&owner_key());

    for _ in 0..2 {
        assert_eq!(
            account.execute_transaction_from_outside(&mut host, RELAYER, &tx),
            Err(AccountError::Host(HostError::NonceOverflow(nonce)))
        );
    }
    assert_eq!(validate(&account, &mut host, &tx), Err(HostError::NonceOverflow(nonce).into()));
    assert!(matches!(
        Bootloader::new(BOOTLOADER_FORMAL_ADDRESS).process_transaction(&mut host, &account, &tx),
        Err(BootloaderError::Validation(AccountError::Host(HostError::NonceOverflow(_))))
    ));

    assert_eq!(host.min_nonce(ACCOUNT_ADDRESS), nonce);
    assert_eq!(host.balance(TARGET), U256::ZERO);
    assert_eq!(host.balance(ACCOUNT_ADDRESS), balance_before);
    assert!(host.call_log().is_empty());
}

#[test]
fn test_hard_failures_leave_no_state_change() {
    let account = account_with(AccountConfig::default());
    let tx = TxBuilder::new().to(TARGET).value(U256::from(5)).sign(&owner_key());

    // Nonce is consumed first, so an insolvent account must see it restored.
    let mut host = InMemoryHost::new().account_balance(ACCOUNT_ADDRESS, U256::from(5));
    assert!(matches!(
        validate(&account, &mut host, &tx),
        Err(AccountError::NotEnoughBalance { .. })
    ));
    assert_eq!(host.min_nonce(ACCOUNT_ADDRESS), U256::ZERO);
    assert_eq!(host.balance(ACCOUNT_ADDRESS), U256::from(5));
    assert_eq!(host.checkpoint_depth(), 0);

    let mut host = funded_host();
    let mut malformed = tx.clone();
    malformed.signature = Bytes::from(vec![0u8; 65]);
    assert!(matches!(
        validate(&account, &mut host, &malformed),
        Err(AccountError::InvalidSignature(_))
    ));
    assert_eq!(host.min_nonce(ACCOUNT_ADDRESS), U256::ZERO);
}

#[test]
fn test_admission_is_checked_before_anything_else() {
    let account = account_with(AccountConfig::default());
    let mut host = funded_host();
    let tx = TxBuilder::new().to(TARGET).sign(&owner_key());

    assert_eq!(
        account.validate_transaction(&mut host, RELAYER, B256::ZERO, B256::ZERO, &tx),
        Err(AccountError::NotFromBootloader(RELAYER))
    );
    assert_eq!(
        account.pay_for_transaction(&mut host, RELAYER, B256::ZERO, B256::ZERO, &tx),
        Err(AccountError::NotFromBootloader(RELAYER))
    );
    assert_eq!(
        account.execute_transaction(&mut host, RELAYER, B256::ZERO, B256::ZERO, &tx),
        Err(AccountError::NotFromBootloaderOrOwner(RELAYER))
    );
    assert_eq!(host.min_nonce(ACCOUNT_ADDRESS), U256::ZERO);
    assert!(host.call_log().is_empty());

    // The owner may execute directly.
    account
        .execute_transaction(&mut host, account.owner(), B256::ZERO, B256::ZERO, &tx)
        .unwrap();
    assert_eq!(host.call_log().len(), 1);
}

#[test]
fn test_pay_moves_max_fee_to_bootloader() {
    let account = account_with(AccountConfig::default());
    let tx = TxBuilder::new().to(TARGET).sign(&owner_key());
    let fee = tx.required_fee().unwrap();

    let mut host = InMemoryHost::new().account_balance(ACCOUNT_ADDRESS, fee - U256::from(1));
    assert_eq!(
        account.pay_for_transaction(
            &mut host,
            BOOTLOADER_FORMAL_ADDRESS,
            B256::ZERO,
            B256::ZERO,
            &tx
        ),
        Err(AccountError::FailedToPay(HostError::InsufficientFunds {
            required: fee,
            available: fee - U256::from(1)
        }))
    );

    host.set_account_balance(ACCOUNT_ADDRESS, fee);
    account
        .pay_for_transaction(&mut host, BOOTLOADER_FORMAL_ADDRESS, B256::ZERO, B256::ZERO, &tx)
        .unwrap();
    assert_eq!(host.balance(BOOTLOADER_FORMAL_ADDRESS), fee);
    assert_eq!(host.balance(ACCOUNT_ADDRESS), U256::ZERO);
}

#[test]
fn test_system_deployer_failure_propagates_revert_data() {
    let account = account_with(AccountConfig::default());
    let mut host = funded_host()
        .callee(CONTRACT_DEPLOYER_SYSTEM_CONTRACT, CalleeBehavior::Revert(bytes!("c0ffee")));
    let tx =
        TxBuilder::new().to(CONTRACT_DEPLOYER_SYSTEM_CONTRACT).data(bytes!("9c4d535b")).build();

    let error = account
        .execute_transaction(&mut host, BOOTLOADER_FORMAL_ADDRESS, B256::ZERO, B256::ZERO, &tx)
        .unwrap_err();
    assert_eq!(
        error,
        AccountError::ExecutionFailed {
            target: CONTRACT_DEPLOYER_SYSTEM_CONTRACT,
            path: CallPath::System,
            output: bytes!("c0ffee")
        }
    );
    assert_eq!(error.revert_data(), bytes!("c0ffee"));
}

#[test]
fn test_custom_system_deployer() {
    let deployer = address!("0x0000000000000000000000000000000000000d00");
    let account = account_with(AccountConfig::default().with_system_deployer(deployer));
    let mut host = funded_host();

    let cases =
        [(deployer, CallPath::System), (CONTRACT_DEPLOYER_SYSTEM_CONTRACT, CallPath::Generic)];
    for (to, path) in cases {
        let tx = TxBuilder::new().to(to).build();
        account
            .execute_transaction(&mut host, BOOTLOADER_FORMAL_ADDRESS, B256::ZERO, B256::ZERO, &tx)
            .unwrap();
        assert_eq!(host.call_log().last().map(|call| call.path), Some(path));
    }
}

#[test]
fn test_relay_requires_valid_signature_by_default() {
    let account = account_with(AccountConfig::default());
    let mut host = funded_host();

    let tx = TxBuilder::new().to(TARGET).value(U256::from(3)).sign(&stranger_key());
    assert_eq!(
        account.execute_transaction_from_outside(&mut host, RELAYER, &tx),
        Err(AccountError::Unauthorized)
    );
    assert_eq!(host.min_nonce(ACCOUNT_ADDRESS), U256::ZERO);
    assert!(host.call_log().is_empty());

    let tx = TxBuilder::new().to(TARGET).value(U256::from(3)).sign(&owner_key());
    let outcome = account.execute_transaction_from_outside(&mut host, RELAYER, &tx).unwrap();
    assert!(outcome.success);
    assert_eq!(host.min_nonce(ACCOUNT_ADDRESS), U256::from(1));
    assert_eq!(host.balance(TARGET), U256::from(3));
}

#[test]
fn test_permissive_relay_executes_unsigned() {
    let account = account_with(AccountConfig::default().with_relay_policy(RelayPolicy::Permissive));
    let mut host = funded_host();
    let tx = TxBuilder::new().to(TARGET).value(U256::from(3)).sign(&stranger_key());

    account.execute_transaction_from_outside(&mut host, RELAYER, &tx).unwrap();
    assert_eq!(host.min_nonce(ACCOUNT_ADDRESS), U256::from(1));
    assert_eq!(host.balance(TARGET), U256::from(3));
}

#[test]
fn test_relay_execution_failure_rolls_back_nonce() {
    let account = account_with(AccountConfig::default());
    let mut host = funded_host().callee(TARGET, CalleeBehavior::Revert(Bytes::new()));
    let tx = TxBuilder::new().to(TARGET).sign(&owner_key());

    assert!(matches!(
        account.execute_transaction_from_outside(&mut host, RELAYER, &tx),
        Err(AccountError::ExecutionFailed { path: CallPath::Generic, .. })
    ));
    assert_eq!(host.min_nonce(ACCOUNT_ADDRESS), U256::ZERO);
}

#[test]
fn test_sequential_transactions() {
    let account = account_with(AccountConfig::default());
    let bootloader = Bootloader::new(BOOTLOADER_FORMAL_ADDRESS);
    let mut host = funded_host();

    for nonce in 0..3 {
        let tx = TxBuilder::new().nonce(nonce).to(TARGET).value(U256::from(1)).sign(&owner_key());
        let receipt = bootloader.process_transaction(&mut host, &account, &tx).unwrap();
        assert_eq!(receipt.nonce, U256::from(nonce));
    }
    assert_eq!(host.min_nonce(ACCOUNT_ADDRESS), U256::from(3));
    assert_eq!(host.balance(TARGET), U256::from(3));
}

/// A host whose transfers to the bootloader lose part of the amount.
#[derive(Debug)]
struct SkimmingHost {
    inner: InMemoryHost,
    skim: U256,
}

impl Host for SkimmingHost {
    fn balance(&self, address: Address) -> U256 {
        self.inner.balance(address)
    }

    fn min_nonce(&self, address: Address) -> U256 {
        self.inner.min_nonce(address)
    }

    fn increment_min_nonce_if_equals(
        &mut self,
        address: Address,
        expected: U256,
    ) -> Result<(), HostError> {
        self.inner.increment_min_nonce_if_equals(address, expected)
    }

    fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<(), HostError> {
        self.inner.transfer(from, to, amount)?;
        self.inner.transfer(to, Address::ZERO, self.skim)
    }

    fn call(
        &mut self,
        caller: Address,
        target: Address,
        value: u128,
        data: &Bytes,
        gas: u64,
    ) -> Result<CallOutcome, HostError> {
        self.inner.call(caller, target, value, data, gas)
    }

    fn system_call(
        &mut self,
        caller: Address,
        target: Address,
        value: u128,
        data: &Bytes,
        gas: u64,
    ) -> Result<CallOutcome, HostError> {
        self.inner.system_call(caller, target, value, data, gas)
    }

    fn gas_left(&self) -> u64 {
        self.inner.gas_left()
    }

    fn checkpoint(&mut self) -> JournalCheckpoint {
        self.inner.checkpoint()
    }

    fn checkpoint_commit(&mut self, checkpoint: JournalCheckpoint) {
        self.inner.checkpoint_commit(checkpoint)
    }

    fn checkpoint_revert(&mut self, checkpoint: JournalCheckpoint) {
        self.inner.checkpoint_revert(checkpoint)
    }
}

#[test]
fn test_bootloader_rejects_insufficient_fee() {
    let account = account_with(AccountConfig::default());
    let mut host = SkimmingHost { inner: funded_host(), skim: U256::from(1) };
    let tx = TxBuilder::new().to(TARGET).sign(&owner_key());
    let fee = tx.required_fee().unwrap();

    assert_eq!(
        Bootloader::new(BOOTLOADER_FORMAL_ADDRESS).process_transaction(&mut host, &account, &tx),
        Err(BootloaderError::ReceivedInsufficientFees {
            received: fee - U256::from(1),
            required: fee
        })
    );
    assert_eq!(host.min_nonce(ACCOUNT_ADDRESS), U256::ZERO);
    assert_eq!(host.balance(BOOTLOADER_FORMAL_ADDRESS), U256::ZERO);
}

/// A nonce holder that accepts the expected nonce without advancing it.
#[derive(Debug)]
struct StuckNonceHost(InMemoryHost);

impl Host for StuckNonceHost {
    fn balance(&self, address: Address) -> U256 {
        self.0.balance(address)
    }

    fn min_nonce(&self, address: Address) -> U256 {
        self.0.min_nonce(address)
    }

    fn increment_min_nonce_if_equals(
        &mut self,
        address: Address,
        expected: U256,
    ) -> Result<(), HostError> {
        let current = self.0.min_nonce(address);
        if current != expected {
            return Err(HostError::NonceMismatch { expected: current, provided: expected });
        }
        Ok(())
    }

    fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<(), HostError> {
        self.0.transfer(from, to, amount)
    }

    fn call(
        &mut self,
        caller: Address,
        target: Address,
        value: u128,
        data: &Bytes,
        gas: u64,
    ) -> Result<CallOutcome, HostError> {
        self.0.call(caller, target, value, data, gas)
    }

    fn system_call(
        &mut self,
        caller: Address,
        target: Address,
        value: u128,
        data: &Bytes,
        gas: u64,
    ) -> Result<CallOutcome, HostError> {
        self.0.system_call(caller, target, value, data, gas)
    }

    fn gas_left(&self) -> u64 {
        self.0.gas_left()
    }

    fn checkpoint(&mut self) -> JournalCheckpoint {
        self.0.checkpoint()
    }

    fn checkpoint_commit(&mut self, checkpoint: JournalCheckpoint) {
        self.0.checkpoint_commit(checkpoint)
    }

    fn checkpoint_revert(&mut self, checkpoint: JournalCheckpoint) {
        self.0.checkpoint_revert(checkpoint)
    }
}

#[test]
fn test_bootloader_rejects_nonce_not_increased() {
    let account = account_with(AccountConfig::default());
    let mut host = StuckNonceHost(funded_host());
    let tx = TxBuilder::new().to(TARGET).sign(&owner_key());

    assert_eq!(
        Bootloader::new(BOOTLOADER_FORMAL_ADDRESS).process_transaction(&mut host, &account, &tx),
        Err(BootloaderError::NonceNotIncreased { before: U256::ZERO, after: U256::ZERO })
    );
    assert!(host.0.call_log().is_empty());
}
