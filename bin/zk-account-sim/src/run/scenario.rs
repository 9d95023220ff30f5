use std::collections::BTreeMap;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use zk_account::{AccountConfig, CalleeBehavior, InMemoryHost, Transaction};

/// The entry point a scenario transaction is sent through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Route {
    /// Full bootloader lifecycle: validate, pay, execute.
    #[default]
    Bootloader,
    /// `executeTransactionFromOutside`.
    Relay,
    /// `executeTransaction` without validation or payment.
    Execute,
}

/// A transaction of a scenario together with how it reaches the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioTx {
    /// The entry point.
    #[serde(default)]
    pub via: Route,
    /// The caller of the entry point. Ignored on the bootloader route, which always calls from
    /// the configured bootloader. Defaults to the zero address.
    #[serde(default)]
    pub caller: Option<Address>,
    /// The transaction.
    pub tx: Transaction,
}

/// A simulation input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Scenario {
    /// The account configuration.
    pub config: AccountConfig,
    /// The address the account is deployed at.
    pub account: Address,
    /// The owner of the account.
    pub owner: Address,
    /// Initial balances.
    pub balances: BTreeMap<Address, U256>,
    /// Initial minimum nonces.
    pub nonces: BTreeMap<Address, u64>,
    /// Scripted behavior of callees. Unlisted callees return empty data.
    pub callees: BTreeMap<Address, CalleeBehavior>,
    /// Gas available to the whole scenario.
    pub gas_limit: Option<u64>,
    /// The transactions, in order.
    pub transactions: Vec<ScenarioTx>,
}

impl Scenario {
    /// Builds the host the scenario starts from.
    pub fn host(&self) -> InMemoryHost {
        let mut host = InMemoryHost::new();
        if let Some(gas_limit) = self.gas_limit {
            host = host.gas_limit(gas_limit);
        }
        for (address, balance) in &self.balances {
            host.set_account_balance(*address, *balance);
        }
        for (address, nonce) in &self.nonces {
            host.set_account_min_nonce(*address, *nonce);
        }
        for (address, behavior) in &self.callees {
            host.set_callee(*address, behavior.clone());
        }
        host
    }

    /// Every address whose balance the report tracks: seeded balances, the account, the
    /// bootloader and every call target.
    pub fn tracked_addresses(&self) -> Vec<Address> {
        let mut addresses: Vec<Address> = self.balances.keys().copied().collect();
        addresses.push(self.account);
        addresses.push(self.config.bootloader);
        addresses.extend(self.transactions.iter().map(|entry| entry.tx.to));
        addresses.sort();
        addresses.dedup();
        addresses
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, bytes};
    use zk_account::Host;

    use super::*;

    #[test]
    fn test_scenario_json_seeds_host() {
        let json = r#"{
            "account": "0x000000000000000000000000000000000000acc0",
            "owner": "0x0000000000000000000000000000000000000001",
            "balances": { "0x000000000000000000000000000000000000acc0": "0x64" },
            "nonces": { "0x000000000000000000000000000000000000acc0": 7 },
            "callees": { "0x000000000000000000000000000000000000b0b0": { "revert": "0xaa" } },
            "transactions": [
                { "via": "relay", "caller": "0x0000000000000000000000000000000000000bad",
                  "tx": { "txType": 113, "to": "0x000000000000000000000000000000000000b0b0" } },
                { "tx": { "txType": 113 } }
            ]
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        let account = address!("0x000000000000000000000000000000000000acc0");
        let callee = address!("0x000000000000000000000000000000000000b0b0");

        assert_eq!(scenario.config, AccountConfig::default());
        assert_eq!(scenario.transactions[0].via, Route::Relay);
        assert_eq!(scenario.transactions[1].via, Route::Bootloader);
        assert_eq!(scenario.callees[&callee], CalleeBehavior::Revert(bytes!("aa")));

        let host = scenario.host();
        assert_eq!(host.balance(account), U256::from(100));
        assert_eq!(host.min_nonce(account), U256::from(7));
    }

    #[test]
    fn test_tracked_addresses_are_unique() {
        let account = address!("0x000000000000000000000000000000000000acc0");
        let scenario = Scenario {
            account,
            balances: BTreeMap::from([(account, U256::from(1))]),
            transactions: vec![ScenarioTx {
                via: Route::Bootloader,
                caller: None,
                tx: Transaction { to: account, ..Default::default() },
            }],
            ..Default::default()
        };
        assert_eq!(scenario.tracked_addresses().len(), 2);
    }
}
