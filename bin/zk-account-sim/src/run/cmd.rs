use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};
use zk_account::{Account, AccountConfig, AccountError, Bootloader, Host, InMemoryHost};

use super::{Report, Route, Scenario, ScenarioTx, TxResult};
use crate::common::{load_json, read_input, write_json, LogArgs, Result};

/// Replay a scenario
#[derive(Parser, Debug)]
pub struct Cmd {
    /// Scenario JSON file. If `-`, read from stdin
    #[arg(value_name = "SCENARIO", default_value = "-")]
    pub scenario: String,

    /// Account configuration JSON file, replacing the configuration of the scenario
    #[arg(long = "config")]
    pub config: Option<String>,

    /// Output file. If not given, print to stdout
    #[arg(long = "output", short = 'o')]
    pub output: Option<PathBuf>,

    /// Logging configuration
    #[command(flatten)]
    pub log_args: LogArgs,
}

impl Cmd {
    /// Execute the run command
    pub fn run(&self) -> Result<()> {
        self.log_args.init()?;
        let report = self.execute()?;
        write_json(&report, self.output.as_deref())
    }

    /// Loads the inputs and replays the scenario.
    pub fn execute(&self) -> Result<Report> {
        let mut scenario: Scenario = load_json(&self.scenario)?;
        if let Some(path) = &self.config {
            scenario.config = AccountConfig::from_json(&read_input(path)?)?;
        }
        run_scenario(&scenario)
    }
}

/// Replays `scenario` against a fresh in-memory host.
pub fn run_scenario(scenario: &Scenario) -> Result<Report> {
    scenario.config.validate()?;
    let account = Account::new(scenario.account, scenario.owner, scenario.config.clone())?;
    let bootloader = Bootloader::new(scenario.config.bootloader);
    let mut host = scenario.host();

    let mut results = Vec::with_capacity(scenario.transactions.len());
    for (index, entry) in scenario.transactions.iter().enumerate() {
        let result = apply(&mut host, &bootloader, &account, entry);
        debug!(index, via = ?entry.via, applied = result.is_applied(), "Replayed transaction");
        results.push(result);
    }

    let balances = scenario
        .tracked_addresses()
        .into_iter()
        .map(|address| (address, host.balance(address)))
        .collect();
    let report = Report {
        results,
        balances,
        nonce: host.min_nonce(account.address()),
        calls: host.call_log().to_vec(),
        gas_used: host.gas_used(),
    };
    info!(
        transactions = report.results.len(),
        applied = report.results.iter().filter(|result| result.is_applied()).count(),
        gas_used = report.gas_used,
        "Scenario finished"
    );
    Ok(report)
}

fn apply(
    host: &mut InMemoryHost,
    bootloader: &Bootloader,
    account: &Account,
    entry: &ScenarioTx,
) -> TxResult {
    let caller = entry.caller.unwrap_or_default();
    match entry.via {
        Route::Bootloader => match bootloader.process_transaction(host, account, &entry.tx) {
            Ok(receipt) => TxResult::Accepted { receipt },
            Err(error) => error.into(),
        },
        Route::Relay => match account.execute_transaction_from_outside(host, caller, &entry.tx) {
            Ok(call) => TxResult::Executed { call },
            Err(error) => error.into(),
        },
        Route::Execute => {
            let tx_hash = match entry.tx.signature_hash(account.config().chain_id) {
                Ok(tx_hash) => tx_hash,
                Err(error) => return AccountError::from(error).into(),
            };
            match account.execute_transaction(host, caller, tx_hash, tx_hash, &entry.tx) {
                Ok(call) => TxResult::Executed { call },
                Err(error) => error.into(),
            }
        }
    }
}
