use clap::Parser;

/// Main command enumeration for the zk-account-sim CLI tool
#[derive(Parser, Debug)]
#[command(infer_subcommands = true, version = "0.1")]
pub enum MainCmd {
    /// Compute the canonical and signed hashes of a transaction
    Hash(crate::hash::Cmd),
    /// Sign a transaction with an owner key
    Sign(crate::sign::Cmd),
    /// Replay a scenario against an in-memory host
    Run(crate::run::Cmd),
}

/// Error types for the main command system
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Simulator error
    #[error("{0}")]
    Sim(#[from] crate::common::SimError),
}

impl MainCmd {
    /// Execute the main command
    pub fn run(&self) -> Result<(), Error> {
        match self {
            Self::Hash(cmd) => cmd.run()?,
            Self::Sign(cmd) => cmd.run()?,
            Self::Run(cmd) => cmd.run()?,
        }
        Ok(())
    }
}
