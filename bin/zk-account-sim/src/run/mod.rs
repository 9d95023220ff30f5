//! Replays a scenario of transactions against an in-memory host.
//!
//! A scenario seeds the host (balances, nonces, scripted callees), deploys one account and sends
//! it a list of transactions. Each transaction is routed through the bootloader lifecycle, the
//! relay entry point, or a direct `executeTransaction` call by some caller.

mod cmd;
mod report;
mod scenario;

pub use cmd::*;
pub use report::*;
pub use scenario::*;
