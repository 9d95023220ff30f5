//! Library side of the `zk-account-sim` tool.

mod cmd;
pub use cmd::*;

/// Shared argument groups, input helpers and errors.
pub mod common;
/// Transaction hashing.
pub mod hash;
/// Scenario replay.
pub mod run;
/// Transaction signing.
pub mod sign;
