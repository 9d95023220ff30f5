//! A single-owner contract account for zkSync-style account abstraction.
//!
//! The account replaces an externally-owned key with contract logic that the bootloader drives
//! through a fixed lifecycle: validate (nonce, solvency, signature), pay the fee, execute. The
//! blockchain runtime around the account is abstracted by the [`Host`] trait; an in-memory
//! implementation ([`InMemoryHost`]) and a host-side driver ([`Bootloader`]) are provided for
//! off-chain simulation.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod constants;

mod account;
pub use account::*;

mod bootloader;
pub use bootloader::*;

mod config;
pub use config::*;

mod error;
pub use error::*;

mod hash;
pub use hash::*;

mod host;
pub use host::*;

pub mod interface;

mod ownable;
pub use ownable::*;

mod signature;
pub use signature::*;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

mod transaction;
pub use transaction::*;
