//! Test utilities for the account.

mod builder;
mod keys;

pub use builder::*;
pub use keys::*;
