//! Command-line simulator for single-owner zkSync-style accounts.
//!
//! Hashes and signs transactions, and replays scenarios through the bootloader lifecycle against
//! an in-memory host.

use clap::Parser;
use zk_account_sim::{Error, MainCmd};

fn main() -> Result<(), Error> {
    set_thread_panic_hook();
    MainCmd::parse().run().inspect_err(|e| eprintln!("error: {e}"))
}

/// Prints a backtrace to stderr and exits with status 1 when any thread panics.
fn set_thread_panic_hook() {
    use std::{
        backtrace::Backtrace,
        panic::{set_hook, take_hook},
        process::exit,
    };
    let default_hook = take_hook();
    set_hook(Box::new(move |panic_info| {
        eprintln!("{}", Backtrace::force_capture());
        default_hook(panic_info);
        exit(1);
    }));
}
