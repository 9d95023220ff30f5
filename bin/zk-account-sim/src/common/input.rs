//! Input and output helpers for zk-account-sim

use std::{fs, io::Read, path::Path};

use alloy_primitives::hex;
use k256::ecdsa::SigningKey;
use serde::{de::DeserializeOwned, Serialize};

use super::{Result, SimError};

/// Read a whole input. If the path is a dash (-), read from stdin.
pub fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

/// Read and deserialize a JSON input. If the path is a dash (-), read from stdin.
pub fn load_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    Ok(serde_json::from_str(&read_input(path)?)?)
}

/// Write a value as pretty JSON to `output`, or to stdout if no path is given.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => fs::write(path, json + "\n")?,
        None => println!("{json}"),
    }
    Ok(())
}

/// Parse a hex-encoded secp256k1 private key, with or without `0x` prefix.
pub fn parse_private_key(s: &str) -> Result<SigningKey> {
    let bytes = hex::decode(s.trim())?;
    SigningKey::from_slice(&bytes)
        .map_err(|_| SimError::InvalidInput("private key is not a valid secp256k1 scalar".into()))
}
