use alloy_primitives::{address, Address};
use k256::ecdsa::SigningKey;

/// The address test accounts are deployed at.
pub const ACCOUNT_ADDRESS: Address = address!("0x000000000000000000000000000000000000acc0");

/// Returns a deterministic private key whose scalar is `seed`.
///
/// # Panics
///
/// Panics if `seed` is zero.
pub fn signing_key(seed: u8) -> SigningKey {
    let mut secret = [0u8; 32];
    secret[31] = seed;
    SigningKey::from_slice(&secret).expect("non-zero scalar is a valid key")
}

/// The key of the account owner.
pub fn owner_key() -> SigningKey {
    signing_key(1)
}

/// A key that does not own the account.
pub fn stranger_key() -> SigningKey {
    signing_key(2)
}
