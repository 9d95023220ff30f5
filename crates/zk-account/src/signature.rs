//! ECDSA signature recovery over secp256k1.
//!
//! Signatures are 65 bytes `r || s || v` with `v` in `{27, 28}`. Malformed signatures (wrong
//! length, bad `v`, malleable high-`s`, points that do not recover) are errors rather than "some
//! other signer", mirroring OpenZeppelin's `ECDSA.recover`.

use alloy_primitives::{keccak256, uint, Address, Bytes, B256, U256};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};

/// Length of a serialized `r || s || v` signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// Half of the secp256k1 group order. Signatures with a larger `s` are malleable.
pub const SECP256K1N_HALF: U256 =
    uint!(0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256);

/// Errors raised when a signature cannot be turned into a signer address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// The signature is not 65 bytes long.
    #[error("invalid signature length {0}, expected 65")]
    InvalidLength(usize),
    /// The recovery byte is neither 27 nor 28.
    #[error("invalid signature recovery byte {0}")]
    InvalidRecoveryByte(u8),
    /// The `s` value lies in the upper half of the curve order.
    #[error("malleable signature with high s {0}")]
    HighS(B256),
    /// No public key can be recovered from the signature.
    #[error("signature does not recover to a public key")]
    Unrecoverable,
    /// Signing with a private key failed.
    #[error("failed to sign: {0}")]
    Signing(String),
}

/// Recovers the address that signed `hash`.
pub fn recover_signer(hash: &B256, signature: &[u8]) -> Result<Address, SignatureError> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(SignatureError::InvalidLength(signature.len()));
    }

    let s = B256::from_slice(&signature[32..64]);
    if U256::from_be_bytes(s.0) > SECP256K1N_HALF {
        return Err(SignatureError::HighS(s));
    }

    let v = signature[64];
    if v != 27 && v != 28 {
        return Err(SignatureError::InvalidRecoveryByte(v));
    }
    let recovery_id = RecoveryId::try_from(v - 27).map_err(|_| SignatureError::Unrecoverable)?;

    let signature =
        Signature::from_slice(&signature[..64]).map_err(|_| SignatureError::Unrecoverable)?;
    let recovered_key = VerifyingKey::recover_from_prehash(&hash[..], &signature, recovery_id)
        .map_err(|_| SignatureError::Unrecoverable)?;

    Ok(public_key_to_address(&recovered_key))
}

/// Derives the Ethereum address of a public key: the last 20 bytes of the keccak-256 hash of the
/// uncompressed point without its `0x04` prefix.
pub fn public_key_to_address(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// Returns the address controlled by a private key.
pub fn signer_address(key: &SigningKey) -> Address {
    public_key_to_address(key.verifying_key())
}

/// Signs a prehashed message, producing a 65-byte `r || s || v` signature with low `s`.
pub fn sign_hash(key: &SigningKey, hash: &B256) -> Result<Bytes, SignatureError> {
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(&hash[..])
        .map_err(|err| SignatureError::Signing(err.to_string()))?;

    let mut bytes = Vec::with_capacity(SIGNATURE_LENGTH);
    bytes.extend_from_slice(&signature.to_bytes());
    bytes.push(27 + recovery_id.to_byte());
    Ok(bytes.into())
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, b256};

    use super::*;

    const SECP256K1N: U256 =
        uint!(0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141_U256);

    fn key(byte: u8) -> SigningKey {
        let mut secret = [0u8; 32];
        secret[31] = byte;
        SigningKey::from_slice(&secret).unwrap()
    }

    #[test]
    fn test_signer_address_of_known_key() {
        assert_eq!(signer_address(&key(1)), address!("7E5F4552091A69125d5DfCb7b8C2659029395Bdf"));
    }

    #[test]
    fn test_recover_matches_signer() {
        let hash = b256!("0x1111111111111111111111111111111111111111111111111111111111111111");
        let signature = sign_hash(&key(7), &hash).unwrap();
        assert_eq!(signature.len(), SIGNATURE_LENGTH);
        assert_eq!(recover_signer(&hash, &signature), Ok(signer_address(&key(7))));

        let other = b256!("0x2222222222222222222222222222222222222222222222222222222222222222");
        assert_ne!(recover_signer(&other, &signature), Ok(signer_address(&key(7))));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let hash = B256::repeat_byte(1);
        assert_eq!(recover_signer(&hash, &[0u8; 64]), Err(SignatureError::InvalidLength(64)));
        assert_eq!(recover_signer(&hash, &[]), Err(SignatureError::InvalidLength(0)));
    }

    #[test]
    fn test_rejects_bad_recovery_byte() {
        let hash = B256::repeat_byte(1);
        let mut signature = sign_hash(&key(3), &hash).unwrap().to_vec();
        signature[64] = 1;
        assert_eq!(recover_signer(&hash, &signature), Err(SignatureError::InvalidRecoveryByte(1)));
    }

    #[test]
    fn test_rejects_malleable_high_s() {
        let hash = B256::repeat_byte(5);
        let mut signature = sign_hash(&key(9), &hash).unwrap().to_vec();

        // (r, n - s, v ^ 1) is the same signature mirrored into the upper half.
        let s = U256::from_be_slice(&signature[32..64]);
        let high_s = SECP256K1N - s;
        signature[32..64].copy_from_slice(&high_s.to_be_bytes::<32>());
        signature[64] = if signature[64] == 27 { 28 } else { 27 };

        assert_eq!(
            recover_signer(&hash, &signature),
            Err(SignatureError::HighS(B256::from(high_s.to_be_bytes::<32>())))
        );
    }

    #[test]
    fn test_rejects_zero_r() {
        let mut signature = [0u8; SIGNATURE_LENGTH];
        signature[63] = 1;
        signature[64] = 27;
        assert_eq!(
            recover_signer(&B256::repeat_byte(1), &signature),
            Err(SignatureError::Unrecoverable)
        );
    }
}
