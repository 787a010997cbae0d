//! EIP-55 mixed-case hex codec.
//!
//! The casing of the hex digits doubles as the checksum: a digit is
//! uppercased exactly when the corresponding nibble of the Keccak-256 digest
//! of the lowercase hex string is `>= 8`. Decoding is strict and rejects any
//! casing that does not match the recomputed form.

use sha3::{Digest, Keccak256};
use thiserror::Error;

/// Byte length of the account payload the dialect carries.
pub const PAYLOAD_LENGTH: usize = 20;

const HEX_LENGTH: usize = 2 * PAYLOAD_LENGTH;

/// Errors surfaced by [`decode`].
#[derive(Error, Debug, PartialEq)]
pub enum Eip55Error {
    /// The address does not start with the literal `0x`.
    #[error("missing 0x prefix")]
    MissingPrefix,

    /// The hex body is not exactly 40 characters.
    #[error("expected {HEX_LENGTH} hex characters, got {0}")]
    InvalidLength(usize),

    /// The body contains a non-hex character.
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),

    /// The mixed-case form does not match the recomputed checksum casing.
    #[error("checksum casing mismatch")]
    ChecksumMismatch,
}

/// Encodes a 20-byte payload as a `0x`-prefixed EIP-55 mixed-case string.
#[must_use]
pub fn encode(payload: &[u8; PAYLOAD_LENGTH]) -> String {
    let lower = hex::encode(payload);
    let digest = hex::encode(Keccak256::digest(lower.as_bytes()));
    let mut out = String::with_capacity(2 + HEX_LENGTH);
    out.push_str("0x");
    for (ch, nibble) in lower.bytes().zip(digest.bytes()) {
        if ch.is_ascii_alphabetic() && nibble >= b'8' {
            out.push(ch.to_ascii_uppercase() as char);
        } else {
            out.push(ch as char);
        }
    }
    out
}

/// Decodes and verifies an EIP-55 address, returning the 20-byte payload.
///
/// # Errors
/// Fails on a missing `0x` prefix, a body that is not 40 hex characters, or
/// casing that differs from the canonical mixed-case form.
pub fn decode(address: &str) -> Result<[u8; PAYLOAD_LENGTH], Eip55Error> {
    let body = address
        .strip_prefix("0x")
        .ok_or(Eip55Error::MissingPrefix)?;
    if body.len() != HEX_LENGTH {
        return Err(Eip55Error::InvalidLength(body.len()));
    }

    let mut payload = [0u8; PAYLOAD_LENGTH];
    hex::decode_to_slice(body.to_ascii_lowercase(), &mut payload)?;

    if encode(&payload) != address {
        return Err(Eip55Error::ChecksumMismatch);
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Canonical mixed-case vectors from the EIP-55 specification.
    const VECTORS: [&str; 4] = [
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn canonical_vectors_roundtrip() {
        for addr in VECTORS {
            let payload = decode(addr).expect("canonical vector decodes");
            assert_eq!(encode(&payload), addr);
        }
    }

    #[test]
    fn casing_is_deterministic() {
        let payload = decode(VECTORS[0]).unwrap();
        assert_eq!(encode(&payload), encode(&payload));
    }

    #[test]
    fn rejects_flattened_casing() {
        let lowered = VECTORS[0].to_ascii_lowercase();
        assert_eq!(decode(&lowered), Err(Eip55Error::ChecksumMismatch));
    }

    #[test]
    fn rejects_single_swapped_case() {
        // 'A' at index 4 of the first vector flipped to 'a'.
        let mut s = VECTORS[0].to_string();
        s.replace_range(4..5, "a");
        assert_eq!(decode(&s), Err(Eip55Error::ChecksumMismatch));
    }

    #[test]
    fn rejects_uppercase_prefix() {
        let swapped = VECTORS[0].replacen("0x", "0X", 1);
        assert_eq!(decode(&swapped), Err(Eip55Error::MissingPrefix));
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            decode("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAe"),
            Err(Eip55Error::InvalidLength(39))
        );
        assert_eq!(decode("0x"), Err(Eip55Error::InvalidLength(0)));
    }

    #[test]
    fn rejects_non_hex_body() {
        let s = "0xzz20a0cf47c7b9be7a2e6ba89f429762e7b9adb0";
        assert!(matches!(decode(s), Err(Eip55Error::Hex(_))));
    }
}
