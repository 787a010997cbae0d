//! Digest derivation for address payloads.
//!
//! Each dialect descriptor names the hash that turns a public key (or other
//! preimage) into the fixed-length payload the address carries. Hashing is
//! conditional: the codec only calls [`HashKind::digest`] when the supplied
//! input is not already of the payload length.

use blake2::Blake2b;
use blake2::digest::consts::U20;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use sha3::{Keccak256, Sha3_256};

type Blake2b160 = Blake2b<U20>;

/// How an address payload is derived from the caller's input bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashKind {
    /// RIPEMD-160 of SHA-256, the classic Bitcoin HASH160 (20 bytes).
    Hash160,
    /// BLAKE2b with a 20-byte output.
    Blake2b160,
    /// Plain RIPEMD-160 (20 bytes).
    Ripemd160,
    /// RIPEMD-160 of the 32-byte Keccak-256 digest (20 bytes).
    Keccak256Ripemd160,
    /// RIPEMD-160 of the 32-byte SHA3-256 digest (20 bytes).
    Sha3_256Ripemd160,
    /// Full 32-byte Keccak-256 digest, no truncation.
    Keccak256,
    /// The last 20 of the 32 SHA3-256 bytes (the leading 12 are dropped).
    Sha3_256Last20,
    /// The input is already the payload; nothing can be derived from a
    /// mis-sized input.
    None,
}

impl HashKind {
    /// Derives the payload digest, or `None` for [`HashKind::None`].
    #[must_use]
    pub fn digest(self, data: &[u8]) -> Option<Vec<u8>> {
        match self {
            HashKind::Hash160 => Some(Ripemd160::digest(Sha256::digest(data)).to_vec()),
            HashKind::Blake2b160 => Some(Blake2b160::digest(data).to_vec()),
            HashKind::Ripemd160 => Some(Ripemd160::digest(data).to_vec()),
            HashKind::Keccak256Ripemd160 => {
                Some(Ripemd160::digest(Keccak256::digest(data)).to_vec())
            }
            HashKind::Sha3_256Ripemd160 => {
                Some(Ripemd160::digest(Sha3_256::digest(data)).to_vec())
            }
            HashKind::Keccak256 => Some(Keccak256::digest(data).to_vec()),
            HashKind::Sha3_256Last20 => Some(Sha3_256::digest(data)[12..].to_vec()),
            HashKind::None => None,
        }
    }
}
