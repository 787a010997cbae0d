//! Four-byte transcription checksums for framed address dialects.
//!
//! The checksum is always computed over everything that precedes it in the
//! framed buffer and always occupies the trailing four bytes.

use blake2::Blake2b;
use blake2::digest::consts::U32;
use sha2::{Digest, Sha256};
use sha3::{Keccak256, Sha3_256};

type Blake2b256 = Blake2b<U32>;

/// Checksum length in bytes.
pub const CHECKSUM_LENGTH: usize = 4;

/// Which algorithm derives the 4-byte checksum of a framed buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChecksumKind {
    /// First 4 bytes of SHA-256(SHA-256(data)), as in Bitcoin Base58Check.
    DoubleSha256,
    /// First 4 bytes of two sequential 32-byte BLAKE2b passes.
    DoubleBlake256,
    /// First 4 bytes of a single Keccak-256 pass.
    Keccak256,
    /// First 4 bytes of a single SHA3-256 pass.
    Sha3_256,
}

impl ChecksumKind {
    /// Computes the checksum over `data`.
    #[must_use]
    pub fn checksum(self, data: &[u8]) -> [u8; CHECKSUM_LENGTH] {
        let full: [u8; 32] = match self {
            ChecksumKind::DoubleSha256 => Sha256::digest(Sha256::digest(data)).into(),
            ChecksumKind::DoubleBlake256 => Blake2b256::digest(Blake2b256::digest(data)).into(),
            ChecksumKind::Keccak256 => Keccak256::digest(data).into(),
            ChecksumKind::Sha3_256 => Sha3_256::digest(data).into(),
        };
        let mut out = [0u8; CHECKSUM_LENGTH];
        out.copy_from_slice(&full[..CHECKSUM_LENGTH]);
        out
    }

    /// Verifies that the trailing 4 bytes of `data` equal the checksum
    /// recomputed over the preceding bytes. Buffers shorter than the
    /// checksum itself never verify.
    #[must_use]
    pub fn verify(self, data: &[u8]) -> bool {
        if data.len() < CHECKSUM_LENGTH {
            return false;
        }
        let (body, tail) = data.split_at(data.len() - CHECKSUM_LENGTH);
        self.checksum(body).as_slice() == tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_sha256() {
        assert_eq!(
            ChecksumKind::DoubleSha256.checksum(b"hello world"),
            [0xbc, 0x62, 0xd4, 0xb8]
        );
    }

    #[test]
    fn double_blake() {
        assert_eq!(
            ChecksumKind::DoubleBlake256.checksum(b"hello world"),
            [0xa6, 0x70, 0xa7, 0xa2]
        );
    }

    #[test]
    fn keccak() {
        assert_eq!(
            ChecksumKind::Keccak256.checksum(b"hello world"),
            [0x47, 0x17, 0x32, 0x85]
        );
    }

    #[test]
    fn sha3() {
        assert_eq!(
            ChecksumKind::Sha3_256.checksum(b"hello world"),
            [0x64, 0x4b, 0xcc, 0x7e]
        );
    }

    #[test]
    fn verify_accepts_valid_trailer() {
        let mut buf = b"hello world".to_vec();
        buf.extend(ChecksumKind::DoubleSha256.checksum(b"hello world"));
        assert!(ChecksumKind::DoubleSha256.verify(&buf));
    }

    #[test]
    fn verify_rejects_any_flipped_byte() {
        let mut buf = b"hello world".to_vec();
        buf.extend(ChecksumKind::DoubleSha256.checksum(b"hello world"));
        for i in 0..buf.len() {
            let mut tampered = buf.clone();
            tampered[i] ^= 0x01;
            assert!(
                !ChecksumKind::DoubleSha256.verify(&tampered),
                "flip at {i} must fail"
            );
        }
    }

    #[test]
    fn verify_rejects_short_buffers() {
        assert!(!ChecksumKind::DoubleSha256.verify(b""));
        assert!(!ChecksumKind::DoubleSha256.verify(b"abc"));
    }
}
