//! A multi-dialect cryptocurrency address encoder/decoder.
//!
//! This crate supports:
//! - Bitcoin-style Base58Check with arbitrary prefix/suffix framing and a
//!   pluggable 4-byte checksum.
//! - Bech32/Bech32m SegWit addresses per BIP-173/BIP-350.
//! - Polymod-checksummed Base32 (CashAddr family).
//! - Ethereum EIP-55 mixed-case hex.
//! - Prefixed plain-hex addresses (ICON's `hx…`).
//!
//! One descriptor value, [`AddressFormat`], selects the dialect per call;
//! [`encode_address`] and [`decode_address`] are the only entry points.
//! Decoding validates everything it can see (alphabet, checksum, framing
//! bytes, payload length) and fails closed on the first mismatch. It never
//! derives a digest from a public key; that happens on encode only, and only
//! when the input is not already payload-sized.
//!
//! Every operation is a pure function of its arguments. There is no shared
//! state, so concurrent use needs no coordination.

pub mod base32poly;
mod checksum;
pub mod eip55;
mod formats;
mod hash;

pub use checksum::{CHECKSUM_LENGTH, ChecksumKind};
pub use formats::*;
pub use hash::HashKind;

use bech32::{Fe32, Hrp};
use thiserror::Error;

/// Payload width of the prefixed-hex dialect (40 hex characters).
const HEX_PAYLOAD_LENGTH: usize = 20;

/// Witness program lengths a SegWit address may carry on the wire.
const WITNESS_PROGRAM_RANGE: std::ops::RangeInclusive<usize> = 2..=40;

/// Describes one address dialect. Immutable; built once by the caller and
/// passed by reference to every encode/decode call.
///
/// Each variant carries exactly the fields its dialect consults, so a
/// descriptor cannot hold contradictory configuration. Ready-made
/// constructors for common chains live in the crate root (e.g.
/// [`btc_mainnet_p2pkh`], [`eth_mainnet`]).
#[derive(Clone, Debug)]
pub enum AddressFormat {
    /// Base58 text over a framed buffer:
    /// `prefix ++ digest ++ suffix ++ checksum`.
    Base58Check {
        /// How the payload digest is derived from an oversized input.
        hash: HashKind,
        /// Expected digest length before framing.
        hash_len: usize,
        /// Checksum over `prefix ++ digest ++ suffix`.
        checksum: ChecksumKind,
        /// Bytes prepended to the digest before checksumming.
        prefix: Vec<u8>,
        /// Bytes appended to the digest before checksumming.
        suffix: Vec<u8>,
        /// Symbol set handed to the Base58 codec.
        alphabet: &'static bs58::Alphabet,
    },

    /// SegWit address: the input bytes are the witness program, passed
    /// through untouched. The checksum algorithm (Bech32 vs Bech32m)
    /// follows the witness version per BIP-350.
    Bech32 {
        /// Human-readable part, e.g. `"bc"`.
        hrp: String,
        /// Witness version, `0..=16`.
        witness_version: u8,
    },

    /// CashAddr-style Base32 with a 40-bit polymod checksum. Version byte,
    /// checksum and bit regrouping are the text codec's own framing.
    Base32PolyMod {
        /// Address prefix, e.g. `"bitcoincash"`.
        hrp: String,
        /// How the payload digest is derived from an oversized input.
        hash: HashKind,
        /// Expected digest length.
        hash_len: usize,
        /// 32-character symbol set.
        alphabet: String,
    },

    /// EIP-55 mixed-case hex over a 20-byte account hash.
    Eip55 {
        /// How the payload digest is derived from an oversized input.
        hash: HashKind,
    },

    /// Literal prefix plus 40 lowercase hex characters (ICON's `hx…`).
    IcxHex {
        /// How the payload digest is derived from an oversized input.
        hash: HashKind,
        /// The literal, case-sensitive address prefix.
        address_prefix: String,
    },
}

/// Errors that can occur during address encoding.
///
/// All of these are configuration or caller defects; a well-formed
/// descriptor fed a payload of the advertised length always encodes.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AddressEncodeError {
    /// The input was not payload-sized and no digest of the right width
    /// could be derived from it.
    #[error("invalid digest length: got {got}, expected {expected}")]
    InvalidHashLength { got: usize, expected: usize },

    /// The descriptor's human-readable part is not a valid Bech32 HRP.
    #[error("invalid human-readable part {0:?}")]
    InvalidHrp(String),

    /// The witness version is outside `0..=16`.
    #[error("witness version must be 0..=16, got {0}")]
    InvalidWitnessVersion(u8),

    /// The witness program length is not encodable for this version.
    #[error("witness program length {0} is not encodable")]
    InvalidWitnessProgram(usize),

    /// The polymod codec rejected the alphabet or payload width.
    #[error(transparent)]
    Polymod(#[from] base32poly::PolymodError),
}

/// Errors that can occur during address decoding.
#[derive(Error, Debug, PartialEq)]
pub enum AddressDecodeError {
    /// The text cannot be a well-formed address of the requested dialect:
    /// bad symbol, bad checksum, bad framing bytes or the wrong prefix.
    #[error("invalid address")]
    InvalidAddress,

    /// The text decoded cleanly but carries a payload of the wrong size
    /// for the requested dialect.
    #[error("invalid hash length")]
    InvalidHashLength,

    /// Pass-through hex failure from the prefixed-hex dialect.
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
}

/// Encodes a digest (or its preimage) as an address of the given dialect.
///
/// For every dialect except [`AddressFormat::Bech32`], an input whose length
/// differs from the descriptor's payload length is first replaced by its
/// digest under the descriptor's hash. Bech32 input is the witness program
/// and is passed through as-is, whatever its length; the program is not a
/// digest this crate derives.
///
/// # Errors
/// Returns an [`AddressEncodeError`] when the descriptor is misconfigured
/// or the input cannot be brought to the payload length.
pub fn encode_address(input: &[u8], format: &AddressFormat) -> Result<String, AddressEncodeError> {
    match format {
        AddressFormat::Bech32 {
            hrp,
            witness_version,
        } => encode_segwit(hrp, *witness_version, input),

        AddressFormat::Base32PolyMod {
            hrp,
            hash,
            hash_len,
            alphabet,
        } => {
            let digest = payload_digest(input, *hash, *hash_len)?;
            Ok(base32poly::encode(hrp, alphabet, &digest)?)
        }

        AddressFormat::Eip55 { hash } => {
            let digest = payload_digest(input, *hash, eip55::PAYLOAD_LENGTH)?;
            let digest: [u8; eip55::PAYLOAD_LENGTH] = digest.as_slice().try_into().map_err(|_| {
                AddressEncodeError::InvalidHashLength {
                    got: digest.len(),
                    expected: eip55::PAYLOAD_LENGTH,
                }
            })?;
            Ok(eip55::encode(&digest))
        }

        AddressFormat::IcxHex {
            hash,
            address_prefix,
        } => {
            let digest = payload_digest(input, *hash, HEX_PAYLOAD_LENGTH)?;
            if digest.len() != HEX_PAYLOAD_LENGTH {
                return Err(AddressEncodeError::InvalidHashLength {
                    got: digest.len(),
                    expected: HEX_PAYLOAD_LENGTH,
                });
            }
            Ok(format!("{address_prefix}{}", hex::encode(digest)))
        }

        AddressFormat::Base58Check {
            hash,
            hash_len,
            checksum,
            prefix,
            suffix,
            alphabet,
        } => {
            let digest = payload_digest(input, *hash, *hash_len)?;
            let mut framed =
                Vec::with_capacity(prefix.len() + digest.len() + suffix.len() + CHECKSUM_LENGTH);
            framed.extend_from_slice(prefix);
            framed.extend_from_slice(&digest);
            framed.extend_from_slice(suffix);
            let check = checksum.checksum(&framed);
            framed.extend_from_slice(&check);
            Ok(bs58::encode(framed).with_alphabet(alphabet).into_string())
        }
    }
}

/// Decodes an address back to its payload, validating everything on the way.
///
/// Decoding is structural only: it proves the text is a well-formed address
/// of the requested dialect and returns the embedded payload. It does not
/// prove ownership and never re-derives the digest from a public key.
///
/// # Errors
/// - [`AddressDecodeError::InvalidAddress`] on any symbol, checksum,
///   framing or prefix mismatch.
/// - [`AddressDecodeError::InvalidHashLength`] when the decoded payload has
///   the wrong size for the dialect.
/// - [`AddressDecodeError::Hex`] passed through from the prefixed-hex
///   dialect's hex decoder.
pub fn decode_address(
    address: &str,
    format: &AddressFormat,
) -> Result<Vec<u8>, AddressDecodeError> {
    match format {
        AddressFormat::Bech32 {
            hrp,
            witness_version,
        } => {
            let (decoded_hrp, version, program) =
                bech32::segwit::decode(address).map_err(|_| AddressDecodeError::InvalidAddress)?;
            if !decoded_hrp.as_str().eq_ignore_ascii_case(hrp)
                || version.to_u8() != *witness_version
            {
                return Err(AddressDecodeError::InvalidAddress);
            }
            if program.len() != 20 && program.len() != 32 {
                return Err(AddressDecodeError::InvalidHashLength);
            }
            Ok(program)
        }

        AddressFormat::Base32PolyMod {
            hrp,
            hash: _,
            hash_len,
            alphabet,
        } => {
            let payload = base32poly::decode(address, alphabet, hrp)
                .map_err(|_| AddressDecodeError::InvalidAddress)?;
            if payload.len() != *hash_len {
                return Err(AddressDecodeError::InvalidHashLength);
            }
            Ok(payload)
        }

        AddressFormat::Eip55 { hash: _ } => {
            let payload =
                eip55::decode(address).map_err(|_| AddressDecodeError::InvalidAddress)?;
            Ok(payload.to_vec())
        }

        AddressFormat::IcxHex {
            hash: _,
            address_prefix,
        } => {
            let body = address
                .strip_prefix(address_prefix.as_str())
                .ok_or(AddressDecodeError::InvalidAddress)?;
            if body.len() != 2 * HEX_PAYLOAD_LENGTH {
                return Err(AddressDecodeError::InvalidHashLength);
            }
            Ok(hex::decode(body)?)
        }

        AddressFormat::Base58Check {
            hash: _,
            hash_len,
            checksum,
            prefix,
            suffix,
            alphabet,
        } => {
            let decoded = bs58::decode(address)
                .with_alphabet(alphabet)
                .into_vec()
                .map_err(|_| AddressDecodeError::InvalidAddress)?;
            if !checksum.verify(&decoded) {
                return Err(AddressDecodeError::InvalidAddress);
            }
            // Checksum first, then frame recovery on the checksum-less body.
            let body = &decoded[..decoded.len() - CHECKSUM_LENGTH];
            let payload =
                recover_framed(body, prefix, suffix).ok_or(AddressDecodeError::InvalidAddress)?;
            if payload.len() != *hash_len {
                return Err(AddressDecodeError::InvalidHashLength);
            }
            Ok(payload.to_vec())
        }
    }
}

/// Brings the caller's input to payload size, hashing only when needed.
fn payload_digest(
    input: &[u8],
    hash: HashKind,
    hash_len: usize,
) -> Result<Vec<u8>, AddressEncodeError> {
    if input.len() == hash_len {
        return Ok(input.to_vec());
    }
    hash.digest(input)
        .ok_or(AddressEncodeError::InvalidHashLength {
            got: input.len(),
            expected: hash_len,
        })
}

fn encode_segwit(
    hrp: &str,
    witness_version: u8,
    program: &[u8],
) -> Result<String, AddressEncodeError> {
    if witness_version > 16 {
        return Err(AddressEncodeError::InvalidWitnessVersion(witness_version));
    }
    let parsed = Hrp::parse(hrp).map_err(|_| AddressEncodeError::InvalidHrp(hrp.to_string()))?;
    let version = Fe32::try_from(witness_version)
        .map_err(|_| AddressEncodeError::InvalidWitnessVersion(witness_version))?;
    if !WITNESS_PROGRAM_RANGE.contains(&program.len())
        || (witness_version == 0 && program.len() != 20 && program.len() != 32)
    {
        return Err(AddressEncodeError::InvalidWitnessProgram(program.len()));
    }
    bech32::segwit::encode(parsed, version, program)
        .map_err(|_| AddressEncodeError::InvalidWitnessProgram(program.len()))
}

/// Strips `prefix` and `suffix` from a framed body, requiring exact byte
/// matches at both ends.
fn recover_framed<'a>(body: &'a [u8], prefix: &[u8], suffix: &[u8]) -> Option<&'a [u8]> {
    if body.len() < prefix.len() + suffix.len() {
        return None;
    }
    body.strip_prefix(prefix)?.strip_suffix(suffix)
}
