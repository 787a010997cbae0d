//! Ready-made descriptors for well-known chains.
//!
//! Nothing here is special: every constructor just fills in the
//! [`AddressFormat`] fields for a dialect that is widely deployed. Callers
//! with an unlisted chain build the descriptor themselves.

use crate::base32poly;
use crate::checksum::ChecksumKind;
use crate::hash::HashKind;
use crate::AddressFormat;

/// Bitcoin mainnet pay-to-pubkey-hash (`1…`).
#[must_use]
pub fn btc_mainnet_p2pkh() -> AddressFormat {
    base58_version_byte(0x00)
}

/// Bitcoin mainnet pay-to-script-hash (`3…`).
#[must_use]
pub fn btc_mainnet_p2sh() -> AddressFormat {
    base58_version_byte(0x05)
}

/// Bitcoin testnet pay-to-pubkey-hash (`m…`/`n…`).
#[must_use]
pub fn btc_testnet_p2pkh() -> AddressFormat {
    base58_version_byte(0x6f)
}

/// Litecoin mainnet pay-to-pubkey-hash (`L…`).
#[must_use]
pub fn ltc_mainnet_p2pkh() -> AddressFormat {
    base58_version_byte(0x30)
}

/// Dogecoin mainnet pay-to-pubkey-hash (`D…`).
#[must_use]
pub fn doge_mainnet_p2pkh() -> AddressFormat {
    base58_version_byte(0x1e)
}

/// Ripple account address (`r…`): Base58Check over the Ripple alphabet.
#[must_use]
pub fn xrp_mainnet() -> AddressFormat {
    AddressFormat::Base58Check {
        hash: HashKind::Hash160,
        hash_len: 20,
        checksum: ChecksumKind::DoubleSha256,
        prefix: vec![0x00],
        suffix: Vec::new(),
        alphabet: bs58::Alphabet::RIPPLE,
    }
}

/// Bitcoin mainnet P2WPKH/P2WSH (`bc1q…`).
#[must_use]
pub fn btc_mainnet_p2wpkh() -> AddressFormat {
    AddressFormat::Bech32 {
        hrp: "bc".to_string(),
        witness_version: 0,
    }
}

/// Bitcoin testnet P2WPKH/P2WSH (`tb1q…`).
#[must_use]
pub fn btc_testnet_p2wpkh() -> AddressFormat {
    AddressFormat::Bech32 {
        hrp: "tb".to_string(),
        witness_version: 0,
    }
}

/// Bitcoin Cash mainnet CashAddr (`bitcoincash:q…`).
#[must_use]
pub fn bch_mainnet_cashaddr() -> AddressFormat {
    AddressFormat::Base32PolyMod {
        hrp: "bitcoincash".to_string(),
        hash: HashKind::Hash160,
        hash_len: 20,
        alphabet: base32poly::CHARSET.to_string(),
    }
}

/// Ethereum mainnet EIP-55 account address (`0x…`).
///
/// The payload is the 20-byte account hash; a mis-sized input is re-hashed
/// with Keccak-256 and rejected for still being 32 bytes wide, so callers
/// derive the account hash themselves (keccak256 of the 64-byte public key,
/// last 20 bytes) before encoding.
#[must_use]
pub fn eth_mainnet() -> AddressFormat {
    AddressFormat::Eip55 {
        hash: HashKind::Keccak256,
    }
}

/// ICON account address (`hx` + 40 lowercase hex characters).
#[must_use]
pub fn icx_mainnet() -> AddressFormat {
    AddressFormat::IcxHex {
        hash: HashKind::Sha3_256Last20,
        address_prefix: "hx".to_string(),
    }
}

fn base58_version_byte(version: u8) -> AddressFormat {
    AddressFormat::Base58Check {
        hash: HashKind::Hash160,
        hash_len: 20,
        checksum: ChecksumKind::DoubleSha256,
        prefix: vec![version],
        suffix: Vec::new(),
        alphabet: bs58::Alphabet::BITCOIN,
    }
}
