//! Polymod-checksummed Base32 codec (CashAddr family).
//!
//! Structurally close to Bech32 but not compatible with it: the checksum is
//! a 40-bit polymod over five generators producing eight symbols, the prefix
//! is expanded with only the lower 5 bits of each character, and non-zero
//! padding bits are rejected outright to prevent address malleability.
//!
//! The codec owns the whole framing for this dialect: a leading version byte
//! (payload-size bits, reserved bit zero), 8-to-5-bit packing and the
//! trailing checksum symbols. Callers hand it nothing but the raw payload.

use thiserror::Error;

/// The conventional 32-character set shared by CashAddr deployments.
pub const CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Checksum length in 5-bit symbols.
const CHECKSUM_SYMBOLS: usize = 8;

/// Payload sizes representable in the version byte, indexed by size bits.
const PAYLOAD_SIZES: [usize; 8] = [20, 24, 28, 32, 40, 48, 56, 64];

/// Errors surfaced by [`encode`] and [`decode`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PolymodError {
    /// The alphabet is not 32 distinct non-uppercase ASCII characters.
    #[error("alphabet must be 32 distinct lowercase ASCII characters")]
    InvalidAlphabet,

    /// The payload length has no size-bits representation.
    #[error("payload length {0} is not encodable in a version byte")]
    UnsupportedPayloadLength(usize),

    /// Uppercase and lowercase characters were mixed in one address.
    #[error("mixed-case address")]
    MixedCase,

    /// The embedded prefix differs from the expected one.
    #[error("prefix mismatch: expected {expected:?}, got {got:?}")]
    PrefixMismatch { expected: String, got: String },

    /// A character outside the alphabet.
    #[error("invalid character {0:?}")]
    InvalidCharacter(char),

    /// The polymod over prefix, payload and checksum is non-zero.
    #[error("checksum mismatch")]
    Checksum,

    /// Non-zero or oversized padding bits after 5-to-8-bit regrouping.
    #[error("invalid padding bits")]
    Padding,

    /// Too few symbols to contain a checksum and a version byte.
    #[error("payload too short")]
    TooShort,

    /// The version byte disagrees with the decoded payload length.
    #[error("version byte does not match payload length")]
    VersionMismatch,
}

fn polymod(values: &[u8]) -> u64 {
    const GENERATORS: [u64; 5] = [
        0x98f2bc8e61,
        0x79b76d99e2,
        0xf33e5fb3c4,
        0xae2eabe2a8,
        0x1e4f43e470,
    ];

    let mut c: u64 = 1;
    for &d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07ff_ffff_ff) << 5) ^ u64::from(d);
        for (i, generator) in GENERATORS.iter().enumerate() {
            if (c0 >> i) & 1 != 0 {
                c ^= generator;
            }
        }
    }
    c ^ 1
}

/// Lower 5 bits of each prefix character, then a zero separator.
fn expand_prefix(prefix: &str) -> Vec<u8> {
    let mut out: Vec<u8> = prefix.bytes().map(|b| b & 0x1f).collect();
    out.push(0);
    out
}

fn symbol_values(alphabet: &str) -> Result<[i8; 128], PolymodError> {
    let mut table = [-1i8; 128];
    let mut count = 0usize;
    for (i, ch) in alphabet.chars().enumerate() {
        if !ch.is_ascii() || ch.is_ascii_uppercase() {
            return Err(PolymodError::InvalidAlphabet);
        }
        let idx = ch as usize;
        if table[idx] != -1 {
            return Err(PolymodError::InvalidAlphabet);
        }
        table[idx] = i as i8;
        count = i + 1;
    }
    if count != 32 {
        return Err(PolymodError::InvalidAlphabet);
    }
    Ok(table)
}

/// Regroup 8-bit bytes into 5-bit symbols, left-padding the final symbol.
fn bytes_to_symbols(data: &[u8]) -> Vec<u8> {
    let mut acc: u32 = 0;
    let mut bits: u8 = 0;
    let mut out = Vec::with_capacity(data.len() * 8 / 5 + 1);
    for &byte in data {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(((acc >> bits) & 0x1f) as u8);
        }
    }
    if bits > 0 {
        out.push(((acc << (5 - bits)) & 0x1f) as u8);
    }
    out
}

/// Regroup 5-bit symbols into bytes, rejecting non-zero padding.
fn symbols_to_bytes(symbols: &[u8]) -> Result<Vec<u8>, PolymodError> {
    let mut acc: u32 = 0;
    let mut bits: u8 = 0;
    let mut out = Vec::with_capacity(symbols.len() * 5 / 8);
    for &symbol in symbols {
        acc = (acc << 5) | u32::from(symbol);
        bits += 5;
        while bits >= 8 {
            bits -= 8;
            out.push(((acc >> bits) & 0xff) as u8);
        }
    }
    if bits >= 5 || (bits > 0 && (acc << (8 - bits)) & 0xff != 0) {
        return Err(PolymodError::Padding);
    }
    Ok(out)
}

fn size_bits(payload_len: usize) -> Result<u8, PolymodError> {
    PAYLOAD_SIZES
        .iter()
        .position(|&len| len == payload_len)
        .map(|bits| bits as u8)
        .ok_or(PolymodError::UnsupportedPayloadLength(payload_len))
}

/// Encodes `payload` as `prefix:payload-with-checksum`.
///
/// # Errors
/// Fails when the alphabet is malformed or the payload length has no
/// version-byte representation.
pub fn encode(prefix: &str, alphabet: &str, payload: &[u8]) -> Result<String, PolymodError> {
    let chars: Vec<char> = alphabet.chars().collect();
    symbol_values(alphabet)?;

    let version = size_bits(payload.len())?;
    let mut framed = Vec::with_capacity(1 + payload.len());
    framed.push(version);
    framed.extend_from_slice(payload);
    let symbols = bytes_to_symbols(&framed);

    let mut values = expand_prefix(prefix);
    values.extend_from_slice(&symbols);
    values.extend_from_slice(&[0u8; CHECKSUM_SYMBOLS]);
    let checksum = polymod(&values);

    let mut out = String::with_capacity(prefix.len() + 1 + symbols.len() + CHECKSUM_SYMBOLS);
    out.push_str(prefix);
    out.push(':');
    for &symbol in &symbols {
        out.push(chars[symbol as usize]);
    }
    for i in 0..CHECKSUM_SYMBOLS {
        let symbol = ((checksum >> (5 * (CHECKSUM_SYMBOLS - 1 - i))) & 0x1f) as usize;
        out.push(chars[symbol]);
    }
    Ok(out)
}

/// Decodes an address back to its raw payload, verifying the checksum.
///
/// The `prefix:` part may be omitted from the input, in which case
/// `expected_prefix` supplies it for checksum purposes.
///
/// # Errors
/// Fails closed on mixed case, an unexpected prefix, characters outside the
/// alphabet, a non-zero polymod, bad padding bits or a version byte that
/// disagrees with the payload length.
pub fn decode(
    address: &str,
    alphabet: &str,
    expected_prefix: &str,
) -> Result<Vec<u8>, PolymodError> {
    let table = symbol_values(alphabet)?;

    let has_lower = address.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = address.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(PolymodError::MixedCase);
    }
    let address = address.to_ascii_lowercase();
    let expected = expected_prefix.to_ascii_lowercase();

    let (prefix, body) = match address.split_once(':') {
        Some((prefix, body)) => (prefix.to_string(), body.to_string()),
        None => (expected.clone(), address),
    };
    if prefix != expected {
        return Err(PolymodError::PrefixMismatch {
            expected,
            got: prefix,
        });
    }

    let mut symbols = Vec::with_capacity(body.len());
    for ch in body.chars() {
        let value = if ch.is_ascii() { table[ch as usize] } else { -1 };
        if value < 0 {
            return Err(PolymodError::InvalidCharacter(ch));
        }
        symbols.push(value as u8);
    }
    if symbols.len() <= CHECKSUM_SYMBOLS {
        return Err(PolymodError::TooShort);
    }

    let mut values = expand_prefix(&prefix);
    values.extend_from_slice(&symbols);
    if polymod(&values) != 0 {
        return Err(PolymodError::Checksum);
    }

    let framed = symbols_to_bytes(&symbols[..symbols.len() - CHECKSUM_SYMBOLS])?;
    let Some((&version, payload)) = framed.split_first() else {
        return Err(PolymodError::TooShort);
    };
    if version & 0x80 != 0 || size_bits(payload.len())? != version & 0x07 {
        return Err(PolymodError::VersionMismatch);
    }
    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Hash160 behind the well-known CashAddr specification example pair
    // 1BpEi6DfDAUFd7GtittLSdBeYJvcoaVggu / qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a.
    const SPEC_HASH: &str = "76a04053bda0a88bda5177b86a15c3b29f559873";
    const SPEC_ADDRESS: &str = "bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a";

    fn spec_hash() -> Vec<u8> {
        hex::decode(SPEC_HASH).expect("valid hex")
    }

    #[test]
    fn encodes_spec_vector() {
        let addr = encode("bitcoincash", CHARSET, &spec_hash()).unwrap();
        assert_eq!(addr, SPEC_ADDRESS);
    }

    #[test]
    fn decodes_spec_vector() {
        let payload = decode(SPEC_ADDRESS, CHARSET, "bitcoincash").unwrap();
        assert_eq!(payload, spec_hash());
    }

    #[test]
    fn decodes_without_embedded_prefix() {
        let body = SPEC_ADDRESS.split_once(':').unwrap().1;
        let payload = decode(body, CHARSET, "bitcoincash").unwrap();
        assert_eq!(payload, spec_hash());
    }

    #[test]
    fn accepts_uniform_uppercase() {
        let payload = decode(&SPEC_ADDRESS.to_ascii_uppercase(), CHARSET, "bitcoincash").unwrap();
        assert_eq!(payload, spec_hash());
    }

    #[test]
    fn rejects_mixed_case() {
        let mixed = SPEC_ADDRESS.replacen('q', "Q", 1);
        assert_eq!(
            decode(&mixed, CHARSET, "bitcoincash"),
            Err(PolymodError::MixedCase)
        );
    }

    #[test]
    fn rejects_wrong_prefix() {
        assert!(matches!(
            decode(SPEC_ADDRESS, CHARSET, "bchtest"),
            Err(PolymodError::PrefixMismatch { .. })
        ));
    }

    #[test]
    fn rejects_corrupted_symbol() {
        // Swap the final two (distinct) characters: same symbols, new order.
        let mut chars: Vec<char> = SPEC_ADDRESS.chars().collect();
        let n = chars.len();
        assert_ne!(chars[n - 1], chars[n - 2]);
        chars.swap(n - 1, n - 2);
        let tampered: String = chars.into_iter().collect();
        assert_eq!(
            decode(&tampered, CHARSET, "bitcoincash"),
            Err(PolymodError::Checksum)
        );
    }

    #[test]
    fn rejects_character_outside_alphabet() {
        let tampered = SPEC_ADDRESS.replacen('q', "b", 1);
        assert_eq!(
            decode(&tampered, CHARSET, "bitcoincash"),
            Err(PolymodError::InvalidCharacter('b'))
        );
    }

    #[test]
    fn rejects_unsupported_payload_length() {
        assert_eq!(
            encode("bitcoincash", CHARSET, &[0u8; 21]),
            Err(PolymodError::UnsupportedPayloadLength(21))
        );
    }

    #[test]
    fn roundtrips_a_32_byte_payload() {
        let payload: Vec<u8> = (0u8..32).collect();
        let addr = encode("bchtest", CHARSET, &payload).unwrap();
        assert_eq!(decode(&addr, CHARSET, "bchtest").unwrap(), payload);
    }

    #[test]
    fn rejects_malformed_alphabet() {
        assert_eq!(
            encode("bitcoincash", "abc", &spec_hash()),
            Err(PolymodError::InvalidAlphabet)
        );
    }
}
