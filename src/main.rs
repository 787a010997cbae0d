use coin_address::{
    AddressDecodeError, AddressEncodeError, btc_mainnet_p2pkh, decode_address, encode_address,
    eth_mainnet, icx_mainnet,
};

fn main() {
    let pubkey = match hex::decode(
        "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
    ) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Invalid demo key: {e}");
            std::process::exit(1);
        }
    };

    let btc = match encode_address(&pubkey, &btc_mainnet_p2pkh()) {
        Ok(addr) => addr,
        Err(AddressEncodeError::InvalidHashLength { got, expected }) => {
            eprintln!("Invalid digest length: got {got}, expected {expected}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Encoding error: {e}");
            std::process::exit(1);
        }
    };
    println!("BTC P2PKH address   : {btc}");

    match encode_address(&pubkey, &icx_mainnet()) {
        Ok(addr) => println!("ICX address         : {addr}"),
        Err(e) => eprintln!("Encoding error: {e}"),
    }

    match decode_address(&btc, &btc_mainnet_p2pkh()) {
        Ok(payload) => println!("Decoded HASH160     : {}", hex::encode(payload)),

        // The text cannot be an address of this dialect
        Err(AddressDecodeError::InvalidAddress) => {
            eprintln!("Invalid address");
        }
        // Well-formed text, wrong payload width for the dialect
        Err(AddressDecodeError::InvalidHashLength) => {
            eprintln!("Invalid hash length");
        }
        // Malformed hex in a prefixed-hex address
        Err(AddressDecodeError::Hex(e)) => {
            eprintln!("Hex decoding error: {e}");
        }
    }

    // Feeding a Base58Check address to the EIP-55 dialect fails closed.
    match decode_address(&btc, &eth_mainnet()) {
        Ok(_) => eprintln!("unexpected cross-dialect decode"),
        Err(e) => println!("Cross-dialect decode: {e}"),
    }
}
