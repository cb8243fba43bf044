//! Address parsing and validation for TON account addresses
//!
//! Two textual forms are accepted:
//! - raw: `<workchain>:<64 hex chars>`, e.g. `0:83df...`
//! - user-friendly: 48 characters of standard or URL-safe base64 encoding
//!   `tag | workchain | 32-byte hash | crc16`
//!
//! Only structure and checksum are verified here. The wallet daemon does the
//! full conversion when it builds the outbound messages.

use crate::error::{Error, Result};
use base64::Engine;
use std::fmt;
use std::str::FromStr;

const TAG_BOUNCEABLE: u8 = 0x11;
const TAG_NON_BOUNCEABLE: u8 = 0x51;
const TAG_TESTNET: u8 = 0x80;
const USER_FRIENDLY_LEN: usize = 48;
const USER_FRIENDLY_BYTES: usize = 36;

/// Address format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFormat {
    Raw,
    Bounceable,
    NonBounceable,
}

/// A structurally valid TON address
///
/// Keeps the caller's original text, which is what gets forwarded to the
/// wallet daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TonAddress {
    text: String,
    workchain: i8,
    hash: [u8; 32],
    format: AddressFormat,
    testnet: bool,
}

impl TonAddress {
    pub fn workchain(&self) -> i8 {
        self.workchain
    }

    pub fn hash(&self) -> &[u8; 32] {
        &self.hash
    }

    pub fn format(&self) -> AddressFormat {
        self.format
    }

    pub fn is_testnet(&self) -> bool {
        self.testnet
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Raw `<workchain>:<hex>` rendering
    pub fn to_raw(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash))
    }
}

impl fmt::Display for TonAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for TonAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_address(s)
    }
}

/// Parse and validate a TON address in raw or user-friendly form
pub fn parse_address(address: &str) -> Result<TonAddress> {
    if address.contains(':') {
        parse_raw(address)
    } else {
        parse_user_friendly(address)
    }
}

/// Validate an address format without keeping the parsed value
pub fn is_valid_address(address: &str) -> bool {
    parse_address(address).is_ok()
}

fn parse_raw(address: &str) -> Result<TonAddress> {
    let (wc, hash_hex) = address
        .split_once(':')
        .ok_or_else(|| Error::InvalidAddress(address.to_string()))?;

    let workchain = wc
        .parse::<i8>()
        .map_err(|e| Error::InvalidAddress(format!("{}: bad workchain: {}", address, e)))?;

    let mut hash = [0u8; 32];
    hex::decode_to_slice(hash_hex, &mut hash)
        .map_err(|e| Error::InvalidAddress(format!("{}: bad account id: {}", address, e)))?;

    Ok(TonAddress {
        text: address.to_string(),
        workchain,
        hash,
        format: AddressFormat::Raw,
        testnet: false,
    })
}

fn parse_user_friendly(address: &str) -> Result<TonAddress> {
    if address.len() != USER_FRIENDLY_LEN {
        return Err(Error::InvalidAddress(format!(
            "{}: expected {} characters, got {}",
            address,
            USER_FRIENDLY_LEN,
            address.len()
        )));
    }

    // Accept both alphabets by normalizing to standard base64
    let normalized: String = address
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let data = base64::engine::general_purpose::STANDARD
        .decode(normalized)
        .map_err(|e| Error::InvalidAddress(format!("{}: {}", address, e)))?;
    if data.len() != USER_FRIENDLY_BYTES {
        return Err(Error::InvalidAddress(format!(
            "{}: decoded to {} bytes",
            address,
            data.len()
        )));
    }

    let expected = u16::from_be_bytes([data[34], data[35]]);
    if crc16(&data[..34]) != expected {
        return Err(Error::InvalidAddress(format!("{}: checksum mismatch", address)));
    }

    let tag = data[0];
    let testnet = tag & TAG_TESTNET != 0;
    let format = match tag & !TAG_TESTNET {
        TAG_BOUNCEABLE => AddressFormat::Bounceable,
        TAG_NON_BOUNCEABLE => AddressFormat::NonBounceable,
        other => {
            return Err(Error::InvalidAddress(format!(
                "{}: unknown tag 0x{:02x}",
                address, other
            )))
        }
    };

    let mut hash = [0u8; 32];
    hash.copy_from_slice(&data[2..34]);

    Ok(TonAddress {
        text: address.to_string(),
        workchain: data[1] as i8,
        hash,
        format,
        testnet,
    })
}

/// CRC-16/XMODEM, the checksum appended to user-friendly addresses
fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc16_check_value() {
        assert_eq!(crc16(b"123456789"), 0x31c3);
    }

    #[test]
    fn test_user_friendly_address() {
        let addr = parse_address("EQCD39VS5jcptHL8vMjEXrzGaRcCVYto7HUn4bpAOg8xqB2N").unwrap();
        assert_eq!(addr.workchain(), 0);
        assert_eq!(addr.format(), AddressFormat::Bounceable);
        assert!(!addr.is_testnet());
        assert_eq!(
            addr.to_raw(),
            "0:83dfd552e63729b472fcbcc8c45ebcc6691702558b68ec7527e1ba403a0f31a8"
        );
    }

    #[test]
    fn test_non_bounceable_and_masterchain() {
        let addr = parse_address("UQCrq6urq6urq6urq6urq6urq6urq6urq6urq6urq6urq5jh").unwrap();
        assert_eq!(addr.format(), AddressFormat::NonBounceable);
        assert_eq!(addr.hash(), &[0xab; 32]);

        let addr = parse_address("Ef8BAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBATKr").unwrap();
        assert_eq!(addr.workchain(), -1);
    }

    #[test]
    fn test_raw_address() {
        let raw = "-1:0101010101010101010101010101010101010101010101010101010101010101";
        let addr = parse_address(raw).unwrap();
        assert_eq!(addr.workchain(), -1);
        assert_eq!(addr.format(), AddressFormat::Raw);
        assert_eq!(addr.to_raw(), raw);
        assert_eq!(addr.as_str(), raw);
    }

    #[test]
    fn test_invalid_addresses() {
        // flipped last character breaks the checksum
        assert!(!is_valid_address("EQCD39VS5jcptHL8vMjEXrzGaRcCVYto7HUn4bpAOg8xqB2O"));
        assert!(!is_valid_address("EQCD39VS5jcptHL8vMjEXrzGaRcCVYto7HUn4bpAOg8xqB2"));
        assert!(!is_valid_address("A"));
        assert!(!is_valid_address("0:abcd"));
        assert!(!is_valid_address("x:0101010101010101010101010101010101010101010101010101010101010101"));
        assert!(matches!(parse_address(""), Err(Error::InvalidAddress(_))));
    }
}
