//! EVM address parsing and EIP-55 checksum handling.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};

use crate::error::ValidationError;

/// A 20-byte EVM account address.
///
/// Parsing accepts `0x`-prefixed hex. Mixed-case input must carry a valid
/// EIP-55 checksum; all-lowercase and all-uppercase input is accepted
/// without one. Display renders the checksummed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// Construct from raw bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Lowercase hex form with `0x` prefix.
    pub fn to_lowercase_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// EIP-55 checksummed form with `0x` prefix.
    pub fn to_checksum_hex(&self) -> String {
        checksum_encode(&self.0)
    }
}

impl FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_address(s).ok_or(ValidationError::InvalidRecipient)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_checksum_hex())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

fn parse_address(s: &str) -> Option<Address> {
    let hex_part = s.strip_prefix("0x")?;
    if hex_part.len() != 40 {
        return None;
    }

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(hex_part.to_ascii_lowercase(), &mut bytes).ok()?;

    // Mixed-case input carries an EIP-55 checksum; uniform case does not.
    let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && checksum_encode(&bytes) != s {
        return None;
    }

    Some(Address(bytes))
}

/// Render an address in EIP-55 checksummed form.
///
/// A hex digit is uppercased when the matching nibble of
/// `keccak256(lowercase_hex)` is 8 or above.
fn checksum_encode(bytes: &[u8; 20]) -> String {
    let lower = hex::encode(bytes);

    let mut hasher = Keccak256::new();
    hasher.update(lower.as_bytes());
    let digest = hasher.finalize();

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            digest[i / 2] >> 4
        } else {
            digest[i / 2] & 0x0f
        };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // Checksummed addresses from the EIP-55 test vectors.
    const CHECKSUMMED: [&str; 4] = [
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn test_checksummed_addresses_parse() {
        for addr in CHECKSUMMED {
            let parsed: Address = addr.parse().expect("checksummed address should parse");
            assert_eq!(parsed.to_checksum_hex(), addr);
            assert_eq!(parsed.to_string(), addr);
        }
    }

    #[test]
    fn test_uniform_case_accepted_without_checksum() {
        for addr in CHECKSUMMED {
            let lower = addr.to_lowercase();
            let upper = format!("0x{}", addr[2..].to_uppercase());
            let from_lower: Address = lower.parse().expect("lowercase should parse");
            let from_upper: Address = upper.parse().expect("uppercase should parse");
            assert_eq!(from_lower, from_upper);
            assert_eq!(from_lower.to_checksum_hex(), addr);
        }
    }

    #[test]
    fn test_bad_checksum_rejected() {
        // Flip the case of one letter in a valid checksummed address.
        let bad = "0x5aaeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
        assert_eq!(
            bad.parse::<Address>(),
            Err(ValidationError::InvalidRecipient)
        );
    }

    #[test]
    fn test_malformed_addresses_rejected() {
        for bad in [
            "",
            "0x",
            "5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAe",
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed1",
            "0xZZZeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "not an address",
        ] {
            assert!(bad.parse::<Address>().is_err(), "{:?} should not parse", bad);
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let addr: Address = CHECKSUMMED[0].parse().unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", CHECKSUMMED[0]));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
