use crate::errors::{ViewError, ViewResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Length of an account or contract address in bytes
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte account or contract address.
///
/// Parsing accepts any letter case after the `0x` prefix, so two addresses
/// compare equal regardless of how the wallet or contract capitalised them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Abbreviated form used in headers and badges: `0x1234...abcd`
    pub fn short(&self) -> String {
        let full = self.to_string();
        format!("{}...{}", &full[..6], &full[full.len() - 4..])
    }
}

impl FromStr for Address {
    type Err = ViewError;

    fn from_str(s: &str) -> ViewResult<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| ViewError::InvalidAddress(format!("missing 0x prefix: {}", s)))?;

        let bytes = hex::decode(digits)
            .map_err(|e| ViewError::InvalidAddress(format!("{}: {}", s, e)))?;
        let bytes: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|b: Vec<u8>| {
            ViewError::InvalidAddress(format!(
                "expected {} bytes, got {}: {}",
                ADDRESS_LEN,
                b.len(),
                s
            ))
        })?;

        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HARDHAT_0: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_parse_is_case_insensitive() {
        let mixed = Address::from_str(HARDHAT_0).unwrap();
        let lower = Address::from_str(&HARDHAT_0.to_lowercase()).unwrap();
        let upper = Address::from_str(&format!("0x{}", HARDHAT_0[2..].to_uppercase())).unwrap();

        assert_eq!(mixed, lower);
        assert_eq!(mixed, upper);
        assert_eq!(mixed.to_string(), HARDHAT_0.to_lowercase());
    }

    #[test]
    fn test_short_form() {
        let address = Address::from_str(HARDHAT_0).unwrap();
        assert_eq!(address.short(), "0xf39f...2266");
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        assert!(Address::from_str("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266").is_err());
        assert!(Address::from_str("0x1234").is_err());
        assert!(Address::from_str("0xzz9Fd6e51aad88F6F4ce6aB8827279cffFb92266").is_err());
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let address = Address::from_str(HARDHAT_0).unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", HARDHAT_0.to_lowercase()));

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
