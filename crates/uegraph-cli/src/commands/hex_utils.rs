//! Hex address parsing utilities.

use anyhow::Result;
use uegraph_core::Address;

/// Parse a hex address string (with or without 0x prefix).
pub fn parse_hex_address(s: &str) -> Result<Address> {
    let digits = s.trim().trim_start_matches("0x").trim_start_matches("0X");
    let value = u64::from_str_radix(digits, 16)
        .map_err(|e| anyhow::anyhow!("Invalid hex address {:?}: {}", s, e))?;
    Ok(Address::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_address_with_prefix() {
        assert_eq!(parse_hex_address("0x1000").unwrap(), Address::new(0x1000));
        assert_eq!(parse_hex_address("0X1000").unwrap(), Address::new(0x1000));
    }

    #[test]
    fn test_parse_hex_address_without_prefix() {
        assert_eq!(parse_hex_address("1000").unwrap(), Address::new(0x1000));
        assert_eq!(
            parse_hex_address("DEADBEEF").unwrap(),
            Address::new(0xDEADBEEF)
        );
    }

    #[test]
    fn test_parse_hex_address_large() {
        assert_eq!(
            parse_hex_address("0x7FF6A0B1C2D0").unwrap(),
            Address::new(0x7FF6A0B1C2D0)
        );
    }

    #[test]
    fn test_parse_hex_address_invalid() {
        assert!(parse_hex_address("GHIJK").is_err());
        assert!(parse_hex_address("0xZZZ").is_err());
        assert!(parse_hex_address("").is_err());
    }
}
