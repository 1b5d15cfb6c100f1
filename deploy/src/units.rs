//! Decimal amount parsing into base units.

use crate::error::{Error, Result};

/// Decimals of every token these scripts deal with.
pub const ETHER_DECIMALS: u32 = 18;

/// Parse a decimal string such as `"1000"` or `"0.25"` into base units with
/// `decimals` fractional digits.
pub fn parse_units(value: &str, decimals: u32) -> Result<u128> {
    let invalid = || Error::InvalidAmount(value.to_string());

    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (value, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid())
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid())
    }
    if fraction.len() > decimals as usize {
        return Err(invalid())
    }

    let scale = 10u128.checked_pow(decimals).ok_or_else(invalid)?;
    let whole = if whole.is_empty() { 0 } else { whole.parse::<u128>().map_err(|_| invalid())? };
    let fraction = if fraction.is_empty() {
        0
    } else {
        let padding = 10u128.pow(decimals - fraction.len() as u32);
        fraction.parse::<u128>().map_err(|_| invalid())? * padding
    };

    whole.checked_mul(scale).and_then(|v| v.checked_add(fraction)).ok_or_else(invalid)
}

pub fn parse_ether(value: &str) -> Result<u128> {
    parse_units(value, ETHER_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn whole_amounts() {
        assert_eq!(parse_ether("100000").unwrap(), 100_000 * ONE);
        assert_eq!(parse_ether("1000").unwrap(), 1_000 * ONE);
        assert_eq!(parse_ether("0").unwrap(), 0);
    }

    #[test]
    fn fractional_amounts() {
        assert_eq!(parse_ether("0.25").unwrap(), ONE / 4);
        assert_eq!(parse_ether(".5").unwrap(), ONE / 2);
        assert_eq!(parse_units("1.5", 6).unwrap(), 1_500_000);
        assert_eq!(parse_units("2.", 6).unwrap(), 2_000_000);
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", ".", "1e18", "-1", "1.2.3", "0.0000001"] {
            assert!(parse_units(bad, 6).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn rejects_overflow() {
        assert!(parse_ether("340282366920938463464").is_err());
    }
}
