/*!
# Ether Amounts

On-chain amounts are integer wei. People type and read ether. This module
converts between the two without going through floating point.
*/

use crate::errors::{ViewError, ViewResult};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Smallest currency unit
pub type Wei = u128;

pub const ETHER_DECIMALS: u32 = 18;
pub const WEI_PER_ETHER: Wei = 1_000_000_000_000_000_000;

/// Parse a user-entered ether amount such as `"0.05"` into wei
pub fn parse_ether(input: &str) -> ViewResult<Wei> {
    let value = Decimal::from_str(input.trim())
        .map_err(|e| ViewError::InvalidAmount(format!("{}: {}", input, e)))?;
    ether_to_wei(value)
}

/// Convert an ether-denominated decimal into wei
pub fn ether_to_wei(value: Decimal) -> ViewResult<Wei> {
    if value < Decimal::ZERO {
        return Err(ViewError::InvalidAmount(format!(
            "negative amount: {}",
            value
        )));
    }

    let value = value.normalize();
    if value.scale() > ETHER_DECIMALS {
        return Err(ViewError::InvalidAmount(format!(
            "more than {} decimal places: {}",
            ETHER_DECIMALS, value
        )));
    }

    let mantissa = value.mantissa() as u128; // non-negative, checked above
    let factor = 10u128.pow(ETHER_DECIMALS - value.scale());
    mantissa
        .checked_mul(factor)
        .ok_or_else(|| ViewError::AmountOverflow(format!("{} ETH", value)))
}

/// Convert wei into an ether-denominated decimal
pub fn wei_to_ether(wei: Wei) -> ViewResult<Decimal> {
    let as_i128 = i128::try_from(wei)
        .map_err(|_| ViewError::AmountOverflow(format!("{} wei", wei)))?;
    Decimal::try_from_i128_with_scale(as_i128, ETHER_DECIMALS)
        .map_err(|e| ViewError::AmountOverflow(format!("{} wei: {}", wei, e)))
}

/// Format wei as ether with a fixed number of decimal places, rounding half up.
///
/// Works in integer space so any `u128` renders, including values beyond the
/// range of [`Decimal`].
pub fn format_ether(wei: Wei, places: u32) -> String {
    let places = places.min(ETHER_DECIMALS);
    let unit = 10u128.pow(ETHER_DECIMALS - places);
    let remainder = wei % unit;
    let mut scaled = wei / unit;
    if remainder >= unit - remainder && unit > 1 {
        scaled += 1;
    }

    let scale = 10u128.pow(places);
    let whole = scaled / scale;
    let fraction = scaled % scale;
    if places == 0 {
        whole.to_string()
    } else {
        format!("{}.{:0width$}", whole, fraction, width = places as usize)
    }
}

/// Format an ether-denominated decimal with a fixed number of places
pub fn format_decimal(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.prec$}", rounded, prec = places as usize)
}

/// Whole reward tokens held (18-decimal token, fraction dropped)
pub fn whole_tokens(amount: Wei) -> u128 {
    amount / WEI_PER_ETHER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ether() {
        assert_eq!(parse_ether("1").unwrap(), WEI_PER_ETHER);
        assert_eq!(parse_ether("0.05").unwrap(), 50_000_000_000_000_000);
        assert_eq!(parse_ether(" 2.5 ").unwrap(), 2_500_000_000_000_000_000);
        assert_eq!(parse_ether("0.000000000000000001").unwrap(), 1);
        assert_eq!(parse_ether("1.500000000000000000000").unwrap(), 1_500_000_000_000_000_000);
    }

    #[test]
    fn test_parse_ether_rejects_bad_input() {
        assert!(matches!(parse_ether("abc"), Err(ViewError::InvalidAmount(_))));
        assert!(matches!(parse_ether("-1"), Err(ViewError::InvalidAmount(_))));
        assert!(matches!(
            parse_ether("0.0000000000000000001"),
            Err(ViewError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_format_ether_rounds_half_up() {
        assert_eq!(format_ether(0, 4), "0.0000");
        assert_eq!(format_ether(WEI_PER_ETHER, 4), "1.0000");
        assert_eq!(format_ether(1_234_550_000_000_000_000, 4), "1.2346");
        assert_eq!(format_ether(1_234_549_999_999_999_999, 4), "1.2345");
        assert_eq!(format_ether(2 * WEI_PER_ETHER / 3, 6), "0.666667");
        assert_eq!(format_ether(7, 18), "0.000000000000000007");
        assert_eq!(format_ether(1_600_000_000_000_000_000, 0), "2");
    }

    #[test]
    fn test_format_ether_handles_values_beyond_decimal_range() {
        let huge = u128::MAX;
        assert!(wei_to_ether(huge).is_err());
        assert!(format_ether(huge, 4).starts_with("340282366920938463463."));
    }

    #[test]
    fn test_wei_to_ether_and_format_decimal() {
        let ether = wei_to_ether(1_500_000_000_000_000_000).unwrap();
        assert_eq!(format_decimal(ether, 4), "1.5000");
        assert_eq!(format_decimal(Decimal::new(12345, 5), 4), "0.1235");
    }

    #[test]
    fn test_whole_tokens_floors() {
        assert_eq!(whole_tokens(0), 0);
        assert_eq!(whole_tokens(WEI_PER_ETHER - 1), 0);
        assert_eq!(whole_tokens(3 * WEI_PER_ETHER + 7), 3);
    }
}
