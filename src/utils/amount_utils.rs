//! Exact decimal amount scaling
//!
//! Converts human-readable decimal strings ("1.5") into integer smallest-unit
//! values (1.5 ether = 1500000000000000000 wei) without ever going through
//! floating point. Inputs with more fractional digits than the unit supports
//! are rejected instead of truncated.

use alloy::primitives::{utils::format_units, U256};

use crate::errors::EncodingError;

fn invalid(amount: &str, reason: &str) -> EncodingError {
    EncodingError::InvalidAmount {
        amount: amount.to_string(),
        reason: reason.to_string(),
    }
}

/// Scale a non-negative decimal string by `10^decimals`
///
/// Accepted forms are `digits` and `digits.digits`. Trailing zeros in the
/// fractional part do not count against `decimals`.
///
/// # Arguments
/// * `amount` - Decimal string in whole units
/// * `decimals` - Decimal places of the unit (18 for ether)
///
/// # Returns
/// * `Ok(U256)` - Exact amount in the smallest unit
/// * `Err(EncodingError)` - Malformed input, excess precision or overflow
///
/// # Example
/// ```
/// use delegated_multicall::utils::amount_utils::parse_amount;
/// use alloy::primitives::U256;
///
/// let wei = parse_amount("1.5", 18).unwrap();
/// assert_eq!(wei, U256::from(1_500_000_000_000_000_000u64));
/// ```
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, EncodingError> {
    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (amount, None),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(amount, "expected digits before the decimal point"));
    }
    let fraction = match fraction {
        Some(f) if f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()) => {
            return Err(invalid(amount, "expected digits after the decimal point"));
        }
        Some(f) => f.trim_end_matches('0'),
        None => "",
    };
    if fraction.len() > decimals as usize {
        return Err(EncodingError::ExcessPrecision {
            amount: amount.to_string(),
            decimals,
        });
    }

    let overflow = || EncodingError::Overflow {
        amount: amount.to_string(),
    };
    let digits = format!("{whole}{fraction}");
    let mantissa = U256::from_str_radix(&digits, 10).map_err(|_| overflow())?;
    let scale = U256::from(10u8)
        .checked_pow(U256::from(decimals as usize - fraction.len()))
        .ok_or_else(overflow)?;

    mantissa.checked_mul(scale).ok_or_else(overflow)
}

/// Render a smallest-unit amount in whole units for display
pub fn format_amount(value: U256, decimals: u8) -> String {
    format_units(value, decimals).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_scaling() {
        let cases: [(&str, u8, U256); 8] = [
            ("1.5", 18, U256::from(1_500_000_000_000_000_000u64)),
            ("1", 18, U256::from(1_000_000_000_000_000_000u64)),
            ("1.0", 18, U256::from(1_000_000_000_000_000_000u64)),
            ("0.1", 18, U256::from(100_000_000_000_000_000u64)),
            ("0.000000000000000001", 18, U256::from(1u64)),
            ("123.456", 6, U256::from(123_456_000u64)),
            ("1.50", 1, U256::from(15u64)),
            ("0", 0, U256::ZERO),
        ];

        for (amount, decimals, expected) in cases {
            assert_eq!(parse_amount(amount, decimals).unwrap(), expected, "{amount} @ {decimals}");
        }
    }

    #[test]
    fn test_no_float_drift() {
        // 0.1 + 0.2 style values that are inexact in binary floating point
        assert_eq!(
            parse_amount("0.3", 18).unwrap(),
            U256::from(300_000_000_000_000_000u64)
        );
        assert_eq!(
            parse_amount("12345678901234567.123456789012345678", 18).unwrap(),
            U256::from_str_radix("12345678901234567123456789012345678", 10).unwrap()
        );
    }

    #[test]
    fn test_malformed_amounts() {
        for amount in ["", ".5", "1.", "-1", "+1", "1e18", " 1", "1,5", "1.2.3", "abc", "0x10"] {
            assert!(
                matches!(parse_amount(amount, 18), Err(EncodingError::InvalidAmount { .. })),
                "accepted {amount:?}"
            );
        }
    }

    #[test]
    fn test_excess_precision() {
        assert!(matches!(
            parse_amount("1.0000000000000000001", 18),
            Err(EncodingError::ExcessPrecision { decimals: 18, .. })
        ));
        assert!(matches!(
            parse_amount("0.5", 0),
            Err(EncodingError::ExcessPrecision { decimals: 0, .. })
        ));
    }

    #[test]
    fn test_overflow() {
        let max = U256::MAX.to_string();
        assert_eq!(parse_amount(&max, 0).unwrap(), U256::MAX);
        assert!(matches!(parse_amount(&max, 1), Err(EncodingError::Overflow { .. })));

        let too_big = format!("{max}0");
        assert!(matches!(parse_amount(&too_big, 0), Err(EncodingError::Overflow { .. })));
    }

    #[test]
    fn test_format_amount() {
        let wei = parse_amount("0.2", 18).unwrap();
        assert_eq!(format_amount(wei, 18), "0.200000000000000000");
    }
}
