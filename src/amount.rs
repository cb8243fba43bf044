//! Decimal TON amount parsing
//!
//! Amounts arrive as decimal strings (`"1.5"`) and are converted to nanotons
//! with integer arithmetic only. Every entry is scaled on its own and the
//! resulting integers are summed, so a batch of many small amounts can never
//! drift across a balance boundary the way a float accumulator would.

use crate::error::{Error, Result};
use crate::types::NANOTONS_PER_TON;

/// Number of fractional digits carried by the chain's base unit
pub const DECIMALS: usize = 9;

/// Parse a non-negative decimal TON amount into nanotons
///
/// # Example
/// ```
/// use ton_batch_sender::amount::parse_amount;
///
/// assert_eq!(parse_amount("1.5").unwrap(), 1_500_000_000);
/// assert_eq!(parse_amount("0.000000001").unwrap(), 1);
/// assert!(parse_amount("-1").is_err());
/// ```
pub fn parse_amount(input: &str) -> Result<u64> {
    let s = input.trim();
    let invalid = |reason: &str| Error::InvalidAmount(format!("{:?}: {}", input, reason));

    let (whole, frac) = match s.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (s, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(invalid("not a decimal number"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("not a non-negative decimal number"));
    }
    if frac.len() > DECIMALS {
        return Err(invalid("more than 9 fractional digits"));
    }

    let whole_units = if whole.is_empty() {
        0
    } else {
        whole.parse::<u64>().map_err(|_| invalid("amount too large"))?
    };
    let frac_units = if frac.is_empty() {
        0
    } else {
        // Right-pad to nine digits: "5" -> 500000000
        format!("{:0<width$}", frac, width = DECIMALS)
            .parse::<u64>()
            .map_err(|_| invalid("not a decimal number"))?
    };

    whole_units
        .checked_mul(NANOTONS_PER_TON)
        .and_then(|units| units.checked_add(frac_units))
        .ok_or_else(|| invalid("amount too large"))
}

/// Sum nanoton amounts, failing instead of wrapping on overflow
pub fn total_amount<I>(amounts: I) -> Result<u64>
where
    I: IntoIterator<Item = u64>,
{
    amounts.into_iter().try_fold(0u64, |acc, amount| {
        acc.checked_add(amount)
            .ok_or_else(|| Error::InvalidAmount("total amount overflows u64".to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(parse_amount("0").unwrap(), 0);
        assert_eq!(parse_amount("1").unwrap(), 1_000_000_000);
        assert_eq!(parse_amount("2.5").unwrap(), 2_500_000_000);
        assert_eq!(parse_amount("0.123456789").unwrap(), 123_456_789);
        assert_eq!(parse_amount(".5").unwrap(), 500_000_000);
        assert_eq!(parse_amount("5.").unwrap(), 5_000_000_000);
        assert_eq!(parse_amount(" 3 ").unwrap(), 3_000_000_000);
    }

    #[test]
    fn test_parse_rejects_invalid_input() {
        for bad in ["", ".", "-1", "+1", "1.2.3", "abc", "1e9", "1,5", "NaN"] {
            assert!(
                matches!(parse_amount(bad), Err(Error::InvalidAmount(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_rejects_sub_nanoton_precision() {
        assert!(parse_amount("0.0000000001").is_err());
    }

    #[test]
    fn test_parse_overflow() {
        // u64::MAX nanotons is ~18446744073.709551615 TON
        assert_eq!(parse_amount("18446744073.709551615").unwrap(), u64::MAX);
        assert!(parse_amount("18446744073.709551616").is_err());
        assert!(parse_amount("18446744074").is_err());
        assert!(parse_amount("99999999999999999999999").is_err());
    }

    #[test]
    fn test_total_is_exact_for_many_small_amounts() {
        // 0.1 summed ten thousand times as floats is not exactly 1000
        let amounts = (0..10_000).map(|_| parse_amount("0.1").unwrap());
        assert_eq!(total_amount(amounts).unwrap(), 1_000 * NANOTONS_PER_TON);
    }

    #[test]
    fn test_total_overflow() {
        assert!(total_amount([u64::MAX, 1]).is_err());
        assert_eq!(total_amount(std::iter::empty()).unwrap(), 0);
    }
}
