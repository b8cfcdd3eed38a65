use std::cmp::Ordering;
use std::fmt::{Debug, Display};

/// Errors produced while parsing or converting an [Amount].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Invalid amount: cannot be empty")]
    Empty,
    #[error("Invalid amount: must be a number")]
    NotANumber,
    #[error("Too many decimal places. Maximum allowed: {0}")]
    TooManyDecimals(u8),
    #[error("Amount too large")]
    Overflow,
}

/// Represents an amount of some currency, with optional unit name and decimal places.
///
/// The base value is stored as an integer (u64) in the smallest unit of the
/// currency (e.g. 1 USDT with 6 decimal places is stored as `1_000_000`).
/// Exchange rates are amounts too, so every comparison and conversion in the
/// withdrawal flow is exact. Floating-point values never enter the picture.
#[derive(Clone, Default)]
pub struct Amount {
    value: u64,
    decimal_places: u8,
    unit_name: Option<String>,
}

/// Amounts are equal when they represent the same quantity: `10` at 0 decimal
/// places equals `10.000000` at 6. Unit names are ignored, as in ordering.
impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl Eq for Amount {}

impl PartialOrd for Amount {
    /// Compares the represented quantities, regardless of decimal places.
    ///
    /// Unit names are ignored; callers only compare amounts of the same currency.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let scale = self.decimal_places.max(other.decimal_places);
        let lhs = widen(self.value, scale - self.decimal_places)?;
        let rhs = widen(other.value, scale - other.decimal_places)?;
        Some(lhs.cmp(&rhs))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let amount_str = self.to_string_without_unit();

        match &self.unit_name {
            Some(unit) => write!(f, "{} {}", amount_str, unit),
            None => write!(f, "{}", amount_str),
        }
    }
}

impl Debug for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Amount")
            .field("value", &self.value)
            .field("decimal_places", &self.decimal_places)
            .field("unit_name", &self.unit_name)
            .field("formatted", &self.to_string_without_unit())
            .finish()
    }
}

impl Amount {
    /// Creates a new Amount.
    pub const fn new(value: u64, decimal_places: u8) -> Self {
        Self {
            value,
            decimal_places,
            unit_name: None,
        }
    }

    /// Creates a new Amount with a unit name.
    pub fn new_with_unit(value: u64, decimal_places: u8, unit_name: &str) -> Self {
        Self {
            value,
            decimal_places,
            unit_name: Some(unit_name.to_string()),
        }
    }

    /// Parses a plain decimal string (e.g. `"12.5"`, `".5"`, `"5."`) with the given precision.
    ///
    /// Surrounding whitespace is ignored. Signs, exponents and unit suffixes are rejected.
    pub fn parse_with_decimals(input: &str, decimal_places: u8) -> Result<Self, AmountError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AmountError::Empty);
        }
        let value = Self::parse_numeric_part(input, decimal_places)?;
        Ok(Self::new(value, decimal_places))
    }

    /// Like [Amount::parse_with_decimals], but digits beyond `decimal_places`
    /// are dropped instead of rejected, so `"20.0000001"` at 6 places reads as `20`.
    pub fn parse_rounded_down(input: &str, decimal_places: u8) -> Result<Self, AmountError> {
        let input = input.trim();
        match input.split_once('.') {
            Some((whole, fraction)) if fraction.len() > decimal_places as usize => {
                if !is_plain_digits(fraction) {
                    return Err(AmountError::NotANumber);
                }
                // all ASCII, so slicing on a byte index is safe
                let kept = &fraction[..decimal_places as usize];
                Self::parse_with_decimals(&format!("{}.{}", whole, kept), decimal_places)
            }
            _ => Self::parse_with_decimals(input, decimal_places),
        }
    }

    fn parse_numeric_part(numeric_part: &str, decimal_places: u8) -> Result<u64, AmountError> {
        let (whole_str, fraction_str) = match numeric_part.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (numeric_part, None),
        };

        if whole_str.is_empty() && fraction_str.is_none_or(str::is_empty) {
            return Err(AmountError::NotANumber);
        }
        if !is_plain_digits(whole_str) || !fraction_str.is_none_or(is_plain_digits) {
            return Err(AmountError::NotANumber);
        }

        let whole = if whole_str.is_empty() {
            0
        } else {
            whole_str.parse::<u64>().map_err(|_| AmountError::Overflow)?
        };
        let multiplier = 10u64
            .checked_pow(decimal_places as u32)
            .ok_or(AmountError::Overflow)?;
        let whole_part = whole
            .checked_mul(multiplier)
            .ok_or(AmountError::Overflow)?;

        let fraction_str = fraction_str.unwrap_or_default();
        if fraction_str.is_empty() {
            return Ok(whole_part);
        }

        // Trailing zeros beyond the precision carry no value
        let significant = fraction_str.trim_end_matches('0');
        if significant.len() > decimal_places as usize {
            return Err(AmountError::TooManyDecimals(decimal_places));
        }

        let padded_fraction = format!("{:0<width$}", significant, width = decimal_places as usize);
        let fraction = if padded_fraction.is_empty() {
            0
        } else {
            padded_fraction
                .parse::<u64>()
                .map_err(|_| AmountError::NotANumber)?
        };

        whole_part
            .checked_add(fraction)
            .ok_or(AmountError::Overflow)
    }

    /// Formats an amount as a user-friendly string.
    pub fn format_amount(amount: u64, decimal_places: u8) -> String {
        if decimal_places == 0 {
            return amount.to_string();
        }

        let divisor = 10u64.pow(decimal_places as u32);
        let whole = amount / divisor;
        let fraction = amount % divisor;

        if fraction == 0 {
            whole.to_string()
        } else {
            // Format with the appropriate number of decimal places, removing trailing zeros
            let fraction_str = format!("{:0width$}", fraction, width = decimal_places as usize);
            let trimmed = fraction_str.trim_end_matches('0');
            format!("{}.{}", whole, trimmed)
        }
    }

    /// Returns the number of decimal places.
    pub fn decimal_places(&self) -> u8 {
        self.decimal_places
    }

    /// Returns the value as the smallest unit (without decimal conversion).
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Returns the unit name if set.
    pub fn unit_name(&self) -> Option<&str> {
        self.unit_name.as_deref()
    }

    /// Sets the unit name.
    pub fn with_unit_name(mut self, unit_name: &str) -> Self {
        self.unit_name = Some(unit_name.to_string());
        self
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Returns the numeric string representation without the unit name.
    pub fn to_string_without_unit(&self) -> String {
        Self::format_amount(self.value, self.decimal_places)
    }

    /// Same as [Amount::to_string_without_unit], with `,` between every group of three
    /// whole digits (e.g. `2850000` becomes `2,850,000`).
    pub fn to_grouped_string(&self) -> String {
        let plain = self.to_string_without_unit();
        let (whole, fraction) = match plain.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (plain.as_str(), None),
        };

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (index, digit) in whole.chars().enumerate() {
            if index > 0 && (whole.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        match fraction {
            Some(fraction) => format!("{}.{}", grouped, fraction),
            None => grouped,
        }
    }

    /// Multiplies this amount by `rate` and expresses the product with
    /// `decimal_places` digits of precision, rounding down.
    ///
    /// The result carries no unit name.
    pub fn convert(&self, rate: &Amount, decimal_places: u8) -> Result<Amount, AmountError> {
        let product = (self.value as u128) * (rate.value as u128);
        let scale = self.decimal_places as u32 + rate.decimal_places as u32;
        let target = decimal_places as u32;

        let scaled = if scale >= target {
            product / 10u128.pow(scale - target)
        } else {
            product
                .checked_mul(10u128.pow(target - scale))
                .ok_or(AmountError::Overflow)?
        };

        let value = u64::try_from(scaled).map_err(|_| AmountError::Overflow)?;
        Ok(Amount::new(value, decimal_places))
    }
}

fn is_plain_digits(input: &str) -> bool {
    input.bytes().all(|b| b.is_ascii_digit())
}

fn widen(value: u64, extra_decimals: u8) -> Option<u128> {
    10u128
        .checked_pow(extra_decimals as u32)
        .and_then(|factor| (value as u128).checked_mul(factor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_formatting() {
        assert_eq!(Amount::format_amount(100, 0), "100");

        assert_eq!(Amount::format_amount(12345, 2), "123.45");
        assert_eq!(Amount::format_amount(12300, 2), "123");
        assert_eq!(Amount::format_amount(12340, 2), "123.4");

        assert_eq!(Amount::format_amount(100_000_000, 8), "1");
        assert_eq!(Amount::format_amount(1_000_000, 8), "0.01");
        assert_eq!(Amount::format_amount(123_456_789, 8), "1.23456789");
    }

    #[test]
    fn test_amount_parsing() {
        let parse = |input: &str, decimals: u8| {
            Amount::parse_with_decimals(input, decimals).map(|amount| amount.value())
        };

        assert_eq!(parse("100", 0), Ok(100));
        assert_eq!(parse("123.45", 2), Ok(12345));
        assert_eq!(parse("123", 2), Ok(12300));
        assert_eq!(parse(" 20 ", 6), Ok(20_000_000));
        assert_eq!(parse(".5", 6), Ok(500_000));
        assert_eq!(parse("5.", 6), Ok(5_000_000));
        assert_eq!(parse("0.01", 8), Ok(1_000_000));
        assert_eq!(parse("1.50000000000", 2), Ok(150));
    }

    #[test]
    fn test_parsing_errors() {
        let parse = |input: &str| Amount::parse_with_decimals(input, 6);

        assert_eq!(parse(""), Err(AmountError::Empty));
        assert_eq!(parse("   "), Err(AmountError::Empty));
        assert_eq!(parse("."), Err(AmountError::NotANumber));
        assert_eq!(parse("abc"), Err(AmountError::NotANumber));
        assert_eq!(parse("1.2.3"), Err(AmountError::NotANumber));
        assert_eq!(parse("-5"), Err(AmountError::NotANumber));
        assert_eq!(parse("+5"), Err(AmountError::NotANumber));
        assert_eq!(parse("1e3"), Err(AmountError::NotANumber));
        assert_eq!(parse("5 USDT"), Err(AmountError::NotANumber));
        assert_eq!(parse("0.1234567"), Err(AmountError::TooManyDecimals(6)));
        assert_eq!(parse("99999999999999999999"), Err(AmountError::Overflow));
    }

    #[test]
    fn test_parse_rounded_down() {
        let parse = |input: &str, decimals: u8| {
            Amount::parse_rounded_down(input, decimals).map(|amount| amount.value())
        };

        assert_eq!(parse("20.0000001", 6), Ok(20_000_000));
        assert_eq!(parse("0.123456789", 6), Ok(123_456));
        assert_eq!(parse("5.99", 0), Ok(5));
        assert_eq!(parse("1.5", 6), Ok(1_500_000));
        assert_eq!(parse("1.2345678x", 6), Err(AmountError::NotANumber));
        assert_eq!(parse("-1.5", 6), Err(AmountError::NotANumber));
    }

    #[test]
    fn test_grouped_string() {
        assert_eq!(Amount::new(0, 0).to_grouped_string(), "0");
        assert_eq!(Amount::new(626, 0).to_grouped_string(), "626");
        assert_eq!(Amount::new(3130, 0).to_grouped_string(), "3,130");
        assert_eq!(Amount::new(2_850_000, 0).to_grouped_string(), "2,850,000");
        assert_eq!(Amount::new(123_456_789, 2).to_grouped_string(), "1,234,567.89");
    }

    #[test]
    fn test_convert_rounds_down() {
        let usdt_to_twd = Amount::new(313, 1);
        let hundred_usdt = Amount::new(100_000_000, 6);
        assert_eq!(hundred_usdt.convert(&usdt_to_twd, 0), Ok(Amount::new(3130, 0)));

        let odd = Amount::new(1_000_001, 6);
        // 1.000001 * 31.3 = 31.3000313
        assert_eq!(odd.convert(&usdt_to_twd, 0), Ok(Amount::new(31, 0)));
        assert_eq!(odd.convert(&usdt_to_twd, 2), Ok(Amount::new(3130, 2)));

        let wbtc = Amount::new(1_000_000, 8);
        assert_eq!(
            wbtc.convert(&Amount::new(91_054, 0), 6),
            Ok(Amount::new(910_540_000, 6))
        );
    }

    #[test]
    fn test_convert_overflow() {
        let huge = Amount::new(u64::MAX, 0);
        assert_eq!(
            huge.convert(&Amount::new(10, 0), 0),
            Err(AmountError::Overflow)
        );
    }

    #[test]
    fn test_ordering_across_precisions() {
        assert!(Amount::new(5_000_000, 6) < Amount::new(50, 0));
        assert!(Amount::new(1_000_000, 8) == Amount::new(1_000_000, 8));
        assert_eq!(
            Amount::new(10_000_000, 6).partial_cmp(&Amount::new(10, 0)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_equality_matches_ordering() {
        let scaled = Amount::new(10_000_000, 6);
        let whole = Amount::new(10, 0);
        assert_eq!(scaled, whole);
        assert_eq!(scaled.partial_cmp(&whole), Some(Ordering::Equal));

        assert_eq!(scaled.clone().with_unit_name("USDT"), whole);
        assert_ne!(Amount::new(10_000_001, 6), whole);
    }

    #[test]
    fn test_amount_display() {
        let amount = Amount::new(20_000_000, 6).with_unit_name("USDT");
        assert_eq!(amount.to_string(), "20 USDT");
        assert_eq!(amount.to_string_without_unit(), "20");
        assert_eq!(Amount::new_with_unit(1, 8, "WBTC").to_string(), "0.00000001 WBTC");
    }
}
