//! Fixed-point money handling. Amounts are kept as integer minor units
//! (paise, cents) and only turned into decimal text at the edges.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::LedgerError;

/// Number of fractional digits carried by every amount.
pub const MINOR_DIGITS: u32 = 2;
const MINOR_PER_MAJOR: i64 = 10_i64.pow(MINOR_DIGITS);
/// Largest whole amount a single entry may carry. Sums of millions of
/// entries at this size still fit in `i64` minor units.
pub const MAX_MAJOR: i64 = 10_000_000_000;

/// Monetary quantity in minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    pub const fn from_major(major: i64) -> Self {
        Self(major * MINOR_PER_MAJOR)
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Parses a non-negative decimal string such as `150`, `12.5` or `12.50`,
    /// at most `MAX_MAJOR`.
    pub fn parse(input: &str) -> Result<Self, LedgerError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(LedgerError::validation("amount is required"));
        }
        let (whole, fraction) = match raw.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (raw, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(LedgerError::validation(format!("`{raw}` is not an amount")));
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(LedgerError::validation(format!("`{raw}` is not an amount")));
        }
        if fraction.len() > MINOR_DIGITS as usize {
            return Err(LedgerError::validation(format!(
                "`{raw}` has more than {MINOR_DIGITS} decimal places"
            )));
        }

        let major: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| LedgerError::validation(format!("`{raw}` is too large")))?
        };
        let mut minor: i64 = if fraction.is_empty() {
            0
        } else {
            fraction
                .parse()
                .map_err(|_| LedgerError::validation(format!("`{raw}` is not an amount")))?
        };
        for _ in fraction.len()..MINOR_DIGITS as usize {
            minor *= 10;
        }

        if major > MAX_MAJOR || (major == MAX_MAJOR && minor > 0) {
            return Err(LedgerError::validation(format!(
                "`{raw}` is larger than the maximum of {MAX_MAJOR}"
            )));
        }
        Ok(Money(major * MINOR_PER_MAJOR + minor))
    }

    /// Canonical decimal text: whole amounts without a fraction, anything else
    /// with exactly two fractional digits (`150`, `12.50`, `-3.05`).
    pub fn to_decimal_string(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let major = abs / MINOR_PER_MAJOR as u64;
        let minor = abs % MINOR_PER_MAJOR as u64;
        if minor == 0 {
            format!("{sign}{major}")
        } else {
            format!(
                "{sign}{major}.{minor:0width$}",
                width = MINOR_DIGITS as usize
            )
        }
    }

    /// Decimal text with thousands grouping, e.g. `1,234.50`.
    pub fn to_grouped_string(self) -> String {
        let plain = self.to_decimal_string();
        let (sign, unsigned) = match plain.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", plain.as_str()),
        };
        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (unsigned, None),
        };
        let mut grouped = String::new();
        for (idx, ch) in whole.chars().enumerate() {
            if idx > 0 && (whole.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        match fraction {
            Some(fraction) => format!("{sign}{grouped}.{fraction}"),
            None => format!("{sign}{grouped}"),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl FromStr for Money {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

/// Older records may carry the amount as a JSON number instead of a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Persisted amounts follow the same rules as typed input: non-negative,
/// at most two decimal places, at most `MAX_MAJOR`.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = match RawAmount::deserialize(deserializer)? {
            RawAmount::Text(text) => text,
            RawAmount::Integer(value) => value.to_string(),
            RawAmount::Float(value) if value.is_finite() => value.to_string(),
            RawAmount::Float(value) => {
                return Err(serde::de::Error::custom(format!("`{value}` is not an amount")))
            }
        };
        Money::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Presentation settings for amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn format(&self, amount: Money) -> String {
        if amount.is_negative() {
            format!("-{} {}", self.symbol, (-amount).to_grouped_string())
        } else {
            format!("{} {}", self.symbol, amount.to_grouped_string())
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new("₹")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(Money::parse("150").unwrap(), Money::from_minor(15_000));
        assert_eq!(Money::parse("12.5").unwrap(), Money::from_minor(1_250));
        assert_eq!(Money::parse(" 0.07 ").unwrap(), Money::from_minor(7));
        assert_eq!(Money::parse(".5").unwrap(), Money::from_minor(50));
    }

    #[test]
    fn rejects_malformed_amounts() {
        for input in ["", "  ", "abc", "-5", "1.234", "1.2.3", ".", "1e3", "99999999999999999"] {
            let err = Money::parse(input).expect_err(input);
            assert!(matches!(err, LedgerError::Validation(_)), "{input}: {err:?}");
        }
    }

    #[test]
    fn decimal_string_drops_zero_fraction() {
        assert_eq!(Money::from_major(150).to_decimal_string(), "150");
        assert_eq!(Money::from_minor(1_250).to_decimal_string(), "12.50");
        assert_eq!(Money::from_minor(-305).to_decimal_string(), "-3.05");
    }

    #[test]
    fn grouping_inserts_thousands_separators() {
        assert_eq!(Money::from_major(1_234_567).to_grouped_string(), "1,234,567");
        assert_eq!(Money::from_minor(123_450).to_grouped_string(), "1,234.50");
        assert_eq!(Money::from_major(999).to_grouped_string(), "999");
        assert_eq!(
            CurrencyFormat::default().format(Money::from_major(-2_500)),
            "-₹ 2,500"
        );
    }

    #[test]
    fn deserializes_strings_and_numbers() {
        let text: Money = serde_json::from_str("\"50\"").unwrap();
        let integer: Money = serde_json::from_str("50").unwrap();
        let float: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(text, Money::from_major(50));
        assert_eq!(integer, Money::from_major(50));
        assert_eq!(float, Money::from_minor(1_250));
        assert_eq!(serde_json::to_string(&float).unwrap(), "\"12.50\"");
    }

    #[test]
    fn parse_accepts_up_to_the_maximum() {
        assert_eq!(
            Money::parse("10000000000").unwrap(),
            Money::from_major(MAX_MAJOR)
        );
        assert!(Money::parse("10000000000.01").is_err());
        assert!(Money::parse("10000000001").is_err());
    }

    #[test]
    fn deserialize_rejects_what_parse_rejects() {
        for raw in ["\"-50\"", "-50", "-0.5", "12.345", "\"1.234\"", "1e20", "\"20000000000\""] {
            assert!(serde_json::from_str::<Money>(raw).is_err(), "{raw}");
        }
    }
}
