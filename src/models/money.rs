//! Money type for representing expense amounts
//!
//! Internally stores amounts in cents (i64) so that totals over thousands of
//! entries stay exact. The ledger file stores amounts as plain JSON numbers in
//! currency units; see [`as_number`].

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

/// Largest magnitude, in cents, that survives a trip through an f64 exactly
const MAX_EXACT_CENTS: i64 = 1 << 53;

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_ledger::models::Money;
    /// let amount = Money::from_cents(350); // $3.50
    /// assert_eq!(amount.to_plain_string(), "3.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Parse an amount typed by the user
    ///
    /// Accepts plain decimal numbers with at most two fraction digits:
    /// "3.50", "3.5", "1200", ".75", "-2". Currency symbols, exponents and
    /// thousands separators are rejected. Sign checks are left to the caller.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, body) = match s.as_bytes()[0] {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };

        let (whole, frac) = body.split_once('.').unwrap_or((body, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }
        if frac.len() > 2 {
            return Err(MoneyParseError::TooPrecise(s.to_string()));
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .ok()
                .and_then(|w| w.checked_mul(100))
                .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?
        };
        let frac_cents = match frac.len() {
            0 => 0,
            1 => i64::from(frac.as_bytes()[0] - b'0') * 10,
            _ => i64::from(frac.as_bytes()[0] - b'0') * 10 + i64::from(frac.as_bytes()[1] - b'0'),
        };

        let cents = whole_cents
            .checked_add(frac_cents)
            .filter(|c| *c < MAX_EXACT_CENTS)
            .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format as a plain decimal number ("3.50"), as written to CSV exports
    pub fn to_plain_string(&self) -> String {
        if self.0 < 0 {
            format!("-{}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            format!("{}.{:02}", self.dollars(), self.cents_part())
        }
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.0 < 0 {
            format!("-{}{}", symbol, Money(-self.0).to_plain_string())
        } else {
            format!("{}{}", symbol, self.to_plain_string())
        }
    }

    /// This amount as a percentage of `total` (0.0 when total is zero)
    pub fn percent_of(&self, total: Money) -> f64 {
        if total.is_zero() {
            0.0
        } else {
            (self.0 as f64 / total.0 as f64) * 100.0
        }
    }

    fn as_units_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Amount from a JSON number in currency units
    ///
    /// Only values exactly representable in cents are accepted; `3.333` is an
    /// error, not `3.33`.
    fn from_units_f64(value: f64) -> Result<Self, MoneyParseError> {
        if !value.is_finite() {
            return Err(MoneyParseError::OutOfRange(value.to_string()));
        }
        let cents = (value * 100.0).round();
        if cents.abs() >= MAX_EXACT_CENTS as f64 {
            return Err(MoneyParseError::OutOfRange(value.to_string()));
        }
        if cents / 100.0 != value {
            return Err(MoneyParseError::TooPrecise(value.to_string()));
        }
        Ok(Self(cents as i64))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    /// Saturates at the i64 bounds instead of overflowing
    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    Empty,
    InvalidFormat(String),
    TooPrecise(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "Amount is required"),
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
            MoneyParseError::TooPrecise(s) => {
                write!(f, "Amount has more than two decimal places: {}", s)
            }
            MoneyParseError::OutOfRange(s) => write!(f, "Amount is too large: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

/// Serde adapter storing [`Money`] as a JSON number in currency units
///
/// `350` cents is written as `3.5`; `120000` cents as `1200.0`. Reading
/// rounds to the nearest cent.
pub mod as_number {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use super::Money;

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.as_units_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_units_f64(value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "as_number")]
        amount: Money,
    }

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.dollars(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(Money::from_cents(120000).to_plain_string(), "1200.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse(" 10.5 ").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.").unwrap().cents(), 1000);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse("-2").unwrap().cents(), -200);
        assert_eq!(Money::parse("+2.25").unwrap().cents(), 225);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse("   "), Err(MoneyParseError::Empty));
        assert!(matches!(Money::parse("abc"), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse("$5"), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse("1e3"), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse("1.2.3"), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse("."), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse("NaN"), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse("1.005"), Err(MoneyParseError::TooPrecise(_))));
        assert!(matches!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_sum_is_exact() {
        let dime = Money::parse("0.10").unwrap();
        let total: Money = std::iter::repeat(dime).take(1000).sum();
        assert_eq!(total, Money::from_cents(10000));
    }

    #[test]
    fn test_percent_of() {
        let part = Money::from_cents(250);
        assert_eq!(part.percent_of(Money::from_cents(1000)), 25.0);
        assert_eq!(part.percent_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_number_serialization() {
        let json = serde_json::to_string(&Wrapper { amount: Money::from_cents(350) }).unwrap();
        assert_eq!(json, r#"{"amount":3.5}"#);

        let whole: Wrapper = serde_json::from_str(r#"{"amount":1200}"#).unwrap();
        assert_eq!(whole.amount.cents(), 120000);

        let cents: Wrapper = serde_json::from_str(r#"{"amount":0.1}"#).unwrap();
        assert_eq!(cents.amount.cents(), 10);

        assert!(serde_json::from_str::<Wrapper>(r#"{"amount":"3.50"}"#).is_err());
    }

    #[test]
    fn test_number_with_sub_cent_digits_is_rejected() {
        let err = serde_json::from_str::<Wrapper>(r#"{"amount":3.333}"#).unwrap_err();
        assert!(err.to_string().contains("more than two decimal places"));
        assert!(serde_json::from_str::<Wrapper>(r#"{"amount":0.005}"#).is_err());

        // Two-decimal values that are inexact in binary still load
        for (text, cents) in [("0.29", 29), ("19.99", 1999), ("1234.56", 123456)] {
            let json = format!(r#"{{"amount":{}}}"#, text);
            let loaded: Wrapper = serde_json::from_str(&json).unwrap();
            assert_eq!(loaded.amount.cents(), cents);
        }
    }

    #[test]
    fn test_sum_saturates_instead_of_overflowing() {
        let big = Money::from_cents(MAX_EXACT_CENTS - 1);
        let total: Money = std::iter::repeat(big).take(2000).sum();
        assert_eq!(total, Money::from_cents(i64::MAX));

        let mut acc = Money::from_cents(i64::MAX - 1);
        acc += Money::from_cents(5);
        assert_eq!(acc.cents(), i64::MAX);
    }
}
