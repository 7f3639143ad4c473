use bigdecimal::{BigDecimal, ParseBigDecimalError, RoundingMode, ToPrimitive};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
const SCALE: i64 = 100;

#[derive(Debug, Clone, Copy, Default)]
/// A price or sale amount stored in cents.
///
/// Prices never go through binary floating point: input text is parsed as a
/// decimal, rounded half-up to two places and kept as an integer count of
/// cents. Sums over many sales stay exact.
///
/// # Examples
/// ```
/// use dealership_ledger::common::money::Money;
///
/// let price: Money = "6790,5".parse().unwrap();
/// assert_eq!(price.as_cents(), 679050);
/// assert_eq!(price.to_string(), "6790.50");
/// ```
pub struct Money(i64);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub fn zero() -> Self {
        Money(0)
    }

    pub fn as_cents(&self) -> i64 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn to_string_2dp(&self) -> String {
        let bd = BigDecimal::from(self.0) / BigDecimal::from(SCALE);
        format!("{:.2}", bd.with_scale_round(2, RoundingMode::HalfUp))
    }
}

impl std::str::FromStr for Money {
    type Err = ParseBigDecimalError;

    /// Accepts either `.` or `,` as the decimal separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().replace(',', ".");
        if t.is_empty() {
            return Err(ParseBigDecimalError::Other("empty amount".into()));
        }

        let bd: BigDecimal = t.parse()?;

        let scaled = (bd * BigDecimal::from(SCALE)).with_scale_round(0, RoundingMode::HalfUp);
        let value: i64 = scaled
            .to_i64()
            .ok_or_else(|| ParseBigDecimalError::Other("amount overflow".into()))?;

        Ok(Money(value))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_2dp())
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for Money {}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(Money::zero(), Money(0));
        assert!(!Money::zero().is_negative());
    }

    #[test]
    fn test_from_str_valid() {
        assert_eq!(Money::from_str("1").unwrap(), Money(100));
        assert_eq!(Money::from_str("1.5").unwrap(), Money(150));
        assert_eq!(Money::from_str("6790.00").unwrap(), Money(679000));
        assert_eq!(Money::from_str("  8799.99 ").unwrap(), Money(879999));
    }

    #[test]
    fn test_from_str_accepts_comma_separator() {
        assert_eq!(Money::from_str("7899,99").unwrap(), Money(789999));
    }

    #[test]
    fn test_from_str_rounding() {
        assert_eq!(Money::from_str("1.005").unwrap(), Money(101));
        assert_eq!(Money::from_str("1.004").unwrap(), Money(100));
        assert_eq!(Money::from_str("0.001").unwrap(), Money(0));
    }

    #[test]
    fn test_from_str_invalid() {
        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("   ").is_err());
        assert!(Money::from_str("abc").is_err());
    }

    #[test]
    fn test_negative_is_parsed_but_flagged() {
        let m = Money::from_str("-3").unwrap();
        assert!(m.is_negative());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money(679000).to_string(), "6790.00");
        assert_eq!(Money(5).to_string(), "0.05");
        assert_eq!(Money(0).to_string(), "0.00");
        assert_eq!(Money(100).to_string(), "1.00");
        assert_eq!(Money(-250).to_string(), "-2.50");
    }

    #[test]
    fn test_add_and_sum() {
        assert_eq!(Money(10000) + Money(25050), Money(35050));
        let mut m = Money(100);
        m += Money(50);
        assert_eq!(m, Money(150));

        let total: Money = [Money(1), Money(2), Money(3)].iter().sum();
        assert_eq!(total, Money(6));
        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert_eq!(empty, Money::zero());
    }

    #[test]
    fn test_ordering() {
        assert!(Money(100) < Money(150));
        assert!(Money(100) >= Money(100));
    }
}
