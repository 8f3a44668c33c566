//! Percentage type in fixed-point basis points
//!
//! One basis point is 0.01%, so 100% is 10_000. Keeping weights, targets and
//! deviations integral makes threshold and priority comparisons exact: 10.00%
//! and 10.01% are 1000 and 1001, never 9.999999.
//!
//! On the wire (config and scenario files) a percentage is a plain number of
//! percent, e.g. `0.1` for 0.1% or `75` for 75%.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

use super::money::Money;

/// Basis points in 100%
pub const BPS_SCALE: i64 = 10_000;

/// A percentage stored as basis points
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Percentage(i64);

impl Percentage {
    pub const fn from_bps(bps: i64) -> Self {
        Self(bps)
    }

    /// Whole percent, e.g. `from_percent(75)` is 75%
    pub const fn from_percent(percent: i64) -> Self {
        Self(percent * 100)
    }

    /// Floating point percent, rounded to the nearest basis point
    pub fn from_f64(percent: f64) -> Self {
        Self((percent * 100.0).round() as i64)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn hundred() -> Self {
        Self(BPS_SCALE)
    }

    pub const fn bps(&self) -> i64 {
        self.0
    }

    /// Value in percent as a float (display/export only)
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Apply this percentage to an amount, rounding half away from zero to
    /// the nearest cent.
    pub fn apply(&self, amount: Money) -> Money {
        let scaled = amount.cents() as i128 * self.0 as i128;
        Money::from_cents(saturate_i64(round_div(scaled, BPS_SCALE as i128)))
    }

    /// The weight of `part` in `total`, rounded to the nearest basis point.
    ///
    /// Zero when `total` is not positive.
    pub fn weight_of(part: Money, total: Money) -> Self {
        if !total.is_positive() {
            return Self::zero();
        }
        let scaled = part.cents() as i128 * BPS_SCALE as i128;
        Self(saturate_i64(round_div(scaled, total.cents() as i128)))
    }

    /// Parse a percentage such as "75", "12.5", "10.01%" or "-2"
    pub fn parse(s: &str) -> Result<Self, PercentageParseError> {
        let trimmed = s.trim();
        let invalid = || PercentageParseError::InvalidFormat(trimmed.to_string());

        let body = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        let (negative, body) = match body.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, body),
        };
        if body.is_empty() {
            return Err(invalid());
        }

        let bps = match body.split_once('.') {
            Some((whole, frac)) => {
                let whole: i64 = if whole.is_empty() {
                    0
                } else {
                    whole.parse().map_err(|_| invalid())?
                };
                if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                let frac_bps: i64 = match frac.len() {
                    0 => 0,
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    _ => frac.parse().map_err(|_| invalid())?,
                };
                whole
                    .checked_mul(100)
                    .and_then(|w| w.checked_add(frac_bps))
                    .ok_or_else(invalid)?
            }
            None => body
                .parse::<i64>()
                .map_err(|_| invalid())?
                .checked_mul(100)
                .ok_or_else(invalid)?,
        };

        Ok(Self(if negative { -bps } else { bps }))
    }
}

/// Clamp a wide intermediate into `i64`
pub(crate) fn saturate_i64(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// Integer division rounding half away from zero; `den` must be positive
fn round_div(num: i128, den: i128) -> i128 {
    if num >= 0 {
        (num + den / 2) / den
    } else {
        -((-num + den / 2) / den)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        f.pad(&format!("{}{}.{:02}%", sign, abs / 100, abs % 100))
    }
}

impl Add for Percentage {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Percentage {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Percentage {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for Percentage {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Percentage {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Percentage::zero(), |acc, p| acc + p)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Percentage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let percent = f64::deserialize(deserializer)?;
        if !percent.is_finite() {
            return Err(serde::de::Error::custom("percentage must be a finite number"));
        }
        Ok(Self::from_f64(percent))
    }
}

/// Error type for percentage parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PercentageParseError {
    InvalidFormat(String),
}

impl fmt::Display for PercentageParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid percentage: {}", s),
        }
    }
}

impl std::error::Error for PercentageParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Percentage::from_percent(75).bps(), 7500);
        assert_eq!(Percentage::from_f64(0.1).bps(), 10);
        assert_eq!(Percentage::from_f64(10.01).bps(), 1001);
        assert_eq!(Percentage::hundred().bps(), 10_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Percentage::from_percent(10).to_string(), "10.00%");
        assert_eq!(Percentage::from_bps(1001).to_string(), "10.01%");
        assert_eq!(Percentage::from_bps(-50).to_string(), "-0.50%");
        assert_eq!(format!("{:>8}", Percentage::from_bps(5)), "   0.05%");
    }

    #[test]
    fn test_apply() {
        let income = Money::from_dollars(5000);
        assert_eq!(Percentage::from_percent(75).apply(income), Money::from_dollars(3750));
        assert_eq!(Percentage::from_bps(10).apply(Money::from_dollars(20_000)), Money::from_dollars(20));
        // 0.1% of $0.05 is half a tenth of a cent
        assert_eq!(Percentage::from_bps(10).apply(Money::from_cents(5)), Money::zero());
        // half rounds away from zero
        assert_eq!(Percentage::from_percent(50).apply(Money::from_cents(3)), Money::from_cents(2));
        assert_eq!(Percentage::from_percent(50).apply(Money::from_cents(-3)), Money::from_cents(-2));
    }

    #[test]
    fn test_weight_of() {
        let total = Money::from_dollars(100_000);
        assert_eq!(
            Percentage::weight_of(Money::from_dollars(70_000), total),
            Percentage::from_percent(70)
        );
        assert_eq!(
            Percentage::weight_of(Money::from_cents(1), Money::from_cents(3)).bps(),
            3333
        );
        assert_eq!(
            Percentage::weight_of(Money::from_dollars(1), Money::zero()),
            Percentage::zero()
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(Percentage::parse("75").unwrap().bps(), 7500);
        assert_eq!(Percentage::parse("12.5").unwrap().bps(), 1250);
        assert_eq!(Percentage::parse("10.01%").unwrap().bps(), 1001);
        assert_eq!(Percentage::parse(" 0.1 % ").unwrap().bps(), 10);
        assert_eq!(Percentage::parse("-2").unwrap().bps(), -200);
        assert!(Percentage::parse("").is_err());
        assert!(Percentage::parse("abc").is_err());
        assert!(Percentage::parse("1.234").is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(Percentage::parse("100000000000000000").is_err());
        assert!(Percentage::parse("100000000000000000.5").is_err());
        assert!(Percentage::parse("-100000000000000000%").is_err());
        assert_eq!(
            Percentage::parse("92233720368547758.07").unwrap().bps(),
            i64::MAX
        );
    }

    #[test]
    fn test_apply_saturates() {
        let huge = Percentage::from_bps(i64::MAX);
        assert_eq!(huge.apply(Money::from_cents(i64::MAX)), Money::from_cents(i64::MAX));
        assert_eq!(huge.apply(Money::from_cents(-i64::MAX)), Money::from_cents(i64::MIN));
        assert_eq!(
            Percentage::weight_of(Money::from_cents(i64::MAX), Money::from_cents(1)).bps(),
            i64::MAX
        );
    }

    #[test]
    fn test_serde_as_percent_number() {
        let p = Percentage::from_bps(1250);
        assert_eq!(serde_json::to_string(&p).unwrap(), "12.5");

        let back: Percentage = serde_json::from_str("12.5").unwrap();
        assert_eq!(back, p);

        let whole: Percentage = serde_json::from_str("15").unwrap();
        assert_eq!(whole, Percentage::from_percent(15));
    }

    #[test]
    fn test_ordering_and_sum() {
        assert!(Percentage::from_bps(1001) > Percentage::from_percent(10));
        let total: Percentage = [75, 15, 10].iter().map(|p| Percentage::from_percent(*p)).sum();
        assert_eq!(total, Percentage::hundred());
    }
}
