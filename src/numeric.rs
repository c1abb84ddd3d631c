//! Numeric-family values and comparison.
//!
//! Booleans, integers and reals form one family: `true == 1 == 1.0`.
//! Reals are held as exact [`Decimal`] values, so comparison never goes
//! through float rounding: `0.30000000000000001 != 0.3`, and
//! `i64::MAX != 9223372036854775808.0`.

use crate::error::{Error, Result};
use crate::object::Object;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Largest decimal exponent accepted when parsing.
pub const MAX_DECIMAL_EXPONENT: i32 = 1000;

/// Exact decimal number: `digits × 10^exponent`.
///
/// Values are kept normalized (no leading or trailing zeros in `digits`,
/// zero is never negative), so derived equality is value equality.
///
/// ```
/// use pdf_graph::numeric::Decimal;
///
/// let a: Decimal = "2.50".parse().unwrap();
/// let b: Decimal = "+2.5".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "2.5");
/// assert_eq!("1.5e3".parse::<Decimal>().unwrap().to_string(), "1500.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    negative: bool,
    digits: String,
    exponent: i32,
}

impl Decimal {
    /// Zero.
    pub fn zero() -> Self {
        Self {
            negative: false,
            digits: String::new(),
            exponent: 0,
        }
    }

    fn normalized(negative: bool, digits: &str, exponent: i64) -> Option<Self> {
        let digits = digits.trim_start_matches('0');
        let trimmed = digits.trim_end_matches('0');
        if trimmed.is_empty() {
            return Some(Self::zero());
        }
        let exponent = exponent.saturating_add((digits.len() - trimmed.len()) as i64);
        let exponent = i32::try_from(exponent).ok()?;
        if exponent.abs() > MAX_DECIMAL_EXPONENT {
            return None;
        }
        Some(Self {
            negative,
            digits: trimmed.to_string(),
            exponent,
        })
    }

    /// Exact value of a finite float, using its shortest round-trip digits.
    /// `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        format!("{}", value).parse().ok()
    }

    /// Nearest float.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let sign = if self.negative { "-" } else { "" };
        format!("{}{}e{}", sign, self.digits, self.exponent)
            .parse()
            .unwrap_or(f64::NAN)
    }

    /// True for zero.
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// True when the value has no fractional part.
    pub fn is_integral(&self) -> bool {
        self.exponent >= 0
    }

    fn magnitude_cmp(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {},
        }
        let lead = |d: &Self| d.digits.len() as i64 + i64::from(d.exponent);
        // Same leading position: normalized digit strings order like the values
        lead(self)
            .cmp(&lead(other))
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        let digits = value.unsigned_abs().to_string();
        Self::normalized(value < 0, &digits, 0).unwrap_or_else(Self::zero)
    }
}

impl FromStr for Decimal {
    type Err = Error;

    /// Parse `[+-]digits[.digits][(e|E)[+-]digits]`; either side of the
    /// point may be empty, but not both.
    fn from_str(text: &str) -> Result<Self> {
        let invalid = || Error::type_error("decimal literal", format!("{:?}", text));
        let trimmed = text.trim();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let (mantissa, exp) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => {
                let exp: i64 = unsigned[pos + 1..].parse().map_err(|_| invalid())?;
                (&unsigned[..pos], exp)
            },
            None => (unsigned, 0),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty())
            || !all_digits(int_part)
            || !all_digits(frac_part)
        {
            return Err(invalid());
        }
        let digits = format!("{}{}", int_part, frac_part);
        let exponent = exp
            .checked_sub(frac_part.len() as i64)
            .ok_or_else(invalid)?;
        Self::normalized(negative, &digits, exponent).ok_or_else(invalid)
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.magnitude_cmp(other),
            (true, true) => other.magnitude_cmp(self),
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Plain notation, always with a fractional part: `2.0`, `-0.125`, `1500.0`.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0.0");
        }
        if self.negative {
            f.write_str("-")?;
        }
        if self.exponent >= 0 {
            f.write_str(&self.digits)?;
            for _ in 0..self.exponent {
                f.write_str("0")?;
            }
            return f.write_str(".0");
        }
        let frac_len = self.exponent.unsigned_abs() as usize;
        if self.digits.len() > frac_len {
            let (int, frac) = self.digits.split_at(self.digits.len() - frac_len);
            write!(f, "{}.{}", int, frac)
        } else {
            f.write_str("0.")?;
            for _ in 0..frac_len - self.digits.len() {
                f.write_str("0")?;
            }
            f.write_str(&self.digits)
        }
    }
}

/// A numeric-family value lifted out of an object.
#[derive(Debug, Clone, Copy)]
pub enum Number<'a> {
    /// Integers and booleans
    Int(i64),
    /// Reals
    Real(&'a Decimal),
}

impl<'a> Number<'a> {
    /// Lift a numeric-family object. Booleans become 0 or 1.
    pub fn from_object(obj: &'a Object) -> Option<Self> {
        match obj {
            Object::Boolean(b) => Some(Number::Int(i64::from(*b))),
            Object::Integer(i) => Some(Number::Int(*i)),
            Object::Real(r) => Some(Number::Real(r)),
            _ => None,
        }
    }

    /// Exact value comparison.
    pub fn exact_cmp(self, other: Number<'_>) -> Ordering {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (Number::Real(a), Number::Real(b)) => a.cmp(b),
            (Number::Int(i), Number::Real(r)) => Decimal::from(i).cmp(r),
            (Number::Real(r), Number::Int(i)) => r.cmp(&Decimal::from(i)),
        }
    }
}

impl PartialEq for Number<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.exact_cmp(*other) == Ordering::Equal
    }
}

/// Compare two objects as numbers; `None` if either is outside the family.
pub fn numeric_eq(a: &Object, b: &Object) -> Option<bool> {
    let lhs = Number::from_object(a)?;
    let rhs = Number::from_object(b)?;
    Some(lhs == rhs)
}
