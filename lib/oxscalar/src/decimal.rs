use crate::error::{ScalarError, reported};
use crate::guard::{DecimalDigits, Input, Nullable, check_finite};
use num_bigint::{BigInt, Sign};
use std::fmt;

/// A fixed-point number with up to 39 digits.
///
/// The precision is the total digit budget, the scale the number of fractional digits.
/// Fractional digits past the scale are truncated, never rounded.
///
/// ```
/// use oxscalar::{DecimalValue, ScalarError};
///
/// assert_eq!(DecimalValue::new(12.345, 5, 2)?.to_string(), "12.34");
/// assert_eq!(DecimalValue::new(1234.5, 5, 2), Err(ScalarError::DecimalOverflow));
/// # Result::<_, ScalarError>::Ok(())
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct DecimalValue {
    unscaled: BigInt,
    precision: u8,
    scale: u8,
}

impl DecimalValue {
    pub const MAX_PRECISION: u8 = 39;
    pub const DEFAULT_PRECISION: u8 = Self::MAX_PRECISION;
    pub const DEFAULT_SCALE: u8 = 0;

    /// Coerces `input` into a decimal of the given precision and scale.
    pub fn new<'a>(input: impl Into<Input<'a>>, precision: u8, scale: u8) -> Result<Self, ScalarError> {
        reported(Self::coerce(input.into(), precision, scale))
    }

    fn coerce(input: Input<'_>, precision: u8, scale: u8) -> Result<Self, ScalarError> {
        let value = check_finite(input)?;
        if !(1..=Self::MAX_PRECISION).contains(&precision) {
            return Err(ScalarError::InvalidPrecision);
        }
        if scale > precision {
            return Err(ScalarError::InvalidScale);
        }
        let DecimalDigits {
            negative,
            integer,
            mut fraction,
        } = DecimalDigits::new(input, value);
        // The legacy budget counted the sign as a digit of negative numbers and granted one more.
        // A nonzero value below one is written with a leading `0`, which uses a digit.
        let integer_digits = if value == 0. {
            0
        } else {
            integer.len().max(1)
        };
        if integer_digits > usize::from(precision - scale) {
            return Err(ScalarError::DecimalOverflow);
        }
        let scale_len = usize::from(scale);
        if fraction.len() > scale_len {
            fraction.truncate(scale_len);
        } else {
            fraction.extend(std::iter::repeat_n('0', scale_len - fraction.len()));
        }
        let magnitude = BigInt::parse_bytes(format!("0{integer}{fraction}").as_bytes(), 10)
            .ok_or(ScalarError::NotANumber)?;
        Ok(Self {
            unscaled: if negative { -magnitude } else { magnitude },
            precision,
            scale,
        })
    }

    /// Coerces a new value with the precision and scale of this one.
    ///
    /// It is the checked setter of the legacy decimal object: it fails as [`DecimalValue::new`] does.
    #[inline]
    pub fn set_value<'a>(&self, input: impl Into<Input<'a>>) -> Result<Self, ScalarError> {
        Self::new(input, self.precision, self.scale)
    }

    #[inline]
    #[must_use]
    pub const fn precision(&self) -> u8 {
        self.precision
    }

    #[inline]
    #[must_use]
    pub const fn scale(&self) -> u8 {
        self.scale
    }

    /// The value multiplied by 10 to the power of the scale.
    #[inline]
    #[must_use]
    pub const fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    #[inline]
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.unscaled.sign() == Sign::Minus
    }
}

impl fmt::Display for DecimalValue {
    /// Writes every fractional digit of the scale, `12.30` for `12.3` with scale 2.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.unscaled.magnitude().to_string();
        let scale = usize::from(self.scale);
        let digits = if digits.len() <= scale {
            format!("{}{digits}", "0".repeat(scale + 1 - digits.len()))
        } else {
            digits
        };
        let (integer, fraction) = digits.split_at(digits.len() - scale);
        if self.is_negative() {
            f.write_str("-")?;
        }
        f.write_str(integer)?;
        if !fraction.is_empty() {
            write!(f, ".{fraction}")?;
        }
        Ok(())
    }
}

impl Nullable for DecimalValue {}

/// Shorthand for [`DecimalValue::new`].
///
/// [`DecimalValue::DEFAULT_PRECISION`] and [`DecimalValue::DEFAULT_SCALE`] are the legacy defaults.
#[inline]
pub fn to_decimal<'a>(
    input: impl Into<Input<'a>>,
    precision: u8,
    scale: u8,
) -> Result<DecimalValue, ScalarError> {
    DecimalValue::new(input, precision, scale)
}

#[cfg(test)]
#[expect(clippy::panic_in_result_fn)]
mod tests {
    use super::*;

    #[test]
    fn truncates_and_pads() -> Result<(), ScalarError> {
        assert_eq!(to_decimal(12.345, 5, 2)?.to_string(), "12.34");
        assert_eq!(to_decimal(-12.349, 5, 2)?.to_string(), "-12.34");
        assert_eq!(to_decimal(12.3, 5, 3)?.to_string(), "12.300");
        assert_eq!(to_decimal(0.5, 3, 2)?.to_string(), "0.50");
        assert_eq!(to_decimal(-0.5, 2, 1)?.to_string(), "-0.5");
        assert_eq!(to_decimal(0, 2, 2)?.to_string(), "0.00");
        assert_eq!(to_decimal(123.999, 5, 0)?.to_string(), "123");
        Ok(())
    }

    #[test]
    fn overflow() -> Result<(), ScalarError> {
        assert_eq!(to_decimal(123.456, 5, 2)?.to_string(), "123.45");
        assert_eq!(to_decimal(1234.5, 5, 2), Err(ScalarError::DecimalOverflow));
        assert_eq!(to_decimal(-123.456, 5, 2)?.to_string(), "-123.45");
        assert_eq!(to_decimal(-1234.5, 5, 2), Err(ScalarError::DecimalOverflow));
        assert_eq!(to_decimal(1, 1, 1), Err(ScalarError::DecimalOverflow));
        Ok(())
    }

    #[test]
    fn leading_zero_uses_a_digit() {
        assert_eq!(to_decimal(0.5, 2, 2), Err(ScalarError::DecimalOverflow));
        assert_eq!(to_decimal(-0.5, 2, 2), Err(ScalarError::DecimalOverflow));
        assert_eq!(to_decimal(-0.5, 1, 1), Err(ScalarError::DecimalOverflow));
        assert_eq!(to_decimal("0.5", 2, 2), Err(ScalarError::DecimalOverflow));
    }

    #[test]
    fn extreme_exponents() -> Result<(), ScalarError> {
        assert_eq!(to_decimal("1e-99999999999999999999", 39, 0)?.to_string(), "0");
        assert_eq!(to_decimal("-1e-99999999999999999999", 39, 2)?.to_string(), "0.00");
        assert_eq!(
            to_decimal("1e+99999999999999999999", 39, 0),
            Err(ScalarError::Infinite)
        );
        Ok(())
    }

    #[test]
    fn precondition_order() {
        assert_eq!(to_decimal("x", 0, 5), Err(ScalarError::NotANumber));
        assert_eq!(to_decimal(1, 0, 5), Err(ScalarError::InvalidPrecision));
        assert_eq!(to_decimal(1, 40, 0), Err(ScalarError::InvalidPrecision));
        assert_eq!(to_decimal(1, 5, 6), Err(ScalarError::InvalidScale));
    }

    #[test]
    fn wide_values() -> Result<(), ScalarError> {
        let text = "123456789012345678901234567890123456789";
        assert_eq!(to_decimal(text, 39, 0)?.to_string(), text);
        assert_eq!(
            to_decimal("1234567890123456789.123456789", 39, 20)?.to_string(),
            "1234567890123456789.12345678900000000000"
        );
        assert_eq!(to_decimal("1e30", 39, 0)?.unscaled().to_string(), format!("1{}", "0".repeat(30)));
        Ok(())
    }

    #[test]
    fn idempotent() -> Result<(), ScalarError> {
        for (input, precision, scale) in [("12.345", 5, 2), ("-0.001", 10, 2), ("99", 2, 0)] {
            let value = to_decimal(input, precision, scale)?;
            assert_eq!(to_decimal(&value.to_string(), precision, scale)?, value);
        }
        Ok(())
    }

    #[test]
    fn set_value() -> Result<(), ScalarError> {
        let value = to_decimal(1, 4, 2)?;
        assert_eq!(value.set_value("3.14159")?.to_string(), "3.14");
        assert_eq!(value.set_value(100), Err(ScalarError::DecimalOverflow));
        assert_eq!(value.precision(), 4);
        assert_eq!(value.scale(), 2);
        Ok(())
    }
}
