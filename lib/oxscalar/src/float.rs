use crate::error::{ScalarError, reported};
use crate::guard::{DecimalDigits, Input, Nullable, check_finite};
use std::fmt;

/// Storage width of a [`FloatValue`], in bytes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum FloatWidth {
    /// `float4`, 8 significant digits
    Four,
    /// `float8`, 15 significant digits
    Eight,
}

impl FloatWidth {
    #[inline]
    #[must_use]
    pub const fn significant_digits(self) -> usize {
        match self {
            Self::Four => 8,
            Self::Eight => 15,
        }
    }
}

impl TryFrom<u8> for FloatWidth {
    type Error = crate::InvalidWidthError;

    #[inline]
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::Four),
            8 => Ok(Self::Eight),
            _ => Err(crate::InvalidWidthError::new(value)),
        }
    }
}

/// A finite real number cut after the significant digits of its [`FloatWidth`].
///
/// Digits past the precision are dropped toward zero, they are never rounded.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FloatValue {
    width: FloatWidth,
    value: f64,
}

impl FloatValue {
    /// Coerces `input` into a float of the given width.
    ///
    /// ```
    /// use oxscalar::{FloatValue, FloatWidth};
    ///
    /// assert_eq!(FloatValue::new(FloatWidth::Four, 1.234_567_89)?.value(), 1.234_567_8);
    /// assert_eq!(FloatValue::new(FloatWidth::Eight, 0.1 + 0.2)?.value(), 0.3);
    /// # Result::<_, oxscalar::ScalarError>::Ok(())
    /// ```
    pub fn new<'a>(width: FloatWidth, input: impl Into<Input<'a>>) -> Result<Self, ScalarError> {
        let value = reported(check_finite(input.into()))?;
        Ok(Self {
            width,
            value: truncate_significant(value, width.significant_digits()),
        })
    }

    #[inline]
    #[must_use]
    pub const fn width(self) -> FloatWidth {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.value
    }
}

impl From<FloatValue> for f64 {
    #[inline]
    fn from(value: FloatValue) -> Self {
        value.value
    }
}

impl fmt::Display for FloatValue {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ryu_js::Buffer::new().format_finite(self.value))
    }
}

/// Keeps the first `digits` significant digits of the shortest decimal form of `value`.
fn truncate_significant(value: f64, digits: usize) -> f64 {
    let DecimalDigits {
        negative,
        integer,
        fraction,
    } = DecimalDigits::new(Input::Number(value), value);
    let all = format!("{integer}{fraction}");
    let leading_zeros = all.len() - all.trim_start_matches('0').len();
    let kept = leading_zeros + digits;
    if all.len() <= kept {
        return value;
    }
    let truncated = format!("{}{}", &all[..kept], "0".repeat(all.len() - kept));
    let (integer, fraction) = truncated.split_at(integer.len());
    let sign = if negative { "-" } else { "" };
    let integer = if integer.is_empty() { "0" } else { integer };
    if fraction.is_empty() {
        format!("{sign}{integer}")
    } else {
        format!("{sign}{integer}.{fraction}")
    }
    .parse()
    .unwrap_or(value)
}

impl Nullable for FloatValue {}

/// Shorthand for [`FloatValue::new`].
#[inline]
pub fn to_float<'a>(width: FloatWidth, input: impl Into<Input<'a>>) -> Result<FloatValue, ScalarError> {
    FloatValue::new(width, input)
}

#[cfg(test)]
#[expect(clippy::panic_in_result_fn)]
mod tests {
    use super::*;

    #[test]
    fn truncates_instead_of_rounding() -> Result<(), ScalarError> {
        assert_eq!(to_float(FloatWidth::Four, 1.999_999_999)?.value(), 1.999_999_9);
        assert_eq!(to_float(FloatWidth::Four, -1.999_999_999)?.value(), -1.999_999_9);
        assert_eq!(
            to_float(FloatWidth::Eight, 1.999_999_999_999_999)?.value(),
            1.999_999_999_999_99
        );
        Ok(())
    }

    #[test]
    fn widths_differ_by_digit_count_only() -> Result<(), ScalarError> {
        let input = 123_456_789.123_456_78;
        assert_eq!(to_float(FloatWidth::Four, input)?.value(), 123_456_780.);
        assert_eq!(to_float(FloatWidth::Eight, input)?.value(), 123_456_789.123_456);
        Ok(())
    }

    #[test]
    fn small_numbers() -> Result<(), ScalarError> {
        assert_eq!(to_float(FloatWidth::Four, 0.000_123_456_789)?.value(), 0.000_123_456_78);
        assert_eq!(to_float(FloatWidth::Eight, 0.1 + 0.2)?.value(), 0.3);
        assert_eq!(to_float(FloatWidth::Eight, 0.)?.value(), 0.);
        Ok(())
    }

    #[test]
    fn text_and_failures() -> Result<(), ScalarError> {
        assert_eq!(to_float(FloatWidth::Four, " 2.5 ")?.value(), 2.5);
        assert_eq!(to_float(FloatWidth::Four, "x"), Err(ScalarError::NotANumber));
        assert_eq!(
            to_float(FloatWidth::Eight, f64::NEG_INFINITY),
            Err(ScalarError::Infinite)
        );
        Ok(())
    }

    #[test]
    fn display() -> Result<(), ScalarError> {
        assert_eq!(to_float(FloatWidth::Eight, 2.)?.to_string(), "2");
        assert_eq!(to_float(FloatWidth::Eight, 1e21)?.to_string(), "1e+21");
        Ok(())
    }
}
