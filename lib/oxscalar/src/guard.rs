use crate::error::ScalarError;
use std::fmt;

/// A raw value handed to a numeric coercion.
///
/// It mirrors what the legacy runtime accepted: booleans, numbers and arbitrary text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input<'a> {
    Boolean(bool),
    Number(f64),
    Text(&'a str),
}

impl From<bool> for Input<'_> {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for Input<'_> {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for Input<'_> {
    #[inline]
    fn from(value: f32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for Input<'_> {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for Input<'_> {
    #[inline]
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for Input<'_> {
    /// Values beyond 2⁵³ lose precision, as they did in the legacy runtime.
    #[expect(clippy::cast_precision_loss)]
    #[inline]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl<'a> From<&'a str> for Input<'a> {
    #[inline]
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    #[inline]
    fn from(value: &'a String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(value) => value.fmt(f),
            Self::Number(value) => f.write_str(ryu_js::Buffer::new().format(*value)),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Checks that `input` denotes a finite number and returns it.
///
/// Booleans become 0 and 1, empty text becomes 0.
pub fn guard<'a>(input: impl Into<Input<'a>>) -> Result<f64, ScalarError> {
    crate::error::reported(check_finite(input.into()))
}

/// A value that may still denote "no value" once computed.
pub trait Nullable {
    /// Computed values are never null unless their type says otherwise.
    #[inline]
    fn is_null(&self) -> bool {
        false
    }
}

impl Nullable for f64 {
    #[inline]
    fn is_null(&self) -> bool {
        !self.is_finite()
    }
}

impl Nullable for f32 {
    #[inline]
    fn is_null(&self) -> bool {
        !self.is_finite()
    }
}

impl Nullable for i64 {}
impl Nullable for String {}
impl Nullable for &str {}

/// Returns `value` unless it is a failure or a non-finite number, `fallback` otherwise.
///
/// ```
/// use oxscalar::{IntegerWidth, if_null, to_int};
///
/// let fallback = to_int(IntegerWidth::One, 0)?;
/// assert_eq!(if_null(to_int(IntegerWidth::One, 300), fallback), fallback);
/// assert_eq!(if_null(Ok::<_, ()>(f64::NAN), 1.), 1.);
/// # Result::<_, oxscalar::ScalarError>::Ok(())
/// ```
#[inline]
pub fn if_null<T: Nullable, E>(value: Result<T, E>, fallback: T) -> T {
    match value {
        Ok(value) if !value.is_null() => value,
        _ => fallback,
    }
}

pub(crate) fn check_finite(input: Input<'_>) -> Result<f64, ScalarError> {
    let value = match input {
        Input::Boolean(value) => return Ok(if value { 1. } else { 0. }),
        Input::Number(value) => value,
        Input::Text(text) => parse_number_text(text),
    };
    if value.is_nan() {
        Err(ScalarError::NotANumber)
    } else if value.is_infinite() {
        Err(ScalarError::Infinite)
    } else {
        Ok(value)
    }
}

/// Reads a decimal number literal, `NaN` if the text is not one.
fn parse_number_text(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.;
    }
    text.parse().unwrap_or(f64::NAN)
}

/// Any finite number with more than that many digits is zero beyond every supported scale.
const MAX_EXPONENT: i64 = 400;

/// The exact decimal digits of a finite number: sign, integer digits and fractional digits.
///
/// The integer digits never start with `0`, so zero has an empty integer part.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct DecimalDigits {
    pub negative: bool,
    pub integer: String,
    pub fraction: String,
}

impl DecimalDigits {
    /// Decomposes an already guarded input.
    ///
    /// Text keeps all its digits, other inputs use the shortest round-trip form of `value`.
    pub fn new(input: Input<'_>, value: f64) -> Self {
        match input {
            Input::Text(text) if !text.trim().is_empty() => Self::parse(text.trim()),
            _ => Self::parse(ryu_js::Buffer::new().format_finite(value)),
        }
    }

    /// Parses a finite number literal such as `-12.5`, `.5`, `1e+21` or `1.5e-7`.
    fn parse(literal: &str) -> Self {
        let (negative, literal) = if let Some(rest) = literal.strip_prefix('-') {
            (true, rest)
        } else {
            (false, literal.strip_prefix('+').unwrap_or(literal))
        };
        let (mantissa, exponent) = match literal.find(['e', 'E']) {
            Some(position) => (&literal[..position], exponent(&literal[position + 1..])),
            None => (literal, 0),
        };
        let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let digits = format!("{integer}{fraction}");
        let point = i64::try_from(integer.len())
            .unwrap_or(i64::MAX)
            .saturating_add(exponent);
        let (integer, fraction) = if point <= 0 {
            (
                String::new(),
                format!(
                    "{}{digits}",
                    "0".repeat(usize::try_from(-point).unwrap_or(0))
                ),
            )
        } else if let Some(padding) = usize::try_from(point)
            .ok()
            .and_then(|point| point.checked_sub(digits.len()))
        {
            (format!("{digits}{}", "0".repeat(padding)), String::new())
        } else {
            let point = usize::try_from(point).unwrap_or(0);
            (digits[..point].to_owned(), digits[point..].to_owned())
        };
        let integer = integer.trim_start_matches('0').to_owned();
        let negative = negative && (!integer.is_empty() || fraction.bytes().any(|b| b != b'0'));
        Self {
            negative,
            integer,
            fraction,
        }
    }
}

/// The exponent of a literal, saturated to ±[`MAX_EXPONENT`] when it does not fit an `i64`.
fn exponent(text: &str) -> i64 {
    let saturated = if text.starts_with('-') {
        -MAX_EXPONENT
    } else {
        MAX_EXPONENT
    };
    text.parse::<i64>()
        .unwrap_or(saturated)
        .clamp(-MAX_EXPONENT, MAX_EXPONENT)
}
