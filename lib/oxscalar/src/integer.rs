use crate::error::{ScalarError, reported};
use crate::guard::{Input, Nullable, check_finite};
use std::fmt;

/// The largest integer a double can represent exactly, 2⁵³ - 1.
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Storage width of a [`BoundedInteger`], in bytes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum IntegerWidth {
    /// `integer1`, aka `tinyint`
    One,
    /// `integer2`, aka `smallint`
    Two,
    /// `integer4`, aka `integer`
    Four,
    /// `integer8`, aka `bigint`
    Eight,
}

impl IntegerWidth {
    #[inline]
    #[must_use]
    pub const fn min(self) -> i64 {
        match self {
            Self::One => i8::MIN as i64,
            Self::Two => i16::MIN as i64,
            Self::Four => i32::MIN as i64,
            Self::Eight => i64::MIN,
        }
    }

    #[inline]
    #[must_use]
    pub const fn max(self) -> i64 {
        match self {
            Self::One => i8::MAX as i64,
            Self::Two => i16::MAX as i64,
            Self::Four => i32::MAX as i64,
            Self::Eight => i64::MAX,
        }
    }

    #[inline]
    #[must_use]
    pub const fn bytes(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
        }
    }
}

impl TryFrom<u8> for IntegerWidth {
    type Error = InvalidWidthError;

    #[inline]
    fn try_from(value: u8) -> Result<Self, InvalidWidthError> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            4 => Ok(Self::Four),
            8 => Ok(Self::Eight),
            _ => Err(InvalidWidthError::new(value)),
        }
    }
}

/// A storage width that the type system does not have.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("{width} is not a valid storage width")]
pub struct InvalidWidthError {
    width: u8,
}

impl InvalidWidthError {
    #[inline]
    pub(crate) const fn new(width: u8) -> Self {
        Self { width }
    }
}

/// A signed integer constrained to the range of its [`IntegerWidth`].
///
/// Width 8 is further limited to ±(2⁵³ - 1): the legacy runtime stored every number in a double.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BoundedInteger {
    width: IntegerWidth,
    value: i64,
}

impl BoundedInteger {
    /// Coerces `input` into an integer of the given width.
    ///
    /// The fractional part is truncated, then the range of the width is checked,
    /// then (width 8 only) that the value is a safe integer.
    ///
    /// ```
    /// use oxscalar::{BoundedInteger, IntegerWidth, ScalarError};
    ///
    /// assert_eq!(BoundedInteger::new(IntegerWidth::One, "127.9")?.value(), 127);
    /// assert_eq!(
    ///     BoundedInteger::new(IntegerWidth::One, 128),
    ///     Err(ScalarError::IntegerOverflow)
    /// );
    /// # Result::<_, ScalarError>::Ok(())
    /// ```
    pub fn new<'a>(width: IntegerWidth, input: impl Into<Input<'a>>) -> Result<Self, ScalarError> {
        reported(Self::coerce(width, input.into()))
    }

    // The bounds of width 8 are not exact doubles, 2⁶³ is the nearest one for both.
    #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn coerce(width: IntegerWidth, input: Input<'_>) -> Result<Self, ScalarError> {
        let value = check_finite(input)?.trunc();
        if !(width.min() as f64 <= value && value <= width.max() as f64) {
            return Err(ScalarError::IntegerOverflow);
        }
        if value.abs() > MAX_SAFE_INTEGER as f64 {
            return Err(ScalarError::UnsafeInteger);
        }
        Ok(Self {
            width,
            value: value as i64,
        })
    }

    #[inline]
    #[must_use]
    pub const fn width(self) -> IntegerWidth {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn value(self) -> i64 {
        self.value
    }

    /// The 32 bits the bitwise operations of the legacy runtime work on.
    #[expect(clippy::cast_possible_truncation)]
    #[inline]
    const fn bits(self) -> i32 {
        self.value as i32
    }

    #[inline]
    #[must_use]
    pub fn bit_and(self, other: i32) -> i32 {
        self.bits() & other
    }

    #[inline]
    #[must_use]
    pub fn bit_and_not(self, other: i32) -> i32 {
        self.bits() & !other
    }

    #[inline]
    #[must_use]
    pub fn bit_or(self, other: i32) -> i32 {
        self.bits() | other
    }

    #[inline]
    #[must_use]
    pub fn bit_xor(self, other: i32) -> i32 {
        self.bits() ^ other
    }

    #[inline]
    #[must_use]
    pub fn bit_not(self) -> i32 {
        !self.bits()
    }

    /// Clears bit `n` (taken modulo 32).
    #[inline]
    #[must_use]
    pub fn bit_clear(self, n: u32) -> i32 {
        self.bits() & !1_i32.wrapping_shl(n)
    }

    /// Flips bit `n` (taken modulo 32).
    #[inline]
    #[must_use]
    pub fn bit_flip(self, n: u32) -> i32 {
        self.bits() ^ 1_i32.wrapping_shl(n)
    }

    /// Sets bit `n` (taken modulo 32).
    #[inline]
    #[must_use]
    pub fn bit_set(self, n: u32) -> i32 {
        self.bits() | 1_i32.wrapping_shl(n)
    }

    /// Arithmetic right shift by `n`, or left shift by `-n` when `n` is negative.
    #[inline]
    #[must_use]
    pub fn bit_shift(self, n: i32) -> i32 {
        if n < 0 {
            self.bits().wrapping_shl(n.unsigned_abs())
        } else {
            self.bits().wrapping_shr(n.unsigned_abs())
        }
    }

    /// 1 if bit `n` (taken modulo 32) is set, 0 otherwise.
    #[inline]
    #[must_use]
    pub fn bit_test(self, n: u32) -> u8 {
        u8::from(self.bits() & 1_i32.wrapping_shl(n) != 0)
    }
}

impl From<BoundedInteger> for i64 {
    #[inline]
    fn from(value: BoundedInteger) -> Self {
        value.value
    }
}

impl fmt::Display for BoundedInteger {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl Nullable for BoundedInteger {}

/// Shorthand for [`BoundedInteger::new`].
#[inline]
pub fn to_int<'a>(width: IntegerWidth, input: impl Into<Input<'a>>) -> Result<BoundedInteger, ScalarError> {
    BoundedInteger::new(width, input)
}
