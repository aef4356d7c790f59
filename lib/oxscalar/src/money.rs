use crate::error::{ScalarError, reported};
use crate::guard::{DecimalDigits, Input, Nullable, check_finite};
use std::fmt;

/// A fixed-point amount with exactly two fractional digits.
///
/// The amount is bounded by ±999 999 999 999.99 and stored in cents.
///
/// ```
/// use oxscalar::{MoneyValue, ScalarError};
///
/// assert_eq!(MoneyValue::new("$1,234.565")?.to_string(), "1234.57");
/// assert_eq!(
///     MoneyValue::new("$1,000,000,000,000.00"),
///     Err(ScalarError::MoneyOverflow)
/// );
/// # Result::<_, ScalarError>::Ok(())
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct MoneyValue {
    cents: i64,
}

impl MoneyValue {
    pub const MAX: Self = Self {
        cents: 99_999_999_999_999,
    };
    pub const MIN: Self = Self {
        cents: -99_999_999_999_999,
    };

    /// Coerces `input` into an amount of money.
    ///
    /// Currency symbols and `,` group separators are ignored in text.
    /// The amount is rounded half away from zero to the cent.
    pub fn new<'a>(input: impl Into<Input<'a>>) -> Result<Self, ScalarError> {
        reported(Self::coerce(input.into()))
    }

    fn coerce(input: Input<'_>) -> Result<Self, ScalarError> {
        let stripped;
        let input = if let Input::Text(text) = input {
            stripped = text
                .chars()
                .filter(|c| *c != ',' && !is_currency_symbol(*c))
                .collect::<String>();
            Input::Text(&stripped)
        } else {
            input
        };
        let value = check_finite(input)?;
        if !(Self::MIN.to_f64() <= value && value <= Self::MAX.to_f64()) {
            return Err(ScalarError::MoneyOverflow);
        }
        let DecimalDigits {
            negative,
            integer,
            fraction,
        } = DecimalDigits::new(input, value);
        let mut cents = 0_i64;
        for digit in integer.bytes().chain(fraction.bytes().chain(*b"00").take(2)) {
            cents = cents
                .checked_mul(10)
                .and_then(|c| c.checked_add(i64::from(digit - b'0')))
                .ok_or(ScalarError::MoneyOverflow)?;
        }
        if fraction.as_bytes().get(2).is_some_and(|digit| *digit >= b'5') {
            cents += 1;
        }
        let cents = if negative { -cents } else { cents };
        if !(Self::MIN.cents <= cents && cents <= Self::MAX.cents) {
            return Err(ScalarError::MoneyOverflow);
        }
        Ok(Self { cents })
    }

    #[inline]
    #[must_use]
    pub const fn from_cents(cents: i64) -> Option<Self> {
        if Self::MIN.cents <= cents && cents <= Self::MAX.cents {
            Some(Self { cents })
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.cents
    }

    /// The nearest double, as the legacy runtime stored it.
    #[expect(clippy::cast_precision_loss)]
    #[inline]
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.cents as f64 / 100.
    }
}

impl From<MoneyValue> for f64 {
    #[inline]
    fn from(value: MoneyValue) -> Self {
        value.to_f64()
    }
}

impl fmt::Display for MoneyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cents < 0 {
            f.write_str("-")?;
        }
        let cents = self.cents.unsigned_abs();
        write!(f, "{}.{:02}", cents / 100, cents % 100)
    }
}

/// Characters of the Unicode "Currency Symbol" (Sc) category.
fn is_currency_symbol(c: char) -> bool {
    matches!(
        c,
        '$' | '\u{A2}'..='\u{A5}'
            | '\u{58F}'
            | '\u{60B}'
            | '\u{7FE}'..='\u{7FF}'
            | '\u{9F2}'..='\u{9F3}'
            | '\u{9FB}'
            | '\u{AF1}'
            | '\u{BF9}'
            | '\u{E3F}'
            | '\u{17DB}'
            | '\u{20A0}'..='\u{20C0}'
            | '\u{A838}'
            | '\u{FDFC}'
            | '\u{FE69}'
            | '\u{FF04}'
            | '\u{FFE0}'..='\u{FFE1}'
            | '\u{FFE5}'..='\u{FFE6}'
            | '\u{11FDD}'..='\u{11FE0}'
            | '\u{1E2FF}'
            | '\u{1ECB0}'
    )
}

impl Nullable for MoneyValue {}

/// Shorthand for [`MoneyValue::new`].
#[inline]
pub fn to_money<'a>(input: impl Into<Input<'a>>) -> Result<MoneyValue, ScalarError> {
    MoneyValue::new(input)
}

#[cfg(test)]
#[expect(clippy::panic_in_result_fn)]
mod tests {
    use super::*;

    #[test]
    fn bounds() -> Result<(), ScalarError> {
        assert_eq!(to_money("-999999999999.99")?, MoneyValue::MIN);
        assert_eq!(to_money("999999999999.99")?, MoneyValue::MAX);
        assert_eq!(
            to_money("$1,000,000,000,000.00"),
            Err(ScalarError::MoneyOverflow)
        );
        assert_eq!(to_money(-1e12), Err(ScalarError::MoneyOverflow));
        Ok(())
    }

    #[test]
    fn symbols() -> Result<(), ScalarError> {
        assert_eq!(to_money("$12.50")?.cents(), 1250);
        assert_eq!(to_money("\u{20AC}1,234")?.cents(), 123_400);
        assert_eq!(to_money("\u{A3} 3")?.cents(), 300);
        assert_eq!(to_money("12 USD"), Err(ScalarError::NotANumber));
        Ok(())
    }

    #[test]
    fn rounds_half_away_from_zero() -> Result<(), ScalarError> {
        assert_eq!(to_money("1.005")?.cents(), 101);
        assert_eq!(to_money("1.004")?.cents(), 100);
        assert_eq!(to_money("-1.005")?.cents(), -101);
        assert_eq!(to_money(2.675)?.cents(), 268);
        Ok(())
    }

    #[test]
    fn inputs() -> Result<(), ScalarError> {
        assert_eq!(to_money(true)?.cents(), 100);
        assert_eq!(to_money("")?.cents(), 0);
        assert_eq!(to_money(f64::NAN), Err(ScalarError::NotANumber));
        assert_eq!(to_money(f64::INFINITY), Err(ScalarError::Infinite));
        assert_eq!(to_money("1e-99999999999999999999")?.cents(), 0);
        Ok(())
    }

    #[test]
    fn display() -> Result<(), ScalarError> {
        assert_eq!(to_money(12.5)?.to_string(), "12.50");
        assert_eq!(to_money("-0.07")?.to_string(), "-0.07");
        assert_eq!(to_money("-0.001")?.to_string(), "0.00");
        assert_eq!(to_money(12.5)?.to_f64(), 12.5);
        assert_eq!(MoneyValue::from_cents(1), Some(MoneyValue { cents: 1 }));
        assert_eq!(MoneyValue::from_cents(i64::MAX), None);
        Ok(())
    }
}
