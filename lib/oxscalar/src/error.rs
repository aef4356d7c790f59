/// A failure of a scalar coercion.
///
/// Each kind maps to one diagnostic code of the legacy type system (see [`ScalarError::code`]).
/// The first violated precondition of a coercion determines the reported kind.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, thiserror::Error)]
pub enum ScalarError {
    #[error("Not a Number!")]
    NotANumber,
    #[error("Number is Infinity!")]
    Infinite,
    #[error("Integer overflow!")]
    IntegerOverflow,
    #[error("Integer cannot be safely represented!")]
    UnsafeInteger,
    #[error("Money overflow!")]
    MoneyOverflow,
    #[error("Invalid Date!")]
    InvalidDate,
    #[error("Invalid Day/Month!")]
    InvalidDayMonth,
    #[error("Decimal overflow!")]
    DecimalOverflow,
    #[error("Precision must be between 1 and 39!")]
    InvalidPrecision,
    #[error("Scale cannot be more than precision!")]
    InvalidScale,
    #[error("Date truncate only works on absolute dates!")]
    IntervalTruncate,
}

impl ScalarError {
    /// The diagnostic code the legacy runtime attached to this failure.
    #[inline]
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotANumber => "E_US100F_4111",
            Self::Infinite => "E_US1069_4201",
            Self::IntegerOverflow => "E_US1068_4200",
            Self::UnsafeInteger => "E_JSunsafeInt",
            Self::MoneyOverflow => "E_US1131_4401",
            Self::InvalidDate => "E_US10CE_4302",
            Self::InvalidDayMonth => "E_US10D1_4305",
            Self::DecimalOverflow => "E_US2535_9525_DECOVF_ERROR",
            Self::InvalidPrecision => "E_DECIMAL_PRECISION",
            Self::InvalidScale => "E_DECIMAL_SCALE",
            Self::IntervalTruncate => "E_US10D9_4313",
        }
    }

    /// Emits the structured diagnostic for this failure.
    ///
    /// Public coercions call it exactly once, on the error they return.
    #[inline]
    pub fn report(&self) {
        tracing::warn!(code = self.code(), kind = ?self, "{self}");
    }
}

/// Reports the error of `result`, if any, and hands `result` back unchanged.
#[inline]
pub(crate) fn reported<T>(result: Result<T, ScalarError>) -> Result<T, ScalarError> {
    result.inspect_err(ScalarError::report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(ScalarError::NotANumber.code(), "E_US100F_4111");
        assert_eq!(ScalarError::InvalidDayMonth.code(), "E_US10D1_4305");
        assert_eq!(ScalarError::IntervalTruncate.code(), "E_US10D9_4313");
    }

    #[test]
    fn messages() {
        assert_eq!(ScalarError::Infinite.to_string(), "Number is Infinity!");
        assert_eq!(ScalarError::MoneyOverflow.to_string(), "Money overflow!");
        assert_eq!(
            ScalarError::InvalidPrecision.to_string(),
            "Precision must be between 1 and 39!"
        );
    }

    #[test]
    fn reported_keeps_the_result() {
        assert_eq!(reported::<()>(Err(ScalarError::InvalidDate)), Err(ScalarError::InvalidDate));
        assert_eq!(reported(Ok(1)), Ok(1));
    }
}
