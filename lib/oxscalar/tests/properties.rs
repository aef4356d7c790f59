#![cfg(test)]
#![expect(clippy::panic_in_result_fn)]

//! Boundary and round trip properties of the coercions, checked against a pinned context.

use oxscalar::{
    Clock, DateContext, DecimalValue, IntegerWidth, LocalZone, MAX_SAFE_INTEGER, ScalarError,
    TemporalUnit, TimezoneOffset, date_trunc, day, interval, interval_to_unit, month, to_date,
    to_decimal, to_int, to_money, year,
};

fn context() -> DateContext {
    // 2020-03-17T13:45:30Z
    DateContext::new(
        LocalZone::Fixed(TimezoneOffset::UTC),
        Clock::Fixed(1_584_452_730_000),
    )
}

#[expect(clippy::cast_precision_loss)]
#[test]
fn integer_bounds() -> Result<(), ScalarError> {
    for width in [
        IntegerWidth::One,
        IntegerWidth::Two,
        IntegerWidth::Four,
        IntegerWidth::Eight,
    ] {
        let (min, max) = if width == IntegerWidth::Eight {
            (-MAX_SAFE_INTEGER, MAX_SAFE_INTEGER)
        } else {
            (width.min(), width.max())
        };
        assert_eq!(to_int(width, max)?.value(), max);
        assert_eq!(to_int(width, min)?.value(), min);
        // Above 2^52 doubles have no fraction, stay below it for width 8.
        let (inner_max, inner_min) = if width == IntegerWidth::Eight {
            (1 << 51, -(1 << 51))
        } else {
            (max, min)
        };
        assert_eq!(to_int(width, inner_max as f64 + 0.5)?.value(), inner_max);
        assert_eq!(to_int(width, inner_min as f64 - 0.5)?.value(), inner_min);
        if width == IntegerWidth::Eight {
            assert_eq!(to_int(width, max + 1), Err(ScalarError::UnsafeInteger));
            assert_eq!(to_int(width, min - 1), Err(ScalarError::UnsafeInteger));
            assert_eq!(to_int(width, 1e19), Err(ScalarError::IntegerOverflow));
        } else {
            assert_eq!(to_int(width, max + 1), Err(ScalarError::IntegerOverflow));
            assert_eq!(to_int(width, min - 1), Err(ScalarError::IntegerOverflow));
        }
    }
    Ok(())
}

#[test]
fn integer_precondition_order() {
    assert_eq!(to_int(IntegerWidth::One, "abc"), Err(ScalarError::NotANumber));
    assert_eq!(to_int(IntegerWidth::One, f64::INFINITY), Err(ScalarError::Infinite));
    assert_eq!(to_int(IntegerWidth::One, true).map(|i| i.value()), Ok(1));
}

#[test]
fn decimal_is_idempotent() -> Result<(), ScalarError> {
    for (input, precision, scale) in [
        ("12.345", 5, 2),
        ("-99.9", 3, 1),
        ("0.5", 2, 1),
        ("123456789012345678901234567890.123456789", 39, 9),
        ("7", 39, 0),
    ] {
        let decimal = to_decimal(input, precision, scale)?;
        let again = to_decimal(decimal.to_string().as_str(), precision, scale)?;
        assert_eq!(again, decimal, "{input}");
        assert_eq!(decimal.set_value(decimal.to_string().as_str())?, decimal);
    }
    Ok(())
}

#[test]
fn decimal_truncates() -> Result<(), ScalarError> {
    assert_eq!(to_decimal(12.345, 5, 2)?.to_string(), "12.34");
    assert_eq!(to_decimal(123.456, 5, 2)?.to_string(), "123.45");
    assert_eq!(to_decimal(1234.5, 5, 2), Err(ScalarError::DecimalOverflow));
    assert_eq!(
        to_decimal(1.5, DecimalValue::DEFAULT_PRECISION, DecimalValue::DEFAULT_SCALE)?
            .to_string(),
        "1"
    );
    assert_eq!(to_decimal(1, 40, 0), Err(ScalarError::InvalidPrecision));
    assert_eq!(to_decimal(1, 2, 3), Err(ScalarError::InvalidScale));
    assert_eq!(to_decimal(f64::NAN, 40, 50), Err(ScalarError::NotANumber));
    assert_eq!(to_decimal(0.5, 2, 2), Err(ScalarError::DecimalOverflow));
    assert_eq!(to_decimal(-0.5, 2, 2), Err(ScalarError::DecimalOverflow));
    assert_eq!(to_decimal(-0.5, 1, 1), Err(ScalarError::DecimalOverflow));
    assert_eq!(to_decimal("1e-99999999999999999999", 39, 0)?.to_string(), "0");
    assert_eq!(
        to_decimal("1e+99999999999999999999", 39, 0),
        Err(ScalarError::Infinite)
    );
    Ok(())
}

#[test]
fn money_bounds() -> Result<(), ScalarError> {
    assert_eq!(
        to_money("$1,000,000,000,000.00"),
        Err(ScalarError::MoneyOverflow)
    );
    assert_eq!(to_money("-999999999999.99")?.to_string(), "-999999999999.99");
    assert_eq!(to_money("999999999999.99")?.to_string(), "999999999999.99");
    assert_eq!(to_money(1.005)?.to_string(), "1.01");
    Ok(())
}

#[test]
fn date_only_values() -> Result<(), ScalarError> {
    let context = context();
    let date = to_date("2020-01-15", &context)?;
    assert!(date.is_date_only());
    assert!(!date.is_interval());
    assert_eq!(year(date, &context)?, 2020);
    assert_eq!(month(date, &context)?, 1);
    assert_eq!(day(date, &context)?, 15);
    assert_eq!(to_date("01/15/2020", &context)?, date);
    assert_eq!(date.to_iso_string(&context), "2020-01-15");
    Ok(())
}

#[test]
fn invalid_days_and_months() {
    let context = context();
    assert_eq!(
        to_date("13/01/2020", &context),
        Err(ScalarError::InvalidDayMonth)
    );
    assert_eq!(
        to_date("02/30/2020", &context),
        Err(ScalarError::InvalidDayMonth)
    );
    assert_eq!(to_date("not a date", &context), Err(ScalarError::InvalidDate));
}

#[test]
fn truncations() -> Result<(), ScalarError> {
    let context = context();
    assert_eq!(
        date_trunc("month", "2020-03-17", &context)?,
        Some(to_date("2020-03-01", &context)?)
    );
    assert_eq!(
        date_trunc("quarter", "2020-08-05", &context)?,
        Some(to_date("2020-07-01", &context)?)
    );
    assert_eq!(
        date_trunc("month", "5 day 3 hour", &context),
        Err(ScalarError::IntervalTruncate)
    );
    Ok(())
}

#[expect(clippy::cast_precision_loss)]
#[test]
fn interval_conversions() -> Result<(), ScalarError> {
    let context = context();
    let duration = to_date("5 day 3 hour", &context)?;
    assert!(duration.is_interval());
    let hours = interval_to_unit("hour", duration.millis() as f64);
    assert!(hours.is_some_and(|hours| (hours - 123.).abs() < 1e-9));
    assert_eq!(interval("hour", duration, &context)?, Some(123.));
    assert_eq!(
        duration
            .duration()
            .and_then(|duration| duration.to_unit(TemporalUnit::Hour)),
        Some(123.)
    );
    Ok(())
}
