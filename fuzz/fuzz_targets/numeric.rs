#![no_main]

use libfuzzer_sys::fuzz_target;
use oxscalar::{
    DecimalValue, FloatWidth, IntegerWidth, MAX_SAFE_INTEGER, MoneyValue, to_decimal, to_float,
    to_int, to_money,
};

fuzz_target!(|data: &[u8]| {
    let [precision, scale, rest @ ..] = data else {
        return;
    };
    let Ok(text) = str::from_utf8(rest) else {
        return;
    };
    for width in [
        IntegerWidth::One,
        IntegerWidth::Two,
        IntegerWidth::Four,
        IntegerWidth::Eight,
    ] {
        if let Ok(integer) = to_int(width, text) {
            assert!(width.min() <= integer.value() && integer.value() <= width.max());
            assert!(integer.value().abs() <= MAX_SAFE_INTEGER);
        }
    }
    for width in [FloatWidth::Four, FloatWidth::Eight] {
        if let Ok(float) = to_float(width, text) {
            assert!(float.value().is_finite());
        }
    }
    if let Ok(money) = to_money(text) {
        assert!(MoneyValue::MIN <= money && money <= MoneyValue::MAX);
        assert_eq!(to_money(money.to_string().as_str()), Ok(money));
    }
    let precision = precision % (DecimalValue::MAX_PRECISION + 2);
    let scale = scale % (DecimalValue::MAX_PRECISION + 2);
    if let Ok(decimal) = to_decimal(text, precision, scale) {
        assert_eq!(to_decimal(decimal.to_string().as_str(), precision, scale), Ok(decimal));
    }
});
