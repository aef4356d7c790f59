#![no_main]

use libfuzzer_sys::fuzz_target;
use oxscalar::{ScalarError, TemporalUnit, date_trunc, to_date};
use oxscalar_fuzz::contexts;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = str::from_utf8(data) else {
        return;
    };
    for context in contexts() {
        match to_date(text, &context) {
            Ok(value) => {
                assert!(!(value.is_interval() && value.is_date_only()));
                let rendered = value.to_iso_string(&context);
                if value.is_interval() {
                    assert_eq!(
                        date_trunc("day", value, &context),
                        Err(ScalarError::IntervalTruncate)
                    );
                    assert!(value.duration().is_some());
                } else {
                    for unit in TemporalUnit::ALL {
                        if let Ok(Some(truncated)) = date_trunc(unit.name(), value, &context) {
                            assert!(truncated.millis() <= value.millis(), "{rendered} {unit}");
                        }
                    }
                }
            }
            Err(error) => assert!(
                matches!(error, ScalarError::InvalidDate | ScalarError::InvalidDayMonth),
                "{text:?} {error:?}"
            ),
        }
    }
});
