#![no_main]

use libfuzzer_sys::fuzz_target;
use oxscalar::{
    TemporalUnit, date_gmt, date_part, day_of_year, is_dst, month, to_char, to_date, week_iso,
};
use oxscalar_fuzz::{contexts, split_pair};

fuzz_target!(|data: &[u8]| {
    let Some((value, format)) = split_pair(data) else {
        return;
    };
    for context in contexts() {
        let Ok(date) = to_date(value, &context) else {
            continue;
        };
        let _ = to_char(date, Some(format), &context);
        let _ = to_char(date, None, &context);
        let _ = date_gmt(date, &context);
        let _ = is_dst(date, &context);
        if let Ok(month) = month(date, &context) {
            assert!((1..=12).contains(&month));
        }
        if let Ok(day) = day_of_year(date, &context) {
            assert!((1..=366).contains(&day));
        }
        if let Ok(week) = week_iso(date, &context) {
            assert!((1..=53).contains(&week));
        }
        for unit in TemporalUnit::ALL {
            let _ = date_part(unit.name(), date, &context);
        }
    }
});
