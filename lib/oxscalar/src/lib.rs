#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![allow(clippy::return_self_not_must_use)]

mod calendar;
mod context;
mod decimal;
mod error;
mod fields;
mod float;
mod guard;
mod integer;
mod money;
mod native;
mod parser;
mod temporal;
mod timezone;
mod units;

pub use self::calendar::{CivilDateTime, MAX_INSTANT, days_in_month, is_leap_year, is_valid_date};
pub use self::context::{Clock, DateContext, ParseClockError};
pub use self::decimal::{DecimalValue, to_decimal};
pub use self::error::ScalarError;
pub use self::fields::{
    date_from_timestamp, date_gmt, date_part, date_trunc, date4_from_timestamp, day,
    day_of_month, day_of_week, day_of_year, dow, gmt_timestamp, hour, interval, is_dst,
    microsecond, millisecond, minute, month, nanosecond, part_of, quarter, second,
    time_from_timestamp, to_char, truncate_to, week, week_iso, year,
};
pub use self::float::{FloatValue, FloatWidth, to_float};
pub use self::guard::{Input, Nullable, guard, if_null};
pub use self::integer::{
    BoundedInteger, IntegerWidth, InvalidWidthError, MAX_SAFE_INTEGER, to_int,
};
pub use self::money::{MoneyValue, to_money};
pub use self::parser::to_date;
pub use self::temporal::{DateInput, Duration, TemporalValue};
pub use self::timezone::{InvalidTimezoneError, LocalZone, ParseTimezoneError, TimezoneOffset};
pub use self::units::{TemporalUnit, UnknownUnitError, interval_to_unit};
