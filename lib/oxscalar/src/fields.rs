//! Calendar fields, renderings, truncation and extraction of temporal values.
//!
//! Every function parses its input with [`to_date`](crate::to_date) first and reports the
//! failure if there is one. Intervals are read in UTC from the epoch, instants in the local
//! zone of the [`DateContext`].

use crate::calendar::{
    CivilDateTime, MILLIS_PER_DAY, MONTH_ABBREVIATIONS, MONTH_NAMES, WEEKDAY_ABBREVIATIONS,
    WEEKDAY_NAMES, make_day, make_millis,
};
use crate::context::DateContext;
use crate::error::{ScalarError, reported};
use crate::parser::{millis_to_instant, parse_date};
use crate::temporal::{DateInput, TemporalValue};
use crate::timezone::TimezoneOffset;
use crate::units::{TemporalUnit, unit_quantity};

fn parsed<'a, T>(
    value: impl Into<DateInput<'a>>,
    context: &DateContext,
    read: impl FnOnce(&TemporalValue) -> Result<T, ScalarError>,
) -> Result<T, ScalarError> {
    reported(parse_date(value.into(), context).and_then(|value| read(&value)))
}

fn field<'a, T>(
    value: impl Into<DateInput<'a>>,
    context: &DateContext,
    read: impl FnOnce(&CivilDateTime) -> T,
) -> Result<T, ScalarError> {
    parsed(value, context, |value| Ok(read(&value.fields(context))))
}

pub fn year<'a>(value: impl Into<DateInput<'a>>, context: &DateContext) -> Result<i64, ScalarError> {
    field(value, context, CivilDateTime::year)
}

/// From 1 to 12.
pub fn month<'a>(value: impl Into<DateInput<'a>>, context: &DateContext) -> Result<u8, ScalarError> {
    field(value, context, CivilDateTime::month)
}

/// From 1 to 4.
pub fn quarter<'a>(
    value: impl Into<DateInput<'a>>,
    context: &DateContext,
) -> Result<u8, ScalarError> {
    field(value, context, quarter_of)
}

fn quarter_of(fields: &CivilDateTime) -> u8 {
    (fields.month() - 1) / 3 + 1
}

pub fn day<'a>(value: impl Into<DateInput<'a>>, context: &DateContext) -> Result<u8, ScalarError> {
    field(value, context, CivilDateTime::day)
}

#[inline]
pub fn day_of_month<'a>(
    value: impl Into<DateInput<'a>>,
    context: &DateContext,
) -> Result<u8, ScalarError> {
    day(value, context)
}

pub fn hour<'a>(value: impl Into<DateInput<'a>>, context: &DateContext) -> Result<u8, ScalarError> {
    field(value, context, CivilDateTime::hour)
}

pub fn minute<'a>(
    value: impl Into<DateInput<'a>>,
    context: &DateContext,
) -> Result<u8, ScalarError> {
    field(value, context, CivilDateTime::minute)
}

pub fn second<'a>(
    value: impl Into<DateInput<'a>>,
    context: &DateContext,
) -> Result<u8, ScalarError> {
    field(value, context, CivilDateTime::second)
}

/// Values have second resolution: always 0, the input is never read or validated.
#[inline]
pub fn millisecond<'a>(_value: impl Into<DateInput<'a>>) -> i64 {
    0
}

/// Always 0, the input is never read or validated.
#[inline]
pub fn microsecond<'a>(_value: impl Into<DateInput<'a>>) -> i64 {
    0
}

/// Always 0, the input is never read or validated.
#[inline]
pub fn nanosecond<'a>(_value: impl Into<DateInput<'a>>) -> i64 {
    0
}

/// The US week number: weeks start on Monday and the days before the first Monday
/// of January are in week 0.
///
/// ```
/// use oxscalar::{Clock, DateContext, LocalZone, TimezoneOffset, week, week_iso};
///
/// let context = DateContext::new(LocalZone::Fixed(TimezoneOffset::UTC), Clock::Fixed(0));
/// assert_eq!(week("2020-01-01", &context)?, 0);
/// assert_eq!(week_iso("2020-01-01", &context)?, 1);
/// # Result::<_, oxscalar::ScalarError>::Ok(())
/// ```
pub fn week<'a>(value: impl Into<DateInput<'a>>, context: &DateContext) -> Result<u16, ScalarError> {
    field(value, context, week_of)
}

fn week_of(fields: &CivilDateTime) -> u16 {
    let weekday = match fields.weekday() {
        0 => 7,
        weekday => u16::from(weekday),
    };
    (fields.ordinal() + 7 - weekday) / 7
}

/// The ISO 8601 week number, the week of the Thursday of the value's week.
pub fn week_iso<'a>(
    value: impl Into<DateInput<'a>>,
    context: &DateContext,
) -> Result<u16, ScalarError> {
    field(value, context, iso_week_of)
}

fn iso_week_of(fields: &CivilDateTime) -> u16 {
    let weekday = match fields.weekday() {
        0 => 7,
        weekday => i64::from(weekday),
    };
    let thursday = make_day(
        fields.year(),
        i64::from(fields.month()) - 1,
        i64::from(fields.day()) + 4 - weekday,
    );
    CivilDateTime::from_millis(thursday * MILLIS_PER_DAY).ordinal().div_ceil(7)
}

/// The weekday from `offset` (Sunday) to `offset + 6` (Saturday), `offset` defaults to 1.
pub fn day_of_week<'a>(
    value: impl Into<DateInput<'a>>,
    offset: Option<i64>,
    context: &DateContext,
) -> Result<i64, ScalarError> {
    field(value, context, |fields| {
        i64::from(fields.weekday()) + offset.unwrap_or(1)
    })
}

/// From 1 to 366.
pub fn day_of_year<'a>(
    value: impl Into<DateInput<'a>>,
    context: &DateContext,
) -> Result<u16, ScalarError> {
    field(value, context, CivilDateTime::ordinal)
}

/// The abbreviated weekday name, `Sun` to `Sat`.
pub fn dow<'a>(
    value: impl Into<DateInput<'a>>,
    context: &DateContext,
) -> Result<&'static str, ScalarError> {
    field(value, context, weekday_abbreviation)
}

fn weekday_abbreviation(fields: &CivilDateTime) -> &'static str {
    WEEKDAY_ABBREVIATIONS
        .get(usize::from(fields.weekday()))
        .copied()
        .unwrap_or_default()
}

fn month_abbreviation(fields: &CivilDateTime) -> &'static str {
    MONTH_ABBREVIATIONS
        .get(usize::from(fields.month()) - 1)
        .copied()
        .unwrap_or_default()
}

/// Renders a value with a format made of `YYYY`, `YY`, `MM`, `MONTH`, `MON`, `DD`, `HH12`,
/// `HH24`, `HH`, `MI`, `SS`, `AM`, `PM`, `DAY` and `DY` tokens.
///
/// Each token is replaced once, at its first occurrence. Without a format the value is
/// written `Www Mmm dd yyyy hh:mm:ss GMT+hhmm`.
///
/// ```
/// use oxscalar::{Clock, DateContext, LocalZone, TimezoneOffset, to_char};
///
/// let context = DateContext::new(LocalZone::Fixed(TimezoneOffset::UTC), Clock::Fixed(0));
/// assert_eq!(
///     to_char("2020-03-17 13:45:30", Some("DD MON YYYY HH12:MI PM"), &context)?,
///     "17 MAR 2020 01:45 PM"
/// );
/// assert_eq!(
///     to_char("2020-03-17 13:45:30", None, &context)?,
///     "Tue Mar 17 2020 13:45:30 GMT+0000"
/// );
/// # Result::<_, oxscalar::ScalarError>::Ok(())
/// ```
pub fn to_char<'a>(
    value: impl Into<DateInput<'a>>,
    format: Option<&str>,
    context: &DateContext,
) -> Result<String, ScalarError> {
    parsed(value, context, |value| {
        let fields = value.fields(context);
        Ok(match format {
            Some(format) => format_fields(&fields, format),
            None => {
                let offset = if value.is_interval() {
                    TimezoneOffset::UTC
                } else {
                    context.zone().offset_at(value.millis())
                };
                format!(
                    "{} {} {:02} {:04} {:02}:{:02}:{:02} {}",
                    weekday_abbreviation(&fields),
                    month_abbreviation(&fields),
                    fields.day(),
                    fields.year(),
                    fields.hour(),
                    fields.minute(),
                    fields.second(),
                    offset.to_gmt_string()
                )
            }
        })
    })
}

fn format_fields(fields: &CivilDateTime, format: &str) -> String {
    let month_name = MONTH_NAMES
        .get(usize::from(fields.month()) - 1)
        .copied()
        .unwrap_or_default();
    let day_name = WEEKDAY_NAMES
        .get(usize::from(fields.weekday()))
        .copied()
        .unwrap_or_default();
    let year = fields.year().to_string();
    let meridiem = if fields.hour() < 12 { "AM" } else { "PM" };
    let hour12 = format!("{:02}", fields.hour() % 12);

    let text = if format.contains("MON") {
        format
            .replacen("MONTH", month_name, 1)
            .replacen("MON", month_name.get(..3).unwrap_or_default(), 1)
    } else {
        format.replacen("MM", &format!("{:02}", fields.month()), 1)
    };
    text.replacen("HH12", &hour12, 1)
        .replacen("HH24", &format!("{:02}", fields.hour()), 1)
        .replacen("HH", &hour12, 1)
        .replacen("MI", &format!("{:02}", fields.minute()), 1)
        .replacen("SS", &format!("{:02}", fields.second()), 1)
        .replacen("DD", &format!("{:02}", fields.day()), 1)
        .replacen("DAY", day_name, 1)
        .replacen("DY", day_name.get(..3).unwrap_or_default(), 1)
        .replacen("YYYY", &year, 1)
        .replacen("YY", year.get(2..4).unwrap_or_default(), 1)
        .replacen("AM", meridiem, 1)
        .replacen("PM", meridiem, 1)
}

/// `yyyy_mm_dd hh:mm:ss GMT` in UTC, the local calendar date at `00:00:00` for date-only values.
pub fn date_gmt<'a>(
    value: impl Into<DateInput<'a>>,
    context: &DateContext,
) -> Result<String, ScalarError> {
    parsed(value, context, |value| {
        Ok(if value.is_date_only() {
            let fields = context.local_fields(value.millis());
            format!(
                "{:04}_{:02}_{:02} 00:00:00 GMT",
                fields.year(),
                fields.month(),
                fields.day()
            )
        } else {
            gmt_string(&CivilDateTime::from_millis(value.millis()))
        })
    })
}

/// [`date_gmt`] of a Unix timestamp in seconds.
pub fn gmt_timestamp(seconds: f64) -> Result<String, ScalarError> {
    reported(
        timestamp(seconds).map(|value| gmt_string(&CivilDateTime::from_millis(value.millis()))),
    )
}

fn gmt_string(fields: &CivilDateTime) -> String {
    format!(
        "{:04}_{:02}_{:02} {:02}:{:02}:{:02} GMT",
        fields.year(),
        fields.month(),
        fields.day(),
        fields.hour(),
        fields.minute(),
        fields.second()
    )
}

fn timestamp(seconds: f64) -> Result<TemporalValue, ScalarError> {
    millis_to_instant(seconds * 1000., false)
}

/// The local date of a Unix timestamp in seconds, ` d-mon-yy`.
pub fn date_from_timestamp(seconds: f64, context: &DateContext) -> Result<String, ScalarError> {
    reported(timestamp(seconds).map(|value| {
        let fields = context.local_fields(value.millis());
        let year = format!("{:04}", fields.year());
        format!(
            "{:>2}-{}-{}",
            fields.day(),
            month_abbreviation(&fields).to_ascii_lowercase(),
            year.get(2..).unwrap_or_default()
        )
    }))
}

/// The local date of a Unix timestamp in seconds, `dd-mon-yyyy`.
pub fn date4_from_timestamp(seconds: f64, context: &DateContext) -> Result<String, ScalarError> {
    reported(timestamp(seconds).map(|value| {
        let fields = context.local_fields(value.millis());
        format!(
            "{:02}-{}-{:04}",
            fields.day(),
            month_abbreviation(&fields).to_ascii_lowercase(),
            fields.year()
        )
    }))
}

/// The local time of a Unix timestamp in seconds, `hh:mm`.
pub fn time_from_timestamp(seconds: f64, context: &DateContext) -> Result<String, ScalarError> {
    reported(timestamp(seconds).map(|value| {
        let fields = context.local_fields(value.millis());
        format!("{:02}:{:02}", fields.hour(), fields.minute())
    }))
}

/// Whether daylight saving time is in effect: the offset differs from the smaller of the
/// January 1st and July 1st offsets of the year.
///
/// Intervals have no zone and are never in daylight saving time.
pub fn is_dst<'a>(
    value: impl Into<DateInput<'a>>,
    context: &DateContext,
) -> Result<bool, ScalarError> {
    parsed(value, context, |value| {
        if value.is_interval() {
            return Ok(false);
        }
        let zone = context.zone();
        let year = context.local_fields(value.millis()).year();
        let january = zone.offset_of_local(make_millis(year, 0, 1, 0, 0, 0));
        let july = zone.offset_of_local(make_millis(year, 6, 1, 0, 0, 0));
        Ok(january.min(july) != zone.offset_at(value.millis()))
    })
}

/// Expresses the length of an interval, or the milliseconds since the epoch of an instant,
/// in `unit`.
///
/// Returns `None` for unknown units and units without a fixed length.
pub fn interval<'a>(
    unit: &str,
    value: impl Into<DateInput<'a>>,
    context: &DateContext,
) -> Result<Option<f64>, ScalarError> {
    parsed(value, context, |value| {
        #[expect(clippy::cast_precision_loss)]
        let millis = value.millis() as f64;
        Ok(TemporalUnit::from_name(unit).and_then(|unit| unit_quantity(unit, millis)))
    })
}

/// Truncates an instant to the start of its `unit` in the local zone.
///
/// Truncations to a year, quarter, month, week or day are date-only values.
/// Weeks start on Monday, for both week flavors.
pub fn truncate_to<'a>(
    unit: TemporalUnit,
    value: impl Into<DateInput<'a>>,
    context: &DateContext,
) -> Result<TemporalValue, ScalarError> {
    parsed(value, context, |value| truncate(unit, value, context))
}

/// [`truncate_to`] with the unit given by one of its names.
///
/// The value is checked first: intervals fail even with an unknown unit,
/// which otherwise yields `None`.
///
/// ```
/// use oxscalar::{Clock, DateContext, LocalZone, TimezoneOffset, date_trunc, to_date};
///
/// let context = DateContext::new(LocalZone::Fixed(TimezoneOffset::UTC), Clock::Fixed(0));
/// assert_eq!(
///     date_trunc("qtr", "2020-08-05", &context)?,
///     Some(to_date("2020-07-01", &context)?)
/// );
/// assert_eq!(date_trunc("decade", "2020-08-05", &context)?, None);
/// assert!(date_trunc("month", "3 days", &context).is_err());
/// # Result::<_, oxscalar::ScalarError>::Ok(())
/// ```
pub fn date_trunc<'a>(
    unit: &str,
    value: impl Into<DateInput<'a>>,
    context: &DateContext,
) -> Result<Option<TemporalValue>, ScalarError> {
    parsed(value, context, |value| {
        if value.is_interval() {
            return Err(ScalarError::IntervalTruncate);
        }
        TemporalUnit::from_name(unit)
            .map(|unit| truncate(unit, value, context))
            .transpose()
    })
}

fn truncate(
    unit: TemporalUnit,
    value: &TemporalValue,
    context: &DateContext,
) -> Result<TemporalValue, ScalarError> {
    if value.is_interval() {
        return Err(ScalarError::IntervalTruncate);
    }
    let fields = context.local_fields(value.millis());
    let year = fields.year();
    let month = i64::from(fields.month()) - 1;
    let day = i64::from(fields.day());
    let hour = i64::from(fields.hour());
    let minute = i64::from(fields.minute());
    let (wall, date_only) = match unit {
        TemporalUnit::Year => (make_millis(year, 0, 1, 0, 0, 0), true),
        TemporalUnit::Quarter => (make_millis(year, month - month % 3, 1, 0, 0, 0), true),
        TemporalUnit::Month => (make_millis(year, month, 1, 0, 0, 0), true),
        TemporalUnit::Week | TemporalUnit::IsoWeek => {
            let monday = match fields.weekday() {
                0 => day - 6,
                weekday => day - i64::from(weekday) + 1,
            };
            (make_millis(year, month, monday, 0, 0, 0), true)
        }
        TemporalUnit::Day => (make_millis(year, month, day, 0, 0, 0), true),
        TemporalUnit::Hour => (make_millis(year, month, day, hour, 0, 0), false),
        TemporalUnit::Minute => (make_millis(year, month, day, hour, minute, 0), false),
        TemporalUnit::Second => (
            make_millis(year, month, day, hour, minute, fields.second().into()),
            false,
        ),
    };
    context
        .zone()
        .instant_of_local(wall)
        .and_then(|instant| TemporalValue::instant(instant, date_only))
        .ok_or(ScalarError::InvalidDate)
}

/// Reads the `unit` field of a value, [`week_iso`] for ISO weeks.
pub fn part_of<'a>(
    unit: TemporalUnit,
    value: impl Into<DateInput<'a>>,
    context: &DateContext,
) -> Result<i64, ScalarError> {
    field(value, context, |fields| part(unit, fields))
}

/// [`part_of`] with the unit given by one of its names, `None` for unknown units.
pub fn date_part<'a>(
    unit: &str,
    value: impl Into<DateInput<'a>>,
    context: &DateContext,
) -> Result<Option<i64>, ScalarError> {
    let Some(unit) = TemporalUnit::from_name(unit) else {
        return Ok(None);
    };
    part_of(unit, value, context).map(Some)
}

fn part(unit: TemporalUnit, fields: &CivilDateTime) -> i64 {
    match unit {
        TemporalUnit::Year => fields.year(),
        TemporalUnit::Quarter => quarter_of(fields).into(),
        TemporalUnit::Month => fields.month().into(),
        TemporalUnit::Week => week_of(fields).into(),
        TemporalUnit::IsoWeek => iso_week_of(fields).into(),
        TemporalUnit::Day => fields.day().into(),
        TemporalUnit::Hour => fields.hour().into(),
        TemporalUnit::Minute => fields.minute().into(),
        TemporalUnit::Second => fields.second().into(),
    }
}
