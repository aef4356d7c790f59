//! The date parser: an ordered list of shape rules followed by the generic reader.
//!
//! Free-form date texts carry no format tag, so each rule looks at literal characters at
//! fixed offsets and, when it recognizes its shape, extracts the calendar fields and rewrites
//! the text into a form the generic reader reads unambiguously.
//! The first matching rule wins.

use crate::calendar::{
    MAX_INSTANT, MILLIS_PER_SECOND, MONTH_ABBREVIATIONS, WEEKDAY_ABBREVIATIONS, is_valid_date,
    make_millis,
};
use crate::context::DateContext;
use crate::error::{ScalarError, reported};
use crate::native::parse_instant;
use crate::temporal::{DateInput, Duration, TemporalValue};
use crate::units::TemporalUnit;

/// Parses a date, a date-time or an interval.
///
/// Texts go through the shape rules in order: interval sequences (`5 day 3 hour`),
/// the `now` and `today` keywords, then positional shapes such as `dd-mmm-yyyy`,
/// `mm/dd/yyyy`, `yyyy-mm-dd`, `yyyymmdd` or `hh:mm`. Milliseconds become an instant,
/// already parsed values are returned as is.
///
/// ```
/// use oxscalar::{Clock, DateContext, LocalZone, TimezoneOffset, to_date};
///
/// let context = DateContext::new(LocalZone::Fixed(TimezoneOffset::UTC), Clock::Fixed(0));
/// let date = to_date("2020-01-15", &context)?;
/// assert!(date.is_date_only());
/// assert_eq!(date, to_date("01/15/2020", &context)?);
/// assert!(to_date("5 day 3 hour", &context)?.is_interval());
/// # Result::<_, oxscalar::ScalarError>::Ok(())
/// ```
pub fn to_date<'a>(
    input: impl Into<DateInput<'a>>,
    context: &DateContext,
) -> Result<TemporalValue, ScalarError> {
    reported(parse_date(input.into(), context))
}

/// [`to_date`] without the diagnostic, for the functions that report on their own.
pub(crate) fn parse_date(
    input: DateInput<'_>,
    context: &DateContext,
) -> Result<TemporalValue, ScalarError> {
    match input {
        DateInput::Value(value) => Ok(value),
        DateInput::Millis(millis) => millis_to_instant(millis, false),
        DateInput::Text(text) => parse_text(text, context),
    }
}

#[expect(clippy::cast_possible_truncation)]
pub(crate) fn millis_to_instant(millis: f64, date_only: bool) -> Result<TemporalValue, ScalarError> {
    if !millis.is_finite() {
        return Err(ScalarError::InvalidDate);
    }
    #[expect(clippy::cast_precision_loss)]
    let bound = MAX_INSTANT as f64;
    let millis = millis.trunc();
    if !(-bound..=bound).contains(&millis) {
        return Err(ScalarError::InvalidDate);
    }
    TemporalValue::instant(millis as i64, date_only).ok_or(ScalarError::InvalidDate)
}

fn parse_text(text: &str, context: &DateContext) -> Result<TemporalValue, ScalarError> {
    let shape = Shape::new(text);
    let rewrite = match RULES.iter().find(|rule| rule.matches(&shape)) {
        Some(rule) => {
            let outcome = rule.extract(&shape, context)?;
            tracing::trace!(rule = rule.name(), outcome = ?outcome, "date shape recognized");
            match outcome {
                Outcome::Value(value) => return Ok(value),
                Outcome::Rewritten(rewrite) => rewrite,
            }
        }
        None => Rewrite::unchanged(&shape),
    };
    rewrite.validate()?;
    let instant = parse_instant(&rewrite.text, context.zone()).ok_or(ScalarError::InvalidDate)?;
    TemporalValue::instant(instant, rewrite.date_only).ok_or(ScalarError::InvalidDate)
}

/// The trimmed text under inspection and its space separated tokens.
struct Shape<'a> {
    text: &'a str,
    tokens: Vec<&'a str>,
    date_only: bool,
}

impl<'a> Shape<'a> {
    fn new(text: &'a str) -> Self {
        let text = text.trim();
        Self {
            text,
            tokens: text.split(' ').collect(),
            date_only: !text.contains(':'),
        }
    }

    fn first_token(&self) -> &'a str {
        self.tokens.first().copied().unwrap_or_default()
    }

    fn char_at(&self, index: usize) -> Option<u8> {
        self.text.as_bytes().get(index).copied()
    }

    fn has(&self, index: usize, c: u8) -> bool {
        self.char_at(index) == Some(c)
    }

    /// The bytes `start..end` of the text, clamped to its length.
    fn slice(&self, start: usize, end: usize) -> &'a str {
        slice(self.text, start, end)
    }

    fn rest(&self, start: usize) -> &'a str {
        slice(self.text, start, self.text.len())
    }
}

fn slice(text: &str, start: usize, end: usize) -> &str {
    let end = end.min(text.len());
    text.get(start.min(end)..end).unwrap_or_default()
}

/// What a rule made of its text.
#[derive(Debug)]
enum Outcome {
    /// The rule built the value itself.
    Value(TemporalValue),
    /// A canonical text for the generic reader, with the fields to validate first.
    Rewritten(Rewrite),
}

#[derive(Debug)]
struct Rewrite {
    text: String,
    day: f64,
    month: f64,
    year: f64,
    date_only: bool,
}

impl Rewrite {
    /// A text passed along without fields, they are then not validated.
    fn unchanged(shape: &Shape<'_>) -> Self {
        Self::new(shape.text.to_owned(), shape, (0., 0., 0.))
    }

    fn new(text: String, shape: &Shape<'_>, (day, month, year): (f64, f64, f64)) -> Self {
        Self {
            text,
            day,
            month,
            year,
            date_only: shape.date_only,
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    fn validate(&self) -> Result<(), ScalarError> {
        if self.day.is_nan() || self.month.is_nan() || self.year.is_nan() {
            return Err(ScalarError::InvalidDate);
        }
        if self.day > 0. {
            let integral = [self.day, self.month, self.year]
                .iter()
                .all(|field| field.is_finite() && field.fract() == 0.);
            if !integral
                || !is_valid_date(self.day as i64, self.month as i64, self.year as i64)
            {
                return Err(ScalarError::InvalidDayMonth);
            }
        }
        Ok(())
    }
}

/// A recognizer of one text shape.
trait ShapeRule: Sync {
    fn name(&self) -> &'static str;

    fn matches(&self, shape: &Shape<'_>) -> bool;

    fn extract(&self, shape: &Shape<'_>, context: &DateContext) -> Result<Outcome, ScalarError>;
}

/// The rules, in the order they are tried.
static RULES: [&dyn ShapeRule; 14] = [
    &IntervalSequence,
    &Keyword,
    &DayMonthNameYear,
    &MonthDayYear,
    &IsoDate,
    &DottedDate,
    &UnderscoredDate,
    &MonthDay,
    &CompactMonthDayYear,
    &TimeOfDay,
    &CompactDate,
    &DottedDayMonthYear,
    &YearMonthNameDay,
    &MonthNameDayYear,
];

/// `5 day 3 hour`, `1:30 hrs`: quantity and unit pairs summed into a duration.
struct IntervalSequence;

impl ShapeRule for IntervalSequence {
    fn name(&self) -> &'static str {
        "interval sequence"
    }

    fn matches(&self, shape: &Shape<'_>) -> bool {
        shape.tokens.len() >= 2
            && shape.tokens.len() % 2 == 0
            && shape
                .tokens
                .iter()
                .skip(1)
                .step_by(2)
                .all(|token| interval_unit(token).is_some())
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn extract(&self, shape: &Shape<'_>, _: &DateContext) -> Result<Outcome, ScalarError> {
        let mut total = 0.;
        let mut smallest = TemporalUnit::Year;
        for pair in shape.tokens.chunks_exact(2) {
            let [quantity, unit] = pair else {
                return Err(ScalarError::InvalidDate);
            };
            let unit = interval_unit(unit).ok_or(ScalarError::InvalidDate)?;
            smallest = smallest.min(unit);
            total += if quantity.contains(':') {
                if unit != TemporalUnit::Hour {
                    return Err(ScalarError::InvalidDate);
                }
                clock_millis(quantity)?
            } else {
                let quantity = js_number(quantity);
                if quantity.is_nan() {
                    return Err(ScalarError::InvalidDate);
                }
                quantity * unit.millis().ok_or(ScalarError::InvalidDate)? as f64
            };
        }
        let bound = MAX_INSTANT as f64;
        if !total.is_finite() || !(-bound..=bound).contains(&total.trunc()) {
            return Err(ScalarError::InvalidDate);
        }
        Ok(Outcome::Value(TemporalValue::interval(Duration::new(
            total.trunc() as i64,
            smallest,
        ))))
    }
}

fn interval_unit(name: &str) -> Option<TemporalUnit> {
    TemporalUnit::from_name(name).filter(|unit| unit.is_interval_unit())
}

/// Milliseconds of an `hh:mm[:ss]` quantity.
#[expect(clippy::cast_precision_loss)]
fn clock_millis(quantity: &str) -> Result<f64, ScalarError> {
    let weights = [
        TemporalUnit::Hour,
        TemporalUnit::Minute,
        TemporalUnit::Second,
    ];
    let mut total = 0.;
    for (part, unit) in quantity.split(':').zip(weights) {
        let part = js_number(part);
        if part.is_nan() {
            return Err(ScalarError::InvalidDate);
        }
        total += part * unit.millis().ok_or(ScalarError::InvalidDate)? as f64;
    }
    Ok(total)
}

/// `now`, the current instant to the second, and `today`, the local midnight.
struct Keyword;

impl ShapeRule for Keyword {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn matches(&self, shape: &Shape<'_>) -> bool {
        shape.text == "now" || shape.text == "today"
    }

    fn extract(&self, shape: &Shape<'_>, context: &DateContext) -> Result<Outcome, ScalarError> {
        let now = context.now();
        let value = if shape.text == "now" {
            TemporalValue::instant(
                now.div_euclid(MILLIS_PER_SECOND) * MILLIS_PER_SECOND,
                false,
            )
        } else {
            let today = context.local_fields(now);
            context
                .zone()
                .instant_of_local(make_millis(
                    today.year(),
                    i64::from(today.month()) - 1,
                    today.day().into(),
                    0,
                    0,
                    0,
                ))
                .and_then(|midnight| TemporalValue::instant(midnight, true))
        };
        value.map(Outcome::Value).ok_or(ScalarError::InvalidDate)
    }
}

/// `dd-mmm-yyyy`
struct DayMonthNameYear;

impl ShapeRule for DayMonthNameYear {
    fn name(&self) -> &'static str {
        "dd-mmm-yyyy"
    }

    fn matches(&self, shape: &Shape<'_>) -> bool {
        shape.has(2, b'-') && shape.has(6, b'-')
    }

    fn extract(&self, shape: &Shape<'_>, _: &DateContext) -> Result<Outcome, ScalarError> {
        Ok(Outcome::Rewritten(Rewrite::new(
            shape.text.to_owned(),
            shape,
            (
                js_number(shape.slice(0, 2)),
                month_index(shape.slice(3, 6)),
                js_number(shape.slice(7, 11)),
            ),
        )))
    }
}

/// `mm/dd/yy`, `mm/dd/yyyy` or `mm-dd-yyyy`, two digit years are in the 2000s.
struct MonthDayYear;

impl ShapeRule for MonthDayYear {
    fn name(&self) -> &'static str {
        "mm/dd/yyyy"
    }

    fn matches(&self, shape: &Shape<'_>) -> bool {
        (shape.has(2, b'/') && shape.has(5, b'/')) || (shape.has(2, b'-') && shape.has(5, b'-'))
    }

    fn extract(&self, shape: &Shape<'_>, _: &DateContext) -> Result<Outcome, ScalarError> {
        let text = if shape.first_token().len() == 8 {
            format!("{}20{}", shape.slice(0, 6), shape.rest(6))
        } else {
            shape.text.to_owned()
        };
        let year = js_number(slice(&text, 6, 10));
        Ok(Outcome::Rewritten(Rewrite::new(
            text,
            shape,
            (
                js_number(shape.slice(3, 5)),
                js_number(shape.slice(0, 2)),
                year,
            ),
        )))
    }
}

/// `yyyy-mm-dd`, read at local midnight when there is no time.
struct IsoDate;

impl ShapeRule for IsoDate {
    fn name(&self) -> &'static str {
        "yyyy-mm-dd"
    }

    fn matches(&self, shape: &Shape<'_>) -> bool {
        shape.has(4, b'-') && shape.has(7, b'-')
    }

    fn extract(&self, shape: &Shape<'_>, _: &DateContext) -> Result<Outcome, ScalarError> {
        let text = if shape.date_only {
            format!("{} 00:00:00{}", shape.slice(0, 10), shape.rest(10))
        } else {
            shape.text.to_owned()
        };
        Ok(Outcome::Rewritten(Rewrite::new(
            text,
            shape,
            year_month_day(shape),
        )))
    }
}

/// `yyyy.mm.dd`
struct DottedDate;

impl ShapeRule for DottedDate {
    fn name(&self) -> &'static str {
        "yyyy.mm.dd"
    }

    fn matches(&self, shape: &Shape<'_>) -> bool {
        shape.has(4, b'.') && shape.has(7, b'.')
    }

    fn extract(&self, shape: &Shape<'_>, _: &DateContext) -> Result<Outcome, ScalarError> {
        Ok(Outcome::Rewritten(Rewrite::new(
            shape.text.to_owned(),
            shape,
            year_month_day(shape),
        )))
    }
}

/// `yyyy_mm_dd`, rewritten as `yyyy.mm.dd`.
struct UnderscoredDate;

impl ShapeRule for UnderscoredDate {
    fn name(&self) -> &'static str {
        "yyyy_mm_dd"
    }

    fn matches(&self, shape: &Shape<'_>) -> bool {
        shape.has(4, b'_') && shape.has(7, b'_')
    }

    fn extract(&self, shape: &Shape<'_>, _: &DateContext) -> Result<Outcome, ScalarError> {
        Ok(Outcome::Rewritten(Rewrite::new(
            format!(
                "{}.{}.{}",
                shape.slice(0, 4),
                shape.slice(5, 7),
                shape.rest(8)
            ),
            shape,
            year_month_day(shape),
        )))
    }
}

fn year_month_day(shape: &Shape<'_>) -> (f64, f64, f64) {
    (
        js_number(shape.slice(8, 10)),
        js_number(shape.slice(5, 7)),
        js_number(shape.slice(0, 4)),
    )
}

/// `mm/dd` or `mm-dd` in the current year.
///
/// Other texts with a separator at the same offset are passed along unchanged.
struct MonthDay;

impl ShapeRule for MonthDay {
    fn name(&self) -> &'static str {
        "mm/dd"
    }

    fn matches(&self, shape: &Shape<'_>) -> bool {
        shape.has(2, b'/') || shape.has(2, b'-')
    }

    #[expect(clippy::cast_precision_loss)]
    fn extract(&self, shape: &Shape<'_>, context: &DateContext) -> Result<Outcome, ScalarError> {
        if shape.first_token().len() != 5 {
            return Ok(Outcome::Rewritten(Rewrite::unchanged(shape)));
        }
        let year = context.local_fields(context.now()).year();
        Ok(Outcome::Rewritten(Rewrite::new(
            format!(
                "{}{}{year}{}",
                shape.slice(0, 5),
                shape.slice(2, 3),
                shape.rest(5)
            ),
            shape,
            (
                js_number(shape.slice(3, 5)),
                js_number(shape.slice(0, 2)),
                year as f64,
            ),
        )))
    }
}

/// `mmddyy` in the 2000s.
struct CompactMonthDayYear;

impl ShapeRule for CompactMonthDayYear {
    fn name(&self) -> &'static str {
        "mmddyy"
    }

    fn matches(&self, shape: &Shape<'_>) -> bool {
        let first = shape.first_token();
        first.len() == 6 && js_number(first).is_finite()
    }

    fn extract(&self, shape: &Shape<'_>, _: &DateContext) -> Result<Outcome, ScalarError> {
        Ok(Outcome::Rewritten(Rewrite::new(
            format!(
                "{}/{}/20{}",
                shape.slice(0, 2),
                shape.slice(2, 4),
                shape.rest(4)
            ),
            shape,
            (
                js_number(shape.slice(2, 4)),
                js_number(shape.slice(0, 2)),
                js_number(&format!("20{}", shape.slice(4, 6))),
            ),
        )))
    }
}

/// `hh:mm[:ss]` of the current local day.
struct TimeOfDay;

impl ShapeRule for TimeOfDay {
    fn name(&self) -> &'static str {
        "hh:mm"
    }

    fn matches(&self, shape: &Shape<'_>) -> bool {
        shape.has(2, b':')
    }

    fn extract(&self, shape: &Shape<'_>, context: &DateContext) -> Result<Outcome, ScalarError> {
        let today = context.local_fields(context.now());
        let weekday = WEEKDAY_ABBREVIATIONS
            .get(usize::from(today.weekday()))
            .ok_or(ScalarError::InvalidDate)?;
        let month = MONTH_ABBREVIATIONS
            .get(usize::from(today.month()) - 1)
            .ok_or(ScalarError::InvalidDate)?;
        Ok(Outcome::Rewritten(Rewrite::unchanged(&Shape::new(&format!(
            "{weekday} {month} {:02} {:04} {}",
            today.day(),
            today.year(),
            shape.text
        )))))
    }
}

/// `yyyymmdd` or `yyyymmddThhmmss`.
struct CompactDate;

impl ShapeRule for CompactDate {
    fn name(&self) -> &'static str {
        "yyyymmdd"
    }

    fn matches(&self, shape: &Shape<'_>) -> bool {
        let first = shape.first_token();
        let date = shape.text.split('T').next().unwrap_or_default();
        (first.len() == 8 && js_number(first).is_finite())
            || (date.len() == 8 && js_number(date).is_finite())
    }

    fn extract(&self, shape: &Shape<'_>, _: &DateContext) -> Result<Outcome, ScalarError> {
        let mut date_only = shape.date_only;
        let mut text = shape.text.to_owned();
        if shape
            .text
            .split('T')
            .nth(1)
            .is_some_and(|time| time.len() == 6 && js_number(time).is_finite())
        {
            text = format!(
                "{}:{}:{}",
                shape.slice(0, 11),
                shape.slice(11, 13),
                shape.rest(13)
            );
            date_only = false;
        }
        let fields = (
            js_number(slice(&text, 6, 8)),
            js_number(slice(&text, 4, 6)),
            js_number(slice(&text, 0, 4)),
        );
        let mut text = format!(
            "{}-{}-{}",
            slice(&text, 0, 4),
            slice(&text, 4, 6),
            slice(&text, 6, text.len())
        );
        if date_only {
            text = format!("{} 00:00:00{}", slice(&text, 0, 10), slice(&text, 10, text.len()));
        }
        let mut rewrite = Rewrite::new(text, shape, fields);
        rewrite.date_only = date_only;
        Ok(Outcome::Rewritten(rewrite))
    }
}

/// `dd.mm.yyyy`, rewritten as `mm/dd/yyyy`.
struct DottedDayMonthYear;

impl ShapeRule for DottedDayMonthYear {
    fn name(&self) -> &'static str {
        "dd.mm.yyyy"
    }

    fn matches(&self, shape: &Shape<'_>) -> bool {
        shape.has(2, b'.') && shape.has(5, b'.')
    }

    fn extract(&self, shape: &Shape<'_>, _: &DateContext) -> Result<Outcome, ScalarError> {
        Ok(Outcome::Rewritten(Rewrite::new(
            format!(
                "{}/{}/{}",
                shape.slice(3, 5),
                shape.slice(0, 2),
                shape.rest(6)
            ),
            shape,
            (
                js_number(shape.slice(0, 2)),
                js_number(shape.slice(3, 5)),
                js_number(shape.slice(6, 10)),
            ),
        )))
    }
}

/// `yyyy-mmm-dd`, rewritten as `dd-mmm-yyyy`.
struct YearMonthNameDay;

impl ShapeRule for YearMonthNameDay {
    fn name(&self) -> &'static str {
        "yyyy-mmm-dd"
    }

    fn matches(&self, shape: &Shape<'_>) -> bool {
        shape.has(4, b'-') && shape.has(8, b'-')
    }

    fn extract(&self, shape: &Shape<'_>, _: &DateContext) -> Result<Outcome, ScalarError> {
        Ok(Outcome::Rewritten(Rewrite::new(
            format!(
                "{}-{}-{}{}",
                shape.slice(9, 11),
                shape.slice(5, 8),
                shape.slice(0, 4),
                shape.rest(11)
            ),
            shape,
            (
                js_number(shape.slice(9, 11)),
                month_index(shape.slice(5, 8)),
                js_number(shape.slice(0, 4)),
            ),
        )))
    }
}

/// `mmm-dd-yyyy`, rewritten as `dd-mmm-yyyy`.
struct MonthNameDayYear;

impl ShapeRule for MonthNameDayYear {
    fn name(&self) -> &'static str {
        "mmm-dd-yyyy"
    }

    fn matches(&self, shape: &Shape<'_>) -> bool {
        shape.has(3, b'-') && shape.has(6, b'-')
    }

    fn extract(&self, shape: &Shape<'_>, _: &DateContext) -> Result<Outcome, ScalarError> {
        Ok(Outcome::Rewritten(Rewrite::new(
            format!(
                "{}-{}{}",
                shape.slice(4, 6),
                shape.slice(0, 3),
                shape.rest(6)
            ),
            shape,
            (
                js_number(shape.slice(4, 6)),
                month_index(shape.slice(0, 3)),
                js_number(shape.slice(7, 11)),
            ),
        )))
    }
}

/// 1 to 12 for a month abbreviation, 0 for an empty text and -1 otherwise.
fn month_index(name: &str) -> f64 {
    if name.is_empty() {
        return 0.;
    }
    crate::calendar::month_from_abbreviation(name).map_or(-1., f64::from)
}

/// Reads a number the way the legacy runtime converted text:
/// blank text is 0, anything but a decimal literal or `Infinity` is `NaN`.
fn js_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.;
    }
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "Infinity" {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    if !unsigned
        .bytes()
        .all(|c| c.is_ascii_digit() || matches!(c, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
#[expect(clippy::panic_in_result_fn)]
mod tests {
    use super::*;
    use crate::calendar::MILLIS_PER_DAY;
    use crate::context::Clock;
    use crate::timezone::{LocalZone, TimezoneOffset};

    // 2020-03-17T13:45:30Z, a Tuesday
    const NOW: i64 = 1_584_452_730_000;
    // 2020-03-17T00:00:00Z
    const MIDNIGHT: i64 = 1_584_403_200_000;

    fn utc() -> DateContext {
        DateContext::new(LocalZone::Fixed(TimezoneOffset::UTC), Clock::Fixed(NOW))
    }

    fn parse(text: &str) -> Result<TemporalValue, ScalarError> {
        parse_date(DateInput::Text(text), &utc())
    }

    fn rule_of(text: &str) -> Option<&'static str> {
        let shape = Shape::new(text);
        RULES
            .iter()
            .find(|rule| rule.matches(&shape))
            .map(|rule| rule.name())
    }

    #[test]
    fn rule_order() {
        assert_eq!(rule_of("5 day 3 hour"), Some("interval sequence"));
        assert_eq!(rule_of("today"), Some("keyword"));
        assert_eq!(rule_of("17-mar-2020"), Some("dd-mmm-yyyy"));
        assert_eq!(rule_of("03/17/2020"), Some("mm/dd/yyyy"));
        assert_eq!(rule_of("03-17-2020"), Some("mm/dd/yyyy"));
        assert_eq!(rule_of("2020-03-17"), Some("yyyy-mm-dd"));
        assert_eq!(rule_of("2020.03.17"), Some("yyyy.mm.dd"));
        assert_eq!(rule_of("2020_03_17"), Some("yyyy_mm_dd"));
        assert_eq!(rule_of("03/17"), Some("mm/dd"));
        assert_eq!(rule_of("031720"), Some("mmddyy"));
        assert_eq!(rule_of("13:45"), Some("hh:mm"));
        assert_eq!(rule_of("20200317"), Some("yyyymmdd"));
        assert_eq!(rule_of("20200317T134530"), Some("yyyymmdd"));
        assert_eq!(rule_of("17.03.2020"), Some("dd.mm.yyyy"));
        assert_eq!(rule_of("2020-mar-17"), Some("yyyy-mmm-dd"));
        assert_eq!(rule_of("mar-17-2020"), Some("mmm-dd-yyyy"));
        assert_eq!(rule_of("Tue Mar 17 2020"), None);
    }

    #[test]
    fn dates() -> Result<(), ScalarError> {
        for text in [
            "2020-03-17",
            "03/17/2020",
            "03-17-2020",
            "03/17/20",
            "17-mar-2020",
            "17-MAR-2020",
            "2020.03.17",
            "2020_03_17",
            "03/17",
            "031720",
            "20200317",
            "17.03.2020",
            "2020-mar-17",
            "mar-17-2020",
            "Tue Mar 17 2020",
            "  2020-03-17  ",
        ] {
            let date = parse(text)?;
            assert_eq!(date.millis(), MIDNIGHT, "{text}");
            assert!(date.is_date_only(), "{text}");
            assert!(!date.is_interval(), "{text}");
        }
        Ok(())
    }

    #[test]
    fn date_times() -> Result<(), ScalarError> {
        for text in [
            "2020-03-17 13:45:30",
            "2020-03-17T13:45:30Z",
            "03/17/2020 13:45:30",
            "03/17/2020 01:45:30 PM",
            "17-mar-2020 13:45:30",
            "20200317T134530",
            "20200317 13:45:30",
            "13:45:30",
            "Tue Mar 17 2020 14:45:30 GMT+0100",
        ] {
            let date = parse(text)?;
            assert_eq!(date.millis(), NOW, "{text}");
            assert!(!date.is_date_only(), "{text}");
        }
        Ok(())
    }

    #[test]
    fn keywords() -> Result<(), ScalarError> {
        let context = utc().with_clock(Clock::Fixed(NOW + 250));
        let now = parse_date(DateInput::Text("now"), &context)?;
        assert_eq!(now.millis(), NOW);
        assert!(!now.is_date_only());
        let today = parse_date(DateInput::Text("today"), &context)?;
        assert_eq!(today.millis(), MIDNIGHT);
        assert!(today.is_date_only());
        assert_eq!(parse("NOW"), Err(ScalarError::InvalidDate));
        Ok(())
    }

    #[test]
    fn local_zone() -> Result<(), ScalarError> {
        let zone = LocalZone::Fixed(TimezoneOffset::new(-300).map_err(|_| ScalarError::InvalidDate)?);
        let context = utc().with_zone(zone);
        let date = parse_date(DateInput::Text("2020-03-17"), &context)?;
        assert_eq!(date.millis(), MIDNIGHT + 5 * 3_600_000);
        let today = parse_date(DateInput::Text("today"), &context)?;
        assert_eq!(today.millis(), MIDNIGHT + 5 * 3_600_000);
        Ok(())
    }

    #[test]
    fn intervals() -> Result<(), ScalarError> {
        let interval = parse("5 day 3 hour")?;
        assert!(interval.is_interval());
        assert!(!interval.is_date_only());
        assert_eq!(interval.millis(), 5 * MILLIS_PER_DAY + 3 * 3_600_000);
        assert_eq!(
            interval.duration().map(|d| d.to_string()).as_deref(),
            Some("123 hours")
        );
        assert_eq!(parse("1:30:15 hrs")?.millis(), 5_415_000);
        assert_eq!(parse("2 YEARS")?.millis(), 63_113_904_000);
        assert_eq!(parse("1.5 mins")?.millis(), 90_000);
        assert_eq!(parse("-1 day")?.millis(), -MILLIS_PER_DAY);
        Ok(())
    }

    #[test]
    fn invalid_intervals() {
        assert_eq!(parse("x day"), Err(ScalarError::InvalidDate));
        assert_eq!(parse("1:30 day"), Err(ScalarError::InvalidDate));
        assert_eq!(parse("1:x hour"), Err(ScalarError::InvalidDate));
        assert_eq!(parse("Infinity day"), Err(ScalarError::InvalidDate));
        // weeks are not interval units, the text falls through to the other rules
        assert_eq!(parse("2 weeks"), Err(ScalarError::InvalidDate));
    }

    #[test]
    fn invalid_days_and_months() {
        assert_eq!(parse("13/01/2020"), Err(ScalarError::InvalidDayMonth));
        assert_eq!(parse("02/30/2020"), Err(ScalarError::InvalidDayMonth));
        assert_eq!(parse("02/29/2019"), Err(ScalarError::InvalidDayMonth));
        assert_eq!(parse("31-abc-2020"), Err(ScalarError::InvalidDayMonth));
        assert_eq!(parse("2020-04-31"), Err(ScalarError::InvalidDayMonth));
        assert_eq!(parse("31.02.2020"), Err(ScalarError::InvalidDayMonth));
        assert!(parse("02/29/2020").is_ok());
    }

    #[test]
    fn invalid_dates() {
        for text in ["", "hello", "ab/cd/efgh", "2020-03-17Tjunk", "99:99"] {
            assert_eq!(parse(text), Err(ScalarError::InvalidDate), "{text}");
        }
    }

    #[test]
    fn millis() -> Result<(), ScalarError> {
        let context = utc();
        let instant = parse_date(DateInput::Millis(1_584_452_730_000.9), &context)?;
        assert_eq!(instant.millis(), NOW);
        assert!(!instant.is_date_only());
        assert_eq!(
            parse_date(DateInput::Millis(f64::NAN), &context),
            Err(ScalarError::InvalidDate)
        );
        assert_eq!(
            parse_date(DateInput::Millis(9e15), &context),
            Err(ScalarError::InvalidDate)
        );
        assert_eq!(parse_date(DateInput::Value(instant), &context), Ok(instant));
        Ok(())
    }

    #[test]
    fn numbers() {
        assert_eq!(js_number(""), 0.);
        assert_eq!(js_number(" 12 "), 12.);
        assert_eq!(js_number("-Infinity"), f64::NEG_INFINITY);
        assert!(js_number("inf").is_nan());
        assert!(js_number("1a").is_nan());
        assert_eq!(month_index("MAR"), 3.);
        assert_eq!(month_index(""), 0.);
        assert_eq!(month_index("abc"), -1.);
    }
}
