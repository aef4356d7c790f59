//! The generic reader every text ends up in once the shape rules have rewritten it.
//!
//! It accepts ISO 8601 date-times and the loose `Date.parse` forms of the legacy runtime:
//! `Tue Mar 17 2020 13:45:30 GMT+0100`, `03/17/2020 1:45 PM`, `17-mar-2020`, `2020.03.17`...

use crate::calendar::{MAX_INSTANT, make_millis, month_from_abbreviation};
use crate::timezone::{LocalZone, TimezoneOffset};
use std::str::FromStr;

/// Reads `input` as an instant, in milliseconds since the Unix epoch.
///
/// Texts without an explicit offset are read in `zone`, except ISO dates without a time
/// which are UTC.
pub(crate) fn parse_instant(input: &str, zone: LocalZone) -> Option<i64> {
    let input = input.trim();
    let instant = match iso_date_time(input) {
        Some(reading) => reading.instant(zone),
        None => loose_date_time(input)?.instant(zone),
    }?;
    (-MAX_INSTANT..=MAX_INSTANT)
        .contains(&instant)
        .then_some(instant)
}

/// A wall clock reading and where it was read.
struct Reading {
    wall: i64,
    offset: Option<TimezoneOffset>,
}

impl Reading {
    fn new(
        (year, month, day): (i64, i64, i64),
        time: Time,
        offset: Option<TimezoneOffset>,
    ) -> Option<Self> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        Some(Self {
            wall: make_millis(
                year,
                month - 1,
                day,
                time.hour,
                time.minute,
                time.second,
            ) + time.millisecond,
            offset,
        })
    }

    fn instant(&self, zone: LocalZone) -> Option<i64> {
        match self.offset {
            Some(offset) => self.wall.checked_sub(offset.in_millis()),
            None => zone.instant_of_local(self.wall),
        }
    }
}

#[derive(Default, Clone, Copy)]
struct Time {
    hour: i64,
    minute: i64,
    second: i64,
    millisecond: i64,
}

// dateTime ::= year ('-' month ('-' day ((' ' | 'T') time offset?)?)?)?
fn iso_date_time(input: &str) -> Option<Reading> {
    let (year, input) = iso_year(input)?;
    let Some(input) = input.strip_prefix('-') else {
        return ensure_empty(input)
            .and_then(|()| Reading::new((year, 1, 1), Time::default(), Some(TimezoneOffset::UTC)));
    };
    let (month, input) = fixed_digits(input, 2)?;
    let Some(input) = input.strip_prefix('-') else {
        return ensure_empty(input).and_then(|()| {
            Reading::new((year, month, 1), Time::default(), Some(TimezoneOffset::UTC))
        });
    };
    let (day, input) = fixed_digits(input, 2)?;
    let Some(input) = input.strip_prefix(['T', 't', ' ']) else {
        return ensure_empty(input).and_then(|()| {
            Reading::new((year, month, day), Time::default(), Some(TimezoneOffset::UTC))
        });
    };
    let (time, input) = iso_time(input)?;
    let offset = if input.is_empty() {
        None
    } else if input == "Z" || input == "z" {
        Some(TimezoneOffset::UTC)
    } else {
        Some(TimezoneOffset::from_str(input).ok()?)
    };
    Reading::new((year, month, day), time, offset)
}

// year ::= digit{4} | ('+' | '-') digit{6}
fn iso_year(input: &str) -> Option<(i64, &str)> {
    if let Some(input) = input.strip_prefix('+') {
        fixed_digits(input, 6)
    } else if let Some(input) = input.strip_prefix('-') {
        let (year, input) = fixed_digits(input, 6)?;
        Some((-year, input))
    } else {
        fixed_digits(input, 4)
    }
}

// time ::= hour ':' minute (':' second ('.' digit+)?)?
fn iso_time(input: &str) -> Option<(Time, &str)> {
    let (hour, input) = fixed_digits(input, 2)?;
    let input = input.strip_prefix(':')?;
    let (minute, input) = fixed_digits(input, 2)?;
    let (second, millisecond, input) = if let Some(input) = input.strip_prefix(':') {
        let (second, input) = fixed_digits(input, 2)?;
        let (millisecond, input) = fraction(input);
        (second, millisecond, input)
    } else {
        (0, 0, input)
    };
    Some((
        checked_time(hour, minute, second, millisecond, None)?,
        input,
    ))
}

/// Reads the `.fff` milliseconds of a second, extra digits are truncated.
fn fraction(input: &str) -> (i64, &str) {
    let Some(digits) = input.strip_prefix('.') else {
        return (0, input);
    };
    let (digits, input) = integer_prefix(digits);
    let millisecond = digits
        .bytes()
        .chain(*b"000")
        .take(3)
        .fold(0, |value, digit| value * 10 + i64::from(digit - b'0'));
    (millisecond, input)
}

fn checked_time(
    hour: i64,
    minute: i64,
    second: i64,
    millisecond: i64,
    meridiem: Option<Meridiem>,
) -> Option<Time> {
    let hour = match meridiem {
        None if hour < 24 => hour,
        None => return None,
        Some(_) if !(1..=12).contains(&hour) => return None,
        Some(Meridiem::Am) => hour % 12,
        Some(Meridiem::Pm) => hour % 12 + 12,
    };
    (minute < 60 && second < 60).then_some(Time {
        hour,
        minute,
        second,
        millisecond,
    })
}

#[derive(Clone, Copy)]
enum Meridiem {
    Am,
    Pm,
}

/// What the tokens of a loose date-time said.
#[derive(Default)]
struct LooseFields<'a> {
    date: Option<(i64, i64, i64)>,
    month: Option<i64>,
    numbers: Vec<&'a str>,
    time: Option<(i64, i64, i64, i64)>,
    meridiem: Option<Meridiem>,
    offset: Option<TimezoneOffset>,
}

fn loose_date_time(input: &str) -> Option<Reading> {
    let mut fields = LooseFields::default();
    for token in input.split([' ', ',', '\t']).filter(|t| !t.is_empty()) {
        if token.starts_with('(') {
            break; // zone name comment, "(Central European Time)"
        }
        loose_token(token, &mut fields)?;
    }
    let date = match fields.date {
        Some(date) if fields.month.is_none() && fields.numbers.is_empty() => date,
        Some(_) => return None,
        None => month_name_date(fields.month?, &fields.numbers)?,
    };
    let time = match (fields.time, fields.meridiem) {
        (Some((hour, minute, second, millisecond)), meridiem) => {
            checked_time(hour, minute, second, millisecond, meridiem)?
        }
        (None, None) => Time::default(),
        (None, Some(_)) => return None,
    };
    Reading::new(date, time, fields.offset)
}

fn loose_token<'a>(token: &'a str, fields: &mut LooseFields<'a>) -> Option<()> {
    if token.eq_ignore_ascii_case("am") || token.eq_ignore_ascii_case("pm") {
        if fields.meridiem.is_some() {
            return None;
        }
        fields.meridiem = Some(if token.eq_ignore_ascii_case("am") {
            Meridiem::Am
        } else {
            Meridiem::Pm
        });
    } else if token == "Z" || token.eq_ignore_ascii_case("gmt") || token.eq_ignore_ascii_case("utc") {
        fields.offset = Some(TimezoneOffset::UTC);
    } else if let Some(offset) = strip_prefix_ignore_case(token, "gmt")
        .or_else(|| strip_prefix_ignore_case(token, "utc"))
    {
        fields.offset = Some(TimezoneOffset::from_str(offset).ok()?);
    } else if token.starts_with(['+', '-']) && fields.time.is_some() {
        fields.offset = Some(TimezoneOffset::from_str(token).ok()?);
    } else if token.contains(':') {
        if fields.time.is_some() {
            return None;
        }
        fields.time = Some(loose_time(token)?);
    } else if token.bytes().all(|c| c.is_ascii_alphabetic()) {
        if let Some(month) = month_of_name(token) {
            if fields.month.replace(month).is_some() {
                return None;
            }
        } else if !is_weekday_name(token) {
            return None;
        }
    } else if token.bytes().all(|c| c.is_ascii_digit()) {
        fields.numbers.push(token);
    } else {
        if fields.date.is_some() {
            return None;
        }
        fields.date = Some(separated_date(token)?);
    }
    Some(())
}

// time ::= digit{1,2} ':' digit{2} (':' digit{2} ('.' digit+)?)?
fn loose_time(token: &str) -> Option<(i64, i64, i64, i64)> {
    let (hour, input) = integer_prefix(token);
    if !(1..=2).contains(&hour.len()) {
        return None;
    }
    let input = input.strip_prefix(':')?;
    let (minute, input) = fixed_digits(input, 2)?;
    let (second, millisecond, input) = if let Some(input) = input.strip_prefix(':') {
        let (second, input) = fixed_digits(input, 2)?;
        let (millisecond, input) = fraction(input);
        (second, millisecond, input)
    } else {
        (0, 0, input)
    };
    ensure_empty(input)?;
    Some((i64::from_str(hour).ok()?, minute, second, millisecond))
}

/// `mm/dd/yyyy`, `mm-dd-yyyy`, `yyyy.mm.dd`, `yyyy/mm/dd` or `dd-mon-yyyy`.
fn separated_date(token: &str) -> Option<(i64, i64, i64)> {
    let separator = token.chars().find(|c| !c.is_ascii_alphanumeric())?;
    if !matches!(separator, '/' | '-' | '.') {
        return None;
    }
    let parts = token.split(separator).collect::<Vec<_>>();
    let [first, second, third] = parts.as_slice() else {
        return None;
    };
    if let Some(month) = month_of_name(second) {
        return Some((year_of(third)?, month, number(first, 2)?));
    }
    if first.len() == 4 {
        Some((year_of(first)?, number(second, 2)?, number(third, 2)?))
    } else {
        Some((year_of(third)?, number(first, 2)?, number(second, 2)?))
    }
}

/// `Mar 17 2020`, `17 Mar 2020` or `Mar 2020`.
fn month_name_date(month: i64, numbers: &[&str]) -> Option<(i64, i64, i64)> {
    match numbers {
        [year] if year.len() > 2 => Some((year_of(year)?, month, 1)),
        [first, second] if first.len() > 2 => Some((year_of(first)?, month, number(second, 2)?)),
        [day, year] => Some((year_of(year)?, month, number(day, 2)?)),
        _ => None,
    }
}

/// A year of up to 6 digits, two digit years are in 1950 to 2049.
fn year_of(token: &str) -> Option<i64> {
    let year = number(token, 6)?;
    Some(match (token.len(), year) {
        (1..=2, 0..50) => year + 2000,
        (1..=2, _) => year + 1900,
        _ => year,
    })
}

/// A number of at most `max_len` digits.
fn number(token: &str, max_len: usize) -> Option<i64> {
    if token.is_empty() || token.len() > max_len || !token.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }
    i64::from_str(token).ok()
}

fn month_of_name(token: &str) -> Option<i64> {
    if token.len() < 3 {
        return None;
    }
    month_from_abbreviation(token.get(..3)?).map(i64::from)
}

fn is_weekday_name(token: &str) -> bool {
    token.len() >= 3
        && ["sun", "mon", "tue", "wed", "thu", "fri", "sat"]
            .iter()
            .any(|day| token.get(..3).is_some_and(|t| t.eq_ignore_ascii_case(day)))
}

fn strip_prefix_ignore_case<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    token
        .get(..prefix.len())
        .filter(|start| start.eq_ignore_ascii_case(prefix))
        .and_then(|_| token.get(prefix.len()..))
}

fn fixed_digits(input: &str, count: usize) -> Option<(i64, &str)> {
    let (digits, _) = integer_prefix(input);
    if digits.len() < count {
        return None;
    }
    let (digits, input) = input.split_at(count);
    Some((i64::from_str(digits).ok()?, input))
}

fn ensure_empty(input: &str) -> Option<()> {
    input.is_empty().then_some(())
}

fn integer_prefix(input: &str) -> (&str, &str) {
    let mut end = input.len();
    for (i, c) in input.char_indices() {
        if !c.is_ascii_digit() {
            end = i;
            break;
        }
    }
    input.split_at(end)
}
