//! Proleptic Gregorian calendar arithmetic on milliseconds since the Unix epoch.

pub(crate) const MILLIS_PER_SECOND: i64 = 1_000;
pub(crate) const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub(crate) const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub(crate) const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Instants are at most 100 000 000 days away from the epoch, in both directions.
pub const MAX_INSTANT: i64 = 100_000_000 * MILLIS_PER_DAY;

pub(crate) const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
pub(crate) const MONTH_NAMES: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];
pub(crate) const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
pub(crate) const WEEKDAY_NAMES: [&str; 7] = [
    "SUNDAY",
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
];

#[inline]
#[must_use]
pub const fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// The number of days of `month` (1 to 12) in `year`.
#[inline]
#[must_use]
pub const fn days_in_month(year: i64, month: u8) -> u8 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Checks that `day`/`month`/`year` denote an existing date.
#[must_use]
pub fn is_valid_date(day: i64, month: i64, year: i64) -> bool {
    u8::try_from(month)
        .ok()
        .filter(|month| (1..=12).contains(month))
        .is_some_and(|month| 1 <= day && day <= i64::from(days_in_month(year, month)))
}

/// Index (1 to 12) of a three-letter month abbreviation, in any case.
pub(crate) fn month_from_abbreviation(name: &str) -> Option<u8> {
    MONTH_ABBREVIATIONS
        .iter()
        .zip(1..)
        .find_map(|(abbreviation, month)| abbreviation.eq_ignore_ascii_case(name).then_some(month))
}

/// Days between 1970-01-01 and the given date.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let shifted_month = (month + 9) % 12;
    let day_of_year = (153 * shifted_month + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

/// The date of the day `days` after 1970-01-01.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let days = days + 719_468;
    let era = days.div_euclid(146_097);
    let day_of_era = days - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400 + i64::from(month <= 2);
    (year, month as u8, day as u8)
}

/// Days between 1970-01-01 and a date whose zero-based month and day may be out of their ranges.
///
/// Extra months and days carry over, `(2020, 0, 0)` is 2019-12-31.
#[inline]
pub(crate) fn make_day(year: i64, month0: i64, day: i64) -> i64 {
    days_from_civil(year + month0.div_euclid(12), month0.rem_euclid(12) + 1, 1) + day - 1
}

/// Milliseconds of a wall clock reading whose fields may be out of their ranges.
#[inline]
pub(crate) fn make_millis(
    year: i64,
    month0: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
) -> i64 {
    make_day(year, month0, day) * MILLIS_PER_DAY
        + hour * MILLIS_PER_HOUR
        + minute * MILLIS_PER_MINUTE
        + second * MILLIS_PER_SECOND
}

/// A broken-down wall clock reading.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct CivilDateTime {
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
    weekday: u8,
    ordinal: u16,
}

impl CivilDateTime {
    /// Splits milliseconds since 1970-01-01T00:00:00 into calendar fields.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        let days = millis.div_euclid(MILLIS_PER_DAY);
        let time = millis.rem_euclid(MILLIS_PER_DAY);
        let (year, month, day) = civil_from_days(days);
        Self {
            year,
            month,
            day,
            hour: (time / MILLIS_PER_HOUR) as u8,
            minute: (time % MILLIS_PER_HOUR / MILLIS_PER_MINUTE) as u8,
            second: (time % MILLIS_PER_MINUTE / MILLIS_PER_SECOND) as u8,
            millisecond: (time % MILLIS_PER_SECOND) as u16,
            weekday: (days + 4).rem_euclid(7) as u8,
            ordinal: (days - make_day(year, 0, 1) + 1) as u16,
        }
    }

    /// Milliseconds since 1970-01-01T00:00:00 of this reading.
    #[inline]
    #[must_use]
    pub fn to_millis(&self) -> i64 {
        make_millis(
            self.year,
            i64::from(self.month) - 1,
            self.day.into(),
            self.hour.into(),
            self.minute.into(),
            self.second.into(),
        ) + i64::from(self.millisecond)
    }

    #[inline]
    #[must_use]
    pub const fn year(&self) -> i64 {
        self.year
    }

    /// From 1 to 12.
    #[inline]
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.second
    }

    #[inline]
    #[must_use]
    pub const fn millisecond(&self) -> u16 {
        self.millisecond
    }

    /// From 0 (Sunday) to 6 (Saturday).
    #[inline]
    #[must_use]
    pub const fn weekday(&self) -> u8 {
        self.weekday
    }

    /// Day of the year, from 1.
    #[inline]
    #[must_use]
    pub const fn ordinal(&self) -> u16 {
        self.ordinal
    }
}
