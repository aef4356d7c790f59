use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(about, version, name = "oxscalar")]
/// Legacy scalar coercions: bounded integers, floats, money, decimals, dates and intervals
pub struct Args {
    /// Time zone the local calendar fields are read in
    ///
    /// Either `local` for the zone of the host or a fixed offset like `Z`, `+01:00` or `-0530`.
    #[arg(long, global = true, env = "OXSCALAR_TIMEZONE", default_value = "local")]
    pub timezone: String,
    /// Instant used as the current time by `now`, `today` and dates without a year
    ///
    /// Either `system`, milliseconds since the Unix epoch or an RFC 3339 instant.
    #[arg(long, global = true, env = "OXSCALAR_NOW", default_value = "system")]
    pub now: String,
    /// Format of the diagnostics written to the standard error
    ///
    /// Their level is set with the RUST_LOG environment variable and defaults to `warn`.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check that a value is a finite number and print it
    Guard {
        /// Number, boolean or text
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Print a value or a fallback if the value is not a finite number
    IfNull {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(allow_hyphen_values = true)]
        fallback: f64,
    },
    /// Coerce a value to an integer of a storage width
    ///
    /// Fractions are truncated toward zero.
    Int {
        /// Storage width in bytes: 1, 2, 4 or 8
        #[arg(short, long, default_value_t = 4)]
        width: u8,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Apply a bit operation to a 4 bytes integer
    Bit {
        #[arg(value_enum)]
        operation: BitOperation,
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Right hand side of the operation, a bit position or a shift amount
        ///
        /// Every operation but `not` requires it.
        #[arg(allow_hyphen_values = true)]
        operand: Option<i32>,
    },
    /// Coerce a value to a float of a storage width
    ///
    /// Digits past the precision of the width are dropped.
    Float {
        /// Storage width in bytes: 4 or 8
        #[arg(short, long, default_value_t = 8)]
        width: u8,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Coerce a value to money, rounded to cents
    ///
    /// Currency symbols and `,` separators are ignored.
    Money {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Coerce a value to a fixed-point decimal
    Decimal {
        /// Total number of digits, from 1 to 39
        #[arg(short, long, default_value_t = 39)]
        precision: u8,
        /// Number of digits after the decimal point
        #[arg(short, long, default_value_t = 0)]
        scale: u8,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Parse a date, a date and time, a keyword or an interval
    ///
    /// Date-only values are printed as `yyyy-mm-dd`, instants with a time as
    /// `yyyy-mm-ddThh:mm:ssZ` and intervals as their duration.
    Date { value: String },
    /// Extract a calendar field of a date
    Field {
        #[arg(value_enum)]
        field: Field,
        value: String,
        /// Number given to Sunday by `day-of-week`
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<i64>,
    },
    /// Render a date with a format
    ///
    /// The format is made of `YYYY`, `YY`, `MM`, `MONTH`, `MON`, `DD`, `HH12`, `HH24`, `HH`,
    /// `MI`, `SS`, `AM`, `PM`, `DAY` and `DY` tokens.
    ToChar {
        value: String,
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Truncate a date to the start of a unit
    Trunc { unit: String, value: String },
    /// Extract the field of a date named by a unit
    Part { unit: String, value: String },
    /// Express an interval, or the time since the epoch of a date, in a unit
    Interval { unit: String, value: String },
    /// Express a number of milliseconds in a unit
    IntervalToUnit {
        unit: String,
        #[arg(allow_hyphen_values = true)]
        millis: f64,
    },
    /// Render a date as `yyyy_mm_dd hh:mm:ss GMT`
    DateGmt { value: String },
    /// Render a Unix timestamp as `yyyy_mm_dd hh:mm:ss GMT`
    GmtTimestamp {
        #[arg(allow_hyphen_values = true)]
        seconds: f64,
    },
    /// Render a Unix timestamp in local time
    Timestamp {
        /// `date` is ` d-mon-yy`, `date4` is `dd-mon-yyyy` and `time` is `hh:mm`
        #[arg(short, long, value_enum, default_value_t = TimestampStyle::Date4)]
        style: TimestampStyle,
        #[arg(allow_hyphen_values = true)]
        seconds: f64,
    },
    /// Tell whether daylight saving time is in effect at a date
    IsDst { value: String },
}

#[derive(Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum Field {
    Year,
    Quarter,
    Month,
    Week,
    WeekIso,
    Day,
    DayOfMonth,
    DayOfWeek,
    DayOfYear,
    Dow,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

#[derive(Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum BitOperation {
    And,
    AndNot,
    Or,
    Xor,
    Not,
    Clear,
    Flip,
    Set,
    Shift,
    Test,
}

#[derive(Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum TimestampStyle {
    Date,
    Date4,
    Time,
}
