use crate::cli::{Args, BitOperation, Command, Field, LogFormat, TimestampStyle};
use anyhow::{Context, anyhow, bail};
use clap::Parser;
use oxscalar::{
    BoundedInteger, Clock, DateContext, FloatWidth, IntegerWidth, LocalZone, ScalarError,
    date_from_timestamp, date_gmt, date_part, date_trunc, date4_from_timestamp,
    day, day_of_month, day_of_week, day_of_year, dow, gmt_timestamp, guard, hour, if_null,
    interval, interval_to_unit, is_dst, microsecond, millisecond, minute, month, nanosecond,
    quarter, second, time_from_timestamp, to_char, to_date, to_decimal, to_float, to_int,
    to_money, week, week_iso, year,
};
use std::io::{Write, stderr, stdout};
use tracing_subscriber::EnvFilter;

mod cli;

pub fn main() -> anyhow::Result<()> {
    let matches = Args::parse();
    init_logging(matches.log_format)?;
    let zone = matches
        .timezone
        .parse::<LocalZone>()
        .with_context(|| format!("Invalid --timezone value '{}'", matches.timezone))?;
    let clock = matches
        .now
        .parse::<Clock>()
        .with_context(|| format!("Invalid --now value '{}'", matches.now))?;
    let context = DateContext::new(zone, clock);
    tracing::debug!(%zone, %clock, "date context");

    let output = match matches.command {
        Command::Guard { value } => guard(&value)?.to_string(),
        Command::IfNull { value, fallback } => if_null(guard(&value), fallback).to_string(),
        Command::Int { width, value } => to_int(IntegerWidth::try_from(width)?, &value)?.to_string(),
        Command::Bit {
            operation,
            value,
            operand,
        } => bit(
            operation,
            to_int(IntegerWidth::Four, &value)?,
            operand,
        )?
        .to_string(),
        Command::Float { width, value } => {
            to_float(FloatWidth::try_from(width)?, &value)?.to_string()
        }
        Command::Money { value } => to_money(&value)?.to_string(),
        Command::Decimal {
            precision,
            scale,
            value,
        } => to_decimal(&value, precision, scale)?.to_string(),
        Command::Date { value } => to_date(&value, &context)?.to_iso_string(&context),
        Command::Field {
            field,
            value,
            offset,
        } => extract(field, &value, offset, &context)?,
        Command::ToChar { value, format } => to_char(&value, format.as_deref(), &context)?,
        Command::Trunc { unit, value } => {
            optional(date_trunc(&unit, &value, &context)?.map(|date| date.to_iso_string(&context)))
        }
        Command::Part { unit, value } => optional(date_part(&unit, &value, &context)?),
        Command::Interval { unit, value } => optional(interval(&unit, &value, &context)?),
        Command::IntervalToUnit { unit, millis } => optional(interval_to_unit(&unit, millis)),
        Command::DateGmt { value } => date_gmt(&value, &context)?,
        Command::GmtTimestamp { seconds } => gmt_timestamp(seconds)?,
        Command::Timestamp { style, seconds } => match style {
            TimestampStyle::Date => date_from_timestamp(seconds, &context)?,
            TimestampStyle::Date4 => date4_from_timestamp(seconds, &context)?,
            TimestampStyle::Time => time_from_timestamp(seconds, &context)?,
        },
        Command::IsDst { value } => is_dst(&value, &context)?.to_string(),
    };
    let mut out = stdout().lock();
    writeln!(out, "{output}")?;
    out.flush()?;
    Ok(())
}

fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .with_target(false);
    match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow!(e).context("Failed to install the diagnostics subscriber"))
}

/// Unknown units print `null`, as the legacy functions returned it.
fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "null".into(), |value| value.to_string())
}

fn extract(
    field: Field,
    value: &str,
    offset: Option<i64>,
    context: &DateContext,
) -> Result<String, ScalarError> {
    Ok(match field {
        Field::Year => year(value, context)?.to_string(),
        Field::Quarter => quarter(value, context)?.to_string(),
        Field::Month => month(value, context)?.to_string(),
        Field::Week => week(value, context)?.to_string(),
        Field::WeekIso => week_iso(value, context)?.to_string(),
        Field::Day => day(value, context)?.to_string(),
        Field::DayOfMonth => day_of_month(value, context)?.to_string(),
        Field::DayOfWeek => day_of_week(value, offset, context)?.to_string(),
        Field::DayOfYear => day_of_year(value, context)?.to_string(),
        Field::Dow => dow(value, context)?.into(),
        Field::Hour => hour(value, context)?.to_string(),
        Field::Minute => minute(value, context)?.to_string(),
        Field::Second => second(value, context)?.to_string(),
        Field::Millisecond => millisecond(value).to_string(),
        Field::Microsecond => microsecond(value).to_string(),
        Field::Nanosecond => nanosecond(value).to_string(),
    })
}

fn bit(
    operation: BitOperation,
    value: BoundedInteger,
    operand: Option<i32>,
) -> anyhow::Result<i64> {
    if operation == BitOperation::Not {
        if operand.is_some() {
            bail!("The not operation takes no operand");
        }
        return Ok(value.bit_not().into());
    }
    let Some(operand) = operand else {
        bail!("This bit operation requires an operand");
    };
    let position = || {
        u32::try_from(operand)
            .ok()
            .filter(|position| *position < 32)
            .with_context(|| format!("{operand} is not a bit position between 0 and 31"))
    };
    Ok(match operation {
        BitOperation::And => value.bit_and(operand).into(),
        BitOperation::AndNot => value.bit_and_not(operand).into(),
        BitOperation::Or => value.bit_or(operand).into(),
        BitOperation::Xor => value.bit_xor(operand).into(),
        BitOperation::Shift => value.bit_shift(operand).into(),
        BitOperation::Clear => value.bit_clear(position()?).into(),
        BitOperation::Flip => value.bit_flip(position()?).into(),
        BitOperation::Set => value.bit_set(position()?).into(),
        BitOperation::Test => value.bit_test(position()?).into(),
        BitOperation::Not => value.bit_not().into(),
    })
}
