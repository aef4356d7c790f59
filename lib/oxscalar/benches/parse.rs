use codspeed_criterion_compat::{Criterion, Throughput, criterion_group, criterion_main};
use oxscalar::{
    Clock, DateContext, IntegerWidth, LocalZone, TemporalUnit, TimezoneOffset, to_date,
    to_decimal, to_int, to_money, truncate_to,
};

/// One text per shape rule, in the order the rules are tried
const DATES: [&str; 14] = [
    "5 day 3 hour",
    "today",
    "17-mar-2020",
    "03/17/2020 13:45:30",
    "2020-03-17",
    "2020.03.17",
    "2020_03_17",
    "03/17",
    "031720",
    "13:45",
    "20200317T134530",
    "17.03.2020",
    "2020-mar-17",
    "mar-17-2020",
];

fn context() -> DateContext {
    DateContext::new(
        LocalZone::Fixed(TimezoneOffset::UTC),
        Clock::Fixed(1_584_452_730_000),
    )
}

fn parse_dates(c: &mut Criterion) {
    let context = context();
    let mut group = c.benchmark_group("date parsing");
    group.throughput(Throughput::Elements(DATES.len().try_into().unwrap_or(u64::MAX)));
    group.bench_function("every shape", |b| {
        b.iter(|| {
            for date in DATES {
                to_date(date, &context).unwrap();
            }
        })
    });
    for date in ["2020-03-17T13:45:30Z", "Tue Mar 17 2020 13:45:30 GMT+0100"] {
        group.bench_function(format!("fallback {date}"), |b| {
            b.iter(|| to_date(date, &context).unwrap())
        });
    }
    group.finish();
}

fn truncate_dates(c: &mut Criterion) {
    let context = context();
    let date = to_date("2020-03-17 13:45:30", &context).unwrap();
    let mut group = c.benchmark_group("date truncation");
    for unit in TemporalUnit::ALL {
        group.bench_function(unit.name(), |b| {
            b.iter(|| truncate_to(unit, date, &context).unwrap())
        });
    }
    group.finish();
}

fn coerce_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("numeric coercion");
    group.bench_function("integer", |b| {
        b.iter(|| to_int(IntegerWidth::Four, "-2147483648").unwrap())
    });
    group.bench_function("money", |b| {
        b.iter(|| to_money("$1,234,567.891").unwrap())
    });
    group.bench_function("decimal", |b| {
        b.iter(|| to_decimal("123456789012345678901234567890.123456789", 39, 9).unwrap())
    });
    group.finish();
}

criterion_group!(parse, parse_dates, truncate_dates, coerce_numbers);

criterion_main!(parse);
