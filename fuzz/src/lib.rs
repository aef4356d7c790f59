use oxscalar::{Clock, DateContext, LocalZone, TimezoneOffset};

/// 2020-03-17T13:45:30Z
const NOW: i64 = 1_584_452_730_000;

/// The contexts every date target runs against: UTC and the two extreme fixed offsets.
pub fn contexts() -> [DateContext; 3] {
    [TimezoneOffset::UTC, TimezoneOffset::MAX, TimezoneOffset::MIN]
        .map(|offset| DateContext::new(LocalZone::Fixed(offset), Clock::Fixed(NOW)))
}

/// Splits the input at the first 0xFF byte, for targets taking two texts.
pub fn split_pair(data: &[u8]) -> Option<(&str, &str)> {
    let (left, right) = match data.iter().position(|b| *b == 0xFF) {
        Some(position) => (&data[..position], &data[position + 1..]),
        None => (data, &[][..]),
    };
    Some((str::from_utf8(left).ok()?, str::from_utf8(right).ok()?))
}
