//! Duration strings
//!
//! Parses the Go-style duration notation used in deployment configuration:
//! a sequence of `<number><unit>` pairs such as `15m`, `720h` or `1h30m`.
//! Units: `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`. Fractions are
//! allowed (`1.5h`). Negative durations are rejected.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("duration is empty")]
    Empty,

    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("duration {0:?} overflows")]
    Overflow(String),
}

/// Parse a duration string like `15m` or `2h45m30s`
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(DurationParseError::Empty);
    }
    if s.starts_with('-') {
        return Err(DurationParseError::Invalid(input.to_string()));
    }
    let s = s.strip_prefix('+').unwrap_or(s);

    // "0" is the only unit-less value accepted
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total_nanos: u128 = 0;
    let mut rest = s;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let number = &rest[..number_len];
        if number.is_empty() || number == "." || number.matches('.').count() > 1 {
            return Err(DurationParseError::Invalid(input.to_string()));
        }
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        rest = &rest[unit_len..];

        if unit.is_empty() {
            return Err(DurationParseError::MissingUnit(input.to_string()));
        }
        let unit_nanos = unit_nanos(unit).ok_or_else(|| DurationParseError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let nanos = scale(number, unit_nanos)
            .ok_or_else(|| DurationParseError::Overflow(input.to_string()))?;
        total_nanos = total_nanos
            .checked_add(nanos)
            .ok_or_else(|| DurationParseError::Overflow(input.to_string()))?;
    }

    let secs = u64::try_from(total_nanos / 1_000_000_000)
        .map_err(|_| DurationParseError::Overflow(input.to_string()))?;
    let subsec = (total_nanos % 1_000_000_000) as u32;
    Ok(Duration::new(secs, subsec))
}

fn unit_nanos(unit: &str) -> Option<u128> {
    Some(match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 3_600 * 1_000_000_000,
        _ => return None,
    })
}

/// `number * unit_nanos`, keeping the fractional digits exact
fn scale(number: &str, unit_nanos: u128) -> Option<u128> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));

    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = whole.checked_mul(unit_nanos)?;

    let mut divisor: u128 = 1;
    let mut fraction_value: u128 = 0;
    // Digits past nanosecond precision cannot change the result
    for digit in fraction.chars().take(18) {
        fraction_value = fraction_value * 10 + digit.to_digit(10)? as u128;
        divisor *= 10;
    }
    nanos = nanos.checked_add(fraction_value.checked_mul(unit_nanos)? / divisor)?;
    Some(nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_units() {
        assert_eq!(parse_duration("15m"), Ok(Duration::from_secs(15 * 60)));
        assert_eq!(parse_duration("720h"), Ok(Duration::from_secs(720 * 3600)));
        assert_eq!(parse_duration("90s"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_duration("3us"), Ok(Duration::from_micros(3)));
        assert_eq!(parse_duration("0"), Ok(Duration::ZERO));
    }

    #[test]
    fn test_compound_and_fractional() {
        assert_eq!(
            parse_duration("1h30m"),
            Ok(Duration::from_secs(3600 + 30 * 60))
        );
        assert_eq!(parse_duration("1.5h"), Ok(Duration::from_secs(5400)));
        assert_eq!(parse_duration(".5s"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_duration(" +2m "), Ok(Duration::from_secs(120)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_duration(""), Err(DurationParseError::Empty));
        assert!(matches!(
            parse_duration("15"),
            Err(DurationParseError::MissingUnit(_))
        ));
        assert!(matches!(
            parse_duration("15d"),
            Err(DurationParseError::UnknownUnit { .. })
        ));
        assert!(matches!(
            parse_duration("-5m"),
            Err(DurationParseError::Invalid(_))
        ));
        assert!(matches!(
            parse_duration("m"),
            Err(DurationParseError::Invalid(_))
        ));
        assert!(matches!(
            parse_duration("1..5h"),
            Err(DurationParseError::Invalid(_))
        ));
    }

    #[test]
    fn test_overflow() {
        assert!(matches!(
            parse_duration("99999999999999999999999999999999999999h"),
            Err(DurationParseError::Overflow(_))
        ));
    }
}
