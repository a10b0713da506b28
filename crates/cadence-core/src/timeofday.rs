//! Wall-clock time-of-day parsing and arithmetic.
//!
//! All scheduling in Cadence happens on same-day, timezone-free wall-clock
//! times. Internally every computation works on integer minutes since
//! midnight (`0..=1439`); the `HH:MM` string form exists only at the
//! storage and interface boundaries. Parsing never fails loudly; callers
//! get `None` and decide whether to reject the input or drop the field.

use jiff::{tz::TimeZone, Timestamp};

/// Number of minutes in a day; all day arithmetic wraps at this bound.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Parses a time-of-day string into minutes since midnight.
///
/// Accepts zero-padded or unpadded 24-hour `HH:MM` and `HH:MM:SS`
/// (seconds are ignored), plus 12-hour `HH:MM AM`/`HH:MM PM` forms that
/// legacy records may carry. Returns `None` for anything unparsable or
/// out of range; this function never errors.
///
/// # Examples
///
/// ```rust
/// use cadence_core::timeofday::parse_to_minutes;
///
/// assert_eq!(parse_to_minutes("09:30"), Some(570));
/// assert_eq!(parse_to_minutes("9:30:15"), Some(570));
/// assert_eq!(parse_to_minutes("12:05 am"), Some(5));
/// assert_eq!(parse_to_minutes("25:00"), None);
/// ```
pub fn parse_to_minutes(value: &str) -> Option<u32> {
    let s = value.trim();
    if s.is_empty() {
        return None;
    }

    // 12-hour suffix, case-insensitive, with or without a space
    let upper = s.to_ascii_uppercase();
    let (clock, pm) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end().to_string(), Some(false))
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end().to_string(), Some(true))
    } else {
        (upper, None)
    };

    let mut parts = clock.split(':');
    let hour: u32 = parts.next()?.trim().parse().ok()?;
    let minute: u32 = parts.next()?.trim().parse().ok()?;
    if let Some(seconds) = parts.next() {
        let _: u32 = seconds.trim().parse().ok()?;
    }
    if parts.next().is_some() || minute > 59 {
        return None;
    }

    let hour = match pm {
        // 12 AM is midnight, 12 PM stays 12
        Some(false) if hour == 12 => 0,
        Some(true) if hour != 12 => hour + 12,
        Some(_) => hour,
        None => hour,
    };
    if hour > 23 {
        return None;
    }

    Some(hour * 60 + minute)
}

/// Normalizes a time-of-day string to canonical zero-padded `HH:MM`.
///
/// Returns `None` when the input cannot be parsed; the caller must drop
/// the field rather than persist a corrupt value.
pub fn normalize(value: &str) -> Option<String> {
    parse_to_minutes(value).map(minutes_to_hhmm)
}

/// Formats minutes since midnight as zero-padded `HH:MM`, wrapping at 24h.
pub fn minutes_to_hhmm(minutes: u32) -> String {
    let wrapped = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}

/// Rounds `minutes` up to the next multiple of `slot`, wrapping the day.
///
/// Exact multiples are kept as-is. `slot` of zero is treated as no
/// rounding.
pub fn round_up_to_slot(minutes: u32, slot: u32) -> u32 {
    if slot == 0 {
        return minutes % MINUTES_PER_DAY;
    }
    let rounded = minutes.div_ceil(slot) * slot;
    rounded % MINUTES_PER_DAY
}

/// Current local wall-clock time as minutes since midnight.
pub fn current_minutes() -> u32 {
    let now = Timestamp::now().to_zoned(TimeZone::system());
    now.hour() as u32 * 60 + now.minute() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_24_hour_forms() {
        assert_eq!(parse_to_minutes("00:00"), Some(0));
        assert_eq!(parse_to_minutes("23:59"), Some(1439));
        assert_eq!(parse_to_minutes("7:05"), Some(425));
        assert_eq!(parse_to_minutes("09:15:59"), Some(555));
    }

    #[test]
    fn parses_12_hour_forms() {
        assert_eq!(parse_to_minutes("12:00 AM"), Some(0));
        assert_eq!(parse_to_minutes("12:00 PM"), Some(720));
        assert_eq!(parse_to_minutes("1:30pm"), Some(810));
        assert_eq!(parse_to_minutes("11:45 Pm"), Some(1425));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_to_minutes(""), None);
        assert_eq!(parse_to_minutes("24:00"), None);
        assert_eq!(parse_to_minutes("10:60"), None);
        assert_eq!(parse_to_minutes("noon"), None);
        assert_eq!(parse_to_minutes("10"), None);
        assert_eq!(parse_to_minutes("10:15:20:30"), None);
    }

    #[test]
    fn normalizes_to_padded_hhmm() {
        assert_eq!(normalize("9:5"), Some("09:05".to_string()));
        assert_eq!(normalize("1:30 PM"), Some("13:30".to_string()));
        assert_eq!(normalize("whenever"), None);
    }

    #[test]
    fn formatting_wraps_the_day() {
        assert_eq!(minutes_to_hhmm(0), "00:00");
        assert_eq!(minutes_to_hhmm(1439), "23:59");
        assert_eq!(minutes_to_hhmm(1450), "00:10");
    }

    #[test]
    fn slot_rounding() {
        assert_eq!(round_up_to_slot(61, 5), 65);
        assert_eq!(round_up_to_slot(65, 5), 65);
        assert_eq!(round_up_to_slot(1438, 5), 0);
        assert_eq!(round_up_to_slot(123, 0), 123);
    }
}
