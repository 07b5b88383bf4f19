//! Display formatting for the endpoint's `HH:MM:SS[+HHMM]` time token.

use chrono::NaiveTime;

pub const INVALID_TIME: &str = "Invalid time format";

/// Render `raw` as a 12-hour clock time, followed by ` (GMT±HH:MM)` when
/// the token carries an offset suffix.
///
/// Never fails: malformed input yields [`INVALID_TIME`].
pub fn format_time(raw: &str) -> String {
    render(raw, true)
}

/// Same as [`format_time`] but the offset suffix is never shown.
pub fn format_clock(raw: &str) -> String {
    render(raw, false)
}

fn render(raw: &str, with_offset: bool) -> String {
    match parse(raw) {
        Some((time, offset)) => {
            let clock = time.format("%I:%M:%S %p").to_string();
            match offset {
                Some(offset) if with_offset => format!("{clock} (GMT{offset})"),
                _ => clock,
            }
        }
        None => INVALID_TIME.to_string(),
    }
}

fn parse(raw: &str) -> Option<(NaiveTime, Option<String>)> {
    let clock = raw.get(..8)?;
    let suffix = raw.get(8..)?;

    let mut parts = clock.split(':');
    let hour = two_digits(parts.next()?)?;
    let minute = two_digits(parts.next()?)?;
    let second = two_digits(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }

    let time = NaiveTime::from_hms_opt(hour, minute, second)?;

    let offset = if suffix.is_empty() { None } else { Some(parse_offset(suffix)?) };

    Some((time, offset))
}

/// `+0530` -> `+05:30`
fn parse_offset(suffix: &str) -> Option<String> {
    let (sign, digits) = suffix.split_at_checked(1)?;
    if sign != "+" && sign != "-" {
        return None;
    }
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = digits.split_at(2);
    Some(format!("{sign}{hours}:{minutes}"))
}

fn two_digits(part: &str) -> Option<u32> {
    if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
