use std::sync::OnceLock;

use ::chrono::{DateTime, Datelike, TimeZone, Utc};
use ::chrono_tz::Europe::Oslo;
use ::regex::Regex;

/// Короткие названия месяцев в норвежском "medium" формате
const MONTHS: [&str; 12] = [
    "jan.", "feb.", "mar.", "apr.", "mai", "jun.", "jul.", "aug.", "sep.", "okt.", "nov.", "des.",
];

/// `/Date(<ms>±HHMM)/` from the feed and the split `(<ms>)(±HHMM)` form.
/// Both capture millis, sign, hours, minutes in that order.
fn patterns() -> &'static [Regex; 2] {
    static PATTERNS: OnceLock<[Regex; 2]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"^/Date\((-?\d+)([+-])(\d{2})(\d{2})\)/$",
            r"^\((-?\d+)\)\(([+-])(\d{2})(\d{2})\)$",
        ]
        .map(|p| Regex::new(p).expect("encoded date pattern"))
    })
}

/// Extracts the instant in epoch milliseconds, with the timezone offset applied.
///
/// Returns `None` when the string is not an encoded date, or when the numbers
/// do not fit into `i64`.
pub fn decode_instant(encoded: &str) -> Option<i64> {
    let caps = patterns().iter().find_map(|p| p.captures(encoded))?;

    let millis = caps[1].parse::<i64>().ok()?;
    let sign = if &caps[2] == "-" { -1 } else { 1 };
    let hours = caps[3].parse::<i64>().ok()?;
    let minutes = caps[4].parse::<i64>().ok()?;

    let offset_minutes = sign * (60 * hours + minutes);

    millis.checked_add(offset_minutes * 60_000)
}

/// Parses an encoded date into a UTC instant.
pub fn parse_date(encoded: &str) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(decode_instant(encoded)?).single()
}

/// Full years between `birth` and `today`, both read as UTC calendar fields.
pub fn age_on(birth: Option<DateTime<Utc>>, today: DateTime<Utc>) -> Option<i32> {
    let birth = birth?;

    let age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        Some(age - 1)
    } else {
        Some(age)
    }
}

/// `7. mar. 1979`
pub fn format_medium<D: Datelike>(date: &D) -> String {
    format!(
        "{}. {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Время в часовом поясе Осло: `16. okt. 2026, 14:05`
pub fn format_last_updated(at: DateTime<Utc>) -> String {
    let local = at.with_timezone(&Oslo);
    format!("{}, {}", format_medium(&local), local.format("%H:%M"))
}
