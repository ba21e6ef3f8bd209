//! Converters between temporal values and their storage-safe text forms.
//!
//! Each converter is a pure, symmetric pair of functions: `*_to_storage`
//! produces the canonical column text, `*_from_storage` parses it back.
//! Absent values never reach these functions; `Option` is handled at the
//! row-mapping and serde layers, so NULL in means NULL out.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, Utc};
use chrono_tz::Tz;

use crate::error::ConvertError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Calendar date to `YYYY-MM-DD`. Structural reshape only, no zone involved.
pub fn date_to_storage(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn date_from_storage(raw: &str) -> Result<NaiveDate, ConvertError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| ConvertError::InvalidDate(raw.to_string()))
}

/// Wall-clock time to `HH:MM:SS`.
///
/// Any sub-second component is truncated, not rounded: the storage column
/// holds whole seconds only, so round-tripping a time with a fractional
/// second is lossy by design.
pub fn time_to_storage(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn time_from_storage(raw: &str) -> Result<NaiveTime, ConvertError> {
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .map_err(|_| ConvertError::InvalidTime(raw.to_string()))
}

/// Absolute instant to RFC 3339 text in UTC, sub-second digits preserved.
///
/// The stored text depends only on the instant, never on the process-local
/// zone: two hosts with different default zones write identical bytes for
/// the same point on the timeline.
pub fn instant_to_storage(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub fn instant_from_storage(raw: &str) -> Result<DateTime<Utc>, ConvertError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| ConvertError::InvalidTimestamp(raw.to_string()))
}

/// DST-aware zone identifier to its canonical name, e.g. `America/Edmonton`.
pub fn zone_id_to_storage(zone: Tz) -> String {
    zone.name().to_string()
}

/// Parses a zone name back through the zone-rule registry. A name the
/// registry does not know is a hard failure.
pub fn zone_id_from_storage(raw: &str) -> Result<Tz, ConvertError> {
    raw.parse::<Tz>()
        .map_err(|_| ConvertError::UnknownZone(raw.to_string()))
}

/// Fixed UTC offset to its canonical signed `±HH:MM[:SS]` form.
///
/// The seconds part is omitted when zero, so the common case reads
/// `-07:00` while an odd historical offset reads `+05:45:30`.
pub fn zone_offset_to_storage(offset: FixedOffset) -> String {
    let total = offset.local_minus_utc();
    let sign = if total < 0 { '-' } else { '+' };
    let total = total.abs();
    let (hours, minutes, seconds) = (total / 3600, total % 3600 / 60, total % 60);
    if seconds == 0 {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)
    }
}

/// Parses `±HH:MM`, `±HH:MM:SS`, or `Z` (the form the original serializer
/// used for UTC). Anything else is a hard failure.
pub fn zone_offset_from_storage(raw: &str) -> Result<FixedOffset, ConvertError> {
    let invalid = || ConvertError::InvalidOffset(raw.to_string());

    if raw == "Z" || raw == "z" {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match raw.as_bytes().first() {
        Some(b'+') => (1i32, &raw[1..]),
        Some(b'-') => (-1i32, &raw[1..]),
        _ => return Err(invalid()),
    };

    let mut fields = rest.split(':');
    let hours = parse_two_digits(fields.next()).ok_or_else(invalid)?;
    let minutes = parse_two_digits(fields.next()).ok_or_else(invalid)?;
    let seconds = match fields.next() {
        Some(field) => parse_two_digits(Some(field)).ok_or_else(invalid)?,
        None => 0,
    };
    if fields.next().is_some() || minutes > 59 || seconds > 59 {
        return Err(invalid());
    }

    let total = sign * (hours * 3600 + minutes * 60 + seconds);
    FixedOffset::east_opt(total).ok_or_else(invalid)
}

fn parse_two_digits(field: Option<&str>) -> Option<i32> {
    let field = field?;
    if field.len() != 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
