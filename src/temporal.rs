//! The `Temporal` entity — one record aggregating five temporal-valued fields.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A free-standing record with one field per temporal flavor.
///
/// Every field is optional; absent fields persist as NULL and come back
/// absent. `id` is assigned by storage on first save and immutable after.
///
/// When both are present, `zone_offset` should be the offset `zone_id`'s
/// rule set produces for `instant`. Nothing enforces that pairing — callers
/// compute it, and an inconsistent pair is stored as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temporal {
    pub id: Option<i64>,
    pub local_date: Option<NaiveDate>,
    pub local_time: Option<NaiveTime>,
    pub instant: Option<DateTime<Utc>>,
    pub zone_id: Option<Tz>,
    #[serde(with = "offset_serde", default)]
    pub zone_offset: Option<FixedOffset>,
}

impl Temporal {
    /// An empty record with every field absent.
    pub fn new() -> Self {
        Temporal {
            id: None,
            local_date: None,
            local_time: None,
            instant: None,
            zone_id: None,
            zone_offset: None,
        }
    }

    /// A record stamped with the current moment: today's date and wall-clock
    /// time as seen in the host's default zone, the current instant, the
    /// host zone itself, and the offset that zone implies right now.
    pub fn now() -> Self {
        let instant = Utc::now();
        let zone = host_zone();
        let local = instant.with_timezone(&zone);
        Temporal {
            id: None,
            local_date: Some(local.date_naive()),
            local_time: Some(local.time()),
            instant: Some(instant),
            zone_id: Some(zone),
            zone_offset: Some(local.offset().fix()),
        }
    }
}

impl Default for Temporal {
    fn default() -> Self {
        Self::new()
    }
}

/// The host's default zone, resolved through the platform and parsed via the
/// zone registry. Falls back to UTC when the platform reports nothing usable.
fn host_zone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse().ok())
        .unwrap_or(Tz::UTC)
}

/// serde shim for `Option<FixedOffset>` — chrono's `FixedOffset` carries no
/// serde impls, so the JSON form reuses the canonical storage text.
mod offset_serde {
    use chrono::FixedOffset;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::convert;

    pub fn serialize<S>(offset: &Option<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match offset {
            Some(offset) => serializer.serialize_some(&convert::zone_offset_to_storage(*offset)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|text| {
            convert::zone_offset_from_storage(&text).map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn now_pairs_offset_with_zone_rules() {
        let temporal = Temporal::now();
        let instant = temporal.instant.unwrap();
        let zone = temporal.zone_id.unwrap();
        let expected = zone.offset_from_utc_datetime(&instant.naive_utc()).fix();
        assert_eq!(temporal.zone_offset.unwrap(), expected);
        assert!(temporal.id.is_none());
    }

    #[test]
    fn now_local_fields_match_instant_in_zone() {
        let temporal = Temporal::now();
        let local = temporal
            .instant
            .unwrap()
            .with_timezone(&temporal.zone_id.unwrap());
        assert_eq!(temporal.local_date.unwrap(), local.date_naive());
        assert_eq!(temporal.local_time.unwrap(), local.time());
    }

    #[test]
    fn json_round_trip() {
        let zone: Tz = "America/Edmonton".parse().unwrap();
        let instant = Utc.with_ymd_and_hms(2017, 3, 12, 8, 59, 59).unwrap();
        let temporal = Temporal {
            id: Some(7),
            local_date: Some(NaiveDate::from_ymd_opt(2017, 3, 12).unwrap()),
            local_time: Some(NaiveTime::from_hms_opt(1, 59, 59).unwrap()),
            instant: Some(instant),
            zone_id: Some(zone),
            zone_offset: Some(zone.offset_from_utc_datetime(&instant.naive_utc()).fix()),
        };

        let json = serde_json::to_value(&temporal).unwrap();
        assert_eq!(json["zone_id"], "America/Edmonton");
        assert_eq!(json["zone_offset"], "-07:00");

        let back: Temporal = serde_json::from_value(json).unwrap();
        assert_eq!(back, temporal);
    }

    #[test]
    fn json_absent_fields_stay_absent() {
        let json = serde_json::to_value(Temporal::new()).unwrap();
        let back: Temporal = serde_json::from_value(json).unwrap();
        assert_eq!(back, Temporal::new());
    }
}
