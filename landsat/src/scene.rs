use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use std::fmt;

/// One candidate scene covering the searched point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSummary {
    /// Opaque, unique scene identifier.
    pub scene_id: String,

    /// Acquisition time.
    #[serde(deserialize_with = "deserialize_date")]
    pub date: DateTime<Utc>,

    /// Percentage of the scene obscured by cloud, `[0, 100]`.
    pub cloud_cover: f64,
}

impl fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Date: {} | Cloud Cover: {}% | Scene ID: {}",
            self.date.format("%Y-%m-%d"),
            self.cloud_cover,
            self.scene_id
        )
    }
}

/// Parses an RFC 3339 timestamp, or a bare acquisition date which is
/// taken as midnight UTC.
pub(crate) fn parse_date(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        })
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(|e| D::Error::custom(format!("invalid date {raw:?}, {e}")))
}
