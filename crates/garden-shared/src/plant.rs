//! The plant record and its enumerated attributes.
//!
//! Field names are serialized in camelCase so the JSON matches what the web
//! UI and the on-disk document have always used.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_WATERING_FREQUENCY_DAYS;

/// Server-assigned plant identifier.
pub type PlantId = u64;

/// Current time truncated to millisecond precision, which is all the
/// serialized form keeps.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

// ---------------------------------------------------------------------------
// Sunlight
// ---------------------------------------------------------------------------

/// How much direct light a plant wants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sunlight {
    Full,
    #[default]
    Partial,
    Shade,
}

impl Sunlight {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sunlight::Full => "full",
            Sunlight::Partial => "partial",
            Sunlight::Shade => "shade",
        }
    }
}

impl fmt::Display for Sunlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sunlight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Sunlight::Full),
            "partial" => Ok(Sunlight::Partial),
            "shade" => Ok(Sunlight::Shade),
            other => Err(format!("unknown sunlight level: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Owner's assessment of how the plant is doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    #[default]
    Good,
    Average,
    Poor,
}

impl Health {
    pub fn as_str(&self) -> &'static str {
        match self {
            Health::Good => "good",
            Health::Average => "average",
            Health::Poor => "poor",
        }
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Health {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" => Ok(Health::Good),
            "average" => Ok(Health::Average),
            "poor" => Ok(Health::Poor),
            other => Err(format!("unknown health level: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Plant
// ---------------------------------------------------------------------------

/// One tracked plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    /// Unique identifier, assigned on creation and never changed.
    pub id: PlantId,
    /// Display name.
    pub name: String,
    /// Botanical or common species name, possibly empty.
    #[serde(default)]
    pub species: String,
    /// Image URL shown on the plant card.
    #[serde(default)]
    pub image: String,
    /// Days between waterings.
    #[serde(
        default = "default_watering_frequency",
        deserialize_with = "crate::request::deserialize_stored_frequency"
    )]
    pub watering_frequency: u32,
    #[serde(default)]
    pub sunlight: Sunlight,
    /// When the plant was last watered (or created).
    #[serde(with = "iso_millis")]
    pub last_watered: DateTime<Utc>,
    #[serde(default)]
    pub health: Health,
    #[serde(default)]
    pub notes: String,
}

fn default_watering_frequency() -> u32 {
    DEFAULT_WATERING_FREQUENCY_DAYS
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix,
/// e.g. `2024-05-01T09:30:00.000Z`.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub(crate) fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            ts: &Option<DateTime<Utc>>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => super::serialize(ts, s),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(d)?
                .map(|raw| super::parse(&raw).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
