//! Request bodies accepted by the plant API.
//!
//! Both schemas reject unknown fields but tolerate an `id`, which is always
//! ignored. `lastWatered` cannot be supplied on create; the server always
//! stamps it.

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{DEFAULT_PLANT_IMAGE, DEFAULT_WATERING_FREQUENCY_DAYS};
use crate::error::ValidationError;
use crate::plant::{iso_millis, Health, Plant, PlantId, Sunlight};

/// Body of `POST /plants`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewPlant {
    /// Discarded; the server assigns ids.
    #[serde(default, skip_serializing)]
    pub id: Option<IgnoredAny>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_frequency",
        skip_serializing_if = "Option::is_none"
    )]
    pub watering_frequency: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunlight: Option<Sunlight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<Health>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewPlant {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankName);
        }
        if self.watering_frequency == Some(0) {
            return Err(ValidationError::ZeroWateringFrequency);
        }
        Ok(())
    }

    /// Build the stored record, filling every omitted field with its default.
    /// An empty image string counts as omitted.
    pub fn into_plant(self, id: PlantId, now: DateTime<Utc>) -> Plant {
        Plant {
            id,
            name: self.name,
            species: self.species.unwrap_or_default(),
            image: self
                .image
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PLANT_IMAGE.to_string()),
            watering_frequency: self
                .watering_frequency
                .unwrap_or(DEFAULT_WATERING_FREQUENCY_DAYS),
            sunlight: self.sunlight.unwrap_or_default(),
            last_watered: now,
            health: self.health.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
        }
    }
}

/// Body of `PUT /plants/:id`. Every field is optional; present fields
/// replace the stored value, absent ones are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlantPatch {
    /// Accepted for compatibility with clients that echo the whole record
    /// back, then discarded: the path id always wins.
    #[serde(default, skip_serializing)]
    pub id: Option<IgnoredAny>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_frequency",
        skip_serializing_if = "Option::is_none"
    )]
    pub watering_frequency: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunlight: Option<Sunlight>,
    #[serde(
        default,
        with = "iso_millis::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_watered: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<Health>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PlantPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(ValidationError::BlankName);
        }
        if self.watering_frequency == Some(0) {
            return Err(ValidationError::ZeroWateringFrequency);
        }
        Ok(())
    }

    /// Shallow merge onto `plant`. The id is never touched.
    pub fn apply(self, plant: &mut Plant) {
        if let Some(name) = self.name {
            plant.name = name;
        }
        if let Some(species) = self.species {
            plant.species = species;
        }
        if let Some(image) = self.image {
            plant.image = image;
        }
        if let Some(days) = self.watering_frequency {
            plant.watering_frequency = days;
        }
        if let Some(sunlight) = self.sunlight {
            plant.sunlight = sunlight;
        }
        if let Some(ts) = self.last_watered {
            plant.last_watered = ts;
        }
        if let Some(health) = self.health {
            plant.health = health;
        }
        if let Some(notes) = self.notes {
            plant.notes = notes;
        }
    }
}

/// The web form posts `wateringFrequency` as a string, so accept either a
/// JSON integer or a numeric string. A blank string is treated as omitted.
pub(crate) fn deserialize_frequency<'de, D>(d: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Frequency {
        Number(u32),
        Text(String),
    }

    match Option::<Frequency>::deserialize(d)? {
        None => Ok(None),
        Some(Frequency::Number(days)) => Ok(Some(days)),
        Some(Frequency::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Frequency::Text(text)) => text.trim().parse().map(Some).map_err(|_| {
            serde::de::Error::custom(format!(
                "wateringFrequency must be a whole number of days, got {text:?}"
            ))
        }),
    }
}

/// Stored records written from form posts may hold the frequency as a string.
pub(crate) fn deserialize_stored_frequency<'de, D>(d: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_frequency(d)?.unwrap_or(DEFAULT_WATERING_FREQUENCY_DAYS))
}
