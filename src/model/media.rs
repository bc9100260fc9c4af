use std::{cmp::Ordering, fmt};

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One catalogued file as listed by `/api/media/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub length: Length,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub album_name: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub time: AddedAt,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users_id: Option<i64>,
}

/// Track duration in whole seconds. The backend sends `"MM:SS"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Length(pub u64);

impl Length {
    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Accepts `SS`, `MM:SS` and `HH:MM:SS`.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut total: u64 = 0;
        let mut parts = 0;
        for part in raw.trim().split(':') {
            let value: u64 = part.trim().parse().ok()?;
            total = total.checked_mul(60)?.checked_add(value)?;
            parts += 1;
        }
        if parts > 3 {
            return None;
        }
        Some(Self(total))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0;
        if secs >= 3600 {
            write!(f, "{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
        } else {
            write!(f, "{:02}:{:02}", secs / 60, secs % 60)
        }
    }
}

impl Serialize for Length {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Missing,
            Secs(u64),
            Float(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Missing => Ok(Length::default()),
            Raw::Secs(secs) => Ok(Length(secs)),
            Raw::Float(secs) if secs >= 0.0 => Ok(Length(secs as u64)),
            Raw::Float(secs) => Err(serde::de::Error::custom(format!("negative length {secs}"))),
            Raw::Text(text) => Length::parse(&text)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid length '{text}'"))),
        }
    }
}

const ADDED_AT_FORMATS: [&str; 3] = ["%Y-%m-%d, %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Creation timestamp exactly as the backend sent it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddedAt(String);

impl AddedAt {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parsed(&self) -> Option<NaiveDateTime> {
        let raw = self.0.trim();
        ADDED_AT_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    }

    /// Chronological when both sides parse, lexicographic otherwise.
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        match (self.parsed(), other.parsed()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.0.cmp(&other.0),
        }
    }
}

impl fmt::Display for AddedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for AddedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AddedAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<String>::deserialize(deserializer).map(|raw| AddedAt(raw.unwrap_or_default()))
    }
}
