use rspotify::model::TimeRange as ApiTimeRange;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest popularity score Spotify hands out.
pub const MAX_POPULARITY: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    /// Name of the first listed artist, empty when Spotify lists none.
    pub artist: String,
    pub popularity: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub popularity: u8,
}

/// Recency bucket used by Spotify when computing a user's top items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    #[default]
    Short,
    Medium,
    Long,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::Short, TimeRange::Medium, TimeRange::Long];

    /// The lexical value sent to the Web API as `time_range`.
    pub fn api_value(self) -> &'static str {
        ApiTimeRange::from(self).into()
    }
}

impl From<TimeRange> for ApiTimeRange {
    fn from(range: TimeRange) -> Self {
        match range {
            TimeRange::Short => ApiTimeRange::ShortTerm,
            TimeRange::Medium => ApiTimeRange::MediumTerm,
            TimeRange::Long => ApiTimeRange::LongTerm,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeRange::Short => "short",
            TimeRange::Medium => "medium",
            TimeRange::Long => "long",
        };
        f.write_str(label)
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(TimeRange::Short),
            "medium" => Ok(TimeRange::Medium),
            "long" => Ok(TimeRange::Long),
            other => Err(format!(
                "unknown time range '{}' (expected short, medium or long)",
                other
            )),
        }
    }
}

/// Spotify documents popularity as 0..=100; clamp anything else.
pub fn clamp_popularity(raw: u32) -> u8 {
    raw.min(MAX_POPULARITY as u32) as u8
}

#[cfg(test)]
impl Track {
    pub fn mock(name: &str, artist: &str) -> Self {
        Self {
            name: name.to_string(),
            artist: artist.to_string(),
            popularity: 50,
        }
    }
}

#[cfg(test)]
impl Artist {
    pub fn mock(name: &str, popularity: u8) -> Self {
        Self {
            id: format!("{}_id", name.to_lowercase().replace(' ', "_")),
            name: name.to_string(),
            popularity,
        }
    }
}
