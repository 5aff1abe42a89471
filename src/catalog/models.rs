//! Data models for the music catalog

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Catalog genre (closed set, case-sensitive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Podcast,
    Rock,
    Ambient,
    Jazz,
    Electronic,
    Pop,
    Classical,
    Rap,
}

impl Genre {
    pub const ALL: [Genre; 8] = [
        Genre::Podcast,
        Genre::Rock,
        Genre::Ambient,
        Genre::Jazz,
        Genre::Electronic,
        Genre::Pop,
        Genre::Classical,
        Genre::Rap,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Podcast => "podcast",
            Genre::Rock => "rock",
            Genre::Ambient => "ambient",
            Genre::Jazz => "jazz",
            Genre::Electronic => "electronic",
            Genre::Pop => "pop",
            Genre::Classical => "classical",
            Genre::Rap => "rap",
        }
    }

    /// Comma separated list used in error messages
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(|g| g.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Genre {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|g| g.as_str() == s).ok_or(())
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Track {
    #[schema(example = 42)]
    pub id: i64,
    #[schema(example = "Morning Show #12")]
    pub title: String,
    #[schema(example = "Zene Radio")]
    pub artist: String,
    pub genre: Genre,
    /// Length in seconds, may be fractional
    #[schema(example = 1800.5)]
    pub duration: f64,
    #[schema(value_type = String, format = Date, example = "2024-05-01")]
    pub release_date: NaiveDate,
    #[schema(example = "https://cdn.example.com/covers/12.jpg")]
    pub image_url: String,
}

/// Raw track fields as sent by clients.
///
/// Used for both create (every field required) and update (any subset).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TrackRequest {
    #[schema(example = "Morning Show #12")]
    pub title: Option<String>,
    #[schema(example = "Zene Radio")]
    pub artist: Option<String>,
    #[schema(example = "podcast")]
    pub genre: Option<String>,
    #[schema(example = 1800.5)]
    pub duration: Option<f64>,
    #[schema(example = "2024-05-01")]
    pub release_date: Option<String>,
    #[schema(example = "https://cdn.example.com/covers/12.jpg")]
    pub image_url: Option<String>,
}

/// Validated track ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrack {
    pub title: String,
    pub artist: String,
    pub genre: Genre,
    pub duration: f64,
    pub release_date: NaiveDate,
    pub image_url: String,
}

/// Validated partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<Genre>,
    pub duration: Option<f64>,
    pub release_date: Option<NaiveDate>,
    pub image_url: Option<String>,
}

impl TrackPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.genre.is_none()
            && self.duration.is_none()
            && self.release_date.is_none()
            && self.image_url.is_none()
    }

    /// Apply onto an existing track
    pub fn apply(&self, track: &mut Track) {
        if let Some(title) = &self.title {
            track.title = title.clone();
        }
        if let Some(artist) = &self.artist {
            track.artist = artist.clone();
        }
        if let Some(genre) = self.genre {
            track.genre = genre;
        }
        if let Some(duration) = self.duration {
            track.duration = duration;
        }
        if let Some(release_date) = self.release_date {
            track.release_date = release_date;
        }
        if let Some(image_url) = &self.image_url {
            track.image_url = image_url.clone();
        }
    }
}

impl NewTrack {
    pub fn into_track(self, id: i64) -> Track {
        Track {
            id,
            title: self.title,
            artist: self.artist,
            genre: self.genre,
            duration: self.duration,
            release_date: self.release_date,
            image_url: self.image_url,
        }
    }
}
