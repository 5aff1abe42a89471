//! Field rules for catalog input
//!
//! `validate_new_track` and `validate_patch` are the only way to obtain a
//! `NewTrack` / `TrackPatch`, so every persisted row has a known genre and a
//! real calendar date.

use chrono::NaiveDate;

use super::models::{Genre, NewTrack, TrackPatch, TrackRequest};

/// Validation errors for track input
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TrackValidationError {
    #[error("All fields are required!")]
    MissingFields,

    #[error("At least one field must be provided for the update.")]
    NoFields,

    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("Invalid genre. Allowed genres: {}", Genre::allowed_list())]
    InvalidGenre(String),

    #[error("Invalid date format! Correct format: YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("Invalid date!")]
    InvalidDate(String),

    #[error("Duration must be a positive number of seconds")]
    InvalidDuration(f64),
}

/// Parse a genre name against the closed set
pub fn parse_genre(value: &str) -> Result<Genre, TrackValidationError> {
    value
        .parse::<Genre>()
        .map_err(|_| TrackValidationError::InvalidGenre(value.to_string()))
}

/// Parse a release date.
///
/// The literal shape must be `\d{4}-\d{2}-\d{2}`; the value must also exist on
/// the calendar (`2023-02-30` is rejected).
pub fn parse_release_date(value: &str) -> Result<NaiveDate, TrackValidationError> {
    if !has_date_shape(value) {
        return Err(TrackValidationError::InvalidDateFormat(value.to_string()));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| TrackValidationError::InvalidDate(value.to_string()))
}

fn has_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn check_duration(duration: f64) -> Result<f64, TrackValidationError> {
    if duration.is_finite() && duration > 0.0 {
        Ok(duration)
    } else {
        Err(TrackValidationError::InvalidDuration(duration))
    }
}

fn required(value: Option<String>) -> Result<String, TrackValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(TrackValidationError::MissingFields),
    }
}

fn optional_non_empty(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<String>, TrackValidationError> {
    match value {
        Some(v) if v.is_empty() => Err(TrackValidationError::EmptyField(field)),
        other => Ok(other),
    }
}

/// Validate a create request: every field must be present and well formed
pub fn validate_new_track(req: TrackRequest) -> Result<NewTrack, TrackValidationError> {
    let title = required(req.title)?;
    let artist = required(req.artist)?;
    let genre = required(req.genre)?;
    let duration = req.duration.ok_or(TrackValidationError::MissingFields)?;
    let release_date = required(req.release_date)?;
    let image_url = required(req.image_url)?;

    Ok(NewTrack {
        title,
        artist,
        genre: parse_genre(&genre)?,
        duration: check_duration(duration)?,
        release_date: parse_release_date(&release_date)?,
        image_url,
    })
}

/// Validate an update request: at least one field, each supplied field well formed
pub fn validate_patch(req: TrackRequest) -> Result<TrackPatch, TrackValidationError> {
    let patch = TrackPatch {
        title: optional_non_empty(req.title, "title")?,
        artist: optional_non_empty(req.artist, "artist")?,
        genre: optional_non_empty(req.genre, "genre")?
            .map(|g| parse_genre(&g))
            .transpose()?,
        duration: req.duration.map(check_duration).transpose()?,
        release_date: optional_non_empty(req.release_date, "release_date")?
            .map(|d| parse_release_date(&d))
            .transpose()?,
        image_url: optional_non_empty(req.image_url, "image_url")?,
    };

    if patch.is_empty() {
        return Err(TrackValidationError::NoFields);
    }
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> TrackRequest {
        TrackRequest {
            title: Some("Episode 1".to_string()),
            artist: Some("Host".to_string()),
            genre: Some("podcast".to_string()),
            duration: Some(1200.0),
            release_date: Some("2024-03-15".to_string()),
            image_url: Some("https://img.example/1.png".to_string()),
        }
    }

    #[test]
    fn test_valid_new_track() {
        let track = validate_new_track(full_request()).unwrap();
        assert_eq!(track.genre, Genre::Podcast);
        assert_eq!(
            track.release_date,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert_eq!(track.duration, 1200.0);
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut req = full_request();
        req.artist = None;
        assert_eq!(
            validate_new_track(req),
            Err(TrackValidationError::MissingFields)
        );

        let mut req = full_request();
        req.duration = None;
        assert_eq!(
            validate_new_track(req),
            Err(TrackValidationError::MissingFields)
        );
    }

    #[test]
    fn test_empty_string_counts_as_missing_on_create() {
        let mut req = full_request();
        req.title = Some(String::new());
        assert_eq!(
            validate_new_track(req),
            Err(TrackValidationError::MissingFields)
        );
    }

    #[test]
    fn test_genres_outside_enum_rejected() {
        for bad in ["metal", "Podcast", "JAZZ", " rock", "rock ", "hip-hop"] {
            let mut req = full_request();
            req.genre = Some(bad.to_string());
            assert_eq!(
                validate_new_track(req),
                Err(TrackValidationError::InvalidGenre(bad.to_string())),
                "genre {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_date_shape_rejected() {
        for bad in [
            "2024/03/15",
            "15-03-2024",
            "2024-3-15",
            "20240315",
            "2024-03-15T00:00:00",
            "abcd-ef-gh",
            "+2024-03-1",
        ] {
            assert_eq!(
                parse_release_date(bad),
                Err(TrackValidationError::InvalidDateFormat(bad.to_string())),
                "{:?} should fail the shape check",
                bad
            );
        }
    }

    #[test]
    fn test_impossible_calendar_dates_rejected() {
        for bad in ["2023-02-29", "2024-02-30", "2024-13-01", "2024-00-10", "2024-04-31"] {
            assert_eq!(
                parse_release_date(bad),
                Err(TrackValidationError::InvalidDate(bad.to_string())),
                "{:?} is not a real date",
                bad
            );
        }
        assert!(parse_release_date("2024-02-29").is_ok());
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        let mut req = full_request();
        req.duration = Some(0.0);
        assert_eq!(
            validate_new_track(req),
            Err(TrackValidationError::InvalidDuration(0.0))
        );

        let mut req = full_request();
        req.duration = Some(-5.5);
        assert_eq!(
            validate_new_track(req),
            Err(TrackValidationError::InvalidDuration(-5.5))
        );
    }

    #[test]
    fn test_fractional_duration_accepted() {
        let mut req = full_request();
        req.duration = Some(245.5);
        assert_eq!(validate_new_track(req).unwrap().duration, 245.5);

        let patch = validate_patch(TrackRequest {
            duration: Some(0.25),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch.duration, Some(0.25));
    }

    #[test]
    fn test_patch_requires_a_field() {
        assert_eq!(
            validate_patch(TrackRequest::default()),
            Err(TrackValidationError::NoFields)
        );
    }

    #[test]
    fn test_patch_with_single_field() {
        let patch = validate_patch(TrackRequest {
            artist: Some("Someone".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch.artist.as_deref(), Some("Someone"));
        assert!(patch.title.is_none());
        assert!(patch.genre.is_none());
    }

    #[test]
    fn test_patch_rejects_bad_genre() {
        let req = TrackRequest {
            genre: Some("polka".to_string()),
            ..Default::default()
        };
        assert_eq!(
            validate_patch(req),
            Err(TrackValidationError::InvalidGenre("polka".to_string()))
        );
    }

    #[test]
    fn test_patch_rejects_empty_string() {
        let req = TrackRequest {
            title: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            validate_patch(req),
            Err(TrackValidationError::EmptyField("title"))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TrackValidationError::InvalidGenre("x".into()).to_string(),
            "Invalid genre. Allowed genres: podcast, rock, ambient, jazz, electronic, pop, classical, rap"
        );
        assert_eq!(
            TrackValidationError::InvalidDateFormat("x".into()).to_string(),
            "Invalid date format! Correct format: YYYY-MM-DD"
        );
    }
}
