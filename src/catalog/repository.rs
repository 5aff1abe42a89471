//! Repository layer for the `music` table

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use super::models::{Genre, NewTrack, Track, TrackPatch};
use crate::db::StoreError;

/// Storage operations for catalog tracks
#[async_trait]
pub trait TrackStore: Send + Sync {
    /// Insert a validated track, returning the generated id
    async fn insert(&self, track: &NewTrack) -> Result<i64, StoreError>;

    async fn list(&self) -> Result<Vec<Track>, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Track>, StoreError>;

    /// Apply a partial update. Returns `false` if no row has this id.
    async fn update(&self, id: i64, patch: &TrackPatch) -> Result<bool, StoreError>;

    /// Returns `false` if no row has this id
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Most recent tracks of one genre, newest release first
    async fn latest_by_genre(&self, genre: Genre, limit: i64) -> Result<Vec<Track>, StoreError>;

    /// Round-trip to the backing store
    async fn ping(&self) -> Result<(), StoreError>;
}

const TRACK_COLUMNS: &str = "id, title, artist, genre, duration, release_date, image_url";

/// PostgreSQL-backed track store
pub struct PgTrackStore {
    pool: PgPool,
}

impl PgTrackStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn track_from_row(row: &PgRow) -> Result<Track, StoreError> {
    let genre: String = row.try_get("genre")?;
    let genre = genre.parse::<Genre>().map_err(|_| StoreError::CorruptRow {
        table: "music",
        reason: format!("unknown genre '{}'", genre),
    })?;

    Ok(Track {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        artist: row.try_get("artist")?,
        genre,
        duration: row.try_get("duration")?,
        release_date: row.try_get("release_date")?,
        image_url: row.try_get("image_url")?,
    })
}

#[async_trait]
impl TrackStore for PgTrackStore {
    async fn insert(&self, track: &NewTrack) -> Result<i64, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO music (title, artist, genre, duration, release_date, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&track.title)
        .bind(&track.artist)
        .bind(track.genre.as_str())
        .bind(track.duration)
        .bind(track.release_date)
        .bind(&track.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_write)?;

        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Track>, StoreError> {
        let rows = sqlx::query(&format!("SELECT {} FROM music ORDER BY id", TRACK_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(track_from_row).collect()
    }

    async fn get(&self, id: i64) -> Result<Option<Track>, StoreError> {
        let row = sqlx::query(&format!("SELECT {} FROM music WHERE id = $1", TRACK_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(track_from_row).transpose()
    }

    async fn update(&self, id: i64, patch: &TrackPatch) -> Result<bool, StoreError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE music SET ");
        let mut set = builder.separated(", ");

        if let Some(title) = &patch.title {
            set.push("title = ").push_bind_unseparated(title.clone());
        }
        if let Some(artist) = &patch.artist {
            set.push("artist = ").push_bind_unseparated(artist.clone());
        }
        if let Some(genre) = patch.genre {
            set.push("genre = ").push_bind_unseparated(genre.as_str());
        }
        if let Some(duration) = patch.duration {
            set.push("duration = ").push_bind_unseparated(duration);
        }
        if let Some(release_date) = patch.release_date {
            set.push("release_date = ").push_bind_unseparated(release_date);
        }
        if let Some(image_url) = &patch.image_url {
            set.push("image_url = ").push_bind_unseparated(image_url.clone());
        }

        builder.push(" WHERE id = ").push_bind(id);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_write)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM music WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn latest_by_genre(&self, genre: Genre, limit: i64) -> Result<Vec<Track>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM music WHERE genre = $1 ORDER BY release_date DESC, id DESC LIMIT $2",
            TRACK_COLUMNS
        ))
        .bind(genre.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(track_from_row).collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
