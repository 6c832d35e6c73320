//! Show database operations
//!
//! A show is *upcoming* iff `start_time > now` and *past* otherwise,
//! so the two lists partition a record's shows exactly. Timestamps are
//! canonical `YYYY-MM-DD HH:MM:SS` text, compared as strings.

use anyhow::Result;
use chrono::NaiveDateTime;
use marquee_common::time::format_timestamp;
use sqlx::{Row, SqlitePool};

use crate::forms::ShowCommand;

/// Row of the global shows page (three-way join)
#[derive(Debug, Clone)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// One show on a detail page, carrying the counterpart record
/// (the artist on a venue page, the venue on an artist page)
#[derive(Debug, Clone)]
pub struct ShowEntry {
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    pub start_time: String,
}

/// Upcoming/past partition of one record's shows
#[derive(Debug, Clone, Default)]
pub struct ShowHistory {
    pub upcoming: Vec<ShowEntry>,
    pub past: Vec<ShowEntry>,
}

/// Outcome of a show insert; referential misses are reported as field
/// problems rather than opaque database errors
#[derive(Debug)]
pub enum InsertShowOutcome {
    Created(i64),
    MissingVenue,
    MissingArtist,
}

/// Every show joined with its venue's name and its artist's name and
/// image, ordered by start time then id
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query(
        r#"
        SELECT s.venue_id, v.name AS venue_name,
               s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
               s.start_time
        FROM shows s
        JOIN venues v ON s.venue_id = v.id
        JOIN artists a ON s.artist_id = a.id
        ORDER BY s.start_time ASC, s.id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| ShowListing {
            venue_id: row.get("venue_id"),
            venue_name: row.get("venue_name"),
            artist_id: row.get("artist_id"),
            artist_name: row.get("artist_name"),
            artist_image_link: row.get("artist_image_link"),
            start_time: row.get("start_time"),
        })
        .collect())
}

/// Upcoming/past shows of one venue, each entry carrying the artist
pub async fn history_for_venue(
    pool: &SqlitePool,
    venue_id: i64,
    now: &NaiveDateTime,
) -> Result<ShowHistory> {
    let rows = sqlx::query(
        r#"
        SELECT s.artist_id AS counterpart_id, a.name AS counterpart_name,
               a.image_link AS counterpart_image_link, s.start_time
        FROM shows s
        JOIN artists a ON s.artist_id = a.id
        WHERE s.venue_id = ?
        ORDER BY s.start_time ASC, s.id ASC
        "#,
    )
    .bind(venue_id)
    .fetch_all(pool)
    .await?;

    Ok(partition(rows, now))
}

/// Upcoming/past shows of one artist, each entry carrying the venue
pub async fn history_for_artist(
    pool: &SqlitePool,
    artist_id: i64,
    now: &NaiveDateTime,
) -> Result<ShowHistory> {
    let rows = sqlx::query(
        r#"
        SELECT s.venue_id AS counterpart_id, v.name AS counterpart_name,
               v.image_link AS counterpart_image_link, s.start_time
        FROM shows s
        JOIN venues v ON s.venue_id = v.id
        WHERE s.artist_id = ?
        ORDER BY s.start_time ASC, s.id ASC
        "#,
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    Ok(partition(rows, now))
}

fn partition(rows: Vec<sqlx::sqlite::SqliteRow>, now: &NaiveDateTime) -> ShowHistory {
    let now_str = format_timestamp(now);
    let mut history = ShowHistory::default();

    for row in rows {
        let entry = ShowEntry {
            counterpart_id: row.get("counterpart_id"),
            counterpart_name: row.get("counterpart_name"),
            counterpart_image_link: row.get("counterpart_image_link"),
            start_time: row.get("start_time"),
        };
        // Canonical timestamps compare chronologically as strings
        if entry.start_time > now_str {
            history.upcoming.push(entry);
        } else {
            history.past.push(entry);
        }
    }

    history
}

/// Insert a show inside a single transaction. Both referenced records
/// are verified inside the same transaction; a miss rolls back.
pub async fn insert(pool: &SqlitePool, show: &ShowCommand) -> Result<InsertShowOutcome> {
    let mut tx = pool.begin().await?;

    let venue_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM venues WHERE id = ?")
        .bind(show.venue_id)
        .fetch_one(&mut *tx)
        .await?;
    if venue_exists == 0 {
        return Ok(InsertShowOutcome::MissingVenue);
    }

    let artist_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists WHERE id = ?")
        .bind(show.artist_id)
        .fetch_one(&mut *tx)
        .await?;
    if artist_exists == 0 {
        return Ok(InsertShowOutcome::MissingArtist);
    }

    let result = sqlx::query("INSERT INTO shows (venue_id, artist_id, start_time) VALUES (?, ?, ?)")
        .bind(show.venue_id)
        .bind(show.artist_id)
        .bind(format_timestamp(&show.start_time))
        .execute(&mut *tx)
        .await?;

    let id = result.last_insert_rowid();
    tx.commit().await?;

    Ok(InsertShowOutcome::Created(id))
}
