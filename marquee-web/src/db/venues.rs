//! Venue database operations

use anyhow::Result;
use chrono::NaiveDateTime;
use marquee_common::time::format_timestamp;
use sqlx::{Row, SqlitePool};

use super::{decode_genres, encode_genres, like_pattern, NameRef};
use crate::forms::VenueCommand;

/// Venue record
#[derive(Debug, Clone)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

/// Directory entry: a venue with its own upcoming-show count
#[derive(Debug, Clone)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Venues of one distinct (city, state) pair
#[derive(Debug, Clone)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Load the full directory grouped by (city, state).
///
/// The upcoming-show count is a correlated aggregate scoped to each
/// venue, never a shared global count. Groups ascend by (city, state),
/// venues by name within a group, so output order is stable.
pub async fn list_grouped(pool: &SqlitePool, now: &NaiveDateTime) -> Result<Vec<CityGroup>> {
    let rows = sqlx::query(
        r#"
        SELECT v.id, v.name, v.city, v.state,
               (SELECT COUNT(*) FROM shows s
                 WHERE s.venue_id = v.id AND s.start_time > ?) AS num_upcoming_shows
        FROM venues v
        ORDER BY v.city ASC, v.state ASC, v.name ASC
        "#,
    )
    .bind(format_timestamp(now))
    .fetch_all(pool)
    .await?;

    let mut groups: Vec<CityGroup> = Vec::new();
    for row in rows {
        let city: String = row.get("city");
        let state: String = row.get("state");
        let summary = VenueSummary {
            id: row.get("id"),
            name: row.get("name"),
            num_upcoming_shows: row.get("num_upcoming_shows"),
        };

        match groups.last_mut() {
            Some(group) if group.city == city && group.state == state => {
                group.venues.push(summary)
            }
            _ => groups.push(CityGroup {
                city,
                state,
                venues: vec![summary],
            }),
        }
    }

    Ok(groups)
}

/// Case-insensitive partial-name search; empty term matches all
pub async fn search(pool: &SqlitePool, term: &str) -> Result<Vec<NameRef>> {
    let rows = sqlx::query(
        r#"SELECT id, name FROM venues WHERE name LIKE ? ESCAPE '\' ORDER BY name ASC"#,
    )
    .bind(like_pattern(term))
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| NameRef {
            id: row.get("id"),
            name: row.get("name"),
        })
        .collect())
}

/// Load one venue by id
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Venue>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, city, state, address, phone, genres, image_link,
               facebook_link, website_link, seeking_talent, seeking_description
        FROM venues
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Venue {
        id: row.get("id"),
        name: row.get("name"),
        city: row.get("city"),
        state: row.get("state"),
        address: row.get("address"),
        phone: row.get("phone"),
        genres: decode_genres(row.get("genres")),
        image_link: row.get("image_link"),
        facebook_link: row.get("facebook_link"),
        website_link: row.get("website_link"),
        seeking_talent: row.get::<i64, _>("seeking_talent") != 0,
        seeking_description: row.get("seeking_description"),
    }))
}

/// Insert a new venue inside a single transaction, returning its id
pub async fn insert(pool: &SqlitePool, venue: &VenueCommand) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO venues (
            name, city, state, address, phone, genres, image_link,
            facebook_link, website_link, seeking_talent, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(encode_genres(&venue.genres)?)
    .bind(&venue.image_link)
    .bind(&venue.facebook_link)
    .bind(&venue.website_link)
    .bind(venue.seeking_talent as i64)
    .bind(&venue.seeking_description)
    .execute(&mut *tx)
    .await?;

    let id = result.last_insert_rowid();
    tx.commit().await?;

    Ok(id)
}

/// Overwrite every editable field of a venue in one transaction.
/// Returns false when no venue has this id.
pub async fn update(pool: &SqlitePool, id: i64, venue: &VenueCommand) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE venues SET
            name = ?, city = ?, state = ?, address = ?, phone = ?, genres = ?,
            image_link = ?, facebook_link = ?, website_link = ?,
            seeking_talent = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(encode_genres(&venue.genres)?)
    .bind(&venue.image_link)
    .bind(&venue.facebook_link)
    .bind(&venue.website_link)
    .bind(venue.seeking_talent as i64)
    .bind(&venue.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(result.rows_affected() == 1)
}

/// Delete a venue (its shows cascade). Returns false when no venue
/// has this id.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() == 1)
}
