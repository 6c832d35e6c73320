//! Artist database operations

use anyhow::Result;
use sqlx::{Row, SqlitePool};

use super::{decode_genres, encode_genres, like_pattern, NameRef};
use crate::forms::ArtistCommand;

/// Artist record
#[derive(Debug, Clone)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

/// Flat {id, name} index of every artist, ordered by name
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<NameRef>> {
    let rows = sqlx::query("SELECT id, name FROM artists ORDER BY name ASC")
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

/// Case-insensitive partial-name search; empty term matches all
pub async fn search(pool: &SqlitePool, term: &str) -> Result<Vec<NameRef>> {
    let rows = sqlx::query(
        r#"SELECT id, name FROM artists WHERE name LIKE ? ESCAPE '\' ORDER BY name ASC"#,
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

/// Load one artist by id
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Artist>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, city, state, phone, genres, image_link,
               facebook_link, website_link, seeking_venue, seeking_description
        FROM artists
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Artist {
        id: row.get("id"),
        name: row.get("name"),
        city: row.get("city"),
        state: row.get("state"),
        phone: row.get("phone"),
        genres: decode_genres(row.get("genres")),
        image_link: row.get("image_link"),
        facebook_link: row.get("facebook_link"),
        website_link: row.get("website_link"),
        seeking_venue: row.get::<i64, _>("seeking_venue") != 0,
        seeking_description: row.get("seeking_description"),
    }))
}

/// Insert a new artist inside a single transaction, returning its id
pub async fn insert(pool: &SqlitePool, artist: &ArtistCommand) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO artists (
            name, city, state, phone, genres, image_link,
            facebook_link, website_link, seeking_venue, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(encode_genres(&artist.genres)?)
    .bind(&artist.image_link)
    .bind(&artist.facebook_link)
    .bind(&artist.website_link)
    .bind(artist.seeking_venue as i64)
    .bind(&artist.seeking_description)
    .execute(&mut *tx)
    .await?;

    let id = result.last_insert_rowid();
    tx.commit().await?;

    Ok(id)
}

/// Overwrite every editable field of an artist in one transaction.
/// Returns false when no artist has this id.
pub async fn update(pool: &SqlitePool, id: i64, artist: &ArtistCommand) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE artists SET
            name = ?, city = ?, state = ?, phone = ?, genres = ?,
            image_link = ?, facebook_link = ?, website_link = ?,
            seeking_venue = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(encode_genres(&artist.genres)?)
    .bind(&artist.image_link)
    .bind(&artist.facebook_link)
    .bind(&artist.website_link)
    .bind(artist.seeking_venue as i64)
    .bind(&artist.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(result.rows_affected() == 1)
}
