//! Form payloads and validation
//!
//! Raw form bodies deserialize into loosely typed `*Form` structs (every
//! field a string so a bad submission can be echoed back into the form).
//! `validate()` either produces a fully typed command for the query
//! layer or a set of field errors - never a partially valid command.

use chrono::NaiveDateTime;
use marquee_common::time::parse_timestamp;
use serde::Deserialize;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Search form body (`search_term`), shared by venue and artist search
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Raw venue form submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    /// Comma-separated genre names
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub website_link: String,
    /// Checkbox: present when checked, absent otherwise
    #[serde(default)]
    pub seeking_talent: Option<String>,
    #[serde(default)]
    pub seeking_description: String,
}

/// Fully validated venue command (create and edit both use it;
/// edits overwrite every field)
#[derive(Debug, Clone, PartialEq)]
pub struct VenueCommand {
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

impl VenueForm {
    pub fn validate(&self) -> Result<VenueCommand, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = require("name", &self.name, &mut errors);
        let city = require("city", &self.city, &mut errors);
        let state = validate_state(&self.state, &mut errors);
        let address = require("address", &self.address, &mut errors);
        let phone = validate_phone(&self.phone, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(VenueCommand {
            name,
            city,
            state,
            address,
            phone,
            genres: split_genres(&self.genres),
            image_link: optional(&self.image_link),
            facebook_link: optional(&self.facebook_link),
            website_link: optional(&self.website_link),
            seeking_talent: self.seeking_talent.is_some(),
            seeking_description: self.seeking_description.trim().to_string(),
        })
    }
}

/// Raw artist form submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub phone: String,
    /// Comma-separated genre names
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub website_link: String,
    /// Checkbox: present when checked, absent otherwise
    #[serde(default)]
    pub seeking_venue: Option<String>,
    #[serde(default)]
    pub seeking_description: String,
}

/// Fully validated artist command
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistCommand {
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

impl ArtistForm {
    pub fn validate(&self) -> Result<ArtistCommand, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = require("name", &self.name, &mut errors);
        let city = require("city", &self.city, &mut errors);
        let state = validate_state(&self.state, &mut errors);
        let phone = validate_phone(&self.phone, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ArtistCommand {
            name,
            city,
            state,
            phone,
            genres: split_genres(&self.genres),
            image_link: optional(&self.image_link),
            facebook_link: optional(&self.facebook_link),
            website_link: optional(&self.website_link),
            seeking_venue: self.seeking_venue.is_some(),
            seeking_description: self.seeking_description.trim().to_string(),
        })
    }
}

/// Raw show form submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowForm {
    #[serde(default)]
    pub venue_id: String,
    #[serde(default)]
    pub artist_id: String,
    /// Canonical form: YYYY-MM-DD HH:MM:SS
    #[serde(default)]
    pub start_time: String,
}

/// Fully validated show command
#[derive(Debug, Clone, PartialEq)]
pub struct ShowCommand {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: NaiveDateTime,
}

impl ShowForm {
    pub fn validate(&self) -> Result<ShowCommand, Vec<FieldError>> {
        let mut errors = Vec::new();

        let venue_id = parse_id("venue_id", &self.venue_id, &mut errors);
        let artist_id = parse_id("artist_id", &self.artist_id, &mut errors);
        let start_time = match parse_timestamp(&self.start_time) {
            Ok(ts) => Some(ts),
            Err(e) => {
                errors.push(FieldError::new("start_time", e.to_string()));
                None
            }
        };

        match (venue_id, artist_id, start_time) {
            (Some(venue_id), Some(artist_id), Some(start_time)) => Ok(ShowCommand {
                venue_id,
                artist_id,
                start_time,
            }),
            _ => Err(errors),
        }
    }
}

fn require(field: &'static str, value: &str, errors: &mut Vec<FieldError>) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, format!("{field} is required")));
    }
    trimmed.to_string()
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn validate_state(value: &str, errors: &mut Vec<FieldError>) -> String {
    let trimmed = value.trim();
    if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        trimmed.to_ascii_uppercase()
    } else {
        errors.push(FieldError::new(
            "state",
            "state must be a 2-letter code",
        ));
        trimmed.to_string()
    }
}

fn validate_phone(value: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    let phone = optional(value)?;
    let acceptable = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')'));
    if acceptable {
        Some(phone)
    } else {
        errors.push(FieldError::new(
            "phone",
            "phone may only contain digits, spaces, dashes, and parentheses",
        ));
        None
    }
}

fn parse_id(field: &'static str, value: &str, errors: &mut Vec<FieldError>) -> Option<i64> {
    match value.trim().parse::<i64>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.push(FieldError::new(field, format!("{field} must be a positive integer")));
            None
        }
    }
}

/// Split a comma-separated genre field into a de-duplicated list,
/// dropping empty entries and preserving submission order.
fn split_genres(value: &str) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for genre in value.split(',') {
        let genre = genre.trim();
        if !genre.is_empty() && !genres.iter().any(|g| g == genre) {
            genres.push(genre.to_string());
        }
    }
    genres
}
