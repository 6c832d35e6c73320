//! HTTP handlers for marquee-web

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

pub use artists::{
    create_artist, create_artist_form, edit_artist_form, list_artists, search_artists,
    show_artist, update_artist,
};
pub use health::health_routes;
pub use home::home;
pub use shows::{create_show, create_show_form, list_shows};
pub use venues::{
    create_venue, create_venue_form, delete_venue, edit_venue_form, list_venues, search_venues,
    show_venue, update_venue,
};

use serde::Deserialize;

/// Optional `?notice=<code>` carried across redirects after a mutation
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

/// Map a redirect notice code to its user-facing message. Unknown
/// codes display nothing, so the query string can't inject text.
pub(crate) fn notice_text(code: Option<&str>) -> Option<String> {
    let message = match code? {
        "updated" => "Changes were saved successfully!",
        "update-failed" => "An error occurred. Changes could not be saved.",
        "deleted" => "Venue was successfully deleted!",
        "delete-failed" => "An error occurred. Venue could not be deleted.",
        _ => return None,
    };
    Some(message.to_string())
}
