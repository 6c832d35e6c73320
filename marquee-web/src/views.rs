//! Page templates
//!
//! One askama template struct per rendered page. Markup lives in
//! `templates/`; these structs are the full data contract between
//! handlers and the HTML.

use askama::Template;

use crate::db::artists::Artist;
use crate::db::shows::{ShowEntry, ShowListing};
use crate::db::venues::{CityGroup, Venue};
use crate::db::NameRef;
use crate::forms::{ArtistForm, FieldError, ShowForm, VenueForm};

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub notice: Option<String>,
}

/// Directory of venues grouped by (city, state)
#[derive(Template)]
#[template(path = "venues.html")]
pub struct VenuesTemplate {
    pub areas: Vec<CityGroup>,
    pub notice: Option<String>,
}

/// Search results page, shared by venue and artist search
#[derive(Template)]
#[template(path = "search_results.html")]
pub struct SearchResultsTemplate {
    pub heading: &'static str,
    /// Base path detail links hang off ("/venues" or "/artists")
    pub entity_path: &'static str,
    pub search_term: String,
    pub count: usize,
    pub results: Vec<NameRef>,
}

#[derive(Template)]
#[template(path = "venue_detail.html")]
pub struct VenueDetailTemplate {
    pub venue: Venue,
    pub upcoming: Vec<ShowEntry>,
    pub past: Vec<ShowEntry>,
    pub notice: Option<String>,
}

#[derive(Template)]
#[template(path = "venue_form.html")]
pub struct VenueFormTemplate {
    pub heading: String,
    /// Submit URL (create or edit)
    pub action: String,
    pub form: VenueForm,
    pub errors: Vec<FieldError>,
}

#[derive(Template)]
#[template(path = "artists.html")]
pub struct ArtistsTemplate {
    pub artists: Vec<NameRef>,
}

#[derive(Template)]
#[template(path = "artist_detail.html")]
pub struct ArtistDetailTemplate {
    pub artist: Artist,
    pub upcoming: Vec<ShowEntry>,
    pub past: Vec<ShowEntry>,
    pub notice: Option<String>,
}

#[derive(Template)]
#[template(path = "artist_form.html")]
pub struct ArtistFormTemplate {
    pub heading: String,
    pub action: String,
    pub form: ArtistForm,
    pub errors: Vec<FieldError>,
}

#[derive(Template)]
#[template(path = "shows.html")]
pub struct ShowsTemplate {
    pub shows: Vec<ShowListing>,
}

#[derive(Template)]
#[template(path = "show_form.html")]
pub struct ShowFormTemplate {
    pub form: ShowForm,
    pub errors: Vec<FieldError>,
}

#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub message: String,
}

#[derive(Template)]
#[template(path = "500.html")]
pub struct ServerErrorTemplate {}
