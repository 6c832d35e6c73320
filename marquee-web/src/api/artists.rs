//! Artist page handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tracing::{error, info};

use super::{notice_text, NoticeQuery};
use crate::db::artists::Artist;
use crate::error::{PageError, PageResult};
use crate::forms::{ArtistForm, SearchForm};
use crate::views::{ArtistDetailTemplate, ArtistFormTemplate, ArtistsTemplate, HomeTemplate, SearchResultsTemplate};
use crate::{db, AppState};

/// GET /artists - flat index ordered by name
pub async fn list_artists(State(state): State<AppState>) -> PageResult<ArtistsTemplate> {
    let artists = db::artists::list_all(&state.db).await?;
    Ok(ArtistsTemplate { artists })
}

/// POST /artists/search - case-insensitive partial-name search
pub async fn search_artists(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> PageResult<SearchResultsTemplate> {
    let results = db::artists::search(&state.db, &form.search_term).await?;
    Ok(SearchResultsTemplate {
        heading: "Artists",
        entity_path: "/artists",
        search_term: form.search_term,
        count: results.len(),
        results,
    })
}

/// GET /artists/:id - detail page with upcoming/past show history
pub async fn show_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<NoticeQuery>,
) -> PageResult<ArtistDetailTemplate> {
    let artist = db::artists::get(&state.db, id)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("No artist with id {id}")))?;

    let now = marquee_common::time::now();
    let history = db::shows::history_for_artist(&state.db, id, &now).await?;

    Ok(ArtistDetailTemplate {
        artist,
        upcoming: history.upcoming,
        past: history.past,
        notice: notice_text(query.notice.as_deref()),
    })
}

/// GET /artists/create - empty form
pub async fn create_artist_form() -> ArtistFormTemplate {
    ArtistFormTemplate {
        heading: "List a new artist".to_string(),
        action: "/artists/create".to_string(),
        form: ArtistForm::default(),
        errors: Vec::new(),
    }
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<AppState>,
    Form(form): Form<ArtistForm>,
) -> PageResult<Response> {
    let command = match form.validate() {
        Ok(command) => command,
        Err(errors) => {
            let page = ArtistFormTemplate {
                heading: "List a new artist".to_string(),
                action: "/artists/create".to_string(),
                form,
                errors,
            };
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    let notice = match db::artists::insert(&state.db, &command).await {
        Ok(id) => {
            info!("Created artist {} ({})", id, command.name);
            format!("Artist {} was successfully listed!", command.name)
        }
        Err(e) => {
            error!("Failed to create artist: {e:#}");
            format!("An error occurred. Artist {} could not be listed.", command.name)
        }
    };

    Ok(HomeTemplate { notice: Some(notice) }.into_response())
}

/// GET /artists/:id/edit - form pre-filled from the current record
pub async fn edit_artist_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> PageResult<ArtistFormTemplate> {
    let artist = db::artists::get(&state.db, id)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("No artist with id {id}")))?;

    Ok(ArtistFormTemplate {
        heading: format!("Edit artist {}", artist.name),
        action: format!("/artists/{id}/edit"),
        form: prefill(&artist),
        errors: Vec::new(),
    })
}

/// POST /artists/:id/edit - full-field overwrite, then redirect to detail
pub async fn update_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ArtistForm>,
) -> PageResult<Response> {
    let command = match form.validate() {
        Ok(command) => command,
        Err(errors) => {
            let page = ArtistFormTemplate {
                heading: "Edit artist".to_string(),
                action: format!("/artists/{id}/edit"),
                form,
                errors,
            };
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    match db::artists::update(&state.db, id, &command).await {
        Ok(true) => Ok(Redirect::to(&format!("/artists/{id}?notice=updated")).into_response()),
        Ok(false) => Err(PageError::NotFound(format!("No artist with id {id}"))),
        Err(e) => {
            error!("Failed to update artist {id}: {e:#}");
            Ok(Redirect::to(&format!("/artists/{id}?notice=update-failed")).into_response())
        }
    }
}

fn prefill(artist: &Artist) -> ArtistForm {
    ArtistForm {
        name: artist.name.clone(),
        city: artist.city.clone(),
        state: artist.state.clone(),
        phone: artist.phone.clone().unwrap_or_default(),
        genres: artist.genres.join(", "),
        image_link: artist.image_link.clone().unwrap_or_default(),
        facebook_link: artist.facebook_link.clone().unwrap_or_default(),
        website_link: artist.website_link.clone().unwrap_or_default(),
        seeking_venue: artist.seeking_venue.then(|| "y".to_string()),
        seeking_description: artist.seeking_description.clone(),
    }
}
