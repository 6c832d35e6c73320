//! Venue page handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tracing::{error, info};

use super::{notice_text, NoticeQuery};
use crate::db::venues::Venue;
use crate::error::{PageError, PageResult};
use crate::forms::{SearchForm, VenueForm};
use crate::views::{HomeTemplate, SearchResultsTemplate, VenueDetailTemplate, VenueFormTemplate, VenuesTemplate};
use crate::{db, AppState};

/// GET /venues - directory grouped by (city, state)
pub async fn list_venues(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> PageResult<VenuesTemplate> {
    let now = marquee_common::time::now();
    let areas = db::venues::list_grouped(&state.db, &now).await?;
    Ok(VenuesTemplate {
        areas,
        notice: notice_text(query.notice.as_deref()),
    })
}

/// POST /venues/search - case-insensitive partial-name search
pub async fn search_venues(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> PageResult<SearchResultsTemplate> {
    let results = db::venues::search(&state.db, &form.search_term).await?;
    Ok(SearchResultsTemplate {
        heading: "Venues",
        entity_path: "/venues",
        search_term: form.search_term,
        count: results.len(),
        results,
    })
}

/// GET /venues/:id - detail page with upcoming/past show history
pub async fn show_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<NoticeQuery>,
) -> PageResult<VenueDetailTemplate> {
    let venue = db::venues::get(&state.db, id)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("No venue with id {id}")))?;

    let now = marquee_common::time::now();
    let history = db::shows::history_for_venue(&state.db, id, &now).await?;

    Ok(VenueDetailTemplate {
        venue,
        upcoming: history.upcoming,
        past: history.past,
        notice: notice_text(query.notice.as_deref()),
    })
}

/// GET /venues/create - empty form
pub async fn create_venue_form() -> VenueFormTemplate {
    VenueFormTemplate {
        heading: "List a new venue".to_string(),
        action: "/venues/create".to_string(),
        form: VenueForm::default(),
        errors: Vec::new(),
    }
}

/// POST /venues/create
///
/// Invalid input re-renders the form with field errors (400). A
/// persistence failure rolls back and surfaces a notice on the home
/// page; a partial record is never left behind.
pub async fn create_venue(
    State(state): State<AppState>,
    Form(form): Form<VenueForm>,
) -> PageResult<Response> {
    let command = match form.validate() {
        Ok(command) => command,
        Err(errors) => {
            let page = VenueFormTemplate {
                heading: "List a new venue".to_string(),
                action: "/venues/create".to_string(),
                form,
                errors,
            };
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    let notice = match db::venues::insert(&state.db, &command).await {
        Ok(id) => {
            info!("Created venue {} ({})", id, command.name);
            format!("Venue {} was successfully listed!", command.name)
        }
        Err(e) => {
            error!("Failed to create venue: {e:#}");
            format!("An error occurred. Venue {} could not be listed.", command.name)
        }
    };

    Ok(HomeTemplate { notice: Some(notice) }.into_response())
}

/// GET /venues/:id/edit - form pre-filled from the current record
pub async fn edit_venue_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> PageResult<VenueFormTemplate> {
    let venue = db::venues::get(&state.db, id)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("No venue with id {id}")))?;

    Ok(VenueFormTemplate {
        heading: format!("Edit venue {}", venue.name),
        action: format!("/venues/{id}/edit"),
        form: prefill(&venue),
        errors: Vec::new(),
    })
}

/// POST /venues/:id/edit - full-field overwrite, then redirect to detail
pub async fn update_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<VenueForm>,
) -> PageResult<Response> {
    let command = match form.validate() {
        Ok(command) => command,
        Err(errors) => {
            let page = VenueFormTemplate {
                heading: "Edit venue".to_string(),
                action: format!("/venues/{id}/edit"),
                form,
                errors,
            };
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    match db::venues::update(&state.db, id, &command).await {
        Ok(true) => Ok(Redirect::to(&format!("/venues/{id}?notice=updated")).into_response()),
        Ok(false) => Err(PageError::NotFound(format!("No venue with id {id}"))),
        Err(e) => {
            error!("Failed to update venue {id}: {e:#}");
            Ok(Redirect::to(&format!("/venues/{id}?notice=update-failed")).into_response())
        }
    }
}

/// DELETE /venues/:id - permanent removal (shows cascade)
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> PageResult<Redirect> {
    match db::venues::delete(&state.db, id).await {
        Ok(true) => {
            info!("Deleted venue {id}");
            Ok(Redirect::to("/venues?notice=deleted"))
        }
        Ok(false) => Err(PageError::NotFound(format!("No venue with id {id}"))),
        Err(e) => {
            error!("Failed to delete venue {id}: {e:#}");
            Ok(Redirect::to("/venues?notice=delete-failed"))
        }
    }
}

fn prefill(venue: &Venue) -> VenueForm {
    VenueForm {
        name: venue.name.clone(),
        city: venue.city.clone(),
        state: venue.state.clone(),
        address: venue.address.clone(),
        phone: venue.phone.clone().unwrap_or_default(),
        genres: venue.genres.join(", "),
        image_link: venue.image_link.clone().unwrap_or_default(),
        facebook_link: venue.facebook_link.clone().unwrap_or_default(),
        website_link: venue.website_link.clone().unwrap_or_default(),
        seeking_talent: venue.seeking_talent.then(|| "y".to_string()),
        seeking_description: venue.seeking_description.clone(),
    }
}
