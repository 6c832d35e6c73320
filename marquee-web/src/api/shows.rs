//! Show page handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use tracing::{error, info};

use crate::db::shows::InsertShowOutcome;
use crate::error::PageResult;
use crate::forms::{FieldError, ShowForm};
use crate::views::{HomeTemplate, ShowFormTemplate, ShowsTemplate};
use crate::{db, AppState};

/// GET /shows - every show with its venue and artist
pub async fn list_shows(State(state): State<AppState>) -> PageResult<ShowsTemplate> {
    let shows = db::shows::list_all(&state.db).await?;
    Ok(ShowsTemplate { shows })
}

/// GET /shows/create - empty form
pub async fn create_show_form() -> ShowFormTemplate {
    ShowFormTemplate {
        form: ShowForm::default(),
        errors: Vec::new(),
    }
}

/// POST /shows/create
///
/// A reference to a missing venue or artist is a form error, not a
/// server fault; the insert transaction rolls back and the form is
/// re-rendered.
pub async fn create_show(
    State(state): State<AppState>,
    Form(form): Form<ShowForm>,
) -> PageResult<Response> {
    let command = match form.validate() {
        Ok(command) => command,
        Err(errors) => {
            return Ok((StatusCode::BAD_REQUEST, ShowFormTemplate { form, errors }).into_response());
        }
    };

    match db::shows::insert(&state.db, &command).await {
        Ok(InsertShowOutcome::Created(id)) => {
            info!("Created show {id}");
            Ok(HomeTemplate {
                notice: Some("Show was successfully listed!".to_string()),
            }
            .into_response())
        }
        Ok(InsertShowOutcome::MissingVenue) => {
            let errors = vec![FieldError::new(
                "venue_id",
                format!("no venue with id {}", command.venue_id),
            )];
            Ok((StatusCode::BAD_REQUEST, ShowFormTemplate { form, errors }).into_response())
        }
        Ok(InsertShowOutcome::MissingArtist) => {
            let errors = vec![FieldError::new(
                "artist_id",
                format!("no artist with id {}", command.artist_id),
            )];
            Ok((StatusCode::BAD_REQUEST, ShowFormTemplate { form, errors }).into_response())
        }
        Err(e) => {
            error!("Failed to create show: {e:#}");
            Ok(HomeTemplate {
                notice: Some("An error occurred. Show could not be listed.".to_string()),
            }
            .into_response())
        }
    }
}
