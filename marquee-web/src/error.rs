//! Page error type for marquee-web handlers
//!
//! Missing records render the dedicated 404 page; everything else
//! (database failures, template failures) renders the generic 500 page
//! with no internal detail exposed.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::views::{NotFoundTemplate, ServerErrorTemplate};

/// Handler error type
#[derive(Debug, Error)]
pub enum PageError {
    /// Requested record does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database or other internal failure (500)
    #[error(transparent)]
    Internal(#[from] anyhow::Error),

    /// marquee-common error (500)
    #[error("Common error: {0}")]
    Common(#[from] marquee_common::Error),

    /// Template rendering failure (500)
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound(message) => {
                let page = NotFoundTemplate { message };
                match page.render() {
                    Ok(body) => (StatusCode::NOT_FOUND, Html(body)).into_response(),
                    Err(_) => (StatusCode::NOT_FOUND, "Not Found").into_response(),
                }
            }
            other => {
                error!("Request failed: {}", other);
                match (ServerErrorTemplate {}).render() {
                    Ok(body) => (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response(),
                    Err(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
                    }
                }
            }
        }
    }
}

/// Result type for page handlers
pub type PageResult<T> = Result<T, PageError>;
