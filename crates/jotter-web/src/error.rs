use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

const NOT_FOUND_TEMPLATE: &str = "errors/404.html";
const INTERNAL_ERROR_TEMPLATE: &str = "errors/500.html";

// Served as-is only when the full error page cannot be rendered.
const NOT_FOUND_FALLBACK: &str = "<!DOCTYPE html><title>Not Found</title><h1>404 - Not Found</h1>";
const INTERNAL_ERROR_FALLBACK: &str =
    "<!DOCTYPE html><title>Error</title><h1>Something went wrong</h1>";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Store error: {0}")]
    Store(#[source] jotter_core::Error),
    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

/// Marks a response as an error page, naming the template that should
/// replace its bare body once the session is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPage(pub &'static str);

impl From<jotter_core::Error> for AppError {
    fn from(error: jotter_core::Error) -> Self {
        match error {
            jotter_core::Error::NotFound(id) => Self::NotFound(format!("note {id}")),
            other => Self::Store(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body, template) = match self {
            Self::NotFound(what) => {
                tracing::debug!(what = %what, "Responding 404");
                (StatusCode::NOT_FOUND, NOT_FOUND_FALLBACK, NOT_FOUND_TEMPLATE)
            }
            Self::Store(_) | Self::Render(_) => {
                tracing::error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_FALLBACK,
                    INTERNAL_ERROR_TEMPLATE,
                )
            }
        };
        let mut response = (status, Html(body)).into_response();
        response.extensions_mut().insert(ErrorPage(template));
        response
    }
}
