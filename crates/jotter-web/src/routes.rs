use std::sync::Arc;

use axum::extract::{FromRef, Path, Request, State};
use axum::http::Uri;
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Extension, Form, Json, Router};
use axum_extra::extract::cookie::Key;
use chrono::Utc;
use jotter_core::{NoteId, NoteInput, NoteService};
use minijinja::{context, Value};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::{AppError, ErrorPage};
use crate::flash::{FlashKind, FlashStore};
use crate::method_override::method_override;
use crate::session::{attach_session, SessionId};
use crate::views::Views;

pub const HOME_TITLE: &str = "Welcome";
const NOTES_PATH: &str = "/notes";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    notes: NoteService,
    views: Arc<Views>,
    flash: FlashStore,
    cookie_key: Key,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, notes: NoteService) -> Result<Self, AppError> {
        Ok(Self {
            cookie_key: Key::derive_from(config.session_secret.as_bytes()),
            views: Arc::new(Views::new()?),
            flash: FlashStore::new(),
            notes,
            config,
        })
    }

    /// Render a page, handing it every flash message pending for the session.
    async fn render(
        &self,
        session: SessionId,
        template: &str,
        data: Value,
    ) -> Result<Html<String>, AppError> {
        let flash = self.flash.consume_all(session).await;
        if !flash.is_empty() {
            tracing::debug!(session = %session, template, "Delivering flash messages");
        }
        let html = self
            .views
            .render(template, context! { flash => flash, ..data })?;
        Ok(Html(html))
    }

    /// Report a failed store write on the next page instead of masking it.
    async fn write_failed(&self, session: SessionId) -> Response {
        self.flash
            .set(session, FlashKind::Error, "Note could not be saved")
            .await;
        Redirect::to(NOTES_PATH).into_response()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// The full application: method override in front of the routed handlers.
pub fn app(state: AppState) -> Router {
    Router::new()
        .fallback_service(app_router(state))
        .layer(middleware::from_fn(method_override))
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/about", get(about))
        .route("/healthz", get(healthz))
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/add", get(add_note_form))
        .route("/notes/edit/{id}", get(edit_note_form))
        .route(
            "/notes/{id}",
            get(show_note)
                .put(update_note)
                .patch(update_note)
                .delete(delete_note),
        )
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            render_error_pages,
        ))
        .layer(middleware::from_fn_with_state(state.clone(), attach_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Give error responses the full page layout, so pending flash messages are
/// delivered there like on any other rendered page.
async fn render_error_pages(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let Some(ErrorPage(template)) = response.extensions().get::<ErrorPage>().copied() else {
        return response;
    };

    let status = response.status();
    match state.render(session, template, context! {}).await {
        Ok(page) => (status, page).into_response(),
        Err(error) => {
            tracing::error!(error = %error, template, "Failed to render error page");
            response
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: i64,
    pending_flash_sessions: usize,
}

async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().timestamp(),
        pending_flash_sessions: state.flash.pending_sessions().await,
    })
}

async fn index(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Html<String>, AppError> {
    state
        .render(session, "index.html", context! { title => HOME_TITLE })
        .await
}

async fn about(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Html<String>, AppError> {
    state.render(session, "about.html", context! {}).await
}

async fn list_notes(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Html<String>, AppError> {
    let notes = state.notes.list_notes().await?;
    state
        .render(session, "notes/list.html", context! { notes })
        .await
}

async fn add_note_form(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Html<String>, AppError> {
    state.render(session, "notes/add.html", context! {}).await
}

async fn show_note(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_note_id(&id)?;
    let note = state
        .notes
        .get_note(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("note {id}")))?;
    state
        .render(session, "notes/show.html", context! { note })
        .await
}

async fn edit_note_form(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_note_id(&id)?;
    let note = state
        .notes
        .get_note(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("note {id}")))?;
    state
        .render(session, "notes/edit.html", context! { note })
        .await
}

async fn create_note(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(input): Form<NoteInput>,
) -> Result<Response, AppError> {
    let errors = input.validate();
    if !errors.is_empty() {
        tracing::debug!(errors = errors.len(), "Rejected new note");
        let page = state
            .render(
                session,
                "notes/add.html",
                context! {
                    errors,
                    title => input.title,
                    details => input.details,
                },
            )
            .await?;
        return Ok(page.into_response());
    }

    let note = match state.notes.create_note(&input).await {
        Ok(note) => note,
        Err(error) => {
            tracing::error!(error = %error, "Failed to create note");
            return Ok(state.write_failed(session).await);
        }
    };
    tracing::info!(note = %note.id, "Created note");
    state
        .flash
        .set(session, FlashKind::Success, "Note created")
        .await;
    Ok(Redirect::to(NOTES_PATH).into_response())
}

async fn update_note(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(id): Path<String>,
    Form(input): Form<NoteInput>,
) -> Result<Response, AppError> {
    let id = parse_note_id(&id)?;

    let errors = input.validate();
    if !errors.is_empty() {
        tracing::debug!(note = %id, errors = errors.len(), "Rejected note update");
        // Echo what was submitted so the user can correct it in place.
        let note = context! {
            id => id.to_string(),
            title => input.title,
            details => input.details,
        };
        let page = state
            .render(session, "notes/edit.html", context! { errors, note })
            .await?;
        return Ok(page.into_response());
    }

    let note = match state.notes.update_note(&id, &input).await {
        Ok(note) => note,
        Err(error) if error.is_not_found() => return Err(error.into()),
        Err(error) => {
            tracing::error!(note = %id, error = %error, "Failed to update note");
            return Ok(state.write_failed(session).await);
        }
    };
    tracing::info!(note = %note.id, "Updated note");
    state
        .flash
        .set(session, FlashKind::Success, "Note updated")
        .await;
    Ok(Redirect::to(NOTES_PATH).into_response())
}

async fn delete_note(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(id): Path<String>,
) -> Redirect {
    let (kind, message) = match id.parse::<NoteId>() {
        Err(_) => (FlashKind::ErrorMsg, "Note not found"),
        Ok(id) => match state.notes.delete_note(&id).await {
            Ok(()) => {
                tracing::info!(note = %id, "Deleted note");
                (FlashKind::Success, "Note deleted")
            }
            Err(error) if error.is_not_found() => {
                tracing::debug!(note = %id, "Delete requested for missing note");
                (FlashKind::ErrorMsg, "Note not found")
            }
            Err(error) => {
                tracing::error!(note = %id, error = %error, "Failed to delete note");
                (FlashKind::Error, "Note could not be deleted")
            }
        },
    };
    state.flash.set(session, kind, message).await;
    Redirect::to(NOTES_PATH)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(uri.path().to_string())
}

fn parse_note_id(raw: &str) -> Result<NoteId, AppError> {
    raw.parse()
        .map_err(|_| AppError::not_found(format!("note {raw}")))
}
