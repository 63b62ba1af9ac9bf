use std::fmt;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "jotter.sid";

/// Identifies one browser session; the key for pending flash messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(Self)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolve the caller's session from its signed cookie, starting a new one
/// when the cookie is missing or fails verification, and expose it to
/// handlers as a request extension.
pub async fn attach_session(
    jar: SignedCookieJar,
    mut request: Request,
    next: Next,
) -> (SignedCookieJar, Response) {
    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| SessionId::parse(cookie.value()));

    let (session, jar) = match existing {
        Some(session) => (session, jar),
        None => {
            let session = SessionId::new();
            tracing::debug!(session = %session, "Started new session");
            (session, jar.add(session_cookie(session)))
        }
    };

    request.extensions_mut().insert(session);
    let response = next.run(request).await;
    (jar, response)
}

fn session_cookie(session: SessionId) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
