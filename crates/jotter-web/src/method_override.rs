use std::collections::HashMap;

use axum::extract::{Query, Request};
use axum::http::{Method, Uri};
use axum::middleware::Next;
use axum::response::Response;

/// Query parameter HTML forms use to ask for a verb they cannot send.
pub const METHOD_PARAM: &str = "_method";

/// Rewrite `POST ...?_method=PUT|PATCH|DELETE` to the requested verb.
///
/// Must run before routing, so it wraps the whole router rather than
/// individual routes.
pub async fn method_override(mut request: Request, next: Next) -> Response {
    if request.method() == Method::POST {
        if let Some(method) = override_target(request.uri()) {
            tracing::trace!(method = %method, uri = %request.uri(), "Applying method override");
            *request.method_mut() = method;
        }
    }
    next.run(request).await
}

fn override_target(uri: &Uri) -> Option<Method> {
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri).ok()?;
    let requested = params.get(METHOD_PARAM)?;
    match requested.trim().to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(uri: &str) -> Option<Method> {
        override_target(&uri.parse::<Uri>().unwrap())
    }

    #[test]
    fn recognises_supported_verbs() {
        assert_eq!(target("/notes/1?_method=PUT"), Some(Method::PUT));
        assert_eq!(target("/notes/1?_method=delete"), Some(Method::DELETE));
        assert_eq!(target("/notes/1?x=1&_method=Patch"), Some(Method::PATCH));
    }

    #[test]
    fn ignores_missing_or_unsupported_verbs() {
        assert_eq!(target("/notes/1"), None);
        assert_eq!(target("/notes/1?_method=GET"), None);
        assert_eq!(target("/notes/1?_method=CONNECT"), None);
        assert_eq!(target("/notes/1?method=PUT"), None);
    }
}
