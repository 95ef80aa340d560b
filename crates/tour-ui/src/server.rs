//! Server-side plumbing shared by the server functions.

use http::{
    header::{COOKIE, SET_COOKIE},
    request::Parts,
    HeaderValue,
};
use leptos::prelude::*;
use leptos_axum::ResponseOptions;
use tour_client::{ApiClient, AuthClient, ClientError};
use tour_types::SessionEnvelope;

/// Backend clients handed to every server function through context.
#[derive(Clone, Debug)]
pub struct SiteBackend {
    pub api: ApiClient,
    pub auth: AuthClient,
    pub admin_role: String,
}

pub fn backend() -> Result<SiteBackend, ServerFnError> {
    use_context::<SiteBackend>().ok_or_else(|| ServerFnError::new("backend context unavailable"))
}

/// The visitor's raw `Cookie` header, forwarded to the backends as is.
pub fn request_cookie() -> Option<String> {
    use_context::<Parts>().as_ref().and_then(cookie_header)
}

fn cookie_header(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub fn client_error(e: ClientError) -> ServerFnError {
    if e.is_not_found() {
        return ServerFnError::new("Not found");
    }
    tracing::warn!("backend call failed: {e}");
    ServerFnError::new(e.to_string())
}

/// Session for the current request. Gated page renders reuse the envelope the
/// access gate attached; direct server function calls ask the auth service.
pub async fn current_session(backend: &SiteBackend) -> Result<Option<SessionEnvelope>, ServerFnError> {
    session_for(backend, use_context::<Parts>().as_ref()).await
}

pub async fn session_for(
    backend: &SiteBackend,
    parts: Option<&Parts>,
) -> Result<Option<SessionEnvelope>, ServerFnError> {
    if let Some(envelope) = parts.and_then(|p| p.extensions.get::<SessionEnvelope>()) {
        return Ok(Some(envelope.clone()));
    }
    let cookie = parts.and_then(cookie_header);
    backend.auth.get_session(cookie.as_deref()).await.map_err(client_error)
}

/// Server function URLs sit outside the gated page prefixes, so admin
/// mutations check the role again here.
pub async fn require_admin() -> Result<(SiteBackend, Option<String>), ServerFnError> {
    let backend = backend()?;
    let parts = use_context::<Parts>();
    let envelope = session_for(&backend, parts.as_ref()).await?;
    check_admin(&backend, envelope)?;
    Ok((backend, parts.as_ref().and_then(cookie_header)))
}

fn check_admin(backend: &SiteBackend, envelope: Option<SessionEnvelope>) -> Result<(), ServerFnError> {
    match envelope {
        None => Err(ServerFnError::new("sign in required")),
        Some(envelope) if !envelope.user.has_role(&backend.admin_role) => {
            tracing::warn!("user {} attempted an admin action", envelope.user.id);
            Err(ServerFnError::new("admin role required"))
        }
        Some(_) => Ok(()),
    }
}

pub fn relay_cookies(values: &[String]) -> Result<(), ServerFnError> {
    let responseOptions = use_context::<ResponseOptions>()
        .ok_or_else(|| ServerFnError::new("response context unavailable"))?;
    for value in values {
        let header = HeaderValue::from_str(value)
            .map_err(|e| ServerFnError::new(format!("cookie error: {e}")))?;
        responseOptions.append_header(SET_COOKIE, header);
    }
    Ok(())
}
