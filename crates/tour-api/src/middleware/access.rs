use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tour_types::{SessionEnvelope, ADMIN_ROLE};
use tracing::{debug, warn};

use crate::state::AppState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Login,
    Unauthorized,
}

/// Which path prefixes need a session, which need the admin role, and where
/// to send visitors who fail either check.
#[derive(Clone, Debug)]
pub struct AccessPolicy {
    pub protected_prefixes: Vec<String>,
    pub admin_prefixes: Vec<String>,
    pub admin_role: String,
    pub login_path: String,
    pub unauthorized_path: String,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            protected_prefixes: vec!["/profile".into()],
            admin_prefixes: vec!["/dashboard".into(), "/admin".into()],
            admin_role: ADMIN_ROLE.into(),
            login_path: "/login".into(),
            unauthorized_path: "/unauthorized".into(),
        }
    }
}

impl AccessPolicy {
    pub fn requires_admin(&self, path: &str) -> bool {
        self.admin_prefixes.iter().any(|p| has_prefix(path, p))
    }

    pub fn is_protected(&self, path: &str) -> bool {
        if path == self.login_path || path == self.unauthorized_path {
            return false;
        }
        self.requires_admin(path) || self.protected_prefixes.iter().any(|p| has_prefix(path, p))
    }

    /// Any lookup failure counts as "no session".
    pub fn decide<E>(&self, path: &str, lookup: &Result<Option<SessionEnvelope>, E>) -> AccessDecision {
        if !self.is_protected(path) {
            return AccessDecision::Allow;
        }

        let envelope = match lookup {
            Ok(Some(envelope)) => envelope,
            Ok(None) | Err(_) => return AccessDecision::Login,
        };

        if self.requires_admin(path) && !envelope.user.has_role(&self.admin_role) {
            return AccessDecision::Unauthorized;
        }

        AccessDecision::Allow
    }
}

/// Segment-aware: `/admin` covers `/admin` and `/admin/users`, not `/administrators`.
fn has_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Middleware for page routes: looks up the session for protected paths and
/// redirects to login or unauthorized. Allowed requests carry the
/// `SessionEnvelope` in their extensions.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if !state.policy.is_protected(&path) {
        return next.run(request).await;
    }

    let cookieHeader = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let lookup = state.auth.get_session(cookieHeader.as_deref()).await;
    if let Err(e) = &lookup {
        warn!("session lookup for {path} failed: {e}");
    }

    match state.policy.decide(&path, &lookup) {
        AccessDecision::Allow => {
            if let Ok(Some(envelope)) = lookup {
                request.extensions_mut().insert(envelope);
            }
            next.run(request).await
        }
        AccessDecision::Login => {
            debug!("no session for {path}, redirecting to login");
            Redirect::to(&state.policy.login_path).into_response()
        }
        AccessDecision::Unauthorized => {
            debug!("insufficient role for {path}");
            Redirect::to(&state.policy.unauthorized_path).into_response()
        }
    }
}
