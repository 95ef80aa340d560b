use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{header, HeaderMap, HeaderName, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tracing::warn;

use super::error_response;
use crate::state::AppState;

const MAX_BODY_BYTES: usize = 64 * 1024;

const FORWARDED_REQUEST_HEADERS: [HeaderName; 7] = [
    header::COOKIE,
    header::CONTENT_TYPE,
    header::ACCEPT,
    header::ORIGIN,
    header::REFERER,
    header::USER_AGENT,
    header::AUTHORIZATION,
];

const RELAYED_RESPONSE_HEADERS: [HeaderName; 4] = [
    header::SET_COOKIE,
    header::CONTENT_TYPE,
    header::LOCATION,
    header::CACHE_CONTROL,
];

/// `/api/auth/*` is served by the auth service; the site only relays it.
pub fn routes(_state: AppState) -> Router<AppState> {
    Router::new().route("/api/auth/*rest", any(proxy_auth))
}

async fn proxy_auth(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let pathAndQuery = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string());

    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(b) => b,
        Err(e) => {
            warn!("rejecting auth request body for {pathAndQuery}: {e}");
            return error_response(StatusCode::PAYLOAD_TOO_LARGE, "request body too large")
                .into_response();
        }
    };

    let headers = copy_headers(&parts.headers, &FORWARDED_REQUEST_HEADERS);
    match state
        .auth
        .relay(parts.method, &pathAndQuery, headers, bytes.to_vec())
        .await
    {
        Ok(upstream) => relay_response(upstream).await,
        Err(e) => {
            warn!("auth service unreachable for {pathAndQuery}: {e}");
            error_response(StatusCode::BAD_GATEWAY, "auth service unavailable").into_response()
        }
    }
}

async fn relay_response(upstream: tour_client::reqwest::Response) -> Response {
    let status = upstream.status();
    let headers = copy_headers(upstream.headers(), &RELAYED_RESPONSE_HEADERS);
    match upstream.bytes().await {
        Ok(body) => (status, headers, body).into_response(),
        Err(e) => {
            warn!("failed to read auth service response: {e}");
            error_response(StatusCode::BAD_GATEWAY, "auth service unavailable").into_response()
        }
    }
}

fn copy_headers(source: &HeaderMap, names: &[HeaderName]) -> HeaderMap {
    let mut copied = HeaderMap::new();
    for name in names {
        for value in source.get_all(name) {
            copied.append(name.clone(), value.clone());
        }
    }
    copied
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use axum::{body::Body, http::Request};
    use mockito::Matcher;
    use tour_client::{ApiClient, AuthClient};
    use tower::ServiceExt;

    use super::*;
    use crate::middleware::access::AccessPolicy;

    fn app(url: &str) -> Router {
        let state = AppState {
            api: ApiClient::new(url, Duration::from_secs(5)).unwrap(),
            auth: AuthClient::new(url, Duration::from_secs(5)).unwrap(),
            policy: Arc::new(AccessPolicy::default()),
        };
        crate::api_router(state)
    }

    #[tokio::test]
    async fn relays_sign_in_with_cookies_both_ways() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/auth/sign-in/email")
            .match_query(Matcher::UrlEncoded("callbackURL".into(), "/profile".into()))
            .match_header("content-type", "application/json")
            .match_header("cookie", "theme=dark")
            .match_body(r#"{"email":"ana@example.com","password":"pw"}"#)
            .with_status(200)
            .with_header("set-cookie", "session_token=abc; HttpOnly; Path=/")
            .with_header("x-internal", "hidden")
            .with_body(r#"{"redirect":false}"#)
            .create_async()
            .await;

        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/sign-in/email?callbackURL=%2Fprofile")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, "theme=dark")
            .body(Body::from(r#"{"email":"ana@example.com","password":"pw"}"#))
            .unwrap();
        let resp = app(&server.url()).oneshot(request).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::SET_COOKIE).unwrap(),
            "session_token=abc; HttpOnly; Path=/"
        );
        assert!(resp.headers().get("x-internal").is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn passes_upstream_errors_through() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/auth/get-session")
            .with_status(401)
            .with_body("nope")
            .create_async()
            .await;

        let request = Request::builder()
            .uri("/api/auth/get-session")
            .body(Body::empty())
            .unwrap();
        let resp = app(&server.url()).oneshot(request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"nope");
    }

    #[tokio::test]
    async fn unreachable_auth_service_is_bad_gateway() {
        let request = Request::builder()
            .uri("/api/auth/get-session")
            .body(Body::empty())
            .unwrap();
        let resp = app("http://127.0.0.1:1").oneshot(request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn copy_headers_keeps_repeated_values() {
        let mut source = HeaderMap::new();
        source.append(header::SET_COOKIE, "a=1".parse().unwrap());
        source.append(header::SET_COOKIE, "b=2".parse().unwrap());
        source.insert(header::SERVER, "upstream".parse().unwrap());

        let copied = copy_headers(&source, &RELAYED_RESPONSE_HEADERS);
        assert_eq!(copied.get_all(header::SET_COOKIE).iter().count(), 2);
        assert!(copied.get(header::SERVER).is_none());
    }
}
