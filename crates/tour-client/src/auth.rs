//! Client for the hosted authentication service.
//!
//! The service owns users and sessions. This side only forwards cookies to it
//! and relays the `Set-Cookie` headers it answers with.

use std::time::Duration;

use reqwest::{header, header::HeaderMap, Method, Response};
use serde::Deserialize;
use serde_json::json;
use tour_types::{SessionEnvelope, User};
use tracing::{debug, warn};

use crate::api::with_cookie;
use crate::error::ClientError;

pub const SESSION_PATH: &str = "/api/auth/get-session";
pub const SIGN_IN_PATH: &str = "/api/auth/sign-in/email";
pub const SIGN_OUT_PATH: &str = "/api/auth/sign-out";
pub const PASSWORD_RESET_PATH: &str = "/api/auth/request-password-reset";
pub const RESET_PASSWORD_PATH: &str = "/api/auth/reset-password";

#[derive(Clone, Debug)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
}

/// Result of a successful sign-in: cookies to hand back to the browser.
#[derive(Clone, Debug, Default)]
pub struct SignInOutcome {
    pub set_cookies: Vec<String>,
    pub user: Option<User>,
}

#[derive(Deserialize)]
struct SignInBody {
    #[serde(default)]
    user: Option<User>,
}

impl AuthClient {
    pub fn new(baseUrl: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, baseUrl))
    }

    pub fn with_client(client: reqwest::Client, baseUrl: &str) -> Self {
        Self {
            client,
            base_url: baseUrl.trim_end_matches('/').to_string(),
        }
    }

    /// Looks up the session behind `cookie`. `Ok(None)` means the service
    /// answered but knows no session for it.
    pub async fn get_session(
        &self,
        cookie: Option<&str>,
    ) -> Result<Option<SessionEnvelope>, ClientError> {
        let url = self.url(SESSION_PATH);
        debug!("GET {url}");
        let request = with_cookie(self.client.get(&url), cookie);
        let resp = check_response(request.send().await?).await?;
        Ok(resp.json::<Option<SessionEnvelope>>().await?)
    }

    pub async fn sign_in_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignInOutcome, ClientError> {
        let url = self.url(SIGN_IN_PATH);
        debug!("POST {url}");
        let resp = self
            .client
            .post(&url)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let set_cookies = set_cookie_values(resp.headers());
        let body: SignInBody = resp.json().await.unwrap_or_else(|e| {
            warn!("sign-in response body not understood: {e}");
            SignInBody { user: None }
        });
        Ok(SignInOutcome {
            set_cookies,
            user: body.user,
        })
    }

    /// Ends the session and returns the cookie-clearing headers to relay.
    pub async fn sign_out(&self, cookie: Option<&str>) -> Result<Vec<String>, ClientError> {
        let url = self.url(SIGN_OUT_PATH);
        debug!("POST {url}");
        let request = with_cookie(self.client.post(&url), cookie).json(&json!({}));
        let resp = check_response(request.send().await?).await?;
        Ok(set_cookie_values(resp.headers()))
    }

    pub async fn request_password_reset(
        &self,
        email: &str,
        redirectTo: &str,
    ) -> Result<(), ClientError> {
        let url = self.url(PASSWORD_RESET_PATH);
        debug!("POST {url}");
        let resp = self
            .client
            .post(&url)
            .json(&json!({ "email": email, "redirectTo": redirectTo }))
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    /// Completes a reset started by `request_password_reset`, using the token
    /// from the emailed link.
    pub async fn reset_password(&self, token: &str, newPassword: &str) -> Result<(), ClientError> {
        let url = self.url(RESET_PASSWORD_PATH);
        debug!("POST {url}");
        let resp = self
            .client
            .post(&url)
            .json(&json!({ "token": token, "newPassword": newPassword }))
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    /// Sends a request to the auth service unchanged and hands back the raw
    /// response, whatever its status.
    pub async fn relay(
        &self,
        method: Method,
        pathAndQuery: &str,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Result<Response, ClientError> {
        let url = self.url(pathAndQuery);
        debug!("relay {method} {url}");
        let resp = self
            .client
            .request(method, &url)
            .headers(headers)
            .body(body)
            .send()
            .await?;
        Ok(resp)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn set_cookie_values(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

async fn check_response(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_else(|e| {
        warn!("failed to read auth error body: {e}");
        String::new()
    });
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client(url: &str) -> AuthClient {
        AuthClient::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn get_session_forwards_cookie() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", SESSION_PATH)
            .match_header("cookie", "better-auth.session_token=abc")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"session":{"id":"s1","userId":"u1"},"user":{"id":"u1","email":"ana@example.com","role":"Admin"}}"#,
            )
            .create_async()
            .await;

        let envelope = client(&server.url())
            .get_session(Some("better-auth.session_token=abc"))
            .await
            .unwrap()
            .unwrap();
        assert!(envelope.user.is_admin());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn null_body_means_no_session() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", SESSION_PATH)
            .with_status(200)
            .with_body("null")
            .create_async()
            .await;

        let session = client(&server.url()).get_session(None).await.unwrap();
        assert!(session.is_none());
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", SESSION_PATH)
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let err = client(&server.url()).get_session(Some("x=1")).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn garbage_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", SESSION_PATH)
            .with_status(200)
            .with_body("<html>login</html>")
            .create_async()
            .await;

        assert!(client(&server.url()).get_session(Some("x=1")).await.is_err());
    }

    #[tokio::test]
    async fn sign_in_collects_set_cookie_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", SIGN_IN_PATH)
            .match_body(Matcher::Json(serde_json::json!({
                "email": "ana@example.com",
                "password": "hunter2"
            })))
            .with_status(200)
            .with_header("set-cookie", "session_token=abc; Path=/; HttpOnly")
            .with_header("set-cookie", "session_data=xyz; Path=/")
            .with_body(r#"{"user":{"id":"u1","email":"ana@example.com"}}"#)
            .create_async()
            .await;

        let outcome = client(&server.url())
            .sign_in_email("ana@example.com", "hunter2")
            .await
            .unwrap();
        assert_eq!(outcome.set_cookies.len(), 2);
        assert_eq!(outcome.user.map(|u| u.id).as_deref(), Some("u1"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_credentials_surface_401() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", SIGN_IN_PATH)
            .with_status(401)
            .with_body(r#"{"message":"Invalid email or password"}"#)
            .create_async()
            .await;

        let err = client(&server.url())
            .sign_in_email("ana@example.com", "wrong")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn password_reset_posts_email_and_redirect() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PASSWORD_RESET_PATH)
            .match_body(Matcher::PartialJson(serde_json::json!({
                "email": "ana@example.com",
                "redirectTo": "/reset-password"
            })))
            .with_status(200)
            .with_body(r#"{"status":true}"#)
            .create_async()
            .await;

        client(&format!("{}/", server.url()))
            .request_password_reset("ana@example.com", "/reset-password")
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn reset_password_rejects_expired_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", RESET_PASSWORD_PATH)
            .match_body(Matcher::Json(serde_json::json!({
                "token": "expired",
                "newPassword": "correct horse"
            })))
            .with_status(400)
            .with_body(r#"{"code":"INVALID_TOKEN"}"#)
            .create_async()
            .await;

        let err = client(&server.url())
            .reset_password("expired", "correct horse")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn relay_returns_non_success_responses() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/auth/sign-up/email")
            .with_status(422)
            .with_body("taken")
            .create_async()
            .await;

        let resp = client(&server.url())
            .relay(
                Method::POST,
                "/api/auth/sign-up/email",
                HeaderMap::new(),
                b"{}".to_vec(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 422);
    }
}
