//! REST backend client for tours, articles, banners and bookings.
//!
//! Reads are anonymous. Mutations forward the visitor's `Cookie` header so the
//! backend can authorize them against the same session the site saw.

use std::time::Duration;

use reqwest::{header, Method, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use tour_types::{
    Article, ArticleDraft, Banner, BannerDraft, BookingConfirmation, BookingRequest, Tour,
    TourDraft,
};
use tracing::{debug, warn};

use crate::error::ClientError;

#[derive(Clone, Copy, Debug)]
enum Collection {
    Tours,
    Articles,
    Banners,
    Bookings,
}

impl Collection {
    fn path(self) -> &'static str {
        match self {
            Self::Tours => "tours",
            Self::Articles => "articles",
            Self::Banners => "banners",
            Self::Bookings => "bookings",
        }
    }

    fn resource(self) -> &'static str {
        match self {
            Self::Tours => "tour",
            Self::Articles => "article",
            Self::Banners => "banner",
            Self::Bookings => "booking",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(baseUrl: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(client, baseUrl)
    }

    pub fn with_client(client: reqwest::Client, baseUrl: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(baseUrl).map_err(|e| ClientError::InvalidUrl(format!("{baseUrl}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(baseUrl.to_string()));
        }
        Ok(Self { client, base_url })
    }

    // Tours

    pub async fn list_tours(&self) -> Result<Vec<Tour>, ClientError> {
        self.list(Collection::Tours).await
    }

    pub async fn get_tour(&self, id: &str) -> Result<Tour, ClientError> {
        self.get(Collection::Tours, id).await
    }

    pub async fn create_tour(
        &self,
        draft: &TourDraft,
        cookie: Option<&str>,
    ) -> Result<Tour, ClientError> {
        self.create(Collection::Tours, draft, cookie).await
    }

    pub async fn update_tour(
        &self,
        id: &str,
        draft: &TourDraft,
        cookie: Option<&str>,
    ) -> Result<Tour, ClientError> {
        self.update(Collection::Tours, id, draft, cookie).await
    }

    pub async fn delete_tour(&self, id: &str, cookie: Option<&str>) -> Result<(), ClientError> {
        self.remove(Collection::Tours, id, cookie).await
    }

    // Articles

    pub async fn list_articles(&self) -> Result<Vec<Article>, ClientError> {
        self.list(Collection::Articles).await
    }

    pub async fn get_article(&self, id: &str) -> Result<Article, ClientError> {
        self.get(Collection::Articles, id).await
    }

    pub async fn create_article(
        &self,
        draft: &ArticleDraft,
        cookie: Option<&str>,
    ) -> Result<Article, ClientError> {
        self.create(Collection::Articles, draft, cookie).await
    }

    pub async fn update_article(
        &self,
        id: &str,
        draft: &ArticleDraft,
        cookie: Option<&str>,
    ) -> Result<Article, ClientError> {
        self.update(Collection::Articles, id, draft, cookie).await
    }

    pub async fn delete_article(&self, id: &str, cookie: Option<&str>) -> Result<(), ClientError> {
        self.remove(Collection::Articles, id, cookie).await
    }

    // Banners

    pub async fn list_banners(&self) -> Result<Vec<Banner>, ClientError> {
        self.list(Collection::Banners).await
    }

    pub async fn get_banner(&self, id: &str) -> Result<Banner, ClientError> {
        self.get(Collection::Banners, id).await
    }

    pub async fn create_banner(
        &self,
        draft: &BannerDraft,
        cookie: Option<&str>,
    ) -> Result<Banner, ClientError> {
        self.create(Collection::Banners, draft, cookie).await
    }

    pub async fn update_banner(
        &self,
        id: &str,
        draft: &BannerDraft,
        cookie: Option<&str>,
    ) -> Result<Banner, ClientError> {
        self.update(Collection::Banners, id, draft, cookie).await
    }

    pub async fn delete_banner(&self, id: &str, cookie: Option<&str>) -> Result<(), ClientError> {
        self.remove(Collection::Banners, id, cookie).await
    }

    // Bookings

    pub async fn submit_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, ClientError> {
        self.create(Collection::Bookings, request, None).await
    }

    async fn list<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, ClientError> {
        let url = self.endpoint(collection, None)?;
        debug!("GET {url}");
        let resp = self.client.get(url).send().await?;
        let resp = check_response(resp, collection, "").await?;
        Ok(resp.json().await?)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(collection, Some(id))?;
        debug!("GET {url}");
        let resp = self.client.get(url).send().await?;
        let resp = check_response(resp, collection, id).await?;
        Ok(resp.json().await?)
    }

    async fn create<B: Serialize, T: DeserializeOwned>(
        &self,
        collection: Collection,
        body: &B,
        cookie: Option<&str>,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(collection, None)?;
        debug!("POST {url}");
        let request = with_cookie(self.client.request(Method::POST, url), cookie).json(body);
        let resp = check_response(request.send().await?, collection, "").await?;
        Ok(resp.json().await?)
    }

    async fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
        body: &B,
        cookie: Option<&str>,
    ) -> Result<T, ClientError> {
        let url = self.endpoint(collection, Some(id))?;
        debug!("PUT {url}");
        let request = with_cookie(self.client.request(Method::PUT, url), cookie).json(body);
        let resp = check_response(request.send().await?, collection, id).await?;
        Ok(resp.json().await?)
    }

    async fn remove(
        &self,
        collection: Collection,
        id: &str,
        cookie: Option<&str>,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(collection, Some(id))?;
        debug!("DELETE {url}");
        let request = with_cookie(self.client.request(Method::DELETE, url), cookie);
        check_response(request.send().await?, collection, id).await?;
        Ok(())
    }

    /// `{base}/{collection}[/{id}]`, with the id percent-encoded as one segment.
    fn endpoint(&self, collection: Collection, id: Option<&str>) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push(collection.path());
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }
}

pub(crate) fn with_cookie(request: RequestBuilder, cookie: Option<&str>) -> RequestBuilder {
    match cookie {
        Some(c) if !c.is_empty() => request.header(header::COOKIE, c),
        _ => request,
    }
}

async fn check_response(
    resp: Response,
    collection: Collection,
    id: &str,
) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound {
            resource: collection.resource(),
            id: id.to_string(),
        });
    }

    let body = resp.text().await.unwrap_or_else(|e| {
        warn!("failed to read error body: {e}");
        String::new()
    });
    warn!("{} request failed with {status}", collection.path());
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client(url: &str) -> ApiClient {
        ApiClient::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn list_tours_decodes_array() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tours")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":"t1","title":"Highlands Trek","price":1200},{"id":"t2","title":"Coast Walk"}]"#)
            .create_async()
            .await;

        let tours = client(&server.url()).list_tours().await.unwrap();
        assert_eq!(tours.len(), 2);
        assert_eq!(tours[0].price, 1200.0);
        assert_eq!(tours[1].title, "Coast Walk");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn base_path_prefix_is_kept() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/articles/a%2F1")
            .with_status(200)
            .with_body(r#"{"id":"a/1","title":"Odd id"}"#)
            .create_async()
            .await;

        let article = client(&format!("{}/v1/", server.url()))
            .get_article("a/1")
            .await
            .unwrap();
        assert_eq!(article.id, "a/1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_tour_maps_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/tours/nope")
            .with_status(404)
            .create_async()
            .await;

        let err = client(&server.url()).get_tour("nope").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "tour not found: nope");
    }

    #[tokio::test]
    async fn create_forwards_cookie_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/banners")
            .match_header("cookie", "session=abc")
            .match_body(Matcher::PartialJson(json!({
                "title": "Summer sale",
                "imageUrl": "/img/summer.jpg",
                "active": true
            })))
            .with_status(201)
            .with_body(r#"{"id":"b1","title":"Summer sale","imageUrl":"/img/summer.jpg","active":true}"#)
            .create_async()
            .await;

        let draft = BannerDraft {
            title: "Summer sale".into(),
            subtitle: None,
            image_url: "/img/summer.jpg".into(),
            link_url: None,
            active: true,
            position: 0,
        };
        let banner = client(&server.url())
            .create_banner(&draft, Some("session=abc"))
            .await
            .unwrap();
        assert_eq!(banner.id, "b1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_uses_put() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/tours/t1")
            .match_body(Matcher::PartialJson(json!({"title": "Renamed", "durationDays": 3})))
            .with_status(200)
            .with_body(r#"{"id":"t1","title":"Renamed","durationDays":3}"#)
            .create_async()
            .await;

        let draft = TourDraft {
            title: "Renamed".into(),
            duration_days: 3,
            ..TourDraft::default()
        };
        let tour = client(&server.url())
            .update_tour("t1", &draft, None)
            .await
            .unwrap();
        assert_eq!(tour.duration_days, 3);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn forbidden_delete_reports_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/articles/a1")
            .with_status(403)
            .with_body("admin only")
            .create_async()
            .await;

        let err = client(&server.url())
            .delete_article("a1", Some("session=abc"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert!(err.to_string().contains("admin only"));
    }

    #[tokio::test]
    async fn delete_accepts_no_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/tours/t1")
            .with_status(204)
            .create_async()
            .await;

        client(&server.url()).delete_tour("t1", None).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unreachable_backend_is_http_error() {
        let err = client("http://127.0.0.1:1").list_banners().await.unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(ApiClient::new("mailto:ops@example.com", Duration::from_secs(1)).is_err());
        assert!(ApiClient::new("not a url", Duration::from_secs(1)).is_err());
    }
}
