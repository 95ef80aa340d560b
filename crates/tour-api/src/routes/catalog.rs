use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tour_types::{active_banners, Article, Banner, Tour};

use super::{error_response, upstream_error, ApiError};
use crate::state::AppState;

/// Read-only JSON views of the public catalogue. Unpublished tours and
/// articles and inactive banners are hidden.
pub fn routes(_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/tours", get(list_tours))
        .route("/api/v1/tours/:id", get(get_tour))
        .route("/api/v1/articles", get(list_articles))
        .route("/api/v1/articles/:id", get(get_article))
        .route("/api/v1/banners", get(list_banners))
}

async fn list_tours(State(state): State<AppState>) -> Result<Json<Vec<Tour>>, ApiError> {
    let mut tours = state.api.list_tours().await.map_err(upstream_error)?;
    tours.retain(|t| t.published);
    Ok(Json(tours))
}

async fn get_tour(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Tour>, ApiError> {
    let tour = state.api.get_tour(&id).await.map_err(upstream_error)?;
    if !tour.published {
        return Err(error_response(
            StatusCode::NOT_FOUND,
            format!("tour not found: {id}"),
        ));
    }
    Ok(Json(tour))
}

async fn list_articles(State(state): State<AppState>) -> Result<Json<Vec<Article>>, ApiError> {
    let mut articles = state.api.list_articles().await.map_err(upstream_error)?;
    articles.retain(|a| a.published);
    Ok(Json(articles))
}

async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Article>, ApiError> {
    let article = state.api.get_article(&id).await.map_err(upstream_error)?;
    if !article.published {
        return Err(error_response(
            StatusCode::NOT_FOUND,
            format!("article not found: {id}"),
        ));
    }
    Ok(Json(article))
}

async fn list_banners(State(state): State<AppState>) -> Result<Json<Vec<Banner>>, ApiError> {
    let banners = state.api.list_banners().await.map_err(upstream_error)?;
    Ok(Json(active_banners(banners)))
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tour_client::{ApiClient, AuthClient};
    use tower::ServiceExt;

    use crate::{middleware::access::AccessPolicy, AppState};

    fn app(url: &str) -> axum::Router {
        let state = AppState {
            api: ApiClient::new(url, Duration::from_secs(5)).unwrap(),
            auth: AuthClient::new(url, Duration::from_secs(5)).unwrap(),
            policy: Arc::new(AccessPolicy::default()),
        };
        crate::api_router(state)
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn tour_list_hides_unpublished() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/tours")
            .with_status(200)
            .with_body(r#"[{"id":"t1","title":"Live","published":true},{"id":"t2","title":"Draft"}]"#)
            .create_async()
            .await;

        let (status, body) = get(app(&server.url()), "/api/v1/tours").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["id"], "t1");
    }

    #[tokio::test]
    async fn unpublished_tour_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/tours/t2")
            .with_status(200)
            .with_body(r#"{"id":"t2","title":"Draft"}"#)
            .create_async()
            .await;

        let (status, _) = get(app(&server.url()), "/api/v1/tours/t2").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn backend_failure_is_bad_gateway() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/articles")
            .with_status(500)
            .create_async()
            .await;

        let (status, body) = get(app(&server.url()), "/api/v1/articles").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "backend unavailable");
    }

    #[tokio::test]
    async fn banners_are_filtered_and_ordered() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/banners")
            .with_status(200)
            .with_body(
                r#"[
                    {"id":"b2","title":"Second","imageUrl":"/2.jpg","active":true,"position":2},
                    {"id":"b0","title":"Off","imageUrl":"/0.jpg","active":false,"position":0},
                    {"id":"b1","title":"First","imageUrl":"/1.jpg","active":true,"position":1}
                ]"#,
            )
            .create_async()
            .await;

        let (_, body) = get(app(&server.url()), "/api/v1/banners").await;
        assert_eq!(body[0]["id"], "b1");
        assert_eq!(body[1]["id"], "b2");
        assert!(body.get(2).is_none());
    }
}
