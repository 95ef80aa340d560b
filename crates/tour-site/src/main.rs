#![allow(non_snake_case)]

#[cfg(feature = "ssr")]
mod config;

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use std::{net::SocketAddr, sync::Arc};

    use axum::Router;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tour_api::{middleware::access::require_session, AppState};
    use tour_client::{ApiClient, AuthClient};
    use tour_ui::{server::SiteBackend, shell, App};
    use tower_http::trace::TraceLayer;
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let configPath = if let Some(idx) = args.iter().position(|a| a == "--config") {
        args.get(idx + 1)
            .cloned()
            .unwrap_or_else(|| "config.example.toml".into())
    } else {
        "config.example.toml".into()
    };

    let appConfig = config::load(&configPath);
    tracing::info!(
        "loaded config from {configPath}: api={} auth={}",
        appConfig.backend.api_url,
        appConfig.backend.auth_url
    );

    let timeout = appConfig.backend.timeout();
    let api = ApiClient::new(&appConfig.backend.api_url, timeout)
        .unwrap_or_else(|e| panic!("invalid backend api_url: {e}"));
    let auth = AuthClient::new(&appConfig.backend.auth_url, timeout)
        .unwrap_or_else(|e| panic!("failed to build auth client: {e}"));
    let policy = appConfig.access.policy();

    let siteBackend = SiteBackend {
        api: api.clone(),
        auth: auth.clone(),
        admin_role: policy.admin_role.clone(),
    };

    let appState = AppState {
        api,
        auth,
        policy: Arc::new(policy),
    };

    let conf = get_configuration(None).expect("failed to load Leptos configuration");
    let leptosOptions = conf.leptos_options;
    let addr = format!("{}:{}", appConfig.server.bind, appConfig.server.port)
        .parse::<SocketAddr>()
        .unwrap_or_else(|e| {
            tracing::warn!("invalid bind address in config ({e}), using {}", leptosOptions.site_addr);
            leptosOptions.site_addr
        });

    let routes = generate_route_list(App);

    // JSON and auth-proxy routes carry their own AppState
    let apiRouter = tour_api::api_router(appState.clone());

    // Session gate for page routes; public paths skip the lookup
    let accessLayer = axum::middleware::from_fn_with_state(appState, require_session);

    let app = Router::new()
        .leptos_routes_with_context(
            &leptosOptions,
            routes,
            {
                let siteBackend = siteBackend.clone();
                move || provide_context(siteBackend.clone())
            },
            {
                let leptosOptions = leptosOptions.clone();
                move || shell(leptosOptions.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptosOptions)
        .merge(apiRouter)
        .layer(accessLayer)
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server exited with error");
}

#[cfg(not(feature = "ssr"))]
fn main() {}
