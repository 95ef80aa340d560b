use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::status::{ErrorCard, Loading};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub tours: usize,
    pub published_tours: usize,
    pub articles: usize,
    pub published_articles: usize,
    pub banners: usize,
    pub active_banners: usize,
}

#[server(name = DashboardSummaryFn)]
pub async fn dashboard_summary() -> Result<DashboardSummary, ServerFnError> {
    use crate::server::{client_error, require_admin};

    let (backend, _) = require_admin().await?;
    let tours = backend.api.list_tours().await.map_err(client_error)?;
    let articles = backend.api.list_articles().await.map_err(client_error)?;
    let banners = backend.api.list_banners().await.map_err(client_error)?;

    Ok(DashboardSummary {
        tours: tours.len(),
        published_tours: tours.iter().filter(|t| t.published).count(),
        articles: articles.len(),
        published_articles: articles.iter().filter(|a| a.published).count(),
        banners: banners.len(),
        active_banners: banners.iter().filter(|b| b.active).count(),
    })
}

#[component]
fn StatCard(
    title: &'static str,
    total: usize,
    live: usize,
    live_label: &'static str,
    href: &'static str,
) -> impl IntoView {
    view! {
        <a class="card stat-card" href=href>
            <div class="card-title">{title}</div>
            <div class="stat-value">{total}</div>
            <div class="stat-detail">{format!("{live} {live_label}")}</div>
        </a>
    }
}

#[component]
pub fn DashboardOverviewPage() -> impl IntoView {
    let summary = Resource::new(|| (), |_| dashboard_summary());

    view! {
        <div class="dashboard-header">
            <h1>"Dashboard"</h1>
            <p class="subtitle">"Catalogue and content at a glance"</p>
        </div>
        <Suspense fallback=|| view! { <Loading message="Loading summary..." /> }>
            {move || Suspend::new(async move {
                match summary.await {
                    Ok(s) => {
                        view! {
                            <div class="stat-grid">
                                <StatCard title="Tours" total=s.tours live=s.published_tours live_label="published" href="/dashboard/tours" />
                                <StatCard title="Articles" total=s.articles live=s.published_articles live_label="published" href="/dashboard/articles" />
                                <StatCard title="Banners" total=s.banners live=s.active_banners live_label="active" href="/dashboard/banners" />
                            </div>
                        }
                            .into_any()
                    }
                    Err(e) => view! { <ErrorCard what="summary" error=e.to_string() /> }.into_any(),
                }
            })}
        </Suspense>
    }
}
