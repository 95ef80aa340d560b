use leptos::prelude::*;
use tour_types::{Banner, Tour};

use crate::components::banner_strip::BannerStrip;
use crate::components::status::{ErrorCard, Loading};
use crate::components::tour_card::TourCard;

#[server]
pub async fn list_published_tours() -> Result<Vec<Tour>, ServerFnError> {
    use crate::server::{backend, client_error};

    let mut tours = backend()?.api.list_tours().await.map_err(client_error)?;
    tours.retain(|t| t.published);
    Ok(tours)
}

#[server]
pub async fn list_active_banners() -> Result<Vec<Banner>, ServerFnError> {
    use crate::server::{backend, client_error};
    use tour_types::active_banners;

    let banners = backend()?.api.list_banners().await.map_err(client_error)?;
    Ok(active_banners(banners))
}

#[component]
pub fn HomePage() -> impl IntoView {
    let tours = Resource::new(|| (), |_| list_published_tours());
    let banners = Resource::new(|| (), |_| list_active_banners());

    view! {
        <Suspense fallback=|| ()>
            {move || Suspend::new(async move {
                // A failed banner fetch only hides the hero.
                let list = banners.await.unwrap_or_default();
                view! { <BannerStrip banners=list /> }
            })}
        </Suspense>
        <div class="page-header">
            <h1>"Find your next journey"</h1>
            <p class="subtitle">"Small-group tours, planned end to end"</p>
        </div>
        <Suspense fallback=|| view! { <Loading message="Loading tours..." /> }>
            {move || Suspend::new(async move {
                match tours.await {
                    Ok(list) if list.is_empty() => {
                        view! {
                            <div class="card">
                                <p>"No tours are open for booking right now."</p>
                            </div>
                        }
                            .into_any()
                    }
                    Ok(list) => {
                        view! {
                            <div class="tour-grid">
                                {list
                                    .into_iter()
                                    .map(|tour| view! { <TourCard tour /> })
                                    .collect_view()}
                            </div>
                        }
                            .into_any()
                    }
                    Err(e) => view! { <ErrorCard what="tours" error=e.to_string() /> }.into_any(),
                }
            })}
        </Suspense>
    }
}
