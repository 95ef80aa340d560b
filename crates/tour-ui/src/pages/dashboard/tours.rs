use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use tour_types::Tour;

use crate::components::status::{ErrorCard, Loading};
use crate::components::toast::notify_result;
use crate::format::{format_duration, format_price};

#[cfg_attr(not(feature = "ssr"), allow(dead_code))]
fn check_core_fields(title: &str, price: f64) -> Result<(), &'static str> {
    if title.is_empty() {
        return Err("Title is required");
    }
    if !price.is_finite() || price < 0.0 {
        return Err("Price cannot be negative");
    }
    Ok(())
}

#[server]
pub async fn admin_list_tours() -> Result<Vec<Tour>, ServerFnError> {
    use crate::server::{client_error, require_admin};

    let (backend, _) = require_admin().await?;
    let mut tours = backend.api.list_tours().await.map_err(client_error)?;
    tours.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    Ok(tours)
}

#[server]
pub async fn admin_get_tour(id: String) -> Result<Tour, ServerFnError> {
    use crate::server::{client_error, require_admin};

    let (backend, _) = require_admin().await?;
    backend.api.get_tour(&id).await.map_err(client_error)
}

#[server]
async fn create_tour(
    title: String,
    location: String,
    duration_days: u32,
    price: f64,
    currency: String,
    summary: String,
) -> Result<Tour, ServerFnError> {
    use crate::server::{client_error, require_admin};
    use tour_types::{slugify, TourDraft};

    let title = title.trim().to_string();
    check_core_fields(&title, price).map_err(ServerFnError::new)?;

    let (backend, cookie) = require_admin().await?;
    let draft = TourDraft {
        slug: slugify(&title),
        title,
        summary: summary.trim().to_string(),
        location: location.trim().to_string(),
        duration_days,
        price,
        currency: currency.trim().to_uppercase(),
        ..TourDraft::default()
    };
    let tour = backend
        .api
        .create_tour(&draft, cookie.as_deref())
        .await
        .map_err(client_error)?;
    tracing::info!("tour {} created", tour.id);
    Ok(tour)
}

#[server]
async fn update_tour(
    id: String,
    title: String,
    slug: String,
    summary: String,
    description: String,
    location: String,
    duration_days: u32,
    price: f64,
    currency: String,
    cover_image: String,
    published: Option<String>,
) -> Result<(), ServerFnError> {
    use crate::pages::dashboard::non_empty;
    use crate::server::{client_error, require_admin};
    use tour_types::slugify;

    let title = title.trim().to_string();
    check_core_fields(&title, price).map_err(ServerFnError::new)?;

    let (backend, cookie) = require_admin().await?;
    // Start from the stored tour so nested lists survive the edit.
    let mut draft = backend
        .api
        .get_tour(&id)
        .await
        .map_err(client_error)?
        .to_draft();

    draft.title = title;
    draft.slug = non_empty(slug).unwrap_or_else(|| slugify(&draft.title));
    draft.summary = summary.trim().to_string();
    draft.description = description.trim().to_string();
    draft.location = location.trim().to_string();
    draft.duration_days = duration_days;
    draft.price = price;
    draft.currency = currency.trim().to_uppercase();
    draft.cover_image = non_empty(cover_image);
    draft.published = published.is_some();

    backend
        .api
        .update_tour(&id, &draft, cookie.as_deref())
        .await
        .map_err(client_error)?;
    tracing::info!("tour {id} updated");
    leptos_axum::redirect("/dashboard/tours");
    Ok(())
}

#[server]
async fn set_tour_published(id: String, published: bool) -> Result<(), ServerFnError> {
    use crate::server::{client_error, require_admin};

    let (backend, cookie) = require_admin().await?;
    let mut draft = backend
        .api
        .get_tour(&id)
        .await
        .map_err(client_error)?
        .to_draft();
    draft.published = published;
    backend
        .api
        .update_tour(&id, &draft, cookie.as_deref())
        .await
        .map_err(client_error)?;
    tracing::info!("tour {id} published={published}");
    Ok(())
}

#[server]
async fn delete_tour(id: String) -> Result<(), ServerFnError> {
    use crate::server::{client_error, require_admin};

    let (backend, cookie) = require_admin().await?;
    backend
        .api
        .delete_tour(&id, cookie.as_deref())
        .await
        .map_err(client_error)?;
    tracing::info!("tour {id} deleted");
    Ok(())
}

#[component]
pub fn ToursAdminPage() -> impl IntoView {
    let createAction = ServerAction::<CreateTour>::new();
    let publishAction = ServerAction::<SetTourPublished>::new();
    let deleteAction = ServerAction::<DeleteTour>::new();

    notify_result(createAction.value(), "Tour created");
    notify_result(publishAction.value(), "Tour updated");
    notify_result(deleteAction.value(), "Tour deleted");

    let tours = Resource::new(
        move || {
            (
                createAction.version().get(),
                publishAction.version().get(),
                deleteAction.version().get(),
            )
        },
        |_| admin_list_tours(),
    );

    view! {
        <div class="dashboard-header">
            <h1>"Tours"</h1>
            <p class="subtitle">"Create, publish and retire tours"</p>
        </div>
        <div class="card">
            <div class="card-title">"New tour"</div>
            <ActionForm action=createAction>
                <div class="form-row">
                    <div class="form-group">
                        <label for="title">"Title"</label>
                        <input id="title" name="title" required />
                    </div>
                    <div class="form-group">
                        <label for="location">"Location"</label>
                        <input id="location" name="location" required />
                    </div>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="duration_days">"Days"</label>
                        <input id="duration_days" name="duration_days" type="number" min="0" value="1" required />
                    </div>
                    <div class="form-group">
                        <label for="price">"Price per person"</label>
                        <input id="price" name="price" type="number" min="0" step="0.01" required />
                    </div>
                    <div class="form-group">
                        <label for="currency">"Currency"</label>
                        <input id="currency" name="currency" value="USD" maxlength="3" required />
                    </div>
                </div>
                <div class="form-group">
                    <label for="summary">"Summary"</label>
                    <textarea id="summary" name="summary"></textarea>
                </div>
                <button type="submit" class="btn btn-primary">"Create tour"</button>
            </ActionForm>
        </div>
        <Suspense fallback=|| view! { <Loading message="Loading tours..." /> }>
            {move || Suspend::new(async move {
                match tours.await {
                    Ok(list) => {
                        let count = list.len();
                        view! {
                            <div class="card">
                                <div class="card-title">
                                    {format!("{count} Tour{}", if count == 1 { "" } else { "s" })}
                                </div>
                                <table>
                                    <thead>
                                        <tr>
                                            <th>"Title"</th>
                                            <th>"Duration"</th>
                                            <th>"Price"</th>
                                            <th>"Status"</th>
                                            <th></th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {list
                                            .into_iter()
                                            .map(|tour| {
                                                let editHref = format!("/dashboard/tours/{}", tour.id);
                                                let toggleId = tour.id.clone();
                                                let deleteId = tour.id.clone();
                                                let toggleTo = (!tour.published).to_string();
                                                view! {
                                                    <tr>
                                                        <td><a href=editHref>{tour.title.clone()}</a></td>
                                                        <td>{format_duration(tour.duration_days)}</td>
                                                        <td>{format_price(tour.price, &tour.currency)}</td>
                                                        <td>{if tour.published { "Published" } else { "Draft" }}</td>
                                                        <td class="row-actions">
                                                            <ActionForm action=publishAction>
                                                                <input type="hidden" name="id" value=toggleId />
                                                                <input type="hidden" name="published" value=toggleTo />
                                                                <button type="submit" class="btn btn-small">
                                                                    {if tour.published { "Unpublish" } else { "Publish" }}
                                                                </button>
                                                            </ActionForm>
                                                            <ActionForm action=deleteAction>
                                                                <input type="hidden" name="id" value=deleteId />
                                                                <button type="submit" class="btn btn-small btn-danger">"Delete"</button>
                                                            </ActionForm>
                                                        </td>
                                                    </tr>
                                                }
                                            })
                                            .collect_view()}
                                    </tbody>
                                </table>
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

#[component]
pub fn TourEditPage() -> impl IntoView {
    let params = use_params_map();
    let tourId = move || params.read().get("id").unwrap_or_default();
    let tour = Resource::new(tourId, admin_get_tour);
    let updateAction = ServerAction::<UpdateTour>::new();

    notify_result(updateAction.value(), "Tour saved");

    view! {
        <Suspense fallback=|| view! { <Loading message="Loading tour..." /> }>
            {move || Suspend::new(async move {
                match tour.await {
                    Ok(t) => {
                        view! {
                            <div class="dashboard-header">
                                <h1>{format!("Edit: {}", t.title)}</h1>
                                <p class="subtitle">
                                    {format!(
                                        "{} itinerary days, {} extras kept as stored",
                                        t.itinerary.len(),
                                        t.extras.len(),
                                    )}
                                </p>
                            </div>
                            <div class="card">
                                <ActionForm action=updateAction>
                                    <input type="hidden" name="id" value=t.id.clone() />
                                    <div class="form-row">
                                        <div class="form-group">
                                            <label for="title">"Title"</label>
                                            <input id="title" name="title" value=t.title.clone() required />
                                        </div>
                                        <div class="form-group">
                                            <label for="slug">"Slug"</label>
                                            <input id="slug" name="slug" value=t.slug.clone() />
                                        </div>
                                    </div>
                                    <div class="form-row">
                                        <div class="form-group">
                                            <label for="location">"Location"</label>
                                            <input id="location" name="location" value=t.location.clone() />
                                        </div>
                                        <div class="form-group">
                                            <label for="duration_days">"Days"</label>
                                            <input id="duration_days" name="duration_days" type="number" min="0" value=t.duration_days.to_string() required />
                                        </div>
                                        <div class="form-group">
                                            <label for="price">"Price"</label>
                                            <input id="price" name="price" type="number" min="0" step="0.01" value=t.price.to_string() required />
                                        </div>
                                        <div class="form-group">
                                            <label for="currency">"Currency"</label>
                                            <input id="currency" name="currency" value=t.currency.clone() maxlength="3" required />
                                        </div>
                                    </div>
                                    <div class="form-group">
                                        <label for="cover_image">"Cover image URL"</label>
                                        <input id="cover_image" name="cover_image" value=t.cover_image.clone().unwrap_or_default() />
                                    </div>
                                    <div class="form-group">
                                        <label for="summary">"Summary"</label>
                                        <textarea id="summary" name="summary">{t.summary.clone()}</textarea>
                                    </div>
                                    <div class="form-group">
                                        <label for="description">"Description"</label>
                                        <textarea id="description" name="description" rows="8">{t.description.clone()}</textarea>
                                    </div>
                                    <label class="checkbox">
                                        <input type="checkbox" name="published" value="on" checked=t.published />
                                        "Published"
                                    </label>
                                    <div class="form-actions">
                                        <button type="submit" class="btn btn-primary">"Save"</button>
                                        <a class="btn btn-link" href="/dashboard/tours">"Cancel"</a>
                                    </div>
                                </ActionForm>
                            </div>
                        }
                            .into_any()
                    }
                    Err(e) => view! { <ErrorCard what="tour" error=e.to_string() /> }.into_any(),
                }
            })}
        </Suspense>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_fields_reject_blank_title_and_negative_price() {
        assert_eq!(check_core_fields("", 100.0), Err("Title is required"));
        assert_eq!(check_core_fields("Alps", -1.0), Err("Price cannot be negative"));
        assert_eq!(check_core_fields("Alps", f64::NAN), Err("Price cannot be negative"));
        assert!(check_core_fields("Alps", 0.0).is_ok());
    }
}
