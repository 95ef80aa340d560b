use leptos::prelude::*;
use tour_types::Banner;

use crate::components::status::{ErrorCard, Loading};
use crate::components::toast::notify_result;

#[server]
pub async fn admin_list_banners() -> Result<Vec<Banner>, ServerFnError> {
    use crate::server::{client_error, require_admin};

    let (backend, _) = require_admin().await?;
    let mut banners = backend.api.list_banners().await.map_err(client_error)?;
    banners.sort_by_key(|b| b.position);
    Ok(banners)
}

#[server]
async fn create_banner(
    title: String,
    subtitle: String,
    image_url: String,
    link_url: String,
    position: i32,
) -> Result<Banner, ServerFnError> {
    use crate::pages::dashboard::non_empty;
    use crate::server::{client_error, require_admin};
    use tour_types::BannerDraft;

    let Some(image_url) = non_empty(image_url) else {
        return Err(ServerFnError::new("Image URL is required"));
    };

    let (backend, cookie) = require_admin().await?;
    let draft = BannerDraft {
        title: title.trim().to_string(),
        subtitle: non_empty(subtitle),
        image_url,
        link_url: non_empty(link_url),
        active: true,
        position,
    };
    let banner = backend
        .api
        .create_banner(&draft, cookie.as_deref())
        .await
        .map_err(client_error)?;
    tracing::info!("banner {} created", banner.id);
    Ok(banner)
}

#[server]
async fn set_banner_active(id: String, active: bool) -> Result<(), ServerFnError> {
    use crate::server::{client_error, require_admin};

    let (backend, cookie) = require_admin().await?;
    let mut draft = backend
        .api
        .get_banner(&id)
        .await
        .map_err(client_error)?
        .to_draft();
    draft.active = active;
    backend
        .api
        .update_banner(&id, &draft, cookie.as_deref())
        .await
        .map_err(client_error)?;
    tracing::info!("banner {id} active={active}");
    Ok(())
}

#[server]
async fn delete_banner(id: String) -> Result<(), ServerFnError> {
    use crate::server::{client_error, require_admin};

    let (backend, cookie) = require_admin().await?;
    backend
        .api
        .delete_banner(&id, cookie.as_deref())
        .await
        .map_err(client_error)?;
    tracing::info!("banner {id} deleted");
    Ok(())
}

#[component]
pub fn BannersAdminPage() -> impl IntoView {
    let createAction = ServerAction::<CreateBanner>::new();
    let activeAction = ServerAction::<SetBannerActive>::new();
    let deleteAction = ServerAction::<DeleteBanner>::new();

    notify_result(createAction.value(), "Banner created");
    notify_result(activeAction.value(), "Banner updated");
    notify_result(deleteAction.value(), "Banner deleted");

    let banners = Resource::new(
        move || {
            (
                createAction.version().get(),
                activeAction.version().get(),
                deleteAction.version().get(),
            )
        },
        |_| admin_list_banners(),
    );

    view! {
        <div class="dashboard-header">
            <h1>"Banners"</h1>
            <p class="subtitle">"Hero images on the home page, lowest position first"</p>
        </div>
        <div class="card">
            <div class="card-title">"New banner"</div>
            <ActionForm action=createAction>
                <div class="form-row">
                    <div class="form-group">
                        <label for="title">"Title"</label>
                        <input id="title" name="title" required />
                    </div>
                    <div class="form-group">
                        <label for="subtitle">"Subtitle"</label>
                        <input id="subtitle" name="subtitle" />
                    </div>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="image_url">"Image URL"</label>
                        <input id="image_url" name="image_url" required />
                    </div>
                    <div class="form-group">
                        <label for="link_url">"Link URL"</label>
                        <input id="link_url" name="link_url" />
                    </div>
                    <div class="form-group">
                        <label for="position">"Position"</label>
                        <input id="position" name="position" type="number" value="0" required />
                    </div>
                </div>
                <button type="submit" class="btn btn-primary">"Create banner"</button>
            </ActionForm>
        </div>
        <Suspense fallback=|| view! { <Loading message="Loading banners..." /> }>
            {move || Suspend::new(async move {
                match banners.await {
                    Ok(list) => {
                        view! {
                            <div class="card">
                                <table>
                                    <thead>
                                        <tr>
                                            <th>"#"</th>
                                            <th>"Preview"</th>
                                            <th>"Title"</th>
                                            <th>"Status"</th>
                                            <th></th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {list
                                            .into_iter()
                                            .map(|banner| {
                                                let toggleId = banner.id.clone();
                                                let deleteId = banner.id.clone();
                                                let toggleTo = (!banner.active).to_string();
                                                view! {
                                                    <tr>
                                                        <td>{banner.position}</td>
                                                        <td>
                                                            <img class="banner-thumb" src=banner.image_url.clone() alt="" />
                                                        </td>
                                                        <td>{banner.title.clone()}</td>
                                                        <td>{if banner.active { "Active" } else { "Hidden" }}</td>
                                                        <td class="row-actions">
                                                            <ActionForm action=activeAction>
                                                                <input type="hidden" name="id" value=toggleId />
                                                                <input type="hidden" name="active" value=toggleTo />
                                                                <button type="submit" class="btn btn-small">
                                                                    {if banner.active { "Hide" } else { "Show" }}
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
                    Err(e) => view! { <ErrorCard what="banners" error=e.to_string() /> }.into_any(),
                }
            })}
        </Suspense>
    }
}
