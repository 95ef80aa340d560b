use leptos::prelude::*;
use tour_types::Article;

use crate::components::status::{ErrorCard, Loading};
use crate::components::toast::notify_result;
use crate::format::format_date;

#[server]
pub async fn admin_list_articles() -> Result<Vec<Article>, ServerFnError> {
    use crate::server::{client_error, require_admin};

    let (backend, _) = require_admin().await?;
    backend.api.list_articles().await.map_err(client_error)
}

#[server]
async fn create_article(
    title: String,
    excerpt: String,
    body: String,
    cover_image: String,
    published: Option<String>,
) -> Result<Article, ServerFnError> {
    use crate::pages::dashboard::non_empty;
    use crate::server::{client_error, require_admin};
    use tour_types::{slugify, ArticleDraft};

    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(ServerFnError::new("Title is required"));
    }

    let (backend, cookie) = require_admin().await?;
    let draft = ArticleDraft {
        slug: slugify(&title),
        title,
        excerpt: excerpt.trim().to_string(),
        body: body.trim().to_string(),
        cover_image: non_empty(cover_image),
        published: published.is_some(),
    };
    let article = backend
        .api
        .create_article(&draft, cookie.as_deref())
        .await
        .map_err(client_error)?;
    tracing::info!("article {} created", article.id);
    Ok(article)
}

#[server]
async fn set_article_published(id: String, published: bool) -> Result<(), ServerFnError> {
    use crate::server::{client_error, require_admin};

    let (backend, cookie) = require_admin().await?;
    let mut draft = backend
        .api
        .get_article(&id)
        .await
        .map_err(client_error)?
        .to_draft();
    draft.published = published;
    backend
        .api
        .update_article(&id, &draft, cookie.as_deref())
        .await
        .map_err(client_error)?;
    tracing::info!("article {id} published={published}");
    Ok(())
}

#[server]
async fn delete_article(id: String) -> Result<(), ServerFnError> {
    use crate::server::{client_error, require_admin};

    let (backend, cookie) = require_admin().await?;
    backend
        .api
        .delete_article(&id, cookie.as_deref())
        .await
        .map_err(client_error)?;
    tracing::info!("article {id} deleted");
    Ok(())
}

#[component]
pub fn ArticlesAdminPage() -> impl IntoView {
    let createAction = ServerAction::<CreateArticle>::new();
    let publishAction = ServerAction::<SetArticlePublished>::new();
    let deleteAction = ServerAction::<DeleteArticle>::new();

    notify_result(createAction.value(), "Article created");
    notify_result(publishAction.value(), "Article updated");
    notify_result(deleteAction.value(), "Article deleted");

    let articles = Resource::new(
        move || {
            (
                createAction.version().get(),
                publishAction.version().get(),
                deleteAction.version().get(),
            )
        },
        |_| admin_list_articles(),
    );

    view! {
        <div class="dashboard-header">
            <h1>"Articles"</h1>
            <p class="subtitle">"Journal posts shown on the public site"</p>
        </div>
        <div class="card">
            <div class="card-title">"New article"</div>
            <ActionForm action=createAction>
                <div class="form-group">
                    <label for="title">"Title"</label>
                    <input id="title" name="title" required />
                </div>
                <div class="form-group">
                    <label for="excerpt">"Excerpt"</label>
                    <input id="excerpt" name="excerpt" />
                </div>
                <div class="form-group">
                    <label for="cover_image">"Cover image URL"</label>
                    <input id="cover_image" name="cover_image" />
                </div>
                <div class="form-group">
                    <label for="body">"Body"</label>
                    <textarea id="body" name="body" rows="10"></textarea>
                </div>
                <label class="checkbox">
                    <input type="checkbox" name="published" value="on" />
                    "Publish now"
                </label>
                <button type="submit" class="btn btn-primary">"Create article"</button>
            </ActionForm>
        </div>
        <Suspense fallback=|| view! { <Loading message="Loading articles..." /> }>
            {move || Suspend::new(async move {
                match articles.await {
                    Ok(list) => {
                        view! {
                            <div class="card">
                                <table>
                                    <thead>
                                        <tr>
                                            <th>"Title"</th>
                                            <th>"Published"</th>
                                            <th></th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {list
                                            .into_iter()
                                            .map(|article| {
                                                let status = if article.published {
                                                    article
                                                        .published_at
                                                        .as_deref()
                                                        .map(format_date)
                                                        .unwrap_or_else(|| "Yes".into())
                                                } else {
                                                    "Draft".into()
                                                };
                                                let toggleId = article.id.clone();
                                                let deleteId = article.id.clone();
                                                let toggleTo = (!article.published).to_string();
                                                view! {
                                                    <tr>
                                                        <td>{article.title.clone()}</td>
                                                        <td>{status}</td>
                                                        <td class="row-actions">
                                                            <ActionForm action=publishAction>
                                                                <input type="hidden" name="id" value=toggleId />
                                                                <input type="hidden" name="published" value=toggleTo />
                                                                <button type="submit" class="btn btn-small">
                                                                    {if article.published { "Unpublish" } else { "Publish" }}
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
                    Err(e) => view! { <ErrorCard what="articles" error=e.to_string() /> }.into_any(),
                }
            })}
        </Suspense>
    }
}
