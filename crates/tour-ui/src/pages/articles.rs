use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use tour_types::Article;

use crate::components::status::{ErrorCard, Loading};
use crate::format::format_date;

#[server]
pub async fn list_published_articles() -> Result<Vec<Article>, ServerFnError> {
    use crate::server::{backend, client_error};

    let mut articles = backend()?.api.list_articles().await.map_err(client_error)?;
    articles.retain(|a| a.published);
    // Newest first; RFC 3339 strings sort chronologically.
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    Ok(articles)
}

#[server]
pub async fn get_published_article(id: String) -> Result<Article, ServerFnError> {
    use crate::server::{backend, client_error};

    let article = backend()?.api.get_article(&id).await.map_err(client_error)?;
    if !article.published {
        return Err(ServerFnError::new("Not found"));
    }
    Ok(article)
}

#[component]
pub fn ArticlesPage() -> impl IntoView {
    let articles = Resource::new(|| (), |_| list_published_articles());

    view! {
        <div class="page-header">
            <h1>"Journal"</h1>
            <p class="subtitle">"Stories and advice from the road"</p>
        </div>
        <Suspense fallback=|| view! { <Loading message="Loading articles..." /> }>
            {move || Suspend::new(async move {
                match articles.await {
                    Ok(list) if list.is_empty() => {
                        view! { <div class="card"><p>"Nothing published yet."</p></div> }.into_any()
                    }
                    Ok(list) => {
                        view! {
                            <div class="article-list">
                                {list
                                    .into_iter()
                                    .map(|article| {
                                        let href = format!("/articles/{}", article.id);
                                        view! {
                                            <a class="card article-card" href=href>
                                                <div class="card-title">{article.title}</div>
                                                <p class="article-date">
                                                    {article.published_at.as_deref().map(format_date)}
                                                </p>
                                                <p>{article.excerpt}</p>
                                            </a>
                                        }
                                    })
                                    .collect_view()}
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

#[component]
pub fn ArticlePage() -> impl IntoView {
    let params = use_params_map();
    let articleId = move || params.read().get("id").unwrap_or_default();
    let article = Resource::new(articleId, get_published_article);

    view! {
        <Suspense fallback=|| view! { <Loading message="Loading article..." /> }>
            {move || Suspend::new(async move {
                match article.await {
                    Ok(a) => {
                        view! {
                            <article class="article">
                                <h1>{a.title}</h1>
                                <p class="article-date">
                                    {a.published_at.as_deref().map(format_date)}
                                </p>
                                {a.cover_image.map(|src| view! { <img class="article-cover" src=src alt="" /> })}
                                // Paragraphs are separated by blank lines in the stored body.
                                {a.body
                                    .split("\n\n")
                                    .filter(|p| !p.trim().is_empty())
                                    .map(|p| view! { <p>{p.trim().to_string()}</p> })
                                    .collect_view()}
                                <a class="btn btn-link" href="/articles">"\u{2190} All articles"</a>
                            </article>
                        }
                            .into_any()
                    }
                    Err(e) => view! { <ErrorCard what="article" error=e.to_string() /> }.into_any(),
                }
            })}
        </Suspense>
    }
}
