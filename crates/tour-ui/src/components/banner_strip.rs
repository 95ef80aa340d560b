use leptos::prelude::*;
use tour_types::Banner;

/// Hero banners in the order given. Renders nothing for an empty list.
#[component]
pub fn BannerStrip(banners: Vec<Banner>) -> impl IntoView {
    (!banners.is_empty()).then(|| {
        view! {
            <section class="banner-strip">
                {banners
                    .into_iter()
                    .map(|banner| {
                        let style = format!("background-image: url('{}')", banner.image_url);
                        let link = banner.link_url.clone();
                        view! {
                            <div class="banner" style=style>
                                <div class="banner-text">
                                    <h2>{banner.title.clone()}</h2>
                                    {banner.subtitle.clone().map(|s| view! { <p>{s}</p> })}
                                    {link
                                        .map(|href| {
                                            view! {
                                                <a class="btn btn-primary" href=href>
                                                    "Explore"
                                                </a>
                                            }
                                        })}
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </section>
        }
    })
}
