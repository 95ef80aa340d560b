use leptos::prelude::*;
use leptos_router::hooks::use_location;

#[component]
pub fn SiteHeader() -> impl IntoView {
    view! {
        <header class="site-header">
            <a href="/" class="site-brand">
                <span class="brand-icon">"T"</span>
                <span class="brand-text">"Wayfarer Tours"</span>
            </a>
            <nav class="site-links">
                <a href="/">"Tours"</a>
                <a href="/articles">"Journal"</a>
                <a href="/profile">"My account"</a>
            </nav>
        </header>
    }
}

const DASHBOARD_LINKS: &[(&str, &str, &str)] = &[
    ("/dashboard", "\u{25A3}", "Overview"),
    ("/dashboard/tours", "\u{26F0}", "Tours"),
    ("/dashboard/articles", "\u{270E}", "Articles"),
    ("/dashboard/banners", "\u{2691}", "Banners"),
];

/// Sidebar for the admin dashboard. Highlights the section under the
/// current path.
#[component]
pub fn DashboardNav() -> impl IntoView {
    let pathname = use_location().pathname;

    view! {
        <nav class="nav-sidebar">
            <div class="nav-brand">
                <div class="brand-icon">"T"</div>
                <span class="brand-text">"Tours Admin"</span>
            </div>
            <ul class="nav-links">
                {DASHBOARD_LINKS
                    .iter()
                    .map(|(href, icon, label)| {
                        let href = *href;
                        let isActive = move || {
                            let path = pathname.get();
                            if href == "/dashboard" {
                                path == href
                            } else {
                                path.starts_with(href)
                            }
                        };
                        view! {
                            <li class="nav-item" class:active=isActive>
                                <a href=href>
                                    <span class="nav-icon">{*icon}</span>
                                    <span>{*label}</span>
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
                <li class="nav-item">
                    <a href="/">
                        <span class="nav-icon">"\u{2190}"</span>
                        <span>"Back to site"</span>
                    </a>
                </li>
            </ul>
        </nav>
    }
}
