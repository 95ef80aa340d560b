use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Redirect, Route, Router, Routes},
    ParamSegment, StaticSegment,
};

use crate::components::nav::{DashboardNav, SiteHeader};
use crate::components::toast::ToastProvider;
use crate::pages::articles::{ArticlePage, ArticlesPage};
use crate::pages::dashboard::articles::ArticlesAdminPage;
use crate::pages::dashboard::banners::BannersAdminPage;
use crate::pages::dashboard::overview::DashboardOverviewPage;
use crate::pages::dashboard::tours::{TourEditPage, ToursAdminPage};
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::password::{ForgotPasswordPage, ResetPasswordPage};
use crate::pages::profile::ProfilePage;
use crate::pages::tour_detail::TourDetailPage;
use crate::pages::unauthorized::UnauthorizedPage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <link rel="icon" href="/favicon.svg" type="image/svg+xml" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/tour-site.css" />
        <Title text="Wayfarer Tours" />
        <ToastProvider>
            <Router>
                <Routes fallback=|| view! { <SiteLayout><p>"Page not found."</p></SiteLayout> }.into_any()>
                    <Route path=StaticSegment("") view=HomeView />
                    <Route path=(StaticSegment("tours"), ParamSegment("id")) view=TourDetailView />
                    <Route path=StaticSegment("articles") view=ArticlesView />
                    <Route path=(StaticSegment("articles"), ParamSegment("id")) view=ArticleView />
                    <Route path=StaticSegment("login") view=LoginPage />
                    <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage />
                    <Route path=StaticSegment("reset-password") view=ResetPasswordPage />
                    <Route path=StaticSegment("unauthorized") view=UnauthorizedPage />
                    <Route path=StaticSegment("profile") view=ProfileView />
                    <Route path=StaticSegment("admin") view=|| view! { <Redirect path="/dashboard" /> } />
                    <Route path=StaticSegment("dashboard") view=DashboardView />
                    <Route path=(StaticSegment("dashboard"), StaticSegment("tours")) view=ToursAdminView />
                    <Route
                        path=(StaticSegment("dashboard"), StaticSegment("tours"), ParamSegment("id"))
                        view=TourEditView
                    />
                    <Route path=(StaticSegment("dashboard"), StaticSegment("articles")) view=ArticlesAdminView />
                    <Route path=(StaticSegment("dashboard"), StaticSegment("banners")) view=BannersAdminView />
                </Routes>
            </Router>
        </ToastProvider>
    }
}

#[component]
fn SiteLayout(children: Children) -> impl IntoView {
    view! {
        <div class="site-layout">
            <SiteHeader />
            <main class="site-content">{children()}</main>
            <footer class="site-footer">"\u{00A9} Wayfarer Tours"</footer>
        </div>
    }
}

#[component]
fn AdminLayout(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <DashboardNav />
            <main class="main-content">{children()}</main>
        </div>
    }
}

#[component]
fn HomeView() -> impl IntoView {
    view! { <SiteLayout><HomePage /></SiteLayout> }
}

#[component]
fn TourDetailView() -> impl IntoView {
    view! { <SiteLayout><TourDetailPage /></SiteLayout> }
}

#[component]
fn ArticlesView() -> impl IntoView {
    view! { <SiteLayout><ArticlesPage /></SiteLayout> }
}

#[component]
fn ArticleView() -> impl IntoView {
    view! { <SiteLayout><ArticlePage /></SiteLayout> }
}

#[component]
fn ProfileView() -> impl IntoView {
    view! { <SiteLayout><ProfilePage /></SiteLayout> }
}

#[component]
fn DashboardView() -> impl IntoView {
    view! { <AdminLayout><DashboardOverviewPage /></AdminLayout> }
}

#[component]
fn ToursAdminView() -> impl IntoView {
    view! { <AdminLayout><ToursAdminPage /></AdminLayout> }
}

#[component]
fn TourEditView() -> impl IntoView {
    view! { <AdminLayout><TourEditPage /></AdminLayout> }
}

#[component]
fn ArticlesAdminView() -> impl IntoView {
    view! { <AdminLayout><ArticlesAdminPage /></AdminLayout> }
}

#[component]
fn BannersAdminView() -> impl IntoView {
    view! { <AdminLayout><BannersAdminPage /></AdminLayout> }
}
