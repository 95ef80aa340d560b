use leptos::prelude::*;

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"!"</div>
                    <h1>"Access denied"</h1>
                    <p>"Your account does not have permission to view that page."</p>
                </div>
                <a class="btn btn-primary" href="/">"Back to tours"</a>
                <a class="btn btn-link" href="/login">"Sign in with another account"</a>
            </div>
        </div>
    }
}
