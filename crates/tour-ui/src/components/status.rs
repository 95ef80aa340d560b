use leptos::prelude::*;

#[component]
pub fn Loading(message: &'static str) -> impl IntoView {
    view! {
        <div class="loading">
            <div class="spinner"></div>
            {message}
        </div>
    }
}

#[component]
pub fn ErrorCard(
    /// What was being loaded, e.g. "tours"
    what: &'static str,
    error: String,
) -> impl IntoView {
    view! {
        <div class="card">
            <p class="form-error">{format!("Failed to load {what}: {error}")}</p>
        </div>
    }
}
