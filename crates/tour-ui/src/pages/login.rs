use leptos::prelude::*;

#[server]
async fn login(email: String, password: String) -> Result<(), ServerFnError> {
    use crate::server::{backend, relay_cookies};

    let backend = backend()?;
    let outcome = match backend.auth.sign_in_email(email.trim(), &password).await {
        Ok(outcome) => outcome,
        Err(e) if matches!(e.status(), Some(400 | 401 | 403)) => {
            return Err(ServerFnError::new("Invalid email or password"));
        }
        Err(e) => return Err(crate::server::client_error(e)),
    };

    relay_cookies(&outcome.set_cookies)?;

    let isAdmin = outcome
        .user
        .as_ref()
        .is_some_and(|user| user.has_role(&backend.admin_role));
    leptos_axum::redirect(if isAdmin { "/dashboard" } else { "/" });

    Ok(())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let loginAction = ServerAction::<Login>::new();
    let loginValue = loginAction.value();

    let errorMessage = move || {
        loginValue
            .get()
            .and_then(|result| result.err())
            .map(|e| e.to_string())
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"T"</div>
                    <h1>"Sign in"</h1>
                    <p>"Manage your bookings and account"</p>
                </div>

                {move || errorMessage().map(|message| view! { <div class="login-error">{message}</div> })}

                <ActionForm action=loginAction>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input type="email" id="email" name="email" autocomplete="username" required />
                    </div>
                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            autocomplete="current-password"
                            required
                        />
                    </div>
                    <button type="submit" class="btn btn-primary">
                        "Sign In"
                    </button>
                </ActionForm>
                <a class="btn btn-link" href="/forgot-password">"Forgot your password?"</a>
            </div>
        </div>
    }
}
