use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

/// Path the reset email links back to; the auth service appends `?token=`.
pub const RESET_PASSWORD_PATH: &str = "/reset-password";

pub const MIN_PASSWORD_LEN: usize = 8;

#[server]
async fn request_password_reset(email: String) -> Result<(), ServerFnError> {
    use crate::server::{backend, client_error};

    let email = email.trim();
    if email.is_empty() {
        return Err(ServerFnError::new("Enter your email address"));
    }

    match backend()?
        .auth
        .request_password_reset(email, RESET_PASSWORD_PATH)
        .await
    {
        Ok(()) => Ok(()),
        // Unknown addresses look the same as known ones to the visitor.
        Err(e) if e.is_not_found() => Ok(()),
        Err(e) => Err(client_error(e)),
    }
}

#[server]
async fn reset_password(
    token: String,
    password: String,
    confirm: String,
) -> Result<(), ServerFnError> {
    use crate::server::{backend, client_error};

    if let Some(problem) = password_problem(&password, &confirm) {
        return Err(ServerFnError::new(problem));
    }
    if token.is_empty() {
        return Err(ServerFnError::new("This reset link is invalid or has expired"));
    }

    match backend()?.auth.reset_password(&token, &password).await {
        Ok(()) => {
            leptos_axum::redirect("/login");
            Ok(())
        }
        Err(e) if matches!(e.status(), Some(400 | 401)) => {
            Err(ServerFnError::new("This reset link is invalid or has expired"))
        }
        Err(e) => Err(client_error(e)),
    }
}

#[cfg_attr(not(feature = "ssr"), allow(dead_code))]
fn password_problem(password: &str, confirm: &str) -> Option<&'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 8 characters")
    } else if password != confirm {
        Some("Passwords do not match")
    } else {
        None
    }
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let resetAction = ServerAction::<RequestPasswordReset>::new();
    let resetValue = resetAction.value();

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <h1>"Reset password"</h1>
                    <p>"We'll email you a link to choose a new one"</p>
                </div>
                {move || {
                    resetValue
                        .get()
                        .map(|result| match result {
                            Ok(()) => {
                                view! {
                                    <div class="form-success">
                                        "If an account exists for that address, a reset link is on its way."
                                    </div>
                                }
                                    .into_any()
                            }
                            Err(e) => view! { <div class="login-error">{e.to_string()}</div> }.into_any(),
                        })
                }}
                <ActionForm action=resetAction>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input type="email" id="email" name="email" required />
                    </div>
                    <button type="submit" class="btn btn-primary">"Send reset link"</button>
                </ActionForm>
                <a class="btn btn-link" href="/login">"Back to sign in"</a>
            </div>
        </div>
    }
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let query = use_query_map();
    let token = move || query.read().get("token").unwrap_or_default();
    let resetAction = ServerAction::<ResetPassword>::new();
    let resetValue = resetAction.value();

    let errorMessage = move || {
        resetValue
            .get()
            .and_then(|result| result.err())
            .map(|e| e.to_string())
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <h1>"Choose a new password"</h1>
                </div>
                {move || errorMessage().map(|message| view! { <div class="login-error">{message}</div> })}
                <ActionForm action=resetAction>
                    <input type="hidden" name="token" value=token />
                    <div class="form-group">
                        <label for="password">"New password"</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            autocomplete="new-password"
                            minlength=MIN_PASSWORD_LEN.to_string()
                            required
                        />
                    </div>
                    <div class="form-group">
                        <label for="confirm">"Confirm password"</label>
                        <input
                            type="password"
                            id="confirm"
                            name="confirm"
                            autocomplete="new-password"
                            required
                        />
                    </div>
                    <button type="submit" class="btn btn-primary">"Update password"</button>
                </ActionForm>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_rules() {
        assert_eq!(password_problem("short", "short"), Some("Password must be at least 8 characters"));
        assert_eq!(password_problem("longenough", "different"), Some("Passwords do not match"));
        assert_eq!(password_problem("longenough", "longenough"), None);
    }
}
