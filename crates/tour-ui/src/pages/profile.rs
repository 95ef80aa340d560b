use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use tour_types::User;

use crate::components::status::{ErrorCard, Loading};

/// Signed-in user plus whether the configured admin role applies to them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub user: User,
    pub can_manage: bool,
}

impl Account {
    #[cfg_attr(not(feature = "ssr"), allow(dead_code))]
    fn new(user: User, adminRole: &str) -> Self {
        let can_manage = user.has_role(adminRole);
        Self { user, can_manage }
    }
}

#[server]
pub async fn current_user() -> Result<Option<Account>, ServerFnError> {
    use crate::server::{backend, current_session};

    let backend = backend()?;
    let session = current_session(&backend).await?;
    Ok(session.map(|envelope| Account::new(envelope.user, &backend.admin_role)))
}

#[server]
async fn logout() -> Result<(), ServerFnError> {
    use crate::server::{backend, client_error, relay_cookies, request_cookie};

    let cookies = backend()?
        .auth
        .sign_out(request_cookie().as_deref())
        .await
        .map_err(client_error)?;
    relay_cookies(&cookies)?;
    leptos_axum::redirect("/login");
    Ok(())
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let user = Resource::new(|| (), |_| current_user());
    let logoutAction = ServerAction::<Logout>::new();

    view! {
        <div class="page-header">
            <h1>"My account"</h1>
        </div>
        <Suspense fallback=|| view! { <Loading message="Loading account..." /> }>
            {move || Suspend::new(async move {
                match user.await {
                    Ok(Some(Account { user: u, can_manage })) => {
                        view! {
                            <div class="card profile-card">
                                {u.image.clone().map(|src| view! { <img class="avatar" src=src alt="" /> })}
                                <div class="card-title">{u.display_name().to_string()}</div>
                                <p>{u.email.clone()}</p>
                                <p class="subtitle">
                                    "Role: " {u.role.clone().unwrap_or_else(|| "customer".into())}
                                </p>
                                {can_manage.then(|| view! { <a class="btn btn-link" href="/dashboard">"Open dashboard"</a> })}
                            </div>
                        }
                            .into_any()
                    }
                    Ok(None) => {
                        view! {
                            <div class="card">
                                <p>"You are signed out. " <a href="/login">"Sign in"</a></p>
                            </div>
                        }
                            .into_any()
                    }
                    Err(e) => view! { <ErrorCard what="account" error=e.to_string() /> }.into_any(),
                }
            })}
        </Suspense>
        <ActionForm action=logoutAction>
            <button type="submit" class="btn btn-secondary">"Sign out"</button>
        </ActionForm>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> User {
        User {
            id: "u1".into(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            role: Some(role.into()),
            image: None,
        }
    }

    #[test]
    fn dashboard_link_follows_configured_role() {
        assert!(Account::new(user("Staff"), "staff").can_manage);
        assert!(!Account::new(user("admin"), "staff").can_manage);
        assert!(Account::new(user("admin"), "admin").can_manage);
    }
}
