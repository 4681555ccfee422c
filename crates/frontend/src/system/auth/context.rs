//! Auth context: session state plus login/logout transitions.
//!
//! Provided once at the app root; the stored session is restored (and
//! refreshed if the access token went stale) on mount.

use contracts::system::auth::{LoginResponse, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: RwSignal<AuthState>,
    /// True while the stored session is being validated on startup.
    pub restoring: RwSignal<bool>,
}

impl AuthContext {
    pub fn new() -> Self {
        AuthContext {
            state: RwSignal::new(AuthState::default()),
            restoring: RwSignal::new(true),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.access_token.is_some())
    }

    pub fn is_admin(&self) -> bool {
        self.state
            .with(|s| s.user_info.as_ref().map(|u| u.is_admin).unwrap_or(false))
    }

    pub fn username(&self) -> Option<String> {
        self.state
            .with(|s| s.user_info.as_ref().map(|u| u.username.clone()))
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.with_untracked(|s| s.access_token.clone())
    }

    /// Adopt a fresh login/register response: persist tokens, set state.
    pub fn adopt_session(&self, response: LoginResponse) {
        storage::save_access_token(&response.access_token);
        storage::save_refresh_token(&response.refresh_token);
        self.state.set(AuthState {
            access_token: Some(response.access_token),
            user_info: Some(response.user),
        });
    }

    pub fn set_user_info(&self, user: UserInfo) {
        self.state.update(|s| s.user_info = Some(user));
    }

    pub fn logout(&self) {
        storage::clear_tokens();
        self.state.set(AuthState::default());
    }

    /// Restore the stored session: validate the access token, fall back
    /// to a refresh, clear everything if both fail.
    async fn restore(self) {
        if let Some(access_token) = storage::get_access_token() {
            match api::get_current_user(&access_token).await {
                Ok(user_info) => {
                    self.state.set(AuthState {
                        access_token: Some(access_token),
                        user_info: Some(user_info),
                    });
                    self.restoring.set(false);
                    return;
                }
                Err(err) => log::info!("stored access token rejected: {}", err),
            }
        }

        if let Some(refresh_token) = storage::get_refresh_token() {
            match api::refresh_token(refresh_token).await {
                Ok(response) => {
                    storage::save_access_token(&response.access_token);
                    if let Ok(user_info) = api::get_current_user(&response.access_token).await {
                        self.state.set(AuthState {
                            access_token: Some(response.access_token),
                            user_info: Some(user_info),
                        });
                        self.restoring.set(false);
                        return;
                    }
                }
                Err(err) => log::info!("token refresh failed: {}", err),
            }
        }

        storage::clear_tokens();
        self.restoring.set(false);
    }
}

#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let auth = AuthContext::new();
    provide_context(auth);

    Effect::new(move |_| {
        spawn_local(async move {
            auth.restore().await;
        });
    });

    children()
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}
