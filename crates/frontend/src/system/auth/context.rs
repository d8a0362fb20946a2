use contracts::system::auth::{Permission, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::shared::api_client::ApiClient;
use crate::shared::config::use_app_config;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn can(&self, permission: Permission) -> bool {
        self.user_info
            .as_ref()
            .map(|u| u.role.allows(permission))
            .unwrap_or(false)
    }
}

/// Auth context provider component.
///
/// Only this provider touches token storage; everything downstream receives
/// the token through `AuthState` / `use_api_client`.
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let auth_state = RwSignal::new(AuthState::default());
    let config = use_app_config();

    // Try to restore session from localStorage on mount
    if let Some(access_token) = storage::get_access_token() {
        spawn_local(async move {
            match api::get_current_user(&config.api_base, &access_token).await {
                Ok(user_info) => auth_state.set(AuthState {
                    access_token: Some(access_token),
                    user_info: Some(user_info),
                }),
                Err(e) => {
                    log::info!("stored session rejected: {}", e);
                    storage::clear_tokens();
                }
            }
        });
    }

    provide_context(auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> RwSignal<AuthState> {
    use_context::<RwSignal<AuthState>>().expect("AuthProvider not found in component tree")
}

/// API client carrying the current session's token
pub fn use_api_client() -> ApiClient {
    let config = use_app_config();
    let token = use_auth().get_untracked().access_token;
    ApiClient::new(&config, token)
}

/// Helper: Perform logout
pub fn do_logout(auth_state: RwSignal<AuthState>) {
    storage::clear_tokens();
    auth_state.set(AuthState::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::auth::UserRole;

    fn state(role: UserRole) -> AuthState {
        AuthState {
            access_token: Some("token".into()),
            user_info: Some(UserInfo {
                id: "1".into(),
                username: "agent".into(),
                full_name: None,
                role,
                branch_id: None,
            }),
        }
    }

    #[test]
    fn test_permissions_follow_role() {
        assert!(state(UserRole::Admin).can(Permission::EditStations));
        assert!(!state(UserRole::Agent).can(Permission::EditRoutes));
        assert!(!AuthState::default().can(Permission::ViewRoutes));
        assert!(!AuthState::default().is_authenticated());
    }

    #[test]
    fn test_logout_state_differs_from_session() {
        assert_ne!(state(UserRole::Agent), AuthState::default());
        assert_eq!(state(UserRole::Agent), state(UserRole::Agent));
    }
}
