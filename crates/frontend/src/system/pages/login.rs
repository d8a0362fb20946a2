use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::config::use_app_config;
use crate::system::auth::context::{use_auth, AuthState};
use crate::system::auth::{api, storage};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let auth_state = use_auth();
    let config = use_app_config();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get();
        let password_val = password.get();
        let api_base = config.api_base.clone();

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match api::login(&api_base, username_val, password_val).await {
                Ok(response) => {
                    storage::save_access_token(&response.access_token);
                    // Switches the shell to the main layout
                    auth_state.set(AuthState {
                        access_token: Some(response.access_token),
                        user_info: Some(response.user),
                    });
                }
                Err(e) => set_error_message.set(Some(e)),
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Bus Console"</h1>
                <h2>"Sign in"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input
                            type="text"
                            id="username"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                        {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
