use crate::app_shell::AppShell;
use crate::shared::config::AppConfig;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Read once; every ApiClient and selector chain takes its settings from here
    provide_context(AppConfig::from_window());

    view! {
        <AuthProvider>
            <AppShell />
        </AuthProvider>
    }
}
