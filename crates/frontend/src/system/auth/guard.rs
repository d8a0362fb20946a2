use contracts::system::auth::Permission;
use leptos::prelude::*;

use super::context::use_auth;

/// Component that requires a permission.
/// Shows fallback if the current role lacks it.
#[component]
pub fn RequirePermission(permission: Permission, children: ChildrenFn) -> impl IntoView {
    let auth_state = use_auth();

    view! {
        <Show
            when=move || auth_state.get().can(permission)
            fallback=|| view! { <div class="warning-box">"Access denied for your role."</div> }
        >
            {children()}
        </Show>
    }
}
