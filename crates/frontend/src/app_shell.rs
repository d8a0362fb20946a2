//! Application shell: auth gate plus the tabbed console layout.

use crate::domain::a004_station::ui::list::StationList;
use crate::domain::a005_route::ui::list::RouteList;
use crate::domain::a007_booking::ui::details::BookingDetails;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use crate::system::auth::guard::RequirePermission;
use crate::system::pages::login::LoginPage;
use contracts::system::auth::Permission;
use leptos::prelude::*;
use thaw::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    Stations,
    Routes,
    Booking,
}

impl Screen {
    const ALL: [Screen; 3] = [Screen::Stations, Screen::Routes, Screen::Booking];

    fn title(&self) -> &'static str {
        match self {
            Screen::Stations => "Stations",
            Screen::Routes => "Routes",
            Screen::Booking => "Booking",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Screen::Stations => "map-pin",
            Screen::Routes => "route",
            Screen::Booking => "ticket",
        }
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    let auth_state = use_auth();
    let active = RwSignal::new(Screen::Stations);

    let user_name = move || {
        auth_state.with(|s| {
            s.user_info
                .as_ref()
                .map(|u| u.full_name.clone().unwrap_or_else(|| u.username.clone()))
                .unwrap_or_default()
        })
    };

    view! {
        <div class="app-layout">
            <nav class="app-nav">
                <div class="app-nav__brand">
                    {icon("bus")}
                    <span>"Bus Console"</span>
                </div>
                <div class="app-nav__tabs">
                    {Screen::ALL
                        .into_iter()
                        .map(|screen| view! {
                            <button
                                class=move || {
                                    if active.get() == screen {
                                        "app-nav__tab app-nav__tab--active"
                                    } else {
                                        "app-nav__tab"
                                    }
                                }
                                on:click=move |_| active.set(screen)
                            >
                                {icon(screen.icon())}
                                {screen.title()}
                            </button>
                        })
                        .collect_view()}
                </div>
                <div class="app-nav__user">
                    <span>{user_name}</span>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| do_logout(auth_state)>
                        "Sign out"
                    </Button>
                </div>
            </nav>

            // Each screen owns its selector chains; switching tabs disposes them
            <main class="app-content">
                {move || match active.get() {
                    Screen::Stations => view! {
                        <RequirePermission permission=Permission::ViewStations>
                            <StationList />
                        </RequirePermission>
                    }
                    .into_any(),
                    Screen::Routes => view! {
                        <RequirePermission permission=Permission::ViewRoutes>
                            <RouteList />
                        </RequirePermission>
                    }
                    .into_any(),
                    Screen::Booking => view! {
                        <RequirePermission permission=Permission::CreateBookings>
                            <BookingDetails />
                        </RequirePermission>
                    }
                    .into_any(),
                }}
            </main>
        </div>
    }
}

/// Shows `LoginPage` until a session exists, then the console
#[component]
pub fn AppShell() -> impl IntoView {
    let auth_state = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_authenticated()
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
