use crate::domain::a005_route::ui::details::RouteDetails;
use crate::shared::api_utils::LatestRequest;
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::use_app_config;
use crate::shared::icons::icon;
use crate::shared::selector_chain::presets::location_levels;
use crate::shared::selector_chain::{ApiOptionFetcher, ChainHandle, ChainSelect};
use crate::system::auth::context::{use_api_client, use_auth};
use contracts::domain::a005_route::aggregate::Route;
use contracts::domain::common::{AggregateId, OptionItem};
use contracts::shared::list_resource::{ListQuery, ListResource, LocationFilter, Pagination};
use contracts::system::auth::Permission;
use leptos::prelude::*;
use std::rc::Rc;
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
pub struct RouteRow {
    pub id: i64,
    pub origin: String,
    pub destination: String,
    pub price: String,
    pub distance: String,
}

impl From<Route> for RouteRow {
    fn from(r: Route) -> Self {
        Self {
            id: r.id.value(),
            origin: r.origin.display(),
            destination: r.destination.display(),
            price: format!("{:.2}", r.price),
            distance: r
                .distance_km
                .map(|d| format!("{:.0} km", d))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Editor {
    Closed,
    Open(Option<i64>),
}

/// Routes filtered by their origin location
#[component]
pub fn RouteList() -> impl IntoView {
    let config = use_app_config();
    let client = StoredValue::new(use_api_client());
    let auth = use_auth();
    let can_edit = move || auth.get().can(Permission::EditRoutes);

    let items = RwSignal::new(Vec::<RouteRow>::new());
    let error = RwSignal::new(None::<String>);
    let is_loading = RwSignal::new(false);
    let pagination = RwSignal::new(Pagination {
        page: 0,
        page_size: config.page_size,
        total_count: 0,
    });
    let origin_path = RwSignal::new(Vec::<OptionItem>::new());
    let filters_expanded = RwSignal::new(false);
    let editor = RwSignal::new(Editor::Closed);
    let latest = StoredValue::new(LatestRequest::default());

    let fetch = move || {
        let client = client.get_value();
        let filter = LocationFilter::from_path(&origin_path.get_untracked());
        let p = pagination.get_untracked();
        let query = ListQuery {
            page: p.page,
            page_size: p.page_size,
            ..Default::default()
        };
        let mut seq = 0;
        latest.update_value(|l| seq = l.next());
        is_loading.set(true);
        leptos::task::spawn_local(async move {
            let result = client
                .list::<Route>(ListResource::Routes, &query, &filter.params("origin_"))
                .await;
            if latest.try_with_value(|l| l.is_current(seq)) != Some(true) {
                return;
            }
            match result {
                Ok(page) => {
                    items.set(page.items.into_iter().map(Into::into).collect());
                    pagination.update(|p| p.total_count = page.pagination.total_count);
                    error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load routes: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
            is_loading.set(false);
        });
    };

    let origin_filter = match ChainHandle::new(
        location_levels(4),
        Rc::new(ApiOptionFetcher::new(client.get_value())),
        &config,
        Some(Callback::new(move |path: Vec<OptionItem>| {
            origin_path.set(path);
            pagination.update(|p| p.page = 0);
            fetch();
        })),
    ) {
        Ok(handle) => Some(handle),
        Err(e) => {
            error.set(Some(e.to_string()));
            None
        }
    };

    let on_page_change = Callback::new(move |page: usize| {
        pagination.update(|p| p.page = page);
        fetch();
    });
    let on_saved = Callback::new(move |_: ()| {
        editor.set(Editor::Closed);
        fetch();
    });
    let on_cancel = Callback::new(move |_: ()| editor.set(Editor::Closed));

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    {icon("route")}
                    <h1 class="header__title">"Routes"</h1>
                </div>
                <div class="header__actions">
                    <Show when=can_edit>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| editor.set(Editor::Open(None))>
                            {icon("plus")}
                            "New route"
                        </Button>
                    </Show>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| fetch()
                        disabled=Signal::derive(move || is_loading.get())
                    >
                        {icon("refresh")}
                        {move || if is_loading.get() { "Loading..." } else { "Refresh" }}
                    </Button>
                </div>
            </div>

            <FilterPanel
                is_expanded=filters_expanded
                active_filters_count=Signal::derive(move || {
                    LocationFilter::from_path(&origin_path.get()).active_count()
                })
                pagination_controls=move || view! {
                    <PaginationControls pagination=pagination on_page_change=on_page_change />
                }
                filter_content=move || view! {
                    <div class="form-group">
                        <label>"Origin"</label>
                        {origin_filter.map(|handle| view! { <ChainSelect handle=handle /> })}
                    </div>
                }
                filter_tags=move || {
                    origin_path
                        .get()
                        .into_iter()
                        .enumerate()
                        .map(|(level, item)| view! {
                            <FilterTag
                                label=item.label
                                on_remove=Callback::new(move |_: ()| {
                                    if let Some(handle) = origin_filter {
                                        handle.clear(level);
                                    }
                                })
                            />
                        })
                        .collect_view()
                }
            />

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            {move || match editor.get() {
                Editor::Closed => view! { <></> }.into_any(),
                Editor::Open(id) => view! {
                    <RouteDetails id=id on_saved=on_saved on_cancel=on_cancel />
                }
                .into_any(),
            }}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=220.0>"Origin"</TableHeaderCell>
                            <TableHeaderCell min_width=220.0>"Destination"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Price"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Distance"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || items.get()
                            key=|row| row.id
                            children=move |row| {
                                let id = row.id;
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                <a
                                                    href="#"
                                                    class="table__link"
                                                    on:click=move |e| {
                                                        e.prevent_default();
                                                        if can_edit() {
                                                            editor.set(Editor::Open(Some(id)));
                                                        }
                                                    }
                                                >
                                                    {row.origin}
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell><TableCellLayout truncate=true>{row.destination}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{row.price}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{row.distance}</TableCellLayout></TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </div>
        </div>
    }
}
