use crate::domain::a004_station::ui::details::StationDetails;
use crate::shared::api_utils::LatestRequest;
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::use_app_config;
use crate::shared::icons::icon;
use crate::shared::selector_chain::presets::location_levels;
use crate::shared::selector_chain::{ApiOptionFetcher, ChainHandle, ChainSelect};
use crate::system::auth::context::{use_api_client, use_auth};
use contracts::domain::a004_station::aggregate::Station;
use contracts::domain::common::{AggregateId, OptionItem};
use contracts::shared::list_resource::{ListQuery, ListResource, LocationFilter, Pagination};
use contracts::system::auth::Permission;
use leptos::prelude::*;
use std::rc::Rc;
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
pub struct StationRow {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub address: String,
}

impl From<Station> for StationRow {
    fn from(s: Station) -> Self {
        Self {
            id: s.id.value(),
            name: s.name,
            city: s.city.label,
            province: s.province.label,
            country: s.country.label,
            address: s.address.unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Editor state: closed, creating, or editing an existing id
#[derive(Clone, Copy, Debug, PartialEq)]
enum Editor {
    Closed,
    Open(Option<i64>),
}

#[component]
pub fn StationList() -> impl IntoView {
    let config = use_app_config();
    let client = StoredValue::new(use_api_client());
    let auth = use_auth();
    let can_edit = move || auth.get().can(Permission::EditStations);

    let items = RwSignal::new(Vec::<StationRow>::new());
    let error = RwSignal::new(None::<String>);
    let pagination = RwSignal::new(Pagination {
        page: 0,
        page_size: config.page_size,
        total_count: 0,
    });
    let filter_path = RwSignal::new(Vec::<OptionItem>::new());
    let filters_expanded = RwSignal::new(true);
    let editor = RwSignal::new(Editor::Closed);
    let latest = StoredValue::new(LatestRequest::default());

    let fetch = move || {
        let client = client.get_value();
        let filter = LocationFilter::from_path(&filter_path.get_untracked());
        let p = pagination.get_untracked();
        let query = ListQuery {
            page: p.page,
            page_size: p.page_size,
            ..Default::default()
        };
        let mut seq = 0;
        latest.update_value(|l| seq = l.next());
        leptos::task::spawn_local(async move {
            let result = client
                .list::<Station>(ListResource::Stations, &query, &filter.params(""))
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
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    let filter_chain = match ChainHandle::new(
        location_levels(3),
        Rc::new(ApiOptionFetcher::new(client.get_value())),
        &config,
        Some(Callback::new(move |path: Vec<OptionItem>| {
            filter_path.set(path);
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
                    {icon("map-pin")}
                    <h1 class="header__title">"Stations"</h1>
                </div>
                <div class="header__actions">
                    <Show when=can_edit>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| editor.set(Editor::Open(None))>
                            {icon("plus")}
                            "New station"
                        </Button>
                    </Show>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                        {icon("refresh")}
                        "Refresh"
                    </Button>
                </div>
            </div>

            <FilterPanel
                is_expanded=filters_expanded
                active_filters_count=Signal::derive(move || filter_path.get().len())
                pagination_controls=move || view! {
                    <PaginationControls pagination=pagination on_page_change=on_page_change />
                }
                filter_content=move || filter_chain.map(|handle| view! { <ChainSelect handle=handle /> })
                filter_tags=move || {
                    filter_path
                        .get()
                        .into_iter()
                        .enumerate()
                        .map(|(level, item)| view! {
                            <FilterTag
                                label=item.label
                                on_remove=Callback::new(move |_: ()| {
                                    if let Some(handle) = filter_chain {
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
                    <StationDetails id=id on_saved=on_saved on_cancel=on_cancel />
                }
                .into_any(),
            }}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=200.0>"Name"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"City"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"Province"</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Country"</TableHeaderCell>
                            <TableHeaderCell>"Address"</TableHeaderCell>
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
                                                    {row.name}
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell><TableCellLayout truncate=true>{row.city}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout truncate=true>{row.province}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout truncate=true>{row.country}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout truncate=true>{row.address}</TableCellLayout></TableCell>
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
