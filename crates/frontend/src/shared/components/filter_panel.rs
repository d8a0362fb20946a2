use crate::shared::icons::icon;
use leptos::prelude::*;

/// Collapsible filter panel with pagination in the header
#[component]
pub fn FilterPanel(
    /// Whether the filter panel is expanded
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    /// Number of active filters (for badge display)
    #[prop(into)]
    active_filters_count: Signal<usize>,

    /// Pagination controls (children/slot)
    #[prop(into)]
    pagination_controls: ViewFn,

    /// Filter content (form fields)
    #[prop(into)]
    filter_content: ViewFn,

    /// Filter tags (active filter chips) - optional
    #[prop(optional, into)]
    filter_tags: Option<ViewFn>,
) -> impl IntoView {
    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div class="filter-panel-header__left" on:click=toggle_expanded>
                    <span class=move || {
                        if is_expanded.get() {
                            "filter-panel__chevron filter-panel__chevron--expanded"
                        } else {
                            "filter-panel__chevron"
                        }
                    }>
                        {icon("chevron-right")}
                    </span>
                    {icon("filter")}
                    <span class="filter-panel__title">"Filters"</span>
                    {move || {
                        let count = active_filters_count.get();
                        (count > 0).then(|| view! { <span class="badge badge--primary">{count}</span> })
                    }}
                </div>
                <div class="filter-panel-header__center">
                    {pagination_controls.run()}
                </div>
            </div>

            // Kept mounted while collapsed so the chain state survives toggling
            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">
                    {filter_content.run()}
                    {filter_tags.map(|tags| view! { <div class="filter-panel__tags">{move || tags.run()}</div> })}
                </div>
            </div>
        </div>
    }
}

/// Active filter chip with a remove button
#[component]
pub fn FilterTag(
    #[prop(into)]
    label: String,

    /// Callback when remove is clicked
    on_remove: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <span
                class="filter-tag__remove"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                {icon("x")}
            </span>
        </div>
    }
}
