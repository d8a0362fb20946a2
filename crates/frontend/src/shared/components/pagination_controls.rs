use crate::shared::icons::icon;
use contracts::shared::list_resource::Pagination;
use leptos::prelude::*;

/// Prev/next pagination driven by the list endpoint's `Pagination` block
#[component]
pub fn PaginationControls(
    #[prop(into)]
    pagination: Signal<Pagination>,

    /// Called with the new zero-based page
    on_page_change: Callback<usize>,
) -> impl IntoView {
    let page = move || pagination.get().page;
    let total_pages = move || pagination.get().total_pages();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| {
                    if page() > 0 {
                        on_page_change.run(page() - 1);
                    }
                }
                disabled=move || page() == 0
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    let p = pagination.get();
                    format!("{} / {} ({})", p.page + 1, p.total_pages().max(1), p.total_count)
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    if page() + 1 < total_pages() {
                        on_page_change.run(page() + 1);
                    }
                }
                disabled=move || page() + 1 >= total_pages()
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
        </div>
    }
}
