use contracts::domain::common::OptionItem;
use leptos::html::Div;
use leptos::prelude::*;

use super::binding::ChainHandle;
use crate::shared::icons::icon;
use crate::shared::outside_click::use_outside_click;

/// Renders every level of a chain as a searchable dropdown
#[component]
pub fn ChainSelect(
    handle: ChainHandle,
    /// Extra class for the wrapping row (e.g. "chain-select--vertical")
    #[prop(optional, into)]
    class: String,
) -> impl IntoView {
    let levels = (0..handle.len())
        .map(|index| view! { <ChainLevel handle=handle index=index /> })
        .collect_view();

    view! {
        <div class=format!("chain-select {}", class)>
            {levels}
        </div>
    }
}

#[component]
fn ChainLevel(handle: ChainHandle, index: usize) -> impl IntoView {
    let region = NodeRef::<Div>::new();
    use_outside_click(region, move || handle.outside_click(index));

    let level = Memo::new(move |_| handle.view(index));
    let title = move || level.get().map(|v| v.title).unwrap_or_default();
    let text = move || level.get().map(|v| v.search_text).unwrap_or_default();
    let enabled = move || level.get().map(|v| v.enabled).unwrap_or(false);
    let has_selection = move || level.get().and_then(|v| v.selected).is_some();

    let options = move || {
        let Some(lv) = level.get() else {
            return view! { <></> }.into_any();
        };
        if !lv.is_open {
            return view! { <></> }.into_any();
        }
        if lv.is_loading {
            return view! { <div class="chain-select__status">"Loading..."</div> }.into_any();
        }
        if let Some(err) = lv.error {
            return view! {
                <div class="chain-select__status chain-select__status--error">{err}</div>
            }
            .into_any();
        }
        if lv.options.is_empty() {
            return view! { <div class="chain-select__status">"No matches"</div> }.into_any();
        }

        let selected_id = lv.selected.as_ref().map(|s| s.id);
        view! {
            <ul class="chain-select__options">
                {lv
                    .options
                    .into_iter()
                    .map(|option: OptionItem| {
                        let is_selected = selected_id == Some(option.id);
                        let label = option.label.clone();
                        let class = if is_selected {
                            "chain-select__option chain-select__option--selected"
                        } else {
                            "chain-select__option"
                        };
                        view! {
                            <li
                                class=class
                                on:mousedown=move |_| handle.select(index, option.clone())
                            >
                                {label}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        }
        .into_any()
    };

    view! {
        <div class="chain-select__level" node_ref=region>
            <label class="form__label">{title}</label>
            <div class="chain-select__input-row">
                <input
                    type="text"
                    class="form__input"
                    prop:value=text
                    disabled=move || !enabled()
                    placeholder="Search..."
                    on:focus=move |_| handle.focus(index)
                    on:input=move |ev| handle.text_change(index, event_target_value(&ev))
                />
                <Show when=has_selection>
                    <button
                        class="button button--ghost button--small"
                        title="Clear"
                        on:click=move |_| handle.clear(index)
                    >
                        {icon("x")}
                    </button>
                </Show>
            </div>
            {options}
        </div>
    }
}
