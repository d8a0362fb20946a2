use super::view_model::RouteDetailsViewModel;
use crate::shared::config::use_app_config;
use crate::shared::icons::icon;
use crate::shared::selector_chain::ChainSelect;
use crate::system::auth::context::use_api_client;
use leptos::prelude::*;

#[component]
pub fn RouteDetails(
    id: Option<i64>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = match RouteDetailsViewModel::new(use_api_client(), &use_app_config()) {
        Ok(vm) => vm,
        Err(e) => {
            return view! {
                <div class="details-container">
                    <div class="error">{e.to_string()}</div>
                </div>
            }
            .into_any()
        }
    };
    vm.load_if_needed(id);

    let on_cancel = move |_| {
        vm.origin.reset();
        vm.destination.reset();
        on_cancel.run(());
    };

    view! {
        <div class="details-container route-details">
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Edit route" } else { "New route" }}</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form route-details__endpoints">
                <fieldset class="route-details__endpoint">
                    <legend>"Origin"</legend>
                    <ChainSelect handle=vm.origin class="chain-select--vertical" />
                </fieldset>
                <fieldset class="route-details__endpoint">
                    <legend>"Destination"</legend>
                    <ChainSelect handle=vm.destination class="chain-select--vertical" />
                </fieldset>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label for="route_price">"Price"</label>
                    <input
                        type="number"
                        id="route_price"
                        min="0"
                        step="0.01"
                        prop:value=move || vm.price_text.get()
                        on:input=move |ev| vm.set_price(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="route_distance">"Distance, km"</label>
                    <input
                        type="number"
                        id="route_distance"
                        min="0"
                        prop:value=move || vm.distance_text.get()
                        on:input=move |ev| vm.set_distance(event_target_value(&ev))
                    />
                </div>
            </div>

            {move || vm.validation_hint().map(|hint| view! { <div class="form-hint">{hint}</div> })}

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| vm.save_command(on_saved)
                    disabled=move || !vm.is_form_valid() || vm.saving.get()
                >
                    {icon("save")}
                    {move || if vm.is_edit_mode() { "Save" } else { "Create" }}
                </button>
                <Show when=move || vm.is_edit_mode()>
                    <button class="btn btn-danger" on:click=move |_| vm.delete_command(on_saved)>
                        "Delete"
                    </button>
                </Show>
                <button class="btn btn-secondary" on:click=on_cancel>
                    {icon("x")}
                    "Cancel"
                </button>
            </div>
        </div>
    }
    .into_any()
}
