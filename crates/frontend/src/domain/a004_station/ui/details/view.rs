use super::view_model::StationDetailsViewModel;
use crate::shared::config::use_app_config;
use crate::shared::icons::icon;
use crate::shared::selector_chain::ChainSelect;
use crate::system::auth::context::use_api_client;
use leptos::prelude::*;

#[component]
pub fn StationDetails(
    id: Option<i64>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = match StationDetailsViewModel::new(use_api_client(), &use_app_config()) {
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
        vm.location.reset();
        on_cancel.run(());
    };

    view! {
        <div class="details-container station-details">
            <div class="details-header">
                <h3>{move || if vm.is_edit_mode() { "Edit station" } else { "New station" }}</h3>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="station_name">"Name"</label>
                    <input
                        type="text"
                        id="station_name"
                        prop:value=move || vm.form.get().name
                        on:input=move |ev| vm.form.update(|f| f.name = event_target_value(&ev))
                        placeholder="Kabul Central Terminal"
                    />
                </div>

                <div class="form-group">
                    <label for="station_address">"Address"</label>
                    <input
                        type="text"
                        id="station_address"
                        prop:value=move || vm.form.get().address.unwrap_or_default()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.form.update(|f| {
                                f.address = if value.is_empty() { None } else { Some(value) };
                            });
                        }
                    />
                </div>

                <ChainSelect handle=vm.location class="chain-select--vertical" />
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| vm.save_command(on_saved)
                    disabled=move || !vm.is_form_valid() || vm.saving.get()
                >
                    {icon("save")}
                    {move || if vm.is_edit_mode() { "Save" } else { "Create" }}
                </button>
                <button class="btn btn-secondary" on:click=on_cancel>
                    {icon("x")}
                    "Cancel"
                </button>
            </div>
        </div>
    }
    .into_any()
}
