use super::seat_map::SeatMap;
use super::view_model::BookingViewModel;
use crate::shared::config::use_app_config;
use crate::shared::icons::icon;
use crate::shared::selector_chain::ChainSelect;
use crate::system::auth::context::use_api_client;
use contracts::domain::a007_booking::aggregate::PassengerDto;
use leptos::prelude::*;

#[component]
pub fn BookingDetails() -> impl IntoView {
    let vm = match BookingViewModel::new(use_api_client(), &use_app_config()) {
        Ok(vm) => vm,
        Err(e) => {
            return view! {
                <div class="page">
                    <div class="error">{e.to_string()}</div>
                </div>
            }
            .into_any()
        }
    };

    let passengers = move || {
        vm.draft
            .with(|d| d.as_ref().map(|d| d.passengers().to_vec()).unwrap_or_default())
    };

    view! {
        <div class="page booking-details">
            <div class="header">
                <div class="header__content">
                    {icon("ticket")}
                    <h1 class="header__title">"New booking"</h1>
                </div>
            </div>

            <ChainSelect handle=vm.trip_seat class="chain-select--horizontal" />

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}
            {move || vm.notice.get().map(|n| view! { <div class="notice">{n}</div> })}

            {move || {
                vm.draft.with(|d| {
                    d.as_ref().map(|d| {
                        let trip = d.trip();
                        view! {
                            <div class="booking-details__trip">
                                <strong>{trip.label()}</strong>
                                <span>{format!(" · {:.2} per seat · {} free", trip.price, trip.free_seats())}</span>
                            </div>
                        }
                    })
                })
            }}

            <Show when=move || vm.draft.with(|d| d.is_some())>
                <SeatMap vm=vm />
            </Show>

            <div class="booking-details__passengers">
                <For
                    each=passengers
                    key=|p: &PassengerDto| p.seat_id
                    children=move |p: PassengerDto| {
                        let seat_id = p.seat_id;
                        view! {
                            <div class="passenger-form">
                                <div class="passenger-form__seat">{format!("Seat {}", p.seat_number)}</div>
                                <input
                                    type="text"
                                    placeholder="Full name"
                                    prop:value=p.full_name.clone()
                                    on:input=move |ev| vm.set_passenger_name(seat_id, event_target_value(&ev))
                                />
                                <input
                                    type="tel"
                                    placeholder="Phone"
                                    prop:value=p.phone.clone()
                                    on:input=move |ev| vm.set_passenger_phone(seat_id, event_target_value(&ev))
                                />
                                <input
                                    type="text"
                                    placeholder="Document number"
                                    prop:value=p.document_number.clone().unwrap_or_default()
                                    on:input=move |ev| vm.set_passenger_document(seat_id, event_target_value(&ev))
                                />
                                <button
                                    class="btn btn-secondary"
                                    title="Release seat"
                                    on:click=move |_| vm.toggle_seat(seat_id)
                                >
                                    {icon("x")}
                                </button>
                            </div>
                        }
                    }
                />
            </div>

            <div class="details-actions booking-details__summary">
                <span class="booking-details__total">{move || format!("Total: {:.2}", vm.total())}</span>
                <button
                    class="btn btn-primary"
                    on:click=move |_| vm.submit_command()
                    disabled=move || !vm.can_submit()
                >
                    {icon("ticket")}
                    {move || if vm.saving.get() { "Booking..." } else { "Book" }}
                </button>
            </div>
        </div>
    }
    .into_any()
}
