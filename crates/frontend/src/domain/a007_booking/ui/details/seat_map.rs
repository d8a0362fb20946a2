use super::draft::SeatCell;
use super::view_model::BookingViewModel;
use contracts::domain::a006_trip::aggregate::SeatStatus;
use leptos::prelude::*;

fn seat_class(status: SeatStatus, selected: bool) -> &'static str {
    match (status, selected) {
        (_, true) => "seat seat--selected",
        (SeatStatus::Available, false) => "seat seat--free",
        (SeatStatus::Reserved, false) => "seat seat--reserved",
        (SeatStatus::Booked, false) => "seat seat--booked",
    }
}

/// Bus layout of the loaded trip; free seats toggle on click
#[component]
pub fn SeatMap(vm: BookingViewModel) -> impl IntoView {
    let rows = move || {
        vm.draft
            .with(|d| d.as_ref().map(|d| d.rows()).unwrap_or_default())
    };

    view! {
        <div class="seat-map">
            <div class="seat-map__legend">
                <span class="seat seat--free">"Free"</span>
                <span class="seat seat--selected">"Selected"</span>
                <span class="seat seat--reserved">"Reserved"</span>
                <span class="seat seat--booked">"Booked"</span>
            </div>
            <div class="seat-map__grid">
                {move || {
                    rows()
                        .into_iter()
                        .map(|row| {
                            let cells = row
                                .into_iter()
                                .map(|cell| match cell {
                                    SeatCell::Seat { id, number, status, selected } => {
                                        let locked = !status.is_free() && !selected;
                                        view! {
                                            <button
                                                class=seat_class(status, selected)
                                                disabled=locked
                                                on:click=move |_| vm.toggle_seat(id)
                                            >
                                                {number}
                                            </button>
                                        }
                                        .into_any()
                                    }
                                    SeatCell::Aisle => view! { <span class="seat-map__aisle"></span> }.into_any(),
                                    SeatCell::Empty => view! { <span class="seat-map__empty"></span> }.into_any(),
                                })
                                .collect_view();
                            view! { <div class="seat-map__row">{cells}</div> }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
