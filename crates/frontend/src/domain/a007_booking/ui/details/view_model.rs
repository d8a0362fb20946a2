use super::draft::BookingDraft;
use super::model;
use contracts::domain::a006_trip::aggregate::SeatId;
use contracts::domain::common::OptionItem;
use leptos::prelude::*;
use std::rc::Rc;

use crate::shared::api_client::ApiClient;
use crate::shared::config::AppConfig;
use crate::shared::selector_chain::presets::trip_seat_levels;
use crate::shared::selector_chain::{ApiOptionFetcher, ChainError, ChainHandle};

/// ViewModel for the booking screen.
///
/// The trip → seat chain drives everything: a trip selection loads the trip
/// into a fresh draft, a seat selection toggles that seat.
#[derive(Clone, Copy)]
pub struct BookingViewModel {
    pub draft: RwSignal<Option<BookingDraft>>,
    pub error: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    pub trip_seat: ChainHandle,
    /// Trip whose details were requested last
    loading_trip: RwSignal<Option<i64>>,
    client: StoredValue<ApiClient>,
}

impl BookingViewModel {
    pub fn new(client: ApiClient, config: &AppConfig) -> Result<Self, ChainError> {
        let draft = RwSignal::new(None::<BookingDraft>);
        let error = RwSignal::new(None::<String>);
        let notice = RwSignal::new(None::<String>);
        let loading_trip = RwSignal::new(None::<i64>);
        let client = StoredValue::new(client);

        let on_path = Callback::new(move |path: Vec<OptionItem>| {
            let trip_id = path.first().map(|t| t.id);
            if trip_id != loading_trip.get_untracked() {
                Self::load_trip(draft, error, loading_trip, client, trip_id);
            }
            if let Some(seat) = path.get(1) {
                Self::toggle(draft, error, SeatId(seat.id));
            }
        });

        Ok(Self {
            draft,
            error,
            notice,
            saving: RwSignal::new(false),
            trip_seat: ChainHandle::new(
                trip_seat_levels(),
                Rc::new(ApiOptionFetcher::new(client.get_value())),
                config,
                Some(on_path),
            )?,
            loading_trip,
            client,
        })
    }

    pub fn toggle_seat(&self, seat_id: SeatId) {
        self.notice.set(None);
        Self::toggle(self.draft, self.error, seat_id);
    }

    pub fn set_passenger_name(&self, seat_id: SeatId, value: String) {
        self.draft.update(|d| {
            if let Some(d) = d {
                d.update_passenger(seat_id, |p| p.full_name = value);
            }
        });
    }

    pub fn set_passenger_phone(&self, seat_id: SeatId, value: String) {
        self.draft.update(|d| {
            if let Some(d) = d {
                d.update_passenger(seat_id, |p| p.phone = value);
            }
        });
    }

    pub fn set_passenger_document(&self, seat_id: SeatId, value: String) {
        self.draft.update(|d| {
            if let Some(d) = d {
                d.update_passenger(seat_id, |p| {
                    p.document_number = if value.is_empty() { None } else { Some(value) };
                });
            }
        });
    }

    pub fn total(&self) -> f64 {
        self.draft.with(|d| d.as_ref().map(BookingDraft::total).unwrap_or(0.0))
    }

    pub fn can_submit(&self) -> bool {
        !self.saving.get()
            && self
                .draft
                .with(|d| d.as_ref().is_some_and(|d| d.to_dto().is_ok()))
    }

    pub fn submit_command(&self) {
        let Some(draft) = self.draft.get_untracked() else {
            return;
        };
        let dto = match draft.to_dto() {
            Ok(dto) => dto,
            Err(e) => {
                self.error.set(Some(e));
                return;
            }
        };

        let vm = *self;
        let client = self.client.get_value();
        vm.saving.set(true);
        vm.error.set(None);
        leptos::task::spawn_local(async move {
            match model::create_booking(&client, &dto).await {
                Ok(()) => {
                    log::info!(
                        "booking created: trip {} seats {}",
                        dto.trip_id.0,
                        dto.passengers.len()
                    );
                    vm.notice.set(Some(format!(
                        "Booked {} seat(s), total {:.2}",
                        dto.passengers.len(),
                        dto.total
                    )));
                    // Refresh seat statuses
                    Self::load_trip(vm.draft, vm.error, vm.loading_trip, vm.client, Some(dto.trip_id.0));
                }
                Err(e) => vm.error.set(Some(e)),
            }
            vm.saving.set(false);
        });
    }

    fn toggle(draft: RwSignal<Option<BookingDraft>>, error: RwSignal<Option<String>>, seat_id: SeatId) {
        let result = draft.try_update(|d| match d {
            Some(d) => d.toggle_seat(seat_id).map(|_| ()),
            None => Err("Select a trip first".to_string()),
        });
        match result {
            Some(Err(e)) => error.set(Some(e)),
            Some(Ok(())) => error.set(None),
            None => {}
        }
    }

    fn load_trip(
        draft: RwSignal<Option<BookingDraft>>,
        error: RwSignal<Option<String>>,
        loading_trip: RwSignal<Option<i64>>,
        client: StoredValue<ApiClient>,
        trip_id: Option<i64>,
    ) {
        loading_trip.set(trip_id);
        draft.set(None);
        let Some(id) = trip_id else {
            return;
        };
        let Some(client) = client.try_get_value() else {
            return;
        };
        leptos::task::spawn_local(async move {
            let result = model::fetch_trip(&client, id).await;
            // A newer trip selection supersedes this response
            if loading_trip.try_get_untracked() != Some(Some(id)) {
                return;
            }
            match result {
                Ok(trip) => draft.set(Some(BookingDraft::new(trip))),
                Err(e) => error.set(Some(format!("Failed to load trip: {}", e))),
            }
        });
    }
}
