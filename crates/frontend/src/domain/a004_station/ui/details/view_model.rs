use super::model;
use contracts::domain::a004_station::aggregate::StationDto;
use contracts::domain::common::OptionItem;
use leptos::prelude::*;
use std::rc::Rc;

use crate::shared::api_client::ApiClient;
use crate::shared::config::AppConfig;
use crate::shared::selector_chain::presets::location_levels;
use crate::shared::selector_chain::{ApiOptionFetcher, ChainError, ChainHandle};

/// ViewModel for the Station details form
#[derive(Clone, Copy)]
pub struct StationDetailsViewModel {
    pub form: RwSignal<StationDto>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    /// Country → province → city
    pub location: ChainHandle,
    client: StoredValue<ApiClient>,
}

impl StationDetailsViewModel {
    pub fn new(client: ApiClient, config: &AppConfig) -> Result<Self, ChainError> {
        let form = RwSignal::new(StationDto::default());
        let fetcher = Rc::new(ApiOptionFetcher::new(client.clone()));
        let on_path = Callback::new(move |path: Vec<OptionItem>| {
            form.update(|f| f.apply_location_path(&path));
        });

        Ok(Self {
            form,
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            location: ChainHandle::new(location_levels(3), fetcher, config, Some(on_path))?,
            client: StoredValue::new(client),
        })
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    pub fn is_form_valid(&self) -> bool {
        self.form.with(|f| f.validate().is_ok())
    }

    /// Load the station and hydrate the location chain from its path
    pub fn load_if_needed(&self, id: Option<i64>) {
        let Some(id) = id else {
            return;
        };
        let vm = *self;
        let client = self.client.get_value();
        leptos::task::spawn_local(async move {
            match model::fetch_by_id(&client, id).await {
                Ok(station) => {
                    vm.form.set(StationDto::from(&station));
                    vm.location.hydrate(station.location_path());
                }
                Err(e) => vm.error.set(Some(format!("Failed to load station: {}", e))),
            }
        });
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        let current = self.form.get();
        if let Err(e) = current.validate() {
            self.error.set(Some(e));
            return;
        }

        let vm = *self;
        let client = self.client.get_value();
        vm.saving.set(true);
        leptos::task::spawn_local(async move {
            match model::save_form(&client, &current).await {
                Ok(()) => {
                    vm.saving.set(false);
                    vm.location.reset();
                    on_saved.run(());
                }
                Err(e) => {
                    vm.saving.set(false);
                    vm.error.set(Some(e));
                }
            }
        });
    }
}
