use super::model;
use contracts::domain::a005_route::aggregate::{EndpointDto, RouteDto};
use contracts::domain::common::OptionItem;
use leptos::prelude::*;
use std::rc::Rc;

use crate::shared::api_client::ApiClient;
use crate::shared::config::AppConfig;
use crate::shared::selector_chain::presets::location_levels;
use crate::shared::selector_chain::{ApiOptionFetcher, ChainError, ChainHandle};

/// ViewModel for the Route details form.
///
/// Origin and destination are two independent four-level chains; each one
/// writes its ids into the matching half of the form.
#[derive(Clone, Copy)]
pub struct RouteDetailsViewModel {
    pub form: RwSignal<RouteDto>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    /// Raw input of the numeric fields, kept so a typo is reported as such
    pub price_text: RwSignal<String>,
    pub distance_text: RwSignal<String>,
    pub origin: ChainHandle,
    pub destination: ChainHandle,
    client: StoredValue<ApiClient>,
}

impl RouteDetailsViewModel {
    pub fn new(client: ApiClient, config: &AppConfig) -> Result<Self, ChainError> {
        let form = RwSignal::new(RouteDto::default());
        let fetcher = Rc::new(ApiOptionFetcher::new(client.clone()));

        let origin = ChainHandle::new(
            location_levels(4),
            fetcher.clone(),
            config,
            Some(Callback::new(move |path: Vec<OptionItem>| {
                form.update(|f| f.origin = EndpointDto::from_path(&path));
            })),
        )?;
        let destination = ChainHandle::new(
            location_levels(4),
            fetcher,
            config,
            Some(Callback::new(move |path: Vec<OptionItem>| {
                form.update(|f| f.destination = EndpointDto::from_path(&path));
            })),
        )?;

        Ok(Self {
            form,
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            price_text: RwSignal::new(String::new()),
            distance_text: RwSignal::new(String::new()),
            origin,
            destination,
            client: StoredValue::new(client),
        })
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    pub fn is_form_valid(&self) -> bool {
        self.validation_hint().is_none()
    }

    /// First validation problem, shown under the form while editing
    pub fn validation_hint(&self) -> Option<String> {
        self.input_error()
            .or_else(|| self.form.with(|f| f.validate().err()))
    }

    fn input_error(&self) -> Option<String> {
        self.price_text
            .with(|raw| parse_number(raw, "Price").err())
            .or_else(|| self.distance_text.with(|raw| parse_number(raw, "Distance").err()))
    }

    pub fn load_if_needed(&self, id: Option<i64>) {
        let Some(id) = id else {
            return;
        };
        let vm = *self;
        let client = self.client.get_value();
        leptos::task::spawn_local(async move {
            match model::fetch_by_id(&client, id).await {
                Ok(route) => {
                    vm.price_text.set(route.price.to_string());
                    vm.distance_text
                        .set(route.distance_km.map(|d| d.to_string()).unwrap_or_default());
                    vm.form.set(RouteDto::from(&route));
                    vm.origin.hydrate(route.origin.path());
                    vm.destination.hydrate(route.destination.path());
                }
                Err(e) => vm.error.set(Some(format!("Failed to load route: {}", e))),
            }
        });
    }

    pub fn set_price(&self, raw: String) {
        let price = parse_number(&raw, "Price").ok().flatten().unwrap_or(0.0);
        self.price_text.set(raw);
        self.form.update(|f| f.price = price);
    }

    pub fn set_distance(&self, raw: String) {
        let distance = parse_number(&raw, "Distance").ok().flatten();
        self.distance_text.set(raw);
        self.form.update(|f| f.distance_km = distance);
    }

    pub fn save_command(&self, on_saved: Callback<()>) {
        if let Some(e) = self.input_error() {
            self.error.set(Some(e));
            return;
        }
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
                    vm.origin.reset();
                    vm.destination.reset();
                    on_saved.run(());
                }
                Err(e) => {
                    vm.saving.set(false);
                    vm.error.set(Some(e));
                }
            }
        });
    }

    pub fn delete_command(&self, on_saved: Callback<()>) {
        let Some(id) = self.form.with_untracked(|f| f.id) else {
            return;
        };
        let vm = *self;
        let client = self.client.get_value();
        leptos::task::spawn_local(async move {
            match model::delete(&client, id).await {
                Ok(()) => on_saved.run(()),
                Err(e) => vm.error.set(Some(format!("Failed to delete route: {}", e))),
            }
        });
    }
}

/// Numeric form field; blank means "not set"
fn parse_number(raw: &str, field: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.replace(',', ".").parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(format!("{} must be a number", field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("", "Price"), Ok(None));
        assert_eq!(parse_number(" 12.5 ", "Price"), Ok(Some(12.5)));
        assert_eq!(parse_number("12,5", "Price"), Ok(Some(12.5)));
    }

    #[test]
    fn test_typo_is_reported_as_parse_error() {
        assert_eq!(
            parse_number("12a", "Price"),
            Err("Price must be a number".to_string())
        );
        assert!(parse_number("inf", "Distance").is_err());
    }
}
