use leptos::prelude::*;

use super::api_utils::api_base;
use super::selector_chain::DEFAULT_DEBOUNCE_MS;

const API_BASE_META: &str = "meta[name='api-base']";

/// Console-wide settings, provided through context by `App`
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    /// Quiescence window before a search-driven refetch
    pub debounce_ms: u32,
    /// Page size for option lists and tables
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            page_size: 50,
        }
    }
}

impl AppConfig {
    /// Reads `<meta name="api-base" content="...">` if the page has one,
    /// otherwise targets port 3000 on the current host.
    pub fn from_window() -> Self {
        let api_base = meta_api_base().unwrap_or_else(api_base);
        log::debug!("api base: {}", api_base);
        Self {
            api_base,
            ..Default::default()
        }
    }
}

fn meta_api_base() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let meta = document.query_selector(API_BASE_META).ok()??;
    let content = meta.get_attribute("content")?;
    let content = content.trim();
    (!content.is_empty()).then(|| content.to_string())
}

/// Config from context, falling back to defaults outside `App`
pub fn use_app_config() -> AppConfig {
    use_context::<AppConfig>().unwrap_or_else(AppConfig::from_window)
}
