use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Calls `on_outside` once for every pointer press that lands outside `region`.
///
/// The window listener lives as long as the calling component and is removed
/// on cleanup.
pub fn use_outside_click(region: NodeRef<Div>, on_outside: impl Fn() + 'static) {
    let handle = window_event_listener(ev::mousedown, move |event| {
        let Some(region) = region.get_untracked() else {
            return;
        };
        let target = event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        if !region.contains(target.as_ref()) {
            on_outside();
        }
    });
    on_cleanup(move || handle.remove());
}
