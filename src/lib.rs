mod app;
pub mod channel;
pub mod command;
pub mod config;
pub mod detector;
pub mod dom;
pub mod engine;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod selection;
pub mod splicer;
pub mod store;
pub mod target;
pub mod view;

#[cfg(test)]
mod testing;

use leptos::prelude::*;
use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::EngineConfig;
use crate::store::BrowserStore;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_bindgen_futures::spawn_local(async {
        let config = BrowserStore.load_config().await;
        let log_level = config
            .as_ref()
            .map(|config| config.log_level.clone())
            .unwrap_or_else(|_| EngineConfig::default().log_level);
        logging::init(&log_level);

        let config = config.unwrap_or_else(|err| {
            warn!(error = %err, "using default settings");
            EngineConfig::default()
        });
        if let Err(err) = mount(config) {
            warn!(error = %err, "could not mount slash command list");
        }
    });
}

fn mount(config: EngineConfig) -> error::Result<()> {
    let document = document();
    let body = document
        .body()
        .ok_or_else(|| error::SlasherError::Js("page has no body".to_string()))?;
    let wrapper: web_sys::HtmlElement = document.create_element("div")?.unchecked_into();
    wrapper.set_id("slasher-app");
    body.prepend_with_node_1(&wrapper)?;

    leptos::mount::mount_to(wrapper, move || view! { <App config=config /> }).forget();
    Ok(())
}
