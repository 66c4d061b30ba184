//! # Dynload Web
//!
//! Browser entry point. On load the module reads its config from
//! `<script type="application/json" id="dynload-config">`, starts logging to the devtools
//! console, and once the DOM is ready installs a single delegated click listener that routes
//! navigation-menu clicks through the [`NavigationInterceptor`].
//!
//! A missing config element means defaults. A malformed one is reported and also means
//! defaults, so a broken config never breaks plain navigation.

mod bridge;
mod error;
mod listener;
mod page;
mod transport;

pub use crate::bridge::{DOM_EVENT, forward_events};
pub use crate::error::{WebError, WebErrorExt};
pub use crate::listener::{BrowserInterceptor, attach};
pub use crate::page::BrowserPage;
pub use crate::transport::FetchTransport;

use dynload_domain::config::{InterceptorConfig, LoggingConfig};
use dynload_domain::constants::CONFIG_ELEMENT_ID;
use dynload_interceptor::config::parse_config;
use dynload_interceptor::{EventHub, NavigationInterceptor};
use dynload_logger::Logger;
use tracing::{error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Document;

#[wasm_bindgen(start)]
pub fn start() {
    if let Err(err) = boot() {
        error!(error = %err, kind = err.kind(), "Dynload failed to start");
        web_sys::console::error_1(&format!("dynload: {err}").into());
    }
}

fn boot() -> Result<(), WebError> {
    let window = web_sys::window().ok_or("No global window")?;
    let document = window.document().ok_or("Window has no document")?;

    let raw = read_config(&document);
    let (config, rejected) = match parse_config(raw.as_deref().unwrap_or_default()) {
        Ok(config) => (config, None),
        Err(err) => (InterceptorConfig::default(), Some(err)),
    };

    if let Err(err) = init_logging(&config.logging) {
        web_sys::console::warn_1(&format!("dynload: logging disabled: {err}").into());
    }
    if let Some(err) = rejected {
        warn!(error = %err, kind = err.kind(), "Ignoring malformed config, using defaults");
    }

    let events = EventHub::new();
    forward_events(&events, document.clone());

    let interceptor = NavigationInterceptor::builder()
        .config(config.clone())
        .events(events)
        .page(BrowserPage::new(window.clone(), document.clone(), config.selectors.clone()))
        .transport(FetchTransport::new(window, config.fetch.timeout_ms))
        .build()
        .context("Interceptor rejected its config")?;

    when_ready(&document, move |document| {
        if let Err(err) = attach(interceptor, &document) {
            error!(error = %err, kind = err.kind(), "Navigation stays on full page loads");
        }
    })?;

    info!(version = env!("CARGO_PKG_VERSION"), "Dynload started");
    Ok(())
}

/// Text of the config element, if the page ships one.
fn read_config(document: &Document) -> Option<String> {
    document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|element| element.text_content())
}

fn init_logging(logging: &LoggingConfig) -> Result<Logger, WebError> {
    let mut builder = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .console(true)
        .json(logging.json)
        .level_name(&logging.level)?;
    if let Some(filter) = &logging.filter {
        builder = builder.env_filter(filter.clone());
    }
    Ok(builder.init()?)
}

/// Runs `run` after `DOMContentLoaded`, or right away if that already fired.
fn when_ready(document: &Document, run: impl FnOnce(Document) + 'static) -> Result<(), WebError> {
    if !is_loading(&document.ready_state()) {
        run(document.clone());
        return Ok(());
    }

    let target = document.clone();
    let callback = Closure::once_into_js(move || run(target));
    document
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .map_err(WebError::from)
        .context("Failed to wait for DOMContentLoaded")
}

/// `document.readyState` before `DOMContentLoaded` has fired.
fn is_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_loading_state_waits() {
        assert!(is_loading("loading"));
        assert!(!is_loading("interactive"));
        assert!(!is_loading("complete"));
    }
}
