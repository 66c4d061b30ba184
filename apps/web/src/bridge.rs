//! Re-publishes interceptor events as DOM events so page scripts can react to partial loads.
//!
//! ```js
//! document.addEventListener("dynload:navigation", (e) => {
//!   if (e.detail.type === "loaded") initWidgets(e.detail.path);
//! });
//! ```

use crate::error::WebError;
use dynload_domain::navigation::NavigationEvent;
use dynload_interceptor::EventHub;
use tokio::sync::broadcast::error::RecvError;
use tracing::{trace, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::{CustomEvent, CustomEventInit, Document};

/// Name of the `CustomEvent` dispatched on `document`.
pub const DOM_EVENT: &str = "dynload:navigation";

/// Spawns a task that mirrors every hub event onto `document` until the hub is dropped.
pub fn forward_events(hub: &EventHub, document: Document) {
    let mut events = hub.subscribe();
    spawn_local(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Err(err) = dispatch(&document, &event) {
                        warn!(error = %err, "Could not dispatch navigation event");
                    }
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Navigation event listener lagged behind");
                },
                Err(RecvError::Closed) => break,
            }
        }
        trace!("Navigation event bridge stopped");
    });
}

fn dispatch(document: &Document, event: &NavigationEvent) -> Result<(), WebError> {
    let detail = js_sys::JSON::parse(&detail_json(event)?)?;

    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let dom_event = CustomEvent::new_with_event_init_dict(DOM_EVENT, &init)?;

    document.dispatch_event(&dom_event)?;
    Ok(())
}

/// JSON body of the `detail` field.
pub(crate) fn detail_json(event: &NavigationEvent) -> Result<String, WebError> {
    serde_json::to_string(event).map_err(|e| WebError::Internal {
        message: format!("Navigation event is not serializable: {e}").into(),
        context: None,
    })
}
