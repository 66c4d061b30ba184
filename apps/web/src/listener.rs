use crate::error::{WebError, WebErrorExt};
use crate::page::BrowserPage;
use crate::transport::FetchTransport;
use dynload_domain::navigation::Modifiers;
use dynload_interceptor::{Click, ClickDecision, NavigationInterceptor};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlAnchorElement, MouseEvent};

pub type BrowserInterceptor = NavigationInterceptor<BrowserPage, FetchTransport>;

static ATTACHED: AtomicBool = AtomicBool::new(false);

/// Installs one delegated `click` listener on the document.
///
/// Links added to the menu later are covered without re-binding. A second call is a no-op.
///
/// # Errors
/// Returns [`WebError::Js`] if the listener cannot be registered.
pub fn attach(interceptor: BrowserInterceptor, document: &Document) -> Result<(), WebError> {
    if ATTACHED.swap(true, Ordering::AcqRel) {
        warn!("Click listener already attached, ignoring");
        return Ok(());
    }

    let selector = interceptor.config().selectors.nav_link.clone();
    let handler = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        on_click(&interceptor, &selector, &event);
    });

    if let Err(err) =
        document.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
    {
        ATTACHED.store(false, Ordering::Release);
        return Err(WebError::from(err)).context("Failed to register click listener");
    }

    // Lives as long as the page.
    handler.forget();
    debug!("Click listener attached");
    Ok(())
}

fn on_click(interceptor: &BrowserInterceptor, selector: &str, event: &MouseEvent) {
    if event.default_prevented() {
        return;
    }

    let Some(link) = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest(selector).ok().flatten())
    else {
        return;
    };

    let Some(href) = link_href(&link) else {
        return;
    };

    let held = modifiers(event.ctrl_key(), event.shift_key(), event.alt_key(), event.meta_key());
    let click = Click::primary(link, href).with_modifiers(held).with_button(event.button());

    if let ClickDecision::Intercepted(pending) = interceptor.begin(click) {
        event.prevent_default();
        let interceptor = interceptor.clone();
        spawn_local(async move {
            interceptor.load(pending).await;
        });
    }
}

/// Resolved URL of the link; bare `href` attribute for non-anchor matches.
fn link_href(link: &Element) -> Option<String> {
    link.dyn_ref::<HtmlAnchorElement>()
        .map(HtmlAnchorElement::href)
        .or_else(|| link.get_attribute("href"))
        .filter(|href| !href.is_empty())
}

pub(crate) fn modifiers(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Modifiers {
    let mut held = Modifiers::empty();
    held.set(Modifiers::CTRL, ctrl);
    held.set(Modifiers::SHIFT, shift);
    held.set(Modifiers::ALT, alt);
    held.set(Modifiers::META, meta);
    held
}
