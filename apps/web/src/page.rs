use crate::error::{history_error, js_message, missing_element, navigation_error};
use dynload_domain::config::SelectorConfig;
use dynload_domain::navigation::NavPath;
use dynload_interceptor::{InterceptorError, Page};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

/// The live document behind the interceptor.
#[derive(Debug, Clone)]
pub struct BrowserPage {
    window: Window,
    document: Document,
    selectors: SelectorConfig,
}

impl BrowserPage {
    #[must_use]
    pub const fn new(window: Window, document: Document, selectors: SelectorConfig) -> Self {
        Self { window, document, selectors }
    }

    /// The navigation item a link belongs to: the closest ancestor matching the item selector,
    /// else the link's parent element.
    fn owning_item(&self, link: &Element) -> Option<Element> {
        link.closest(&self.selectors.nav_item).ok().flatten().or_else(|| link.parent_element())
    }
}

impl Page for BrowserPage {
    type Link = Element;

    fn session_active(&self) -> bool {
        self.document.get_element_by_id(&self.selectors.session_marker).is_some()
    }

    fn host(&self) -> String {
        self.window.location().host().unwrap_or_default()
    }

    fn push_history(&self, path: &NavPath) -> Result<(), InterceptorError> {
        let history = self.window.history().map_err(|e| history_error(&e))?;
        let state = history.state().map_err(|e| history_error(&e))?;
        history
            .push_state_with_url(&state, path.as_str(), Some(path.as_str()))
            .map_err(|e| history_error(&e))
    }

    fn replace_content(&self, html: &str) -> Result<(), InterceptorError> {
        let container = self
            .document
            .get_element_by_id(&self.selectors.content)
            .ok_or_else(|| missing_element(format!("#{}", self.selectors.content)))?;
        container.set_inner_html(html);
        Ok(())
    }

    fn mark_active(&self, link: &Element) -> Result<(), InterceptorError> {
        let active = self.selectors.active_class.as_str();
        let items = self.document.query_selector_all(&self.selectors.nav_item).map_err(|e| {
            missing_element(format!("{}: {}", self.selectors.nav_item, js_message(&e)))
        })?;

        for index in 0..items.length() {
            if let Some(node) = items.item(index)
                && let Ok(item) = node.dyn_into::<Element>()
            {
                // Removing an absent class never throws.
                let _ = item.class_list().remove_1(active);
            }
        }

        let owner =
            self.owning_item(link).ok_or_else(|| missing_element("navigation item for link"))?;
        owner
            .class_list()
            .add_1(active)
            .map_err(|e| missing_element(format!("class '{active}': {}", js_message(&e))))
    }

    fn assign_location(&self, path: &NavPath) -> Result<(), InterceptorError> {
        self.window.location().set_href(path.as_str()).map_err(|e| navigation_error(&e))
    }
}
