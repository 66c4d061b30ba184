use crate::constants::{
    ACTIVE_CLASS, CONTENT_ID, FRAGMENT_PARAM, FRAGMENT_VALUE, NAV_ITEM_SELECTOR,
    NAV_LINK_SELECTOR, SESSION_MARKER_ID,
};
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Top-level interceptor configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InterceptorConfigInner {
    pub selectors: SelectorConfig,
    pub fetch: FetchConfig,
    pub overlap: OverlapPolicy,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into the click handler and transport.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct InterceptorConfig {
    #[serde(flatten, default)]
    inner: Arc<InterceptorConfigInner>,
}

impl Deref for InterceptorConfig {
    type Target = InterceptorConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for InterceptorConfig {
    fn deref_mut(&mut self) -> &mut InterceptorConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// DOM selector contract with the page template.
///
/// `session_marker` and `content` are element ids (no leading `#`), the rest are CSS selectors
/// except `active_class`, which is a bare class name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub nav_item: String,
    pub nav_link: String,
    pub session_marker: String,
    pub content: String,
    pub active_class: String,
}

/// How fragments are requested and how their responses are judged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub fragment_param: String,
    pub fragment_value: String,
    pub sentinel: SentinelMode,
    /// `None` waits forever, like a plain `XMLHttpRequest` without a timeout.
    pub timeout_ms: Option<u32>,
    pub treat_non_success_as_unavailable: bool,
}

/// Whether an `"ERROR"` body is read as a refusal from the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentinelMode {
    /// Byte-for-byte compatible with servers that answer `ERROR` instead of a fragment.
    #[default]
    Compat,
    /// Bodies are never sniffed; only status and transport failures count.
    Off,
}

/// What happens when several fragment requests are in flight at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Only the most recently requested navigation may touch the page.
    #[default]
    LatestWins,
    /// Every completion is applied in arrival order; a slow stale response can overwrite a
    /// newer one.
    LastCompletedWins,
}

/// Browser-side logging knobs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub filter: Option<String>,
    pub json: bool,
}

// --- Default ---

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            nav_item: NAV_ITEM_SELECTOR.to_owned(),
            nav_link: NAV_LINK_SELECTOR.to_owned(),
            session_marker: SESSION_MARKER_ID.to_owned(),
            content: CONTENT_ID.to_owned(),
            active_class: ACTIVE_CLASS.to_owned(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            fragment_param: FRAGMENT_PARAM.to_owned(),
            fragment_value: FRAGMENT_VALUE.to_owned(),
            sentinel: SentinelMode::Compat,
            timeout_ms: None,
            treat_non_success_as_unavailable: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, json: false }
    }
}
