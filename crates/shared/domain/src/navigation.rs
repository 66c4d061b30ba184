use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A same-origin path with its query string, as shown in the address bar.
///
/// Always starts with `/`. The hash part, if any, is kept so the history entry matches the
/// link exactly, but it is never sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NavPath(String);

impl NavPath {
    /// Wraps `raw` if it is an absolute path.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        raw.starts_with('/').then_some(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path plus query, without the `#hash` part.
    #[must_use]
    pub fn without_hash(&self) -> &str {
        self.0.split_once('#').map_or(self.0.as_str(), |(head, _)| head)
    }

    /// Same path with the `#hash` removed.
    ///
    /// Assigning a URL that differs from the current one only by its hash scrolls instead of
    /// loading, so full navigations use this form.
    #[must_use]
    pub fn strip_hash(&self) -> Self {
        Self(self.without_hash().to_owned())
    }

    /// Path segments only.
    #[must_use]
    pub fn path(&self) -> &str {
        let head = self.without_hash();
        head.split_once('?').map_or(head, |(path, _)| path)
    }

    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.without_hash().split_once('?').map(|(_, query)| query)
    }

    /// URL that asks the server for a fragment of this page.
    ///
    /// A query-less path gets `?param=value`, a path that already carries a query gets
    /// `&param=value`.
    #[must_use]
    pub fn fragment_url(&self, param: &str, value: &str) -> String {
        let head = self.without_hash();
        let joiner = match self.query() {
            None => '?',
            Some("") => return format!("{head}{param}={value}"),
            Some(_) => '&',
        };
        format!("{head}{joiner}{param}={value}")
    }
}

impl fmt::Display for NavPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NavPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NavPath {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "navigation path must start with '/'".to_owned())
    }
}

impl From<NavPath> for String {
    fn from(value: NavPath) -> Self {
        value.0
    }
}

/// Ordinal of an intercepted click. Later clicks always get larger numbers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Sequence(u64);

impl Sequence {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// Keyboard modifiers held during a click.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const CTRL = 1 << 0;
        const SHIFT = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
    }
}

/// Button index as reported by `MouseEvent.button`.
pub const PRIMARY_BUTTON: i16 = 0;

/// Result of a fragment request once the transport is done with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Fragment(String),
    Unavailable(UnavailableReason),
}

/// Why a fragment could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum UnavailableReason {
    /// The server answered with the `ERROR` sentinel body.
    Sentinel,
    /// Non-2xx HTTP status.
    Status(u16),
    /// Network failure, abort or timeout.
    Transport(String),
    /// The body could not be read as text.
    MalformedBody,
    /// The page no longer has the element the fragment goes into.
    MissingContainer,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sentinel => f.write_str("server refused the fragment"),
            Self::Status(code) => write!(f, "HTTP status {code}"),
            Self::Transport(message) => write!(f, "transport failure: {message}"),
            Self::MalformedBody => f.write_str("response body is not text"),
            Self::MissingContainer => f.write_str("content container is missing"),
        }
    }
}

/// Why a click was left to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassReason {
    /// Modifier key or non-primary button: the user wants a new tab or window.
    ModifiedClick,
    /// No logged-in marker on the page.
    NoSession,
    /// The link does not point at the current host.
    CrossOrigin,
    /// The history entry could not be pushed.
    HistoryUnavailable,
}

/// How a fragment load ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Completion {
    /// Content replaced and the clicked item marked active.
    Applied,
    /// Full navigation to the path was forced.
    FellBack { reason: UnavailableReason },
    /// A newer click superseded this one; the page was left alone.
    Discarded { latest: Sequence },
}

/// Lifecycle notifications published by the interceptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavigationEvent {
    Intercepted { seq: Sequence, path: NavPath },
    PassedThrough { reason: PassReason },
    Loaded { seq: Sequence, path: NavPath },
    FellBack { seq: Sequence, path: NavPath, reason: UnavailableReason },
    Discarded { seq: Sequence, latest: Sequence },
}
