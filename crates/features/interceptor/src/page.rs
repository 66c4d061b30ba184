//! Seams between the interceptor and the environment it runs in.
//!
//! The browser build implements these over `web-sys`; tests implement them in memory.

use crate::error::InterceptorError;
use dynload_domain::navigation::{Modifiers, NavPath, PRIMARY_BUTTON};
use std::future::Future;

/// The document the interceptor reads from and writes to.
///
/// Every method is synchronous: they all run on the UI thread, either inside the click handler
/// or inside the fetch completion.
pub trait Page {
    /// Handle to the clicked link, enough to find the navigation item that owns it.
    type Link;

    /// Whether the logged-in marker is present right now. Never cached.
    fn session_active(&self) -> bool;

    /// `location.host` of the current document.
    fn host(&self) -> String;

    /// Pushes `path` as a new history entry, replaying the current state object and passing the
    /// path as the title.
    ///
    /// # Errors
    /// Returns [`InterceptorError::History`] if the browser rejects the entry.
    fn push_history(&self, path: &NavPath) -> Result<(), InterceptorError>;

    /// Replaces the whole content container subtree with `html`.
    ///
    /// # Errors
    /// Returns [`InterceptorError::MissingElement`] if the container is gone.
    fn replace_content(&self, html: &str) -> Result<(), InterceptorError>;

    /// Clears the active class from every navigation item, then sets it on the item owning
    /// `link`, leaving exactly one active item.
    ///
    /// # Errors
    /// Returns [`InterceptorError::MissingElement`] if `link` has no owning item. The items are
    /// already cleared by then, so no item stays active.
    fn mark_active(&self, link: &Self::Link) -> Result<(), InterceptorError>;

    /// Full synchronous navigation to `path`. The interceptor never passes a path with a hash.
    ///
    /// # Errors
    /// Returns [`InterceptorError::Navigation`] if the location cannot be assigned.
    fn assign_location(&self, path: &NavPath) -> Result<(), InterceptorError>;
}

/// Raw answer to a fragment request, before any judgement about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentResponse {
    pub status: u16,
    /// `None` when the body could not be decoded as text.
    pub body: Option<String>,
}

impl FragmentResponse {
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: Some(body.into()) }
    }

    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: Some(body.into()) }
    }
}

/// Retrieves fragments over HTTP.
pub trait FragmentTransport {
    /// Issues `GET url` and resolves with whatever came back.
    ///
    /// # Errors
    /// Returns [`InterceptorError::Transport`] when no response was received at all.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FragmentResponse, InterceptorError>>;
}

/// A click on something that matched the navigation-link selector.
#[derive(Debug, Clone)]
pub struct Click<L> {
    pub link: L,
    /// The link's resolved URL.
    pub href: String,
    pub modifiers: Modifiers,
    pub button: i16,
}

impl<L> Click<L> {
    /// A plain left click.
    pub fn primary(link: L, href: impl Into<String>) -> Self {
        Self { link, href: href.into(), modifiers: Modifiers::empty(), button: PRIMARY_BUTTON }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_button(mut self, button: i16) -> Self {
        self.button = button;
        self
    }

    /// Whether the user asked for something other than "follow here", e.g. a new tab.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        !self.modifiers.is_empty() || self.button != PRIMARY_BUTTON
    }
}
