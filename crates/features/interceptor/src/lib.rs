//! # Navigation Interceptor
//!
//! Upgrades same-origin clicks inside the navigation menu into partial page loads:
//! the browser's own navigation is suppressed, the destination is pushed onto the history stack,
//! the page is fetched as a fragment (`?ajax=1`) and swapped into the content container, and the
//! clicked menu item becomes the active one.
//!
//! ## Flow
//!
//! 1. [`NavigationInterceptor::begin`] runs inside the click handler. It leaves the click to the
//!    browser when a modifier key is held, when no logged-in marker is present, or when the link
//!    leaves the current host. Otherwise it pushes the history entry and returns a
//!    [`PendingLoad`].
//! 2. [`NavigationInterceptor::load`] fetches the fragment through the [`FragmentTransport`] and
//!    hands the [`FetchOutcome`](dynload_domain::navigation::FetchOutcome) to
//!    [`NavigationInterceptor::complete`].
//! 3. `complete` either applies the fragment, forces a full page load to the same path, or drops
//!    the result because a newer click is already on its way.
//!
//! The environment is reached only through the [`Page`] and [`FragmentTransport`] traits, which
//! keeps the whole flow testable without a browser.

pub mod config;
mod error;
mod events;
mod interceptor;
mod outcome;
mod page;
mod path;

pub use crate::error::{InterceptorError, InterceptorErrorExt};
pub use crate::events::EventHub;
pub use crate::interceptor::{
    ClickDecision, InterceptorBuilder, InterceptorState, Missing, NavigationInterceptor,
    PendingLoad,
};
pub use crate::outcome::classify;
pub use crate::page::{Click, FragmentResponse, FragmentTransport, Page};
pub use crate::path::derive_path;
pub use dynload_domain as domain;
