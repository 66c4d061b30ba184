use crate::config::{ConfigError, validate};
use crate::events::EventHub;
use crate::outcome::classify;
use crate::page::{Click, FragmentTransport, Page};
use crate::path::derive_path;
use dynload_domain::config::{InterceptorConfig, OverlapPolicy};
use dynload_domain::navigation::{
    Completion, FetchOutcome, NavPath, NavigationEvent, PassReason, Sequence, UnavailableReason,
};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info, warn};

/// Bookkeeping shared by every click handled by one interceptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterceptorState {
    /// Sequence of the most recent intercepted click.
    pub latest_requested: Option<Sequence>,
    /// Sequence of the last fragment that actually reached the page.
    pub latest_applied: Option<Sequence>,
    /// Fragment requests started but not yet completed.
    pub in_flight: usize,
}

/// What the click handler must do with the browser event.
#[derive(Debug)]
pub enum ClickDecision<L> {
    /// Leave the event alone; the browser follows the link.
    PassThrough(PassReason),
    /// Call `preventDefault()`, then drive the load to completion.
    Intercepted(PendingLoad<L>),
}

impl<L> ClickDecision<L> {
    #[must_use]
    pub const fn is_intercepted(&self) -> bool {
        matches!(self, Self::Intercepted(_))
    }
}

/// An intercepted click whose history entry is pushed and whose fragment is not loaded yet.
#[derive(Debug)]
#[must_use = "a pending load does nothing until passed to `load` or `complete`"]
pub struct PendingLoad<L> {
    seq: Sequence,
    path: NavPath,
    link: L,
}

impl<L> PendingLoad<L> {
    pub const fn seq(&self) -> Sequence {
        self.seq
    }

    pub const fn path(&self) -> &NavPath {
        &self.path
    }
}

#[derive(Debug)]
pub struct Missing;

/// Builder for [`NavigationInterceptor`]; the page and the transport are mandatory.
#[derive(Debug)]
#[must_use = "builders do nothing unless you call .build()"]
pub struct InterceptorBuilder<P = Missing, T = Missing> {
    config: InterceptorConfig,
    events: EventHub,
    page: P,
    transport: T,
}

impl<P, T> InterceptorBuilder<P, T> {
    pub fn config(mut self, config: InterceptorConfig) -> Self {
        self.config = config;
        self
    }

    /// Publishes lifecycle events on an existing hub instead of a private one.
    pub fn events(mut self, events: EventHub) -> Self {
        self.events = events;
        self
    }

    pub fn page<Q: Page>(self, page: Q) -> InterceptorBuilder<Q, T> {
        InterceptorBuilder {
            config: self.config,
            events: self.events,
            page,
            transport: self.transport,
        }
    }

    pub fn transport<U: FragmentTransport>(self, transport: U) -> InterceptorBuilder<P, U> {
        InterceptorBuilder {
            config: self.config,
            events: self.events,
            page: self.page,
            transport,
        }
    }
}

impl<P: Page, T: FragmentTransport> InterceptorBuilder<P, T> {
    /// Validates the config and assembles the interceptor.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if the config fails validation.
    pub fn build(self) -> Result<NavigationInterceptor<P, T>, ConfigError> {
        validate(&self.config)?;

        debug!(
            nav_link = %self.config.selectors.nav_link,
            overlap = ?self.config.overlap,
            sentinel = ?self.config.fetch.sentinel,
            "Navigation interceptor configured"
        );

        Ok(NavigationInterceptor {
            inner: Arc::new(InterceptorInner {
                config: self.config,
                events: self.events,
                page: self.page,
                transport: self.transport,
                next_seq: AtomicU64::new(0),
                state: Mutex::new(InterceptorState::default()),
            }),
        })
    }
}

struct InterceptorInner<P, T> {
    config: InterceptorConfig,
    events: EventHub,
    page: P,
    transport: T,
    next_seq: AtomicU64,
    state: Mutex<InterceptorState>,
}

/// Upgrades navigation-link clicks into fragment loads.
///
/// One instance per document. Cloning is cheap and every clone shares the same sequence counter
/// and state, so the click handler can hand a clone to each spawned load.
///
/// # Example
/// ```rust,ignore
/// let interceptor = NavigationInterceptor::builder()
///     .config(config)
///     .page(BrowserPage::new(&window, config.selectors.clone())?)
///     .transport(FetchTransport::new(window.clone(), config.fetch.timeout_ms))
///     .build()?;
///
/// if let ClickDecision::Intercepted(pending) = interceptor.begin(click) {
///     event.prevent_default();
///     spawn_local(async move { interceptor.load(pending).await; });
/// }
/// ```
pub struct NavigationInterceptor<P, T> {
    inner: Arc<InterceptorInner<P, T>>,
}

impl<P, T> Clone for NavigationInterceptor<P, T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<P, T> fmt::Debug for NavigationInterceptor<P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationInterceptor")
            .field("config", &self.inner.config)
            .field("state", &*self.inner.state.lock())
            .finish_non_exhaustive()
    }
}

impl NavigationInterceptor<Missing, Missing> {
    pub fn builder() -> InterceptorBuilder {
        InterceptorBuilder {
            config: InterceptorConfig::default(),
            events: EventHub::new(),
            page: Missing,
            transport: Missing,
        }
    }
}

impl<P: Page, T: FragmentTransport> NavigationInterceptor<P, T> {
    #[must_use]
    pub fn config(&self) -> &InterceptorConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn events(&self) -> &EventHub {
        &self.inner.events
    }

    #[must_use]
    pub fn snapshot(&self) -> InterceptorState {
        *self.inner.state.lock()
    }

    /// Synchronous half of a click: decide, derive the path and push the history entry.
    ///
    /// Runs inside the click handler, so by the time it returns
    /// [`ClickDecision::Intercepted`] the address bar already shows the destination,
    /// whatever the network does next.
    pub fn begin(&self, click: Click<P::Link>) -> ClickDecision<P::Link> {
        let page = &self.inner.page;

        if click.is_modified() {
            return self.pass(PassReason::ModifiedClick, &click.href);
        }

        if !page.session_active() {
            return self.pass(PassReason::NoSession, &click.href);
        }

        let host = page.host();
        let Some(path) = derive_path(&click.href, &host) else {
            return self.pass(PassReason::CrossOrigin, &click.href);
        };

        if let Err(err) = page.push_history(&path) {
            warn!(path = %path, error = %err, kind = err.kind(), "Could not push history entry");
            return self.pass(PassReason::HistoryUnavailable, &click.href);
        }

        let seq = Sequence::new(self.inner.next_seq.fetch_add(1, Ordering::Relaxed) + 1);
        {
            let mut state = self.inner.state.lock();
            state.latest_requested = Some(seq);
            state.in_flight += 1;
        }

        debug!(seq = seq.get(), path = %path, "Navigation intercepted");
        self.inner.events.publish(NavigationEvent::Intercepted { seq, path: path.clone() });

        ClickDecision::Intercepted(PendingLoad { seq, path, link: click.link })
    }

    /// Asynchronous half of a click: fetch the fragment and apply it.
    ///
    /// A transport error is handled exactly like an unusable response.
    pub async fn load(&self, pending: PendingLoad<P::Link>) -> Completion {
        let fetch = &self.inner.config.fetch;
        let url = pending.path.fragment_url(&fetch.fragment_param, &fetch.fragment_value);

        debug!(seq = pending.seq.get(), url = %url, "Requesting fragment");

        let outcome = match self.inner.transport.fetch(&url).await {
            Ok(response) => classify(response, fetch),
            Err(err) => {
                warn!(seq = pending.seq.get(), error = %err, kind = err.kind(), "Fragment request failed");
                FetchOutcome::Unavailable(UnavailableReason::Transport(err.to_string()))
            },
        };

        self.complete(pending, outcome)
    }

    /// Applies a finished fetch to the page.
    ///
    /// Under [`OverlapPolicy::LatestWins`] a result for any click older than the latest one is
    /// discarded without touching the page, even if it is a failure. Otherwise a fragment
    /// replaces the content and moves the active marker, and an unavailable outcome forces a
    /// full navigation to the path. History entries are never rolled back.
    pub fn complete(&self, pending: PendingLoad<P::Link>, outcome: FetchOutcome) -> Completion {
        let PendingLoad { seq, path, link } = pending;

        let stale_against = {
            let mut state = self.inner.state.lock();
            state.in_flight = state.in_flight.saturating_sub(1);
            match (self.inner.config.overlap, state.latest_requested) {
                (OverlapPolicy::LatestWins, Some(latest)) if latest > seq => Some(latest),
                _ => None,
            }
        };

        if let Some(latest) = stale_against {
            debug!(seq = seq.get(), latest = latest.get(), path = %path, "Discarding stale fragment");
            self.inner.events.publish(NavigationEvent::Discarded { seq, latest });
            return Completion::Discarded { latest };
        }

        let html = match outcome {
            FetchOutcome::Fragment(html) => html,
            FetchOutcome::Unavailable(reason) => return self.fall_back(seq, path, reason),
        };

        let page = &self.inner.page;
        if let Err(err) = page.replace_content(&html) {
            error!(seq = seq.get(), error = %err, kind = err.kind(), "Cannot inject fragment");
            return self.fall_back(seq, path, UnavailableReason::MissingContainer);
        }

        if let Err(err) = page.mark_active(&link) {
            warn!(seq = seq.get(), error = %err, kind = err.kind(), "Active item not updated");
        }

        self.inner.state.lock().latest_applied = Some(seq);

        info!(seq = seq.get(), path = %path, bytes = html.len(), "Fragment applied");
        self.inner.events.publish(NavigationEvent::Loaded { seq, path });

        Completion::Applied
    }

    /// Runs [`begin`](Self::begin) and, when intercepted, [`load`](Self::load).
    ///
    /// Returns `None` when the click was left to the browser.
    pub async fn navigate(&self, click: Click<P::Link>) -> Option<Completion> {
        match self.begin(click) {
            ClickDecision::PassThrough(_) => None,
            ClickDecision::Intercepted(pending) => Some(self.load(pending).await),
        }
    }

    fn pass(&self, reason: PassReason, href: &str) -> ClickDecision<P::Link> {
        debug!(reason = ?reason, href, "Leaving click to the browser");
        self.inner.events.publish(NavigationEvent::PassedThrough { reason });
        ClickDecision::PassThrough(reason)
    }

    fn fall_back(&self, seq: Sequence, path: NavPath, reason: UnavailableReason) -> Completion {
        warn!(seq = seq.get(), path = %path, reason = %reason, "Fragment unavailable, loading full page");

        // The hashed URL is already in the address bar; reassigning it would only scroll.
        let target = path.strip_hash();
        if let Err(err) = self.inner.page.assign_location(&target) {
            error!(seq = seq.get(), path = %target, error = %err, kind = err.kind(), "Full navigation failed");
        }

        self.inner.events.publish(NavigationEvent::FellBack {
            seq,
            path,
            reason: reason.clone(),
        });

        Completion::FellBack { reason }
    }
}
