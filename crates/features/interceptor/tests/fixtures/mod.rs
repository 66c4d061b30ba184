#![allow(dead_code, unreachable_pub)]

use dynload_interceptor::domain::navigation::NavPath;
use dynload_interceptor::{FragmentResponse, FragmentTransport, InterceptorError, Page};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const HOST: &str = "host.example";
pub const HOME: usize = 0;
pub const DASHBOARD: usize = 1;
pub const SERVERS: usize = 2;

pub fn href(path: &str) -> String {
    format!("http://{HOST}{path}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub state: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug)]
pub struct PageState {
    pub session: bool,
    pub host: String,
    pub container: Option<String>,
    /// One flag per navigation item, indexed by link handle.
    pub active: Vec<bool>,
    pub history_state: String,
    pub history: Vec<HistoryEntry>,
    pub reject_history: bool,
    pub locations: Vec<String>,
}

/// In-memory document: a menu of three items (home active), a content container and a history.
#[derive(Debug, Clone)]
pub struct FakePage {
    state: Arc<Mutex<PageState>>,
}

impl FakePage {
    pub fn logged_in() -> Self {
        Self {
            state: Arc::new(Mutex::new(PageState {
                session: true,
                host: HOST.to_owned(),
                container: Some("<p>Home</p>".to_owned()),
                active: vec![true, false, false],
                history_state: "{\"page\":\"home\"}".to_owned(),
                history: Vec::new(),
                reject_history: false,
                locations: Vec::new(),
            })),
        }
    }

    pub fn logged_out() -> Self {
        let page = Self::logged_in();
        page.state.lock().session = false;
        page
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut PageState) -> R) -> R {
        f(&mut self.state.lock())
    }

    pub fn content(&self) -> Option<String> {
        self.state.lock().container.clone()
    }

    pub fn active(&self) -> Vec<bool> {
        self.state.lock().active.clone()
    }

    pub fn history_urls(&self) -> Vec<String> {
        self.state.lock().history.iter().map(|e| e.url.clone()).collect()
    }

    pub fn locations(&self) -> Vec<String> {
        self.state.lock().locations.clone()
    }
}

impl Page for FakePage {
    type Link = usize;

    fn session_active(&self) -> bool {
        self.state.lock().session
    }

    fn host(&self) -> String {
        self.state.lock().host.clone()
    }

    fn push_history(&self, path: &NavPath) -> Result<(), InterceptorError> {
        let mut state = self.state.lock();
        if state.reject_history {
            return Err(InterceptorError::History {
                message: "SecurityError: history.pushState denied".into(),
                context: None,
            });
        }
        let entry = HistoryEntry {
            state: state.history_state.clone(),
            title: path.to_string(),
            url: path.to_string(),
        };
        state.history.push(entry);
        Ok(())
    }

    fn replace_content(&self, html: &str) -> Result<(), InterceptorError> {
        let mut state = self.state.lock();
        let container = state.container.as_mut().ok_or_else(|| InterceptorError::MissingElement {
            message: "#content".into(),
            context: None,
        })?;
        html.clone_into(container);
        Ok(())
    }

    fn mark_active(&self, link: &usize) -> Result<(), InterceptorError> {
        // Same order as the DOM: every item is cleared before the owner is looked up.
        let mut state = self.state.lock();
        state.active.iter_mut().for_each(|flag| *flag = false);
        let owner = state.active.get_mut(*link).ok_or_else(|| InterceptorError::MissingElement {
            message: format!("nav item for link {link}").into(),
            context: None,
        })?;
        *owner = true;
        Ok(())
    }

    fn assign_location(&self, path: &NavPath) -> Result<(), InterceptorError> {
        self.state.lock().locations.push(path.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Response(FragmentResponse),
    Failure(String),
}

#[derive(Debug, Clone)]
struct Route {
    delay: Duration,
    reply: Reply,
}

/// A fetch observed by the transport, with the history as it stood when the request went out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub history_at_request: Vec<String>,
}

/// Scripted transport. Unknown URLs answer 404.
#[derive(Debug, Clone)]
pub struct FakeTransport {
    page: FakePage,
    routes: Arc<Mutex<HashMap<String, Route>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl FakeTransport {
    pub fn new(page: &FakePage) -> Self {
        Self {
            page: page.clone(),
            routes: Arc::default(),
            requests: Arc::default(),
        }
    }

    pub fn route(self, url: &str, response: FragmentResponse) -> Self {
        self.route_delayed(url, 0, response)
    }

    pub fn route_delayed(self, url: &str, delay_ms: u64, response: FragmentResponse) -> Self {
        self.routes.lock().insert(
            url.to_owned(),
            Route { delay: Duration::from_millis(delay_ms), reply: Reply::Response(response) },
        );
        self
    }

    pub fn fail(self, url: &str, message: &str) -> Self {
        self.routes.lock().insert(
            url.to_owned(),
            Route { delay: Duration::ZERO, reply: Reply::Failure(message.to_owned()) },
        );
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests.lock().iter().map(|r| r.url.clone()).collect()
    }
}

impl FragmentTransport for FakeTransport {
    async fn fetch(&self, url: &str) -> Result<FragmentResponse, InterceptorError> {
        self.requests.lock().push(Request {
            url: url.to_owned(),
            history_at_request: self.page.history_urls(),
        });

        let route = self.routes.lock().get(url).cloned();
        let Some(route) = route else {
            return Ok(FragmentResponse::status(404, "Not Found"));
        };

        if !route.delay.is_zero() {
            tokio::time::sleep(route.delay).await;
        }

        match route.reply {
            Reply::Response(response) => Ok(response),
            Reply::Failure(message) => {
                Err(InterceptorError::Transport { message: message.into(), context: None })
            },
        }
    }
}
