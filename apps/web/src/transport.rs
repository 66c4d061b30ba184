use crate::error::{js_message, transport_error};
use dynload_interceptor::{FragmentResponse, FragmentTransport, InterceptorError};
use tracing::trace;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestCredentials, RequestInit, Response, Window};

/// Header frameworks use to recognise scripted requests.
const REQUESTED_WITH: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// Fragment requests over `window.fetch`, with cookies and an optional deadline.
#[derive(Debug, Clone)]
pub struct FetchTransport {
    window: Window,
    timeout_ms: Option<u32>,
}

impl FetchTransport {
    #[must_use]
    pub const fn new(window: Window, timeout_ms: Option<u32>) -> Self {
        Self { window, timeout_ms }
    }

    fn request(&self, url: &str, deadline: Option<&Deadline>) -> Result<Request, InterceptorError> {
        let headers = Headers::new().map_err(|e| transport_error(&e))?;
        headers.set(REQUESTED_WITH.0, REQUESTED_WITH.1).map_err(|e| transport_error(&e))?;

        let init = RequestInit::new();
        init.set_method("GET");
        init.set_credentials(RequestCredentials::SameOrigin);
        init.set_headers(&headers);
        if let Some(deadline) = deadline {
            init.set_signal(Some(&deadline.controller.signal()));
        }

        Request::new_with_str_and_init(url, &init).map_err(|e| transport_error(&e))
    }
}

impl FragmentTransport for FetchTransport {
    async fn fetch(&self, url: &str) -> Result<FragmentResponse, InterceptorError> {
        let deadline = self.timeout_ms.map(|ms| Deadline::arm(&self.window, ms)).transpose()?;
        let request = self.request(url, deadline.as_ref())?;

        let response = match JsFuture::from(self.window.fetch_with_request(&request)).await {
            Ok(value) => value.dyn_into::<Response>().map_err(|e| transport_error(&e))?,
            Err(err) => {
                let cause = js_message(&err);
                return Err(timed_out(expired(deadline.as_ref()), &cause)
                    .unwrap_or_else(|| transport_error(&err)));
            },
        };

        let status = response.status();
        // The deadline stays armed while the body streams in.
        let body = match response.text() {
            Ok(promise) => match JsFuture::from(promise).await {
                Ok(value) => value.as_string(),
                Err(err) => unreadable_body(expired(deadline.as_ref()), &js_message(&err))?,
            },
            Err(_) => None,
        };

        let bytes = body.as_ref().map_or(0, String::len);
        trace!(url, status, bytes, "Fragment response received");
        Ok(FragmentResponse { status, body })
    }
}

/// Milliseconds of the deadline if it has already fired.
fn expired(deadline: Option<&Deadline>) -> Option<u32> {
    deadline.filter(|d| d.fired()).map(|d| d.ms)
}

/// Timeout error for a request whose deadline fired, `None` otherwise.
fn timed_out(expired_after: Option<u32>, cause: &str) -> Option<InterceptorError> {
    expired_after.map(|ms| InterceptorError::Transport {
        message: format!("no response within {ms} ms").into(),
        context: Some(cause.to_owned().into()),
    })
}

/// A body read that failed after the deadline is a timeout; any other failure leaves the body
/// unreadable (`None`).
fn unreadable_body(
    expired_after: Option<u32>,
    cause: &str,
) -> Result<Option<String>, InterceptorError> {
    timed_out(expired_after, cause).map_or(Ok(None), Err)
}

/// Aborts the request when the timer fires; clears the timer when dropped.
struct Deadline {
    window: Window,
    controller: AbortController,
    handle: i32,
    ms: u32,
    _on_timeout: Closure<dyn FnMut()>,
}

impl Deadline {
    fn arm(window: &Window, ms: u32) -> Result<Self, InterceptorError> {
        let controller = AbortController::new().map_err(|e| transport_error(&e))?;
        let on_timeout = {
            let controller = controller.clone();
            Closure::<dyn FnMut()>::new(move || controller.abort())
        };
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                on_timeout.as_ref().unchecked_ref(),
                i32::try_from(ms).unwrap_or(i32::MAX),
            )
            .map_err(|e| transport_error(&e))?;

        Ok(Self { window: window.clone(), controller, handle, ms, _on_timeout: on_timeout })
    }

    fn fired(&self) -> bool {
        self.controller.signal().aborted()
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.window.clear_timeout_with_handle(self.handle);
    }
}
