use dynload_interceptor::InterceptorError;
use dynload_interceptor::config::ConfigError;
use dynload_logger::LoggerError;
use std::borrow::Cow;
use wasm_bindgen::{JsCast, JsValue};

/// Failures while wiring the bundle into the page.
#[dynload_derive::dynload_error]
pub enum WebError {
    /// A DOM call threw.
    #[error("JavaScript error{}: {message}", format_context(.context))]
    Js { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("Logger error{}: {source}", format_context(.context))]
    Logger { source: LoggerError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal web error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js { message: js_message(&value).into(), context: None }
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return format!("{}: {}", String::from(err.name()), String::from(err.message()));
    }
    format!("{value:?}")
}

pub(crate) fn history_error(value: &JsValue) -> InterceptorError {
    InterceptorError::History { message: js_message(value).into(), context: None }
}

pub(crate) fn navigation_error(value: &JsValue) -> InterceptorError {
    InterceptorError::Navigation { message: js_message(value).into(), context: None }
}

pub(crate) fn transport_error(value: &JsValue) -> InterceptorError {
    InterceptorError::Transport { message: js_message(value).into(), context: None }
}

pub(crate) fn missing_element(what: impl Into<Cow<'static, str>>) -> InterceptorError {
    InterceptorError::MissingElement { message: what.into(), context: None }
}
