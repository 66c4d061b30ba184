use std::borrow::Cow;

/// A specialized [`InterceptorError`] enum of this crate.
#[dynload_derive::dynload_error]
pub enum InterceptorError {
    /// The page template no longer has an element the selector contract promises.
    #[error("Missing element{}: {message}", format_context(.context))]
    MissingElement { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// `history.pushState` was rejected.
    #[error("History error{}: {message}", format_context(.context))]
    History { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Assigning `document.location` failed.
    #[error("Navigation error{}: {message}", format_context(.context))]
    Navigation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The fragment request never produced a response.
    #[error("Transport error{}: {message}", format_context(.context))]
    Transport { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal interceptor error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
