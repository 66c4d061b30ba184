use dynload_derive::dynload_error;
use std::borrow::Cow;

#[dynload_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing element{}: {message}", format_context(.context))]
    MissingElement { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err(std::io::Error::other("boom")).context("reading fragment")?;
    Ok(())
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.kind(), "io");
    assert_eq!(err.to_string(), "IO error (reading fragment): boom");

    let missing = DemoError::MissingElement { message: "#content".into(), context: None };
    assert_eq!(missing.kind(), "missing_element");

    let internal: DemoError = "unexpected".into();
    assert_eq!(internal.kind(), "internal");
}
