//! Loading and checking [`InterceptorConfig`] documents.

use dynload_domain::config::InterceptorConfig;
use std::borrow::Cow;
use tracing::debug;

/// Custom error type for config loading.
#[dynload_derive::dynload_error]
pub enum ConfigError {
    #[error("Config parse error{}: {source}", format_context(.context))]
    Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },
    #[error("Invalid config{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Parses a JSON config document and validates it.
///
/// Blank input yields the defaults, so a page may ship an empty config element.
/// Fields missing from the document keep their default values.
///
/// # Errors
/// Returns [`ConfigError::Parse`] for malformed JSON or wrongly typed fields and
/// [`ConfigError::Invalid`] when [`validate`] rejects the result.
///
/// # Example
/// ```rust
/// use dynload_interceptor::config::parse_config;
///
/// let cfg = parse_config(r#"{ "selectors": { "content": "main" } }"#).unwrap();
/// assert_eq!(cfg.selectors.content, "main");
/// ```
pub fn parse_config(raw: &str) -> Result<InterceptorConfig, ConfigError> {
    if raw.trim().is_empty() {
        debug!("Empty config document, using defaults");
        return Ok(InterceptorConfig::default());
    }

    let config: InterceptorConfig =
        serde_json::from_str(raw).context("Failed to deserialize interceptor config")?;
    validate(&config)?;

    Ok(config)
}

/// Rejects configs that would make every click a no-op or produce malformed requests.
///
/// # Errors
/// Returns [`ConfigError::Invalid`] naming the first offending field.
pub fn validate(config: &InterceptorConfig) -> Result<(), ConfigError> {
    let selectors = &config.selectors;
    let required = [
        ("selectors.nav_item", selectors.nav_item.as_str()),
        ("selectors.nav_link", selectors.nav_link.as_str()),
        ("selectors.session_marker", selectors.session_marker.as_str()),
        ("selectors.content", selectors.content.as_str()),
        ("selectors.active_class", selectors.active_class.as_str()),
        ("fetch.fragment_param", config.fetch.fragment_param.as_str()),
    ];

    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ConfigError::Invalid {
            message: format!("{field} cannot be empty").into(),
            context: None,
        });
    }

    for (field, id) in [
        ("selectors.session_marker", selectors.session_marker.as_str()),
        ("selectors.content", selectors.content.as_str()),
    ] {
        if id.starts_with('#') {
            return Err(ConfigError::Invalid {
                message: format!("{field} is an element id, drop the leading '#'").into(),
                context: None,
            });
        }
    }

    if selectors.active_class.contains(char::is_whitespace) {
        return Err(ConfigError::Invalid {
            message: "selectors.active_class must be a single class name".into(),
            context: None,
        });
    }

    if config.fetch.timeout_ms == Some(0) {
        return Err(ConfigError::Invalid {
            message: "fetch.timeout_ms must be greater than zero".into(),
            context: Some("omit the field to wait without a timeout".into()),
        });
    }

    if config.fetch.fragment_param.contains(['?', '&', '=', '#']) {
        return Err(ConfigError::Invalid {
            message: "fetch.fragment_param must be a bare query parameter name".into(),
            context: None,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynload_domain::config::{OverlapPolicy, SentinelMode};

    #[test]
    fn blank_document_yields_defaults() {
        let cfg = parse_config("  \n").unwrap();
        assert_eq!(cfg.selectors.nav_link, ".nav-item a");
        assert_eq!(cfg.overlap, OverlapPolicy::LatestWins);
    }

    #[test]
    fn partial_document_overrides_only_given_fields() {
        let cfg = parse_config(r#"{ "fetch": { "sentinel": "off" }, "overlap": "last_completed_wins" }"#)
            .unwrap();
        assert_eq!(cfg.fetch.sentinel, SentinelMode::Off);
        assert_eq!(cfg.fetch.fragment_param, "ajax");
        assert_eq!(cfg.overlap, OverlapPolicy::LastCompletedWins);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse_config("{ selectors: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("Failed to deserialize interceptor config"));
    }

    #[test]
    fn unknown_overlap_policy_is_a_parse_error() {
        let err = parse_config(r#"{ "overlap": "first_wins" }"#).unwrap_err();
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn empty_selector_is_rejected() {
        let err = parse_config(r#"{ "selectors": { "content": "" } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("selectors.content"));
    }

    #[test]
    fn hash_prefixed_ids_are_rejected() {
        let err = parse_config(r##"{ "selectors": { "session_marker": "#logged-in" } }"##)
            .unwrap_err();
        assert!(err.to_string().contains("selectors.session_marker"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = parse_config(r#"{ "fetch": { "timeout_ms": 0 } }"#).unwrap_err();
        assert!(err.to_string().contains("omit the field"));
    }

    #[test]
    fn fragment_param_must_be_bare() {
        let err = parse_config(r#"{ "fetch": { "fragment_param": "ajax=1" } }"#).unwrap_err();
        assert_eq!(err.kind(), "invalid");
    }
}
