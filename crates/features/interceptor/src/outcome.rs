use crate::page::FragmentResponse;
use dynload_domain::config::{FetchConfig, SentinelMode};
use dynload_domain::constants::SENTINEL_BODY;
use dynload_domain::navigation::{FetchOutcome, UnavailableReason};

/// Turns a raw response into a usable fragment or a reason to fall back.
///
/// Checks run in wire order: status first, then whether the body is text, then the sentinel.
/// The sentinel comparison is exact and case-sensitive; `"ERROR\n"` or `"error"` are fragments.
#[must_use]
pub fn classify(response: FragmentResponse, fetch: &FetchConfig) -> FetchOutcome {
    let success = (200..300).contains(&response.status);
    if !success && fetch.treat_non_success_as_unavailable {
        return FetchOutcome::Unavailable(UnavailableReason::Status(response.status));
    }

    let Some(body) = response.body else {
        return FetchOutcome::Unavailable(UnavailableReason::MalformedBody);
    };

    if fetch.sentinel == SentinelMode::Compat && body == SENTINEL_BODY {
        return FetchOutcome::Unavailable(UnavailableReason::Sentinel);
    }

    FetchOutcome::Fragment(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch_config() -> FetchConfig {
        FetchConfig::default()
    }

    #[test]
    fn plain_body_is_a_fragment() {
        let outcome = classify(FragmentResponse::ok("<div>Dashboard</div>"), &fetch_config());
        assert_eq!(outcome, FetchOutcome::Fragment("<div>Dashboard</div>".to_owned()));
    }

    #[test]
    fn empty_body_is_still_a_fragment() {
        let outcome = classify(FragmentResponse::ok(""), &fetch_config());
        assert_eq!(outcome, FetchOutcome::Fragment(String::new()));
    }

    #[test]
    fn exact_sentinel_is_unavailable() {
        let outcome = classify(FragmentResponse::ok("ERROR"), &fetch_config());
        assert_eq!(outcome, FetchOutcome::Unavailable(UnavailableReason::Sentinel));
    }

    #[test]
    fn sentinel_match_is_exact() {
        for body in ["error", "ERROR\n", " ERROR", "<p>ERROR</p>"] {
            let outcome = classify(FragmentResponse::ok(body), &fetch_config());
            assert_eq!(outcome, FetchOutcome::Fragment(body.to_owned()), "body {body:?}");
        }
    }

    #[test]
    fn sentinel_sniffing_can_be_disabled() {
        let mut fetch = fetch_config();
        fetch.sentinel = SentinelMode::Off;
        let outcome = classify(FragmentResponse::ok("ERROR"), &fetch);
        assert_eq!(outcome, FetchOutcome::Fragment("ERROR".to_owned()));
    }

    #[test]
    fn non_success_status_is_unavailable() {
        let outcome = classify(FragmentResponse::status(403, "<p>denied</p>"), &fetch_config());
        assert_eq!(outcome, FetchOutcome::Unavailable(UnavailableReason::Status(403)));
    }

    #[test]
    fn non_success_status_can_be_injected() {
        let mut fetch = fetch_config();
        fetch.treat_non_success_as_unavailable = false;
        let outcome = classify(FragmentResponse::status(404, "<p>missing</p>"), &fetch);
        assert_eq!(outcome, FetchOutcome::Fragment("<p>missing</p>".to_owned()));
    }

    #[test]
    fn undecodable_body_is_malformed() {
        let response = FragmentResponse { status: 200, body: None };
        let outcome = classify(response, &fetch_config());
        assert_eq!(outcome, FetchOutcome::Unavailable(UnavailableReason::MalformedBody));
    }
}
