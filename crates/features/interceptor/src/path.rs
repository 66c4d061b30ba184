use dynload_domain::navigation::NavPath;

/// Derives the same-origin path a link points at.
///
/// `href` is the link's resolved URL (`anchor.href`), `host` the document's `location.host`
/// (hostname plus optional port). The result keeps everything after the host: path, query and
/// hash.
///
/// Returns `None` when the link leaves the current host: another host, another port, a
/// host-less scheme such as `mailto:`, or a lookalike where `host` only appears later in the URL.
/// Root-relative hrefs (`/dashboard`) are taken as already same-origin.
///
/// ```rust
/// use dynload_interceptor::derive_path;
///
/// let path = derive_path("http://host.example/app/page?x=1", "host.example").unwrap();
/// assert_eq!(path.as_str(), "/app/page?x=1");
/// assert!(derive_path("https://elsewhere.example/app", "host.example").is_none());
/// ```
#[must_use]
pub fn derive_path(href: &str, host: &str) -> Option<NavPath> {
    if host.is_empty() {
        return None;
    }

    if href.starts_with('/') && !href.starts_with("//") {
        return NavPath::new(href);
    }

    let (_, after_scheme) = href.split_once("//")?;
    let authority_end = after_scheme.find(['/', '?', '#']).unwrap_or(after_scheme.len());
    let (authority, rest) = after_scheme.split_at(authority_end);

    // `user:pass@host` keeps the credentials out of the comparison.
    let authority = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    if !authority.eq_ignore_ascii_case(host) {
        return None;
    }

    if rest.starts_with('/') { NavPath::new(rest) } else { NavPath::new(format!("/{rest}")) }
}
