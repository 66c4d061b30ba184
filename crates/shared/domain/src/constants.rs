/// Body the server writes when it cannot produce a fragment and wants a full page load.
pub const SENTINEL_BODY: &str = "ERROR";

/// Query parameter asking the server for a fragment instead of a full document.
pub const FRAGMENT_PARAM: &str = "ajax";
pub const FRAGMENT_VALUE: &str = "1";

/// Selector contract with the page template.
pub const NAV_ITEM_SELECTOR: &str = ".nav-item";
pub const NAV_LINK_SELECTOR: &str = ".nav-item a";
pub const SESSION_MARKER_ID: &str = "logged-in";
pub const CONTENT_ID: &str = "content";
pub const ACTIVE_CLASS: &str = "active";

/// Id of the optional `<script type="application/json">` element carrying page config.
pub const CONFIG_ELEMENT_ID: &str = "dynload-config";
