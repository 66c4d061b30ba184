use dynload_domain::constants::{
    ACTIVE_CLASS, CONTENT_ID, FRAGMENT_PARAM, FRAGMENT_VALUE, NAV_ITEM_SELECTOR,
    NAV_LINK_SELECTOR, SENTINEL_BODY, SESSION_MARKER_ID,
};

#[test]
fn constants_match_page_template_contract() {
    assert_eq!(SENTINEL_BODY, "ERROR");
    assert_eq!(FRAGMENT_PARAM, "ajax");
    assert_eq!(FRAGMENT_VALUE, "1");
    assert_eq!(NAV_ITEM_SELECTOR, ".nav-item");
    assert_eq!(NAV_LINK_SELECTOR, ".nav-item a");
    assert_eq!(SESSION_MARKER_ID, "logged-in");
    assert_eq!(CONTENT_ID, "content");
    assert_eq!(ACTIVE_CLASS, "active");
}
