mod fixtures;

use dynload_interceptor::domain::config::{InterceptorConfig, OverlapPolicy};
use dynload_interceptor::domain::navigation::{
    Completion, FetchOutcome, Sequence, UnavailableReason,
};
use dynload_interceptor::{Click, ClickDecision, FragmentResponse, NavigationInterceptor, PendingLoad};
use fixtures::{DASHBOARD, FakePage, FakeTransport, SERVERS, href};

type Interceptor = NavigationInterceptor<FakePage, FakeTransport>;

fn interceptor(page: &FakePage, transport: &FakeTransport, overlap: OverlapPolicy) -> Interceptor {
    let mut config = InterceptorConfig::default();
    config.overlap = overlap;
    NavigationInterceptor::builder()
        .config(config)
        .page(page.clone())
        .transport(transport.clone())
        .build()
        .expect("default config is valid")
}

fn intercept(ic: &Interceptor, link: usize, path: &str) -> PendingLoad<usize> {
    match ic.begin(Click::primary(link, href(path))) {
        ClickDecision::Intercepted(pending) => pending,
        ClickDecision::PassThrough(reason) => panic!("{path} passed through: {reason:?}"),
    }
}

fn slow_dashboard_fast_servers(page: &FakePage) -> FakeTransport {
    FakeTransport::new(page)
        .route_delayed("/dashboard?ajax=1", 300, FragmentResponse::ok("<div>Dashboard</div>"))
        .route_delayed("/servers?ajax=1", 20, FragmentResponse::ok("<div>Servers</div>"))
}

#[tokio::test(start_paused = true)]
async fn latest_click_wins_when_the_older_response_is_slower() {
    let page = FakePage::logged_in();
    let transport = slow_dashboard_fast_servers(&page);
    let ic = interceptor(&page, &transport, OverlapPolicy::LatestWins);

    let first = intercept(&ic, DASHBOARD, "/dashboard");
    let second = intercept(&ic, SERVERS, "/servers");
    assert_eq!(ic.snapshot().in_flight, 2);

    let (a, b) = tokio::join!(ic.load(first), ic.load(second));

    assert_eq!(a, Completion::Discarded { latest: Sequence::new(2) });
    assert_eq!(b, Completion::Applied);
    assert_eq!(page.content().as_deref(), Some("<div>Servers</div>"));
    assert_eq!(page.active(), vec![false, false, true]);
    assert_eq!(page.history_urls(), vec!["/dashboard", "/servers"]);

    let state = ic.snapshot();
    assert_eq!(state.latest_applied, Some(Sequence::new(2)));
    assert_eq!(state.in_flight, 0);
}

#[tokio::test(start_paused = true)]
async fn latest_click_wins_when_the_older_response_is_faster() {
    let page = FakePage::logged_in();
    let transport = FakeTransport::new(&page)
        .route_delayed("/dashboard?ajax=1", 10, FragmentResponse::ok("<div>Dashboard</div>"))
        .route_delayed("/servers?ajax=1", 200, FragmentResponse::ok("<div>Servers</div>"));
    let ic = interceptor(&page, &transport, OverlapPolicy::LatestWins);

    let first = intercept(&ic, DASHBOARD, "/dashboard");
    let second = intercept(&ic, SERVERS, "/servers");
    let (a, b) = tokio::join!(ic.load(first), ic.load(second));

    assert_eq!(a, Completion::Discarded { latest: Sequence::new(2) });
    assert_eq!(b, Completion::Applied);
    assert_eq!(page.content().as_deref(), Some("<div>Servers</div>"));
    assert_eq!(page.active(), vec![false, false, true]);
}

#[tokio::test(start_paused = true)]
async fn last_completed_response_wins_without_the_guard() {
    let page = FakePage::logged_in();
    let transport = slow_dashboard_fast_servers(&page);
    let ic = interceptor(&page, &transport, OverlapPolicy::LastCompletedWins);

    let first = intercept(&ic, DASHBOARD, "/dashboard");
    let second = intercept(&ic, SERVERS, "/servers");
    let (a, b) = tokio::join!(ic.load(first), ic.load(second));

    assert_eq!((a, b), (Completion::Applied, Completion::Applied));
    // The address bar says /servers while the page shows the dashboard.
    assert_eq!(page.content().as_deref(), Some("<div>Dashboard</div>"));
    assert_eq!(page.active(), vec![false, true, false]);
    assert_eq!(page.history_urls().last().map(String::as_str), Some("/servers"));
    assert_eq!(ic.snapshot().latest_applied, Some(Sequence::new(1)));
}

#[test]
fn stale_failure_does_not_force_navigation() {
    let page = FakePage::logged_in();
    let transport = FakeTransport::new(&page);
    let ic = interceptor(&page, &transport, OverlapPolicy::LatestWins);

    let first = intercept(&ic, DASHBOARD, "/dashboard");
    let second = intercept(&ic, SERVERS, "/servers");

    let stale = ic.complete(first, FetchOutcome::Unavailable(UnavailableReason::Sentinel));
    assert_eq!(stale, Completion::Discarded { latest: Sequence::new(2) });
    assert!(page.locations().is_empty());

    let current = ic.complete(second, FetchOutcome::Fragment("<div>Servers</div>".into()));
    assert_eq!(current, Completion::Applied);
    assert_eq!(page.content().as_deref(), Some("<div>Servers</div>"));
}

#[test]
fn stale_failure_still_navigates_without_the_guard() {
    let page = FakePage::logged_in();
    let transport = FakeTransport::new(&page);
    let ic = interceptor(&page, &transport, OverlapPolicy::LastCompletedWins);

    let first = intercept(&ic, DASHBOARD, "/dashboard");
    let _second = intercept(&ic, SERVERS, "/servers");

    let completion = ic.complete(first, FetchOutcome::Unavailable(UnavailableReason::Status(502)));

    assert_eq!(completion, Completion::FellBack { reason: UnavailableReason::Status(502) });
    assert_eq!(page.locations(), vec!["/dashboard"]);
}

#[test]
fn sequences_increase_across_clones() {
    let page = FakePage::logged_in();
    let transport = FakeTransport::new(&page);
    let ic = interceptor(&page, &transport, OverlapPolicy::LatestWins);
    let clone = ic.clone();

    let a = intercept(&ic, DASHBOARD, "/dashboard");
    let b = intercept(&clone, SERVERS, "/servers");
    let c = intercept(&ic, DASHBOARD, "/dashboard");

    assert!(a.seq() < b.seq() && b.seq() < c.seq());
    assert_eq!(clone.snapshot().latest_requested, Some(c.seq()));
    assert_eq!(ic.snapshot().in_flight, 3);
}
