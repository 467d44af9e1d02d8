//! Filter, scroll and session handling of a list view.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::scripted::ScriptedGateway;
use common::{bookings_page, checkins_page};
use hotel_admin::config::{RequestContext, ScrollConfig};
use hotel_admin::filter::{BookingFilters, CheckInFilters, CheckInWindow};
use hotel_admin::gateway::FetchError;
use hotel_admin::list::{LoadOutcome, SkipReason};
use hotel_admin::models::{BookingStatus, PaymentStatus};
use hotel_admin::resource::{Bookings, CheckIns};
use hotel_admin::scroll::{ScrollGeometry, ScrollTrigger};
use hotel_admin::view::{ListView, LoginRedirect};
use tokio::sync::mpsc;

fn view<R: hotel_admin::resource::Resource>(gateway: &Arc<ScriptedGateway>) -> (ListView<R>, Arc<LoginRedirect>) {
    let redirect = Arc::new(LoginRedirect::new());
    let view = ListView::new(gateway.clone(), RequestContext::anonymous(), redirect.clone());
    (view, redirect)
}

/// Sentinel well inside the viewport.
fn visible() -> ScrollGeometry {
    ScrollGeometry {
        scroll_top: 0.0,
        viewport_height: 800.0,
        sentinel_top: 400.0,
        sentinel_height: 10.0,
    }
}

/// Sentinel far below the viewport.
fn hidden() -> ScrollGeometry {
    ScrollGeometry {
        sentinel_top: 5_000.0,
        ..visible()
    }
}

#[tokio::test]
async fn filter_change_resets_and_reloads_page_one() {
    let gateway = ScriptedGateway::new();
    gateway.push_ok(bookings_page(&[1, 2], 1, 3));
    gateway.push_ok(bookings_page(&[3, 4], 2, 3));
    gateway.push_ok(bookings_page(&[10], 1, 1));
    let (view, _) = view::<Bookings>(&gateway);

    view.open().await.unwrap();
    view.load_more().await.unwrap();
    assert_eq!(view.state().len(), 4);

    let outcome = view
        .update_filters(|f| f.status = Some(BookingStatus::Pending))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        Some(LoadOutcome::Loaded {
            added: 1,
            exhausted: true
        })
    );

    let state = view.state();
    assert_eq!(state.items.iter().map(|b| b.id).collect::<Vec<_>>(), vec![10]);

    let last = gateway.requests().pop().unwrap();
    assert_eq!(last.query_value("page"), Some("1"));
    assert_eq!(last.query_value("status"), Some("pending"));
}

#[tokio::test]
async fn setting_the_same_filter_fetches_nothing() {
    let gateway = ScriptedGateway::new();
    gateway.push_ok(bookings_page(&[1], 1, 2));
    let (view, _) = view::<Bookings>(&gateway);
    let view = view.with_filters(BookingFilters {
        payment: Some(PaymentStatus::Paid),
        ..BookingFilters::default()
    });

    view.open().await.unwrap();
    let outcome = view.update_filters(|f| f.payment = Some(PaymentStatus::Paid)).await.unwrap();

    assert_eq!(outcome, None);
    assert_eq!(gateway.calls(), 1);
    assert_eq!(view.state().len(), 1);
}

#[tokio::test]
async fn filter_subscribers_see_changes() {
    let gateway = ScriptedGateway::new();
    gateway.push_ok(checkins_page(&[5], 1, 1));
    let (view, _) = view::<CheckIns>(&gateway);
    let mut rx = view.subscribe_filters();

    view.set_filters(CheckInFilters {
        window: CheckInWindow::Upcoming,
    })
    .await
    .unwrap();

    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().window, CheckInWindow::Upcoming);
    assert_eq!(gateway.requests()[0].query_value("filter"), Some("upcoming"));
}

#[tokio::test]
async fn visible_sentinel_loads_next_page() {
    let gateway = ScriptedGateway::new();
    gateway.push_ok(bookings_page(&[1], 1, 2));
    gateway.push_ok(bookings_page(&[2], 2, 2));
    let (view, _) = view::<Bookings>(&gateway);
    view.open().await.unwrap();

    assert_eq!(view.on_scroll(hidden()).await.unwrap(), None);
    assert_eq!(gateway.calls(), 1);

    let outcome = view.on_scroll(visible()).await.unwrap();
    assert_eq!(
        outcome,
        Some(LoadOutcome::Loaded {
            added: 1,
            exhausted: true
        })
    );

    // Exhausted: the sentinel no longer triggers anything.
    assert_eq!(view.on_scroll(visible()).await.unwrap(), None);
    assert_eq!(gateway.calls(), 2);
}

#[tokio::test]
async fn prefetch_margin_triggers_before_sentinel_is_on_screen() {
    let gateway = ScriptedGateway::new();
    gateway.push_ok(bookings_page(&[1], 1, 2));
    gateway.push_ok(bookings_page(&[2], 2, 2));
    let (view, _) = view::<Bookings>(&gateway);
    let view = view.with_trigger(ScrollTrigger::observe(&ScrollConfig::default()));
    view.open().await.unwrap();

    // 30px below the viewport bottom, inside the 50px margin.
    let near = ScrollGeometry {
        sentinel_top: 830.0,
        ..visible()
    };
    assert!(view.on_scroll(near).await.unwrap().is_some());
}

#[tokio::test]
async fn manual_mode_ignores_scroll_but_load_more_works() {
    let gateway = ScriptedGateway::new();
    gateway.push_ok(bookings_page(&[1], 1, 2));
    gateway.push_ok(bookings_page(&[2], 2, 2));
    let (view, _) = view::<Bookings>(&gateway);
    let view = view.with_trigger(ScrollTrigger::manual());
    view.open().await.unwrap();

    assert!(view.trigger().is_manual());
    assert_eq!(view.on_scroll(visible()).await.unwrap(), None);
    assert_eq!(gateway.calls(), 1);

    view.load_more().await.unwrap();
    assert_eq!(view.state().len(), 2);
    assert_eq!(
        view.load_more().await.unwrap(),
        LoadOutcome::Skipped(SkipReason::Exhausted)
    );
}

#[tokio::test]
async fn unauthorized_list_load_redirects_and_keeps_items() {
    let gateway = ScriptedGateway::new();
    gateway.push_ok(bookings_page(&[1, 2], 1, 3));
    gateway.push_err(FetchError::Unauthorized);
    let (view, redirect) = view::<Bookings>(&gateway);

    view.open().await.unwrap();
    assert!(!redirect.is_requested());

    let err = view.load_more().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(redirect.is_requested());
    assert_eq!(view.state().len(), 2);
    assert!(!view.state().is_exhausted());
}

#[tokio::test]
async fn scroll_observer_feeds_the_view_until_dropped() {
    let gateway = ScriptedGateway::new();
    gateway.push_ok(bookings_page(&[1], 1, 3));
    gateway.push_ok(bookings_page(&[2], 2, 3));
    let (view, _) = view::<Bookings>(&gateway);
    let view = Arc::new(view);
    view.open().await.unwrap();

    let (tx, rx) = mpsc::channel(8);
    let observer = view.observe_scroll(rx);
    assert!(observer.is_connected());

    tx.send(visible()).await.unwrap();
    let start = std::time::Instant::now();
    while view.state().len() < 2 && start.elapsed() < Duration::from_secs(2) {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(view.state().len(), 2);

    observer.disconnect();
    tokio::time::timeout(Duration::from_secs(1), tx.closed())
        .await
        .expect("observer task should release its receiver");
    assert_eq!(gateway.calls(), 2);
}
