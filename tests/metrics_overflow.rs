//! Drop-on-full behaviour of the timing channel
//!
//! With nobody draining, exactly `capacity` records are kept and every
//! dispatch beyond that still completes normally.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use segroute::{config::MetricsConfig, metrics, router::Router};
use std::sync::Arc;
use std::time::Duration;

const CAPACITY: usize = 16;

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("valid request")
}

#[tokio::test]
async fn test_sequential_excess_is_dropped() {
    let (mut router, mut rx) =
        Router::new(&MetricsConfig::new(CAPACITY, 4).expect("valid metrics config"));
    router
        .route(Method::GET, "/ping", |_req| async { "pong" })
        .unwrap();

    for _ in 0..CAPACITY + 10 {
        let response = router.dispatch(get("/ping")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let mut kept = 0;
    while rx.try_recv().is_some() {
        kept += 1;
    }
    assert_eq!(kept, CAPACITY);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_producers_never_block() {
    let (mut router, rx) =
        Router::new(&MetricsConfig::new(CAPACITY, 4).expect("valid metrics config"));
    router
        .route(Method::GET, "/ping", |_req| async { "pong" })
        .unwrap();
    let router = Arc::new(router);

    let total = CAPACITY * 8;
    let all_done = tokio::time::timeout(Duration::from_secs(5), async {
        let handles: Vec<_> = (0..total)
            .map(|_| {
                let router = Arc::clone(&router);
                tokio::spawn(async move { router.dispatch(get("/ping")).await.status() })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.expect("task should not panic"), StatusCode::OK);
        }
    })
    .await;

    assert!(all_done.is_ok(), "dispatch must not wait on a full channel");
    assert_eq!(rx.len(), CAPACITY);
}

#[test]
fn test_sender_reports_drops() {
    let (tx, _rx) = metrics::channel(CAPACITY);

    let outcomes: Vec<bool> = (0..CAPACITY + 3)
        .map(|_| tx.try_record(metrics::MetricsRecord::default()))
        .collect();

    assert!(outcomes[..CAPACITY].iter().all(|sent| *sent));
    assert!(outcomes[CAPACITY..].iter().all(|sent| !*sent));
}
