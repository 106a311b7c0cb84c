use crate::JoinBarrier;

use tokio::time::{Duration, Instant, sleep, timeout};

#[tokio::test]
async fn given_no_tickets_when_wait_then_resolves_immediately() {
    let barrier = JoinBarrier::new();

    let result = timeout(Duration::from_millis(10), barrier.wait()).await;

    assert!(result.is_ok());
    assert_eq!(barrier.remaining(), 0);
}

#[tokio::test]
async fn given_outstanding_ticket_when_wait_then_blocks() {
    let barrier = JoinBarrier::new();
    let _ticket = barrier.ticket();

    let result = timeout(Duration::from_millis(10), barrier.wait()).await;

    assert!(result.is_err());
    assert_eq!(barrier.remaining(), 1);
}

#[tokio::test(start_paused = true)]
async fn given_tickets_dropped_at_different_times_when_wait_then_resolves_at_last_drop() {
    let barrier = JoinBarrier::new();
    let start = Instant::now();
    let first = barrier.ticket();
    let second = barrier.ticket();

    tokio::spawn(async move {
        sleep(Duration::from_millis(20)).await;
        drop(first);
    });
    tokio::spawn(async move {
        sleep(Duration::from_millis(70)).await;
        drop(second);
    });

    let resolved_at = barrier.wait().await;

    assert_eq!(resolved_at - start, Duration::from_millis(70));
    assert_eq!(barrier.remaining(), 0);
}

#[tokio::test]
async fn given_ticket_holder_panics_when_wait_then_still_resolves() {
    let barrier = JoinBarrier::new();
    let ticket = barrier.ticket();

    let handle = tokio::spawn(async move {
        let _ticket = ticket;
        panic!("finalizer blew up");
    });
    assert!(handle.await.is_err());

    let result = timeout(Duration::from_millis(10), barrier.wait()).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn given_cloned_barrier_when_ticket_dropped_then_all_clones_resolve() {
    let barrier = JoinBarrier::new();
    let observer = barrier.clone();
    let ticket = barrier.ticket();

    assert_eq!(observer.remaining(), 1);
    drop(ticket);

    let result = timeout(Duration::from_millis(10), observer.wait()).await;
    assert!(result.is_ok());
}
