// ABOUTME: Tests for minimum-interval pacing.
// ABOUTME: Covers first-call behavior, spacing waits, and start-to-start measurement.

use std::time::{Duration, Instant};

use super::pacing::Pacer;

#[tokio::test]
async fn test_first_call_is_immediate() {
    let pacer = Pacer::new(Duration::from_millis(100));

    let start = Instant::now();
    pacer.pace().await;
    let elapsed = start.elapsed();

    assert!(
        elapsed < Duration::from_millis(50),
        "First call should not wait, took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_second_call_waits_out_the_interval() {
    let pacer = Pacer::new(Duration::from_millis(50));
    pacer.pace().await;

    let start = Instant::now();
    pacer.pace().await;
    let elapsed = start.elapsed();

    assert!(
        elapsed >= Duration::from_millis(45),
        "Second call should wait ~50ms, waited {:?}",
        elapsed
    );
    assert!(
        elapsed < Duration::from_millis(500),
        "Second call should not wait excessively, waited {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_elapsed_time_counts_toward_the_gap() {
    let pacer = Pacer::new(Duration::from_millis(40));
    pacer.pace().await;

    // More than the interval has already passed; no further wait is due.
    tokio::time::sleep(Duration::from_millis(60)).await;

    let start = Instant::now();
    pacer.pace().await;
    let elapsed = start.elapsed();

    assert!(
        elapsed < Duration::from_millis(20),
        "Call after a long idle period should not wait, took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_zero_interval_never_waits() {
    let pacer = Pacer::new(Duration::ZERO);

    let start = Instant::now();
    pacer.pace().await;
    pacer.pace().await;
    pacer.pace().await;
    let elapsed = start.elapsed();

    assert!(
        elapsed < Duration::from_millis(50),
        "Zero interval should never wait, took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_min_interval_accessor() {
    let pacer = Pacer::new(Duration::from_millis(100));
    assert_eq!(pacer.min_interval(), Duration::from_millis(100));
}
