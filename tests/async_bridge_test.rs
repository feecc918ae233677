#![cfg(feature = "tokio")]

/*!
 * Async Bridge Tests
 *
 * Coverage for `wait_async`, which offloads the blocking wait onto the
 * tokio blocking pool
 */

use std::time::Duration;
use waitgroup::WaitGroup;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_wait_async_resolves_after_last_done() {
    let wg = WaitGroup::new();
    wg.add(2);

    let waiter = {
        let wg = wg.clone();
        tokio::spawn(async move { wg.wait_async().await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    wg.done();
    tokio::time::sleep(Duration::from_millis(50)).await;
    wg.done();

    waiter.await.unwrap();
    assert_eq!(wg.count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_wait_async_with_zero_counter_resolves_immediately() {
    let wg = WaitGroup::new();
    wg.wait_async().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_wait_async_cross_cycle_reuse() {
    let wg = WaitGroup::new();

    for _ in 0..2 {
        wg.add(1);

        let worker = {
            let wg = wg.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                wg.done();
            })
        };

        wg.wait_async().await;
        assert_eq!(wg.count(), 0);
        worker.await.unwrap();
    }
}
