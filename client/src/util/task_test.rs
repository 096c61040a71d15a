use super::*;
use futures::executor::block_on;
use futures::future::{self, Aborted};

#[test]
fn bound_future_completes_normally() {
    let scope = TaskScope::new();
    assert_eq!(block_on(scope.bind(async { 7 })), Ok(7));
    assert!(!scope.is_cancelled());
}

#[test]
fn cancel_aborts_pending_futures() {
    let scope = TaskScope::new();
    let pending = scope.bind(future::pending::<()>());
    scope.cancel();
    assert_eq!(block_on(pending), Err(Aborted));
    assert!(scope.is_cancelled());
}

#[test]
fn bind_after_cancel_aborts_immediately() {
    let scope = TaskScope::new();
    scope.cancel();
    assert_eq!(block_on(scope.bind(async { 1 })), Err(Aborted));
}

#[test]
fn clones_share_cancellation() {
    let scope = TaskScope::new();
    let pending = scope.bind(future::pending::<()>());
    scope.clone().cancel();
    assert!(scope.is_cancelled());
    assert_eq!(block_on(pending), Err(Aborted));
}

#[test]
fn finished_futures_release_their_handles() {
    let scope = TaskScope::new();
    for n in 0..3 {
        assert_eq!(block_on(scope.bind(async move { n })), Ok(n));
    }
    assert_eq!(scope.pending(), 0);
}

#[test]
fn pending_counts_only_unfinished_futures() {
    let scope = TaskScope::new();
    let waiting = scope.bind(future::pending::<()>());
    let done = scope.bind(async {});
    assert_eq!(scope.pending(), 2);

    assert_eq!(block_on(done), Ok(()));
    assert_eq!(scope.pending(), 1);

    drop(waiting);
    assert_eq!(scope.pending(), 0);
}
