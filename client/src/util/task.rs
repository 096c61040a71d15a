//! Component-scoped async tasks.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages start requests that may still be in flight when the user navigates
//! away. Every such request is bound to the page's `TaskScope`; cancelling the
//! scope on cleanup aborts them so no late result writes into disposed
//! signals.

#[cfg(test)]
#[path = "task_test.rs"]
mod task_test;

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{AbortHandle, Abortable, Aborted};

#[derive(Default)]
struct ScopeInner {
    cancelled: bool,
    next_id: u64,
    handles: Vec<(u64, AbortHandle)>,
}

/// Removes a bound future's handle from its scope once the future is done
/// with it, whether it finished, was aborted, or was dropped unpolled.
struct Registration {
    scope: TaskScope,
    id: u64,
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.scope.lock().handles.retain(|(id, _)| *id != self.id);
    }
}

/// Group of abortable futures cancelled together.
#[derive(Clone, Default)]
pub struct TaskScope {
    inner: Arc<Mutex<ScopeInner>>,
}

impl TaskScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope cancelled when the current reactive owner is disposed.
    #[must_use]
    pub fn for_component() -> Self {
        let scope = Self::new();
        let on_dispose = scope.clone();
        leptos::prelude::on_cleanup(move || on_dispose.cancel());
        scope
    }

    /// Wrap `future` so it resolves to `Err(Aborted)` once the scope is
    /// cancelled. Binding to an already cancelled scope aborts immediately.
    pub fn bind<F: Future>(&self, future: F) -> impl Future<Output = Result<F::Output, Aborted>> + use<F> {
        let (handle, abort_registration) = AbortHandle::new_pair();
        let registration = {
            let mut inner = self.lock();
            if inner.cancelled {
                handle.abort();
                None
            } else {
                let id = inner.next_id;
                inner.next_id += 1;
                inner.handles.push((id, handle));
                Some(Registration { scope: self.clone(), id })
            }
        };
        async move {
            let _registration = registration;
            Abortable::new(future, abort_registration).await
        }
    }

    pub fn cancel(&self) {
        let mut inner = self.lock();
        inner.cancelled = true;
        for (_, handle) in inner.handles.drain(..) {
            handle.abort();
        }
    }

    /// Bound futures that have not finished yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock().handles.len()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.lock().cancelled
    }

    /// Run `future` on the browser event loop until it finishes or the scope
    /// is cancelled.
    #[cfg(feature = "hydrate")]
    pub fn spawn(&self, future: impl Future<Output = ()> + 'static) {
        let task = self.bind(future);
        leptos::task::spawn_local(async move {
            if task.await.is_err() {
                log::debug!("scoped task aborted");
            }
        });
    }

    fn lock(&self) -> MutexGuard<'_, ScopeInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
