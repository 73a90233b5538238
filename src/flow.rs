//! Carrying interception scopes across `.await`
//!
//! A thread's scope stack is only correct for code that stays on that
//! thread. A future that may be resumed on another worker carries its own
//! stack instead: [`Flow`] installs that stack around every poll and saves
//! it again afterwards, so the thread it happens to run on never leaks into
//! it.
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use weir::{argument, scope, FlowExt};
//!
//! # futures::executor::block_on(async {
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! async move {
//!     let _guard = scope::begin(move |obs| sink.lock().unwrap().push(obs.param().to_string()));
//!     std::future::ready(()).await;
//!     let _ = argument(0, "after_await").min(1);
//! }
//! .in_new_flow()
//! .await;
//!
//! assert_eq!(*seen.lock().unwrap(), vec!["after_await"]);
//! # });
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::scope::{self, Stack};

/// A future running in its own logical flow.
///
/// Scopes begun while the future runs live on the flow's stack. Guards for
/// those scopes should be released inside the future as well.
#[must_use = "futures do nothing unless polled"]
pub struct Flow<F> {
    inner: Pin<Box<F>>,
    stack: Stack,
}

impl<F: Future> Flow<F> {
    fn new(future: F, stack: Stack) -> Self {
        Flow {
            inner: Box::pin(future),
            stack,
        }
    }
}

impl<F: Future> Future for Flow<F> {
    type Output = F::Output;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        let installed = Installed::enter(&mut this.stack);
        let result = this.inner.as_mut().poll(cx);
        drop(installed);
        result
    }
}

impl<F> fmt::Debug for Flow<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0;
        let mut cursor = self.stack.as_deref();
        while let Some(frame) = cursor {
            if frame.is_live() {
                depth += 1;
            }
            cursor = frame.parent();
        }
        f.debug_struct("Flow").field("depth", &depth).finish()
    }
}

/// Swaps a flow's stack into the thread for one poll. Dropping it swaps the
/// stack back out, including when the poll panics.
struct Installed<'a> {
    slot: &'a mut Stack,
    previous: Stack,
}

impl<'a> Installed<'a> {
    fn enter(slot: &'a mut Stack) -> Self {
        let previous = scope::swap(slot.take());
        Installed { slot, previous }
    }
}

impl Drop for Installed<'_> {
    fn drop(&mut self) {
        *self.slot = scope::swap(self.previous.take());
    }
}

/// Run futures in a logical flow of their own.
pub trait FlowExt: Future + Sized {
    /// Run in a flow that starts with the scopes active right now.
    ///
    /// Scopes begun later by the caller are not seen by the future, and
    /// scopes the future begins are not seen by the caller.
    fn in_current_flow(self) -> Flow<Self> {
        Flow::new(self, scope::current())
    }

    /// Run in a flow with no active scopes.
    fn in_new_flow(self) -> Flow<Self> {
        Flow::new(self, None)
    }
}

impl<F: Future> FlowExt for F {}

/// Spawn a task on the tokio runtime that inherits the caller's scopes.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use weir::{argument, flow, scope};
///
/// # #[tokio::main(flavor = "multi_thread", worker_threads = 2)]
/// # async fn main() {
/// let hits = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&hits);
/// let guard = scope::begin(move |_| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// flow::spawn(async {
///     tokio::task::yield_now().await;
///     let _ = argument(0, "worker").min(1);
/// })
/// .await
/// .unwrap();
///
/// guard.release();
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// # }
/// ```
#[cfg(feature = "async")]
pub fn spawn<F>(future: F) -> tokio::task::JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(future.in_current_flow())
}
