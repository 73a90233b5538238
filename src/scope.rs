//! Interception scopes
//!
//! A scope registers an observer that sees every failed check raised within
//! its extent, without touching the call sites that perform the checks.
//! Scopes nest. The innermost scope is notified first, and a scope begun
//! with `propagate = false` stops outer scopes from being notified.
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use weir::{argument, scope};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! let guard = scope::begin(move |obs| {
//!     sink.lock().unwrap().push(obs.param().to_string());
//! });
//!
//! let _ = argument(5, "retries").max(3);
//! guard.release();
//!
//! assert_eq!(*seen.lock().unwrap(), vec!["retries"]);
//! ```
//!
//! # Flows
//!
//! The frame stack belongs to the current logical flow. Synchronous code
//! runs in its thread's flow. Async code that may resume on another worker
//! thread carries its own stack via [`FlowExt`](crate::flow::FlowExt), so
//! scopes begun before an `.await` still see failures raised after it, and
//! concurrent flows never see each other's scopes. A plain spawned task
//! has no flow of its own; wrap it with
//! [`in_current_flow`](crate::flow::FlowExt::in_current_flow) or
//! [`in_new_flow`](crate::flow::FlowExt::in_new_flow) before holding a
//! guard across an `.await`.
//!
//! # Observer failures
//!
//! Observers run before the error is returned to the caller. An observer
//! that panics replaces the failure with its panic.

use std::cell::RefCell;
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::ViolationKind;
use crate::report::ViolationReport;

type Callback = Arc<dyn Fn(&Observation<'_>) + Send + Sync + 'static>;

/// The frame stack of one flow. Frames are immutable and shared, so
/// snapshots are a pointer copy.
pub(crate) type Stack = Option<Arc<Frame>>;

pub(crate) struct Frame {
    callback: Option<Callback>,
    propagate: bool,
    parent: Stack,
    released: AtomicBool,
}

impl Frame {
    pub(crate) fn parent(&self) -> Option<&Frame> {
        self.parent.as_deref()
    }

    /// `false` once the frame's guard has been dropped. Released frames
    /// still linked into a stack are skipped.
    pub(crate) fn is_live(&self) -> bool {
        !self.released.load(Ordering::Acquire)
    }
}

thread_local! {
    static STACK: RefCell<Stack> = const { RefCell::new(None) };
}

/// A failed check as seen by an observer.
///
/// `error` is the exact error the caller is about to receive.
#[derive(Clone, Copy)]
pub struct Observation<'a> {
    error: &'a (dyn StdError + 'static),
    param: &'a str,
    kind: ViolationKind,
    message: &'a str,
    location: &'static Location<'static>,
}

impl<'a> Observation<'a> {
    pub(crate) fn new(
        error: &'a (dyn StdError + 'static),
        param: &'a str,
        kind: ViolationKind,
        message: &'a str,
        location: &'static Location<'static>,
    ) -> Self {
        Observation {
            error,
            param,
            kind,
            message,
            location,
        }
    }

    /// The error being raised. Downcast it to reach the concrete family.
    pub fn error(&self) -> &'a (dyn StdError + 'static) {
        self.error
    }

    /// Name of the argument that failed.
    pub fn param(&self) -> &'a str {
        self.param
    }

    /// Kind of check that failed.
    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    /// Final message of the violation.
    pub fn message(&self) -> &'a str {
        self.message
    }

    /// Where the failing check was called.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Owned snapshot for sinks that outlive the observer call.
    pub fn to_report(&self) -> ViolationReport {
        ViolationReport::from_observation(self)
    }
}

impl fmt::Debug for Observation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observation")
            .field("param", &self.param)
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// Keeps a scope active until dropped or released.
///
/// Guards should be released in the reverse order they were created, on
/// the flow that created them. A guard released out of order, or on
/// another thread, stops its observer but leaves the current stack alone;
/// the frame is unlinked once the scopes above it end.
///
/// The guard is `Send`, but holding it across an `.await` only works
/// inside a [`Flow`](crate::flow::Flow). Wrap the task with
/// [`in_current_flow`](crate::flow::FlowExt::in_current_flow),
/// [`in_new_flow`](crate::flow::FlowExt::in_new_flow) or spawn it with
/// `flow::spawn`.
#[must_use = "the scope ends as soon as the guard is dropped"]
pub struct ScopeGuard {
    frame: Option<Arc<Frame>>,
}

impl ScopeGuard {
    /// End the scope now.
    pub fn release(mut self) {
        if let Some(frame) = self.frame.take() {
            pop(frame);
        }
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        if let Some(frame) = self.frame.take() {
            pop(frame);
        }
    }
}

impl fmt::Debug for ScopeGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("active", &self.frame.is_some())
            .finish()
    }
}

/// Begin a scope whose observer lets notification continue outward.
pub fn begin<F>(callback: F) -> ScopeGuard
where
    F: Fn(&Observation<'_>) + Send + Sync + 'static,
{
    begin_with(callback, true)
}

/// Begin a scope with an explicit propagation policy.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use weir::{argument, scope};
///
/// let outer_hits = Arc::new(AtomicUsize::new(0));
/// let inner_hits = Arc::new(AtomicUsize::new(0));
///
/// let outer_count = Arc::clone(&outer_hits);
/// let _outer = scope::begin(move |_| {
///     outer_count.fetch_add(1, Ordering::SeqCst);
/// });
/// let inner_count = Arc::clone(&inner_hits);
/// let inner = scope::begin_with(
///     move |_| {
///         inner_count.fetch_add(1, Ordering::SeqCst);
///     },
///     false,
/// );
///
/// let _ = argument(0, "n").min(1);
/// inner.release();
///
/// assert_eq!(inner_hits.load(Ordering::SeqCst), 1);
/// assert_eq!(outer_hits.load(Ordering::SeqCst), 0);
/// ```
pub fn begin_with<F>(callback: F, propagate: bool) -> ScopeGuard
where
    F: Fn(&Observation<'_>) + Send + Sync + 'static,
{
    push(Some(Arc::new(callback)), propagate)
}

/// Begin a scope that observes nothing and hides failures from outer scopes.
pub fn barrier() -> ScopeGuard {
    push(None, false)
}

/// Number of active scopes on the current flow.
pub fn depth() -> usize {
    let mut depth = 0;
    let mut cursor = current();
    while let Some(frame) = cursor {
        if frame.is_live() {
            depth += 1;
        }
        cursor = frame.parent.clone();
    }
    depth
}

/// `true` when at least one scope is active on the current flow.
pub fn is_active() -> bool {
    depth() > 0
}

fn push(callback: Option<Callback>, propagate: bool) -> ScopeGuard {
    let frame = STACK.with(|slot| {
        let mut slot = slot.borrow_mut();
        let frame = Arc::new(Frame {
            callback,
            propagate,
            parent: live(slot.take()),
            released: AtomicBool::new(false),
        });
        *slot = Some(Arc::clone(&frame));
        frame
    });
    ScopeGuard { frame: Some(frame) }
}

fn pop(frame: Arc<Frame>) {
    frame.released.store(true, Ordering::Release);
    // The slot is gone during thread teardown; there is nothing to restore.
    let _ = STACK.try_with(|slot| {
        let mut slot = slot.borrow_mut();
        let on_top = slot.as_ref().is_some_and(|top| Arc::ptr_eq(top, &frame));
        if on_top {
            *slot = live(frame.parent.clone());
        } else {
            // Another flow's stack, or a frame still buried under live ones.
            #[cfg(feature = "tracing")]
            tracing::warn!("interception scope released out of order");
        }
    });
}

/// Drop released frames from the top of `stack`.
fn live(mut stack: Stack) -> Stack {
    loop {
        let next = match &stack {
            Some(frame) if !frame.is_live() => frame.parent.clone(),
            _ => return stack,
        };
        stack = next;
    }
}

/// Snapshot of the current flow's stack.
pub(crate) fn current() -> Stack {
    STACK.try_with(|slot| slot.borrow().clone()).ok().flatten()
}

/// Install `stack` as the current flow's stack, returning the previous one.
pub(crate) fn swap(stack: Stack) -> Stack {
    STACK
        .try_with(|slot| std::mem::replace(&mut *slot.borrow_mut(), stack))
        .ok()
        .flatten()
}

/// Walk the stack from the innermost frame outward.
///
/// The stack is snapshotted before any observer runs, so observers may
/// begin scopes or run checks of their own.
pub(crate) fn notify(observation: &Observation<'_>) {
    let mut cursor = current();
    while let Some(frame) = cursor {
        if frame.is_live() {
            if let Some(callback) = &frame.callback {
                callback(observation);
            }
            if !frame.propagate {
                break;
            }
        }
        cursor = frame.parent.clone();
    }
}
