//! Testing utilities for code that validates its arguments
//!
//! Assertion macros for check results, a [`Capture`] scope that records
//! every failed check, and property-based testing support behind the
//! `proptest` feature.
//!
//! # Examples
//!
//! ## Assertion Macros
//!
//! ```rust
//! use weir::{argument, assert_passes, assert_violation, ViolationKind};
//!
//! assert_passes!(argument(5, "n").min(1));
//! assert_violation!(argument(0, "n").min(1), ViolationKind::Range, "n");
//! ```
//!
//! ## Capturing Failures
//!
//! ```rust
//! use weir::{argument, testing};
//!
//! let capture = testing::capture();
//! let _ = argument("", "title").not_empty();
//!
//! let reports = capture.finish();
//! assert_eq!(reports.len(), 1);
//! assert_eq!(reports[0].param, "title");
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::report::ViolationReport;
use crate::scope::{self, ScopeGuard};

/// Assert that a check chain passed.
///
/// This macro will panic if the result is an error.
///
/// # Example
///
/// ```rust
/// use weir::{argument, assert_passes};
///
/// assert_passes!(argument("ok", "s").not_empty());
/// ```
#[macro_export]
macro_rules! assert_passes {
    ($result:expr) => {
        match $result {
            ::std::result::Result::Ok(_) => {}
            ::std::result::Result::Err(e) => {
                panic!("Expected check to pass, got violation: {}", e);
            }
        }
    };
}

/// Assert that a check chain failed with the given kind and parameter name.
///
/// Works with any error family that reports its kind and name through
/// [`Raise`](crate::Raise).
///
/// # Example
///
/// ```rust
/// use weir::{argument, assert_violation, ViolationKind};
///
/// assert_violation!(argument(None::<u8>, "level").require_value(), ViolationKind::Null, "level");
/// ```
#[macro_export]
macro_rules! assert_violation {
    ($result:expr, $kind:expr, $param:expr) => {
        match $result {
            ::std::result::Result::Err(e) => {
                assert_eq!(
                    $crate::Raise::kind(&e),
                    ::std::option::Option::Some($kind),
                    "violation kind mismatch: {}",
                    e
                );
                assert_eq!(
                    $crate::Raise::param_name(&e),
                    ::std::option::Option::Some($param),
                    "violation parameter mismatch: {}",
                    e
                );
            }
            ::std::result::Result::Ok(_) => {
                panic!("Expected {} violation on '{}', got a pass", $kind, $param);
            }
        }
    };
}

/// Records every failed check raised while it is active.
///
/// Created by [`capture`]. The capture is an ordinary interception scope,
/// so it follows the same nesting and flow rules.
#[must_use = "the capture stops recording as soon as it is dropped"]
pub struct Capture {
    reports: Arc<Mutex<Vec<ViolationReport>>>,
    guard: ScopeGuard,
}

/// Begin recording failed checks on the current flow.
///
/// Failures are recorded and still propagate to outer scopes.
pub fn capture() -> Capture {
    let reports = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&reports);
    let guard = scope::begin(move |obs| {
        sink.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(obs.to_report());
    });
    Capture { reports, guard }
}

impl Capture {
    /// Reports recorded so far.
    pub fn reports(&self) -> Vec<ViolationReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stop recording and return everything recorded.
    pub fn finish(self) -> Vec<ViolationReport> {
        let Capture { reports, guard } = self;
        guard.release();
        let mut reports = reports.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *reports)
    }
}

impl fmt::Debug for Capture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capture")
            .field("recorded", &self.reports().len())
            .finish()
    }
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for crate::error::ViolationKind {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        use crate::error::ViolationKind;

        prop_oneof![
            Just(ViolationKind::Null),
            Just(ViolationKind::Range),
            Just(ViolationKind::Generic),
        ]
        .boxed()
    }
}
