//! Checks available on every argument
//!
//! Each check consumes the argument and returns it unchanged on success. On
//! failure it returns the argument's error family, built through the
//! violation pipeline. Checks come in pairs: `check(..)` uses a default
//! message and `check_with(.., factory)` builds the message from the
//! offending value.
//!
//! Checks other than the presence checks succeed when the value is absent.
//!
//! # Example
//!
//! ```rust
//! use weir::argument;
//!
//! let name = argument(Some("  "), "nickname");
//! let err = name.not_white_space_with(|v| format!("nickname '{v}' is blank")).unwrap_err();
//! assert_eq!(err.message(), "nickname '  ' is blank");
//!
//! // absent values defer to an explicit presence check
//! assert!(argument(None::<&str>, "nickname").not_white_space().is_ok());
//! ```

mod collection;
mod compare;
mod null;
mod predicate;
mod string;

use crate::argument::Argument;
use crate::error::{Raise, ViolationKind};
use crate::pipeline::Describe;
use crate::subject::Subject;

impl<T: Subject, E: Raise> Argument<T, E> {
    /// Run one check against the subject.
    ///
    /// Absent subjects pass. `message` is only called on failure.
    #[track_caller]
    pub(crate) fn check(
        self,
        kind: ViolationKind,
        passes: impl FnOnce(&T::Target) -> bool,
        message: impl FnOnce(&T::Target, Describe<'_>) -> String,
    ) -> Result<Self, E> {
        let failure = match self.value.subject() {
            Some(subject) if !passes(subject) => Some(message(subject, self.describe())),
            _ => None,
        };

        match failure {
            None => Ok(self),
            Some(text) => Err(self.violation(kind, text)),
        }
    }
}
