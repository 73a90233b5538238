//! Turning a failed check into an error
//!
//! Every failed check ends in `Argument::violation`. The message is formed
//! first. Then the error family builds the error, the failure is logged and
//! the interception scopes are notified. Observers therefore see
//! the exact error the caller receives.

use std::panic::Location;

use crate::argument::Argument;
use crate::error::{BoxError, Raise, Violation, ViolationKind};
use crate::scope::{self, Observation};

/// Name and redaction policy handed to default message builders.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Describe<'a> {
    pub(crate) name: &'a str,
    pub(crate) secure: bool,
}

impl Describe<'_> {
    /// Pick the open or the redacted wording.
    pub(crate) fn text(
        &self,
        open: impl FnOnce(&str) -> String,
        sealed: impl FnOnce(&str) -> String,
    ) -> String {
        if self.secure {
            sealed(self.name)
        } else {
            open(self.name)
        }
    }
}

impl<T, E: Raise> Argument<T, E> {
    pub(crate) fn describe(&self) -> Describe<'_> {
        Describe {
            name: &self.name,
            secure: self.secure,
        }
    }

    /// Raise a violation of `kind` with a final message.
    #[track_caller]
    pub(crate) fn violation(&self, kind: ViolationKind, message: String) -> E {
        self.raise(kind, message, None, Location::caller())
    }

    /// Raise a violation caused by another error.
    #[track_caller]
    pub(crate) fn violation_from(
        &self,
        kind: ViolationKind,
        message: String,
        source: BoxError,
    ) -> E {
        self.raise(kind, message, Some(source), Location::caller())
    }

    fn raise(
        &self,
        kind: ViolationKind,
        message: String,
        source: Option<BoxError>,
        location: &'static Location<'static>,
    ) -> E {
        let observed_message = message.clone();
        let mut violation = Violation::new(kind, self.name.clone(), message, self.secure, location);
        if let Some(source) = source {
            violation = violation.with_source(source);
        }

        let error = E::raise(violation);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            param = %self.name,
            kind = %kind,
            file = location.file(),
            line = location.line(),
            "argument check failed"
        );

        scope::notify(&Observation::new(
            &error,
            &self.name,
            kind,
            &observed_message,
            location,
        ));

        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{argument, ArgumentError};
    use std::error::Error as StdError;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_describe_switches_on_secure() {
        let open = Describe {
            name: "n",
            secure: false,
        };
        let sealed = Describe {
            name: "n",
            secure: true,
        };

        let pick = |d: Describe<'_>| d.text(|n| format!("{n} was 3"), |n| format!("{n} failed"));
        assert_eq!(pick(open), "n was 3");
        assert_eq!(pick(sealed), "n failed");
    }

    #[test]
    fn test_violation_keeps_metadata() {
        let arg = argument(1, "width").secure();
        let err: ArgumentError = arg.violation(ViolationKind::Range, "too narrow".into());

        assert_eq!(err.param_name(), "width");
        assert_eq!(err.message(), "too narrow");
        assert!(err.is_range());
    }

    #[test]
    fn test_violation_from_chains_source() {
        let arg = argument("x", "text");
        let err: ArgumentError =
            arg.violation_from(ViolationKind::Generic, "bad".into(), "root cause".into());

        assert_eq!(err.source().unwrap().to_string(), "root cause");
    }

    #[test]
    fn test_observer_sees_the_returned_error() {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let guard = scope::begin(move |obs| {
            let err = obs.error().downcast_ref::<ArgumentError>().unwrap();
            *sink.lock().unwrap() = Some(err.to_string());
        });

        let err = argument(2, "depth").max(1).unwrap_err();
        guard.release();

        assert_eq!(seen.lock().unwrap().as_deref(), Some(err.to_string().as_str()));
    }

    #[cfg(feature = "tracing")]
    mod tracing_tests {
        use crate::argument;
        use tracing_test::traced_test;

        #[traced_test]
        #[test]
        fn test_failure_is_logged_without_value() {
            let _ = argument(31337, "secret_port").secure().max(1024);

            assert!(logs_contain("argument check failed"));
            assert!(logs_contain("secret_port"));
            assert!(!logs_contain("31337"));
        }
    }
}
