//! Owned violation reports for diagnostic sinks
//!
//! An [`Observation`] only lives for the duration of an observer call.
//! [`ViolationReport`] copies what a sink usually keeps. With the `serde`
//! feature it serializes as a flat record.
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use weir::{argument, scope, ViolationKind, ViolationReport};
//!
//! let reports: Arc<Mutex<Vec<ViolationReport>>> = Arc::default();
//! let sink = Arc::clone(&reports);
//! let guard = scope::begin(move |obs| sink.lock().unwrap().push(obs.to_report()));
//!
//! let _ = argument(Option::<u8>::None, "level").require_value();
//! guard.release();
//!
//! let reports = reports.lock().unwrap();
//! assert_eq!(reports[0].param, "level");
//! assert_eq!(reports[0].kind, ViolationKind::Null);
//! ```

use std::fmt;

use crate::error::ViolationKind;
use crate::scope::Observation;

/// A failed check, detached from the observer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationReport {
    /// Name of the argument that failed.
    pub param: String,
    /// Kind of check that failed.
    pub kind: ViolationKind,
    /// Violation message.
    pub message: String,
    /// `Display` output of the raised error.
    pub error: String,
    /// Source file of the failing call.
    pub file: String,
    /// Line of the failing call.
    pub line: u32,
    /// Column of the failing call.
    pub column: u32,
}

impl ViolationReport {
    pub(crate) fn from_observation(observation: &Observation<'_>) -> Self {
        let location = observation.location();
        ViolationReport {
            param: observation.param().to_string(),
            kind: observation.kind(),
            message: observation.message().to_string(),
            error: observation.error().to_string(),
            file: location.file().to_string(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for ViolationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} violation on '{}': {}",
            self.file, self.line, self.column, self.kind, self.param, self.message
        )
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::ser::SerializeStruct;
    use serde::{Serialize, Serializer};

    use super::ViolationReport;
    use crate::error::ViolationKind;

    impl Serialize for ViolationKind {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.as_str())
        }
    }

    impl Serialize for ViolationReport {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("ViolationReport", 7)?;
            state.serialize_field("param", &self.param)?;
            state.serialize_field("kind", &self.kind)?;
            state.serialize_field("message", &self.message)?;
            state.serialize_field("error", &self.error)?;
            state.serialize_field("file", &self.file)?;
            state.serialize_field("line", &self.line)?;
            state.serialize_field("column", &self.column)?;
            state.end()
        }
    }

}
