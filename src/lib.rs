//! # Weir
//!
//! > *"Hold the flow back until it is fit to pass"*
//!
//! A Rust library for guard clauses on function arguments.
//!
//! ## Philosophy
//!
//! A guard clause should read like the rule it enforces, report the name of
//! the argument that broke it, and cost nothing when it passes:
//!
//! - **Named handles**: an [`Argument`] pairs a value with the name failures
//!   are reported under
//! - **Chained checks**: every check returns the handle on success, so rules
//!   compose with `?`
//! - **Chosen errors**: the error family is a type parameter, with
//!   [`ArgumentError`] as the default
//! - **Observable failures**: interception [`scope`]s see every failed check
//!   without touching the call sites
//!
//! ## Quick Example
//!
//! ```rust
//! use weir::{arg, argument, ArgumentError};
//!
//! struct Signup {
//!     email: String,
//!     age: Option<u8>,
//! }
//!
//! fn validate(signup: &Signup) -> Result<u8, ArgumentError> {
//!     arg!(&signup.email).not_white_space()?.contains_substring("@")?;
//!
//!     let age = arg!(signup.age).require_value()?.in_range(13, 130)?;
//!     Ok(age.into_value())
//! }
//!
//! let ok = Signup { email: "a@b.io".into(), age: Some(30) };
//! assert_eq!(validate(&ok).unwrap(), 30);
//!
//! let missing = Signup { email: "a@b.io".into(), age: None };
//! let err = validate(&missing).unwrap_err();
//! assert!(err.is_null());
//! assert_eq!(err.to_string(), "age is required but was absent. (parameter 'age')");
//! ```
//!
//! ## Feature Flags
//!
//! - `async` (default): [`flow::spawn`] on the tokio runtime
//! - `tracing` (default): failed checks are logged at `debug` level
//! - `serde`: `Serialize` for [`ViolationReport`] and [`ViolationKind`]
//! - `proptest`: `Arbitrary` for [`ViolationKind`]

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod argument;
pub mod checks;
pub mod custom;
pub mod error;
pub mod flow;
mod pipeline;
pub mod projection;
pub mod report;
pub mod scope;
pub mod subject;
pub mod testing;

// Re-exports
pub use argument::{argument, Argument, ExpressionError, ExpressionFault};
pub use custom::{Construct, ConstructError, CustomViolation};
pub use error::{ArgumentError, BoxError, Raise, Violation, ViolationKind};
pub use flow::{Flow, FlowExt};
pub use report::ViolationReport;
pub use scope::{Observation, ScopeGuard};
pub use subject::{Countable, Membership, Subject};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::argument::{argument, Argument};
    pub use crate::custom::{Construct, CustomViolation};
    pub use crate::error::{ArgumentError, Raise, ViolationKind};
    pub use crate::flow::FlowExt;
    pub use crate::subject::Subject;
    pub use crate::{arg, impl_subject};
}
