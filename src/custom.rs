//! Caller-chosen error types built by constructor probing
//!
//! Types that implement [`Raise`] are built directly. [`Construct`] is for
//! error types that only expose some of the usual constructors. Each
//! constructor reports `None` when the type does not have it. The pipeline
//! tries them in this order:
//!
//! 1. `from_param_and_message(name, message)`
//! 2. `from_message(message)`
//! 3. `empty()`
//!
//! The first constructor that exists wins. If it fails, or none exists, the
//! failure is still reported. It becomes an [`ArgumentError`] of kind
//! [`Generic`](ViolationKind::Generic) under the same parameter name, with
//! the construction problem as its source.
//!
//! # Example
//!
//! ```rust
//! use std::fmt;
//! use weir::{argument, BoxError, Construct, CustomViolation};
//!
//! #[derive(Debug)]
//! struct InvalidOrder(String);
//!
//! impl fmt::Display for InvalidOrder {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "invalid order: {}", self.0)
//!     }
//! }
//!
//! impl std::error::Error for InvalidOrder {}
//!
//! impl Construct for InvalidOrder {
//!     fn from_message(message: &str) -> Option<Result<Self, BoxError>> {
//!         Some(Ok(InvalidOrder(message.to_string())))
//!     }
//! }
//!
//! let err = argument(0, "quantity")
//!     .raising_as::<InvalidOrder>()
//!     .min(1)
//!     .unwrap_err();
//!
//! assert!(matches!(err, CustomViolation::Raised { .. }));
//! assert_eq!(err.param_name(), "quantity");
//! ```

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use crate::error::{ArgumentError, BoxError, Raise, Violation, ViolationKind};

/// Optional constructors for a custom error type.
///
/// Every constructor defaults to `None`, meaning "not available". Return
/// `Some(Err(..))` when the constructor exists but could not build the
/// error.
pub trait Construct: StdError + Send + Sync + Sized + 'static {
    /// Build from the parameter name and message.
    fn from_param_and_message(_param: &str, _message: &str) -> Option<Result<Self, BoxError>> {
        None
    }

    /// Build from the message alone.
    fn from_message(_message: &str) -> Option<Result<Self, BoxError>> {
        None
    }

    /// Build without arguments.
    fn empty() -> Option<Result<Self, BoxError>> {
        None
    }

    /// Record the parameter name on an error built without it.
    ///
    /// Called after `from_message` or `empty` succeeds.
    fn set_param_name(&mut self, _param: &str) {}
}

/// The error family for [`Construct`] types.
#[derive(Debug)]
pub enum CustomViolation<C> {
    /// The custom error was built.
    Raised {
        /// The custom error.
        error: C,
        /// Name of the argument that failed.
        param: Cow<'static, str>,
        /// Kind of check that failed.
        kind: ViolationKind,
    },
    /// No constructor was usable; the failure is reported generically.
    Fallback(ArgumentError),
}

/// Why a custom error could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructError {
    /// The type offers none of the constructors.
    NoConstructor {
        /// Name of the custom error type.
        type_name: &'static str,
    },
}

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructError::NoConstructor { type_name } => {
                write!(f, "{} offers no usable constructor", type_name)
            }
        }
    }
}

impl StdError for ConstructError {}

impl<C> CustomViolation<C> {
    /// Name of the argument that failed, whichever way the error was built.
    pub fn param_name(&self) -> &str {
        match self {
            CustomViolation::Raised { param, .. } => param,
            CustomViolation::Fallback(err) => err.param_name(),
        }
    }

    /// Kind of the error that reached the caller.
    ///
    /// A fallback always reports [`ViolationKind::Generic`].
    pub fn kind(&self) -> ViolationKind {
        match self {
            CustomViolation::Raised { kind, .. } => *kind,
            CustomViolation::Fallback(err) => err.kind(),
        }
    }

    /// The custom error, if it was built.
    pub fn custom(&self) -> Option<&C> {
        match self {
            CustomViolation::Raised { error, .. } => Some(error),
            CustomViolation::Fallback(_) => None,
        }
    }

    /// Consume and return the custom error, if it was built.
    pub fn into_custom(self) -> Option<C> {
        match self {
            CustomViolation::Raised { error, .. } => Some(error),
            CustomViolation::Fallback(_) => None,
        }
    }

    /// The generic error used when construction was impossible.
    pub fn fallback(&self) -> Option<&ArgumentError> {
        match self {
            CustomViolation::Raised { .. } => None,
            CustomViolation::Fallback(err) => Some(err),
        }
    }
}

impl<C: fmt::Display> fmt::Display for CustomViolation<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomViolation::Raised { error, .. } => error.fmt(f),
            CustomViolation::Fallback(err) => err.fmt(f),
        }
    }
}

impl<C: StdError + 'static> StdError for CustomViolation<C> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CustomViolation::Raised { error, .. } => error.source(),
            CustomViolation::Fallback(err) => err.source(),
        }
    }
}

impl<C: Construct> Raise for CustomViolation<C> {
    fn raise(violation: Violation) -> Self {
        let attempt = C::from_param_and_message(violation.name(), violation.message())
            .map(|built| (built, true))
            .or_else(|| C::from_message(violation.message()).map(|built| (built, false)))
            .or_else(|| C::empty().map(|built| (built, false)));

        let kind = violation.kind();
        let (_, param, message, _) = violation.into_parts();

        let cause = match attempt {
            Some((Ok(mut error), named)) => {
                if !named {
                    error.set_param_name(&param);
                }
                return CustomViolation::Raised { error, param, kind };
            }
            Some((Err(cause), _)) => cause,
            None => Box::new(ConstructError::NoConstructor {
                type_name: std::any::type_name::<C>(),
            }),
        };

        CustomViolation::Fallback(
            ArgumentError::new(ViolationKind::Generic, param, message).with_source(cause),
        )
    }

    fn param_name(&self) -> Option<&str> {
        Some(CustomViolation::param_name(self))
    }

    fn kind(&self) -> Option<ViolationKind> {
        Some(CustomViolation::kind(self))
    }
}
