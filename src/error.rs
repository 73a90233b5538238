//! Violation taxonomy and the default error family
//!
//! Every failed check is described by a [`Violation`] record. An error
//! family implementing [`Raise`] turns that record into the concrete error
//! the caller receives. [`ArgumentError`] is the family used when no other
//! is requested.
//!
//! # Example
//!
//! ```rust
//! use weir::{argument, ViolationKind};
//!
//! let err = argument(5, "x").min(10).unwrap_err();
//!
//! assert_eq!(err.kind(), ViolationKind::Range);
//! assert_eq!(err.param_name(), "x");
//! assert!(err.message().contains('5'));
//! assert!(err.message().contains("10"));
//! ```

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;

/// Boxed error used for sources and construction failures.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Category of a failed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// A required value was absent.
    Null,
    /// An ordering, magnitude or boundary check failed.
    Range,
    /// Any other constraint failed.
    Generic,
}

impl ViolationKind {
    /// Stable lowercase label, used in logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::Null => "null",
            ViolationKind::Range => "range",
            ViolationKind::Generic => "generic",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything an error family needs to build the error for one failed check.
///
/// A `Violation` only exists between the failed check and the construction
/// of the error. It is handed by value to [`Raise::raise`].
#[derive(Debug)]
pub struct Violation {
    kind: ViolationKind,
    name: Cow<'static, str>,
    message: String,
    secure: bool,
    source: Option<BoxError>,
    location: &'static Location<'static>,
}

impl Violation {
    pub(crate) fn new(
        kind: ViolationKind,
        name: Cow<'static, str>,
        message: String,
        secure: bool,
        location: &'static Location<'static>,
    ) -> Self {
        Violation {
            kind,
            name,
            message,
            secure,
            source: None,
            location,
        }
    }

    pub(crate) fn with_source(mut self, source: BoxError) -> Self {
        self.source = Some(source);
        self
    }

    /// Which kind of check failed.
    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    /// Name of the argument that failed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Final message, either caller supplied or the redaction-aware default.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the argument was in secure mode.
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Source location of the check that failed.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Underlying cause, present for failed conversions.
    pub fn source(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// Split into kind, name, message and source.
    pub fn into_parts(self) -> (ViolationKind, Cow<'static, str>, String, Option<BoxError>) {
        (self.kind, self.name, self.message, self.source)
    }
}

/// An error family that failed checks can produce.
///
/// This is the capability a type needs before it can be used with
/// [`Argument::raising`](crate::Argument::raising). Implementing it is a
/// compile-time contract: a type without a way to build itself from a
/// [`Violation`] cannot be selected as an error family.
///
/// # Example
///
/// ```rust
/// use std::fmt;
/// use weir::{argument, Raise, Violation};
///
/// #[derive(Debug)]
/// struct BadInput {
///     field: String,
/// }
///
/// impl fmt::Display for BadInput {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "bad input in {}", self.field)
///     }
/// }
///
/// impl std::error::Error for BadInput {}
///
/// impl Raise for BadInput {
///     fn raise(violation: Violation) -> Self {
///         BadInput { field: violation.name().to_string() }
///     }
///
///     fn param_name(&self) -> Option<&str> {
///         Some(&self.field)
///     }
/// }
///
/// let err = argument(3, "port").raising::<BadInput>().min(1024).unwrap_err();
/// assert_eq!(err.field, "port");
/// ```
pub trait Raise: StdError + Send + Sync + Sized + 'static {
    /// Build the error for a failed check.
    fn raise(violation: Violation) -> Self;

    /// Name of the offending argument, if the family records it.
    fn param_name(&self) -> Option<&str> {
        None
    }

    /// Kind of the failed check, if the family records it.
    fn kind(&self) -> Option<ViolationKind> {
        None
    }
}

/// The default error family.
///
/// Carries the violation kind, the name captured when the argument was
/// created, the final message and an optional source.
#[derive(Debug)]
pub struct ArgumentError {
    kind: ViolationKind,
    param: Cow<'static, str>,
    message: String,
    source: Option<BoxError>,
}

impl ArgumentError {
    /// Create an error without a source.
    pub fn new(
        kind: ViolationKind,
        param: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
    ) -> Self {
        ArgumentError {
            kind,
            param: param.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Attach an inner error.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Kind of the failed check.
    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    /// Name of the argument that failed.
    pub fn param_name(&self) -> &str {
        &self.param
    }

    /// Message without the parameter suffix added by `Display`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// `true` for a missing required value.
    pub fn is_null(&self) -> bool {
        self.kind == ViolationKind::Null
    }

    /// `true` for an ordering or boundary failure.
    pub fn is_range(&self) -> bool {
        self.kind == ViolationKind::Range
    }

    /// `true` for any other failed constraint.
    pub fn is_generic(&self) -> bool {
        self.kind == ViolationKind::Generic
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (parameter '{}')", self.message, self.param)
    }
}

impl StdError for ArgumentError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn StdError + 'static))
    }
}

impl Raise for ArgumentError {
    fn raise(violation: Violation) -> Self {
        let (kind, param, message, source) = violation.into_parts();
        ArgumentError {
            kind,
            param,
            message,
            source,
        }
    }

    fn param_name(&self) -> Option<&str> {
        Some(&self.param)
    }

    fn kind(&self) -> Option<ViolationKind> {
        Some(self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(kind: ViolationKind) -> Violation {
        Violation::new(
            kind,
            Cow::Borrowed("amount"),
            "amount must be positive.".to_string(),
            false,
            Location::caller(),
        )
    }

    #[test]
    fn test_raise_preserves_name_and_message() {
        let err = ArgumentError::raise(violation(ViolationKind::Range));

        assert_eq!(err.param_name(), "amount");
        assert_eq!(err.message(), "amount must be positive.");
        assert!(err.is_range());
        assert!(!err.is_null());
    }

    #[test]
    fn test_display_appends_parameter() {
        let err = ArgumentError::new(ViolationKind::Generic, "name", "name is blank.");
        assert_eq!(err.to_string(), "name is blank. (parameter 'name')");
    }

    #[test]
    fn test_display_keeps_message_prefix() {
        let err = ArgumentError::new(ViolationKind::Generic, "name", "custom text");
        assert!(err.to_string().starts_with("custom text"));
    }

    #[test]
    fn test_source_chain() {
        let inner = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad bytes");
        let err = ArgumentError::new(ViolationKind::Generic, "payload", "unreadable")
            .with_source(inner);

        let source = err.source().expect("source should be set");
        assert_eq!(source.to_string(), "bad bytes");
    }

    #[test]
    fn test_violation_source_moves_into_error() {
        let cause: BoxError = "parse failure".into();
        let err = ArgumentError::raise(violation(ViolationKind::Generic).with_source(cause));

        assert!(err.is_generic());
        assert_eq!(err.source().map(|e| e.to_string()), Some("parse failure".to_string()));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ViolationKind::Null.to_string(), "null");
        assert_eq!(ViolationKind::Range.as_str(), "range");
        assert_eq!(ViolationKind::Generic.as_str(), "generic");
    }

    #[test]
    fn test_raise_trait_accessors() {
        let err = ArgumentError::raise(violation(ViolationKind::Null));
        assert_eq!(Raise::param_name(&err), Some("amount"));
        assert_eq!(Raise::kind(&err), Some(ViolationKind::Null));
    }
}
