//! The argument handle
//!
//! An [`Argument`] pairs a value with the name it should be reported under.
//! Every check consumes the handle and gives it back on success, so checks
//! chain with `?`:
//!
//! ```rust
//! use weir::{argument, ArgumentError};
//!
//! fn connect(host: &str, port: u16) -> Result<(), ArgumentError> {
//!     argument(host, "host").not_white_space()?;
//!     argument(port, "port").in_range(1024, 49151)?;
//!     Ok(())
//! }
//!
//! assert!(connect("db.local", 5432).is_ok());
//! assert_eq!(connect("db.local", 80).unwrap_err().param_name(), "port");
//! ```
//!
//! # Names
//!
//! The name given at construction is carried unchanged through every check
//! and projection. Unnamed handles get a placeholder built from the value's
//! type, such as `"The i32 argument"`. The [`arg!`](crate::arg) macro takes
//! the name from the variable or field being read.
//!
//! # Cost
//!
//! A handle is the value plus a `Cow<'static, str>` name and two flags.
//! Handles named by string literals or by [`arg!`](crate::arg) do not
//! allocate. Unnamed handles allocate their placeholder once.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::marker::PhantomData;

use crate::custom::{Construct, CustomViolation};
use crate::error::{ArgumentError, Raise};

/// A named value being validated.
///
/// `E` is the error family failed checks produce. It defaults to
/// [`ArgumentError`] and can be switched with [`raising`](Self::raising).
pub struct Argument<T, E = ArgumentError> {
    pub(crate) value: T,
    pub(crate) name: Cow<'static, str>,
    pub(crate) secure: bool,
    pub(crate) modified: bool,
    family: PhantomData<fn() -> E>,
}

/// Create a named argument.
///
/// An empty name is treated as no name and replaced by the type placeholder.
///
/// # Example
///
/// ```rust
/// use weir::argument;
///
/// let arg = argument(42, "answer");
/// assert_eq!(arg.name(), "answer");
/// assert_eq!(*arg.value(), 42);
/// ```
pub fn argument<T>(value: T, name: impl Into<Cow<'static, str>>) -> Argument<T> {
    Argument::new(value, name)
}

impl<T> Argument<T> {
    /// Create a named argument in the default error family.
    pub fn new(value: T, name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        if name.is_empty() {
            Argument::unnamed(value)
        } else {
            Argument::from_parts(value, name, false, false)
        }
    }

    /// Create a named argument with an explicit redaction policy.
    pub fn with_secure(value: T, name: impl Into<Cow<'static, str>>, secure: bool) -> Self {
        let mut arg = Argument::new(value, name);
        arg.secure = secure;
        arg
    }

    /// Create an argument named after its type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weir::Argument;
    ///
    /// assert_eq!(Argument::unnamed(5u8).name(), "The u8 argument");
    /// assert_eq!(
    ///     Argument::unnamed(Some(String::new())).name(),
    ///     "The Option<String> argument"
    /// );
    /// ```
    pub fn unnamed(value: T) -> Self {
        let name = format!("The {} argument", short_type_name::<T>());
        Argument::from_parts(value, Cow::Owned(name), false, false)
    }

    /// Create an argument from a source expression and an accessor.
    ///
    /// `source` must be a plain variable or field path such as `user.email`,
    /// optionally prefixed by `&`. The last segment becomes the name. The
    /// shape is checked before `accessor` runs and a bad shape is reported
    /// as an [`ExpressionError`]. Use the [`arg!`](crate::arg) macro to get the
    /// same contract checked at compile time.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weir::Argument;
    ///
    /// let limit = 10;
    /// let arg = Argument::from_accessor("config.limit", || limit).unwrap();
    /// assert_eq!(arg.name(), "limit");
    ///
    /// assert!(Argument::from_accessor("limit + 1", || limit + 1).is_err());
    /// ```
    pub fn from_accessor<F>(
        source: impl Into<Cow<'static, str>>,
        accessor: F,
    ) -> Result<Self, ExpressionError>
    where
        F: FnOnce() -> T,
    {
        let name = accessor_name(source.into())?;
        Ok(Argument::from_parts(accessor(), name, false, false))
    }
}

impl<T, E> Argument<T, E> {
    pub(crate) fn from_parts(
        value: T,
        name: Cow<'static, str>,
        secure: bool,
        modified: bool,
    ) -> Self {
        Argument {
            value,
            name,
            secure,
            modified,
            family: PhantomData,
        }
    }

    /// Move the metadata onto a new value without marking it modified.
    pub(crate) fn rebind<U>(self, value: U) -> Argument<U, E> {
        Argument::from_parts(value, self.name, self.secure, self.modified)
    }

    /// Move the metadata onto a substituted value.
    pub(crate) fn project<U>(self, value: U) -> Argument<U, E> {
        Argument::from_parts(value, self.name, self.secure, true)
    }

    /// The current value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consume the handle and return the value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// The name failures are reported under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether default messages redact the value.
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Whether the value was substituted by a projection.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Redact values from default messages for the rest of the chain.
    ///
    /// Secure mode only changes message text. Failures are still reported.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weir::argument;
    ///
    /// let err = argument("hunter2", "password").secure().equal("swordfish").unwrap_err();
    /// assert!(!err.message().contains("hunter2"));
    /// assert!(!err.message().contains("swordfish"));
    /// ```
    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    /// Switch the error family produced by failed checks.
    pub fn raising<F: Raise>(self) -> Argument<T, F> {
        Argument::from_parts(self.value, self.name, self.secure, self.modified)
    }

    /// Switch to a custom error type built by constructor probing.
    ///
    /// See [`Construct`] for the order constructors are tried in.
    pub fn raising_as<C: Construct>(self) -> Argument<T, CustomViolation<C>> {
        self.raising()
    }
}

impl<T: Clone, E> Clone for Argument<T, E> {
    fn clone(&self) -> Self {
        Argument::from_parts(
            self.value.clone(),
            self.name.clone(),
            self.secure,
            self.modified,
        )
    }
}

impl<T: fmt::Debug, E> fmt::Debug for Argument<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Argument");
        out.field("name", &self.name);
        if self.secure {
            out.field("value", &format_args!("<redacted>"));
        } else {
            out.field("value", &self.value);
        }
        out.field("secure", &self.secure)
            .field("modified", &self.modified)
            .finish()
    }
}

/// Create an argument named after the variable or field it reads.
///
/// Only plain paths are accepted, so the name is always stable. Prefix the
/// path with `&` to borrow instead of move. Add `, secure` to redact values
/// from default messages.
///
/// # Example
///
/// ```rust
/// use weir::arg;
///
/// struct Request {
///     user_id: u64,
///     token: String,
/// }
///
/// let request = Request { user_id: 0, token: "abc".into() };
///
/// let err = arg!(request.user_id).min(1u64).unwrap_err();
/// assert_eq!(err.param_name(), "user_id");
///
/// let token = arg!(&request.token, secure);
/// assert_eq!(token.name(), "token");
/// assert!(token.is_secure());
/// ```
///
/// Anything that is not a path is rejected at compile time:
///
/// ```rust,compile_fail
/// let a = 1;
/// let _ = weir::arg!(a + 1);
/// ```
#[macro_export]
macro_rules! arg {
    (& $head:ident $(. $tail:ident)* , secure) => {
        $crate::arg!(& $head $(. $tail)*).secure()
    };
    ($head:ident $(. $tail:ident)* , secure) => {
        $crate::arg!($head $(. $tail)*).secure()
    };
    (& $head:ident $(. $tail:ident)*) => {
        $crate::Argument::new(
            & $head $(. $tail)*,
            $crate::argument::path_name(::std::stringify!($head $(. $tail)*)),
        )
    };
    ($head:ident $(. $tail:ident)*) => {
        $crate::Argument::new(
            $head $(. $tail)*,
            $crate::argument::path_name(::std::stringify!($head $(. $tail)*)),
        )
    };
}

/// Last segment of a `stringify!`ed path.
#[doc(hidden)]
pub fn path_name(source: &'static str) -> &'static str {
    source.rsplit('.').next().unwrap_or(source).trim()
}

/// Why a source expression cannot name an argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionFault {
    /// The expression was blank.
    Empty,
    /// A path segment was not an identifier.
    InvalidSegment(String),
}

/// A name-capturing accessor whose expression is not a plain path.
///
/// This is reported when the handle is built, before any check runs, and
/// never passes through redaction or interception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionError {
    expression: String,
    fault: ExpressionFault,
}

impl ExpressionError {
    /// The rejected expression.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// What was wrong with it.
    pub fn fault(&self) -> &ExpressionFault {
        &self.fault
    }
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fault {
            ExpressionFault::Empty => write!(f, "accessor expression is empty"),
            ExpressionFault::InvalidSegment(segment) => write!(
                f,
                "accessor expression `{}` must be a variable or field path, found `{}`",
                self.expression, segment
            ),
        }
    }
}

impl StdError for ExpressionError {}

fn accessor_name(source: Cow<'static, str>) -> Result<Cow<'static, str>, ExpressionError> {
    match source {
        Cow::Borrowed(text) => last_segment(text).map(Cow::Borrowed),
        Cow::Owned(text) => last_segment(&text).map(|name| Cow::Owned(name.to_string())),
    }
}

fn last_segment(source: &str) -> Result<&str, ExpressionError> {
    let fault = |fault| ExpressionError {
        expression: source.to_string(),
        fault,
    };

    let path = source.trim();
    let path = path.strip_prefix('&').map(str::trim_start).unwrap_or(path);
    if path.is_empty() {
        return Err(fault(ExpressionFault::Empty));
    }

    for segment in path.split('.') {
        if !is_identifier(segment.trim()) {
            return Err(fault(ExpressionFault::InvalidSegment(segment.trim().to_string())));
        }
    }

    Ok(path.rsplit('.').next().unwrap_or(path).trim())
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            let rest_ok = chars.all(|c| c == '_' || c.is_alphanumeric());
            rest_ok && segment != "_"
        }
        _ => false,
    }
}

/// `core::option::Option<alloc::string::String>` becomes `Option<String>`.
fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut out = String::with_capacity(full.len());
    let mut token = String::new();

    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            token.push(c);
        } else {
            out.push_str(token.rsplit("::").next().unwrap_or(&token));
            token.clear();
            out.push(c);
        }
    }
    out.push_str(token.rsplit("::").next().unwrap_or(&token));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_name() {
        let arg = argument(3, "count");
        assert_eq!(arg.name(), "count");
        assert!(!arg.is_secure());
        assert!(!arg.is_modified());
    }

    #[test]
    fn test_empty_name_falls_back_to_placeholder() {
        let arg = argument(3i64, "");
        assert_eq!(arg.name(), "The i64 argument");
    }

    #[test]
    fn test_with_secure() {
        let arg = Argument::with_secure("pin", "pin", true);
        assert!(arg.is_secure());
    }

    #[test]
    fn test_secure_is_sticky_through_raising() {
        let arg = argument(1, "n").secure().raising::<ArgumentError>();
        assert!(arg.is_secure());
        assert_eq!(arg.name(), "n");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<Vec<Option<String>>>(), "Vec<Option<String>>");
        assert_eq!(short_type_name::<&str>(), "&str");
        assert_eq!(
            short_type_name::<std::collections::HashMap<u8, String>>(),
            "HashMap<u8, String>"
        );
    }

    #[test]
    fn test_arg_macro_takes_last_segment() {
        struct Inner {
            depth: u32,
        }
        struct Outer {
            inner: Inner,
        }

        let outer = Outer {
            inner: Inner { depth: 4 },
        };
        let limit = 9;

        assert_eq!(arg!(outer.inner.depth).name(), "depth");
        assert_eq!(arg!(limit).name(), "limit");
        assert_eq!(*arg!(&outer.inner.depth).value(), &4);
        assert!(arg!(limit, secure).is_secure());
    }

    #[test]
    fn test_from_accessor_accepts_paths() {
        let arg = Argument::from_accessor("self.settings.timeout", || 30).unwrap();
        assert_eq!(arg.name(), "timeout");

        let arg = Argument::from_accessor(String::from("& user . email"), || "a@b").unwrap();
        assert_eq!(arg.name(), "email");
    }

    #[test]
    fn test_from_accessor_rejects_computations() {
        let err = Argument::from_accessor("items.len()", || 0).unwrap_err();
        assert_eq!(err.expression(), "items.len()");
        assert_eq!(err.fault(), &ExpressionFault::InvalidSegment("len()".into()));

        let err = Argument::from_accessor("   ", || 0).unwrap_err();
        assert_eq!(err.fault(), &ExpressionFault::Empty);

        assert!(Argument::from_accessor("1abc", || 0).is_err());
        assert!(Argument::from_accessor("a..b", || 0).is_err());
    }

    #[test]
    fn test_from_accessor_does_not_run_on_bad_shape() {
        let mut ran = false;
        let result = Argument::from_accessor("a * b", || {
            ran = true;
            0
        });
        assert!(result.is_err());
        assert!(!ran);
    }

    #[test]
    fn test_debug_redacts_secure_values() {
        let open = format!("{:?}", argument("visible", "v"));
        let sealed = format!("{:?}", argument("hidden", "h").secure());

        assert!(open.contains("visible"));
        assert!(!sealed.contains("hidden"));
        assert!(sealed.contains("<redacted>"));
    }

    #[test]
    fn test_clone_copies_metadata() {
        let arg = argument(vec![1], "list").secure();
        let copy = arg.clone();
        assert_eq!(copy.name(), "list");
        assert!(copy.is_secure());
        assert_eq!(copy.value(), &vec![1]);
    }
}
