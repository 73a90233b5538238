//! Projections
//!
//! A projection replaces an argument's value while keeping its name and
//! redaction policy. The projected handle is marked modified so later
//! failures can be told apart from failures on the original input.
//!
//! ```rust
//! use weir::argument;
//!
//! let port = argument("8080", "port")
//!     .not_white_space()
//!     .unwrap()
//!     .wrap(|s| s.parse::<u16>())
//!     .unwrap()
//!     .min(1024)
//!     .unwrap();
//!
//! assert_eq!(*port.value(), 8080);
//! assert_eq!(port.name(), "port");
//! assert!(port.is_modified());
//! ```

use crate::argument::Argument;
use crate::error::{BoxError, Raise, ViolationKind};

impl<T, E> Argument<T, E> {
    /// Replace the value.
    pub fn modify<U>(self, value: U) -> Argument<U, E> {
        self.project(value)
    }

    /// Replace the value with `f(value)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weir::argument;
    ///
    /// let trimmed = argument("  alice ", "user").modify_with(str::trim);
    /// assert_eq!(*trimmed.value(), "alice");
    /// assert_eq!(trimmed.name(), "user");
    /// ```
    pub fn modify_with<U, F>(self, f: F) -> Argument<U, E>
    where
        F: FnOnce(T) -> U,
    {
        let value = f(self.value);
        Argument::from_parts(value, self.name, self.secure, true)
    }

    /// Replace the value with a fallible conversion.
    ///
    /// A conversion error is returned as is. It is not a violation, so it is
    /// neither redacted nor seen by interception scopes.
    pub fn try_modify_with<U, X, F>(self, f: F) -> Result<Argument<U, E>, X>
    where
        F: FnOnce(T) -> Result<U, X>,
    {
        let converted = f(self.value)?;
        Ok(Argument::from_parts(converted, self.name, self.secure, true))
    }

    /// Copy of the handle marked as modified.
    pub fn cloned(&self) -> Self
    where
        T: Clone,
    {
        Argument::from_parts(self.value.clone(), self.name.clone(), self.secure, true)
    }
}

impl<T, E: Raise> Argument<T, E> {
    /// Convert the value, turning a conversion error into a violation.
    ///
    /// The conversion error becomes the source of a generic violation. Its
    /// text is quoted in the message unless the handle is secure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::error::Error;
    /// use weir::argument;
    ///
    /// let err = argument("eighty", "port").wrap(|s| s.parse::<u16>()).unwrap_err();
    /// assert!(err.is_generic());
    /// assert_eq!(err.param_name(), "port");
    /// assert!(err.source().is_some());
    /// ```
    #[track_caller]
    pub fn wrap<U, X, F>(self, convert: F) -> Result<Argument<U, E>, E>
    where
        F: FnOnce(&T) -> Result<U, X>,
        X: Into<BoxError>,
    {
        match convert(&self.value) {
            Ok(converted) => Ok(self.project(converted)),
            Err(cause) => {
                let cause = cause.into();
                let message = self.describe().text(
                    |n| format!("{n} could not be converted: {cause}."),
                    |n| format!("{n} could not be converted."),
                );
                Err(self.violation_from(ViolationKind::Generic, message, cause))
            }
        }
    }

    /// [`wrap`](Self::wrap) with a message built from the original value.
    #[track_caller]
    pub fn wrap_with<U, X, F, M>(self, convert: F, message: M) -> Result<Argument<U, E>, E>
    where
        F: FnOnce(&T) -> Result<U, X>,
        X: Into<BoxError>,
        M: FnOnce(&T) -> String,
    {
        match convert(&self.value) {
            Ok(converted) => Ok(self.project(converted)),
            Err(cause) => {
                let text = message(&self.value);
                Err(self.violation_from(ViolationKind::Generic, text, cause.into()))
            }
        }
    }
}
