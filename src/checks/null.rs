//! Presence checks for optional values

use std::fmt::Debug;

use crate::argument::Argument;
use crate::error::{Raise, ViolationKind};

impl<T, E: Raise> Argument<Option<T>, E> {
    /// `true` when the optional value is present.
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Narrow to the inner value, failing with a null violation when absent.
    ///
    /// The name and redaction policy carry over to the narrowed handle.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weir::argument;
    ///
    /// let port = argument(Some(8080u16), "port").require_value().unwrap();
    /// assert_eq!(*port.value(), 8080);
    ///
    /// let err = argument(None::<u16>, "port").require_value().unwrap_err();
    /// assert!(err.is_null());
    /// assert_eq!(err.param_name(), "port");
    /// ```
    #[track_caller]
    pub fn require_value(mut self) -> Result<Argument<T, E>, E> {
        match self.value.take() {
            Some(inner) => Ok(self.rebind(inner)),
            None => {
                let message = format!("{} is required but was absent.", self.name);
                Err(self.violation(ViolationKind::Null, message))
            }
        }
    }

    /// [`require_value`](Self::require_value) with a caller message.
    #[track_caller]
    pub fn require_value_with<F>(mut self, message: F) -> Result<Argument<T, E>, E>
    where
        F: FnOnce() -> String,
    {
        match self.value.take() {
            Some(inner) => Ok(self.rebind(inner)),
            None => Err(self.violation(ViolationKind::Null, message())),
        }
    }

    /// Require the value to be absent.
    #[track_caller]
    pub fn null(self) -> Result<Self, E>
    where
        T: Debug,
    {
        let message = match &self.value {
            None => return Ok(self),
            Some(v) => self.describe().text(
                |n| format!("{n} must be absent, but was {v:?}."),
                |n| format!("{n} must be absent."),
            ),
        };
        Err(self.violation(ViolationKind::Generic, message))
    }

    /// [`null`](Self::null) with a message built from the present value.
    #[track_caller]
    pub fn null_with<F>(self, message: F) -> Result<Self, E>
    where
        F: FnOnce(&T) -> String,
    {
        let message = match &self.value {
            None => return Ok(self),
            Some(v) => message(v),
        };
        Err(self.violation(ViolationKind::Generic, message))
    }
}

#[cfg(test)]
mod tests {
    use crate::argument;

    #[test]
    fn test_require_value_keeps_metadata() {
        let arg = argument(Some(3), "n").secure().modify(Some(4));
        let narrowed = arg.require_value().unwrap();

        assert_eq!(*narrowed.value(), 4);
        assert_eq!(narrowed.name(), "n");
        assert!(narrowed.is_secure());
        assert!(narrowed.is_modified());
    }

    #[test]
    fn test_require_value_unmodified_stays_unmodified() {
        let narrowed = argument(Some("x"), "s").require_value().unwrap();
        assert!(!narrowed.is_modified());

        let narrowed = argument(Some("x"), "s")
            .secure()
            .require_value_with(String::new)
            .unwrap();
        assert_eq!(narrowed.name(), "s");
        assert!(narrowed.is_secure());
        assert!(!narrowed.is_modified());
    }

    #[test]
    fn test_require_value_message() {
        let err = argument(None::<String>, "email").require_value().unwrap_err();
        assert_eq!(err.message(), "email is required but was absent.");

        let err = argument(None::<String>, "email")
            .require_value_with(|| "email please".to_string())
            .unwrap_err();
        assert_eq!(err.message(), "email please");
    }

    #[test]
    fn test_null() {
        assert!(argument(None::<i32>, "legacy").null().is_ok());

        let err = argument(Some(5), "legacy").null().unwrap_err();
        assert!(err.is_generic());
        assert!(err.message().contains('5'));

        let err = argument(Some(5), "legacy").secure().null().unwrap_err();
        assert!(!err.message().contains('5'));
    }

    #[test]
    fn test_has_value() {
        assert!(argument(Some(1), "a").has_value());
        assert!(!argument(None::<i32>, "a").has_value());
    }

    #[test]
    fn test_narrow_then_rewrap_round_trips() {
        let original = Some(vec![1, 2, 3]);
        let narrowed = argument(original.clone(), "v").require_value().unwrap();
        assert_eq!(Some(narrowed.into_value()), original);
    }
}
