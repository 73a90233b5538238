//! Caller-supplied predicates

use crate::argument::Argument;
use crate::error::{Raise, ViolationKind};
use crate::subject::Subject;

impl<T, E> Argument<T, E>
where
    T: Subject,
    E: Raise,
{
    /// Require `predicate` to hold, failing with `message`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weir::argument;
    ///
    /// let even = |n: &u32| n % 2 == 0;
    /// assert!(argument(4u32, "batch").require(even, "batch must be even").is_ok());
    ///
    /// let err = argument(3u32, "batch").require(even, "batch must be even").unwrap_err();
    /// assert!(err.is_generic());
    /// assert_eq!(err.message(), "batch must be even");
    /// ```
    #[track_caller]
    pub fn require<P>(self, predicate: P, message: impl Into<String>) -> Result<Self, E>
    where
        P: FnOnce(&T::Target) -> bool,
    {
        self.check(ViolationKind::Generic, predicate, |_, _| message.into())
    }

    /// Require `predicate` to hold, building the message from the value.
    #[track_caller]
    pub fn require_with<P, F>(self, predicate: P, message: F) -> Result<Self, E>
    where
        P: FnOnce(&T::Target) -> bool,
        F: FnOnce(&T::Target) -> String,
    {
        self.check(ViolationKind::Generic, predicate, |v, _| message(v))
    }
}

#[cfg(test)]
mod tests {
    use crate::argument;

    #[test]
    fn test_require_skips_absent_values() {
        let mut called = false;
        let result = argument(None::<i32>, "n").require(
            |_| {
                called = true;
                false
            },
            "never",
        );
        assert!(result.is_ok());
        assert!(!called);
    }

    #[test]
    fn test_require_with_sees_value() {
        let err = argument(vec![3, 1, 2], "ranks")
            .require_with(|v| v.is_sorted(), |v| format!("{v:?} is not sorted"))
            .unwrap_err();
        assert_eq!(err.message(), "[3, 1, 2] is not sorted");
    }
}
