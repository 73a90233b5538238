//! Ordering and equality checks

use std::fmt::Debug;

use crate::argument::Argument;
use crate::error::{Raise, ViolationKind};
use crate::subject::Subject;

impl<T, E> Argument<T, E>
where
    T: Subject,
    T::Target: Debug,
    E: Raise,
{
    /// Require the value to be at least `bound`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weir::argument;
    ///
    /// assert!(argument(10, "x").min(10).is_ok());
    ///
    /// let err = argument(5, "x").min(10).unwrap_err();
    /// assert!(err.is_range());
    /// assert_eq!(err.message(), "x must be 10 or greater, but was 5.");
    /// ```
    #[track_caller]
    pub fn min<B: Debug>(self, bound: B) -> Result<Self, E>
    where
        T::Target: PartialOrd<B>,
    {
        self.check(
            ViolationKind::Range,
            |v| *v >= bound,
            |v, d| {
                d.text(
                    |n| format!("{n} must be {bound:?} or greater, but was {v:?}."),
                    |n| format!("{n} is below the allowed minimum."),
                )
            },
        )
    }

    /// [`min`](Self::min) with a message built from the value and bound.
    #[track_caller]
    pub fn min_with<B, F>(self, bound: B, message: F) -> Result<Self, E>
    where
        T::Target: PartialOrd<B>,
        F: FnOnce(&T::Target, &B) -> String,
    {
        self.check(
            ViolationKind::Range,
            |v| *v >= bound,
            |v, _| message(v, &bound),
        )
    }

    /// Require the value to be at most `bound`.
    #[track_caller]
    pub fn max<B: Debug>(self, bound: B) -> Result<Self, E>
    where
        T::Target: PartialOrd<B>,
    {
        self.check(
            ViolationKind::Range,
            |v| *v <= bound,
            |v, d| {
                d.text(
                    |n| format!("{n} must be {bound:?} or less, but was {v:?}."),
                    |n| format!("{n} is above the allowed maximum."),
                )
            },
        )
    }

    /// [`max`](Self::max) with a message built from the value and bound.
    #[track_caller]
    pub fn max_with<B, F>(self, bound: B, message: F) -> Result<Self, E>
    where
        T::Target: PartialOrd<B>,
        F: FnOnce(&T::Target, &B) -> String,
    {
        self.check(
            ViolationKind::Range,
            |v| *v <= bound,
            |v, _| message(v, &bound),
        )
    }

    /// Require `min <= value <= max`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weir::argument;
    ///
    /// assert!(argument(0.5, "ratio").in_range(0.0, 1.0).is_ok());
    /// assert!(argument(1.5, "ratio").in_range(0.0, 1.0).unwrap_err().is_range());
    /// ```
    #[track_caller]
    pub fn in_range<B: Debug>(self, min: B, max: B) -> Result<Self, E>
    where
        T::Target: PartialOrd<B>,
    {
        self.check(
            ViolationKind::Range,
            |v| *v >= min && *v <= max,
            |v, d| {
                d.text(
                    |n| format!("{n} must be between {min:?} and {max:?}, but was {v:?}."),
                    |n| format!("{n} is outside the allowed range."),
                )
            },
        )
    }

    /// [`in_range`](Self::in_range) with a message built from the value and bounds.
    #[track_caller]
    pub fn in_range_with<B, F>(self, min: B, max: B, message: F) -> Result<Self, E>
    where
        T::Target: PartialOrd<B>,
        F: FnOnce(&T::Target, &B, &B) -> String,
    {
        self.check(
            ViolationKind::Range,
            |v| *v >= min && *v <= max,
            |v, _| message(v, &min, &max),
        )
    }

    /// Require the value to fall outside `min..=max`.
    #[track_caller]
    pub fn not_in_range<B: Debug>(self, min: B, max: B) -> Result<Self, E>
    where
        T::Target: PartialOrd<B>,
    {
        self.check(
            ViolationKind::Range,
            |v| *v < min || *v > max,
            |v, d| {
                d.text(
                    |n| format!("{n} must not be between {min:?} and {max:?}, but was {v:?}."),
                    |n| format!("{n} is inside a forbidden range."),
                )
            },
        )
    }

    /// [`not_in_range`](Self::not_in_range) with a message built from the value and bounds.
    #[track_caller]
    pub fn not_in_range_with<B, F>(self, min: B, max: B, message: F) -> Result<Self, E>
    where
        T::Target: PartialOrd<B>,
        F: FnOnce(&T::Target, &B, &B) -> String,
    {
        self.check(
            ViolationKind::Range,
            |v| *v < min || *v > max,
            |v, _| message(v, &min, &max),
        )
    }

    /// Require the value to equal `other`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weir::argument;
    ///
    /// let err = argument(String::from("draft"), "state").equal("published").unwrap_err();
    /// assert!(err.is_generic());
    /// assert!(err.message().contains("\"draft\""));
    /// ```
    #[track_caller]
    pub fn equal<B: Debug>(self, other: B) -> Result<Self, E>
    where
        T::Target: PartialEq<B>,
    {
        self.check(
            ViolationKind::Generic,
            |v| *v == other,
            |v, d| {
                d.text(
                    |n| format!("{n} must be {other:?}, but was {v:?}."),
                    |n| format!("{n} does not match the expected value."),
                )
            },
        )
    }

    /// [`equal`](Self::equal) with a message built from the value and expectation.
    #[track_caller]
    pub fn equal_with<B, F>(self, other: B, message: F) -> Result<Self, E>
    where
        T::Target: PartialEq<B>,
        F: FnOnce(&T::Target, &B) -> String,
    {
        self.check(
            ViolationKind::Generic,
            |v| *v == other,
            |v, _| message(v, &other),
        )
    }

    /// Require the value to differ from `other`.
    #[track_caller]
    pub fn not_equal<B: Debug>(self, other: B) -> Result<Self, E>
    where
        T::Target: PartialEq<B>,
    {
        self.check(
            ViolationKind::Generic,
            |v| *v != other,
            |_, d| {
                d.text(
                    |n| format!("{n} must not be {other:?}."),
                    |n| format!("{n} matches a forbidden value."),
                )
            },
        )
    }

    /// [`not_equal`](Self::not_equal) with a message built from the value.
    #[track_caller]
    pub fn not_equal_with<B, F>(self, other: B, message: F) -> Result<Self, E>
    where
        T::Target: PartialEq<B>,
        F: FnOnce(&T::Target) -> String,
    {
        self.check(
            ViolationKind::Generic,
            |v| *v != other,
            |v, _| message(v),
        )
    }

    /// Require the value to be one of `allowed`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weir::argument;
    ///
    /// assert!(argument("get", "method").one_of(["get", "head"]).is_ok());
    /// assert!(argument("put", "method").one_of(["get", "head"]).is_err());
    /// ```
    #[track_caller]
    pub fn one_of<B, I>(self, allowed: I) -> Result<Self, E>
    where
        I: IntoIterator<Item = B>,
        B: Debug,
        T::Target: PartialEq<B>,
    {
        let allowed: Vec<B> = allowed.into_iter().collect();
        self.check(
            ViolationKind::Generic,
            |v| allowed.iter().any(|candidate| *v == *candidate),
            |v, d| {
                d.text(
                    |n| format!("{n} must be one of {allowed:?}, but was {v:?}."),
                    |n| format!("{n} is not one of the allowed values."),
                )
            },
        )
    }

    /// [`one_of`](Self::one_of) with a message built from the value and candidates.
    #[track_caller]
    pub fn one_of_with<B, I, F>(self, allowed: I, message: F) -> Result<Self, E>
    where
        I: IntoIterator<Item = B>,
        T::Target: PartialEq<B>,
        F: FnOnce(&T::Target, &[B]) -> String,
    {
        let allowed: Vec<B> = allowed.into_iter().collect();
        self.check(
            ViolationKind::Generic,
            |v| allowed.iter().any(|candidate| *v == *candidate),
            |v, _| message(v, &allowed),
        )
    }
}

impl<T, E> Argument<T, E>
where
    T: Subject,
    T::Target: Default + PartialEq + Debug + Sized,
    E: Raise,
{
    /// Require the value to be its type's default.
    #[track_caller]
    pub fn default_value(self) -> Result<Self, E> {
        self.check(
            ViolationKind::Generic,
            |v| *v == <T::Target as Default>::default(),
            |v, d| {
                d.text(
                    |n| format!("{n} must be {:?}, but was {v:?}.", <T::Target as Default>::default()),
                    |n| format!("{n} must be the default value."),
                )
            },
        )
    }

    /// [`default_value`](Self::default_value) with a message built from the value.
    #[track_caller]
    pub fn default_value_with<F>(self, message: F) -> Result<Self, E>
    where
        F: FnOnce(&T::Target) -> String,
    {
        self.check(
            ViolationKind::Generic,
            |v| *v == <T::Target as Default>::default(),
            |v, _| message(v),
        )
    }

    /// Require the value to differ from its type's default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weir::argument;
    ///
    /// assert!(argument(0u64, "id").not_default().is_err());
    /// assert!(argument(7u64, "id").not_default().is_ok());
    /// ```
    #[track_caller]
    pub fn not_default(self) -> Result<Self, E> {
        self.check(
            ViolationKind::Generic,
            |v| *v != <T::Target as Default>::default(),
            |_, d| {
                d.text(
                    |n| format!("{n} must not be {:?}.", <T::Target as Default>::default()),
                    |n| format!("{n} must not be the default value."),
                )
            },
        )
    }

    /// [`not_default`](Self::not_default) with a message built from the value.
    #[track_caller]
    pub fn not_default_with<F>(self, message: F) -> Result<Self, E>
    where
        F: FnOnce(&T::Target) -> String,
    {
        self.check(
            ViolationKind::Generic,
            |v| *v != <T::Target as Default>::default(),
            |v, _| message(v),
        )
    }
}
