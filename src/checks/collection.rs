//! Collection checks
//!
//! `not_empty` and the count checks also apply to strings, where they count
//! characters.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::argument::Argument;
use crate::error::{Raise, ViolationKind};
use crate::subject::{Countable, Membership, Subject};

impl<T, E> Argument<T, E>
where
    T: Subject,
    T::Target: Countable + Debug,
    E: Raise,
{
    /// Require at least one element.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weir::argument;
    ///
    /// assert!(argument(vec![1], "ids").not_empty().is_ok());
    /// assert!(argument(Vec::<u32>::new(), "ids").not_empty().is_err());
    ///
    /// let err = argument("", "title").not_empty().unwrap_err();
    /// assert_eq!(err.message(), "title must not be empty, but was \"\".");
    /// ```
    #[track_caller]
    pub fn not_empty(self) -> Result<Self, E> {
        self.check(
            ViolationKind::Generic,
            |v| v.count() > 0,
            |v, d| {
                d.text(
                    |n| format!("{n} must not be empty, but was {v:?}."),
                    |n| format!("{n} must not be empty."),
                )
            },
        )
    }

    /// Require exactly `expected` elements.
    #[track_caller]
    pub fn count(self, expected: usize) -> Result<Self, E> {
        self.check(
            ViolationKind::Range,
            |v| v.count() == expected,
            |v, d| {
                d.text(
                    |n| {
                        format!(
                            "{n} must contain {expected} items, but {v:?} has {}.",
                            v.count()
                        )
                    },
                    |n| format!("{n} does not contain the required number of items."),
                )
            },
        )
    }

    /// Require at least `min` elements.
    #[track_caller]
    pub fn min_count(self, min: usize) -> Result<Self, E> {
        self.check(
            ViolationKind::Range,
            |v| v.count() >= min,
            |v, d| {
                d.text(
                    |n| {
                        format!(
                            "{n} must contain at least {min} items, but {v:?} has {}.",
                            v.count()
                        )
                    },
                    |n| format!("{n} contains too few items."),
                )
            },
        )
    }

    /// Require at most `max` elements.
    #[track_caller]
    pub fn max_count(self, max: usize) -> Result<Self, E> {
        self.check(
            ViolationKind::Range,
            |v| v.count() <= max,
            |v, d| {
                d.text(
                    |n| {
                        format!(
                            "{n} must contain at most {max} items, but {v:?} has {}.",
                            v.count()
                        )
                    },
                    |n| format!("{n} contains too many items."),
                )
            },
        )
    }
}

impl<T, E> Argument<T, E>
where
    T: Subject,
    T::Target: Countable,
    E: Raise,
{
    /// [`not_empty`](Self::not_empty) with a message built from the value.
    #[track_caller]
    pub fn not_empty_with<F>(self, message: F) -> Result<Self, E>
    where
        F: FnOnce(&T::Target) -> String,
    {
        self.check(ViolationKind::Generic, |v| v.count() > 0, |v, _| message(v))
    }

    /// [`count`](Self::count) with a message built from the value and the expected count.
    #[track_caller]
    pub fn count_with<F>(self, expected: usize, message: F) -> Result<Self, E>
    where
        F: FnOnce(&T::Target, usize) -> String,
    {
        self.check(
            ViolationKind::Range,
            |v| v.count() == expected,
            |v, _| message(v, expected),
        )
    }

    /// [`min_count`](Self::min_count) with a message built from the value and the minimum.
    #[track_caller]
    pub fn min_count_with<F>(self, min: usize, message: F) -> Result<Self, E>
    where
        F: FnOnce(&T::Target, usize) -> String,
    {
        self.check(
            ViolationKind::Range,
            |v| v.count() >= min,
            |v, _| message(v, min),
        )
    }

    /// [`max_count`](Self::max_count) with a message built from the value and the maximum.
    #[track_caller]
    pub fn max_count_with<F>(self, max: usize, message: F) -> Result<Self, E>
    where
        F: FnOnce(&T::Target, usize) -> String,
    {
        self.check(
            ViolationKind::Range,
            |v| v.count() <= max,
            |v, _| message(v, max),
        )
    }
}

impl<T, E> Argument<T, E>
where
    T: Subject,
    E: Raise,
{
    /// Require the collection to hold `item`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::HashSet;
    /// use weir::argument;
    ///
    /// let roles: HashSet<&str> = ["admin", "ops"].into_iter().collect();
    /// assert!(argument(roles.clone(), "roles").contains("admin").is_ok());
    /// assert!(argument(roles, "roles").contains("guest").is_err());
    /// ```
    #[track_caller]
    pub fn contains<I: Debug>(self, item: I) -> Result<Self, E>
    where
        T::Target: Membership<I> + Debug,
    {
        self.check(
            ViolationKind::Generic,
            |v| v.has(&item),
            |v, d| {
                d.text(
                    |n| format!("{n} must contain {item:?}, but was {v:?}."),
                    |n| format!("{n} is missing a required item."),
                )
            },
        )
    }

    /// [`contains`](Self::contains) with a message built from the value and the missing item.
    #[track_caller]
    pub fn contains_with<I, F>(self, item: I, message: F) -> Result<Self, E>
    where
        T::Target: Membership<I>,
        F: FnOnce(&T::Target, &I) -> String,
    {
        self.check(
            ViolationKind::Generic,
            |v| v.has(&item),
            |v, _| message(v, &item),
        )
    }

    /// Require the collection not to hold `item`.
    #[track_caller]
    pub fn does_not_contain<I: Debug>(self, item: I) -> Result<Self, E>
    where
        T::Target: Membership<I> + Debug,
    {
        self.check(
            ViolationKind::Generic,
            |v| !v.has(&item),
            |v, d| {
                d.text(
                    |n| format!("{n} must not contain {item:?}, but was {v:?}."),
                    |n| format!("{n} contains a forbidden item."),
                )
            },
        )
    }

    /// [`does_not_contain`](Self::does_not_contain) with a message built from the value and the item.
    #[track_caller]
    pub fn does_not_contain_with<I, F>(self, item: I, message: F) -> Result<Self, E>
    where
        T::Target: Membership<I>,
        F: FnOnce(&T::Target, &I) -> String,
    {
        self.check(
            ViolationKind::Generic,
            |v| !v.has(&item),
            |v, _| message(v, &item),
        )
    }
}

impl<T, E, U> Argument<T, E>
where
    T: Subject<Target = [U]>,
    U: Eq + Hash + Debug,
    E: Raise,
{
    /// Require every element of a sequence to be distinct.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weir::argument;
    ///
    /// assert!(argument(vec![1, 2, 3], "ids").no_duplicates().is_ok());
    ///
    /// let err = argument(vec![1, 2, 1], "ids").no_duplicates().unwrap_err();
    /// assert_eq!(
    ///     err.message(),
    ///     "ids must not contain duplicates, but 1 appears more than once in [1, 2, 1]."
    /// );
    /// ```
    #[track_caller]
    pub fn no_duplicates(self) -> Result<Self, E> {
        self.check(
            ViolationKind::Generic,
            |v| first_duplicate(v).is_none(),
            |v, d| {
                d.text(
                    |n| match first_duplicate(v) {
                        Some(dup) => format!(
                            "{n} must not contain duplicates, but {dup:?} appears more than once in {v:?}."
                        ),
                        None => format!("{n} must not contain duplicates, but was {v:?}."),
                    },
                    |n| format!("{n} must not contain duplicates."),
                )
            },
        )
    }

    /// [`no_duplicates`](Self::no_duplicates) with a message built from the first repeated item.
    #[track_caller]
    pub fn no_duplicates_with<F>(self, message: F) -> Result<Self, E>
    where
        F: FnOnce(&U) -> String,
    {
        self.check(
            ViolationKind::Generic,
            |v| first_duplicate(v).is_none(),
            |v, d| match first_duplicate(v) {
                Some(dup) => message(dup),
                None => format!("{} must not contain duplicates.", d.name),
            },
        )
    }
}

fn first_duplicate<U: Eq + Hash>(items: &[U]) -> Option<&U> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().find(|item| !seen.insert(*item))
}
