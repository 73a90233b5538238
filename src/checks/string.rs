//! String checks

use regex::Regex;

use crate::argument::Argument;
use crate::error::{Raise, ViolationKind};
use crate::subject::Subject;

impl<T, E> Argument<T, E>
where
    T: Subject,
    T::Target: AsRef<str>,
    E: Raise,
{
    /// Require at least one non-whitespace character.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weir::argument;
    ///
    /// let err = argument(" ", "s").not_white_space().unwrap_err();
    /// assert!(err.is_generic());
    /// assert_eq!(err.param_name(), "s");
    /// ```
    #[track_caller]
    pub fn not_white_space(self) -> Result<Self, E> {
        self.check(
            ViolationKind::Generic,
            |v| !v.as_ref().trim().is_empty(),
            |v, d| {
                d.text(
                    |n| {
                        format!(
                            "{n} must not be empty or consist only of white-space, but was {:?}.",
                            v.as_ref()
                        )
                    },
                    |n| format!("{n} must not be empty or consist only of white-space."),
                )
            },
        )
    }

    /// [`not_white_space`](Self::not_white_space) with a message built from the value.
    #[track_caller]
    pub fn not_white_space_with<F>(self, message: F) -> Result<Self, E>
    where
        F: FnOnce(&str) -> String,
    {
        self.check(
            ViolationKind::Generic,
            |v| !v.as_ref().trim().is_empty(),
            |v, _| message(v.as_ref()),
        )
    }

    /// Require at least `min` characters.
    #[track_caller]
    pub fn min_length(self, min: usize) -> Result<Self, E> {
        self.check(
            ViolationKind::Range,
            |v| v.as_ref().chars().count() >= min,
            |v, d| {
                d.text(
                    |n| {
                        format!(
                            "{n} must contain at least {min} characters, but {:?} has {}.",
                            v.as_ref(),
                            v.as_ref().chars().count()
                        )
                    },
                    |n| format!("{n} is shorter than the allowed minimum."),
                )
            },
        )
    }

    /// [`min_length`](Self::min_length) with a message built from the value and bound.
    #[track_caller]
    pub fn min_length_with<F>(self, min: usize, message: F) -> Result<Self, E>
    where
        F: FnOnce(&str, usize) -> String,
    {
        self.check(
            ViolationKind::Range,
            |v| v.as_ref().chars().count() >= min,
            |v, _| message(v.as_ref(), min),
        )
    }

    /// Require at most `max` characters.
    #[track_caller]
    pub fn max_length(self, max: usize) -> Result<Self, E> {
        self.check(
            ViolationKind::Range,
            |v| v.as_ref().chars().count() <= max,
            |v, d| {
                d.text(
                    |n| {
                        format!(
                            "{n} must contain at most {max} characters, but {:?} has {}.",
                            v.as_ref(),
                            v.as_ref().chars().count()
                        )
                    },
                    |n| format!("{n} is longer than the allowed maximum."),
                )
            },
        )
    }

    /// [`max_length`](Self::max_length) with a message built from the value and bound.
    #[track_caller]
    pub fn max_length_with<F>(self, max: usize, message: F) -> Result<Self, E>
    where
        F: FnOnce(&str, usize) -> String,
    {
        self.check(
            ViolationKind::Range,
            |v| v.as_ref().chars().count() <= max,
            |v, _| message(v.as_ref(), max),
        )
    }

    /// Require between `min` and `max` characters, inclusive.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weir::argument;
    ///
    /// assert!(argument("abc", "code").length_in_range(3, 5).is_ok());
    /// assert!(argument("ab", "code").length_in_range(3, 5).unwrap_err().is_range());
    /// ```
    #[track_caller]
    pub fn length_in_range(self, min: usize, max: usize) -> Result<Self, E> {
        self.check(
            ViolationKind::Range,
            |v| (min..=max).contains(&v.as_ref().chars().count()),
            |v, d| {
                d.text(
                    |n| {
                        format!(
                            "{n} must contain {min} to {max} characters, but {:?} has {}.",
                            v.as_ref(),
                            v.as_ref().chars().count()
                        )
                    },
                    |n| format!("{n} has a length outside the allowed range."),
                )
            },
        )
    }

    /// [`length_in_range`](Self::length_in_range) with a message built from the value and bounds.
    #[track_caller]
    pub fn length_in_range_with<F>(self, min: usize, max: usize, message: F) -> Result<Self, E>
    where
        F: FnOnce(&str, usize, usize) -> String,
    {
        self.check(
            ViolationKind::Range,
            |v| (min..=max).contains(&v.as_ref().chars().count()),
            |v, _| message(v.as_ref(), min, max),
        )
    }

    /// Require the value to start with `prefix`.
    #[track_caller]
    pub fn starts_with(self, prefix: &str) -> Result<Self, E> {
        self.check(
            ViolationKind::Generic,
            |v| v.as_ref().starts_with(prefix),
            |v, d| {
                d.text(
                    |n| format!("{n} must start with {prefix:?}, but was {:?}.", v.as_ref()),
                    |n| format!("{n} does not start with the required prefix."),
                )
            },
        )
    }

    /// [`starts_with`](Self::starts_with) with a message built from the value and prefix.
    #[track_caller]
    pub fn starts_with_with<F>(self, prefix: &str, message: F) -> Result<Self, E>
    where
        F: FnOnce(&str, &str) -> String,
    {
        self.check(
            ViolationKind::Generic,
            |v| v.as_ref().starts_with(prefix),
            |v, _| message(v.as_ref(), prefix),
        )
    }

    /// Require the value to end with `suffix`.
    #[track_caller]
    pub fn ends_with(self, suffix: &str) -> Result<Self, E> {
        self.check(
            ViolationKind::Generic,
            |v| v.as_ref().ends_with(suffix),
            |v, d| {
                d.text(
                    |n| format!("{n} must end with {suffix:?}, but was {:?}.", v.as_ref()),
                    |n| format!("{n} does not end with the required suffix."),
                )
            },
        )
    }

    /// [`ends_with`](Self::ends_with) with a message built from the value and suffix.
    #[track_caller]
    pub fn ends_with_with<F>(self, suffix: &str, message: F) -> Result<Self, E>
    where
        F: FnOnce(&str, &str) -> String,
    {
        self.check(
            ViolationKind::Generic,
            |v| v.as_ref().ends_with(suffix),
            |v, _| message(v.as_ref(), suffix),
        )
    }

    /// Require the value to contain `needle`.
    #[track_caller]
    pub fn contains_substring(self, needle: &str) -> Result<Self, E> {
        self.check(
            ViolationKind::Generic,
            |v| v.as_ref().contains(needle),
            |v, d| {
                d.text(
                    |n| format!("{n} must contain {needle:?}, but was {:?}.", v.as_ref()),
                    |n| format!("{n} does not contain the required text."),
                )
            },
        )
    }

    /// [`contains_substring`](Self::contains_substring) with a message built from the value.
    #[track_caller]
    pub fn contains_substring_with<F>(self, needle: &str, message: F) -> Result<Self, E>
    where
        F: FnOnce(&str, &str) -> String,
    {
        self.check(
            ViolationKind::Generic,
            |v| v.as_ref().contains(needle),
            |v, _| message(v.as_ref(), needle),
        )
    }

    /// Require `pattern` to match somewhere in the value.
    ///
    /// Anchor the pattern with `^` and `$` to require a whole-value match.
    /// Matching runs in linear time, so there is no timeout to report.
    ///
    /// # Example
    ///
    /// ```rust
    /// use regex::Regex;
    /// use weir::argument;
    ///
    /// let slug = Regex::new(r"^[a-z0-9-]+$").unwrap();
    /// assert!(argument("hello-world", "slug").matches(&slug).is_ok());
    /// assert!(argument("Hello World", "slug").matches(&slug).is_err());
    /// ```
    #[track_caller]
    pub fn matches(self, pattern: &Regex) -> Result<Self, E> {
        self.check(
            ViolationKind::Generic,
            |v| pattern.is_match(v.as_ref()),
            |v, d| {
                d.text(
                    |n| {
                        format!(
                            "{n} must match the pattern {:?}, but was {:?}.",
                            pattern.as_str(),
                            v.as_ref()
                        )
                    },
                    |n| format!("{n} does not match the required pattern."),
                )
            },
        )
    }

    /// [`matches`](Self::matches) with a message built from the value and pattern.
    #[track_caller]
    pub fn matches_with<F>(self, pattern: &Regex, message: F) -> Result<Self, E>
    where
        F: FnOnce(&str, &Regex) -> String,
    {
        self.check(
            ViolationKind::Generic,
            |v| pattern.is_match(v.as_ref()),
            |v, _| message(v.as_ref(), pattern),
        )
    }
}
