//! What a check looks at
//!
//! Checks never inspect an argument's value directly. They ask the value for
//! its [`Subject`], which is `None` when the value is absent. Absent values
//! pass every check except the presence checks, so a chain such as
//! `argument(maybe_port, "port").min(1024)` accepts `None` and leaves the
//! decision to an explicit `require_value()`.
//!
//! # Example
//!
//! ```rust
//! use weir::Subject;
//!
//! assert_eq!(Some(5).subject(), Some(&5));
//! assert_eq!(None::<i32>.subject(), None);
//! assert_eq!(String::from("abc").subject().map(String::as_str), Some("abc"));
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

/// A value that checks can inspect.
///
/// Implement this for your own types with [`impl_subject!`](crate::impl_subject)
/// when they should be checked as themselves.
pub trait Subject {
    /// The type checks compare against.
    type Target: ?Sized;

    /// The value to check, or `None` when absent.
    fn subject(&self) -> Option<&Self::Target>;
}

/// Implement [`Subject`] for types that are checked as themselves.
///
/// # Example
///
/// ```rust
/// use weir::{argument, impl_subject};
///
/// #[derive(Debug, PartialEq, PartialOrd)]
/// struct Celsius(f64);
///
/// impl_subject!(Celsius);
///
/// let err = argument(Celsius(-300.0), "temp").min(Celsius(-273.15)).unwrap_err();
/// assert!(err.is_range());
/// ```
#[macro_export]
macro_rules! impl_subject {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Subject for $ty {
                type Target = $ty;

                #[inline]
                fn subject(&self) -> ::std::option::Option<&Self::Target> {
                    ::std::option::Option::Some(self)
                }
            }
        )+
    };
}

impl_subject!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
    Duration
);

impl<'a> Subject for &'a str {
    type Target = &'a str;

    #[inline]
    fn subject(&self) -> Option<&&'a str> {
        Some(self)
    }
}

impl Subject for String {
    type Target = String;

    #[inline]
    fn subject(&self) -> Option<&String> {
        Some(self)
    }
}

impl<'a> Subject for Cow<'a, str> {
    type Target = Cow<'a, str>;

    #[inline]
    fn subject(&self) -> Option<&Cow<'a, str>> {
        Some(self)
    }
}

impl<U> Subject for [U] {
    type Target = [U];

    #[inline]
    fn subject(&self) -> Option<&[U]> {
        Some(self)
    }
}

impl<U, const N: usize> Subject for [U; N] {
    type Target = [U];

    #[inline]
    fn subject(&self) -> Option<&[U]> {
        Some(self.as_slice())
    }
}

impl<U> Subject for Vec<U> {
    type Target = [U];

    #[inline]
    fn subject(&self) -> Option<&[U]> {
        Some(self.as_slice())
    }
}

impl<U> Subject for VecDeque<U> {
    type Target = VecDeque<U>;

    #[inline]
    fn subject(&self) -> Option<&VecDeque<U>> {
        Some(self)
    }
}

impl<U, S> Subject for HashSet<U, S> {
    type Target = HashSet<U, S>;

    #[inline]
    fn subject(&self) -> Option<&Self::Target> {
        Some(self)
    }
}

impl<U> Subject for BTreeSet<U> {
    type Target = BTreeSet<U>;

    #[inline]
    fn subject(&self) -> Option<&Self::Target> {
        Some(self)
    }
}

impl<K, V, S> Subject for HashMap<K, V, S> {
    type Target = HashMap<K, V, S>;

    #[inline]
    fn subject(&self) -> Option<&Self::Target> {
        Some(self)
    }
}

impl<K, V> Subject for BTreeMap<K, V> {
    type Target = BTreeMap<K, V>;

    #[inline]
    fn subject(&self) -> Option<&Self::Target> {
        Some(self)
    }
}

impl<T: Subject> Subject for Option<T> {
    type Target = T::Target;

    #[inline]
    fn subject(&self) -> Option<&T::Target> {
        self.as_ref().and_then(Subject::subject)
    }
}

impl<T: Subject + ?Sized> Subject for &T {
    type Target = T::Target;

    #[inline]
    fn subject(&self) -> Option<&T::Target> {
        (**self).subject()
    }
}

impl<T: Subject + ?Sized> Subject for Box<T> {
    type Target = T::Target;

    #[inline]
    fn subject(&self) -> Option<&T::Target> {
        (**self).subject()
    }
}

impl<T: Subject + ?Sized> Subject for Arc<T> {
    type Target = T::Target;

    #[inline]
    fn subject(&self) -> Option<&T::Target> {
        (**self).subject()
    }
}

impl<T: Subject + ?Sized> Subject for Rc<T> {
    type Target = T::Target;

    #[inline]
    fn subject(&self) -> Option<&T::Target> {
        (**self).subject()
    }
}

/// Something with a number of elements.
///
/// Strings count characters rather than bytes.
pub trait Countable {
    /// Number of elements.
    fn count(&self) -> usize;
}

impl Countable for str {
    fn count(&self) -> usize {
        self.chars().count()
    }
}

impl Countable for String {
    fn count(&self) -> usize {
        self.chars().count()
    }
}

impl Countable for Cow<'_, str> {
    fn count(&self) -> usize {
        self.chars().count()
    }
}

impl<C: Countable + ?Sized> Countable for &C {
    fn count(&self) -> usize {
        (**self).count()
    }
}

impl<U> Countable for [U] {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<U> Countable for VecDeque<U> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<U, S> Countable for HashSet<U, S> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<U> Countable for BTreeSet<U> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> Countable for HashMap<K, V, S> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<K, V> Countable for BTreeMap<K, V> {
    fn count(&self) -> usize {
        self.len()
    }
}

/// A collection that can answer whether it holds an item.
///
/// Maps answer for their keys.
pub trait Membership<I: ?Sized> {
    /// `true` if `item` is present.
    fn has(&self, item: &I) -> bool;
}

impl<U: PartialEq> Membership<U> for [U] {
    fn has(&self, item: &U) -> bool {
        self.contains(item)
    }
}

impl<U: PartialEq> Membership<U> for VecDeque<U> {
    fn has(&self, item: &U) -> bool {
        self.contains(item)
    }
}

impl<U: Eq + Hash, S: BuildHasher> Membership<U> for HashSet<U, S> {
    fn has(&self, item: &U) -> bool {
        self.contains(item)
    }
}

impl<U: Ord> Membership<U> for BTreeSet<U> {
    fn has(&self, item: &U) -> bool {
        self.contains(item)
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> Membership<K> for HashMap<K, V, S> {
    fn has(&self, item: &K) -> bool {
        self.contains_key(item)
    }
}

impl<K: Ord, V> Membership<K> for BTreeMap<K, V> {
    fn has(&self, item: &K) -> bool {
        self.contains_key(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_defers_to_inner() {
        let present: Option<String> = Some("hi".to_string());
        let absent: Option<String> = None;

        assert_eq!(present.subject().map(String::as_str), Some("hi"));
        assert_eq!(absent.subject(), None);
    }

    #[test]
    fn test_nested_option() {
        let inner_absent: Option<Option<i32>> = Some(None);
        assert_eq!(inner_absent.subject(), None);
        assert_eq!(Some(Some(3)).subject(), Some(&3));
    }

    #[test]
    fn test_references_and_smart_pointers() {
        let value = 7u8;
        assert_eq!((&value).subject(), Some(&7));
        assert_eq!(Box::new(7u8).subject(), Some(&7));
        assert_eq!(Arc::new(String::from("x")).subject(), Some(&String::from("x")));
        assert_eq!(Cow::Borrowed("cow").subject(), Some(&Cow::Borrowed("cow")));
        assert_eq!("str".subject(), Some(&"str"));
    }

    #[test]
    fn test_sequences_target_slices() {
        let v = vec![1, 2, 3];
        assert_eq!(v.subject(), Some(&[1, 2, 3][..]));
        assert_eq!([4, 5].subject(), Some(&[4, 5][..]));
    }

    #[test]
    fn test_count_uses_chars_for_strings() {
        assert_eq!("héllo".count(), 5);
        assert_eq!([1, 2][..].count(), 2);
    }

    #[test]
    fn test_membership() {
        let set: HashSet<&str> = ["a", "b"].into_iter().collect();
        assert!(set.has(&"a"));
        assert!(!set.has(&"z"));

        let mut map = BTreeMap::new();
        map.insert("key", 1);
        assert!(map.has(&"key"));

        assert!([1, 2, 3][..].has(&2));
    }
}
