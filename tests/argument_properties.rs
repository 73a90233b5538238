//! Property-based tests for argument handles

use proptest::prelude::*;
use weir::{argument, Argument};

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,15}"
}

proptest! {
    #[test]
    fn prop_open_messages_render_the_value(value in -10_000i64..0, bound in 1i64..10_000) {
        let err = argument(value, "n").min(bound).unwrap_err();
        prop_assert!(err.message().contains(&value.to_string()));
    }

    #[test]
    fn prop_blank_strings_are_rendered(blank in "[ \t]{0,6}") {
        let err = argument(blank.as_str(), "s").not_white_space().unwrap_err();
        let rendered = format!("{blank:?}");
        prop_assert!(err.message().contains(&rendered));
    }

    #[test]
    fn prop_collection_messages_render_the_value(
        items in prop::collection::vec(0u8..100, 0..6),
        extra in 1usize..4,
    ) {
        let rendered = format!("{items:?}");
        let expected = items.len() + extra;

        let err = argument(items.clone(), "v").count(expected).unwrap_err();
        prop_assert!(err.message().contains(&rendered));

        let err = argument(items.clone(), "v").min_count(expected).unwrap_err();
        prop_assert!(err.message().contains(&rendered));

        let err = argument(items.clone(), "v").contains(200u8).unwrap_err();
        prop_assert!(err.message().contains(&rendered));

        if let Some(first) = items.first().copied() {
            let err = argument(items.clone(), "v").does_not_contain(first).unwrap_err();
            prop_assert!(err.message().contains(&rendered));
            let err = argument(items.clone(), "v").max_count(0).unwrap_err();
            prop_assert!(err.message().contains(&rendered));
        } else {
            let err = argument(items, "v").not_empty().unwrap_err();
            prop_assert!(err.message().contains("[]"));
        }
    }

    #[test]
    fn prop_secure_messages_never_render_the_value(value in 100_000i64..1_000_000, bound in 1i64..100) {
        let err = argument(value, "n").secure().max(bound).unwrap_err();
        prop_assert!(!err.message().contains(&value.to_string()));
        prop_assert!(!err.message().contains(&bound.to_string()));
    }

    #[test]
    fn prop_secure_strings_stay_hidden(secret in "[A-Za-z]{12,24}") {
        let err = argument(secret.clone(), "token").secure().max_length(4).unwrap_err();
        prop_assert!(!err.message().contains(&secret));
    }

    #[test]
    fn prop_passing_chains_keep_identity(
        name in name_strategy(),
        secure in any::<bool>(),
        value in 0u32..1000,
    ) {
        let arg = Argument::with_secure(value, name.clone(), secure)
            .min(0)
            .and_then(|a| a.max(1000))
            .and_then(|a| a.not_in_range(5000, 6000))
            .unwrap();

        prop_assert_eq!(arg.name(), name.as_str());
        prop_assert_eq!(arg.is_secure(), secure);
        prop_assert!(!arg.is_modified());
    }

    #[test]
    fn prop_projections_keep_identity_and_mark_modified(
        name in name_strategy(),
        secure in any::<bool>(),
        value in any::<u16>(),
    ) {
        let base = Argument::with_secure(value, name.clone(), secure);

        let modified = base.clone().modify(u32::from(value) + 1);
        let wrapped = base.clone().wrap(|v| u8::try_from(*v / 256)).unwrap();
        let cloned = base.cloned();

        for (n, s, m) in [
            (modified.name(), modified.is_secure(), modified.is_modified()),
            (wrapped.name(), wrapped.is_secure(), wrapped.is_modified()),
            (cloned.name(), cloned.is_secure(), cloned.is_modified()),
        ] {
            prop_assert_eq!(n, name.as_str());
            prop_assert_eq!(s, secure);
            prop_assert!(m);
        }
    }

    #[test]
    fn prop_narrowing_round_trips(inner in prop::collection::vec(any::<i32>(), 0..8)) {
        let original = Some(inner);
        let narrowed = argument(original.clone(), "values").require_value().unwrap();
        prop_assert_eq!(Some(narrowed.into_value()), original);
    }

    #[test]
    fn prop_failure_name_survives_projection(name in name_strategy(), value in 0usize..10) {
        let err = Argument::new(value, name.clone())
            .modify_with(|v| v * 2)
            .min(100)
            .unwrap_err();
        prop_assert_eq!(err.param_name(), name.as_str());
    }
}
