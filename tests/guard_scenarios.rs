//! End-to-end guard clause scenarios
//!
//! Each test reads like a real call site: a function guarding its inputs,
//! then assertions on what the caller receives.

use std::error::Error;
use std::sync::{Arc, Mutex};

use regex::Regex;
use weir::prelude::*;
use weir::{scope, ArgumentError};

#[derive(Debug, Clone)]
struct Transfer {
    account: String,
    amount: i64,
    memo: Option<String>,
    tags: Vec<String>,
}

fn accept(transfer: &Transfer) -> Result<i64, ArgumentError> {
    let iban = Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Z0-9]{4,30}$").unwrap();

    arg!(&transfer.account).not_white_space()?.matches(&iban)?;
    let amount = arg!(transfer.amount).in_range(1, 1_000_000)?;
    arg!(&transfer.memo).max_length(140)?;
    arg!(&transfer.tags).max_count(5)?.no_duplicates()?;

    Ok(amount.into_value())
}

fn transfer() -> Transfer {
    Transfer {
        account: "DE44500105175407324931".to_string(),
        amount: 250,
        memo: None,
        tags: vec!["rent".to_string()],
    }
}

#[test]
fn valid_transfer_passes_every_guard() {
    assert_eq!(accept(&transfer()).unwrap(), 250);
}

#[test]
fn each_guard_reports_its_own_field() {
    let mut t = transfer();
    t.amount = 0;
    assert_eq!(accept(&t).unwrap_err().param_name(), "amount");

    let mut t = transfer();
    t.memo = Some("x".repeat(141));
    assert_eq!(accept(&t).unwrap_err().param_name(), "memo");

    let mut t = transfer();
    t.tags = vec!["a".into(), "a".into()];
    assert_eq!(accept(&t).unwrap_err().param_name(), "tags");

    let mut t = transfer();
    t.account = "not an iban".into();
    assert_eq!(accept(&t).unwrap_err().param_name(), "account");
}

#[test]
fn min_failure_is_range_with_value_and_bound() {
    let err = argument(5, "x").min(10).unwrap_err();

    assert!(err.is_range());
    assert_eq!(err.param_name(), "x");
    assert!(err.message().contains('5'));
    assert!(err.message().contains("10"));
}

#[test]
fn whitespace_failure_is_generic() {
    let err = argument(" ", "s").not_white_space().unwrap_err();

    assert!(err.is_generic());
    assert_eq!(err.param_name(), "s");
}

#[test]
fn secure_equal_hides_both_values() {
    let err = argument("secret", "s").secure().equal("other").unwrap_err();

    assert!(!err.message().contains("secret"));
    assert!(!err.message().contains("other"));
    assert!(!err.to_string().contains("secret"));
}

#[test]
fn open_equal_shows_both_values() {
    let err = argument("secret", "s").equal("other").unwrap_err();

    assert!(err.message().contains("secret"));
    assert!(err.message().contains("other"));
}

#[test]
fn require_value_notifies_scope_once_before_returning() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let guard = scope::begin(move |obs| {
        let err = obs.error().downcast_ref::<ArgumentError>().unwrap();
        sink.lock().unwrap().push((err.to_string(), err.is_null()));
    });

    let err = argument(None::<u32>, "x").require_value().unwrap_err();
    guard.release();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], (err.to_string(), true));
}

#[test]
fn caller_message_is_used_verbatim() {
    let err = argument(3, "replicas")
        .min_with(5, |v, min| format!("replicas {v} below quorum {min}"))
        .unwrap_err();

    assert_eq!(err.message(), "replicas 3 below quorum 5");
    assert!(err.to_string().starts_with("replicas 3 below quorum 5"));
}

#[test]
fn chain_keeps_name_and_policy() {
    let arg = argument(42, "answer")
        .secure()
        .min(1)
        .and_then(|a| a.max(100))
        .and_then(|a| a.not_equal(13))
        .unwrap();

    assert_eq!(arg.name(), "answer");
    assert!(arg.is_secure());
    assert!(!arg.is_modified());
}

#[test]
fn absent_values_defer_to_presence_checks() {
    let port: Option<u16> = None;

    assert!(argument(port, "port").in_range(1024, 49151).is_ok());
    assert!(argument(port, "port").one_of([80, 443]).is_ok());

    let err = argument(port, "port").require_value().unwrap_err();
    assert!(err.is_null());
}

#[test]
fn wrap_failure_reads_like_a_bad_argument() {
    let err = argument("12:77", "time")
        .wrap(|s| chrono_like_parse(s))
        .unwrap_err();

    assert!(err.is_generic());
    assert_eq!(err.param_name(), "time");
    assert_eq!(err.source().unwrap().to_string(), "minute out of range");
}

#[test]
fn unnamed_arguments_get_a_placeholder() {
    let err = Argument::unnamed(-1i32).min(0).unwrap_err();
    assert_eq!(err.param_name(), "The i32 argument");
}

fn chrono_like_parse(s: &str) -> Result<(u8, u8), String> {
    let (h, m) = s.split_once(':').ok_or("missing ':'")?;
    let h: u8 = h.parse().map_err(|_| "bad hour")?;
    let m: u8 = m.parse().map_err(|_| "bad minute")?;
    if m > 59 {
        return Err("minute out of range".to_string());
    }
    Ok((h, m))
}
