//! Unit tests for environment guards.

use super::*;
use std::sync::{Arc, Barrier};
use std::thread;

fn current(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[test]
fn flag_guard_restores_prior_value() {
    let outer = set_flag("helpers_restore", "orig");
    {
        let _inner = set_flag("helpers_restore", "temp");
        assert_eq!(current("FLAGS_helpers_restore").as_deref(), Some("temp"));
    }
    assert_eq!(current("FLAGS_helpers_restore").as_deref(), Some("orig"));
    drop(outer);
    assert_eq!(current("FLAGS_helpers_restore"), None);
}

#[test]
fn remove_guard_puts_value_back() {
    let _base = set_var("HELPERS_REMOVE", "present");
    {
        let guard = remove_var("HELPERS_REMOVE");
        assert_eq!(guard.key(), "HELPERS_REMOVE");
        assert_eq!(current("HELPERS_REMOVE"), None);
    }
    assert_eq!(current("HELPERS_REMOVE").as_deref(), Some("present"));
}

#[test]
fn stacked_guards_restore_in_lifo_order() {
    let _clean = remove_flag("helpers_stack");
    let first = set_flag("helpers_stack", "v1");
    let second = set_flag("helpers_stack", "v2");
    drop(second);
    assert_eq!(current("FLAGS_helpers_stack").as_deref(), Some("v1"));
    drop(first);
    assert_eq!(current("FLAGS_helpers_stack"), None);
}

#[test]
fn scope_restores_every_guard() {
    {
        let _scope = scope_with(|lock| {
            vec![
                lock.set_var("FLAGS_helpers_scope_a", "1"),
                lock.set_var("FLAGS_helpers_scope_b", "2"),
            ]
        });
        assert_eq!(current("FLAGS_helpers_scope_b").as_deref(), Some("2"));
    }
    assert_eq!(current("FLAGS_helpers_scope_a"), None);
    assert_eq!(current("FLAGS_helpers_scope_b"), None);
}

#[test]
fn concurrent_guards_on_distinct_keys() {
    const THREADS: usize = 4;
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|idx| {
            let wait = Arc::clone(&barrier);
            thread::spawn(move || {
                let name = format!("helpers_thread_{idx}");
                wait.wait();
                for round in 0..8 {
                    let value = format!("{idx}-{round}");
                    let guard = set_flag(&name, &value);
                    assert_eq!(current(&flag_var(&name)), Some(value));
                    drop(guard);
                    assert_eq!(current(&flag_var(&name)), None);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread panicked");
    }
}
