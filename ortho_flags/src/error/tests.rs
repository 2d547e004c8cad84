//! Unit tests for error construction and classification.

use rstest::rstest;
use std::io;
use std::path::Path;

use super::{CoerceError, FlagsError};

#[rstest]
fn ambiguous_sorts_and_dedups_candidates() {
    let err = FlagsError::ambiguous(
        "co",
        vec!["commonly".into(), "common".into(), "commonly".into()],
    );
    match &err {
        FlagsError::AmbiguousPrefix { prefix, candidates } => {
            assert_eq!(prefix, "co");
            assert_eq!(candidates, &vec!["common".to_owned(), "commonly".to_owned()]);
        }
        other => panic!("expected AmbiguousPrefix, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "flag prefix 'co' is ambiguous; candidates: common, commonly"
    );
}

#[rstest]
fn illegal_value_carries_flag_context() {
    let err = FlagsError::illegal_value("repeat", "-4", &CoerceError::new("value must be >= 0"));
    assert_eq!(
        err.to_string(),
        "illegal value '-4' for flag 'repeat': value must be >= 0"
    );
}

#[rstest]
#[case(FlagsError::unknown("nosuchflag"), true)]
#[case(FlagsError::missing_argument("--name"), true)]
#[case(FlagsError::unexpected_argument("line2"), true)]
#[case(FlagsError::illegal_value("x", "y", &CoerceError::new("bad")), true)]
#[case(FlagsError::duplicate("q"), false)]
#[case(
    FlagsError::flagfile(Path::new("/missing"), io::Error::from(io::ErrorKind::NotFound)),
    false
)]
fn classifies_parse_errors(#[case] err: FlagsError, #[case] expected: bool) {
    assert_eq!(err.is_parse_error(), expected, "{err}");
}

#[rstest]
fn flagfile_error_exposes_source() {
    let err = FlagsError::flagfile(
        Path::new("/tmp/flags.cfg"),
        io::Error::from(io::ErrorKind::PermissionDenied),
    );
    assert!(std::error::Error::source(&err).is_some());
    assert!(err.to_string().contains("/tmp/flags.cfg"));
}
