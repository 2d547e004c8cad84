//! Unit tests for the registry: lookups, help, snapshots and persistence.

use super::FlagValues;
use crate::error::FlagsError;
use crate::flag::Flag;
use crate::value::FlagValue;
use anyhow::{Result, ensure};
use rstest::{fixture, rstest};

#[fixture]
fn flags() -> FlagValues {
    let mut flags = FlagValues::new().with_main_module("tool");
    let definitions = [
        Flag::boolean("debug", "debug output").default(false),
        Flag::integer("repeat", "how many times to repeat")
            .default(4)
            .lower_bound(0)
            .short_name('r'),
        Flag::string("name", "").module("net"),
        Flag::multi_string("tag", "labels").default(vec!["a"]),
    ];
    for flag in definitions {
        flags.define(flag).expect("valid definition");
    }
    flags
}

#[rstest]
fn short_names_resolve_to_canonical(flags: FlagValues) {
    assert_eq!(flags.canonical("r"), Some("repeat"));
    assert_eq!(flags.canonical("repeat"), Some("repeat"));
    assert_eq!(flags.canonical("rep"), None);
    assert!(flags.contains("r"));
    assert_eq!(flags.lookup("r").map(Flag::name), Some("repeat"));
}

#[rstest]
fn unknown_names_fail_every_accessor(mut flags: FlagValues) {
    assert!(matches!(flags.value("nope"), Err(FlagsError::UnknownFlag { .. })));
    assert!(matches!(flags.is_present("nope"), Err(FlagsError::UnknownFlag { .. })));
    assert!(matches!(
        flags.set_from_str("nope", "1"),
        Err(FlagsError::UnknownFlag { .. })
    ));
    assert!(matches!(flags.delete("nope"), Err(FlagsError::UnknownFlag { .. })));
}

#[rstest]
fn get_falls_back_only_when_unset(flags: FlagValues) -> Result<()> {
    ensure!(flags.get("name", "anon")? == FlagValue::from("anon"));
    ensure!(flags.get("repeat", 0)? == FlagValue::from(4));
    Ok(())
}

#[rstest]
fn typed_rejects_mismatched_kinds(flags: FlagValues) {
    let err = flags.typed::<bool>("repeat").expect_err("repeat is an integer");
    assert!(matches!(err, FlagsError::IllegalValue { .. }));
}

#[rstest]
fn set_from_str_counts_as_occurrence(mut flags: FlagValues) -> Result<()> {
    flags.set_from_str("r", "9")?;
    ensure!(flags.is_present("repeat")?);
    ensure!(flags.typed::<i64>("repeat")? == Some(9));
    ensure!(flags.set_from_str("repeat", "-1").is_err());
    ensure!(flags.typed::<i64>("repeat")? == Some(9));
    Ok(())
}

#[rstest]
fn set_value_leaves_presence_alone(mut flags: FlagValues) -> Result<()> {
    flags.set_value("repeat", Some(FlagValue::from(2)))?;
    ensure!(!flags.is_present("repeat")?);
    ensure!(flags.typed::<i64>("repeat")? == Some(2));
    Ok(())
}

#[rstest]
fn reset_restores_every_default(mut flags: FlagValues) -> Result<()> {
    flags.parse(["prog", "--debug", "-r", "1", "--tag=z"])?;
    flags.reset();
    ensure!(flags.typed::<bool>("debug")? == Some(false));
    ensure!(flags.typed::<i64>("repeat")? == Some(4));
    ensure!(flags.typed::<Vec<String>>("tag")? == Some(vec!["a".to_owned()]));
    ensure!(flags.iter().all(|flag| !flag.is_present()));
    Ok(())
}

#[rstest]
fn registered_names_include_short_aliases(flags: FlagValues) {
    let names = flags.registered_names();
    assert_eq!(names, ["debug", "repeat", "r", "name", "tag"]);
    assert_eq!(flags.len(), 4);
    assert!(!flags.is_empty());
    assert!(FlagValues::new().is_empty());
}

#[rstest]
fn prefix_table_covers_negations_and_aliases(flags: FlagValues) {
    let table = flags.shortest_unique_prefixes();
    assert_eq!(table.get("debug").map(String::as_str), Some("d"));
    assert_eq!(table.get("nodebug").map(String::as_str), Some("no"));
    assert_eq!(table.get("r").map(String::as_str), Some("r"));
    assert_eq!(table.get("repeat").map(String::as_str), Some("re"));
    assert_eq!(table.get("name").map(String::as_str), Some("na"));
}

#[rstest]
fn modules_group_by_first_appearance(flags: FlagValues) {
    let groups: Vec<(&str, Vec<&str>)> = flags
        .module_groups()
        .into_iter()
        .map(|(module, members)| (module, members.into_iter().map(Flag::name).collect()))
        .collect();
    assert_eq!(
        groups,
        [
            ("tool", vec!["debug", "repeat", "tag"]),
            ("net", vec!["name"]),
        ]
    );
}

#[rstest]
fn help_lists_defaults_and_tips(flags: FlagValues) {
    let expected = concat!(
        "tool:\n",
        "  --[no]debug:  debug output\n",
        "    (default: 'false')\n",
        "  -r,--repeat:  how many times to repeat\n",
        "    (default: '4')\n",
        "    (a non-negative integer)\n",
        "  --tag:  labels\n",
        "    (default: 'a')\n",
        "    (repeat this option to specify a list of values)\n",
        "\n",
        "net:\n",
        "  --name:\n",
    );
    assert_eq!(flags.to_string(), expected);
}

#[rstest]
fn saver_restores_on_drop(mut flags: FlagValues) -> Result<()> {
    {
        let mut scoped = flags.saver();
        ensure!(scoped.saved().len() == 4);
        scoped.parse(["prog", "--debug", "--tag=b"])?;
        scoped.set_default("repeat", Some(FlagValue::from(10)))?;
        ensure!(scoped.typed::<bool>("debug")? == Some(true));
    }
    ensure!(flags.typed::<bool>("debug")? == Some(false));
    ensure!(flags.typed::<i64>("repeat")? == Some(4));
    ensure!(flags.lookup("repeat").and_then(Flag::default_value) == Some(&FlagValue::from(4)));
    ensure!(!flags.is_present("tag")?);
    Ok(())
}

#[rstest]
fn restore_skips_deleted_flags(mut flags: FlagValues) -> Result<()> {
    let saved = flags.save();
    flags.delete("name")?;
    flags.set_from_str("debug", "true")?;
    flags.restore(&saved);
    ensure!(!flags.contains("name"));
    ensure!(flags.typed::<bool>("debug")? == Some(false));
    Ok(())
}

#[rstest]
fn flags_into_string_skips_unset_values(mut flags: FlagValues) -> Result<()> {
    flags.parse(["prog", "--tag=x", "--tag=y"])?;
    ensure!(flags.flags_into_string() == "--nodebug\n--repeat=4\n--tag=x\n--tag=y\n");
    Ok(())
}

#[rstest]
fn read_flags_from_string_is_all_or_nothing(mut flags: FlagValues) -> Result<()> {
    let err = flags
        .read_flags_from_string("--debug\n--repeat=-5\n")
        .expect_err("repeat is bounded");
    ensure!(matches!(err, FlagsError::IllegalValue { .. }));
    ensure!(flags.typed::<bool>("debug")? == Some(false));
    ensure!(!flags.is_present("debug")?);

    flags.read_flags_from_string("// comment\n--debug\n-r\n6\n")?;
    ensure!(flags.typed::<bool>("debug")? == Some(true));
    ensure!(flags.typed::<i64>("repeat")? == Some(6));
    Ok(())
}

#[rstest]
fn stray_tokens_in_flag_text_fail_and_roll_back(mut flags: FlagValues) -> Result<()> {
    let err = flags
        .read_flags_from_string("--debug\nstray\n--repeat=6\n")
        .expect_err("stray is not a flag");
    ensure!(matches!(err, FlagsError::UnexpectedArgument { ref token } if token == "stray"));
    ensure!(flags.typed::<bool>("debug")? == Some(false));
    ensure!(flags.typed::<i64>("repeat")? == Some(4));
    ensure!(!flags.is_present("debug")?);
    Ok(())
}

#[rstest]
fn multi_line_values_do_not_round_trip_silently(mut flags: FlagValues) -> Result<()> {
    flags.set_from_str("name", "line1\nline2")?;
    let text = flags.flags_into_string();
    let mut copy = flags.clone();
    copy.reset();
    let err = copy
        .read_flags_from_string(&text)
        .expect_err("the second line is not a flag");
    ensure!(matches!(err, FlagsError::UnexpectedArgument { ref token } if token == "line2"));
    ensure!(copy.value("name")?.is_none());
    Ok(())
}
