//! Flagfile expansion through the parser, and persistence round trips.

use anyhow::{Result, ensure};
use ortho_flags::{Flag, FlagValue, FlagValues, FlagsError, flagfile};
use rstest::{fixture, rstest};
use serial_test::serial;
use test_helpers::{cwd, flagfile::FlagfileDir};

#[fixture]
fn flags() -> FlagValues {
    let mut flags = FlagValues::new();
    let definitions = [
        Flag::integer("a", "first").default(0),
        Flag::integer("b", "second").default(0),
        Flag::string("message", "text").default(""),
        Flag::boolean("verbose", "chatty").default(false),
        Flag::multi_string("tag", "labels"),
        Flag::spaceseplist("words", "words"),
    ];
    for flag in definitions {
        flags.define(flag).expect("valid definition");
    }
    flags
}

#[fixture]
fn dir() -> FlagfileDir {
    FlagfileDir::new().expect("create flagfile directory")
}

#[rstest]
fn flagfile_values_are_applied_and_present(mut flags: FlagValues, dir: FlagfileDir) -> Result<()> {
    dir.write("f.flags", &["--a=1", "--b=2"])?;
    let directive = dir.directive("f.flags");
    let rest = flags.parse(["prog", directive.as_str()])?;
    ensure!(rest == ["prog"]);
    ensure!(flags.typed::<i64>("a")? == Some(1));
    ensure!(flags.typed::<i64>("b")? == Some(2));
    ensure!(flags.is_present("a")? && flags.is_present("b")?);
    Ok(())
}

#[rstest]
fn command_line_beats_flagfile_on_either_side(mut flags: FlagValues, dir: FlagfileDir) -> Result<()> {
    dir.write("f.flags", &["--a=1", "--a=2", "--b=2"])?;
    let directive = dir.directive("f.flags");
    flags.parse(["prog", "--a=9", directive.as_str(), "--b=8"])?;
    ensure!(flags.typed::<i64>("a")? == Some(9));
    ensure!(flags.typed::<i64>("b")? == Some(8));
    Ok(())
}

#[rstest]
fn later_lines_in_a_file_win(mut flags: FlagValues, dir: FlagfileDir) -> Result<()> {
    dir.write("f.flags", &["--a=1", "--a=2"])?;
    let directive = dir.directive("f.flags");
    flags.parse(["prog", directive.as_str()])?;
    ensure!(flags.typed::<i64>("a")? == Some(2));
    Ok(())
}

#[rstest]
fn self_including_file_is_tolerated(mut flags: FlagValues, dir: FlagfileDir) -> Result<()> {
    let own = dir.directive("loop.flags");
    dir.write("loop.flags", &[own.as_str(), "--message=setFromTempFile3", "--verbose"])?;
    flags.parse(["prog", own.as_str(), "--noverbose"])?;
    ensure!(flags.typed::<String>("message")?.as_deref() == Some("setFromTempFile3"));
    ensure!(flags.typed::<bool>("verbose")? == Some(false));
    Ok(())
}

#[rstest]
fn mutual_inclusion_reports_the_skip(dir: FlagfileDir) -> Result<()> {
    let to_a = dir.directive("a.flags");
    let to_b = dir.directive("b.flags");
    dir.write("a.flags", &["--a=1", to_b.as_str()])?;
    dir.write("b.flags", &["--b=2", to_a.as_str()])?;
    let expansion = flagfile::expand(&["prog", to_a.as_str()], false)?;
    ensure!(expansion.tokens == ["prog", "--a=1", "--b=2"]);
    ensure!(expansion.files.len() == 2);
    ensure!(expansion.skipped.len() == 1);
    Ok(())
}

#[rstest]
fn missing_flagfile_is_fatal(mut flags: FlagValues, dir: FlagfileDir) {
    let directive = dir.directive("absent.flags");
    let err = flags
        .parse(["prog", directive.as_str()])
        .expect_err("file is missing");
    assert!(matches!(err, FlagsError::Flagfile { .. }));
}

#[rstest]
#[serial]
fn relative_paths_resolve_against_the_working_directory(
    mut flags: FlagValues,
    dir: FlagfileDir,
) -> Result<()> {
    dir.write("inner.flags", &["--b=5"])?;
    dir.write("outer.flags", &["--a=4", "--flagfile=inner.flags"])?;
    let guard = cwd::enter(dir.root())?;
    let parsed = flags.parse(["prog", "--flagfile", "outer.flags"]);
    guard.restore()?;
    drop(guard);
    parsed?;
    ensure!(flags.typed::<i64>("a")? == Some(4));
    ensure!(flags.typed::<i64>("b")? == Some(5));
    Ok(())
}

#[rstest]
fn serialised_flags_reparse_to_the_same_values(mut flags: FlagValues) -> Result<()> {
    flags.parse([
        "prog",
        "--a=-3",
        "--message=two words",
        "--verbose",
        "--tag=x",
        "--tag=y",
        "--words=alpha  beta",
    ])?;
    let text = flags.flags_into_string();
    ensure!(
        text == "--a=-3\n--b=0\n--message=two words\n--verbose\n--tag=x\n--tag=y\n--words=alpha beta\n",
        "text: {text}"
    );

    let mut copy = flags.clone();
    copy.reset();
    copy.read_flags_from_string(&text)?;
    for name in ["a", "b", "message", "verbose", "tag", "words"] {
        ensure!(copy.value(name)? == flags.value(name)?, "{name} differs");
    }
    Ok(())
}

#[rstest]
fn empty_list_round_trips(mut flags: FlagValues) -> Result<()> {
    flags.set_value("words", Some(FlagValue::List(Vec::new())))?;
    let text = flags.flags_into_string();
    ensure!(text.contains("--words=\n"));
    let mut copy = flags.clone();
    copy.reset();
    copy.read_flags_from_string(&text)?;
    ensure!(copy.value("words")? == Some(&FlagValue::List(Vec::new())));
    Ok(())
}

#[rstest]
fn failed_read_restores_prior_state(mut flags: FlagValues) -> Result<()> {
    flags.parse(["prog", "--a=1"])?;
    let err = flags
        .read_flags_from_string("# comment\n--a=2\n--b=oops\n")
        .expect_err("b is not an integer");
    ensure!(matches!(err, FlagsError::IllegalValue { .. }));
    ensure!(flags.typed::<i64>("a")? == Some(1));
    ensure!(flags.lookup("a").map(Flag::present) == Some(1));
    Ok(())
}

#[rstest]
fn append_then_read_from_file(mut flags: FlagValues, dir: FlagfileDir) -> Result<()> {
    let path = dir.path("saved.flags");
    flags.parse(["prog", "--a=7"])?;
    flags.append_flags_into_file(&path)?;
    flags.parse(["prog", "--b=8"])?;
    flags.append_flags_into_file(&path)?;

    let mut copy = flags.clone();
    copy.reset();
    copy.read_from_flags_file(&path)?;
    ensure!(copy.typed::<i64>("a")? == Some(7));
    ensure!(copy.typed::<i64>("b")? == Some(8));
    Ok(())
}

#[rstest]
fn unwritable_destination_is_a_write_error(flags: FlagValues, dir: FlagfileDir) {
    let err = flags
        .append_flags_into_file(dir.root())
        .expect_err("a directory is not appendable");
    assert!(matches!(err, FlagsError::Write { .. }));
}

#[rstest]
fn two_line_directive_behaves_the_same_on_every_path(
    flags: FlagValues,
    dir: FlagfileDir,
) -> Result<()> {
    let inner = dir.write("inner.flags", &["--a=5"])?;
    let outer = dir.write("outer.flags", &["--flagfile", inner.as_str(), "--b=6"])?;

    let mut from_argv = flags.clone();
    let directive = dir.directive("outer.flags");
    from_argv.parse(["prog", directive.as_str()])?;

    let mut from_text = flags.clone();
    from_text.read_flags_from_string(&format!("--flagfile\n{inner}\n--b=6\n"))?;

    let mut from_file = flags;
    from_file.read_from_flags_file(&outer)?;

    for registry in [&from_argv, &from_text, &from_file] {
        ensure!(registry.typed::<i64>("a")? == Some(5));
        ensure!(registry.typed::<i64>("b")? == Some(6));
    }
    Ok(())
}

#[rstest]
fn the_first_of_several_directives_takes_precedence(
    mut flags: FlagValues,
    dir: FlagfileDir,
) -> Result<()> {
    dir.write("one.flags", &["--a=1"])?;
    dir.write("two.flags", &["--a=2"])?;
    let one = dir.directive("one.flags");
    let two = dir.directive("two.flags");
    flags.parse(["prog", one.as_str(), two.as_str()])?;
    ensure!(flags.typed::<i64>("a")? == Some(1));
    Ok(())
}

#[rstest]
fn values_spanning_lines_are_refused_on_read(mut flags: FlagValues) -> Result<()> {
    flags.parse(["prog", "--message=line1\nline2"])?;
    let text = flags.flags_into_string();
    let mut copy = flags.clone();
    copy.reset();
    let err = copy
        .read_flags_from_string(&text)
        .expect_err("line2 is not a flag");
    ensure!(matches!(err, FlagsError::UnexpectedArgument { .. }));
    ensure!(copy.typed::<String>("message")?.as_deref() == Some(""));
    Ok(())
}
