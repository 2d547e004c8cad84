//! Documentation IR produced from a registry.

use anyhow::{Context, Result, ensure};
use ortho_flags::docs::FLAGS_DOCS_IR_VERSION;
use ortho_flags::{Flag, FlagKind, FlagValues};
use rstest::{fixture, rstest};
use serde_json::Value;

#[fixture]
fn flags() -> FlagValues {
    let mut flags = FlagValues::new().with_main_module("server");
    let definitions = [
        Flag::integer("port", "listen port").default(8080).short_name('p'),
        Flag::boolean("tls", "use tls").default(false).module("security"),
        Flag::multi_string("peer", "peer addresses"),
        Flag::enumeration("level", ["low", "high"], "log level").default("low"),
    ];
    for flag in definitions {
        flags.define(flag).expect("valid definition");
    }
    flags
}

#[rstest]
fn modules_and_flags_follow_declaration_order(flags: FlagValues) -> Result<()> {
    let doc = flags.doc_metadata("srv");
    ensure!(doc.ir_version == FLAGS_DOCS_IR_VERSION);
    ensure!(doc.program == "srv");
    let layout: Vec<(&str, Vec<(&str, usize)>)> = doc
        .modules
        .iter()
        .map(|module| {
            let flags = module
                .flags
                .iter()
                .map(|flag| (flag.long.as_str(), flag.order))
                .collect();
            (module.name.as_str(), flags)
        })
        .collect();
    let expected: Vec<(&str, Vec<(&str, usize)>)> = vec![
        ("server", vec![("port", 0), ("peer", 2), ("level", 3)]),
        ("security", vec![("tls", 1)]),
    ];
    ensure!(layout == expected, "layout: {layout:?}");
    Ok(())
}

#[rstest]
fn flag_entries_describe_kind_and_state(mut flags: FlagValues) -> Result<()> {
    flags.parse(["prog", "--peer=a", "--peer=b", "-p", "9"])?;
    let doc = flags.doc_metadata("srv");
    let entries: Vec<_> = doc.modules.iter().flat_map(|module| &module.flags).collect();

    let port = entries
        .iter()
        .find(|flag| flag.long == "port")
        .context("port documented")?;
    ensure!(port.short == Some('p'));
    ensure!(port.kind == FlagKind::Integer);
    ensure!(port.default.as_deref() == Some("8080"));
    ensure!(port.current.as_deref() == Some("9"));
    ensure!(!port.is_default);

    let peer = entries
        .iter()
        .find(|flag| flag.long == "peer")
        .context("peer documented")?;
    ensure!(peer.multiple && !peer.negatable);
    ensure!(peer.default.is_none());
    ensure!(peer.current.as_deref() == Some("a,b"));
    ensure!(peer.tip == "repeat this option to specify a list of values");

    let tls = entries
        .iter()
        .find(|flag| flag.long == "tls")
        .context("tls documented")?;
    ensure!(tls.negatable && tls.is_default);

    let level = entries
        .iter()
        .find(|flag| flag.long == "level")
        .context("level documented")?;
    ensure!(level.tip == "<low|high>");
    Ok(())
}

#[rstest]
fn json_uses_snake_case_kinds(flags: FlagValues) -> Result<()> {
    let json = flags.doc_metadata("srv").to_json()?;
    let parsed: Value = serde_json::from_str(&json)?;
    ensure!(parsed.get("ir_version").and_then(Value::as_str) == Some(FLAGS_DOCS_IR_VERSION));
    let first = parsed
        .pointer("/modules/0/flags/0")
        .context("first flag present")?;
    ensure!(first.get("long").and_then(Value::as_str) == Some("port"));
    ensure!(first.get("kind").and_then(Value::as_str) == Some("integer"));
    ensure!(first.get("short").and_then(Value::as_str) == Some("p"));
    let tls = parsed
        .pointer("/modules/1/flags/0")
        .context("security module present")?;
    ensure!(tls.get("kind").and_then(Value::as_str) == Some("boolean"));
    Ok(())
}
