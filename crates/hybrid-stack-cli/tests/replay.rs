#![allow(
    missing_docs,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Trace replay end to end

use hybrid_stack_cli::commands::config::load_config;
use hybrid_stack_cli::replay;
use hybrid_stack_cli::trace::{load_trace, parse_trace};
use hybrid_stack_core::{StackConfig, Topology};
use std::io::Write;

const PUSH_THREE: &str = r#"[
    {"event": "action", "action": "push", "target": "home", "pageType": "native"},
    {"event": "action", "action": "push", "target": "list", "pageType": "native"},
    {"event": "action", "action": "push", "target": "feed", "pageType": "embedded", "fromEmbedded": true}
]"#;

#[test]
fn replays_pushes_in_order() {
    let events = parse_trace(PUSH_THREE).unwrap();
    let report = replay(&events, StackConfig::default());

    assert_eq!(report.events, 3);
    assert_eq!(report.snapshot.routes(), vec!["home", "list", "feed"]);
    assert_eq!(report.metrics.total_actions(), 3);
    assert!(report.rejected.is_empty());
    assert!(report.effects.contains(&"appear feed".to_string()));
}

#[test]
fn pop_to_then_suppressed_native_close() {
    let text = r#"[
        {"event": "action", "action": "push", "target": "a", "pageType": "native"},
        {"event": "action", "action": "push", "target": "b", "pageType": "native"},
        {"event": "action", "action": "push", "target": "c", "pageType": "native"},
        {"event": "action", "action": "popTo", "target": "a", "pageType": "native"},
        {"event": "nativeClose", "target": "c", "pageType": "native", "popTo": true}
    ]"#;
    let report = replay(&parse_trace(text).unwrap(), StackConfig::default());

    assert_eq!(report.snapshot.routes(), vec!["a"]);
    assert_eq!(report.metrics.ignored_close_notices, 1);
    assert_eq!(report.metrics.nodes_removed, 2);
}

#[test]
fn embedded_close_removes_matching_top() {
    let text = r#"[
        {"event": "action", "action": "push", "target": "home", "pageType": "native"},
        {"event": "action", "action": "push", "target": "feed", "pageType": "embedded", "fromEmbedded": true},
        {"event": "embeddedClose", "target": "feed", "pageType": "embedded"}
    ]"#;
    let report = replay(&parse_trace(text).unwrap(), StackConfig::default());

    assert_eq!(report.snapshot.routes(), vec!["home"]);
    assert!(report.effects.contains(&"disappear feed".to_string()));
    assert_eq!(report.effects.last().map(String::as_str), Some("critical home"));
}

#[test]
fn unknown_actions_are_rejected_and_counted() {
    let text = r#"[
        {"event": "action", "action": "push", "target": "home", "pageType": "native"},
        {"event": "action", "action": "teleport", "target": "x", "pageType": "native"},
        {"event": "nativeClose", "target": "x", "pageType": "hologram"}
    ]"#;
    let report = replay(&parse_trace(text).unwrap(), StackConfig::default());

    assert_eq!(report.snapshot.routes(), vec!["home"]);
    assert_eq!(report.rejected.len(), 2);
    assert!(report.rejected[0].starts_with("event 1"));
    assert_eq!(report.metrics.unrecognized_actions, 1);
}

#[test]
fn fully_embedded_pop_to_root_clears_everything() {
    let text = r#"[
        {"event": "action", "action": "push", "target": "root", "pageType": "embedded", "fromEmbedded": true},
        {"event": "action", "action": "push", "target": "next", "pageType": "embedded", "fromEmbedded": true},
        {"event": "action", "action": "popToRoot", "pageType": "embedded", "fromEmbedded": true}
    ]"#;
    let config = StackConfig {
        topology: Topology::FullyEmbedded,
        ..StackConfig::default()
    };
    let report = replay(&parse_trace(text).unwrap(), config);

    assert!(report.snapshot.is_empty());
}

#[test]
fn malformed_trace_is_an_error() {
    assert!(parse_trace(r#"{"event": "action"}"#).is_err());
    assert!(parse_trace(r#"[{"event": "warp"}]"#).is_err());
}

#[test]
fn loads_trace_and_config_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let trace_path = dir.path().join("trace.json");
    std::fs::write(&trace_path, PUSH_THREE).unwrap();
    let config_path = dir.path().join("stack.toml");
    let mut file = std::fs::File::create(&config_path).unwrap();
    writeln!(file, "trace_snapshots = true").unwrap();

    let events = load_trace(&trace_path).unwrap();
    let config = load_config(Some(&config_path)).unwrap();

    assert_eq!(events.len(), 3);
    assert!(config.trace_snapshots);
    assert!(load_trace(&dir.path().join("missing.json")).is_err());
}
