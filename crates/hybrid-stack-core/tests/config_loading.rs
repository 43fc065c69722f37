#![allow(
    missing_docs,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Configuration loading from files and the environment

use hybrid_stack_core::config::ENV_PREFIX;
use hybrid_stack_core::{AppTopology, StackConfig, StackError, Topology};
use serial_test::serial;
use std::io::Write;

fn clear_env() {
    for key in ["TOPOLOGY", "TRACE_SNAPSHOTS"] {
        std::env::remove_var(format!("{ENV_PREFIX}{key}"));
    }
}

#[test]
fn loads_from_toml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "topology = \"fully_embedded\"").unwrap();
    writeln!(file, "trace_snapshots = true").unwrap();

    let config = StackConfig::load_from_file(file.path()).unwrap();

    assert_eq!(config.topology, Topology::FullyEmbedded);
    assert!(config.trace_snapshots);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = StackConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, StackError::Io { .. }));
}

#[test]
fn malformed_file_is_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "topology = 3").unwrap();

    let err = StackConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, StackError::Config { .. }));
}

#[test]
#[serial]
fn env_overrides_file_values() {
    clear_env();
    std::env::set_var(format!("{ENV_PREFIX}TOPOLOGY"), "fully-embedded");
    std::env::set_var(format!("{ENV_PREFIX}TRACE_SNAPSHOTS"), "yes");

    let mut config = StackConfig::default();
    config.merge_with_env().unwrap();
    clear_env();

    assert_eq!(config.topology, Topology::FullyEmbedded);
    assert!(config.trace_snapshots);
    assert!(config.topology_handler().is_fully_embedded_app());
}

#[test]
#[serial]
fn unknown_env_key_is_rejected() {
    clear_env();
    std::env::set_var(format!("{ENV_PREFIX}DEPTH"), "3");

    let result = StackConfig::default().merge_with_env();
    std::env::remove_var(format!("{ENV_PREFIX}DEPTH"));

    assert!(matches!(result, Err(StackError::Config { .. })));
}
