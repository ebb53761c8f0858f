mod common;

use common::setup;
use std::path::{Path, PathBuf};

use chartsmith::config::{read_descriptor, DEFAULT_DESCRIPTOR};
use chartsmith::generate::{render, to_disk};
use chartsmith::{compose, DescriptorSource, ErrorKind, OutputFormat};

#[test]
fn file_source_loads() {
    setup();
    let src = DescriptorSource::File(PathBuf::from("apps/internal.json"));
    let desc = src.load().unwrap();
    assert_eq!(desc.name, "ledger");
    assert_eq!(desc.ports.container_port, 9000);
}

#[test]
fn default_path() {
    if std::env::var("CHARTSMITH_DESCRIPTOR").is_ok() {
        return; // overridden by the caller
    }
    assert_eq!(
        DescriptorSource::resolve(None),
        DescriptorSource::File(Path::new(".").join(DEFAULT_DESCRIPTOR))
    );
}

#[test]
fn missing_required_field() {
    setup();
    let err = read_descriptor(Path::new("apps/nameless.json")).unwrap_err();
    match err.kind() {
        ErrorKind::MalformedDescriptor(p) => assert!(p.ends_with("nameless.json")),
        _ => panic!("unexpected error kind {}", err),
    }
    let cause = err.iter().nth(1).unwrap().to_string();
    assert!(cause.contains("missing field `name`"), "cause was '{}'", cause);
}

#[test]
fn malformed_json() {
    setup();
    let err = read_descriptor(Path::new("apps/malformed.json")).unwrap_err();
    match err.kind() {
        ErrorKind::MalformedDescriptor(_) => {}
        _ => panic!("unexpected error kind {}", err),
    }
    let cause = err.iter().nth(1).unwrap().to_string();
    assert!(cause.contains("line"), "cause was '{}'", cause);
}

#[test]
fn missing_file() {
    setup();
    let err = read_descriptor(Path::new("apps/nope.json")).unwrap_err();
    match err.kind() {
        ErrorKind::MissingDescriptor(_) => {}
        _ => panic!("unexpected error kind {}", err),
    }
}

#[test]
fn manifests_to_disk() {
    setup();
    let desc = read_descriptor(Path::new("apps/checkout.json")).unwrap();
    let bundle = compose(&desc).unwrap();
    let out = std::env::temp_dir().join("chartsmith-checkout.yaml");
    to_disk(&bundle, OutputFormat::Yaml, &out).unwrap();
    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written, render(&bundle, OutputFormat::Yaml).unwrap());
    assert!(written.contains("name: checkout-deployment"));
    let _ = std::fs::remove_file(&out);
}
