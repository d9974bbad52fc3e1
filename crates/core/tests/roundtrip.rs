use assert_json_diff::assert_json_eq;
use rstest::rstest;
use serde_json::Value;
use stac_factory::{FromJson, Item, ToJson};
use std::fs;
use std::path::PathBuf;

fn fixture(filename: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(filename);
    fs::read_to_string(path).unwrap()
}

#[rstest]
#[case::minimal("minimal.json")]
#[case::typical("typical.json")]
fn serialize_after_parse_is_the_identity(#[case] filename: &str) {
    let contents = fixture(filename);
    let expected: Value = serde_json::from_str(&contents).unwrap();
    let item = Item::from_json_str(&contents).unwrap();
    assert_json_eq!(item.to_value(), expected);
}

#[rstest]
#[case::minimal("minimal.json")]
#[case::typical("typical.json")]
fn projection_is_idempotent(#[case] filename: &str) {
    let item = Item::from_json_str(&fixture(filename)).unwrap();
    let once = item.to_value();
    let twice = Item::from_value(once.clone()).unwrap().to_value();
    assert_json_eq!(once, twice);
}

#[test]
fn invalid_fixture_reports_every_problem() {
    let error = Item::from_json_str(&fixture("invalid.json")).unwrap_err();
    let violations = error.violations().unwrap();
    let paths: Vec<_> = violations
        .iter()
        .map(|violation| violation.path.as_str())
        .collect();
    assert!(paths.contains(&"id"));
    assert!(paths.contains(&"bbox"));
    assert!(paths.contains(&"stac_extensions"));
    assert!(paths.contains(&"geometry.coordinates[0]"));
}

#[test]
fn json_bytes_round_trip() {
    let contents = fixture("minimal.json");
    let item = Item::from_json_str(&contents).unwrap();
    let bytes = item.to_json_vec(true).unwrap();
    let reparsed = Item::from_json_slice(&bytes).unwrap();
    assert_json_eq!(item.to_value(), reparsed.to_value());
}

#[test]
fn typical_fields_are_modeled() {
    let item = Item::from_json_str(&fixture("typical.json")).unwrap();
    assert_eq!(item.collection(), Some("sentinel-2-c1-l2a"));
    assert_eq!(item.assets().len(), 2);
    assert_eq!(item.links().len(), 2);
    let common = item.common_metadata();
    assert_eq!(common.platform.as_ref().unwrap().as_str(), "sentinel-2b");
    assert_eq!(common.gsd.unwrap().get(), 10.0);
    assert_eq!(common.providers.as_ref().unwrap().len(), 1);
    assert_eq!(common.bands.as_ref().unwrap().len(), 2);
    assert_eq!(item.additional_fields()["eo:cloud_cover"], 12.75);
    assert_eq!(item.stac_extensions().len(), 2);
}
