//! Consistency checks between the catalog and the bundled template packages

use create_starter_lib::{Catalog, TemplateStore};
use serde_json::Value;
use std::fs;
use std::path::Path;

fn store() -> TemplateStore {
    TemplateStore::with_roots(vec![Path::new(env!("CARGO_MANIFEST_DIR")).join("../templates")])
}

#[test]
fn test_every_catalog_identifier_is_shipped() {
    let missing = store().missing(&Catalog::default());
    assert!(missing.is_empty(), "missing template packages: {missing:?}");
}

#[test]
fn test_every_package_has_object_manifest() {
    let store = store();
    for identifier in Catalog::default().flat_identifiers() {
        let dir = store.locate(identifier).unwrap();
        let raw = fs::read_to_string(dir.join("package.json")).unwrap();
        let manifest: Value = serde_json::from_str(&raw).unwrap();
        assert!(manifest.is_object(), "{identifier}: manifest is not an object");
        assert!(manifest.get("name").is_some(), "{identifier}: manifest has no name");
    }
}

#[test]
fn test_packages_ship_gitignore_under_reserved_name() {
    let store = store();
    for identifier in Catalog::default().flat_identifiers() {
        let dir = store.locate(identifier).unwrap();
        assert!(dir.join("_gitignore").is_file(), "{identifier}: no _gitignore");
        assert!(!dir.join(".gitignore").exists(), "{identifier}: literal .gitignore");
    }
}
