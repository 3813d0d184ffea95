//! Registry behaviour tests against an in-memory database.

use super::db::{open_memory, unix_timestamp};
use super::types::InstallRecord;
use semver::Version;
use std::path::PathBuf;

fn record(name: &str, version: &str) -> InstallRecord {
    InstallRecord {
        name: name.to_string(),
        version: Version::parse(version).unwrap(),
        url: format!("https://example.com/{name}_{version}.tar.gz"),
        sha256: "e".repeat(64),
        binary_path: PathBuf::from(format!("/home/user/.local/bin/{name}")),
        installed_at: unix_timestamp(),
    }
}

#[tokio::test]
async fn record_then_get() {
    let db = open_memory().await.unwrap();
    db.record(&record("janus", "0.1.2")).await.unwrap();

    let got = db.get("janus").await.unwrap().expect("row exists");
    assert_eq!(got.name, "janus");
    assert_eq!(got.version, Version::new(0, 1, 2));
    assert!(got.binary_path.ends_with("janus"));
}

#[tokio::test]
async fn get_missing_is_none() {
    let db = open_memory().await.unwrap();
    assert!(db.get("nothing").await.unwrap().is_none());
}

#[tokio::test]
async fn upgrade_replaces_row() {
    let db = open_memory().await.unwrap();
    db.record(&record("janus", "0.1.2")).await.unwrap();
    db.record(&record("janus", "0.1.8")).await.unwrap();

    let all = db.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].version, Version::new(0, 1, 8));
}

#[tokio::test]
async fn list_is_name_sorted() {
    let db = open_memory().await.unwrap();
    db.record(&record("zoxide", "1.0.0")).await.unwrap();
    db.record(&record("janus", "0.1.2")).await.unwrap();

    let all = db.list().await.unwrap();
    let names: Vec<&str> = all.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["janus", "zoxide"]);
}

#[tokio::test]
async fn remove_deletes_row() {
    let db = open_memory().await.unwrap();
    db.record(&record("janus", "0.1.2")).await.unwrap();

    assert!(db.remove("janus").await.unwrap());
    assert!(!db.remove("janus").await.unwrap());
    assert!(db.get("janus").await.unwrap().is_none());
}
