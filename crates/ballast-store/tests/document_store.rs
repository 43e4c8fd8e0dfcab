use std::fs;
use std::path::PathBuf;

use ballast_core::{Dataset, Record, Status};
use ballast_store::{Capability, DocumentStore, FixedCapability, SharedCapability, StoreError};
use chrono::{NaiveDate, TimeZone, Utc};

fn temp_doc_path(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("ballast_store_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir.join("records.json")
}

fn sample_record(id: &str, salary: i64) -> Record {
    Record {
        id: id.to_string(),
        name: "Noor Haddad".to_string(),
        email: "noor.haddad@example.com".to_string(),
        role: "Support Lead".to_string(),
        department: "Customer Support".to_string(),
        status: Status::Active,
        joined_date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
        last_login: Utc
            .with_ymd_and_hms(2025, 2, 10, 14, 0, 0)
            .single()
            .expect("valid timestamp"),
        location: "Amman".to_string(),
        salary,
        performance: 9,
        bio: "Answers before the second ring.".to_string(),
    }
}

fn sample_dataset(count: usize) -> Dataset {
    let records = (0..count)
        .map(|index| sample_record(&format!("r-{index}"), 50_000 + index as i64))
        .collect();
    Dataset::from_records(records)
}

#[test]
fn write_then_read_round_trips_the_document() {
    let path = temp_doc_path("round_trip");
    let store = DocumentStore::new(&path, FixedCapability(Capability::ReadWrite));

    let dataset = sample_dataset(3);
    let bytes = store.write_all(&dataset).expect("write document");
    assert!(bytes > 0);

    let raw = fs::read_to_string(&path).expect("read raw document");
    assert_eq!(raw.len() as u64, bytes, "reported bytes match the file");
    assert!(raw.starts_with('['), "document is a bare JSON array");

    let read_back = store.read_all().expect("read document");
    assert_eq!(read_back, dataset);
}

#[test]
fn missing_document_reads_as_not_found() {
    let path = temp_doc_path("missing");
    let store = DocumentStore::new(&path, FixedCapability(Capability::ReadWrite));

    let err = store.read_all().expect_err("missing document must fail");
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn unavailable_storage_refuses_reads_even_when_the_file_exists() {
    let path = temp_doc_path("unavailable_read");
    {
        let writer = DocumentStore::new(&path, FixedCapability(Capability::ReadWrite));
        writer.write_all(&sample_dataset(1)).expect("seed document");
    }

    let store = DocumentStore::new(&path, FixedCapability(Capability::Unavailable));
    let err = store.read_all().expect_err("unavailable storage must fail");
    assert!(matches!(err, StoreError::Unavailable));
}

#[test]
fn writes_are_denied_without_write_capability() {
    let path = temp_doc_path("denied");
    let dataset = sample_dataset(1);

    let read_only = DocumentStore::new(&path, FixedCapability(Capability::ReadOnly));
    let err = read_only.write_all(&dataset).expect_err("read-only write must fail");
    assert!(matches!(
        err,
        StoreError::PermissionDenied(Capability::ReadOnly)
    ));

    let unavailable = DocumentStore::new(&path, FixedCapability(Capability::Unavailable));
    let err = unavailable
        .write_all(&dataset)
        .expect_err("unavailable write must fail");
    assert!(matches!(
        err,
        StoreError::PermissionDenied(Capability::Unavailable)
    ));

    assert!(!path.exists(), "denied writes must not touch disk");
}

#[test]
fn corrupt_document_is_reported_distinctly() {
    let path = temp_doc_path("corrupt");
    fs::write(&path, "{\"not\": \"an array\"").expect("write corrupt document");

    let store = DocumentStore::new(&path, FixedCapability(Capability::ReadOnly));
    let err = store.read_all().expect_err("corrupt document must fail");
    assert!(matches!(err, StoreError::Corrupt(_)));
}

#[test]
fn capability_is_re_evaluated_on_every_call() {
    let path = temp_doc_path("flip");
    let shared = SharedCapability::new(Capability::ReadWrite);
    let store = DocumentStore::new(&path, shared.clone());

    store.write_all(&sample_dataset(2)).expect("first write succeeds");

    shared.set(Capability::ReadOnly);
    let err = store
        .write_all(&sample_dataset(2))
        .expect_err("second write must be denied");
    assert!(matches!(err, StoreError::PermissionDenied(_)));

    store.read_all().expect("reads still allowed");

    shared.set(Capability::Unavailable);
    let err = store.read_all().expect_err("reads now refused");
    assert!(matches!(err, StoreError::Unavailable));
}

#[test]
fn rewrite_replaces_the_whole_document_and_leaves_no_temp_file() {
    let path = temp_doc_path("rewrite");
    let store = DocumentStore::new(&path, FixedCapability(Capability::ReadWrite));

    store.write_all(&sample_dataset(3)).expect("first write");
    store.write_all(&sample_dataset(1)).expect("second write");

    let read_back = store.read_all().expect("read document");
    assert_eq!(read_back.len(), 1, "later write wins wholesale");

    let tmp = path.with_file_name("records.json.tmp");
    assert!(!tmp.exists(), "temp file is renamed away");
}

#[test]
fn empty_dataset_round_trips_as_an_empty_array() {
    let path = temp_doc_path("empty");
    let store = DocumentStore::new(&path, FixedCapability(Capability::ReadWrite));

    let bytes = store.write_all(&Dataset::new()).expect("write empty document");
    assert_eq!(bytes, 2);
    assert_eq!(fs::read_to_string(&path).expect("read raw"), "[]");

    let read_back = store.read_all().expect("read empty document");
    assert!(read_back.is_empty());
}
