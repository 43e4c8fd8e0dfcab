use ballast_core::{Record, RecordPatch, Status};
use chrono::{NaiveDate, TimeZone, Utc};

fn sample_record() -> Record {
    Record {
        id: "0f8b4a2e-1c6d-4e5f-9a3b-7d2c1e0f4a5b".to_string(),
        name: "Imani Okafor".to_string(),
        email: "imani.okafor@example.com".to_string(),
        role: "Platform Engineer".to_string(),
        department: "Engineering".to_string(),
        status: Status::Active,
        joined_date: NaiveDate::from_ymd_opt(2024, 3, 14).expect("valid date"),
        last_login: Utc
            .with_ymd_and_hms(2025, 1, 2, 8, 30, 0)
            .single()
            .expect("valid timestamp"),
        location: "Nairobi".to_string(),
        salary: 95_000,
        performance: 8,
        bio: "Builds the paved road.".to_string(),
    }
}

#[test]
fn serializes_record_in_document_format() {
    let json = serde_json::to_string_pretty(&sample_record()).expect("serialize record");
    let expected = r#"{
  "id": "0f8b4a2e-1c6d-4e5f-9a3b-7d2c1e0f4a5b",
  "name": "Imani Okafor",
  "email": "imani.okafor@example.com",
  "role": "Platform Engineer",
  "department": "Engineering",
  "status": "Active",
  "joinedDate": "2024-03-14",
  "lastLogin": "2025-01-02T08:30:00Z",
  "location": "Nairobi",
  "salary": 95000,
  "performance": 8,
  "bio": "Builds the paved road."
}"#;
    assert_eq!(json, expected);
}

#[test]
fn deserializes_record_from_document_format() {
    let json = r#"{
        "id": "r-1",
        "name": "Sam Rivera",
        "email": "sam.rivera@example.com",
        "role": "Designer",
        "department": "Design",
        "status": "Pending",
        "joinedDate": "2023-11-02",
        "lastLogin": "2024-01-15T10:30:00.000Z",
        "location": "Porto",
        "salary": 64000,
        "performance": 6,
        "bio": "Sketches first."
    }"#;
    let record: Record = serde_json::from_str(json).expect("deserialize record");
    assert_eq!(record.id, "r-1");
    assert_eq!(record.status, Status::Pending);
    assert_eq!(
        record.joined_date,
        NaiveDate::from_ymd_opt(2023, 11, 2).expect("valid date")
    );
    assert_eq!(record.salary, 64_000);
}

#[test]
fn patch_applies_only_supplied_fields() {
    let mut record = sample_record();
    let before = record.clone();

    let patch: RecordPatch = serde_json::from_str(r#"{"salary": 99000, "status": "Inactive"}"#)
        .expect("parse patch");
    patch.apply_to(&mut record);

    assert_eq!(record.salary, 99_000);
    assert_eq!(record.status, Status::Inactive);
    assert_eq!(record.id, before.id);
    assert_eq!(record.name, before.name);
    assert_eq!(record.joined_date, before.joined_date);
    assert_eq!(record.bio, before.bio);
}

#[test]
fn patch_application_is_idempotent() {
    let mut once = sample_record();
    let mut twice = sample_record();

    let patch = RecordPatch {
        salary: Some(101_000),
        location: Some("Remote".to_string()),
        ..RecordPatch::default()
    };
    patch.apply_to(&mut once);
    patch.apply_to(&mut twice);
    patch.apply_to(&mut twice);

    assert_eq!(once, twice);
}

#[test]
fn patch_ignores_id_and_unknown_keys() {
    // Clients echo whole rows back; a stray id (or anything else unknown)
    // must not make the payload invalid, and must not be applied.
    let patch: RecordPatch =
        serde_json::from_str(r#"{"id": "someone-else", "name": "New Name", "favoriteColor": "teal"}"#)
            .expect("parse patch with extra keys");

    let mut record = sample_record();
    let original_id = record.id.clone();
    patch.apply_to(&mut record);

    assert_eq!(record.name, "New Name");
    assert_eq!(record.id, original_id);
}

#[test]
fn empty_patch_is_a_noop() {
    let patch: RecordPatch = serde_json::from_str("{}").expect("parse empty patch");
    assert!(patch.is_empty());

    let mut record = sample_record();
    let before = record.clone();
    patch.apply_to(&mut record);
    assert_eq!(record, before);
}

#[test]
fn rejects_malformed_field_types() {
    let err = serde_json::from_str::<RecordPatch>(r#"{"salary": "lots"}"#)
        .expect_err("string salary must fail");
    assert!(err.is_data());

    let err = serde_json::from_str::<RecordPatch>(r#"[1, 2, 3]"#)
        .expect_err("array body must fail");
    assert!(err.is_data());
}
