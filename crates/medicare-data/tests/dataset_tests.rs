// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use medicare_app::filter::filter_records;
use medicare_app::{AppointmentId, ClinicData, ClinicSnapshot, StaffGroup};
use medicare_data::{
    DatasetFile, SampleClinic, parse_dataset, render_dataset, sample_snapshot,
    validate_dataset_path,
};
use medicare_testkit::{ClinicFaker, temp_dataset_path, write_dataset};
use std::fs;

#[test]
fn validate_dataset_path_rejects_uri_forms() {
    assert!(validate_dataset_path("").is_err());
    assert!(validate_dataset_path("file:clinic.json").is_err());
    assert!(validate_dataset_path("https://example.com/clinic.json").is_err());
    assert!(validate_dataset_path("/tmp/clinic.json").is_ok());
    assert!(validate_dataset_path("C:\\data\\clinic.json").is_ok());
}

#[test]
fn sample_doctor_search_returns_two_appointments() -> Result<()> {
    let appointments = SampleClinic.list_appointments()?;
    let ids = filter_records(&appointments, "Dr. Sarah Johnson")
        .iter()
        .map(|appointment| appointment.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![AppointmentId::new(1), AppointmentId::new(3)]);
    Ok(())
}

#[test]
fn dataset_file_round_trips_generated_clinic() -> Result<()> {
    let snapshot = ClinicFaker::new(21).snapshot(12, 30);
    let (_dir, path) = write_dataset(&snapshot)?;

    let dataset = DatasetFile::open(&path)?;
    assert_eq!(dataset.path(), path.as_path());
    assert_eq!(dataset.list_patients()?, snapshot.patients);
    assert_eq!(dataset.list_appointments()?, snapshot.appointments);
    assert_eq!(dataset.list_staff(StaffGroup::Nurses)?, snapshot.nurses);
    assert!(dataset.describe().starts_with("dataset "));

    let loaded = ClinicSnapshot::load(&dataset)?;
    assert_eq!(loaded.staff_count(), snapshot.staff_count());
    Ok(())
}

#[test]
fn rendered_sample_parses_back() -> Result<()> {
    let sample = sample_snapshot()?;
    let raw = render_dataset(&sample)?;
    assert!(raw.contains("\"admin_staff\""));
    assert!(raw.contains("\"time\": \"16:15\""));
    assert!(raw.contains("\"date\": \"2024-01-25\""));

    let parsed = parse_dataset(&raw)?;
    assert_eq!(parsed.patients, sample.patients);
    assert_eq!(parsed.appointments, sample.appointments);
    assert_eq!(parsed.activity, sample.activity);
    Ok(())
}

#[test]
fn missing_arrays_default_to_empty() -> Result<()> {
    let snapshot = parse_dataset(r#"{ "patients": [] }"#)?;
    assert!(snapshot.appointments.is_empty());
    assert_eq!(snapshot.staff_count(), 0);
    Ok(())
}

#[test]
fn top_level_array_is_rejected() {
    for raw in ["[]", "[[], []]"] {
        let message = format!(
            "{:#}",
            parse_dataset(raw).expect_err("array is not a dataset")
        );
        assert!(message.contains("parse dataset JSON"), "got {message}");
        assert!(message.contains("found an array"), "got {message}");
    }
    assert!(parse_dataset("null").is_err());
}

#[test]
fn misspelled_array_key_is_rejected() {
    let raw = r#"{
        "patient": [{
            "id": 1,
            "name": "John Smith",
            "age": 45,
            "condition": "Hypertension",
            "status": "Active"
        }],
        "appointments": []
    }"#;
    let message = format!(
        "{:#}",
        parse_dataset(raw).expect_err("unknown key should fail")
    );
    assert!(message.contains("parse dataset JSON"), "got {message}");
    assert!(message.contains("unknown field `patient`"), "got {message}");
}

#[test]
fn duplicate_ids_are_rejected_at_load() -> Result<()> {
    let mut snapshot = ClinicFaker::new(4).snapshot(3, 3);
    snapshot.appointments[2].id = AppointmentId::new(1);
    let (_dir, path) = write_dataset(&snapshot)?;

    let error = DatasetFile::open(&path).expect_err("duplicate ids should fail");
    let message = format!("{error:#}");
    assert!(message.contains("load dataset"));
    assert!(message.contains("duplicate id 1 in `appointments`"));
    Ok(())
}

#[test]
fn malformed_json_names_the_file() -> Result<()> {
    let (_dir, path) = temp_dataset_path()?;
    fs::write(&path, "{ not json")?;

    let message = format!(
        "{:#}",
        DatasetFile::open(&path).expect_err("bad JSON should fail")
    );
    assert!(message.contains(&path.display().to_string()));
    assert!(message.contains("parse dataset JSON"));
    Ok(())
}

#[test]
fn bad_clock_time_is_rejected() {
    let raw = r#"{
        "appointments": [{
            "id": 1,
            "patient": "John Smith",
            "doctor": "Dr. Sarah Johnson",
            "date": "2024-01-25",
            "time": "9am",
            "duration_minutes": 30,
            "type": "Consultation",
            "status": "scheduled"
        }]
    }"#;
    assert!(parse_dataset(raw).is_err());
}

#[test]
fn missing_file_is_an_error() -> Result<()> {
    let (_dir, path) = temp_dataset_path()?;
    let message = format!(
        "{:#}",
        DatasetFile::open(&path).expect_err("missing file should fail")
    );
    assert!(message.contains("stat dataset"));
    Ok(())
}

#[test]
fn directory_is_not_a_dataset() -> Result<()> {
    let (dir, _path) = temp_dataset_path()?;
    let message = DatasetFile::open(dir.path())
        .expect_err("directory should fail")
        .to_string();
    assert!(message.contains("is not a regular file"));
    Ok(())
}
