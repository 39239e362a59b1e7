// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod sample;
mod validation;

use anyhow::{Context, Result, anyhow, bail};
use medicare_app::{
    Activity, Appointment, ClinicData, ClinicSnapshot, Patient, StaffGroup, StaffMember,
};
use std::fs;
use std::path::{Path, PathBuf};

pub use sample::{SampleClinic, sample_snapshot};
pub use validation::{group_key, validate_snapshot};

pub const APP_NAME: &str = "medicare";

/// Largest dataset file accepted. The whole file is parsed in memory.
pub const MAX_DATASET_SIZE: u64 = 16 << 20;

/// A JSON dataset read once and validated before the UI sees it.
#[derive(Debug, Clone)]
pub struct DatasetFile {
    path: PathBuf,
    snapshot: ClinicSnapshot,
}

impl DatasetFile {
    pub fn open(path: &Path) -> Result<Self> {
        validate_dataset_path(&path.to_string_lossy())?;
        let metadata = fs::metadata(path)
            .with_context(|| format!("stat dataset {}", path.display()))?;
        if !metadata.is_file() {
            bail!("dataset {} is not a regular file", path.display());
        }
        if metadata.len() > MAX_DATASET_SIZE {
            bail!(
                "dataset {} is {} bytes; the limit is {MAX_DATASET_SIZE} bytes",
                path.display(),
                metadata.len()
            );
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read dataset {}", path.display()))?;
        let snapshot = parse_dataset(&raw)
            .with_context(|| format!("load dataset {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            patients = snapshot.patients.len(),
            appointments = snapshot.appointments.len(),
            staff = snapshot.staff_count(),
            "dataset loaded"
        );
        Ok(Self {
            path: path.to_path_buf(),
            snapshot,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ClinicData for DatasetFile {
    fn list_patients(&self) -> Result<Vec<Patient>> {
        Ok(self.snapshot.patients.clone())
    }

    fn list_appointments(&self) -> Result<Vec<Appointment>> {
        Ok(self.snapshot.appointments.clone())
    }

    fn list_staff(&self, group: StaffGroup) -> Result<Vec<StaffMember>> {
        Ok(self.snapshot.staff(group).to_vec())
    }

    fn list_activity(&self) -> Result<Vec<Activity>> {
        Ok(self.snapshot.activity.clone())
    }

    fn describe(&self) -> String {
        format!("dataset {}", self.path.display())
    }
}

/// Parses and validates a dataset document.
pub fn parse_dataset(raw: &str) -> Result<ClinicSnapshot> {
    let value: serde_json::Value = serde_json::from_str(raw).context("parse dataset JSON")?;
    if !value.is_object() {
        return Err(anyhow!(
            "top level must be an object of record arrays, found {}",
            json_kind(&value)
        ))
        .context("parse dataset JSON");
    }
    let snapshot: ClinicSnapshot = serde_json::from_value(value).context("parse dataset JSON")?;
    validate_snapshot(&snapshot)?;
    Ok(snapshot)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Pretty JSON in the dataset layout; `parse_dataset` reads it back.
pub fn render_dataset(snapshot: &ClinicSnapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot).context("serialize dataset")
}

pub fn validate_dataset_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("dataset path must not be empty");
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "dataset path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("dataset path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    Ok(())
}
