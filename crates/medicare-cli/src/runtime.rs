// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use medicare_app::{ClinicData, ClinicSnapshot, SettingRow};
use medicare_data::{DatasetFile, SampleClinic};
use std::path::{Path, PathBuf};

/// Where records come from for this session.
enum Source {
    Sample(SampleClinic),
    /// Re-read on every load so `r` picks up edits to the file.
    File(PathBuf),
}

pub struct DashboardRuntime {
    source: Source,
    settings: Vec<SettingRow>,
}

impl DashboardRuntime {
    pub fn sample() -> Self {
        Self {
            source: Source::Sample(SampleClinic),
            settings: Vec::new(),
        }
    }

    pub fn dataset(path: &Path) -> Self {
        Self {
            source: Source::File(path.to_path_buf()),
            settings: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: Vec<SettingRow>) -> Self {
        self.settings = settings;
        self
    }

    pub fn describe(&self) -> String {
        match &self.source {
            Source::Sample(sample) => sample.describe(),
            Source::File(path) => format!("dataset {}", path.display()),
        }
    }
}

impl medicare_tui::AppRuntime for DashboardRuntime {
    fn load_snapshot(&mut self) -> Result<ClinicSnapshot> {
        let snapshot = match &self.source {
            Source::Sample(sample) => ClinicSnapshot::load(sample),
            Source::File(path) => {
                let dataset = DatasetFile::open(path)?;
                ClinicSnapshot::load(&dataset)
            }
        };
        snapshot.with_context(|| format!("load records from {}", self.describe()))
    }

    fn settings(&self) -> Vec<SettingRow> {
        self.settings.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::DashboardRuntime;
    use anyhow::Result;
    use medicare_app::{SettingRow, StaffGroup};
    use medicare_testkit::{ClinicFaker, write_dataset};
    use medicare_tui::AppRuntime;
    use std::fs;

    #[test]
    fn sample_runtime_loads_the_built_in_clinic() -> Result<()> {
        let mut runtime = DashboardRuntime::sample();
        let snapshot = runtime.load_snapshot()?;
        assert_eq!(snapshot.patients.len(), 5);
        assert_eq!(snapshot.appointments.len(), 5);
        assert_eq!(snapshot.staff(StaffGroup::Doctors).len(), 4);
        assert_eq!(runtime.describe(), "built-in sample data");
        Ok(())
    }

    #[test]
    fn dataset_runtime_rereads_the_file() -> Result<()> {
        let mut faker = ClinicFaker::new(9);
        let (_dir, path) = write_dataset(&faker.snapshot(3, 2))?;
        let mut runtime = DashboardRuntime::dataset(&path);
        assert_eq!(runtime.load_snapshot()?.patients.len(), 3);

        let bigger = medicare_data::render_dataset(&faker.snapshot(7, 2))?;
        fs::write(&path, bigger)?;
        assert_eq!(runtime.load_snapshot()?.patients.len(), 7);
        Ok(())
    }

    #[test]
    fn broken_dataset_reports_source() -> Result<()> {
        let (_dir, path) = write_dataset(&ClinicFaker::new(2).snapshot(1, 1))?;
        fs::write(&path, "[]")?;
        let mut runtime = DashboardRuntime::dataset(&path);
        let message = format!(
            "{:#}",
            runtime.load_snapshot().expect_err("array is not a dataset")
        );
        assert!(message.contains("parse dataset JSON"), "got {message}");
        Ok(())
    }

    #[test]
    fn settings_are_passed_through() {
        let runtime = DashboardRuntime::sample()
            .with_settings(vec![SettingRow::new("calendar view", "week")]);
        assert_eq!(runtime.settings()[0].value, "week");
    }
}
