// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{Activity, Appointment, Patient, StaffGroup, StaffMember};

/// Where the record arrays come from. The pages only ever see the shapes
/// returned here, so a real store can replace the built-in samples.
pub trait ClinicData {
    fn list_patients(&self) -> Result<Vec<Patient>>;
    fn list_appointments(&self) -> Result<Vec<Appointment>>;
    fn list_staff(&self, group: StaffGroup) -> Result<Vec<StaffMember>>;
    fn list_activity(&self) -> Result<Vec<Activity>>;

    /// Short human-readable name of the source, shown on the settings page.
    fn describe(&self) -> String;
}

/// All records loaded once at startup. Also the on-disk dataset layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClinicSnapshot {
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub doctors: Vec<StaffMember>,
    #[serde(default)]
    pub nurses: Vec<StaffMember>,
    #[serde(default)]
    pub admin_staff: Vec<StaffMember>,
    #[serde(default)]
    pub activity: Vec<Activity>,
}

impl ClinicSnapshot {
    pub fn load<D: ClinicData + ?Sized>(source: &D) -> Result<Self> {
        Ok(Self {
            patients: source.list_patients().context("list patients")?,
            appointments: source.list_appointments().context("list appointments")?,
            doctors: source
                .list_staff(StaffGroup::Doctors)
                .context("list doctors")?,
            nurses: source.list_staff(StaffGroup::Nurses).context("list nurses")?,
            admin_staff: source
                .list_staff(StaffGroup::Admin)
                .context("list admin staff")?,
            activity: source.list_activity().context("list activity")?,
        })
    }

    pub fn staff(&self, group: StaffGroup) -> &[StaffMember] {
        match group {
            StaffGroup::Doctors => &self.doctors,
            StaffGroup::Nurses => &self.nurses,
            StaffGroup::Admin => &self.admin_staff,
        }
    }

    pub fn staff_count(&self) -> usize {
        StaffGroup::ALL
            .iter()
            .map(|group| self.staff(*group).len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::{ClinicData, ClinicSnapshot};
    use crate::test_fixtures::{sample_appointments, sample_doctors, sample_patients, support};
    use crate::{Activity, Appointment, Patient, StaffGroup, StaffMember};
    use anyhow::{Result, bail};

    struct FixedSource {
        fail_appointments: bool,
    }

    impl ClinicData for FixedSource {
        fn list_patients(&self) -> Result<Vec<Patient>> {
            Ok(sample_patients())
        }

        fn list_appointments(&self) -> Result<Vec<Appointment>> {
            if self.fail_appointments {
                bail!("appointments offline");
            }
            Ok(sample_appointments())
        }

        fn list_staff(&self, group: StaffGroup) -> Result<Vec<StaffMember>> {
            Ok(match group {
                StaffGroup::Doctors => sample_doctors(),
                StaffGroup::Nurses => vec![support(1, "Maria Rodriguez", "Head Nurse")],
                StaffGroup::Admin => Vec::new(),
            })
        }

        fn list_activity(&self) -> Result<Vec<Activity>> {
            Ok(Vec::new())
        }

        fn describe(&self) -> String {
            "fixed".to_owned()
        }
    }

    #[test]
    fn load_collects_every_array() -> Result<()> {
        let snapshot = ClinicSnapshot::load(&FixedSource {
            fail_appointments: false,
        })?;
        assert_eq!(snapshot.patients.len(), 5);
        assert_eq!(snapshot.appointments.len(), 5);
        assert_eq!(snapshot.staff(StaffGroup::Doctors).len(), 4);
        assert_eq!(snapshot.staff(StaffGroup::Nurses).len(), 1);
        assert_eq!(snapshot.staff_count(), 5);
        Ok(())
    }

    #[test]
    fn load_failure_names_the_array() {
        let error = ClinicSnapshot::load(&FixedSource {
            fail_appointments: true,
        })
        .expect_err("appointments failure should propagate");
        let message = format!("{error:#}");
        assert!(message.contains("list appointments"));
        assert!(message.contains("appointments offline"));
    }

    #[test]
    fn trait_objects_load_too() -> Result<()> {
        let source: Box<dyn ClinicData> = Box::new(FixedSource {
            fail_appointments: false,
        });
        let snapshot = ClinicSnapshot::load(source.as_ref())?;
        assert_eq!(snapshot.patients.len(), 5);
        Ok(())
    }
}
