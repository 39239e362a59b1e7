// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use medicare_app::{ClinicSnapshot, StaffGroup, StaffMember, StaffRole};
use std::collections::BTreeSet;

/// Checks the invariants a dataset file can break: ids unique within each
/// array, staff filed under the group their role implies, and non-empty
/// names and durations.
pub fn validate_snapshot(snapshot: &ClinicSnapshot) -> Result<()> {
    ensure_unique_ids("patients", snapshot.patients.iter().map(|p| p.id.get()))?;
    ensure_unique_ids(
        "appointments",
        snapshot.appointments.iter().map(|a| a.id.get()),
    )?;
    for group in StaffGroup::ALL {
        let members = snapshot.staff(group);
        ensure_unique_ids(group_key(group), members.iter().map(|m| m.id.get()))?;
        for member in members {
            ensure_role_matches_group(group, member)?;
        }
    }
    ensure_unique_ids("activity", snapshot.activity.iter().map(|a| a.id.get()))?;

    for patient in &snapshot.patients {
        if patient.name.trim().is_empty() {
            bail!("patient {} has an empty name", patient.id);
        }
    }
    for appointment in &snapshot.appointments {
        if appointment.duration_minutes == 0 {
            bail!(
                "appointment {} has a zero duration -- set duration_minutes to a positive value",
                appointment.id
            );
        }
    }
    Ok(())
}

/// Key of the group's array in the dataset file.
pub const fn group_key(group: StaffGroup) -> &'static str {
    match group {
        StaffGroup::Doctors => "doctors",
        StaffGroup::Nurses => "nurses",
        StaffGroup::Admin => "admin_staff",
    }
}

fn ensure_unique_ids(array: &str, ids: impl Iterator<Item = i64>) -> Result<()> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            bail!("duplicate id {id} in `{array}` -- ids must be unique within each array");
        }
    }
    Ok(())
}

fn ensure_role_matches_group(group: StaffGroup, member: &StaffMember) -> Result<()> {
    let is_doctor = matches!(member.role, StaffRole::Doctor(_));
    match (group, is_doctor) {
        (StaffGroup::Doctors, false) => bail!(
            "`doctors` entry {} ({}) has no doctor profile",
            member.id,
            member.name
        ),
        (StaffGroup::Nurses | StaffGroup::Admin, true) => bail!(
            "`{}` entry {} ({}) carries a doctor profile; move it to `doctors`",
            group_key(group),
            member.id,
            member.name
        ),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{group_key, validate_snapshot};
    use crate::sample_snapshot;
    use anyhow::Result;
    use medicare_app::{StaffGroup, StaffRole};

    #[test]
    fn duplicate_patient_id_is_rejected() -> Result<()> {
        let mut snapshot = sample_snapshot()?;
        let copy = snapshot.patients[0].clone();
        snapshot.patients.push(copy);
        let error = validate_snapshot(&snapshot).expect_err("duplicate should fail");
        assert_eq!(
            error.to_string(),
            "duplicate id 1 in `patients` -- ids must be unique within each array"
        );
        Ok(())
    }

    #[test]
    fn same_id_in_different_groups_is_fine() -> Result<()> {
        let snapshot = sample_snapshot()?;
        assert_eq!(snapshot.nurses[0].id, snapshot.admin_staff[0].id);
        validate_snapshot(&snapshot)
    }

    #[test]
    fn nurse_with_doctor_profile_is_rejected() -> Result<()> {
        let mut snapshot = sample_snapshot()?;
        snapshot.nurses[0].role = snapshot.doctors[0].role.clone();
        let message = validate_snapshot(&snapshot)
            .expect_err("misfiled doctor should fail")
            .to_string();
        assert!(message.contains("`nurses` entry 1"));
        Ok(())
    }

    #[test]
    fn doctor_without_profile_is_rejected() -> Result<()> {
        let mut snapshot = sample_snapshot()?;
        snapshot.doctors[2].role = StaffRole::Staff {
            title: "Resident".to_owned(),
        };
        assert!(validate_snapshot(&snapshot).is_err());
        Ok(())
    }

    #[test]
    fn zero_duration_is_rejected() -> Result<()> {
        let mut snapshot = sample_snapshot()?;
        snapshot.appointments[4].duration_minutes = 0;
        let message = validate_snapshot(&snapshot)
            .expect_err("zero duration should fail")
            .to_string();
        assert!(message.contains("appointment 5"));
        Ok(())
    }

    #[test]
    fn group_keys_match_dataset_fields() {
        assert_eq!(group_key(StaffGroup::Admin), "admin_staff");
    }
}
