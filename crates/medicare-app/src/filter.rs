// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Free-text filtering for the list pages.
//!
//! Every keystroke rescans the full record slice; there is no index. Matching
//! is a case-insensitive substring test over a fixed per-entity field list.

use crate::{Appointment, AppointmentId, Patient, PatientId, StaffId, StaffMember};

pub trait Record {
    type Id: Copy + Eq + std::fmt::Debug;

    fn id(&self) -> Self::Id;

    /// Fields the search box looks at, in display order.
    fn search_fields(&self) -> Vec<&str>;
}

impl Record for Patient {
    type Id = PatientId;

    fn id(&self) -> PatientId {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.phone.as_str()]
    }
}

impl Record for Appointment {
    type Id = AppointmentId;

    fn id(&self) -> AppointmentId {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.patient.as_str(), self.doctor.as_str(), self.kind.as_str()]
    }
}

impl Record for StaffMember {
    type Id = StaffId;

    fn id(&self) -> StaffId {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(specialty) = self.specialty() {
            fields.push(specialty);
        }
        fields
    }
}

pub fn matches_query(query: &str, fields: &[&str]) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub fn record_matches<R: Record>(record: &R, query: &str) -> bool {
    matches_query(query, &record.search_fields())
}

/// Records matching `query`, in their original order.
pub fn filter_records<'a, R: Record>(records: &'a [R], query: &str) -> Vec<&'a R> {
    records
        .iter()
        .filter(|record| record_matches(*record, query))
        .collect()
}

/// Text search plus the exact-match specialty chip from the staff page.
/// `None` means every specialty; staff without one never match a chip.
pub fn filter_staff<'a>(
    records: &'a [StaffMember],
    query: &str,
    specialty: Option<&str>,
) -> Vec<&'a StaffMember> {
    records
        .iter()
        .filter(|member| record_matches(*member, query))
        .filter(|member| match specialty {
            None => true,
            Some(wanted) => member.specialty() == Some(wanted),
        })
        .collect()
}

/// Distinct doctor specialties in first-seen order.
pub fn specialties(records: &[StaffMember]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for specialty in records.iter().filter_map(StaffMember::specialty) {
        if !seen.iter().any(|existing| existing == specialty) {
            seen.push(specialty.to_owned());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::{filter_records, filter_staff, matches_query, specialties};
    use crate::test_fixtures::{sample_appointments, sample_doctors, sample_patients, support};
    use crate::{AppointmentId, PatientId, StaffId};

    #[test]
    fn empty_query_matches_everything() {
        let patients = sample_patients();
        assert_eq!(filter_records(&patients, "").len(), patients.len());
        assert!(matches_query("", &[]));
    }

    #[test]
    fn result_is_an_ordered_subset() {
        let patients = sample_patients();
        for query in ["a", "son", "555", "@email", "zzz"] {
            let filtered = filter_records(&patients, query);
            let mut cursor = patients.iter();
            for row in filtered {
                assert!(
                    cursor.any(|candidate| candidate.id == row.id),
                    "{query:?} produced a row out of order or not in the input"
                );
            }
        }
    }

    #[test]
    fn matching_ignores_case() {
        let patients = sample_patients();
        let lower = filter_records(&patients, "john");
        let upper = filter_records(&patients, "JOHN");
        assert_eq!(lower, upper);
        assert_eq!(
            lower.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![PatientId::new(1)]
        );
    }

    #[test]
    fn patient_search_covers_email_and_phone() {
        let patients = sample_patients();
        let by_email = filter_records(&patients, "LISA.ANDERSON@");
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].id, PatientId::new(4));

        let by_phone = filter_records(&patients, "345-6789");
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].id, PatientId::new(3));
    }

    #[test]
    fn patient_search_skips_unlisted_fields() {
        let patients = sample_patients();
        assert!(filter_records(&patients, "Diabetes").is_empty());
    }

    #[test]
    fn appointment_search_by_doctor() {
        let appointments = sample_appointments();
        let ids = filter_records(&appointments, "Dr. Sarah Johnson")
            .iter()
            .map(|row| row.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![AppointmentId::new(1), AppointmentId::new(3)]);
    }

    #[test]
    fn appointment_search_by_type() {
        let appointments = sample_appointments();
        let ids = filter_records(&appointments, "consult")
            .iter()
            .map(|row| row.id)
            .collect::<Vec<_>>();
        assert_eq!(
            ids,
            vec![
                AppointmentId::new(1),
                AppointmentId::new(4),
                AppointmentId::new(5)
            ]
        );
    }

    #[test]
    fn staff_search_uses_name_and_specialty() {
        let doctors = sample_doctors();
        let by_specialty = filter_staff(&doctors, "pedia", None);
        assert_eq!(by_specialty.len(), 1);
        assert_eq!(by_specialty[0].id, StaffId::new(3));

        let by_name = filter_staff(&doctors, "brown", None);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, StaffId::new(2));

        let nurses = vec![support(1, "Maria Rodriguez", "Head Nurse")];
        assert!(filter_staff(&nurses, "head", None).is_empty());
        assert_eq!(filter_staff(&nurses, "maria", None).len(), 1);
    }

    #[test]
    fn specialty_chip_combines_with_query() {
        let doctors = sample_doctors();
        assert_eq!(filter_staff(&doctors, "", Some("Cardiology")).len(), 1);
        assert!(filter_staff(&doctors, "brown", Some("Cardiology")).is_empty());
        let nurses = vec![support(1, "Maria Rodriguez", "Head Nurse")];
        assert!(filter_staff(&nurses, "", Some("Cardiology")).is_empty());
    }

    #[test]
    fn specialties_are_distinct_in_first_seen_order() {
        let mut doctors = sample_doctors();
        doctors.push(doctors[0].clone());
        assert_eq!(
            specialties(&doctors),
            vec!["Cardiology", "Orthopedics", "Pediatrics", "Dermatology"]
        );
    }

    #[test]
    fn empty_dataset_filters_to_empty() {
        let patients: Vec<crate::Patient> = Vec::new();
        assert!(filter_records(&patients, "").is_empty());
        assert!(filter_records(&patients, "john").is_empty());
    }
}
