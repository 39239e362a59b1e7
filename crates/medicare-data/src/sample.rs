// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use medicare_app::{
    Activity, ActivityId, Appointment, AppointmentId, AppointmentStatus, Availability,
    ClinicData, ClinicSnapshot, DoctorProfile, Gender, Patient, PatientId, PatientStatus,
    StaffGroup, StaffId, StaffMember, StaffRole,
};
use time::Date;
use time::macros::{date, time};

/// The clinic the dashboard ships with. Every list is rebuilt on request so
/// callers own their copies.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleClinic;

impl ClinicData for SampleClinic {
    fn list_patients(&self) -> Result<Vec<Patient>> {
        Ok(vec![
            patient(PatientSeed {
                id: 1,
                name: "John Smith",
                phone: "(555) 123-4567",
                age: 45,
                gender: Gender::Male,
                last_visit: date!(2024-01-15),
                next_appointment: Some(date!(2024-02-01)),
                status: PatientStatus::Active,
                history: &["Hypertension", "Diabetes Type 2"],
            }),
            patient(PatientSeed {
                id: 2,
                name: "Emily Davis",
                phone: "(555) 234-5678",
                age: 32,
                gender: Gender::Female,
                last_visit: date!(2024-01-20),
                next_appointment: Some(date!(2024-01-25)),
                status: PatientStatus::Active,
                history: &["Asthma"],
            }),
            patient(PatientSeed {
                id: 3,
                name: "Robert Wilson",
                phone: "(555) 345-6789",
                age: 58,
                gender: Gender::Male,
                last_visit: date!(2024-01-10),
                next_appointment: None,
                status: PatientStatus::Inactive,
                history: &["Heart Disease", "High Cholesterol"],
            }),
            patient(PatientSeed {
                id: 4,
                name: "Lisa Anderson",
                phone: "(555) 456-7890",
                age: 28,
                gender: Gender::Female,
                last_visit: date!(2024-01-22),
                next_appointment: Some(date!(2024-02-05)),
                status: PatientStatus::Active,
                history: &["Allergies"],
            }),
            patient(PatientSeed {
                id: 5,
                name: "David Miller",
                phone: "(555) 567-8901",
                age: 41,
                gender: Gender::Male,
                last_visit: date!(2024-01-18),
                next_appointment: Some(date!(2024-01-30)),
                status: PatientStatus::Active,
                history: &["Arthritis", "Back Pain"],
            }),
        ])
    }

    fn list_appointments(&self) -> Result<Vec<Appointment>> {
        let day = date!(2024-01-25);
        Ok([
            (
                1,
                "John Smith",
                "Dr. Sarah Johnson",
                time!(09:00),
                30,
                "Consultation",
                AppointmentStatus::Scheduled,
                "Regular checkup",
            ),
            (
                2,
                "Emily Davis",
                "Dr. Michael Brown",
                time!(10:30),
                45,
                "Follow-up",
                AppointmentStatus::Scheduled,
                "Post-surgery follow-up",
            ),
            (
                3,
                "Robert Wilson",
                "Dr. Sarah Johnson",
                time!(14:00),
                30,
                "Check-up",
                AppointmentStatus::Completed,
                "Annual physical examination",
            ),
            (
                4,
                "Lisa Anderson",
                "Dr. Jennifer Lee",
                time!(15:30),
                60,
                "Consultation",
                AppointmentStatus::Pending,
                "Initial consultation",
            ),
            (
                5,
                "David Miller",
                "Dr. Michael Brown",
                time!(16:15),
                45,
                "Surgery Consult",
                AppointmentStatus::Cancelled,
                "Knee surgery consultation",
            ),
        ]
        .into_iter()
        .map(
            |(id, patient, doctor, time, duration_minutes, kind, status, notes)| Appointment {
                id: AppointmentId::new(id),
                patient: patient.to_owned(),
                doctor: doctor.to_owned(),
                date: day,
                time,
                duration_minutes,
                kind: kind.to_owned(),
                status,
                notes: notes.to_owned(),
            },
        )
        .collect())
    }

    fn list_staff(&self, group: StaffGroup) -> Result<Vec<StaffMember>> {
        Ok(match group {
            StaffGroup::Doctors => sample_doctors(),
            StaffGroup::Nurses => sample_nurses(),
            StaffGroup::Admin => sample_admin_staff(),
        })
    }

    fn list_activity(&self) -> Result<Vec<Activity>> {
        Ok([
            (1, "New patient registered", "John Smith", 5),
            (2, "Appointment completed", "Dr. Sarah Johnson", 12),
            (3, "Prescription issued", "Dr. Michael Brown", 25),
            (4, "Lab results uploaded", "Lab Tech - Maria", 60),
        ]
        .into_iter()
        .map(|(id, action, actor, minutes_ago)| Activity {
            id: ActivityId::new(id),
            action: action.to_owned(),
            actor: actor.to_owned(),
            minutes_ago,
        })
        .collect())
    }

    fn describe(&self) -> String {
        "built-in sample data".to_owned()
    }
}

/// Built-in records as one snapshot, ready for display or export.
pub fn sample_snapshot() -> Result<ClinicSnapshot> {
    ClinicSnapshot::load(&SampleClinic)
}

struct PatientSeed {
    id: i64,
    name: &'static str,
    phone: &'static str,
    age: u32,
    gender: Gender,
    last_visit: Date,
    next_appointment: Option<Date>,
    status: PatientStatus,
    history: &'static [&'static str],
}

fn patient(seed: PatientSeed) -> Patient {
    Patient {
        id: PatientId::new(seed.id),
        name: seed.name.to_owned(),
        email: format!("{}@email.com", email_local_part(seed.name)),
        phone: seed.phone.to_owned(),
        age: seed.age,
        gender: seed.gender,
        last_visit: seed.last_visit,
        next_appointment: seed.next_appointment,
        status: seed.status,
        medical_history: owned(seed.history),
    }
}

struct StaffSeed {
    id: i64,
    name: &'static str,
    phone: &'static str,
    experience: &'static str,
    qualifications: &'static [&'static str],
    schedule: &'static str,
    availability: Availability,
    department: &'static str,
}

fn staff_member(seed: StaffSeed, role: StaffRole) -> StaffMember {
    // "Dr. Sarah Johnson" mails as sarah.johnson@clinic.com.
    let bare_name = seed.name.trim_start_matches("Dr. ");
    StaffMember {
        id: StaffId::new(seed.id),
        name: seed.name.to_owned(),
        email: format!("{}@clinic.com", email_local_part(bare_name)),
        phone: seed.phone.to_owned(),
        experience: seed.experience.to_owned(),
        qualifications: owned(seed.qualifications),
        schedule: seed.schedule.to_owned(),
        availability: seed.availability,
        department: seed.department.to_owned(),
        role,
    }
}

fn doctor(seed: StaffSeed, patient_count: u32, rating: f32) -> StaffMember {
    let specialty = seed.department.to_owned();
    staff_member(
        seed,
        StaffRole::Doctor(DoctorProfile {
            specialty,
            patient_count,
            rating,
        }),
    )
}

fn titled(seed: StaffSeed, title: &str) -> StaffMember {
    staff_member(
        seed,
        StaffRole::Staff {
            title: title.to_owned(),
        },
    )
}

fn sample_doctors() -> Vec<StaffMember> {
    vec![
        doctor(
            StaffSeed {
                id: 1,
                name: "Dr. Sarah Johnson",
                phone: "(555) 123-4567",
                experience: "15 years",
                qualifications: &[
                    "MD - Harvard Medical School",
                    "Board Certified Cardiologist",
                    "FACC",
                ],
                schedule: "Monday - Friday, 8:00 AM - 5:00 PM",
                availability: Availability::Available,
                department: "Cardiology",
            },
            156,
            4.9,
        ),
        doctor(
            StaffSeed {
                id: 2,
                name: "Dr. Michael Brown",
                phone: "(555) 234-5678",
                experience: "12 years",
                qualifications: &[
                    "MD - Johns Hopkins",
                    "Orthopedic Surgery Residency",
                    "Sports Medicine Fellowship",
                ],
                schedule: "Monday - Thursday, 9:00 AM - 6:00 PM",
                availability: Availability::InSurgery,
                department: "Orthopedics",
            },
            134,
            4.8,
        ),
        doctor(
            StaffSeed {
                id: 3,
                name: "Dr. Jennifer Lee",
                phone: "(555) 345-6789",
                experience: "8 years",
                qualifications: &[
                    "MD - Stanford Medical",
                    "Pediatric Residency",
                    "Board Certified Pediatrician",
                ],
                schedule: "Tuesday - Saturday, 8:00 AM - 4:00 PM",
                availability: Availability::Available,
                department: "Pediatrics",
            },
            98,
            4.9,
        ),
        doctor(
            StaffSeed {
                id: 4,
                name: "Dr. Robert Davis",
                phone: "(555) 456-7890",
                experience: "20 years",
                qualifications: &[
                    "MD - UCLA Medical",
                    "Dermatology Residency",
                    "Cosmetic Surgery Certification",
                ],
                schedule: "Monday - Friday, 10:00 AM - 7:00 PM",
                availability: Availability::OnLeave,
                department: "Dermatology",
            },
            187,
            4.7,
        ),
    ]
}

fn sample_nurses() -> Vec<StaffMember> {
    vec![
        titled(
            StaffSeed {
                id: 1,
                name: "Maria Rodriguez",
                phone: "(555) 567-8901",
                experience: "12 years",
                qualifications: &["BSN - Nursing", "Critical Care Certification"],
                schedule: "Monday - Friday, 7:00 AM - 7:00 PM",
                availability: Availability::Available,
                department: "Emergency",
            },
            "Head Nurse",
        ),
        titled(
            StaffSeed {
                id: 2,
                name: "James Wilson",
                phone: "(555) 678-9012",
                experience: "8 years",
                qualifications: &["BSN - Nursing", "ICU Certification", "BLS Instructor"],
                schedule: "Tuesday - Saturday, 6:00 AM - 6:00 PM",
                availability: Availability::Available,
                department: "ICU",
            },
            "ICU Nurse",
        ),
    ]
}

fn sample_admin_staff() -> Vec<StaffMember> {
    vec![
        titled(
            StaffSeed {
                id: 1,
                name: "Lisa Thompson",
                phone: "(555) 789-0123",
                experience: "10 years",
                qualifications: &["Healthcare Administration", "Medical Office Management"],
                schedule: "Monday - Friday, 8:00 AM - 5:00 PM",
                availability: Availability::Available,
                department: "Administration",
            },
            "Office Manager",
        ),
        titled(
            StaffSeed {
                id: 2,
                name: "David Chen",
                phone: "(555) 890-1234",
                experience: "5 years",
                qualifications: &["Computer Science Degree", "Healthcare IT Certification"],
                schedule: "Monday - Friday, 9:00 AM - 6:00 PM",
                availability: Availability::Available,
                department: "IT",
            },
            "IT Support Specialist",
        ),
    ]
}

fn email_local_part(name: &str) -> String {
    name.to_ascii_lowercase().replace(' ', ".")
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::{SampleClinic, sample_snapshot};
    use crate::validate_snapshot;
    use anyhow::Result;
    use medicare_app::{ClinicData, StaffGroup};

    #[test]
    fn sample_snapshot_is_valid() -> Result<()> {
        let snapshot = sample_snapshot()?;
        validate_snapshot(&snapshot)?;
        assert_eq!(snapshot.patients.len(), 5);
        assert_eq!(snapshot.appointments.len(), 5);
        assert_eq!(snapshot.staff_count(), 8);
        assert_eq!(snapshot.activity.len(), 4);
        Ok(())
    }

    #[test]
    fn emails_derive_from_names() -> Result<()> {
        let clinic = SampleClinic;
        assert_eq!(clinic.list_patients()?[0].email, "john.smith@email.com");
        assert_eq!(
            clinic.list_staff(StaffGroup::Doctors)?[0].email,
            "sarah.johnson@clinic.com"
        );
        assert_eq!(
            clinic.list_staff(StaffGroup::Admin)?[1].email,
            "david.chen@clinic.com"
        );
        Ok(())
    }

    #[test]
    fn doctors_carry_their_department_as_specialty() -> Result<()> {
        let doctors = SampleClinic.list_staff(StaffGroup::Doctors)?;
        let specialties = doctors
            .iter()
            .filter_map(|doctor| doctor.specialty())
            .collect::<Vec<_>>();
        assert_eq!(
            specialties,
            vec!["Cardiology", "Orthopedics", "Pediatrics", "Dermatology"]
        );
        Ok(())
    }
}
