// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use medicare_app::{
    Activity, ActivityId, Appointment, AppointmentId, AppointmentStatus, Availability,
    ClinicSnapshot, DoctorProfile, Gender, Patient, PatientId, PatientStatus, StaffId,
    StaffMember, StaffRole,
};
use std::fs;
use std::path::PathBuf;
use time::{Date, Duration, Month, Time};

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];

const SPECIALTIES: [&str; 8] = [
    "Cardiology",
    "Dermatology",
    "Neurology",
    "Oncology",
    "Orthopedics",
    "Pediatrics",
    "Psychiatry",
    "Radiology",
];

const CONDITIONS: [&str; 10] = [
    "Allergies",
    "Arthritis",
    "Asthma",
    "Back Pain",
    "Diabetes Type 2",
    "Heart Disease",
    "High Cholesterol",
    "Hypertension",
    "Migraine",
    "Thyroid Disorder",
];

const APPOINTMENT_TYPES: [&str; 5] = [
    "Check-up",
    "Consultation",
    "Follow-up",
    "Surgery Consult",
    "Vaccination",
];

const NURSE_TITLES: [&str; 4] = ["Head Nurse", "ICU Nurse", "Charge Nurse", "Nurse Practitioner"];
const ADMIN_TITLES: [&str; 4] = [
    "Office Manager",
    "Receptionist",
    "Billing Specialist",
    "IT Support Specialist",
];

const ACTIONS: [&str; 5] = [
    "New patient registered",
    "Appointment completed",
    "Prescription issued",
    "Lab results uploaded",
    "Referral sent",
];

const SCHEDULES: [&str; 3] = [
    "Monday - Friday, 8:00 AM - 5:00 PM",
    "Monday - Thursday, 9:00 AM - 6:00 PM",
    "Tuesday - Saturday, 8:00 AM - 4:00 PM",
];

const REFERENCE_YEAR: i32 = 2024;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded record generator. The same seed always yields the same clinic.
#[derive(Debug, Clone)]
pub struct ClinicFaker {
    rng: DeterministicRng,
}

impl ClinicFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn patient(&mut self, id: i64) -> Patient {
        let name = self.person_name();
        let last_visit = self.date_in_january();
        let history_len = self.int_range(0, 3) as usize;
        let mut medical_history = Vec::with_capacity(history_len);
        while medical_history.len() < history_len {
            let condition = self.pick(&CONDITIONS).to_owned();
            if !medical_history.contains(&condition) {
                medical_history.push(condition);
            }
        }
        let status = if self.int_n(5) == 0 {
            PatientStatus::Inactive
        } else {
            PatientStatus::Active
        };
        Patient {
            id: PatientId::new(id),
            email: email_for(&name, "email.com"),
            name,
            phone: self.phone(),
            age: self.int_range(18, 90) as u32,
            gender: [Gender::Male, Gender::Female, Gender::Other][self.int_n(3)],
            last_visit,
            next_appointment: match status {
                PatientStatus::Active => last_visit.checked_add(Duration::days(14)),
                PatientStatus::Inactive => None,
            },
            status,
            medical_history,
        }
    }

    /// Appointment on `date` at a half-hour slot between 08:00 and 17:30.
    pub fn appointment(&mut self, id: i64, patient: &str, doctor: &str, date: Date) -> Appointment {
        let slot = self.int_n(20) as u8;
        let time = Time::from_hms(8 + slot / 2, (slot % 2) * 30, 0).expect("slot inside day");
        Appointment {
            id: AppointmentId::new(id),
            patient: patient.to_owned(),
            doctor: doctor.to_owned(),
            date,
            time,
            duration_minutes: [15, 30, 45, 60][self.int_n(4)],
            kind: self.pick(&APPOINTMENT_TYPES).to_owned(),
            status: AppointmentStatus::ALL[self.int_n(AppointmentStatus::ALL.len())],
            notes: String::new(),
        }
    }

    pub fn doctor(&mut self, id: i64) -> StaffMember {
        let specialty = self.pick(&SPECIALTIES).to_owned();
        let profile = DoctorProfile {
            specialty: specialty.clone(),
            patient_count: self.int_range(40, 200) as u32,
            rating: 4.0 + (self.int_range(0, 10) as f32) / 10.0,
        };
        let name = format!("Dr. {}", self.person_name());
        self.staff_member(id, name, specialty, StaffRole::Doctor(profile))
    }

    pub fn nurse(&mut self, id: i64) -> StaffMember {
        let title = self.pick(&NURSE_TITLES).to_owned();
        let name = self.person_name();
        self.staff_member(id, name, "Nursing".to_owned(), StaffRole::Staff { title })
    }

    pub fn admin(&mut self, id: i64) -> StaffMember {
        let title = self.pick(&ADMIN_TITLES).to_owned();
        let name = self.person_name();
        self.staff_member(id, name, "Administration".to_owned(), StaffRole::Staff { title })
    }

    pub fn activity(&mut self, id: i64) -> Activity {
        Activity {
            id: ActivityId::new(id),
            action: self.pick(&ACTIONS).to_owned(),
            actor: self.person_name(),
            minutes_ago: self.int_range(0, 3000) as u32,
        }
    }

    /// A consistent clinic: appointments reference generated patients and
    /// doctors and fall in the last week of January.
    pub fn snapshot(&mut self, patients: usize, appointments: usize) -> ClinicSnapshot {
        let patients = (1..=patients as i64)
            .map(|id| self.patient(id))
            .collect::<Vec<_>>();
        let doctors = (1..=4).map(|id| self.doctor(id)).collect::<Vec<_>>();
        let appointments = (1..=appointments as i64)
            .map(|id| {
                let patient = patients
                    .get(self.int_n(patients.len()))
                    .map_or("Walk-in", |patient| patient.name.as_str())
                    .to_owned();
                let doctor = doctors[self.int_n(doctors.len())].name.clone();
                let date = reference_date(22 + self.int_n(7) as u8);
                self.appointment(id, &patient, &doctor, date)
            })
            .collect();
        ClinicSnapshot {
            patients,
            appointments,
            doctors,
            nurses: (1..=2).map(|id| self.nurse(id)).collect(),
            admin_staff: (1..=2).map(|id| self.admin(id)).collect(),
            activity: (1..=4).map(|id| self.activity(id)).collect(),
        }
    }

    fn staff_member(
        &mut self,
        id: i64,
        name: String,
        department: String,
        role: StaffRole,
    ) -> StaffMember {
        StaffMember {
            id: StaffId::new(id),
            email: email_for(name.trim_start_matches("Dr. "), "clinic.com"),
            name,
            phone: self.phone(),
            experience: format!("{} years", self.int_range(1, 30)),
            qualifications: Vec::new(),
            schedule: self.pick(&SCHEDULES).to_owned(),
            availability: match self.int_n(6) {
                0 => Availability::OnLeave,
                1 => Availability::InSurgery,
                _ => Availability::Available,
            },
            department,
            role,
        }
    }

    fn person_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    fn phone(&mut self) -> String {
        format!(
            "({:03}) {:03}-{:04}",
            self.int_range(200, 999),
            self.int_range(200, 999),
            self.int_range(0, 9_999),
        )
    }

    fn date_in_january(&mut self) -> Date {
        reference_date(1 + self.int_n(31) as u8)
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }
}

/// Day `day` of January in the reference year.
pub fn reference_date(day: u8) -> Date {
    Date::from_calendar_date(REFERENCE_YEAR, Month::January, day).expect("valid January day")
}

pub fn temp_dataset_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("clinic.json");
    Ok((dir, path))
}

/// Writes `snapshot` as a dataset file in a fresh temp dir.
pub fn write_dataset(snapshot: &ClinicSnapshot) -> Result<(tempfile::TempDir, PathBuf)> {
    let (dir, path) = temp_dataset_path()?;
    let raw = serde_json::to_string_pretty(snapshot).context("serialize dataset")?;
    fs::write(&path, raw).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}

fn email_for(name: &str, domain: &str) -> String {
    format!("{}@{domain}", name.to_ascii_lowercase().replace(' ', "."))
}
