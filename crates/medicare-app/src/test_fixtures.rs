// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::{Date, Month, Time};

use crate::{
    Appointment, AppointmentId, AppointmentStatus, Availability, DoctorProfile, Gender, Patient,
    PatientId, PatientStatus, StaffId, StaffMember, StaffRole,
};

pub fn date(year: i32, month: u8, day: u8) -> Date {
    let month = Month::try_from(month).expect("valid month");
    Date::from_calendar_date(year, month, day).expect("valid date")
}

pub fn patient(id: i64, name: &str, phone: &str, status: PatientStatus) -> Patient {
    let email = format!("{}@email.com", name.to_ascii_lowercase().replace(' ', "."));
    Patient {
        id: PatientId::new(id),
        name: name.to_owned(),
        email,
        phone: phone.to_owned(),
        age: 40,
        gender: Gender::Other,
        last_visit: date(2024, 1, 15),
        next_appointment: None,
        status,
        medical_history: vec!["Diabetes Type 2".to_owned()],
    }
}

pub fn sample_patients() -> Vec<Patient> {
    vec![
        patient(1, "John Smith", "(555) 123-4567", PatientStatus::Active),
        patient(2, "Emily Davis", "(555) 234-5678", PatientStatus::Active),
        patient(3, "Robert Wilson", "(555) 345-6789", PatientStatus::Inactive),
        patient(4, "Lisa Anderson", "(555) 456-7890", PatientStatus::Active),
        patient(5, "David Miller", "(555) 567-8901", PatientStatus::Active),
    ]
}

pub fn appointment(
    id: i64,
    patient: &str,
    doctor: &str,
    at: (u8, u8),
    kind: &str,
    status: AppointmentStatus,
) -> Appointment {
    Appointment {
        id: AppointmentId::new(id),
        patient: patient.to_owned(),
        doctor: doctor.to_owned(),
        date: date(2024, 1, 25),
        time: Time::from_hms(at.0, at.1, 0).expect("valid time"),
        duration_minutes: 30,
        kind: kind.to_owned(),
        status,
        notes: String::new(),
    }
}

pub fn sample_appointments() -> Vec<Appointment> {
    vec![
        appointment(
            1,
            "John Smith",
            "Dr. Sarah Johnson",
            (9, 0),
            "Consultation",
            AppointmentStatus::Scheduled,
        ),
        appointment(
            2,
            "Emily Davis",
            "Dr. Michael Brown",
            (10, 30),
            "Follow-up",
            AppointmentStatus::Scheduled,
        ),
        appointment(
            3,
            "Robert Wilson",
            "Dr. Sarah Johnson",
            (14, 0),
            "Check-up",
            AppointmentStatus::Completed,
        ),
        appointment(
            4,
            "Lisa Anderson",
            "Dr. Jennifer Lee",
            (15, 30),
            "Consultation",
            AppointmentStatus::Pending,
        ),
        appointment(
            5,
            "David Miller",
            "Dr. Michael Brown",
            (16, 15),
            "Surgery Consult",
            AppointmentStatus::Cancelled,
        ),
    ]
}

pub fn doctor(id: i64, name: &str, specialty: &str, availability: Availability) -> StaffMember {
    StaffMember {
        id: StaffId::new(id),
        name: name.to_owned(),
        email: String::new(),
        phone: String::new(),
        experience: "10 years".to_owned(),
        qualifications: Vec::new(),
        schedule: "Monday - Friday".to_owned(),
        availability,
        department: specialty.to_owned(),
        role: StaffRole::Doctor(DoctorProfile {
            specialty: specialty.to_owned(),
            patient_count: 100,
            rating: 4.8,
        }),
    }
}

pub fn sample_doctors() -> Vec<StaffMember> {
    vec![
        doctor(1, "Dr. Sarah Johnson", "Cardiology", Availability::Available),
        doctor(2, "Dr. Michael Brown", "Orthopedics", Availability::InSurgery),
        doctor(3, "Dr. Jennifer Lee", "Pediatrics", Availability::Available),
        doctor(4, "Dr. Robert Davis", "Dermatology", Availability::OnLeave),
    ]
}

pub fn support(id: i64, name: &str, title: &str) -> StaffMember {
    StaffMember {
        id: StaffId::new(id),
        name: name.to_owned(),
        email: String::new(),
        phone: String::new(),
        experience: "5 years".to_owned(),
        qualifications: Vec::new(),
        schedule: "Monday - Friday".to_owned(),
        availability: Availability::Available,
        department: "Administration".to_owned(),
        role: StaffRole::Staff {
            title: title.to_owned(),
        },
    }
}
