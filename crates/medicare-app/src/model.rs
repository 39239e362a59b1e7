// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::{Date, Time};

use crate::ids::*;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");
time::serde::format_description!(clock_time, Time, "[hour]:[minute]");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientStatus {
    Active,
    Inactive,
}

impl PatientStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Pending,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [Self; 4] = [
        Self::Scheduled,
        Self::Completed,
        Self::Pending,
        Self::Cancelled,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    #[serde(rename = "In Surgery")]
    InSurgery,
    #[serde(rename = "On Leave")]
    OnLeave,
}

impl Availability {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::InSurgery => "In Surgery",
            Self::OnLeave => "On Leave",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffGroup {
    Doctors,
    Nurses,
    Admin,
}

impl StaffGroup {
    pub const ALL: [Self; 3] = [Self::Doctors, Self::Nurses, Self::Admin];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Doctors => "Doctors",
            Self::Nurses => "Nurses",
            Self::Admin => "Admin Staff",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL
            .iter()
            .position(|group| *group == self)
            .unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    Dashboard,
    Patients,
    Appointments,
    Staff,
    Settings,
}

impl Page {
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Patients,
        Self::Appointments,
        Self::Staff,
        Self::Settings,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Patients => "Patients",
            Self::Appointments => "Appointments",
            Self::Staff => "Staff",
            Self::Settings => "Settings",
        }
    }

    pub const fn route(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Patients => "/patients",
            Self::Appointments => "/appointments",
            Self::Staff => "/staff",
            Self::Settings => "/settings",
        }
    }

    /// Single-cell glyph shown in the sidebar, also when it is collapsed.
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Dashboard => "▦",
            Self::Patients => "☺",
            Self::Appointments => "◷",
            Self::Staff => "✚",
            Self::Settings => "⚙",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|page| {
            page.label().eq_ignore_ascii_case(value) || page.route() == value
        })
    }

    pub const fn has_search(self) -> bool {
        matches!(self, Self::Patients | Self::Appointments | Self::Staff)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppMode {
    Nav,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: u32,
    pub gender: Gender,
    #[serde(with = "iso_date")]
    pub last_visit: Date,
    #[serde(with = "iso_date::option", default)]
    pub next_appointment: Option<Date>,
    pub status: PatientStatus,
    #[serde(default)]
    pub medical_history: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient: String,
    pub doctor: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(with = "clock_time")]
    pub time: Time,
    pub duration_minutes: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DoctorProfile {
    pub specialty: String,
    pub patient_count: u32,
    pub rating: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Doctor(DoctorProfile),
    Staff { title: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience: String,
    #[serde(default)]
    pub qualifications: Vec<String>,
    pub schedule: String,
    pub availability: Availability,
    pub department: String,
    pub role: StaffRole,
}

impl StaffMember {
    pub fn specialty(&self) -> Option<&str> {
        match &self.role {
            StaffRole::Doctor(profile) => Some(profile.specialty.as_str()),
            StaffRole::Staff { .. } => None,
        }
    }

    pub fn doctor_profile(&self) -> Option<&DoctorProfile> {
        match &self.role {
            StaffRole::Doctor(profile) => Some(profile),
            StaffRole::Staff { .. } => None,
        }
    }

    /// Specialty for doctors, job title for everyone else.
    pub fn headline(&self) -> &str {
        match &self.role {
            StaffRole::Doctor(profile) => &profile.specialty,
            StaffRole::Staff { title } => title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Activity {
    pub id: ActivityId,
    pub action: String,
    pub actor: String,
    pub minutes_ago: u32,
}

impl Activity {
    pub fn relative_time(&self) -> String {
        format_minutes_ago(self.minutes_ago)
    }
}

pub fn format_minutes_ago(minutes: u32) -> String {
    match minutes {
        0 => "just now".to_owned(),
        1 => "1 minute ago".to_owned(),
        2..=59 => format!("{minutes} minutes ago"),
        60..=119 => "1 hour ago".to_owned(),
        120..=1439 => format!("{} hours ago", minutes / 60),
        1440..=2879 => "1 day ago".to_owned(),
        _ => format!("{} days ago", minutes / 1440),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRow {
    pub label: String,
    pub value: String,
}

impl SettingRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Appointment, AppointmentStatus, Availability, Page, StaffGroup, format_minutes_ago,
    };

    #[test]
    fn page_parse_accepts_labels_and_routes() {
        assert_eq!(Page::parse("patients"), Some(Page::Patients));
        assert_eq!(Page::parse("Staff"), Some(Page::Staff));
        assert_eq!(Page::parse("/appointments"), Some(Page::Appointments));
        assert_eq!(Page::parse("/"), Some(Page::Dashboard));
        assert_eq!(Page::parse("billing"), None);
    }

    #[test]
    fn staff_group_rotation_wraps() {
        assert_eq!(StaffGroup::Doctors.next(), StaffGroup::Nurses);
        assert_eq!(StaffGroup::Admin.next(), StaffGroup::Doctors);
    }

    #[test]
    fn enum_labels_match_wire_names() {
        for status in AppointmentStatus::ALL {
            assert_eq!(
                serde_json::to_string(&status).expect("encode status"),
                format!("\"{}\"", status.as_str())
            );
        }
        assert_eq!(
            serde_json::to_string(&Availability::InSurgery).expect("encode availability"),
            "\"In Surgery\""
        );
        assert!(serde_json::from_str::<Availability>("\"in surgery\"").is_err());
    }

    #[test]
    fn misspelled_record_field_is_rejected() {
        let error = serde_json::from_str::<Appointment>(
            r#"{
                "id": 7,
                "patient": "John Smith",
                "doctor": "Dr. Sarah Johnson",
                "date": "2024-01-25",
                "time": "09:00",
                "duration_minutes": 30,
                "type": "Consultation",
                "status": "scheduled",
                "note": "typo"
            }"#,
        )
        .expect_err("unknown field should fail");
        assert!(error.to_string().contains("unknown field `note`"));
    }

    #[test]
    fn relative_time_buckets() {
        assert_eq!(format_minutes_ago(0), "just now");
        assert_eq!(format_minutes_ago(5), "5 minutes ago");
        assert_eq!(format_minutes_ago(60), "1 hour ago");
        assert_eq!(format_minutes_ago(150), "2 hours ago");
        assert_eq!(format_minutes_ago(3000), "2 days ago");
    }

    #[test]
    fn appointment_uses_wire_names_for_type_and_status() {
        let appointment: Appointment = serde_json::from_str(
            r#"{
                "id": 7,
                "patient": "John Smith",
                "doctor": "Dr. Sarah Johnson",
                "date": "2024-01-25",
                "time": "09:00",
                "duration_minutes": 30,
                "type": "Consultation",
                "status": "scheduled"
            }"#,
        )
        .expect("decode appointment");
        assert_eq!(appointment.kind, "Consultation");
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
        assert_eq!(appointment.time.hour(), 9);
        assert!(appointment.notes.is_empty());
    }
}
