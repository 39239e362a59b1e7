// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Derived page views.
//!
//! Each function is a pure projection of (records, page state). Nothing here
//! is stored; the UI recomputes the view on every frame.

use anyhow::Result;
use time::{Date, Time};

use crate::calendar::{self, DateWindow, Granularity};
use crate::filter::{filter_records, filter_staff, specialties};
use crate::selection::SelectionView;
use crate::source::ClinicSnapshot;
use crate::state::{AppointmentsState, PatientsState, StaffState};
use crate::{
    Activity, Appointment, AppointmentStatus, Availability, Patient, PatientStatus, StaffGroup,
    StaffMember,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PatientsView<'a> {
    pub total: usize,
    pub rows: Vec<&'a Patient>,
    pub detail: SelectionView<'a, Patient>,
}

pub fn patients_view<'a>(snapshot: &'a ClinicSnapshot, state: &PatientsState) -> PatientsView<'a> {
    let rows = filter_records(&snapshot.patients, &state.query);
    let detail = state.selection.resolve(&rows);
    PatientsView {
        total: snapshot.patients.len(),
        rows,
        detail,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotView<'a> {
    pub time: Time,
    pub appointment: Option<&'a Appointment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppointmentSummary {
    pub total: usize,
    pub scheduled: usize,
    pub completed: usize,
    pub pending: usize,
    pub cancelled: usize,
}

impl AppointmentSummary {
    pub fn tally<'a>(appointments: impl IntoIterator<Item = &'a Appointment>) -> Self {
        let mut summary = Self::default();
        for appointment in appointments {
            summary.total += 1;
            match appointment.status {
                AppointmentStatus::Scheduled => summary.scheduled += 1,
                AppointmentStatus::Completed => summary.completed += 1,
                AppointmentStatus::Pending => summary.pending += 1,
                AppointmentStatus::Cancelled => summary.cancelled += 1,
            }
        }
        summary
    }

    pub const fn count(&self, status: AppointmentStatus) -> usize {
        match status {
            AppointmentStatus::Scheduled => self.scheduled,
            AppointmentStatus::Completed => self.completed,
            AppointmentStatus::Pending => self.pending,
            AppointmentStatus::Cancelled => self.cancelled,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentsView<'a> {
    pub heading: String,
    pub date: Date,
    pub granularity: Granularity,
    pub window: DateWindow,
    /// Search matches inside the window, ordered by date then time.
    pub rows: Vec<&'a Appointment>,
    /// Half-hour grid for the current date, filled from `rows`.
    pub slots: Vec<SlotView<'a>>,
    /// Counts over the whole window, ignoring the search box.
    pub summary: AppointmentSummary,
    pub doctors: Vec<&'a StaffMember>,
    pub detail: SelectionView<'a, Appointment>,
}

pub fn appointments_view<'a>(
    snapshot: &'a ClinicSnapshot,
    state: &AppointmentsState,
) -> Result<AppointmentsView<'a>> {
    let window = calendar::window(state.date, state.granularity);
    let mut rows = filter_records(&snapshot.appointments, &state.query)
        .into_iter()
        .filter(|appointment| window.contains(appointment.date))
        .collect::<Vec<_>>();
    rows.sort_by_key(|appointment| (appointment.date, appointment.time));

    let slots = calendar::time_slots()
        .into_iter()
        .map(|time| SlotView {
            time,
            appointment: rows
                .iter()
                .copied()
                .find(|appointment| appointment.date == state.date && appointment.time == time),
        })
        .collect();

    let summary = AppointmentSummary::tally(
        snapshot
            .appointments
            .iter()
            .filter(|appointment| window.contains(appointment.date)),
    );
    let detail = state.selection.resolve(&rows);

    Ok(AppointmentsView {
        heading: calendar::window_heading(state.date, state.granularity)?,
        date: state.date,
        granularity: state.granularity,
        window,
        rows,
        slots,
        summary,
        doctors: snapshot.doctors.iter().collect(),
        detail,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaffView<'a> {
    pub group: StaffGroup,
    pub counts: Vec<(StaffGroup, usize)>,
    pub specialties: Vec<String>,
    pub specialty: Option<String>,
    pub rows: Vec<&'a StaffMember>,
    pub detail: SelectionView<'a, StaffMember>,
}

pub fn staff_view<'a>(snapshot: &'a ClinicSnapshot, state: &StaffState) -> StaffView<'a> {
    // Specialty chips only narrow the doctors tab.
    let specialty = match state.group {
        StaffGroup::Doctors => state.specialty.as_deref(),
        StaffGroup::Nurses | StaffGroup::Admin => None,
    };
    let rows = filter_staff(snapshot.staff(state.group), &state.query, specialty);
    let detail = state.selection.resolve(&rows);
    StaffView {
        group: state.group,
        counts: StaffGroup::ALL
            .iter()
            .map(|group| (*group, snapshot.staff(*group).len()))
            .collect(),
        specialties: specialties(&snapshot.doctors),
        specialty: state.specialty.clone(),
        rows,
        detail,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_patients: usize,
    pub active_patients: usize,
    pub appointments_today: usize,
    pub staff_total: usize,
    pub staff_available: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView<'a> {
    pub stats: DashboardStats,
    pub todays_appointments: Vec<&'a Appointment>,
    pub recent_activity: Vec<&'a Activity>,
}

pub fn dashboard_view(snapshot: &ClinicSnapshot, today: Date) -> DashboardView<'_> {
    let mut todays_appointments = snapshot
        .appointments
        .iter()
        .filter(|appointment| appointment.date == today)
        .collect::<Vec<_>>();
    todays_appointments.sort_by_key(|appointment| appointment.time);

    let mut recent_activity = snapshot.activity.iter().collect::<Vec<_>>();
    recent_activity.sort_by_key(|activity| activity.minutes_ago);

    let staff_available = StaffGroup::ALL
        .iter()
        .flat_map(|group| snapshot.staff(*group))
        .filter(|member| member.availability == Availability::Available)
        .count();

    DashboardView {
        stats: DashboardStats {
            total_patients: snapshot.patients.len(),
            active_patients: snapshot
                .patients
                .iter()
                .filter(|patient| patient.status == PatientStatus::Active)
                .count(),
            appointments_today: todays_appointments.len(),
            staff_total: snapshot.staff_count(),
            staff_available,
        },
        todays_appointments,
        recent_activity,
    }
}
