// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::Date;
use time::macros::date;

use crate::calendar::{self, Granularity, NavDirection};
use crate::selection::Selection;
use crate::{AppMode, AppointmentId, Page, PatientId, StaffGroup, StaffId};

pub const DEFAULT_REFERENCE_DATE: Date = date!(2024-01-25);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatientsState {
    pub query: String,
    pub selection: Selection<PatientId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentsState {
    pub query: String,
    pub selection: Selection<AppointmentId>,
    pub date: Date,
    pub granularity: Granularity,
}

impl AppointmentsState {
    pub fn new(date: Date, granularity: Granularity) -> Self {
        Self {
            query: String::new(),
            selection: Selection::default(),
            date,
            granularity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffState {
    pub query: String,
    pub group: StaffGroup,
    pub specialty: Option<String>,
    pub selection: Selection<StaffId>,
}

impl Default for StaffState {
    fn default() -> Self {
        Self {
            query: String::new(),
            group: StaffGroup::Doctors,
            specialty: None,
            selection: Selection::default(),
        }
    }
}

/// Everything the shell and the pages remember between key presses.
///
/// Per-page state is dropped when the page is left, the way an unmounted
/// view forgets its inputs. The sidebar belongs to the shell and survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub active_page: Page,
    pub sidebar_collapsed: bool,
    pub reference_date: Date,
    pub default_granularity: Granularity,
    pub patients: PatientsState,
    pub appointments: AppointmentsState,
    pub staff: StaffState,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_DATE, Granularity::Day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextPage,
    PrevPage,
    GoTo(Page),
    ToggleSidebar,
    EnterSearch,
    ExitSearch,
    SearchInput(char),
    SearchBackspace,
    ClearSearch,
    SelectPatient(PatientId),
    SelectAppointment(AppointmentId),
    SelectStaff(StaffId),
    NavigateDate(NavDirection),
    SetGranularity(Granularity),
    JumpToReferenceDate,
    NextStaffGroup,
    SetSpecialty(Option<String>),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    PageChanged(Page),
    SidebarToggled { collapsed: bool },
    QueryChanged { page: Page, query: String },
    SelectionChanged(Page),
    DateChanged(Date),
    GranularityChanged(Granularity),
    StaffGroupChanged(StaffGroup),
    SpecialtyChanged(Option<String>),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn new(reference_date: Date, granularity: Granularity) -> Self {
        Self {
            mode: AppMode::Nav,
            active_page: Page::Dashboard,
            sidebar_collapsed: false,
            reference_date,
            default_granularity: granularity,
            patients: PatientsState::default(),
            appointments: AppointmentsState::new(reference_date, granularity),
            staff: StaffState::default(),
            status_line: None,
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextPage => self.rotate_page(1),
            AppCommand::PrevPage => self.rotate_page(-1),
            AppCommand::GoTo(page) => self.go_to(page),
            AppCommand::ToggleSidebar => {
                self.sidebar_collapsed = !self.sidebar_collapsed;
                vec![AppEvent::SidebarToggled {
                    collapsed: self.sidebar_collapsed,
                }]
            }
            AppCommand::EnterSearch => {
                if !self.active_page.has_search() {
                    return vec![self.set_status("search unavailable on this page")];
                }
                self.mode = AppMode::Search;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitSearch => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::SearchInput(ch) => self.edit_query(|query| query.push(ch)),
            AppCommand::SearchBackspace => self.edit_query(|query| {
                query.pop();
            }),
            AppCommand::ClearSearch => self.edit_query(String::clear),
            AppCommand::SelectPatient(id) => {
                self.patients.selection.select(id);
                vec![AppEvent::SelectionChanged(Page::Patients)]
            }
            AppCommand::SelectAppointment(id) => {
                self.appointments.selection.select(id);
                vec![AppEvent::SelectionChanged(Page::Appointments)]
            }
            AppCommand::SelectStaff(id) => {
                self.staff.selection.select(id);
                vec![AppEvent::SelectionChanged(Page::Staff)]
            }
            AppCommand::NavigateDate(direction) => {
                let view = &mut self.appointments;
                match calendar::navigate(view.date, view.granularity, direction) {
                    Some(next) => {
                        view.date = next;
                        vec![AppEvent::DateChanged(next)]
                    }
                    None => vec![self.set_status("date out of range")],
                }
            }
            AppCommand::SetGranularity(granularity) => {
                if self.appointments.granularity == granularity {
                    return Vec::new();
                }
                self.appointments.granularity = granularity;
                vec![AppEvent::GranularityChanged(granularity)]
            }
            AppCommand::JumpToReferenceDate => {
                self.appointments.date = self.reference_date;
                vec![AppEvent::DateChanged(self.reference_date)]
            }
            AppCommand::NextStaffGroup => {
                self.staff.group = self.staff.group.next();
                self.staff.selection.clear();
                vec![
                    AppEvent::StaffGroupChanged(self.staff.group),
                    AppEvent::SelectionChanged(Page::Staff),
                ]
            }
            AppCommand::SetSpecialty(specialty) => {
                self.staff.specialty = specialty.clone();
                vec![AppEvent::SpecialtyChanged(specialty)]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    /// Search text of the active page, if it has a search box.
    pub fn active_query(&self) -> Option<&str> {
        match self.active_page {
            Page::Patients => Some(&self.patients.query),
            Page::Appointments => Some(&self.appointments.query),
            Page::Staff => Some(&self.staff.query),
            Page::Dashboard | Page::Settings => None,
        }
    }

    fn rotate_page(&mut self, delta: isize) -> Vec<AppEvent> {
        let pages = Page::ALL;
        let current = pages
            .iter()
            .position(|page| *page == self.active_page)
            .unwrap_or(0) as isize;
        let len = pages.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.go_to(pages[next])
    }

    fn go_to(&mut self, page: Page) -> Vec<AppEvent> {
        if page == self.active_page {
            return Vec::new();
        }
        self.reset_page(self.active_page);
        self.active_page = page;
        let mut events = Vec::new();
        if self.mode != AppMode::Nav {
            self.mode = AppMode::Nav;
            events.push(AppEvent::ModeChanged(self.mode));
        }
        events.push(AppEvent::PageChanged(page));
        events
    }

    fn reset_page(&mut self, page: Page) {
        match page {
            Page::Patients => self.patients = PatientsState::default(),
            Page::Appointments => {
                self.appointments =
                    AppointmentsState::new(self.reference_date, self.default_granularity);
            }
            Page::Staff => self.staff = StaffState::default(),
            Page::Dashboard | Page::Settings => {}
        }
    }

    fn edit_query(&mut self, edit: impl FnOnce(&mut String)) -> Vec<AppEvent> {
        let page = self.active_page;
        let query = match page {
            Page::Patients => &mut self.patients.query,
            Page::Appointments => &mut self.appointments.query,
            Page::Staff => &mut self.staff.query,
            Page::Dashboard | Page::Settings => {
                return vec![self.set_status("search unavailable on this page")];
            }
        };
        let before = query.clone();
        edit(query);
        if *query == before {
            return Vec::new();
        }
        vec![AppEvent::QueryChanged {
            page,
            query: query.clone(),
        }]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
