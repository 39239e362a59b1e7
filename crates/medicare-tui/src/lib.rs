// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use medicare_app::calendar::{self, Granularity, NavDirection};
use medicare_app::views::{
    AppointmentsView, DashboardView, PatientsView, StaffView, appointments_view, dashboard_view,
    patients_view, staff_view,
};
use medicare_app::{
    AppCommand, AppEvent, AppMode, AppState, AppointmentStatus, Availability, ClinicSnapshot,
    Page, SelectionView, SettingRow, StaffGroup, StaffRole,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::Date;

const SIDEBAR_WIDTH: u16 = 26;
const SIDEBAR_COLLAPSED_WIDTH: u16 = 7;
const CURSOR_MARK: &str = "▸";
const SELECTED_MARK: &str = "●";
const BRAND: &str = "MediCare";
const BRAND_TAGLINE: &str = "Clinic Management";
const SIGNED_IN_NAME: &str = "Dr. Sarah Johnson";
const SIGNED_IN_ROLE: &str = "Administrator";

/// What the UI needs from the outside world: the records and a description of
/// the effective settings.
pub trait AppRuntime {
    fn load_snapshot(&mut self) -> Result<ClinicSnapshot>;
    fn settings(&self) -> Vec<SettingRow>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct PageCursors {
    patients: usize,
    appointments: usize,
    staff: usize,
    settings: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ViewData {
    snapshot: ClinicSnapshot,
    settings: Vec<SettingRow>,
    cursors: PageCursors,
    help_visible: bool,
    status_token: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PageTable {
    title: String,
    headers: &'static [&'static str],
    rows: Vec<Vec<String>>,
    selected: Option<usize>,
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = refresh_view_data(runtime, &mut view_data) {
        tracing::warn!(error = %format!("{error:#}"), "initial load failed");
        state.dispatch(AppCommand::SetStatus(format!("load failed: {error:#}")));
    }
    tracing::info!(page = state.active_page.label(), "ui started");

    let mut result = Ok(());
    loop {
        process_internal_events(state, &view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        match next_input(event::poll(Duration::from_millis(120)), event::read) {
            Ok(Some(Event::Key(key))) => {
                if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                    break;
                }
            }
            Ok(_) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    tracing::info!("ui stopped");
    result
}

/// Reads one event when the poll says one is waiting. Errors come back to the
/// loop so the terminal is restored before they surface.
fn next_input(
    ready: io::Result<bool>,
    read: impl FnOnce() -> io::Result<Event>,
) -> Result<Option<Event>> {
    if !ready.context("poll event")? {
        return Ok(None);
    }
    read().context("read event").map(Some)
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if key.code == KeyCode::Char('b') && key.modifiers.contains(KeyModifiers::CONTROL) {
        dispatch_and_refresh(state, view_data, AppCommand::ToggleSidebar, internal_tx);
        return false;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
            emit_status(state, view_data, internal_tx, "help hidden");
        }
        return false;
    }

    match state.mode {
        AppMode::Search => {
            handle_search_key(state, view_data, internal_tx, key);
            false
        }
        AppMode::Nav => handle_nav_key(state, runtime, view_data, internal_tx, key),
    }
}

fn handle_search_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let command = match (key.code, key.modifiers) {
        (KeyCode::Esc | KeyCode::Enter, _) => AppCommand::ExitSearch,
        (KeyCode::Backspace, _) => AppCommand::SearchBackspace,
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            AppCommand::ClearSearch
        }
        (KeyCode::Char(ch), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            AppCommand::SearchInput(ch)
        }
        _ => return,
    };
    dispatch_and_refresh(state, view_data, command, internal_tx);
}

fn handle_nav_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return true,
        (KeyCode::Char('?'), _) => {
            view_data.help_visible = true;
            emit_status(state, view_data, internal_tx, "help open");
        }
        (KeyCode::Tab, _) | (KeyCode::Char('f'), KeyModifiers::NONE) => {
            dispatch_and_refresh(state, view_data, AppCommand::NextPage, internal_tx);
        }
        (KeyCode::BackTab, _) | (KeyCode::Char('b'), KeyModifiers::NONE) => {
            dispatch_and_refresh(state, view_data, AppCommand::PrevPage, internal_tx);
        }
        (KeyCode::Char(ch @ '1'..='9'), KeyModifiers::NONE) => {
            let index = usize::from(ch as u8 - b'1');
            if let Some(page) = Page::ALL.get(index) {
                dispatch_and_refresh(state, view_data, AppCommand::GoTo(*page), internal_tx);
            }
        }
        (KeyCode::Char('/'), _) => {
            dispatch_and_refresh(state, view_data, AppCommand::EnterSearch, internal_tx);
        }
        (KeyCode::Char('j') | KeyCode::Down, _) => move_cursor(state, view_data, 1),
        (KeyCode::Char('k') | KeyCode::Up, _) => move_cursor(state, view_data, -1),
        (KeyCode::Char('g') | KeyCode::Home, _) => move_cursor(state, view_data, isize::MIN),
        (KeyCode::Char('G') | KeyCode::End, _) => move_cursor(state, view_data, isize::MAX),
        (KeyCode::Enter, _) => select_row_under_cursor(state, view_data, internal_tx),
        (KeyCode::Esc, _) => {
            state.dispatch(AppCommand::ClearStatus);
        }
        (KeyCode::Char('r'), KeyModifiers::NONE) => reload(state, runtime, view_data, internal_tx),
        (KeyCode::Char(verb @ ('a' | 'e' | 'x')), KeyModifiers::NONE) => {
            let status = inert_action_status(state.active_page, verb);
            emit_status(state, view_data, internal_tx, status);
        }
        _ => handle_page_key(state, view_data, internal_tx, key),
    }
    false
}

fn handle_page_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let command = match (state.active_page, key.code) {
        (Page::Appointments, KeyCode::Char('h') | KeyCode::Left) => {
            AppCommand::NavigateDate(NavDirection::Prev)
        }
        (Page::Appointments, KeyCode::Char('l') | KeyCode::Right) => {
            AppCommand::NavigateDate(NavDirection::Next)
        }
        (Page::Appointments, KeyCode::Char('d')) => AppCommand::SetGranularity(Granularity::Day),
        (Page::Appointments, KeyCode::Char('w')) => AppCommand::SetGranularity(Granularity::Week),
        (Page::Appointments, KeyCode::Char('m')) => {
            AppCommand::SetGranularity(Granularity::Month)
        }
        (Page::Appointments, KeyCode::Char('t')) => AppCommand::JumpToReferenceDate,
        (Page::Staff, KeyCode::Char('t')) => AppCommand::NextStaffGroup,
        (Page::Staff, KeyCode::Char('s')) => {
            AppCommand::SetSpecialty(next_specialty(state, &view_data.snapshot))
        }
        _ => return,
    };
    dispatch_and_refresh(state, view_data, command, internal_tx);
}

/// Cycles the specialty chip: all, then each specialty in order, then all.
fn next_specialty(state: &AppState, snapshot: &ClinicSnapshot) -> Option<String> {
    let specialties = medicare_app::filter::specialties(&snapshot.doctors);
    match &state.staff.specialty {
        None => specialties.first().cloned(),
        Some(current) => specialties
            .iter()
            .position(|specialty| specialty == current)
            .and_then(|index| specialties.get(index + 1))
            .cloned(),
    }
}

fn inert_action_status(page: Page, verb: char) -> String {
    let action = match verb {
        'a' => "add",
        'e' => "edit",
        _ => "delete",
    };
    let noun = match page {
        Page::Patients => "patient",
        Page::Appointments => "appointment",
        Page::Staff => "staff member",
        Page::Dashboard | Page::Settings => return "records are read-only".to_owned(),
    };
    format!("{action} {noun} unavailable: records are read-only")
}

fn reload<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    match refresh_view_data(runtime, view_data) {
        Ok(()) => {
            clamp_cursors(state, view_data);
            let status = format!(
                "reloaded {} patients, {} appointments",
                view_data.snapshot.patients.len(),
                view_data.snapshot.appointments.len()
            );
            emit_status(state, view_data, internal_tx, status);
        }
        Err(error) => {
            tracing::warn!(error = %format!("{error:#}"), "reload failed");
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("load failed: {error:#}"),
            );
        }
    }
}

fn refresh_view_data<R: AppRuntime>(runtime: &mut R, view_data: &mut ViewData) -> Result<()> {
    view_data.settings = runtime.settings();
    view_data.snapshot = runtime.load_snapshot()?;
    Ok(())
}

fn dispatch_and_refresh(
    state: &mut AppState,
    view_data: &mut ViewData,
    command: AppCommand,
    internal_tx: &Sender<InternalEvent>,
) {
    let events = state.dispatch(command);
    for event in &events {
        match event {
            AppEvent::PageChanged(page) => {
                view_data.cursors = PageCursors::default();
                tracing::debug!(page = page.label(), route = page.route(), "page changed");
            }
            AppEvent::SidebarToggled { collapsed } => {
                tracing::debug!(collapsed, "sidebar toggled");
            }
            AppEvent::DateChanged(date) => {
                tracing::debug!(%date, "schedule date changed");
            }
            _ => {}
        }
    }
    if should_clamp_cursors(&events) {
        clamp_cursors(state, view_data);
    }
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
}

fn should_clamp_cursors(events: &[AppEvent]) -> bool {
    events.iter().any(|event| {
        matches!(
            event,
            AppEvent::QueryChanged { .. }
                | AppEvent::DateChanged(_)
                | AppEvent::GranularityChanged(_)
                | AppEvent::StaffGroupChanged(_)
                | AppEvent::SpecialtyChanged(_)
        )
    })
}

fn row_count(state: &AppState, view_data: &ViewData) -> usize {
    let snapshot = &view_data.snapshot;
    match state.active_page {
        Page::Dashboard => 0,
        Page::Patients => patients_view(snapshot, &state.patients).rows.len(),
        Page::Appointments => appointments_view(snapshot, &state.appointments)
            .map(|view| view.rows.len())
            .unwrap_or(0),
        Page::Staff => staff_view(snapshot, &state.staff).rows.len(),
        Page::Settings => view_data.settings.len(),
    }
}

fn active_cursor<'a>(state: &AppState, view_data: &'a mut ViewData) -> Option<&'a mut usize> {
    match state.active_page {
        Page::Dashboard => None,
        Page::Patients => Some(&mut view_data.cursors.patients),
        Page::Appointments => Some(&mut view_data.cursors.appointments),
        Page::Staff => Some(&mut view_data.cursors.staff),
        Page::Settings => Some(&mut view_data.cursors.settings),
    }
}

fn move_cursor(state: &AppState, view_data: &mut ViewData, delta: isize) {
    let count = row_count(state, view_data);
    let Some(cursor) = active_cursor(state, view_data) else {
        return;
    };
    if count == 0 {
        *cursor = 0;
        return;
    }
    let last = count - 1;
    *cursor = match delta {
        isize::MIN => 0,
        isize::MAX => last,
        delta if delta < 0 => cursor.saturating_sub(delta.unsigned_abs()),
        delta => cursor.saturating_add(delta as usize).min(last),
    };
}

fn clamp_cursors(state: &AppState, view_data: &mut ViewData) {
    let count = row_count(state, view_data);
    if let Some(cursor) = active_cursor(state, view_data) {
        *cursor = (*cursor).min(count.saturating_sub(1));
    }
}

fn select_row_under_cursor(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let snapshot = &view_data.snapshot;
    let cursors = view_data.cursors;
    let command = match state.active_page {
        Page::Patients => patients_view(snapshot, &state.patients)
            .rows
            .get(cursors.patients)
            .map(|patient| AppCommand::SelectPatient(patient.id)),
        Page::Appointments => appointments_view(snapshot, &state.appointments)
            .ok()
            .and_then(|view| view.rows.get(cursors.appointments).map(|row| row.id))
            .map(AppCommand::SelectAppointment),
        Page::Staff => staff_view(snapshot, &state.staff)
            .rows
            .get(cursors.staff)
            .map(|member| AppCommand::SelectStaff(member.id)),
        Page::Dashboard | Page::Settings => return,
    };
    match command {
        Some(command) => dispatch_and_refresh(state, view_data, command, internal_tx),
        None => emit_status(state, view_data, internal_tx, "no row under cursor"),
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let sidebar_width = if state.sidebar_collapsed {
        SIDEBAR_COLLAPSED_WIDTH
    } else {
        SIDEBAR_WIDTH
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(20)])
        .split(frame.area());

    let sidebar = Paragraph::new(render_sidebar_text(state)).block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(sidebar, columns[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(columns[1]);

    let header = Paragraph::new(page_header_text(state))
        .block(Block::default().borders(Borders::ALL).title(BRAND));
    frame.render_widget(header, rows[0]);

    render_page(frame, rows[1], state, view_data);

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, rows[2]);

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_page(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState, view_data: &ViewData) {
    let snapshot = &view_data.snapshot;
    match state.active_page {
        Page::Dashboard => {
            let view = dashboard_view(snapshot, state.reference_date);
            let body = Paragraph::new(render_dashboard_text(&view))
                .block(Block::default().borders(Borders::ALL).title("overview"));
            frame.render_widget(body, area);
        }
        Page::Patients => {
            let view = patients_view(snapshot, &state.patients);
            render_list_and_detail(
                frame,
                area,
                &patients_table(&view),
                view_data.cursors.patients,
                render_patient_detail_text(&view),
            );
        }
        Page::Appointments => match appointments_view(snapshot, &state.appointments) {
            Ok(view) => {
                let halves = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                    .split(area);
                let schedule = Paragraph::new(render_schedule_text(&view))
                    .wrap(Wrap { trim: false })
                    .block(Block::default().borders(Borders::ALL).title(view.heading.clone()));
                frame.render_widget(schedule, halves[0]);
                render_list_and_detail(
                    frame,
                    halves[1],
                    &appointments_table(&view),
                    view_data.cursors.appointments,
                    render_appointment_detail_text(&view),
                );
            }
            Err(error) => {
                let message = Paragraph::new(format!("schedule unavailable: {error:#}"))
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(message, area);
            }
        },
        Page::Staff => {
            let view = staff_view(snapshot, &state.staff);
            let halves = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(4), Constraint::Min(1)])
                .split(area);
            let chips = Paragraph::new(render_staff_tabs_text(&view))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(chips, halves[0]);
            render_list_and_detail(
                frame,
                halves[1],
                &staff_table(&view),
                view_data.cursors.staff,
                render_staff_detail_text(&view),
            );
        }
        Page::Settings => {
            render_table(
                frame,
                area,
                &settings_table(&view_data.settings),
                view_data.cursors.settings,
            );
        }
    }
}

fn render_list_and_detail(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    table: &PageTable,
    cursor: usize,
    detail: String,
) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);
    render_table(frame, halves[0], table, cursor);
    let detail = Paragraph::new(detail)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("details"));
    frame.render_widget(detail, halves[1]);
}

fn render_table(frame: &mut ratatui::Frame<'_>, area: Rect, table: &PageTable, cursor: usize) {
    let widths = std::iter::once(Constraint::Length(2))
        .chain(table.headers.iter().map(|_| Constraint::Min(6)))
        .collect::<Vec<_>>();

    let header = Row::new(
        std::iter::once(String::new())
            .chain(table.headers.iter().map(|label| (*label).to_owned()))
            .map(|label| {
                Cell::from(label).style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
            }),
    );

    let rows = table.rows.iter().enumerate().map(|(index, cells)| {
        let mark = if table.selected == Some(index) {
            SELECTED_MARK
        } else {
            ""
        };
        let style = if index == cursor {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new(
            std::iter::once(mark.to_owned())
                .chain(cells.iter().cloned())
                .map(Cell::from),
        )
        .style(style)
    });

    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(table.title.clone())
                .borders(Borders::ALL),
        );
    frame.render_widget(widget, area);
}

fn render_sidebar_text(state: &AppState) -> String {
    let mut lines = Vec::new();
    if state.sidebar_collapsed {
        lines.push("✚".to_owned());
        lines.push(String::new());
        for page in Page::ALL {
            let marker = if page == state.active_page {
                CURSOR_MARK
            } else {
                " "
            };
            lines.push(format!("{marker}{}", page.icon()));
        }
        return lines.join("\n");
    }

    lines.push(format!("✚ {BRAND}"));
    lines.push(format!("  {BRAND_TAGLINE}"));
    lines.push(String::new());
    for (index, page) in Page::ALL.iter().enumerate() {
        let marker = if *page == state.active_page {
            CURSOR_MARK
        } else {
            " "
        };
        lines.push(format!(
            "{marker} {} {:<13}{}",
            page.icon(),
            page.label(),
            index + 1
        ));
    }
    lines.push(String::new());
    lines.push(SIGNED_IN_NAME.to_owned());
    lines.push(SIGNED_IN_ROLE.to_owned());
    lines.join("\n")
}

fn page_header_text(state: &AppState) -> String {
    let (title, subtitle) = match state.active_page {
        Page::Dashboard => (
            "Dashboard",
            "Welcome back, Dr. Johnson. Here's what's happening at your clinic today.",
        ),
        Page::Patients => ("Patient Management", "Manage patient records and information"),
        Page::Appointments => (
            "Appointment Scheduling",
            "Manage and schedule patient appointments",
        ),
        Page::Staff => ("Staff Management", "Manage doctors, nurses, and administrative staff"),
        Page::Settings => ("Settings", "Effective configuration for this session"),
    };
    let second = match state.active_query() {
        Some(query) if state.mode == AppMode::Search => format!("search: {query}_"),
        Some(query) if !query.is_empty() => format!("search: {query}"),
        _ => subtitle.to_owned(),
    };
    format!("{title}\n{second}")
}

fn render_dashboard_text(view: &DashboardView<'_>) -> String {
    let stats = view.stats;
    let mut lines = vec![
        format!(
            "patients: {} ({} active)   appointments today: {}   staff available: {}/{}",
            stats.total_patients,
            stats.active_patients,
            stats.appointments_today,
            stats.staff_available,
            stats.staff_total
        ),
        String::new(),
        "Today's Appointments".to_owned(),
    ];
    if view.todays_appointments.is_empty() {
        lines.push("  no appointments scheduled".to_owned());
    }
    for appointment in &view.todays_appointments {
        lines.push(format!(
            "  {}  {:<16} {:<20} {:<16} {}",
            calendar::format_clock(appointment.time),
            appointment.patient,
            appointment.doctor,
            appointment.kind,
            status_label(appointment.status)
        ));
    }
    lines.push(String::new());
    lines.push("Recent Activity".to_owned());
    if view.recent_activity.is_empty() {
        lines.push("  nothing yet".to_owned());
    }
    for activity in &view.recent_activity {
        lines.push(format!(
            "  {} - {} ({})",
            activity.action,
            activity.actor,
            activity.relative_time()
        ));
    }
    lines.join("\n")
}

fn patients_table(view: &PatientsView<'_>) -> PageTable {
    let selected = view.detail.record().map(|patient| patient.id);
    PageTable {
        title: format!("patients {}/{}", view.rows.len(), view.total),
        headers: &["Name", "Contact", "Age", "Last Visit", "Status"],
        rows: view
            .rows
            .iter()
            .map(|patient| {
                vec![
                    patient.name.clone(),
                    patient.phone.clone(),
                    patient.age.to_string(),
                    format_date(patient.last_visit),
                    patient.status.as_str().to_owned(),
                ]
            })
            .collect(),
        selected: view
            .rows
            .iter()
            .position(|patient| Some(patient.id) == selected),
    }
}

fn render_patient_detail_text(view: &PatientsView<'_>) -> String {
    let SelectionView::Selected(patient) = view.detail else {
        return "Select a Patient\nChoose a patient from the list to view their details".to_owned();
    };
    let mut lines = vec![
        patient.name.clone(),
        format!("{} years old - {}", patient.age, patient.gender.as_str()),
        String::new(),
        format!("email: {}", patient.email),
        format!("phone: {}", patient.phone),
        format!("last visit: {}", format_date(patient.last_visit)),
        format!(
            "next appointment: {}",
            patient
                .next_appointment
                .map_or_else(|| "Not scheduled".to_owned(), format_date)
        ),
        format!("status: {}", patient.status.as_str()),
        String::new(),
        "Medical History".to_owned(),
    ];
    if patient.medical_history.is_empty() {
        lines.push("  none recorded".to_owned());
    }
    lines.extend(
        patient
            .medical_history
            .iter()
            .map(|condition| format!("  - {condition}")),
    );
    lines.join("\n")
}

fn appointments_table(view: &AppointmentsView<'_>) -> PageTable {
    let selected = view.detail.record().map(|appointment| appointment.id);
    let show_date = view.granularity != Granularity::Day;
    PageTable {
        title: format!("appointments {}", view.rows.len()),
        headers: &["When", "Patient", "Doctor", "Type", "Status"],
        rows: view
            .rows
            .iter()
            .map(|appointment| {
                let when = if show_date {
                    format!(
                        "{} {}",
                        format_date(appointment.date),
                        calendar::format_clock(appointment.time)
                    )
                } else {
                    calendar::format_clock(appointment.time)
                };
                vec![
                    when,
                    appointment.patient.clone(),
                    appointment.doctor.clone(),
                    appointment.kind.clone(),
                    status_label(appointment.status).to_owned(),
                ]
            })
            .collect(),
        selected: view
            .rows
            .iter()
            .position(|appointment| Some(appointment.id) == selected),
    }
}

fn render_schedule_text(view: &AppointmentsView<'_>) -> String {
    let summary = view.summary;
    let views = Granularity::ALL
        .iter()
        .map(|granularity| {
            if *granularity == view.granularity {
                format!("[{}]", granularity.label())
            } else {
                granularity.label().to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let mut lines = vec![
        format!(
            "view: {views}   total {}  completed {}  scheduled {}  pending {}  cancelled {}",
            summary.total,
            summary.completed,
            summary.scheduled,
            summary.pending,
            summary.cancelled
        ),
        String::new(),
    ];

    let slot_lines = view
        .slots
        .iter()
        .map(|slot| match slot.appointment {
            Some(appointment) => format!(
                "{}  {} with {} ({}, {} min)",
                calendar::format_clock(slot.time),
                appointment.patient,
                appointment.doctor,
                appointment.kind,
                appointment.duration_minutes
            ),
            None => format!("{}  -", calendar::format_clock(slot.time)),
        })
        .collect::<Vec<_>>();

    let doctor_lines = view
        .doctors
        .iter()
        .map(|doctor| {
            format!(
                "{} {} ({})",
                availability_mark(doctor.availability),
                doctor.name,
                doctor.availability.as_str()
            )
        })
        .collect::<Vec<_>>();

    let rows = slot_lines.len().max(doctor_lines.len());
    for index in 0..rows {
        let left = slot_lines.get(index).map_or("", String::as_str);
        let right = doctor_lines.get(index).map_or("", String::as_str);
        lines.push(format!("{left:<52}{right}").trim_end().to_owned());
    }
    lines.join("\n")
}

fn render_appointment_detail_text(view: &AppointmentsView<'_>) -> String {
    let SelectionView::Selected(appointment) = view.detail else {
        return "Select an Appointment\nChoose an appointment from the list to view its details"
            .to_owned();
    };
    let mut lines = vec![
        format!("{} with {}", appointment.patient, appointment.doctor),
        format!(
            "{} at {} for {} min",
            format_date(appointment.date),
            calendar::format_clock(appointment.time),
            appointment.duration_minutes
        ),
        format!("type: {}", appointment.kind),
        format!("status: {}", status_label(appointment.status)),
    ];
    if !appointment.notes.is_empty() {
        lines.push(String::new());
        lines.push(appointment.notes.clone());
    }
    lines.join("\n")
}

fn render_staff_tabs_text(view: &StaffView<'_>) -> String {
    let tabs = view
        .counts
        .iter()
        .map(|(group, count)| {
            let label = format!("{} ({count})", group.label());
            if *group == view.group {
                format!("[{label}]")
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join("  ");

    let chips = if view.group == StaffGroup::Doctors {
        std::iter::once(("All", view.specialty.is_none()))
            .chain(view.specialties.iter().map(|specialty| {
                (
                    specialty.as_str(),
                    view.specialty.as_deref() == Some(specialty.as_str()),
                )
            }))
            .map(|(label, active)| {
                if active {
                    format!("[{label}]")
                } else {
                    label.to_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        String::new()
    };
    format!("{tabs}\n{chips}")
}

fn staff_table(view: &StaffView<'_>) -> PageTable {
    let selected = view.detail.record().map(|member| member.id);
    let headers: &'static [&'static str] = match view.group {
        StaffGroup::Doctors => &["Name", "Specialty", "Availability", "Experience"],
        StaffGroup::Nurses | StaffGroup::Admin => &["Name", "Title", "Availability", "Experience"],
    };
    PageTable {
        title: format!("{} {}", view.group.label().to_ascii_lowercase(), view.rows.len()),
        headers,
        rows: view
            .rows
            .iter()
            .map(|member| {
                vec![
                    member.name.clone(),
                    member.headline().to_owned(),
                    member.availability.as_str().to_owned(),
                    member.experience.clone(),
                ]
            })
            .collect(),
        selected: view
            .rows
            .iter()
            .position(|member| Some(member.id) == selected),
    }
}

fn render_staff_detail_text(view: &StaffView<'_>) -> String {
    let SelectionView::Selected(member) = view.detail else {
        return "Select a Staff Member\nChoose someone from the list to view their details"
            .to_owned();
    };
    let mut lines = vec![
        member.name.clone(),
        member.headline().to_owned(),
        format!(
            "{} {}",
            availability_mark(member.availability),
            member.availability.as_str()
        ),
        String::new(),
        format!("email: {}", member.email),
        format!("phone: {}", member.phone),
        format!("department: {}", member.department),
        format!("experience: {}", member.experience),
        format!("schedule: {}", member.schedule),
    ];
    if let StaffRole::Doctor(profile) = &member.role {
        lines.push(format!(
            "patients: {}   rating: {:.1}",
            profile.patient_count, profile.rating
        ));
    }
    if !member.qualifications.is_empty() {
        lines.push(String::new());
        lines.push("Qualifications".to_owned());
        lines.extend(
            member
                .qualifications
                .iter()
                .map(|qualification| format!("  - {qualification}")),
        );
    }
    lines.join("\n")
}

fn settings_table(settings: &[SettingRow]) -> PageTable {
    PageTable {
        title: "settings (read-only)".to_owned(),
        headers: &["Setting", "Value"],
        rows: settings
            .iter()
            .map(|row| vec![row.label.clone(), row.value.clone()])
            .collect(),
        selected: None,
    }
}

fn status_label(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Scheduled => "Scheduled",
        AppointmentStatus::Completed => "Completed",
        AppointmentStatus::Pending => "Pending",
        AppointmentStatus::Cancelled => "Cancelled",
    }
}

fn availability_mark(availability: Availability) -> &'static str {
    match availability {
        Availability::Available => "+",
        Availability::InSurgery => "~",
        Availability::OnLeave => "-",
    }
}

fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ctrl+b sidebar | ? help\n\
nav: tab/f next page | shift+tab/b prev page | 1-5 jump | q quit\n\
nav: j/k move | g/G top/bottom | enter select | / search | r reload | esc clear status\n\
search: type to filter | backspace | ctrl+u clear | enter/esc done\n\
appointments: h/l prev/next | d/w/m day/week/month | t reference date\n\
staff: t next group | s next specialty\n\
records: a add | e edit | x delete (read-only)"
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }

    let mode = match state.mode {
        AppMode::Nav => "NAV",
        AppMode::Search => "SEARCH",
    };
    let default = match (state.mode, state.active_page) {
        (AppMode::Search, _) => "type to filter | ctrl+u clear | enter/esc done".to_owned(),
        (AppMode::Nav, Page::Appointments) => {
            "h/l date | d/w/m view | t today | / search | enter select | ? help | q quit".to_owned()
        }
        (AppMode::Nav, Page::Staff) => {
            "t group | s specialty | / search | enter select | ? help | q quit".to_owned()
        }
        (AppMode::Nav, Page::Patients) => {
            "j/k move | / search | enter select | ? help | q quit".to_owned()
        }
        (AppMode::Nav, Page::Dashboard | Page::Settings) => {
            "tab/b pages | 1-5 jump | ctrl+b sidebar | ? help | q quit".to_owned()
        }
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {default}"),
        None => format!("{mode} | {default}"),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
