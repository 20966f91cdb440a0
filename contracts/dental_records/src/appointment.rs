use soroban_sdk::{contracttype, log, Bytes, Env, String, Vec};

use crate::patient::{self, Patient};
use crate::{events, storage, validation, ClinicConfig, ContractError};

/// Every appointment occupies the schedule for this long from its start.
pub const APPOINTMENT_WINDOW_SECS: u64 = 30 * 60;

// ── Types ─────────────────────────────────────────────────────

/// Status of an appointment
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AppointmentStatus {
    Pending = 1,
    Completed = 2,
    Cancelled = 3,
    Rescheduled = 4,
}

impl AppointmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Rescheduled => "Rescheduled",
        }
    }
}

/// A file attached to an appointment, stored inline
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attachment {
    pub id: String, // Empty on upload, assigned on save
    pub name: String,
    pub mime_type: String,
    pub size: u32,
    pub data: Bytes,
    pub uploaded_at: u64, // 0 on upload, stamped on save
}

/// An appointment (incident) record
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub title: String,
    pub description: String,
    pub comments: String,
    pub appointment_date: u64,
    pub next_appointment_date: Option<u64>,
    pub treatment: Option<String>,
    pub cost: i128, // minor currency units
    pub status: AppointmentStatus,
    pub files: Vec<Attachment>,
}

/// Appointment fields as submitted by the add/edit form
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppointmentInput {
    pub patient_id: String,
    pub title: String,
    pub description: String,
    pub comments: String,
    pub appointment_date: u64,
    pub next_appointment_date: Option<u64>,
    pub treatment: Option<String>,
    pub cost: i128,
    pub status: AppointmentStatus,
    pub files: Vec<Attachment>,
}

impl AppointmentInput {
    fn into_appointment(self, id: String, files: Vec<Attachment>) -> Appointment {
        Appointment {
            id,
            patient_id: self.patient_id,
            title: self.title,
            description: self.description,
            comments: self.comments,
            appointment_date: self.appointment_date,
            next_appointment_date: self.next_appointment_date,
            treatment: self.treatment,
            cost: self.cost,
            status: self.status,
            files,
        }
    }
}

/// An appointment together with the display name of its patient
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppointmentView {
    pub appointment: Appointment,
    pub patient_name: String,
}

/// A calendar block for one appointment window
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: u64,
    pub end: u64,
}

// ── Scheduling windows ────────────────────────────────────────

pub fn window_end(start: u64) -> u64 {
    start.saturating_add(APPOINTMENT_WINDOW_SECS)
}

/// Half-open overlap of `[a, a + 30min)` and `[b, b + 30min)`.
pub fn windows_overlap(a: u64, b: u64) -> bool {
    a < window_end(b) && b < window_end(a)
}

/// First stored appointment, other than `exclude`, whose window overlaps a
/// window starting at `start`.
pub fn find_conflict(
    appointments: &Vec<Appointment>,
    start: u64,
    exclude: Option<&String>,
) -> Option<Appointment> {
    appointments
        .iter()
        .find(|a| Some(&a.id) != exclude && windows_overlap(a.appointment_date, start))
}

pub fn find_index(appointments: &Vec<Appointment>, id: &String) -> Option<u32> {
    appointments
        .iter()
        .position(|a| a.id == *id)
        .map(|i| i as u32)
}

// ── Repository operations ─────────────────────────────────────

/// Creates an appointment (`existing_id` is `None`) or replaces the one with
/// that id, provided its window is free.
///
/// On rejection nothing is written. On success the `incidents` collection is
/// written exactly once.
pub fn upsert_appointment(
    env: &Env,
    config: &ClinicConfig,
    candidate: AppointmentInput,
    existing_id: Option<String>,
) -> Result<Appointment, ContractError> {
    validation::validate_appointment(&candidate, config)?;

    let mut appointments = storage::load_appointments(env);

    let index = match &existing_id {
        Some(id) => Some(find_index(&appointments, id).ok_or(ContractError::AppointmentNotFound)?),
        None => None,
    };

    if let Some(other) = find_conflict(
        &appointments,
        candidate.appointment_date,
        existing_id.as_ref(),
    ) {
        log!(
            env,
            "appointment window taken",
            other.id,
            other.appointment_date,
            candidate.appointment_date
        );
        return Err(ContractError::SchedulingConflict);
    }

    let files = stamp_attachments(
        env,
        &appointments,
        candidate.files.clone(),
        existing_id.as_ref(),
    );

    let (appointment, created) = match (existing_id, index) {
        (Some(id), Some(index)) => {
            let appointment = candidate.into_appointment(id, files);
            appointments.set(index, appointment.clone());
            (appointment, false)
        }
        _ => {
            let id = storage::next_appointment_id(env, &appointments);
            let appointment = candidate.into_appointment(id, files);
            appointments.push_back(appointment.clone());
            (appointment, true)
        }
    };

    storage::save_appointments(env, &appointments);
    events::publish_appointment_saved(env, &appointment, created);

    Ok(appointment)
}

/// Gives fresh uploads an id and upload time, and records their real size.
///
/// A supplied id is kept only for its first use in `files` and only if no
/// other stored appointment holds it; otherwise the file gets a new id.
fn stamp_attachments(
    env: &Env,
    appointments: &Vec<Appointment>,
    files: Vec<Attachment>,
    editing: Option<&String>,
) -> Vec<Attachment> {
    let now = env.ledger().timestamp();

    let mut reserved: Vec<String> = Vec::new(env);
    for file in files.iter() {
        if !file.id.is_empty()
            && !reserved.contains(&file.id)
            && !attachment_held_elsewhere(appointments, &file.id, editing)
        {
            reserved.push_back(file.id);
        }
    }

    let mut kept: Vec<String> = Vec::new(env);
    let mut stamped = Vec::new(env);
    for mut file in files.iter() {
        if reserved.contains(&file.id) && !kept.contains(&file.id) {
            kept.push_back(file.id.clone());
        } else {
            file.id = storage::next_file_id(env, appointments, &reserved);
            reserved.push_back(file.id.clone());
        }
        if file.uploaded_at == 0 {
            file.uploaded_at = now;
        }
        file.size = file.data.len();
        stamped.push_back(file);
    }

    stamped
}

fn attachment_held_elsewhere(
    appointments: &Vec<Appointment>,
    file_id: &String,
    editing: Option<&String>,
) -> bool {
    appointments
        .iter()
        .filter(|a| Some(&a.id) != editing)
        .any(|a| a.files.iter().any(|f| f.id == *file_id))
}

pub fn delete_appointment(env: &Env, id: String) -> Result<(), ContractError> {
    let mut appointments = storage::load_appointments(env);
    let index = find_index(&appointments, &id).ok_or(ContractError::AppointmentNotFound)?;

    appointments.remove(index);
    storage::save_appointments(env, &appointments);
    events::publish_appointment_deleted(env, id);

    Ok(())
}

pub fn get_appointment(env: &Env, id: &String) -> Result<Appointment, ContractError> {
    storage::load_appointments(env)
        .iter()
        .find(|a| a.id == *id)
        .ok_or(ContractError::AppointmentNotFound)
}

/// Joins each appointment with its patient's name.
pub fn to_views(
    env: &Env,
    appointments: &Vec<Appointment>,
    patients: &Vec<Patient>,
) -> Vec<AppointmentView> {
    let mut views = Vec::new(env);
    for appointment in appointments.iter() {
        let patient_name = patient::patient_name(env, patients, &appointment.patient_id);
        views.push_back(AppointmentView {
            appointment,
            patient_name,
        });
    }
    views
}

/// Appointments whose window intersects `[from, to)`, as calendar blocks.
pub fn calendar_events(
    env: &Env,
    appointments: &Vec<Appointment>,
    from: u64,
    to: u64,
) -> Vec<CalendarEvent> {
    let mut blocks = Vec::new(env);
    for appointment in appointments.iter() {
        let start = appointment.appointment_date;
        let end = window_end(start);
        if start < to && from < end {
            blocks.push_back(CalendarEvent {
                id: appointment.id,
                title: appointment.title,
                start,
                end,
            });
        }
    }
    blocks
}
