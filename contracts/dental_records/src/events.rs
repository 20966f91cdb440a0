use crate::appointment::{Appointment, AppointmentStatus};
use crate::rbac::Role;
use crate::ClinicConfig;
use soroban_sdk::{symbol_short, Address, Env, String};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Event published when demo records are written.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DemoDataLoadedEvent {
    pub patients: u32,
    pub appointments: u32,
    pub timestamp: u64,
}

/// Event published when the clinic configuration changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdatedEvent {
    pub config: ClinicConfig,
    pub timestamp: u64,
}

/// Event published on a successful login.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoggedInEvent {
    pub user_id: String,
    pub role: Role,
    pub timestamp: u64,
}

/// Event published when the session is cleared.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoggedOutEvent {
    pub user_id: Option<String>,
    pub timestamp: u64,
}

/// Event published when a user changes their credentials.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountUpdatedEvent {
    pub user_id: String,
    pub timestamp: u64,
}

/// Event published when a patient record is created or replaced.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientSavedEvent {
    pub patient_id: String,
    pub created: bool,
    pub timestamp: u64,
}

/// Event published when a patient record is removed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientDeletedEvent {
    pub patient_id: String,
    pub timestamp: u64,
}

/// Event published when an appointment is created or replaced.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppointmentSavedEvent {
    pub appointment_id: String,
    pub patient_id: String,
    pub appointment_date: u64,
    pub status: AppointmentStatus,
    pub created: bool,
    pub timestamp: u64,
}

/// Event published when an appointment is removed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppointmentDeletedEvent {
    pub appointment_id: String,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_demo_data_loaded(env: &Env, patients: u32, appointments: u32) {
    let topics = (symbol_short!("DEMO"),);
    let data = DemoDataLoadedEvent {
        patients,
        appointments,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_config_updated(env: &Env, config: ClinicConfig) {
    let topics = (symbol_short!("CFG_UPD"),);
    let data = ConfigUpdatedEvent {
        config,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_logged_in(env: &Env, user_id: String, role: Role) {
    let topics = (symbol_short!("LOGIN"), user_id.clone());
    let data = LoggedInEvent {
        user_id,
        role,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_logged_out(env: &Env, user_id: Option<String>) {
    let topics = (symbol_short!("LOGOUT"),);
    let data = LoggedOutEvent {
        user_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_account_updated(env: &Env, user_id: String) {
    let topics = (symbol_short!("ACC_UPD"), user_id.clone());
    let data = AccountUpdatedEvent {
        user_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_patient_saved(env: &Env, patient_id: String, created: bool) {
    let topics = (symbol_short!("PAT_SAVE"), patient_id.clone());
    let data = PatientSavedEvent {
        patient_id,
        created,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_patient_deleted(env: &Env, patient_id: String) {
    let topics = (symbol_short!("PAT_DEL"), patient_id.clone());
    let data = PatientDeletedEvent {
        patient_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_appointment_saved(env: &Env, appointment: &Appointment, created: bool) {
    let topics = (
        symbol_short!("APPT_SAVE"),
        appointment.id.clone(),
        appointment.patient_id.clone(),
    );
    let data = AppointmentSavedEvent {
        appointment_id: appointment.id.clone(),
        patient_id: appointment.patient_id.clone(),
        appointment_date: appointment.appointment_date,
        status: appointment.status,
        created,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_appointment_deleted(env: &Env, appointment_id: String) {
    let topics = (symbol_short!("APPT_DEL"), appointment_id.clone());
    let data = AppointmentDeletedEvent {
        appointment_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
