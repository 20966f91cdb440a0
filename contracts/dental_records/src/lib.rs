#![no_std]
pub mod appointment;
mod auth;
pub mod dashboard;
mod events;
pub mod patient;
pub mod rbac;
mod search;
mod seed;
pub mod storage;
pub mod validation;

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Env, String,
    Symbol, Vec,
};

/// Storage keys for the contract
const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");

const CONTRACT_VERSION: u32 = 3;

pub use appointment::{
    Appointment, AppointmentInput, AppointmentStatus, AppointmentView, Attachment, CalendarEvent,
};
pub use dashboard::{DashboardSummary, PatientAppointmentCount, StatusBreakdown, TreatmentRevenue};
pub use patient::{Patient, PatientInput, PatientProfile, ProfileRecord};
pub use rbac::{Permission, Role, User};

/// Runtime limits for appointment attachments
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClinicConfig {
    pub max_attachments: u32,
    pub max_attachment_bytes: u32,
}

impl ClinicConfig {
    pub fn default_config() -> Self {
        ClinicConfig {
            max_attachments: 10,
            max_attachment_bytes: 65_536,
        }
    }
}

/// Contract errors
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    NotAuthenticated = 4,
    InvalidCredentials = 5,
    InvalidInput = 6,
    InvalidEmail = 7,
    InvalidDate = 8,
    MissingAppointmentDate = 9,
    NegativeCost = 10,
    TooManyAttachments = 11,
    AttachmentTooLarge = 12,
    SchedulingConflict = 13,
    DuplicateEmail = 14,
    PatientNotFound = 15,
    AppointmentNotFound = 16,
    UserNotFound = 17,
}

fn require_initialized(env: &Env) -> Result<(), ContractError> {
    if !env.storage().instance().has(&INITIALIZED) {
        return Err(ContractError::NotInitialized);
    }
    Ok(())
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    let admin: Address = env
        .storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)?;
    if *caller != admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn load_config(env: &Env) -> ClinicConfig {
    env.storage()
        .instance()
        .get(&CONFIG)
        .unwrap_or(ClinicConfig::default_config())
}

#[contract]
pub struct DentalRecordsContract;

#[contractimpl]
impl DentalRecordsContract {
    /// Initialize the contract with an admin address and the demo accounts
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage()
            .instance()
            .set(&CONFIG, &ClinicConfig::default_config());

        if !storage::has_users(&env) {
            storage::save_users(&env, &seed::demo_users(&env));
        }

        events::publish_initialized(&env, admin);

        Ok(())
    }

    /// Get the admin address
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_config(env: Env) -> Result<ClinicConfig, ContractError> {
        require_initialized(&env)?;
        Ok(load_config(&env))
    }

    pub fn set_config(env: Env, caller: Address, config: ClinicConfig) -> Result<(), ContractError> {
        require_admin(&env, &caller)?;
        if config.max_attachments == 0 || config.max_attachment_bytes == 0 {
            return Err(ContractError::InvalidInput);
        }

        env.storage().instance().set(&CONFIG, &config);
        events::publish_config_updated(&env, config);

        Ok(())
    }

    /// Seed demo patients and appointments. Collections that already exist,
    /// even empty ones, are left alone.
    pub fn load_demo_data(env: Env, caller: Address) -> Result<(), ContractError> {
        require_admin(&env, &caller)?;

        let mut patients_written = 0;
        let mut appointments_written = 0;

        if !storage::has_patients(&env) {
            let patients = seed::demo_patients(&env);
            patients_written = patients.len();
            storage::save_patients(&env, &patients);
        }
        if !storage::has_appointments(&env) {
            let appointments = seed::demo_appointments(&env, env.ledger().timestamp());
            appointments_written = appointments.len();
            storage::save_appointments(&env, &appointments);
        }

        events::publish_demo_data_loaded(&env, patients_written, appointments_written);

        Ok(())
    }

    // ── Session ───────────────────────────────────────────────

    pub fn login(env: Env, email: String, password: String) -> Result<User, ContractError> {
        require_initialized(&env)?;
        auth::login(&env, &email, &password)
    }

    pub fn logout(env: Env) {
        auth::logout(&env);
    }

    pub fn current_user(env: Env) -> Option<User> {
        auth::current_user(&env)
    }

    /// Change the signed-in user's e-mail and password
    pub fn update_account(
        env: Env,
        email: String,
        password: String,
    ) -> Result<User, ContractError> {
        auth::update_account(&env, email, password)
    }

    // ── Patients ──────────────────────────────────────────────

    /// Create a patient, or replace the one with `existing_id`
    pub fn upsert_patient(
        env: Env,
        candidate: PatientInput,
        existing_id: Option<String>,
    ) -> Result<Patient, ContractError> {
        auth::require_permission(&env, Permission::ManagePatients)?;
        patient::upsert_patient(&env, candidate, existing_id)
    }

    pub fn get_patient(env: Env, id: String) -> Result<Patient, ContractError> {
        auth::require_permission(&env, Permission::ManagePatients)?;
        patient::get_patient(&env, &id)
    }

    pub fn list_patients(env: Env) -> Result<Vec<Patient>, ContractError> {
        auth::require_permission(&env, Permission::ManagePatients)?;
        Ok(storage::load_patients(&env))
    }

    pub fn delete_patient(env: Env, id: String) -> Result<(), ContractError> {
        auth::require_permission(&env, Permission::ManagePatients)?;
        patient::delete_patient(&env, id)
    }

    pub fn search_patients(env: Env, query: String) -> Result<Vec<Patient>, ContractError> {
        auth::require_permission(&env, Permission::ManagePatients)?;
        Ok(search::filter_patients(
            &env,
            &storage::load_patients(&env),
            &query,
        ))
    }

    // ── Appointments ──────────────────────────────────────────

    /// Create an appointment, or replace the one with `existing_id`, unless
    /// its 30-minute window overlaps another appointment
    pub fn upsert_appointment(
        env: Env,
        candidate: AppointmentInput,
        existing_id: Option<String>,
    ) -> Result<Appointment, ContractError> {
        auth::require_permission(&env, Permission::ManageAppointments)?;
        let config = load_config(&env);
        appointment::upsert_appointment(&env, &config, candidate, existing_id)
    }

    /// Id of the first appointment whose window overlaps one starting at
    /// `start`, ignoring `exclude_id`
    pub fn find_conflict(
        env: Env,
        start: u64,
        exclude_id: Option<String>,
    ) -> Result<Option<String>, ContractError> {
        auth::require_permission(&env, Permission::ManageAppointments)?;
        let appointments = storage::load_appointments(&env);
        Ok(appointment::find_conflict(&appointments, start, exclude_id.as_ref()).map(|a| a.id))
    }

    pub fn get_appointment(env: Env, id: String) -> Result<Appointment, ContractError> {
        auth::require_permission(&env, Permission::ManageAppointments)?;
        appointment::get_appointment(&env, &id)
    }

    pub fn list_appointments(env: Env) -> Result<Vec<AppointmentView>, ContractError> {
        auth::require_permission(&env, Permission::ManageAppointments)?;
        Ok(appointment::to_views(
            &env,
            &storage::load_appointments(&env),
            &storage::load_patients(&env),
        ))
    }

    pub fn delete_appointment(env: Env, id: String) -> Result<(), ContractError> {
        auth::require_permission(&env, Permission::ManageAppointments)?;
        appointment::delete_appointment(&env, id)
    }

    pub fn search_appointments(
        env: Env,
        query: String,
    ) -> Result<Vec<AppointmentView>, ContractError> {
        auth::require_permission(&env, Permission::ManageAppointments)?;
        let patients = storage::load_patients(&env);
        let matches =
            search::filter_appointments(&env, &storage::load_appointments(&env), &patients, &query);
        Ok(appointment::to_views(&env, &matches, &patients))
    }

    pub fn get_calendar_events(
        env: Env,
        from: u64,
        to: u64,
    ) -> Result<Vec<CalendarEvent>, ContractError> {
        auth::require_permission(&env, Permission::ManageAppointments)?;
        Ok(appointment::calendar_events(
            &env,
            &storage::load_appointments(&env),
            from,
            to,
        ))
    }

    // ── Read models ───────────────────────────────────────────

    pub fn get_dashboard(env: Env) -> Result<DashboardSummary, ContractError> {
        auth::require_permission(&env, Permission::ViewDashboard)?;
        Ok(dashboard::summarize(
            &env,
            &storage::load_patients(&env),
            &storage::load_appointments(&env),
            env.ledger().timestamp(),
        ))
    }

    /// The signed-in patient's own record and appointments
    pub fn get_my_profile(env: Env) -> Result<PatientProfile, ContractError> {
        let user = auth::require_permission(&env, Permission::ViewOwnProfile)?;
        Ok(patient::profile_for(&env, user.patient_id))
    }

    pub fn version() -> u32 {
        CONTRACT_VERSION
    }
}

#[cfg(test)]
mod test;
