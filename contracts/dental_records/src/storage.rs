use clinic_common::{format_id, has_key, load_collection, load_record, remove_key, save_collection, save_record};
use soroban_sdk::{symbol_short, Env, String, Symbol, Vec};

use crate::appointment::Appointment;
use crate::patient::Patient;
use crate::rbac::User;

// ── Persistent keys ───────────────────────────────────────────
pub const USERS: Symbol = symbol_short!("users");
pub const PATIENTS: Symbol = symbol_short!("patients");
pub const INCIDENTS: Symbol = symbol_short!("incidents");
pub const AUTH_USER: Symbol = symbol_short!("authUser");

// ── Instance counters ─────────────────────────────────────────
const PATIENT_CTR: Symbol = symbol_short!("PAT_CTR");
const APPT_CTR: Symbol = symbol_short!("APPT_CTR");
const FILE_CTR: Symbol = symbol_short!("FILE_CTR");

pub fn load_users(env: &Env) -> Vec<User> {
    load_collection(env, &USERS)
}

pub fn save_users(env: &Env, users: &Vec<User>) {
    save_collection(env, &USERS, users);
}

pub fn load_patients(env: &Env) -> Vec<Patient> {
    load_collection(env, &PATIENTS)
}

pub fn save_patients(env: &Env, patients: &Vec<Patient>) {
    save_collection(env, &PATIENTS, patients);
}

pub fn load_appointments(env: &Env) -> Vec<Appointment> {
    load_collection(env, &INCIDENTS)
}

pub fn save_appointments(env: &Env, appointments: &Vec<Appointment>) {
    save_collection(env, &INCIDENTS, appointments);
}

/// Whether each collection has ever been written. An empty collection
/// still counts as present.
pub fn has_users(env: &Env) -> bool {
    has_key(env, &USERS)
}

pub fn has_patients(env: &Env) -> bool {
    has_key(env, &PATIENTS)
}

pub fn has_appointments(env: &Env) -> bool {
    has_key(env, &INCIDENTS)
}

pub fn load_auth_user(env: &Env) -> Option<User> {
    load_record(env, &AUTH_USER)
}

pub fn save_auth_user(env: &Env, user: &User) {
    save_record(env, &AUTH_USER, user);
}

pub fn clear_auth_user(env: &Env) {
    remove_key(env, &AUTH_USER);
}

/// Advances `counter` until `prefix`+n is not `taken`, then persists it.
fn next_id(env: &Env, counter: &Symbol, prefix: &str, taken: impl Fn(&String) -> bool) -> String {
    let mut current: u64 = env.storage().instance().get(counter).unwrap_or(0);
    loop {
        current = current.saturating_add(1);
        let id = format_id(env, prefix, current);
        if !taken(&id) {
            env.storage().instance().set(counter, &current);
            return id;
        }
    }
}

pub fn next_patient_id(env: &Env, patients: &Vec<Patient>) -> String {
    next_id(env, &PATIENT_CTR, "p", |id| {
        patients.iter().any(|p| p.id == *id)
    })
}

pub fn next_appointment_id(env: &Env, appointments: &Vec<Appointment>) -> String {
    next_id(env, &APPT_CTR, "i", |id| {
        appointments.iter().any(|a| a.id == *id)
    })
}

/// A file id no stored attachment holds and not listed in `pending`.
pub fn next_file_id(env: &Env, appointments: &Vec<Appointment>, pending: &Vec<String>) -> String {
    next_id(env, &FILE_CTR, "f", |id| {
        pending.contains(id)
            || appointments
                .iter()
                .any(|a| a.files.iter().any(|f| f.id == *id))
    })
}
