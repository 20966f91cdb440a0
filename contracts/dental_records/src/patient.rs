use soroban_sdk::{contracttype, log, Env, String, Vec};

use crate::appointment::Appointment;
use crate::{events, storage, validation, ContractError};

/// Display name used when an appointment references a patient that no
/// longer exists.
pub const UNKNOWN_PATIENT: &str = "Unknown";

// ── Types ─────────────────────────────────────────────────────

/// A patient record
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub dob: String, // ISO date, YYYY-MM-DD
    pub contact: String,
    pub email: String,
    pub health_info: String,
}

/// Patient fields as submitted by the add/edit form
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientInput {
    pub name: String,
    pub dob: String,
    pub contact: String,
    pub email: String,
    pub health_info: String,
}

impl PatientInput {
    fn into_patient(self, id: String) -> Patient {
        Patient {
            id,
            name: self.name,
            dob: self.dob,
            contact: self.contact,
            email: self.email,
            health_info: self.health_info,
        }
    }
}

/// The patient record behind a profile, which may have been deleted
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProfileRecord {
    Missing,
    Found(Patient),
}

/// What a signed-in patient sees about themselves
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientProfile {
    pub patient: ProfileRecord,
    pub appointments: Vec<Appointment>,
}

// ── Lookups ───────────────────────────────────────────────────

pub fn find_index(patients: &Vec<Patient>, id: &String) -> Option<u32> {
    patients.iter().position(|p| p.id == *id).map(|i| i as u32)
}

pub fn find_patient(patients: &Vec<Patient>, id: &String) -> Option<Patient> {
    patients.iter().find(|p| p.id == *id)
}

/// Another patient (not `exclude`) already using `email`. Exact,
/// case-sensitive comparison.
pub fn find_duplicate_email(
    patients: &Vec<Patient>,
    email: &String,
    exclude: Option<&String>,
) -> Option<Patient> {
    patients
        .iter()
        .find(|p| p.email == *email && Some(&p.id) != exclude)
}

/// Name of the referenced patient, or "Unknown" for a dangling reference.
pub fn patient_name(env: &Env, patients: &Vec<Patient>, id: &String) -> String {
    match find_patient(patients, id) {
        Some(patient) => patient.name,
        None => String::from_str(env, UNKNOWN_PATIENT),
    }
}

// ── Repository operations ─────────────────────────────────────

/// Creates a patient (`existing_id` is `None`) or replaces the one with that
/// id. Rejects an e-mail already used by a different patient.
pub fn upsert_patient(
    env: &Env,
    candidate: PatientInput,
    existing_id: Option<String>,
) -> Result<Patient, ContractError> {
    validation::validate_patient(&candidate)?;

    let mut patients = storage::load_patients(env);

    let index = match &existing_id {
        Some(id) => Some(find_index(&patients, id).ok_or(ContractError::PatientNotFound)?),
        None => None,
    };

    if let Some(other) = find_duplicate_email(&patients, &candidate.email, existing_id.as_ref()) {
        log!(env, "patient email already in use", other.id);
        return Err(ContractError::DuplicateEmail);
    }

    let (patient, created) = match (existing_id, index) {
        (Some(id), Some(index)) => {
            let patient = candidate.into_patient(id);
            patients.set(index, patient.clone());
            (patient, false)
        }
        _ => {
            let id = storage::next_patient_id(env, &patients);
            let patient = candidate.into_patient(id);
            patients.push_back(patient.clone());
            (patient, true)
        }
    };

    storage::save_patients(env, &patients);
    events::publish_patient_saved(env, patient.id.clone(), created);

    Ok(patient)
}

/// Removes a patient. Their appointments are left in place.
pub fn delete_patient(env: &Env, id: String) -> Result<(), ContractError> {
    let mut patients = storage::load_patients(env);
    let index = find_index(&patients, &id).ok_or(ContractError::PatientNotFound)?;

    patients.remove(index);
    storage::save_patients(env, &patients);
    events::publish_patient_deleted(env, id);

    Ok(())
}

pub fn get_patient(env: &Env, id: &String) -> Result<Patient, ContractError> {
    find_patient(&storage::load_patients(env), id).ok_or(ContractError::PatientNotFound)
}

/// The profile for a patient user: their record (if it still exists) and
/// every appointment referencing it.
pub fn profile_for(env: &Env, patient_id: Option<String>) -> PatientProfile {
    let Some(patient_id) = patient_id else {
        return PatientProfile {
            patient: ProfileRecord::Missing,
            appointments: Vec::new(env),
        };
    };

    let patient = match find_patient(&storage::load_patients(env), &patient_id) {
        Some(patient) => ProfileRecord::Found(patient),
        None => ProfileRecord::Missing,
    };
    let mut appointments = Vec::new(env);
    for appointment in storage::load_appointments(env).iter() {
        if appointment.patient_id == patient_id {
            appointments.push_back(appointment);
        }
    }

    PatientProfile {
        patient,
        appointments,
    }
}
