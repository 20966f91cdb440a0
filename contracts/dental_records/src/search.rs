use clinic_common::contains_ignore_case;
use soroban_sdk::{Env, String, Vec};

use crate::appointment::Appointment;
use crate::patient::{find_patient, Patient};

/// Patients whose name, e-mail, contact or health info contains `query`,
/// ignoring ASCII case. An empty query keeps everyone.
pub fn filter_patients(env: &Env, patients: &Vec<Patient>, query: &String) -> Vec<Patient> {
    let mut matches = Vec::new(env);
    for patient in patients.iter() {
        let hit = [&patient.name, &patient.email, &patient.contact, &patient.health_info]
            .into_iter()
            .any(|field| contains_ignore_case(field, query));
        if hit {
            matches.push_back(patient);
        }
    }
    matches
}

/// Appointments whose title, description, status or patient name contains
/// `query`. A dangling patient reference contributes no name.
pub fn filter_appointments(
    env: &Env,
    appointments: &Vec<Appointment>,
    patients: &Vec<Patient>,
    query: &String,
) -> Vec<Appointment> {
    let mut matches = Vec::new(env);
    for appointment in appointments.iter() {
        let status = String::from_str(env, appointment.status.label());
        let hit = contains_ignore_case(&appointment.title, query)
            || contains_ignore_case(&appointment.description, query)
            || contains_ignore_case(&status, query)
            || find_patient(patients, &appointment.patient_id)
                .map(|p| contains_ignore_case(&p.name, query))
                .unwrap_or(false);
        if hit {
            matches.push_back(appointment);
        }
    }
    matches
}
