//! Demo accounts and records for a freshly deployed clinic.

use clinic_common::{format_id, format_numbered};
use soroban_sdk::{Env, String, Vec};

use crate::appointment::{Appointment, AppointmentStatus};
use crate::patient::Patient;
use crate::rbac::{Role, User};

pub const DEMO_PATIENT_COUNT: u64 = 15;
pub const DEMO_APPOINTMENT_COUNT: u64 = 10;

const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_DAY: u64 = 86_400;

pub fn demo_users(env: &Env) -> Vec<User> {
    let mut users = Vec::new(env);
    users.push_back(User {
        id: String::from_str(env, "1"),
        role: Role::Admin,
        email: String::from_str(env, "admin@entnt.in"),
        password: String::from_str(env, "admin123"),
        patient_id: None,
    });
    users.push_back(User {
        id: String::from_str(env, "2"),
        role: Role::Patient,
        email: String::from_str(env, "john@entnt.in"),
        password: String::from_str(env, "patient123"),
        patient_id: Some(String::from_str(env, "p1")),
    });
    users
}

#[allow(clippy::arithmetic_side_effects)]
pub fn demo_patients(env: &Env) -> Vec<Patient> {
    let mut patients = Vec::new(env);
    for index in 1..=DEMO_PATIENT_COUNT {
        let health_info = if index % 2 == 0 {
            "No known issues"
        } else {
            "Allergic to penicillin"
        };
        patients.push_back(Patient {
            id: format_id(env, "p", index),
            name: format_id(env, "Patient ", index),
            dob: format_numbered(env, "1990-01-", index % 28 + 1, 2, ""),
            contact: format_numbered(env, "99999999", index, 2, ""),
            email: format_numbered(env, "patient", index, 0, "@entnt.in"),
            health_info: String::from_str(env, health_info),
        });
    }
    patients
}

/// Ten appointments for the day after `now` (UTC), hourly from 09:00, each
/// with a follow-up a week later.
#[allow(clippy::arithmetic_side_effects)]
pub fn demo_appointments(env: &Env, now: u64) -> Vec<Appointment> {
    let tomorrow = (now / SECS_PER_DAY + 1) * SECS_PER_DAY;
    let mut appointments = Vec::new(env);

    for index in 1..=DEMO_APPOINTMENT_COUNT {
        let appointment_date = tomorrow + (8 + index) * SECS_PER_HOUR;
        appointments.push_back(Appointment {
            id: format_id(env, "i", index),
            patient_id: format_id(env, "p", index),
            title: format_id(env, "Dental Appointment ", index),
            description: format_id(env, "Routine follow-up for issue ", index),
            comments: format_id(env, "Observation ", index),
            appointment_date,
            next_appointment_date: Some(appointment_date + 7 * SECS_PER_DAY),
            treatment: Some(format_id(env, "Procedure ", index)),
            cost: (100 + index as i128 * 10) * 100,
            status: demo_status(index),
            files: Vec::new(env),
        });
    }
    appointments
}

fn demo_status(index: u64) -> AppointmentStatus {
    if index % 4 == 0 {
        AppointmentStatus::Cancelled
    } else if index % 3 == 0 {
        AppointmentStatus::Rescheduled
    } else if index % 2 == 0 {
        AppointmentStatus::Pending
    } else {
        AppointmentStatus::Completed
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_demo_patients_shape() {
        let env = Env::default();
        let patients = demo_patients(&env);

        assert_eq!(patients.len(), 15);
        let first = patients.get(0).unwrap();
        assert_eq!(first.id, String::from_str(&env, "p1"));
        assert_eq!(first.name, String::from_str(&env, "Patient 1"));
        assert_eq!(first.dob, String::from_str(&env, "1990-01-02"));
        assert_eq!(first.contact, String::from_str(&env, "9999999901"));
        assert_eq!(first.email, String::from_str(&env, "patient1@entnt.in"));
        assert_eq!(first.health_info, String::from_str(&env, "Allergic to penicillin"));

        let last = patients.get(14).unwrap();
        assert_eq!(last.dob, String::from_str(&env, "1990-01-16"));
        assert_eq!(last.contact, String::from_str(&env, "9999999915"));
    }

    #[test]
    fn test_demo_appointments_are_hourly_from_nine() {
        let env = Env::default();
        // 2025-01-01 12:34:56 UTC
        let now = 1_735_734_896;
        let appointments = demo_appointments(&env, now);

        assert_eq!(appointments.len(), 10);
        let first = appointments.get(0).unwrap();
        // 2025-01-02 09:00 UTC
        assert_eq!(first.appointment_date, 1_735_808_400);
        assert_eq!(first.next_appointment_date, Some(1_735_808_400 + 7 * 86_400));
        assert_eq!(first.cost, 11_000);
        assert_eq!(first.status, AppointmentStatus::Completed);

        let second = appointments.get(1).unwrap();
        assert_eq!(second.appointment_date, first.appointment_date + 3_600);
        assert_eq!(second.status, AppointmentStatus::Pending);
        assert_eq!(appointments.get(2).unwrap().status, AppointmentStatus::Rescheduled);
        assert_eq!(appointments.get(3).unwrap().status, AppointmentStatus::Cancelled);
    }
}
