use soroban_sdk::{contracttype, Env, String, Vec};

use crate::appointment::{to_views, Appointment, AppointmentStatus, AppointmentView};
use crate::patient::Patient;

/// How many upcoming appointments the dashboard lists
pub const UPCOMING_LIMIT: u32 = 10;
/// How many patients the "top patients" panel shows
pub const TOP_PATIENTS_LIMIT: u32 = 3;
/// Group for completed appointments with no treatment label
pub const UNSPECIFIED_TREATMENT: &str = "Unspecified";

const SECS_PER_DAY: u64 = 86_400;

// ── Types ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusBreakdown {
    pub pending: u32,
    pub completed: u32,
    pub cancelled: u32,
    pub rescheduled: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreatmentRevenue {
    pub treatment: String,
    pub revenue: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientAppointmentCount {
    pub patient_id: String,
    pub name: String,
    pub appointment_count: u32,
}

/// Figures shown on the admin dashboard
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DashboardSummary {
    pub total_patients: u32,
    pub upcoming: Vec<AppointmentView>,
    pub pending_treatments: u32,
    pub completed_revenue: i128,
    pub top_patients: Vec<PatientAppointmentCount>,
    pub status_breakdown: StatusBreakdown,
    pub revenue_by_treatment: Vec<TreatmentRevenue>,
    pub visits_by_weekday: Vec<u32>, // Monday first
}

// ── Aggregation ───────────────────────────────────────────────

#[allow(clippy::arithmetic_side_effects)]
pub fn summarize(
    env: &Env,
    patients: &Vec<Patient>,
    appointments: &Vec<Appointment>,
    now: u64,
) -> DashboardSummary {
    let mut status_breakdown = StatusBreakdown {
        pending: 0,
        completed: 0,
        cancelled: 0,
        rescheduled: 0,
    };
    let mut completed_revenue: i128 = 0;

    for appointment in appointments.iter() {
        match appointment.status {
            AppointmentStatus::Pending => status_breakdown.pending += 1,
            AppointmentStatus::Completed => {
                status_breakdown.completed += 1;
                completed_revenue = completed_revenue.saturating_add(appointment.cost);
            }
            AppointmentStatus::Cancelled => status_breakdown.cancelled += 1,
            AppointmentStatus::Rescheduled => status_breakdown.rescheduled += 1,
        }
    }

    DashboardSummary {
        total_patients: patients.len(),
        upcoming: to_views(env, &upcoming(env, appointments, now), patients),
        pending_treatments: status_breakdown.pending,
        completed_revenue,
        top_patients: top_patients(env, patients, appointments),
        status_breakdown,
        revenue_by_treatment: revenue_by_treatment(env, appointments),
        visits_by_weekday: visits_by_weekday(env, appointments),
    }
}

/// Appointments starting after `now`, soonest first, at most `UPCOMING_LIMIT`.
pub fn upcoming(env: &Env, appointments: &Vec<Appointment>, now: u64) -> Vec<Appointment> {
    let mut sorted: Vec<Appointment> = Vec::new(env);

    for appointment in appointments.iter() {
        if appointment.appointment_date <= now {
            continue;
        }
        // Insert after any equal start so ties keep collection order
        let position = sorted
            .iter()
            .position(|s| s.appointment_date > appointment.appointment_date)
            .map(|i| i as u32)
            .unwrap_or(sorted.len());
        sorted.insert(position, appointment);
    }

    let mut limited = Vec::new(env);
    for appointment in sorted.iter().take(UPCOMING_LIMIT as usize) {
        limited.push_back(appointment);
    }
    limited
}

/// Patients ranked by number of appointments, most first. Patients with no
/// appointments still rank.
pub fn top_patients(
    env: &Env,
    patients: &Vec<Patient>,
    appointments: &Vec<Appointment>,
) -> Vec<PatientAppointmentCount> {
    let mut ranked: Vec<PatientAppointmentCount> = Vec::new(env);

    for patient in patients.iter() {
        let appointment_count = appointments
            .iter()
            .filter(|a| a.patient_id == patient.id)
            .count() as u32;

        let position = ranked
            .iter()
            .position(|r| r.appointment_count < appointment_count)
            .map(|i| i as u32)
            .unwrap_or(ranked.len());
        ranked.insert(
            position,
            PatientAppointmentCount {
                patient_id: patient.id,
                name: patient.name,
                appointment_count,
            },
        );
    }

    let mut top = Vec::new(env);
    for entry in ranked.iter().take(TOP_PATIENTS_LIMIT as usize) {
        top.push_back(entry);
    }
    top
}

/// Completed revenue per treatment label, in order of first appearance.
pub fn revenue_by_treatment(env: &Env, appointments: &Vec<Appointment>) -> Vec<TreatmentRevenue> {
    let unspecified = String::from_str(env, UNSPECIFIED_TREATMENT);
    let mut totals: Vec<TreatmentRevenue> = Vec::new(env);

    for appointment in appointments.iter() {
        if appointment.status != AppointmentStatus::Completed {
            continue;
        }
        let treatment = appointment.treatment.unwrap_or(unspecified.clone());

        match totals.iter().position(|t| t.treatment == treatment) {
            Some(i) => {
                let i = i as u32;
                if let Some(mut total) = totals.get(i) {
                    total.revenue = total.revenue.saturating_add(appointment.cost);
                    totals.set(i, total);
                }
            }
            None => totals.push_back(TreatmentRevenue {
                treatment,
                revenue: appointment.cost,
            }),
        }
    }

    totals
}

/// Seven counts, Monday through Sunday, by UTC start day.
#[allow(clippy::arithmetic_side_effects)]
pub fn visits_by_weekday(env: &Env, appointments: &Vec<Appointment>) -> Vec<u32> {
    let mut counts = [0u32; 7];
    for appointment in appointments.iter() {
        counts[weekday_index(appointment.appointment_date)] += 1;
    }

    let mut out = Vec::new(env);
    for count in counts {
        out.push_back(count);
    }
    out
}

/// 0 = Monday. The Unix epoch fell on a Thursday.
#[allow(clippy::arithmetic_side_effects)]
pub fn weekday_index(timestamp: u64) -> usize {
    ((timestamp / SECS_PER_DAY + 3) % 7) as usize
}
