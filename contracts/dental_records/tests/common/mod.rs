#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use dental_records::{
    storage, Appointment, AppointmentInput, AppointmentStatus, DentalRecordsContract,
    DentalRecordsContractClient, PatientInput,
};
use soroban_sdk::{testutils::Address as _, testutils::Ledger, Address, Env, String, Vec};

/// 2025-01-01 00:00:00 UTC
pub const START_TIME: u64 = 1_735_689_600;
pub const HOUR: u64 = 3_600;
pub const MINUTE: u64 = 60;

pub struct TestContext {
    pub env: Env,
    pub client: DentalRecordsContractClient<'static>,
    pub admin: Address,
}

/// Initialized contract with the demo admin signed in.
pub fn setup_test_env() -> TestContext {
    let ctx = setup_signed_out();
    login_admin(&ctx);
    ctx
}

pub fn setup_signed_out() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START_TIME);

    let contract_id = env.register(DentalRecordsContract, ());
    let client = DentalRecordsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    TestContext { env, client, admin }
}

pub fn login_admin(ctx: &TestContext) {
    ctx.client
        .login(&text(&ctx.env, "admin@entnt.in"), &text(&ctx.env, "admin123"));
}

pub fn login_patient(ctx: &TestContext) {
    ctx.client
        .login(&text(&ctx.env, "john@entnt.in"), &text(&ctx.env, "patient123"));
}

pub fn text(env: &Env, value: &str) -> String {
    String::from_str(env, value)
}

pub fn patient_input(env: &Env, name: &str, email: &str) -> PatientInput {
    PatientInput {
        name: text(env, name),
        dob: text(env, "1990-05-17"),
        contact: text(env, "1234567890"),
        email: text(env, email),
        health_info: text(env, "None"),
    }
}

pub fn appointment_input(env: &Env, patient_id: &String, title: &str, start: u64) -> AppointmentInput {
    AppointmentInput {
        patient_id: patient_id.clone(),
        title: text(env, title),
        description: text(env, "Routine check"),
        comments: text(env, ""),
        appointment_date: start,
        next_appointment_date: None,
        treatment: None,
        cost: 0,
        status: AppointmentStatus::Pending,
        files: Vec::new(env),
    }
}

/// A stored patient to hang appointments off.
pub fn create_patient(ctx: &TestContext, name: &str, email: &str) -> String {
    ctx.client
        .upsert_patient(&patient_input(&ctx.env, name, email), &None)
        .id
}

/// 09:00 UTC on the day after `START_TIME`.
pub fn tomorrow_at_nine() -> u64 {
    START_TIME + 24 * HOUR + 9 * HOUR
}

/// An appointment record as it sits in storage, for writing data the
/// contract itself would refuse (such as overlapping windows).
pub fn stored_appointment(env: &Env, id: &str, patient_id: &String, start: u64) -> Appointment {
    Appointment {
        id: text(env, id),
        patient_id: patient_id.clone(),
        title: text(env, "Imported"),
        description: text(env, ""),
        comments: text(env, ""),
        appointment_date: start,
        next_appointment_date: None,
        treatment: None,
        cost: 0,
        status: AppointmentStatus::Pending,
        files: Vec::new(env),
    }
}

/// Replaces the `incidents` collection directly, bypassing every check.
pub fn seed_appointments(ctx: &TestContext, appointments: &Vec<Appointment>) {
    ctx.env.as_contract(&ctx.client.address, || {
        storage::save_appointments(&ctx.env, appointments);
    });
}
