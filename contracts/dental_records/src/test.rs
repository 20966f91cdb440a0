#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

use super::*;
use soroban_sdk::testutils::{Address as _, Events};
use soroban_sdk::{symbol_short, vec, Env, IntoVal, Val};

fn setup(env: &Env) -> (DentalRecordsContractClient<'_>, Address) {
    env.mock_all_auths();
    let contract_id = env.register(DentalRecordsContract, ());
    let client = DentalRecordsContractClient::new(env, &contract_id);
    let admin = Address::generate(env);
    client.initialize(&admin);
    (client, admin)
}

#[test]
fn test_initialize() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(DentalRecordsContract, ());
    let client = DentalRecordsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);
    let published = env.events().all().filter_by_contract(&contract_id);

    assert!(client.is_initialized());
    assert_eq!(client.get_admin(), admin);
    assert_eq!(client.get_config(), ClinicConfig::default_config());

    let payload = events::InitializedEvent {
        admin: admin.clone(),
        timestamp: env.ledger().timestamp(),
    };
    let expected: Vec<(Address, Vec<Val>, Val)> = vec![
        &env,
        (
            contract_id.clone(),
            (symbol_short!("INIT"),).into_val(&env),
            payload.into_val(&env),
        ),
    ];
    assert_eq!(published, expected);
}

#[test]
fn test_initialize_twice_fails() {
    let env = Env::default();
    let (client, admin) = setup(&env);

    let result = client.try_initialize(&admin);
    assert_eq!(result, Err(Ok(ContractError::AlreadyInitialized)));
}

#[test]
fn test_uninitialized_contract() {
    let env = Env::default();
    let contract_id = env.register(DentalRecordsContract, ());
    let client = DentalRecordsContractClient::new(&env, &contract_id);

    assert!(!client.is_initialized());
    assert_eq!(client.try_get_admin(), Err(Ok(ContractError::NotInitialized)));
    assert_eq!(client.try_get_config(), Err(Ok(ContractError::NotInitialized)));
    assert_eq!(
        client.try_login(
            &String::from_str(&env, "admin@entnt.in"),
            &String::from_str(&env, "admin123"),
        ),
        Err(Ok(ContractError::NotInitialized))
    );
}

#[test]
fn test_initialize_seeds_demo_users() {
    let env = Env::default();
    let (client, _admin) = setup(&env);

    let users = env.as_contract(&client.address, || storage::load_users(&env));
    assert_eq!(users.len(), 2);
    assert_eq!(users.get(0).unwrap().role, Role::Admin);
    assert_eq!(
        users.get(1).unwrap().patient_id,
        Some(String::from_str(&env, "p1"))
    );
}

#[test]
fn test_set_config() {
    let env = Env::default();
    let (client, admin) = setup(&env);

    let config = ClinicConfig {
        max_attachments: 2,
        max_attachment_bytes: 1_024,
    };
    client.set_config(&admin, &config);
    assert_eq!(client.get_config(), config);
}

#[test]
fn test_set_config_rejects_non_admin_and_zero_limits() {
    let env = Env::default();
    let (client, admin) = setup(&env);

    let stranger = Address::generate(&env);
    let config = ClinicConfig {
        max_attachments: 2,
        max_attachment_bytes: 1_024,
    };
    assert_eq!(
        client.try_set_config(&stranger, &config),
        Err(Ok(ContractError::Unauthorized))
    );

    let zero = ClinicConfig {
        max_attachments: 0,
        max_attachment_bytes: 1_024,
    };
    assert_eq!(
        client.try_set_config(&admin, &zero),
        Err(Ok(ContractError::InvalidInput))
    );
    assert_eq!(client.get_config(), ClinicConfig::default_config());
}

#[test]
fn test_version() {
    let env = Env::default();
    let (client, _admin) = setup(&env);
    assert_eq!(client.version(), CONTRACT_VERSION);
}
