//! Session handling for the dashboard accounts.
//!
//! A single signed-in user is kept under `authUser`. Every gated entry point
//! resolves that user first and then checks its role.

use soroban_sdk::{log, Env, String};

use crate::rbac::{self, Permission, User};
use crate::{events, storage, validation, ContractError};

/// Signs in the user whose e-mail and password both match exactly.
pub fn login(env: &Env, email: &String, password: &String) -> Result<User, ContractError> {
    let user = storage::load_users(env)
        .iter()
        .find(|u| u.email == *email && u.password == *password);

    let Some(user) = user else {
        log!(env, "login rejected", email.clone());
        return Err(ContractError::InvalidCredentials);
    };

    storage::save_auth_user(env, &user);
    events::publish_logged_in(env, user.id.clone(), user.role.clone());

    Ok(user)
}

pub fn logout(env: &Env) {
    let user_id = storage::load_auth_user(env).map(|u| u.id);
    storage::clear_auth_user(env);
    events::publish_logged_out(env, user_id);
}

pub fn current_user(env: &Env) -> Option<User> {
    storage::load_auth_user(env)
}

/// Signed-in user holding `permission`.
pub fn require_permission(env: &Env, permission: Permission) -> Result<User, ContractError> {
    let user = current_user(env).ok_or(ContractError::NotAuthenticated)?;
    if !rbac::has_permission(env, &user, &permission) {
        return Err(ContractError::Unauthorized);
    }
    Ok(user)
}

/// Replaces the signed-in user's credentials in the session and in `users`.
pub fn update_account(
    env: &Env,
    email: String,
    password: String,
) -> Result<User, ContractError> {
    let mut user = require_permission(env, Permission::ManageAccount)?;
    validation::validate_email(&email)?;
    validation::validate_password(&password)?;

    let mut users = storage::load_users(env);
    let index = users
        .iter()
        .position(|u| u.id == user.id)
        .ok_or(ContractError::UserNotFound)? as u32;

    user.email = email;
    user.password = password;
    users.set(index, user.clone());

    storage::save_users(env, &users);
    storage::save_auth_user(env, &user);
    events::publish_account_updated(env, user.id.clone());

    Ok(user)
}
