use soroban_sdk::{contracttype, Env, String, Vec};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Permission {
    ManagePatients = 1,
    ManageAppointments = 2,
    ViewDashboard = 3,
    ManageAccount = 4,
    ViewOwnProfile = 5,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Admin = 1,
    Patient = 2,
}

/// A dashboard account. Credentials are compared as stored.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct User {
    pub id: String,
    pub role: Role,
    pub email: String,
    pub password: String,
    pub patient_id: Option<String>, // Only set for patients
}

pub fn get_base_permissions(env: &Env, role: &Role) -> Vec<Permission> {
    let mut perms = Vec::new(env);

    match role {
        Role::Admin => {
            perms.push_back(Permission::ManagePatients);
            perms.push_back(Permission::ManageAppointments);
            perms.push_back(Permission::ViewDashboard);
            perms.push_back(Permission::ManageAccount);
        }
        // Patients only ever see their own profile page
        Role::Patient => {
            perms.push_back(Permission::ViewOwnProfile);
        }
    }

    perms
}

/// Evaluates if `user` holds `permission` through their role.
pub fn has_permission(env: &Env, user: &User, permission: &Permission) -> bool {
    get_base_permissions(env, &user.role).contains(permission)
}

#[cfg(test)]
mod test {
    use super::*;

    fn user(env: &Env, role: Role) -> User {
        User {
            id: String::from_str(env, "1"),
            role,
            email: String::from_str(env, "someone@entnt.in"),
            password: String::from_str(env, "secret"),
            patient_id: None,
        }
    }

    #[test]
    fn test_admin_permissions() {
        let env = Env::default();
        let admin = user(&env, Role::Admin);

        assert!(has_permission(&env, &admin, &Permission::ManagePatients));
        assert!(has_permission(&env, &admin, &Permission::ManageAppointments));
        assert!(has_permission(&env, &admin, &Permission::ViewDashboard));
        assert!(has_permission(&env, &admin, &Permission::ManageAccount));
        assert!(!has_permission(&env, &admin, &Permission::ViewOwnProfile));
    }

    #[test]
    fn test_patient_permissions() {
        let env = Env::default();
        let patient = user(&env, Role::Patient);

        assert!(has_permission(&env, &patient, &Permission::ViewOwnProfile));
        assert!(!has_permission(&env, &patient, &Permission::ManagePatients));
        assert!(!has_permission(&env, &patient, &Permission::ViewDashboard));
    }
}
