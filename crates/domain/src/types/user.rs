//! User record types
//!
//! Records are owned by the user store; the naming core only reads them and
//! requests display-name updates.

use serde::{Deserialize, Serialize};

/// Stable, monotonically assigned user identifier.
pub type UserId = i64;

/// User account as seen by the naming core.
///
/// Text fields use an empty string for "not set", matching how the store
/// persists them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub login: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub website: String,
    /// Role names in assignment order; the first one is the primary role.
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub display_name: String,
}

impl UserRecord {
    pub fn primary_role(&self) -> Option<&str> {
        self.roles.first().map(String::as_str)
    }
}

/// Fields accepted when a new user is registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub login: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Initial display name; defaults to the login when absent.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Partial profile edit. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.website.is_none()
            && self.roles.is_none()
            && self.display_name.is_none()
    }

    /// Apply the set fields onto `user`.
    pub fn apply_to(&self, user: &mut UserRecord) {
        if let Some(email) = &self.email {
            user.email.clone_from(email);
        }
        if let Some(first_name) = &self.first_name {
            user.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &self.last_name {
            user.last_name.clone_from(last_name);
        }
        if let Some(website) = &self.website {
            user.website.clone_from(website);
        }
        if let Some(roles) = &self.roles {
            user.roles.clone_from(roles);
        }
        if let Some(display_name) = &self.display_name {
            user.display_name.clone_from(display_name);
        }
    }
}
