//! Credential Entity
//!
//! One row of the credential store: who a user is and how they prove it.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, full_name::FullName, user_id::UserId, user_password::UserPassword,
};

/// Stored credential record
///
/// Created on register and read on login/profile. Never updated here.
#[derive(Debug, Clone)]
pub struct Credential {
    /// Store-assigned serial id
    pub user_id: UserId,
    /// Login key (lower-cased, unique)
    pub email: Email,
    pub password: UserPassword,
    pub full_name: FullName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Credential fields supplied on register. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub email: Email,
    pub password: UserPassword,
    pub full_name: FullName,
}

impl NewCredential {
    /// Attach the store-assigned id and timestamps
    pub fn into_credential(self, user_id: UserId, now: DateTime<Utc>) -> Credential {
        Credential {
            user_id,
            email: self.email,
            password: self.password,
            full_name: self.full_name,
            created_at: now,
            updated_at: now,
        }
    }
}
