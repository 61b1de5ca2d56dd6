//! User Entity
//!
//! A registered account. `is_admin` is provisioned out-of-band; this crate
//! only reads it.

use crate::domain::value_object::{email::Email, user_password::UserPassword, UserId};

#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned key, stable after insert
    pub id: UserId,
    /// Unique login identifier
    pub email: Email,
    /// bcrypt hash, immutable after registration
    pub pass_hash: UserPassword,
    pub is_admin: bool,
}
