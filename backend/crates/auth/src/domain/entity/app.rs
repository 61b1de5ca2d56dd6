//! App Entity
//!
//! A registered client application. Apps are provisioned outside this
//! service; each one owns the key its users' tokens are signed with.

use crate::domain::value_object::{app_secret::AppSecret, AppId};

#[derive(Debug, Clone)]
pub struct App {
    pub id: AppId,
    /// Display label, not used for auth decisions
    pub name: String,
    pub secret: AppSecret,
}
