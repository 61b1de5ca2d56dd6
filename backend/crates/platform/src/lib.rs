//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (bcrypt, salt embedded in the hash)
//! - Compact HS256 token signing and verification

pub mod jwt;
pub mod password;
