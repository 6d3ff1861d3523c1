//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id password hashing behind the [`password::PasswordHasher`] trait.
//! - [`jwt`] -- signed, time-bounded access tokens.
//! - [`service`] -- registration, login and token authorization.

pub mod jwt;
pub mod password;
pub mod service;
