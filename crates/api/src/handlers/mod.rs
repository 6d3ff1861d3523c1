pub mod admin;
pub mod auth;
pub mod diagnostic;
pub mod patient;
pub mod vital_record;
