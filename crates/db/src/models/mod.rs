pub mod diagnostic;
pub mod patient;
pub mod user;
pub mod vital_record;
