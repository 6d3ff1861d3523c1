//! Domain primitives shared by the storage and HTTP layers.
//!
//! Nothing in this crate performs I/O.

pub mod clinical;
pub mod error;
pub mod roles;
pub mod types;
