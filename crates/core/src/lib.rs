//! Domain types and pure rules for the VitalFlow blood-donation marketplace.
//!
//! Nothing in this crate performs I/O. The server and the client both lean on
//! [`workflow`] so the set of allowed request transitions is defined once.

pub mod blood_group;
pub mod error;
pub mod forms;
pub mod location;
pub mod pagination;
pub mod request_status;
pub mod roles;
pub mod types;
pub mod validation;
pub mod workflow;
