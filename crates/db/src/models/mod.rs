//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) where the table supports patches

pub mod account;
pub mod donation_request;
pub mod donor;
pub mod funding;
