//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod account_repo;
pub mod donation_request_repo;
pub mod donor_repo;
pub mod funding_repo;

pub use account_repo::AccountRepo;
pub use donation_request_repo::DonationRequestRepo;
pub use donor_repo::DonorRepo;
pub use funding_repo::FundingRepo;
