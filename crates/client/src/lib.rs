//! Typed client for the VitalFlow API.
//!
//! - [`http`] -- plain and bearer-token HTTP clients, plus one method per endpoint.
//! - [`session`] -- the signed-in user, their role and status, passed explicitly.
//! - [`gate`] -- which screens a session may open.
//! - [`listing`] -- 1-indexed UI pages over the 0-indexed list API.
//! - [`registration`] -- the multi-step sign-up with compensation on failure.
//! - [`identity`] and [`image_host`] -- the external service seams.

pub mod config;
pub mod error;
pub mod gate;
pub mod http;
pub mod identity;
pub mod image_host;
pub mod listing;
pub mod models;
pub mod registration;
pub mod session;

pub use config::ClientConfig;
pub use error::ClientError;
pub use http::{ApiClient, TokenStore};
