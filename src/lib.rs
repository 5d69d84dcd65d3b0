//! Dispoma client core.
//!
//! Typed access to the Dispoma letter-disposition API and the client-side state
//! behind its pages: letter lists and forms, feedback editing, authenticated
//! media loading and the documentation feed.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod media;
pub mod models;
pub mod pagination;
pub mod services;
pub mod store;
pub mod tindakan;
pub mod util;
pub mod validation;

pub use api::ApiClient;
pub use auth::Session;
pub use config::Config;
pub use errors::ClientError;
