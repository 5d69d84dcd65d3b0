//! Data models for the Dispoma client.
//!
//! Field names follow the API's JSON (snake_case) so responses deserialize as-is.

mod dashboard;
mod feedback;
mod media;
mod post;
mod surat;
mod user;

pub use dashboard::*;
pub use feedback::*;
pub use media::*;
pub use post::*;
pub use surat::*;
pub use user::*;
