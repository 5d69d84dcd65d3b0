//! Formatting and filtering helpers shared by the views.

mod filter;
mod format;

pub use filter::*;
pub use format::*;
