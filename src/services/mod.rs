//! View-facing services wrapping the API calls each page needs.

mod dokumentasi;
mod feedback;
mod surat_detail;
mod surat_form;
mod surat_masuk;
mod surat_processing;

pub use dokumentasi::*;
pub use feedback::*;
pub use surat_detail::*;
pub use surat_form::*;
pub use surat_masuk::*;
pub use surat_processing::*;
