//! Dashboard summary returned by `GET /dashboard`.

use serde::{Deserialize, Serialize};

use super::Surat;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_surat: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub diproses: u64,
    #[serde(default)]
    pub diteruskan: u64,
    #[serde(default)]
    pub diterima: u64,
    #[serde(default)]
    pub selesai: u64,
    #[serde(default)]
    pub surat_terbaru: Vec<Surat>,
}
