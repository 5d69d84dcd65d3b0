//! Surat (incoming letter) model and the requests that change its state.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{MediaFile, User};

/// Processing status of a letter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SuratStatus {
    #[default]
    Pending,
    Diproses,
    Diteruskan,
    Diterima,
    Selesai,
    #[serde(other)]
    Unknown,
}

impl SuratStatus {
    pub const ALL: [SuratStatus; 5] = [
        SuratStatus::Pending,
        SuratStatus::Diproses,
        SuratStatus::Diteruskan,
        SuratStatus::Diterima,
        SuratStatus::Selesai,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SuratStatus::Pending => "pending",
            SuratStatus::Diproses => "diproses",
            SuratStatus::Diteruskan => "diteruskan",
            SuratStatus::Diterima => "diterima",
            SuratStatus::Selesai => "selesai",
            SuratStatus::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(SuratStatus::Pending),
            "diproses" => Some(SuratStatus::Diproses),
            "diteruskan" => Some(SuratStatus::Diteruskan),
            "diterima" => Some(SuratStatus::Diterima),
            "selesai" => Some(SuratStatus::Selesai),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SuratStatus::Pending => "Menunggu",
            SuratStatus::Diproses => "Diproses",
            SuratStatus::Diteruskan => "Diteruskan",
            SuratStatus::Diterima => "Diterima",
            SuratStatus::Selesai => "Selesai",
            SuratStatus::Unknown => "Tidak diketahui",
        }
    }
}

/// Urgency class of a letter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sifat {
    #[default]
    Biasa,
    Segera,
    SangatSegera,
    Rahasia,
}

impl Sifat {
    pub const ALL: [Sifat; 4] = [Sifat::Biasa, Sifat::Segera, Sifat::SangatSegera, Sifat::Rahasia];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sifat::Biasa => "biasa",
            Sifat::Segera => "segera",
            Sifat::SangatSegera => "sangat_segera",
            Sifat::Rahasia => "rahasia",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sifat::Biasa => "Biasa",
            Sifat::Segera => "Segera",
            Sifat::SangatSegera => "Sangat Segera",
            Sifat::Rahasia => "Rahasia",
        }
    }
}

/// An incoming letter as held by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Surat {
    pub id: i64,
    pub nomor_surat: String,
    pub asal_instansi: String,
    #[serde(default)]
    pub perihal: Option<String>,
    #[serde(default)]
    pub tanggal_surat: Option<NaiveDate>,
    #[serde(default)]
    pub tujuan_jabatan: Option<String>,
    #[serde(default)]
    pub disposisi_kepada: Option<String>,
    /// Comma-joined action list, see `tindakan::TindakanSelection`
    #[serde(default)]
    pub tindakan: Option<String>,
    #[serde(default)]
    pub sifat: Option<Sifat>,
    #[serde(default)]
    pub status: SuratStatus,
    #[serde(default)]
    pub catatan: Option<String>,
    #[serde(default, alias = "files")]
    pub photos: Vec<MediaFile>,
    #[serde(default)]
    pub processed_by: Option<User>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Surat {
    /// Optimistic local patch after a state-changing call succeeded.
    pub fn apply_status(&mut self, status: SuratStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = Some(now);
    }
}

/// Body of `POST /surat/:id/process`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessSuratRequest {
    pub disposisi_kepada: String,
    pub tindakan: String,
    pub sifat: Sifat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catatan: Option<String>,
}

/// Body of `POST /surat/:id/forward`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForwardSuratRequest {
    pub user_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catatan: Option<String>,
}

/// Body of `POST /surat/:id/send-to-jabatan`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendToJabatanRequest {
    pub tujuan_jabatan: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catatan: Option<String>,
}
