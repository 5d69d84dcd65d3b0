//! Display formatting in Bahasa Indonesia.
//!
//! Timestamps are shown in WIB (UTC+7).

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Timelike, Utc};

use crate::models::{Sifat, SuratStatus};

const WIB_OFFSET_HOURS: i64 = 7;

const BULAN: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const HARI: [&str; 7] = ["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu"];

fn to_wib(dt: &DateTime<Utc>) -> NaiveDateTime {
    dt.naive_utc() + Duration::hours(WIB_OFFSET_HOURS)
}

/// `17 Oktober 2026`
pub fn format_tanggal(dt: &DateTime<Utc>) -> String {
    let local = to_wib(dt);
    format!(
        "{} {} {}",
        local.day(),
        BULAN[local.month0() as usize],
        local.year()
    )
}

/// `Sabtu, 17 Oktober 2026`
pub fn format_hari_tanggal(dt: &DateTime<Utc>) -> String {
    let local = to_wib(dt);
    format!(
        "{}, {}",
        HARI[local.weekday().num_days_from_monday() as usize],
        format_tanggal(dt)
    )
}

/// `17 Oktober 2026, 14:05 WIB`
pub fn format_tanggal_waktu(dt: &DateTime<Utc>) -> String {
    let local = to_wib(dt);
    format!(
        "{}, {:02}:{:02} WIB",
        format_tanggal(dt),
        local.hour(),
        local.minute()
    )
}

/// Relative age for feed items, falling back to the date after a week.
pub fn format_relatif(dt: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let age = now.signed_duration_since(*dt);
    if age < Duration::minutes(1) {
        "baru saja".to_string()
    } else if age < Duration::hours(1) {
        format!("{} menit yang lalu", age.num_minutes())
    } else if age < Duration::days(1) {
        format!("{} jam yang lalu", age.num_hours())
    } else if age < Duration::days(7) {
        format!("{} hari yang lalu", age.num_days())
    } else {
        format_tanggal(dt)
    }
}

/// Human readable file size with one decimal above bytes.
pub fn format_ukuran_file(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

/// CSS classes for a status badge.
pub fn status_badge_class(status: &SuratStatus) -> &'static str {
    match status {
        SuratStatus::Pending => "bg-yellow-100 text-yellow-800",
        SuratStatus::Diproses => "bg-blue-100 text-blue-800",
        SuratStatus::Diteruskan => "bg-purple-100 text-purple-800",
        SuratStatus::Diterima => "bg-indigo-100 text-indigo-800",
        SuratStatus::Selesai => "bg-green-100 text-green-800",
        SuratStatus::Unknown => "bg-gray-100 text-gray-800",
    }
}

/// CSS classes for an urgency badge.
pub fn sifat_badge_class(sifat: &Sifat) -> &'static str {
    match sifat {
        Sifat::Biasa => "bg-gray-100 text-gray-800",
        Sifat::Segera => "bg-orange-100 text-orange-800",
        Sifat::SangatSegera => "bg-red-100 text-red-800",
        Sifat::Rahasia => "bg-slate-800 text-white",
    }
}
