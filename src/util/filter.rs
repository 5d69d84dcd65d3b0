//! Client-side filtering of letter lists.

use std::collections::HashMap;

use crate::models::{Post, Sifat, Surat, SuratStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuratFilter {
    /// Matched case-insensitively against nomor, asal instansi and perihal
    pub search: String,
    pub status: Option<SuratStatus>,
    pub sifat: Option<Sifat>,
}

impl SuratFilter {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.status.is_none() && self.sifat.is_none()
    }

    pub fn matches(&self, surat: &Surat) -> bool {
        if let Some(status) = &self.status {
            if &surat.status != status {
                return false;
            }
        }
        if let Some(sifat) = &self.sifat {
            if surat.sifat.as_ref() != Some(sifat) {
                return false;
            }
        }

        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            Some(surat.nomor_surat.as_str()),
            Some(surat.asal_instansi.as_str()),
            surat.perihal.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

pub fn filter_surat<'a>(list: &'a [Surat], filter: &SuratFilter) -> Vec<&'a Surat> {
    list.iter().filter(|s| filter.matches(s)).collect()
}

/// Number of letters per status; statuses with no letters are present with 0.
pub fn count_by_status(list: &[Surat]) -> HashMap<SuratStatus, usize> {
    let mut counts: HashMap<SuratStatus, usize> =
        SuratStatus::ALL.iter().map(|s| (s.clone(), 0)).collect();
    for surat in list {
        *counts.entry(surat.status.clone()).or_insert(0) += 1;
    }
    counts
}

pub fn filter_posts_by_kategori<'a>(posts: &[&'a Post], kategori: Option<&str>) -> Vec<&'a Post> {
    match kategori.filter(|k| !k.is_empty()) {
        None => posts.to_vec(),
        Some(kategori) => posts
            .iter()
            .copied()
            .filter(|p| p.kategori.as_deref() == Some(kategori))
            .collect(),
    }
}
