//! Incoming letter list for the signed-in user.

use std::collections::HashMap;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{Role, Surat, SuratStatus};
use crate::util::{count_by_status, filter_surat, SuratFilter};

pub struct SuratMasuk {
    api: Arc<ApiClient>,
    items: Vec<Surat>,
    pub filter: SuratFilter,
    loaded: bool,
    last_error: Option<ClientError>,
}

impl SuratMasuk {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            items: Vec::new(),
            filter: SuratFilter::default(),
            loaded: false,
            last_error: None,
        }
    }

    /// Reload the list. On failure the previous list stays in place.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let role = self.api.session().role().unwrap_or(Role::Unknown);
        match self.api.list_surat_masuk(&role).await {
            Ok(items) => {
                tracing::debug!("Loaded {} surat for role {}", items.len(), role.as_str());
                self.items = items;
                self.loaded = true;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load surat masuk: {}", e);
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn items(&self) -> &[Surat] {
        &self.items
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    /// Letters passing the current filter.
    pub fn visible(&self) -> Vec<&Surat> {
        filter_surat(&self.items, &self.filter)
    }

    pub fn counts(&self) -> HashMap<SuratStatus, usize> {
        count_by_status(&self.items)
    }

    /// Replace the local copy of a letter after it changed elsewhere.
    pub fn patch(&mut self, surat: &Surat) -> bool {
        match self.items.iter_mut().find(|s| s.id == surat.id) {
            Some(existing) => {
                *existing = surat.clone();
                true
            }
            None => false,
        }
    }
}
