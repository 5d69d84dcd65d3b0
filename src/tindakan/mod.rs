//! Disposition actions ("tindakan") chosen when a letter is processed.
//!
//! The API stores the selection as one comma-joined string. An action that
//! itself contains a comma cannot survive that encoding, so serialization
//! refuses such entries instead of splitting them silently.

use crate::errors::ClientError;

/// Fixed list of actions offered in the disposition form.
pub const TINDAKAN_OPTIONS: [&str; 13] = [
    "Untuk diketahui",
    "Untuk ditindaklanjuti",
    "Untuk diproses sesuai ketentuan",
    "Untuk dipelajari dan ditelaah",
    "Untuk dihadiri",
    "Untuk diwakili",
    "Untuk disiapkan bahan",
    "Untuk dijawab",
    "Untuk dikoordinasikan",
    "Untuk diedarkan",
    "Untuk diarsipkan",
    "Untuk dibicarakan dengan saya",
    "Untuk dilaporkan hasilnya",
];

const SEPARATOR: char = ',';

pub fn is_standard_option(action: &str) -> bool {
    TINDAKAN_OPTIONS.contains(&action.trim())
}

/// Ordered, duplicate-free set of selected actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TindakanSelection {
    items: Vec<String>,
}

impl TindakanSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the wire form: split on commas, trim, drop empty pieces and repeats.
    pub fn parse(wire: &str) -> Self {
        let mut selection = Self::new();
        for piece in wire.split(SEPARATOR) {
            selection.add(piece);
        }
        selection
    }

    /// Add an action. Returns false when it was blank or already selected.
    pub fn add(&mut self, action: &str) -> bool {
        let action = action.trim();
        if action.is_empty() || self.contains(action) {
            return false;
        }
        self.items.push(action.to_string());
        true
    }

    /// Remove an action. Returns false when it was not selected.
    pub fn remove(&mut self, action: &str) -> bool {
        let action = action.trim();
        let before = self.items.len();
        self.items.retain(|a| a != action);
        self.items.len() != before
    }

    /// Select when absent, deselect when present. Returns whether it is now selected.
    pub fn toggle(&mut self, action: &str) -> bool {
        if self.remove(action) {
            false
        } else {
            self.add(action)
        }
    }

    pub fn contains(&self, action: &str) -> bool {
        let action = action.trim();
        self.items.iter().any(|a| a == action)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Selected entries that are not in `TINDAKAN_OPTIONS`.
    pub fn custom_entries(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|a| !is_standard_option(a))
            .map(String::as_str)
            .collect()
    }

    /// Entries that would be split apart by the comma encoding.
    pub fn ambiguous_entries(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|a| a.contains(SEPARATOR))
            .map(String::as_str)
            .collect()
    }

    /// Join for the API as `"A, B, C"`.
    pub fn to_wire(&self) -> Result<String, ClientError> {
        let ambiguous = self.ambiguous_entries();
        if let Some(first) = ambiguous.first() {
            tracing::warn!(
                "Refusing to encode tindakan containing a comma: {:?}",
                ambiguous
            );
            return Err(ClientError::Validation(format!(
                "Tindakan \"{}\" mengandung koma dan tidak dapat disimpan",
                first
            )));
        }
        Ok(self.items.join(", "))
    }
}

impl<S: AsRef<str>> FromIterator<S> for TindakanSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for action in iter {
            selection.add(action.as_ref());
        }
        selection
    }
}
