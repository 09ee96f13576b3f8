//! Two-step confirmation for destructive operations.
//!
//! A destructive call made with [`Confirmation::Required`] changes nothing and
//! returns [`Outcome::NeedsConfirmation`] carrying the question to ask. The
//! interface shows it, and on acceptance repeats the call with
//! [`Confirmation::Granted`].

/// Whether the user has already agreed to a destructive operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Required,
    Granted,
}

impl Confirmation {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Result of an operation that may need confirmation first.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The operation ran.
    Applied,
    /// Nothing changed; ask this question and retry with
    /// [`Confirmation::Granted`].
    NeedsConfirmation(String),
    /// Nothing to act on, e.g. an index past the end of a list.
    NotFound,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn prompt(&self) -> Option<&str> {
        match self {
            Self::NeedsConfirmation(prompt) => Some(prompt),
            _ => None,
        }
    }
}

pub(crate) fn clear_all_prompt() -> String {
    "Are you sure you want to clear all data? This will reset the form and clear saved data."
        .to_string()
}

pub(crate) fn load_prompt(name: &str) -> String {
    format!("Are you sure you want to load \"{name}\"? This will overwrite your current data.")
}

pub(crate) fn delete_prompt() -> String {
    "Are you sure you want to delete this saved calculation?".to_string()
}

pub(crate) fn import_prompt(name: &str) -> String {
    format!("Are you sure you want to load data from \"{name}\"? This will overwrite your current data.")
}

pub(crate) fn remove_synced_row_prompt(name: &str) -> String {
    format!(
        "\"{name}\" is kept in sync with workforce data. Remove it anyway? It will be added back on the next workforce update."
    )
}
