use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, timestamped snapshot of one calculator's state.
///
/// The snapshot's own fields are stored alongside `name` and `date` in a
/// single flat record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCalculation<S> {
    pub name: String,
    #[serde(flatten)]
    pub state: S,
    pub date: DateTime<Utc>,
}

impl<S> SavedCalculation<S> {
    pub fn new(
        name: impl Into<String>,
        state: S,
    ) -> Self {
        Self {
            name: name.into(),
            state,
            date: Utc::now(),
        }
    }
}
