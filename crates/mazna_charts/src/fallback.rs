//! Loading entries with a placeholder fallback.
//!
//! Charts never see a backend error: when entries cannot be fetched, or the
//! account has none yet, a fixed sample collection is charted instead and the
//! result is flagged so the UI can say so.

use chrono::NaiveDate;
use mazna_client::{Entry, MaznaClient};
use serde::Serialize;

/// Data tagged with whether it came from the backend or the placeholder set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub data: T,
    pub is_placeholder: bool,
}

impl<T> Sourced<T> {
    pub fn real(data: T) -> Self {
        Self {
            data,
            is_placeholder: false,
        }
    }

    pub fn placeholder(data: T) -> Self {
        Self {
            data,
            is_placeholder: true,
        }
    }

    /// Transform the data, keeping the flag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            data: f(self.data),
            is_placeholder: self.is_placeholder,
        }
    }

    pub fn as_ref(&self) -> Sourced<&T> {
        Sourced {
            data: &self.data,
            is_placeholder: self.is_placeholder,
        }
    }
}

const PLACEHOLDER_DAYS: [(u32, [f64; 3], [f64; 3]); 3] = [
    (1, [100.0, 120.0, 90.0], [4.0, 3.0, 5.0]),
    (2, [20.0, 130.0, 85.0], [5.0, 4.0, 4.0]),
    (3, [105.0, 125.0, 95.0], [4.0, 3.0, 5.0]),
];

/// Sample entries for 1-3 September 2023.
pub fn placeholder_entries() -> Vec<Entry> {
    PLACEHOLDER_DAYS
        .iter()
        .filter_map(|&(day, [gm, ga, ge], [im, ia, ie])| {
            let date = NaiveDate::from_ymd_opt(2023, 9, day)?;
            Some(
                Entry::new(date)
                    .with_glucose(Some(gm), Some(ga), Some(ge))
                    .with_insulin(Some(im), Some(ia), Some(ie)),
            )
        })
        .collect()
}

/// Fetch entries for `account_id`, falling back to [`placeholder_entries`]
/// on any client error or an empty list.
pub async fn load_entries(
    client: &dyn MaznaClient,
    account_id: Option<i64>,
) -> Sourced<Vec<Entry>> {
    match client.list_entries(account_id).await {
        Ok(entries) if entries.is_empty() => {
            tracing::info!(?account_id, "no entries yet, charting placeholder data");
            Sourced::placeholder(placeholder_entries())
        }
        Ok(entries) => {
            tracing::debug!(?account_id, count = entries.len(), "loaded entries");
            Sourced::real(entries)
        }
        Err(e) => {
            tracing::warn!(?account_id, error = %e, "failed to load entries, charting placeholder data");
            Sourced::placeholder(placeholder_entries())
        }
    }
}
