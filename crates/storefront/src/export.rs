//! Order-history export.
//!
//! Read-only: the export is an in-memory JSON document built from the
//! archive and the marketing database, stamped with the export time. The
//! front-end decides how to display or share it; nothing is persisted or
//! transmitted here.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::orders::{Customer, Order};

/// The export document: archived orders plus the marketing database.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub orders: &'a [Order],
    pub marketing: &'a [Customer],
    #[serde(rename = "exportDate")]
    pub export_date: DateTime<Utc>,
}

impl<'a> ExportDocument<'a> {
    /// Build an export stamped with the current time.
    #[must_use]
    pub fn new(orders: &'a [Order], marketing: &'a [Customer]) -> Self {
        Self {
            orders,
            marketing,
            export_date: Utc::now(),
        }
    }

    /// Pretty-printed JSON for display or sharing.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
