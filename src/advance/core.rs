//! Core data model for driver advances.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error, FieldError,
    api::{format_wire_date, parse_wire_date},
    sort::{SortField, SortKey},
};

/// The remote schema demands a van number on advance writes even though an
/// advance is paid to a driver, not a van.
const DEFAULT_VAN_NO: &str = "12345";

/// A cash advance paid to a driver, deducted from later earnings.
#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    /// The ID assigned by the remote service.
    pub id: u64,
    /// The day the cash was handed over. `None` when the remote record
    /// carries a missing or unreadable date.
    pub date: Option<Date>,
    /// The driver the advance was paid to.
    ///
    /// Advances are matched to earnings by this name string; there is no
    /// stable driver identifier.
    pub driver_name: String,
    /// How much was paid.
    pub amount: f64,
}

impl Advance {
    /// The sort key for a table column; unknown columns fall back to the date.
    pub fn sort_key(&self, field: SortField) -> SortKey {
        match field {
            SortField::DriverName => SortKey::Text(self.driver_name.clone()),
            SortField::Amount => SortKey::Number(self.amount),
            _ => SortKey::Date(self.date),
        }
    }
}

/// The total amount over an advance list.
pub fn total_advance(records: &[Advance]) -> f64 {
    records.iter().map(|record| record.amount).sum()
}

/// Input for creating or updating an advance.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvanceDraft {
    /// The day the cash was handed over.
    pub date: Date,
    /// The driver the advance is paid to.
    pub driver_name: String,
    /// How much is paid.
    pub amount: f64,
}

impl AdvanceDraft {
    /// Run the client-side checks that must pass before submission.
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every field that failed.
    pub fn validate(&self) -> Result<(), Error> {
        let mut errors = Vec::new();

        if self.driver_name.trim().is_empty() {
            errors.push(FieldError {
                field: "driver_name",
                message: "Driver name is required".to_owned(),
            });
        }

        if self.amount <= 0.0 {
            errors.push(FieldError {
                field: "amount",
                message: "Amount must be greater than 0".to_owned(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }
}

/// The advance as the remote `/advance` endpoints speak it.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdvanceWire {
    #[serde(default, skip_serializing)]
    pub id: u64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub driver_name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub van_no: String,
}

impl From<AdvanceWire> for Advance {
    fn from(wire: AdvanceWire) -> Self {
        Self {
            id: wire.id,
            date: parse_wire_date(&wire.date),
            driver_name: wire.driver_name,
            amount: wire.amount,
        }
    }
}

impl From<&AdvanceDraft> for AdvanceWire {
    fn from(draft: &AdvanceDraft) -> Self {
        Self {
            id: 0,
            date: format_wire_date(draft.date),
            driver_name: draft.driver_name.clone(),
            amount: draft.amount,
            van_no: DEFAULT_VAN_NO.to_owned(),
        }
    }
}
