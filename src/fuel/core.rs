//! Core data model for fuel purchases.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error, FieldError,
    api::{format_wire_date, parse_wire_date},
    filter::Searchable,
    sort::{SortField, SortKey},
};

/// The remote schema demands a van number on fuel writes even though fuel
/// purchases are not tracked per van here.
const DEFAULT_VAN_NO: &str = "VAN001";

/// The remote schema demands a driver name on fuel writes; purchases made by
/// the owner go under this placeholder.
const DEFAULT_DRIVER_NAME: &str = "Default Driver";

/// A diesel purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct Fuel {
    /// The ID assigned by the remote service.
    pub id: u64,
    /// The day the fuel was bought. `None` when the remote record carries a
    /// missing or unreadable date.
    pub date: Option<Date>,
    /// The driver who filled up, if the purchase is attributed to one.
    pub driver_name: Option<String>,
    /// Where or what was filled, e.g. "full tank, HP pump NH48".
    pub description: String,
    /// What the fuel cost.
    pub cost: f64,
    /// Whether the driver paid out of pocket and needs reimbursing.
    pub paid_by_driver: bool,
}

impl Fuel {
    /// The sort key for a table column; unknown columns fall back to the date.
    pub fn sort_key(&self, field: SortField) -> SortKey {
        match field {
            SortField::DriverName => {
                SortKey::Text(self.driver_name.clone().unwrap_or_default())
            }
            SortField::Description => SortKey::Text(self.description.clone()),
            SortField::Cost => SortKey::Number(self.cost),
            _ => SortKey::Date(self.date),
        }
    }
}

impl Searchable for Fuel {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.map(format_wire_date).unwrap_or_default(),
            self.driver_name.clone().unwrap_or_default(),
            self.description.clone(),
            self.cost.to_string(),
        ]
    }
}

/// The total cost over a fuel list.
pub fn total_fuel_cost(records: &[Fuel]) -> f64 {
    records.iter().map(|record| record.cost).sum()
}

/// Input for creating or updating a fuel purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelDraft {
    /// The day the fuel was bought.
    pub date: Date,
    /// The driver who filled up, if any.
    pub driver_name: Option<String>,
    /// Where or what was filled.
    pub description: String,
    /// What the fuel cost.
    pub cost: f64,
    /// Whether the driver paid out of pocket.
    pub paid_by_driver: bool,
}

impl FuelDraft {
    /// Run the client-side checks that must pass before submission.
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every field that failed.
    pub fn validate(&self) -> Result<(), Error> {
        let mut errors = Vec::new();

        if self.description.trim().is_empty() {
            errors.push(FieldError {
                field: "description",
                message: "Description is required".to_owned(),
            });
        }

        if self.cost <= 0.0 {
            errors.push(FieldError {
                field: "cost",
                message: "Cost must be greater than 0".to_owned(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }
}

/// The fuel record as the remote `/diesel` endpoints speak it.
///
/// The remote calls the cost `amount` and requires `vanNo` and `driverName`
/// on writes; reads tolerate both being absent.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FuelWire {
    #[serde(default, skip_serializing)]
    pub id: u64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub van_no: String,
    #[serde(default)]
    pub driver_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub paid_by_driver: bool,
}

impl From<FuelWire> for Fuel {
    fn from(wire: FuelWire) -> Self {
        let driver_name = if wire.driver_name.trim().is_empty() {
            None
        } else {
            Some(wire.driver_name)
        };

        Self {
            id: wire.id,
            date: parse_wire_date(&wire.date),
            driver_name,
            description: wire.description,
            cost: wire.amount,
            paid_by_driver: wire.paid_by_driver,
        }
    }
}

impl From<&FuelDraft> for FuelWire {
    fn from(draft: &FuelDraft) -> Self {
        Self {
            id: 0,
            date: format_wire_date(draft.date),
            van_no: DEFAULT_VAN_NO.to_owned(),
            driver_name: draft
                .driver_name
                .clone()
                .unwrap_or_else(|| DEFAULT_DRIVER_NAME.to_owned()),
            description: draft.description.clone(),
            amount: draft.cost,
            paid_by_driver: draft.paid_by_driver,
        }
    }
}
