//! Core data model for vehicle maintenance records.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error, FieldError,
    api::{format_wire_date, parse_wire_date},
    filter::Searchable,
    sort::{SortField, SortKey},
};

/// A repair or servicing job on one of the vans.
#[derive(Debug, Clone, PartialEq)]
pub struct Maintenance {
    /// The ID assigned by the remote service.
    pub id: u64,
    /// The day the work was done. `None` when the remote record carries a
    /// missing or unreadable date.
    pub date: Option<Date>,
    /// The van that was worked on.
    pub van_no: String,
    /// The driver who took the van in.
    pub driver_name: String,
    /// What was done, e.g. "clutch plate replacement".
    pub description: String,
    /// What the work cost.
    pub cost: f64,
    /// Whether the driver paid out of pocket and needs reimbursing.
    pub paid_by_driver: bool,
}

impl Maintenance {
    /// The sort key for a table column; unknown columns fall back to the date.
    pub fn sort_key(&self, field: SortField) -> SortKey {
        match field {
            SortField::VanNo => SortKey::Text(self.van_no.clone()),
            SortField::DriverName => SortKey::Text(self.driver_name.clone()),
            SortField::Description => SortKey::Text(self.description.clone()),
            SortField::Cost => SortKey::Number(self.cost),
            _ => SortKey::Date(self.date),
        }
    }
}

impl Searchable for Maintenance {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.map(format_wire_date).unwrap_or_default(),
            self.van_no.clone(),
            self.driver_name.clone(),
            self.description.clone(),
            self.cost.to_string(),
        ]
    }
}

/// The total cost over a maintenance list.
pub fn total_maintenance_cost(records: &[Maintenance]) -> f64 {
    records.iter().map(|record| record.cost).sum()
}

/// Input for creating or updating a maintenance record.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceDraft {
    /// The day the work was done.
    pub date: Date,
    /// The van that was worked on.
    pub van_no: String,
    /// The driver who took the van in.
    pub driver_name: String,
    /// What was done.
    pub description: String,
    /// What the work cost.
    pub cost: f64,
    /// Whether the driver paid out of pocket.
    pub paid_by_driver: bool,
}

impl MaintenanceDraft {
    /// Run the client-side checks that must pass before submission.
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every field that failed.
    pub fn validate(&self) -> Result<(), Error> {
        let mut errors = Vec::new();

        if self.van_no.trim().is_empty() {
            errors.push(FieldError {
                field: "van_no",
                message: "Van number is required".to_owned(),
            });
        }

        if self.driver_name.trim().is_empty() {
            errors.push(FieldError {
                field: "driver_name",
                message: "Driver name is required".to_owned(),
            });
        }

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

/// The maintenance record as the remote `/maintenance` endpoints speak it.
///
/// The remote calls the cost `amount`; `paidByDriver` is optional on the
/// wire and defaults to false on records written before the flag existed.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MaintenanceWire {
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

impl From<MaintenanceWire> for Maintenance {
    fn from(wire: MaintenanceWire) -> Self {
        Self {
            id: wire.id,
            date: parse_wire_date(&wire.date),
            van_no: wire.van_no,
            driver_name: wire.driver_name,
            description: wire.description,
            cost: wire.amount,
            paid_by_driver: wire.paid_by_driver,
        }
    }
}

impl From<&MaintenanceDraft> for MaintenanceWire {
    fn from(draft: &MaintenanceDraft) -> Self {
        Self {
            id: 0,
            date: format_wire_date(draft.date),
            van_no: draft.van_no.clone(),
            driver_name: draft.driver_name.clone(),
            description: draft.description.clone(),
            amount: draft.cost,
            paid_by_driver: draft.paid_by_driver,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{Maintenance, MaintenanceDraft, MaintenanceWire, total_maintenance_cost};

    #[test]
    fn remote_amount_becomes_local_cost() {
        let wire: MaintenanceWire = serde_json::from_value(serde_json::json!({
            "id": 3,
            "date": "2024-03-10",
            "vanNo": "MH 12 AB 3456",
            "driverName": "Suresh Patel",
            "description": "brake pads",
            "amount": 2500.0
        }))
        .expect("could not deserialize maintenance record");

        let record = Maintenance::from(wire);

        assert_eq!(record.cost, 2500.0);
        assert_eq!(record.date, Some(date!(2024 - 03 - 10)));
        assert!(!record.paid_by_driver);
    }

    #[test]
    fn draft_serializes_cost_as_amount() {
        let draft = MaintenanceDraft {
            date: date!(2024 - 03 - 10),
            van_no: "MH 12 AB 3456".to_owned(),
            driver_name: "Suresh Patel".to_owned(),
            description: "brake pads".to_owned(),
            cost: 2500.0,
            paid_by_driver: true,
        };

        let json = serde_json::to_value(MaintenanceWire::from(&draft))
            .expect("could not serialize maintenance record");

        assert_eq!(json["amount"], 2500.0);
        assert_eq!(json["paidByDriver"], true);
        assert!(json.get("cost").is_none());
    }

    #[test]
    fn draft_without_a_description_is_rejected() {
        let draft = MaintenanceDraft {
            date: date!(2024 - 03 - 10),
            van_no: "MH 12 AB 3456".to_owned(),
            driver_name: "Suresh Patel".to_owned(),
            description: String::new(),
            cost: 2500.0,
            paid_by_driver: false,
        };

        assert!(draft.validate().is_err());
    }

    #[test]
    fn total_cost_sums_the_list() {
        let records = vec![
            Maintenance {
                id: 1,
                date: None,
                van_no: String::new(),
                driver_name: String::new(),
                description: String::new(),
                cost: 1000.0,
                paid_by_driver: false,
            },
            Maintenance {
                id: 2,
                date: None,
                van_no: String::new(),
                driver_name: String::new(),
                description: String::new(),
                cost: 250.5,
                paid_by_driver: true,
            },
        ];

        assert_eq!(total_maintenance_cost(&records), 1250.5);
        assert_eq!(total_maintenance_cost(&[]), 0.0);
    }
}
