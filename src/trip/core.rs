//! Core data model for delivery trips.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error, FieldError,
    api::{format_wire_date, parse_wire_date},
    filter::Searchable,
    sort::{SortField, SortKey},
};

/// How much wayment fits in one bag.
const BAG_WAYMENT: f64 = 78.0;

/// The number of billable bags for a weighed load.
///
/// Always derived from the wayment, never entered by hand: partial bags are
/// billed as whole bags, and a zero wayment is zero bags.
pub fn bags_for_wayment(wayment: f64) -> u32 {
    if wayment <= 0.0 {
        return 0;
    }

    (wayment / BAG_WAYMENT).ceil() as u32
}

// ============================================================================
// MODELS
// ============================================================================

/// A single delivery job: origin, destination, load, and the amounts billed
/// to the vendor and owed to the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// The ID assigned by the remote service.
    pub id: u64,
    /// Where the load was picked up.
    pub from_location: String,
    /// Where the load was delivered.
    pub to_location: String,
    /// The day the delivery ran. `None` when the remote record carries a
    /// missing or unreadable date.
    pub delivery_date: Option<Date>,
    /// The weighed load.
    pub wayment: f64,
    /// Billable bag count, derived from the wayment.
    pub number_of_bags: u32,
    /// What the vendor pays per bag.
    pub rent_per_bag: f64,
    /// The driver who ran the delivery.
    pub driver_name: String,
    /// What the driver is owed for the delivery.
    pub driver_rent: f64,
    /// Incidental spends on the trip (tolls, loading charges and the like).
    pub misc_spends: f64,
    /// The van that ran the delivery.
    pub van_no: String,
    /// Cash already paid out against this trip.
    pub advance: f64,
    /// URL of the uploaded weighbridge receipt, if any.
    pub image_url: Option<String>,
}

impl Trip {
    /// What the vendor owes for this trip: bags times the per-bag rent.
    pub fn total_rent(&self) -> f64 {
        self.number_of_bags as f64 * self.rent_per_bag
    }

    /// The sort key for a table column.
    ///
    /// Columns that do not appear in the trip table fall back to the
    /// delivery date.
    pub fn sort_key(&self, field: SortField) -> SortKey {
        match field {
            SortField::FromLocation => SortKey::Text(self.from_location.clone()),
            SortField::ToLocation => SortKey::Text(self.to_location.clone()),
            SortField::Wayment => SortKey::Number(self.wayment),
            SortField::NumberOfBags => SortKey::Number(self.number_of_bags as f64),
            SortField::RentPerBag => SortKey::Number(self.rent_per_bag),
            SortField::DriverName => SortKey::Text(self.driver_name.clone()),
            SortField::DriverRent => SortKey::Number(self.driver_rent),
            SortField::MiscSpends => SortKey::Number(self.misc_spends),
            SortField::Advance => SortKey::Number(self.advance),
            SortField::VanNo => SortKey::Text(self.van_no.clone()),
            _ => SortKey::Date(self.delivery_date),
        }
    }
}

impl Searchable for Trip {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.from_location.clone(),
            self.to_location.clone(),
            self.delivery_date.map(format_wire_date).unwrap_or_default(),
            self.wayment.to_string(),
            self.number_of_bags.to_string(),
            self.rent_per_bag.to_string(),
            self.driver_name.clone(),
            self.driver_rent.to_string(),
            self.misc_spends.to_string(),
            self.van_no.clone(),
            self.advance.to_string(),
        ]
    }
}

/// Input for creating or updating a trip.
///
/// Unlike [Trip], a draft always carries a real delivery date: drafts come
/// from the local form, not from the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct TripDraft {
    /// Where the load is picked up.
    pub from_location: String,
    /// Where the load is delivered.
    pub to_location: String,
    /// The day the delivery runs.
    pub delivery_date: Date,
    /// The weighed load.
    pub wayment: f64,
    /// What the vendor pays per bag.
    pub rent_per_bag: f64,
    /// The driver running the delivery.
    pub driver_name: String,
    /// What the driver is owed.
    pub driver_rent: f64,
    /// Incidental spends on the trip.
    pub misc_spends: f64,
    /// The van running the delivery.
    pub van_no: String,
    /// Cash paid out up front against this trip.
    pub advance: f64,
}

impl TripDraft {
    /// The billable bag count for the drafted wayment.
    pub fn number_of_bags(&self) -> u32 {
        bags_for_wayment(self.wayment)
    }

    /// Run the client-side checks that must pass before submission.
    ///
    /// # Errors
    /// Returns [Error::Validation] listing every field that failed, with a
    /// message suitable for display next to the field.
    pub fn validate(&self) -> Result<(), Error> {
        let mut errors = Vec::new();

        if self.from_location.trim().is_empty() {
            errors.push(FieldError {
                field: "from_location",
                message: "From location is required".to_owned(),
            });
        }

        if self.to_location.trim().is_empty() {
            errors.push(FieldError {
                field: "to_location",
                message: "To location is required".to_owned(),
            });
        }

        if self.wayment <= 0.0 {
            errors.push(FieldError {
                field: "wayment",
                message: "Wayment must be greater than 0".to_owned(),
            });
        }

        if self.rent_per_bag <= 0.0 {
            errors.push(FieldError {
                field: "rent_per_bag",
                message: "Rent per bag must be greater than 0".to_owned(),
            });
        }

        if self.driver_name.trim().is_empty() {
            errors.push(FieldError {
                field: "driver_name",
                message: "Driver name is required".to_owned(),
            });
        }

        if self.driver_rent <= 0.0 {
            errors.push(FieldError {
                field: "driver_rent",
                message: "Driver rent must be greater than 0".to_owned(),
            });
        }

        if self.misc_spends < 0.0 {
            errors.push(FieldError {
                field: "misc_spends",
                message: "Misc spends cannot be negative".to_owned(),
            });
        }

        if self.advance < 0.0 {
            errors.push(FieldError {
                field: "advance",
                message: "Advance cannot be negative".to_owned(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }
}

// ============================================================================
// WIRE SHAPE
// ============================================================================

/// The trip as the remote `/tripdata` endpoints send and receive it.
///
/// Every field defaults so that a sparse remote payload still normalizes
/// into a usable [Trip] instead of poisoning the aggregation downstream.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TripWire {
    #[serde(default, skip_serializing)]
    pub id: u64,
    #[serde(default)]
    pub from_location: String,
    #[serde(default)]
    pub to_location: String,
    #[serde(default)]
    pub date_of_delivery: String,
    #[serde(default)]
    pub wayment: f64,
    #[serde(default)]
    pub number_of_bags: u32,
    #[serde(default)]
    pub rent_per_bag: f64,
    #[serde(default)]
    pub driver_name: String,
    #[serde(default)]
    pub driver_rent: f64,
    #[serde(default)]
    pub misc_spends: f64,
    #[serde(default)]
    pub van_no: String,
    #[serde(default)]
    pub advance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<TripWire> for Trip {
    fn from(wire: TripWire) -> Self {
        Self {
            id: wire.id,
            from_location: wire.from_location,
            to_location: wire.to_location,
            delivery_date: parse_wire_date(&wire.date_of_delivery),
            // The bag count is recomputed from the wayment; the stored value
            // is not trusted even when present.
            number_of_bags: bags_for_wayment(wire.wayment),
            wayment: wire.wayment,
            rent_per_bag: wire.rent_per_bag,
            driver_name: wire.driver_name,
            driver_rent: wire.driver_rent,
            misc_spends: wire.misc_spends,
            van_no: wire.van_no,
            advance: wire.advance,
            image_url: wire.image_url,
        }
    }
}

impl From<&TripDraft> for TripWire {
    fn from(draft: &TripDraft) -> Self {
        Self {
            id: 0,
            from_location: draft.from_location.clone(),
            to_location: draft.to_location.clone(),
            date_of_delivery: format_wire_date(draft.delivery_date),
            wayment: draft.wayment,
            number_of_bags: draft.number_of_bags(),
            rent_per_bag: draft.rent_per_bag,
            driver_name: draft.driver_name.clone(),
            driver_rent: draft.driver_rent,
            misc_spends: draft.misc_spends,
            van_no: draft.van_no.clone(),
            advance: draft.advance,
            image_url: None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
