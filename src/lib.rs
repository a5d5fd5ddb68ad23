//! Vanledger keeps the books for a small van rental operation.
//!
//! Deliveries, vehicle maintenance, fuel purchases and driver advances live
//! on a remote record-keeping service. This crate provides the typed records,
//! an HTTP client service per record category, and the filtering, sorting,
//! aggregation and export logic that turns raw records into driver and
//! vendor payment summaries.

#![warn(missing_docs)]

mod advance;
mod api;
mod auth;
mod export;
mod filter;
mod format;
mod fuel;
mod maintenance;
mod payments;
mod sort;
mod trip;
mod view;

pub use advance::{Advance, AdvanceDraft, AdvanceService, total_advance};
pub use api::{ApiClient, DEFAULT_API_URL};
pub use auth::authenticate;
pub use export::{
    Cell, Sheet, TOTALS_LABEL, advance_sheet, driver_payment_sheet, fuel_sheet,
    maintenance_sheet, trip_sheet, vendor_payment_sheet, write_csv,
};
pub use filter::{DateFilter, Searchable, filter_by_date, matches_driver, matches_record, search_records};
pub use format::{format_currency, format_date};
pub use fuel::{Fuel, FuelDraft, FuelService, total_fuel_cost};
pub use maintenance::{Maintenance, MaintenanceDraft, MaintenanceService, total_maintenance_cost};
pub use payments::{
    DriverPaymentRow, DriverPaymentSummary, TripTotals, VendorPaymentRow, VendorPaymentSummary,
    project_driver_payments, project_vendor_payments, summarize_driver_payments,
    summarize_vendor_payments,
};
pub use sort::{SortConfig, SortField, SortKey, SortOrder, sort_by_key};
pub use trip::{Trip, TripDraft, TripService, bags_for_wayment};
pub use view::{Action, Mode, Tab, ViewState};

/// A single failed client-side validation check.
///
/// `field` identifies the form field so the message can be shown next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// The name of the form field that failed validation.
    pub field: &'static str,
    /// A human-readable description of what is wrong with the value.
    pub message: String,
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The remote service rejected the login name and password combination.
    #[error("invalid name or password")]
    InvalidCredentials,

    /// One or more fields failed the client-side checks that run before a
    /// record is submitted.
    ///
    /// Validation errors block the remote call entirely; callers should map
    /// each [FieldError] back to its form field.
    #[error("validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// A remote call could not be completed.
    ///
    /// Covers connection failures, timeouts and non-success HTTP statuses.
    /// The message is written for display to the user.
    #[error("network error: {0}")]
    Network(String),

    /// The record does not exist on the remote service.
    ///
    /// Returned for updates and deletes of records that have already been
    /// removed. Callers should refetch the list to resynchronise.
    #[error("the requested record could not be found")]
    NotFound,

    /// The remote service answered with a payload in an unexpected shape,
    /// e.g. a list endpoint returning something other than an array.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// A sheet could not be written to the export destination.
    #[error("could not write export: {0}")]
    ExportFailed(String),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            tracing::error!("could not decode a response body: {error}");
            Error::UnexpectedShape(error.to_string())
        } else if error.is_timeout() {
            Error::Network(format!("the request timed out: {error}"))
        } else {
            Error::Network(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, FieldError};

    #[test]
    fn validation_error_lists_every_field() {
        let error = Error::Validation(vec![
            FieldError {
                field: "wayment",
                message: "Wayment must be greater than 0".to_owned(),
            },
            FieldError {
                field: "driver_name",
                message: "Driver name is required".to_owned(),
            },
        ]);

        let message = error.to_string();

        assert!(message.contains("wayment"), "got message {message:?}");
        assert!(message.contains("driver_name"), "got message {message:?}");
    }
}
