//! The driver payment view: what each delivery earned a driver, netted
//! against the standalone advances paid out in the same period.

use time::Date;

use crate::{
    advance::Advance,
    filter::{DateFilter, matches_driver},
    trip::Trip,
};

/// One row of the driver payment table, projected from a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverPaymentRow {
    /// The delivery date.
    pub date: Option<Date>,
    /// Trip origin.
    pub from_location: String,
    /// Trip destination.
    pub to_location: String,
    /// Billable bag count.
    pub number_of_bags: u32,
    /// The driver who ran the delivery.
    pub driver_name: String,
    /// What the driver earned for it.
    pub driver_rent: f64,
}

/// Project the driver payment rows from a trip list.
///
/// Filter and sort the trips first; the projection preserves order.
pub fn project_driver_payments(trips: &[Trip]) -> Vec<DriverPaymentRow> {
    trips
        .iter()
        .map(|trip| DriverPaymentRow {
            date: trip.delivery_date,
            from_location: trip.from_location.clone(),
            to_location: trip.to_location.clone(),
            number_of_bags: trip.number_of_bags,
            driver_name: trip.driver_name.clone(),
            driver_rent: trip.driver_rent,
        })
        .collect()
}

/// The footer of the driver payment table.
///
/// The advance figure comes from the standalone [Advance] records, not from
/// the advance column on the trips; see [summarize_driver_payments].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriverPaymentSummary {
    /// Total earned across the listed deliveries.
    pub salary: f64,
    /// Total cash advanced in the same period.
    pub advance: f64,
}

impl DriverPaymentSummary {
    /// What is still owed: salary minus the advances already paid.
    pub fn net_salary(&self) -> f64 {
        self.salary - self.advance
    }
}

/// Sum the driver payment table and the advances it nets against.
///
/// `rows` should already be filtered to the date range and driver search
/// shown in the table. The advances are filtered here with the same range
/// and search so both sides of the netting cover the same records: advances
/// relate to deliveries only by driver name and period, there is no
/// record-level link.
pub fn summarize_driver_payments(
    rows: &[DriverPaymentRow],
    advances: &[Advance],
    range: &DateFilter,
    driver_search: &str,
) -> DriverPaymentSummary {
    let salary = rows.iter().map(|row| row.driver_rent).sum();

    let advance = advances
        .iter()
        .filter(|advance| range.contains(advance.date))
        .filter(|advance| matches_driver(&advance.driver_name, driver_search))
        .map(|advance| advance.amount)
        .sum();

    DriverPaymentSummary { salary, advance }
}
