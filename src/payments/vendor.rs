//! The vendor payment view: what the vendor owes per delivery, netted
//! against the advances recorded on the trips themselves.

use time::Date;

use crate::trip::Trip;

/// One row of the vendor payment table, projected from a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorPaymentRow {
    /// The delivery date.
    pub date: Option<Date>,
    /// Trip origin.
    pub from_location: String,
    /// Trip destination.
    pub to_location: String,
    /// Billable bag count.
    pub number_of_bags: u32,
    /// The weighed load.
    pub wayment: f64,
    /// What the vendor owes for the delivery: bags times per-bag rent.
    pub rent: f64,
    /// Incidental spends billed on.
    pub misc_spends: f64,
    /// Cash the vendor already paid against the trip.
    pub advance: f64,
}

/// Project the vendor payment rows from a trip list.
///
/// Filter and sort the trips first; the projection preserves order.
pub fn project_vendor_payments(trips: &[Trip]) -> Vec<VendorPaymentRow> {
    trips
        .iter()
        .map(|trip| VendorPaymentRow {
            date: trip.delivery_date,
            from_location: trip.from_location.clone(),
            to_location: trip.to_location.clone(),
            number_of_bags: trip.number_of_bags,
            wayment: trip.wayment,
            rent: trip.total_rent(),
            misc_spends: trip.misc_spends,
            advance: trip.advance,
        })
        .collect()
}

/// The footer of the vendor payment table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VendorPaymentSummary {
    /// Total rent billed to the vendor.
    pub rent: f64,
    /// Total incidental spends billed on.
    pub misc_spends: f64,
    /// Total the vendor already paid in advance.
    pub advance: f64,
}

impl VendorPaymentSummary {
    /// What the vendor still owes: rent plus spends minus advances.
    pub fn net_payment(&self) -> f64 {
        self.rent + self.misc_spends - self.advance
    }
}

/// Sum the vendor payment table.
pub fn summarize_vendor_payments(rows: &[VendorPaymentRow]) -> VendorPaymentSummary {
    let mut summary = VendorPaymentSummary::default();

    for row in rows {
        summary.rent += row.rent;
        summary.misc_spends += row.misc_spends;
        summary.advance += row.advance;
    }

    summary
}

#[cfg(test)]
mod tests {
    use crate::payments::test_trips::march_trips;

    use super::{project_vendor_payments, summarize_vendor_payments};

    #[test]
    fn projection_derives_the_rent_from_bags_and_rate() {
        let rows = project_vendor_payments(&march_trips());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rent, 5000.0);
        assert_eq!(rows[1].rent, 9000.0);
        assert_eq!(rows[1].wayment, 1560.0);
    }

    #[test]
    fn summary_totals_match_the_rows() {
        let rows = project_vendor_payments(&march_trips());

        let summary = summarize_vendor_payments(&rows);

        assert_eq!(summary.rent, 14000.0);
        assert_eq!(summary.misc_spends, 1200.0);
        assert_eq!(summary.advance, 1000.0);
        assert_eq!(summary.net_payment(), 14200.0);
    }

    #[test]
    fn the_empty_table_owes_nothing() {
        let summary = summarize_vendor_payments(&[]);

        assert_eq!(summary.net_payment(), 0.0);
    }
}
