//! Payment summaries derived from trips and advances.
//!
//! Two independent aggregation paths exist for advances: the advance amount
//! recorded on each trip feeds the trip table and the vendor netting, while
//! the standalone [crate::Advance] records feed the driver payment netting.
//! The two are never summed together, so nothing is counted twice.

mod driver;
mod vendor;

pub use driver::{DriverPaymentRow, DriverPaymentSummary, project_driver_payments, summarize_driver_payments};
pub use vendor::{VendorPaymentRow, VendorPaymentSummary, project_vendor_payments, summarize_vendor_payments};

use crate::trip::Trip;

/// Sums over a trip list, usually filtered to a date range first.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TripTotals {
    /// Total owed to drivers.
    pub driver_rent: f64,
    /// Total incidental spends.
    pub misc_spends: f64,
    /// Total cash already paid out against the trips.
    pub advance: f64,
    /// Total billed to the vendor (bags times per-bag rent, per trip).
    pub vendor_rent: f64,
}

impl TripTotals {
    /// Sum the list. The empty list is all zeroes.
    pub fn from_trips(trips: &[Trip]) -> Self {
        let mut totals = Self::default();

        for trip in trips {
            totals.driver_rent += trip.driver_rent;
            totals.misc_spends += trip.misc_spends;
            totals.advance += trip.advance;
            totals.vendor_rent += trip.total_rent();
        }

        totals
    }

    /// What the drivers are owed net of trip advances: rent plus incidental
    /// spends minus cash already paid out.
    pub fn driver_net(&self) -> f64 {
        self.driver_rent + self.misc_spends - self.advance
    }

    /// What the vendor owes net of trip advances.
    pub fn vendor_net(&self) -> f64 {
        self.vendor_rent + self.misc_spends - self.advance
    }
}

#[cfg(test)]
pub(crate) mod test_trips {
    use time::Date;
    use time::macros::date;

    use crate::trip::{Trip, bags_for_wayment};

    pub(crate) fn trip(
        id: u64,
        date: Option<Date>,
        driver: &str,
        wayment: f64,
        rent_per_bag: f64,
        driver_rent: f64,
        misc: f64,
        advance: f64,
    ) -> Trip {
        Trip {
            id,
            from_location: "Mumbai".to_owned(),
            to_location: "Pune".to_owned(),
            delivery_date: date,
            wayment,
            number_of_bags: bags_for_wayment(wayment),
            rent_per_bag,
            driver_name: driver.to_owned(),
            driver_rent,
            misc_spends: misc,
            van_no: "MH 12 AB 3456".to_owned(),
            advance,
            image_url: None,
        }
    }

    pub(crate) fn march_trips() -> Vec<Trip> {
        vec![
            trip(
                1,
                Some(date!(2024 - 03 - 01)),
                "Rajesh Kumar",
                780.0,
                500.0,
                3000.0,
                500.0,
                0.0,
            ),
            trip(
                2,
                Some(date!(2024 - 03 - 03)),
                "Suresh Patel",
                1560.0,
                450.0,
                2800.0,
                700.0,
                1000.0,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::TripTotals;
    use super::test_trips::{march_trips, trip};

    #[test]
    fn totals_sum_every_column() {
        let totals = TripTotals::from_trips(&march_trips());

        assert_eq!(totals.driver_rent, 5800.0);
        assert_eq!(totals.misc_spends, 1200.0);
        assert_eq!(totals.advance, 1000.0);
        // 10 bags at 500 plus 20 bags at 450.
        assert_eq!(totals.vendor_rent, 14000.0);
    }

    #[test]
    fn the_empty_list_totals_to_zero() {
        let totals = TripTotals::from_trips(&[]);

        assert_eq!(totals, TripTotals::default());
        assert_eq!(totals.driver_net(), 0.0);
        assert_eq!(totals.vendor_net(), 0.0);
    }

    #[test]
    fn driver_net_is_rent_plus_misc_minus_advance() {
        let trips = vec![trip(
            1,
            Some(date!(2024 - 03 - 01)),
            "Rajesh Kumar",
            780.0,
            500.0,
            3000.0,
            500.0,
            0.0,
        )];

        let totals = TripTotals::from_trips(&trips);

        assert_eq!(totals.driver_net(), 3500.0);
    }

    #[test]
    fn vendor_net_subtracts_the_trip_advances() {
        let totals = TripTotals::from_trips(&march_trips());

        assert_eq!(totals.vendor_net(), 14000.0 + 1200.0 - 1000.0);
    }

    #[test]
    fn aggregation_is_linear_over_concatenation() {
        let all = march_trips();
        let (left, right) = all.split_at(1);

        let whole = TripTotals::from_trips(&all);
        let first = TripTotals::from_trips(left);
        let second = TripTotals::from_trips(right);

        assert_eq!(whole.driver_rent, first.driver_rent + second.driver_rent);
        assert_eq!(whole.misc_spends, first.misc_spends + second.misc_spends);
        assert_eq!(whole.advance, first.advance + second.advance);
        assert_eq!(whole.vendor_rent, first.vendor_rent + second.vendor_rent);
    }
}
