//! Flattens table views into spreadsheet rows.
//!
//! Each builder mirrors the visible columns of one table, in order, and
//! appends a single synthetic totals row. The resulting [Sheet] is the
//! hand-off structure for spreadsheet writing; [write_csv] is the bundled
//! writer.

use std::io::Write;

use crate::{
    Error,
    advance::Advance,
    api::format_wire_date,
    fuel::Fuel,
    maintenance::Maintenance,
    payments::{
        DriverPaymentRow, DriverPaymentSummary, TripTotals, VendorPaymentRow, VendorPaymentSummary,
    },
    trip::Trip,
};

/// The label in the first cell of the synthetic totals row.
pub const TOTALS_LABEL: &str = "TOTALS";

/// One spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// A text cell; dates are exported as ISO text.
    Text(String),
    /// A numeric cell, written at full precision.
    Number(f64),
    /// An empty cell, e.g. a non-numeric column in the totals row.
    Empty,
}

impl Cell {
    fn date(date: Option<time::Date>) -> Self {
        match date {
            Some(date) => Self::Text(format_wire_date(date)),
            None => Self::Empty,
        }
    }

    fn to_field(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => number.to_string(),
            Self::Empty => String::new(),
        }
    }
}

/// A flat table: column headers plus one row of cells per record, ending
/// with the totals row.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// The column headers, in display order.
    pub columns: Vec<&'static str>,
    /// The data rows followed by the totals row.
    pub rows: Vec<Vec<Cell>>,
}

/// The trip table with the four aggregate sums in the totals row.
pub fn trip_sheet(trips: &[Trip], totals: &TripTotals) -> Sheet {
    let columns = vec![
        "Date",
        "From",
        "To",
        "Wayment",
        "Number of Bags",
        "Rent per Bag",
        "Total Rent",
        "Driver Name",
        "Driver Rent",
        "Misc Spends",
        "Advance",
    ];

    let mut rows: Vec<Vec<Cell>> = trips
        .iter()
        .map(|trip| {
            vec![
                Cell::date(trip.delivery_date),
                Cell::Text(trip.from_location.clone()),
                Cell::Text(trip.to_location.clone()),
                Cell::Number(trip.wayment),
                Cell::Number(trip.number_of_bags as f64),
                Cell::Number(trip.rent_per_bag),
                Cell::Number(trip.total_rent()),
                Cell::Text(trip.driver_name.clone()),
                Cell::Number(trip.driver_rent),
                Cell::Number(trip.misc_spends),
                Cell::Number(trip.advance),
            ]
        })
        .collect();

    rows.push(vec![
        Cell::Text(TOTALS_LABEL.to_owned()),
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        Cell::Number(totals.vendor_rent),
        Cell::Empty,
        Cell::Number(totals.driver_rent),
        Cell::Number(totals.misc_spends),
        Cell::Number(totals.advance),
    ]);

    Sheet { columns, rows }
}

/// The maintenance table with the total cost in the totals row.
pub fn maintenance_sheet(records: &[Maintenance], total_cost: f64) -> Sheet {
    let columns = vec!["Date", "Van No", "Driver Name", "Description", "Cost"];

    let mut rows: Vec<Vec<Cell>> = records
        .iter()
        .map(|record| {
            vec![
                Cell::date(record.date),
                Cell::Text(record.van_no.clone()),
                Cell::Text(record.driver_name.clone()),
                Cell::Text(record.description.clone()),
                Cell::Number(record.cost),
            ]
        })
        .collect();

    rows.push(vec![
        Cell::Text(TOTALS_LABEL.to_owned()),
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        Cell::Number(total_cost),
    ]);

    Sheet { columns, rows }
}

/// The fuel table with the total cost in the totals row.
pub fn fuel_sheet(records: &[Fuel], total_cost: f64) -> Sheet {
    let columns = vec!["Date", "Driver Name", "Description", "Cost"];

    let mut rows: Vec<Vec<Cell>> = records
        .iter()
        .map(|record| {
            vec![
                Cell::date(record.date),
                match &record.driver_name {
                    Some(name) => Cell::Text(name.clone()),
                    None => Cell::Empty,
                },
                Cell::Text(record.description.clone()),
                Cell::Number(record.cost),
            ]
        })
        .collect();

    rows.push(vec![
        Cell::Text(TOTALS_LABEL.to_owned()),
        Cell::Empty,
        Cell::Empty,
        Cell::Number(total_cost),
    ]);

    Sheet { columns, rows }
}

/// The advance table with the total amount in the totals row.
pub fn advance_sheet(records: &[Advance], total_amount: f64) -> Sheet {
    let columns = vec!["Date", "Driver Name", "Amount"];

    let mut rows: Vec<Vec<Cell>> = records
        .iter()
        .map(|record| {
            vec![
                Cell::date(record.date),
                Cell::Text(record.driver_name.clone()),
                Cell::Number(record.amount),
            ]
        })
        .collect();

    rows.push(vec![
        Cell::Text(TOTALS_LABEL.to_owned()),
        Cell::Empty,
        Cell::Number(total_amount),
    ]);

    Sheet { columns, rows }
}

/// The driver payment table with the summed salary in the totals row.
pub fn driver_payment_sheet(rows: &[DriverPaymentRow], summary: &DriverPaymentSummary) -> Sheet {
    let columns = vec!["Date", "From", "To", "Number of Bags", "Driver Name", "Driver Rent"];

    let mut sheet_rows: Vec<Vec<Cell>> = rows
        .iter()
        .map(|row| {
            vec![
                Cell::date(row.date),
                Cell::Text(row.from_location.clone()),
                Cell::Text(row.to_location.clone()),
                Cell::Number(row.number_of_bags as f64),
                Cell::Text(row.driver_name.clone()),
                Cell::Number(row.driver_rent),
            ]
        })
        .collect();

    sheet_rows.push(vec![
        Cell::Text(TOTALS_LABEL.to_owned()),
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        Cell::Number(summary.salary),
    ]);

    Sheet {
        columns,
        rows: sheet_rows,
    }
}

/// The vendor payment table with the rent, spends and advance sums in the
/// totals row.
pub fn vendor_payment_sheet(rows: &[VendorPaymentRow], summary: &VendorPaymentSummary) -> Sheet {
    let columns = vec![
        "Date",
        "From",
        "To",
        "Number of Bags",
        "Wayment",
        "Rent",
        "Misc Spends",
        "Advance",
    ];

    let mut sheet_rows: Vec<Vec<Cell>> = rows
        .iter()
        .map(|row| {
            vec![
                Cell::date(row.date),
                Cell::Text(row.from_location.clone()),
                Cell::Text(row.to_location.clone()),
                Cell::Number(row.number_of_bags as f64),
                Cell::Number(row.wayment),
                Cell::Number(row.rent),
                Cell::Number(row.misc_spends),
                Cell::Number(row.advance),
            ]
        })
        .collect();

    sheet_rows.push(vec![
        Cell::Text(TOTALS_LABEL.to_owned()),
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        Cell::Number(summary.rent),
        Cell::Number(summary.misc_spends),
        Cell::Number(summary.advance),
    ]);

    Sheet {
        columns,
        rows: sheet_rows,
    }
}

/// Render a sheet as CSV.
///
/// # Errors
/// Returns [Error::ExportFailed] if the destination cannot be written.
pub fn write_csv<W: Write>(sheet: &Sheet, writer: W) -> Result<(), Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(&sheet.columns)
        .map_err(|error| Error::ExportFailed(error.to_string()))?;

    for row in &sheet.rows {
        let fields: Vec<String> = row.iter().map(Cell::to_field).collect();
        csv_writer
            .write_record(&fields)
            .map_err(|error| Error::ExportFailed(error.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|error| Error::ExportFailed(error.to_string()))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        advance::Advance,
        payments::{
            TripTotals, project_driver_payments, project_vendor_payments,
            summarize_driver_payments, summarize_vendor_payments, test_trips::march_trips,
        },
    };
    use crate::filter::DateFilter;

    use super::{Cell, TOTALS_LABEL, advance_sheet, driver_payment_sheet, trip_sheet,
        vendor_payment_sheet, write_csv};

    #[test]
    fn every_sheet_has_one_row_per_record_plus_totals() {
        let trips = march_trips();
        let totals = TripTotals::from_trips(&trips);

        let sheet = trip_sheet(&trips, &totals);

        assert_eq!(sheet.rows.len(), trips.len() + 1);
    }

    #[test]
    fn the_totals_row_is_labelled_and_carries_the_sums() {
        let trips = march_trips();
        let totals = TripTotals::from_trips(&trips);

        let sheet = trip_sheet(&trips, &totals);
        let totals_row = sheet.rows.last().expect("sheet has no rows");

        assert_eq!(totals_row[0], Cell::Text(TOTALS_LABEL.to_owned()));
        assert_eq!(totals_row[6], Cell::Number(14000.0));
        assert_eq!(totals_row[8], Cell::Number(5800.0));
        // Non-aggregated columns stay empty.
        assert_eq!(totals_row[1], Cell::Empty);
        assert_eq!(totals_row[3], Cell::Empty);
    }

    #[test]
    fn the_empty_table_still_gets_a_totals_row() {
        let sheet = advance_sheet(&[], 0.0);

        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.rows[0][0], Cell::Text(TOTALS_LABEL.to_owned()));
        assert_eq!(sheet.rows[0][2], Cell::Number(0.0));
    }

    #[test]
    fn rows_mirror_the_visible_columns_in_order() {
        let advances = vec![Advance {
            id: 1,
            date: Some(date!(2024 - 03 - 02)),
            driver_name: "Rajesh Kumar".to_owned(),
            amount: 1000.0,
        }];

        let sheet = advance_sheet(&advances, 1000.0);

        assert_eq!(sheet.columns, vec!["Date", "Driver Name", "Amount"]);
        assert_eq!(
            sheet.rows[0],
            vec![
                Cell::Text("2024-03-02".to_owned()),
                Cell::Text("Rajesh Kumar".to_owned()),
                Cell::Number(1000.0),
            ]
        );
    }

    #[test]
    fn payment_sheets_carry_their_summaries() {
        let trips = march_trips();

        let driver_rows = project_driver_payments(&trips);
        let driver_summary =
            summarize_driver_payments(&driver_rows, &[], &DateFilter::default(), "");
        let driver = driver_payment_sheet(&driver_rows, &driver_summary);
        assert_eq!(driver.rows.last().expect("no rows")[5], Cell::Number(5800.0));

        let vendor_rows = project_vendor_payments(&trips);
        let vendor_summary = summarize_vendor_payments(&vendor_rows);
        let vendor = vendor_payment_sheet(&vendor_rows, &vendor_summary);
        let footer = vendor.rows.last().expect("no rows");
        assert_eq!(footer[5], Cell::Number(14000.0));
        assert_eq!(footer[7], Cell::Number(1000.0));
    }

    #[test]
    fn csv_output_quotes_the_sheet_faithfully() {
        let advances = vec![Advance {
            id: 1,
            date: Some(date!(2024 - 03 - 02)),
            driver_name: "Rajesh Kumar".to_owned(),
            amount: 1000.0,
        }];
        let sheet = advance_sheet(&advances, 1000.0);

        let mut buffer = Vec::new();
        write_csv(&sheet, &mut buffer).expect("could not write CSV");
        let text = String::from_utf8(buffer).expect("CSV was not UTF-8");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Date,Driver Name,Amount");
        assert_eq!(lines[1], "2024-03-02,Rajesh Kumar,1000");
        assert_eq!(lines[2], "TOTALS,,1000");
    }
}
