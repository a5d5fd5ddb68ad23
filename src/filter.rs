//! Date-range and text-search filtering over in-memory record lists.

use time::Date;

/// An inclusive date range with optional bounds.
///
/// A missing bound is unbounded on that side; with neither bound set the
/// filter passes everything, including records without a usable date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateFilter {
    /// Keep records dated on or after this date.
    pub start: Option<Date>,
    /// Keep records dated on or before this date.
    pub end: Option<Date>,
}

impl DateFilter {
    /// A filter over the given bounds.
    pub fn new(start: Option<Date>, end: Option<Date>) -> Self {
        Self { start, end }
    }

    /// Whether neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether a record dated `date` passes the filter.
    ///
    /// A record without a usable date passes an unbounded filter and fails
    /// any bounded one: a record that cannot be placed in time cannot be
    /// shown inside a range.
    pub fn contains(&self, date: Option<Date>) -> bool {
        if self.is_unbounded() {
            return true;
        }

        let Some(date) = date else {
            return false;
        };

        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Keep only the records whose date passes `filter`.
///
/// `date_of` selects the relevant date field for the record category, e.g.
/// the delivery date for trips.
pub fn filter_by_date<T>(
    records: Vec<T>,
    filter: &DateFilter,
    date_of: impl Fn(&T) -> Option<Date>,
) -> Vec<T> {
    records
        .into_iter()
        .filter(|record| filter.contains(date_of(record)))
        .collect()
}

/// A record the whole-record text search can scan.
pub trait Searchable {
    /// The string form of every field on the record, in table-column order.
    fn search_fields(&self) -> Vec<String>;
}

/// Whole-record search: does any field on the record contain `term`?
///
/// The empty term matches everything. Matching is a case-insensitive
/// substring test. Used by the trip, maintenance and fuel tables; the
/// advance and driver payment tables search by driver name only, see
/// [matches_driver].
pub fn matches_record<T: Searchable>(record: &T, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let needle = term.to_lowercase();

    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Driver-scoped search: does the driver name contain `term`?
///
/// The empty term matches everything. Matching is a case-insensitive
/// substring test against the driver name alone, never the other fields.
pub fn matches_driver(driver_name: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    driver_name.to_lowercase().contains(&term.to_lowercase())
}

/// Keep only the records that pass the whole-record search.
pub fn search_records<T: Searchable>(records: Vec<T>, term: &str) -> Vec<T> {
    if term.is_empty() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| matches_record(record, term))
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{DateFilter, Searchable, filter_by_date, matches_driver, matches_record};

    struct Note {
        date: Option<time::Date>,
        text: String,
        amount: f64,
    }

    impl Searchable for Note {
        fn search_fields(&self) -> Vec<String> {
            vec![self.text.clone(), self.amount.to_string()]
        }
    }

    fn note(date: Option<time::Date>) -> Note {
        Note {
            date,
            text: "Mumbai to Pune".to_owned(),
            amount: 500.0,
        }
    }

    #[test]
    fn unbounded_filter_passes_everything() {
        let filter = DateFilter::default();

        assert!(filter.contains(Some(date!(2024 - 03 - 05))));
        assert!(filter.contains(None));
    }

    #[test]
    fn record_outside_the_range_never_passes() {
        let filter = DateFilter::new(Some(date!(2024 - 03 - 01)), Some(date!(2024 - 03 - 31)));

        assert!(!filter.contains(Some(date!(2024 - 02 - 29))));
        assert!(!filter.contains(Some(date!(2024 - 04 - 01))));
        assert!(filter.contains(Some(date!(2024 - 03 - 01))));
        assert!(filter.contains(Some(date!(2024 - 03 - 31))));
    }

    #[test]
    fn missing_bound_is_unbounded_on_that_side() {
        let from_march = DateFilter::new(Some(date!(2024 - 03 - 01)), None);
        assert!(from_march.contains(Some(date!(2030 - 01 - 01))));
        assert!(!from_march.contains(Some(date!(2024 - 02 - 01))));

        let until_march = DateFilter::new(None, Some(date!(2024 - 03 - 31)));
        assert!(until_march.contains(Some(date!(2020 - 01 - 01))));
        assert!(!until_march.contains(Some(date!(2024 - 04 - 01))));
    }

    #[test]
    fn dateless_record_fails_any_bounded_range() {
        let filter = DateFilter::new(Some(date!(2024 - 03 - 01)), None);

        assert!(!filter.contains(None));
    }

    #[test]
    fn filter_by_date_keeps_in_range_records() {
        let records = vec![
            note(Some(date!(2024 - 03 - 05))),
            note(Some(date!(2024 - 05 - 05))),
            note(None),
        ];
        let filter = DateFilter::new(Some(date!(2024 - 03 - 01)), Some(date!(2024 - 03 - 31)));

        let got = filter_by_date(records, &filter, |record| record.date);

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].date, Some(date!(2024 - 03 - 05)));
    }

    #[test]
    fn whole_record_search_scans_every_field() {
        let record = note(None);

        assert!(matches_record(&record, ""));
        assert!(matches_record(&record, "pune"));
        assert!(matches_record(&record, "500"));
        assert!(!matches_record(&record, "nashik"));
    }

    #[test]
    fn driver_search_is_case_insensitive_substring() {
        assert!(matches_driver("Rajesh Kumar", ""));
        assert!(matches_driver("Rajesh Kumar", "rajesh"));
        assert!(matches_driver("Rajesh Kumar", "KUMAR"));
        assert!(!matches_driver("Rajesh Kumar", "patel"));
    }
}
