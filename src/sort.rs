//! Orders record lists by a chosen table column.

use std::cmp::Ordering;
use std::str::FromStr;

use time::Date;

/// The direction to sort a column in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}

/// Every sortable column across the record tables.
///
/// Each record type maps the columns that exist on it to a [SortKey]; a
/// column that does not exist on a record falls back to the record's date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// The record's date (delivery date for trips).
    Date,
    /// Trip origin.
    FromLocation,
    /// Trip destination.
    ToLocation,
    /// The weighed load on a trip.
    Wayment,
    /// Billable bag count.
    NumberOfBags,
    /// Per-bag rent on a trip.
    RentPerBag,
    /// The driver's name.
    DriverName,
    /// What the driver is owed for a trip.
    DriverRent,
    /// Incidental spends on a trip.
    MiscSpends,
    /// Cash paid out in advance.
    Advance,
    /// The van number.
    VanNo,
    /// Maintenance or fuel description.
    Description,
    /// Maintenance or fuel cost.
    Cost,
    /// Advance amount.
    Amount,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "date" => Ok(Self::Date),
            "from" => Ok(Self::FromLocation),
            "to" => Ok(Self::ToLocation),
            "wayment" => Ok(Self::Wayment),
            "bags" => Ok(Self::NumberOfBags),
            "rent-per-bag" => Ok(Self::RentPerBag),
            "driver" | "driver-name" => Ok(Self::DriverName),
            "driver-rent" => Ok(Self::DriverRent),
            "misc" | "misc-spends" => Ok(Self::MiscSpends),
            "advance" => Ok(Self::Advance),
            "van" | "van-no" => Ok(Self::VanNo),
            "description" => Ok(Self::Description),
            "cost" => Ok(Self::Cost),
            "amount" => Ok(Self::Amount),
            other => Err(format!("unknown sort field \"{other}\"")),
        }
    }
}

/// The active sort column and direction for a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortConfig {
    /// The column being sorted on.
    pub field: SortField,
    /// The direction the column is sorted in.
    pub order: SortOrder,
}

impl SortConfig {
    /// Sort ascending on `field`.
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            order: SortOrder::Ascending,
        }
    }

    /// Sort descending on `field`.
    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            order: SortOrder::Descending,
        }
    }

    /// The state after clicking the header for `field`.
    ///
    /// Clicking the column that is already sorted ascending flips it to
    /// descending; clicking anything else sorts ascending on that column.
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field && self.order == SortOrder::Ascending {
            Self::descending(field)
        } else {
            Self::ascending(field)
        }
    }
}

/// A single comparable value drawn from a record.
///
/// Dates sort chronologically with missing dates first; text sorts
/// case-insensitively. Keys of different kinds compare as equal, which never
/// happens in practice because one key function produces one kind.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// A numeric column.
    Number(f64),
    /// A text column.
    Text(String),
    /// A date column, `None` for records without a usable date.
    Date(Option<Date>),
}

impl SortKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Sort records by the key extracted from each record.
///
/// Returns a new list; the input is untouched. The sort is stable in both
/// directions: records with equal keys keep their original relative order.
pub fn sort_by_key<T: Clone>(
    records: &[T],
    order: SortOrder,
    key: impl Fn(&T) -> SortKey,
) -> Vec<T> {
    let mut sorted = records.to_vec();

    sorted.sort_by(|a, b| {
        let ordering = key(a).compare(&key(b));
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });

    sorted
}
