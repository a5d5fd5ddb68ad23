//! Display formatting for dates and money.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{Date, Month};

/// Format a date for display, e.g. "Mar 5, 2024".
///
/// Records fetched from the remote service may have no usable date; those
/// render as "-".
pub fn format_date(date: Option<Date>) -> String {
    match date {
        Some(date) => format!(
            "{} {}, {}",
            month_abbrev(date.month()),
            date.day(),
            date.year()
        ),
        None => "-".to_owned(),
    }
}

fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Format an amount of rupees for display, e.g. "₹3,000.00".
///
/// Amounts are kept at full precision through every aggregation and only
/// rounded to two decimals here.
pub fn format_currency(amount: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("₹")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-₹")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if amount < 0.0 {
        negative_fmt.fmt_string(amount.abs())
    } else if amount > 0.0 {
        positive_fmt.fmt_string(amount)
    } else {
        // numfmt hardcodes zero as "0", so spell it out ourselves.
        "₹0.00".to_owned()
    };

    // numfmt drops a final trailing zero ("12.30" comes back as "12.3"), so
    // add it back.
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{format_currency, format_date};

    #[test]
    fn format_date_uses_short_month_names() {
        assert_eq!(format_date(Some(date!(2024 - 03 - 05))), "Mar 5, 2024");
        assert_eq!(format_date(Some(date!(2024 - 12 - 31))), "Dec 31, 2024");
    }

    #[test]
    fn format_date_renders_missing_dates_as_placeholder() {
        assert_eq!(format_date(None), "-");
    }

    #[test]
    fn format_currency_rounds_to_two_decimals() {
        assert_eq!(format_currency(3000.0), "₹3,000.00");
        assert_eq!(format_currency(12.3), "₹12.30");
        assert_eq!(format_currency(0.0), "₹0.00");
    }

    #[test]
    fn format_currency_handles_negative_amounts() {
        assert_eq!(format_currency(-500.0), "-₹500.00");
    }
}
