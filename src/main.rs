//! Command line interface for the vanledger record keeper.

use std::{
    env,
    fs::File,
    path::{Path, PathBuf},
    process::ExitCode,
    str::FromStr,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use vanledger::{
    Action, AdvanceService, ApiClient, DEFAULT_API_URL, Error, FieldError, FuelService,
    MaintenanceService, Sheet, SortField, SortOrder, Tab, TripService, TripTotals, ViewState,
    advance_sheet, authenticate, driver_payment_sheet, filter_by_date, format_currency,
    format_date, fuel_sheet, maintenance_sheet, matches_driver, project_driver_payments,
    project_vendor_payments, search_records, sort_by_key, summarize_driver_payments,
    summarize_vendor_payments, total_advance, total_fuel_cost, total_maintenance_cost, trip_sheet,
    vendor_payment_sheet, write_csv,
};

const CLI_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Books for a van rental operation: deliveries, maintenance, fuel, advances
/// and the driver/vendor payment summaries derived from them.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base URL of the record-keeping API. Falls back to the
    /// VANLEDGER_API_URL environment variable, then to the hosted service.
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a name and password against the remote service.
    Login {
        /// The account name to log in as; the password is prompted for.
        name: String,
    },
    /// List delivery trips with driver and vendor totals.
    Trips(ListArgs),
    /// List maintenance records.
    Maintenance(ListArgs),
    /// List fuel purchases.
    Fuel(ListArgs),
    /// List driver advances.
    Advances(ListArgs),
    /// Driver payment summary: salaries netted against standalone advances.
    DriverPayments {
        /// Only include deliveries run by drivers matching this name.
        #[arg(long)]
        driver: Option<String>,

        #[command(flatten)]
        range: PaymentArgs,
    },
    /// Vendor payment summary: rent and spends netted against trip advances.
    VendorPayments {
        #[command(flatten)]
        range: PaymentArgs,
    },
    /// Delete a record. Destructive; nothing happens without --yes.
    Delete {
        /// The record category to delete from.
        #[arg(value_enum)]
        category: Category,

        /// The remote ID of the record.
        id: u64,

        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Keep records dated on or after this date (YYYY-MM-DD).
    #[arg(long)]
    start: Option<String>,

    /// Keep records dated on or before this date (YYYY-MM-DD).
    #[arg(long)]
    end: Option<String>,

    /// Free-text search. Scans the whole record on the trip, maintenance and
    /// fuel tables; matches the driver name only on the advance table.
    #[arg(long)]
    search: Option<String>,

    /// Sort column, optionally with a direction, e.g. "date:desc".
    #[arg(long)]
    sort: Option<String>,

    /// Write the table, with its totals row, as CSV to this path.
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PaymentArgs {
    /// Keep deliveries dated on or after this date (YYYY-MM-DD).
    #[arg(long)]
    start: Option<String>,

    /// Keep deliveries dated on or before this date (YYYY-MM-DD).
    #[arg(long)]
    end: Option<String>,

    /// Write the table, with its totals row, as CSV to this path.
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Category {
    Trip,
    Maintenance,
    Fuel,
    Advance,
}

impl Category {
    fn noun(self) -> &'static str {
        match self {
            Self::Trip => "trip",
            Self::Maintenance => "maintenance",
            Self::Fuel => "fuel",
            Self::Advance => "advance",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let cli = Cli::parse();
    let api_url = cli
        .api_url
        .or_else(|| env::var("VANLEDGER_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_owned());

    let client = match ApiClient::new(&api_url) {
        Ok(client) => client,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, client).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

async fn run(command: Command, client: ApiClient) -> Result<(), Error> {
    match command {
        Command::Login { name } => run_login(&client, &name).await,
        Command::Trips(args) => run_trips(args, client).await,
        Command::Maintenance(args) => run_maintenance(args, client).await,
        Command::Fuel(args) => run_fuel(args, client).await,
        Command::Advances(args) => run_advances(args, client).await,
        Command::DriverPayments { driver, range } => {
            run_driver_payments(driver, range, client).await
        }
        Command::VendorPayments { range } => run_vendor_payments(range, client).await,
        Command::Delete { category, id, yes } => run_delete(category, id, yes, client).await,
    }
}

async fn run_login(client: &ApiClient, name: &str) -> Result<(), Error> {
    let password = rpassword::prompt_password("Password: ").expect("Could not read the password.");

    if authenticate(client, name, &password).await? {
        println!("Logged in as {name}.");
        Ok(())
    } else {
        Err(Error::InvalidCredentials)
    }
}

/// Build the screen state a list command describes by replaying the actions
/// the UI would have sent.
fn list_state(tab: Tab, args: &ListArgs) -> Result<ViewState, Error> {
    let mut state = ViewState::default()
        .apply(Action::LoggedIn)
        .apply(Action::SwitchTab(tab));

    if let Some(start) = &args.start {
        state = state.apply(Action::SetStartDate(Some(parse_cli_date("start", start)?)));
    }

    if let Some(end) = &args.end {
        state = state.apply(Action::SetEndDate(Some(parse_cli_date("end", end)?)));
    }

    if let Some(search) = &args.search {
        state = state.apply(Action::SetSearch(search.clone()));
    }

    if let Some(sort) = &args.sort {
        let (field, order) = parse_sort(sort)?;
        state = state.apply(Action::SortBy(field));
        if order == SortOrder::Descending {
            // A second click on the same header flips it to descending.
            state = state.apply(Action::SortBy(field));
        }
    }

    Ok(state)
}

fn parse_cli_date(field: &'static str, text: &str) -> Result<Date, Error> {
    Date::parse(text, &CLI_DATE_FORMAT).map_err(|_| {
        Error::Validation(vec![FieldError {
            field,
            message: format!("\"{text}\" is not a date in YYYY-MM-DD form"),
        }])
    })
}

fn parse_sort(text: &str) -> Result<(SortField, SortOrder), Error> {
    let (field_text, order) = match text.split_once(':') {
        Some((field, "asc")) => (field, SortOrder::Ascending),
        Some((field, "desc")) => (field, SortOrder::Descending),
        Some((_, other)) => {
            return Err(Error::Validation(vec![FieldError {
                field: "sort",
                message: format!("\"{other}\" is not \"asc\" or \"desc\""),
            }]));
        }
        None => (text, SortOrder::Ascending),
    };

    let field = SortField::from_str(field_text).map_err(|message| {
        Error::Validation(vec![FieldError {
            field: "sort",
            message,
        }])
    })?;

    Ok((field, order))
}

fn export_sheet(sheet: &Sheet, path: &Path) -> Result<(), Error> {
    let file = File::create(path).map_err(|error| Error::ExportFailed(error.to_string()))?;
    write_csv(sheet, file)?;
    println!("Exported {} rows to {}.", sheet.rows.len(), path.display());

    Ok(())
}

async fn run_trips(args: ListArgs, client: ApiClient) -> Result<(), Error> {
    let state = list_state(Tab::Delivery, &args)?;
    let service = TripService::new(client);

    let trips = service.list().await?;
    let trips = filter_by_date(trips, &state.date_filter, |trip| trip.delivery_date);
    let trips = search_records(trips, &state.search);
    let trips = sort_by_key(&trips, state.sort.order, |trip| {
        trip.sort_key(state.sort.field)
    });
    let totals = TripTotals::from_trips(&trips);

    for trip in &trips {
        println!(
            "{:>4}  {:<12}  {:<28}  {:>9}  {:>5}  {:<20}  {:>12}  {:>12}  {:>12}",
            trip.id,
            format_date(trip.delivery_date),
            format!("{} - {}", trip.from_location, trip.to_location),
            trip.wayment,
            trip.number_of_bags,
            trip.driver_name,
            format_currency(trip.total_rent()),
            format_currency(trip.driver_rent),
            format_currency(trip.advance),
        );
    }

    println!();
    println!("Total rent    {:>14}", format_currency(totals.vendor_rent));
    println!("Driver rent   {:>14}", format_currency(totals.driver_rent));
    println!("Misc spends   {:>14}", format_currency(totals.misc_spends));
    println!("Advance       {:>14}", format_currency(totals.advance));
    println!("Driver net    {:>14}", format_currency(totals.driver_net()));
    println!("Vendor net    {:>14}", format_currency(totals.vendor_net()));

    if let Some(path) = &args.export {
        export_sheet(&trip_sheet(&trips, &totals), path)?;
    }

    Ok(())
}

async fn run_maintenance(args: ListArgs, client: ApiClient) -> Result<(), Error> {
    let state = list_state(Tab::Maintenance, &args)?;
    let service = MaintenanceService::new(client);

    let records = service.list().await?;
    let records = filter_by_date(records, &state.date_filter, |record| record.date);
    let records = search_records(records, &state.search);
    let records = sort_by_key(&records, state.sort.order, |record| {
        record.sort_key(state.sort.field)
    });
    let total = total_maintenance_cost(&records);

    for record in &records {
        println!(
            "{:>4}  {:<12}  {:<14}  {:<20}  {:<36}  {:>12}{}",
            record.id,
            format_date(record.date),
            record.van_no,
            record.driver_name,
            record.description,
            format_currency(record.cost),
            if record.paid_by_driver {
                "  (paid by driver)"
            } else {
                ""
            },
        );
    }

    println!();
    println!("Total cost    {:>14}", format_currency(total));

    if let Some(path) = &args.export {
        export_sheet(&maintenance_sheet(&records, total), path)?;
    }

    Ok(())
}

async fn run_fuel(args: ListArgs, client: ApiClient) -> Result<(), Error> {
    let state = list_state(Tab::Fuel, &args)?;
    let service = FuelService::new(client);

    let records = service.list().await?;
    let records = filter_by_date(records, &state.date_filter, |record| record.date);
    let records = search_records(records, &state.search);
    let records = sort_by_key(&records, state.sort.order, |record| {
        record.sort_key(state.sort.field)
    });
    let total = total_fuel_cost(&records);

    for record in &records {
        println!(
            "{:>4}  {:<12}  {:<20}  {:<36}  {:>12}{}",
            record.id,
            format_date(record.date),
            record.driver_name.as_deref().unwrap_or("-"),
            record.description,
            format_currency(record.cost),
            if record.paid_by_driver {
                "  (paid by driver)"
            } else {
                ""
            },
        );
    }

    println!();
    println!("Total cost    {:>14}", format_currency(total));

    if let Some(path) = &args.export {
        export_sheet(&fuel_sheet(&records, total), path)?;
    }

    Ok(())
}

async fn run_advances(args: ListArgs, client: ApiClient) -> Result<(), Error> {
    let state = list_state(Tab::Advance, &args)?;
    let service = AdvanceService::new(client);

    let records = service.list().await?;
    let records = filter_by_date(records, &state.date_filter, |record| record.date);
    // The advance table searches by driver name, not the whole record.
    let records: Vec<_> = records
        .into_iter()
        .filter(|record| matches_driver(&record.driver_name, &state.search))
        .collect();
    let records = sort_by_key(&records, state.sort.order, |record| {
        record.sort_key(state.sort.field)
    });
    let total = total_advance(&records);

    for record in &records {
        println!(
            "{:>4}  {:<12}  {:<20}  {:>12}",
            record.id,
            format_date(record.date),
            record.driver_name,
            format_currency(record.amount),
        );
    }

    println!();
    println!("Total advance {:>14}", format_currency(total));

    if let Some(path) = &args.export {
        export_sheet(&advance_sheet(&records, total), path)?;
    }

    Ok(())
}

async fn run_driver_payments(
    driver: Option<String>,
    range: PaymentArgs,
    client: ApiClient,
) -> Result<(), Error> {
    let mut state = ViewState::default()
        .apply(Action::LoggedIn)
        .apply(Action::SwitchTab(Tab::DriverPayment));

    if let Some(start) = &range.start {
        state = state.apply(Action::SetStartDate(Some(parse_cli_date("start", start)?)));
    }

    if let Some(end) = &range.end {
        state = state.apply(Action::SetEndDate(Some(parse_cli_date("end", end)?)));
    }

    if let Some(driver) = driver {
        state = state.apply(Action::SetSearch(driver));
    }

    let trip_service = TripService::new(client.clone());
    let advance_service = AdvanceService::new(client);

    let trips = trip_service.list().await?;
    let advances = advance_service.list().await?;

    let trips = filter_by_date(trips, &state.date_filter, |trip| trip.delivery_date);
    let trips: Vec<_> = trips
        .into_iter()
        .filter(|trip| matches_driver(&trip.driver_name, &state.search))
        .collect();
    let trips = sort_by_key(&trips, state.sort.order, |trip| {
        trip.sort_key(state.sort.field)
    });

    let rows = project_driver_payments(&trips);
    let summary = summarize_driver_payments(&rows, &advances, &state.date_filter, &state.search);

    for row in &rows {
        println!(
            "{:<12}  {:<28}  {:>5}  {:<20}  {:>12}",
            format_date(row.date),
            format!("{} - {}", row.from_location, row.to_location),
            row.number_of_bags,
            row.driver_name,
            format_currency(row.driver_rent),
        );
    }

    println!();
    println!("Total salary  {:>14}", format_currency(summary.salary));
    println!("Total advance {:>14}", format_currency(summary.advance));
    println!("Net salary    {:>14}", format_currency(summary.net_salary()));

    if let Some(path) = &range.export {
        export_sheet(&driver_payment_sheet(&rows, &summary), path)?;
    }

    Ok(())
}

async fn run_vendor_payments(range: PaymentArgs, client: ApiClient) -> Result<(), Error> {
    let mut state = ViewState::default()
        .apply(Action::LoggedIn)
        .apply(Action::SwitchTab(Tab::VendorPayment));

    if let Some(start) = &range.start {
        state = state.apply(Action::SetStartDate(Some(parse_cli_date("start", start)?)));
    }

    if let Some(end) = &range.end {
        state = state.apply(Action::SetEndDate(Some(parse_cli_date("end", end)?)));
    }

    let service = TripService::new(client);

    let trips = service.list().await?;
    let trips = filter_by_date(trips, &state.date_filter, |trip| trip.delivery_date);
    let trips = sort_by_key(&trips, state.sort.order, |trip| {
        trip.sort_key(state.sort.field)
    });

    let rows = project_vendor_payments(&trips);
    let summary = summarize_vendor_payments(&rows);

    for row in &rows {
        println!(
            "{:<12}  {:<28}  {:>5}  {:>9}  {:>12}  {:>12}  {:>12}",
            format_date(row.date),
            format!("{} - {}", row.from_location, row.to_location),
            row.number_of_bags,
            row.wayment,
            format_currency(row.rent),
            format_currency(row.misc_spends),
            format_currency(row.advance),
        );
    }

    println!();
    println!("Total rent    {:>14}", format_currency(summary.rent));
    println!("Misc spends   {:>14}", format_currency(summary.misc_spends));
    println!("Advance       {:>14}", format_currency(summary.advance));
    println!("Net payment   {:>14}", format_currency(summary.net_payment()));

    if let Some(path) = &range.export {
        export_sheet(&vendor_payment_sheet(&rows, &summary), path)?;
    }

    Ok(())
}

async fn run_delete(
    category: Category,
    id: u64,
    yes: bool,
    client: ApiClient,
) -> Result<(), Error> {
    if !yes {
        println!(
            "Would delete {} record {id}. Re-run with --yes to confirm.",
            category.noun()
        );
        return Ok(());
    }

    // Mutate, then refetch; the remaining count confirms the list is in sync.
    let remaining = match category {
        Category::Trip => {
            let service = TripService::new(client);
            service.delete(id).await?;
            service.list().await?.len()
        }
        Category::Maintenance => {
            let service = MaintenanceService::new(client);
            service.delete(id).await?;
            service.list().await?.len()
        }
        Category::Fuel => {
            let service = FuelService::new(client);
            service.delete(id).await?;
            service.list().await?.len()
        }
        Category::Advance => {
            let service = AdvanceService::new(client);
            service.delete(id).await?;
            service.list().await?.len()
        }
    };

    println!(
        "Deleted {} record {id}. {remaining} records remain.",
        category.noun()
    );

    Ok(())
}
