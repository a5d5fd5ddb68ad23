//! Screen state for the record-keeping views.
//!
//! The UI drives one immutable [ViewState] value through pure [Action]
//! transitions instead of scattering independent flags. The reducer never
//! performs IO: the caller reads the state (e.g. [ViewState::pending_delete])
//! and routes the remote calls itself, feeding the outcome back in as
//! [Action::LoadSucceeded] or [Action::LoadFailed].

use time::Date;

use crate::{
    filter::DateFilter,
    sort::{SortConfig, SortField},
};

/// The record tables the screen can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// The delivery trip table.
    Delivery,
    /// The maintenance table.
    Maintenance,
    /// The fuel purchase table.
    Fuel,
    /// The driver advance table.
    Advance,
    /// The derived driver payment view.
    DriverPayment,
    /// The derived vendor payment view.
    VendorPayment,
}

impl Tab {
    /// The heading shown for the tab.
    pub fn label(self) -> &'static str {
        match self {
            Self::Delivery => "Delivery",
            Self::Maintenance => "Maintenance",
            Self::Fuel => "Fuel",
            Self::Advance => "Advance",
            Self::DriverPayment => "Driver Payment",
            Self::VendorPayment => "Vendor Payment",
        }
    }

    /// Whether the tab offers a create/edit form.
    ///
    /// The payment tabs are derived views and are list-only.
    pub fn has_form(self) -> bool {
        !matches!(self, Self::DriverPayment | Self::VendorPayment)
    }

    fn default_sort() -> SortConfig {
        SortConfig::descending(SortField::Date)
    }
}

/// Whether the screen shows the record list or the create/edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The record table.
    List,
    /// The create/edit form.
    Form {
        /// The record being edited, or `None` when creating a new one.
        editing: Option<u64>,
    },
}

/// Everything the screen needs to render, as one value.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Whether the user has logged in.
    pub authenticated: bool,
    /// The active record table.
    pub tab: Tab,
    /// List or form.
    pub mode: Mode,
    /// The date range restricting every table.
    pub date_filter: DateFilter,
    /// The free-text search term for the active table.
    pub search: String,
    /// The active sort column and direction.
    pub sort: SortConfig,
    /// Whether a remote call is in flight.
    pub loading: bool,
    /// The last recoverable error, shown until the next action clears it.
    pub error: Option<String>,
    /// A delete awaiting explicit confirmation.
    pub pending_delete: Option<u64>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            authenticated: false,
            tab: Tab::Delivery,
            mode: Mode::List,
            date_filter: DateFilter::default(),
            search: String::new(),
            sort: Tab::default_sort(),
            loading: false,
            error: None,
            pending_delete: None,
        }
    }
}

/// A user or network event driving the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The remote service accepted the credentials.
    LoggedIn,
    /// The user logged out; everything resets.
    LoggedOut,
    /// Show another record table.
    SwitchTab(Tab),
    /// Open the create form.
    OpenForm,
    /// Open the form pre-filled with the record to edit.
    EditRecord(u64),
    /// Back to the list without saving.
    CloseForm,
    /// Set or clear the lower date bound.
    SetStartDate(Option<Date>),
    /// Set or clear the upper date bound.
    SetEndDate(Option<Date>),
    /// Change the search term.
    SetSearch(String),
    /// A sort header was clicked; toggle semantics apply.
    SortBy(SortField),
    /// A remote call started.
    LoadStarted,
    /// The remote call finished.
    LoadSucceeded,
    /// The remote call failed with a displayable message.
    LoadFailed(String),
    /// The user asked to delete a record; confirmation is required before
    /// the destructive call goes out.
    RequestDelete(u64),
    /// The user backed out of the delete.
    CancelDelete,
    /// The user confirmed; the caller issues the delete and the pending
    /// marker is cleared.
    ConfirmDelete,
}

impl ViewState {
    /// The state after `action`. Pure: the previous state is consumed and a
    /// new one returned.
    pub fn apply(self, action: Action) -> Self {
        match action {
            Action::LoggedIn => Self {
                authenticated: true,
                ..self
            },
            Action::LoggedOut => Self::default(),
            Action::SwitchTab(tab) => Self {
                tab,
                mode: Mode::List,
                search: String::new(),
                sort: Tab::default_sort(),
                error: None,
                pending_delete: None,
                ..self
            },
            Action::OpenForm if self.tab.has_form() => Self {
                mode: Mode::Form { editing: None },
                error: None,
                ..self
            },
            Action::OpenForm => self,
            Action::EditRecord(id) if self.tab.has_form() => Self {
                mode: Mode::Form { editing: Some(id) },
                error: None,
                ..self
            },
            Action::EditRecord(_) => self,
            Action::CloseForm => Self {
                mode: Mode::List,
                ..self
            },
            Action::SetStartDate(start) => Self {
                date_filter: DateFilter {
                    start,
                    ..self.date_filter
                },
                ..self
            },
            Action::SetEndDate(end) => Self {
                date_filter: DateFilter {
                    end,
                    ..self.date_filter
                },
                ..self
            },
            Action::SetSearch(search) => Self { search, ..self },
            Action::SortBy(field) => Self {
                sort: self.sort.toggle(field),
                ..self
            },
            Action::LoadStarted => Self {
                loading: true,
                error: None,
                ..self
            },
            Action::LoadSucceeded => Self {
                loading: false,
                ..self
            },
            Action::LoadFailed(message) => Self {
                loading: false,
                error: Some(message),
                ..self
            },
            Action::RequestDelete(id) => Self {
                pending_delete: Some(id),
                ..self
            },
            Action::CancelDelete | Action::ConfirmDelete => Self {
                pending_delete: None,
                ..self
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::sort::{SortConfig, SortField, SortOrder};

    use super::{Action, Mode, Tab, ViewState};

    fn logged_in() -> ViewState {
        ViewState::default().apply(Action::LoggedIn)
    }

    #[test]
    fn switching_tabs_returns_to_the_list_and_resets_the_sort() {
        let state = logged_in()
            .apply(Action::OpenForm)
            .apply(Action::SetSearch("rajesh".to_owned()))
            .apply(Action::SortBy(SortField::DriverRent))
            .apply(Action::SwitchTab(Tab::Fuel));

        assert_eq!(state.tab, Tab::Fuel);
        assert_eq!(state.mode, Mode::List);
        assert_eq!(state.search, "");
        assert_eq!(state.sort, SortConfig::descending(SortField::Date));
    }

    #[test]
    fn switching_tabs_keeps_the_date_range() {
        let state = logged_in()
            .apply(Action::SetStartDate(Some(date!(2024 - 03 - 01))))
            .apply(Action::SwitchTab(Tab::Advance));

        assert_eq!(state.date_filter.start, Some(date!(2024 - 03 - 01)));
    }

    #[test]
    fn sort_header_clicks_toggle_through_ascending_then_descending() {
        let state = logged_in().apply(Action::SortBy(SortField::DriverName));
        assert_eq!(state.sort.order, SortOrder::Ascending);

        let state = state.apply(Action::SortBy(SortField::DriverName));
        assert_eq!(state.sort.order, SortOrder::Descending);

        let state = state.apply(Action::SortBy(SortField::DriverName));
        assert_eq!(state.sort.order, SortOrder::Ascending);
    }

    #[test]
    fn payment_tabs_never_open_a_form() {
        let state = logged_in()
            .apply(Action::SwitchTab(Tab::DriverPayment))
            .apply(Action::OpenForm)
            .apply(Action::EditRecord(3));

        assert_eq!(state.mode, Mode::List);
    }

    #[test]
    fn a_failed_load_clears_the_loading_flag_and_records_the_error() {
        let state = logged_in()
            .apply(Action::LoadStarted)
            .apply(Action::LoadFailed("network error: timed out".to_owned()));

        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("network error: timed out"));

        // The next load clears the error.
        let state = state.apply(Action::LoadStarted);
        assert!(state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn a_successful_load_also_clears_the_loading_flag() {
        let state = logged_in()
            .apply(Action::LoadStarted)
            .apply(Action::LoadSucceeded);

        assert!(!state.loading);
    }

    #[test]
    fn deletes_require_a_request_then_a_confirmation() {
        let state = logged_in().apply(Action::RequestDelete(7));
        assert_eq!(state.pending_delete, Some(7));

        let cancelled = state.clone().apply(Action::CancelDelete);
        assert_eq!(cancelled.pending_delete, None);

        let confirmed = state.apply(Action::ConfirmDelete);
        assert_eq!(confirmed.pending_delete, None);
    }

    #[test]
    fn editing_opens_the_form_on_the_selected_record() {
        let state = logged_in()
            .apply(Action::SwitchTab(Tab::Maintenance))
            .apply(Action::EditRecord(12));

        assert_eq!(state.mode, Mode::Form { editing: Some(12) });
    }

    #[test]
    fn logging_out_resets_everything() {
        let state = logged_in()
            .apply(Action::SwitchTab(Tab::Fuel))
            .apply(Action::SetSearch("pump".to_owned()))
            .apply(Action::LoggedOut);

        assert_eq!(state, ViewState::default());
    }
}
