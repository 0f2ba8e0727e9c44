//! Alert requests and the actions a user can answer them with.
//!
//! An alert is a two-step interaction: the pipeline emits an [`Alert`] with
//! an id and a fixed set of [`AlertAction`]s, and the presentation surface
//! answers with exactly one of those actions tagged with the same id. Only
//! the most recently emitted alert accepts an answer.
//!
//! Two alerts exist:
//! - **Sort options**: an action sheet offering Title, Datetime and Cancel
//! - **Search error**: a plain alert acknowledged with Confirm
//!
//! # Example
//!
//! ```rust
//! use blogsearch::app::alert::{Alert, AlertAction, AlertStyle};
//!
//! let alert = Alert::sort_options(1);
//! assert_eq!(alert.style, AlertStyle::ActionSheet);
//! assert!(alert.offers(AlertAction::Datetime));
//! assert!(!alert.offers(AlertAction::Confirm));
//! ```

use crate::domain::SortCriterion;

/// Title of the search error alert.
pub const SEARCH_ERROR_TITLE: &str = "Oops!";

/// Body of the search error alert.
pub const SEARCH_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Presentation style of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStyle {
    /// Centered dialog.
    Alert,
    /// Sheet of options anchored to the bottom of the screen.
    ActionSheet,
}

/// Visual weight of a single alert button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStyle {
    Default,
    Cancel,
}

/// Answers a user can give to an alert.
///
/// `Title` and `Datetime` select a sort criterion. `Cancel` and `Confirm`
/// only dismiss the alert and never touch sort state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertAction {
    Title,
    Datetime,
    Cancel,
    Confirm,
}

impl AlertAction {
    /// Button label.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Datetime => "Datetime",
            Self::Cancel => "Cancel",
            Self::Confirm => "OK",
        }
    }

    #[must_use]
    pub const fn style(self) -> ActionStyle {
        match self {
            Self::Title | Self::Datetime => ActionStyle::Default,
            Self::Cancel | Self::Confirm => ActionStyle::Cancel,
        }
    }

    /// Sort criterion selected by this action, if any.
    #[must_use]
    pub const fn sort_criterion(self) -> Option<SortCriterion> {
        match self {
            Self::Title => Some(SortCriterion::ByTitle),
            Self::Datetime => Some(SortCriterion::ByDatetime),
            Self::Cancel | Self::Confirm => None,
        }
    }
}

/// What an alert was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    SortOptions,
    SearchError,
}

/// A request for the presentation surface to show an alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Identifier the answer must carry.
    pub id: u64,
    pub kind: AlertKind,
    pub title: Option<String>,
    pub message: Option<String>,
    /// Underlying failure reason for error alerts, for logs or a details view.
    pub detail: Option<String>,
    /// Offered actions, in display order.
    pub actions: Vec<AlertAction>,
    pub style: AlertStyle,
}

impl Alert {
    /// Action sheet for choosing the sort criterion.
    #[must_use]
    pub fn sort_options(id: u64) -> Self {
        Self {
            id,
            kind: AlertKind::SortOptions,
            title: None,
            message: None,
            detail: None,
            actions: vec![AlertAction::Title, AlertAction::Datetime, AlertAction::Cancel],
            style: AlertStyle::ActionSheet,
        }
    }

    /// Generic error notice for a failed search.
    #[must_use]
    pub fn search_error(id: u64, reason: &str) -> Self {
        Self {
            id,
            kind: AlertKind::SearchError,
            title: Some(SEARCH_ERROR_TITLE.to_string()),
            message: Some(SEARCH_ERROR_MESSAGE.to_string()),
            detail: Some(reason.to_string()),
            actions: vec![AlertAction::Confirm],
            style: AlertStyle::Alert,
        }
    }

    /// Whether `action` is one of the offered answers.
    #[must_use]
    pub fn offers(&self, action: AlertAction) -> bool {
        self.actions.contains(&action)
    }
}
