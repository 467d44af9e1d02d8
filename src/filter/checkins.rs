use std::fmt;
use std::str::FromStr;

use super::Filters;

/// Which arrivals the check-in desk lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckInWindow {
    #[default]
    Today,
    Upcoming,
    CheckedIn,
}

impl CheckInWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckInWindow::Today => "today",
            CheckInWindow::Upcoming => "upcoming",
            CheckInWindow::CheckedIn => "checked-in",
        }
    }
}

impl fmt::Display for CheckInWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckInWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(CheckInWindow::Today),
            "upcoming" => Ok(CheckInWindow::Upcoming),
            "checked-in" | "checked_in" => Ok(CheckInWindow::CheckedIn),
            other => Err(format!("unknown check-in window '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckInFilters {
    pub window: CheckInWindow,
}

impl Filters for CheckInFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![("filter", self.window.as_str().to_string())]
    }
}
