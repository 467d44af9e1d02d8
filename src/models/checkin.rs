use serde::{Deserialize, Serialize};

use super::{contains_ignore_case, BookingStatus, EntityId, RoomRef};

/// Booking as listed on the check-in desk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInBooking {
    pub id: EntityId,
    #[serde(default)]
    pub booking_ref: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub room: Option<RoomRef>,
    pub check_in: String,
    pub check_out: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub is_checked_in: bool,
}

impl CheckInBooking {
    /// Local search over guest name, e-mail and booking reference.
    ///
    /// An empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim();
        term.is_empty()
            || contains_ignore_case(self.name.as_deref(), term)
            || contains_ignore_case(self.email.as_deref(), term)
            || contains_ignore_case(self.booking_ref.as_deref(), term)
    }
}
