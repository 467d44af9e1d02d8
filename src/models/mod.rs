//! Entities served by the hotel backend.

mod booking;
mod checkin;
mod dashboard;
mod report;
mod room;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use booking::{Booking, BookingDraft, BookingStats, BookingStatus, BookingUpdate, PaymentStatus, RoomRef};
pub use checkin::CheckInBooking;
pub use dashboard::{AdminProfile, Dashboard, DashboardStats, ProfileUpdate, RecentBooking};
pub use report::{Report, ReportStats, RevenueByDay, TopRoom};
pub use room::{ImageUpload, Room, RoomDraft, RoomImage, RoomQuery, RoomSort, RoomSummary, MAX_ROOM_IMAGES};

/// Backend primary key.
pub type EntityId = u64;

/// Anything a list view can hold and reconcile by id.
pub trait Entity: Clone + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static {
    fn id(&self) -> EntityId;
}

impl Entity for Booking {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Entity for CheckInBooking {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Entity for Room {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Case-insensitive substring match used by local search boxes.
pub(crate) fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}
