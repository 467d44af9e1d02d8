use serde::{Deserialize, Serialize};

use super::EntityId;

/// The signed-in administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: EntityId,
    pub name: String,
    pub email: String,
}

/// JSON body of `PUT /admin/profile`. The password is only sent when set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_rooms: u64,
    pub total_bookings: u64,
    pub paid_bookings: u64,
    pub pending_bookings: u64,
}

impl DashboardStats {
    /// Bookings per room as a rounded percentage; `None` without rooms.
    pub fn occupancy_percent(&self) -> Option<u64> {
        if self.total_rooms == 0 {
            return None;
        }
        Some((self.total_bookings as f64 / self.total_rooms as f64 * 100.0).round() as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentBooking {
    pub id: EntityId,
    pub guest: String,
    pub room: String,
    pub status: String,
}

/// Body of `GET /admin/dashboard`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dashboard {
    pub admin: Option<AdminProfile>,
    pub stats: DashboardStats,
    pub recent_bookings: Vec<RecentBooking>,
}
