use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportStats {
    pub total_bookings: u64,
    pub total_revenue: f64,
    pub confirmed: u64,
    pub cancelled: u64,
    pub paid: u64,
    pub pending: u64,
    pub failed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueByDay {
    pub date: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRoom {
    pub room_name: String,
    pub bookings: u64,
}

/// Body of `GET /admin/reports`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    pub stats: ReportStats,
    pub revenue_by_day: Vec<RevenueByDay>,
    pub top_rooms: Vec<TopRoom>,
}

impl Report {
    /// Day with the highest revenue, if any.
    pub fn best_day(&self) -> Option<&RevenueByDay> {
        self.revenue_by_day
            .iter()
            .max_by(|a, b| a.revenue.total_cmp(&b.revenue))
    }
}
