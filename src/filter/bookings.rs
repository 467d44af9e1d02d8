use crate::models::{BookingStatus, PaymentStatus};

use super::Filters;

/// Filters of the bookings table. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilters {
    pub search: String,
    pub status: Option<BookingStatus>,
    pub payment: Option<PaymentStatus>,
}

impl Filters for BookingFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search", search.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(payment) = self.payment {
            pairs.push(("payment", payment.as_str().to_string()));
        }
        pairs
    }
}
