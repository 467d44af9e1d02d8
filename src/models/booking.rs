use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::gateway::MultipartForm;

use super::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Failed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status '{}'", other)),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "paid" => Ok(PaymentStatus::Paid),
            "pending" => Ok(PaymentStatus::Pending),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(format!("unknown payment status '{}'", other)),
        }
    }
}

/// Room summary embedded in bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRef {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: EntityId,
    #[serde(default)]
    pub booking_ref: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub guests: Option<u32>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub total_price: Option<f64>,
    pub check_in: String,
    pub check_out: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub room: Option<RoomRef>,
}

/// Header figures of the bookings page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingStats {
    pub total: u64,
    pub confirmed: u64,
    pub paid: u64,
    pub pending: u64,
}

/// JSON body of `PUT /admin/bookings/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
}

impl From<&Booking> for BookingUpdate {
    fn from(booking: &Booking) -> Self {
        Self {
            name: booking.name.clone(),
            email: booking.email.clone(),
            phone: booking.phone.clone(),
            status: booking.status,
            payment_status: booking.payment_status,
        }
    }
}

/// New booking entered from the back-office (sent as form data).
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub room_id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub guests: u32,
    pub check_in: String,
    pub check_out: String,
}

impl BookingDraft {
    pub fn to_form(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("room_id", self.room_id.to_string())
            .text("name", self.name.clone())
            .text("email", self.email.clone())
            .text("guests", self.guests.to_string())
            .text("check_in", self.check_in.clone())
            .text("check_out", self.check_out.clone());
        if let Some(phone) = &self.phone {
            form = form.text("phone", phone.clone());
        }
        form
    }
}
