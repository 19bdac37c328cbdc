use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::stay::StayRange;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub String);

impl BookingId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HotelId(pub String);

/// Lifecycle position of a persisted booking. `Rejected` and `CheckedOut`
/// are terminal; every booking starts out `Pending`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Paid,
    CheckedIn,
    CheckedOut,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 6] = [
        BookingStatus::Pending,
        BookingStatus::Approved,
        BookingStatus::Rejected,
        BookingStatus::Paid,
        BookingStatus::CheckedIn,
        BookingStatus::CheckedOut,
    ];
}

impl Default for BookingStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// A persisted reservation as the booking store hands it back.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Booking {
    pub id: BookingId,
    pub hotel_id: HotelId,
    pub guest_name: String,
    pub stay: StayRange,
    pub status: BookingStatus,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}
