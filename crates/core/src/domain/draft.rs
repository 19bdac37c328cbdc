use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::booking::HotelId;
use crate::domain::room::RoomSelection;
use crate::domain::stay::StayRange;

/// Immutable snapshot of a finished room selection, produced by
/// [`crate::pricing::PricingAggregator::finalize`]. A draft is never
/// edited in place; any further change runs through the aggregator again
/// and yields a new draft.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReservationDraft {
    hotel_id: HotelId,
    stay: StayRange,
    selections: Vec<RoomSelection>,
    grand_total: Decimal,
    created_at: DateTime<Utc>,
}

impl ReservationDraft {
    pub(crate) fn new(
        hotel_id: HotelId,
        stay: StayRange,
        selections: Vec<RoomSelection>,
        grand_total: Decimal,
    ) -> Self {
        Self { hotel_id, stay, selections, grand_total, created_at: Utc::now() }
    }

    pub fn hotel_id(&self) -> &HotelId {
        &self.hotel_id
    }

    pub fn stay(&self) -> StayRange {
        self.stay
    }

    /// Selections in the order the guest added them.
    pub fn selections(&self) -> &[RoomSelection] {
        &self.selections
    }

    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
