//! Selection accumulation and priced-draft computation.
//!
//! One [`PricingAggregator`] belongs to one guest session. It holds no
//! locks of its own; a holder that shares it across callers must serialize
//! access per session key.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::booking::HotelId;
use crate::domain::draft::ReservationDraft;
use crate::domain::room::{Occupancy, RoomSelection, RoomTypeId};
use crate::domain::stay::StayRange;

/// UI ceiling on units of one room type in a single reservation. Merged
/// quantities clamp here silently; exceeding the hotel's actual
/// availability is an error instead.
pub const MAX_UNITS_PER_TYPE: u32 = 4;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("quantity for {room_type:?} must be at least 1")]
    InvalidQuantity { room_type: RoomTypeId },
    #[error("unit price {unit_price} for {room_type:?} cannot be negative")]
    NegativeUnitPrice { room_type: RoomTypeId, unit_price: Decimal },
    #[error("{requested} unit(s) of {room_type:?} requested, only {available} available")]
    QuantityExceeded { room_type: RoomTypeId, requested: u32, available: u32 },
    #[error("{room_type:?} needs at least one adult occupant")]
    InvalidOccupants { room_type: RoomTypeId },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("no stay range has been set")]
    NoStayRange,
    #[error("no rooms have been selected")]
    EmptySelection,
}

/// Accumulates one session's room-type choices against a stay range and
/// derives exact-decimal totals. [`finalize`](Self::finalize) snapshots the
/// state into an immutable [`ReservationDraft`].
#[derive(Clone, Debug, Default)]
pub struct PricingAggregator {
    stay: Option<StayRange>,
    selections: Vec<RoomSelection>,
}

impl PricingAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stay range. Existing selections keep the unit price
    /// fixed at selection time; only the nights multiplier moves.
    /// Invalid ranges are unrepresentable here; [`StayRange::new`]
    /// already rejected them.
    pub fn set_stay(&mut self, stay: StayRange) {
        self.stay = Some(stay);
    }

    pub fn stay(&self) -> Option<StayRange> {
        self.stay
    }

    /// Selections in the order the guest first added them.
    pub fn selections(&self) -> &[RoomSelection] {
        &self.selections
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Adds units of a room type, merging with an existing line for the
    /// same type. Merged quantities are summed and clamped at
    /// [`MAX_UNITS_PER_TYPE`]; occupant counts are replaced with the
    /// latest configuration, not summed. The unit price of an existing
    /// line never moves. Returns the quantity now held for the type.
    pub fn add_or_merge_selection(
        &mut self,
        room_type_id: RoomTypeId,
        unit_price: Decimal,
        quantity: u32,
        occupancy: Occupancy,
        available_units: u32,
    ) -> Result<u32, SelectionError> {
        if quantity == 0 {
            return Err(SelectionError::InvalidQuantity { room_type: room_type_id });
        }
        if unit_price < Decimal::ZERO {
            return Err(SelectionError::NegativeUnitPrice { room_type: room_type_id, unit_price });
        }
        if occupancy.adults == 0 {
            return Err(SelectionError::InvalidOccupants { room_type: room_type_id });
        }

        let held = self
            .selections
            .iter()
            .find(|line| line.room_type_id == room_type_id)
            .map_or(0, |line| line.quantity);
        let merged = held.saturating_add(quantity).min(MAX_UNITS_PER_TYPE);
        if merged > available_units {
            return Err(SelectionError::QuantityExceeded {
                room_type: room_type_id,
                requested: merged,
                available: available_units,
            });
        }

        match self.selections.iter_mut().find(|line| line.room_type_id == room_type_id) {
            Some(line) => {
                line.quantity = merged;
                line.occupancy = occupancy;
            }
            None => {
                self.selections.push(RoomSelection {
                    room_type_id,
                    unit_price,
                    quantity: merged,
                    occupancy,
                });
            }
        }
        Ok(merged)
    }

    /// Idempotent; removing an absent room type is a no-op.
    pub fn remove_selection(&mut self, room_type_id: &RoomTypeId) {
        self.selections.retain(|line| &line.room_type_id != room_type_id);
    }

    /// `unit_price x quantity x nights` for one line; zero for an absent
    /// room type or while no stay range is set.
    pub fn line_total(&self, room_type_id: &RoomTypeId) -> Decimal {
        let nights = Decimal::from(self.nights());
        self.selections
            .iter()
            .find(|line| &line.room_type_id == room_type_id)
            .map_or(Decimal::ZERO, |line| {
                line.unit_price * Decimal::from(line.quantity) * nights
            })
    }

    /// Sum of all line totals; zero with no selections. Exact decimal
    /// arithmetic throughout, nothing truncates before the sum.
    pub fn grand_total(&self) -> Decimal {
        let nights = Decimal::from(self.nights());
        self.selections
            .iter()
            .map(|line| line.unit_price * Decimal::from(line.quantity) * nights)
            .sum()
    }

    /// Snapshots the current selections, stay, and grand total into an
    /// immutable draft for hand-off to the persistence collaborator.
    pub fn finalize(&self, hotel_id: HotelId) -> Result<ReservationDraft, DraftError> {
        let stay = self.stay.ok_or(DraftError::NoStayRange)?;
        if self.selections.is_empty() {
            return Err(DraftError::EmptySelection);
        }
        Ok(ReservationDraft::new(hotel_id, stay, self.selections.clone(), self.grand_total()))
    }

    fn nights(&self) -> u32 {
        self.stay.map_or(0, |stay| stay.nights())
    }
}
