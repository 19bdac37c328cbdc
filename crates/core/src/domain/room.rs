use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomTypeId(pub String);

/// Catalog entry for one room type, supplied per search result by the
/// room inventory collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomType {
    pub id: RoomTypeId,
    pub name: String,
    pub unit_price: Decimal,
    pub available_units: u32,
}

/// Occupant counts for one room type, as last configured by the guest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
}

impl Occupancy {
    pub fn adults_only(adults: u32) -> Self {
        Self { adults, children: 0, infants: 0 }
    }
}

/// One priced line of an in-progress reservation. The unit price is fixed
/// at selection time and does not move when the stay range changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSelection {
    pub room_type_id: RoomTypeId,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub occupancy: Occupancy,
}
