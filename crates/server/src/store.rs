//! In-memory stand-in for the persistence collaborator. Bookings and the
//! room-type catalog live behind read-write locks; guest sessions live
//! behind a single mutex so edits to one aggregator always serialize.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use chrono::Utc;
use innkeep_core::audit::{AuditContext, AuditSink};
use innkeep_core::lifecycle::{attempt_transition_with_audit, TransitionError};
use innkeep_core::{
    Booking, BookingId, BookingStatus, HotelId, PricingAggregator, ReservationDraft, RoomType,
    RoomTypeId,
};

#[derive(Default)]
pub struct Store {
    catalog: RwLock<HashMap<HotelId, Vec<RoomType>>>,
    bookings: RwLock<HashMap<BookingId, Booking>>,
    sessions: Mutex<HashMap<String, PricingAggregator>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the catalog for one hotel with the supplied entries.
    pub fn load_rooms(&self, hotel_id: HotelId, rooms: Vec<RoomType>) {
        match self.catalog.write() {
            Ok(mut catalog) => {
                catalog.insert(hotel_id, rooms);
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(hotel_id, rooms);
            }
        }
    }

    pub fn rooms(&self, hotel_id: &HotelId) -> Option<Vec<RoomType>> {
        let catalog = match self.catalog.read() {
            Ok(catalog) => catalog,
            Err(poisoned) => poisoned.into_inner(),
        };
        catalog.get(hotel_id).cloned()
    }

    pub fn room(&self, hotel_id: &HotelId, room_type_id: &RoomTypeId) -> Option<RoomType> {
        self.rooms(hotel_id)?.into_iter().find(|room| &room.id == room_type_id)
    }

    /// Runs `edit` against the session's aggregator, creating the session
    /// on first touch. The session map mutex is the per-session
    /// serialization the aggregator requires.
    pub fn with_session<F, T>(&self, session: &str, edit: F) -> T
    where
        F: FnOnce(&mut PricingAggregator) -> T,
    {
        let mut sessions = match self.sessions.lock() {
            Ok(sessions) => sessions,
            Err(poisoned) => poisoned.into_inner(),
        };
        edit(sessions.entry(session.to_owned()).or_default())
    }

    pub fn clear_session(&self, session: &str) {
        let mut sessions = match self.sessions.lock() {
            Ok(sessions) => sessions,
            Err(poisoned) => poisoned.into_inner(),
        };
        sessions.remove(session);
    }

    /// Persists a finalized draft as a fresh `pending` booking.
    pub fn create_booking(&self, draft: &ReservationDraft, guest_name: String) -> Booking {
        let booking = Booking {
            id: BookingId::generate(),
            hotel_id: draft.hotel_id().clone(),
            guest_name,
            stay: draft.stay(),
            status: BookingStatus::default(),
            total: draft.grand_total(),
            created_at: Utc::now(),
        };
        match self.bookings.write() {
            Ok(mut bookings) => {
                bookings.insert(booking.id.clone(), booking.clone());
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(booking.id.clone(), booking.clone());
            }
        }
        booking
    }

    pub fn booking(&self, id: &BookingId) -> Option<Booking> {
        let bookings = match self.bookings.read() {
            Ok(bookings) => bookings,
            Err(poisoned) => poisoned.into_inner(),
        };
        bookings.get(id).cloned()
    }

    pub fn bookings_for_hotel(&self, hotel_id: &HotelId) -> Vec<Booking> {
        let bookings = match self.bookings.read() {
            Ok(bookings) => bookings,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut found: Vec<Booking> =
            bookings.values().filter(|booking| &booking.hotel_id == hotel_id).cloned().collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        found
    }

    /// Compare-and-set of the booking status under the write lock: the
    /// decision and the update cannot interleave with another caller.
    /// `None` means the booking does not exist.
    pub fn transition_booking<S>(
        &self,
        id: &BookingId,
        requested: BookingStatus,
        sink: &S,
        audit: &AuditContext,
    ) -> Option<Result<BookingStatus, TransitionError>>
    where
        S: AuditSink,
    {
        let mut bookings = match self.bookings.write() {
            Ok(bookings) => bookings,
            Err(poisoned) => poisoned.into_inner(),
        };
        let booking = bookings.get_mut(id)?;
        let result = attempt_transition_with_audit(booking.status, requested, sink, audit);
        if let Ok(next) = &result {
            booking.status = *next;
        }
        Some(result)
    }
}
