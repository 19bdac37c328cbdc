pub mod audit;
pub mod availability;
pub mod config;
pub mod domain;
pub mod errors;
pub mod lifecycle;
pub mod pricing;

pub use audit::{
    AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink, InMemoryAuditSink,
};
pub use availability::{days_in_month, first_weekday_offset, OccupancyIndex};
pub use domain::booking::{Booking, BookingId, BookingStatus, HotelId};
pub use domain::draft::ReservationDraft;
pub use domain::room::{Occupancy, RoomSelection, RoomType, RoomTypeId};
pub use domain::stay::{RangeError, StayRange};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use lifecycle::{
    attempt_transition, attempt_transition_with_audit, available_actions, is_terminal,
    TransitionError,
};
pub use pricing::{DraftError, PricingAggregator, SelectionError, MAX_UNITS_PER_TYPE};
