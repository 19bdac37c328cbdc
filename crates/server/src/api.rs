//! HTTP facade over the reservation core. Handlers translate wire DTOs to
//! core calls and map the typed error taxonomy onto status codes; no
//! business rule lives here.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use innkeep_core::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use innkeep_core::errors::{ApplicationError, DomainError, InterfaceError};
use innkeep_core::{
    available_actions, days_in_month, first_weekday_offset, Booking, BookingId, BookingStatus,
    HotelId, Occupancy, OccupancyIndex, RoomType, RoomTypeId, StayRange,
};

use crate::bootstrap::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/hotels/{hotel_id}/rooms", get(list_rooms).post(load_rooms))
        .route("/hotels/{hotel_id}/calendar/{year}/{month}", get(month_calendar))
        .route("/sessions/{session}/stay", put(put_stay))
        .route("/sessions/{session}/selections", post(add_selection))
        .route("/sessions/{session}/selections/{room_type_id}", delete(remove_selection))
        .route("/sessions/{session}/quote", get(quote))
        .route("/sessions/{session}/checkout", post(checkout))
        .route("/bookings/{booking_id}", get(get_booking))
        .route("/bookings/{booking_id}/actions", get(booking_actions))
        .route("/bookings/{booking_id}/status", post(change_status))
        .with_state(state)
}

pub struct ApiError(InterfaceError);

impl ApiError {
    fn domain(error: impl Into<DomainError>, correlation_id: &str) -> Self {
        Self(ApplicationError::from(error.into()).into_interface(correlation_id))
    }

    fn not_found(message: impl Into<String>, correlation_id: &str) -> Self {
        Self(ApplicationError::Persistence(message.into()).into_interface(correlation_id))
    }

    fn bad_request(kind: &'static str, message: impl Into<String>, correlation_id: &str) -> Self {
        Self(InterfaceError::BadRequest {
            kind,
            message: message.into(),
            correlation_id: correlation_id.to_owned(),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self.0 {
            InterfaceError::BadRequest { kind, .. } => (StatusCode::BAD_REQUEST, *kind),
            InterfaceError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            InterfaceError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        let correlation_id = match &self.0 {
            InterfaceError::BadRequest { correlation_id, .. }
            | InterfaceError::NotFound { correlation_id, .. }
            | InterfaceError::Internal { correlation_id, .. } => correlation_id.clone(),
        };
        let body = Json(serde_json::json!({
            "error": kind,
            "message": self.0.user_message(),
            "correlation_id": correlation_id,
        }));
        (status, body).into_response()
    }
}

fn new_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Deserialize)]
pub struct StayRequest {
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct StayResponse {
    pub nights: u32,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub hotel_id: String,
    pub room_type_id: String,
    pub quantity: u32,
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub room_type_id: RoomTypeId,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct QuoteLine {
    pub room_type_id: RoomTypeId,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub nights: u32,
    pub lines: Vec<QuoteLine>,
    pub grand_total: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub hotel_id: String,
    pub guest_name: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub booking_id: BookingId,
    pub status: BookingStatus,
    pub total: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub requested: BookingStatus,
}

/// The transition decision as the admin UI consumes it: rejections are a
/// payload to pattern-match on, not a transport failure.
#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ActionsResponse {
    pub status: BookingStatus,
    pub actions: Vec<BookingStatus>,
}

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub booked: bool,
    pub guests: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_rooms(
    State(state): State<Arc<AppState>>,
    Path(hotel_id): Path<String>,
) -> Result<Json<Vec<RoomType>>, ApiError> {
    let correlation_id = new_correlation_id();
    state
        .store
        .rooms(&HotelId(hotel_id.clone()))
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("unknown hotel `{hotel_id}`"), &correlation_id))
}

async fn load_rooms(
    State(state): State<Arc<AppState>>,
    Path(hotel_id): Path<String>,
    Json(rooms): Json<Vec<RoomType>>,
) -> StatusCode {
    state.store.load_rooms(HotelId(hotel_id), rooms);
    StatusCode::NO_CONTENT
}

async fn month_calendar(
    State(state): State<Arc<AppState>>,
    Path((hotel_id, year, month)): Path<(String, i32, u32)>,
) -> Result<Json<CalendarResponse>, ApiError> {
    let correlation_id = new_correlation_id();
    let days = days_in_month(year, month).ok_or_else(|| {
        ApiError::bad_request(
            "invalid_month",
            format!("no such month: {year}-{month}"),
            &correlation_id,
        )
    })?;
    let leading_blanks = first_weekday_offset(year, month).unwrap_or(0);

    // Rejected bookings never occupy a day; every other status does,
    // checked-out stays included (their nights already happened).
    let hotel_id = HotelId(hotel_id);
    let spans = state
        .store
        .bookings_for_hotel(&hotel_id)
        .into_iter()
        .filter(|booking| booking.status != BookingStatus::Rejected)
        .map(|booking| (booking.stay.check_in(), booking.stay.check_out(), booking.guest_name));
    let index = OccupancyIndex::build(spans);

    let days = days
        .into_iter()
        .map(|date| CalendarDay {
            date,
            booked: index.is_booked(date),
            guests: index.contributors(date).to_vec(),
        })
        .collect();

    Ok(Json(CalendarResponse { year, month, leading_blanks, days }))
}

async fn put_stay(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(request): Json<StayRequest>,
) -> Result<Json<StayResponse>, ApiError> {
    let correlation_id = new_correlation_id();
    let stay = StayRange::new(request.check_in, request.check_out)
        .map_err(|error| ApiError::domain(error, &correlation_id))?;
    state.store.with_session(&session, |aggregator| aggregator.set_stay(stay));
    Ok(Json(StayResponse { nights: stay.nights() }))
}

async fn add_selection(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let correlation_id = new_correlation_id();
    let hotel_id = HotelId(request.hotel_id.clone());
    let room_type_id = RoomTypeId(request.room_type_id.clone());
    let room = state.store.room(&hotel_id, &room_type_id).ok_or_else(|| {
        ApiError::not_found(
            format!("unknown room type `{}` for hotel `{}`", request.room_type_id, request.hotel_id),
            &correlation_id,
        )
    })?;

    let occupancy = Occupancy {
        adults: request.adults,
        children: request.children,
        infants: request.infants,
    };
    let quantity = state
        .store
        .with_session(&session, |aggregator| {
            aggregator.add_or_merge_selection(
                room.id.clone(),
                room.unit_price,
                request.quantity,
                occupancy,
                room.available_units,
            )
        })
        .map_err(|error| ApiError::domain(error, &correlation_id))?;

    Ok(Json(SelectionResponse { room_type_id: room.id, quantity }))
}

async fn remove_selection(
    State(state): State<Arc<AppState>>,
    Path((session, room_type_id)): Path<(String, String)>,
) -> StatusCode {
    let room_type_id = RoomTypeId(room_type_id);
    state.store.with_session(&session, |aggregator| aggregator.remove_selection(&room_type_id));
    StatusCode::NO_CONTENT
}

async fn quote(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
) -> Json<QuoteResponse> {
    let response = state.store.with_session(&session, |aggregator| {
        let nights = aggregator.stay().map_or(0, |stay| stay.nights());
        let lines = aggregator
            .selections()
            .to_vec()
            .into_iter()
            .map(|line| {
                let line_total = aggregator.line_total(&line.room_type_id);
                QuoteLine {
                    room_type_id: line.room_type_id,
                    unit_price: line.unit_price,
                    quantity: line.quantity,
                    line_total,
                }
            })
            .collect();
        QuoteResponse { nights, lines, grand_total: aggregator.grand_total() }
    });
    Json(response)
}

async fn checkout(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let correlation_id = new_correlation_id();
    let draft = state
        .store
        .with_session(&session, |aggregator| aggregator.finalize(HotelId(request.hotel_id)))
        .map_err(|error| ApiError::domain(error, &correlation_id))?;

    let booking = state.store.create_booking(&draft, request.guest_name);
    state.store.clear_session(&session);

    state.audit.emit(
        AuditEvent::new(
            Some(booking.id.clone()),
            correlation_id.clone(),
            "booking.draft_persisted",
            AuditCategory::Pricing,
            "guest-session",
            AuditOutcome::Success,
        )
        .with_metadata("total", booking.total.to_string()),
    );
    info!(
        event_name = "booking.created",
        booking_id = %booking.id.0,
        correlation_id = %correlation_id,
        total = %booking.total,
        "draft persisted as pending booking"
    );

    Ok(Json(CheckoutResponse { booking_id: booking.id, status: booking.status, total: booking.total }))
}

async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    let correlation_id = new_correlation_id();
    state
        .store
        .booking(&BookingId(booking_id.clone()))
        .map(Json)
        .ok_or_else(|| {
            ApiError::not_found(format!("unknown booking `{booking_id}`"), &correlation_id)
        })
}

async fn booking_actions(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<Json<ActionsResponse>, ApiError> {
    let correlation_id = new_correlation_id();
    let booking = state.store.booking(&BookingId(booking_id.clone())).ok_or_else(|| {
        ApiError::not_found(format!("unknown booking `{booking_id}`"), &correlation_id)
    })?;
    Ok(Json(ActionsResponse {
        status: booking.status,
        actions: available_actions(booking.status).to_vec(),
    }))
}

async fn change_status(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<TransitionResponse>, ApiError> {
    let correlation_id = new_correlation_id();
    let booking_id = BookingId(booking_id);
    let context = AuditContext::new(Some(booking_id.clone()), correlation_id.clone(), "admin-api");

    let decision = state
        .store
        .transition_booking(&booking_id, request.requested, &state.audit, &context)
        .ok_or_else(|| {
            ApiError::not_found(format!("unknown booking `{}`", booking_id.0), &correlation_id)
        })?;

    let response = match decision {
        Ok(next) => {
            info!(
                event_name = "booking.status_changed",
                booking_id = %booking_id.0,
                correlation_id = %correlation_id,
                new_status = ?next,
                "status transition applied"
            );
            TransitionResponse { ok: true, new_status: Some(next), error_kind: None }
        }
        Err(error) => TransitionResponse {
            ok: false,
            new_status: None,
            error_kind: Some(DomainError::from(error).kind()),
        },
    };
    Ok(Json(response))
}
