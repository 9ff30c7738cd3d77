use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::workflows::approval::VendorId;

use super::domain::{Booking, BookingId, EmployeeId};
use super::repository::{BookingRepository, Directory};
use super::service::{BookingAssignmentService, VendorResponse, WorkflowError};

/// Router builder for the booking assignment endpoints.
pub fn booking_router<R, D>(service: Arc<BookingAssignmentService<R, D>>) -> Router
where
    R: BookingRepository + 'static,
    D: Directory + 'static,
{
    Router::new()
        .route(
            "/api/v1/manager/bookings/:booking_id/assign-vendor",
            post(assign_vendor_handler::<R, D>),
        )
        .route(
            "/api/v1/manager/bookings/:booking_id/triage",
            post(triage_handler::<R, D>),
        )
        .route(
            "/api/v1/manager/bookings/stats",
            get(stats_handler::<R, D>),
        )
        .route(
            "/api/v1/vendor/bookings/:booking_id/respond",
            post(respond_handler::<R, D>),
        )
        .route(
            "/api/v1/bookings/:booking_id/start",
            post(start_handler::<R, D>),
        )
        .route(
            "/api/v1/bookings/:booking_id/complete",
            post(complete_handler::<R, D>),
        )
        .route(
            "/api/v1/bookings/:booking_id/cancel",
            post(cancel_handler::<R, D>),
        )
        .route("/api/v1/bookings/:booking_id", get(get_handler::<R, D>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct AssignVendorRequest {
    pub vendor_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case", tag = "decision")]
pub enum RespondRequest {
    Accept {
        vendor_id: String,
        #[serde(default)]
        employee_id: Option<String>,
    },
    Reject {
        vendor_id: String,
        #[serde(default)]
        reason: Option<String>,
    },
}

#[derive(Debug, Default, Deserialize)]
pub struct CancelRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Wire shape of a booking for dashboards and API clients.
#[derive(Debug, Serialize)]
pub struct BookingView {
    pub id: String,
    pub customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub status: &'static str,
    pub total_cents: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
}

impl From<Booking> for BookingView {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.0,
            customer_id: booking.customer.0,
            vendor_id: booking.vendor.map(|vendor| vendor.0),
            employee_id: booking.employee.map(|employee| employee.0),
            scheduled_date: booking.scheduled_date,
            scheduled_time: booking.scheduled_time,
            status: booking.status.label(),
            total_cents: booking.total_cents,
            cancellation_reason: booking.cancellation_reason,
        }
    }
}

pub(crate) async fn assign_vendor_handler<R, D>(
    State(service): State<Arc<BookingAssignmentService<R, D>>>,
    Path(booking_id): Path<String>,
    axum::Json(request): axum::Json<AssignVendorRequest>,
) -> Response
where
    R: BookingRepository + 'static,
    D: Directory + 'static,
{
    booking_response(service.assign_vendor(
        &BookingId(booking_id),
        &VendorId(request.vendor_id),
    ))
}

pub(crate) async fn triage_handler<R, D>(
    State(service): State<Arc<BookingAssignmentService<R, D>>>,
    Path(booking_id): Path<String>,
) -> Response
where
    R: BookingRepository + 'static,
    D: Directory + 'static,
{
    booking_response(service.classify_at_home(&BookingId(booking_id)))
}

pub(crate) async fn respond_handler<R, D>(
    State(service): State<Arc<BookingAssignmentService<R, D>>>,
    Path(booking_id): Path<String>,
    axum::Json(request): axum::Json<RespondRequest>,
) -> Response
where
    R: BookingRepository + 'static,
    D: Directory + 'static,
{
    let (vendor_id, response) = match request {
        RespondRequest::Accept {
            vendor_id,
            employee_id,
        } => (
            VendorId(vendor_id),
            VendorResponse::Accept {
                employee: employee_id.map(EmployeeId),
            },
        ),
        RespondRequest::Reject { vendor_id, reason } => {
            (VendorId(vendor_id), VendorResponse::Reject { reason })
        }
    };

    booking_response(service.respond_to_assignment(&BookingId(booking_id), &vendor_id, response))
}

pub(crate) async fn start_handler<R, D>(
    State(service): State<Arc<BookingAssignmentService<R, D>>>,
    Path(booking_id): Path<String>,
) -> Response
where
    R: BookingRepository + 'static,
    D: Directory + 'static,
{
    booking_response(service.start_service(&BookingId(booking_id)))
}

pub(crate) async fn complete_handler<R, D>(
    State(service): State<Arc<BookingAssignmentService<R, D>>>,
    Path(booking_id): Path<String>,
) -> Response
where
    R: BookingRepository + 'static,
    D: Directory + 'static,
{
    booking_response(service.complete(&BookingId(booking_id)))
}

pub(crate) async fn cancel_handler<R, D>(
    State(service): State<Arc<BookingAssignmentService<R, D>>>,
    Path(booking_id): Path<String>,
    body: Option<axum::Json<CancelRequest>>,
) -> Response
where
    R: BookingRepository + 'static,
    D: Directory + 'static,
{
    let reason = body.and_then(|axum::Json(request)| request.reason);
    booking_response(service.cancel(&BookingId(booking_id), reason))
}

pub(crate) async fn get_handler<R, D>(
    State(service): State<Arc<BookingAssignmentService<R, D>>>,
    Path(booking_id): Path<String>,
) -> Response
where
    R: BookingRepository + 'static,
    D: Directory + 'static,
{
    booking_response(service.get(&BookingId(booking_id)))
}

pub(crate) async fn stats_handler<R, D>(
    State(service): State<Arc<BookingAssignmentService<R, D>>>,
) -> Response
where
    R: BookingRepository + 'static,
    D: Directory + 'static,
{
    match service.stats() {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

fn booking_response(result: Result<Booking, WorkflowError>) -> Response {
    match result {
        Ok(booking) => {
            (StatusCode::OK, axum::Json(BookingView::from(booking))).into_response()
        }
        Err(error @ WorkflowError::NotFound(_)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error @ WorkflowError::InvalidTransition { .. }) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(error @ WorkflowError::InvalidVendorState(_)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
