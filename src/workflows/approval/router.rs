use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::VendorId;
use super::gate::{authorize_vendor_access, GateContext};
use super::repository::{ApprovalNotifier, VendorRepository};
use super::service::{ApprovalError, VendorApprovalService};

/// Router builder for the manager/admin vendor endpoints and the access gate.
pub fn approval_router<R, N>(service: Arc<VendorApprovalService<R, N>>) -> Router
where
    R: VendorRepository + 'static,
    N: ApprovalNotifier + 'static,
{
    Router::new()
        .route(
            "/api/v1/manager/vendors/:vendor_id/approve",
            post(approve_handler::<R, N>),
        )
        .route(
            "/api/v1/manager/vendors/:vendor_id/reject",
            post(reject_handler::<R, N>),
        )
        .route(
            "/api/v1/admin/vendors/:vendor_id/suspend",
            post(suspend_handler::<R, N>),
        )
        .route(
            "/api/v1/vendor/:vendor_id/access",
            get(access_handler::<R, N>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AccessQuery {
    #[serde(default)]
    pub on_pending_page: bool,
}

pub(crate) async fn approve_handler<R, N>(
    State(service): State<Arc<VendorApprovalService<R, N>>>,
    Path(vendor_id): Path<String>,
) -> Response
where
    R: VendorRepository + 'static,
    N: ApprovalNotifier + 'static,
{
    vendor_response(service.approve(&VendorId(vendor_id)), "Vendor approved")
}

pub(crate) async fn reject_handler<R, N>(
    State(service): State<Arc<VendorApprovalService<R, N>>>,
    Path(vendor_id): Path<String>,
    body: Option<axum::Json<RejectRequest>>,
) -> Response
where
    R: VendorRepository + 'static,
    N: ApprovalNotifier + 'static,
{
    let reason = body.and_then(|axum::Json(request)| request.reason);
    vendor_response(
        service.reject(&VendorId(vendor_id), reason),
        "Vendor rejected",
    )
}

pub(crate) async fn suspend_handler<R, N>(
    State(service): State<Arc<VendorApprovalService<R, N>>>,
    Path(vendor_id): Path<String>,
) -> Response
where
    R: VendorRepository + 'static,
    N: ApprovalNotifier + 'static,
{
    vendor_response(service.suspend(&VendorId(vendor_id)), "Vendor suspended")
}

pub(crate) async fn access_handler<R, N>(
    State(service): State<Arc<VendorApprovalService<R, N>>>,
    Path(vendor_id): Path<String>,
    Query(query): Query<AccessQuery>,
) -> Response
where
    R: VendorRepository + 'static,
    N: ApprovalNotifier + 'static,
{
    let lookup = service.profile(&VendorId(vendor_id));
    let ctx = GateContext {
        viewing_pending_page: query.on_pending_page,
    };
    let decision = authorize_vendor_access(lookup, ctx);

    let payload = json!({ "decision": decision.label() });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn vendor_response(
    result: Result<super::domain::Vendor, ApprovalError>,
    message: &str,
) -> Response {
    match result {
        Ok(vendor) => {
            let payload = json!({
                "message": message,
                "vendor": {
                    "id": vendor.id.0,
                    "shop_name": vendor.shop_name,
                    "status": vendor.status.label(),
                },
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(ApprovalError::NotFound) => {
            let payload = json!({ "error": "vendor not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error @ ApprovalError::InvalidTransition { .. }) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
