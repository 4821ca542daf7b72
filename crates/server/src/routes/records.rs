use axum::{extract::{rejection::JsonRejection, State}, Json};
use common::types::Welcome;
use models::{InvestorRequest, PartnershipInquiry, Record, StatusCheck};
use serde_json::Value;

use crate::{errors::JsonApiError, state::AppState};

async fn submit<R: Record>(state: &AppState, payload: Result<Json<Value>, JsonRejection>) -> Result<Json<R>, JsonApiError> {
    let Json(payload) = payload?;
    let record = state.records.submit::<R>(&payload).await?;
    Ok(Json(record))
}

async fn list<R: Record>(state: &AppState) -> Result<Json<Vec<R>>, JsonApiError> {
    Ok(Json(state.records.list::<R>().await?))
}

#[utoipa::path(get, path = "/api/", tag = "status", responses((status = 200, description = "Welcome message", body = crate::openapi::WelcomeResponse)))]
pub async fn root() -> Json<Welcome> {
    Json(Welcome::default())
}

#[utoipa::path(
    post, path = "/api/status", tag = "status",
    request_body = models::StatusCheckCreate,
    responses(
        (status = 200, description = "Created", body = StatusCheck),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorBody),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create_status_check(State(state): State<AppState>, payload: Result<Json<Value>, JsonRejection>) -> Result<Json<StatusCheck>, JsonApiError> {
    submit(&state, payload).await
}

#[utoipa::path(
    get, path = "/api/status", tag = "status",
    responses(
        (status = 200, description = "Up to 1000 status checks", body = [StatusCheck]),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBody)
    )
)]
pub async fn list_status_checks(State(state): State<AppState>) -> Result<Json<Vec<StatusCheck>>, JsonApiError> {
    list(&state).await
}

#[utoipa::path(
    post, path = "/api/investor-requests", tag = "investors",
    request_body = models::InvestorRequestCreate,
    responses(
        (status = 200, description = "Created", body = InvestorRequest),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorBody),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create_investor_request(State(state): State<AppState>, payload: Result<Json<Value>, JsonRejection>) -> Result<Json<InvestorRequest>, JsonApiError> {
    submit(&state, payload).await
}

#[utoipa::path(
    get, path = "/api/investor-requests", tag = "investors",
    responses(
        (status = 200, description = "Up to 1000 investor requests", body = [InvestorRequest]),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBody)
    )
)]
pub async fn list_investor_requests(State(state): State<AppState>) -> Result<Json<Vec<InvestorRequest>>, JsonApiError> {
    list(&state).await
}

#[utoipa::path(
    post, path = "/api/partnership-inquiries", tag = "partnerships",
    request_body = models::PartnershipInquiryCreate,
    responses(
        (status = 200, description = "Created", body = PartnershipInquiry),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorBody),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create_partnership_inquiry(State(state): State<AppState>, payload: Result<Json<Value>, JsonRejection>) -> Result<Json<PartnershipInquiry>, JsonApiError> {
    submit(&state, payload).await
}

#[utoipa::path(
    get, path = "/api/partnership-inquiries", tag = "partnerships",
    responses(
        (status = 200, description = "Up to 1000 partnership inquiries", body = [PartnershipInquiry]),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBody)
    )
)]
pub async fn list_partnership_inquiries(State(state): State<AppState>) -> Result<Json<Vec<PartnershipInquiry>>, JsonApiError> {
    list(&state).await
}
