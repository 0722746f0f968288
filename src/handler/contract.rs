use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::contractdb::ContractExt,
    dtos::contractdtos::CreateContractDto,
    error::HttpError,
    middleware::AuthenticatedUser,
    AppState,
};

pub fn contract_handler() -> Router {
    Router::new()
        .route("/my-contracts", get(get_my_contracts))
        .route("/get-contract/:contract_id", get(get_contract))
        .route("/status/:contract_id", get(get_contract_status))
        .route("/toggle-status/:contract_id", put(toggle_contract_status))
        .route("/terminate/:contract_id", delete(terminate_contract))
        .route("/create-contract/:auction_id", post(create_contract))
        .route("/:auction_id", get(derive_contract))
}

/// Read-only probe: tells the client whether a contract already exists for
/// the auction, or whether one can be created yet.
pub async fn derive_contract(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(auction_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let derivation = app_state
        .contract_service
        .derive_contract(auction_id)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": derivation
    })))
}

pub async fn create_contract(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(auction_id): Path<Uuid>,
    Json(body): Json<CreateContractDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let contract = app_state
        .contract_service
        .create_contract(auction_id, &auth.user, body.terms)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "data": contract
        })),
    ))
}

pub async fn get_contract(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(contract_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let contract = app_state
        .contract_service
        .get_contract(contract_id, &auth.user)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": contract
    })))
}

pub async fn get_my_contracts(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HttpError> {
    let contracts = app_state
        .db_client
        .get_contracts_for_user(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": contracts
    })))
}

/// Poll endpoint the client hits on an interval while waiting for the
/// counterpart's acceptance; no push channel for contract state.
pub async fn get_contract_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(contract_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let status = app_state
        .contract_service
        .contract_status(contract_id, &auth.user)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": status
    })))
}

pub async fn toggle_contract_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(contract_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let contract = app_state
        .contract_service
        .toggle_acceptance(contract_id, &auth.user)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": contract
    })))
}

pub async fn terminate_contract(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(contract_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let contract = app_state
        .contract_service
        .terminate(contract_id, &auth.user)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": contract
    })))
}
