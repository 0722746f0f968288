use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{contractordb::ContractorExt, is_unique_violation},
    dtos::contractordtos::{
        CreateContractorProfileDto, CreateMenuDto, UpdateContractorProfileDto, UpdateMenuDto,
    },
    error::{ErrorMessage, HttpError},
    middleware::{role_check, AuthenticatedUser},
    models::usermodel::UserRole,
    AppState,
};

pub fn contractor_handler() -> Router {
    Router::new()
        .route(
            "/profile",
            post(create_profile)
                .put(update_profile)
                .layer(middleware::from_fn(|req, next| {
                    role_check(req, next, vec![UserRole::Contractor])
                })),
        )
        .route(
            "/me",
            get(get_my_profile).layer(middleware::from_fn(|req, next| {
                role_check(req, next, vec![UserRole::Contractor])
            })),
        )
        .route("/profile/:contractor_id", get(get_profile))
        .route(
            "/menu",
            post(create_menu).layer(middleware::from_fn(|req, next| {
                role_check(req, next, vec![UserRole::Contractor])
            })),
        )
        .route("/menus/:contractor_id", get(get_menus))
        .route(
            "/menu/:menu_id",
            put(update_menu)
                .delete(delete_menu)
                .layer(middleware::from_fn(|req, next| {
                    role_check(req, next, vec![UserRole::Contractor])
                })),
        )
}

pub async fn create_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(body): Json<CreateContractorProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state
        .db_client
        .save_contractor_profile(auth.user.id, body.business_name, body.description, body.address)
        .await;

    let profile = match result {
        Ok(profile) => profile,
        Err(ref err) if is_unique_violation(err) => {
            return Err(HttpError::unique_constraint_violation(
                ErrorMessage::ContractorProfileExist.to_string(),
            ));
        }
        Err(err) => return Err(HttpError::server_error(err.to_string())),
    };

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "data": profile
        })),
    ))
}

pub async fn get_my_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HttpError> {
    let profile = app_state
        .db_client
        .get_contractor_by_user_id(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Contractor profile not found"))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": profile
    })))
}

pub async fn get_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(contractor_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let profile = app_state
        .db_client
        .get_contractor_by_id(contractor_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Contractor profile not found"))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": profile
    })))
}

pub async fn update_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(body): Json<UpdateContractorProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let profile = app_state
        .db_client
        .get_contractor_by_user_id(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Contractor profile not found"))?;

    let updated = app_state
        .db_client
        .update_contractor_profile(profile.id, body.business_name, body.description, body.address)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": updated
    })))
}

pub async fn create_menu(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(body): Json<CreateMenuDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let profile = app_state
        .db_client
        .get_contractor_by_user_id(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Contractor profile not found"))?;

    let menu = app_state
        .db_client
        .save_menu(profile.id, body.title, body.description, body.monthly_price)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "data": menu
        })),
    ))
}

pub async fn get_menus(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(contractor_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let menus = app_state
        .db_client
        .get_menus_for_contractor(contractor_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": menus
    })))
}

pub async fn update_menu(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(menu_id): Path<Uuid>,
    Json(body): Json<UpdateMenuDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let menu = owned_menu(&app_state, &auth, menu_id).await?;

    let updated = app_state
        .db_client
        .update_menu(menu.id, body.title, body.description, body.monthly_price)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": updated
    })))
}

pub async fn delete_menu(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(menu_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let menu = owned_menu(&app_state, &auth, menu_id).await?;

    app_state
        .db_client
        .delete_menu(menu.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Menu deleted"
    })))
}

async fn owned_menu(
    app_state: &AppState,
    auth: &AuthenticatedUser,
    menu_id: Uuid,
) -> Result<crate::models::contractormodel::Menu, HttpError> {
    let menu = app_state
        .db_client
        .get_menu_by_id(menu_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Menu not found"))?;

    let profile = app_state
        .db_client
        .get_contractor_by_user_id(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Contractor profile not found"))?;

    if menu.contractor_id != profile.id {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    Ok(menu)
}
