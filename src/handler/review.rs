use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{contractordb::ContractorExt, is_unique_violation, reviewdb::ReviewExt},
    dtos::reviewdtos::{AddReviewDto, UpdateReviewDto},
    error::{ErrorMessage, HttpError},
    middleware::{role_check, AuthenticatedUser},
    models::{reviewmodel::Review, usermodel::UserRole},
    AppState,
};

pub fn review_handler() -> Router {
    Router::new()
        .route(
            "/add-review/:contractor_id",
            post(add_review).layer(middleware::from_fn(|req, next| {
                role_check(req, next, vec![UserRole::College, UserRole::Corporate])
            })),
        )
        .route("/get-reviews/:contractor_id", get(get_reviews))
        .route("/update-review/:review_id", put(update_review))
        .route("/delete-review/:review_id", delete(delete_review))
}

pub async fn add_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(contractor_id): Path<Uuid>,
    Json(body): Json<AddReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let _ = app_state
        .db_client
        .get_contractor_by_id(contractor_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Contractor profile not found"))?;

    // One review per (reviewer, contractor): the unique constraint decides,
    // not a racy pre-check.
    let result = app_state
        .db_client
        .save_review(contractor_id, auth.user.id, body.rating, body.comment)
        .await;

    let review = match result {
        Ok(review) => review,
        Err(ref err) if is_unique_violation(err) => {
            return Err(HttpError::unique_constraint_violation(
                ErrorMessage::ReviewExist.to_string(),
            ));
        }
        Err(err) => return Err(HttpError::server_error(err.to_string())),
    };

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "data": review
        })),
    ))
}

pub async fn get_reviews(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(contractor_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .db_client
        .get_reviews_for_contractor(contractor_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let average_rating = app_state
        .db_client
        .get_average_rating(contractor_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "reviews": reviews,
            "average_rating": average_rating
        }
    })))
}

pub async fn update_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(review_id): Path<Uuid>,
    Json(body): Json<UpdateReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let review = find_review(&app_state, review_id).await?;

    if review.reviewer_id != auth.user.id {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let updated = app_state
        .db_client
        .update_review(review_id, body.rating, body.comment)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": updated
    })))
}

pub async fn delete_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(review_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let review = find_review(&app_state, review_id).await?;

    if review.reviewer_id != auth.user.id && auth.user.role != UserRole::Admin {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    app_state
        .db_client
        .delete_review(review_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Review deleted"
    })))
}

async fn find_review(app_state: &AppState, review_id: Uuid) -> Result<Review, HttpError> {
    app_state
        .db_client
        .get_review_by_id(review_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Review not found"))
}
