use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{auctiondb::AuctionExt, contractdb::ContractExt, contractordb::ContractorExt},
    dtos::auctiondtos::{
        CreateAuctionDto, PaginationQuery, PlaceBidDto, SelectWinnerDto, UpdateAuctionDto,
    },
    error::{ErrorMessage, HttpError},
    middleware::{role_check, AuthenticatedUser},
    models::{auctionmodel::Auction, usermodel::UserRole},
    AppState,
};

pub fn auction_handler() -> Router {
    Router::new()
        .route(
            "/create",
            post(create_auction).layer(middleware::from_fn(|req, next| {
                role_check(
                    req,
                    next,
                    vec![UserRole::College, UserRole::Corporate, UserRole::Admin],
                )
            })),
        )
        .route("/my-auctions", get(get_my_auctions))
        .route("/open", get(get_open_auctions))
        .route("/get/:auction_id", get(get_auction))
        .route("/update/:auction_id", put(update_auction))
        .route("/delete/:auction_id", delete(delete_auction))
        .route(
            "/bid/:auction_id",
            post(place_bid).layer(middleware::from_fn(|req, next| {
                role_check(req, next, vec![UserRole::Contractor])
            })),
        )
        .route("/bids/:auction_id", get(get_bids))
        .route("/select-winner/:auction_id", put(select_winner))
}

pub async fn create_auction(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(body): Json<CreateAuctionDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let auction = app_state
        .db_client
        .save_auction(auth.user.id, body.title, body.description)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!("auction {} created by {}", auction.id, auth.user.id);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "data": auction
        })),
    ))
}

pub async fn get_my_auctions(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let (limit, offset) = pagination.limit_offset(20);

    let auctions = app_state
        .db_client
        .get_auctions_by_creator(auth.user.id, limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": auctions
    })))
}

pub async fn get_open_auctions(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let (limit, offset) = pagination.limit_offset(20);

    let auctions = app_state
        .db_client
        .get_open_auctions(limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": auctions
    })))
}

pub async fn get_auction(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(auction_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let auction = find_auction(&app_state, auction_id).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": auction
    })))
}

pub async fn update_auction(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(auction_id): Path<Uuid>,
    Json(body): Json<UpdateAuctionDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let auction = find_auction(&app_state, auction_id).await?;
    require_creator(&auction, &auth)?;

    // Only title/description are editable, so an auction stays otherwise
    // immutable once a contract hangs off it.
    let updated = app_state
        .db_client
        .update_auction(auction_id, body.title, body.description)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": updated
    })))
}

pub async fn delete_auction(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(auction_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let auction = find_auction(&app_state, auction_id).await?;
    require_creator(&auction, &auth)?;

    let contract = app_state
        .db_client
        .get_contract_by_auction_id(auction_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if contract.is_some() {
        return Err(HttpError::bad_request(
            "Auction cannot be deleted once a contract exists",
        ));
    }

    app_state
        .db_client
        .delete_auction(auction_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Auction deleted"
    })))
}

pub async fn place_bid(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(auction_id): Path<Uuid>,
    Json(body): Json<PlaceBidDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let auction = find_auction(&app_state, auction_id).await?;

    if !auction.is_open {
        return Err(HttpError::bad_request("Auction is closed"));
    }

    if auction.creator_id == auth.user.id {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let profile = app_state
        .db_client
        .get_contractor_by_user_id(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::bad_request("Create a contractor profile before bidding"))?;

    let bid = app_state
        .db_client
        .save_bid(auction_id, profile.id, body.amount)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!("bid {} placed on auction {}", bid.id, auction_id);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "data": bid
        })),
    ))
}

pub async fn get_bids(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(auction_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let auction = find_auction(&app_state, auction_id).await?;
    require_creator(&auction, &auth)?;

    let bids = app_state
        .db_client
        .get_bids_for_auction(auction_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": bids
    })))
}

pub async fn select_winner(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(auction_id): Path<Uuid>,
    Json(body): Json<SelectWinnerDto>,
) -> Result<impl IntoResponse, HttpError> {
    let auction = find_auction(&app_state, auction_id).await?;
    require_creator(&auction, &auth)?;

    let bid = app_state
        .db_client
        .get_bid_by_id(body.bid_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Bid not found"))?;

    if bid.auction_id != auction_id {
        return Err(HttpError::bad_request("Bid does not belong to this auction"));
    }

    let updated = app_state
        .db_client
        .set_auction_winner(auction_id, bid.bidder_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::bad_request("Auction is already closed"))?;

    tracing::info!(
        "auction {} closed, winner {}",
        auction_id,
        bid.bidder_id
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "data": updated
    })))
}

async fn find_auction(app_state: &AppState, auction_id: Uuid) -> Result<Auction, HttpError> {
    app_state
        .db_client
        .get_auction_by_id(auction_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Auction not found"))
}

fn require_creator(auction: &Auction, auth: &AuthenticatedUser) -> Result<(), HttpError> {
    if auction.creator_id != auth.user.id {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }
    Ok(())
}
