use thiserror::Error;
use uuid::Uuid;

use crate::{
    error::{ErrorMessage, HttpError},
    models::contractmodel::ContractStatus,
};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Auction {0} not found")]
    AuctionNotFound(Uuid),

    #[error("Contract {0} not found")]
    ContractNotFound(Uuid),

    #[error("Auction {0} has no winner yet")]
    NoWinnerSelected(Uuid),

    #[error("A contract already exists for auction {0}")]
    ContractExists(Uuid),

    #[error("User {0} is not a party to contract {1}")]
    NotAParty(Uuid, Uuid),

    #[error("Only the auction creator can perform this action")]
    NotAuctionCreator,

    #[error("Contract {0} is {status} and cannot be modified this way", status = .1.to_str())]
    InvalidContractStatus(Uuid, ContractStatus),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::AuctionNotFound(_) | ServiceError::ContractNotFound(_) => {
                HttpError::not_found(error.to_string())
            }

            ServiceError::NoWinnerSelected(_) | ServiceError::InvalidContractStatus(_, _) => {
                HttpError::bad_request(error.to_string())
            }

            ServiceError::ContractExists(_) => {
                HttpError::unique_constraint_violation(ErrorMessage::ContractExist.to_string())
            }

            ServiceError::NotAParty(_, _) | ServiceError::NotAuctionCreator => {
                HttpError::forbidden(ErrorMessage::PermissionDenied.to_string())
            }

            ServiceError::Database(_) => HttpError::server_error(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn error_status_mapping() {
        let err: HttpError = ServiceError::AuctionNotFound(Uuid::nil()).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err: HttpError = ServiceError::NoWinnerSelected(Uuid::nil()).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err: HttpError = ServiceError::ContractExists(Uuid::nil()).into();
        assert_eq!(err.status, StatusCode::CONFLICT);

        let err: HttpError = ServiceError::NotAParty(Uuid::nil(), Uuid::nil()).into();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let err: HttpError =
            ServiceError::InvalidContractStatus(Uuid::nil(), ContractStatus::Terminated).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
