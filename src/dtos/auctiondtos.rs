// dtos/auctiondtos.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuctionDto {
    #[validate(length(min = 3, max = 150, message = "Title must be between 3-150 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateAuctionDto {
    #[validate(length(min = 3, max = 150, message = "Title must be between 3-150 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "Description cannot be empty"))]
    pub description: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct PlaceBidDto {
    #[validate(range(min = 1.0, message = "Bid amount must be positive"))]
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectWinnerDto {
    pub bid_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PaginationQuery {
    pub fn limit_offset(&self, default_limit: u32) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(default_limit).clamp(1, 100) as i64;
        let offset = (page as i64 - 1) * limit;
        (limit, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let q = PaginationQuery { page: None, limit: None };
        assert_eq!(q.limit_offset(20), (20, 0));
    }

    #[test]
    fn pagination_clamps_and_offsets() {
        let q = PaginationQuery { page: Some(3), limit: Some(500) };
        assert_eq!(q.limit_offset(20), (100, 200));

        let q = PaginationQuery { page: Some(0), limit: Some(10) };
        assert_eq!(q.limit_offset(20), (10, 0));
    }

    #[test]
    fn zero_bid_is_rejected() {
        let dto = PlaceBidDto { amount: 0.0 };
        assert!(dto.validate().is_err());
    }
}
