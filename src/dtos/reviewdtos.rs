// dtos/reviewdtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct AddReviewDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(min = 1, max = 2000, message = "Comment is required"))]
    pub comment: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateReviewDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,

    #[validate(length(min = 1, max = 2000, message = "Comment cannot be empty"))]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_are_enforced() {
        let low = AddReviewDto { rating: 0, comment: "bad".to_string() };
        let high = AddReviewDto { rating: 6, comment: "great".to_string() };
        let ok = AddReviewDto { rating: 5, comment: "great".to_string() };
        assert!(low.validate().is_err());
        assert!(high.validate().is_err());
        assert!(ok.validate().is_ok());
    }
}
