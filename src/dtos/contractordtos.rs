// dtos/contractordtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateContractorProfileDto {
    #[validate(length(min = 2, max = 120, message = "Business name must be between 2-120 characters"))]
    pub business_name: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateContractorProfileDto {
    #[validate(length(min = 2, max = 120, message = "Business name must be between 2-120 characters"))]
    pub business_name: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 255, message = "Address must be at most 255 characters"))]
    pub address: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateMenuDto {
    #[validate(length(min = 1, max = 120, message = "Title is required"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "Monthly price must not be negative"))]
    pub monthly_price: f64,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateMenuDto {
    #[validate(length(min = 1, max = 120, message = "Title cannot be empty"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "Monthly price must not be negative"))]
    pub monthly_price: Option<f64>,
}
