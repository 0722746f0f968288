// models/contractormodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct MessContractor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Menu {
    pub id: Uuid,
    pub contractor_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub monthly_price: f64,
    pub created_at: Option<DateTime<Utc>>,
}
