// db/reviewdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::reviewmodel::Review;

#[async_trait]
pub trait ReviewExt {
    /// The UNIQUE (reviewer_id, contractor_id) constraint enforces
    /// one-review-per-reviewer; duplicates surface as unique violations.
    async fn save_review<T: Into<String> + Send>(
        &self,
        contractor_id: Uuid,
        reviewer_id: Uuid,
        rating: i32,
        comment: T,
    ) -> Result<Review, sqlx::Error>;

    async fn get_review_by_id(&self, review_id: Uuid) -> Result<Option<Review>, sqlx::Error>;

    async fn get_reviews_for_contractor(
        &self,
        contractor_id: Uuid,
    ) -> Result<Vec<Review>, sqlx::Error>;

    async fn get_average_rating(&self, contractor_id: Uuid) -> Result<Option<f64>, sqlx::Error>;

    async fn update_review(
        &self,
        review_id: Uuid,
        rating: Option<i32>,
        comment: Option<String>,
    ) -> Result<Review, sqlx::Error>;

    async fn delete_review(&self, review_id: Uuid) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn save_review<T: Into<String> + Send>(
        &self,
        contractor_id: Uuid,
        reviewer_id: Uuid,
        rating: i32,
        comment: T,
    ) -> Result<Review, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (contractor_id, reviewer_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id, contractor_id, reviewer_id, rating, comment, created_at
            "#,
        )
        .bind(contractor_id)
        .bind(reviewer_id)
        .bind(rating)
        .bind(comment.into())
        .fetch_one(&self.pool)
        .await
    }

    async fn get_review_by_id(&self, review_id: Uuid) -> Result<Option<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT id, contractor_id, reviewer_id, rating, comment, created_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_reviews_for_contractor(
        &self,
        contractor_id: Uuid,
    ) -> Result<Vec<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT id, contractor_id, reviewer_id, rating, comment, created_at
            FROM reviews
            WHERE contractor_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(contractor_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_average_rating(&self, contractor_id: Uuid) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<f64>>(
            r#"
            SELECT AVG(rating)::float8
            FROM reviews
            WHERE contractor_id = $1
            "#,
        )
        .bind(contractor_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_review(
        &self,
        review_id: Uuid,
        rating: Option<i32>,
        comment: Option<String>,
    ) -> Result<Review, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET rating = COALESCE($2, rating),
                comment = COALESCE($3, comment)
            WHERE id = $1
            RETURNING id, contractor_id, reviewer_id, rating, comment, created_at
            "#,
        )
        .bind(review_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_review(&self, review_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
