// db/contractordb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::contractormodel::{MessContractor, Menu};

#[async_trait]
pub trait ContractorExt {
    async fn save_contractor_profile<T: Into<String> + Send>(
        &self,
        user_id: Uuid,
        business_name: T,
        description: Option<String>,
        address: Option<String>,
    ) -> Result<MessContractor, sqlx::Error>;

    async fn get_contractor_by_id(
        &self,
        contractor_id: Uuid,
    ) -> Result<Option<MessContractor>, sqlx::Error>;

    async fn get_contractor_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<MessContractor>, sqlx::Error>;

    async fn update_contractor_profile(
        &self,
        contractor_id: Uuid,
        business_name: Option<String>,
        description: Option<String>,
        address: Option<String>,
    ) -> Result<MessContractor, sqlx::Error>;

    async fn save_menu<T: Into<String> + Send>(
        &self,
        contractor_id: Uuid,
        title: T,
        description: Option<String>,
        monthly_price: f64,
    ) -> Result<Menu, sqlx::Error>;

    async fn get_menu_by_id(&self, menu_id: Uuid) -> Result<Option<Menu>, sqlx::Error>;

    async fn get_menus_for_contractor(
        &self,
        contractor_id: Uuid,
    ) -> Result<Vec<Menu>, sqlx::Error>;

    async fn update_menu(
        &self,
        menu_id: Uuid,
        title: Option<String>,
        description: Option<String>,
        monthly_price: Option<f64>,
    ) -> Result<Menu, sqlx::Error>;

    async fn delete_menu(&self, menu_id: Uuid) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl ContractorExt for DBClient {
    async fn save_contractor_profile<T: Into<String> + Send>(
        &self,
        user_id: Uuid,
        business_name: T,
        description: Option<String>,
        address: Option<String>,
    ) -> Result<MessContractor, sqlx::Error> {
        sqlx::query_as::<_, MessContractor>(
            r#"
            INSERT INTO mess_contractors (user_id, business_name, description, address)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, business_name, description, address, created_at
            "#,
        )
        .bind(user_id)
        .bind(business_name.into())
        .bind(description)
        .bind(address)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_contractor_by_id(
        &self,
        contractor_id: Uuid,
    ) -> Result<Option<MessContractor>, sqlx::Error> {
        sqlx::query_as::<_, MessContractor>(
            r#"
            SELECT id, user_id, business_name, description, address, created_at
            FROM mess_contractors
            WHERE id = $1
            "#,
        )
        .bind(contractor_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_contractor_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<MessContractor>, sqlx::Error> {
        sqlx::query_as::<_, MessContractor>(
            r#"
            SELECT id, user_id, business_name, description, address, created_at
            FROM mess_contractors
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_contractor_profile(
        &self,
        contractor_id: Uuid,
        business_name: Option<String>,
        description: Option<String>,
        address: Option<String>,
    ) -> Result<MessContractor, sqlx::Error> {
        sqlx::query_as::<_, MessContractor>(
            r#"
            UPDATE mess_contractors
            SET business_name = COALESCE($2, business_name),
                description = COALESCE($3, description),
                address = COALESCE($4, address)
            WHERE id = $1
            RETURNING id, user_id, business_name, description, address, created_at
            "#,
        )
        .bind(contractor_id)
        .bind(business_name)
        .bind(description)
        .bind(address)
        .fetch_one(&self.pool)
        .await
    }

    async fn save_menu<T: Into<String> + Send>(
        &self,
        contractor_id: Uuid,
        title: T,
        description: Option<String>,
        monthly_price: f64,
    ) -> Result<Menu, sqlx::Error> {
        sqlx::query_as::<_, Menu>(
            r#"
            INSERT INTO menus (contractor_id, title, description, monthly_price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, contractor_id, title, description, monthly_price, created_at
            "#,
        )
        .bind(contractor_id)
        .bind(title.into())
        .bind(description)
        .bind(monthly_price)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_menu_by_id(&self, menu_id: Uuid) -> Result<Option<Menu>, sqlx::Error> {
        sqlx::query_as::<_, Menu>(
            r#"
            SELECT id, contractor_id, title, description, monthly_price, created_at
            FROM menus
            WHERE id = $1
            "#,
        )
        .bind(menu_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_menus_for_contractor(
        &self,
        contractor_id: Uuid,
    ) -> Result<Vec<Menu>, sqlx::Error> {
        sqlx::query_as::<_, Menu>(
            r#"
            SELECT id, contractor_id, title, description, monthly_price, created_at
            FROM menus
            WHERE contractor_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(contractor_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_menu(
        &self,
        menu_id: Uuid,
        title: Option<String>,
        description: Option<String>,
        monthly_price: Option<f64>,
    ) -> Result<Menu, sqlx::Error> {
        sqlx::query_as::<_, Menu>(
            r#"
            UPDATE menus
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                monthly_price = COALESCE($4, monthly_price)
            WHERE id = $1
            RETURNING id, contractor_id, title, description, monthly_price, created_at
            "#,
        )
        .bind(menu_id)
        .bind(title)
        .bind(description)
        .bind(monthly_price)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_menu(&self, menu_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM menus WHERE id = $1")
            .bind(menu_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
