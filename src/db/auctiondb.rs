// db/auctiondb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::auctionmodel::{Auction, Bid};

#[async_trait]
pub trait AuctionExt {
    async fn save_auction<T: Into<String> + Send>(
        &self,
        creator_id: Uuid,
        title: T,
        description: T,
    ) -> Result<Auction, sqlx::Error>;

    async fn get_auction_by_id(&self, auction_id: Uuid) -> Result<Option<Auction>, sqlx::Error>;

    async fn get_auctions_by_creator(
        &self,
        creator_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Auction>, sqlx::Error>;

    async fn get_open_auctions(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Auction>, sqlx::Error>;

    async fn update_auction(
        &self,
        auction_id: Uuid,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Auction, sqlx::Error>;

    async fn delete_auction(&self, auction_id: Uuid) -> Result<(), sqlx::Error>;

    async fn save_bid(
        &self,
        auction_id: Uuid,
        bidder_id: Uuid,
        amount: f64,
    ) -> Result<Bid, sqlx::Error>;

    async fn get_bid_by_id(&self, bid_id: Uuid) -> Result<Option<Bid>, sqlx::Error>;

    async fn get_bids_for_auction(&self, auction_id: Uuid) -> Result<Vec<Bid>, sqlx::Error>;

    /// Assigns the winner and closes the auction in one conditional write;
    /// returns None when the auction is already closed.
    async fn set_auction_winner(
        &self,
        auction_id: Uuid,
        winner_id: Uuid,
    ) -> Result<Option<Auction>, sqlx::Error>;
}

#[async_trait]
impl AuctionExt for DBClient {
    async fn save_auction<T: Into<String> + Send>(
        &self,
        creator_id: Uuid,
        title: T,
        description: T,
    ) -> Result<Auction, sqlx::Error> {
        sqlx::query_as::<_, Auction>(
            r#"
            INSERT INTO auctions (creator_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, creator_id, title, description, is_open, winner_id, created_at
            "#,
        )
        .bind(creator_id)
        .bind(title.into())
        .bind(description.into())
        .fetch_one(&self.pool)
        .await
    }

    async fn get_auction_by_id(&self, auction_id: Uuid) -> Result<Option<Auction>, sqlx::Error> {
        sqlx::query_as::<_, Auction>(
            r#"
            SELECT id, creator_id, title, description, is_open, winner_id, created_at
            FROM auctions
            WHERE id = $1
            "#,
        )
        .bind(auction_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_auctions_by_creator(
        &self,
        creator_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Auction>, sqlx::Error> {
        sqlx::query_as::<_, Auction>(
            r#"
            SELECT id, creator_id, title, description, is_open, winner_id, created_at
            FROM auctions
            WHERE creator_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(creator_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_open_auctions(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Auction>, sqlx::Error> {
        sqlx::query_as::<_, Auction>(
            r#"
            SELECT id, creator_id, title, description, is_open, winner_id, created_at
            FROM auctions
            WHERE is_open = true
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_auction(
        &self,
        auction_id: Uuid,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Auction, sqlx::Error> {
        sqlx::query_as::<_, Auction>(
            r#"
            UPDATE auctions
            SET title = COALESCE($2, title),
                description = COALESCE($3, description)
            WHERE id = $1
            RETURNING id, creator_id, title, description, is_open, winner_id, created_at
            "#,
        )
        .bind(auction_id)
        .bind(title)
        .bind(description)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_auction(&self, auction_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM auctions WHERE id = $1")
            .bind(auction_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn save_bid(
        &self,
        auction_id: Uuid,
        bidder_id: Uuid,
        amount: f64,
    ) -> Result<Bid, sqlx::Error> {
        sqlx::query_as::<_, Bid>(
            r#"
            INSERT INTO bids (auction_id, bidder_id, amount)
            VALUES ($1, $2, $3)
            RETURNING id, auction_id, bidder_id, amount, created_at
            "#,
        )
        .bind(auction_id)
        .bind(bidder_id)
        .bind(amount)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_bid_by_id(&self, bid_id: Uuid) -> Result<Option<Bid>, sqlx::Error> {
        sqlx::query_as::<_, Bid>(
            r#"
            SELECT id, auction_id, bidder_id, amount, created_at
            FROM bids
            WHERE id = $1
            "#,
        )
        .bind(bid_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_bids_for_auction(&self, auction_id: Uuid) -> Result<Vec<Bid>, sqlx::Error> {
        sqlx::query_as::<_, Bid>(
            r#"
            SELECT id, auction_id, bidder_id, amount, created_at
            FROM bids
            WHERE auction_id = $1
            ORDER BY amount ASC, created_at ASC
            "#,
        )
        .bind(auction_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn set_auction_winner(
        &self,
        auction_id: Uuid,
        winner_id: Uuid,
    ) -> Result<Option<Auction>, sqlx::Error> {
        sqlx::query_as::<_, Auction>(
            r#"
            UPDATE auctions
            SET winner_id = $2, is_open = false
            WHERE id = $1 AND is_open = true
            RETURNING id, creator_id, title, description, is_open, winner_id, created_at
            "#,
        )
        .bind(auction_id)
        .bind(winner_id)
        .fetch_optional(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    #[tokio::test]
    async fn auctiondb_queries_compile() {
        let pool = PgPool::connect_lazy("postgres://localhost/messhub").unwrap();
        let db_client = DBClient::new(pool);

        let _ = db_client.get_auction_by_id(Uuid::nil());
        let _ = db_client.get_open_auctions(20, 0);
        let _ = db_client.set_auction_winner(Uuid::nil(), Uuid::nil());
    }
}
