// db/contractdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::contractmodel::{Contract, ContractParty, ContractStatus};

const CONTRACT_COLUMNS: &str = "id, auction_id, terms, status, contractor_accepted, \
     institution_accepted, contractor_id, institution_id, created_at, updated_at";

#[async_trait]
pub trait ContractExt {
    /// Inserts the contract for a won auction. The UNIQUE constraint on
    /// auction_id is the enforcement point for at-most-one-contract-per-
    /// auction; a duplicate insert surfaces as a unique violation.
    async fn save_contract<T: Into<String> + Send>(
        &self,
        auction_id: Uuid,
        terms: T,
        contractor_id: Uuid,
        institution_id: Uuid,
    ) -> Result<Contract, sqlx::Error>;

    async fn get_contract_by_id(&self, contract_id: Uuid)
        -> Result<Option<Contract>, sqlx::Error>;

    async fn get_contract_by_auction_id(
        &self,
        auction_id: Uuid,
    ) -> Result<Option<Contract>, sqlx::Error>;

    async fn get_contracts_for_user(&self, user_id: Uuid) -> Result<Vec<Contract>, sqlx::Error>;

    /// Flips the given party's acceptance flag and, when both flags end up
    /// true, advances status to accepted. The flag flip is conditional on the
    /// contract still being pending and both writes run in one transaction,
    /// so no reader can observe both flags true with a stale status and no
    /// flip lands on a contract another toggle just escalated. Returns None
    /// when the contract is missing or no longer pending.
    async fn toggle_acceptance(
        &self,
        contract_id: Uuid,
        party: ContractParty,
    ) -> Result<Option<Contract>, sqlx::Error>;

    /// Conditional write: only an accepted contract terminates. Returns None
    /// when the status precondition fails.
    async fn terminate_contract(
        &self,
        contract_id: Uuid,
    ) -> Result<Option<Contract>, sqlx::Error>;
}

#[async_trait]
impl ContractExt for DBClient {
    async fn save_contract<T: Into<String> + Send>(
        &self,
        auction_id: Uuid,
        terms: T,
        contractor_id: Uuid,
        institution_id: Uuid,
    ) -> Result<Contract, sqlx::Error> {
        sqlx::query_as::<_, Contract>(&format!(
            r#"
            INSERT INTO contracts (auction_id, terms, contractor_id, institution_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {CONTRACT_COLUMNS}
            "#,
        ))
        .bind(auction_id)
        .bind(terms.into())
        .bind(contractor_id)
        .bind(institution_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_contract_by_id(
        &self,
        contract_id: Uuid,
    ) -> Result<Option<Contract>, sqlx::Error> {
        sqlx::query_as::<_, Contract>(&format!(
            r#"
            SELECT {CONTRACT_COLUMNS}
            FROM contracts
            WHERE id = $1
            "#,
        ))
        .bind(contract_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_contract_by_auction_id(
        &self,
        auction_id: Uuid,
    ) -> Result<Option<Contract>, sqlx::Error> {
        sqlx::query_as::<_, Contract>(&format!(
            r#"
            SELECT {CONTRACT_COLUMNS}
            FROM contracts
            WHERE auction_id = $1
            "#,
        ))
        .bind(auction_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_contracts_for_user(&self, user_id: Uuid) -> Result<Vec<Contract>, sqlx::Error> {
        sqlx::query_as::<_, Contract>(&format!(
            r#"
            SELECT {CONTRACT_COLUMNS}
            FROM contracts c
            WHERE c.institution_id = $1
               OR c.contractor_id IN (SELECT id FROM mess_contractors WHERE user_id = $1)
            ORDER BY c.created_at DESC
            "#,
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn toggle_acceptance(
        &self,
        contract_id: Uuid,
        party: ContractParty,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let flag_update = match party {
            ContractParty::Institution => {
                r#"
                UPDATE contracts
                SET institution_accepted = NOT institution_accepted, updated_at = NOW()
                WHERE id = $1 AND status = $2
                RETURNING id, auction_id, terms, status, contractor_accepted,
                          institution_accepted, contractor_id, institution_id,
                          created_at, updated_at
                "#
            }
            ContractParty::Contractor => {
                r#"
                UPDATE contracts
                SET contractor_accepted = NOT contractor_accepted, updated_at = NOW()
                WHERE id = $1 AND status = $2
                RETURNING id, auction_id, terms, status, contractor_accepted,
                          institution_accepted, contractor_id, institution_id,
                          created_at, updated_at
                "#
            }
        };

        let contract = sqlx::query_as::<_, Contract>(flag_update)
            .bind(contract_id)
            .bind(ContractStatus::Pending)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(contract) = contract else {
            tx.commit().await?;
            return Ok(None);
        };

        let contract = if contract.should_escalate() {
            sqlx::query_as::<_, Contract>(&format!(
                r#"
                UPDATE contracts
                SET status = $2, updated_at = NOW()
                WHERE id = $1
                RETURNING {CONTRACT_COLUMNS}
                "#,
            ))
            .bind(contract_id)
            .bind(ContractStatus::Accepted)
            .fetch_one(&mut *tx)
            .await?
        } else {
            contract
        };

        tx.commit().await?;
        Ok(Some(contract))
    }

    async fn terminate_contract(
        &self,
        contract_id: Uuid,
    ) -> Result<Option<Contract>, sqlx::Error> {
        sqlx::query_as::<_, Contract>(&format!(
            r#"
            UPDATE contracts
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = $3
            RETURNING {CONTRACT_COLUMNS}
            "#,
        ))
        .bind(contract_id)
        .bind(ContractStatus::Terminated)
        .bind(ContractStatus::Accepted)
        .fetch_optional(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    #[tokio::test]
    async fn contractdb_queries_compile() {
        let pool = PgPool::connect_lazy("postgres://localhost/messhub").unwrap();
        let db_client = DBClient::new(pool);

        let _ = db_client.get_contract_by_auction_id(Uuid::nil());
        let _ = db_client.toggle_acceptance(Uuid::nil(), ContractParty::Institution);
        let _ = db_client.terminate_contract(Uuid::nil());
    }
}
