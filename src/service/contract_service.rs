// service/contract_service.rs
//
// The auction-to-contract lifecycle: derivation probe, creation off a won
// auction, the bilateral acceptance state machine, and termination.
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{
        auctiondb::AuctionExt, contractdb::ContractExt, contractordb::ContractorExt, db::DBClient,
        is_unique_violation,
    },
    dtos::contractdtos::{ContractDerivationDto, ContractStatusDto},
    models::{
        contractmodel::{Contract, ContractParty, ContractStatus},
        usermodel::User,
    },
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub struct ContractService {
    db_client: Arc<DBClient>,
}

impl ContractService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Read-only probe the client calls before offering contract creation.
    /// An existing contract or a missing winner are normal outcomes, not
    /// errors.
    pub async fn derive_contract(
        &self,
        auction_id: Uuid,
    ) -> Result<ContractDerivationDto, ServiceError> {
        let auction = self
            .db_client
            .get_auction_by_id(auction_id)
            .await?
            .ok_or(ServiceError::AuctionNotFound(auction_id))?;

        if let Some(contract) = self.db_client.get_contract_by_auction_id(auction_id).await? {
            return Ok(ContractDerivationDto::existing(&contract));
        }

        match auction.winner_id {
            None => Ok(ContractDerivationDto::no_winner()),
            Some(winner_id) => Ok(ContractDerivationDto::ready(winner_id, auction.creator_id)),
        }
    }

    pub async fn create_contract(
        &self,
        auction_id: Uuid,
        caller: &User,
        terms: String,
    ) -> Result<Contract, ServiceError> {
        let auction = self
            .db_client
            .get_auction_by_id(auction_id)
            .await?
            .ok_or(ServiceError::AuctionNotFound(auction_id))?;

        if auction.creator_id != caller.id {
            return Err(ServiceError::NotAuctionCreator);
        }

        let winner_id = auction
            .winner_id
            .ok_or(ServiceError::NoWinnerSelected(auction_id))?;

        // No advisory pre-check: the UNIQUE constraint on auction_id is the
        // single enforcement point, so concurrent creates cannot both land.
        let result = self
            .db_client
            .save_contract(auction_id, terms, winner_id, auction.creator_id)
            .await;

        match result {
            Ok(contract) => {
                tracing::info!(
                    "contract {} created for auction {} (pending)",
                    contract.id,
                    auction_id
                );
                Ok(contract)
            }
            Err(err) if is_unique_violation(&err) => Err(ServiceError::ContractExists(auction_id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Resolves which side of the contract the caller is. The institution
    /// matches on user id directly; the contractor is reached through the
    /// MessContractor -> User relation.
    pub async fn resolve_party(
        &self,
        contract: &Contract,
        caller: &User,
    ) -> Result<ContractParty, ServiceError> {
        if contract.institution_id == caller.id {
            return Ok(ContractParty::Institution);
        }

        let contractor = self
            .db_client
            .get_contractor_by_id(contract.contractor_id)
            .await?;

        match contractor {
            Some(profile) if profile.user_id == caller.id => Ok(ContractParty::Contractor),
            _ => Err(ServiceError::NotAParty(caller.id, contract.id)),
        }
    }

    pub async fn get_contract(
        &self,
        contract_id: Uuid,
        caller: &User,
    ) -> Result<Contract, ServiceError> {
        let contract = self
            .db_client
            .get_contract_by_id(contract_id)
            .await?
            .ok_or(ServiceError::ContractNotFound(contract_id))?;

        self.resolve_party(&contract, caller).await?;
        Ok(contract)
    }

    /// The poll endpoint body: party-gated, side-effect free.
    pub async fn contract_status(
        &self,
        contract_id: Uuid,
        caller: &User,
    ) -> Result<ContractStatusDto, ServiceError> {
        let contract = self.get_contract(contract_id, caller).await?;
        Ok(ContractStatusDto::from_contract(&contract))
    }

    /// Flips the caller's own acceptance flag. Allowed only while the
    /// contract is pending, so a party can still revoke a prior acceptance
    /// right up until both flags are set and the status escalates.
    pub async fn toggle_acceptance(
        &self,
        contract_id: Uuid,
        caller: &User,
    ) -> Result<Contract, ServiceError> {
        let contract = self
            .db_client
            .get_contract_by_id(contract_id)
            .await?
            .ok_or(ServiceError::ContractNotFound(contract_id))?;

        let party = self.resolve_party(&contract, caller).await?;

        match contract.status {
            ContractStatus::Pending => {}
            status => return Err(ServiceError::InvalidContractStatus(contract_id, status)),
        }

        // The flip is conditional on status still being pending; losing the
        // race against the other party's escalating toggle comes back None.
        let updated = match self.db_client.toggle_acceptance(contract_id, party).await? {
            Some(contract) => contract,
            None => {
                let current = self
                    .db_client
                    .get_contract_by_id(contract_id)
                    .await?
                    .ok_or(ServiceError::ContractNotFound(contract_id))?;
                return Err(ServiceError::InvalidContractStatus(
                    contract_id,
                    current.status,
                ));
            }
        };

        if updated.status == ContractStatus::Accepted {
            tracing::info!("contract {} accepted by both parties", contract_id);
        }

        Ok(updated)
    }

    /// Terminates an accepted contract. Terminal: the conditional UPDATE
    /// refuses anything not currently accepted, so repeated termination and
    /// pending contracts both come back as invalid-status.
    pub async fn terminate(
        &self,
        contract_id: Uuid,
        caller: &User,
    ) -> Result<Contract, ServiceError> {
        let contract = self
            .db_client
            .get_contract_by_id(contract_id)
            .await?
            .ok_or(ServiceError::ContractNotFound(contract_id))?;

        self.resolve_party(&contract, caller).await?;

        let terminated = self
            .db_client
            .terminate_contract(contract_id)
            .await?
            .ok_or(ServiceError::InvalidContractStatus(
                contract_id,
                contract.status,
            ))?;

        tracing::info!("contract {} terminated", contract_id);
        Ok(terminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    #[tokio::test]
    async fn contract_service_compiles() {
        let pool = PgPool::connect_lazy("postgres://localhost/messhub").unwrap();
        let db_client = Arc::new(DBClient::new(pool));
        let svc = ContractService::new(db_client);

        let _ = svc.derive_contract(Uuid::nil());
    }
}
