// dtos/contractdtos.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::contractmodel::{Contract, ContractStatus};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateContractDto {
    #[validate(length(min = 10, max = 10000, message = "Terms must be between 10-10000 characters"))]
    pub terms: String,
}

/// Result of probing an auction before contract creation. `winner_selected`
/// being false is a normal response, not an error, so the client can render
/// a "no winner yet" state.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContractDerivationDto {
    pub contract_exists: bool,
    pub winner_selected: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContractStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<Uuid>,
}

impl ContractDerivationDto {
    pub fn existing(contract: &Contract) -> Self {
        ContractDerivationDto {
            contract_exists: true,
            winner_selected: true,
            status: Some(contract.status),
            created_at: contract.created_at,
            winner_id: None,
            creator_id: None,
        }
    }

    pub fn no_winner() -> Self {
        ContractDerivationDto {
            contract_exists: false,
            winner_selected: false,
            status: None,
            created_at: None,
            winner_id: None,
            creator_id: None,
        }
    }

    pub fn ready(winner_id: Uuid, creator_id: Uuid) -> Self {
        ContractDerivationDto {
            contract_exists: false,
            winner_selected: true,
            status: None,
            created_at: None,
            winner_id: Some(winner_id),
            creator_id: Some(creator_id),
        }
    }
}

/// Payload for the client-side acceptance poll.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContractStatusDto {
    pub status: ContractStatus,
    pub institution_accepted: bool,
    pub contractor_accepted: bool,
}

impl ContractStatusDto {
    pub fn from_contract(contract: &Contract) -> Self {
        ContractStatusDto {
            status: contract.status,
            institution_accepted: contract.institution_accepted,
            contractor_accepted: contract.contractor_accepted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_winner_probe_is_not_an_error_shape() {
        let raw = serde_json::to_value(ContractDerivationDto::no_winner()).unwrap();
        assert_eq!(raw["contract_exists"], false);
        assert_eq!(raw["winner_selected"], false);
        assert!(raw.get("winner_id").is_none());
    }

    #[test]
    fn ready_probe_carries_both_parties() {
        let winner = Uuid::new_v4();
        let creator = Uuid::new_v4();
        let raw = serde_json::to_value(ContractDerivationDto::ready(winner, creator)).unwrap();
        assert_eq!(raw["winner_selected"], true);
        assert_eq!(raw["winner_id"], winner.to_string());
        assert_eq!(raw["creator_id"], creator.to_string());
    }

    #[test]
    fn short_terms_are_rejected() {
        let dto = CreateContractDto {
            terms: "too short".to_string(),
        };
        assert!(dto.validate().is_err());
    }
}
