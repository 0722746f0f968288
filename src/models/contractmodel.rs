// models/contractmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "contract_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    Pending,
    Accepted,
    Terminated,
}

impl ContractStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ContractStatus::Pending => "pending",
            ContractStatus::Accepted => "accepted",
            ContractStatus::Terminated => "terminated",
        }
    }
}

/// Which side of a contract the caller is acting as. Resolved once per
/// request and matched exhaustively, so no handler compares role strings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContractParty {
    Institution,
    Contractor,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Contract {
    pub id: Uuid,
    pub auction_id: Uuid,
    pub terms: String,
    pub status: ContractStatus,
    pub contractor_accepted: bool,
    pub institution_accepted: bool,
    /// Contractor profile id; the underlying user is reached through the
    /// mess_contractors relation.
    pub contractor_id: Uuid,
    pub institution_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Contract {
    /// A pending contract escalates to accepted exactly when both parties
    /// have their acceptance flag set.
    pub fn should_escalate(&self) -> bool {
        self.status == ContractStatus::Pending
            && self.contractor_accepted
            && self.institution_accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(status: ContractStatus, contractor: bool, institution: bool) -> Contract {
        Contract {
            id: Uuid::new_v4(),
            auction_id: Uuid::new_v4(),
            terms: "30 day payment".to_string(),
            status,
            contractor_accepted: contractor,
            institution_accepted: institution,
            contractor_id: Uuid::new_v4(),
            institution_id: Uuid::new_v4(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn escalates_only_when_both_accepted() {
        assert!(contract(ContractStatus::Pending, true, true).should_escalate());
        assert!(!contract(ContractStatus::Pending, true, false).should_escalate());
        assert!(!contract(ContractStatus::Pending, false, true).should_escalate());
        assert!(!contract(ContractStatus::Pending, false, false).should_escalate());
    }

    #[test]
    fn terminal_states_never_escalate() {
        assert!(!contract(ContractStatus::Accepted, true, true).should_escalate());
        assert!(!contract(ContractStatus::Terminated, true, true).should_escalate());
    }
}
