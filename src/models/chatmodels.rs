// models/chatmodels.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Chat {
    pub id: Uuid,
    pub user_one_id: Uuid,
    pub user_two_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
}

impl Chat {
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.user_one_id == user_id || self.user_two_id == user_id
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Message {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participant_helpers() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let chat = Chat {
            id: Uuid::new_v4(),
            user_one_id: a,
            user_two_id: b,
            created_at: None,
        };

        assert!(chat.has_participant(a));
        assert!(chat.has_participant(b));
        assert!(!chat.has_participant(Uuid::new_v4()));
    }
}
