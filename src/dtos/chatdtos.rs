// dtos/chatdtos.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::chatmodels::Message;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChatDto {
    pub user_one_id: Uuid,
    pub user_two_id: Uuid,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageDto {
    pub chat_id: Uuid,
    pub sender_id: Uuid,

    #[validate(length(min = 1, max = 5000, message = "Message content is required"))]
    pub content: String,
}

/// Client-to-server events on the chat socket. Tagged the way the frontend
/// emits them: {"event": "joinRoom", "chat_id": "..."}.
#[derive(Debug, Deserialize)]
#[serde(tag = "event")]
pub enum ChatClientEvent {
    #[serde(rename = "joinRoom")]
    JoinRoom { chat_id: Uuid },
    #[serde(rename = "leaveRoom")]
    LeaveRoom { chat_id: Uuid },
}

#[derive(Debug, Serialize)]
#[serde(tag = "event")]
pub enum ChatServerEvent {
    #[serde(rename = "receiveMessage")]
    ReceiveMessage { data: Message },
    #[serde(rename = "error")]
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_events_parse() {
        let chat_id = Uuid::new_v4();
        let raw = format!(r#"{{"event":"joinRoom","chat_id":"{}"}}"#, chat_id);
        match serde_json::from_str::<ChatClientEvent>(&raw).unwrap() {
            ChatClientEvent::JoinRoom { chat_id: parsed } => assert_eq!(parsed, chat_id),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn server_event_is_tagged() {
        let message = Message {
            id: Uuid::new_v4(),
            chat_id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            content: "hello".to_string(),
            created_at: None,
        };
        let raw = serde_json::to_value(ChatServerEvent::ReceiveMessage { data: message }).unwrap();
        assert_eq!(raw["event"], "receiveMessage");
        assert_eq!(raw["data"]["content"], "hello");
    }

    #[test]
    fn empty_message_is_rejected() {
        let dto = SendMessageDto {
            chat_id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            content: "".to_string(),
        };
        assert!(dto.validate().is_err());
    }
}
