// service/realtime.rs
//
// Room-per-chat broadcast fan-out. Each chat id maps to a
// tokio::sync::broadcast channel; connected sockets subscribe on joinRoom
// and drop their receiver on leaveRoom/disconnect. Delivery is at-most-once
// with no backlog: the persisted row is the source of truth and clients
// that miss a publish catch up from history.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::chatmodels::Message;

const ROOM_CAPACITY: usize = 64;

#[derive(Debug, Clone, Default)]
pub struct ChatRooms {
    rooms: Arc<Mutex<HashMap<Uuid, broadcast::Sender<Message>>>>,
}

impl ChatRooms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins the room for a chat, creating it on first use.
    pub fn subscribe(&self, chat_id: Uuid) -> broadcast::Receiver<Message> {
        let mut rooms = self.rooms.lock().unwrap();
        rooms
            .entry(chat_id)
            .or_insert_with(|| broadcast::channel(ROOM_CAPACITY).0)
            .subscribe()
    }

    /// Publishes a persisted message to every current subscriber of the
    /// chat's room. Returns how many subscribers received it; rooms with no
    /// remaining subscribers are dropped rather than kept alive.
    pub fn publish(&self, chat_id: Uuid, message: &Message) -> usize {
        let mut rooms = self.rooms.lock().unwrap();

        let Some(sender) = rooms.get(&chat_id) else {
            return 0;
        };

        if sender.receiver_count() == 0 {
            rooms.remove(&chat_id);
            return 0;
        }

        sender.send(message.clone()).unwrap_or(0)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(chat_id: Uuid, content: &str) -> Message {
        Message {
            id: Uuid::new_v4(),
            chat_id,
            sender_id: Uuid::new_v4(),
            content: content.to_string(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn publish_reaches_only_joined_subscribers() {
        let rooms = ChatRooms::new();
        let chat_a = Uuid::new_v4();
        let chat_b = Uuid::new_v4();

        let mut first = rooms.subscribe(chat_a);
        let mut second = rooms.subscribe(chat_a);
        let mut other = rooms.subscribe(chat_b);

        let sent = message(chat_a, "hello");
        let delivered = rooms.publish(chat_a, &sent);
        assert_eq!(delivered, 2);

        assert_eq!(first.recv().await.unwrap().content, "hello");
        assert_eq!(second.recv().await.unwrap().content, "hello");
        assert!(matches!(
            other.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_dropped() {
        let rooms = ChatRooms::new();
        let chat_id = Uuid::new_v4();

        // No one ever joined.
        assert_eq!(rooms.publish(chat_id, &message(chat_id, "lost")), 0);

        // Joined once, then left: the room is reclaimed on next publish.
        let receiver = rooms.subscribe(chat_id);
        drop(receiver);
        assert_eq!(rooms.publish(chat_id, &message(chat_id, "late")), 0);
        assert_eq!(rooms.room_count(), 0);
    }

    #[tokio::test]
    async fn messages_arrive_in_publish_order() {
        let rooms = ChatRooms::new();
        let chat_id = Uuid::new_v4();
        let mut receiver = rooms.subscribe(chat_id);

        rooms.publish(chat_id, &message(chat_id, "first"));
        rooms.publish(chat_id, &message(chat_id, "second"));

        assert_eq!(receiver.recv().await.unwrap().content, "first");
        assert_eq!(receiver.recv().await.unwrap().content, "second");
    }

    #[tokio::test]
    async fn late_joiners_get_no_backlog() {
        let rooms = ChatRooms::new();
        let chat_id = Uuid::new_v4();

        let _keepalive = rooms.subscribe(chat_id);
        rooms.publish(chat_id, &message(chat_id, "before-join"));

        let mut late = rooms.subscribe(chat_id);
        assert!(matches!(
            late.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }
}
