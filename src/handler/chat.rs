use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
        Path,
    },
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{chatdb::ChatExt, userdb::UserExt},
    dtos::chatdtos::{ChatClientEvent, ChatServerEvent, CreateChatDto, SendMessageDto},
    error::{ErrorMessage, HttpError},
    middleware::AuthenticatedUser,
    models::usermodel::User,
    AppState,
};

pub fn chat_handler() -> Router {
    Router::new()
        .route("/create-chat", post(create_chat))
        .route("/get-chats", get(get_chats))
        .route("/chat/:chat_id", get(get_chat_messages))
        .route("/send-message", post(send_message))
        .route("/ws", get(chat_ws))
}

pub async fn create_chat(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(body): Json<CreateChatDto>,
) -> Result<impl IntoResponse, HttpError> {
    if auth.user.id != body.user_one_id && auth.user.id != body.user_two_id {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    if body.user_one_id == body.user_two_id {
        return Err(HttpError::bad_request("Cannot open a chat with yourself"));
    }

    let other_user_id = if auth.user.id == body.user_one_id {
        body.user_two_id
    } else {
        body.user_one_id
    };

    let _ = app_state
        .db_client
        .get_user(Some(other_user_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    let chat = app_state
        .db_client
        .create_or_get_chat(body.user_one_id, body.user_two_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": chat
    })))
}

pub async fn get_chats(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, HttpError> {
    let chats = app_state
        .db_client
        .get_user_chats(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": chats
    })))
}

pub async fn get_chat_messages(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(chat_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let chat = app_state
        .db_client
        .get_chat_by_id(chat_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Chat not found"))?;

    if !chat.has_participant(auth.user.id) {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let messages = app_state
        .db_client
        .get_chat_messages(chat_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "chat": chat,
            "messages": messages
        }
    })))
}

pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(body): Json<SendMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if body.sender_id != auth.user.id {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    let chat = app_state
        .db_client
        .get_chat_by_id(body.chat_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Chat not found"))?;

    if !chat.has_participant(auth.user.id) {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    // Persist first; the row is the durable source of truth and the
    // broadcast is a best-effort notification on top of it.
    let message = app_state
        .db_client
        .save_message(body.chat_id, auth.user.id, body.content)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let delivered = app_state.chat_rooms.publish(body.chat_id, &message);
    tracing::debug!(
        "message {} published to {} subscriber(s) of chat {}",
        message.id,
        delivered,
        body.chat_id
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "data": message
    })))
}

pub async fn chat_ws(
    ws: WebSocketUpgrade,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state, auth.user))
}

/// One socket per connected client. The client joins/leaves a room per open
/// chat window; every room subscription runs as its own forwarding task
/// feeding the single writer.
async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>, user: User) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::channel::<WsMessage>(32);

    let write_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut room_tasks: HashMap<Uuid, JoinHandle<()>> = HashMap::new();

    while let Some(Ok(frame)) = stream.next().await {
        let text = match frame {
            WsMessage::Text(text) => text,
            WsMessage::Close(_) => break,
            _ => continue,
        };

        let event = match serde_json::from_str::<ChatClientEvent>(&text) {
            Ok(event) => event,
            Err(_) => {
                send_event(
                    &tx,
                    &ChatServerEvent::Error {
                        message: "Unrecognized event".to_string(),
                    },
                )
                .await;
                continue;
            }
        };

        match event {
            ChatClientEvent::JoinRoom { chat_id } => {
                if room_tasks.contains_key(&chat_id) {
                    continue;
                }

                match chat_membership(&app_state, chat_id, user.id).await {
                    Ok(true) => {}
                    Ok(false) => {
                        send_event(
                            &tx,
                            &ChatServerEvent::Error {
                                message: "Not a participant of this chat".to_string(),
                            },
                        )
                        .await;
                        continue;
                    }
                    Err(_) => {
                        send_event(
                            &tx,
                            &ChatServerEvent::Error {
                                message: "Chat not found".to_string(),
                            },
                        )
                        .await;
                        continue;
                    }
                }

                let mut room = app_state.chat_rooms.subscribe(chat_id);
                let forward_tx = tx.clone();
                let task = tokio::spawn(async move {
                    loop {
                        match room.recv().await {
                            Ok(message) => {
                                let event = ChatServerEvent::ReceiveMessage { data: message };
                                if !send_event(&forward_tx, &event).await {
                                    break;
                                }
                            }
                            // A slow consumer that lagged just misses those
                            // messages; history fetch covers the gap.
                            Err(broadcast::error::RecvError::Lagged(_)) => continue,
                            Err(broadcast::error::RecvError::Closed) => break,
                        }
                    }
                });

                room_tasks.insert(chat_id, task);
                tracing::debug!("user {} joined room {}", user.id, chat_id);
            }
            ChatClientEvent::LeaveRoom { chat_id } => {
                if let Some(task) = room_tasks.remove(&chat_id) {
                    task.abort();
                    tracing::debug!("user {} left room {}", user.id, chat_id);
                }
            }
        }
    }

    for (_, task) in room_tasks {
        task.abort();
    }
    write_task.abort();
}

async fn send_event(tx: &mpsc::Sender<WsMessage>, event: &ChatServerEvent) -> bool {
    match serde_json::to_string(event) {
        Ok(payload) => tx.send(WsMessage::Text(payload)).await.is_ok(),
        Err(_) => false,
    }
}

async fn chat_membership(
    app_state: &AppState,
    chat_id: Uuid,
    user_id: Uuid,
) -> Result<bool, HttpError> {
    let chat = app_state
        .db_client
        .get_chat_by_id(chat_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Chat not found"))?;

    Ok(chat.has_participant(user_id))
}
