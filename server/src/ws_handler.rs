use axum::extract::ws::{Message, WebSocket};
use common::games::tictactoe::TicTacToeCommand;
use common::log;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::messages::{ClientMessage, ServerMessage};
use crate::web_server::WebServerState;

const CLIENT_QUEUE_SIZE: usize = 128;

pub async fn handle_websocket(socket: WebSocket, state: WebServerState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let (tx, mut rx) = mpsc::channel::<ServerMessage>(CLIENT_QUEUE_SIZE);

    let send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let text = match message.encode() {
                Ok(text) => text,
                Err(e) => {
                    log!("{}", e);
                    continue;
                }
            };
            if ws_sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let broadcaster = state.broadcaster;
    let client_id = broadcaster.register(tx).await;
    log!(
        "WebSocket client connected: {} ({} connected)",
        client_id,
        broadcaster.client_count().await
    );

    while let Some(result) = ws_receiver.next().await {
        let text = match result {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                log!("WebSocket error from {}: {}", client_id, e);
                break;
            }
        };

        let command = match ClientMessage::decode(text.as_str()) {
            Ok(message) => TicTacToeCommand::from(message),
            Err(e) => {
                log!("{} from {}", e, client_id);
                broadcaster
                    .send_to_client(&client_id, ServerMessage::Error { message: e })
                    .await;
                continue;
            }
        };

        if state.command_tx.send(command).is_err() {
            log!("Game session is gone, closing {}", client_id);
            break;
        }
    }

    broadcaster.unregister(&client_id).await;
    send_task.abort();
    log!("WebSocket client disconnected: {}", client_id);
}
