use std::collections::HashMap;
use std::sync::Arc;

use common::games::GameBroadcaster;
use common::games::tictactoe::GameSnapshot;
use common::log;
use tokio::sync::{Mutex, mpsc};

use crate::identifiers::ClientId;
use crate::messages::ServerMessage;

pub type ClientSender = mpsc::Sender<ServerMessage>;

/// Fans session snapshots out to every connected client and remembers the
/// latest one for late joiners and the HTTP state endpoint.
#[derive(Clone, Default)]
pub struct ClientBroadcaster {
    latest: Arc<Mutex<Option<GameSnapshot>>>,
    clients: Arc<Mutex<HashMap<ClientId, ClientSender>>>,
}

impl std::fmt::Debug for ClientBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBroadcaster").finish()
    }
}

impl ClientBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// The new client immediately receives the latest snapshot, if any.
    pub async fn register(&self, sender: ClientSender) -> ClientId {
        let client_id = ClientId::next();
        let latest = self.latest.lock().await;
        let mut clients = self.clients.lock().await;
        if let Some(snapshot) = latest.as_ref() {
            deliver(&client_id, &sender, ServerMessage::State(snapshot.clone()));
        }
        clients.insert(client_id, sender);
        client_id
    }

    pub async fn unregister(&self, client_id: &ClientId) {
        self.clients.lock().await.remove(client_id);
    }

    pub async fn client_count(&self) -> usize {
        self.clients.lock().await.len()
    }

    pub async fn latest_snapshot(&self) -> Option<GameSnapshot> {
        self.latest.lock().await.clone()
    }

    pub async fn send_to_client(&self, client_id: &ClientId, message: ServerMessage) {
        let clients = self.clients.lock().await;
        if let Some(sender) = clients.get(client_id) {
            deliver(client_id, sender, message);
        }
    }

    async fn broadcast_to_all(&self, message: ServerMessage) {
        let clients = self.clients.lock().await;
        for (client_id, sender) in clients.iter() {
            deliver(client_id, sender, message.clone());
        }
    }
}

/// Never waits on a slow client: a full queue drops the message, the next
/// snapshot supersedes it anyway.
fn deliver(client_id: &ClientId, sender: &ClientSender, message: ServerMessage) {
    if let Err(e) = sender.try_send(message) {
        log!("Failed to send to {}: {}", client_id, e);
    }
}

impl GameBroadcaster for ClientBroadcaster {
    async fn broadcast_state(&self, snapshot: GameSnapshot) {
        let mut latest = self.latest.lock().await;
        *latest = Some(snapshot.clone());
        self.broadcast_to_all(ServerMessage::State(snapshot)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::tictactoe::TicTacToeGameState;

    fn snapshot_after_move(index: usize) -> GameSnapshot {
        let mut state = TicTacToeGameState::new();
        state.place_mark(common::games::tictactoe::HUMAN_MARK, index).unwrap();
        state.snapshot()
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_clients() {
        let broadcaster = ClientBroadcaster::new();
        let (tx_a, mut rx_a) = mpsc::channel(8);
        let (tx_b, mut rx_b) = mpsc::channel(8);
        broadcaster.register(tx_a).await;
        broadcaster.register(tx_b).await;

        let snapshot = snapshot_after_move(4);
        broadcaster.broadcast_state(snapshot.clone()).await;

        assert_eq!(rx_a.recv().await, Some(ServerMessage::State(snapshot.clone())));
        assert_eq!(rx_b.recv().await, Some(ServerMessage::State(snapshot.clone())));
        assert_eq!(broadcaster.latest_snapshot().await, Some(snapshot));
    }

    #[tokio::test]
    async fn test_late_joiner_gets_latest_snapshot() {
        let broadcaster = ClientBroadcaster::new();
        let snapshot = snapshot_after_move(0);
        broadcaster.broadcast_state(snapshot.clone()).await;

        let (tx, mut rx) = mpsc::channel(8);
        broadcaster.register(tx).await;
        assert_eq!(rx.recv().await, Some(ServerMessage::State(snapshot)));
    }

    #[tokio::test]
    async fn test_unregistered_client_receives_nothing() {
        let broadcaster = ClientBroadcaster::new();
        let (tx, mut rx) = mpsc::channel(8);
        let client_id = broadcaster.register(tx).await;
        broadcaster.unregister(&client_id).await;
        assert_eq!(broadcaster.client_count().await, 0);

        broadcaster.broadcast_state(snapshot_after_move(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_full_client_queue_does_not_block_broadcast() {
        let broadcaster = ClientBroadcaster::new();
        let (tx, mut rx) = mpsc::channel(1);
        broadcaster.register(tx).await;

        broadcaster.broadcast_state(snapshot_after_move(1)).await;
        broadcaster.broadcast_state(snapshot_after_move(2)).await;

        assert_eq!(rx.recv().await, Some(ServerMessage::State(snapshot_after_move(1))));
        assert!(rx.try_recv().is_err());
        assert_eq!(broadcaster.latest_snapshot().await, Some(snapshot_after_move(2)));
    }

    #[tokio::test]
    async fn test_send_to_client_targets_one_client() {
        let broadcaster = ClientBroadcaster::new();
        let (tx_a, mut rx_a) = mpsc::channel(8);
        let (tx_b, mut rx_b) = mpsc::channel(8);
        let client_a = broadcaster.register(tx_a).await;
        broadcaster.register(tx_b).await;

        let error = ServerMessage::Error { message: "bad".to_string() };
        broadcaster.send_to_client(&client_a, error.clone()).await;
        assert_eq!(rx_a.recv().await, Some(error));
        assert!(rx_b.try_recv().is_err());
    }
}
