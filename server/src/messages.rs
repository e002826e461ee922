use common::games::tictactoe::{GameSnapshot, TicTacToeCommand};
use serde::{Deserialize, Serialize};

/// JSON text frames sent by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    ActivateCell { index: usize },
    ResetScores,
}

impl ClientMessage {
    pub fn decode(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Failed to decode client message: {}", e))
    }
}

impl From<ClientMessage> for TicTacToeCommand {
    fn from(message: ClientMessage) -> Self {
        match message {
            ClientMessage::ActivateCell { index } => TicTacToeCommand::ActivateCell { index },
            ClientMessage::ResetScores => TicTacToeCommand::ResetScores,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    State(GameSnapshot),
    Error { message: String },
}

impl ServerMessage {
    pub fn encode(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to encode server message: {}", e))
    }
}
