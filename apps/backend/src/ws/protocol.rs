//! Wire protocol for the WebSocket surface.
//!
//! Client frames are dispatched on an `action` field; every frame gets a
//! reply envelope tagged with `type`. Error envelopes carry the same
//! SCREAMING_SNAKE_CASE codes as the HTTP problem responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::snapshot::{GameSnapshot, PlayerView};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ClientMsg {
    Create,

    #[serde(rename_all = "camelCase")]
    Join { game_id: Uuid, name: String },

    #[serde(rename_all = "camelCase")]
    Move {
        game_id: Uuid,
        #[serde(rename = "move")]
        mv: MoveFrame,
    },

    #[serde(rename_all = "camelCase")]
    Get { game_id: Uuid },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveFrame {
    pub player_id: Uuid,
    pub row: u8,
    pub col: u8,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMsg {
    #[serde(rename_all = "camelCase")]
    Created { game_id: Uuid },

    Joined { player: PlayerView },

    Update { game: GameSnapshot },

    State { game: GameSnapshot },

    Error { code: String, message: String },
}
