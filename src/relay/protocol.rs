// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire messages of the room-scoped realtime channel.
//!
//! Messages are JSON, internally tagged with `type` in kebab-case, matching
//! the action encoding. A client is a member of at most one game room at a
//! time; server broadcasts carry the source client id so receivers can drop
//! their own echoes.

use serde::{Deserialize, Serialize};

use crate::model::{Board, ClientId, Dow, Focus, Game, GameId, PlayerId, PlayerProfile};
use crate::ops::Action;

/// How a client names the session it wants: an explicit game id, or the
/// day-of-week rotation resolved through the player's owner map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionKey {
    Game { game_id: GameId },
    DayOfWeek { dow: Dow },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Presents the identity-provider token; must precede `request-session`.
    Authenticate {
        token: String,
    },
    RequestSession {
        player_id: PlayerId,
        session_key: SessionKey,
    },
    FocusChanged {
        player_id: PlayerId,
        game_id: GameId,
        focus: Focus,
    },
    ActionApplied {
        game_id: GameId,
        action: Action,
    },
    /// Fire-and-forget board snapshot for durability; no acknowledgement
    /// beyond the saved flag flipping on the next `session-loaded`.
    PersistBoard {
        game_id: GameId,
        board: Board,
        autocheck: bool,
    },
    LeaveSession {
        player_id: PlayerId,
        game_id: GameId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    Authenticated {
        profile: PlayerProfile,
    },
    AuthFailed {
        reason: String,
    },
    SessionLoaded {
        game: Box<Game>,
    },
    NotFound {
        what: String,
        key: String,
    },
    PresenceOnline {
        player_id: PlayerId,
        display_name: String,
        game_id: GameId,
    },
    PresenceOffline {
        player_id: PlayerId,
        game_id: GameId,
    },
    FocusChanged {
        source_client_id: ClientId,
        player_id: PlayerId,
        game_id: GameId,
        focus: Focus,
    },
    ActionReceived {
        source_client_id: ClientId,
        game_id: GameId,
        action: Action,
    },
}

#[cfg(test)]
mod tests {
    use super::{ClientMessage, SessionKey, ServerMessage};
    use crate::model::{Dow, GameId, PlayerId};

    #[test]
    fn session_key_accepts_both_shapes() {
        let by_game: ClientMessage = serde_json::from_str(
            r#"{"type":"request-session","player_id":"p-1","session_key":{"game_id":"g-1"}}"#,
        )
        .expect("deserialize");
        assert_eq!(
            by_game,
            ClientMessage::RequestSession {
                player_id: PlayerId::new("p-1").unwrap(),
                session_key: SessionKey::Game {
                    game_id: GameId::new("g-1").unwrap()
                },
            }
        );

        let by_dow: ClientMessage = serde_json::from_str(
            r#"{"type":"request-session","player_id":"p-1","session_key":{"dow":"friday"}}"#,
        )
        .expect("deserialize");
        assert_eq!(
            by_dow,
            ClientMessage::RequestSession {
                player_id: PlayerId::new("p-1").unwrap(),
                session_key: SessionKey::DayOfWeek { dow: Dow::Friday },
            }
        );
    }

    #[test]
    fn server_messages_tag_in_kebab_case() {
        let message = ServerMessage::NotFound {
            what: "game".to_owned(),
            key: "g-9".to_owned(),
        };
        let json = serde_json::to_string(&message).expect("serialize");
        assert!(json.contains("\"type\":\"not-found\""));
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        let result: Result<ClientMessage, _> =
            serde_json::from_str(r#"{"type":"focus-changed","player_id":"p-1"}"#);
        assert!(result.is_err());
    }
}
