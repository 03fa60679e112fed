// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The websocket relay.
//!
//! One connection is one client. A client authenticates, requests a session,
//! and from then on every message it sends is rebroadcast to the other room
//! members and folded into the stored game. The relay never queues per-client
//! state beyond the room subscription: the store is the source of truth and
//! every read-modify-write loads a fresh copy.
//!
//! Failures on a single message are logged and dropped; a bad frame never
//! tears down the process or the other members of the room.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::model::{ClientId, Dow, Game, GameId, PlayerId, PlayerProfile};
use crate::ops::apply_action;
use crate::store::DataDir;

use super::protocol::{ClientMessage, ServerMessage, SessionKey};
use super::room::{Envelope, RoomManager};

static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

/// The identity a token resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub player_id: PlayerId,
    pub display_name: String,
    pub photo_url: Option<String>,
}

#[derive(Debug)]
pub enum AuthError {
    InvalidToken(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken(reason) => write!(f, "invalid token: {reason}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Resolves an opaque client token to a player identity.
pub trait IdentityProvider: Send + Sync {
    fn verify(&self, token: &str) -> Result<PlayerIdentity, AuthError>;
}

/// Development identity provider: the token is
/// `<player_id>:<display_name>[:<photo_url>]`, taken at face value.
#[derive(Debug, Default)]
pub struct TrustingIdentity;

impl IdentityProvider for TrustingIdentity {
    fn verify(&self, token: &str) -> Result<PlayerIdentity, AuthError> {
        let mut parts = token.splitn(3, ':');
        let raw_id = parts.next().unwrap_or_default();
        let player_id = PlayerId::new(raw_id)
            .map_err(|err| AuthError::InvalidToken(err.to_string()))?;
        let display_name = match parts.next() {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => return Err(AuthError::InvalidToken("missing display name".to_owned())),
        };
        let photo_url = parts.next().filter(|url| !url.is_empty()).map(str::to_owned);
        Ok(PlayerIdentity {
            player_id,
            display_name,
            photo_url,
        })
    }
}

pub struct RelayState {
    store: DataDir,
    rooms: RoomManager,
    identity: Arc<dyn IdentityProvider>,
}

impl RelayState {
    pub fn new(store: DataDir, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            store,
            rooms: RoomManager::new(),
            identity,
        }
    }

    pub fn store(&self) -> &DataDir {
        &self.store
    }

    pub fn rooms(&self) -> &RoomManager {
        &self.rooms
    }
}

pub fn router(state: Arc<RelayState>) -> Router {
    Router::new().route("/ws", get(upgrade)).with_state(state)
}

async fn upgrade(
    State(state): State<Arc<RelayState>>,
    upgrade: WebSocketUpgrade,
) -> impl IntoResponse {
    upgrade.on_upgrade(move |socket| handle_connection(state, socket))
}

type SharedSink = Arc<Mutex<SplitSink<WebSocket, Message>>>;

/// Per-connection state the message loop threads through.
struct Connection {
    client_id: ClientId,
    identity: Option<PlayerIdentity>,
    /// The room this connection is currently a member of.
    membership: Option<(PlayerId, GameId)>,
    forwarder: Option<JoinHandle<()>>,
}

impl Connection {
    fn new(client_id: ClientId) -> Self {
        Self {
            client_id,
            identity: None,
            membership: None,
            forwarder: None,
        }
    }
}

async fn handle_connection(state: Arc<RelayState>, socket: WebSocket) {
    let serial = NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed);
    let client_id = match ClientId::new(format!("client-{serial}")) {
        Ok(id) => id,
        Err(err) => {
            log::error!("client id allocation failed: {err}");
            return;
        }
    };
    log::info!("client {client_id} connected");

    let (sink, stream) = socket.split();
    let sink: SharedSink = Arc::new(Mutex::new(sink));
    let mut connection = Connection::new(client_id);

    message_loop(&state, &mut connection, &sink, stream).await;

    // Disconnect behaves like an explicit leave-session.
    leave_current_session(&state, &mut connection).await;
    log::info!("client {} disconnected", connection.client_id);
}

async fn message_loop(
    state: &Arc<RelayState>,
    connection: &mut Connection,
    sink: &SharedSink,
    mut stream: SplitStream<WebSocket>,
) {
    while let Some(frame) = stream.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(err) => {
                log::warn!("client {}: socket error: {err}", connection.client_id);
                return;
            }
        };
        let text = match frame {
            Message::Text(text) => text,
            Message::Close(_) => return,
            // Pings are answered by axum; binary and pong frames are ignored.
            _ => continue,
        };
        let message: ClientMessage = match serde_json::from_str(text.as_str()) {
            Ok(message) => message,
            Err(err) => {
                log::warn!("client {}: malformed message: {err}", connection.client_id);
                continue;
            }
        };
        handle_message(state, connection, sink, message).await;
    }
}

async fn handle_message(
    state: &Arc<RelayState>,
    connection: &mut Connection,
    sink: &SharedSink,
    message: ClientMessage,
) {
    match message {
        ClientMessage::Authenticate { token } => {
            authenticate(state, connection, sink, &token).await;
        }
        ClientMessage::RequestSession {
            player_id,
            session_key,
        } => {
            request_session(state, connection, sink, player_id, session_key).await;
        }
        ClientMessage::FocusChanged {
            player_id,
            game_id,
            focus,
        } => {
            if !is_member(connection, &player_id, &game_id) {
                log::warn!(
                    "client {}: focus-changed outside current session, dropped",
                    connection.client_id
                );
                return;
            }
            state.rooms.broadcast(
                &game_id,
                Envelope {
                    source: connection.client_id.clone(),
                    message: ServerMessage::FocusChanged {
                        source_client_id: connection.client_id.clone(),
                        player_id: player_id.clone(),
                        game_id: game_id.clone(),
                        focus: focus.clone(),
                    },
                },
            );
            if let Err(err) = with_game(state, &game_id, |game| {
                game.set_player_focus(&player_id, focus);
            }) {
                log::warn!("client {}: focus persist failed: {err}", connection.client_id);
            }
        }
        ClientMessage::ActionApplied { game_id, action } => {
            let Some((_, member_game)) = &connection.membership else {
                log::warn!(
                    "client {}: action before joining a session, dropped",
                    connection.client_id
                );
                return;
            };
            if member_game != &game_id {
                log::warn!(
                    "client {}: action for a foreign game, dropped",
                    connection.client_id
                );
                return;
            }
            state.rooms.broadcast(
                &game_id,
                Envelope {
                    source: connection.client_id.clone(),
                    message: ServerMessage::ActionReceived {
                        source_client_id: connection.client_id.clone(),
                        game_id: game_id.clone(),
                        action: action.clone(),
                    },
                },
            );
            let result = with_game(state, &game_id, |game| {
                if let Err(err) = apply_action(game, &action) {
                    log::warn!("stored game {game_id}: action rejected: {err}");
                }
            });
            if let Err(err) = result {
                log::warn!("client {}: action persist failed: {err}", connection.client_id);
            }
        }
        ClientMessage::PersistBoard {
            game_id,
            board,
            autocheck,
        } => {
            if !connection
                .membership
                .as_ref()
                .is_some_and(|(_, member_game)| member_game == &game_id)
            {
                log::warn!(
                    "client {}: persist-board for a foreign game, dropped",
                    connection.client_id
                );
                return;
            }
            let result = with_game(state, &game_id, |game| {
                game.replace_board(board, autocheck);
                game.mark_saved();
            });
            if let Err(err) = result {
                log::warn!("client {}: board persist failed: {err}", connection.client_id);
            }
        }
        ClientMessage::LeaveSession { player_id, game_id } => {
            if !is_member(connection, &player_id, &game_id) {
                return;
            }
            leave_current_session(state, connection).await;
        }
    }
}

fn is_member(connection: &Connection, player_id: &PlayerId, game_id: &GameId) -> bool {
    connection
        .membership
        .as_ref()
        .is_some_and(|(member, game)| member == player_id && game == game_id)
}

async fn authenticate(
    state: &Arc<RelayState>,
    connection: &mut Connection,
    sink: &SharedSink,
    token: &str,
) {
    let identity = match state.identity.verify(token) {
        Ok(identity) => identity,
        Err(err) => {
            log::warn!("client {}: authentication failed: {err}", connection.client_id);
            send(sink, &ServerMessage::AuthFailed {
                reason: err.to_string(),
            })
            .await;
            return;
        }
    };

    let profile = match load_or_create_profile(state, &identity) {
        Ok(profile) => profile,
        Err(err) => {
            log::error!("client {}: profile load failed: {err}", connection.client_id);
            send(sink, &ServerMessage::AuthFailed {
                reason: "profile unavailable".to_owned(),
            })
            .await;
            return;
        }
    };

    log::info!(
        "client {} authenticated as {}",
        connection.client_id,
        identity.player_id
    );
    connection.identity = Some(identity);
    send(sink, &ServerMessage::Authenticated { profile }).await;
}

fn load_or_create_profile(
    state: &RelayState,
    identity: &PlayerIdentity,
) -> Result<PlayerProfile, crate::store::StoreError> {
    if let Some(mut profile) = state.store.load_player(&identity.player_id)? {
        if profile.display_name != identity.display_name
            || profile.photo_url != identity.photo_url
        {
            profile.display_name = identity.display_name.clone();
            profile.photo_url = identity.photo_url.clone();
            state.store.save_player(&profile)?;
        }
        return Ok(profile);
    }
    let profile = PlayerProfile::new(
        identity.player_id.clone(),
        identity.display_name.clone(),
        identity.photo_url.clone(),
    );
    state.store.save_player(&profile)?;
    Ok(profile)
}

async fn request_session(
    state: &Arc<RelayState>,
    connection: &mut Connection,
    sink: &SharedSink,
    player_id: PlayerId,
    session_key: SessionKey,
) {
    // Sessions are only handed to the authenticated identity; a request for
    // somebody else's player id is refused, not resolved.
    let Some(identity) = connection.identity.clone() else {
        send(sink, &ServerMessage::AuthFailed {
            reason: "authenticate first".to_owned(),
        })
        .await;
        return;
    };
    if identity.player_id != player_id {
        log::warn!(
            "client {}: session request for foreign player {player_id}, refused",
            connection.client_id
        );
        send(sink, &ServerMessage::AuthFailed {
            reason: "player id does not match the authenticated identity".to_owned(),
        })
        .await;
        return;
    }

    let resolved = match resolve_session(state, &identity, &session_key) {
        Ok(Ok(game)) => game,
        Ok(Err(not_found)) => {
            send(sink, &not_found).await;
            return;
        }
        Err(err) => {
            log::error!(
                "client {}: session resolution failed: {err}",
                connection.client_id
            );
            send(sink, &ServerMessage::NotFound {
                what: "session".to_owned(),
                key: session_key_display(&session_key),
            })
            .await;
            return;
        }
    };
    let game_id = resolved.game_id().clone();

    // Switching sessions leaves the previous room first.
    if connection
        .membership
        .as_ref()
        .is_some_and(|(_, member_game)| member_game != &game_id)
    {
        leave_current_session(state, connection).await;
    }

    let receiver = state.rooms.join(&game_id);
    if let Some(forwarder) = connection.forwarder.take() {
        forwarder.abort();
    }
    connection.forwarder = Some(spawn_forwarder(
        connection.client_id.clone(),
        sink.clone(),
        receiver,
    ));
    connection.membership = Some((player_id.clone(), game_id.clone()));

    send(sink, &ServerMessage::SessionLoaded {
        game: Box::new(resolved),
    })
    .await;
    state.rooms.broadcast(
        &game_id,
        Envelope {
            source: connection.client_id.clone(),
            message: ServerMessage::PresenceOnline {
                player_id,
                display_name: identity.display_name.clone(),
                game_id: game_id.clone(),
            },
        },
    );
}

/// Loads (or, for an owned day-of-week slot, creates) the requested game and
/// attaches the player to it. The outer error is a store failure; the inner
/// `Err` is the not-found reply for keys that resolve to nothing.
fn resolve_session(
    state: &RelayState,
    identity: &PlayerIdentity,
    session_key: &SessionKey,
) -> Result<Result<Game, ServerMessage>, crate::store::StoreError> {
    let mut profile = load_or_create_profile(state, identity)?;

    let mut game = match session_key {
        SessionKey::Game { game_id } => match state.store.load_game(game_id)? {
            Some(game) => game,
            None => {
                return Ok(Err(ServerMessage::NotFound {
                    what: "game".to_owned(),
                    key: game_id.to_string(),
                }))
            }
        },
        SessionKey::DayOfWeek { dow } => {
            let existing = match profile.owner_games.get(dow) {
                Some(game_id) => state.store.load_game(game_id)?,
                None => None,
            };
            match existing {
                Some(game) => game,
                None => {
                    let Some(puzzle) = state.store.load_puzzle(*dow)? else {
                        return Ok(Err(ServerMessage::NotFound {
                            what: "puzzle".to_owned(),
                            key: dow.to_string(),
                        }));
                    };
                    let game_id = owned_game_id(&identity.player_id, *dow)?;
                    profile.owner_games.insert(*dow, game_id.clone());
                    Game::new(game_id, &puzzle)
                }
            }
        }
    };

    game.add_player(
        identity.player_id.clone(),
        identity.display_name.clone(),
        identity.photo_url.clone(),
    );
    let owner = game
        .player(&identity.player_id)
        .is_some_and(|player| player.owner);
    if !owner {
        profile.team_games.insert(game.game_id().clone());
    }

    state.store.save_game(&game)?;
    state.store.save_player(&profile)?;
    Ok(Ok(game))
}

fn owned_game_id(player_id: &PlayerId, dow: Dow) -> Result<GameId, crate::store::StoreError> {
    GameId::new(format!("{player_id}-{dow}")).map_err(|err| crate::store::StoreError::Io {
        path: std::path::PathBuf::new(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string()),
    })
}

fn session_key_display(session_key: &SessionKey) -> String {
    match session_key {
        SessionKey::Game { game_id } => game_id.to_string(),
        SessionKey::DayOfWeek { dow } => dow.to_string(),
    }
}

async fn leave_current_session(state: &Arc<RelayState>, connection: &mut Connection) {
    if let Some(forwarder) = connection.forwarder.take() {
        forwarder.abort();
    }
    let Some((player_id, game_id)) = connection.membership.take() else {
        return;
    };
    if let Err(err) = with_game(state, &game_id, |game| {
        game.remove_player(&player_id);
    }) {
        log::warn!("client {}: leave persist failed: {err}", connection.client_id);
    }
    state.rooms.broadcast(
        &game_id,
        Envelope {
            source: connection.client_id.clone(),
            message: ServerMessage::PresenceOffline {
                player_id,
                game_id: game_id.clone(),
            },
        },
    );
    log::info!("client {} left game {game_id}", connection.client_id);
}

/// Read-modify-write against the stored game. Games that vanished between
/// messages are a no-op, not an error.
fn with_game(
    state: &RelayState,
    game_id: &GameId,
    mutate: impl FnOnce(&mut Game),
) -> Result<(), crate::store::StoreError> {
    let Some(mut game) = state.store.load_game(game_id)? else {
        log::warn!("game {game_id} missing from the store, update dropped");
        return Ok(());
    };
    mutate(&mut game);
    state.store.save_game(&game)
}

fn spawn_forwarder(
    client_id: ClientId,
    sink: SharedSink,
    mut receiver: tokio::sync::broadcast::Receiver<Envelope>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let envelope = match receiver.recv().await {
                Ok(envelope) => envelope,
                Err(tokio::sync::broadcast::error::RecvError::Lagged(missed)) => {
                    log::warn!("client {client_id}: dropped {missed} lagged broadcasts");
                    continue;
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => return,
            };
            // A client never receives its own frames back.
            if envelope.source == client_id {
                continue;
            }
            if !send(&sink, &envelope.message).await {
                return;
            }
        }
    })
}

/// Serializes and sends one server message; returns false when the socket is
/// gone.
async fn send(sink: &SharedSink, message: &ServerMessage) -> bool {
    let json = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(err) => {
            log::error!("server message serialization failed: {err}");
            return true;
        }
    };
    sink.lock()
        .await
        .send(Message::Text(json.into()))
        .await
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::{IdentityProvider, TrustingIdentity};

    #[test]
    fn trusting_identity_splits_the_token() {
        let identity = TrustingIdentity
            .verify("p-1:Ada:https://example.test/ada.png")
            .expect("verify");
        assert_eq!(identity.player_id.as_str(), "p-1");
        assert_eq!(identity.display_name, "Ada");
        assert_eq!(
            identity.photo_url.as_deref(),
            Some("https://example.test/ada.png")
        );
    }

    #[test]
    fn trusting_identity_photo_is_optional() {
        let identity = TrustingIdentity.verify("p-1:Ada").expect("verify");
        assert_eq!(identity.photo_url, None);
    }

    #[test]
    fn trusting_identity_rejects_bad_tokens() {
        assert!(TrustingIdentity.verify("").is_err());
        assert!(TrustingIdentity.verify("p-1").is_err());
        assert!(TrustingIdentity.verify("p-1:").is_err());
    }
}
