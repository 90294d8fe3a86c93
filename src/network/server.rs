//! WebSocket Arena Server
//!
//! Async WebSocket front-end for 1v1 battles. Handles authentication,
//! queue membership, input routing into live sessions, and settlement
//! when a session finishes. The server holds the only clock: every
//! input is stamped with server time on arrival.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, mpsc, RwLock};
use tokio::time::interval;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, error, info, instrument, warn};

use crate::game::matchmaking::{MatchedPair, MatchmakingQueue};
use crate::game::rating::{RatingBook, RatingEntry};
use crate::game::session::{
    BattleSession, BattleStatus, MatchKind, PlayerId, SessionId, Side,
};
use crate::network::auth::{authenticate, AuthConfig, AuthError};
use crate::network::protocol::{
    AuthRequest, AuthResult, ClientMessage, ErrorCode, JoinQueueRequest, MatchEndInfo,
    MatchFoundInfo, MatchOutcome, ServerError, ServerMessage, SessionInput, StateUpdate,
    LEADERBOARD_DEFAULT_LIMIT,
};
use crate::network::registry::SessionRegistry;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address.
    pub bind_addr: SocketAddr,
    /// Maximum concurrent connections.
    pub max_connections: usize,
    /// Idle time after which a running match is forfeited.
    pub forfeit_timeout: Duration,
    /// How often the forfeit sweeper runs.
    pub forfeit_sweep_interval: Duration,
    /// JWT validation settings.
    pub auth: AuthConfig,
    /// Server version string.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".parse().expect("static addr"),
            max_connections: 1000,
            forfeit_timeout: Duration::from_secs(60),
            forfeit_sweep_interval: Duration::from_secs(5),
            auth: AuthConfig::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ServerConfig {
    /// Build config from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("ARENA_BIND_ADDR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.bind_addr),
            max_connections: std::env::var("ARENA_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            forfeit_timeout: std::env::var("ARENA_FORFEIT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.forfeit_timeout),
            forfeit_sweep_interval: defaults.forfeit_sweep_interval,
            auth: AuthConfig::from_env(),
            version: defaults.version,
        }
    }
}

/// Arena server errors.
#[derive(Debug, thiserror::Error)]
pub enum ArenaServerError {
    /// Failed to bind to address.
    #[error("failed to bind: {0}")]
    BindFailed(#[from] std::io::Error),

    /// WebSocket error.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Connected client state.
struct ConnectedClient {
    /// Player identifier (set after auth).
    player_id: Option<PlayerId>,
    /// Last activity, for idle connection cleanup.
    last_activity: Instant,
    /// Message channel to this client.
    sender: mpsc::Sender<ServerMessage>,
}

/// State shared by every connection task.
struct Shared {
    config: ServerConfig,
    registry: SessionRegistry,
    queue: RwLock<MatchmakingQueue>,
    ratings: RwLock<RatingBook>,
    clients: RwLock<BTreeMap<SocketAddr, ConnectedClient>>,
    outcome_tx: mpsc::Sender<MatchOutcome>,
}

/// Wire code for an authentication failure.
fn auth_error_code(err: &AuthError) -> ErrorCode {
    match err {
        AuthError::Expired => ErrorCode::TokenExpired,
        AuthError::NotConfigured => ErrorCode::AuthFailed,
        _ => ErrorCode::InvalidToken,
    }
}

/// Server wall clock in unix millis.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// The arena server.
pub struct ArenaServer {
    shared: Arc<Shared>,
    shutdown_tx: broadcast::Sender<()>,
}

impl ArenaServer {
    /// Create a new server.
    ///
    /// The returned receiver delivers one [`MatchOutcome`] per finished
    /// session; a persistence or reward consumer should drain it.
    pub fn new(config: ServerConfig) -> (Self, mpsc::Receiver<MatchOutcome>) {
        let (shutdown_tx, _) = broadcast::channel(1);
        let (outcome_tx, outcome_rx) = mpsc::channel(256);

        let server = Self {
            shared: Arc::new(Shared {
                config,
                registry: SessionRegistry::new(),
                queue: RwLock::new(MatchmakingQueue::new()),
                ratings: RwLock::new(RatingBook::new()),
                clients: RwLock::new(BTreeMap::new()),
                outcome_tx,
            }),
            shutdown_tx,
        };
        (server, outcome_rx)
    }

    /// Run the server.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<(), ArenaServerError> {
        let listener = TcpListener::bind(&self.shared.config.bind_addr).await?;
        info!("arena server listening on {}", self.shared.config.bind_addr);

        let sweeper_shared = Arc::clone(&self.shared);
        let sweeper_handle = tokio::spawn(async move {
            Self::run_forfeit_sweeper(sweeper_shared).await;
        });

        let cleanup_shared = Arc::clone(&self.shared);
        let cleanup_handle = tokio::spawn(async move {
            Self::run_cleanup_loop(cleanup_shared).await;
        });

        let mut shutdown_rx = self.shutdown_tx.subscribe();

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            let connected = self.shared.clients.read().await.len();
                            if connected >= self.shared.config.max_connections {
                                warn!("connection limit reached, refusing {}", addr);
                                tokio::spawn(Self::refuse_connection(stream));
                                continue;
                            }

                            info!("new connection from {}", addr);
                            self.handle_connection(stream, addr);
                        }
                        Err(e) => {
                            error!("accept error: {}", e);
                        }
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("shutdown signal received");
                    break;
                }
            }
        }

        sweeper_handle.abort();
        cleanup_handle.abort();

        Ok(())
    }

    /// Complete the handshake just far enough to tell the client the
    /// server is at capacity, then close.
    async fn refuse_connection(stream: TcpStream) {
        let Ok(mut ws) = accept_async(stream).await else {
            return;
        };
        let refusal = ServerMessage::Error(ServerError {
            code: ErrorCode::ServerOverloaded,
            message: "server at capacity, try again later".to_string(),
        });
        if let Ok(text) = refusal.to_json() {
            let _ = ws.send(Message::Text(text)).await;
        }
        let _ = ws.close(None).await;
    }

    /// Handle a new WebSocket connection.
    fn handle_connection(&self, stream: TcpStream, addr: SocketAddr) {
        let shared = Arc::clone(&self.shared);
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            let ws_stream = match accept_async(stream).await {
                Ok(ws) => ws,
                Err(e) => {
                    error!("websocket handshake failed for {}: {}", addr, e);
                    return;
                }
            };

            let (mut ws_sender, mut ws_receiver) = ws_stream.split();
            let (msg_tx, mut msg_rx) = mpsc::channel::<ServerMessage>(64);

            {
                let mut clients = shared.clients.write().await;
                clients.insert(
                    addr,
                    ConnectedClient {
                        player_id: None,
                        last_activity: Instant::now(),
                        sender: msg_tx.clone(),
                    },
                );
            }

            // Outbound pump: serializes and writes everything addressed
            // to this connection.
            let sender_task = tokio::spawn(async move {
                while let Some(msg) = msg_rx.recv().await {
                    let text = match msg.to_json() {
                        Ok(t) => t,
                        Err(e) => {
                            error!("failed to serialize message: {}", e);
                            continue;
                        }
                    };
                    if ws_sender.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
            });

            loop {
                tokio::select! {
                    msg = ws_receiver.next() => {
                        match msg {
                            Some(Ok(Message::Text(text))) => {
                                let client_msg = match ClientMessage::from_json(&text) {
                                    Ok(m) => m,
                                    Err(e) => {
                                        debug!("invalid message from {}: {}", addr, e);
                                        let _ = msg_tx.send(ServerMessage::Error(ServerError {
                                            code: ErrorCode::InvalidMessage,
                                            message: "invalid message format".to_string(),
                                        })).await;
                                        continue;
                                    }
                                };

                                {
                                    let mut clients = shared.clients.write().await;
                                    if let Some(client) = clients.get_mut(&addr) {
                                        client.last_activity = Instant::now();
                                    }
                                }

                                Self::handle_client_message(&shared, addr, client_msg, &msg_tx)
                                    .await;
                            }
                            Some(Ok(Message::Ping(_))) => {
                                let _ = msg_tx.send(ServerMessage::Pong {
                                    timestamp: 0,
                                    server_time: now_ms(),
                                }).await;
                            }
                            Some(Ok(Message::Close(_))) | None => {
                                debug!("client {} disconnected", addr);
                                break;
                            }
                            Some(Err(e)) => {
                                error!("websocket error for {}: {}", addr, e);
                                break;
                            }
                            _ => {}
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        let _ = msg_tx.send(ServerMessage::Shutdown {
                            reason: "server shutting down".to_string(),
                        }).await;
                        break;
                    }
                }
            }

            sender_task.abort();
            Self::cleanup_connection(&shared, addr).await;
            info!("client {} cleaned up", addr);
        });
    }

    /// Drop a departed connection's queue entry and registration. A
    /// live session is left to the forfeit sweeper so a reconnecting
    /// opponent still gets their win.
    async fn cleanup_connection(shared: &Arc<Shared>, addr: SocketAddr) {
        let player_id = {
            let mut clients = shared.clients.write().await;
            clients.remove(&addr).and_then(|c| c.player_id)
        };

        if let Some(player_id) = player_id {
            let mut queue = shared.queue.write().await;
            queue.cancel(&player_id);
        }
    }

    /// Dispatch one parsed client message.
    async fn handle_client_message(
        shared: &Arc<Shared>,
        addr: SocketAddr,
        msg: ClientMessage,
        sender: &mpsc::Sender<ServerMessage>,
    ) {
        match msg {
            ClientMessage::Auth(auth) => {
                Self::handle_auth(shared, addr, auth, sender).await;
            }
            ClientMessage::JoinQueue(req) => {
                Self::handle_join_queue(shared, addr, req, sender).await;
            }
            ClientMessage::CancelQueue => {
                Self::handle_cancel_queue(shared, addr, sender).await;
            }
            ClientMessage::Input(input) => {
                Self::handle_input(shared, addr, input, sender).await;
            }
            ClientMessage::Leaderboard { limit } => {
                let entries = {
                    let ratings = shared.ratings.read().await;
                    ratings.leaderboard(limit.unwrap_or(LEADERBOARD_DEFAULT_LIMIT))
                };
                let _ = sender.send(ServerMessage::Leaderboard { entries }).await;
            }
            ClientMessage::Ping { timestamp } => {
                let _ = sender
                    .send(ServerMessage::Pong {
                        timestamp,
                        server_time: now_ms(),
                    })
                    .await;
            }
            ClientMessage::Leave => {
                Self::handle_leave(shared, addr).await;
            }
        }
    }

    /// Resolve the authenticated identity behind a connection.
    async fn authenticated_player(shared: &Arc<Shared>, addr: SocketAddr) -> Option<PlayerId> {
        let clients = shared.clients.read().await;
        clients.get(&addr).and_then(|c| c.player_id)
    }

    /// Find the outbound channel of a connected player.
    async fn sender_for(
        shared: &Arc<Shared>,
        player_id: &PlayerId,
    ) -> Option<mpsc::Sender<ServerMessage>> {
        let clients = shared.clients.read().await;
        clients
            .values()
            .find(|c| c.player_id == Some(*player_id))
            .map(|c| c.sender.clone())
    }

    /// Handle authentication.
    async fn handle_auth(
        shared: &Arc<Shared>,
        addr: SocketAddr,
        auth: AuthRequest,
        sender: &mpsc::Sender<ServerMessage>,
    ) {
        match authenticate(&auth.token, &shared.config.auth) {
            Ok(player_id) => {
                {
                    let mut clients = shared.clients.write().await;
                    if let Some(client) = clients.get_mut(&addr) {
                        client.player_id = Some(player_id);
                    }
                }

                let _ = sender
                    .send(ServerMessage::AuthResult(AuthResult {
                        player_id: hex::encode(player_id.as_bytes()),
                        server_version: shared.config.version.clone(),
                    }))
                    .await;

                debug!(
                    player = %hex::encode(&player_id.as_bytes()[..4]),
                    "client {} authenticated", addr
                );
            }
            Err(e) => {
                warn!("auth failed for {}: {}", addr, e);
                let _ = sender
                    .send(ServerMessage::Error(ServerError {
                        code: auth_error_code(&e),
                        message: e.to_string(),
                    }))
                    .await;
            }
        }
    }

    /// Handle a queue join, pairing immediately when possible.
    async fn handle_join_queue(
        shared: &Arc<Shared>,
        addr: SocketAddr,
        req: JoinQueueRequest,
        sender: &mpsc::Sender<ServerMessage>,
    ) {
        let Some(player_id) = Self::authenticated_player(shared, addr).await else {
            let _ = sender
                .send(ServerMessage::Error(ServerError {
                    code: ErrorCode::NotAuthenticated,
                    message: "must authenticate first".to_string(),
                }))
                .await;
            return;
        };

        if shared.registry.is_in_session(&player_id).await {
            let _ = sender
                .send(ServerMessage::Error(ServerError {
                    code: ErrorCode::AlreadyQueued,
                    message: "already in a match".to_string(),
                }))
                .await;
            return;
        }

        let rating = shared.ratings.read().await.rating(&player_id);

        let pair = {
            let mut queue = shared.queue.write().await;
            let result = queue.enqueue(player_id, rating, req.character, now_ms());
            if result.is_none() {
                let _ = sender
                    .send(ServerMessage::QueueWaiting {
                        waiting: queue.len(),
                    })
                    .await;
            }
            result
        };

        if let Some(pair) = pair {
            Self::start_match(shared, pair, sender).await;
        }
    }

    /// Spin up a session for a formed pair and notify both players.
    async fn start_match(
        shared: &Arc<Shared>,
        pair: MatchedPair,
        second_sender: &mpsc::Sender<ServerMessage>,
    ) {
        let Some(first_sender) = Self::sender_for(shared, &pair.first.user_id).await else {
            // The waiting player vanished between queue and pairing.
            // Their entry is already consumed; the joiner re-queues.
            warn!("matched player has no live connection, dropping pair");
            let _ = second_sender
                .send(ServerMessage::Error(ServerError {
                    code: ErrorCode::InternalError,
                    message: "opponent disconnected, rejoin the queue".to_string(),
                }))
                .await;
            return;
        };

        let session_id = SessionRegistry::new_session_id();
        let session = BattleSession::new(
            session_id,
            MatchKind::Ranked,
            (pair.first.user_id, &pair.first.sheet),
            (pair.second.user_id, &pair.second.sheet),
            now_ms(),
        );

        let entry = shared
            .registry
            .insert(
                session,
                [pair.first.user_id, pair.second.user_id],
                [first_sender, second_sender.clone()],
            )
            .await;

        let found = |side: Side, opponent: PlayerId, opponent_rating: i32| {
            ServerMessage::MatchFound(MatchFoundInfo {
                session_id,
                your_side: side,
                opponent,
                opponent_rating,
                kind: MatchKind::Ranked,
            })
        };
        entry
            .send_to(
                Side::A,
                found(Side::A, pair.second.user_id, pair.second.rating),
            )
            .await;
        entry
            .send_to(
                Side::B,
                found(Side::B, pair.first.user_id, pair.first.rating),
            )
            .await;

        info!(
            session = %hex::encode(&session_id[..4]),
            "match started"
        );
    }

    /// Handle queue cancellation.
    async fn handle_cancel_queue(
        shared: &Arc<Shared>,
        addr: SocketAddr,
        sender: &mpsc::Sender<ServerMessage>,
    ) {
        if let Some(player_id) = Self::authenticated_player(shared, addr).await {
            let mut queue = shared.queue.write().await;
            queue.cancel(&player_id);
        }
        let _ = sender.send(ServerMessage::QueueCancelled).await;
    }

    /// Handle battle input: authorize, apply, broadcast, settle.
    async fn handle_input(
        shared: &Arc<Shared>,
        addr: SocketAddr,
        input: SessionInput,
        sender: &mpsc::Sender<ServerMessage>,
    ) {
        let Some(player_id) = Self::authenticated_player(shared, addr).await else {
            let _ = sender
                .send(ServerMessage::Error(ServerError {
                    code: ErrorCode::NotAuthenticated,
                    message: "must authenticate first".to_string(),
                }))
                .await;
            return;
        };

        let entry = match shared.registry.get(&input.session_id).await {
            Ok(entry) => entry,
            Err(_) => {
                let _ = sender
                    .send(ServerMessage::Error(ServerError {
                        code: ErrorCode::SessionNotFound,
                        message: "no such session".to_string(),
                    }))
                    .await;
                return;
            }
        };

        // The sender's authenticated identity decides their side; the
        // claimed side in the message must match it.
        let Some(actual_side) = entry.side_of(&player_id) else {
            let _ = sender
                .send(ServerMessage::Error(ServerError {
                    code: ErrorCode::NotInSession,
                    message: "not a participant of this session".to_string(),
                }))
                .await;
            return;
        };
        if actual_side != input.side {
            let _ = sender
                .send(ServerMessage::Error(ServerError {
                    code: ErrorCode::NotInSession,
                    message: "side does not match your seat".to_string(),
                }))
                .await;
            return;
        }

        // The snapshot is queued to both channels before the write
        // lock drops, so participants observe states in accepted-input
        // order.
        let applied = {
            let mut session = entry.session.write().await;
            let result = session.apply_input(actual_side, &input.input, now_ms());
            if let Ok(Some(snapshot)) = &result {
                entry.broadcast(ServerMessage::State(StateUpdate {
                    session_id: input.session_id,
                    snapshot: snapshot.clone(),
                }));
            }
            result
        };

        match applied {
            Ok(Some(snapshot)) => {
                if snapshot.status == BattleStatus::Finished {
                    Self::settle_session(shared, &input.session_id).await;
                }
            }
            // Silent rejection: the validator already logged it.
            Ok(None) => {}
            Err(_) => {
                let _ = sender
                    .send(ServerMessage::Error(ServerError {
                        code: ErrorCode::MatchFinished,
                        message: "match already finished".to_string(),
                    }))
                    .await;
            }
        }
    }

    /// Handle a player leaving mid-match: concede to the opponent.
    async fn handle_leave(shared: &Arc<Shared>, addr: SocketAddr) {
        let Some(player_id) = Self::authenticated_player(shared, addr).await else {
            return;
        };

        {
            let mut queue = shared.queue.write().await;
            queue.cancel(&player_id);
        }

        let Some(entry) = shared.registry.get_for_player(&player_id).await else {
            return;
        };
        let session_id = entry.session.read().await.id;

        let conceded = {
            let mut session = entry.session.write().await;
            match entry.side_of(&player_id) {
                Some(side) => session.concede(side, now_ms()).is_some(),
                None => false,
            }
        };

        if conceded {
            Self::settle_session(shared, &session_id).await;
        }
    }

    /// Settle a finished session exactly once: update ratings, emit the
    /// outcome, broadcast the end, and drop the session.
    async fn settle_session(shared: &Arc<Shared>, session_id: &SessionId) {
        let Ok(entry) = shared.registry.get(session_id).await else {
            // Already settled by a racing path.
            return;
        };

        let (kind, winner_side, winner, loser) = {
            let session = entry.session.read().await;
            if session.status() != BattleStatus::Finished {
                return;
            }
            let winner_side = session.winner();
            let winner = winner_side.map(|s| session.player(s).user_id);
            let loser = winner_side.map(|s| session.player(s.opponent()).user_id);
            (session.kind, winner_side, winner, loser)
        };

        let ratings = match (kind, winner, loser) {
            (MatchKind::Ranked, Some(winner_id), Some(loser_id)) => {
                let mut book = shared.ratings.write().await;
                let (w, l) = book.apply_result(winner_id, loser_id);
                Some(vec![
                    RatingEntry {
                        user_id: winner_id,
                        rating: w,
                    },
                    RatingEntry {
                        user_id: loser_id,
                        rating: l,
                    },
                ])
            }
            _ => None,
        };

        entry.broadcast(ServerMessage::MatchEnd(MatchEndInfo {
            session_id: *session_id,
            winner: winner_side,
            ratings,
        }));

        let outcome = MatchOutcome {
            session_id: *session_id,
            kind,
            winner,
            loser,
        };
        if shared.outcome_tx.send(outcome).await.is_err() {
            warn!("outcome consumer gone, settlement event dropped");
        }

        shared.registry.remove(session_id).await;

        info!(
            session = %hex::encode(&session_id[..4]),
            winner = %winner.map(|w| hex::encode(&w.as_bytes()[..4])).unwrap_or_else(|| "none".into()),
            "session settled"
        );
    }

    /// Periodically force-finish sessions whose players went silent.
    async fn run_forfeit_sweeper(shared: Arc<Shared>) {
        let timeout_ms = shared.config.forfeit_timeout.as_millis() as u64;
        let mut sweep = interval(shared.config.forfeit_sweep_interval);

        loop {
            sweep.tick().await;
            let now = now_ms();

            for session_id in shared.registry.session_ids().await {
                let Ok(entry) = shared.registry.get(&session_id).await else {
                    continue;
                };

                // Never park the sweeper behind one contended session;
                // the next tick retries.
                let fired = match entry.session.try_write() {
                    Ok(mut session) => session.check_idle_forfeit(now, timeout_ms).is_some(),
                    Err(_) => continue,
                };

                if fired {
                    info!(
                        session = %hex::encode(&session_id[..4]),
                        "idle forfeit"
                    );
                    Self::settle_session(&shared, &session_id).await;
                }
            }
        }
    }

    /// Drop idle connections and any finished sessions left behind.
    async fn run_cleanup_loop(shared: Arc<Shared>) {
        let idle_timeout = Duration::from_secs(300);
        let mut sweep = interval(Duration::from_secs(60));

        loop {
            sweep.tick().await;
            Self::reap_idle_clients(&shared, idle_timeout).await;
            shared.registry.cleanup().await;
        }
    }

    /// Remove clients idle past the timeout, telling any still-open
    /// socket why before its registration disappears.
    async fn reap_idle_clients(shared: &Arc<Shared>, idle_timeout: Duration) {
        let now = Instant::now();
        let stale: Vec<(SocketAddr, mpsc::Sender<ServerMessage>)> = {
            let clients = shared.clients.read().await;
            clients
                .iter()
                .filter(|(_, c)| now.duration_since(c.last_activity) > idle_timeout)
                .map(|(addr, c)| (*addr, c.sender.clone()))
                .collect()
        };

        for (addr, sender) in stale {
            let _ = sender.try_send(ServerMessage::Shutdown {
                reason: "idle timeout".to_string(),
            });
            Self::cleanup_connection(shared, addr).await;
            info!("removed idle client {}", addr);
        }
    }

    /// Shutdown the server.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Active connection count.
    pub async fn connection_count(&self) -> usize {
        self.shared.clients.read().await.len()
    }

    /// Live session count.
    pub async fn session_count(&self) -> usize {
        self.shared.registry.len().await
    }

    /// Players waiting in the queue.
    pub async fn queue_size(&self) -> usize {
        self.shared.queue.read().await.len()
    }
}
