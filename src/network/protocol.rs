//! Protocol Messages
//!
//! Wire format for client-server communication over WebSocket.
//! All messages are serialized as JSON for debugging ease,
//! with optional binary (bincode) for flat structs.

use serde::{Deserialize, Serialize};

use crate::game::input::BattleInput;
use crate::game::rating::RatingEntry;
use crate::game::session::{
    BattleSnapshot, CharacterSheet, MatchKind, PlayerId, SessionId, Side,
};

// =============================================================================
// CLIENT -> SERVER MESSAGES
// =============================================================================

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Authenticate with the server.
    Auth(AuthRequest),

    /// Join the ranked matchmaking queue.
    JoinQueue(JoinQueueRequest),

    /// Leave the matchmaking queue.
    CancelQueue,

    /// Battle input for the player's current session.
    Input(SessionInput),

    /// Request the current ladder standings.
    Leaderboard {
        /// Maximum rows to return.
        limit: Option<usize>,
    },

    /// Ping for latency measurement.
    Ping {
        /// Client clock at send time.
        timestamp: u64,
    },

    /// Player is leaving their current match.
    Leave,
}

/// Authentication request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    /// Signed JWT carrying the player's identity.
    pub token: String,
    /// Client version for compatibility check.
    pub client_version: String,
}

/// Matchmaking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinQueueRequest {
    /// Character the player will fight with.
    pub character: CharacterSheet,
}

/// Battle input addressed to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInput {
    /// Target session.
    pub session_id: SessionId,
    /// Which corner the sender claims to occupy.
    pub side: Side,
    /// Claimed position and action.
    pub input: BattleInput,
    /// Client timestamp for RTT calculation.
    pub timestamp: u64,
}

// =============================================================================
// SERVER -> CLIENT MESSAGES
// =============================================================================

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Authentication succeeded. Failures arrive as [`ServerMessage::Error`]
    /// with an auth-specific [`ErrorCode`].
    AuthResult(AuthResult),

    /// Queued, no compatible opponent yet.
    QueueWaiting {
        /// Players currently waiting (including the sender).
        waiting: usize,
    },

    /// Queue membership cancelled.
    QueueCancelled,

    /// Match found, session created.
    MatchFound(MatchFoundInfo),

    /// Authoritative state after an accepted input.
    State(StateUpdate),

    /// Match ended.
    MatchEnd(MatchEndInfo),

    /// Ladder standings.
    Leaderboard {
        /// Rows, best rating first.
        entries: Vec<RatingEntry>,
    },

    /// Pong response.
    Pong {
        /// Echoed client timestamp.
        timestamp: u64,
        /// Server clock at reply time.
        server_time: u64,
    },

    /// Error message.
    Error(ServerError),

    /// Server is shutting down.
    Shutdown {
        /// Operator-supplied reason.
        reason: String,
    },
}

/// Successful authentication acknowledgment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResult {
    /// Authenticated player id (hex).
    pub player_id: String,
    /// Server version.
    pub server_version: String,
}

/// Information about a found match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchFoundInfo {
    /// Unique session identifier.
    pub session_id: SessionId,
    /// The side assigned to the recipient.
    pub your_side: Side,
    /// Opponent identity.
    pub opponent: PlayerId,
    /// Opponent ladder rating.
    pub opponent_rating: i32,
    /// Match kind.
    pub kind: MatchKind,
}

/// Authoritative state broadcast to both participants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateUpdate {
    /// Session this state belongs to.
    pub session_id: SessionId,
    /// Full snapshot after the latest accepted input.
    pub snapshot: BattleSnapshot,
}

/// Match end information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEndInfo {
    /// Session identifier.
    pub session_id: SessionId,
    /// Winning side (None on an aborted match).
    pub winner: Option<Side>,
    /// Updated ratings, present for ranked matches with a winner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Vec<RatingEntry>>,
}

/// Server error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerError {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Authentication failed.
    AuthFailed,
    /// Not authenticated.
    NotAuthenticated,
    /// JWT token has expired.
    TokenExpired,
    /// Invalid JWT token (signature, format, claims).
    InvalidToken,
    /// Malformed or unparseable message.
    InvalidMessage,
    /// Session not found.
    SessionNotFound,
    /// Sender is not a participant of the addressed session.
    NotInSession,
    /// Already waiting in the queue or fighting.
    AlreadyQueued,
    /// Input arrived after the match finished.
    MatchFinished,
    /// Server overloaded.
    ServerOverloaded,
    /// Internal error.
    InternalError,
}

// =============================================================================
// SETTLEMENT
// =============================================================================

/// Outcome handed to downstream consumers when a session finishes.
///
/// Emitted exactly once per session on a dedicated channel, so rating
/// persistence and reward hooks never race the broadcast path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Session that finished.
    pub session_id: SessionId,
    /// Match kind.
    pub kind: MatchKind,
    /// Winner, or None on abort.
    pub winner: Option<PlayerId>,
    /// Loser, or None on abort.
    pub loser: Option<PlayerId>,
}

/// Default row cap for leaderboard requests.
pub const LEADERBOARD_DEFAULT_LIMIT: usize = 20;

// =============================================================================
// SERIALIZATION HELPERS
// =============================================================================

impl ClientMessage {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl ServerMessage {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl MatchOutcome {
    /// Serialize to binary for the settlement channel.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserialize from binary.
    pub fn from_bytes(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }
}
