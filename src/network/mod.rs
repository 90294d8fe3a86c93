//! Network Layer
//!
//! WebSocket front-end for the arena. All game semantics live in
//! `game/`; this layer only authenticates, routes, and delivers.

pub mod auth;
pub mod protocol;
pub mod registry;
pub mod server;

pub use auth::{authenticate, validate_token, AuthConfig, AuthError, TokenClaims};
pub use protocol::{
    ClientMessage, ErrorCode, MatchEndInfo, MatchFoundInfo, MatchOutcome, ServerMessage,
    StateUpdate,
};
pub use registry::{RegistryError, SessionEntry, SessionRegistry};
pub use server::{ArenaServer, ArenaServerError, ServerConfig};
