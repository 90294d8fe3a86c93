//! # Stick Arena Server
//!
//! Authoritative server for real-time 1v1 stickman battles.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    STICK ARENA SERVER                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Pure math, no state                      │
//! │  ├── vec2.rs      - 2D vectors and arena bounds              │
//! │  └── stats.rs     - Rank scaling, damage, soft caps          │
//! │                                                              │
//! │  game/            - Match semantics, clock passed in         │
//! │  ├── input.rs     - Battle inputs and skill table            │
//! │  ├── validate.rs  - Bounds, speed, and cooldown gates        │
//! │  ├── session.rs   - Battle session state machine             │
//! │  ├── matchmaking.rs - Rating-gated pairing queue             │
//! │  └── rating.rs    - Elo ladder                               │
//! │                                                              │
//! │  network/         - WebSocket front-end                      │
//! │  ├── server.rs    - Accept loop and message dispatch         │
//! │  ├── protocol.rs  - Wire message types                       │
//! │  ├── registry.rs  - Session routing, scoped broadcast        │
//! │  └── auth.rs      - JWT validation and identity              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Trust Model
//!
//! Clients claim positions; the server never integrates movement. Every
//! claimed input passes the kinematic validator before it can touch a
//! session, and a rejected input changes nothing and tells the sender
//! nothing. State only reaches the two participants of a session.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod network;

// Re-export commonly used types
pub use crate::core::stats::Rank;
pub use crate::core::vec2::Vec2;
pub use crate::game::input::{Action, BattleInput};
pub use crate::game::session::{BattleSession, CharacterSheet, PlayerId, PlayerState, Side};
pub use crate::game::validate::{RejectReason, Verdict};
pub use crate::network::server::{ArenaServer, ServerConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
