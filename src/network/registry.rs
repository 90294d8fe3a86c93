//! Session Registry
//!
//! Tracks every live battle session and the two outbound channels it
//! may speak to. All per-session traffic goes through
//! [`SessionRegistry::broadcast`], which writes to exactly the two
//! participants' channels — a session can never reach a connection
//! that is not one of its own players.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tracing::{debug, warn};

use crate::game::session::{BattleSession, BattleStatus, PlayerId, SessionId, Side};
use crate::network::protocol::ServerMessage;

/// Registry errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistryError {
    /// No session with that id.
    #[error("no such session")]
    NoSuchSession,

    /// The player is not a participant of the addressed session.
    #[error("not a participant of this session")]
    NotAParticipant,
}

/// One live session plus its two delivery channels.
pub struct SessionEntry {
    /// The authoritative battle state.
    pub session: Arc<RwLock<BattleSession>>,
    /// Outbound channels, indexed A then B.
    senders: [mpsc::Sender<ServerMessage>; 2],
    /// Participant identities, indexed A then B.
    participants: [PlayerId; 2],
}

impl SessionEntry {
    /// Resolve which side a player occupies, if any.
    pub fn side_of(&self, player: &PlayerId) -> Option<Side> {
        if self.participants[0] == *player {
            Some(Side::A)
        } else if self.participants[1] == *player {
            Some(Side::B)
        } else {
            None
        }
    }
}

/// All live sessions, keyed by id, plus the player-to-session index.
pub struct SessionRegistry {
    sessions: RwLock<BTreeMap<SessionId, Arc<SessionEntry>>>,
    player_sessions: RwLock<BTreeMap<PlayerId, SessionId>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(BTreeMap::new()),
            player_sessions: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register a freshly created session and its participants.
    ///
    /// The caller builds the [`BattleSession`]; the registry owns the
    /// routing. Returns the shared entry for immediate use.
    pub async fn insert(
        &self,
        session: BattleSession,
        participants: [PlayerId; 2],
        senders: [mpsc::Sender<ServerMessage>; 2],
    ) -> Arc<SessionEntry> {
        let id = session.id;
        let entry = Arc::new(SessionEntry {
            session: Arc::new(RwLock::new(session)),
            senders,
            participants,
        });

        {
            let mut sessions = self.sessions.write().await;
            sessions.insert(id, Arc::clone(&entry));
        }
        {
            let mut player_sessions = self.player_sessions.write().await;
            player_sessions.insert(participants[0], id);
            player_sessions.insert(participants[1], id);
        }

        debug!(session = %hex::encode(&id[..4]), "session registered");
        entry
    }

    /// Generate a fresh session id.
    pub fn new_session_id() -> SessionId {
        uuid::Uuid::new_v4().into_bytes()
    }

    /// Look up a session by id.
    pub async fn get(&self, id: &SessionId) -> Result<Arc<SessionEntry>, RegistryError> {
        let sessions = self.sessions.read().await;
        sessions.get(id).cloned().ok_or(RegistryError::NoSuchSession)
    }

    /// Look up the session a player is fighting in.
    pub async fn get_for_player(&self, player: &PlayerId) -> Option<Arc<SessionEntry>> {
        let id = {
            let player_sessions = self.player_sessions.read().await;
            *player_sessions.get(player)?
        };
        self.get(&id).await.ok()
    }

    /// True if the player is currently in a live session.
    pub async fn is_in_session(&self, player: &PlayerId) -> bool {
        let player_sessions = self.player_sessions.read().await;
        player_sessions.contains_key(player)
    }

    /// Send a message to both participants of one session, and nobody
    /// else.
    pub async fn broadcast(
        &self,
        id: &SessionId,
        message: ServerMessage,
    ) -> Result<(), RegistryError> {
        let entry = self.get(id).await?;
        entry.broadcast(message);
        Ok(())
    }

    /// Remove a finished session and both participant index entries.
    pub async fn remove(&self, id: &SessionId) {
        let entry = {
            let mut sessions = self.sessions.write().await;
            sessions.remove(id)
        };
        if let Some(entry) = entry {
            let mut player_sessions = self.player_sessions.write().await;
            for participant in &entry.participants {
                player_sessions.remove(participant);
            }
            debug!(session = %hex::encode(&id[..4]), "session removed");
        }
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Snapshot of all live session ids, for the forfeit sweeper.
    pub async fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.read().await.keys().copied().collect()
    }

    /// Drop every finished session still in the map.
    pub async fn cleanup(&self) {
        let ids = self.session_ids().await;
        for id in ids {
            let finished = match self.get(&id).await {
                Ok(entry) => entry.session.read().await.status() == BattleStatus::Finished,
                Err(_) => continue,
            };
            if finished {
                self.remove(&id).await;
            }
        }
    }
}

impl SessionEntry {
    /// Enqueue to both sides without waiting. A full or closed channel
    /// drops the message for that side only: this is called with the
    /// session lock held, and a participant that stopped draining must
    /// not stall its opponent or the forfeit sweeper. A peer stuck
    /// like that sends no inputs either, so the idle forfeit ends its
    /// session.
    pub fn broadcast(&self, message: ServerMessage) {
        for (idx, sender) in self.senders.iter().enumerate() {
            if let Err(e) = sender.try_send(message.clone()) {
                warn!(
                    side = if idx == 0 { "A" } else { "B" },
                    "participant channel unavailable ({}), message dropped", e
                );
            }
        }
    }

    /// Deliver to a single side.
    pub async fn send_to(&self, side: Side, message: ServerMessage) {
        let idx = match side {
            Side::A => 0,
            Side::B => 1,
        };
        let _ = self.senders[idx].send(message).await;
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::session::{CharacterSheet, MatchKind};

    fn test_session(id: SessionId, a: PlayerId, b: PlayerId) -> BattleSession {
        let sheet = CharacterSheet::default();
        BattleSession::new(id, MatchKind::Ranked, (a, &sheet), (b, &sheet), 0)
    }

    fn pid(n: u8) -> PlayerId {
        PlayerId::new([n; 16])
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let registry = SessionRegistry::new();
        let (tx_a, _rx_a) = mpsc::channel(8);
        let (tx_b, _rx_b) = mpsc::channel(8);

        let id = SessionRegistry::new_session_id();
        registry
            .insert(test_session(id, pid(1), pid(2)), [pid(1), pid(2)], [tx_a, tx_b])
            .await;

        assert_eq!(registry.len().await, 1);
        assert!(registry.get(&id).await.is_ok());
        assert!(registry.get_for_player(&pid(1)).await.is_some());
        assert!(registry.get_for_player(&pid(3)).await.is_none());
        assert!(matches!(
            registry.get(&[99; 16]).await,
            Err(RegistryError::NoSuchSession)
        ));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_exactly_participants() {
        let registry = SessionRegistry::new();
        let (tx_a, mut rx_a) = mpsc::channel(8);
        let (tx_b, mut rx_b) = mpsc::channel(8);
        // A bystander session that must never hear about the first
        let (tx_c, mut rx_c) = mpsc::channel(8);
        let (tx_d, _rx_d) = mpsc::channel(8);

        let id = SessionRegistry::new_session_id();
        registry
            .insert(test_session(id, pid(1), pid(2)), [pid(1), pid(2)], [tx_a, tx_b])
            .await;
        let other = SessionRegistry::new_session_id();
        registry
            .insert(test_session(other, pid(3), pid(4)), [pid(3), pid(4)], [tx_c, tx_d])
            .await;

        registry
            .broadcast(&id, ServerMessage::QueueCancelled)
            .await
            .unwrap();

        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_ok());
        assert!(rx_c.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_with_stalled_participant_does_not_block() {
        let registry = SessionRegistry::new();
        // Side A stopped draining: capacity 1, already full
        let (tx_a, mut rx_a) = mpsc::channel(1);
        let (tx_b, mut rx_b) = mpsc::channel(8);
        tx_a.try_send(ServerMessage::QueueCancelled).unwrap();

        let id = SessionRegistry::new_session_id();
        let entry = registry
            .insert(test_session(id, pid(1), pid(2)), [pid(1), pid(2)], [tx_a, tx_b])
            .await;

        // Deliver while holding the session write lock, as the input
        // path does; must return immediately instead of waiting for A
        // to drain.
        let guard = entry.session.write().await;
        let delivered = tokio::time::timeout(std::time::Duration::from_millis(100), async {
            entry.broadcast(ServerMessage::QueueCancelled);
        })
        .await;
        drop(guard);
        assert!(delivered.is_ok());

        // B still got it; A only holds the stale pre-filled message
        assert!(rx_b.try_recv().is_ok());
        assert!(rx_a.try_recv().is_ok());
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_side_resolution() {
        let registry = SessionRegistry::new();
        let (tx_a, _rx_a) = mpsc::channel(8);
        let (tx_b, _rx_b) = mpsc::channel(8);

        let id = SessionRegistry::new_session_id();
        let entry = registry
            .insert(test_session(id, pid(1), pid(2)), [pid(1), pid(2)], [tx_a, tx_b])
            .await;

        assert_eq!(entry.side_of(&pid(1)), Some(Side::A));
        assert_eq!(entry.side_of(&pid(2)), Some(Side::B));
        assert_eq!(entry.side_of(&pid(9)), None);
    }

    #[tokio::test]
    async fn test_remove_clears_player_index() {
        let registry = SessionRegistry::new();
        let (tx_a, _rx_a) = mpsc::channel(8);
        let (tx_b, _rx_b) = mpsc::channel(8);

        let id = SessionRegistry::new_session_id();
        registry
            .insert(test_session(id, pid(1), pid(2)), [pid(1), pid(2)], [tx_a, tx_b])
            .await;
        assert!(registry.is_in_session(&pid(1)).await);

        registry.remove(&id).await;
        assert_eq!(registry.len().await, 0);
        assert!(!registry.is_in_session(&pid(1)).await);
        assert!(!registry.is_in_session(&pid(2)).await);
    }

    #[tokio::test]
    async fn test_cleanup_drops_finished_sessions() {
        let registry = SessionRegistry::new();
        let (tx_a, _rx_a) = mpsc::channel(8);
        let (tx_b, _rx_b) = mpsc::channel(8);

        let id = SessionRegistry::new_session_id();
        let entry = registry
            .insert(test_session(id, pid(1), pid(2)), [pid(1), pid(2)], [tx_a, tx_b])
            .await;

        registry.cleanup().await;
        assert_eq!(registry.len().await, 1);

        // Force-finish via the idle sweeper path
        entry.session.write().await.check_idle_forfeit(100_000, 60_000);
        registry.cleanup().await;
        assert_eq!(registry.len().await, 0);
    }
}
