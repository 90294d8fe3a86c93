//! Matchmaking Queue
//!
//! Rating-gated pairing for ranked play. The queue is scanned on every
//! join: the newcomer pairs with the longest-waiting compatible player
//! within the rating threshold, or waits. Both entries leave the queue
//! atomically when a pair forms, so no player can sit in two matches.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::game::session::{CharacterSheet, PlayerId};

/// Maximum rating distance for a valid pairing (exclusive).
pub const RATING_THRESHOLD: i32 = 100;

/// One player waiting for an opponent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Player identity.
    pub user_id: PlayerId,
    /// Ladder rating at enqueue time.
    pub rating: i32,
    /// Character they will bring into the match.
    pub sheet: CharacterSheet,
    /// Unix millis when they joined the queue.
    pub queued_at_ms: u64,
}

/// A formed pair, in queue order (earlier joiner first).
#[derive(Clone, Debug, PartialEq)]
pub struct MatchedPair {
    /// The player who was waiting.
    pub first: QueueEntry,
    /// The player whose join completed the pair.
    pub second: QueueEntry,
}

/// FIFO matchmaking queue with a rating gate.
#[derive(Debug, Default)]
pub struct MatchmakingQueue {
    waiting: Vec<QueueEntry>,
}

impl MatchmakingQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of players waiting.
    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    /// True when nobody is waiting.
    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    /// True if the player is currently queued.
    pub fn contains(&self, user_id: &PlayerId) -> bool {
        self.waiting.iter().any(|e| e.user_id == *user_id)
    }

    /// Join the queue and try to pair immediately.
    ///
    /// Scans waiting players front to back and pairs with the first
    /// whose rating is within [`RATING_THRESHOLD`]. Returns the pair if
    /// one formed, with both entries already removed; otherwise the
    /// newcomer is appended and `None` comes back. Re-joining while
    /// already queued refreshes the entry in place without pairing the
    /// player against themselves.
    pub fn enqueue(
        &mut self,
        user_id: PlayerId,
        rating: i32,
        sheet: CharacterSheet,
        now_ms: u64,
    ) -> Option<MatchedPair> {
        // A duplicate join replaces the stale entry.
        self.waiting.retain(|e| e.user_id != user_id);

        let entry = QueueEntry {
            user_id,
            rating,
            sheet,
            queued_at_ms: now_ms,
        };

        let compatible = self
            .waiting
            .iter()
            .position(|waiting| (waiting.rating - rating).abs() < RATING_THRESHOLD);

        match compatible {
            Some(idx) => {
                let first = self.waiting.remove(idx);
                info!(
                    first = %hex::encode(&first.user_id.as_bytes()[..4]),
                    second = %hex::encode(&user_id.as_bytes()[..4]),
                    rating_gap = (first.rating - rating).abs(),
                    "pair formed"
                );
                Some(MatchedPair {
                    first,
                    second: entry,
                })
            }
            None => {
                debug!(
                    user = %hex::encode(&user_id.as_bytes()[..4]),
                    rating,
                    waiting = self.waiting.len(),
                    "queued, no compatible opponent"
                );
                self.waiting.push(entry);
                None
            }
        }
    }

    /// Leave the queue. Returns the removed entry, or None if the
    /// player was not queued.
    pub fn cancel(&mut self, user_id: &PlayerId) -> Option<QueueEntry> {
        let idx = self.waiting.iter().position(|e| e.user_id == *user_id)?;
        Some(self.waiting.remove(idx))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(n: u8) -> PlayerId {
        PlayerId::new([n; 16])
    }

    fn sheet() -> CharacterSheet {
        CharacterSheet::default()
    }

    #[test]
    fn test_first_joiner_waits() {
        let mut queue = MatchmakingQueue::new();
        assert!(queue.enqueue(pid(1), 1000, sheet(), 0).is_none());
        assert_eq!(queue.len(), 1);
        assert!(queue.contains(&pid(1)));
    }

    #[test]
    fn test_compatible_pair_forms_on_join() {
        let mut queue = MatchmakingQueue::new();
        queue.enqueue(pid(1), 1000, sheet(), 0);
        let pair = queue.enqueue(pid(2), 1099, sheet(), 10).unwrap();

        // |1000 - 1099| = 99 < 100
        assert_eq!(pair.first.user_id, pid(1));
        assert_eq!(pair.second.user_id, pid(2));
        // Atomic removal: neither remains queued
        assert!(queue.is_empty());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut queue = MatchmakingQueue::new();
        queue.enqueue(pid(1), 1000, sheet(), 0);
        // Exactly 100 apart: no pair
        assert!(queue.enqueue(pid(2), 1100, sheet(), 10).is_none());
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_pairs_with_longest_waiting_compatible() {
        let mut queue = MatchmakingQueue::new();
        queue.enqueue(pid(1), 1500, sheet(), 0); // incompatible with 1000
        queue.enqueue(pid(2), 1010, sheet(), 5);
        queue.enqueue(pid(3), 1020, sheet(), 8); // pairs with 2 immediately

        // 2 and 3 paired on 3's join; only 1 remains
        assert_eq!(queue.len(), 1);
        assert!(queue.contains(&pid(1)));

        // A fourth joiner within range of 1 pairs with them
        let pair = queue.enqueue(pid(4), 1450, sheet(), 20).unwrap();
        assert_eq!(pair.first.user_id, pid(1));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_rejoin_refreshes_without_self_pair() {
        let mut queue = MatchmakingQueue::new();
        queue.enqueue(pid(1), 1000, sheet(), 0);
        // Same player joins again with an updated rating
        assert!(queue.enqueue(pid(1), 1050, sheet(), 100).is_none());
        assert_eq!(queue.len(), 1);

        let pair = queue.enqueue(pid(2), 1050, sheet(), 200).unwrap();
        assert_eq!(pair.first.rating, 1050);
    }

    #[test]
    fn test_no_compatible_pair_ever_left_waiting() {
        use rand::{Rng, SeedableRng};
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x57A9);

        // After any join sequence, the waiting set contains no two
        // players within the threshold (they would have paired).
        let mut queue = MatchmakingQueue::new();
        for n in 0..200u8 {
            let rating = rng.gen_range(0..3000);
            queue.enqueue(pid(n), rating, sheet(), u64::from(n));
        }

        for (i, a) in queue.waiting.iter().enumerate() {
            for b in queue.waiting.iter().skip(i + 1) {
                assert!(
                    (a.rating - b.rating).abs() >= RATING_THRESHOLD,
                    "{} and {} should have paired",
                    a.rating,
                    b.rating
                );
            }
        }
    }

    #[test]
    fn test_cancel_leaves_queue() {
        let mut queue = MatchmakingQueue::new();
        queue.enqueue(pid(1), 1000, sheet(), 0);
        assert!(queue.cancel(&pid(1)).is_some());
        assert!(queue.is_empty());
        assert!(queue.cancel(&pid(1)).is_none());

        // The player it would have matched now waits instead
        assert!(queue.enqueue(pid(2), 1000, sheet(), 10).is_none());
    }
}
