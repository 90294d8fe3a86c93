//! Elo Rating Book
//!
//! Ladder ratings for ranked matches. Standard Elo with a fixed
//! K-factor: expected score from the logistic curve, winner and loser
//! adjusted by the same magnitude so total rating is conserved.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::game::session::PlayerId;

/// Every player starts here.
pub const DEFAULT_RATING: i32 = 1000;

/// Fixed K-factor for all ranked matches.
pub const K_FACTOR: f64 = 32.0;

/// One row of the leaderboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingEntry {
    /// Player identity.
    pub user_id: PlayerId,
    /// Current rating.
    pub rating: i32,
}

/// In-memory rating store for the ladder.
///
/// A player absent from the book reads as [`DEFAULT_RATING`]; the
/// entry materializes on their first settled match.
#[derive(Debug, Default)]
pub struct RatingBook {
    ratings: BTreeMap<PlayerId, i32>,
}

impl RatingBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rating for a player, defaulting for the unrated.
    pub fn rating(&self, user_id: &PlayerId) -> i32 {
        self.ratings.get(user_id).copied().unwrap_or(DEFAULT_RATING)
    }

    /// Expected score of `own` against `other`: `1 / (1 + 10^((other-own)/400))`.
    fn expected_score(own: i32, other: i32) -> f64 {
        1.0 / (1.0 + 10f64.powf(f64::from(other - own) / 400.0))
    }

    /// Settle a decided match: winner gains, loser drops, symmetric deltas.
    ///
    /// Returns the updated `(winner, loser)` ratings.
    pub fn apply_result(&mut self, winner: PlayerId, loser: PlayerId) -> (i32, i32) {
        let winner_before = self.rating(&winner);
        let loser_before = self.rating(&loser);

        let expected = Self::expected_score(winner_before, loser_before);
        let delta = (K_FACTOR * (1.0 - expected)).round() as i32;

        let winner_after = winner_before + delta;
        let loser_after = loser_before - delta;
        self.ratings.insert(winner, winner_after);
        self.ratings.insert(loser, loser_after);

        info!(
            winner = %hex::encode(&winner.as_bytes()[..4]),
            loser = %hex::encode(&loser.as_bytes()[..4]),
            delta,
            winner_rating = winner_after,
            loser_rating = loser_after,
            "ratings settled"
        );
        (winner_after, loser_after)
    }

    /// Top `limit` players by rating, descending; ties break on id.
    pub fn leaderboard(&self, limit: usize) -> Vec<RatingEntry> {
        let mut entries: Vec<RatingEntry> = self
            .ratings
            .iter()
            .map(|(user_id, rating)| RatingEntry {
                user_id: *user_id,
                rating: *rating,
            })
            .collect();
        entries.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.user_id.cmp(&b.user_id)));
        entries.truncate(limit);
        entries
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

    #[test]
    fn test_unrated_player_reads_default() {
        let book = RatingBook::new();
        assert_eq!(book.rating(&pid(1)), DEFAULT_RATING);
    }

    #[test]
    fn test_even_match_moves_sixteen() {
        let mut book = RatingBook::new();
        let (w, l) = book.apply_result(pid(1), pid(2));
        // Equal ratings: expected 0.5, delta = round(32 * 0.5) = 16
        assert_eq!(w, 1016);
        assert_eq!(l, 984);
        assert_eq!(book.rating(&pid(1)), 1016);
        assert_eq!(book.rating(&pid(2)), 984);
    }

    #[test]
    fn test_deltas_are_symmetric() {
        let mut book = RatingBook::new();
        book.apply_result(pid(1), pid(2));
        book.apply_result(pid(1), pid(2));
        book.apply_result(pid(3), pid(1));
        let total: i32 = [pid(1), pid(2), pid(3)]
            .iter()
            .map(|id| book.rating(id))
            .sum();
        assert_eq!(total, 3 * DEFAULT_RATING);
    }

    #[test]
    fn test_upset_pays_more_than_expected_win() {
        let mut book = RatingBook::new();
        // Build a gap first
        for _ in 0..5 {
            book.apply_result(pid(1), pid(2));
        }
        let favorite_before = book.rating(&pid(1));
        let underdog_before = book.rating(&pid(2));
        assert!(favorite_before > underdog_before);

        // Underdog wins: gains more than 16
        let (underdog_after, _) = book.apply_result(pid(2), pid(1));
        assert!(underdog_after - underdog_before > 16);
    }

    #[test]
    fn test_leaderboard_order_and_limit() {
        let mut book = RatingBook::new();
        book.apply_result(pid(1), pid(2));
        book.apply_result(pid(1), pid(3));
        book.apply_result(pid(3), pid(2));

        let board = book.leaderboard(2);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].user_id, pid(1));
        assert!(board[0].rating >= board[1].rating);
    }
}
