//! Anti-Cheat Input Validation
//!
//! Checks an untrusted input against the authoritative player state
//! before any mutation: arena bounds, kinematic speed limit, and skill
//! cooldowns. Rejections are named internally so the checks stay
//! testable, but only acceptance is ever visible on the wire; a
//! cheating client gets no signal to calibrate against.

use crate::game::input::{Action, BattleInput};
use crate::game::session::PlayerState;

/// Latency tolerance applied to the speed limit (20%).
pub const SPEED_TOLERANCE_FACTOR: f64 = 1.2;

/// Flat distance slack absorbing one-off jitter (arena units).
pub const SPEED_SLACK: f64 = 5.0;

/// Why an input was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Claimed position outside the arena rectangle.
    OutOfBounds,
    /// Moved farther than the speed limit allows since the last
    /// accepted input.
    SpeedViolation,
    /// Skill used before its ready-at timestamp.
    CooldownViolation,
}

/// Outcome of validating one input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Input may be applied.
    Accepted,
    /// Input must be dropped without mutating state.
    Rejected(RejectReason),
}

impl Verdict {
    /// True when the input may be applied.
    #[inline]
    pub fn is_accepted(self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// Validate a claimed input against the authoritative player state.
///
/// `now_ms` is the server receive time; the same timestamp is later
/// stored as the player's last-input time if the input is accepted.
pub fn validate(player: &PlayerState, input: &BattleInput, now_ms: u64) -> Verdict {
    if !input.position.in_arena() {
        return Verdict::Rejected(RejectReason::OutOfBounds);
    }

    if !speed_ok(player, input, now_ms) {
        return Verdict::Rejected(RejectReason::SpeedViolation);
    }

    if let Action::Skill { skill_id } = input.action {
        if !player.skill_ready(skill_id, now_ms) {
            return Verdict::Rejected(RejectReason::CooldownViolation);
        }
    }

    Verdict::Accepted
}

/// Kinematic check: distance moved since the last accepted input must
/// fit within `max_speed * elapsed * 1.2 + 5`.
///
/// Zero elapsed time accepts unconditionally (first input or same-tick
/// duplicate); the allowance would otherwise be the flat slack only and
/// reject legitimate same-millisecond inputs.
fn speed_ok(player: &PlayerState, input: &BattleInput, now_ms: u64) -> bool {
    let elapsed_ms = now_ms.saturating_sub(player.last_input_ms);
    if elapsed_ms == 0 {
        return true;
    }

    let distance = player.position.distance(input.position);
    let allowed = player.max_speed * (elapsed_ms as f64 / 1000.0) * SPEED_TOLERANCE_FACTOR
        + SPEED_SLACK;
    distance <= allowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::game::input::SKILL_COOLDOWN_MS;
    use crate::game::session::{CharacterSheet, PlayerId, PlayerState};

    fn player_at(position: Vec2, last_input_ms: u64) -> PlayerState {
        let mut p = PlayerState::new(PlayerId::new([7; 16]), &CharacterSheet::default());
        p.position = position;
        p.last_input_ms = last_input_ms;
        p
    }

    #[test]
    fn test_bounds_rejection() {
        let p = player_at(Vec2::ZERO, 0);
        let input = BattleInput::movement(Vec2::new(501.0, 0.0));
        assert_eq!(
            validate(&p, &input, 1),
            Verdict::Rejected(RejectReason::OutOfBounds)
        );
    }

    #[test]
    fn test_zero_elapsed_accepts_any_distance_in_bounds() {
        let p = player_at(Vec2::ZERO, 1000);
        // Same-tick duplicate: no speed gate
        let input = BattleInput::movement(Vec2::new(400.0, 0.0));
        assert_eq!(validate(&p, &input, 1000), Verdict::Accepted);
    }

    #[test]
    fn test_speed_boundary() {
        // maxSpeed 300, 0.1s elapsed: allowed = 300*0.1*1.2 + 5 = 41
        let p = player_at(Vec2::ZERO, 0);

        let at_limit = BattleInput::movement(Vec2::new(41.0, 0.0));
        assert_eq!(validate(&p, &at_limit, 100), Verdict::Accepted);

        let over_limit = BattleInput::movement(Vec2::new(41.1, 0.0));
        assert_eq!(
            validate(&p, &over_limit, 100),
            Verdict::Rejected(RejectReason::SpeedViolation)
        );
    }

    #[test]
    fn test_teleport_rejected() {
        // The classic dead-reckoning cheat: 1000 units in 0.1s
        let p = player_at(Vec2::ZERO, 0);
        let input = BattleInput::attack(Vec2::new(1000.0, 0.0));
        // Out of bounds fires first for this distance; pull inside the
        // arena to exercise the speed check itself
        let inside = BattleInput::attack(Vec2::new(450.0, 0.0));
        assert_eq!(
            validate(&p, &input, 100),
            Verdict::Rejected(RejectReason::OutOfBounds)
        );
        assert_eq!(
            validate(&p, &inside, 100),
            Verdict::Rejected(RejectReason::SpeedViolation)
        );
    }

    #[test]
    fn test_cooldown_gate() {
        let mut p = player_at(Vec2::ZERO, 1000);
        p.set_cooldown(4, 1000 + SKILL_COOLDOWN_MS);

        let input = BattleInput::skill(Vec2::new(1.0, 0.0), 4);

        // Before ready-at: rejected
        assert_eq!(
            validate(&p, &input, 1000 + SKILL_COOLDOWN_MS - 1),
            Verdict::Rejected(RejectReason::CooldownViolation)
        );

        // At ready-at: accepted
        assert_eq!(validate(&p, &input, 1000 + SKILL_COOLDOWN_MS), Verdict::Accepted);
    }

    #[test]
    fn test_unused_skill_is_ready() {
        let p = player_at(Vec2::ZERO, 0);
        let input = BattleInput::skill(Vec2::new(1.0, 0.0), 9);
        assert_eq!(validate(&p, &input, 50), Verdict::Accepted);
    }
}
