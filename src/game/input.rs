//! Battle Input Types
//!
//! Client-claimed input for one simulation step. The action is a closed
//! tagged variant so the validator and resolver match exhaustively;
//! there is no stringly-typed dispatch to fall through.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;

/// Skill identifier within a character's kit.
pub type SkillId = u16;

/// Cooldown window applied after a skill is accepted (milliseconds).
pub const SKILL_COOLDOWN_MS: u64 = 5_000;

/// Melee range for a basic attack to connect (arena units).
pub const MELEE_RANGE: f64 = 50.0;

/// What the client claims to be doing this input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Reposition only.
    Move,
    /// Basic melee attack (multiplier 1.0, range-gated).
    Attack,
    /// Skill activation (skill-specific multiplier, cooldown-gated).
    Skill {
        /// Which skill in the kit.
        skill_id: SkillId,
    },
}

impl Action {
    /// The skill id, if this is a skill action.
    #[inline]
    pub fn skill_id(&self) -> Option<SkillId> {
        match self {
            Action::Skill { skill_id } => Some(*skill_id),
            _ => None,
        }
    }
}

/// One untrusted input from a client: a claimed position plus an action.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleInput {
    /// Claimed new position.
    pub position: Vec2,
    /// Claimed action.
    #[serde(flatten)]
    pub action: Action,
}

impl BattleInput {
    /// A pure movement input.
    pub const fn movement(position: Vec2) -> Self {
        Self {
            position,
            action: Action::Move,
        }
    }

    /// A melee attack at the given position.
    pub const fn attack(position: Vec2) -> Self {
        Self {
            position,
            action: Action::Attack,
        }
    }

    /// A skill activation at the given position.
    pub const fn skill(position: Vec2, skill_id: SkillId) -> Self {
        Self {
            position,
            action: Action::Skill { skill_id },
        }
    }
}

// =============================================================================
// SKILL KIT
// =============================================================================

/// Damage multiplier declared by a skill.
///
/// The kit is a fixed server-side table; clients only name a skill id
/// and never supply a multiplier. Declared values above
/// [`crate::core::stats::SKILL_MULTIPLIER_CAP`] are still capped at
/// damage time.
pub fn skill_multiplier(skill_id: SkillId) -> f64 {
    match skill_id {
        1 => 1.5, // Quick Strike
        2 => 2.0, // Heavy Blow
        3 => 2.5, // Limit Break
        _ => 2.0, // Unknown ids fall back to the standard skill
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_skill_id() {
        assert_eq!(Action::Move.skill_id(), None);
        assert_eq!(Action::Attack.skill_id(), None);
        assert_eq!(Action::Skill { skill_id: 3 }.skill_id(), Some(3));
    }

    #[test]
    fn test_input_json_shape() {
        let input = BattleInput::skill(Vec2::new(10.0, 0.0), 2);
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("\"action\":\"skill\""));
        assert!(json.contains("\"skill_id\":2"));

        let back: BattleInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn test_skill_table_defaults() {
        assert_eq!(skill_multiplier(1), 1.5);
        assert_eq!(skill_multiplier(3), 2.5);
        assert_eq!(skill_multiplier(999), 2.0);
    }
}
