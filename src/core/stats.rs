//! Stat Scaling and Damage Model
//!
//! Pure functions mapping (base stat, rank, level) to effective values,
//! plus the damage formula and soft-cap curve. Both the input validator
//! and the combat resolver read from this module, so the thresholds used
//! to reject a cheating client are derived from the same numbers that
//! resolve a legitimate hit.
//!
//! Everything here is deterministic and order-independent: the same
//! inputs always produce the same outputs, which keeps battle logs
//! replayable and the formulas testable in isolation.

use serde::{Deserialize, Serialize};

// =============================================================================
// RANKS
// =============================================================================

/// Character rank tier, ordered weakest to strongest.
///
/// Each rank bounds the maximum level and carries fixed scaling
/// multipliers; a character cannot grow past its rank's level cap
/// without a rank-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Rank {
    /// Entry tier.
    F = 0,
    /// Tier D.
    D = 1,
    /// Tier C.
    C = 2,
    /// Tier B.
    B = 3,
    /// Tier A.
    A = 4,
    /// Tier SS.
    Ss = 5,
    /// Tier SSS.
    Sss = 6,
    /// Tier UR.
    Ur = 7,
    /// Top tier.
    Ex = 8,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 9] = [
        Rank::F,
        Rank::D,
        Rank::C,
        Rank::B,
        Rank::A,
        Rank::Ss,
        Rank::Sss,
        Rank::Ur,
        Rank::Ex,
    ];

    /// Tier index (0 for F, 8 for EX).
    #[inline]
    pub fn tier(self) -> u8 {
        self as u8
    }

    /// Scaling profile for this rank.
    #[inline]
    pub fn profile(self) -> RankProfile {
        RANK_TABLE[self as usize]
    }
}

/// Per-rank scaling parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankProfile {
    /// Maximum level a character of this rank can benefit from.
    pub max_level: u32,
    /// Multiplier applied to the base stat.
    pub base_mult: f64,
    /// Multiplier applied to the per-level growth.
    pub growth_mult: f64,
}

/// Rank scaling table, indexed by tier.
///
/// EX base multiplier is capped at 1.35 so a top-rank character is never
/// more than 35% above an F-rank on raw base stats.
const RANK_TABLE: [RankProfile; 9] = [
    RankProfile { max_level: 10, base_mult: 1.00, growth_mult: 1.00 },  // F
    RankProfile { max_level: 20, base_mult: 1.05, growth_mult: 1.03 },  // D
    RankProfile { max_level: 30, base_mult: 1.08, growth_mult: 1.05 },  // C
    RankProfile { max_level: 40, base_mult: 1.12, growth_mult: 1.07 },  // B
    RankProfile { max_level: 60, base_mult: 1.18, growth_mult: 1.10 },  // A
    RankProfile { max_level: 80, base_mult: 1.22, growth_mult: 1.12 },  // SS
    RankProfile { max_level: 120, base_mult: 1.27, growth_mult: 1.15 }, // SSS
    RankProfile { max_level: 160, base_mult: 1.32, growth_mult: 1.17 }, // UR
    RankProfile { max_level: 200, base_mult: 1.35, growth_mult: 1.20 }, // EX
];

// =============================================================================
// SOFT CAPS
// =============================================================================

/// Soft cap for critical-hit rate.
pub const SOFT_CAP_CRIT_RATE: f64 = 0.40;
/// Soft cap for the speed multiplier.
pub const SOFT_CAP_SPEED: f64 = 1.50;
/// Soft cap for skill power.
pub const SOFT_CAP_SKILL_POWER: f64 = 2.00;

/// Fraction of the excess above a soft cap that still counts.
pub const SOFT_CAP_DIMINISHING_FACTOR: f64 = 0.3;

/// Any single skill's multiplier is bounded here regardless of what the
/// skill declares, so no skill can burst past 2.5x.
pub const SKILL_MULTIPLIER_CAP: f64 = 2.5;

/// Apply soft-cap diminishing returns: values at or below `cap` pass
/// through untouched; the excess above it is scaled by
/// [`SOFT_CAP_DIMINISHING_FACTOR`].
#[inline]
pub fn apply_soft_cap(value: f64, cap: f64) -> f64 {
    if value <= cap {
        value
    } else {
        cap + (value - cap) * SOFT_CAP_DIMINISHING_FACTOR
    }
}

// =============================================================================
// SCALING & DAMAGE
// =============================================================================

/// Scale a base stat by rank and level.
///
/// `effective = base * base_mult + min(level, max_level) * growth * growth_mult`
///
/// Level is clamped to the rank's cap before scaling, so levels past the
/// cap have no effect until the character ranks up.
pub fn scale(base: f64, growth_per_level: f64, rank: Rank, level: u32) -> f64 {
    let profile = rank.profile();
    let effective_level = level.min(profile.max_level);
    base * profile.base_mult + effective_level as f64 * growth_per_level * profile.growth_mult
}

/// Diminishing-returns defense curve: `def / (def + 100)`.
///
/// Returns a mitigation fraction in `[0, 1)`; defense approaches but
/// never reaches full negation.
#[inline]
pub fn effective_defense(def: f64) -> f64 {
    def / (def + 100.0)
}

/// Damage dealt by one hit.
///
/// `atk * min(mult, 2.5) * (1 - effective_defense(def))`, floored at zero.
pub fn damage(atk: f64, skill_multiplier: f64, target_def: f64) -> f64 {
    let mult = skill_multiplier.min(SKILL_MULTIPLIER_CAP);
    let raw = atk * mult * (1.0 - effective_defense(target_def));
    raw.max(0.0)
}

// =============================================================================
// MATCHMAKING BALANCER
// =============================================================================

/// Damage multipliers applied when a match spans a large rank gap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BalanceBoost {
    /// Multiplier applied to the attacker's outgoing attack stat.
    pub attacker: f64,
    /// Multiplier applied to the defender's outgoing attack stat.
    pub defender: f64,
}

impl BalanceBoost {
    /// No adjustment.
    pub const NEUTRAL: Self = Self { attacker: 1.0, defender: 1.0 };
}

/// Normalize damage output when the rank-tier distance exceeds 2.
///
/// This is a balance knob applied at resolution time, not a block on
/// rank-gap matches: the higher-rank side is dampened below 1.0, the
/// lower-rank side boosted above it.
pub fn matchmaking_balancer(attacker_rank: Rank, defender_rank: Rank) -> BalanceBoost {
    let gap = attacker_rank.tier() as i32 - defender_rank.tier() as i32;

    if gap.abs() <= 2 {
        return BalanceBoost::NEUTRAL;
    }

    if gap > 0 {
        // Attacker is much higher rank
        BalanceBoost { attacker: 0.90, defender: 1.05 }
    } else {
        // Attacker is much lower rank
        BalanceBoost { attacker: 1.03, defender: 0.95 }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rank_ordering_and_tiers() {
        assert!(Rank::F < Rank::B);
        assert!(Rank::Ur < Rank::Ex);
        for (i, rank) in Rank::ALL.iter().enumerate() {
            assert_eq!(rank.tier() as usize, i);
        }
    }

    #[test]
    fn test_scale_level_clamped_at_rank_cap() {
        // F caps at level 10: levels beyond the cap change nothing
        let at_cap = scale(100.0, 5.0, Rank::F, 10);
        let over_cap = scale(100.0, 5.0, Rank::F, 99);
        assert_eq!(at_cap, over_cap);
        assert_eq!(at_cap, 100.0 + 10.0 * 5.0);
    }

    #[test]
    fn test_scale_known_value() {
        // B rank, level 40: 100*1.12 + 40*5*1.07 = 326
        let v = scale(100.0, 5.0, Rank::B, 40);
        assert!((v - 326.0).abs() < 1e-9);
    }

    #[test]
    fn test_effective_defense_limits() {
        assert_eq!(effective_defense(0.0), 0.0);
        assert!(effective_defense(100.0) == 0.5);
        // Asymptotic toward 1
        assert!(effective_defense(1_000_000.0) > 0.999);
        assert!(effective_defense(1_000_000.0) < 1.0);
    }

    #[test]
    fn test_damage_multiplier_capped() {
        let capped = damage(100.0, 2.5, 0.0);
        let over = damage(100.0, 10.0, 0.0);
        assert_eq!(capped, over);
        assert_eq!(capped, 250.0);
    }

    #[test]
    fn test_damage_never_negative() {
        assert_eq!(damage(0.0, 1.0, 50.0), 0.0);
        assert!(damage(-10.0, 1.0, 50.0) == 0.0);
    }

    #[test]
    fn test_soft_cap_algebra() {
        // At or below cap: identity
        assert_eq!(apply_soft_cap(0.3, SOFT_CAP_CRIT_RATE), 0.3);
        assert_eq!(apply_soft_cap(0.4, SOFT_CAP_CRIT_RATE), 0.4);
        // Above cap: cap + excess * factor, strictly less than input
        let v = apply_soft_cap(0.9, SOFT_CAP_CRIT_RATE);
        assert!((v - (0.4 + 0.5 * 0.3)).abs() < 1e-12);
        assert!(v < 0.9);
    }

    #[test]
    fn test_balancer_small_gap_neutral() {
        assert_eq!(matchmaking_balancer(Rank::F, Rank::C), BalanceBoost::NEUTRAL);
        assert_eq!(matchmaking_balancer(Rank::A, Rank::Sss), BalanceBoost::NEUTRAL);
        assert_eq!(matchmaking_balancer(Rank::Ex, Rank::Ex), BalanceBoost::NEUTRAL);
    }

    #[test]
    fn test_balancer_large_gap() {
        // F vs B is 3 tiers apart
        let low_attacks = matchmaking_balancer(Rank::F, Rank::B);
        assert_eq!(low_attacks.attacker, 1.03);
        assert_eq!(low_attacks.defender, 0.95);

        let high_attacks = matchmaking_balancer(Rank::B, Rank::F);
        assert_eq!(high_attacks.attacker, 0.90);
        assert_eq!(high_attacks.defender, 1.05);
    }

    proptest! {
        #[test]
        fn prop_scale_monotonic_in_level(
            base in 1.0f64..1000.0,
            growth in 0.0f64..50.0,
            rank_idx in 0usize..9,
            level in 0u32..200,
        ) {
            let rank = Rank::ALL[rank_idx];
            let lo = scale(base, growth, rank, level);
            let hi = scale(base, growth, rank, level + 1);
            prop_assert!(hi >= lo);
        }

        #[test]
        fn prop_damage_monotonic_in_def(
            atk in 0.0f64..10_000.0,
            mult in 0.0f64..2.5,
            def in 0.0f64..10_000.0,
        ) {
            let d1 = damage(atk, mult, def);
            let d2 = damage(atk, mult, def + 1.0);
            prop_assert!(d2 <= d1);
            prop_assert!(d1 >= 0.0);
        }

        #[test]
        fn prop_damage_monotonic_in_atk(
            atk in 0.0f64..10_000.0,
            mult in 0.0f64..2.5,
            def in 0.0f64..10_000.0,
        ) {
            let d1 = damage(atk, mult, def);
            let d2 = damage(atk + 1.0, mult, def);
            prop_assert!(d2 >= d1);
        }

        #[test]
        fn prop_soft_cap_never_exceeds_input(v in 0.0f64..100.0, cap in 0.1f64..10.0) {
            let out = apply_soft_cap(v, cap);
            if v <= cap {
                prop_assert_eq!(out, v);
            } else {
                prop_assert!(out < v);
                prop_assert!(out > cap);
            }
        }
    }
}
