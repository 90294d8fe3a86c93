//! Battle Session State Machine
//!
//! Owns the authoritative state of one 1v1 match: two player states, an
//! append-only event log, and the running/finished status. All mutation
//! goes through [`BattleSession::apply_input`], which validates the
//! input, resolves combat through the stat model, and detects victory.
//!
//! The session itself is synchronous and lock-free; the registry wraps
//! each one in a lock so the two sides' inputs are serialized.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::stats::{self, Rank};
use crate::core::vec2::{Vec2, SPAWN_A, SPAWN_B};
use crate::game::input::{
    skill_multiplier, Action, BattleInput, SkillId, MELEE_RANGE, SKILL_COOLDOWN_MS,
};
use crate::game::validate::{validate, Verdict};

/// Unique session identifier.
pub type SessionId = [u8; 16];

/// Unique player identifier (16 bytes, derived from the auth subject).
///
/// Implements Ord for deterministic BTreeMap ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub [u8; 16]);

impl PlayerId {
    /// Create from raw bytes.
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

/// Which corner of the match a player occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Left corner.
    A,
    /// Right corner.
    B,
}

impl Side {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

/// What kind of match this session resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Ladder match, feeds the rating updater.
    Ranked,
    /// Tournament bracket match.
    Tournament,
    /// Guild war match.
    GuildWar,
}

// =============================================================================
// CHARACTER SHEET & PLAYER STATE
// =============================================================================

/// Immutable character parameters a player brings into a match.
///
/// Stats live in an external persistence service; this is the shape
/// they cross the boundary in. Effective values are derived once at
/// session start via the stat model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterSheet {
    /// Character rank tier.
    pub rank: Rank,
    /// Character level (clamped to the rank cap when scaling).
    pub level: u32,
    /// Base attack.
    pub base_atk: f64,
    /// Base hit points.
    pub base_hp: f64,
    /// Defense (not level-scaled).
    pub def: f64,
    /// Maximum movement speed, arena units per second.
    pub speed: f64,
    /// Attack growth per level.
    pub growth_atk: f64,
    /// Hit-point growth per level.
    pub growth_hp: f64,
}

impl Default for CharacterSheet {
    fn default() -> Self {
        Self {
            rank: Rank::F,
            level: 1,
            base_atk: 100.0,
            base_hp: 500.0,
            def: 50.0,
            speed: 300.0,
            growth_atk: 5.0,
            growth_hp: 20.0,
        }
    }
}

/// Authoritative state of one player inside a session.
///
/// Invariants: `hp` never goes negative, and `position` is always
/// inside the arena once the first input has been validated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerState {
    /// Player identity.
    pub user_id: PlayerId,
    /// Rank, kept for the damage balancer.
    pub rank: Rank,
    /// Current hit points, clamped at zero.
    pub hp: i32,
    /// Maximum hit points (rank/level scaled).
    pub max_hp: i32,
    /// Current position.
    pub position: Vec2,
    /// Effective attack (rank/level scaled).
    pub attack: f64,
    /// Defense fed into the mitigation curve.
    pub defense: f64,
    /// Speed limit used by the kinematic check.
    pub max_speed: f64,
    /// Skill id -> ready-at timestamp (unix millis).
    pub cooldowns: BTreeMap<SkillId, u64>,
    /// Timestamp of the last accepted input (unix millis).
    pub last_input_ms: u64,
}

impl PlayerState {
    /// Build a player from a character sheet, spawning at `position`.
    pub fn new(user_id: PlayerId, sheet: &CharacterSheet) -> Self {
        let max_hp = stats::scale(sheet.base_hp, sheet.growth_hp, sheet.rank, sheet.level)
            .round() as i32;
        Self {
            user_id,
            rank: sheet.rank,
            hp: max_hp,
            max_hp,
            position: Vec2::ZERO,
            attack: stats::scale(sheet.base_atk, sheet.growth_atk, sheet.rank, sheet.level),
            defense: sheet.def,
            max_speed: sheet.speed,
            cooldowns: BTreeMap::new(),
            last_input_ms: 0,
        }
    }

    /// Check whether a skill is off cooldown at `now_ms`.
    #[inline]
    pub fn skill_ready(&self, skill_id: SkillId, now_ms: u64) -> bool {
        now_ms >= self.cooldowns.get(&skill_id).copied().unwrap_or(0)
    }

    /// Record a skill's next ready-at timestamp.
    pub fn set_cooldown(&mut self, skill_id: SkillId, ready_at_ms: u64) {
        self.cooldowns.insert(skill_id, ready_at_ms);
    }

    /// Apply damage, clamping hit points at zero.
    fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }
}

// =============================================================================
// EVENT LOG
// =============================================================================

/// What a log entry records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogKind {
    /// Basic attack connected.
    Damage,
    /// Skill resolved.
    Skill {
        /// Which skill.
        skill_id: SkillId,
    },
    /// Session force-finished by the idle sweeper.
    Forfeit,
}

/// One append-only battle log entry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unix millis when the event resolved.
    pub at_ms: u64,
    /// Event kind.
    #[serde(flatten)]
    pub kind: LogKind,
    /// Acting side.
    pub from: Side,
    /// Affected side.
    pub to: Side,
    /// Damage dealt (zero for forfeits).
    pub value: i32,
}

// =============================================================================
// SESSION
// =============================================================================

/// Session lifecycle. `Finished` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleStatus {
    /// Accepting inputs.
    #[default]
    Running,
    /// No further mutation; winner is set (or None on abort).
    Finished,
}

/// Session errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    /// Input arrived after the match finished.
    #[error("match already finished")]
    MatchFinished,
}

/// Externally visible state after an accepted input.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BattleSnapshot {
    /// Side A hit points and position.
    pub player_a: PlayerView,
    /// Side B hit points and position.
    pub player_b: PlayerView,
    /// Session status.
    pub status: BattleStatus,
    /// Winner, set iff finished (None on an aborted forfeit).
    pub winner: Option<Side>,
}

/// Per-player slice of a snapshot.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PlayerView {
    /// Current hit points.
    pub hp: i32,
    /// Current position.
    pub position: Vec2,
}

/// Authoritative state of one match.
#[derive(Clone, Debug)]
pub struct BattleSession {
    /// Unique match identifier.
    pub id: SessionId,
    /// Match kind.
    pub kind: MatchKind,
    /// Players indexed by side (A then B).
    players: [PlayerState; 2],
    /// Lifecycle status.
    status: BattleStatus,
    /// Winning side, set exactly when status becomes finished.
    winner: Option<Side>,
    /// Append-only event log.
    log: Vec<LogEntry>,
}

impl BattleSession {
    /// Create a running session from two matched players.
    ///
    /// `now_ms` seeds both last-input timestamps so the first real
    /// input gets a sane elapsed time.
    pub fn new(
        id: SessionId,
        kind: MatchKind,
        player_a: (PlayerId, &CharacterSheet),
        player_b: (PlayerId, &CharacterSheet),
        now_ms: u64,
    ) -> Self {
        let mut a = PlayerState::new(player_a.0, player_a.1);
        a.position = SPAWN_A;
        a.last_input_ms = now_ms;

        let mut b = PlayerState::new(player_b.0, player_b.1);
        b.position = SPAWN_B;
        b.last_input_ms = now_ms;

        Self {
            id,
            kind,
            players: [a, b],
            status: BattleStatus::Running,
            winner: None,
            log: Vec::new(),
        }
    }

    /// Current status.
    pub fn status(&self) -> BattleStatus {
        self.status
    }

    /// Winner, set iff finished.
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Player state for a side.
    pub fn player(&self, side: Side) -> &PlayerState {
        &self.players[side.index()]
    }

    /// The battle log so far.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Apply one claimed input from `side`.
    ///
    /// Returns `Ok(Some(snapshot))` when the input was accepted and
    /// state changed, `Ok(None)` when validation silently dropped it,
    /// and an error once the session is finished. Nothing mutates on
    /// the rejection and error paths.
    pub fn apply_input(
        &mut self,
        side: Side,
        input: &BattleInput,
        now_ms: u64,
    ) -> Result<Option<BattleSnapshot>, SessionError> {
        if self.status != BattleStatus::Running {
            return Err(SessionError::MatchFinished);
        }

        match validate(self.player(side), input, now_ms) {
            Verdict::Accepted => {}
            Verdict::Rejected(reason) => {
                // Audit trail only; the client is told nothing.
                debug!(
                    session = %hex::encode(&self.id[..4]),
                    ?side,
                    ?reason,
                    "input rejected"
                );
                return Ok(None);
            }
        }

        {
            let player = &mut self.players[side.index()];
            player.position = input.position;
            player.last_input_ms = now_ms;
        }

        match input.action {
            Action::Move => {}
            Action::Attack => self.resolve_attack(side, now_ms),
            Action::Skill { skill_id } => self.resolve_skill(side, skill_id, now_ms),
        }

        if self.player(side.opponent()).hp <= 0 {
            self.status = BattleStatus::Finished;
            self.winner = Some(side);
        }

        Ok(Some(self.snapshot()))
    }

    /// Basic attack: connects only within melee range, multiplier 1.0.
    fn resolve_attack(&mut self, side: Side, now_ms: u64) {
        let target_side = side.opponent();
        let in_range = {
            let attacker = self.player(side);
            let target = self.player(target_side);
            attacker.position.distance(target.position) < MELEE_RANGE
        };
        if !in_range {
            return;
        }

        let dealt = self.resolve_damage(side, 1.0);
        self.log.push(LogEntry {
            at_ms: now_ms,
            kind: LogKind::Damage,
            from: side,
            to: target_side,
            value: dealt,
        });
    }

    /// Skill: always resolves (no range gate), then starts the cooldown.
    fn resolve_skill(&mut self, side: Side, skill_id: SkillId, now_ms: u64) {
        let dealt = self.resolve_damage(side, skill_multiplier(skill_id));
        self.players[side.index()].set_cooldown(skill_id, now_ms + SKILL_COOLDOWN_MS);
        self.log.push(LogEntry {
            at_ms: now_ms,
            kind: LogKind::Skill { skill_id },
            from: side,
            to: side.opponent(),
            value: dealt,
        });
    }

    /// Run the damage formula and apply the result to the opponent.
    ///
    /// The matchmaking balancer scales the attacker's effective attack
    /// when the rank gap exceeds two tiers.
    fn resolve_damage(&mut self, side: Side, multiplier: f64) -> i32 {
        let target_side = side.opponent();
        let dealt = {
            let attacker = self.player(side);
            let target = self.player(target_side);
            let boost = stats::matchmaking_balancer(attacker.rank, target.rank);
            stats::damage(attacker.attack * boost.attacker, multiplier, target.defense)
                .round() as i32
        };
        self.players[target_side.index()].take_damage(dealt);
        dealt
    }

    /// Force-finish a session whose loser has gone silent.
    ///
    /// Returns the forfeit outcome if the sweep fired: the still-active
    /// side wins, or nobody does when both sides are silent (abort).
    /// No-op while both sides remain active or once already finished.
    pub fn check_idle_forfeit(&mut self, now_ms: u64, timeout_ms: u64) -> Option<Option<Side>> {
        if self.status != BattleStatus::Running {
            return None;
        }

        let silent = |side: Side| {
            now_ms.saturating_sub(self.player(side).last_input_ms) >= timeout_ms
        };
        let (a_silent, b_silent) = (silent(Side::A), silent(Side::B));

        let winner = match (a_silent, b_silent) {
            (false, false) => return None,
            (true, false) => Some(Side::B),
            (false, true) => Some(Side::A),
            (true, true) => None, // both gone: abort with no winner
        };

        self.status = BattleStatus::Finished;
        self.winner = winner;
        if let Some(w) = winner {
            self.log.push(LogEntry {
                at_ms: now_ms,
                kind: LogKind::Forfeit,
                from: w,
                to: w.opponent(),
                value: 0,
            });
        }
        Some(winner)
    }

    /// One side concedes; the opponent wins immediately.
    ///
    /// No-op once finished. Returns the winning side when the
    /// concession took effect.
    pub fn concede(&mut self, side: Side, now_ms: u64) -> Option<Side> {
        if self.status != BattleStatus::Running {
            return None;
        }
        let winner = side.opponent();
        self.status = BattleStatus::Finished;
        self.winner = Some(winner);
        self.log.push(LogEntry {
            at_ms: now_ms,
            kind: LogKind::Forfeit,
            from: winner,
            to: side,
            value: 0,
        });
        Some(winner)
    }

    /// Externally visible state.
    pub fn snapshot(&self) -> BattleSnapshot {
        let view = |side: Side| {
            let p = self.player(side);
            PlayerView {
                hp: p.hp,
                position: p.position,
            }
        };
        BattleSnapshot {
            player_a: view(Side::A),
            player_b: view(Side::B),
            status: self.status,
            winner: self.winner,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
