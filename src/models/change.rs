//! Change records emitted by a propagation pass for the external persistence layer.

use crate::models::game::{GameResult, Slot};
use crate::models::honor_roll::HonorPosition;
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// How a slot's resolution moved.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotChangeKind {
    /// Empty slot now has a team.
    Assigned,
    /// A previously emitted team is replaced by a different one.
    Reassigned { previous: TeamId },
    /// A previously emitted team is withdrawn and nothing replaces it yet.
    Cleared { previous: TeamId },
}

/// One slot to persist.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SlotChange {
    pub game_number: u32,
    pub slot: Slot,
    #[serde(flatten)]
    pub kind: SlotChangeKind,
    /// New occupant; `None` only for `Cleared`.
    pub team: Option<TeamId>,
}

impl SlotChange {
    pub fn between(game_number: u32, slot: Slot, previous: Option<TeamId>, current: Option<TeamId>) -> Option<Self> {
        let kind = match (previous, current) {
            (None, None) => return None,
            (Some(p), Some(c)) if p == c => return None,
            (None, Some(_)) => SlotChangeKind::Assigned,
            (Some(p), Some(_)) => SlotChangeKind::Reassigned { previous: p },
            (Some(p), None) => SlotChangeKind::Cleared { previous: p },
        };
        Some(Self {
            game_number,
            slot,
            kind,
            team: current,
        })
    }

    /// True when this withdraws something downstream scoring may already rely on.
    pub fn is_retraction(&self) -> bool {
        !matches!(self.kind, SlotChangeKind::Assigned)
    }
}

/// Lifecycle of a playoff game. Ordered: later variants are further along.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    Unresolved,
    PartiallyResolved,
    /// Both teams known; the game is playable.
    FullyResolved,
    /// Both teams known and an official result entered for them.
    Completed,
}

impl GameState {
    /// State of a playoff game given its slots and its official result, if any.
    /// A result not entered for the current pairing leaves it `FullyResolved`.
    pub fn of(home: Option<TeamId>, away: Option<TeamId>, official: Option<&GameResult>) -> Self {
        let counts = match (home, away, official) {
            (Some(h), Some(a), Some(result)) => result.recorded_for(h, a),
            _ => false,
        };
        Self::from_parts(home, away, counts)
    }

    pub fn from_parts(home: Option<TeamId>, away: Option<TeamId>, has_official_result: bool) -> Self {
        match (home, away) {
            (Some(_), Some(_)) if has_official_result => GameState::Completed,
            (Some(_), Some(_)) => GameState::FullyResolved,
            (None, None) => GameState::Unresolved,
            _ => GameState::PartiallyResolved,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameStateChange {
    pub game_number: u32,
    pub from: GameState,
    pub to: GameState,
}

impl GameStateChange {
    /// Backward move forced by an upstream correction.
    pub fn is_regression(&self) -> bool {
        self.to < self.from
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HonorRollChange {
    pub position: HonorPosition,
    pub previous: Option<TeamId>,
    pub current: Option<TeamId>,
}
