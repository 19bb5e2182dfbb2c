//! Game results, playoff games, and the rules that fill their team slots.

use crate::models::group::GroupLetter;
use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a game (group or playoff).
pub type GameId = Uuid;

/// Which side of a game.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    #[default]
    Home,
    Away,
}

impl Slot {
    pub const BOTH: [Slot; 2] = [Slot::Home, Slot::Away];

    pub fn opposite(self) -> Self {
        match self {
            Slot::Home => Slot::Away,
            Slot::Away => Slot::Home,
        }
    }
}

/// A score entry for one game. Only non-draft results are official.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub game_id: GameId,
    pub home_score: u32,
    pub away_score: u32,
    #[serde(default)]
    pub home_penalties: Option<u32>,
    #[serde(default)]
    pub away_penalties: Option<u32>,
    /// Provisional entry; never counted.
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Participants the score was entered for (playoff games only).
    #[serde(default)]
    pub home_team: Option<TeamId>,
    #[serde(default)]
    pub away_team: Option<TeamId>,
}

impl GameResult {
    /// An official result with no penalty shoot-out.
    pub fn official(game_id: GameId, home_score: u32, away_score: u32) -> Self {
        Self {
            game_id,
            home_score,
            away_score,
            ..Self::default()
        }
    }

    /// A provisional result, excluded from every derived computation.
    pub fn draft(game_id: GameId, home_score: u32, away_score: u32) -> Self {
        Self {
            is_draft: true,
            ..Self::official(game_id, home_score, away_score)
        }
    }

    pub fn with_penalties(mut self, home: u32, away: u32) -> Self {
        self.home_penalties = Some(home);
        self.away_penalties = Some(away);
        self
    }

    pub fn with_completed_at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    /// Stamp the teams that actually played.
    pub fn for_teams(mut self, home: TeamId, away: TeamId) -> Self {
        self.home_team = Some(home);
        self.away_team = Some(away);
        self
    }

    /// True when the result was entered for exactly this pairing. Knockout
    /// games only count such results; a reassigned slot needs a fresh entry.
    pub fn recorded_for(&self, home: TeamId, away: TeamId) -> bool {
        self.home_team == Some(home) && self.away_team == Some(away)
    }

    pub fn is_official(&self) -> bool {
        !self.is_draft
    }

    pub fn is_draw(&self) -> bool {
        self.home_score == self.away_score
    }

    /// Winning side for a knockout game. A level score is only decided by a
    /// recorded, non-level shoot-out; anything else is `None`.
    pub fn winning_side(&self) -> Option<Slot> {
        if self.home_score > self.away_score {
            return Some(Slot::Home);
        }
        if self.away_score > self.home_score {
            return Some(Slot::Away);
        }
        match (self.home_penalties, self.away_penalties) {
            (Some(h), Some(a)) if h > a => Some(Slot::Home),
            (Some(h), Some(a)) if a > h => Some(Slot::Away),
            _ => None,
        }
    }
}

/// What a playoff round decides. Honor roll games are found by kind, not by number.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundKind {
    #[default]
    Knockout,
    ThirdPlace,
    Final,
}

/// A playoff round: label for display, order for propagation.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub label: String,
    pub order: u32,
    #[serde(default)]
    pub kind: RoundKind,
}

impl Round {
    pub fn new(label: impl Into<String>, order: u32, kind: RoundKind) -> Self {
        Self {
            label: label.into(),
            order,
            kind,
        }
    }

    pub fn knockout(label: impl Into<String>, order: u32) -> Self {
        Self::new(label, order, RoundKind::Knockout)
    }
}

/// How a playoff slot gets its team.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TeamSlotRule {
    /// Known in advance.
    Fixed { team: TeamId },
    /// Winner of the referenced game, once it has an official decisive result.
    WinnerOf { game: u32 },
    /// Loser of the referenced game, once it has an official decisive result.
    LoserOf { game: u32 },
    /// Third-placed team assigned to this bracket slot by the combination table.
    ThirdPlaceOf { slot: String },
    /// Team finishing at `position` (1-based) of a completed group, e.g. "1A".
    GroupPosition { group: GroupLetter, position: u8 },
}

impl TeamSlotRule {
    /// Game number this rule depends on, if it depends on another playoff game.
    pub fn referenced_game(&self) -> Option<u32> {
        match self {
            TeamSlotRule::WinnerOf { game } | TeamSlotRule::LoserOf { game } => Some(*game),
            _ => None,
        }
    }
}

/// A knockout game. `home_team`/`away_team` are the persisted resolutions.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayoffGame {
    pub id: GameId,
    /// Stable ordinal; the key other games reference.
    pub game_number: u32,
    pub round: Round,
    pub home_rule: TeamSlotRule,
    pub away_rule: TeamSlotRule,
    #[serde(default)]
    pub home_team: Option<TeamId>,
    #[serde(default)]
    pub away_team: Option<TeamId>,
}

impl PlayoffGame {
    pub fn new(game_number: u32, round: Round, home_rule: TeamSlotRule, away_rule: TeamSlotRule) -> Self {
        Self {
            id: Uuid::new_v4(),
            game_number,
            round,
            home_rule,
            away_rule,
            home_team: None,
            away_team: None,
        }
    }

    pub fn rule(&self, slot: Slot) -> &TeamSlotRule {
        match slot {
            Slot::Home => &self.home_rule,
            Slot::Away => &self.away_rule,
        }
    }

    pub fn team(&self, slot: Slot) -> Option<TeamId> {
        match slot {
            Slot::Home => self.home_team,
            Slot::Away => self.away_team,
        }
    }

    pub fn set_team(&mut self, slot: Slot, team: Option<TeamId>) {
        match slot {
            Slot::Home => self.home_team = team,
            Slot::Away => self.away_team = team,
        }
    }
}
