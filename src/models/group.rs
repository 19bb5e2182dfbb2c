//! Groups, group fixtures and tie-break modes.

use crate::models::game::GameId;
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Group identifier: a single uppercase letter ('A'..='L' for a 12-group draw).
pub type GroupLetter = char;

/// How teams level on points, goal difference and goals for are separated.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakMode {
    /// Mini-table of the games between the tied teams, then team id.
    #[default]
    HeadToHead,
    /// Straight to the team id fallback.
    GoalDifferenceOnly,
}

/// A group of the first stage.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub letter: GroupLetter,
    /// Member teams in registration order.
    pub teams: Vec<TeamId>,
    #[serde(default)]
    pub tie_break: TieBreakMode,
}

impl Group {
    pub fn new(letter: GroupLetter, teams: Vec<TeamId>, tie_break: TieBreakMode) -> Self {
        Self {
            letter,
            teams,
            tie_break,
        }
    }

    pub fn contains(&self, team: TeamId) -> bool {
        self.teams.contains(&team)
    }

    /// Fixtures needed for a single round robin: n(n-1)/2.
    pub fn round_robin_games(&self) -> usize {
        let n = self.teams.len();
        n * n.saturating_sub(1) / 2
    }
}

/// A group-stage fixture. Its result (if any) lives in the snapshot's result list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupGame {
    pub id: GameId,
    pub game_number: u32,
    pub group: GroupLetter,
    pub home_team: TeamId,
    pub away_team: TeamId,
}

impl GroupGame {
    pub fn new(game_number: u32, group: GroupLetter, home_team: TeamId, away_team: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            game_number,
            group,
            home_team,
            away_team,
        }
    }
}
