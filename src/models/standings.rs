//! StandingRow and per-group standings. Derived on every call, never persisted here.

use crate::models::group::GroupLetter;
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One team's line in a group table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub team: TeamId,
    pub group: GroupLetter,
    /// 1-based rank within the group.
    pub rank: u32,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
    /// Points in the mini-table against teams level on the main criteria (0 when not level).
    pub head_to_head_points: u32,
}

impl StandingRow {
    pub fn new(team: TeamId, group: GroupLetter) -> Self {
        Self {
            team,
            group,
            ..Self::default()
        }
    }

    /// Add one game from this team's perspective.
    pub fn record(&mut self, scored: u32, conceded: u32) {
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        let difference = i64::from(self.goals_for) - i64::from(self.goals_against);
        self.goal_difference = difference.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.wins = self.wins.saturating_add(1);
                self.points = self.points.saturating_add(3);
            }
            Ordering::Equal => {
                self.draws = self.draws.saturating_add(1);
                self.points = self.points.saturating_add(1);
            }
            Ordering::Less => self.losses = self.losses.saturating_add(1),
        }
    }

    /// Sporting criteria only: points, goal difference, goals for (all descending).
    pub fn compare_record(&self, other: &Self) -> Ordering {
        other
            .points
            .cmp(&self.points)
            .then_with(|| other.goal_difference.cmp(&self.goal_difference))
            .then_with(|| other.goals_for.cmp(&self.goals_for))
    }

    pub fn level_with(&self, other: &Self) -> bool {
        self.compare_record(other) == Ordering::Equal
    }
}

/// Ranked table for one group plus how far its fixtures have progressed.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupStandings {
    pub group: GroupLetter,
    pub rows: Vec<StandingRow>,
    /// Every scheduled fixture has an official result (and the round robin is fully scheduled).
    pub complete: bool,
    pub official_games: usize,
    pub scheduled_games: usize,
}

impl GroupStandings {
    /// Row at a 1-based position.
    pub fn at_position(&self, position: usize) -> Option<&StandingRow> {
        position.checked_sub(1).and_then(|i| self.rows.get(i))
    }
}
