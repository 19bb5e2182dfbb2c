//! Completion percentages handed to the scoring subsystem.

use crate::logic::qualification::Qualification;
use crate::models::{GameState, GroupLetter, GroupStandings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionReport {
    /// Per group: share of scheduled fixtures with an official result, 0-100.
    pub groups: BTreeMap<GroupLetter, f64>,
    /// All group fixtures together, 0-100.
    pub group_stage: f64,
    pub qualification_resolved: bool,
    /// Share of playoff games in the `Completed` state, 0-100.
    pub playoffs: f64,
}

pub fn completion_report(
    standings: &BTreeMap<GroupLetter, GroupStandings>,
    qualification: &Qualification,
    playoff_states: &[GameState],
) -> CompletionReport {
    let groups = standings
        .iter()
        .map(|(&letter, s)| (letter, percent(s.official_games, s.scheduled_games)))
        .collect();
    let official: usize = standings.values().map(|s| s.official_games).sum();
    let scheduled: usize = standings.values().map(|s| s.scheduled_games).sum();
    let completed = playoff_states
        .iter()
        .filter(|&&s| s == GameState::Completed)
        .count();

    CompletionReport {
        groups,
        group_stage: percent(official, scheduled),
        qualification_resolved: qualification.is_resolved(),
        playoffs: percent(completed, playoff_states.len()),
    }
}

fn percent(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    done as f64 * 100.0 / total as f64
}
