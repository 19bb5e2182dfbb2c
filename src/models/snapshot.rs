//! TournamentSnapshot: everything one propagation pass reads.

use crate::models::change::SlotChange;
use crate::models::game::{GameResult, PlayoffGame};
use crate::models::group::{Group, GroupGame, GroupLetter};
use crate::models::honor_roll::HonorRoll;
use crate::models::team::Team;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// What to do when third-placed teams are level on every sporting criterion at the cutoff.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoffTiePolicy {
    /// Break it with the team identifier, as inside a group. Distinct ids
    /// always produce a ranking.
    #[default]
    TeamIdentifier,
    /// Opt-in: report "not yet resolvable" instead of picking a side.
    Unresolvable,
}

/// Shape of the competition: N groups feeding K third-place wildcards.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentFormat {
    /// K: how many third-placed teams advance.
    pub qualifying_third_places: usize,
    /// Table position that competes for the wildcard slots.
    #[serde(default = "default_third_place_position")]
    pub third_place_position: usize,
    #[serde(default)]
    pub cutoff_tie: CutoffTiePolicy,
}

fn default_third_place_position() -> usize {
    3
}

impl Default for TournamentFormat {
    fn default() -> Self {
        Self {
            qualifying_third_places: 8,
            third_place_position: default_third_place_position(),
            cutoff_tie: CutoffTiePolicy::default(),
        }
    }
}

/// Full current state of one tournament, as handed over by the result store.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub tournament_id: TournamentId,
    #[serde(default)]
    pub format: TournamentFormat,
    #[serde(default)]
    pub teams: Vec<Team>,
    pub groups: Vec<Group>,
    #[serde(default)]
    pub group_games: Vec<GroupGame>,
    #[serde(default)]
    pub playoff_games: Vec<PlayoffGame>,
    /// Official and draft results for group and playoff games.
    #[serde(default)]
    pub results: Vec<GameResult>,
    #[serde(default)]
    pub honor_roll: HonorRoll,
}

impl TournamentSnapshot {
    pub fn new(format: TournamentFormat, groups: Vec<Group>) -> Self {
        Self {
            tournament_id: Uuid::new_v4(),
            format,
            groups,
            ..Self::default()
        }
    }

    pub fn group(&self, letter: GroupLetter) -> Option<&Group> {
        self.groups.iter().find(|g| g.letter == letter)
    }

    pub fn playoff_game(&self, game_number: u32) -> Option<&PlayoffGame> {
        self.playoff_games.iter().find(|g| g.game_number == game_number)
    }

    pub fn playoff_game_mut(&mut self, game_number: u32) -> Option<&mut PlayoffGame> {
        self.playoff_games.iter_mut().find(|g| g.game_number == game_number)
    }

    /// Replace any existing results for the same game with `result`. An
    /// unstamped playoff result is stamped with the teams now in its slots.
    pub fn record_result(&mut self, mut result: GameResult) {
        if result.home_team.is_none() && result.away_team.is_none() {
            let pairing = self
                .playoff_games
                .iter()
                .find(|g| g.id == result.game_id)
                .and_then(|g| g.home_team.zip(g.away_team));
            if let Some((home, away)) = pairing {
                result = result.for_teams(home, away);
            }
        }
        self.results.retain(|r| r.game_id != result.game_id);
        self.results.push(result);
    }

    /// Persist emitted slot changes, as the result store would.
    pub fn apply_slot_changes(&mut self, changes: &[SlotChange]) {
        for change in changes {
            if let Some(game) = self.playoff_game_mut(change.game_number) {
                game.set_team(change.slot, change.team);
            }
        }
    }

    pub fn apply_honor_roll(&mut self, honor_roll: &HonorRoll) {
        self.honor_roll = honor_roll.clone();
    }
}
