//! Official result lookup. Drafts are dropped here so later stages never see them.

use crate::models::{EngineError, GameId, GameResult, TournamentSnapshot};
use std::collections::{HashMap, HashSet};

/// At most one official result per game, keyed by game id.
#[derive(Debug, Default)]
pub struct ResultIndex<'a> {
    official: HashMap<GameId, &'a GameResult>,
}

impl<'a> ResultIndex<'a> {
    /// Index the snapshot's results.
    ///
    /// Fails on a result for a game the snapshot does not declare, or on a
    /// second official result for the same game.
    pub fn build(snapshot: &'a TournamentSnapshot) -> Result<Self, EngineError> {
        let known: HashSet<GameId> = snapshot
            .group_games
            .iter()
            .map(|g| g.id)
            .chain(snapshot.playoff_games.iter().map(|g| g.id))
            .collect();

        let mut official = HashMap::new();
        for result in &snapshot.results {
            if !known.contains(&result.game_id) {
                return Err(EngineError::UnknownGame(result.game_id));
            }
            if !result.is_official() {
                continue;
            }
            if official.insert(result.game_id, result).is_some() {
                return Err(EngineError::DuplicateOfficialResult(result.game_id));
            }
        }
        Ok(Self { official })
    }

    pub fn official(&self, game_id: GameId) -> Option<&'a GameResult> {
        self.official.get(&game_id).copied()
    }

    pub fn has_official(&self, game_id: GameId) -> bool {
        self.official.contains_key(&game_id)
    }

    pub fn len(&self) -> usize {
        self.official.len()
    }

    pub fn is_empty(&self) -> bool {
        self.official.is_empty()
    }
}
