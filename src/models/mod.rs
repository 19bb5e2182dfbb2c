//! Data structures for the bracket engine: teams, groups, results, playoff games, changes.

mod change;
mod combination;
mod error;
mod game;
mod group;
mod honor_roll;
mod snapshot;
mod standings;
mod team;

pub use change::{GameState, GameStateChange, HonorRollChange, SlotChange, SlotChangeKind};
pub use combination::CombinationRule;
pub use error::{EngineError, ErrorKind};
pub use game::{GameId, GameResult, PlayoffGame, Round, RoundKind, Slot, TeamSlotRule};
pub use group::{Group, GroupGame, GroupLetter, TieBreakMode};
pub use honor_roll::{HonorPosition, HonorRoll};
pub use snapshot::{CutoffTiePolicy, TournamentFormat, TournamentId, TournamentSnapshot};
pub use standings::{GroupStandings, StandingRow};
pub use team::{Team, TeamId};
