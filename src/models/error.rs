//! Fatal engine errors. "Not yet resolvable" is never an error.

use crate::models::game::{GameId, RoundKind};
use crate::models::group::GroupLetter;
use crate::models::team::TeamId;
use thiserror::Error;

/// Errors that abort a propagation pass (nothing from the pass may be persisted).
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum EngineError {
    /// A group fixture uses a team that is not a member of the group.
    #[error("team {team} is not a member of group {group}")]
    TeamNotInGroup { group: GroupLetter, team: TeamId },
    /// A group lists a team the tournament never registered.
    #[error("group {group} lists unregistered team {team}")]
    UnregisteredTeam { group: GroupLetter, team: TeamId },
    #[error("team {0} is registered more than once")]
    DuplicateTeam(TeamId),
    /// A team is a member of two groups (or listed twice in one).
    #[error("team {team} is a member of both group {first} and group {second}")]
    TeamInSeveralGroups {
        team: TeamId,
        first: GroupLetter,
        second: GroupLetter,
    },
    /// A Fixed slot rule names a team outside the tournament.
    #[error("game {game_number} is fixed to unregistered team {team}")]
    UnregisteredFixedTeam { game_number: u32, team: TeamId },
    /// A fixture or rule names a group that does not exist.
    #[error("unknown group {0}")]
    UnknownGroup(GroupLetter),
    /// A result references a game that is neither a group nor a playoff game.
    #[error("result references unknown game {0}")]
    UnknownGame(GameId),
    /// More than one official result for the same game.
    #[error("game {0} has more than one official result")]
    DuplicateOfficialResult(GameId),
    #[error("playoff game number {0} is used more than once")]
    DuplicateGameNumber(u32),
    /// A WinnerOf/LoserOf rule points at a game number that is not in the bracket.
    #[error("game {game_number} references unknown game {referenced}")]
    UnknownGameNumber { game_number: u32, referenced: u32 },
    /// The playoff games do not form a DAG.
    #[error("game {0} depends on itself through its slot rules")]
    DependencyCycle(u32),
    #[error("game {game_number} asks for position {position} of group {group}")]
    InvalidGroupPosition {
        game_number: u32,
        group: GroupLetter,
        position: u8,
    },
    /// More than one game flagged as the final (or third-place game).
    #[error("more than one game is flagged as {0:?}")]
    AmbiguousRound(RoundKind),

    #[error("invalid combination key {0:?}")]
    InvalidCombinationKey(String),
    /// A valid key with no table entry.
    #[error("combination table has no entry for {0}")]
    MissingCombination(String),
    #[error("combination {0} appears more than once")]
    DuplicateCombination(String),
    #[error("malformed combination table: {0}")]
    MalformedCombinationTable(String),
    #[error("combination table has {found} entries, expected {expected}")]
    IncompleteCombinationTable { expected: u64, found: u64 },
    /// A ThirdPlaceOf rule names a slot the table does not assign.
    #[error("bracket slot {0:?} is not in the combination table")]
    UnknownBracketSlot(String),
    /// Tournament format and reference table disagree (group letters or qualifier count).
    #[error("tournament format does not match the combination table: {0}")]
    FormatMismatch(String),
}

/// The two fatal kinds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    DataIntegrity,
    Configuration,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        use EngineError::*;
        match self {
            TeamNotInGroup { .. }
            | UnregisteredTeam { .. }
            | DuplicateTeam(_)
            | TeamInSeveralGroups { .. }
            | UnregisteredFixedTeam { .. }
            | UnknownGroup(_)
            | UnknownGame(_)
            | DuplicateOfficialResult(_)
            | DuplicateGameNumber(_)
            | UnknownGameNumber { .. }
            | DependencyCycle(_)
            | InvalidGroupPosition { .. }
            | AmbiguousRound(_) => ErrorKind::DataIntegrity,
            InvalidCombinationKey(_)
            | MissingCombination(_)
            | DuplicateCombination(_)
            | MalformedCombinationTable(_)
            | IncompleteCombinationTable { .. }
            | UnknownBracketSlot(_)
            | FormatMismatch(_) => ErrorKind::Configuration,
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}
