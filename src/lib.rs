//! Prode bracket engine: group standings, third-place qualification and playoff propagation.
//!
//! The engine is stateless: every call takes a full [`TournamentSnapshot`] and
//! returns what changed. Persistence, scoring and notifications are the caller's.

pub mod logic;
pub mod models;
pub mod reference;

pub use logic::{
    check_roster, compute_all_standings, compute_standings, decide_knockout, propagate,
    qualification_for, resolve_third_places, standings_for, HonorRollUpdate, KnockoutDecision,
    PendingReason, PlayedGame, PlayoffGraph, PropagationOutcome, QualifiedThirdPlaces,
    Qualification, ResolutionContext, ResultIndex, UndeterminedReason,
};
pub use models::{
    CombinationRule, CutoffTiePolicy, EngineError, ErrorKind, GameId, GameResult, GameState,
    GameStateChange, Group, GroupGame, GroupLetter, GroupStandings, HonorPosition, HonorRoll,
    HonorRollChange, PlayoffGame, Round, RoundKind, Slot, SlotChange, SlotChangeKind, StandingRow,
    Team, TeamId, TeamSlotRule, TieBreakMode, TournamentFormat, TournamentId, TournamentSnapshot,
};
pub use reference::CombinationTable;
