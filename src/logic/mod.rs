//! Bracket engine logic: standings, qualification, dependency graph, propagation, honor roll.

mod completion;
mod graph;
mod honor_roll;
mod propagation;
mod qualification;
mod results;
mod standings;

pub use completion::{completion_report, CompletionReport};
pub use graph::{PlayoffGraph, ResolutionContext};
pub use honor_roll::{
    decide_knockout, determine_honor_roll, diff_honor_roll, update_honor_roll, HonorRollUpdate,
    KnockoutDecision, UndeterminedReason,
};
pub use propagation::{
    propagate, qualification_for, resolve_bracket, standings_for, PropagationOutcome,
    SlotAssignments,
};
pub use qualification::{resolve_third_places, PendingReason, QualifiedThirdPlaces, Qualification};
pub use results::ResultIndex;
pub use standings::{check_roster, compute_all_standings, compute_standings, PlayedGame};
