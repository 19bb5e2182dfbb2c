//! Honor roll: champion and runner-up from the final, third place from the third-place game.

use crate::models::{GameResult, HonorRoll, HonorRollChange, Slot, TeamId};
use serde::{Deserialize, Serialize};

/// Why a knockout game does not (yet) name a winner.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndeterminedReason {
    /// The bracket has no game of this kind.
    NoGame,
    /// One or both participants are not resolved.
    ParticipantsUnresolved,
    /// No official result (a draft does not count).
    NotPlayed,
    /// The official result was not entered for the teams now in the slots.
    UnconfirmedResult,
    /// Level score with no decisive shoot-out recorded.
    DrawWithoutPenalties,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum KnockoutDecision {
    Decided { winner: TeamId, loser: TeamId },
    Undetermined { reason: UndeterminedReason },
}

impl KnockoutDecision {
    fn undetermined(reason: UndeterminedReason) -> Self {
        KnockoutDecision::Undetermined { reason }
    }

    pub fn winner(&self) -> Option<TeamId> {
        match self {
            KnockoutDecision::Decided { winner, .. } => Some(*winner),
            KnockoutDecision::Undetermined { .. } => None,
        }
    }

    pub fn loser(&self) -> Option<TeamId> {
        match self {
            KnockoutDecision::Decided { loser, .. } => Some(*loser),
            KnockoutDecision::Undetermined { .. } => None,
        }
    }
}

/// Recomputed honor roll plus what moved relative to the stored one.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HonorRollUpdate {
    pub honor_roll: HonorRoll,
    pub final_decision: KnockoutDecision,
    pub third_place_decision: KnockoutDecision,
    pub changes: Vec<HonorRollChange>,
}

/// Decide a knockout game. Both teams must be resolved and the result official
/// and entered for them; a level score needs a non-level shoot-out. Never guesses.
pub fn decide_knockout(
    home: Option<TeamId>,
    away: Option<TeamId>,
    result: Option<&GameResult>,
) -> KnockoutDecision {
    let (Some(home), Some(away)) = (home, away) else {
        return KnockoutDecision::undetermined(UndeterminedReason::ParticipantsUnresolved);
    };
    let Some(result) = result.filter(|r| r.is_official()) else {
        return KnockoutDecision::undetermined(UndeterminedReason::NotPlayed);
    };
    if !result.recorded_for(home, away) {
        return KnockoutDecision::undetermined(UndeterminedReason::UnconfirmedResult);
    }
    match result.winning_side() {
        Some(Slot::Home) => KnockoutDecision::Decided {
            winner: home,
            loser: away,
        },
        Some(Slot::Away) => KnockoutDecision::Decided {
            winner: away,
            loser: home,
        },
        None => KnockoutDecision::undetermined(UndeterminedReason::DrawWithoutPenalties),
    }
}

/// Champion/runner-up from the final, third place from the third-place game.
pub fn determine_honor_roll(final_decision: &KnockoutDecision, third_place_decision: &KnockoutDecision) -> HonorRoll {
    HonorRoll {
        champion: final_decision.winner(),
        runner_up: final_decision.loser(),
        third_place: third_place_decision.winner(),
    }
}

/// Positions whose team differs between the stored and recomputed honor roll.
pub fn diff_honor_roll(previous: &HonorRoll, current: &HonorRoll) -> Vec<HonorRollChange> {
    HonorRoll::POSITIONS
        .iter()
        .filter(|&&position| previous.get(position) != current.get(position))
        .map(|&position| HonorRollChange {
            position,
            previous: previous.get(position),
            current: current.get(position),
        })
        .collect()
}

/// Full honor roll update from the two deciding games.
pub fn update_honor_roll(
    previous: &HonorRoll,
    final_decision: KnockoutDecision,
    third_place_decision: KnockoutDecision,
) -> HonorRollUpdate {
    let honor_roll = determine_honor_roll(&final_decision, &third_place_decision);
    let changes = diff_honor_roll(previous, &honor_roll);
    for change in &changes {
        log::info!(
            "Honor roll {:?}: {:?} -> {:?}",
            change.position,
            change.previous,
            change.current
        );
    }
    HonorRollUpdate {
        honor_roll,
        final_decision,
        third_place_decision,
        changes,
    }
}
