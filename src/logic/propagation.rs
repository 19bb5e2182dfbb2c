//! Bracket propagation: standings -> qualifiers -> slot resolution -> diff against the snapshot.

use crate::logic::completion::{completion_report, CompletionReport};
use crate::logic::graph::{PlayoffGraph, ResolutionContext};
use crate::logic::honor_roll::{
    decide_knockout, update_honor_roll, HonorRollUpdate, KnockoutDecision, UndeterminedReason,
};
use crate::logic::qualification::{resolve_third_places, Qualification};
use crate::logic::results::ResultIndex;
use crate::logic::standings::compute_all_standings;
use crate::models::{
    EngineError, GameState, GameStateChange, GroupLetter, GroupStandings, RoundKind, Slot,
    SlotChange, TeamId, TournamentSnapshot,
};
use crate::reference::CombinationTable;
use serde::Serialize;
use std::collections::BTreeMap;

/// Resolved teams keyed by (game number, slot).
pub type SlotAssignments = BTreeMap<(u32, Slot), TeamId>;

/// Everything one pass produces. Nothing here has been persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PropagationOutcome {
    /// Slots to persist, in round order, then game number, home before away.
    pub changes: Vec<SlotChange>,
    pub state_changes: Vec<GameStateChange>,
    pub honor_roll: HonorRollUpdate,
    pub qualification: Qualification,
    pub standings: BTreeMap<GroupLetter, GroupStandings>,
    pub completion: CompletionReport,
    /// Fixed-point passes over the bracket.
    pub passes: usize,
}

impl PropagationOutcome {
    pub fn retractions(&self) -> impl Iterator<Item = &SlotChange> {
        self.changes.iter().filter(|c| c.is_retraction())
    }

    /// Nothing to persist and nothing to notify.
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty() && self.state_changes.is_empty() && self.honor_roll.changes.is_empty()
    }
}

/// Run a full pass over a consistent snapshot.
///
/// Any data-integrity or configuration error aborts the whole pass; "not yet
/// resolvable" slots simply stay empty. Running it again on a snapshot with the
/// returned changes applied yields no changes.
pub fn propagate(snapshot: &TournamentSnapshot, table: &CombinationTable) -> Result<PropagationOutcome, EngineError> {
    let results = ResultIndex::build(snapshot)?;
    let standings = compute_all_standings(snapshot, &results)?;
    let qualification = resolve_third_places(&standings, &snapshot.format, table)?;
    let graph = PlayoffGraph::build(&snapshot.playoff_games)?;
    graph.validate_rules(&snapshot.groups, &snapshot.teams, table)?;

    let ctx = ResolutionContext {
        results: &results,
        standings: &standings,
        qualification: &qualification,
    };
    let (assigned, passes) = resolve_bracket(&graph, &ctx);

    let mut changes = Vec::new();
    let mut state_changes = Vec::new();
    let mut states = Vec::with_capacity(graph.len());
    for game in graph.in_round_order() {
        let number = game.game_number;
        for slot in Slot::BOTH {
            let current = assigned.get(&(number, slot)).copied();
            if let Some(change) = SlotChange::between(number, slot, game.team(slot), current) {
                if change.is_retraction() {
                    log::info!(
                        "Retracting game {} {:?} slot: {:?} -> {:?}",
                        number,
                        slot,
                        change.kind,
                        change.team
                    );
                }
                changes.push(change);
            }
        }

        let official = results.official(game.id);
        let from = GameState::of(game.home_team, game.away_team, official);
        let to = GameState::of(
            assigned.get(&(number, Slot::Home)).copied(),
            assigned.get(&(number, Slot::Away)).copied(),
            official,
        );
        if from != to {
            let change = GameStateChange {
                game_number: number,
                from,
                to,
            };
            if change.is_regression() {
                log::warn!("Game {} moves back from {:?} to {:?}", number, from, to);
            }
            state_changes.push(change);
        }
        states.push(to);
    }

    let final_decision = decide_round(&graph, RoundKind::Final, &assigned, &results)?;
    let third_place_decision = decide_round(&graph, RoundKind::ThirdPlace, &assigned, &results)?;
    let honor_roll = update_honor_roll(&snapshot.honor_roll, final_decision, third_place_decision);
    let completion = completion_report(&standings, &qualification, &states);

    Ok(PropagationOutcome {
        changes,
        state_changes,
        honor_roll,
        qualification,
        standings,
        completion,
        passes,
    })
}

/// Fill every slot that can be filled, repeating passes in round order until
/// one pass adds nothing. Returns the assignments and the number of passes.
pub fn resolve_bracket(graph: &PlayoffGraph<'_>, ctx: &ResolutionContext<'_>) -> (SlotAssignments, usize) {
    let order = graph.in_round_order();
    let mut assigned = SlotAssignments::new();
    let mut passes = 0;
    loop {
        passes += 1;
        let mut progressed = false;
        for game in &order {
            for slot in Slot::BOTH {
                let key = (game.game_number, slot);
                if assigned.contains_key(&key) {
                    continue;
                }
                let team = graph.evaluate_rule(game.rule(slot), ctx, |n, s| assigned.get(&(n, s)).copied());
                if let Some(team) = team {
                    assigned.insert(key, team);
                    progressed = true;
                }
            }
        }
        if !progressed {
            break;
        }
    }
    log::debug!(
        "Bracket converged after {} pass(es): {} slot(s) resolved",
        passes,
        assigned.len()
    );
    (assigned, passes)
}

/// Standings for every group of the snapshot.
pub fn standings_for(snapshot: &TournamentSnapshot) -> Result<BTreeMap<GroupLetter, GroupStandings>, EngineError> {
    let results = ResultIndex::build(snapshot)?;
    compute_all_standings(snapshot, &results)
}

/// Third-place qualification for the snapshot.
pub fn qualification_for(snapshot: &TournamentSnapshot, table: &CombinationTable) -> Result<Qualification, EngineError> {
    let standings = standings_for(snapshot)?;
    resolve_third_places(&standings, &snapshot.format, table)
}

fn decide_round(
    graph: &PlayoffGraph<'_>,
    kind: RoundKind,
    assigned: &SlotAssignments,
    results: &ResultIndex<'_>,
) -> Result<KnockoutDecision, EngineError> {
    let Some(game) = graph.single_game_of_kind(kind)? else {
        return Ok(KnockoutDecision::Undetermined {
            reason: UndeterminedReason::NoGame,
        });
    };
    Ok(decide_knockout(
        assigned.get(&(game.game_number, Slot::Home)).copied(),
        assigned.get(&(game.game_number, Slot::Away)).copied(),
        results.official(game.id),
    ))
}
