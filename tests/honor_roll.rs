//! Integration tests for knockout decisions and the honor roll.

mod common;

use common::{play, play_all_home_wins, settle, table, team, world_cup_snapshot};
use prode_bracket::logic::{diff_honor_roll, CompletionReport};
use prode_bracket::{
    decide_knockout, GameResult, HonorPosition, HonorRoll, KnockoutDecision, UndeterminedReason,
};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

fn game() -> Uuid {
    Uuid::from_u128(1)
}

#[test]
fn knockout_needs_both_teams_and_an_official_result() {
    let (home, away) = (team('A', 1), team('B', 1));
    let played = GameResult::official(game(), 2, 0).for_teams(home, away);

    assert_eq!(
        decide_knockout(Some(home), None, Some(&played)),
        KnockoutDecision::Undetermined {
            reason: UndeterminedReason::ParticipantsUnresolved
        }
    );
    assert_eq!(
        decide_knockout(Some(home), Some(away), None),
        KnockoutDecision::Undetermined {
            reason: UndeterminedReason::NotPlayed
        }
    );
    let draft = GameResult::draft(game(), 2, 0);
    assert_eq!(
        decide_knockout(Some(home), Some(away), Some(&draft)),
        KnockoutDecision::Undetermined {
            reason: UndeterminedReason::NotPlayed
        }
    );

    let decided = decide_knockout(Some(home), Some(away), Some(&played));
    assert_eq!(decided.winner(), Some(home));
    assert_eq!(decided.loser(), Some(away));
}

#[test]
fn level_score_needs_penalties() {
    let (home, away) = (team('A', 1), team('B', 1));
    let level = GameResult::official(game(), 0, 0).for_teams(home, away);
    assert_eq!(
        decide_knockout(Some(home), Some(away), Some(&level)),
        KnockoutDecision::Undetermined {
            reason: UndeterminedReason::DrawWithoutPenalties
        }
    );

    let shoot_out = GameResult::official(game(), 0, 0)
        .with_penalties(4, 5)
        .for_teams(home, away);
    assert_eq!(
        decide_knockout(Some(home), Some(away), Some(&shoot_out)),
        KnockoutDecision::Decided {
            winner: away,
            loser: home
        }
    );

    // a level shoot-out decides nothing
    let still_level = GameResult::official(game(), 1, 1)
        .with_penalties(3, 3)
        .for_teams(home, away);
    assert!(decide_knockout(Some(home), Some(away), Some(&still_level))
        .winner()
        .is_none());
}

#[test]
fn result_entered_for_other_teams_decides_nothing() {
    let (home, away) = (team('A', 1), team('B', 1));
    let earlier = GameResult::official(game(), 3, 0).for_teams(team('C', 1), away);
    assert_eq!(
        decide_knockout(Some(home), Some(away), Some(&earlier)),
        KnockoutDecision::Undetermined {
            reason: UndeterminedReason::UnconfirmedResult
        }
    );

    // swapped sides are a different pairing
    let swapped = GameResult::official(game(), 3, 0).for_teams(away, home);
    assert!(decide_knockout(Some(home), Some(away), Some(&swapped))
        .winner()
        .is_none());

    let unstamped = GameResult::official(game(), 3, 0);
    assert_eq!(
        decide_knockout(Some(home), Some(away), Some(&unstamped)),
        KnockoutDecision::Undetermined {
            reason: UndeterminedReason::UnconfirmedResult
        }
    );
}

#[test]
fn official_results_carry_no_clock() {
    let first = GameResult::official(game(), 1, 0);
    let second = GameResult::official(game(), 1, 0);
    assert_eq!(first, second);
    assert_eq!(first.completed_at, None);

    let kickoff = Utc.with_ymd_and_hms(2026, 7, 19, 19, 0, 0).unwrap();
    let stamped = first.with_completed_at(kickoff);
    assert_eq!(stamped.completed_at, Some(kickoff));
    assert_eq!((stamped.home_score, stamped.away_score), (1, 0));
}

#[test]
fn diff_lists_only_moved_positions() {
    let previous = HonorRoll {
        champion: Some(team('A', 1)),
        runner_up: Some(team('B', 1)),
        third_place: None,
    };
    let current = HonorRoll {
        champion: Some(team('B', 1)),
        runner_up: Some(team('A', 1)),
        third_place: None,
    };
    let changes = diff_honor_roll(&previous, &current);
    let positions: Vec<HonorPosition> = changes.iter().map(|c| c.position).collect();
    assert_eq!(positions, vec![HonorPosition::Champion, HonorPosition::RunnerUp]);
    assert_eq!(changes[0].previous, Some(team('A', 1)));
    assert_eq!(changes[0].current, Some(team('B', 1)));
    assert!(diff_honor_roll(&current, &current).is_empty());
}

#[test]
fn finished_bracket_fills_the_podium() {
    let table = table();
    let mut snapshot = world_cup_snapshot("ABCDEFGH");
    play_all_home_wins(&mut snapshot, &table);

    // 104: W101 (1E's path) v W102 (1C's path); 103: L101 (2K's path) v L102
    assert_eq!(snapshot.honor_roll.champion, Some(team('E', 1)));
    assert_eq!(snapshot.honor_roll.runner_up, Some(team('C', 1)));
    assert_eq!(snapshot.honor_roll.third_place, Some(team('K', 2)));

    let outcome = settle(&mut snapshot, &table);
    assert!(outcome.is_noop());
    assert_eq!(
        outcome.completion,
        CompletionReport {
            groups: outcome.completion.groups.clone(),
            group_stage: 100.0,
            qualification_resolved: true,
            playoffs: 100.0,
        }
    );
}

#[test]
fn drawn_final_waits_for_penalties() {
    let table = table();
    let mut snapshot = world_cup_snapshot("ABCDEFGH");
    play_all_home_wins(&mut snapshot, &table);

    play(&mut snapshot, 104, |id| GameResult::official(id, 0, 0));
    let outcome = settle(&mut snapshot, &table);
    assert_eq!(
        outcome.honor_roll.final_decision,
        KnockoutDecision::Undetermined {
            reason: UndeterminedReason::DrawWithoutPenalties
        }
    );
    assert_eq!(snapshot.honor_roll.champion, None);
    assert_eq!(snapshot.honor_roll.runner_up, None);
    // third place is decided separately
    assert_eq!(snapshot.honor_roll.third_place, Some(team('K', 2)));
    assert_eq!(outcome.honor_roll.changes.len(), 2);
    assert!(outcome.changes.is_empty());

    play(&mut snapshot, 104, |id| GameResult::official(id, 0, 0).with_penalties(3, 4));
    settle(&mut snapshot, &table);
    assert_eq!(snapshot.honor_roll.champion, Some(team('C', 1)));
    assert_eq!(snapshot.honor_roll.runner_up, Some(team('E', 1)));
}

#[test]
fn draft_final_does_not_crown_anyone() {
    let table = table();
    let mut snapshot = world_cup_snapshot("ABCDEFGH");
    play_all_home_wins(&mut snapshot, &table);

    play(&mut snapshot, 104, |id| GameResult::draft(id, 3, 0));
    let outcome = settle(&mut snapshot, &table);
    assert_eq!(
        outcome.honor_roll.final_decision,
        KnockoutDecision::Undetermined {
            reason: UndeterminedReason::NotPlayed
        }
    );
    assert_eq!(snapshot.honor_roll.champion, None);
}

#[test]
fn bracket_without_final_has_no_podium() {
    let table = table();
    let mut snapshot = world_cup_snapshot("ABCDEFGH");
    snapshot.playoff_games.retain(|g| g.game_number < 103);
    let outcome = settle(&mut snapshot, &table);
    assert_eq!(
        outcome.honor_roll.final_decision,
        KnockoutDecision::Undetermined {
            reason: UndeterminedReason::NoGame
        }
    );
    assert_eq!(snapshot.honor_roll, HonorRoll::default());
}
