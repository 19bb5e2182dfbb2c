//! Integration tests for group standings: ordering, tie-breaks and result filtering.

use prode_bracket::{
    compute_standings, standings_for, EngineError, ErrorKind, GameResult, Group, GroupGame,
    PlayedGame, StandingRow, Team, TeamId, TieBreakMode, TournamentFormat, TournamentSnapshot,
};
use uuid::Uuid;

fn id(n: u128) -> TeamId {
    Uuid::from_u128(n)
}

/// (home, away, home score, away score)
type Fixture = (TeamId, TeamId, u32, u32);

fn games_and_results(letter: char, fixtures: &[Fixture]) -> (Vec<GroupGame>, Vec<GameResult>) {
    fixtures
        .iter()
        .enumerate()
        .map(|(i, &(home, away, h, a))| {
            let game = GroupGame::new(i as u32 + 1, letter, home, away);
            let result = GameResult::official(game.id, h, a);
            (game, result)
        })
        .unzip()
}

fn rows_for(group: &Group, fixtures: &[Fixture]) -> Vec<StandingRow> {
    let (games, results) = games_and_results(group.letter, fixtures);
    let played: Vec<PlayedGame> = games
        .iter()
        .zip(&results)
        .map(|(g, r)| PlayedGame::new(g, r))
        .collect();
    compute_standings(group, &played).unwrap()
}

fn order(rows: &[StandingRow]) -> Vec<TeamId> {
    rows.iter().map(|r| r.team).collect()
}

fn snapshot_with(groups: Vec<Group>) -> TournamentSnapshot {
    let mut snapshot = TournamentSnapshot::new(TournamentFormat::default(), groups);
    let members: Vec<TeamId> = snapshot.groups.iter().flat_map(|g| g.teams.clone()).collect();
    for team in members {
        if !snapshot.teams.iter().any(|t| t.id == team) {
            snapshot.teams.push(Team::with_id(team, team.to_string(), "XXX"));
        }
    }
    snapshot
}

// X, Y and Z finish level on 4 points, goal difference 0 and 3 goals scored; W
// also has 4 points but only 1 goal. Among themselves X has 4 points, Y 3 and
// Z 1. By id alone the order would be Z, Y, X.
fn three_way_tie() -> (Vec<TeamId>, Vec<Fixture>) {
    let (x, y, z, w) = (id(3), id(2), id(1), id(4));
    let fixtures = vec![
        (x, y, 2, 1),
        (x, z, 1, 1),
        (x, w, 0, 1),
        (y, z, 2, 1),
        (y, w, 0, 0),
        (z, w, 1, 0),
    ];
    (vec![x, y, z, w], fixtures)
}

#[test]
fn head_to_head_orders_three_level_teams() {
    let (teams, fixtures) = three_way_tie();
    let group = Group::new('A', teams, TieBreakMode::HeadToHead);
    let rows = rows_for(&group, &fixtures);

    assert_eq!(order(&rows), vec![id(3), id(2), id(1), id(4)]);
    for row in &rows[..3] {
        assert_eq!(row.points, 4);
        assert_eq!(row.goal_difference, 0);
        assert_eq!(row.goals_for, 3);
    }
    assert_eq!(rows[0].head_to_head_points, 4);
    assert_eq!(rows[1].head_to_head_points, 3);
    assert_eq!(rows[2].head_to_head_points, 1);
    assert_eq!(rows[3].goals_for, 1);
    let ranks: Vec<u32> = rows.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
}

#[test]
fn goal_difference_only_falls_back_to_team_id() {
    let (teams, fixtures) = three_way_tie();
    let group = Group::new('A', teams, TieBreakMode::GoalDifferenceOnly);
    let rows = rows_for(&group, &fixtures);
    assert_eq!(order(&rows), vec![id(1), id(2), id(3), id(4)]);
}

#[test]
fn head_to_head_between_two_level_teams() {
    // A and B both finish on 6 points, +2, 3 goals; B won the direct game.
    let (a, b, c, d) = (id(10), id(20), id(30), id(40));
    let fixtures = vec![
        (a, b, 0, 1),
        (a, c, 2, 0),
        (a, d, 1, 0),
        (b, c, 2, 0),
        (b, d, 0, 1),
        (c, d, 0, 1),
    ];
    let group = Group::new('B', vec![a, b, c, d], TieBreakMode::HeadToHead);
    let rows = rows_for(&group, &fixtures);
    assert_eq!(order(&rows), vec![b, a, d, c]);
    assert_eq!(rows[0].head_to_head_points, 3);
    assert_eq!(rows[1].head_to_head_points, 0);
    // D is also on 6 points but a worse goal difference
    assert_eq!(rows[2].points, 6);
    assert_eq!(rows[2].goal_difference, 1);

    let plain = Group::new('B', vec![a, b, c, d], TieBreakMode::GoalDifferenceOnly);
    assert_eq!(order(&rows_for(&plain, &fixtures)), vec![a, b, d, c]);
}

#[test]
fn standings_do_not_depend_on_result_order() {
    let (teams, fixtures) = three_way_tie();
    let group = Group::new('A', teams, TieBreakMode::HeadToHead);
    let forward = rows_for(&group, &fixtures);

    let mut reversed_fixtures = fixtures.clone();
    reversed_fixtures.reverse();
    let reversed = rows_for(&group, &reversed_fixtures);
    assert_eq!(forward, reversed);
}

#[test]
fn draft_results_are_ignored() {
    let (a, b) = (id(1), id(2));
    let group = Group::new('C', vec![a, b], TieBreakMode::HeadToHead);
    let game = GroupGame::new(1, 'C', a, b);
    let draft = GameResult::draft(game.id, 0, 3);

    let rows = compute_standings(&group, &[PlayedGame::new(&game, &draft)]).unwrap();
    assert!(rows.iter().all(|r| r.played == 0 && r.points == 0));
    // nothing official: registration order
    assert_eq!(order(&rows), vec![a, b]);
}

#[test]
fn zero_results_keep_registration_order() {
    let teams = vec![id(9), id(3), id(7), id(1)];
    let group = Group::new('D', teams.clone(), TieBreakMode::HeadToHead);
    let rows = compute_standings(&group, &[]).unwrap();
    assert_eq!(order(&rows), teams);
    let ranks: Vec<u32> = rows.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
}

#[test]
fn points_and_goals_are_accumulated() {
    let (a, b, c) = (id(1), id(2), id(3));
    let group = Group::new('E', vec![a, b, c], TieBreakMode::HeadToHead);
    let rows = rows_for(&group, &[(a, b, 3, 1), (b, c, 2, 2), (c, a, 0, 0)]);

    let row_a = rows.iter().find(|r| r.team == a).unwrap();
    assert_eq!((row_a.played, row_a.wins, row_a.draws, row_a.losses), (2, 1, 1, 0));
    assert_eq!((row_a.goals_for, row_a.goals_against, row_a.goal_difference), (3, 1, 2));
    assert_eq!(row_a.points, 4);

    let row_b = rows.iter().find(|r| r.team == b).unwrap();
    assert_eq!((row_b.goals_for, row_b.goals_against, row_b.goal_difference), (3, 5, -2));
    assert_eq!(row_b.points, 1);
    assert_eq!(order(&rows), vec![a, c, b]);
}

#[test]
fn team_outside_the_group_is_rejected() {
    let (a, b, outsider) = (id(1), id(2), id(99));
    let group = Group::new('F', vec![a, b], TieBreakMode::HeadToHead);
    let game = GroupGame::new(1, 'F', a, outsider);
    let result = GameResult::official(game.id, 1, 0);

    let err = compute_standings(&group, &[PlayedGame::new(&game, &result)]).unwrap_err();
    assert_eq!(err, EngineError::TeamNotInGroup { group: 'F', team: outsider });
    assert_eq!(err.kind(), ErrorKind::DataIntegrity);
}

#[test]
fn snapshot_standings_report_completeness() {
    let (a, b, c) = (id(1), id(2), id(3));
    let mut snapshot =
        snapshot_with(vec![Group::new('G', vec![a, b, c], TieBreakMode::HeadToHead)]);
    let fixtures = [(a, b), (a, c), (b, c)];
    for (i, (home, away)) in fixtures.into_iter().enumerate() {
        snapshot.group_games.push(GroupGame::new(i as u32 + 1, 'G', home, away));
    }
    let first = snapshot.group_games[0].id;
    let second = snapshot.group_games[1].id;
    let third = snapshot.group_games[2].id;
    snapshot.results.push(GameResult::official(first, 1, 0));
    snapshot.results.push(GameResult::official(second, 2, 0));
    snapshot.results.push(GameResult::draft(third, 1, 1));

    let all = standings_for(&snapshot).unwrap();
    let g = &all[&'G'];
    assert!(!g.complete);
    assert_eq!((g.official_games, g.scheduled_games), (2, 3));
    assert_eq!(g.at_position(1).unwrap().team, a);

    snapshot.record_result(GameResult::official(third, 1, 1));
    assert!(standings_for(&snapshot).unwrap()[&'G'].complete);
}

#[test]
fn fixture_with_outsider_is_rejected_even_unplayed() {
    let (a, b) = (id(1), id(2));
    let mut snapshot =
        snapshot_with(vec![Group::new('H', vec![a, b], TieBreakMode::HeadToHead)]);
    snapshot.group_games.push(GroupGame::new(1, 'H', a, id(77)));
    assert!(matches!(
        standings_for(&snapshot),
        Err(EngineError::TeamNotInGroup { group: 'H', .. })
    ));
}

#[test]
fn fixture_in_unknown_group_is_rejected() {
    let mut snapshot = TournamentSnapshot::new(TournamentFormat::default(), Vec::new());
    snapshot.group_games.push(GroupGame::new(1, 'Z', id(1), id(2)));
    assert_eq!(standings_for(&snapshot), Err(EngineError::UnknownGroup('Z')));
}

#[test]
fn direct_result_settles_a_pair_left_level_by_the_mini_table() {
    // P, Q and R finish on 6 points, +1, 4 goals. Among the three, R leads on
    // goals scored; P and Q stay level and P won their game. Q has the lower id.
    let (p, q, r, s) = (id(20), id(10), id(30), id(40));
    let fixtures = vec![
        (p, q, 1, 0),
        (r, p, 2, 1),
        (q, r, 2, 1),
        (p, s, 2, 1),
        (q, s, 2, 1),
        (r, s, 1, 0),
    ];
    let group = Group::new('I', vec![p, q, r, s], TieBreakMode::HeadToHead);
    let rows = rows_for(&group, &fixtures);
    for row in &rows[..3] {
        assert_eq!((row.points, row.goal_difference, row.goals_for), (6, 1, 4));
        assert_eq!(row.head_to_head_points, 3);
    }
    assert_eq!(order(&rows), vec![r, p, q, s]);
}

#[test]
fn extreme_scores_saturate() {
    let (a, b) = (id(1), id(2));
    let group = Group::new('J', vec![a, b], TieBreakMode::HeadToHead);
    let rows = rows_for(&group, &[(a, b, u32::MAX, 0), (b, a, 0, u32::MAX)]);
    let top = &rows[0];
    assert_eq!(top.team, a);
    assert_eq!(top.goals_for, u32::MAX);
    assert_eq!(top.goal_difference, i32::MAX);
    assert_eq!(rows[1].goal_difference, i32::MIN);
}

#[test]
fn group_member_must_be_registered() {
    let (a, b) = (id(1), id(2));
    let mut snapshot =
        snapshot_with(vec![Group::new('K', vec![a, b], TieBreakMode::HeadToHead)]);
    snapshot.teams.retain(|t| t.id != b);
    let err = standings_for(&snapshot).unwrap_err();
    assert_eq!(err, EngineError::UnregisteredTeam { group: 'K', team: b });
    assert_eq!(err.kind(), ErrorKind::DataIntegrity);
}

#[test]
fn team_cannot_play_in_two_groups() {
    let (a, b, c) = (id(1), id(2), id(3));
    let snapshot = snapshot_with(vec![
        Group::new('A', vec![a, b], TieBreakMode::HeadToHead),
        Group::new('B', vec![c, a], TieBreakMode::HeadToHead),
    ]);
    assert_eq!(
        standings_for(&snapshot),
        Err(EngineError::TeamInSeveralGroups {
            team: a,
            first: 'A',
            second: 'B'
        })
    );
}

#[test]
fn team_registered_twice_is_rejected() {
    let fresh = Team::new("Uruguay", "URU");
    let mut snapshot =
        snapshot_with(vec![Group::new('C', vec![fresh.id], TieBreakMode::HeadToHead)]);
    snapshot.teams = vec![fresh.clone(), fresh.clone()];
    assert_eq!(standings_for(&snapshot), Err(EngineError::DuplicateTeam(fresh.id)));

    snapshot.teams = vec![fresh];
    assert!(standings_for(&snapshot).is_ok());
}
