//! Group stage: standings from official results.

use crate::logic::results::ResultIndex;
use crate::models::{
    EngineError, GameResult, Group, GroupGame, GroupLetter, GroupStandings, StandingRow, TeamId,
    TieBreakMode, TournamentSnapshot,
};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

/// A group fixture together with one of its results (official or draft).
#[derive(Clone, Copy, Debug)]
pub struct PlayedGame<'a> {
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub result: &'a GameResult,
}

impl<'a> PlayedGame<'a> {
    pub fn new(game: &GroupGame, result: &'a GameResult) -> Self {
        Self {
            home_team: game.home_team,
            away_team: game.away_team,
            result,
        }
    }
}

/// Rank a group's teams.
///
/// 1. Only official results count; drafts are skipped.
/// 2. Sort by points, goal difference, goals for (descending).
/// 3. In head-to-head mode, teams still level are ordered by a mini-table of
///    the games among them; a smaller group still level on that mini-table is
///    ordered by the games among its own members (two teams: their direct game).
/// 4. Team id breaks whatever is left.
///
/// With no official results at all the rows stay in registration order.
pub fn compute_standings(group: &Group, played: &[PlayedGame<'_>]) -> Result<Vec<StandingRow>, EngineError> {
    for game in played {
        for team in [game.home_team, game.away_team] {
            if !group.contains(team) {
                return Err(EngineError::TeamNotInGroup {
                    group: group.letter,
                    team,
                });
            }
        }
    }

    let mut rows: Vec<StandingRow> = group
        .teams
        .iter()
        .map(|&team| StandingRow::new(team, group.letter))
        .collect();

    let official: Vec<&PlayedGame<'_>> = played.iter().filter(|g| g.result.is_official()).collect();
    for game in &official {
        record_game(&mut rows, game);
    }

    if !official.is_empty() {
        rows.sort_by(|a, b| a.compare_record(b).then_with(|| a.team.cmp(&b.team)));
        if group.tie_break == TieBreakMode::HeadToHead {
            apply_head_to_head(&mut rows, &official);
        }
    }

    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as u32 + 1;
    }
    Ok(rows)
}

/// Every group member is a registered team and belongs to exactly one group.
pub fn check_roster(snapshot: &TournamentSnapshot) -> Result<(), EngineError> {
    let mut registered = HashSet::new();
    for team in &snapshot.teams {
        if !registered.insert(team.id) {
            return Err(EngineError::DuplicateTeam(team.id));
        }
    }

    let mut membership: HashMap<TeamId, GroupLetter> = HashMap::new();
    for group in &snapshot.groups {
        for &team in &group.teams {
            if !registered.contains(&team) {
                return Err(EngineError::UnregisteredTeam {
                    group: group.letter,
                    team,
                });
            }
            if let Some(first) = membership.insert(team, group.letter) {
                return Err(EngineError::TeamInSeveralGroups {
                    team,
                    first,
                    second: group.letter,
                });
            }
        }
    }
    Ok(())
}

/// Standings for every group in the snapshot, with completion counts.
pub fn compute_all_standings(
    snapshot: &TournamentSnapshot,
    results: &ResultIndex<'_>,
) -> Result<BTreeMap<GroupLetter, GroupStandings>, EngineError> {
    check_roster(snapshot)?;

    let mut fixtures: BTreeMap<GroupLetter, Vec<&GroupGame>> =
        snapshot.groups.iter().map(|g| (g.letter, Vec::new())).collect();
    for game in &snapshot.group_games {
        fixtures
            .get_mut(&game.group)
            .ok_or(EngineError::UnknownGroup(game.group))?
            .push(game);
    }

    let mut all = BTreeMap::new();
    for group in &snapshot.groups {
        let games = fixtures.get(&group.letter).map(Vec::as_slice).unwrap_or_default();
        // Membership is structural: checked for every fixture, played or not.
        for game in games {
            for team in [game.home_team, game.away_team] {
                if !group.contains(team) {
                    return Err(EngineError::TeamNotInGroup {
                        group: group.letter,
                        team,
                    });
                }
            }
        }

        let played: Vec<PlayedGame<'_>> = games
            .iter()
            .filter_map(|game| results.official(game.id).map(|r| PlayedGame::new(game, r)))
            .collect();
        let rows = compute_standings(group, &played)?;
        let complete = !games.is_empty()
            && games.len() >= group.round_robin_games()
            && played.len() == games.len();

        all.insert(
            group.letter,
            GroupStandings {
                group: group.letter,
                rows,
                complete,
                official_games: played.len(),
                scheduled_games: games.len(),
            },
        );
    }
    Ok(all)
}

fn record_game(rows: &mut [StandingRow], game: &PlayedGame<'_>) {
    let (home, away) = (game.result.home_score, game.result.away_score);
    if let Some(row) = rows.iter_mut().find(|r| r.team == game.home_team) {
        row.record(home, away);
    }
    if let Some(row) = rows.iter_mut().find(|r| r.team == game.away_team) {
        row.record(away, home);
    }
}

/// Re-order every run of rows level on the main criteria by their mini-table.
fn apply_head_to_head(rows: &mut [StandingRow], official: &[&PlayedGame<'_>]) {
    let mut start = 0;
    while start < rows.len() {
        let mut end = start + 1;
        while end < rows.len() && rows[end].level_with(&rows[start]) {
            end += 1;
        }
        if end - start > 1 {
            order_by_mini_table(&mut rows[start..end], official);
        }
        start = end;
    }
}

fn order_by_mini_table(tied: &mut [StandingRow], official: &[&PlayedGame<'_>]) {
    let mini = mini_table(tied, official);
    for row in tied.iter_mut() {
        row.head_to_head_points = mini.iter().find(|m| m.team == row.team).map_or(0, |m| m.points);
    }
    sort_by_mini_table(tied, official);
}

/// Order by the mini-table of games among `tied`. Teams still level on it are
/// ordered again by the games among themselves alone (for two teams, their
/// direct result), then by team id.
fn sort_by_mini_table(tied: &mut [StandingRow], official: &[&PlayedGame<'_>]) {
    let mini = mini_table(tied, official);
    let mini_of = |team: TeamId| mini.iter().find(|m| m.team == team);
    let by_mini = |a: &StandingRow, b: &StandingRow| match (mini_of(a.team), mini_of(b.team)) {
        (Some(x), Some(y)) => x.compare_record(y),
        _ => Ordering::Equal,
    };
    tied.sort_by(|a, b| by_mini(a, b).then_with(|| a.team.cmp(&b.team)));

    let mut start = 0;
    while start < tied.len() {
        let mut end = start + 1;
        while end < tied.len() && by_mini(&tied[start], &tied[end]) == Ordering::Equal {
            end += 1;
        }
        if end - start > 1 && end - start < tied.len() {
            sort_by_mini_table(&mut tied[start..end], official);
        }
        start = end;
    }
}

fn mini_table(tied: &[StandingRow], official: &[&PlayedGame<'_>]) -> Vec<StandingRow> {
    let mut mini: Vec<StandingRow> = tied.iter().map(|r| StandingRow::new(r.team, r.group)).collect();
    let in_tie = |team: TeamId| tied.iter().any(|r| r.team == team);
    for game in official.iter().filter(|g| in_tie(g.home_team) && in_tie(g.away_team)) {
        record_game(&mut mini, game);
    }
    mini
}
