//! Shared fixtures: a 12-group tournament with deterministic team ids.
#![allow(dead_code)]

use prode_bracket::reference::world_cup_2026;
use prode_bracket::{
    propagate, CombinationTable, GameResult, Group, GroupGame, PropagationOutcome, Team, TeamId,
    TieBreakMode, TournamentSnapshot,
};
use uuid::Uuid;

pub const GROUPS: &str = "ABCDEFGHIJKL";

/// Team planned to finish at `position` (1..=4) of `group`. Ids sort by group, then position.
pub fn team(group: char, position: u8) -> TeamId {
    let index = group as u128 - 'A' as u128 + 1;
    Uuid::from_u128(index * 100 + position as u128)
}

pub fn table() -> CombinationTable {
    CombinationTable::world_cup_2026().expect("embedded table loads")
}

/// Add a group whose six fixtures are all played: position n finishes n-th.
/// Third place beats fourth by `third_margin` goals, which sets the third-place record.
pub fn add_complete_group(snapshot: &mut TournamentSnapshot, letter: char, third_margin: u32) {
    let ids: Vec<TeamId> = (1..=4).map(|p| team(letter, p)).collect();
    for (position, &id) in ids.iter().enumerate() {
        let code = format!("{letter}{}", position + 1);
        snapshot.teams.push(Team::with_id(id, format!("Team {code}"), code));
    }
    snapshot
        .groups
        .push(Group::new(letter, ids.clone(), TieBreakMode::HeadToHead));

    let base = (letter as u32 - 'A' as u32) * 6 + 1;
    let fixtures = [
        (0, 1, 1, 0),
        (0, 2, 1, 0),
        (0, 3, 1, 0),
        (1, 2, 1, 0),
        (1, 3, 1, 0),
        (2, 3, third_margin, 0),
    ];
    for (i, (home, away, home_score, away_score)) in fixtures.into_iter().enumerate() {
        let game = GroupGame::new(base + i as u32, letter, ids[home], ids[away]);
        snapshot
            .results
            .push(GameResult::official(game.id, home_score, away_score));
        snapshot.group_games.push(game);
    }
}

/// All 12 groups complete. Groups listed in `qualifying` get the stronger third place.
pub fn world_cup_snapshot(qualifying: &str) -> TournamentSnapshot {
    let mut snapshot = TournamentSnapshot::new(world_cup_2026::format(), Vec::new());
    for letter in GROUPS.chars() {
        let margin = if qualifying.contains(letter) { 3 } else { 1 };
        add_complete_group(&mut snapshot, letter, margin);
    }
    snapshot.playoff_games = world_cup_2026::playoff_games();
    snapshot
}

/// Record a result for a playoff game, replacing any earlier one. The result is
/// stamped with the teams currently persisted in the game's slots.
pub fn play(snapshot: &mut TournamentSnapshot, game_number: u32, result: impl FnOnce(Uuid) -> GameResult) {
    let id = snapshot
        .playoff_game(game_number)
        .expect("game exists")
        .id;
    snapshot.record_result(result(id));
}

/// Propagate and persist the outcome into the snapshot.
pub fn settle(snapshot: &mut TournamentSnapshot, table: &CombinationTable) -> PropagationOutcome {
    let outcome = propagate(snapshot, table).expect("propagation succeeds");
    snapshot.apply_slot_changes(&outcome.changes);
    snapshot.apply_honor_roll(&outcome.honor_roll.honor_roll);
    outcome
}

/// Play the whole knockout stage with every home side winning 1-0.
pub fn play_all_home_wins(snapshot: &mut TournamentSnapshot, table: &CombinationTable) {
    settle(snapshot, table);
    for order in 1..=6 {
        let numbers: Vec<u32> = snapshot
            .playoff_games
            .iter()
            .filter(|g| g.round.order == order)
            .map(|g| g.game_number)
            .collect();
        for number in numbers {
            play(snapshot, number, |id| GameResult::official(id, 1, 0));
        }
        settle(snapshot, table);
    }
}
