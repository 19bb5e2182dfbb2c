//! 2026 knockout layout: 48 teams, 12 groups, 8 best third-placed teams, round of 32.

use crate::models::{PlayoffGame, Round, RoundKind, TeamSlotRule, TournamentFormat};

pub fn format() -> TournamentFormat {
    TournamentFormat::default()
}

fn position(position: u8, group: char) -> TeamSlotRule {
    TeamSlotRule::GroupPosition { group, position }
}

fn third(slot: &str) -> TeamSlotRule {
    TeamSlotRule::ThirdPlaceOf { slot: slot.to_string() }
}

fn winner(game: u32) -> TeamSlotRule {
    TeamSlotRule::WinnerOf { game }
}

fn loser(game: u32) -> TeamSlotRule {
    TeamSlotRule::LoserOf { game }
}

/// Games 73 to 104 with their slot rules. Teams start unresolved.
pub fn playoff_games() -> Vec<PlayoffGame> {
    let r32 = || Round::knockout("Round of 32", 1);
    let r16 = || Round::knockout("Round of 16", 2);
    let qf = || Round::knockout("Quarter-finals", 3);
    let sf = || Round::knockout("Semi-finals", 4);

    vec![
        PlayoffGame::new(73, r32(), position(2, 'A'), position(2, 'B')),
        PlayoffGame::new(74, r32(), position(1, 'E'), third("ABCDF")),
        PlayoffGame::new(75, r32(), position(1, 'F'), position(2, 'C')),
        PlayoffGame::new(76, r32(), position(1, 'C'), position(2, 'F')),
        PlayoffGame::new(77, r32(), position(1, 'I'), third("CDFGH")),
        PlayoffGame::new(78, r32(), position(2, 'E'), position(2, 'I')),
        PlayoffGame::new(79, r32(), position(1, 'A'), third("CEFHI")),
        PlayoffGame::new(80, r32(), position(1, 'L'), third("EHIJK")),
        PlayoffGame::new(81, r32(), position(1, 'D'), third("BEFIJ")),
        PlayoffGame::new(82, r32(), position(1, 'G'), third("AEHIJ")),
        PlayoffGame::new(83, r32(), position(2, 'K'), position(2, 'L')),
        PlayoffGame::new(84, r32(), position(1, 'H'), position(2, 'J')),
        PlayoffGame::new(85, r32(), position(1, 'B'), third("EFGIJ")),
        PlayoffGame::new(86, r32(), position(1, 'J'), position(2, 'H')),
        PlayoffGame::new(87, r32(), position(1, 'K'), third("DEIJL")),
        PlayoffGame::new(88, r32(), position(2, 'D'), position(2, 'G')),
        PlayoffGame::new(89, r16(), winner(74), winner(77)),
        PlayoffGame::new(90, r16(), winner(73), winner(75)),
        PlayoffGame::new(91, r16(), winner(76), winner(78)),
        PlayoffGame::new(92, r16(), winner(79), winner(80)),
        PlayoffGame::new(93, r16(), winner(83), winner(84)),
        PlayoffGame::new(94, r16(), winner(81), winner(82)),
        PlayoffGame::new(95, r16(), winner(86), winner(88)),
        PlayoffGame::new(96, r16(), winner(85), winner(87)),
        PlayoffGame::new(97, qf(), winner(89), winner(90)),
        PlayoffGame::new(98, qf(), winner(93), winner(94)),
        PlayoffGame::new(99, qf(), winner(91), winner(92)),
        PlayoffGame::new(100, qf(), winner(95), winner(96)),
        PlayoffGame::new(101, sf(), winner(97), winner(98)),
        PlayoffGame::new(102, sf(), winner(99), winner(100)),
        PlayoffGame::new(103, Round::new("Third place", 5, RoundKind::ThirdPlace), loser(101), loser(102)),
        PlayoffGame::new(104, Round::new("Final", 6, RoundKind::Final), winner(101), winner(102)),
    ]
}
