//! Playoff dependency graph: games keyed by number, slots defined by rules.

use crate::logic::qualification::Qualification;
use crate::logic::results::ResultIndex;
use crate::models::{
    EngineError, Group, GroupLetter, GroupStandings, PlayoffGame, RoundKind, Slot, Team, TeamId,
    TeamSlotRule,
};
use crate::reference::CombinationTable;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// What a rule is evaluated against. Built once per pass from the snapshot.
#[derive(Clone, Copy, Debug)]
pub struct ResolutionContext<'a> {
    pub results: &'a ResultIndex<'a>,
    pub standings: &'a BTreeMap<GroupLetter, GroupStandings>,
    pub qualification: &'a Qualification,
}

/// Index from game number to game, plus the reverse (dependents) index.
#[derive(Debug)]
pub struct PlayoffGraph<'a> {
    games: BTreeMap<u32, &'a PlayoffGame>,
    dependents: BTreeMap<u32, Vec<u32>>,
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Visiting,
    Done,
}

impl<'a> PlayoffGraph<'a> {
    /// Index the games. Duplicate numbers, references to unknown games and
    /// cycles are data-integrity errors.
    pub fn build(games: &'a [PlayoffGame]) -> Result<Self, EngineError> {
        let mut by_number = BTreeMap::new();
        for game in games {
            if by_number.insert(game.game_number, game).is_some() {
                return Err(EngineError::DuplicateGameNumber(game.game_number));
            }
        }

        let mut dependents: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        for game in games {
            for slot in Slot::BOTH {
                let Some(referenced) = game.rule(slot).referenced_game() else {
                    continue;
                };
                if !by_number.contains_key(&referenced) {
                    return Err(EngineError::UnknownGameNumber {
                        game_number: game.game_number,
                        referenced,
                    });
                }
                let list = dependents.entry(referenced).or_default();
                if !list.contains(&game.game_number) {
                    list.push(game.game_number);
                }
            }
        }
        for list in dependents.values_mut() {
            list.sort_unstable();
        }

        let graph = Self {
            games: by_number,
            dependents,
        };
        graph.check_acyclic()?;
        Ok(graph)
    }

    /// Check rules that need tournament context: fixed teams, group positions
    /// and third-place slot labels.
    pub fn validate_rules(&self, groups: &[Group], teams: &[Team], table: &CombinationTable) -> Result<(), EngineError> {
        for game in self.games.values() {
            for slot in Slot::BOTH {
                match game.rule(slot) {
                    TeamSlotRule::Fixed { team } if !teams.iter().any(|t| t.id == *team) => {
                        return Err(EngineError::UnregisteredFixedTeam {
                            game_number: game.game_number,
                            team: *team,
                        });
                    }
                    TeamSlotRule::GroupPosition { group, position } => {
                        let members = groups
                            .iter()
                            .find(|g| g.letter == *group)
                            .ok_or(EngineError::UnknownGroup(*group))?
                            .teams
                            .len();
                        if *position == 0 || usize::from(*position) > members {
                            return Err(EngineError::InvalidGroupPosition {
                                game_number: game.game_number,
                                group: *group,
                                position: *position,
                            });
                        }
                    }
                    TeamSlotRule::ThirdPlaceOf { slot: label } if !table.has_slot(label) => {
                        return Err(EngineError::UnknownBracketSlot(label.clone()));
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    pub fn game(&self, game_number: u32) -> Option<&'a PlayoffGame> {
        self.games.get(&game_number).copied()
    }

    pub fn games(&self) -> impl Iterator<Item = &'a PlayoffGame> + '_ {
        self.games.values().copied()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Games whose slot rules reference `game_number` directly.
    pub fn dependents_of(&self, game_number: u32) -> Vec<u32> {
        self.dependents.get(&game_number).cloned().unwrap_or_default()
    }

    /// Everything downstream of `game_number`, sorted. Debugging view for corrections.
    pub fn downstream_of(&self, game_number: u32) -> Vec<u32> {
        let mut seen = BTreeSet::new();
        let mut pending = self.dependents_of(game_number);
        while let Some(next) = pending.pop() {
            if seen.insert(next) {
                pending.extend(self.dependents_of(next));
            }
        }
        seen.into_iter().collect()
    }

    /// Games sorted by round order, then game number.
    pub fn in_round_order(&self) -> Vec<&'a PlayoffGame> {
        let mut games: Vec<&'a PlayoffGame> = self.games.values().copied().collect();
        games.sort_by_key(|g| (g.round.order, g.game_number));
        games
    }

    /// The single game flagged with `kind`, if any. Two or more is an error.
    pub fn single_game_of_kind(&self, kind: RoundKind) -> Result<Option<&'a PlayoffGame>, EngineError> {
        let mut found = self.games.values().copied().filter(|g| g.round.kind == kind);
        let first = found.next();
        if found.next().is_some() {
            return Err(EngineError::AmbiguousRound(kind));
        }
        Ok(first)
    }

    /// Evaluate one rule. `lookup` answers "who is in slot X of game N" for
    /// upstream games; the caller decides whether that comes from a fixed-point
    /// table or from recursion.
    pub fn evaluate_rule<F>(&self, rule: &TeamSlotRule, ctx: &ResolutionContext<'_>, lookup: F) -> Option<TeamId>
    where
        F: Fn(u32, Slot) -> Option<TeamId>,
    {
        match rule {
            TeamSlotRule::Fixed { team } => Some(*team),
            TeamSlotRule::WinnerOf { game } | TeamSlotRule::LoserOf { game } => {
                let referenced = self.game(*game)?;
                let result = ctx.results.official(referenced.id)?;
                let home = lookup(*game, Slot::Home)?;
                let away = lookup(*game, Slot::Away)?;
                if !result.recorded_for(home, away) {
                    return None;
                }
                let winner = result.winning_side()?;
                let side = match rule {
                    TeamSlotRule::LoserOf { .. } => winner.opposite(),
                    _ => winner,
                };
                Some(match side {
                    Slot::Home => home,
                    Slot::Away => away,
                })
            }
            TeamSlotRule::ThirdPlaceOf { slot } => ctx.qualification.team_for_slot(slot),
            TeamSlotRule::GroupPosition { group, position } => ctx
                .standings
                .get(group)
                .filter(|s| s.complete)
                .and_then(|s| s.at_position(usize::from(*position)))
                .map(|row| row.team),
        }
    }

    /// Resolve one slot from the snapshot alone. Pure; nothing is stored.
    pub fn resolve_slot(&self, game_number: u32, slot: Slot, ctx: &ResolutionContext<'_>) -> Option<TeamId> {
        let game = self.game(game_number)?;
        self.evaluate_rule(game.rule(slot), ctx, |n, s| self.resolve_slot(n, s, ctx))
    }

    /// Both slots of a game: (home, away).
    pub fn resolve(&self, game_number: u32, ctx: &ResolutionContext<'_>) -> (Option<TeamId>, Option<TeamId>) {
        (
            self.resolve_slot(game_number, Slot::Home, ctx),
            self.resolve_slot(game_number, Slot::Away, ctx),
        )
    }

    fn upstream_of(&self, game_number: u32) -> Vec<u32> {
        self.game(game_number)
            .map(|g| Slot::BOTH.iter().filter_map(|&s| g.rule(s).referenced_game()).collect())
            .unwrap_or_default()
    }

    fn check_acyclic(&self) -> Result<(), EngineError> {
        let mut marks: HashMap<u32, Mark> = HashMap::new();
        for &start in self.games.keys() {
            if marks.contains_key(&start) {
                continue;
            }
            let mut stack = vec![(start, false)];
            while let Some((game_number, expanded)) = stack.pop() {
                if expanded {
                    marks.insert(game_number, Mark::Done);
                    continue;
                }
                if marks.get(&game_number) == Some(&Mark::Done) {
                    continue;
                }
                marks.insert(game_number, Mark::Visiting);
                stack.push((game_number, true));
                for upstream in self.upstream_of(game_number) {
                    match marks.get(&upstream) {
                        Some(Mark::Visiting) => return Err(EngineError::DependencyCycle(upstream)),
                        Some(Mark::Done) => {}
                        None => stack.push((upstream, false)),
                    }
                }
            }
        }
        Ok(())
    }
}
