//! Third-place qualification: pick the best K third-placed teams and map them to bracket slots.

use crate::models::{
    CutoffTiePolicy, EngineError, GroupLetter, GroupStandings, StandingRow, TeamId, TournamentFormat,
};
use crate::reference::CombinationTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of a qualification attempt. `Pending` is a normal state, not an error.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Qualification {
    Resolved(QualifiedThirdPlaces),
    Pending { reason: PendingReason },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingReason {
    /// These groups still have fixtures without an official result.
    GroupsIncomplete { groups: Vec<GroupLetter> },
    /// Third-placed teams of these groups are level on every sporting criterion across the cutoff.
    CutoffTie { groups: Vec<GroupLetter> },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct QualifiedThirdPlaces {
    /// Sorted letters of the qualifying groups.
    pub combination_key: String,
    /// Every group's third-placed row, best first.
    pub ranking: Vec<StandingRow>,
    /// Bracket slot label -> group letter.
    pub matchups: BTreeMap<String, GroupLetter>,
    /// Bracket slot label -> the team that fills it.
    pub slot_teams: BTreeMap<String, TeamId>,
}

impl QualifiedThirdPlaces {
    /// The top K rows of the ranking.
    pub fn qualifiers(&self) -> &[StandingRow] {
        let k = self.matchups.len().min(self.ranking.len());
        &self.ranking[..k]
    }
}

impl Qualification {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Qualification::Resolved(_))
    }

    /// Team for a `ThirdPlaceOf` slot, once resolved.
    pub fn team_for_slot(&self, slot: &str) -> Option<TeamId> {
        match self {
            Qualification::Resolved(q) => q.slot_teams.get(slot).copied(),
            Qualification::Pending { .. } => None,
        }
    }
}

/// Resolve which third-placed teams advance and where they play.
///
/// Every group must be complete; otherwise the answer is `Pending`. The rows are
/// ranked with the within-group criteria (points, goal difference, goals for,
/// then team id), the top K form the combination key, and the key is looked up
/// in the table. By default the id fallback also settles a level cutoff; a
/// format can opt into [`CutoffTiePolicy::Unresolvable`] to wait instead.
pub fn resolve_third_places(
    standings: &BTreeMap<GroupLetter, GroupStandings>,
    format: &TournamentFormat,
    table: &CombinationTable,
) -> Result<Qualification, EngineError> {
    check_format(standings, format, table)?;

    let incomplete: Vec<GroupLetter> = standings
        .values()
        .filter(|s| !s.complete)
        .map(|s| s.group)
        .collect();
    if !incomplete.is_empty() {
        log::debug!("Third places pending: groups {:?} incomplete", incomplete);
        return Ok(Qualification::Pending {
            reason: PendingReason::GroupsIncomplete { groups: incomplete },
        });
    }

    let mut ranking = Vec::with_capacity(standings.len());
    for group in standings.values() {
        let row = group.at_position(format.third_place_position).ok_or_else(|| {
            EngineError::FormatMismatch(format!(
                "group {} has no position {}",
                group.group, format.third_place_position
            ))
        })?;
        ranking.push(row.clone());
    }
    ranking.sort_by(|a, b| a.compare_record(b).then_with(|| a.team.cmp(&b.team)));

    let k = format.qualifying_third_places;
    if format.cutoff_tie == CutoffTiePolicy::Unresolvable && k < ranking.len() && ranking[k - 1].level_with(&ranking[k]) {
        let boundary = &ranking[k - 1];
        let mut groups: Vec<GroupLetter> = ranking
            .iter()
            .filter(|r| r.level_with(boundary))
            .map(|r| r.group)
            .collect();
        groups.sort_unstable();
        log::debug!("Third places pending: cutoff tie between groups {:?}", groups);
        return Ok(Qualification::Pending {
            reason: PendingReason::CutoffTie { groups },
        });
    }

    let key = table.combination_key(ranking[..k].iter().map(|r| r.group))?;
    let rule = table.lookup(&key)?;

    let mut slot_teams = BTreeMap::new();
    for (slot, group) in &rule.matchups {
        let row = ranking
            .iter()
            .find(|r| r.group == *group)
            .ok_or_else(|| EngineError::MissingCombination(key.clone()))?;
        slot_teams.insert(slot.clone(), row.team);
    }

    Ok(Qualification::Resolved(QualifiedThirdPlaces {
        combination_key: key,
        ranking,
        matchups: rule.matchups.clone(),
        slot_teams,
    }))
}

fn check_format(
    standings: &BTreeMap<GroupLetter, GroupStandings>,
    format: &TournamentFormat,
    table: &CombinationTable,
) -> Result<(), EngineError> {
    if format.qualifying_third_places != table.qualifiers() {
        return Err(EngineError::FormatMismatch(format!(
            "format qualifies {} third places, table assigns {}",
            format.qualifying_third_places,
            table.qualifiers()
        )));
    }
    let letters: Vec<GroupLetter> = standings.keys().copied().collect();
    if letters != table.group_letters() {
        return Err(EngineError::FormatMismatch(format!(
            "tournament groups {:?}, table groups {:?}",
            letters,
            table.group_letters()
        )));
    }
    Ok(())
}
