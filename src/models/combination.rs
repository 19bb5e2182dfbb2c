//! CombinationRule: one row of the third-place matchup table.

use crate::models::group::GroupLetter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps a sorted combination key of qualifying groups to the bracket slot each one fills.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CombinationRule {
    /// Sorted qualifying group letters, e.g. "ABCDEFGH".
    pub key: String,
    /// Bracket slot label -> group letter whose third-placed team takes it.
    pub matchups: BTreeMap<String, GroupLetter>,
}

impl CombinationRule {
    pub fn group_for_slot(&self, slot: &str) -> Option<GroupLetter> {
        self.matchups.get(slot).copied()
    }
}
