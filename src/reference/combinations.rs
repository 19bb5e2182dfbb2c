//! Third-place combination table: which qualifying group fills which bracket slot.
//!
//! The pairing is administrative data, not a formula. The table is loaded once,
//! validated for completeness (exactly C(N, K) rows) and well-formedness (every
//! row assigns each of its K groups to exactly one slot), and never mutated.

use crate::models::{CombinationRule, EngineError, GroupLetter};
use std::collections::{BTreeMap, BTreeSet};
use std::io;

/// Group letters of a 12-group draw.
pub const WORLD_CUP_2026_GROUPS: &str = "ABCDEFGHIJKL";

const WORLD_CUP_2026_CSV: &str = include_str!("../../data/third_place_combinations.csv");

/// Immutable K-of-N lookup table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CombinationTable {
    group_letters: Vec<GroupLetter>,
    slots: Vec<String>,
    rules: BTreeMap<String, CombinationRule>,
}

impl CombinationTable {
    /// The embedded 495-row table for 8 of 12 third-placed teams.
    pub fn world_cup_2026() -> Result<Self, EngineError> {
        Self::from_csv(WORLD_CUP_2026_CSV.as_bytes(), WORLD_CUP_2026_GROUPS)
    }

    /// Read a table whose header is `combination,<slot>,<slot>,...` and whose
    /// rows are a combination key followed by one group letter per slot.
    pub fn from_csv<R: io::Read>(reader: R, group_letters: &str) -> Result<Self, EngineError> {
        let malformed = |e: csv::Error| EngineError::MalformedCombinationTable(e.to_string());
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(malformed)?.clone();
        let mut columns = headers.iter();
        match columns.next() {
            Some("combination") => {}
            other => {
                return Err(EngineError::MalformedCombinationTable(format!(
                    "expected `combination` as first column, found {other:?}"
                )))
            }
        }
        let slots: Vec<String> = columns.map(str::to_string).collect();

        let mut rules = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(malformed)?;
            let line = i + 2;
            let key = record.get(0).unwrap_or_default().to_string();
            let mut matchups = BTreeMap::new();
            for (slot, value) in slots.iter().zip(record.iter().skip(1)) {
                let letter = single_letter(value).ok_or_else(|| {
                    EngineError::MalformedCombinationTable(format!(
                        "line {line}: {value:?} is not a group letter"
                    ))
                })?;
                matchups.insert(slot.clone(), letter);
            }
            rules.push(CombinationRule { key, matchups });
        }

        let table = Self::from_rules(group_letters, slots, rules)?;
        log::info!(
            "Loaded {} third-place combinations ({} of {} groups)",
            table.len(),
            table.qualifiers(),
            table.group_letters.len()
        );
        Ok(table)
    }

    /// Build and validate a table from already-parsed rules.
    pub fn from_rules(
        group_letters: &str,
        slots: Vec<String>,
        rules: Vec<CombinationRule>,
    ) -> Result<Self, EngineError> {
        let mut letters: Vec<GroupLetter> = group_letters.chars().collect();
        letters.sort_unstable();
        let unique_letters = letters.len();
        letters.dedup();
        if letters.is_empty() || letters.len() != unique_letters {
            return Err(EngineError::MalformedCombinationTable(format!(
                "group letters {group_letters:?} must be non-empty and distinct"
            )));
        }

        let slot_set: BTreeSet<&str> = slots.iter().map(String::as_str).collect();
        if slots.is_empty() || slot_set.len() != slots.len() || slots.len() > letters.len() {
            return Err(EngineError::MalformedCombinationTable(format!(
                "need between 1 and {} distinct slot labels, found {:?}",
                letters.len(),
                slots
            )));
        }

        let mut table = Self {
            group_letters: letters,
            slots,
            rules: BTreeMap::new(),
        };

        for rule in rules {
            let key = table.combination_key(rule.key.chars())?;
            if key != rule.key {
                return Err(EngineError::InvalidCombinationKey(rule.key));
            }
            table.check_matchups(&rule)?;
            if table.rules.contains_key(&key) {
                return Err(EngineError::DuplicateCombination(key));
            }
            table.rules.insert(key, rule);
        }

        let expected = binomial(table.group_letters.len() as u64, table.slots.len() as u64);
        let found = table.rules.len() as u64;
        if found != expected {
            return Err(EngineError::IncompleteCombinationTable { expected, found });
        }
        Ok(table)
    }

    /// Sorted key for a set of qualifying groups. Exactly K distinct known letters, else an error.
    pub fn combination_key<I>(&self, letters: I) -> Result<String, EngineError>
    where
        I: IntoIterator<Item = GroupLetter>,
    {
        let mut letters: Vec<GroupLetter> = letters.into_iter().collect();
        let raw: String = letters.iter().collect();
        letters.sort_unstable();
        let count = letters.len();
        letters.dedup();
        let known = letters.iter().all(|l| self.group_letters.contains(l));
        if !known || letters.len() != count || count != self.qualifiers() {
            return Err(EngineError::InvalidCombinationKey(raw));
        }
        Ok(letters.into_iter().collect())
    }

    /// The rule for a key. A valid key without an entry is a configuration error.
    pub fn lookup(&self, key: &str) -> Result<&CombinationRule, EngineError> {
        let key = self.combination_key(key.chars())?;
        self.rules
            .get(&key)
            .ok_or(EngineError::MissingCombination(key))
    }

    /// K: number of qualifying groups per combination.
    pub fn qualifiers(&self) -> usize {
        self.slots.len()
    }

    pub fn group_letters(&self) -> &[GroupLetter] {
        &self.group_letters
    }

    /// Bracket slot labels in column order.
    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn has_slot(&self, label: &str) -> bool {
        self.slots.iter().any(|s| s == label)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> impl Iterator<Item = &CombinationRule> {
        self.rules.values()
    }

    fn check_matchups(&self, rule: &CombinationRule) -> Result<(), EngineError> {
        let malformed = |reason: String| {
            EngineError::MalformedCombinationTable(format!("combination {}: {reason}", rule.key))
        };

        if rule.matchups.len() != self.slots.len() || !self.slots.iter().all(|s| rule.matchups.contains_key(s)) {
            return Err(malformed("matchups must cover every slot exactly once".into()));
        }

        let mut assigned: Vec<GroupLetter> = rule.matchups.values().copied().collect();
        assigned.sort_unstable();
        let key_letters: Vec<GroupLetter> = rule.key.chars().collect();
        if assigned != key_letters {
            return Err(malformed("each qualifying group must fill exactly one slot".into()));
        }

        // Labels spelled with group letters ("CEFHI") list the eligible groups.
        for (slot, group) in &rule.matchups {
            let is_eligibility_label = slot.chars().all(|c| self.group_letters.contains(&c));
            if is_eligibility_label && !slot.contains(*group) {
                return Err(malformed(format!("group {group} is not eligible for slot {slot}")));
            }
        }
        Ok(())
    }
}

/// C(n, k).
pub fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

fn single_letter(value: &str) -> Option<GroupLetter> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}
