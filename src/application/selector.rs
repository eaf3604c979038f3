use crate::domain::entities::Profiles;
use crate::domain::errors::OnboardingError;

/// Turns operator input into exactly one profile.
///
/// Names are always presented and indexed in sorted order so the same number
/// picks the same profile on every run against the same file.
pub struct ProfileSelector;

impl ProfileSelector {
    /// Profile names sorted ascending
    pub fn ordered_names(profiles: &Profiles) -> Vec<String> {
        let mut names: Vec<String> = profiles.keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolves a 1-based choice against `names`
    pub fn resolve(names: &[String], raw_input: &str) -> Result<String, OnboardingError> {
        let index = resolve_index(names.len(), raw_input)?;
        Ok(names[index].clone())
    }
}

/// Parses a 1-based menu choice into a 0-based index below `len`
pub fn resolve_index(len: usize, raw_input: &str) -> Result<usize, OnboardingError> {
    let choice: i64 = raw_input
        .trim()
        .parse()
        .map_err(|_| OnboardingError::invalid_choice(raw_input, len))?;

    match usize::try_from(choice) {
        Ok(n) if (1..=len).contains(&n) => Ok(n - 1),
        _ => Err(OnboardingError::invalid_choice(raw_input, len)),
    }
}

/// Outcome of one line of input in the multi-group menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupChoice {
    /// `0`: stop picking groups
    Done,
    /// A valid group index (0-based)
    Pick(usize),
}

/// Accumulates group picks; `0` ends the menu, repeated picks are ignored
#[derive(Debug, Default)]
pub struct GroupSelection {
    picked: Vec<usize>,
}

impl GroupSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interprets one line against a menu of `len` groups
    pub fn interpret(len: usize, raw_input: &str) -> Result<GroupChoice, OnboardingError> {
        if raw_input.trim() == "0" {
            return Ok(GroupChoice::Done);
        }
        resolve_index(len, raw_input).map(GroupChoice::Pick)
    }

    /// Records a pick; returns false when it was already chosen
    pub fn add(&mut self, index: usize) -> bool {
        if self.picked.contains(&index) {
            return false;
        }
        self.picked.push(index);
        true
    }

    /// Picked indices in the order they were chosen
    pub fn picked(&self) -> &[usize] {
        &self.picked
    }
}
