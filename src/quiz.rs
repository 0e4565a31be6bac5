use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeSet, HashSet};

use crate::models::QuizCategory;

/// `quiz_category.type` value the client sends for "All".
pub const ALL_CATEGORIES: &str = "click";

/// Which questions a quiz round draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(i64),
}

impl QuizCategory {
    /// Resolve the client's selection into a storage scope.
    ///
    /// Clients number categories from zero while stored ids start at one, so
    /// a concrete selection maps to `id + 1`.
    pub fn scope(&self) -> Result<QuizScope, String> {
        if self.kind.as_deref() == Some(ALL_CATEGORIES) {
            return Ok(QuizScope::All);
        }

        let id = self
            .id
            .as_ref()
            .ok_or_else(|| "quiz_category.id is required unless type is 'click'".to_string())?;
        let client_id = id
            .as_i64()
            .ok_or_else(|| format!("quiz_category.id must be an integer, got {:?}", id))?;

        client_id
            .checked_add(1)
            .map(QuizScope::Category)
            .ok_or_else(|| format!("quiz_category.id {} is out of range", client_id))
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuizSelector;

impl QuizSelector {
    pub fn new() -> Self {
        Self
    }

    /// Ids in `candidates` that are not in `previous`, ascending.
    pub fn remaining(&self, candidates: &[i64], previous: &[i64]) -> Vec<i64> {
        let seen: HashSet<i64> = previous.iter().copied().collect();
        candidates
            .iter()
            .copied()
            .filter(|id| !seen.contains(id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Pick one unseen id uniformly at random; `None` once the scope is exhausted.
    pub fn pick<R: Rng + ?Sized>(&self, candidates: &[i64], previous: &[i64], rng: &mut R) -> Option<i64> {
        self.remaining(candidates, previous).choose(rng).copied()
    }
}
