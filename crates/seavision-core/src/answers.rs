//! Per-session answer storage and text normalization.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::QuizError;
use crate::model::{ItemId, QuizKind};
use crate::traits::{QuizItem, Response};

/// Fold free text for comparison: trimmed and lower-cased.
pub fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Case-insensitive, whitespace-insensitive equality. Two empty strings
/// match: "nothing seen" agrees with "nothing expected".
pub fn text_matches(answer: &str, expected: &str) -> bool {
    fold(answer) == fold(expected)
}

/// Answers recorded during one session, keyed by item identifier.
///
/// The store knows which identifiers its catalog contains and refuses any
/// other. Items that were never answered are simply absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerStore<R> {
    quiz: QuizKind,
    known: BTreeSet<ItemId>,
    responses: BTreeMap<ItemId, R>,
}

impl<R: Response> AnswerStore<R> {
    /// An empty store accepting answers for every item of `catalog`.
    pub fn for_catalog<T: QuizItem>(catalog: &Catalog<T>) -> Self {
        Self {
            quiz: catalog.quiz(),
            known: catalog.ids().cloned().collect(),
            responses: BTreeMap::new(),
        }
    }

    pub fn quiz(&self) -> QuizKind {
        self.quiz
    }

    /// Record (or overwrite) the normalized response for `item`.
    pub fn set(&mut self, item: &ItemId, response: R) -> Result<(), QuizError> {
        if !self.known.contains(item) {
            return Err(QuizError::unknown(self.quiz, item));
        }
        self.responses.insert(item.clone(), response.normalized());
        Ok(())
    }

    pub fn get(&self, item: &ItemId) -> Option<&R> {
        self.responses.get(item)
    }

    /// Forget the answer for `item`, returning it if one was recorded.
    pub fn clear(&mut self, item: &ItemId) -> Option<R> {
        self.responses.remove(item)
    }

    /// Every recorded response. Unanswered items are not represented.
    pub fn all(&self) -> &BTreeMap<ItemId, R> {
        &self.responses
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

impl AnswerStore<String> {
    /// Folded text answer for `item`, with an unanswered item reading as
    /// empty, the same as an intentional blank.
    pub fn folded(&self, item: &ItemId) -> String {
        self.get(item).map(|a| fold(a)).unwrap_or_default()
    }
}
