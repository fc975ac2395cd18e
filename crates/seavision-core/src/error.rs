//! Quiz error types.
//!
//! These represent contract violations between the presentation layer and
//! the core: answers for items that do not exist, responses of the wrong
//! shape, and input that must be rejected before it reaches a scorer.
//! Navigation past either end of a sequence is deliberately absent here; the
//! cursor saturates instead of failing.

use thiserror::Error;

use crate::model::{ItemId, QuizKind};

/// Errors raised by catalogs, answer stores, sessions and scorers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// An item identifier was not found in the quiz's catalog.
    #[error("unknown item '{item}' in {quiz} quiz")]
    UnknownItem { quiz: QuizKind, item: ItemId },

    /// Two catalog items share one identifier.
    #[error("duplicate item '{item}' in {quiz} catalog")]
    DuplicateItem { quiz: QuizKind, item: ItemId },

    /// A session was started over a catalog with no items.
    #[error("{0} catalog has no items")]
    EmptyCatalog(QuizKind),

    /// The response shape does not fit the item it answers.
    #[error("response for '{item}' does not match the item: {reason}")]
    ResponseMismatch { item: ItemId, reason: String },

    /// A submitted ordering is not a permutation of the quiz's items.
    #[error("invalid arrangement: {0}")]
    InvalidArrangement(String),

    /// Raw user input could not be turned into a response.
    #[error("invalid input '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    /// The cursor is past the last item, so there is nothing to answer.
    #[error("no current item: every item of the {0} quiz has been passed")]
    NoCurrentItem(QuizKind),

    /// The quiz presents its items in catalog order, which cannot be shuffled.
    #[error("the {0} quiz keeps catalog order and cannot be reshuffled")]
    FixedOrder(QuizKind),

    /// The arrangement has been frozen for scoring and can no longer change.
    #[error("arrangement is already completed")]
    ArrangementCompleted,
}

impl QuizError {
    pub(crate) fn unknown(quiz: QuizKind, item: &ItemId) -> Self {
        QuizError::UnknownItem {
            quiz,
            item: item.clone(),
        }
    }

    pub(crate) fn invalid_input(input: &str, reason: impl Into<String>) -> Self {
        QuizError::InvalidInput {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors caused by what the participant typed, which a
    /// presentation layer should re-prompt for rather than abort on.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            QuizError::InvalidInput { .. } | QuizError::ResponseMismatch { .. }
        )
    }
}
