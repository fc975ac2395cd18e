//! Core trait definitions for quiz items, responses and scorers.
//!
//! Every quiz family plugs into the shared session engine through these
//! three seams: its catalog items implement [`QuizItem`], its answers
//! implement [`Response`], and its arithmetic lives in a [`Scorer`].

use std::fmt;

use crate::answers::AnswerStore;
use crate::catalog::Catalog;
use crate::error::QuizError;
use crate::model::{ItemId, QuizKind};
use crate::scoring::ScoreResult;

// ---------------------------------------------------------------------------
// Items and responses
// ---------------------------------------------------------------------------

/// One immutable stimulus in a catalog (a plate, a light pair, a swatch...).
pub trait QuizItem: Clone + fmt::Debug {
    /// Stable identifier, unique within its catalog.
    fn id(&self) -> &ItemId;
}

/// A participant's answer to one item.
pub trait Response: Clone + fmt::Debug {
    /// Canonical stored form of the response.
    ///
    /// Applied by [`AnswerStore::set`] before anything is recorded.
    fn normalized(self) -> Self {
        self
    }
}

impl Response for String {
    fn normalized(self) -> Self {
        self.trim().to_string()
    }
}

impl Response for bool {}

impl Response for u32 {}

impl Response for usize {}

// ---------------------------------------------------------------------------
// Scorer trait
// ---------------------------------------------------------------------------

/// Reduces a quiz's recorded answers and its catalog's ground truth to a
/// [`ScoreResult`].
///
/// Implementations must be pure: the same store and catalog always produce
/// the same result.
pub trait Scorer {
    /// Catalog item type this scorer understands.
    type Item: QuizItem;
    /// Answer type recorded per item.
    type Response: Response;

    /// Which quiz family this scorer grades.
    fn quiz(&self) -> QuizKind;

    /// Reject a response that cannot apply to `item` (e.g. a count given for
    /// a yes/no probe). Called before the response is stored.
    fn check(&self, item: &Self::Item, response: &Self::Response) -> Result<(), QuizError> {
        let _ = (item, response);
        Ok(())
    }

    /// Score every item of `catalog` against `answers`.
    fn compute(
        &self,
        answers: &AnswerStore<Self::Response>,
        catalog: &Catalog<Self::Item>,
    ) -> Result<ScoreResult, QuizError>;
}
