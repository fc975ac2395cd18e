//! Quiz sessions: sequence, cursor and answers tied to one scorer.
//!
//! A [`QuizSession`] drives every stepwise quiz (plates, lantern pairs, chart
//! questions, radar probes). Hue tasks use an [`ArrangementSession`], where
//! the participant reorders swatches instead of stepping through them. The
//! radar battery combines both in a [`RadarBattery`].
//!
//! Sessions are single-owner, in-memory values. Answers are keyed by item
//! identity, so reshuffling the sequence never loses or misattributes them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::answers::AnswerStore;
use crate::catalog::{Catalog, ChartElement, ChartQuestion, DisplayMode, RadarProbe, Swatch};
use crate::cursor::SessionCursor;
use crate::error::QuizError;
use crate::model::{ItemId, QuizKind};
use crate::scoring::{ChartResponse, ChartScorer, HueScorer, RadarScorer, ScoreResult};
use crate::sequence::{self, QuizSequence, SequenceOrder};
use crate::traits::{QuizItem, Scorer};

// ---------------------------------------------------------------------------
// Stepwise sessions
// ---------------------------------------------------------------------------

/// One participant working through one quiz.
#[derive(Debug, Clone)]
pub struct QuizSession<S: Scorer> {
    id: Uuid,
    started_at: DateTime<Utc>,
    scorer: S,
    catalog: Arc<Catalog<S::Item>>,
    order: SequenceOrder,
    sequence: QuizSequence,
    cursor: SessionCursor,
    answers: AnswerStore<S::Response>,
}

impl<S: Scorer> QuizSession<S> {
    /// Draw the session's sequence and start at the first item.
    pub fn start<R>(
        scorer: S,
        catalog: Arc<Catalog<S::Item>>,
        order: SequenceOrder,
        rng: &mut R,
    ) -> Result<Self, QuizError>
    where
        R: Rng + ?Sized,
    {
        if catalog.is_empty() {
            return Err(QuizError::EmptyCatalog(catalog.quiz()));
        }
        let sequence = sequence::generate(&catalog, order, rng);
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            cursor: SessionCursor::new(sequence.len()),
            answers: AnswerStore::for_catalog(&catalog),
            scorer,
            catalog,
            order,
            sequence,
        };
        tracing::info!(
            session = %session.id,
            quiz = %session.quiz(),
            items = session.len(),
            "quiz session started"
        );
        Ok(session)
    }

    /// A fresh session over the same catalog and scorer. Nothing carries over.
    pub fn restart<R>(&self, rng: &mut R) -> Result<Self, QuizError>
    where
        S: Clone,
        R: Rng + ?Sized,
    {
        Self::start(self.scorer.clone(), Arc::clone(&self.catalog), self.order, rng)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn quiz(&self) -> QuizKind {
        self.scorer.quiz()
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn catalog(&self) -> &Catalog<S::Item> {
        &self.catalog
    }

    pub fn sequence(&self) -> &QuizSequence {
        &self.sequence
    }

    pub fn answers(&self) -> &AnswerStore<S::Response> {
        &self.answers
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn len(&self) -> usize {
        self.cursor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    /// Every item has been passed; the quiz is ready to score.
    pub fn is_complete(&self) -> bool {
        self.cursor.is_complete()
    }

    pub fn progress(&self) -> f64 {
        self.cursor.progress()
    }

    /// Item under the cursor, or `None` once the sequence is complete.
    pub fn current_item(&self) -> Option<&S::Item> {
        let id = self.sequence.get(self.cursor.position())?;
        self.catalog.get(id).ok()
    }

    /// The recorded answer for the item under the cursor, if any.
    pub fn current_answer(&self) -> Option<&S::Response> {
        let id = self.sequence.get(self.cursor.position())?;
        self.answers.get(id)
    }

    /// Record `response` for any item of the catalog without moving.
    pub fn answer(&mut self, item: &ItemId, response: S::Response) -> Result<(), QuizError> {
        let target = self.catalog.get(item)?;
        self.scorer.check(target, &response)?;
        self.answers.set(item, response)
    }

    /// Record `response` for the item under the cursor and move to the next.
    pub fn submit(&mut self, response: S::Response) -> Result<(), QuizError> {
        let id = self
            .current_item()
            .map(|item| item.id().clone())
            .ok_or(QuizError::NoCurrentItem(self.quiz()))?;
        self.answer(&id, response)?;
        self.cursor.advance();
        Ok(())
    }

    /// Move forward without answering. Saturates at the end.
    pub fn skip(&mut self) -> bool {
        self.cursor.advance()
    }

    /// Move forward. Saturates at the end.
    pub fn advance(&mut self) -> bool {
        self.cursor.advance()
    }

    /// Move back. Saturates at the first item.
    pub fn retreat(&mut self) -> bool {
        self.cursor.retreat()
    }

    /// Draw a new order. The cursor position and every recorded answer stay.
    /// Sessions started in catalog order refuse.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), QuizError> {
        if self.order == SequenceOrder::Canonical {
            return Err(QuizError::FixedOrder(self.quiz()));
        }
        self.sequence.reshuffle(rng);
        tracing::info!(
            session = %self.id,
            position = self.cursor.position(),
            answered = self.answers.len(),
            "sequence reshuffled"
        );
        Ok(())
    }

    /// Score the answers recorded so far against the whole catalog.
    pub fn score(&self) -> Result<ScoreResult, QuizError> {
        let result = self.scorer.compute(&self.answers, &self.catalog)?;
        tracing::info!(
            session = %self.id,
            quiz = %result.quiz,
            raw = result.raw,
            max = result.max,
            verdict = %result.verdict,
            "quiz scored"
        );
        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Chart quiz
// ---------------------------------------------------------------------------

/// Chart element quiz with a switchable display mode. Each answer remembers
/// the mode it was given under.
#[derive(Debug, Clone)]
pub struct ChartQuiz {
    session: QuizSession<ChartScorer>,
    mode: DisplayMode,
}

impl ChartQuiz {
    pub fn start<R: Rng + ?Sized>(
        scorer: ChartScorer,
        catalog: Arc<Catalog<ChartQuestion>>,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        Ok(Self {
            session: QuizSession::start(scorer, catalog, SequenceOrder::Shuffled, rng)?,
            mode: DisplayMode::Day,
        })
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        tracing::debug!(%mode, "display mode switched");
        self.mode = mode;
    }

    pub fn session(&self) -> &QuizSession<ChartScorer> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut QuizSession<ChartScorer> {
        &mut self.session
    }

    /// Answer the current question under the active display mode.
    pub fn submit(&mut self, element: ChartElement) -> Result<(), QuizError> {
        self.session.submit(ChartResponse::new(element, self.mode))
    }

    pub fn score(&self) -> Result<ScoreResult, QuizError> {
        self.session.score()
    }
}

// ---------------------------------------------------------------------------
// Arrangement sessions
// ---------------------------------------------------------------------------

/// A reorderable arrangement of swatches.
///
/// Starts shuffled. The participant moves swatches or reshuffles until they
/// complete the arrangement, which freezes it for scoring.
#[derive(Debug, Clone)]
pub struct ArrangementSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    catalog: Arc<Catalog<Swatch>>,
    arrangement: QuizSequence,
    completed: bool,
}

impl ArrangementSession {
    pub fn start<R: Rng + ?Sized>(catalog: Arc<Catalog<Swatch>>, rng: &mut R) -> Result<Self, QuizError> {
        if catalog.is_empty() {
            return Err(QuizError::EmptyCatalog(catalog.quiz()));
        }
        let arrangement = sequence::generate(&catalog, SequenceOrder::Shuffled, rng);
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            catalog,
            arrangement,
            completed: false,
        };
        tracing::info!(
            session = %session.id,
            catalog = session.catalog.name(),
            swatches = session.arrangement.len(),
            "arrangement started"
        );
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn catalog(&self) -> &Catalog<Swatch> {
        &self.catalog
    }

    pub fn arrangement(&self) -> &QuizSequence {
        &self.arrangement
    }

    /// Swatches in their current placement order.
    pub fn swatches(&self) -> impl Iterator<Item = &Swatch> + '_ {
        self.arrangement
            .iter()
            .filter_map(|id| self.catalog.get(id).ok())
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    fn ensure_open(&self) -> Result<(), QuizError> {
        if self.completed {
            Err(QuizError::ArrangementCompleted)
        } else {
            Ok(())
        }
    }

    /// Move one swatch to `slot`; the swatches in between shift by one.
    pub fn move_item(&mut self, item: &ItemId, slot: usize) -> Result<(), QuizError> {
        self.ensure_open()?;
        self.arrangement.move_item(item, slot)
    }

    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), QuizError> {
        self.ensure_open()?;
        self.arrangement.reshuffle(rng);
        Ok(())
    }

    /// Replace the whole arrangement. `order` must list every swatch once.
    pub fn set_order(&mut self, order: &[ItemId]) -> Result<(), QuizError> {
        self.ensure_open()?;
        let mut candidate = self.arrangement.clone();
        for (slot, id) in order.iter().enumerate() {
            candidate.move_item(id, slot)?;
        }
        if order.len() != self.catalog.len() || candidate.as_slice() != order {
            return Err(QuizError::InvalidArrangement(format!(
                "expected each of the {} swatches exactly once",
                self.catalog.len()
            )));
        }
        self.arrangement = candidate;
        Ok(())
    }

    /// Freeze the arrangement. Idempotent.
    pub fn complete(&mut self) {
        if !self.completed {
            tracing::info!(session = %self.id, "arrangement completed");
        }
        self.completed = true;
    }

    /// The arrangement as answers: each swatch mapped to its slot.
    pub fn answers(&self) -> AnswerStore<usize> {
        let mut store = AnswerStore::for_catalog(&self.catalog);
        for (slot, id) in self.arrangement.iter().enumerate() {
            // Every arranged id comes from this catalog.
            if let Err(e) = store.set(id, slot) {
                tracing::warn!("dropping placement of '{id}': {e}");
            }
        }
        store
    }

    pub fn score(&self, scorer: &HueScorer) -> Result<ScoreResult, QuizError> {
        let result = scorer.compute(&self.answers(), &self.catalog)?;
        tracing::info!(
            session = %self.id,
            mode = %scorer.mode(),
            raw = result.raw,
            verdict = %result.verdict,
            "arrangement scored"
        );
        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Radar battery
// ---------------------------------------------------------------------------

/// Radar probes answered one by one plus an intensity-scale arrangement.
#[derive(Debug, Clone)]
pub struct RadarBattery {
    probes: QuizSession<RadarScorer>,
    ordering: ArrangementSession,
}

impl RadarBattery {
    pub fn start<R: Rng + ?Sized>(
        scorer: RadarScorer,
        probes: Arc<Catalog<RadarProbe>>,
        scale: Arc<Catalog<Swatch>>,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        Ok(Self {
            probes: QuizSession::start(scorer, probes, SequenceOrder::Canonical, rng)?,
            ordering: ArrangementSession::start(scale, rng)?,
        })
    }

    pub fn id(&self) -> Uuid {
        self.probes.id()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.probes.started_at()
    }

    pub fn probes(&self) -> &QuizSession<RadarScorer> {
        &self.probes
    }

    pub fn probes_mut(&mut self) -> &mut QuizSession<RadarScorer> {
        &mut self.probes
    }

    pub fn ordering(&self) -> &ArrangementSession {
        &self.ordering
    }

    pub fn ordering_mut(&mut self) -> &mut ArrangementSession {
        &mut self.ordering
    }

    pub fn is_complete(&self) -> bool {
        self.probes.is_complete() && self.ordering.is_complete()
    }

    /// Score every subtest. An arrangement that was never completed scores
    /// zero on the ordering subtest.
    pub fn score(&self) -> Result<ScoreResult, QuizError> {
        let placed = if self.ordering.is_complete() {
            self.ordering.answers()
        } else {
            AnswerStore::for_catalog(self.ordering.catalog())
        };
        let result = self.probes.scorer().score_battery(
            self.probes.answers(),
            self.probes.catalog(),
            Some((&placed, self.ordering.catalog())),
        )?;
        tracing::info!(
            session = %self.id(),
            raw = result.raw,
            max = result.max,
            verdict = %result.verdict,
            "radar battery scored"
        );
        Ok(result)
    }
}
