//! seavision-core: colour-vision quiz engine for maritime screening.
//!
//! Item catalogs, sequence generation, session navigation, answer storage,
//! the five quiz scorers and the assessment policy that turns scores into
//! verdicts. Presentation layers drive a [`engine::QuizSession`] and read back
//! a [`scoring::ScoreResult`]; nothing in this crate renders anything.

pub mod answers;
pub mod assessment;
pub mod catalog;
pub mod config;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod scoring;
pub mod sequence;
pub mod traits;
