//! Navigation pointer into a quiz sequence.

use serde::{Deserialize, Serialize};

/// Position within a sequence of `len` items.
///
/// `position == len` means every item has been passed and the quiz is ready
/// to score. Moving past either end is a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCursor {
    position: usize,
    len: usize,
}

impl SessionCursor {
    pub fn new(len: usize) -> Self {
        Self { position: 0, len }
    }

    /// Step forward, saturating at `len`. Returns whether the cursor moved.
    pub fn advance(&mut self) -> bool {
        if self.position >= self.len {
            tracing::debug!(len = self.len, "advance ignored at end of sequence");
            return false;
        }
        self.position += 1;
        true
    }

    /// Step back, saturating at zero. Returns whether the cursor moved.
    pub fn retreat(&mut self) -> bool {
        if self.position == 0 {
            tracing::debug!("retreat ignored at start of sequence");
            return false;
        }
        self.position -= 1;
        true
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_complete(&self) -> bool {
        self.position == self.len
    }

    /// Fraction of the sequence passed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.len == 0 {
            return 1.0;
        }
        self.position as f64 / self.len as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn advance_saturates_at_len() {
        let mut cursor = SessionCursor::new(2);
        assert!(cursor.advance());
        assert!(cursor.advance());
        assert!(cursor.is_complete());
        assert!(!cursor.advance());
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn retreat_saturates_at_zero() {
        let mut cursor = SessionCursor::new(3);
        assert!(!cursor.retreat());
        assert_eq!(cursor.position(), 0);
        cursor.advance();
        assert!(cursor.retreat());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn empty_sequence_is_complete_immediately() {
        let cursor = SessionCursor::new(0);
        assert!(cursor.is_complete());
        assert!((cursor.progress() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn random_walks_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in 0..6 {
            let mut cursor = SessionCursor::new(len);
            for _ in 0..200 {
                if rng.random_bool(0.5) {
                    cursor.advance();
                } else {
                    cursor.retreat();
                }
                assert!(cursor.position() <= len);
                assert_eq!(cursor.is_complete(), cursor.position() == len);
            }
        }
    }
}
