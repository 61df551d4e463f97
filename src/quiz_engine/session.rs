//! Quiz session management — the two observed session designs unified
//! behind one configuration-selected interface.
//!
//! * **Batch**: a pre-shuffled finite queue, capped to a configured count.
//!   Exhausting the queue reports the cycle's score (added to an externally
//!   owned running total) and regenerates a fresh shuffled queue.
//! * **Streaming**: an infinite no-repeat-until-exhausted random picker over
//!   civilizations; the asked set clears once every civilization has been
//!   used.
//!
//! Both variants own their state explicitly (no globals): create one per
//! play session, call [`reset`](QuizSession::reset) when settings change
//! while the pools stay valid, and rebuild the session when the locale or
//! the toggles change the pools themselves.

use std::collections::HashSet;

use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::quiz_engine::{
    errors::SessionError,
    grader,
    models::{CivQuestions, QuestionRecord, SubmitOutcome},
};

/// Which session strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Batch { question_count: usize },
    Streaming,
}

/// Result of advancing a batch session past an answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The next question in the current queue is active.
    Next,
    /// The queue was exhausted: the finished cycle's score is reported for
    /// the externally owned running total, and a fresh shuffled queue is
    /// already in place with the session score back at zero.
    CycleComplete { session_score: u32 },
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

// ---------------------------------------------------------------------------
// Batch variant
// ---------------------------------------------------------------------------

/// Finite pre-shuffled question queue with terminal-to-restart cycling.
#[derive(Debug)]
pub struct BatchSession {
    pool: Vec<QuestionRecord>,
    queue: Vec<QuestionRecord>,
    index: usize,
    answered: bool,
    score: u32,
    question_count: usize,
    rng: StdRng,
}

impl BatchSession {
    /// `pool` is the full builder output across all civilizations; the
    /// session shuffles a copy and truncates it to `question_count` per
    /// cycle. Pass a seed for deterministic queues.
    pub fn new(pool: Vec<QuestionRecord>, question_count: usize, seed: Option<u64>) -> Self {
        let mut session = BatchSession {
            pool,
            queue: Vec::new(),
            index: 0,
            answered: false,
            score: 0,
            question_count,
            rng: make_rng(seed),
        };
        session.queue = session.shuffled_queue();
        session
    }

    /// Fisher-Yates shuffle of the full pool, truncated to the configured
    /// question count.
    fn shuffled_queue(&mut self) -> Vec<QuestionRecord> {
        let mut queue = self.pool.clone();
        for i in (1..queue.len()).rev() {
            let j = self.rng.gen_range(0..=i);
            queue.swap(i, j);
        }
        queue.truncate(self.question_count);
        queue
    }

    /// The question awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        if self.answered {
            None
        } else {
            self.queue.get(self.index)
        }
    }

    /// Grade an answer against the active slot. Each slot accepts exactly
    /// one submission; the cursor then waits for [`advance`](Self::advance).
    pub fn submit_answer(&mut self, text: &str) -> Result<SubmitOutcome, SessionError> {
        if self.answered {
            return Err(SessionError::AlreadyAnswered);
        }
        let question = self
            .queue
            .get(self.index)
            .ok_or(SessionError::NoActiveQuestion)?
            .clone();
        let correct = grader::grade(text, &question.civilization);
        if correct {
            self.score += 1;
        }
        self.index += 1;
        self.answered = true;
        Ok(SubmitOutcome { correct, correct_answer: question.civilization })
    }

    /// Move to the next question, or complete the cycle when the queue is
    /// exhausted.
    pub fn advance(&mut self) -> Advance {
        self.answered = false;
        if self.index >= self.queue.len() {
            let session_score = self.score;
            self.score = 0;
            self.index = 0;
            self.queue = self.shuffled_queue();
            debug!(
                "batch queue exhausted (score {session_score}), new cycle of {} question(s)",
                self.queue.len()
            );
            Advance::CycleComplete { session_score }
        } else {
            Advance::Next
        }
    }

    /// Full reset: fresh shuffled queue, zero score.
    pub fn reset(&mut self) {
        self.score = 0;
        self.index = 0;
        self.answered = false;
        self.queue = self.shuffled_queue();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Length of the current queue (≤ configured question count).
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.queue.len()
    }
}

// ---------------------------------------------------------------------------
// Streaming variant
// ---------------------------------------------------------------------------

/// Infinite no-repeat random picker over civilizations.
#[derive(Debug)]
pub struct StreamingSession {
    pools: Vec<CivQuestions>,
    asked: HashSet<String>,
    current: Option<QuestionRecord>,
    score: u32,
    total_asked: u32,
    rng: StdRng,
}

impl StreamingSession {
    pub fn new(pools: Vec<CivQuestions>, seed: Option<u64>) -> Self {
        StreamingSession {
            pools,
            asked: HashSet::new(),
            current: None,
            score: 0,
            total_asked: 0,
            rng: make_rng(seed),
        }
    }

    /// Pick the next question: a uniformly random not-yet-asked
    /// civilization, then a uniformly random record from it. Clears the
    /// asked set once every civilization has been used.
    ///
    /// Terminates: every iteration either returns or marks one more
    /// civilization asked, and the up-front check guarantees at least one
    /// civilization has a record to return.
    pub fn next_question(&mut self) -> Result<QuestionRecord, SessionError> {
        if self.pools.iter().all(|pool| pool.records.is_empty()) {
            self.current = None;
            return Err(SessionError::NoQuestions);
        }
        loop {
            let unasked: Vec<usize> = self
                .pools
                .iter()
                .enumerate()
                .filter(|(_, pool)| !self.asked.contains(&pool.key))
                .map(|(idx, _)| idx)
                .collect();
            if unasked.is_empty() {
                debug!("all civilizations asked, clearing the asked set");
                self.asked.clear();
                continue;
            }
            let pick = unasked[self.rng.gen_range(0..unasked.len())];
            let pool = &self.pools[pick];
            self.asked.insert(pool.key.clone());
            if pool.records.is_empty() {
                // Nothing quizzable for this civilization under the current
                // toggles; it still counts as asked.
                continue;
            }
            let record = pool.records[self.rng.gen_range(0..pool.records.len())].clone();
            self.current = Some(record.clone());
            return Ok(record);
        }
    }

    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.current.as_ref()
    }

    /// Grade an answer against the current question. `total_asked` counts
    /// every attempt, not unique civilizations.
    pub fn submit_answer(&mut self, text: &str) -> Result<SubmitOutcome, SessionError> {
        let question = self.current.as_ref().ok_or(SessionError::NoActiveQuestion)?;
        let correct = grader::grade(text, &question.civilization);
        if correct {
            self.score += 1;
        }
        self.total_asked += 1;
        Ok(SubmitOutcome { correct, correct_answer: question.civilization.clone() })
    }

    /// Full reset: asked set cleared, score and attempt counter zeroed.
    pub fn reset(&mut self) {
        self.asked.clear();
        self.current = None;
        self.score = 0;
        self.total_asked = 0;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_asked(&self) -> u32 {
        self.total_asked
    }

    /// Civilizations asked since the set last cleared.
    pub fn asked_count(&self) -> usize {
        self.asked.len()
    }
}

// ---------------------------------------------------------------------------
// Unified interface
// ---------------------------------------------------------------------------

/// One session, either variant, selected by [`SessionMode`].
#[derive(Debug)]
pub enum QuizSession {
    Batch(BatchSession),
    Streaming(StreamingSession),
}

impl QuizSession {
    pub fn new(mode: SessionMode, pools: Vec<CivQuestions>, seed: Option<u64>) -> Self {
        match mode {
            SessionMode::Batch { question_count } => {
                let pool = pools.into_iter().flat_map(|p| p.records).collect();
                QuizSession::Batch(BatchSession::new(pool, question_count, seed))
            }
            SessionMode::Streaming => {
                QuizSession::Streaming(StreamingSession::new(pools, seed))
            }
        }
    }

    pub fn submit_answer(&mut self, text: &str) -> Result<SubmitOutcome, SessionError> {
        match self {
            QuizSession::Batch(session) => session.submit_answer(text),
            QuizSession::Streaming(session) => session.submit_answer(text),
        }
    }

    pub fn current_question(&self) -> Option<&QuestionRecord> {
        match self {
            QuizSession::Batch(session) => session.current_question(),
            QuizSession::Streaming(session) => session.current_question(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            QuizSession::Batch(session) => session.reset(),
            QuizSession::Streaming(session) => session.reset(),
        }
    }

    pub fn score(&self) -> u32 {
        match self {
            QuizSession::Batch(session) => session.score(),
            QuizSession::Streaming(session) => session.score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(civ: &str, text: &str) -> QuestionRecord {
        QuestionRecord {
            label: "Civ Bonus".to_string(),
            text: text.to_string(),
            civilization: civ.to_string(),
        }
    }

    fn pools() -> Vec<CivQuestions> {
        vec![
            CivQuestions {
                key: "franks".to_string(),
                records: vec![record("Franks", "Castles cost less"), record("Franks", "Free farm upgrades")],
            },
            CivQuestions {
                key: "goths".to_string(),
                records: vec![record("Goths", "Infantry cost less")],
            },
            CivQuestions { key: "huns".to_string(), records: vec![record("Huns", "No houses")] },
        ]
    }

    #[test]
    fn batch_queue_is_capped_and_deterministic_with_seed() {
        let flat: Vec<QuestionRecord> =
            pools().into_iter().flat_map(|p| p.records).collect();
        let a = BatchSession::new(flat.clone(), 2, Some(7));
        let b = BatchSession::new(flat, 2, Some(7));
        assert_eq!(a.queue_len(), 2);
        assert_eq!(a.current_question(), b.current_question());
    }

    #[test]
    fn batch_slot_accepts_one_submission() {
        let flat: Vec<QuestionRecord> =
            pools().into_iter().flat_map(|p| p.records).collect();
        let mut session = BatchSession::new(flat, 3, Some(1));
        let civ = session.current_question().map(|q| q.civilization.clone()).unwrap();
        let outcome = session.submit_answer(&civ).unwrap();
        assert!(outcome.correct);
        assert_eq!(session.submit_answer(&civ), Err(SessionError::AlreadyAnswered));
        assert_eq!(session.advance(), Advance::Next);
    }

    #[test]
    fn batch_cycle_reports_score_and_regenerates() {
        let flat: Vec<QuestionRecord> =
            pools().into_iter().flat_map(|p| p.records).collect();
        let mut session = BatchSession::new(flat, 2, Some(42));
        let mut running_total = 0u32;

        for _ in 0..2 {
            let civ = session.current_question().map(|q| q.civilization.clone()).unwrap();
            session.submit_answer(&civ).unwrap();
            match session.advance() {
                Advance::Next => {}
                Advance::CycleComplete { session_score } => running_total += session_score,
            }
        }
        assert_eq!(running_total, 2);
        assert_eq!(session.score(), 0);
        assert_eq!(session.queue_len(), 2);
        assert!(session.current_question().is_some());
    }

    #[test]
    fn batch_empty_pool_has_no_active_question() {
        let mut session = BatchSession::new(Vec::new(), 10, Some(1));
        assert_eq!(session.queue_len(), 0);
        assert!(session.current_question().is_none());
        assert_eq!(session.submit_answer("Franks"), Err(SessionError::NoActiveQuestion));
    }

    #[test]
    fn streaming_does_not_repeat_until_exhausted() {
        let mut session = StreamingSession::new(pools(), Some(5));
        let mut civs = HashSet::new();
        for _ in 0..3 {
            let q = session.next_question().unwrap();
            civs.insert(q.civilization);
        }
        assert_eq!(civs.len(), 3, "all three civilizations asked exactly once");
        assert_eq!(session.asked_count(), 3);

        // Exhausted: the asked set clears and previously-asked civilizations
        // become selectable again.
        let q = session.next_question().unwrap();
        assert!(civs.contains(&q.civilization));
        assert_eq!(session.asked_count(), 1);
    }

    #[test]
    fn streaming_counts_attempts_not_civilizations() {
        let mut session = StreamingSession::new(pools(), Some(5));
        let q = session.next_question().unwrap();
        assert!(session.submit_answer(&q.civilization).unwrap().correct);
        assert!(!session.submit_answer("wrong").unwrap().correct);
        assert_eq!(session.total_asked(), 2);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn streaming_skips_empty_civilizations() {
        let pools = vec![
            CivQuestions { key: "empty".to_string(), records: Vec::new() },
            CivQuestions { key: "goths".to_string(), records: vec![record("Goths", "B")] },
        ];
        let mut session = StreamingSession::new(pools, Some(9));
        for _ in 0..5 {
            let q = session.next_question().unwrap();
            assert_eq!(q.civilization, "Goths");
        }
    }

    #[test]
    fn streaming_reports_no_questions_for_empty_pools() {
        let pools = vec![CivQuestions { key: "empty".to_string(), records: Vec::new() }];
        let mut session = StreamingSession::new(pools, Some(1));
        assert_eq!(session.next_question(), Err(SessionError::NoQuestions));
        assert_eq!(session.submit_answer("x"), Err(SessionError::NoActiveQuestion));
    }

    #[test]
    fn streaming_reset_clears_everything() {
        let mut session = StreamingSession::new(pools(), Some(3));
        let q = session.next_question().unwrap();
        session.submit_answer(&q.civilization).unwrap();
        session.reset();
        assert_eq!(session.score(), 0);
        assert_eq!(session.total_asked(), 0);
        assert_eq!(session.asked_count(), 0);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn unified_session_delegates_by_mode() {
        let mut batch = QuizSession::new(SessionMode::Batch { question_count: 2 }, pools(), Some(1));
        assert!(matches!(&batch, QuizSession::Batch(_)));
        let civ = batch.current_question().map(|q| q.civilization.clone()).unwrap();
        assert!(batch.submit_answer(&civ).unwrap().correct);

        let mut streaming = QuizSession::new(SessionMode::Streaming, pools(), Some(1));
        assert!(matches!(&streaming, QuizSession::Streaming(_)));
        assert_eq!(streaming.submit_answer("x"), Err(SessionError::NoActiveQuestion));
        streaming.reset();
    }
}
