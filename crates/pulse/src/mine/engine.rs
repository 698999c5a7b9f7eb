//! Pattern miner session.
//!
//! Owns the unmatched pool and the discovered patterns. Each call to
//! [`PatternMiner::analyze`] runs the full pipeline for one line:
//! similarity gate → tokenize → align → select path → assemble.

use serde::Serialize;
use tracing::{debug, trace};

use crate::conf::PulseConfig;
use super::align::build_alignment;
use super::assemble::assemble;
use super::error::AlignError;
use super::model::Pattern;
use super::path::select_path;
use super::report::{MinerEvent, Reporter};
use super::similarity::{accept, best_candidate};
use super::tokenize::tokenize;

/// Outcome of analyzing one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    /// A pattern was found against pool entry `candidate` and stored at `pattern`.
    Matched { pattern: usize, candidate: usize, score: f64 },
    /// No pattern; the line joined the pool.
    Pooled { best_score: Option<f64> },
    Dropped(DropReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    LineTooLong,
    PoolFull,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MinerStats {
    pub lines_seen: u64,
    /// Token alignments attempted.
    pub comparisons: u64,
    pub patterns_found: u64,
    pub lines_pooled: u64,
    pub lines_dropped: u64,
}

pub struct PatternMiner {
    config: PulseConfig,
    reporter: Box<dyn Reporter>,
    unmatched: Vec<String>,
    patterns: Vec<Pattern>,
    stats: MinerStats,
}

impl PatternMiner {
    pub fn new(config: PulseConfig, reporter: impl Reporter + 'static) -> Self {
        Self {
            config,
            reporter: Box::new(reporter),
            unmatched: Vec::new(),
            patterns: Vec::new(),
            stats: MinerStats::default(),
        }
    }

    /// Process one line.
    pub fn analyze(&mut self, line: &str) -> Analysis {
        self.stats.lines_seen += 1;

        let len = line.chars().count();
        if self.config.max_line_len > 0 && len > self.config.max_line_len {
            debug!(len, max = self.config.max_line_len, "line exceeds length limit");
            self.stats.lines_dropped += 1;
            self.reporter.report(&MinerEvent::LineTooLong { len });
            return Analysis::Dropped(DropReason::LineTooLong);
        }

        let best = best_candidate(line, &self.unmatched);
        trace!(candidate = ?best, pool = self.unmatched.len(), "similarity scan");

        if let Some(candidate) = accept(best, self.config.similarity_threshold) {
            self.reporter.report(&MinerEvent::LookingForPattern {
                candidate: candidate.index,
                score: candidate.score,
            });
            self.stats.comparisons += 1;

            if let Some(pattern) = self.find_pattern(line, &self.unmatched[candidate.index]) {
                debug!(pattern = %pattern, score = candidate.score, "found a pattern");
                self.patterns.push(pattern);
                self.stats.patterns_found += 1;
                let index = self.patterns.len() - 1;
                self.reporter.report(&MinerEvent::PatternFound { index });
                return Analysis::Matched {
                    pattern: index,
                    candidate: candidate.index,
                    score: candidate.score,
                };
            }
        }

        if self.config.max_pool_size > 0 && self.unmatched.len() >= self.config.max_pool_size {
            self.stats.lines_dropped += 1;
            self.reporter.report(&MinerEvent::PoolFull);
            return Analysis::Dropped(DropReason::PoolFull);
        }

        self.unmatched.push(line.to_string());
        self.stats.lines_pooled += 1;
        self.reporter.report(&MinerEvent::AddedToUnmatched);
        Analysis::Pooled {
            best_score: best.map(|c| c.score),
        }
    }

    /// Align two lines and assemble a pattern, if their tokens share any anchor.
    pub fn find_pattern(&self, line: &str, other: &str) -> Option<Pattern> {
        let line_tokens = tokenize(line);
        let other_tokens = tokenize(other);

        // The shorter sequence drives the rows; on equal length the new line is `long`.
        let (short, long) = if line_tokens.len() < other_tokens.len() {
            (&line_tokens, &other_tokens)
        } else {
            (&other_tokens, &line_tokens)
        };

        let alignment = match build_alignment(short, long) {
            Ok(alignment) => alignment,
            Err(AlignError::EmptySequence) => {
                trace!("empty token sequence, no pattern");
                return None;
            }
            Err(e) => {
                debug!(error = %e, "alignment rejected");
                return None;
            }
        };

        let path = select_path(alignment.vertices, self.config.detour_window);
        assemble(&path, short, long)
    }

    /// Clear pool, patterns and counters.
    pub fn reset(&mut self) {
        self.unmatched.clear();
        self.patterns.clear();
        self.stats = MinerStats::default();
    }

    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn stats(&self) -> &MinerStats {
        &self.stats
    }

    pub fn config(&self) -> &PulseConfig {
        &self.config
    }

    pub fn into_patterns(self) -> Vec<Pattern> {
        self.patterns
    }
}

impl std::fmt::Debug for PatternMiner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternMiner")
            .field("config", &self.config)
            .field("unmatched", &self.unmatched.len())
            .field("patterns", &self.patterns.len())
            .field("stats", &self.stats)
            .finish()
    }
}
