//! Similarity gate — picks the pooled line closest to a new line.

/// Default minimum score a candidate needs to be compared token-by-token.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;

/// Character-level Levenshtein distance.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// `(maxLen - distance) / maxLen`, in `[0, 1]`. Two empty strings score 1.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = edit_distance(a, b);
    (max_len - distance) as f64 / max_len as f64
}

/// Best pool entry for `line`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub index: usize,
    pub score: f64,
}

/// Scan the pool and return the entry with the strictly highest score.
///
/// The first entry wins ties. Entries scoring 0 are never selected. The
/// threshold is not applied here; see [`accept`].
pub fn best_candidate<S: AsRef<str>>(line: &str, pool: &[S]) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for (index, entry) in pool.iter().enumerate() {
        let score = similarity(line, entry.as_ref());
        let best_score = best.map(|c| c.score).unwrap_or(0.0);
        if score > best_score {
            best = Some(Candidate { index, score });
        }
    }
    best
}

/// Apply the threshold to a scan result.
pub fn accept(candidate: Option<Candidate>, threshold: f64) -> Option<Candidate> {
    candidate.filter(|c| c.score >= threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── edit distance ──────────────────────────────────────────

    #[test]
    fn test_edit_distance_identity() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("abc", "abc"), 0);
    }

    #[test]
    fn test_edit_distance_kitten_sitting() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_edit_distance_empty_side() {
        assert_eq!(edit_distance("", "abcd"), 4);
        assert_eq!(edit_distance("abcd", ""), 4);
    }

    #[test]
    fn test_edit_distance_symmetric() {
        let samples = ["", "a", "flaw", "lawn", "monkey x [bob]", "Hello World"];
        for a in samples {
            for b in samples {
                assert_eq!(edit_distance(a, b), edit_distance(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    // ─── score ──────────────────────────────────────────────────

    #[test]
    fn test_similarity_identical_is_one() {
        assert_eq!(similarity("connection reset", "connection reset"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn test_similarity_in_unit_range() {
        let samples = ["", "x", "abc", "completely different", "abd"];
        for a in samples {
            for b in samples {
                let s = similarity(a, b);
                assert!((0.0..=1.0).contains(&s), "{a:?} vs {b:?} -> {s}");
            }
        }
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_similarity_kitten_sitting() {
        let s = similarity("kitten", "sitting");
        assert!((s - 4.0 / 7.0).abs() < 1e-12);
    }

    // ─── candidate selection ────────────────────────────────────

    #[test]
    fn test_best_candidate_empty_pool() {
        let pool: Vec<String> = Vec::new();
        assert_eq!(best_candidate("anything", &pool), None);
    }

    #[test]
    fn test_best_candidate_picks_highest() {
        let pool = ["totally unrelated", "user bob logged in", "user alice logged in"];
        let c = best_candidate("user bob logged out", &pool).expect("candidate");
        assert_eq!(c.index, 1);
    }

    #[test]
    fn test_best_candidate_first_wins_ties() {
        let pool = ["abcx", "abcy"];
        let c = best_candidate("abcz", &pool).expect("candidate");
        assert_eq!(c.index, 0);
    }

    #[test]
    fn test_best_candidate_ignores_zero_scores() {
        let pool = ["xyz"];
        assert_eq!(best_candidate("abc", &pool), None);
    }

    #[test]
    fn test_best_candidate_idempotent() {
        let pool = vec![
            "monkey x [michaeld] Hello World".to_string(),
            "disk full".to_string(),
        ];
        let line = "monkey x y x [bob] Hello World";
        let first = best_candidate(line, &pool);
        let second = best_candidate(line, &pool);
        assert_eq!(first, second);
        assert_eq!(first.map(|c| c.index), Some(0));
    }

    #[test]
    fn test_accept_threshold() {
        let c = Some(Candidate { index: 2, score: 0.5 });
        assert_eq!(accept(c, 0.5), c);
        assert_eq!(accept(c, 0.51), None);
        assert_eq!(accept(None, 0.0), None);
    }
}
