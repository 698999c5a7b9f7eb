//! Model — tokens, variations, patterns and alignment vertices.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Word used for wildcard tokens in a pattern.
pub const WILDCARD: &str = "*";

/// One literal text that has occupied a wildcard slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    pub text: String,
    /// Always 1 today; accumulation across sightings belongs to a pattern store.
    pub occurrence_count: i64,
}

impl Variation {
    pub fn new(text: String) -> Self {
        Self {
            text,
            occurrence_count: 1,
        }
    }
}

/// A pattern element: either a literal word or a wildcard carrying observed fillers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub word: String,
    pub is_variable: bool,
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<Variation>,
}

impl Token {
    pub fn literal(word: &str) -> Self {
        Self {
            word: word.to_string(),
            is_variable: false,
            is_required: true,
            variations: Vec::new(),
        }
    }

    /// Wildcard bridging a gap. Required only when both sides contributed a filler.
    pub fn wildcard(variations: Vec<Variation>) -> Self {
        Self {
            word: WILDCARD.to_string(),
            is_variable: true,
            is_required: variations.len() > 1,
            variations,
        }
    }
}

/// A discovered template: literals interspersed with wildcards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub tokens: Vec<Token>,
    pub frequency: f64,
}

impl Pattern {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            frequency: 0.0,
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .filter(|t| !t.is_variable)
            .map(|t| t.word.as_str())
    }

    pub fn wildcards(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_variable)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&token.word)?;
        }
        Ok(())
    }
}

/// A matched cell of the alignment matrix.
///
/// `x` indexes the shorter token sequence, `y` the longer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vertex {
    pub x: usize,
    pub y: usize,
    pub run_length: usize,
}

impl Vertex {
    pub fn new(x: usize, y: usize, run_length: usize) -> Self {
        Self { x, y, run_length }
    }

    /// Manhattan distance from `(x, y)`. Caller guarantees `self` is not behind it.
    pub fn distance_from(&self, x: usize, y: usize) -> usize {
        (self.x - x) + (self.y - y)
    }
}

/// Sort key used by the path selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexDistance {
    pub distance: usize,
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_token_is_required() {
        let t = Token::literal("monkey");
        assert_eq!(t.word, "monkey");
        assert!(!t.is_variable);
        assert!(t.is_required);
        assert!(t.variations.is_empty());
    }

    #[test]
    fn test_wildcard_required_only_with_two_fillers() {
        let one = Token::wildcard(vec![Variation::new("bob".into())]);
        assert!(one.is_variable);
        assert!(!one.is_required);

        let two = Token::wildcard(vec![
            Variation::new("bob".into()),
            Variation::new("alice".into()),
        ]);
        assert!(two.is_required);
        assert!(two.variations.iter().all(|v| v.occurrence_count == 1));
    }

    #[test]
    fn test_pattern_display() {
        let p = Pattern::new(vec![
            Token::literal("GET"),
            Token::wildcard(vec![Variation::new("index".into())]),
            Token::literal("200"),
        ]);
        assert_eq!(p.to_string(), "GET * 200");
        assert_eq!(p.frequency, 0.0);
        assert_eq!(p.literals().collect::<Vec<_>>(), vec!["GET", "200"]);
        assert_eq!(p.wildcards().count(), 1);
    }

    #[test]
    fn test_pattern_json_omits_empty_variations() {
        let p = Pattern::new(vec![Token::literal("a")]);
        let json = serde_json::to_string(&p).expect("serialize");
        assert!(!json.contains("variations"));
        let back: Pattern = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, p);
    }

    #[test]
    fn test_vertex_distance() {
        let v = Vertex::new(3, 5, 1);
        assert_eq!(v.distance_from(1, 1), 6);
        assert_eq!(v.distance_from(3, 5), 0);
    }
}
