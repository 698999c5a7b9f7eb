//! Pattern assembler.
//!
//! Turns a selected vertex path into literal and wildcard tokens. A vertex is
//! contiguous with the previous one when neither axis skips a token; any
//! skipped span becomes one wildcard carrying the skipped text of each side,
//! followed by the literal at the vertex.

use super::model::{Pattern, Token, Variation, Vertex};

/// Build a pattern from `path`. Returns `None` for an empty path.
pub fn assemble<S, L>(path: &[Vertex], short: &[S], long: &[L]) -> Option<Pattern>
where
    S: AsRef<str>,
    L: AsRef<str>,
{
    if path.is_empty() {
        return None;
    }

    let mut tokens = Vec::with_capacity(path.len() * 2);
    // Index of the first token not yet consumed on each side.
    let (mut next_x, mut next_y) = (0usize, 0usize);

    for v in path {
        let skipped_short = joined(short, next_x, v.x);
        let skipped_long = joined(long, next_y, v.y);

        if !skipped_short.is_empty() || !skipped_long.is_empty() {
            tracing::trace!(
                x = v.x,
                y = v.y,
                short = %skipped_short,
                long = %skipped_long,
                "gap before vertex"
            );
            let variations: Vec<Variation> = [skipped_short, skipped_long]
                .into_iter()
                .filter(|text| !text.is_empty())
                .map(Variation::new)
                .collect();
            tokens.push(Token::wildcard(variations));
        }

        tokens.push(Token::literal(short[v.x].as_ref()));
        next_x = v.x + 1;
        next_y = v.y + 1;
    }

    let pattern = Pattern::new(tokens);
    tracing::trace!(pattern = %pattern, "assembled pattern");
    Some(pattern)
}

/// Concatenate `tokens[start..end]` without separators; empty when `start >= end`.
fn joined<T: AsRef<str>>(tokens: &[T], start: usize, end: usize) -> String {
    let mut text = String::new();
    if start < end {
        for token in &tokens[start..end] {
            text.push_str(token.as_ref());
        }
    }
    text
}
