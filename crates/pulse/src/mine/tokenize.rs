//! Line tokenizer.
//!
//! Letters and digits accumulate into word tokens, whitespace only separates,
//! and every other character becomes a one-character token of its own.
//! Tokens borrow from the input line.

pub fn tokenize(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (pos, ch) in line.char_indices() {
        if ch.is_alphanumeric() {
            if word_start.is_none() {
                word_start = Some(pos);
            }
            continue;
        }

        if let Some(start) = word_start.take() {
            tokens.push(&line[start..pos]);
        }

        if !ch.is_whitespace() {
            tokens.push(&line[pos..pos + ch.len_utf8()]);
        }
    }

    if let Some(start) = word_start {
        tokens.push(&line[start..]);
    }

    tokens
}
