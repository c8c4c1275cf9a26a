//! Splits a summary into numbered thread chunks.
//!
//! Lines are packed into chunks separated by single spaces. A chunk is closed
//! as soon as adding the next line would reach the budget. A single line at
//! or over the budget is cut once: words are packed greedily into a head
//! piece and everything left over becomes a tail piece, which may itself be
//! over budget.

use thiserror::Error;

/// Characters available per post before the positional suffix.
pub const CHUNK_BUDGET: usize = 270;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadChunk {
    /// 0-based position in the thread
    pub index: usize,
    pub text: String,
    pub total: usize,
}

impl ThreadChunk {
    /// Post text with its `(n/total)` suffix.
    pub fn render(&self) -> String {
        format!("{} ({}/{})", self.text, self.index + 1, self.total)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SegmentationError {
    #[error("summary produced no thread chunks")]
    EmptySummary,
}

pub fn segment(summary: &str) -> Vec<ThreadChunk> {
    segment_with_budget(summary, CHUNK_BUDGET)
}

/// Like [`segment`], but an empty result is an error.
pub fn try_segment(summary: &str) -> Result<Vec<ThreadChunk>, SegmentationError> {
    let chunks = segment(summary);
    if chunks.is_empty() {
        return Err(SegmentationError::EmptySummary);
    }
    Ok(chunks)
}

pub fn segment_with_budget(summary: &str, budget: usize) -> Vec<ThreadChunk> {
    let mut pieces: Vec<String> = Vec::new();
    let mut acc = String::new();
    let mut acc_len = 0;

    for line in summary.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let line_len = line.chars().count();

        if line_len >= budget {
            flush(&mut pieces, &mut acc, &mut acc_len);
            let (head, tail) = split_long_line(line, budget);
            pieces.extend([head, tail].into_iter().filter(|p| !p.is_empty()));
            continue;
        }

        if acc_len + line_len + 1 >= budget {
            flush(&mut pieces, &mut acc, &mut acc_len);
        }
        acc.push_str(line);
        acc.push(' ');
        acc_len += line_len + 1;
    }
    flush(&mut pieces, &mut acc, &mut acc_len);

    let total = pieces.len();
    pieces
        .into_iter()
        .enumerate()
        .map(|(index, text)| ThreadChunk { index, text, total })
        .collect()
}

fn flush(pieces: &mut Vec<String>, acc: &mut String, acc_len: &mut usize) {
    let text = acc.trim_end();
    if !text.is_empty() {
        pieces.push(text.to_string());
    }
    acc.clear();
    *acc_len = 0;
}

/// Greedy head/tail cut of an over-long line.
fn split_long_line(line: &str, budget: usize) -> (String, String) {
    let mut head: Vec<&str> = Vec::new();
    let mut tail: Vec<&str> = Vec::new();
    let mut length = 0;

    for word in line.split_whitespace() {
        length += word.chars().count() + 1;
        if length < budget && tail.is_empty() {
            head.push(word);
        } else {
            tail.push(word);
        }
    }

    (head.join(" "), tail.join(" "))
}
